//! CLI infrastructure for the slipgrid trainer
//!
//! This module provides the command-line interface for training the
//! Q-learning agent and replaying learned policies.

pub mod commands;
pub mod output;
