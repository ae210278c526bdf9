//! Tabular Q-learning on a slippery grid world
//!
//! This crate provides:
//! - A fixed grid world environment with stochastic "slipping" movement
//! - A tabular Q-learning agent with epsilon-greedy exploration
//! - A training pipeline with composable observers
//! - Greedy playback of learned policies with a step-by-step trace

pub mod cli;
pub mod error;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use gridworld::{Action, Cell, Grid, GridWorld, RewardModel, Transition};
pub use pipeline::{
    EpisodeOutcome, GreedyPlayer, PlaybackConfig, PlaybackOutcome, PlaybackTrace, TrainingConfig,
    TrainingPipeline, TrainingResult,
};
pub use q_learning::{QLearningAgent, QTable};
