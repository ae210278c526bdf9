//! CLI commands

pub mod train;
