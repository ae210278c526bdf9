//! Observer port - abstraction for training observation and reporting
//!
//! Observers let the training pipeline report progress and collect data
//! without coupling the episode loop to any particular output format.

use crate::{Result, pipeline::EpisodeOutcome};

/// Observer trait for monitoring training.
///
/// Methods are called in this order:
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode: `on_episode_end(episode, outcome, steps, epsilon)`
/// 3. `on_training_end()` - once at the end
///
/// All methods default to no-ops so implementations only override the
/// events they care about.
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its outcome, step count, and the
    /// exploration rate after decay.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: EpisodeOutcome,
        _steps: usize,
        _epsilon: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode. Use this to flush files or
    /// display final summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
