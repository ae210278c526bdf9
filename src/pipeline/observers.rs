//! Observer implementations for training pipelines
//!
//! Observers allow composable reporting during training without coupling
//! the episode loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, pipeline::EpisodeOutcome, ports::Observer};

/// Progress bar observer - shows training progress with outcome counts
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    monsters: usize,
    step_caps: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            monsters: 0,
            step_caps: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} M:{} C:{}", self.goals, self.monsters, self.step_caps)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (G:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: EpisodeOutcome,
        _steps: usize,
        _epsilon: f64,
    ) -> Result<()> {
        match outcome {
            EpisodeOutcome::Goal => self.goals += 1,
            EpisodeOutcome::Monster => self.monsters += 1,
            EpisodeOutcome::StepCap => self.step_caps += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Report observer - prints a progress line every `interval` episodes
pub struct ReportObserver {
    interval: usize,
    total_episodes: usize,
}

impl ReportObserver {
    /// Create a report observer printing every `interval` episodes
    pub fn new(interval: usize) -> Self {
        Self {
            interval,
            total_episodes: 0,
        }
    }
}

impl Observer for ReportObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.total_episodes = total_episodes;
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        _outcome: EpisodeOutcome,
        _steps: usize,
        epsilon: f64,
    ) -> Result<()> {
        if self.interval > 0 && (episode + 1).is_multiple_of(self.interval) {
            println!(
                "Episode {}/{} completed. Epsilon: {epsilon:.4}",
                episode + 1,
                self.total_episodes
            );
        }
        Ok(())
    }
}

/// Metrics observer - accumulates outcome counts and step statistics
pub struct MetricsObserver {
    goals: usize,
    monsters: usize,
    step_caps: usize,
    total_episodes: usize,
    total_steps: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            goals: 0,
            monsters: 0,
            step_caps: 0,
            total_episodes: 0,
            total_steps: 0,
        }
    }

    /// Fraction of episodes that reached the goal
    pub fn goal_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.goals as f64 / self.total_episodes as f64
        }
    }

    /// Mean steps per episode
    pub fn mean_steps(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.total_episodes as f64
        }
    }

    pub fn goals(&self) -> usize {
        self.goals
    }

    pub fn monsters(&self) -> usize {
        self.monsters
    }

    pub fn step_caps(&self) -> usize {
        self.step_caps
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(
        &mut self,
        _episode: usize,
        outcome: EpisodeOutcome,
        steps: usize,
        _epsilon: f64,
    ) -> Result<()> {
        match outcome {
            EpisodeOutcome::Goal => self.goals += 1,
            EpisodeOutcome::Monster => self.monsters += 1,
            EpisodeOutcome::StepCap => self.step_caps += 1,
        }
        self.total_episodes += 1;
        self.total_steps += steps;
        Ok(())
    }
}

/// One line of the JSONL episode log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode number (0-based)
    pub episode: usize,
    /// How the episode ended
    pub outcome: EpisodeOutcome,
    /// Steps taken
    pub steps: usize,
    /// Exploration rate after decay
    pub epsilon: f64,
}

/// JSONL observer - streams one record per episode to a file
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create {}", path.as_ref().display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: EpisodeOutcome,
        steps: usize,
        epsilon: f64,
    ) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            outcome,
            steps,
            epsilon,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n").map_err(|source| Error::Io {
            operation: "write episode record".to_string(),
            source,
        })?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| Error::Io {
            operation: "flush episode log".to_string(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_accumulate_counts_and_steps() {
        let mut metrics = MetricsObserver::new();
        metrics.on_episode_end(0, EpisodeOutcome::Goal, 10, 0.9).unwrap();
        metrics.on_episode_end(1, EpisodeOutcome::Monster, 4, 0.8).unwrap();
        metrics.on_episode_end(2, EpisodeOutcome::Goal, 6, 0.7).unwrap();

        assert_eq!(metrics.goals(), 2);
        assert_eq!(metrics.monsters(), 1);
        assert_eq!(metrics.step_caps(), 0);
        assert!((metrics.goal_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert!((metrics.mean_steps() - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn jsonl_records_round_trip() {
        let record = EpisodeRecord {
            episode: 3,
            outcome: EpisodeOutcome::StepCap,
            steps: 100,
            epsilon: 0.5,
        };
        let line = serde_json::to_string(&record).unwrap();
        let parsed: EpisodeRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.episode, 3);
        assert_eq!(parsed.outcome, EpisodeOutcome::StepCap);
    }
}
