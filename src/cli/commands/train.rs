//! Train command - train the Q-learning agent, dump the table, replay the
//! learned policy.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output,
    gridworld::{DEFAULT_SLIP_PROBABILITY, Grid, GridWorld},
    pipeline::{
        DEFAULT_MAX_STEPS, DEFAULT_NUM_EPISODES, GreedyPlayer, JsonlObserver, PlaybackConfig,
        PlaybackOutcome, ProgressObserver, ReportObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    q_learning::{
        DEFAULT_DISCOUNT_FACTOR, DEFAULT_EPSILON, DEFAULT_EPSILON_DECAY, DEFAULT_MIN_EPSILON,
        QLearningAgent,
    },
};

#[derive(Debug, Serialize)]
struct SummaryConfig {
    episodes: usize,
    max_steps: usize,
    gamma: f64,
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    slip: f64,
    seed: Option<u64>,
    grid_rows: usize,
    grid_cols: usize,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    playback_outcome: Option<PlaybackOutcome>,
    config: SummaryConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent on the slippery grid world")]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = DEFAULT_NUM_EPISODES)]
    pub episodes: usize,

    /// Step cap per episode (also used for playback)
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Discount factor gamma (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_FACTOR)]
    pub gamma: f64,

    /// Initial exploration rate (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Multiplicative epsilon decay per episode
    #[arg(long, default_value_t = DEFAULT_EPSILON_DECAY)]
    pub epsilon_decay: f64,

    /// Exploration floor
    #[arg(long, default_value_t = DEFAULT_MIN_EPSILON)]
    pub min_epsilon: f64,

    /// Slip probability after a successful move (0.0 disables slipping)
    #[arg(long, default_value_t = DEFAULT_SLIP_PROBABILITY)]
    pub slip: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print a progress line every N episodes (0 disables)
    #[arg(long, default_value_t = 1_000)]
    pub report_interval: usize,

    /// Show a progress bar instead of report lines
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Load the grid map from a text file instead of the built-in 5x5 map
    #[arg(long)]
    pub grid: Option<PathBuf>,

    /// Skip the Q-table dump
    #[arg(long, default_value_t = false)]
    pub no_table: bool,

    /// Skip the greedy playback run
    #[arg(long, default_value_t = false)]
    pub no_playback: bool,

    /// Optional JSONL file receiving one record per episode
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

fn load_grid(args: &TrainArgs) -> Result<Grid> {
    match &args.grid {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("failed to read grid file {}: {e}", path.display()))?;
            let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            Ok(Grid::from_rows(&rows)?)
        }
        None => Ok(Grid::default()),
    }
}

fn validate_unit_interval(value: f64, flag: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(anyhow!("{flag} must be within [0.0, 1.0], got {value}"));
    }
    Ok(())
}

pub fn execute(args: TrainArgs) -> Result<()> {
    validate_unit_interval(args.gamma, "--gamma")?;
    validate_unit_interval(args.epsilon, "--epsilon")?;
    validate_unit_interval(args.epsilon_decay, "--epsilon-decay")?;
    validate_unit_interval(args.min_epsilon, "--min-epsilon")?;

    let grid = load_grid(&args)?;
    let env = GridWorld::new(grid).with_slip(args.slip)?;

    let mut agent = QLearningAgent::new(
        env.num_states(),
        args.gamma,
        args.epsilon,
        args.epsilon_decay,
        args.min_epsilon,
    );

    let config = TrainingConfig {
        num_episodes: args.episodes,
        max_steps: args.max_steps,
        seed: args.seed,
    };

    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let mut pipeline = TrainingPipeline::new(config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    } else if args.report_interval > 0 {
        pipeline = pipeline.with_observer(Box::new(ReportObserver::new(args.report_interval)));
    }
    if let Some(observations_path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(observations_path)?));
    }

    let result = pipeline.run(&env, &mut agent)?;
    output::print_training_result(&result);

    if !args.no_table {
        output::print_q_table(agent.q_table());
    }

    let mut playback_outcome = None;
    if !args.no_playback {
        let playback_config = PlaybackConfig {
            max_steps: args.max_steps,
            // Decorrelate from the training RNG streams.
            seed: args.seed.map(|s| s.wrapping_add(2)),
        };
        let mut player = GreedyPlayer::new();
        let trace = player.play(&env, agent.q_table(), &playback_config);
        output::print_playback_trace(&trace);
        playback_outcome = Some(trace.outcome);
    }

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!("Normalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: result,
            playback_outcome,
            config: SummaryConfig {
                episodes: args.episodes,
                max_steps: args.max_steps,
                gamma: args.gamma,
                epsilon: args.epsilon,
                epsilon_decay: args.epsilon_decay,
                min_epsilon: args.min_epsilon,
                slip: args.slip,
                seed: args.seed,
                grid_rows: env.grid().rows(),
                grid_cols: env.grid().cols(),
            },
        };

        let file = File::create(&summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
