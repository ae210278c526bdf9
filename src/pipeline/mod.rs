//! Training and playback pipelines

mod observers;
mod playback;
mod training;

pub use observers::{
    EpisodeRecord, JsonlObserver, MetricsObserver, ProgressObserver, ReportObserver,
};
pub use playback::{GreedyPlayer, PlaybackConfig, PlaybackOutcome, PlaybackStep, PlaybackTrace};
pub use training::{
    DEFAULT_MAX_STEPS, DEFAULT_NUM_EPISODES, EpisodeOutcome, TrainingConfig, TrainingPipeline,
    TrainingResult,
};
