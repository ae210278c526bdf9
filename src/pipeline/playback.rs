//! Greedy playback of a learned policy

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    gridworld::{Action, Cell, GridWorld},
    pipeline::training::DEFAULT_MAX_STEPS,
    q_learning::QTable,
};

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Step cap for the playback run
    pub max_steps: usize,

    /// Seed for the environment RNG; slips stay active during playback
    pub seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
        }
    }
}

/// How a playback run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackOutcome {
    /// Landed on the goal
    GoalReached,
    /// Landed on a monster
    EatenByMonster,
    /// Hit the step cap without reaching a terminal cell
    StepCapReached,
}

/// One recorded playback step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStep {
    /// Step number (0-based)
    pub step: usize,
    /// Coordinates before the move
    pub from: (usize, usize),
    /// Cell tag before the move
    pub from_cell: Cell,
    /// Greedy action chosen
    pub action: Action,
    /// Realized coordinates after the move
    pub to: (usize, usize),
    /// Cell tag after the move
    pub to_cell: Cell,
    /// The move was blocked by the grid boundary
    pub hit_wall: bool,
    /// The move slid one extra cell
    pub slipped: bool,
}

/// Full trace of a playback run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackTrace {
    /// Steps taken, in order
    pub steps: Vec<PlaybackStep>,
    /// Terminal classification of the run
    pub outcome: PlaybackOutcome,
    /// Coordinates where the run ended
    pub final_state: (usize, usize),
    /// Cell tag where the run ended
    pub final_cell: Cell,
}

/// Replays a trained Q-table greedily from the start cell.
///
/// Exploration is off (epsilon = 0) but the environment keeps slipping,
/// so two playback runs of the same table can differ.
pub struct GreedyPlayer {
    rng: StdRng,
}

impl GreedyPlayer {
    /// Create a player with an entropy-seeded environment RNG
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a player with a fixed environment seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Play one greedy run and return the trace.
    ///
    /// Terminal cells are checked before acting, so a run that starts on
    /// the goal succeeds immediately with an empty step list.
    pub fn play(&mut self, env: &GridWorld, q_table: &QTable, config: &PlaybackConfig) -> PlaybackTrace {
        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        let mut state = env.start_index();
        let mut steps = Vec::new();
        let mut outcome = PlaybackOutcome::StepCapReached;

        for step in 0..config.max_steps {
            match env.cell(state) {
                Cell::Goal => {
                    outcome = PlaybackOutcome::GoalReached;
                    break;
                }
                Cell::Monster => {
                    outcome = PlaybackOutcome::EatenByMonster;
                    break;
                }
                Cell::Start | Cell::Normal => {}
            }

            let action = q_table.greedy_action(state);
            let transition = env.step(state, action, &mut self.rng);

            steps.push(PlaybackStep {
                step,
                from: env.grid().coords(state),
                from_cell: env.cell(state),
                action,
                to: env.grid().coords(transition.next),
                to_cell: env.cell(transition.next),
                hit_wall: transition.hit_wall,
                slipped: transition.slipped,
            });

            state = transition.next;
        }

        PlaybackTrace {
            steps,
            outcome,
            final_state: env.grid().coords(state),
            final_cell: env.cell(state),
        }
    }
}

impl Default for GreedyPlayer {
    fn default() -> Self {
        Self::new()
    }
}
