//! Training pipeline for the Q-learning agent

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    gridworld::{Cell, GridWorld},
    ports::Observer,
    q_learning::QLearningAgent,
};

/// Default number of training episodes
pub const DEFAULT_NUM_EPISODES: usize = 10_000;
/// Per-episode step cap preventing unbounded wandering
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub num_episodes: usize,

    /// Step cap per episode
    pub max_steps: usize,

    /// Random seed. The agent is seeded with this value, the environment
    /// RNG with `seed + 1`; `None` draws both from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: DEFAULT_NUM_EPISODES,
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
        }
    }
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// Reached the goal cell
    Goal,
    /// Walked into a monster
    Monster,
    /// Hit the step cap without reaching a terminal cell
    StepCap,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Episodes that reached the goal
    pub goal_episodes: usize,

    /// Episodes that ended on a monster
    pub monster_episodes: usize,

    /// Episodes stopped by the step cap
    pub step_cap_episodes: usize,

    /// Goal rate
    pub goal_rate: f64,

    /// Monster rate
    pub monster_rate: f64,

    /// Step-cap rate
    pub step_cap_rate: f64,

    /// Exploration rate after the final decay
    pub final_epsilon: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        total_episodes: usize,
        goal_episodes: usize,
        monster_episodes: usize,
        step_cap_episodes: usize,
        final_epsilon: f64,
    ) -> Self {
        let rate = |n: usize| {
            if total_episodes > 0 {
                n as f64 / total_episodes as f64
            } else {
                0.0
            }
        };
        Self {
            total_episodes,
            goal_episodes,
            monster_episodes,
            step_cap_episodes,
            goal_rate: rate(goal_episodes),
            monster_rate: rate(monster_episodes),
            step_cap_rate: rate(step_cap_episodes),
            final_epsilon,
        }
    }
}

/// Episode loop driving the agent through the environment.
///
/// The pipeline owns the environment RNG (slip rolls); the agent owns its
/// action-selection RNG. Both derive from the configured seed so runs are
/// reproducible.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given environment and agent
    pub fn run(&mut self, env: &GridWorld, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        let mut env_rng = match self.config.seed {
            Some(seed) => {
                agent.set_seed(seed);
                StdRng::seed_from_u64(seed.wrapping_add(1))
            }
            None => StdRng::from_rng(&mut rand::rng()),
        };

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut goal_episodes = 0;
        let mut monster_episodes = 0;
        let mut step_cap_episodes = 0;

        for episode in 0..self.config.num_episodes {
            let (outcome, steps) = self.run_episode(env, agent, &mut env_rng);
            agent.decay_epsilon();

            match outcome {
                EpisodeOutcome::Goal => goal_episodes += 1,
                EpisodeOutcome::Monster => monster_episodes += 1,
                EpisodeOutcome::StepCap => step_cap_episodes += 1,
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, steps, agent.epsilon())?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.num_episodes,
            goal_episodes,
            monster_episodes,
            step_cap_episodes,
            agent.epsilon(),
        ))
    }

    /// One episode from the start cell to termination or the step cap.
    ///
    /// Terminal cells are checked before acting, so no action is ever taken
    /// from a goal or monster cell. The update uses the realized next
    /// state, slips included.
    fn run_episode(
        &self,
        env: &GridWorld,
        agent: &mut QLearningAgent,
        env_rng: &mut StdRng,
    ) -> (EpisodeOutcome, usize) {
        let mut state = env.start_index();
        let mut steps = 0;

        while steps < self.config.max_steps {
            if env.is_terminal(state) {
                break;
            }

            let action = agent.select_action(state);
            let transition = env.step(state, action, env_rng);
            let reward = env.reward(transition.next);
            agent.update(
                state,
                action,
                reward,
                transition.next,
                env.is_terminal(transition.next),
            );

            state = transition.next;
            steps += 1;
        }

        let outcome = match env.cell(state) {
            Cell::Goal => EpisodeOutcome::Goal,
            Cell::Monster => EpisodeOutcome::Monster,
            Cell::Start | Cell::Normal => EpisodeOutcome::StepCap,
        };
        (outcome, steps)
    }
}
