//! Q-learning agent with epsilon-greedy action selection

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{gridworld::Action, q_learning::q_table::QTable};

/// Default discount factor
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
/// Initial exploration rate
pub const DEFAULT_EPSILON: f64 = 1.0;
/// Multiplicative epsilon decay applied after each episode
pub const DEFAULT_EPSILON_DECAY: f64 = 0.995;
/// Exploration floor
pub const DEFAULT_MIN_EPSILON: f64 = 0.01;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent.
///
/// Owns the Q-table and the exploration state. The update rule is the
/// overwrite form `Q[s][a] = r + gamma * max_a' Q[s'][a']`, with no
/// learning-rate blend.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    discount_factor: f64,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent with a zeroed Q-table covering `states` states.
    ///
    /// # Arguments
    ///
    /// * `discount_factor` - gamma (0.0 to 1.0)
    /// * `epsilon` - initial exploration rate
    /// * `epsilon_decay` - multiplicative decay per episode
    /// * `min_epsilon` - exploration floor
    pub fn new(
        states: usize,
        discount_factor: f64,
        epsilon: f64,
        epsilon_decay: f64,
        min_epsilon: f64,
    ) -> Self {
        Self {
            q_table: QTable::zeros(states),
            discount_factor,
            epsilon,
            initial_epsilon: epsilon,
            epsilon_decay,
            min_epsilon,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Agent with the default hyperparameters
    pub fn with_defaults(states: usize) -> Self {
        Self::new(
            states,
            DEFAULT_DISCOUNT_FACTOR,
            DEFAULT_EPSILON,
            DEFAULT_EPSILON_DECAY,
            DEFAULT_MIN_EPSILON,
        )
    }

    /// Builder-style seeding for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_seed(seed);
        self
    }

    /// Reseed the action-selection RNG
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Epsilon-greedy action selection: explore uniformly with probability
    /// epsilon, otherwise exploit the greedy action (first maximum).
    pub fn select_action(&mut self, state: usize) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            Action::ALL[self.rng.random_range(0..Action::COUNT)]
        } else {
            self.q_table.greedy_action(state)
        }
    }

    /// Apply the one-step update for a realized transition.
    ///
    /// `reward` is for landing in `next_state`. Terminal next states have
    /// no continuation value, whatever the table holds for them.
    pub fn update(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        next_terminal: bool,
    ) {
        let best_next = if next_terminal {
            0.0
        } else {
            self.q_table.max_q(next_state)
        };
        self.q_table
            .set(state, action, reward + self.discount_factor * best_next);
    }

    /// Decay epsilon after an episode, clamped at the floor
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Clear the table and restore the initial exploration state
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.epsilon = self.initial_epsilon;
        self.rng = build_rng(self.rng_seed);
    }
}
