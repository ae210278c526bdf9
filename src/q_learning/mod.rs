//! Tabular Q-learning: the Q-table and the learning agent

mod agent;
mod q_table;

pub use agent::{
    DEFAULT_DISCOUNT_FACTOR, DEFAULT_EPSILON, DEFAULT_EPSILON_DECAY, DEFAULT_MIN_EPSILON,
    QLearningAgent,
};
pub use q_table::QTable;
