//! Grid world domain: map cells, actions, state indexing, and the
//! stochastic environment.

mod action;
mod cell;
mod env;
mod grid;

pub use action::Action;
pub use cell::Cell;
pub use env::{DEFAULT_SLIP_PROBABILITY, GridWorld, RewardModel, Transition};
pub use grid::Grid;
