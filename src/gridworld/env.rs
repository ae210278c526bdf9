//! Grid world environment: rewards and stochastic transitions

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    gridworld::{Action, Cell, Grid},
};

/// Default probability of sliding one extra cell after a successful move
pub const DEFAULT_SLIP_PROBABILITY: f64 = 0.5;

/// Rewards granted for landing in a cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RewardModel {
    /// Reward for landing on the goal
    pub goal: f64,
    /// Reward for landing on a monster
    pub monster: f64,
    /// Per-step penalty for ordinary ground, biasing toward short paths
    pub step: f64,
}

impl Default for RewardModel {
    fn default() -> Self {
        Self {
            goal: 100.0,
            monster: -100.0,
            step: -0.1,
        }
    }
}

/// Realized outcome of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// State the agent actually ended up in; always a valid index
    pub next: usize,
    /// The first step would have left the grid, so the agent stayed put
    pub hit_wall: bool,
    /// The agent slid one extra cell in the same direction
    pub slipped: bool,
}

/// Grid world with slipping movement dynamics.
///
/// Movement resolves in two stages: the unit step for the chosen action,
/// clamped to the grid (a wall hit leaves the agent in place), then an
/// independent slip roll that may extend the move one further cell in the
/// same direction, with its own boundary clamp back to the first-step
/// position. The slip roll only happens after a successful first step.
#[derive(Debug, Clone)]
pub struct GridWorld {
    grid: Grid,
    rewards: RewardModel,
    slip: f64,
}

impl GridWorld {
    /// Create an environment with default rewards and slip probability
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            rewards: RewardModel::default(),
            slip: DEFAULT_SLIP_PROBABILITY,
        }
    }

    /// Override the slip probability (0.0 disables slipping entirely)
    pub fn with_slip(mut self, slip: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&slip) || slip.is_nan() {
            return Err(Error::InvalidSlipProbability { value: slip });
        }
        self.slip = slip;
        Ok(self)
    }

    /// Override the reward model
    pub fn with_rewards(mut self, rewards: RewardModel) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn num_states(&self) -> usize {
        self.grid.num_states()
    }

    pub fn start_index(&self) -> usize {
        self.grid.start_index()
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.grid.cell(index)
    }

    pub fn is_terminal(&self, index: usize) -> bool {
        self.grid.is_terminal(index)
    }

    /// Reward for landing in a state
    pub fn reward(&self, index: usize) -> f64 {
        match self.grid.cell(index) {
            Cell::Goal => self.rewards.goal,
            Cell::Monster => self.rewards.monster,
            Cell::Start | Cell::Normal => self.rewards.step,
        }
    }

    /// Resolve the stochastic outcome of taking `action` from `state`.
    pub fn step<R: Rng + ?Sized>(&self, state: usize, action: Action, rng: &mut R) -> Transition {
        let (row, col) = self.grid.coords(state);
        let (dr, dc) = action.delta();

        let Some((row, col)) = self.grid.shifted(row, col, dr, dc) else {
            return Transition {
                next: state,
                hit_wall: true,
                slipped: false,
            };
        };

        if rng.random::<f64>() < self.slip
            && let Some((slip_row, slip_col)) = self.grid.shifted(row, col, dr, dc)
        {
            return Transition {
                next: self.grid.index_of(slip_row, slip_col),
                hit_wall: false,
                slipped: true,
            };
        }

        Transition {
            next: self.grid.index_of(row, col),
            hit_wall: false,
            slipped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn env_with_slip(slip: f64) -> GridWorld {
        GridWorld::new(Grid::default()).with_slip(slip).unwrap()
    }

    #[test]
    fn rewards_for_cell_kinds() {
        let env = env_with_slip(0.5);
        assert_eq!(env.reward(24), 100.0);
        assert_eq!(env.reward(3), -100.0);
        assert_eq!(env.reward(16), -100.0);
        assert_eq!(env.reward(0), -0.1);
        assert_eq!(env.reward(12), -0.1);
    }

    #[test]
    fn wall_hit_stays_put_regardless_of_slip() {
        // Top-left corner: UP and LEFT both leave the grid.
        for slip in [0.0, 0.5, 1.0] {
            let env = env_with_slip(slip);
            let mut rng = StdRng::seed_from_u64(0);
            for action in [Action::Up, Action::Left] {
                let t = env.step(0, action, &mut rng);
                assert_eq!(t.next, 0);
                assert!(t.hit_wall);
                assert!(!t.slipped);
            }
        }
    }

    #[test]
    fn slip_disabled_moves_one_cell() {
        let env = env_with_slip(0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let t = env.step(0, Action::Right, &mut rng);
        assert_eq!(t.next, 1);
        assert!(!t.hit_wall);
        assert!(!t.slipped);
    }

    #[test]
    fn slip_certain_moves_two_cells() {
        let env = env_with_slip(1.0);
        let mut rng = StdRng::seed_from_u64(0);
        let t = env.step(0, Action::Down, &mut rng);
        assert_eq!(t.next, 10);
        assert!(t.slipped);
    }

    #[test]
    fn blocked_slip_clamps_to_first_step() {
        // From (0,3) moving right: first step lands on the edge column,
        // the slip would leave the grid.
        let env = env_with_slip(1.0);
        let mut rng = StdRng::seed_from_u64(0);
        let t = env.step(3, Action::Right, &mut rng);
        assert_eq!(t.next, 4);
        assert!(!t.slipped);
    }

    #[test]
    fn transitions_closed_over_valid_states() {
        for slip in [0.0, 1.0] {
            let env = env_with_slip(slip);
            let mut rng = StdRng::seed_from_u64(7);
            for state in 0..env.num_states() {
                for action in Action::ALL {
                    let t = env.step(state, action, &mut rng);
                    assert!(t.next < env.num_states());
                }
            }
        }
    }

    #[test]
    fn invalid_slip_probability_rejected() {
        assert!(GridWorld::new(Grid::default()).with_slip(1.5).is_err());
        assert!(GridWorld::new(Grid::default()).with_slip(-0.1).is_err());
        assert!(GridWorld::new(Grid::default()).with_slip(f64::NAN).is_err());
    }
}
