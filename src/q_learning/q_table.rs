//! Dense Q-table over flat grid states

use serde::{Deserialize, Serialize};

use crate::gridworld::Action;

/// Q-values for every (state, action) pair, stored row-major as a dense
/// `states x 4` table. All entries start at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    states: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialized table for `states` states
    pub fn zeros(states: usize) -> Self {
        Self {
            states,
            values: vec![0.0; states * Action::COUNT],
        }
    }

    /// Number of states the table covers
    pub fn num_states(&self) -> usize {
        self.states
    }

    /// Get the Q-value for a state-action pair
    pub fn get(&self, state: usize, action: Action) -> f64 {
        self.values[state * Action::COUNT + action.index()]
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: usize, action: Action, value: f64) {
        self.values[state * Action::COUNT + action.index()] = value;
    }

    /// All four Q-values for a state, in action-index order
    pub fn row(&self, state: usize) -> &[f64] {
        let offset = state * Action::COUNT;
        &self.values[offset..offset + Action::COUNT]
    }

    /// Maximum Q-value over all actions in a state
    pub fn max_q(&self, state: usize) -> f64 {
        self.row(state).iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action for a state.
    ///
    /// Ties break toward the lowest action index: only a strictly greater
    /// value displaces the current best.
    pub fn greedy_action(&self, state: usize) -> Action {
        let mut best = Action::ALL[0];
        let mut best_q = self.get(state, best);
        for &action in &Action::ALL[1..] {
            let q = self.get(state, action);
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        best
    }

    /// Zero every entry
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let table = QTable::zeros(25);
        assert_eq!(table.num_states(), 25);
        for state in 0..25 {
            for action in Action::ALL {
                assert_eq!(table.get(state, action), 0.0);
            }
        }
    }

    #[test]
    fn set_get_round_trip() {
        let mut table = QTable::zeros(4);
        table.set(2, Action::Left, 1.5);
        assert_eq!(table.get(2, Action::Left), 1.5);
        assert_eq!(table.get(2, Action::Right), 0.0);
    }

    #[test]
    fn max_q_over_actions() {
        let mut table = QTable::zeros(4);
        table.set(1, Action::Up, 0.5);
        table.set(1, Action::Down, 2.0);
        table.set(1, Action::Right, -3.0);
        assert_eq!(table.max_q(1), 2.0);
    }

    #[test]
    fn greedy_picks_highest() {
        let mut table = QTable::zeros(4);
        table.set(0, Action::Up, 0.5);
        table.set(0, Action::Left, 1.5);
        assert_eq!(table.greedy_action(0), Action::Left);
    }

    #[test]
    fn greedy_ties_break_to_lowest_index() {
        let mut table = QTable::zeros(4);
        table.set(3, Action::Down, 1.0);
        table.set(3, Action::Right, 1.0);
        assert_eq!(table.greedy_action(3), Action::Down);

        // All-zero row picks the first action.
        assert_eq!(table.greedy_action(0), Action::Up);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut table = QTable::zeros(2);
        table.set(0, Action::Up, 9.0);
        table.reset();
        assert_eq!(table.get(0, Action::Up), 0.0);
    }
}
