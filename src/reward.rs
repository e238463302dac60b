//! Reward shaping over pairs of consecutive game snapshots.

use crate::game::{ActionKind, GameSnapshot};

/// Additive reward terms computed from a (previous, next) snapshot pair.
///
/// The shaper is a pure function of its inputs; the weights are grouped here
/// so experiments can rebalance them without touching the formula. The
/// output is the unclamped sum of all applicable terms.
#[derive(Clone, Copy, Debug)]
pub struct RewardShaper {
    /// Flat bonus for surviving one more step.
    pub survival_bonus: f32,
    /// Bonus per line cleared this step.
    pub line_clear_bonus: f32,
    /// Extra flat bonus for clearing four lines at once.
    pub max_clear_bonus: f32,
    /// Penalty per row of stack height.
    pub height_penalty: f32,
    /// Penalty per covered hole.
    pub hole_penalty: f32,
    /// Penalty when the new state ended the game.
    pub game_over_penalty: f32,
}

impl Default for RewardShaper {
    fn default() -> Self {
        RewardShaper {
            survival_bonus: 0.1,
            line_clear_bonus: 10.0,
            max_clear_bonus: 20.0,
            height_penalty: 0.1,
            hole_penalty: 2.0,
            game_over_penalty: 100.0,
        }
    }
}

impl RewardShaper {
    /// Shape the reward for one observed transition.
    ///
    /// A lines-cleared counter that went backwards (external reset) yields no
    /// clear bonus rather than a negative one; every other term still
    /// applies.
    pub fn shape(&self, previous: &GameSnapshot, next: &GameSnapshot, _action: ActionKind) -> f32 {
        let mut reward = self.survival_bonus;

        let lines_cleared =
            next.stats.lines_cleared.saturating_sub(previous.stats.lines_cleared);
        if lines_cleared > 0 {
            reward += lines_cleared as f32 * self.line_clear_bonus;
            if lines_cleared == 4 {
                reward += self.max_clear_bonus;
            }
        }

        reward -= stack_height(&next.board) as f32 * self.height_penalty;
        reward -= count_holes(&next.board) as f32 * self.hole_penalty;

        if next.stats.game_over {
            reward -= self.game_over_penalty;
        }

        reward
    }
}

/// Height of the stack: total rows minus the index of the topmost non-empty
/// row. An entirely empty board has height 0.
pub fn stack_height(board: &[Vec<i32>]) -> usize {
    for (i, row) in board.iter().enumerate() {
        if row.iter().any(|&cell| cell != 0) {
            return board.len() - i;
        }
    }
    0
}

/// Count covered holes: empty cells with at least one occupied cell somewhere
/// above them in the same column.
pub fn count_holes(board: &[Vec<i32>]) -> usize {
    let cols = board.first().map_or(0, |row| row.len());
    let mut holes = 0;
    for col in 0..cols {
        let mut found_block = false;
        for row in board {
            if row[col] != 0 {
                found_block = true;
            } else if found_block {
                holes += 1;
            }
        }
    }
    holes
}
