use board_minimax::plain::Scorable;

use crate::board::{Board, Orientation, Player};

/// Penalty for each open run of opponent pieces one short of a win
pub const DEFAULT_THREAT_PENALTY: i64 = 100;

/// Counts material and looks one ply ahead for the opponent's nearly finished lines
///
/// Every one of our pieces is worth `+1` and every opponent piece `-1`. On top of that, each run
/// of `win_length - 1` opponent pieces that still has an empty cell at either end costs
/// `threat_penalty`. Only the orientations listed are checked.
///
/// This is not a threat analyzer. It does not care whether the empty end cell can be played into
/// yet, and it never looks at our own runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyHeuristic {
    pub orientations: &'static [Orientation],
    pub threat_penalty: i64,
}

impl Default for OccupancyHeuristic {
    fn default() -> Self {
        Self::all_lines()
    }
}

impl OccupancyHeuristic {
    /// Watch for opponent runs in every direction
    pub const fn all_lines() -> Self {
        Self {
            orientations: &Orientation::ALL,
            threat_penalty: DEFAULT_THREAT_PENALTY,
        }
    }

    /// Only watch for opponent pieces stacked up in a column
    pub const fn vertical_only() -> Self {
        Self {
            orientations: &[Orientation::Vertical],
            threat_penalty: DEFAULT_THREAT_PENALTY,
        }
    }
}

/// Our piece count minus the opponent's
pub fn material(board: &Board, player: Player) -> i64 {
    let (first, second) = board.piece_counts();
    let (ours, theirs) = match player {
        Player::First => (first, second),
        Player::Second => (second, first),
    };

    ours as i64 - theirs as i64
}

/// Counts the runs of exactly `win_length - 1` cells owned by `owner` in one orientation that
/// have an empty, on board cell directly before or after them
///
/// Every window is counted on its own, so a run is found once per orientation it lies in.
pub fn open_runs(board: &Board, owner: Player, orientation: Orientation) -> usize {
    let run_length = board.win_length() as isize - 1;
    let (d_row, d_col) = orientation.step();

    board
        .cells()
        .filter(|(_, _, cell)| *cell == Some(owner))
        .filter(|(row, col, _)| {
            let (row, col) = (*row as isize, *col as isize);

            let is_run = (1..run_length)
                .all(|i| board.at(row + i * d_row, col + i * d_col) == Some(Some(owner)));
            if !is_run {
                return false;
            }

            let before = board.at(row - d_row, col - d_col);
            let after = board.at(row + run_length * d_row, col + run_length * d_col);

            before == Some(None) || after == Some(None)
        })
        .count()
}

impl Scorable<Board, i64> for OccupancyHeuristic {
    fn score(&self, board: &Board, player: &Player) -> i64 {
        let opponent = player.other();
        let threats: usize = self
            .orientations
            .iter()
            .map(|orientation| open_runs(board, opponent, *orientation))
            .sum();

        material(board, *player) - self.threat_penalty * threats as i64
    }
}
