use std::fmt::Debug;

/// The win sentinel used by the integer score types
pub const WIN_SCORE: i64 = 1000;
/// The loss sentinel used by the integer score types
pub const LOSS_SCORE: i64 = -1000;
/// The draw score used by the integer score types
pub const DRAW_SCORE: i64 = 0;

/// A score type that has values reserved for finished games
///
/// The win and loss values need to dominate anything the heuristic can return for an undecided
/// position, so that a forced result at the search horizon always outranks positional play.
pub trait OutcomeScore: Ord + Copy + Debug {
    /// Score of a position the searching player has won
    fn win() -> Self;
    /// Score of a position the searching player has lost
    fn loss() -> Self;
    /// Score of a drawn position
    fn draw() -> Self;
}

macro_rules! impl_outcome_score {
    ($($t:ty),*) => {
        $(
            impl OutcomeScore for $t {
                fn win() -> Self {
                    WIN_SCORE as $t
                }

                fn loss() -> Self {
                    LOSS_SCORE as $t
                }

                fn draw() -> Self {
                    DRAW_SCORE as $t
                }
            }
        )*
    };
}

impl_outcome_score!(i32, i64);
