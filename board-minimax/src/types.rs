//! Capability traits a game has to provide before it can be searched.
//!
//! Each trait is a separate seam so a game can be tested against exactly the pieces a given
//! consumer needs. The minimax search requires all three.

use std::fmt::Debug;

/// The outcome of a position, seen from one specific player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The player we asked about has won
    Win,
    /// The player we asked about has lost
    Loss,
    /// Nobody won and no further play is possible
    Draw,
    /// The game is still going
    Undecided,
}

impl GameResult {
    /// Whether this result ends the game
    pub fn is_decided(&self) -> bool {
        !matches!(self, GameResult::Undecided)
    }
}

/// A game that can enumerate the legal actions from its current position
pub trait ActionGettableGame {
    /// The type of a single legal move
    type ActionType: Copy + Debug + PartialEq;

    /// All legal actions from this position
    ///
    /// The order MUST be deterministic. The search uses it to break ties between equally scored
    /// actions, always keeping the first one.
    fn legal_actions(&self) -> Vec<Self::ActionType>;
}

/// A game that can produce the successor of a position
pub trait SimulableGame: ActionGettableGame + Sized {
    /// Returns the position reached by playing `action`
    ///
    /// This must not mutate `self`. Sibling branches of the search are all produced from the same
    /// parent.
    fn apply(&self, action: &Self::ActionType) -> Self;
}

/// A game that knows when it has ended and who it ended well for
pub trait OutcomeDeterminableGame {
    /// Identifies one side of the game
    type PlayerIDType: Copy + Debug + PartialEq;

    /// True iff no further play is possible
    fn is_over(&self) -> bool;

    /// The result of this position from `player`'s perspective
    fn result_for(&self, player: &Self::PlayerIDType) -> GameResult;
}
