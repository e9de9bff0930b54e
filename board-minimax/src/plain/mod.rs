//! Plain two player minimax, exactly as deep as you ask for and nothing more.
//!
//! Every node is scored as 'yourself'. When propagating scores up the tree, it chooses the
//! highest score on your plies and the lowest score on your opponent's. Which ply is which is
//! decided by depth alone, the root is always yours.
//!
//! There is no pruning, no caching, and no time limit, so the cost is `branching ^ depth`
//! positions per turn.
//!
//! ```rust
//! use board_minimax::{
//!     plain::{MinimaxBot, ScoredAction},
//!     ActionGettableGame, GameResult, OutcomeDeterminableGame, SimulableGame,
//! };
//!
//! // A game of Nim with a single pile, taking one to three stones a turn. Whoever takes the last
//! // stone wins.
//! #[derive(Debug, Clone)]
//! struct Nim {
//!     stones: u8,
//!     to_move: usize,
//! }
//!
//! impl ActionGettableGame for Nim {
//!     type ActionType = u8;
//!
//!     fn legal_actions(&self) -> Vec<u8> {
//!         (1..=3).filter(|take| *take <= self.stones).collect()
//!     }
//! }
//!
//! impl SimulableGame for Nim {
//!     fn apply(&self, take: &u8) -> Self {
//!         Nim { stones: self.stones - take, to_move: 1 - self.to_move }
//!     }
//! }
//!
//! impl OutcomeDeterminableGame for Nim {
//!     type PlayerIDType = usize;
//!
//!     fn is_over(&self) -> bool {
//!         self.stones == 0
//!     }
//!
//!     fn result_for(&self, player: &usize) -> GameResult {
//!         if !self.is_over() {
//!             GameResult::Undecided
//!         } else if self.to_move == *player {
//!             GameResult::Loss
//!         } else {
//!             GameResult::Win
//!         }
//!     }
//! }
//!
//! // Nothing clever for undecided positions, the search does the work
//! fn no_heuristic(_game: &Nim, _player: &usize) -> i64 {
//!     0
//! }
//!
//! let bot: MinimaxBot<Nim, i64, _> = MinimaxBot::new(0, no_heuristic, "nim");
//!
//! // With 5 stones the only winning move leaves a multiple of 4
//! let game = Nim { stones: 5, to_move: 0 };
//! let result: ScoredAction<u8, i64> = bot.search(&game, 5, true);
//!
//! assert_eq!(result, ScoredAction { score: 1000, action: Some(1) });
//! ```

mod score;
pub use score::{Scorable, WrappedScorable};

mod minimax_return;
pub use minimax_return::{MinMaxReturn, ScoredAction};

mod eval;
pub use eval::{BotOptions, MinimaxBot, NoLegalActions};
