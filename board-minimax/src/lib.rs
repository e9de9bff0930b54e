#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements depth limited minimax for two player, alternating turn board games. You
//! provide a 'scoring' function that turns an undecided position into anything that implements
//! [OutcomeScore], and the game itself through the capability traits in [types].
//!
//! Finished games are never handed to the scoring function. They are scored with the
//! [OutcomeScore] sentinels so that a forced win or loss always outranks the heuristic.

pub mod plain;

mod score;
pub use score::{OutcomeScore, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};

pub mod types;
pub use types::{ActionGettableGame, GameResult, OutcomeDeterminableGame, SimulableGame};
