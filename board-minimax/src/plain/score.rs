use crate::{
    score::OutcomeScore,
    types::{GameResult, OutcomeDeterminableGame},
};

/// This trait is used to control something that can return a score from a game board
///
/// The score is always from the point of view of `player`, higher is better for them. This is the
/// only game specific part of a minimax bot.
pub trait Scorable<GameType, ScoreType>
where
    GameType: OutcomeDeterminableGame,
{
    /// Convert the given GameType into a ScoreType for `player`
    fn score(&self, game: &GameType, player: &GameType::PlayerIDType) -> ScoreType;
}

impl<GameType, ScoreType, FnLike> Scorable<GameType, ScoreType> for FnLike
where
    GameType: OutcomeDeterminableGame,
    FnLike: Fn(&GameType, &GameType::PlayerIDType) -> ScoreType,
{
    fn score(&self, game: &GameType, player: &GameType::PlayerIDType) -> ScoreType {
        (self)(game, player)
    }
}

/// Provides an implementation for `evaluate` if the implementer implements `score` and knows which
/// player it is scoring for.
///
/// `evaluate` checks the game result first so the underlying scoring functions don't need to
/// worry about finished games
pub trait WrappedScorable<GameType, ScoreType>
where
    GameType: OutcomeDeterminableGame,
    ScoreType: OutcomeScore,
{
    /// The fixed player all scores are relative to
    fn player(&self) -> &GameType::PlayerIDType;

    /// Heuristic score for a position that is still undecided
    fn score(&self, node: &GameType) -> ScoreType;

    /// Full evaluation of a position
    ///
    /// Decided games map to the [OutcomeScore] sentinels, everything else is handed to
    /// [WrappedScorable::score]. This never mutates the node.
    fn evaluate(&self, node: &GameType) -> ScoreType {
        match node.result_for(self.player()) {
            GameResult::Win => ScoreType::win(),
            GameResult::Loss => ScoreType::loss(),
            GameResult::Draw => ScoreType::draw(),
            GameResult::Undecided => self.score(node),
        }
    }
}
