use std::{error::Error, fmt, marker::PhantomData};

use derivative::Derivative;
use tracing::{info_span, warn};

use crate::{
    score::OutcomeScore,
    types::{OutcomeDeterminableGame, SimulableGame},
};

use super::{score::Scorable, MinMaxReturn, ScoredAction, WrappedScorable};

#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = "ScorableType: Clone"))]
/// This is the struct that wraps a player identity and a scoring function and can be used to run
/// minimax
///
/// The player is fixed for the lifetime of the bot. It is the side every position is scored for,
/// no matter whose turn it is in that position. Nothing is remembered between searches.
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxBot<GameType, ScoreType, ScorableType>
where
    GameType: OutcomeDeterminableGame,
{
    /// The side this bot plays and scores positions for
    pub player: GameType::PlayerIDType,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// Used to tell bots apart in traces
    pub name: &'static str,
    options: BotOptions,
    _phantom: PhantomData<fn() -> (GameType, ScoreType)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Optional properties that can be defined for a [MinimaxBot]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use board_minimax::plain::BotOptions;
///
/// let defaults: BotOptions = Default::default();
///
/// assert_eq!(defaults.depth, 4);
/// ```
pub struct BotOptions {
    /// How many plies to look ahead on each turn
    ///
    /// The recursion goes this deep, so it has to stay small enough for the stack. A depth of 0
    /// scores the current position without looking at any actions.
    ///
    /// Defaults to 4
    pub depth: usize,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self { depth: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Returned when a search ends without an action to play
///
/// That happens when the game is already over, when the depth is 0, or when a game that is not
/// over has no legal actions. The last one is a broken game, not something to recover from.
pub struct NoLegalActions;

impl fmt::Display for NoLegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no legal action to play from this position")
    }
}

impl Error for NoLegalActions {}

impl<GameType, ScoreType, ScorableType> WrappedScorable<GameType, ScoreType>
    for MinimaxBot<GameType, ScoreType, ScorableType>
where
    GameType: OutcomeDeterminableGame,
    ScoreType: OutcomeScore,
    ScorableType: Scorable<GameType, ScoreType>,
{
    fn player(&self) -> &GameType::PlayerIDType {
        &self.player
    }

    fn score(&self, node: &GameType) -> ScoreType {
        self.score_function.score(node, &self.player)
    }
}

/// The best-of predicate shared by both kinds of plies. Only a strict improvement counts, which is
/// what keeps the first enumerated action on ties.
fn improves<ScoreType: Ord>(is_maximizing: bool, candidate: &ScoreType, best: &ScoreType) -> bool {
    if is_maximizing {
        candidate > best
    } else {
        candidate < best
    }
}

impl<GameType, ScoreType, ScorableType> MinimaxBot<GameType, ScoreType, ScorableType>
where
    GameType: OutcomeDeterminableGame + SimulableGame,
    ScoreType: OutcomeScore,
    ScorableType: Scorable<GameType, ScoreType>,
{
    /// Construct a new `MinimaxBot` with the default [BotOptions]
    ///
    /// ```rust
    /// use board_minimax::{
    ///     plain::MinimaxBot, ActionGettableGame, GameResult, OutcomeDeterminableGame, SimulableGame,
    /// };
    ///
    /// // A toy game where each side adds one or two to a counter and reaching 5 wins
    /// #[derive(Debug, Clone)]
    /// struct Counter {
    ///     total: u8,
    ///     to_move: u8,
    /// }
    ///
    /// impl ActionGettableGame for Counter {
    ///     type ActionType = u8;
    ///
    ///     fn legal_actions(&self) -> Vec<u8> {
    ///         if self.is_over() { vec![] } else { vec![1, 2] }
    ///     }
    /// }
    ///
    /// impl SimulableGame for Counter {
    ///     fn apply(&self, action: &u8) -> Self {
    ///         Counter { total: self.total + action, to_move: 1 - self.to_move }
    ///     }
    /// }
    ///
    /// impl OutcomeDeterminableGame for Counter {
    ///     type PlayerIDType = u8;
    ///
    ///     fn is_over(&self) -> bool {
    ///         self.total >= 5
    ///     }
    ///
    ///     fn result_for(&self, player: &u8) -> GameResult {
    ///         match (self.is_over(), self.to_move == *player) {
    ///             (false, _) => GameResult::Undecided,
    ///             // the player who just moved reached 5
    ///             (true, true) => GameResult::Loss,
    ///             (true, false) => GameResult::Win,
    ///         }
    ///     }
    /// }
    ///
    /// fn score_function(_game: &Counter, _player: &u8) -> i64 { 0 }
    ///
    /// let bot: MinimaxBot<Counter, i64, _> = MinimaxBot::new(0, score_function, "counter");
    ///
    /// // From 3, adding 2 wins on the spot
    /// let action = bot.choose_action(&Counter { total: 3, to_move: 0 }).unwrap();
    /// assert_eq!(action, 2);
    /// ```
    pub fn new(
        player: GameType::PlayerIDType,
        score_function: ScorableType,
        name: &'static str,
    ) -> Self {
        Self::new_with_options(player, score_function, name, Default::default())
    }

    /// Construct a new `MinimaxBot` providing a set of [BotOptions]
    ///
    /// [BotOptions] implements [Default] so you can override specific options and rely on
    /// defaults for the rest.
    pub fn new_with_options(
        player: GameType::PlayerIDType,
        score_function: ScorableType,
        name: &'static str,
        options: BotOptions,
    ) -> Self {
        Self {
            player,
            score_function,
            name,
            options,
            _phantom: PhantomData,
        }
    }

    /// The options this bot was built with
    pub fn options(&self) -> &BotOptions {
        &self.options
    }

    ///
    /// Pick the next action to make
    ///
    /// This runs [MinimaxBot::search()] from `game` to the configured depth, with the root ply
    /// always maximizing for our player. The opponent's plies are handled inside the recursion.
    ///
    /// Returns [NoLegalActions] if the search could not produce an action, which only happens
    /// when the game is already over, the depth is 0, or the game has no actions to offer.
    pub fn choose_action(&self, game: &GameType) -> Result<GameType::ActionType, NoLegalActions> {
        let depth = self.options.depth;

        info_span!(
            "minimax",
            bot_name = self.name,
            player = ?self.player,
            depth,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let scored = self.search(game, depth, true);

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", format!("{:?}", scored.score).as_str());
            current_span.record("chosen_action", format!("{:?}", scored.action).as_str());

            scored.action.ok_or_else(|| {
                warn!(
                    is_over = game.is_over(),
                    "Search finished without an action to play"
                );
                NoLegalActions
            })
        })
    }

    /// This runs the minimax algorithm to `depth` plies and returns the backed up score together
    /// with the action that reaches it.
    ///
    /// A node is a leaf when `depth` is 0, when the game is over, or when there are no legal
    /// actions. Leaves are scored with [WrappedScorable::evaluate] and carry no action.
    ///
    /// Otherwise every action is explored in the order the game lists them, each on its own
    /// successor position, with the maximizing flag flipped for the next ply. The best score
    /// only changes on a strict improvement, so ties go to the first action listed.
    pub fn search(
        &self,
        node: &GameType,
        depth: usize,
        is_maximizing: bool,
    ) -> ScoredAction<GameType::ActionType, ScoreType> {
        if depth == 0 || node.is_over() {
            return ScoredAction {
                score: self.evaluate(node),
                action: None,
            };
        }

        let mut best: Option<(GameType::ActionType, ScoreType)> = None;

        for action in node.legal_actions() {
            let child = node.apply(&action);
            let value = self.search(&child, depth - 1, !is_maximizing).score;

            let is_better = match &best {
                Some((_, best_score)) => improves(is_maximizing, &value, best_score),
                None => true,
            };
            if is_better {
                best = Some((action, value));
            }
        }

        match best {
            Some((action, score)) => ScoredAction {
                score,
                action: Some(action),
            },
            None => ScoredAction {
                score: self.evaluate(node),
                action: None,
            },
        }
    }

    /// This runs the same search as [MinimaxBot::search()], but returns a struct that contains all
    /// the information about the 'tree' we searched.
    ///
    /// The return value is a recursive struct that tells you the score of the current node, and
    /// the score of all its children nodes. It is meant for debugging and analysis, a normal turn
    /// only needs [MinimaxBot::choose_action()].
    pub fn search_tree(
        &self,
        node: &GameType,
        depth: usize,
        is_maximizing: bool,
    ) -> MinMaxReturn<GameType::ActionType, ScoreType> {
        if depth == 0 || node.is_over() {
            return MinMaxReturn::Leaf {
                score: self.evaluate(node),
            };
        }

        let mut options: Vec<(GameType::ActionType, MinMaxReturn<_, _>)> = vec![];
        let mut chosen: Option<(usize, ScoreType)> = None;

        for action in node.legal_actions() {
            let child = node.apply(&action);
            let next_return = self.search_tree(&child, depth - 1, !is_maximizing);
            let value = *next_return.score();

            let is_better = match &chosen {
                Some((_, best_score)) => improves(is_maximizing, &value, best_score),
                None => true,
            };
            if is_better {
                chosen = Some((options.len(), value));
            }

            options.push((action, next_return));
        }

        match chosen {
            Some((chosen, score)) => MinMaxReturn::Node {
                is_maximizing,
                options,
                chosen,
                score,
            },
            None => MinMaxReturn::Leaf {
                score: self.evaluate(node),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use crate::types::{ActionGettableGame, GameResult};

    use super::*;

    /// A hand built game tree. Actions are the ids of the child nodes, so the enumeration order is
    /// exactly the order children are listed in.
    #[derive(Debug)]
    struct Script {
        children: Vec<Vec<usize>>,
        heuristic: Vec<i64>,
        results: Vec<GameResult>,
        legal_calls: Cell<usize>,
        apply_calls: Cell<usize>,
    }

    #[derive(Debug, Clone)]
    struct ScriptedGame {
        id: usize,
        script: Rc<Script>,
    }

    impl ScriptedGame {
        fn root(children: Vec<Vec<usize>>, heuristic: Vec<i64>) -> Self {
            let results = vec![GameResult::Undecided; children.len()];
            Self::root_with_results(children, heuristic, results)
        }

        fn root_with_results(
            children: Vec<Vec<usize>>,
            heuristic: Vec<i64>,
            results: Vec<GameResult>,
        ) -> Self {
            Self {
                id: 0,
                script: Rc::new(Script {
                    children,
                    heuristic,
                    results,
                    legal_calls: Cell::new(0),
                    apply_calls: Cell::new(0),
                }),
            }
        }
    }

    impl ActionGettableGame for ScriptedGame {
        type ActionType = usize;

        fn legal_actions(&self) -> Vec<usize> {
            self.script.legal_calls.set(self.script.legal_calls.get() + 1);
            self.script.children[self.id].clone()
        }
    }

    impl SimulableGame for ScriptedGame {
        fn apply(&self, action: &usize) -> Self {
            self.script.apply_calls.set(self.script.apply_calls.get() + 1);
            Self {
                id: *action,
                script: self.script.clone(),
            }
        }
    }

    impl OutcomeDeterminableGame for ScriptedGame {
        type PlayerIDType = u8;

        fn is_over(&self) -> bool {
            self.script.results[self.id].is_decided()
        }

        fn result_for(&self, _player: &u8) -> GameResult {
            self.script.results[self.id]
        }
    }

    fn scripted_score(game: &ScriptedGame, _player: &u8) -> i64 {
        game.script.heuristic[game.id]
    }

    type ScriptedBot = MinimaxBot<ScriptedGame, i64, fn(&ScriptedGame, &u8) -> i64>;

    fn bot(depth: usize) -> ScriptedBot {
        MinimaxBot::new_with_options(0, scripted_score, "scripted", BotOptions { depth })
    }

    fn two_ply_game() -> ScriptedGame {
        ScriptedGame::root(
            vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![], vec![], vec![], vec![]],
            vec![0, 0, 0, 3, 5, 2, 9],
        )
    }

    #[test]
    fn test_depth_zero_evaluates_without_branching() {
        let game = two_ply_game();
        let result = bot(0).search(&game, 0, true);

        assert_eq!(
            result,
            ScoredAction {
                score: 0,
                action: None
            }
        );
        assert_eq!(game.script.legal_calls.get(), 0);
        assert_eq!(game.script.apply_calls.get(), 0);
    }

    #[test]
    fn test_terminal_short_circuit() {
        let game = ScriptedGame::root_with_results(
            vec![vec![1, 2], vec![], vec![]],
            vec![0, 0, 0],
            vec![GameResult::Win, GameResult::Undecided, GameResult::Undecided],
        );

        let result = bot(4).search(&game, 4, true);

        assert_eq!(
            result,
            ScoredAction {
                score: 1000,
                action: None
            }
        );
        assert_eq!(game.script.legal_calls.get(), 0);
        assert_eq!(game.script.apply_calls.get(), 0);
    }

    #[test]
    fn test_backs_up_min_then_max() {
        let game = two_ply_game();
        let result = bot(2).search(&game, 2, true);

        // Node 1 is worth min(3, 5) = 3, node 2 is worth min(2, 9) = 2
        assert_eq!(
            result,
            ScoredAction {
                score: 3,
                action: Some(1)
            }
        );
        assert_eq!(game.script.apply_calls.get(), 6);
    }

    #[test]
    fn test_minimizing_root_picks_lowest() {
        let game = two_ply_game();
        let result = bot(2).search(&game, 2, false);

        // Node 1 is worth max(3, 5) = 5, node 2 is worth max(2, 9) = 9
        assert_eq!(
            result,
            ScoredAction {
                score: 5,
                action: Some(1)
            }
        );
    }

    #[test]
    fn test_ties_keep_first_enumerated_action() {
        let game = ScriptedGame::root(
            vec![vec![3, 1, 2], vec![], vec![], vec![]],
            vec![0, 7, 7, 7],
        );

        assert_eq!(bot(1).search(&game, 1, true).action, Some(3));
        assert_eq!(bot(1).search(&game, 1, false).action, Some(3));
    }

    #[test]
    fn test_later_strict_improvement_wins() {
        let game = ScriptedGame::root(
            vec![vec![1, 2, 3], vec![], vec![], vec![]],
            vec![0, 4, 6, 6],
        );

        assert_eq!(
            bot(1).search(&game, 1, true),
            ScoredAction {
                score: 6,
                action: Some(2)
            }
        );
    }

    #[test]
    fn test_win_dominates_heuristic() {
        let game = ScriptedGame::root_with_results(
            vec![vec![1, 2], vec![], vec![]],
            vec![0, 999, 0],
            vec![GameResult::Undecided, GameResult::Undecided, GameResult::Win],
        );

        assert_eq!(
            bot(1).search(&game, 1, true),
            ScoredAction {
                score: 1000,
                action: Some(2)
            }
        );
    }

    #[test]
    fn test_no_legal_actions_is_a_leaf() {
        let game = ScriptedGame::root(vec![vec![]], vec![-4]);

        assert_eq!(
            bot(3).search(&game, 3, true),
            ScoredAction {
                score: -4,
                action: None
            }
        );
        assert_eq!(bot(3).choose_action(&game), Err(NoLegalActions));
    }

    #[test]
    fn test_choose_action_uses_configured_depth() {
        let game = two_ply_game();

        // One ply only sees the heuristic of nodes 1 and 2, which tie at 0
        assert_eq!(bot(1).choose_action(&game), Ok(1));
        assert_eq!(bot(2).choose_action(&game), Ok(1));
    }

    #[test]
    fn test_search_is_deterministic() {
        let game = two_ply_game();
        let bot = bot(2);

        let first = bot.search(&game, 2, true);
        let second = bot.search(&game, 2, true);

        assert_eq!(first, second);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let game = two_ply_game();
        let bot = bot(2);

        assert_eq!(bot.evaluate(&game), bot.evaluate(&game));
        assert_eq!(game.id, 0);
        assert_eq!(game.script.legal_calls.get(), 0);
    }

    #[test]
    fn test_tree_matches_plain_search() {
        let game = two_ply_game();
        let bot = bot(2);

        let tree = bot.search_tree(&game, 2, true);

        assert_eq!(tree.scored_action(), bot.search(&game, 2, true));
        assert_eq!(tree.chosen_route(), vec![1, 3]);
        assert_eq!(tree.node_count(), 7);
    }
}
