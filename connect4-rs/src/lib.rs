#[macro_use]
extern crate serde_derive;

use board_minimax::plain::BotOptions;

pub use board::{Board, Column, Orientation, Player};
pub use heuristic::OccupancyHeuristic;
pub use minimax::HeuristicMinimax;

pub mod board;
pub mod careful_cora;
pub mod heuristic;
pub mod leftmost_lou;
mod minimax;
pub mod vertical_vera;

use crate::{
    careful_cora::CarefulCoraFactory, leftmost_lou::LeftmostLouFactory,
    vertical_vera::VerticalVeraFactory,
};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AboutMe {
    author: Option<String>,
    description: Option<String>,
    searches: bool,
    version: Option<String>,
}

impl Default for AboutMe {
    fn default() -> Self {
        AboutMe {
            author: Some("connect4-rs".to_owned()),
            description: None,
            searches: false,
            version: Some(env!("CARGO_PKG_VERSION").to_owned()),
        }
    }
}

impl AboutMe {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn searches(&self) -> bool {
        self.searches
    }
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type BoxedBot = Box<dyn Connect4AI + Send + Sync>;
pub type BoxedFactory = Box<dyn Connect4Factory + Send + Sync>;

/// A player the host can ask for moves
///
/// The host calls [Connect4AI::choose_action] when it is this bot's turn and tells it about every
/// applied action and the end of the game. Bots are free to ignore those notifications.
pub trait Connect4AI {
    fn choose_action(&self, board: &Board) -> Result<Column, BoxError>;

    fn on_action_applied(&self, _player: Player, _column: Column, _board: &Board) {}

    fn on_game_ended(&self, _board: &Board) {}
}

pub trait Connect4Factory {
    fn name(&self) -> String;

    /// Build a bot that plays as `identity` for a whole game
    fn create(&self, identity: Player, options: BotOptions) -> BoxedBot;

    fn about(&self) -> AboutMe {
        Default::default()
    }
}

pub fn all_factories() -> Vec<BoxedFactory> {
    vec![
        Box::new(CarefulCoraFactory {}),
        Box::new(LeftmostLouFactory {}),
        Box::new(VerticalVeraFactory {}),
    ]
}

pub fn factory_named(name: &str) -> Option<BoxedFactory> {
    all_factories().into_iter().find(|f| f.name() == name)
}
