use board_minimax::{plain::BotOptions, ActionGettableGame};
use tracing::info;

use super::*;

/// Plays the first legal column every turn. Handy as a baseline in the arena.
pub struct LeftmostLou {
    identity: Player,
}

impl Connect4AI for LeftmostLou {
    fn choose_action(&self, board: &Board) -> Result<Column, BoxError> {
        board
            .legal_actions()
            .first()
            .copied()
            .ok_or_else(|| format!("No legal columns left for {}", self.identity).into())
    }

    fn on_game_ended(&self, _board: &Board) {
        info!("LeftmostLou has ended");
    }
}

pub struct LeftmostLouFactory;

impl Connect4Factory for LeftmostLouFactory {
    fn name(&self) -> String {
        "leftmost-lou".to_owned()
    }

    fn create(&self, identity: Player, _options: BotOptions) -> BoxedBot {
        Box::new(LeftmostLou { identity })
    }

    fn about(&self) -> AboutMe {
        AboutMe {
            description: Some("Always plays the leftmost column that is not full".to_owned()),
            ..Default::default()
        }
    }
}
