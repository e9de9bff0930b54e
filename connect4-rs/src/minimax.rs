use board_minimax::plain::MinimaxBot;
use tracing::{debug, info};

use crate::*;

/// The minimax bot every searching player shares, scored with an [OccupancyHeuristic]
pub type HeuristicMinimax = MinimaxBot<Board, i64, OccupancyHeuristic>;

impl Connect4AI for HeuristicMinimax {
    fn choose_action(&self, board: &Board) -> Result<Column, BoxError> {
        Ok(MinimaxBot::choose_action(self, board)?)
    }

    fn on_action_applied(&self, player: Player, column: Column, _board: &Board) {
        debug!(bot_name = self.name, %player, %column, "Action applied");
    }

    fn on_game_ended(&self, board: &Board) {
        info!(bot_name = self.name, winner = ?board.winner(), "Game ended");
    }
}
