use board_minimax::plain::BotOptions;

use super::*;

/// Minimax that only worries about the opponent stacking up a column
pub struct VerticalVeraFactory;

impl Connect4Factory for VerticalVeraFactory {
    fn name(&self) -> String {
        "vertical-vera".to_owned()
    }

    fn create(&self, identity: Player, options: BotOptions) -> BoxedBot {
        Box::new(HeuristicMinimax::new_with_options(
            identity,
            OccupancyHeuristic::vertical_only(),
            "vertical-vera",
            options,
        ))
    }

    fn about(&self) -> AboutMe {
        AboutMe {
            description: Some(
                "Minimax on material, penalizing open opponent runs in columns only".to_owned(),
            ),
            searches: true,
            ..Default::default()
        }
    }
}
