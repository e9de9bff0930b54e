use board_minimax::plain::BotOptions;

use super::*;

/// Minimax that watches for nearly finished opponent lines in every direction
pub struct CarefulCoraFactory;

impl Connect4Factory for CarefulCoraFactory {
    fn name(&self) -> String {
        "careful-cora".to_owned()
    }

    fn create(&self, identity: Player, options: BotOptions) -> BoxedBot {
        Box::new(HeuristicMinimax::new_with_options(
            identity,
            OccupancyHeuristic::all_lines(),
            "careful-cora",
            options,
        ))
    }

    fn about(&self) -> AboutMe {
        AboutMe {
            description: Some(
                "Minimax on material, penalizing open opponent runs in all four directions"
                    .to_owned(),
            ),
            searches: true,
            ..Default::default()
        }
    }
}
