use std::{fs::read_to_string, path::PathBuf};

use board_minimax::plain::{BotOptions, MinMaxReturn};
use color_eyre::eyre::{eyre, Result, WrapErr};
use connect4_rs::{Board, Column, HeuristicMinimax, OccupancyHeuristic, Player};
use itertools::Itertools;

/// The heuristic a searching bot scores positions with
fn heuristic_for(bot: &str) -> Result<OccupancyHeuristic> {
    match bot {
        "careful-cora" => Ok(OccupancyHeuristic::all_lines()),
        "vertical-vera" => Ok(OccupancyHeuristic::vertical_only()),
        other => Err(eyre!(
            "{} does not search. Try careful-cora or vertical-vera",
            other
        )),
    }
}

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Board to search, as JSON or as a plain diagram with the top row first
    #[clap(short, long, value_parser)]
    board: PathBuf,

    /// Searching bot whose heuristic scores the leaves
    #[clap(long, value_parser, default_value = "careful-cora")]
    bot: String,

    /// Player to search for. Defaults to whoever is on move
    #[clap(long = "as", value_parser)]
    as_player: Option<Player>,

    /// Plies to look ahead
    #[clap(short, long, value_parser, default_value_t = BotOptions::default().depth)]
    depth: usize,

    /// Pieces in a row needed to win, for plain diagrams
    #[clap(long, value_parser, default_value_t = 4)]
    win_length: usize,

    /// Print the whole search tree
    #[clap(long, action, default_value = "false")]
    tree: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let heuristic = heuristic_for(&self.bot)?;
        let contents = read_to_string(&self.board)
            .wrap_err_with(|| format!("Could not read {}", self.board.display()))?;
        let board = parse_board(&contents, self.win_length)?;
        let player = self.as_player.unwrap_or_else(|| board.to_move());

        let bot = HeuristicMinimax::new_with_options(
            player,
            heuristic,
            "solver",
            BotOptions { depth: self.depth },
        );
        let result = bot.search_tree(&board, self.depth, true);

        println!("{}\n", board);
        println!("{} searching {} plies for {}", self.bot, self.depth, player);

        match &result {
            MinMaxReturn::Leaf { score } => {
                println!("Nothing to search, the position scores {}", score);
            }
            MinMaxReturn::Node { options, .. } => {
                for (column, child) in options {
                    println!("  column {}: {}", column, child.score());
                }
                println!();
                print_choice(&result);
            }
        }

        if self.tree {
            println!("\n{}", result.to_text_tree());
        }

        Ok(())
    }
}

fn print_choice(result: &MinMaxReturn<Column, i64>) {
    if let Some(column) = result.best_action() {
        println!("Best column: {} (score {})", column, result.score());
        println!(
            "Expected line: {} ({} nodes searched)",
            result.chosen_route().iter().join(", "),
            result.node_count()
        );
    }
}

fn parse_board(contents: &str, win_length: usize) -> Result<Board> {
    if contents.trim_start().starts_with('{') {
        serde_json::from_str(contents).wrap_err("Could not parse the board JSON")
    } else {
        Board::from_diagram(contents, win_length).map_err(|e| eyre!("{:#}", e))
    }
}
