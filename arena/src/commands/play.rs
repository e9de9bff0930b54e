use std::collections::HashMap;

use board_minimax::{plain::BotOptions, ActionGettableGame, OutcomeDeterminableGame};
use color_eyre::eyre::{eyre, Result, WrapErr};
use connect4_rs::{factory_named, Board, BoxedBot, Player};
use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Bot that plays the first piece
    #[clap(long, value_parser, default_value = "careful-cora")]
    first: String,

    /// Bot that replies
    #[clap(long, value_parser, default_value = "leftmost-lou")]
    second: String,

    /// Plies every searching bot looks ahead
    #[clap(short, long, value_parser, default_value_t = BotOptions::default().depth)]
    depth: usize,

    #[clap(long, value_parser, default_value_t = 6)]
    rows: usize,

    #[clap(long, value_parser, default_value_t = 7)]
    cols: usize,

    /// Pieces in a row needed to win
    #[clap(long, value_parser, default_value_t = 4)]
    win_length: usize,

    /// Number of games to play
    #[clap(short, long, value_parser, default_value_t = 1)]
    games: usize,

    /// Random moves to make before the bots take over, so repeated games differ
    #[clap(long, value_parser, default_value_t = 0)]
    random_openings: usize,

    /// Seed for the random openings. Uses entropy if not specified
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Only print the final board of each game
    #[clap(short, long, action, default_value = "false")]
    quiet: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let options = BotOptions { depth: self.depth };
        let first = create_bot(&self.first, Player::First, options)?;
        let second = create_bot(&self.second, Player::Second, options)?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut tally: HashMap<Option<Player>, usize> = HashMap::new();

        for game in 0..self.games {
            let board = Board::new(self.rows, self.cols, self.win_length)
                .map_err(|e| eyre!("{:#}", e))?;
            let board = random_opening(board, self.random_openings, &mut rng)?;

            info!(game, opening = %board.to_string().replace('\n', "/"), "Starting game");

            let end = play_game(board, &first, &second, !self.quiet)
                .wrap_err_with(|| format!("Game {} did not finish", game))?;

            println!("{}\n", end);
            match end.winner() {
                Some(Player::First) => println!("{} ({}) wins", self.first, Player::First),
                Some(Player::Second) => println!("{} ({}) wins", self.second, Player::Second),
                None => println!("Draw"),
            }
            println!();

            *tally.entry(end.winner()).or_default() += 1;
        }

        if self.games > 1 {
            let count = |p: Option<Player>| tally.get(&p).copied().unwrap_or(0);
            println!(
                "{} wins: {}, {} wins: {}, draws: {}",
                self.first,
                count(Some(Player::First)),
                self.second,
                count(Some(Player::Second)),
                count(None)
            );
        }

        Ok(())
    }
}

fn create_bot(name: &str, identity: Player, options: BotOptions) -> Result<BoxedBot> {
    let factory = factory_named(name).ok_or_else(|| {
        let known = connect4_rs::all_factories()
            .iter()
            .map(|f| f.name())
            .join(", ");
        eyre!("No bot named {}. Try one of: {}", name, known)
    })?;

    Ok(factory.create(identity, options))
}

fn random_opening(mut board: Board, moves: usize, rng: &mut StdRng) -> Result<Board> {
    for _ in 0..moves {
        let legal = board.legal_actions();
        let Some(column) = legal.choose(rng).copied() else {
            break;
        };
        board = board.try_apply(column).map_err(|e| eyre!("{:#}", e))?;
    }

    Ok(board)
}

/// Plays `board` out to the end, asking whichever bot is on move for a column and telling both of
/// them about every move
pub(crate) fn play_game(
    mut board: Board,
    first: &BoxedBot,
    second: &BoxedBot,
    verbose: bool,
) -> Result<Board> {
    while !board.is_over() {
        let player = board.to_move();
        let bot = match player {
            Player::First => first,
            Player::Second => second,
        };

        let column = bot
            .choose_action(&board)
            .map_err(|e| eyre!("{} could not pick a column: {}", player, e))?;
        board = board
            .try_apply(column)
            .map_err(|e| eyre!("{} picked an illegal column: {:#}", player, e))?;

        debug!(%player, %column, "Move played");
        if verbose {
            println!("{} plays {}\n{}\n", player, column, board);
        }

        first.on_action_applied(player, column, &board);
        second.on_action_applied(player, column, &board);
    }

    first.on_game_ended(&board);
    second.on_game_ended(&board);

    Ok(board)
}
