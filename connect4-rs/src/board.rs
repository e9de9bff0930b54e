use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, ensure, Context};
use board_minimax::{ActionGettableGame, GameResult, OutcomeDeterminableGame, SimulableGame};
use itertools::Itertools;

pub const STANDARD_ROWS: usize = 6;
pub const STANDARD_COLS: usize = 7;
pub const STANDARD_WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Player::First),
            'O' | 'o' => Some(Player::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "x" | "0" => Ok(Player::First),
            "second" | "o" | "1" => Ok(Player::Second),
            _ => Err(anyhow!("unknown player '{}', expected first or second", s)),
        }
    }
}

/// Dropping a piece into a column, counted from 0 on the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Column(pub usize);

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The directions a line can run in, as `(row, col)` steps. Rows count up from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Horizontal,
        Orientation::Vertical,
        Orientation::Diagonal,
        Orientation::AntiDiagonal,
    ];

    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
            Orientation::Diagonal => (1, 1),
            Orientation::AntiDiagonal => (-1, 1),
        }
    }
}

/// A Connect-Four position
///
/// Cells are stored row major with row 0 at the bottom, which is where pieces land first. The
/// winner is tracked as pieces are dropped so checking for the end of the game is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireBoard", into = "WireBoard")]
pub struct Board {
    rows: usize,
    cols: usize,
    win_length: usize,
    cells: Vec<Option<Player>>,
    to_move: Player,
    winner: Option<Player>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// An empty board of the given size, with [Player::First] to move
    pub fn new(rows: usize, cols: usize, win_length: usize) -> anyhow::Result<Self> {
        ensure!(rows > 0 && cols > 0, "a board needs at least one row and column");
        ensure!(win_length >= 2, "win length must be at least 2, got {}", win_length);

        Ok(Self {
            rows,
            cols,
            win_length,
            cells: vec![None; rows * cols],
            to_move: Player::First,
            winner: None,
        })
    }

    /// The classic 6 x 7 board with four in a row to win
    pub fn standard() -> Self {
        Self {
            rows: STANDARD_ROWS,
            cols: STANDARD_COLS,
            win_length: STANDARD_WIN_LENGTH,
            cells: vec![None; STANDARD_ROWS * STANDARD_COLS],
            to_move: Player::First,
            winner: None,
        }
    }

    /// Parse a diagram with the top row first. `X` is [Player::First], `O` is [Player::Second]
    /// and `.` is empty. Blank lines and surrounding whitespace are ignored.
    ///
    /// Whose turn it is follows from the piece counts, as the first player always moves first.
    pub fn from_diagram(diagram: &str, win_length: usize) -> anyhow::Result<Self> {
        let lines = diagram
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect_vec();
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);

        let mut board = Self::new(rows, cols, win_length)?;

        for (i, line) in lines.iter().enumerate() {
            let row = rows - 1 - i;
            ensure!(
                line.chars().count() == cols,
                "row {} has {} cells, expected {}",
                row,
                line.chars().count(),
                cols
            );

            for (col, c) in line.chars().enumerate() {
                let cell = match c {
                    '.' => None,
                    other => Some(
                        Player::from_symbol(other)
                            .ok_or_else(|| anyhow!("invalid cell '{}' in row {}", other, row))?,
                    ),
                };
                board.cells[row * cols + col] = cell;
            }
        }

        for col in 0..cols {
            let height = board.height_of(Column(col));
            ensure!(
                (height..rows).all(|row| board.cells[row * cols + col].is_none()),
                "column {} has a piece floating above an empty cell",
                col
            );
        }

        let (first, second) = board.piece_counts();
        board.to_move = if first == second {
            Player::First
        } else if first == second + 1 {
            Player::Second
        } else {
            bail!(
                "impossible piece counts: {} X and {} O, X moves first",
                first,
                second
            );
        };

        board.winner = board.find_winner()?;

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The contents of a cell, or `None` if the coordinates are off the board
    pub fn at(&self, row: isize, col: isize) -> Option<Option<Player>> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }

        Some(self.cells[row as usize * self.cols + col as usize])
    }

    /// Iterates over every cell as `(row, col, contents)`
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<Player>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / self.cols, i % self.cols, *cell))
    }

    /// How many pieces are stacked in a column
    pub fn height_of(&self, column: Column) -> usize {
        (0..self.rows)
            .take_while(|row| self.cells[row * self.cols + column.0].is_some())
            .count()
    }

    pub fn is_column_full(&self, column: Column) -> bool {
        self.height_of(column) == self.rows
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of pieces for `(First, Second)`
    pub fn piece_counts(&self) -> (usize, usize) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(first, second), p| match p {
                Player::First => (first + 1, second),
                Player::Second => (first, second + 1),
            })
    }

    /// Returns the position after the player to move drops a piece into `column`
    pub fn try_apply(&self, column: Column) -> anyhow::Result<Self> {
        ensure!(self.winner.is_none(), "the game is already won");
        ensure!(
            column.0 < self.cols,
            "column {} is off a board with {} columns",
            column,
            self.cols
        );
        ensure!(!self.is_column_full(column), "column {} is full", column);

        let mut next = self.clone();
        next.drop_piece(column);

        Ok(next)
    }

    fn drop_piece(&mut self, column: Column) {
        let row = self.height_of(column);
        let player = self.to_move;

        self.cells[row * self.cols + column.0] = Some(player);
        self.to_move = player.other();

        if self.completes_line(row, column.0, player) {
            self.winner = Some(player);
        }
    }

    /// Length of the run of `player` pieces through `(row, col)` in one orientation
    fn run_through(&self, row: usize, col: usize, player: Player, orientation: Orientation) -> usize {
        let (d_row, d_col) = orientation.step();
        let count_from = |sign: isize| {
            (1..)
                .map(|i: isize| (row as isize + sign * i * d_row, col as isize + sign * i * d_col))
                .take_while(|(r, c)| self.at(*r, *c) == Some(Some(player)))
                .count()
        };

        1 + count_from(1) + count_from(-1)
    }

    fn completes_line(&self, row: usize, col: usize, player: Player) -> bool {
        Orientation::ALL
            .iter()
            .any(|o| self.run_through(row, col, player, *o) >= self.win_length)
    }

    fn find_winner(&self) -> anyhow::Result<Option<Player>> {
        let winners = self
            .cells()
            .filter_map(|(row, col, cell)| cell.map(|p| (row, col, p)))
            .filter(|(row, col, p)| self.completes_line(*row, *col, *p))
            .map(|(_, _, p)| p)
            .unique()
            .collect_vec();

        match winners.as_slice() {
            [] => Ok(None),
            [winner] => Ok(Some(*winner)),
            _ => bail!("both players have a winning line"),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = (0..self.rows)
            .rev()
            .map(|row| {
                (0..self.cols)
                    .map(|col| match self.cells[row * self.cols + col] {
                        Some(p) => p.symbol(),
                        None => '.',
                    })
                    .collect::<String>()
            })
            .join("\n");

        write!(f, "{}", text)
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_diagram(s, STANDARD_WIN_LENGTH)
    }
}

/// The JSON shape of a board: the diagram rows, top first, plus the win length
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireBoard {
    #[serde(default = "default_win_length")]
    win_length: usize,
    grid: Vec<String>,
}

fn default_win_length() -> usize {
    STANDARD_WIN_LENGTH
}

impl TryFrom<WireBoard> for Board {
    type Error = anyhow::Error;

    fn try_from(wire: WireBoard) -> Result<Self, Self::Error> {
        Board::from_diagram(&wire.grid.join("\n"), wire.win_length)
            .context("invalid board in JSON")
    }
}

impl From<Board> for WireBoard {
    fn from(board: Board) -> Self {
        WireBoard {
            win_length: board.win_length,
            grid: board.to_string().lines().map(str::to_owned).collect(),
        }
    }
}

impl ActionGettableGame for Board {
    type ActionType = Column;

    fn legal_actions(&self) -> Vec<Column> {
        if self.winner.is_some() {
            return vec![];
        }

        (0..self.cols)
            .map(Column)
            .filter(|c| !self.is_column_full(*c))
            .collect()
    }
}

impl SimulableGame for Board {
    fn apply(&self, column: &Column) -> Self {
        match self.try_apply(*column) {
            Ok(next) => next,
            Err(e) => panic!("Tried to play column {} which is not legal: {}", column, e),
        }
    }
}

impl OutcomeDeterminableGame for Board {
    type PlayerIDType = Player;

    fn is_over(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    fn result_for(&self, player: &Player) -> GameResult {
        match self.winner {
            Some(winner) if winner == *player => GameResult::Win,
            Some(_) => GameResult::Loss,
            None if self.is_full() => GameResult::Draw,
            None => GameResult::Undecided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        diagram.parse().unwrap()
    }

    #[test]
    fn test_empty_board_has_every_column() {
        let board = Board::standard();

        assert_eq!(board.legal_actions(), (0..7).map(Column).collect_vec());
        assert_eq!(board.to_move(), Player::First);
        assert_eq!(board.result_for(&Player::First), GameResult::Undecided);
        assert!(!board.is_over());
    }

    #[test]
    fn test_apply_drops_to_the_bottom_and_leaves_parent_alone() {
        let parent = Board::standard();
        let child = parent.apply(&Column(3)).apply(&Column(3));

        assert_eq!(parent, Board::standard());
        assert_eq!(child.at(0, 3), Some(Some(Player::First)));
        assert_eq!(child.at(1, 3), Some(Some(Player::Second)));
        assert_eq!(child.at(2, 3), Some(None));
        assert_eq!(child.to_move(), Player::First);
        assert_eq!(child.at(-1, 3), None);
        assert_eq!(child.at(0, 7), None);
    }

    #[test]
    fn test_full_columns_are_not_legal() {
        let board = board(
            "
            X......
            O......
            X......
            O......
            X......
            O.....X
            ",
        );

        assert!(board.is_column_full(Column(0)));
        assert_eq!(board.legal_actions().first(), Some(&Column(1)));
        assert_eq!(board.legal_actions().len(), 6);
        assert!(board.try_apply(Column(0)).is_err());
        assert!(board.try_apply(Column(9)).is_err());
    }

    #[test]
    fn test_horizontal_win_ends_the_game() {
        let board = board(
            "
            .......
            OOO....
            XXX....
            ",
        );
        assert_eq!(board.winner(), None);

        let won = board.apply(&Column(3));

        assert_eq!(won.winner(), Some(Player::First));
        assert!(won.is_over());
        assert!(won.legal_actions().is_empty());
        assert_eq!(won.result_for(&Player::First), GameResult::Win);
        assert_eq!(won.result_for(&Player::Second), GameResult::Loss);
    }

    #[test]
    fn test_vertical_win() {
        let board = board(
            "
            .......
            X......
            XO.....
            XO.....
            XOO....
            ",
        );

        assert_eq!(board.winner(), Some(Player::First));
    }

    #[test]
    fn test_diagonal_win() {
        let board = board(
            "
            .......
            .......
            ...X...
            ..XO...
            .XOO...
            XOOX...
            ",
        );

        assert_eq!(board.winner(), Some(Player::First));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = board(
            "
            .......
            .......
            ...X...
            ...OX..
            ...OOX.
            ...XOOX
            ",
        );

        assert_eq!(board.winner(), Some(Player::First));
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let board = Board::from_diagram("XO\nOX", 3).unwrap();

        assert!(board.is_over());
        assert!(board.legal_actions().is_empty());
        assert_eq!(board.result_for(&Player::First), GameResult::Draw);
        assert_eq!(board.result_for(&Player::Second), GameResult::Draw);
    }

    #[test]
    fn test_turn_follows_piece_counts() {
        assert_eq!(board("...\n...\nX..").to_move(), Player::Second);
        assert_eq!(board("...\n...\nXO.").to_move(), Player::First);
    }

    #[test]
    fn test_rejects_bad_diagrams() {
        assert!("...\nX..\n...".parse::<Board>().is_err());
        assert!("...\n...\nOO.".parse::<Board>().is_err());
        assert!("...\n..\n...".parse::<Board>().is_err());
        assert!("...\n...\nZ..".parse::<Board>().is_err());
        assert!(Board::new(6, 7, 1).is_err());
        assert!(Board::new(0, 7, 4).is_err());
    }

    #[test]
    fn test_display_matches_diagram() {
        let diagram = ".......\n.......\n.......\n.......\nOOO....\nXXX....";

        assert_eq!(board(diagram).to_string(), diagram);
    }

    #[test]
    fn test_json_fixture() {
        let board: Board =
            serde_json::from_str(include_str!("../fixtures/open_three.json")).unwrap();

        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.win_length(), 4);
        assert_eq!(board.to_move(), Player::First);
        assert_eq!(board.at(0, 2), Some(Some(Player::Second)));
        assert_eq!(board.at(1, 5), Some(Some(Player::First)));

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["grid"][5], "OOO..XX");
    }

    #[test]
    fn test_parse_player() {
        assert_eq!("first".parse::<Player>().unwrap(), Player::First);
        assert_eq!("O".parse::<Player>().unwrap(), Player::Second);
        assert!("third".parse::<Player>().is_err());
        assert_eq!(Player::First.other(), Player::Second);
    }
}
