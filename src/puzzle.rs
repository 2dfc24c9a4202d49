//! Board model for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: the four directions the blank can slide in.
//! - `Board`: a 3x3 permutation of the tiles `0..=8`, where `0` is the blank,
//!   with methods for move generation, goal testing and shuffling.
use crate::error::SearchError;
use crate::heuristics::goal_position;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;

/// Width (and height) of the board.
pub const BOARD_WIDTH: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_WIDTH;

/// The blank cell.
pub const BLANK: u8 = 0;

/// Number of random blank moves applied by [`Board::shuffled`].
pub const SHUFFLE_MOVES: usize = 50;

/// Tiles 1..8 in row-major order with the blank last.
pub const GOAL_TILES: [u8; CELL_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Direction in which the blank moves.
///
/// Moving the blank `Up` swaps it with the tile above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in the order successors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Returns the move that undoes this one.
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Row and column deltas applied to the blank.
    fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(label)
    }
}

/// A 3x3 sliding-tile board.
///
/// Boards compare equal position by position, which is how the solver
/// detects repeated configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Board {
    tiles: [u8; CELL_COUNT],
}

impl Board {
    /// Returns the solved board.
    ///
    /// # Examples
    /// ```
    /// use search_stepper::puzzle::Board;
    /// let board = Board::goal();
    /// assert!(board.is_goal());
    /// assert_eq!(board.empty_index(), 8);
    /// ```
    pub fn goal() -> Self {
        Board { tiles: GOAL_TILES }
    }

    /// Creates a board from its tiles in row-major order.
    ///
    /// # Arguments
    /// * `tiles`: nine values that must be a permutation of `0..=8`.
    ///
    /// # Errors
    /// `SearchError::InvalidBoard` if a tile is out of range or repeated.
    pub fn from_tiles(tiles: [u8; CELL_COUNT]) -> Result<Self, SearchError> {
        let mut seen = [false; CELL_COUNT];
        for &tile in &tiles {
            let idx = tile as usize;
            if idx >= CELL_COUNT {
                return Err(SearchError::InvalidBoard(format!(
                    "tile {} is outside 0..={}",
                    tile,
                    CELL_COUNT - 1
                )));
            }
            if seen[idx] {
                return Err(SearchError::InvalidBoard(format!("tile {} appears twice", tile)));
            }
            seen[idx] = true;
        }
        Ok(Board { tiles })
    }

    pub fn tiles(&self) -> &[u8; CELL_COUNT] {
        &self.tiles
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `BOARD_WIDTH`.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.tiles[r * BOARD_WIDTH + c]
    }

    /// Index of the blank cell.
    pub fn empty_index(&self) -> usize {
        // A valid board always holds exactly one blank.
        self.tiles.iter().position(|&t| t == BLANK).unwrap_or(0)
    }

    /// Exact equality with the goal configuration.
    pub fn is_goal(&self) -> bool {
        self.tiles == GOAL_TILES
    }

    /// Moves that keep the blank on the board, in `Move::ALL` order.
    pub fn available_moves(&self) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&m| self.blank_target(m).is_some())
            .collect()
    }

    /// Index the blank would move to, if it stays in bounds.
    fn blank_target(&self, m: Move) -> Option<usize> {
        let empty = self.empty_index();
        let (dr, dc) = m.delta();
        let r = (empty / BOARD_WIDTH) as isize + dr;
        let c = (empty % BOARD_WIDTH) as isize + dc;
        let width = BOARD_WIDTH as isize;
        if (0..width).contains(&r) && (0..width).contains(&c) {
            Some((r * width + c) as usize)
        } else {
            None
        }
    }

    /// Returns the board after sliding the blank in direction `m`, or `None`
    /// if the blank would leave the board.
    ///
    /// # Examples
    /// ```
    /// use search_stepper::puzzle::{Board, Move};
    /// let board = Board::goal();
    /// assert!(board.apply(Move::Down).is_none());
    /// let moved = board.apply(Move::Left).unwrap();
    /// assert_eq!(moved.tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
    /// ```
    pub fn apply(&self, m: Move) -> Option<Board> {
        let target = self.blank_target(m)?;
        let mut tiles = self.tiles;
        tiles.swap(self.empty_index(), target);
        Some(Board { tiles })
    }

    /// Every board reachable with one blank move, paired with that move.
    ///
    /// A corner blank yields 2 successors, an edge blank 3 and the centre 4.
    pub fn successors(&self) -> Vec<(Move, Board)> {
        Move::ALL
            .into_iter()
            .filter_map(|m| self.apply(m).map(|b| (m, b)))
            .collect()
    }

    /// Shuffles the goal board with `SHUFFLE_MOVES` random valid blank moves.
    ///
    /// Starting from the goal guarantees the result is solvable.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut board = Board::goal();
        for _ in 0..SHUFFLE_MOVES {
            let moves = board.available_moves();
            if let Some(&m) = moves.choose(rng) {
                if let Some(next) = board.apply(m) {
                    board = next;
                }
            }
        }
        board
    }

    /// Deterministic variant of [`Board::shuffled`]: the same seed always
    /// gives the same board.
    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Board::shuffled(&mut rng)
    }

    /// Renders the board with ANSI colors: tiles already on their goal cell
    /// are green, misplaced tiles yellow, the blank dark.
    pub fn to_colored_string(&self) -> String {
        let mut output = String::new();
        for r in 0..BOARD_WIDTH {
            for c in 0..BOARD_WIDTH {
                let tile = self.get_tile(r, c);
                let color_code = if tile == BLANK {
                    "40"
                } else if goal_position(tile) == (r, c) {
                    "42"
                } else {
                    "43"
                };
                let label = if tile == BLANK {
                    "   ".to_string()
                } else {
                    format!(" {} ", tile)
                };
                output.push_str(&format!("\x1b[1;30;{}m{}\x1b[m", color_code, label));
            }
            if r < BOARD_WIDTH - 1 {
                output.push('\n');
            }
        }
        output
    }
}

impl fmt::Display for Board {
    /// Plain three-line rendering, `_` for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_WIDTH {
            let row: Vec<String> = (0..BOARD_WIDTH)
                .map(|c| match self.get_tile(r, c) {
                    BLANK => "_".to_string(),
                    t => t.to_string(),
                })
                .collect();
            write!(f, "{}", row.join(" "))?;
            if r < BOARD_WIDTH - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
