use crate::dls::DepthLimit;
use crate::error::SearchError;
use crate::heuristics::is_solvable;
use crate::puzzle::{Board, BLANK, CELL_COUNT};

/// Parses a board written as nine tiles in row-major order.
///
/// Digits `0`-`8` are tiles, with `0`, `_` or `.` for the blank.
/// Whitespace, commas and `/` are separators and are ignored, so
/// `"123/456/78_"`, `"1 2 3 4 5 6 7 8 0"` and `"1,2,3,4,5,6,7,8,0"` are
/// the same board.
///
/// # Returns
/// * `Ok(Board)` for a valid permutation of `0..=8`.
/// * `Err(SearchError::InvalidBoard)` for any other character, for the
///   wrong number of tiles, or for a repeated tile.
///
/// # Examples
/// ```
/// use search_stepper::utils::board_from_str;
/// use search_stepper::puzzle::Board;
///
/// assert_eq!(board_from_str("123/456/78_").unwrap(), Board::goal());
/// assert!(board_from_str("1234").is_err());
/// assert!(board_from_str("12345678x").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, SearchError> {
    let mut tiles = Vec::with_capacity(CELL_COUNT);
    for (position, ch) in s.chars().enumerate() {
        match ch {
            '_' | '.' => tiles.push(BLANK),
            '0'..='8' => tiles.push(ch as u8 - b'0'),
            ',' | '/' => {}
            c if c.is_whitespace() => {}
            other => {
                return Err(SearchError::InvalidBoard(format!(
                    "unrecognized character '{}' at position {}",
                    other, position
                )))
            }
        }
    }
    let tiles: [u8; CELL_COUNT] = tiles.try_into().map_err(|t: Vec<u8>| {
        SearchError::InvalidBoard(format!("expected {} tiles, found {}", CELL_COUNT, t.len()))
    })?;
    Board::from_tiles(tiles)
}

/// Like [`board_from_str`], but also rejects boards that cannot reach the
/// goal.
pub fn solvable_board_from_str(s: &str) -> Result<Board, SearchError> {
    let board = board_from_str(s)?;
    if is_solvable(&board) {
        Ok(board)
    } else {
        Err(SearchError::UnsolvableBoard)
    }
}

/// Reads a depth limit typed by a user.
///
/// The leading integer of the input is used (`"4"`, `" 4 "` and `"4.7"`
/// all give 4) and clamped into range. Input that does not start with an
/// integer gives 0.
///
/// ```
/// use search_stepper::utils::parse_depth_limit;
/// assert_eq!(parse_depth_limit("3").get(), 3);
/// assert_eq!(parse_depth_limit("25").get(), 10);
/// assert_eq!(parse_depth_limit("-2").get(), 0);
/// assert_eq!(parse_depth_limit("deep").get(), 0);
/// ```
pub fn parse_depth_limit(input: &str) -> DepthLimit {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        log::warn!("depth limit '{}' is not a number, using 0", input);
        return DepthLimit::clamped(0);
    }
    // Too many digits for i64 still means "very large".
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    DepthLimit::clamped(if negative { -magnitude } else { magnitude })
}
