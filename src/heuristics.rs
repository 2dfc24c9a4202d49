use crate::puzzle::{Board, BLANK, BOARD_WIDTH, CELL_COUNT};

/// Row and column a tile occupies on the solved board.
///
/// Tiles `1..=8` sit in row-major order; the blank sits in the last cell.
pub fn goal_position(tile: u8) -> (usize, usize) {
    let index = if tile == BLANK {
        CELL_COUNT - 1
    } else {
        tile as usize - 1
    };
    (index / BOARD_WIDTH, index % BOARD_WIDTH)
}

/// Sum of the Manhattan distances of every non-blank tile to its goal cell.
///
/// The blank is not counted, which keeps the estimate admissible.
///
/// # Examples
/// ```
/// use search_stepper::heuristics::manhattan_distance;
/// use search_stepper::puzzle::Board;
/// assert_eq!(manhattan_distance(&Board::goal()), 0);
/// let board = Board::from_tiles([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
/// assert_eq!(manhattan_distance(&board), 2);
/// ```
pub fn manhattan_distance(board: &Board) -> u32 {
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(index, &tile)| {
            let (goal_r, goal_c) = goal_position(tile);
            let (r, c) = (index / BOARD_WIDTH, index % BOARD_WIDTH);
            (r.abs_diff(goal_r) + c.abs_diff(goal_c)) as u32
        })
        .sum()
}

/// Counts pairs of tiles that appear in the opposite order to the goal,
/// ignoring the blank.
pub fn inversions(board: &Board) -> usize {
    let tiles: Vec<u8> = board.tiles().iter().copied().filter(|&t| t != BLANK).collect();
    let mut count = 0;
    for i in 0..tiles.len() {
        for j in i + 1..tiles.len() {
            if tiles[i] > tiles[j] {
                count += 1;
            }
        }
    }
    count
}

/// Whether `board` can reach the goal.
///
/// On an odd-width board a blank move never changes inversion parity, and
/// the goal has none, so exactly the boards with an even count are solvable.
pub fn is_solvable(board: &Board) -> bool {
    inversions(board) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_positions() {
        assert_eq!(goal_position(1), (0, 0));
        assert_eq!(goal_position(5), (1, 1));
        assert_eq!(goal_position(8), (2, 1));
        assert_eq!(goal_position(BLANK), (2, 2));
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(&Board::goal()), 0);
        // 8 and 2 have traded places, two rows apart.
        let board = Board::from_tiles([1, 8, 3, 4, 5, 6, 7, 2, 0]).unwrap();
        assert_eq!(manhattan_distance(&board), 4);
    }

    #[test]
    fn test_single_move_changes_distance_by_one() {
        let board = Board::shuffled_with_seed(3);
        let h = manhattan_distance(&board);
        for (_, next) in board.successors() {
            assert_eq!(manhattan_distance(&next).abs_diff(h), 1);
        }
    }

    #[test]
    fn test_solvability() {
        assert!(is_solvable(&Board::goal()));
        assert!(is_solvable(&Board::shuffled_with_seed(11)));
        let swapped = Board::from_tiles([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(inversions(&swapped), 1);
        assert!(!is_solvable(&swapped));
    }
}
