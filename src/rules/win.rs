//! Win condition checking
//!
//! Five or more stones of one colour in a row along any of the four axes
//! wins. There is no capture rule and overlines count.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Collect the full run of `color` through `pos` along `dir`, in board order
fn run_through(board: &Board, pos: Pos, dir: (i8, i8), color: Stone) -> Vec<Pos> {
    let mut line = vec![pos];
    let mut k = 1;
    while let Some(prev) = pos.step(dir, -k).filter(|&p| board.get(p) == color) {
        line.insert(0, prev);
        k += 1;
    }
    k = 1;
    while let Some(next) = pos.step(dir, k).filter(|&p| board.get(p) == color) {
        line.push(next);
        k += 1;
    }
    line
}

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks the 4 axes through `pos`, treating `pos` itself as `color`
/// regardless of what the board holds there. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    if color == Stone::Empty {
        return false;
    }
    DIRECTIONS.iter().any(|&dir| {
        let mut count = 1;
        for sign in [1, -1] {
            let mut k = 1;
            while let Some(p) = pos.step(dir, sign * k) {
                if board.get(p) != color {
                    break;
                }
                count += 1;
                k += 1;
            }
        }
        count >= 5
    })
}

/// The winning run through `pos`, if any
pub fn find_five_line_at_pos(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }
    DIRECTIONS
        .iter()
        .map(|&dir| run_through(board, pos, dir, color))
        .find(|line| line.len() >= 5)
}

/// Find the positions of a 5-in-a-row if one exists
///
/// Returns Some(Vec<Pos>) with at least 5 positions if a winning line exists,
/// None otherwise.
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    if stone == Stone::Empty {
        return None;
    }
    board
        .stones(stone)
        .find_map(|pos| find_five_line_at_pos(board, pos))
}

/// Check for a winner; Black is checked first
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&s| has_five_in_row(board, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_in_row_horizontal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(6, i), Stone::Black);
        }
        assert!(has_five_in_row(&board, Stone::Black));
        assert!(!has_five_in_row(&board, Stone::White));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let mut board = Board::new();
        for i in 3..8 {
            board.place_stone(Pos::new(i, 2), Stone::White);
        }
        assert!(has_five_in_row(&board, Stone::White));
        assert_eq!(check_winner(&board), Some(Stone::White));
    }

    #[test]
    fn test_diagonal_sw_five() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(2 + i, 10 - i), Stone::Black);
        }
        assert!(has_five_in_row(&board, Stone::Black));
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let mut board = Board::new();
        for i in 0..6 {
            board.place_stone(Pos::new(i, i), Stone::White);
        }
        assert!(has_five_in_row(&board, Stone::White));
        let line = find_five_line_at_pos(&board, Pos::new(3, 3)).unwrap();
        assert_eq!(line.len(), 6);
        assert_eq!(line[0], Pos::new(0, 0));
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(6, i), Stone::Black);
        }
        assert!(!has_five_in_row(&board, Stone::Black));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_five_at_corner() {
        let mut board = Board::new();
        for i in 8..13 {
            board.place_stone(Pos::new(12, i), Stone::Black);
        }
        let line = find_five_positions(&board, Stone::Black).unwrap();
        assert_eq!(line.first(), Some(&Pos::new(12, 8)));
        assert_eq!(line.last(), Some(&Pos::new(12, 12)));
    }

    #[test]
    fn test_has_five_at_pos_hypothetical() {
        let mut board = Board::new();
        for i in [4, 5, 7, 8] {
            board.place_stone(Pos::new(6, i), Stone::White);
        }
        assert!(has_five_at_pos(&board, Pos::new(6, 6), Stone::White));
        assert!(!has_five_at_pos(&board, Pos::new(6, 6), Stone::Black));
    }

    #[test]
    fn test_empty_not_five() {
        let board = Board::new();
        assert!(!has_five_at_pos(&board, Pos::center(), Stone::Empty));
        assert_eq!(find_five_line_at_pos(&board, Pos::center()), None);
    }
}
