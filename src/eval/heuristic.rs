//! Static evaluation of cells and whole boards
//!
//! This module provides the leaf evaluation for the minimax search and the
//! scoring used by the greedy difficulty tiers. It evaluates positions based on:
//! - Line shape through a cell (fives, fours, threes, twos) with open and
//!   blocked ends
//! - Positional bonuses (centre control, adjacency, gapped shapes)

use crate::board::{Board, Pos, Stone, BOARD_SIZE, DIRECTIONS};

use super::line::analyze_line;
use super::patterns::{LineScores, PositionWeights};

const N: i32 = BOARD_SIZE as i32;

/// Score the line through `pos` along `dir` for `player`.
///
/// `pos` is treated as holding a `player` stone. Each side of the run ends
/// on an empty cell (one `space`), an opponent stone (one `blocked`) or the
/// board edge (neither).
///
/// # Returns
/// A value from `scores`; 0 for shapes worth nothing
#[must_use]
pub fn evaluate_line(board: &Board, pos: Pos, dir: (i8, i8), player: Stone, scores: &LineScores) -> i32 {
    let opponent = player.opponent();
    let mut count = 1;
    let mut space = 0;
    let mut blocked = 0;

    for sign in [1, -1] {
        let mut k = 1;
        loop {
            match pos.step(dir, sign * k).map(|p| board.get(p)) {
                Some(s) if s == player => {
                    count += 1;
                    k += 1;
                }
                Some(Stone::Empty) => {
                    space += 1;
                    break;
                }
                Some(s) if s == opponent => {
                    blocked += 1;
                    break;
                }
                _ => break,
            }
        }
    }

    match count {
        c if c >= 5 => scores.win,
        4 => {
            if blocked == 0 {
                scores.four
            } else if space >= 1 {
                scores.block_four
            } else {
                0
            }
        }
        3 => {
            if blocked == 0 && space == 2 {
                scores.three * 2
            } else if space >= 1 && blocked <= 1 {
                scores.three
            } else {
                scores.block_three
            }
        }
        2 => {
            if blocked == 0 && space == 2 {
                scores.two * 2
            } else if blocked == 1 && space >= 1 {
                scores.two
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// Value of `player` holding `pos`: four line scores plus a centre bonus.
///
/// The cell is evaluated as if `player` had played there; the board is
/// not modified.
#[must_use]
pub fn evaluate_position(
    board: &Board,
    pos: Pos,
    player: Stone,
    scores: &LineScores,
    center_bonus: i32,
) -> i32 {
    let lines: i32 = DIRECTIONS
        .iter()
        .map(|&dir| evaluate_line(board, pos, dir, player, scores))
        .sum();
    lines + (N - pos.center_distance()) * center_bonus / N
}

/// Whole-board score from `computer`'s perspective.
///
/// Sum over computer stones of `evaluate_position × board_own`, minus the sum
/// over opponent stones of `evaluate_position × board_opponent`.
#[must_use]
pub fn evaluate_board(
    board: &Board,
    computer: Stone,
    scores: &LineScores,
    weights: &PositionWeights,
) -> f64 {
    let side = |color: Stone| -> f64 {
        board
            .stones(color)
            .map(|p| f64::from(evaluate_position(board, p, color, scores, weights.center_bonus)))
            .sum()
    };
    side(computer) * weights.board_own - side(computer.opponent()) * weights.board_opponent
}

/// Growth potential of `player` playing `pos`, summed over the four axes.
///
/// Per axis: 4 → 500 both ends open / 300 one open; 3 → 200 / 80;
/// 2 → 50 / 20; a lone stone → 5 if any end is open.
#[must_use]
pub fn line_potential(board: &Board, pos: Pos, player: Stone) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&dir| {
            let run = analyze_line(board, pos, dir, player);
            match (run.length, run.open_end_count) {
                (_, 0) => 0,
                (4, 2) => 500,
                (4, _) => 300,
                (3, 2) => 200,
                (3, _) => 80,
                (2, 2) => 50,
                (2, _) => 20,
                (1, _) => 5,
                _ => 0,
            }
        })
        .sum()
}

/// Occupied cells in the 8-neighbourhood of `pos`
#[must_use]
pub fn count_adjacent(board: &Board, pos: Pos) -> i32 {
    let mut count = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let occupied = board
                .get_at(i32::from(pos.row) + dr, i32::from(pos.col) + dc)
                .is_some_and(|s| s != Stone::Empty);
            if occupied {
                count += 1;
            }
        }
    }
    count
}

/// Bonus for `pos` filling a gap between `player` stones.
///
/// Per axis: +50 for `X·X` (stones at −1 and +1), a further +100 when the
/// stone at −2 makes it `XX·X`.
#[must_use]
pub fn gap_potential(board: &Board, pos: Pos, player: Stone) -> i32 {
    let is_player = |dir: (i8, i8), k: i32| pos.step(dir, k).is_some_and(|p| board.get(p) == player);
    DIRECTIONS
        .iter()
        .map(|&dir| {
            let mut bonus = 0;
            if is_player(dir, -1) && is_player(dir, 1) {
                bonus += 50;
                if is_player(dir, -2) {
                    bonus += 100;
                }
            }
            bonus
        })
        .sum()
}

/// `N − manhattan(pos, centre)`, larger near the centre
#[inline]
#[must_use]
pub fn center_score(pos: Pos) -> i32 {
    N - pos.center_distance()
}
