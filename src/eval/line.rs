//! Run analysis along a single axis

use crate::board::{Board, Pos, Stone};

/// A maximal run of one colour along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    /// Stones in the run, counting the start cell
    pub length: u8,
    /// Open end cells: `[forward, backward]`
    pub ends: [Option<Pos>; 2],
    /// Number of `Some` entries in `ends`
    pub open_end_count: u8,
}

impl LineRun {
    /// Open ends, forward side first
    pub fn open_ends(&self) -> impl Iterator<Item = Pos> + '_ {
        self.ends.iter().flatten().copied()
    }
}

/// Walk from `start` along `dir` in both directions over `player` stones.
///
/// `start` is counted as part of the run whatever the board holds there,
/// so callers can analyse a cell they are about to play. An end is open
/// when the first non-matching cell is on the board and empty; the board
/// edge and opponent stones close it.
pub fn analyze_line(board: &Board, start: Pos, dir: (i8, i8), player: Stone) -> LineRun {
    let mut length = 1u8;
    let mut ends = [None, None];

    for (slot, sign) in [(0usize, 1i32), (1, -1)] {
        let mut k = 1;
        loop {
            match start.step(dir, sign * k) {
                Some(p) if board.get(p) == player => {
                    length += 1;
                    k += 1;
                }
                Some(p) if board.get(p) == Stone::Empty => {
                    ends[slot] = Some(p);
                    break;
                }
                _ => break,
            }
        }
    }

    let open_end_count = ends.iter().filter(|e| e.is_some()).count() as u8;
    LineRun {
        length,
        ends,
        open_end_count,
    }
}

/// True if `pos` starts a run along `dir`: its predecessor is not `player`.
///
/// Scanning only from run heads counts every run once per axis.
#[inline]
pub fn is_run_head(board: &Board, pos: Pos, dir: (i8, i8), player: Stone) -> bool {
    pos.step(dir, -1).map_or(true, |p| board.get(p) != player)
}

/// True once `target` consecutive `player` stones span `pos` along `dir`.
///
/// `pos` counts as one of them; openness is ignored.
pub fn check_direction(board: &Board, pos: Pos, dir: (i8, i8), player: Stone, target: u8) -> bool {
    analyze_line(board, pos, dir, player).length >= target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_SIZE, DIRECTIONS};

    fn place(board: &mut Board, stone: Stone, cells: &[(u8, u8)]) {
        for &(r, c) in cells {
            board.set(Pos::new(r, c), stone);
        }
    }

    #[test]
    fn test_open_three() {
        let mut board = Board::new();
        place(&mut board, Stone::Black, &[(6, 5), (6, 6), (6, 7)]);
        let run = analyze_line(&board, Pos::new(6, 5), (0, 1), Stone::Black);
        assert_eq!(run.length, 3);
        assert_eq!(run.open_end_count, 2);
        assert_eq!(run.ends, [Some(Pos::new(6, 8)), Some(Pos::new(6, 4))]);
    }

    #[test]
    fn test_edge_closes_end() {
        let mut board = Board::new();
        place(&mut board, Stone::White, &[(0, 0), (0, 1)]);
        let run = analyze_line(&board, Pos::new(0, 0), (0, 1), Stone::White);
        assert_eq!(run.length, 2);
        assert_eq!(run.open_end_count, 1);
        assert_eq!(run.open_ends().collect::<Vec<_>>(), vec![Pos::new(0, 2)]);
    }

    #[test]
    fn test_opponent_closes_end() {
        let mut board = Board::new();
        place(&mut board, Stone::Black, &[(3, 3), (4, 4), (5, 5)]);
        place(&mut board, Stone::White, &[(2, 2)]);
        let run = analyze_line(&board, Pos::new(4, 4), (1, 1), Stone::Black);
        assert_eq!(run.length, 3);
        assert_eq!(run.ends, [Some(Pos::new(6, 6)), None]);
    }

    #[test]
    fn test_run_head() {
        let mut board = Board::new();
        place(&mut board, Stone::Black, &[(6, 5), (6, 6)]);
        assert!(is_run_head(&board, Pos::new(6, 5), (0, 1), Stone::Black));
        assert!(!is_run_head(&board, Pos::new(6, 6), (0, 1), Stone::Black));
        assert!(is_run_head(&board, Pos::new(0, 0), (1, 1), Stone::Black));
    }

    #[test]
    fn test_check_direction_counts_pos() {
        let mut board = Board::new();
        place(&mut board, Stone::White, &[(1, 3), (2, 3), (4, 3), (5, 3)]);
        assert!(check_direction(&board, Pos::new(3, 3), (1, 0), Stone::White, 5));
        assert!(!check_direction(&board, Pos::new(3, 3), (0, 1), Stone::White, 2));
    }

    #[test]
    fn test_rotation_symmetry() {
        let mut board = Board::new();
        place(&mut board, Stone::Black, &[(2, 2), (2, 3), (2, 4), (3, 3), (4, 4)]);
        place(&mut board, Stone::White, &[(2, 1), (5, 5)]);
        let mut rotated = Board::new();
        for idx in 0..BOARD_SIZE * BOARD_SIZE {
            let p = Pos::from_index(idx);
            rotated.set(p.mirrored(), board.get(p));
        }

        for p in board.stones(Stone::Black) {
            for dir in DIRECTIONS {
                let a = analyze_line(&board, p, dir, Stone::Black);
                let b = analyze_line(&rotated, p.mirrored(), dir, Stone::Black);
                assert_eq!(a.length, b.length);
                assert_eq!(a.open_end_count, b.open_end_count);
                assert_eq!(a.ends[0].map(Pos::mirrored), b.ends[1]);
            }
        }
    }
}
