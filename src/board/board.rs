//! Board structure with scoped hypothetical moves

use std::ops::{Deref, DerefMut};

use thiserror::Error;

use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("row {row} has {actual} cells, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("invalid cell value {value} at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, value: i32 },
}

/// 13x13 game board, one stone per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Stone; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Build a board from signed rows (1 = Black, -1 = White, 0 = Empty)
    pub fn from_signed<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::RowCount {
                expected: BOARD_SIZE,
                actual: rows.len(),
            });
        }
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != BOARD_SIZE {
                return Err(BoardError::ColumnCount {
                    row: r,
                    expected: BOARD_SIZE,
                    actual: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                board.cells[r][c] = Stone::from_signed(value).ok_or(BoardError::InvalidCell {
                    row: r,
                    col: c,
                    value,
                })?;
            }
        }
        Ok(board)
    }

    /// Signed rows, inverse of [`Board::from_signed`]
    pub fn to_signed(&self) -> Vec<Vec<i32>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|s| i32::from(s.to_signed())).collect())
            .collect()
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Get stone at signed coordinates, `None` when off-board
    #[inline]
    pub fn get_at(&self, row: i32, col: i32) -> Option<Stone> {
        Pos::try_new(row, col).map(|p| self.get(p))
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, stone: Stone) {
        self.cells[pos.row as usize][pos.col as usize] = stone;
    }

    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        self.set(pos, stone);
    }

    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.set(pos, Stone::Empty);
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Total stones on board
    pub fn stone_count(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&s| s != Stone::Empty)
            .count() as u32
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stone_count() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Empty cells in row-major order
    pub fn empty_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions_of(Stone::Empty)
    }

    /// Stones of one colour in row-major order
    pub fn stones(&self, color: Stone) -> impl Iterator<Item = Pos> + '_ {
        self.positions_of(color)
    }

    fn positions_of(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(move |&p| self.get(p) == stone)
    }

    /// Place `stone` at `pos` until the returned guard is dropped.
    ///
    /// The previous cell value is restored on drop, including early return
    /// and unwinding, so callers can never leave a simulated stone behind.
    #[inline]
    pub fn simulate(&mut self, pos: Pos, stone: Stone) -> HypotheticalMove<'_> {
        let previous = self.get(pos);
        self.set(pos, stone);
        HypotheticalMove {
            board: self,
            pos,
            previous,
        }
    }

    /// Run `f` with `stone` placed at `pos`, then restore the cell.
    #[inline]
    pub fn with_move<R>(&mut self, pos: Pos, stone: Stone, f: impl FnOnce(&mut Board) -> R) -> R {
        let mut guard = self.simulate(pos, stone);
        f(&mut *guard)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped stone placement, see [`Board::simulate`]
pub struct HypotheticalMove<'a> {
    board: &'a mut Board,
    pos: Pos,
    previous: Stone,
}

impl Deref for HypotheticalMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for HypotheticalMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for HypotheticalMove<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, self.previous);
    }
}
