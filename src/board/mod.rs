//! Board representation for five-in-a-row

pub mod board;
pub mod codec;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::{Board, BoardError, HypotheticalMove};
pub use codec::{CodecError, Snapshot};

use serde::{Deserialize, Serialize};

/// Board size (13x13)
pub const BOARD_SIZE: usize = 13;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 169

/// Index of the centre line (6 on a 13x13 board)
pub const CENTER: u8 = (BOARD_SIZE / 2) as u8;

/// The four line axes in scan order: (dr, dc).
/// A direction and its negation describe the same axis.
pub const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Signed encoding: Black = 1, White = -1, Empty = 0
    #[inline]
    pub fn to_signed(self) -> i8 {
        match self {
            Stone::Black => 1,
            Stone::White => -1,
            Stone::Empty => 0,
        }
    }

    /// Inverse of [`Stone::to_signed`]; `None` for anything outside {-1, 0, 1}
    #[inline]
    pub fn from_signed(value: i32) -> Option<Stone> {
        match value {
            1 => Some(Stone::Black),
            -1 => Some(Stone::White),
            0 => Some(Stone::Empty),
            _ => None,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// The centre cell
    #[inline]
    pub const fn center() -> Self {
        Self { row: CENTER, col: CENTER }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Build a position from signed coordinates, `None` when off-board
    #[inline]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if Self::is_valid(row, col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Walk `k` steps along `dir` (negative `k` walks backwards)
    #[inline]
    pub fn step(self, (dr, dc): (i8, i8), k: i32) -> Option<Self> {
        Self::try_new(
            i32::from(self.row) + i32::from(dr) * k,
            i32::from(self.col) + i32::from(dc) * k,
        )
    }

    /// Manhattan distance to the centre cell
    #[inline]
    pub fn center_distance(self) -> i32 {
        let c = i32::from(CENTER);
        (i32::from(self.row) - c).abs() + (i32::from(self.col) - c).abs()
    }

    /// The cell mirrored through the centre (180° rotation)
    #[inline]
    pub fn mirrored(self) -> Self {
        let last = BOARD_SIZE as u8 - 1;
        Self { row: last - self.row, col: last - self.col }
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
