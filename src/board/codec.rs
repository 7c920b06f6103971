//! Packed persisted board encoding
//!
//! 169 cells at 2 bits each, most significant bits first, padded to 43 bytes.
//! Cell codes: `00` White, `01` Empty, `10` Black. `11` is invalid.
//! A snapshot may append the side to move as a big-endian `i32`.

use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use thiserror::Error;

use super::{Board, Pos, Stone, TOTAL_CELLS};

/// Packed board size in bytes
pub const PACKED_LEN: usize = (TOTAL_CELLS * 2 + 7) / 8; // 43

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("packed board must be {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("invalid cell code 0b11 at index {index}")]
    InvalidCode { index: usize },
    #[error("invalid side to move {0}")]
    SideToMove(i32),
}

/// Board plus the colour due to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub side_to_move: Stone,
}

#[inline]
fn code_of(stone: Stone) -> u8 {
    match stone {
        Stone::White => 0b00,
        Stone::Empty => 0b01,
        Stone::Black => 0b10,
    }
}

pub fn serialize_board(board: &Board) -> [u8; PACKED_LEN] {
    let mut out = [0u8; PACKED_LEN];
    for idx in 0..TOTAL_CELLS {
        let code = code_of(board.get(Pos::from_index(idx)));
        let shift = 6 - (idx % 4) * 2;
        out[idx / 4] |= code << shift;
    }
    out
}

pub fn deserialize_board(bytes: &[u8]) -> Result<Board, CodecError> {
    if bytes.len() != PACKED_LEN {
        return Err(CodecError::Length {
            expected: PACKED_LEN,
            actual: bytes.len(),
        });
    }
    let mut board = Board::new();
    for idx in 0..TOTAL_CELLS {
        let shift = 6 - (idx % 4) * 2;
        let stone = match (bytes[idx / 4] >> shift) & 0b11 {
            0b00 => Stone::White,
            0b01 => Stone::Empty,
            0b10 => Stone::Black,
            _ => return Err(CodecError::InvalidCode { index: idx }),
        };
        board.set(Pos::from_index(idx), stone);
    }
    Ok(board)
}

pub fn encode_snapshot(snapshot: &Snapshot) -> Vec<u8> {
    let mut out = Vec::with_capacity(PACKED_LEN + 4);
    out.extend_from_slice(&serialize_board(&snapshot.board));
    let mut trailer = [0u8; 4];
    BigEndian::write_i32(&mut trailer, i32::from(snapshot.side_to_move.to_signed()));
    out.extend_from_slice(&trailer);
    out
}

/// Decode a snapshot; a missing or short trailer means Black to move.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, CodecError> {
    if bytes.len() < PACKED_LEN {
        return Err(CodecError::Length {
            expected: PACKED_LEN,
            actual: bytes.len(),
        });
    }
    let board = deserialize_board(&bytes[..PACKED_LEN])?;
    let mut trailer = Cursor::new(&bytes[PACKED_LEN..]);
    let side_to_move = match trailer.read_i32::<BigEndian>() {
        Ok(value) => match Stone::from_signed(value) {
            Some(Stone::Empty) | None => return Err(CodecError::SideToMove(value)),
            Some(stone) => stone,
        },
        Err(_) => Stone::Black,
    };
    Ok(Snapshot {
        board,
        side_to_move,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_len() {
        assert_eq!(PACKED_LEN, 43);
    }

    #[test]
    fn test_empty_board_bytes() {
        let bytes = serialize_board(&Board::new());
        // 01010101 for every full byte, last byte holds one cell
        assert!(bytes[..42].iter().all(|&b| b == 0b0101_0101));
        assert_eq!(bytes[42], 0b0100_0000);
    }

    #[test]
    fn test_first_cell_msb() {
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Stone::Black);
        board.set(Pos::new(0, 1), Stone::White);
        let bytes = serialize_board(&board);
        assert_eq!(bytes[0], 0b1000_0101);
    }

    #[test]
    fn test_roundtrip_with_trailer() {
        let mut board = Board::new();
        board.set(Pos::new(6, 6), Stone::Black);
        board.set(Pos::new(12, 12), Stone::White);
        let snap = Snapshot {
            board,
            side_to_move: Stone::White,
        };
        let bytes = encode_snapshot(&snap);
        assert_eq!(bytes.len(), PACKED_LEN + 4);
        assert_eq!(&bytes[PACKED_LEN..], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(decode_snapshot(&bytes), Ok(snap));
    }

    #[test]
    fn test_black_trailer_bytes() {
        let snap = Snapshot {
            board: Board::new(),
            side_to_move: Stone::Black,
        };
        let bytes = encode_snapshot(&snap);
        assert_eq!(&bytes[PACKED_LEN..], &[0, 0, 0, 1]);
        assert_eq!(decode_snapshot(&bytes), Ok(snap));
    }

    #[test]
    fn test_missing_trailer_defaults_black() {
        let bytes = serialize_board(&Board::new());
        let snap = decode_snapshot(&bytes).unwrap();
        assert_eq!(snap.side_to_move, Stone::Black);
        assert!(snap.board.is_board_empty());
    }

    #[test]
    fn test_short_input_rejected() {
        let err = decode_snapshot(&[0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Length {
                expected: 43,
                actual: 10
            }
        );
    }

    #[test]
    fn test_invalid_code_rejected() {
        let mut bytes = serialize_board(&Board::new());
        bytes[1] = 0b0111_0101;
        assert_eq!(
            deserialize_board(&bytes),
            Err(CodecError::InvalidCode { index: 5 })
        );
    }
}
