//! Five-in-a-row AI engine
//!
//! A computer opponent for freestyle five-in-a-row:
//! - 13x13 board
//! - 5 or more in a row wins (overlines allowed)
//! - No captures, no forbidden shapes
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, scoped hypothetical moves, packed codec
//! - [`rules`]: Five-in-a-row detection
//! - [`eval`]: Line analysis, static evaluation and score tables
//! - [`search`]: Pattern threat scanning and alpha-beta minimax
//! - [`config`]: Tunable weights, overridable from JSON
//! - [`engine`]: Difficulty tiers integrating all components
//! - [`storage`]: Save list on disk
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use fiveinrow::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::new();
//!
//! board.place_stone(Pos::new(6, 6), Stone::Black);
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&board, Difficulty::Hard) {
//!     board.place_stone(pos, Stone::White);
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! ```
//!
//! # Expert Priority
//!
//! 1. Opening book for the first stones
//! 2. Immediate win, then block the opponent's five
//! 3. Jump fours (block first, then attack)
//! 4. Gapped computer shapes, then opponent open threes
//! 5. Alpha-Beta search while the board is sparse
//! 6. Attack, defense and strategic scans

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;
pub mod storage;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, Difficulty, MoveResult, SearchType};
