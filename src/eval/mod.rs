//! Evaluation module for five-in-a-row positions
//!
//! This module provides line analysis and scoring for board positions.
//! The evaluation considers:
//! - Line patterns (twos, threes, fours, fives) and their open ends
//! - Positional bonuses (centre control, adjacency, gaps)

pub mod heuristic;
pub mod line;
pub mod patterns;

pub use heuristic::{
    center_score, count_adjacent, evaluate_board, evaluate_line, evaluate_position,
    gap_potential, line_potential,
};
pub use line::{analyze_line, check_direction, is_run_head, LineRun};
pub use patterns::{LineScores, PositionWeights, ThreatScores, TieBreakWeights};
