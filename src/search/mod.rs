//! Search module for the five-in-a-row AI
//!
//! Contains:
//! - Pattern threat scanning (wins, jump fours, open threes, forks)
//! - Alpha-Beta minimax over ranked candidates

pub mod alphabeta;
pub mod threat;

pub use alphabeta::{SearchResult, Searcher};
pub use threat::{PotentialMode, ThreatMap, ThreatScanner};
