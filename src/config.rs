//! Engine configuration
//!
//! All tunable numbers in one serde tree. `EngineConfig::default()` is the
//! tuned engine; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::{LineScores, PositionWeights, ThreatScores, TieBreakWeights};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed engine config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Candidate generation and minimax limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidates kept per node once the opening is over
    pub max_candidates: usize,
    /// Candidates kept per node while stones < `early_move_limit`
    pub early_candidates: usize,
    /// Half-width of the centre window used in the opening
    pub early_window: i32,
    pub early_move_limit: u32,
    /// The expert tier searches only while stones < this
    pub search_move_limit: u32,
    /// Stone-count thresholds for depth 1, 2 and 3; depth 4 beyond the last
    pub depth_thresholds: [u32; 3],
    /// Per remaining ply bonus for a five at a leaf
    pub depth_bonus: i64,
    /// Returned below the root when the opponent has an open three
    pub open_three_penalty: i64,
    /// Alpha-beta cutoffs; off gives plain minimax
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: 15,
            early_candidates: 5,
            early_window: 2,
            early_move_limit: 5,
            search_move_limit: 40,
            depth_thresholds: [5, 10, 20],
            depth_bonus: 1000,
            open_three_penalty: 500_000,
            pruning: true,
        }
    }
}

impl SearchConfig {
    /// Search depth for a board holding `stones` stones
    pub fn depth_for(&self, stones: u32) -> u8 {
        let [d1, d2, d3] = self.depth_thresholds;
        match stones {
            s if s < d1 => 1,
            s if s < d2 => 2,
            s if s < d3 => 3,
            _ => 4,
        }
    }
}

/// Knobs for the lower difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Chance that the easy tier plays a hard move instead
    pub easy_strong_chance: f64,
    /// Easy plays hard moves once this few empty cells remain
    pub easy_strong_empties: usize,
    /// Medium scans a square of this radius around its anchor
    pub medium_radius: i32,
    /// Medium weight of the computer's own score
    pub medium_own_weight: f32,
    /// Hard weight of the blocking score
    pub hard_block_weight: f32,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            easy_strong_chance: 0.2,
            easy_strong_empties: 5,
            medium_radius: 4,
            medium_own_weight: 0.8,
            hard_block_weight: 0.8,
        }
    }
}

/// Everything the engine reads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub line_scores: LineScores,
    pub threat_scores: ThreatScores,
    pub tie_break: TieBreakWeights,
    pub position: PositionWeights,
    pub search: SearchConfig,
    pub tiers: TierConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
