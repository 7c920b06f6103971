//! Pattern score tables
//!
//! Every weight the evaluator and the threat scanner use lives here as a
//! plain serde struct. `Default` gives the tuned values; a JSON override can
//! replace any subset of fields.

use serde::{Deserialize, Serialize};

/// Scores for a single line through a cell, see
/// [`evaluate_line`](super::heuristic::evaluate_line)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineScores {
    /// Five or more in a row
    pub win: i32,
    /// Four with no blocked side
    pub four: i32,
    /// Four with one side blocked and one side open
    pub block_four: i32,
    /// Three with at least one open side; doubled when both sides are open
    pub three: i32,
    /// Three that fits no other three case.
    /// Higher than `three`; the tuned engine plays with this ordering.
    pub block_three: i32,
    /// Two with one blocked side; doubled when both sides are open
    pub two: i32,
}

impl Default for LineScores {
    fn default() -> Self {
        Self {
            win: 1_000_000,
            four: 100_000,
            block_four: 8_000,
            three: 35_000,
            block_three: 50_000,
            two: 5_000,
        }
    }
}

/// Scores contributed to a [`ThreatMap`](crate::search::threat::ThreatMap)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatScores {
    // Jump fours: X_XX, XX_X
    pub jump_four_own: i32,
    pub jump_four_opponent: i32,
    // Split four: XX_XX
    pub split_four_own: i32,
    pub split_four_opponent: i32,

    /// Per open end of an opponent open three
    pub open_three_block: i32,
    /// Cell that creates two open threes at once
    pub fork: i32,

    // Special shapes, computer only
    /// X__X, inner gap next to the leading stone
    pub two_gap_near: i32,
    /// X__X, the other inner gap
    pub two_gap_far: i32,
    /// X_XX / XX_X inside a four-cell window
    pub gapped_three: i32,
    /// X_XXX / XXX_X with both flanks free
    pub gapped_four: i32,

    // Attack / defense scan
    /// Per open end of a four
    pub potential_four: i32,
    pub potential_open_three_attack: i32,
    pub potential_open_three_defense: i32,
    pub potential_closed_three: i32,
    pub potential_open_two: i32,
}

impl Default for ThreatScores {
    fn default() -> Self {
        Self {
            jump_four_own: 1000,
            jump_four_opponent: 900,
            split_four_own: 1050,
            split_four_opponent: 950,
            open_three_block: 500,
            fork: 1000,
            two_gap_near: 150,
            two_gap_far: 200,
            gapped_three: 300,
            gapped_four: 400,
            potential_four: 1000,
            potential_open_three_attack: 500,
            potential_open_three_defense: 300,
            potential_closed_three: 100,
            potential_open_two: 50,
        }
    }
}

/// Weights used to break ties between equally scored threat cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TieBreakWeights {
    pub own_potential: i32,
    pub opponent_potential: i32,
    pub center: i32,
    pub gap: i32,
}

impl Default for TieBreakWeights {
    fn default() -> Self {
        Self {
            own_potential: 8,
            opponent_potential: 3,
            center: 2,
            gap: 5,
        }
    }
}

/// Positional weights for the static evaluator and the strategic scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionWeights {
    /// Centre bonus, scaled by `(N - distance) / N`
    pub center_bonus: i32,
    /// Multiplier for computer stones in `evaluate_board`
    pub board_own: f64,
    /// Multiplier for opponent stones in `evaluate_board`
    pub board_opponent: f64,
    pub strategic_own: i32,
    pub strategic_opponent: i32,
    pub strategic_center: i32,
    pub strategic_adjacent: i32,
    pub strategic_gap: i32,
}

impl Default for PositionWeights {
    fn default() -> Self {
        Self {
            center_bonus: 1000,
            board_own: 1.2,
            board_opponent: 1.5,
            strategic_own: 10,
            strategic_opponent: 5,
            strategic_center: 3,
            strategic_adjacent: 8,
            strategic_gap: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_ordering() {
        let s = LineScores::default();
        assert!(s.win > s.four);
        assert!(s.four > s.three * 2);
        assert!(s.three * 2 > s.block_three);
        assert!(s.block_three > s.three);
        assert!(s.three > s.block_four);
        assert!(s.block_four > s.two);
    }

    #[test]
    fn test_split_four_outranks_jump_four() {
        let s = ThreatScores::default();
        assert!(s.split_four_own > s.jump_four_own);
        assert!(s.split_four_opponent > s.jump_four_opponent);
        assert!(s.jump_four_own > s.jump_four_opponent);
    }

    #[test]
    fn test_partial_override() {
        let s: LineScores = serde_json::from_str(r#"{ "two": 7 }"#).unwrap();
        assert_eq!(s.two, 7);
        assert_eq!(s.win, 1_000_000);
    }
}
