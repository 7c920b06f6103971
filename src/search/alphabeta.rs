//! Alpha-Beta minimax over a ranked candidate subset
//!
//! This module implements the search the expert tier falls back to once the
//! pattern layer has nothing forcing to say. It never expands the whole board:
//! every node ranks the empty cells with a cheap heuristic and keeps the best
//! few.
//!
//! # Features
//!
//! - Scores always from the computer's point of view (max = computer to move)
//! - Leaf = static board evaluation plus threat balance
//! - Faster wins and slower losses preferred through a per-ply depth bonus
//! - Open-three cutoff below the root
//! - Pruning can be switched off for plain minimax
//!
//! # Example
//!
//! ```
//! use fiveinrow::board::{Board, Pos, Stone};
//! use fiveinrow::config::EngineConfig;
//! use fiveinrow::search::Searcher;
//!
//! let config = EngineConfig::default();
//! let mut board = Board::new();
//! board.set(Pos::new(6, 6), Stone::Black);
//!
//! let mut searcher = Searcher::new(&config, Stone::White);
//! let result = searcher.search(&board, 1);
//! assert!(result.best_move.is_some());
//! ```

use tracing::trace;

use crate::board::{Board, Pos, Stone, BOARD_SIZE, CENTER};
use crate::config::EngineConfig;
use crate::eval::{count_adjacent, evaluate_board, gap_potential, line_potential};
use crate::rules::has_five_in_row;

use super::threat::ThreatScanner;

const N: i32 = BOARD_SIZE as i32;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Score of the best move, computer's perspective
    pub score: i64,
    /// Depth actually searched, at least 1
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
}

/// Depth-limited minimax searcher.
///
/// The maximizing side is always `computer`; the scratch board is the only
/// board ever mutated, and only through scoped hypothetical moves.
pub struct Searcher<'a> {
    config: &'a EngineConfig,
    computer: Stone,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    #[must_use]
    pub fn new(config: &'a EngineConfig, computer: Stone) -> Self {
        Self {
            config,
            computer,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn scanner(&self) -> ThreatScanner<'a> {
        ThreatScanner::new(&self.config.threat_scores, &self.config.tie_break, self.computer)
    }

    /// Ranked moves for `player`, best first.
    ///
    /// In the opening only cells near the centre are considered. Later every
    /// empty cell is scored by centre distance, neighbours and line potential
    /// (plus gap potential for the computer) and the list is cut to
    /// `max_candidates`. The sort is stable so equal scores keep row-major
    /// order.
    #[must_use]
    pub fn candidates(&self, board: &Board, player: Stone) -> Vec<(Pos, i32)> {
        let sc = &self.config.search;
        let center = i32::from(CENTER);

        let (mut moves, limit): (Vec<(Pos, i32)>, usize) = if board.stone_count() < sc.early_move_limit {
            let w = sc.early_window;
            let moves = (center - w..=center + w)
                .flat_map(|r| (center - w..=center + w).map(move |c| (r, c)))
                .filter_map(|(r, c)| Pos::try_new(r, c))
                .filter(|&p| board.is_empty(p))
                .map(|p| (p, 100 * (N - p.center_distance())))
                .collect();
            (moves, sc.early_candidates)
        } else {
            let moves = board
                .empty_positions()
                .map(|p| {
                    let mut score = 100 * (N - p.center_distance()) + 50 * count_adjacent(board, p);
                    score += line_potential(board, p, player);
                    if player == self.computer {
                        score += gap_potential(board, p, player);
                    }
                    (p, score)
                })
                .collect();
            (moves, sc.max_candidates)
        };

        moves.sort_by(|a, b| b.1.cmp(&a.1));
        moves.truncate(limit);
        moves
    }

    /// Static value of a leaf, computer's perspective
    fn leaf_score(&self, board: &Board, depth: u8) -> i64 {
        let cfg = self.config;
        let mut score = evaluate_board(board, self.computer, &cfg.line_scores, &cfg.position) as i64;
        score += self.scanner().threat_balance(board);

        let bonus = i64::from(depth) * cfg.search.depth_bonus;
        if has_five_in_row(board, self.computer) {
            score += bonus;
        } else if has_five_in_row(board, self.computer.opponent()) {
            score -= bonus;
        }
        score
    }

    /// Minimax value of `board` with `depth` plies to go.
    ///
    /// # Arguments
    /// * `maximizing` - true when the computer is to move
    /// * `alpha`, `beta` - search window; pass `i64::MIN`, `i64::MAX` for an
    ///   exact value
    #[must_use]
    pub fn minimax(&mut self, board: &mut Board, depth: u8, maximizing: bool, alpha: i64, beta: i64) -> i64 {
        self.node(board, depth, maximizing, alpha, beta, true).1
    }

    fn node(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i64,
        mut beta: i64,
        is_root: bool,
    ) -> (Option<Pos>, i64) {
        self.nodes += 1;

        let game_over =
            has_five_in_row(board, self.computer) || has_five_in_row(board, self.computer.opponent());
        if depth == 0 || game_over {
            return (None, self.leaf_score(board, depth));
        }

        if !is_root && self.scanner().opponent_has_open_three(board) {
            return (None, -self.config.search.open_three_penalty);
        }

        let player = if maximizing {
            self.computer
        } else {
            self.computer.opponent()
        };
        let candidates = self.candidates(board, player);
        if candidates.is_empty() {
            return (None, self.leaf_score(board, depth));
        }

        let pruning = self.config.search.pruning;
        let mut best_move = None;
        let mut best_score = if maximizing { i64::MIN } else { i64::MAX };

        for (pos, _) in candidates {
            let (_, score) = board.with_move(pos, player, |b| {
                self.node(b, depth - 1, !maximizing, alpha, beta, false)
            });

            if maximizing {
                if score > best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(pos);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(pos);
                }
                beta = beta.min(best_score);
            }

            if pruning && beta <= alpha {
                break;
            }
        }

        (best_move, best_score)
    }

    /// Search `board` to `depth` with the computer to move.
    #[must_use]
    pub fn search(&mut self, board: &Board, depth: u8) -> SearchResult {
        self.nodes = 0;
        let depth = depth.max(1);
        let mut scratch = *board;
        let (best_move, score) = self.node(&mut scratch, depth, true, i64::MIN, i64::MAX, true);
        trace!(?best_move, score, depth, nodes = self.nodes(), "search finished");
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes(),
        }
    }
}
