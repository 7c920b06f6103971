//! Main AI Engine dispatching on difficulty
//!
//! This module provides the engine the front end talks to. Given a board and
//! a [`Difficulty`] it returns one empty cell. The tiers trade strength for
//! cost:
//!
//! 0. **Easy**: a random empty cell, now and then a hard move
//! 1. **Medium**: greedy scan of a window around the latest stone
//! 2. **Hard**: immediate win or block, else full-board greedy scan
//! 3. **Expert**: opening book, then the pattern stages in order (win, block,
//!    jump fours, special shapes, open threes), then alpha-beta search while
//!    the board is sparse, then attack / defense / strategic scans
//!
//! # Example
//!
//! ```
//! use fiveinrow::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut engine = AIEngine::with_seed(Default::default(), 7);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(6, 6), Stone::Black);
//!
//! let result = engine.get_move_with_stats(&board, Difficulty::Expert);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! ```

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Pos, Stone, BOARD_SIZE, CENTER};
use crate::config::EngineConfig;
use crate::eval::{center_score, count_adjacent, evaluate_position, gap_potential, line_potential};
use crate::search::{PotentialMode, SearchResult, Searcher, ThreatMap, ThreatScanner};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("difficulty level {0} is out of range 0..=3")]
pub struct InvalidDifficulty(pub u8);

/// Playing strength, persisted as an integer 0-3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Easy = 0,
    #[default]
    Medium = 1,
    Hard = 2,
    Expert = 3,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];
    pub const LEVELS: u8 = 4;

    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    /// Pause before the computer's stone appears; weaker tiers wait longer
    pub fn thinking_delay(self) -> Duration {
        Duration::from_millis(u64::from(Self::LEVELS - self.level()) * 80)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(level))
            .copied()
            .ok_or(InvalidDifficulty(level))
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> u8 {
        d.level()
    }
}

/// Stage of the pipeline that produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Expert opening book
    Opening,
    /// Completes five for the computer
    ImmediateWin,
    /// Stops the opponent completing five
    BlockWin,
    /// Fills the gap of an opponent jump four
    JumpFourDefense,
    /// Fills the gap of a computer jump four
    JumpFourAttack,
    /// Extends a gapped computer shape
    SpecialPattern,
    /// Closes an end of an opponent open three
    OpenThreeDefense,
    /// Alpha-beta search result
    AlphaBeta,
    /// Attack scan over computer runs
    Attack,
    /// Defense scan over opponent runs
    Defense,
    /// Whole-board positional scan
    Strategic,
    /// Hard tier greedy scan
    Greedy,
    /// Medium tier window scan
    Window,
    /// Easy tier random cell
    Random,
    /// Board is full
    NoMove,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen cell; `None` only on a full board
    pub best_move: Option<Pos>,
    /// Stage specific score (threat map value, search score or greedy total)
    pub score: i64,
    /// Stage that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Search nodes visited, 0 outside alpha-beta
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn found(pos: Pos, score: i64, search_type: SearchType) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            time_ms: 0,
            nodes: 0,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms: 0,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::NoMove,
            time_ms: 0,
            nodes: 0,
        }
    }
}

/// Main AI engine.
///
/// Holds the tuning config, the colour it plays, and the RNG used by the
/// easy tier. Nothing else carries over between calls; the caller's board
/// is never written to.
pub struct AIEngine {
    config: EngineConfig,
    computer: Stone,
    rng: StdRng,
}

impl AIEngine {
    /// Engine with the tuned defaults, playing White
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            computer: Stone::White,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic engine, for tests and replays
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            computer: Stone::White,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_computer(&mut self, color: Stone) {
        debug_assert!(color != Stone::Empty);
        self.computer = color;
    }

    #[inline]
    pub fn computer(&self) -> Stone {
        self.computer
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the best move for the computer, `None` on a full board.
    pub fn get_move(&mut self, board: &Board, difficulty: Difficulty) -> Option<Pos> {
        self.get_move_with_stats(board, difficulty).best_move
    }

    /// Like [`get_move`](Self::get_move) but never fails: a full board yields
    /// the centre cell.
    pub fn calculate_next_move(&mut self, board: &Board, difficulty: Difficulty) -> Pos {
        self.get_move(board, difficulty).unwrap_or_else(Pos::center)
    }

    /// Get the best move with statistics.
    pub fn get_move_with_stats(&mut self, board: &Board, difficulty: Difficulty) -> MoveResult {
        let start = Instant::now();

        let mut result = if board.is_full() {
            MoveResult::no_move()
        } else {
            match difficulty {
                Difficulty::Easy => self.easy(board),
                Difficulty::Medium => self.medium(board),
                Difficulty::Hard => self.hard(board),
                Difficulty::Expert => self.expert(board),
            }
        };

        result.time_ms = start.elapsed().as_millis() as u64;
        debug!(
            ?difficulty,
            best_move = ?result.best_move,
            search_type = ?result.search_type,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "move chosen"
        );
        result
    }

    fn scanner(&self) -> ThreatScanner<'_> {
        ThreatScanner::new(&self.config.threat_scores, &self.config.tie_break, self.computer)
    }

    /// `evaluate_position` with the configured tables
    fn position_value(&self, board: &Board, pos: Pos, player: Stone) -> i32 {
        evaluate_position(
            board,
            pos,
            player,
            &self.config.line_scores,
            self.config.position.center_bonus,
        )
    }

    // =========================================================================
    // Tiers
    // =========================================================================

    fn easy(&mut self, board: &Board) -> MoveResult {
        let empties: Vec<Pos> = board.empty_positions().collect();
        let tiers = self.config.tiers;
        let strong_chance = tiers.easy_strong_chance.clamp(0.0, 1.0);
        if empties.len() <= tiers.easy_strong_empties || self.rng.gen_bool(strong_chance) {
            debug!("easy tier playing a hard move");
            return self.hard(board);
        }
        match empties.choose(&mut self.rng) {
            Some(&pos) => MoveResult::found(pos, 0, SearchType::Random),
            None => MoveResult::no_move(),
        }
    }

    fn medium(&mut self, board: &Board) -> MoveResult {
        let tiers = self.config.tiers;
        let anchor = last_stone(board).unwrap_or_else(Pos::center);
        let radius = tiers.medium_radius;
        let opponent = self.computer.opponent();

        let mut best: Option<(Pos, i64)> = None;
        for r in i32::from(anchor.row) - radius..=i32::from(anchor.row) + radius {
            for c in i32::from(anchor.col) - radius..=i32::from(anchor.col) + radius {
                let Some(pos) = Pos::try_new(r, c).filter(|&p| board.is_empty(p)) else {
                    continue;
                };
                let own = self.position_value(board, pos, self.computer) as f32 * tiers.medium_own_weight;
                let block = self.position_value(board, pos, opponent) as f32;
                let total = (own + block) as i64;
                if best.map_or(true, |(_, b)| total > b) {
                    best = Some((pos, total));
                }
            }
        }

        match best {
            Some((pos, score)) => MoveResult::found(pos, score, SearchType::Window),
            None => self.easy(board),
        }
    }

    fn hard(&mut self, board: &Board) -> MoveResult {
        if let Some(result) = self.forced_move(board) {
            return result;
        }

        let weight = self.config.tiers.hard_block_weight;
        let opponent = self.computer.opponent();
        let mut best: Option<(Pos, i64)> = None;
        for pos in board.empty_positions() {
            let own = self.position_value(board, pos, self.computer) as f32;
            let block = self.position_value(board, pos, opponent) as f32 * weight;
            let total = (own + block) as i64;
            if best.map_or(true, |(_, b)| total > b) {
                best = Some((pos, total));
            }
        }

        match best {
            Some((pos, score)) => MoveResult::found(pos, score, SearchType::Greedy),
            None => MoveResult::no_move(),
        }
    }

    /// Take a win, else block the opponent's
    fn forced_move(&self, board: &Board) -> Option<MoveResult> {
        let scanner = self.scanner();
        let win = self.config.line_scores.win.into();
        if let Some(pos) = scanner.find_winning_move(board, self.computer) {
            return Some(MoveResult::found(pos, win, SearchType::ImmediateWin));
        }
        if let Some(pos) = scanner.find_winning_move(board, self.computer.opponent()) {
            return Some(MoveResult::found(pos, win, SearchType::BlockWin));
        }
        None
    }

    fn expert(&mut self, board: &Board) -> MoveResult {
        let stones = board.stone_count();
        if stones < 3 {
            if let Some(pos) = opening_move(board) {
                return MoveResult::found(pos, 0, SearchType::Opening);
            }
        }

        if let Some(result) = self.forced_move(board) {
            return result;
        }

        let scanner = self.scanner();
        let me = self.computer;
        let them = me.opponent();

        let pick = |map: ThreatMap, search_type: SearchType| -> Option<MoveResult> {
            let pos = scanner.select_best(board, &map)?;
            let score = map.get(pos).unwrap_or_default();
            debug!(?search_type, candidates = map.len(), "pattern stage hit");
            Some(MoveResult::found(pos, score.into(), search_type))
        };

        let staged = pick(scanner.find_jump_four_threats(board, them), SearchType::JumpFourDefense)
            .or_else(|| pick(scanner.find_jump_four_threats(board, me), SearchType::JumpFourAttack))
            .or_else(|| pick(scanner.find_special_patterns(board), SearchType::SpecialPattern))
            .or_else(|| pick(scanner.find_open_three_threats(board), SearchType::OpenThreeDefense));
        if let Some(result) = staged {
            return result;
        }

        let search = &self.config.search;
        if stones < search.search_move_limit {
            let depth = search.depth_for(stones);
            let result = Searcher::new(&self.config, me).search(board, depth);
            debug!(depth, nodes = result.nodes, score = result.score, "alpha-beta stage");
            if result.best_move.is_some() {
                return MoveResult::from_alphabeta(result);
            }
        }

        pick(scanner.find_potential_moves(board, me, PotentialMode::Attack), SearchType::Attack)
            .or_else(|| {
                pick(
                    scanner.find_potential_moves(board, them, PotentialMode::Defense),
                    SearchType::Defense,
                )
            })
            .unwrap_or_else(|| self.strategic(board))
    }

    /// Best cell by line potential, centre, neighbours and gaps
    fn strategic(&self, board: &Board) -> MoveResult {
        let w = &self.config.position;
        let me = self.computer;
        let mut best: Option<(Pos, i64)> = None;
        for pos in board.empty_positions() {
            let score = line_potential(board, pos, me) * w.strategic_own
                + line_potential(board, pos, me.opponent()) * w.strategic_opponent
                + center_score(pos) * w.strategic_center
                + count_adjacent(board, pos) * w.strategic_adjacent
                + gap_potential(board, pos, me) * w.strategic_gap;
            let score = i64::from(score);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((pos, score));
            }
        }
        match best {
            Some((pos, score)) => MoveResult::found(pos, score, SearchType::Strategic),
            None => MoveResult::no_move(),
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Last occupied cell in row-major order
fn last_stone(board: &Board) -> Option<Pos> {
    (0..BOARD_SIZE * BOARD_SIZE)
        .rev()
        .map(Pos::from_index)
        .find(|&p| !board.is_empty(p))
}

/// Book moves for the first stones: centre, the point mirror of a lone
/// stone, then the cell left of centre.
fn opening_move(board: &Board) -> Option<Pos> {
    match board.stone_count() {
        0 => return Some(Pos::center()),
        1 => {
            let mirror = last_stone(board).map(Pos::mirrored);
            if let Some(pos) = mirror.filter(|&p| board.is_empty(p)) {
                return Some(pos);
            }
        }
        _ => {}
    }
    Some(Pos::new(CENTER, CENTER - 1)).filter(|&p| board.is_empty(p))
}
