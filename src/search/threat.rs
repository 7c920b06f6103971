//! Pattern threat scanning
//!
//! This module implements the hand-tuned pattern layer the expert tier walks
//! through before (and instead of) searching:
//! - Immediate wins and blocks
//! - Jump fours (`X_XX`, `XX_X`, `XX_XX`) that complete five with one stone
//! - Open threes that must be answered
//! - Gapped shapes worth extending for the computer
//! - Attack and defense scans over whole runs
//! - Double open-three forks
//!
//! Each scan produces a [`ThreatMap`]; [`ThreatScanner::select_best`] turns a
//! map into a move.

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::eval::{analyze_line, center_score, gap_potential, is_run_head, line_potential};
use crate::eval::{ThreatScores, TieBreakWeights};
use crate::rules::has_five_at_pos;

/// Candidate cells with accumulated scores, in first-encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatMap {
    entries: Vec<(Pos, i32)>,
}

impl ThreatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `score` to `pos`, inserting it at the end if new
    pub fn add(&mut self, pos: Pos, score: i32) {
        match self.entries.iter_mut().find(|(p, _)| *p == pos) {
            Some((_, s)) => *s += score,
            None => self.entries.push((pos, score)),
        }
    }

    /// Set `pos` to `score` unless it already holds at least that much
    pub fn raise(&mut self, pos: Pos, score: i32) {
        match self.entries.iter_mut().find(|(p, _)| *p == pos) {
            Some((_, s)) => *s = (*s).max(score),
            None => self.entries.push((pos, score)),
        }
    }

    pub fn get(&self, pos: Pos) -> Option<i32> {
        self.entries.iter().find(|(p, _)| *p == pos).map(|&(_, s)| s)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, i32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn max_score(&self) -> Option<i32> {
        self.entries.iter().map(|&(_, s)| s).max()
    }

    pub fn total(&self) -> i64 {
        self.entries.iter().map(|&(_, s)| i64::from(s)).sum()
    }
}

/// Which side a potential scan is run for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotentialMode {
    /// Computer runs: fours, open and closed threes, open twos
    Attack,
    /// Opponent runs: fours and open threes only
    Defense,
}

/// Pattern scanner bound to one computer colour and one set of weights
#[derive(Debug, Clone, Copy)]
pub struct ThreatScanner<'a> {
    scores: &'a ThreatScores,
    tie_break: &'a TieBreakWeights,
    computer: Stone,
}

impl<'a> ThreatScanner<'a> {
    pub fn new(scores: &'a ThreatScores, tie_break: &'a TieBreakWeights, computer: Stone) -> Self {
        Self {
            scores,
            tie_break,
            computer,
        }
    }

    #[inline]
    pub fn computer(&self) -> Stone {
        self.computer
    }

    #[inline]
    pub fn opponent(&self) -> Stone {
        self.computer.opponent()
    }

    /// First empty cell in row-major order where `player` completes five
    pub fn find_winning_move(&self, board: &Board, player: Stone) -> Option<Pos> {
        let mut scratch = *board;
        let empties: Vec<Pos> = board.empty_positions().collect();
        empties.into_iter().find(|&pos| {
            scratch.with_move(pos, player, |b| has_five_at_pos(b, pos, player))
        })
    }

    /// Empty cells that turn three `player` stones with one gap into five-minus-one.
    ///
    /// Matches on one cell add up across directions and shapes.
    pub fn find_jump_four_threats(&self, board: &Board, player: Stone) -> ThreatMap {
        let own = player == self.computer;
        let jump = if own {
            self.scores.jump_four_own
        } else {
            self.scores.jump_four_opponent
        };
        let split = if own {
            self.scores.split_four_own
        } else {
            self.scores.split_four_opponent
        };

        let mut threats = ThreatMap::new();
        for pos in board.empty_positions() {
            for dir in DIRECTIONS {
                let at = |k: i32| pos.step(dir, k).map(|p| board.get(p));
                let is = |k: i32| at(k) == Some(player);
                let free = |k: i32| at(k) == Some(Stone::Empty);

                // X_XX
                if is(-1) && is(1) && is(2) && (free(-2) || free(3)) {
                    threats.add(pos, jump);
                }
                // XX_X
                if is(-2) && is(-1) && is(1) && (free(-3) || free(2)) {
                    threats.add(pos, jump);
                }
                // XX_XX
                if is(-2) && is(-1) && is(1) && is(2) {
                    threats.add(pos, split);
                }
            }
        }
        threats
    }

    /// Both open ends of every opponent open three
    pub fn find_open_three_threats(&self, board: &Board) -> ThreatMap {
        let opponent = self.opponent();
        let mut threats = ThreatMap::new();
        for pos in board.stones(opponent) {
            for dir in DIRECTIONS {
                if !is_run_head(board, pos, dir, opponent) {
                    continue;
                }
                let run = analyze_line(board, pos, dir, opponent);
                if run.length == 3 && run.open_end_count == 2 {
                    for end in run.open_ends() {
                        threats.add(end, self.scores.open_three_block);
                    }
                }
            }
        }
        threats
    }

    /// True if the opponent has at least one open three anywhere
    pub fn opponent_has_open_three(&self, board: &Board) -> bool {
        let opponent = self.opponent();
        board.stones(opponent).any(|pos| {
            DIRECTIONS.iter().any(|&dir| {
                is_run_head(board, pos, dir, opponent) && {
                    let run = analyze_line(board, pos, dir, opponent);
                    run.length == 3 && run.open_end_count == 2
                }
            })
        })
    }

    /// Gapped computer shapes, each anchored on the scanned empty cell
    pub fn find_special_patterns(&self, board: &Board) -> ThreatMap {
        let me = self.computer;
        let mut moves = ThreatMap::new();
        for pos in board.empty_positions() {
            for dir in DIRECTIONS {
                let at = |k: i32| pos.step(dir, k).map(|p| board.get(p));
                let is = |k: i32| at(k) == Some(me);
                let free = |k: i32| at(k) == Some(Stone::Empty);
                // Empty or off the board
                let flank_open = |k: i32| at(k).map_or(true, |s| s == Stone::Empty);

                // X__X: stones at -2 and +1, gaps at -1 and here
                if is(-2) && free(-1) && is(1) {
                    if let Some(near) = pos.step(dir, -1) {
                        moves.add(near, self.scores.two_gap_near);
                    }
                    moves.add(pos, self.scores.two_gap_far);
                }

                // X_XX / XX_X inside a four-cell window
                if (is(-1) && is(1) && is(2)) || (is(-2) && is(-1) && is(1)) {
                    moves.add(pos, self.scores.gapped_three);
                }

                // X_XXX with free flanks at -2 and +4
                if is(-1) && is(1) && is(2) && is(3) && flank_open(-2) && flank_open(4) {
                    moves.add(pos, self.scores.gapped_four);
                }
                // XXX_X with free flanks at -4 and +2
                if is(-3) && is(-2) && is(-1) && is(1) && flank_open(-4) && flank_open(2) {
                    moves.add(pos, self.scores.gapped_four);
                }
            }
        }
        moves
    }

    /// Score the open ends of every `player` run.
    ///
    /// Attack counts fours, open and closed threes and open twos; defense
    /// only fours and open threes, leaving half-blocked threes alone.
    pub fn find_potential_moves(&self, board: &Board, player: Stone, mode: PotentialMode) -> ThreatMap {
        let s = self.scores;
        let mut moves = ThreatMap::new();
        for pos in board.stones(player) {
            for dir in DIRECTIONS {
                if !is_run_head(board, pos, dir, player) {
                    continue;
                }
                let run = analyze_line(board, pos, dir, player);
                let score = match (mode, run.length, run.open_end_count) {
                    (_, 4, n) if n > 0 => s.potential_four,
                    (PotentialMode::Attack, 3, 2) => s.potential_open_three_attack,
                    (PotentialMode::Attack, 3, 1) => s.potential_closed_three,
                    (PotentialMode::Attack, 2, 2) => s.potential_open_two,
                    (PotentialMode::Defense, 3, 2) => s.potential_open_three_defense,
                    _ => continue,
                };
                for end in run.open_ends() {
                    moves.add(end, score);
                }
            }
        }
        moves
    }

    /// Empty cells where `player` would make two or more open threes at once
    pub fn find_double_threats(&self, board: &Board, player: Stone) -> ThreatMap {
        let mut scratch = *board;
        let mut threats = ThreatMap::new();
        for pos in board.empty_positions() {
            let open_threes = scratch.with_move(pos, player, |b| {
                DIRECTIONS
                    .iter()
                    .filter(|&&dir| {
                        let run = analyze_line(b, pos, dir, player);
                        run.length == 3 && run.open_end_count == 2
                    })
                    .count()
            });
            if open_threes >= 2 {
                threats.raise(pos, self.scores.fork);
            }
        }
        threats
    }

    /// Threat term added to the search leaf evaluation
    pub fn threat_balance(&self, board: &Board) -> i64 {
        let me = self.computer;
        let them = self.opponent();
        2 * self.find_jump_four_threats(board, me).total()
            + 3 * self.find_double_threats(board, me).total()
            - 3 * self.find_jump_four_threats(board, them).total()
            - 4 * self.find_double_threats(board, them).total()
    }

    /// Tie-break score for one cell
    fn tie_break_score(&self, board: &Board, pos: Pos) -> i32 {
        let w = self.tie_break;
        line_potential(board, pos, self.computer) * w.own_potential
            + line_potential(board, pos, self.opponent()) * w.opponent_potential
            + center_score(pos) * w.center
            + gap_potential(board, pos, self.computer) * w.gap
    }

    /// Highest scoring cell; ties broken by the tie-break score, then by
    /// encounter order.
    pub fn select_best(&self, board: &Board, map: &ThreatMap) -> Option<Pos> {
        let top = map.max_score()?;
        let mut best: Option<(Pos, i32)> = None;
        for (pos, _) in map.iter().filter(|&(_, s)| s == top) {
            let score = self.tie_break_score(board, pos);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((pos, score));
            }
        }
        best.map(|(pos, _)| pos)
    }
}
