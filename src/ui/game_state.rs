//! Game state management for the five-in-a-row GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::board::Snapshot;
use crate::rules::{check_winner, find_five_line_at_pos, find_five_positions};
use crate::storage::SaveStore;
use crate::{AIEngine, Board, Difficulty, EngineConfig, MoveResult, Pos, Stone};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Human plays Black, the computer plays White
    #[default]
    PvE,
    /// Player vs Player (hotseat)
    PvP,
}

impl GameMode {
    #[inline]
    pub fn has_ai(self) -> bool {
        self == GameMode::PvE
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Game result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// `None` when the board filled up without a five
    pub winner: Option<Stone>,
    pub winning_line: Option<Vec<Pos>>,
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    /// Stone waiting for confirmation
    pub pending: Option<Pos>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub message: Option<String>,
    pub difficulty: Difficulty,
    pub confirm_moves: bool,
    config: EngineConfig,
}

impl GameState {
    pub fn new(mode: GameMode, difficulty: Difficulty, config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            mode,
            current_turn: Stone::Black,
            game_over: None,
            last_move: None,
            pending: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            message: None,
            difficulty,
            confirm_moves: false,
            config,
        }
    }

    /// Fresh board in `mode`, keeping difficulty and settings
    pub fn reset(&mut self, mode: GameMode) {
        self.board = Board::new();
        self.mode = mode;
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.last_move = None;
        self.pending = None;
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.message = None;
        info!(?mode, difficulty = self.difficulty.label(), "new game");
    }

    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE => self.current_turn == Stone::Black,
            GameMode::PvP => true,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        self.mode.has_ai() && self.current_turn == Stone::White
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Handle a click on `pos` by the human to move.
    ///
    /// With confirmation on, the click only moves the pending stone.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() || !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if !self.board.is_empty(pos) {
            return Err("Cell is occupied".to_string());
        }

        if self.confirm_moves {
            self.pending = Some(pos);
        } else {
            self.execute_move(pos);
        }
        Ok(())
    }

    /// Play the pending stone, if any
    pub fn confirm_pending(&mut self) {
        if let Some(pos) = self.pending.take() {
            if let Err(msg) = self.try_place_confirmed(pos) {
                self.message = Some(msg);
            }
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    fn try_place_confirmed(&mut self, pos: Pos) -> Result<(), String> {
        let confirm = std::mem::replace(&mut self.confirm_moves, false);
        let result = self.try_place_stone(pos);
        self.confirm_moves = confirm;
        result
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) {
        let color = self.current_turn;
        self.board.place_stone(pos, color);
        self.last_move = Some(pos);
        self.pending = None;
        self.message = None;

        if let Some(line) = find_five_line_at_pos(&self.board, pos) {
            info!(winner = ?color, "five in a row");
            self.game_over = Some(GameResult {
                winner: Some(color),
                winning_line: Some(line),
            });
            return;
        }
        if self.board.is_full() {
            info!("board full, draw");
            self.game_over = Some(GameResult {
                winner: None,
                winning_line: None,
            });
            return;
        }

        self.current_turn = color.opponent();
    }

    /// Hand a copy of the board to a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }

        let board = self.board;
        let color = self.current_turn;
        let difficulty = self.difficulty;
        let config = self.config.clone();

        let (tx, rx) = channel();

        thread::spawn(move || {
            thread::sleep(difficulty.thinking_delay());
            let mut engine = AIEngine::with_config(config);
            engine.set_computer(color);
            let result = engine.get_move_with_stats(&board, difficulty);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, .. } => match receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some(move_result) = result {
            self.ai_state = AiState::Idle;
            self.last_ai_result = Some(move_result.clone());

            match move_result.best_move {
                Some(pos) if self.board.is_empty(pos) => self.execute_move(pos),
                _ => self.message = Some("AI could not find a move".to_string()),
            }
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            side_to_move: self.current_turn,
        }
    }

    /// Replace the game with a saved position
    pub fn restore(&mut self, snapshot: Snapshot, ai_player: bool) {
        self.reset(if ai_player { GameMode::PvE } else { GameMode::PvP });
        self.board = snapshot.board;
        self.current_turn = snapshot.side_to_move;

        if let Some(winner) = check_winner(&self.board) {
            self.game_over = Some(GameResult {
                winner: Some(winner),
                winning_line: find_five_positions(&self.board, winner),
            });
        } else if self.board.is_full() {
            self.game_over = Some(GameResult {
                winner: None,
                winning_line: None,
            });
        }
    }

    /// Load save `id`; an unreadable save leaves a fresh board
    pub fn load_from(&mut self, store: &SaveStore, id: u64) {
        let ai_player = store.get(id).map_or(self.mode.has_ai(), |g| g.ai_player);
        match store.load(id) {
            Ok(snapshot) => {
                self.restore(snapshot, ai_player);
                info!(id, "game loaded");
            }
            Err(e) => {
                warn!(id, error = %e, "could not load save, starting fresh");
                self.reset(self.mode);
                self.message = Some(format!("Could not load save: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn state(mode: GameMode) -> GameState {
        GameState::new(mode, Difficulty::Hard, EngineConfig::default())
    }

    #[test]
    fn test_pvp_alternates_turns() {
        let mut s = state(GameMode::PvP);
        s.try_place_stone(Pos::new(6, 6)).unwrap();
        assert_eq!(s.current_turn, Stone::White);
        assert!(s.try_place_stone(Pos::new(6, 6)).is_err());
        s.try_place_stone(Pos::new(6, 7)).unwrap();
        assert_eq!(s.board.get(Pos::new(6, 7)), Stone::White);
        assert_eq!(s.current_turn, Stone::Black);
    }

    #[test]
    fn test_pending_move_confirm_and_cancel() {
        let mut s = state(GameMode::PvP);
        s.confirm_moves = true;

        s.try_place_stone(Pos::new(6, 6)).unwrap();
        s.try_place_stone(Pos::new(5, 5)).unwrap();
        assert_eq!(s.pending, Some(Pos::new(5, 5)));
        assert!(s.board.is_board_empty());

        s.cancel_pending();
        assert_eq!(s.pending, None);
        assert!(s.board.is_board_empty());

        s.try_place_stone(Pos::new(6, 6)).unwrap();
        s.confirm_pending();
        assert_eq!(s.board.get(Pos::new(6, 6)), Stone::Black);
        assert_eq!(s.current_turn, Stone::White);
        assert!(s.confirm_moves);
    }

    #[test]
    fn test_five_ends_game_with_line() {
        let mut s = state(GameMode::PvP);
        for col in 0..4 {
            s.try_place_stone(Pos::new(0, col)).unwrap();
            s.try_place_stone(Pos::new(1, col)).unwrap();
        }
        s.try_place_stone(Pos::new(0, 4)).unwrap();

        let result = s.game_over.clone().unwrap();
        assert_eq!(result.winner, Some(Stone::Black));
        assert_eq!(result.winning_line.unwrap().len(), 5);
        assert!(s.try_place_stone(Pos::new(5, 5)).is_err());
    }

    #[test]
    fn test_human_cannot_move_on_ai_turn() {
        let mut s = state(GameMode::PvE);
        s.try_place_stone(Pos::new(6, 6)).unwrap();
        assert!(s.is_ai_turn());
        assert!(s.try_place_stone(Pos::new(0, 0)).is_err());
    }

    #[test]
    fn test_ai_replies() {
        let mut s = state(GameMode::PvE);
        s.try_place_stone(Pos::new(6, 6)).unwrap();
        s.start_ai_thinking();
        assert!(s.is_ai_thinking());

        let deadline = Instant::now() + Duration::from_secs(10);
        while s.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
            s.check_ai_result();
        }

        assert_eq!(s.board.stone_count(), 2);
        assert_eq!(s.current_turn, Stone::Black);
        assert!(s.last_ai_result.is_some());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut s = state(GameMode::PvP);
        s.try_place_stone(Pos::new(6, 6)).unwrap();
        let snap = s.snapshot();

        let mut other = state(GameMode::PvE);
        other.restore(snap, false);
        assert_eq!(other.mode, GameMode::PvP);
        assert_eq!(other.board, s.board);
        assert_eq!(other.current_turn, Stone::White);
        assert!(other.game_over.is_none());
    }

    #[test]
    fn test_load_from_store() {
        let dir = tempdir().unwrap();
        let mut store = SaveStore::open(dir.path().join("saves.json")).unwrap();

        let mut s = state(GameMode::PvE);
        s.try_place_stone(Pos::new(3, 3)).unwrap();
        let id = store.save("mine", &s.snapshot(), true).unwrap();

        let mut loaded = state(GameMode::PvP);
        loaded.load_from(&store, id);
        assert_eq!(loaded.mode, GameMode::PvE);
        assert_eq!(loaded.board.get(Pos::new(3, 3)), Stone::Black);
        assert!(loaded.is_ai_turn());
    }

    #[test]
    fn test_load_missing_save_resets() {
        let dir = tempdir().unwrap();
        let store = SaveStore::open(dir.path().join("saves.json")).unwrap();

        let mut s = state(GameMode::PvP);
        s.try_place_stone(Pos::new(3, 3)).unwrap();
        s.load_from(&store, 42);
        assert!(s.board.is_board_empty());
        assert!(s.message.is_some());
    }
}
