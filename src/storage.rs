//! Saved games on disk
//!
//! A single JSON file holds every save, newest first. Each entry carries the
//! packed board snapshot as base64 so the file stays readable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::codec::{decode_snapshot, encode_snapshot};
use crate::board::{CodecError, Snapshot};
use crate::config::{ConfigError, EngineConfig};

const APP_DIR: &str = "fiveinrow";
const SAVES_FILE: &str = "saves.json";
const ENGINE_FILE: &str = "engine.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed save file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt board data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("corrupt board data: {0}")]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no saved game with id {0}")]
    NotFound(u64),
}

/// One entry of the save list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub id: u64,
    pub title: String,
    /// Milliseconds since the Unix epoch
    pub time: i64,
    /// Base64 of the encoded snapshot
    pub data: String,
    /// Whether the game was against the computer
    pub ai_player: bool,
}

impl SavedGame {
    pub fn snapshot(&self) -> Result<Snapshot, StorageError> {
        let bytes = B64.decode(&self.data)?;
        Ok(decode_snapshot(&bytes)?)
    }

    /// Save time in local time, for display
    pub fn time_label(&self) -> String {
        match Local.timestamp_millis_opt(self.time).single() {
            Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::from("-"),
        }
    }
}

/// Platform data directory for this app, `./fiveinrow` as a fallback
pub fn data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from(".").join(APP_DIR),
    }
}

/// Default location of the save list
pub fn default_saves_path() -> PathBuf {
    data_dir().join(SAVES_FILE)
}

/// Read `engine.json` from `dir` if present
pub fn load_engine_config(dir: &Path) -> Result<Option<EngineConfig>, StorageError> {
    let path = dir.join(ENGINE_FILE);
    match fs::read_to_string(&path) {
        Ok(json) => {
            let config = EngineConfig::from_json(&json)?;
            info!(path = ?path, "loaded engine config override");
            Ok(Some(config))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The save list backed by one JSON file
#[derive(Debug)]
pub struct SaveStore {
    path: PathBuf,
    games: Vec<SavedGame>,
}

impl SaveStore {
    /// Store in the default data directory
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(default_saves_path())
    }

    /// Load the list at `path`; a missing file is an empty list
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let mut games: Vec<SavedGame> = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        games.sort_by(|a, b| b.time.cmp(&a.time));
        debug!(path = ?path, count = games.len(), "save list loaded");
        Ok(Self { path, games })
    }

    /// An empty store at `path` that has not touched the disk yet
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            games: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves, newest first
    pub fn games(&self) -> &[SavedGame] {
        &self.games
    }

    pub fn get(&self, id: u64) -> Option<&SavedGame> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Add a save at the top of the list and write the file.
    ///
    /// An empty title falls back to the save time.
    pub fn save(&mut self, title: &str, snapshot: &Snapshot, ai_player: bool) -> Result<u64, StorageError> {
        let now = Utc::now().timestamp_millis();
        let id = self
            .games
            .iter()
            .map(|g| g.id + 1)
            .max()
            .unwrap_or(0)
            .max(now.max(0) as u64);

        let mut game = SavedGame {
            id,
            title: title.trim().to_string(),
            time: now,
            data: B64.encode(encode_snapshot(snapshot)),
            ai_player,
        };
        if game.title.is_empty() {
            game.title = game.time_label();
        }

        self.games.insert(0, game);
        self.persist()?;
        info!(id, "game saved");
        Ok(id)
    }

    pub fn rename(&mut self, id: u64, title: &str) -> Result<(), StorageError> {
        let game = self
            .games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StorageError::NotFound(id))?;
        game.title = title.trim().to_string();
        self.persist()
    }

    /// Drop every save whose id is in `ids`
    pub fn remove(&mut self, ids: &[u64]) -> Result<usize, StorageError> {
        let before = self.games.len();
        self.games.retain(|g| !ids.contains(&g.id));
        let removed = before - self.games.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn load(&self, id: u64) -> Result<Snapshot, StorageError> {
        self.get(id).ok_or(StorageError::NotFound(id))?.snapshot()
    }

    /// Write through a temporary file, then rename over the old list
    fn persist(&self) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_vec_pretty(&self.games)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!(error = %e, "rename failed, writing save list in place");
            fs::copy(&tmp, &self.path)?;
            let _ = fs::remove_file(&tmp);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos, Stone};
    use tempfile::tempdir;

    fn snapshot() -> Snapshot {
        let mut board = Board::new();
        board.set(Pos::new(6, 6), Stone::Black);
        board.set(Pos::new(6, 7), Stone::White);
        Snapshot {
            board,
            side_to_move: Stone::Black,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = SaveStore::open(dir.path().join("saves.json")).unwrap();
        assert!(store.games().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("saves.json");

        let mut store = SaveStore::open(&path).unwrap();
        let first = store.save("first", &snapshot(), true).unwrap();
        let second = store.save("  second ", &snapshot(), false).unwrap();
        assert!(second > first);

        let store = SaveStore::open(&path).unwrap();
        let titles: Vec<_> = store.games().iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(store.load(first).unwrap(), snapshot());
        assert!(store.get(first).unwrap().ai_player);
    }

    #[test]
    fn test_empty_title_uses_time() {
        let dir = tempdir().unwrap();
        let mut store = SaveStore::open(dir.path().join("saves.json")).unwrap();
        let id = store.save("", &snapshot(), true).unwrap();
        assert!(!store.get(id).unwrap().title.is_empty());
    }

    #[test]
    fn test_rename_and_remove() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saves.json");
        let mut store = SaveStore::open(&path).unwrap();
        let a = store.save("a", &snapshot(), true).unwrap();
        let b = store.save("b", &snapshot(), true).unwrap();

        store.rename(a, "renamed").unwrap();
        assert_eq!(store.remove(&[b, 999]).unwrap(), 1);
        assert!(matches!(store.rename(b, "x"), Err(StorageError::NotFound(_))));

        let store = SaveStore::open(&path).unwrap();
        assert_eq!(store.games().len(), 1);
        assert_eq!(store.games()[0].title, "renamed");
    }

    #[test]
    fn test_corrupt_entry_reports_error() {
        let game = SavedGame {
            id: 1,
            title: "bad".into(),
            time: 0,
            data: B64.encode([0u8; 10]),
            ai_player: false,
        };
        assert!(matches!(game.snapshot(), Err(StorageError::Codec(_))));
    }

    #[test]
    fn test_engine_config_override() {
        let dir = tempdir().unwrap();
        assert_eq!(load_engine_config(dir.path()).unwrap(), None);

        fs::write(dir.path().join("engine.json"), r#"{ "search": { "pruning": false } }"#).unwrap();
        let config = load_engine_config(dir.path()).unwrap().unwrap();
        assert!(!config.search.pruning);

        fs::write(dir.path().join("engine.json"), "nope").unwrap();
        assert!(matches!(load_engine_config(dir.path()), Err(StorageError::Config(_))));
    }
}
