//! JSON file backend.
//!
//! The whole record set is one pretty-printed JSON document:
//!
//! ```text
//! { "players": [Player...], "games": [Game...] }
//! ```
//!
//! Each game embeds its participants. Mutations are applied to a copy,
//! written to `<path>.tmp` and renamed over the data file; the in-memory copy
//! is only replaced once the rename succeeded. A failed write leaves both the
//! file and the served state untouched.

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Repository, StoreError, StoreResult, check_participants};
use crate::record::{Game, GameId, GameParticipant, Player, PlayerId, Records};

/// Repository persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: RwLock<Records>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts an empty store; the file is created on the
    /// first write. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// valid record document.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let records = load(&path)?;
        tracing::info!(
            path = %path.display(),
            players = records.players.len(),
            games = records.games.len(),
            "opened data file"
        );
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Location of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the records, persist it, then publish it.
    fn mutate<T>(&self, change: impl FnOnce(&mut Records) -> StoreResult<T>) -> StoreResult<T> {
        let mut records = self.records.write();
        let mut next = records.clone();
        let out = change(&mut next)?;
        save(&next, &self.path)?;
        *records = next;
        Ok(out)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read records from `path`; a missing file yields empty records.
fn load(path: &Path) -> StoreResult<Records> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Records::default()),
        Err(e) => return Err(io_error(path)(e)),
    };
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Write records to `path` through a temporary sibling file.
fn save(records: &Records, path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let encoded = serde_json::to_string_pretty(records)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, encoded).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))?;
    Ok(())
}

impl Repository for JsonFileStore {
    fn list_players(&self) -> StoreResult<Vec<Player>> {
        Ok(self.records.read().players.clone())
    }

    fn create_player(&self, name: &str) -> StoreResult<Player> {
        let player = Player::new(name);
        self.mutate(|records| {
            records.players.push(player.clone());
            Ok(())
        })?;
        Ok(player)
    }

    fn delete_player(&self, id: PlayerId) -> StoreResult<bool> {
        if self.records.read().player(id).is_none() {
            return Ok(false);
        }
        self.mutate(|records| {
            if records.has_games(id) {
                return Err(StoreError::PlayerHasGames(id));
            }
            let before = records.players.len();
            records.players.retain(|p| p.id != id);
            Ok(records.players.len() != before)
        })
    }

    fn list_games(&self) -> StoreResult<Vec<Game>> {
        Ok(self.records.read().games.clone())
    }

    fn snapshot(&self) -> StoreResult<Records> {
        Ok(self.records.read().clone())
    }

    fn create_game(&self, players: Vec<GameParticipant>) -> StoreResult<Game> {
        let game = Game::new(players);
        self.mutate(|records| {
            check_participants(&game.players, |id| records.player(id).is_some())?;
            records.games.push(game.clone());
            Ok(())
        })?;
        Ok(game)
    }

    fn delete_game(&self, id: GameId) -> StoreResult<bool> {
        if self.records.read().game(id).is_none() {
            return Ok(false);
        }
        self.mutate(|records| {
            let before = records.games.len();
            records.games.retain(|g| g.id != id);
            Ok(records.games.len() != before)
        })
    }
}
