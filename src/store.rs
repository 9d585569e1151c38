//! Record storage.
//!
//! The [`Repository`] trait is the only way the rest of the crate reads or
//! writes players and games. Two backends implement it:
//!
//! - [`MemoryStore`]: relational tables held in memory, lost on exit
//! - [`JsonFileStore`]: a single JSON document on disk, rewritten atomically
//!   on every mutation
//!
//! Both guarantee that a game is either stored with all of its participants
//! or not stored at all, and that a player referenced by a game cannot be
//! deleted.

pub mod json_file;
pub mod memory;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Backend, StoreConfig};
use crate::record::{Game, GameId, GameParticipant, Player, PlayerId, Records};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the data file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file exists but is not a valid record document.
    #[error("corrupt data file {}: {source}", path.display())]
    Corrupt {
        /// File involved.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be serialized.
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),

    /// The player is referenced by at least one game.
    #[error("Cannot delete player who has played games. Delete games first.")]
    PlayerHasGames(PlayerId),

    /// A participant references a player that does not exist.
    #[error("player {0} does not exist")]
    UnknownPlayer(PlayerId),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable home for players and games.
///
/// Implementations must be safe to share between request handlers. Every
/// method observes a consistent state: no reader ever sees a game without
/// its participants.
pub trait Repository: Send + Sync + fmt::Debug {
    /// Every player, in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list_players(&self) -> StoreResult<Vec<Player>>;

    /// Store a new player named `name` and return it.
    ///
    /// Name uniqueness is enforced by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn create_player(&self, name: &str) -> StoreResult<Player>;

    /// Delete a player. Returns `false` if no such player exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlayerHasGames`] if any game references the
    /// player, or an error if the backend cannot be written.
    fn delete_player(&self, id: PlayerId) -> StoreResult<bool>;

    /// Every game with its participants, in recording order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list_games(&self) -> StoreResult<Vec<Game>>;

    /// Store a game with all of its participants and return it.
    ///
    /// Either the game and every participant are stored, or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownPlayer`] if a participant references a
    /// missing player, or an error if the backend cannot be written.
    fn create_game(&self, players: Vec<GameParticipant>) -> StoreResult<Game>;

    /// Delete a game and its participants. Returns `false` if no such game
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete_game(&self, id: GameId) -> StoreResult<bool>;

    /// Every player and game, read together.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn snapshot(&self) -> StoreResult<Records> {
        Ok(Records {
            players: self.list_players()?,
            games: self.list_games()?,
        })
    }

    /// Look a player up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn find_player(&self, id: PlayerId) -> StoreResult<Option<Player>> {
        Ok(self.list_players()?.into_iter().find(|p| p.id == id))
    }

    /// Look a game up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn find_game(&self, id: GameId) -> StoreResult<Option<Game>> {
        Ok(self.list_games()?.into_iter().find(|g| g.id == id))
    }
}

/// Open the backend selected by `config`.
///
/// # Errors
///
/// Returns an error if the file backend cannot read or parse its data file.
pub fn open(config: &StoreConfig) -> StoreResult<Arc<dyn Repository>> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
        Backend::File => Ok(Arc::new(JsonFileStore::open(&config.path)?)),
    }
}

/// Check that every participant references a known player.
fn check_participants(
    players: &[GameParticipant],
    exists: impl Fn(PlayerId) -> bool,
) -> StoreResult<()> {
    match players.iter().find(|p| !exists(p.player_id)) {
        Some(missing) => Err(StoreError::UnknownPlayer(missing.player_id)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wonder::WonderName;

    #[test]
    fn test_open_memory_backend() {
        let config = StoreConfig {
            backend: Backend::Memory,
            path: PathBuf::from("unused.json"),
        };
        let repo = open(&config).unwrap();
        assert!(repo.list_players().unwrap().is_empty());
    }

    #[test]
    fn test_default_lookups() {
        let repo = MemoryStore::new();
        let ann = repo.create_player("Ann").unwrap();
        let bob = repo.create_player("Bob").unwrap();
        let cy = repo.create_player("Cy").unwrap();
        let game = repo
            .create_game(vec![
                GameParticipant::new(ann.id, WonderName::Gizah, 40),
                GameParticipant::new(bob.id, WonderName::Babylon, 50),
                GameParticipant::new(cy.id, WonderName::Olympia, 60),
            ])
            .unwrap();

        assert_eq!(repo.find_player(bob.id).unwrap(), Some(bob));
        assert_eq!(repo.find_game(game.id).unwrap(), Some(game.clone()));

        let records = repo.snapshot().unwrap();
        assert_eq!(records.players.len(), 3);
        assert_eq!(records.games, vec![game]);
    }

    #[test]
    fn test_player_has_games_message() {
        let err = StoreError::PlayerHasGames(PlayerId::nil());
        assert_eq!(
            err.to_string(),
            "Cannot delete player who has played games. Delete games first."
        );
    }
}
