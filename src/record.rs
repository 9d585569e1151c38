//! Stored records: players, games and their participants.
//!
//! Records are immutable once created. They are plain data; the repository
//! decides how they are stored and the statistics engine derives views from
//! them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::wonder::WonderName;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// A member of the game group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique identifier.
    pub id: PlayerId,
    /// Display name, unique ignoring case.
    pub name: String,
    /// When the player was registered.
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a player with a fresh id, registered now.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether this player's name equals `name`, ignoring case.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One player's seat in a game: the wonder they built and their final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameParticipant {
    /// The player who sat at the table.
    pub player_id: PlayerId,
    /// The wonder they played.
    pub wonder_name: WonderName,
    /// Final score (0-200).
    pub score: u8,
}

impl GameParticipant {
    /// Create a participant.
    #[must_use]
    pub fn new(player_id: PlayerId, wonder_name: WonderName, score: u8) -> Self {
        Self {
            player_id,
            wonder_name,
            score,
        }
    }
}

/// A completed game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique identifier.
    pub id: GameId,
    /// When the game was recorded.
    pub created_at: DateTime<Utc>,
    /// Participants in the order they were submitted.
    pub players: Vec<GameParticipant>,
}

impl Game {
    /// Create a game with a fresh id, recorded now.
    #[must_use]
    pub fn new(players: Vec<GameParticipant>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            players,
        }
    }

    /// The participant entry for `player`, if they played in this game.
    #[must_use]
    pub fn participant(&self, player: PlayerId) -> Option<&GameParticipant> {
        self.players.iter().find(|p| p.player_id == player)
    }

    /// Whether `player` took part in this game.
    #[must_use]
    pub fn includes(&self, player: PlayerId) -> bool {
        self.participant(player).is_some()
    }
}

/// Every stored player and game, read together.
///
/// This is also the on-disk layout of the JSON file store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    /// Players in registration order.
    pub players: Vec<Player>,
    /// Games in recording order, each embedding its participants.
    pub games: Vec<Game>,
}

impl Records {
    /// Look a player up by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look a game up by id.
    #[must_use]
    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Whether any game references `player`.
    #[must_use]
    pub fn has_games(&self, player: PlayerId) -> bool {
        self.games.iter().any(|g| g.includes(player))
    }
}
