//! Request-level operations over a repository.
//!
//! The [`Ledger`] is what the HTTP handlers and the CLI talk to. It runs
//! validation before any mutation, enforces the cross-record rules the
//! repository does not (unique names, known players), and turns repository
//! snapshots into statistics views.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::record::{Game, GameId, Player, PlayerId};
use crate::stats::{GameHistory, PlayerStats, Snapshot, WonderStats};
use crate::store::{Repository, StoreError};
use crate::validation::{CreateGameRequest, CreatePlayerRequest, ValidationError};

/// Message returned when a player name is already taken.
pub const DUPLICATE_NAME: &str = "Player name already exists";

/// Game-group ledger backed by a shared repository.
#[derive(Debug, Clone)]
pub struct Ledger {
    repo: Arc<dyn Repository>,
}

impl Ledger {
    /// Wrap a repository.
    #[must_use]
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// The underlying repository.
    #[must_use]
    pub fn repository(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    /// Every player, in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.repo.list_players()?)
    }

    /// Every game, newest first. Games recorded at the same instant keep
    /// their recording order.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn list_games(&self) -> Result<Vec<Game>> {
        let mut games = self.repo.list_games()?;
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(games)
    }

    /// Register a new player.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a bad name, [`Error::Conflict`] if
    /// the name is taken (ignoring case), or a storage error.
    pub fn register_player(&self, request: &CreatePlayerRequest) -> Result<Player> {
        let name = request.validate()?;

        if self.repo.list_players()?.iter().any(|p| p.has_name(&name)) {
            tracing::warn!(name = %name, "duplicate player name");
            return Err(Error::Conflict(DUPLICATE_NAME.to_string()));
        }

        let player = self.repo.create_player(&name)?;
        tracing::info!(player_id = %player.id, name = %player.name, "player registered");
        Ok(player)
    }

    /// Delete a player who has not played any game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, [`Error::Conflict`] if
    /// a game references the player, or a storage error.
    pub fn remove_player(&self, id: PlayerId) -> Result<()> {
        match self.repo.delete_player(id) {
            Ok(true) => {
                tracing::info!(player_id = %id, "player deleted");
                Ok(())
            }
            Ok(false) => Err(Error::not_found("Player", id)),
            Err(e @ StoreError::PlayerHasGames(_)) => {
                tracing::warn!(player_id = %id, "player still referenced by games");
                Err(Error::Conflict(e.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Record a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the request breaks a game rule or
    /// names an unknown player, or a storage error.
    pub fn record_game(&self, request: &CreateGameRequest) -> Result<Game> {
        let participants = request.validate()?;

        let players = self.repo.list_players()?;
        // Participants come back in request order, so the index names the
        // id exactly as the client sent it.
        if let Some(missing) = participants
            .iter()
            .position(|p| !players.iter().any(|known| known.id == p.player_id))
        {
            let raw = &request.players[missing].player_id;
            tracing::warn!(player_id = %raw, "game references unknown player");
            return Err(unknown_player(raw).into());
        }

        let game = match self.repo.create_game(participants) {
            Ok(game) => game,
            // The player vanished between the check and the insert.
            Err(StoreError::UnknownPlayer(id)) => return Err(unknown_player(id).into()),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(game_id = %game.id, players = game.players.len(), "game recorded");
        Ok(game)
    }

    /// Delete a game and its participants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or a storage error.
    pub fn remove_game(&self, id: GameId) -> Result<()> {
        if self.repo.delete_game(id)? {
            tracing::info!(game_id = %id, "game deleted");
            Ok(())
        } else {
            Err(Error::not_found("Game", id))
        }
    }

    /// Leaderboard entry for every player.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn player_stats(&self) -> Result<Vec<PlayerStats>> {
        let records = self.repo.snapshot()?;
        Ok(Snapshot::from(&records).player_stats())
    }

    /// Aggregate stats for every wonder that has been played.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn wonder_stats(&self) -> Result<Vec<WonderStats>> {
        let records = self.repo.snapshot()?;
        Ok(Snapshot::from(&records).wonder_stats())
    }

    /// Every game with ranked participants, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read or a stored game
    /// references a missing player.
    pub fn game_history(&self) -> Result<Vec<GameHistory>> {
        let records = self.repo.snapshot()?;
        Ok(Snapshot::from(&records).game_history()?)
    }
}

fn unknown_player(id: impl fmt::Display) -> ValidationError {
    ValidationError::message(format!("Player with ID {id} does not exist"))
}
