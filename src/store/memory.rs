//! In-memory relational backend.
//!
//! Games and participants live in separate tables joined on read, the way a
//! SQL schema would hold them. A single lock guards all three tables, so a
//! game insert (game row plus participant rows) is atomic to readers.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::{Repository, StoreError, StoreResult};
use crate::record::{Game, GameId, GameParticipant, Player, PlayerId, Records};
use crate::wonder::WonderName;

#[derive(Debug, Clone, Copy)]
struct GameRow {
    id: GameId,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct ParticipantRow {
    game_id: GameId,
    player_id: PlayerId,
    wonder_name: WonderName,
    score: u8,
}

#[derive(Debug, Default)]
struct Tables {
    players: Vec<Player>,
    games: Vec<GameRow>,
    participants: Vec<ParticipantRow>,
}

impl Tables {
    fn player_exists(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    /// Join every game row with its participant rows, in insertion order.
    fn joined_games(&self) -> Vec<Game> {
        let mut seats: HashMap<GameId, Vec<GameParticipant>> =
            HashMap::with_capacity(self.games.len());
        for p in &self.participants {
            seats
                .entry(p.game_id)
                .or_default()
                .push(GameParticipant::new(p.player_id, p.wonder_name, p.score));
        }

        self.games
            .iter()
            .map(|row| Game {
                id: row.id,
                created_at: row.created_at,
                players: seats.remove(&row.id).unwrap_or_default(),
            })
            .collect()
    }

    /// Insert participant rows one at a time, enforcing the player foreign
    /// key on each.
    fn insert_participants(
        &mut self,
        game_id: GameId,
        players: &[GameParticipant],
    ) -> StoreResult<()> {
        for p in players {
            if !self.player_exists(p.player_id) {
                return Err(StoreError::UnknownPlayer(p.player_id));
            }
            self.participants.push(ParticipantRow {
                game_id,
                player_id: p.player_id,
                wonder_name: p.wonder_name,
                score: p.score,
            });
        }
        Ok(())
    }

    fn remove_game(&mut self, id: GameId) -> bool {
        let before = self.games.len();
        self.games.retain(|g| g.id != id);
        self.participants.retain(|p| p.game_id != id);
        self.games.len() != before
    }
}

/// Repository that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryStore {
    fn list_players(&self) -> StoreResult<Vec<Player>> {
        Ok(self.tables.read().players.clone())
    }

    fn create_player(&self, name: &str) -> StoreResult<Player> {
        let player = Player::new(name);
        self.tables.write().players.push(player.clone());
        Ok(player)
    }

    fn delete_player(&self, id: PlayerId) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        if tables.participants.iter().any(|p| p.player_id == id) {
            return Err(StoreError::PlayerHasGames(id));
        }
        let before = tables.players.len();
        tables.players.retain(|p| p.id != id);
        Ok(tables.players.len() != before)
    }

    fn list_games(&self) -> StoreResult<Vec<Game>> {
        Ok(self.tables.read().joined_games())
    }

    fn snapshot(&self) -> StoreResult<Records> {
        let tables = self.tables.read();
        Ok(Records {
            players: tables.players.clone(),
            games: tables.joined_games(),
        })
    }

    fn create_game(&self, players: Vec<GameParticipant>) -> StoreResult<Game> {
        let row = GameRow {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let mut tables = self.tables.write();
        tables.games.push(row);
        if let Err(e) = tables.insert_participants(row.id, &players) {
            // Roll back the partial insert before anyone can observe it.
            tables.remove_game(row.id);
            tracing::warn!(game_id = %row.id, error = %e, "game insert rolled back");
            return Err(e);
        }

        Ok(Game {
            id: row.id,
            created_at: row.created_at,
            players,
        })
    }

    fn delete_game(&self, id: GameId) -> StoreResult<bool> {
        Ok(self.tables.write().remove_game(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Snapshot;

    fn seed(store: &MemoryStore) -> Vec<Player> {
        ["Ann", "Bob", "Cy"]
            .into_iter()
            .map(|name| store.create_player(name).unwrap())
            .collect()
    }

    fn seats(players: &[Player]) -> Vec<GameParticipant> {
        players
            .iter()
            .zip(WonderName::ALL)
            .enumerate()
            .map(|(i, (p, w))| {
                GameParticipant::new(p.id, w, u8::try_from(i * 10).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_players_in_registration_order() {
        let store = MemoryStore::new();
        let players = seed(&store);
        let names: Vec<String> = store
            .list_players()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Ann", "Bob", "Cy"]);
        assert_eq!(players.len(), 3);
    }

    #[test]
    fn test_game_round_trips_through_tables() {
        let store = MemoryStore::new();
        let players = seed(&store);
        let game = store.create_game(seats(&players)).unwrap();

        let games = store.list_games().unwrap();
        assert_eq!(games, vec![game]);
        assert_eq!(games[0].players[2].wonder_name, WonderName::Colossus);
    }

    #[test]
    fn test_unknown_player_rolls_back() {
        let store = MemoryStore::new();
        let players = seed(&store);
        let mut seats = seats(&players);
        // Fail on the last participant, after two rows went in.
        seats[2].player_id = Uuid::new_v4();

        let err = store.create_game(seats.clone()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnknownPlayer(id) if id == seats[2].player_id
        ));
        assert!(store.list_games().unwrap().is_empty());
        assert!(store.tables.read().participants.is_empty());
    }

    #[test]
    fn test_delete_player_with_games_refused() {
        let store = MemoryStore::new();
        let players = seed(&store);
        let game = store.create_game(seats(&players)).unwrap();

        assert!(matches!(
            store.delete_player(players[0].id),
            Err(StoreError::PlayerHasGames(_))
        ));

        assert!(store.delete_game(game.id).unwrap());
        assert!(store.tables.read().participants.is_empty());
        assert!(store.delete_player(players[0].id).unwrap());
        assert!(!store.delete_player(players[0].id).unwrap());
    }

    #[test]
    fn test_delete_missing_game() {
        let store = MemoryStore::new();
        assert!(!store.delete_game(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn test_snapshot_consistent_under_concurrent_writes() {
        let store = MemoryStore::new();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..200 {
                    let players = seed(&store);
                    store.create_game(seats(&players)).unwrap();
                }
            });

            for _ in 0..500 {
                let records = store.snapshot().unwrap();
                for game in &records.games {
                    for seat in &game.players {
                        assert!(
                            records.players.iter().any(|p| p.id == seat.player_id),
                            "snapshot game {} references a player it does not hold",
                            game.id
                        );
                    }
                }
                assert!(Snapshot::from(&records).game_history().is_ok());
            }
        });
    }

    #[test]
    fn test_joined_games_keep_seat_order_per_game() {
        let store = MemoryStore::new();
        let first = seed(&store);
        let second = seed(&store);
        let a = store.create_game(seats(&first)).unwrap();
        let b = store.create_game(seats(&second)).unwrap();

        let games = store.list_games().unwrap();
        assert_eq!(games, vec![a, b]);
        assert_eq!(games[1].players[0].player_id, second[0].id);
    }
}
