//! Repository contract tests, run against both backends.
//!
//! Run with: cargo test --test store_backends

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fs;

use tempfile::TempDir;
use wonderboard::config::{Backend, StoreConfig};
use wonderboard::store::{self, JsonFileStore, MemoryStore, Repository, StoreError};
use wonderboard::{GameParticipant, Player, WonderName};

fn three_players(repo: &dyn Repository) -> Vec<Player> {
    ["Ann", "Bob", "Cy"]
        .into_iter()
        .map(|name| repo.create_player(name).unwrap())
        .collect()
}

fn seats(players: &[Player], scores: [u8; 3]) -> Vec<GameParticipant> {
    players
        .iter()
        .zip(WonderName::ALL)
        .zip(scores)
        .map(|((p, w), s)| GameParticipant::new(p.id, w, s))
        .collect()
}

/// Behavior every backend must share.
fn exercise(repo: &dyn Repository) {
    let players = three_players(repo);
    let first = repo.create_game(seats(&players, [10, 20, 30])).unwrap();
    let second = repo.create_game(seats(&players, [40, 50, 60])).unwrap();

    // Recording order, participants intact.
    let games = repo.list_games().unwrap();
    assert_eq!(games, vec![first.clone(), second.clone()]);
    assert_eq!(games[1].players[2].score, 60);

    // Foreign key: nothing stored on failure.
    let mut bad = seats(&players, [1, 2, 3]);
    bad[1].player_id = uuid::Uuid::new_v4();
    assert!(matches!(
        repo.create_game(bad),
        Err(StoreError::UnknownPlayer(_))
    ));
    assert_eq!(repo.list_games().unwrap().len(), 2);

    // Referenced players cannot be deleted.
    assert!(matches!(
        repo.delete_player(players[0].id),
        Err(StoreError::PlayerHasGames(_))
    ));
    assert_eq!(repo.list_players().unwrap().len(), 3);

    assert!(repo.delete_game(first.id).unwrap());
    assert!(!repo.delete_game(first.id).unwrap());
    assert!(repo.delete_game(second.id).unwrap());
    assert!(repo.delete_player(players[0].id).unwrap());
    assert_eq!(repo.list_players().unwrap().len(), 2);
}

#[test]
fn test_memory_backend_contract() {
    exercise(&MemoryStore::new());
}

#[test]
fn test_file_backend_contract() {
    let dir = TempDir::new().unwrap();
    exercise(&JsonFileStore::open(dir.path().join("data.json")).unwrap());
}

#[test]
fn test_file_backend_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    let (players, game) = {
        let repo = JsonFileStore::open(&path).unwrap();
        let players = three_players(&repo);
        let game = repo.create_game(seats(&players, [70, 80, 90])).unwrap();
        (players, game)
    };

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.list_players().unwrap(), players);
    assert_eq!(reopened.list_games().unwrap(), vec![game]);
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
    assert!(err.to_string().contains("corrupt data file"));

    // The file is left as found.
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_open_selects_backend() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        backend: Backend::File,
        path: dir.path().join("data.json"),
    };

    let repo = store::open(&config).unwrap();
    repo.create_player("Ann").unwrap();
    assert!(config.path.exists());
}
