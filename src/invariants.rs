//! Ledger invariants: sanity checks over a full record set.
//!
//! Records written through the [`Ledger`](crate::ledger::Ledger) always
//! satisfy these. A violation means the data file was edited by hand or
//! written by something else.

use std::collections::HashSet;
use std::fmt;

use crate::record::Records;
use crate::validation::{DISTINCT_PLAYERS, DISTINCT_WONDERS, MAX_PLAYERS, MAX_SCORE, MIN_PLAYERS};

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check every ledger invariant.
///
/// Returns every violation found, or an empty list if all invariants hold.
#[must_use]
pub fn check(records: &Records) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    // Player identity
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for player in &records.players {
        if !ids.insert(player.id) {
            violations.push(InvariantViolation::new(format!(
                "Player id {} is used more than once",
                player.id
            )));
        }
        if !names.insert(player.name.to_lowercase()) {
            violations.push(InvariantViolation::new(format!(
                "Player name {:?} is used more than once",
                player.name
            )));
        }
    }

    let mut game_ids = HashSet::new();
    for game in &records.games {
        if !game_ids.insert(game.id) {
            violations.push(InvariantViolation::new(format!(
                "Game id {} is used more than once",
                game.id
            )));
        }

        let count = game.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            violations.push(InvariantViolation::new(format!(
                "Game {} has {count} players, expected {MIN_PLAYERS} to {MAX_PLAYERS}",
                game.id
            )));
        }

        let mut wonders = HashSet::new();
        let mut seated = HashSet::new();
        for p in &game.players {
            if !ids.contains(&p.player_id) {
                violations.push(InvariantViolation::new(format!(
                    "Game {} references unknown player {}",
                    game.id, p.player_id
                )));
            }
            if p.score > MAX_SCORE {
                violations.push(InvariantViolation::new(format!(
                    "Game {} has score {} > {MAX_SCORE}",
                    game.id, p.score
                )));
            }
            wonders.insert(p.wonder_name);
            seated.insert(p.player_id);
        }

        if wonders.len() != count {
            violations.push(InvariantViolation::new(format!(
                "Game {}: {DISTINCT_WONDERS}",
                game.id
            )));
        }
        if seated.len() != count {
            violations.push(InvariantViolation::new(format!(
                "Game {}: {DISTINCT_PLAYERS}",
                game.id
            )));
        }
    }

    violations
}
