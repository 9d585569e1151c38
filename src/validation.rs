//! Request validation.
//!
//! Request bodies arrive loosely typed (ids and wonder names as strings,
//! scores as arbitrary JSON numbers). Each request type is checked against a
//! declarative set of constraints and turned into typed records. Every
//! violation is reported, not just the first one, and nothing here touches
//! storage.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::record::GameParticipant;
use crate::wonder::WonderName;

/// Longest allowed player name, in characters, after trimming.
pub const MAX_NAME_CHARS: usize = 50;

/// Fewest participants in a game.
pub const MIN_PLAYERS: usize = 3;

/// Most participants in a game (one per wonder).
pub const MAX_PLAYERS: usize = 7;

/// Highest allowed score.
pub const MAX_SCORE: u8 = 200;

/// Message reported when two participants share a wonder.
pub const DISTINCT_WONDERS: &str = "Each player must play a different wonder";

/// Message reported when a player appears twice in one game.
pub const DISTINCT_PLAYERS: &str = "Each player can only play once per game";

/// Length of the hyphenated UUID form, the only form ids are written in.
const UUID_LEN: usize = 36;

/// Parse a record id in its hyphenated form (`8-4-4-4-12` hex digits).
///
/// The simple, braced and `urn:uuid:` forms are rejected, so an id that
/// parses is always echoed back exactly as the client wrote it.
#[must_use]
pub fn parse_uuid(raw: &str) -> Option<Uuid> {
    if raw.len() != UUID_LEN {
        return None;
    }
    Uuid::parse_str(raw).ok()
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending field (`players[2].score`), empty for
    /// constraints over the whole request.
    pub field: String,
    /// What is wrong.
    pub message: String,
}

impl Violation {
    fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn whole(message: impl Into<String>) -> Self {
        Self::at(String::new(), message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// A request that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// A single violation not tied to any field.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::whole(message)],
        }
    }

    /// Every violation found, in check order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn from_violations(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Body of `POST /players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    /// Requested display name; surrounding whitespace is ignored.
    pub name: String,
}

impl CreatePlayerRequest {
    /// Build a request for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check the request and return the trimmed name.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or longer than
    /// [`MAX_NAME_CHARS`] characters.
    pub fn validate(&self) -> Result<String, ValidationError> {
        let name = self.name.trim();
        let chars = name.chars().count();

        let mut violations = Vec::new();
        if chars == 0 {
            violations.push(Violation::at("name", "Name must not be empty"));
        } else if chars > MAX_NAME_CHARS {
            violations.push(Violation::at(
                "name",
                format!("Name must be at most {MAX_NAME_CHARS} characters"),
            ));
        }
        ValidationError::from_violations(violations)?;

        Ok(name.to_string())
    }
}

/// One participant in a `POST /games` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRequest {
    /// Player id, expected to be a UUID.
    pub player_id: String,
    /// Wonder id, expected to name a catalog wonder.
    pub wonder_name: String,
    /// Final score, expected to be an integer in `0..=200`.
    pub score: Number,
}

impl ParticipantRequest {
    /// Build a participant entry from already well-typed parts.
    #[must_use]
    pub fn new(player_id: Uuid, wonder_name: WonderName, score: u8) -> Self {
        Self {
            player_id: player_id.to_string(),
            wonder_name: wonder_name.as_str().to_string(),
            score: Number::from(score),
        }
    }

    fn parse(&self, index: usize, violations: &mut Vec<Violation>) -> Option<GameParticipant> {
        let field = |name: &str| format!("players[{index}].{name}");

        let player_id = parse_uuid(&self.player_id);
        if player_id.is_none() {
            violations.push(Violation::at(
                field("playerId"),
                format!("Invalid player id: {}", self.player_id),
            ));
        }

        let wonder_name = self
            .wonder_name
            .parse::<WonderName>()
            .map_err(|_| {
                violations.push(Violation::at(
                    field("wonderName"),
                    format!("Unknown wonder: {}", self.wonder_name),
                ));
            })
            .ok();

        let score = match integer(&self.score) {
            None => {
                violations.push(Violation::at(field("score"), "Score must be an integer"));
                None
            }
            Some(value) => match u8::try_from(value) {
                Ok(score) if score <= MAX_SCORE => Some(score),
                _ => {
                    violations.push(Violation::at(
                        field("score"),
                        format!("Score must be between 0 and {MAX_SCORE}"),
                    ));
                    None
                }
            },
        };

        Some(GameParticipant::new(player_id?, wonder_name?, score?))
    }
}

/// Integer value of a JSON number; `50.0` counts as an integer, `50.5` does not.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integer(number: &Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    if number.is_u64() {
        // Larger than i64::MAX: an integer, but certainly out of range.
        return Some(i64::MAX);
    }
    let value = number.as_f64()?;
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return Some(value as i64);
    }
    None
}

/// A constraint over a whole participant list.
struct Constraint {
    /// Reported when the constraint does not hold.
    message: &'static str,
    /// The check itself.
    holds: fn(&[GameParticipant]) -> bool,
}

/// Constraints every game must satisfy once its fields parse.
const GAME_CONSTRAINTS: [Constraint; 2] = [
    Constraint {
        message: DISTINCT_WONDERS,
        holds: wonders_distinct,
    },
    Constraint {
        message: DISTINCT_PLAYERS,
        holds: players_distinct,
    },
];

fn wonders_distinct(players: &[GameParticipant]) -> bool {
    let mut seen = HashSet::with_capacity(players.len());
    players.iter().all(|p| seen.insert(p.wonder_name))
}

fn players_distinct(players: &[GameParticipant]) -> bool {
    let mut seen = HashSet::with_capacity(players.len());
    players.iter().all(|p| seen.insert(p.player_id))
}

/// Body of `POST /games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Participants in seating order.
    pub players: Vec<ParticipantRequest>,
}

impl CreateGameRequest {
    /// Build a request from participant entries.
    #[must_use]
    pub fn new(players: Vec<ParticipantRequest>) -> Self {
        Self { players }
    }

    /// Check the request and return the typed participants, in request order.
    ///
    /// Player existence is not checked here; that needs the repository.
    ///
    /// # Errors
    ///
    /// Returns every violation found: participant count outside
    /// `3..=7`, malformed ids, unknown wonders, scores outside `0..=200`,
    /// repeated wonders or repeated players.
    pub fn validate(&self) -> Result<Vec<GameParticipant>, ValidationError> {
        let mut violations = Vec::new();

        let count = self.players.len();
        if count < MIN_PLAYERS {
            violations.push(Violation::at(
                "players",
                format!("A game needs at least {MIN_PLAYERS} players"),
            ));
        } else if count > MAX_PLAYERS {
            violations.push(Violation::at(
                "players",
                format!("A game allows at most {MAX_PLAYERS} players"),
            ));
        }

        let parsed: Vec<Option<GameParticipant>> = self
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| p.parse(i, &mut violations))
            .collect();

        // Whole-list constraints only make sense once every entry is typed.
        if let Some(participants) = parsed.into_iter().collect::<Option<Vec<_>>>() {
            violations.extend(
                GAME_CONSTRAINTS
                    .iter()
                    .filter(|c| !(c.holds)(&participants))
                    .map(|c| Violation::whole(c.message)),
            );
            ValidationError::from_violations(violations)?;
            return Ok(participants);
        }

        Err(ValidationError { violations })
    }
}
