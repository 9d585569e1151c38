//! The fixed catalog of wonders a player can build during a game.
//!
//! The catalog never changes at runtime. Its declaration order is the
//! default display order for every view that lists wonders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of wonders in the catalog.
pub const WONDER_COUNT: usize = 7;

/// Symbolic identifier of a wonder.
///
/// Serializes to the lowercase id used on the wire (`"alexandria"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WonderName {
    /// The Lighthouse of Alexandria.
    Alexandria,
    /// The Hanging Gardens of Babylon.
    Babylon,
    /// The Colossus of Rhodes.
    Colossus,
    /// The Temple of Artemis at Ephesus.
    Ephesos,
    /// The Great Pyramid of Giza.
    Gizah,
    /// The Mausoleum of Halicarnassus.
    Halicarnassus,
    /// The Statue of Zeus at Olympia.
    Olympia,
}

impl WonderName {
    /// Every wonder, in declaration order.
    pub const ALL: [Self; WONDER_COUNT] = [
        Self::Alexandria,
        Self::Babylon,
        Self::Colossus,
        Self::Ephesos,
        Self::Gizah,
        Self::Halicarnassus,
        Self::Olympia,
    ];

    /// The symbolic id, as used in requests and stored records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alexandria => "alexandria",
            Self::Babylon => "babylon",
            Self::Colossus => "colossus",
            Self::Ephesos => "ephesos",
            Self::Gizah => "gizah",
            Self::Halicarnassus => "halicarnassus",
            Self::Olympia => "olympia",
        }
    }

    /// Human-readable name shown in listings.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Alexandria => "The Lighthouse of Alexandria",
            Self::Babylon => "The Hanging Gardens of Babylon",
            Self::Colossus => "The Colossus of Rhodes",
            Self::Ephesos => "The Temple of Artemis at Ephesus",
            Self::Gizah => "The Great Pyramid of Giza",
            Self::Halicarnassus => "The Mausoleum of Halicarnassus",
            Self::Olympia => "The Statue of Zeus at Olympia",
        }
    }

    /// Position in the catalog (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The catalog entry for this name.
    #[must_use]
    pub const fn wonder(self) -> Wonder {
        Wonder {
            name: self,
            display_name: self.display_name(),
        }
    }
}

impl fmt::Display for WonderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no wonder in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wonder: {0}")]
pub struct UnknownWonder(pub String);

impl FromStr for WonderName {
    type Err = UnknownWonder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownWonder(s.to_string()))
    }
}

/// A catalog entry: symbolic id plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wonder {
    /// Symbolic id.
    pub name: WonderName,
    /// Display name.
    pub display_name: &'static str,
}

/// All wonders in declaration order.
#[must_use]
pub fn all() -> [Wonder; WONDER_COUNT] {
    WonderName::ALL.map(WonderName::wonder)
}

/// Look a wonder up by its symbolic id. Matching is exact (case-sensitive).
#[must_use]
pub fn by_name(name: &str) -> Option<Wonder> {
    name.parse::<WonderName>().ok().map(WonderName::wonder)
}

/// Whether `name` is the symbolic id of a catalog wonder.
#[must_use]
pub fn is_valid(name: &str) -> bool {
    by_name(name).is_some()
}
