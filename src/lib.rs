// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Wonderboard: score keeping and leaderboards for a 7 Wonders game group.
//!
//! The crate records who played which wonder in each game and what they
//! scored, and derives leaderboards from those records:
//! - Per-player win rate and average score, broken down by wonder
//! - Per-wonder win rate and average score
//! - Ranked game history
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   HTTP API (axum)  │   CLI (clap)   │
//! ├─────────────────────────────────────┤
//! │   Ledger: validation, rules         │
//! ├──────────────────┬──────────────────┤
//! │ Statistics (pure)│ Repository trait │
//! │                  ├────────┬─────────┤
//! │                  │ memory │  JSON   │
//! └──────────────────┴────────┴─────────┘
//! ```
//!
//! The statistics engine never touches storage: it works on a [`Snapshot`]
//! of records read from a [`Repository`].

pub mod config;
pub mod error;
pub mod invariants;
pub mod ledger;
pub mod record;
pub mod server;
pub mod stats;
pub mod store;
pub mod telemetry;
pub mod validation;
pub mod wonder;

pub use config::{Backend, Config};
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use record::{Game, GameId, GameParticipant, Player, PlayerId, Records};
pub use stats::{GameHistory, PlayerStats, Snapshot, WonderStats};
pub use store::{JsonFileStore, MemoryStore, Repository, StoreError};
pub use validation::{CreateGameRequest, CreatePlayerRequest, ParticipantRequest, ValidationError};
pub use wonder::{Wonder, WonderName};
