//! Route handlers.

// Handlers must be async to satisfy axum, even when they never await.
#![allow(clippy::unused_async)]

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::record::{Game, Player};
use crate::stats::{GameHistory, PlayerStats, WonderStats};
use crate::validation::{CreateGameRequest, CreatePlayerRequest, parse_uuid};
use crate::wonder::{self, Wonder};

#[derive(Debug, Serialize)]
pub(super) struct Health {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

/// An id that does not parse cannot name a stored record.
fn parse_id(kind: &'static str, raw: &str) -> Result<Uuid> {
    parse_uuid(raw).ok_or_else(|| Error::not_found(kind, raw))
}

pub(super) async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: Utc::now(),
    })
}

pub(super) async fn wonders() -> Json<Vec<Wonder>> {
    Json(wonder::all().to_vec())
}

pub(super) async fn list_players(State(ledger): State<Ledger>) -> Result<Json<Vec<Player>>> {
    Ok(Json(ledger.list_players()?))
}

pub(super) async fn create_player(
    State(ledger): State<Ledger>,
    body: std::result::Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = body?;
    let player = ledger.register_player(&request)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub(super) async fn delete_player(
    State(ledger): State<Ledger>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    ledger.remove_player(parse_id("Player", &id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn list_games(State(ledger): State<Ledger>) -> Result<Json<Vec<Game>>> {
    Ok(Json(ledger.list_games()?))
}

pub(super) async fn create_game(
    State(ledger): State<Ledger>,
    body: std::result::Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = body?;
    let game = ledger.record_game(&request)?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub(super) async fn delete_game(
    State(ledger): State<Ledger>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    ledger.remove_game(parse_id("Game", &id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn game_history(State(ledger): State<Ledger>) -> Result<Json<Vec<GameHistory>>> {
    Ok(Json(ledger.game_history()?))
}

pub(super) async fn player_stats(State(ledger): State<Ledger>) -> Result<Json<Vec<PlayerStats>>> {
    Ok(Json(ledger.player_stats()?))
}

pub(super) async fn wonder_stats(State(ledger): State<Ledger>) -> Result<Json<Vec<WonderStats>>> {
    Ok(Json(ledger.wonder_stats()?))
}
