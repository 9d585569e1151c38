//! Statistics engine.
//!
//! Pure transforms from a snapshot of players and games to the leaderboard
//! views: per-player stats, per-wonder stats and ranked game history. No
//! I/O, no mutation; the same snapshot always produces the same output.
//!
//! # Ranking
//!
//! Within a game, participants are ranked by score, highest first, using a
//! stable sort. Equal scores keep the order in which the participants were
//! recorded, so on a tie for the top score the first such participant is the
//! sole winner and later ones get the following positions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::record::{Game, GameId, GameParticipant, Player, PlayerId, Records};
use crate::wonder::{WONDER_COUNT, WonderName};

/// Participants of `game` in ranking order: score descending, ties in
/// recorded order.
#[must_use]
pub fn rank(game: &Game) -> Vec<&GameParticipant> {
    let mut ranked: Vec<&GameParticipant> = game.players.iter().collect();
    // `sort_by` is stable: equal scores keep their recorded order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// The winner of `game`: the first participant with the highest score.
///
/// Returns `None` only for a game without participants.
#[must_use]
pub fn winner(game: &Game) -> Option<&GameParticipant> {
    rank(game).first().copied()
}

/// Running totals for one group of game results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Games counted.
    pub games: u32,
    /// Games won.
    pub wins: u32,
    /// Sum of scores across counted games.
    pub total_score: u32,
}

impl Tally {
    /// Count one game result.
    pub fn record(&mut self, score: u8, won: bool) {
        self.games += 1;
        self.total_score += u32::from(score);
        if won {
            self.wins += 1;
        }
    }

    /// Win percentage (0-100). Zero when no games were counted.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.games) * 100.0
    }

    /// Mean score. Zero when no games were counted.
    #[must_use]
    pub fn average_score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        f64::from(self.total_score) / f64::from(self.games)
    }
}

/// A player's results with one wonder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWonderStats {
    /// The wonder.
    pub wonder_name: WonderName,
    /// Its display name.
    pub wonder_display_name: &'static str,
    /// Games the player played with it.
    pub games_played: u32,
    /// Of those, games won.
    pub wins: u32,
    /// Win percentage (0-100).
    pub win_rate: f64,
    /// Mean score with this wonder.
    pub average_score: f64,
}

/// Leaderboard entry for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// The player.
    pub player_id: PlayerId,
    /// Their current name.
    pub player_name: String,
    /// Games played.
    pub total_games: u32,
    /// Games won.
    pub wins: u32,
    /// Win percentage (0-100), zero with no games.
    pub win_rate: f64,
    /// Mean score, zero with no games.
    pub average_score: f64,
    /// Breakdown by wonder, catalog order, only wonders actually played.
    pub wonder_stats: Vec<PlayerWonderStats>,
}

/// Aggregate results for one wonder across all players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WonderStats {
    /// The wonder.
    pub wonder_name: WonderName,
    /// Its display name.
    pub wonder_display_name: &'static str,
    /// Games in which someone played it.
    pub total_games: u32,
    /// Of those, games its player won.
    pub wins: u32,
    /// Win percentage (0-100).
    pub win_rate: f64,
    /// Mean score of whoever played it.
    pub average_score: f64,
}

/// A participant in a history entry, with names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedParticipant {
    /// The player.
    pub player_id: PlayerId,
    /// The player's current name.
    pub player_name: String,
    /// The wonder played.
    pub wonder_name: WonderName,
    /// Its display name.
    pub wonder_display_name: &'static str,
    /// Final score.
    pub score: u8,
    /// 1-based finishing position; ties get consecutive positions.
    pub position: usize,
}

/// One game as shown in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistory {
    /// The game.
    pub id: GameId,
    /// When it was recorded.
    pub created_at: DateTime<Utc>,
    /// Participants in finishing order.
    pub players: Vec<RankedParticipant>,
}

/// The snapshot does not satisfy the record invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A game references a player that is not in the snapshot.
    #[error("game {game} references unknown player {player}")]
    UnknownPlayer {
        /// The game holding the dangling reference.
        game: GameId,
        /// The missing player.
        player: PlayerId,
    },
}

/// Per-player accumulators, filled in one pass over the games.
#[derive(Debug, Default)]
struct PlayerTotals {
    overall: Tally,
    by_wonder: [Tally; WONDER_COUNT],
}

/// A consistent view of every player and game, ready for aggregation.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    players: &'a [Player],
    games: &'a [Game],
}

impl<'a> Snapshot<'a> {
    /// Wrap players and games read from the same repository state.
    #[must_use]
    pub fn new(players: &'a [Player], games: &'a [Game]) -> Self {
        Self { players, games }
    }

    /// Iterate over every game result as `(participant, won)`.
    fn results(self) -> impl Iterator<Item = (&'a GameParticipant, bool)> + 'a {
        self.games.iter().flat_map(|game| {
            let winner = winner(game);
            game.players
                .iter()
                .map(move |p| (p, winner.is_some_and(|w| std::ptr::eq(w, p))))
        })
    }

    /// Leaderboard entry for every player, in snapshot order.
    ///
    /// Players without games are included with zeroed stats and an empty
    /// wonder breakdown.
    #[must_use]
    pub fn player_stats(&self) -> Vec<PlayerStats> {
        let mut totals: HashMap<PlayerId, PlayerTotals> = HashMap::new();
        for (participant, won) in self.results() {
            let entry = totals.entry(participant.player_id).or_default();
            entry.overall.record(participant.score, won);
            entry.by_wonder[participant.wonder_name.index()].record(participant.score, won);
        }

        self.players
            .iter()
            .map(|player| {
                let totals = totals.remove(&player.id).unwrap_or_default();
                let wonder_stats = WonderName::ALL
                    .iter()
                    .zip(totals.by_wonder.iter())
                    .filter(|(_, tally)| tally.games > 0)
                    .map(|(&wonder, tally)| PlayerWonderStats {
                        wonder_name: wonder,
                        wonder_display_name: wonder.display_name(),
                        games_played: tally.games,
                        wins: tally.wins,
                        win_rate: tally.win_rate(),
                        average_score: tally.average_score(),
                    })
                    .collect();

                PlayerStats {
                    player_id: player.id,
                    player_name: player.name.clone(),
                    total_games: totals.overall.games,
                    wins: totals.overall.wins,
                    win_rate: totals.overall.win_rate(),
                    average_score: totals.overall.average_score(),
                    wonder_stats,
                }
            })
            .collect()
    }

    /// Aggregate stats for every wonder that was played at least once, in
    /// catalog order.
    #[must_use]
    pub fn wonder_stats(&self) -> Vec<WonderStats> {
        let mut by_wonder = [Tally::default(); WONDER_COUNT];
        for (participant, won) in self.results() {
            by_wonder[participant.wonder_name.index()].record(participant.score, won);
        }

        WonderName::ALL
            .iter()
            .zip(by_wonder.iter())
            .filter(|(_, tally)| tally.games > 0)
            .map(|(&wonder, tally)| WonderStats {
                wonder_name: wonder,
                wonder_display_name: wonder.display_name(),
                total_games: tally.games,
                wins: tally.wins,
                win_rate: tally.win_rate(),
                average_score: tally.average_score(),
            })
            .collect()
    }

    /// Every game with participants ranked, newest game first.
    ///
    /// Names are resolved against the snapshot, so a renamed player shows
    /// the new name in old games. Games recorded at the same instant keep
    /// their snapshot order.
    ///
    /// # Errors
    ///
    /// Returns an error if a game references a player missing from the
    /// snapshot.
    pub fn game_history(&self) -> Result<Vec<GameHistory>, StatsError> {
        let names: HashMap<PlayerId, &str> = self
            .players
            .iter()
            .map(|p| (p.id, p.name.as_str()))
            .collect();

        let mut history = self
            .games
            .iter()
            .map(|game| {
                let players = rank(game)
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let name = names.get(&p.player_id).ok_or(StatsError::UnknownPlayer {
                            game: game.id,
                            player: p.player_id,
                        })?;
                        Ok(RankedParticipant {
                            player_id: p.player_id,
                            player_name: (*name).to_string(),
                            wonder_name: p.wonder_name,
                            wonder_display_name: p.wonder_name.display_name(),
                            score: p.score,
                            position: i + 1,
                        })
                    })
                    .collect::<Result<Vec<_>, StatsError>>()?;

                Ok(GameHistory {
                    id: game.id,
                    created_at: game.created_at,
                    players,
                })
            })
            .collect::<Result<Vec<_>, StatsError>>()?;

        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(history)
    }
}

impl<'a> From<&'a Records> for Snapshot<'a> {
    fn from(records: &'a Records) -> Self {
        Self::new(&records.players, &records.games)
    }
}
