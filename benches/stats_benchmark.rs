//! Benchmarks for the statistics engine.
//!
//! Every stats request recomputes from a full snapshot, so these measure the
//! per-request cost at realistic and generous group sizes.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use wonderboard::stats::Snapshot;
use wonderboard::{Game, GameParticipant, Player, WonderName};

/// A group of `players` people who played `games` games, seats rotating.
fn group(players: usize, games: usize) -> (Vec<Player>, Vec<Game>) {
    let players: Vec<Player> = (0..players).map(|i| Player::new(format!("P{i}"))).collect();
    let games = (0..games)
        .map(|g| {
            let seats = 3 + g % 5;
            Game::new(
                (0..seats)
                    .map(|s| {
                        let player = &players[(g + s) % players.len()];
                        let wonder = WonderName::ALL[(g + s * 3) % WonderName::ALL.len()];
                        let score = u8::try_from((g * 37 + s * 11) % 201).unwrap_or(0);
                        GameParticipant::new(player.id, wonder, score)
                    })
                    .collect(),
            )
        })
        .collect();
    (players, games)
}

fn bench_player_stats(c: &mut Criterion) {
    let mut group_bench = c.benchmark_group("player_stats");
    for games in [100, 1_000, 10_000] {
        let (players, games_list) = group(12, games);
        group_bench.bench_with_input(BenchmarkId::from_parameter(games), &games_list, |b, g| {
            b.iter(|| {
                let snapshot = Snapshot::new(black_box(&players), black_box(g));
                black_box(snapshot.player_stats())
            });
        });
    }
    group_bench.finish();
}

fn bench_wonder_stats(c: &mut Criterion) {
    let (players, games) = group(12, 1_000);
    c.bench_function("wonder_stats_1000", |b| {
        b.iter(|| {
            let snapshot = Snapshot::new(black_box(&players), black_box(&games));
            black_box(snapshot.wonder_stats())
        });
    });
}

fn bench_game_history(c: &mut Criterion) {
    let (players, games) = group(12, 1_000);
    c.bench_function("game_history_1000", |b| {
        b.iter(|| {
            let snapshot = Snapshot::new(black_box(&players), black_box(&games));
            black_box(snapshot.game_history())
        });
    });
}

criterion_group!(
    benches,
    bench_player_stats,
    bench_wonder_stats,
    bench_game_history
);
criterion_main!(benches);
