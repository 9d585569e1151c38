//! Output formatting utilities for CLI.

use wonderboard::stats::{GameHistory, PlayerStats, WonderStats};

/// Width of the name column in text tables.
const NAME_WIDTH: usize = 32;

/// Format the player leaderboard as human-readable text.
pub(super) fn format_players_text(stats: &[PlayerStats]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Player Leaderboard ({} players)\n", stats.len()));
    output.push_str("========================================\n\n");

    for player in stats {
        output.push_str(&format!(
            "  {:<width$} {:>3} games  {:>3} wins  {:>5.1}%  avg {:>5.1}\n",
            player.player_name,
            player.total_games,
            player.wins,
            player.win_rate,
            player.average_score,
            width = NAME_WIDTH
        ));
        for wonder in &player.wonder_stats {
            output.push_str(&format!(
                "      {:<width$} {:>3} games  {:>3} wins  {:>5.1}%  avg {:>5.1}\n",
                wonder.wonder_display_name,
                wonder.games_played,
                wonder.wins,
                wonder.win_rate,
                wonder.average_score,
                width = NAME_WIDTH - 4
            ));
        }
    }

    output
}

/// Format per-wonder stats as human-readable text.
pub(super) fn format_wonders_text(stats: &[WonderStats]) -> String {
    let mut output = String::new();

    output.push_str("Wonder Statistics\n");
    output.push_str("========================================\n\n");

    if stats.is_empty() {
        output.push_str("  No games recorded\n");
    }
    for wonder in stats {
        output.push_str(&format!(
            "  {:<width$} {:>3} games  {:>3} wins  {:>5.1}%  avg {:>5.1}\n",
            wonder.wonder_display_name,
            wonder.total_games,
            wonder.wins,
            wonder.win_rate,
            wonder.average_score,
            width = NAME_WIDTH
        ));
    }

    output
}

/// Format the player leaderboard as CSV.
pub(super) fn format_players_csv(stats: &[PlayerStats]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player_id,player,games,wins,win_rate,average_score\n");

    // Data rows
    for player in stats {
        output.push_str(&format!(
            "{},{},{},{},{:.4},{:.2}\n",
            player.player_id,
            csv_field(&player.player_name),
            player.total_games,
            player.wins,
            player.win_rate,
            player.average_score
        ));
    }

    output
}

/// Format per-wonder stats as CSV.
pub(super) fn format_wonders_csv(stats: &[WonderStats]) -> String {
    let mut output = String::new();

    output.push_str("wonder,display_name,games,wins,win_rate,average_score\n");

    for wonder in stats {
        output.push_str(&format!(
            "{},{},{},{},{:.4},{:.2}\n",
            wonder.wonder_name,
            csv_field(wonder.wonder_display_name),
            wonder.total_games,
            wonder.wins,
            wonder.win_rate,
            wonder.average_score
        ));
    }

    output
}

/// Format game history as human-readable text.
pub(super) fn format_history_text(history: &[GameHistory]) -> String {
    let mut output = String::new();

    if history.is_empty() {
        output.push_str("No games recorded\n");
    }
    for game in history {
        output.push_str(&format!(
            "Game {} ({})\n",
            game.id,
            game.created_at.format("%Y-%m-%d %H:%M UTC")
        ));
        for p in &game.players {
            output.push_str(&format!(
                "  {}. {} - {} ({})\n",
                p.position, p.player_name, p.score, p.wonder_display_name
            ));
        }
        output.push('\n');
    }

    output
}

/// Quote a CSV field if it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wonderboard::WonderName;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Ann"), "Ann");
        assert_eq!(csv_field("Ann, Jr."), "\"Ann, Jr.\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_wonders_csv() {
        let stats = [WonderStats {
            wonder_name: WonderName::Gizah,
            wonder_display_name: WonderName::Gizah.display_name(),
            total_games: 4,
            wins: 1,
            win_rate: 25.0,
            average_score: 51.25,
        }];

        let csv = format_wonders_csv(&stats);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("wonder,display_name,games,wins,win_rate,average_score")
        );
        assert_eq!(
            lines.next(),
            Some("gizah,The Great Pyramid of Giza,4,1,25.0000,51.25")
        );
    }

    #[test]
    fn test_empty_history_text() {
        assert_eq!(format_history_text(&[]), "No games recorded\n");
    }
}
