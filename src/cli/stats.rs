//! Stats command implementation.

use super::output::{
    format_players_csv, format_players_text, format_wonders_csv, format_wonders_text,
};
use super::{CliError, StatsFormat, StatsView, open_ledger};
use wonderboard::Config;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub(crate) fn execute(
    config: &Config,
    view: StatsView,
    format: StatsFormat,
) -> Result<(), CliError> {
    let ledger = open_ledger(config)?;

    let output = match view {
        StatsView::Players => {
            let stats = ledger.player_stats()?;
            match format {
                StatsFormat::Text => format_players_text(&stats),
                StatsFormat::Json => serde_json::to_string_pretty(&stats)?,
                StatsFormat::Csv => format_players_csv(&stats),
            }
        }
        StatsView::Wonders => {
            let stats = ledger.wonder_stats()?;
            match format {
                StatsFormat::Text => format_wonders_text(&stats),
                StatsFormat::Json => serde_json::to_string_pretty(&stats)?,
                StatsFormat::Csv => format_wonders_csv(&stats),
            }
        }
    };

    print!("{output}");
    if format == StatsFormat::Json {
        println!();
    }
    Ok(())
}
