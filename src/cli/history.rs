//! History command implementation.

use super::output::format_history_text;
use super::{CliError, HistoryFormat, open_ledger};
use wonderboard::Config;

/// Execute the history command.
///
/// # Errors
///
/// Returns an error if the store cannot be read or holds a game with an
/// unknown player.
pub(crate) fn execute(config: &Config, format: HistoryFormat) -> Result<(), CliError> {
    let history = open_ledger(config)?.game_history()?;

    match format {
        HistoryFormat::Text => print!("{}", format_history_text(&history)),
        HistoryFormat::Json => println!("{}", serde_json::to_string_pretty(&history)?),
    }
    Ok(())
}
