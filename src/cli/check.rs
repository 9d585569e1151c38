//! Check command implementation.

use super::{CliError, open_ledger};
use wonderboard::{Config, invariants};

/// Execute the check command.
///
/// # Errors
///
/// Returns an error if the store cannot be read or any invariant is
/// violated.
pub(crate) fn execute(config: &Config) -> Result<(), CliError> {
    let ledger = open_ledger(config)?;
    let records = ledger.repository().snapshot()?;

    println!(
        "Checking {} ({} players, {} games)",
        config.store.path.display(),
        records.players.len(),
        records.games.len()
    );

    let violations = invariants::check(&records);
    if violations.is_empty() {
        println!("  ✓ All invariants hold");
        return Ok(());
    }

    for violation in &violations {
        println!("  ✗ {violation}");
    }
    Err(CliError::new(format!(
        "{} invariant violation(s) found",
        violations.len()
    )))
}
