//! Serve command implementation.

use std::net::SocketAddr;
use std::path::PathBuf;

use super::CliError;
use wonderboard::config::{Backend, Config};
use wonderboard::{Ledger, server, telemetry};

/// Execute the serve command.
///
/// Flags override the loaded configuration.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the server fails.
pub(crate) fn execute(
    mut config: Config,
    bind: Option<SocketAddr>,
    data: Option<PathBuf>,
    store: Option<Backend>,
) -> Result<(), CliError> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(data) = data {
        config.store.path = data;
    }
    if let Some(store) = store {
        config.store.backend = store;
    }

    let Config {
        server: listener,
        store,
        log,
    } = config;

    telemetry::init(&log);
    tracing::info!(
        backend = %store.backend,
        path = %store.path.display(),
        "opening store"
    );
    let ledger = Ledger::new(wonderboard::store::open(&store)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::new(format!("Failed to start runtime: {e}")))?;

    runtime
        .block_on(server::serve(listener, ledger))
        .map_err(|e| CliError::new(format!("Server failed: {e}")))
}
