//! Wonderboard CLI - serve the API or inspect the ledger from the shell.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use wonderboard::config::Backend;

/// Wonderboard - score keeping for a 7 Wonders game group
#[derive(Parser, Debug)]
#[command(name = "wonderboard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API until Ctrl-C
    Serve {
        /// Address to listen on (default: 127.0.0.1:3000)
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Data file for the file store (default: data.json)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Storage backend: memory or file
        #[arg(short, long)]
        store: Option<Backend>,
    },

    /// Print player or wonder statistics
    Stats {
        /// Which leaderboard to print
        #[arg(short, long, default_value = "players")]
        view: cli::StatsView,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::StatsFormat,
    },

    /// Print the ranked game history, newest first
    History {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::HistoryFormat,
    },

    /// Verify the stored records against the ledger invariants
    Check,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = cli::load_config(args.config.as_deref()).and_then(|config| match args.command {
        Commands::Serve { bind, data, store } => cli::serve::execute(config, bind, data, store),
        Commands::Stats { view, format } => cli::stats::execute(&config, view, format),
        Commands::History { format } => cli::history::execute(&config, format),
        Commands::Check => cli::check::execute(&config),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
