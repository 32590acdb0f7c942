//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Basketball league REST API
#[derive(Parser, Debug)]
#[command(name = "basketball-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Import or export per-match player statistics
    Stats(StatsArgs),
}

/// Overrides for `SERVER_HOST` / `SERVER_PORT`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop everything and re-run all migrations
    Fresh,
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub action: StatsAction,
}

#[derive(Subcommand, Debug)]
pub enum StatsAction {
    /// Upsert stat lines from a CSV file in one transaction
    Import {
        /// Match the lines belong to
        #[arg(long = "match", value_name = "ID")]
        match_id: i64,
        /// CSV file with a header row
        file: PathBuf,
    },
    /// Write a match's stat lines as CSV
    Export {
        #[arg(long = "match", value_name = "ID")]
        match_id: i64,
        /// Destination file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
