//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ashare_store::DEFAULT_USER;

/// Manage the ashare starred-stocks database.
#[derive(Debug, Parser)]
#[command(name = "ashare-admin", version, about)]
pub(crate) struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "stocks.db")]
    pub(crate) db: PathBuf,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List starred stocks.
    List {
        /// User ID.
        #[arg(long, default_value = DEFAULT_USER)]
        user: String,
    },
    /// Add a starred stock.
    Add {
        /// Stock code.
        code: String,
        /// Stock name.
        name: String,
        /// User ID.
        #[arg(long, default_value = DEFAULT_USER)]
        user: String,
    },
    /// Remove a starred stock.
    Remove {
        /// Stock code.
        code: String,
        /// User ID.
        #[arg(long, default_value = DEFAULT_USER)]
        user: String,
    },
    /// Clear all starred stocks for a user.
    Clear {
        /// User ID.
        #[arg(long, default_value = DEFAULT_USER)]
        user: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Count starred stocks for a user.
    Count {
        /// User ID.
        #[arg(long, default_value = DEFAULT_USER)]
        user: String,
    },
    /// Initialize the database schema.
    Init,
    /// Back up the database file.
    Backup {
        /// Backup file path; defaults to a timestamped name next to the
        /// database.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
