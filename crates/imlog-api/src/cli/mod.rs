//! CLI command definitions for the `imlog` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod message;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Ordered chat log store with cursor pagination.
#[derive(Parser)]
#[command(name = "imlog", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Keep messages in process memory instead of SQLite.
        #[arg(long)]
        in_memory: bool,
    },

    /// Append a message to a chat log.
    Send {
        /// Chat id (e.g. "alice:bob").
        #[arg(long)]
        chat: String,

        /// Sender id.
        #[arg(long)]
        sender: String,

        /// Message text.
        #[arg(long)]
        text: String,

        /// Send time; defaults to now in milliseconds since the epoch.
        #[arg(long)]
        send_time: Option<i64>,
    },

    /// Read one page of a chat log.
    Pull {
        /// Chat id.
        #[arg(long)]
        chat: String,

        /// Inclusive lower bound on send time.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        cursor: i64,

        /// Maximum messages to return.
        #[arg(short, long, default_value = "20", allow_hyphen_values = true)]
        limit: i32,

        /// Show newest first.
        #[arg(long)]
        reverse: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
