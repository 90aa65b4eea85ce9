//! Command-line interface for gridle.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Gridle - guess the Formula 1 driver of the day
#[derive(Parser, Debug)]
#[command(name = "gridle")]
#[command(about = "Daily F1 driver-guessing game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (missing file means defaults)
    #[arg(long, global = true, default_value = "gridle.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON roster file
        #[arg(long)]
        roster: Option<String>,

        /// Disable GET /game, which reveals today's answer
        #[arg(long)]
        hide_answer: bool,
    },

    /// Play today's puzzle in the terminal
    Play {
        /// Game server URL
        #[arg(long)]
        server_url: Option<String>,

        /// Path to the local state database (created if it doesn't exist)
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Show lifetime statistics
    Stats {
        /// Path to the local state database
        #[arg(long)]
        db_path: Option<String>,
    },

    /// List roster names, or names matching a query
    Names {
        /// JSON roster file
        #[arg(long)]
        roster: Option<String>,

        /// Text to match, ignoring case and accents
        query: Option<String>,
    },
}
