//! Gridle - daily driver-guessing game
//!
//! Server, client and persisted player state around the pure rules in
//! [`gridle_rules`].
//!
//! # Architecture
//!
//! - **Server**: axum routes for the name list, guesses and the answer
//! - **Client**: reqwest client plus a line-based terminal loop
//! - **Player state**: today's session and lifetime statistics, stored as
//!   versioned JSON records in SQLite
//!
//! # Example
//!
//! ```no_run
//! use gridle::{GameServer, JsonFileRoster};
//!
//! # async fn example() -> anyhow::Result<()> {
//! GameServer::new(JsonFileRoster::new("drivers.json"))
//!     .with_reveal_answer(false)
//!     .serve("127.0.0.1", 3000)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod clock;
mod config;
mod db;
mod play;
mod player_service;
mod roster;
mod server;

// Crate-level exports - HTTP client
pub use client::{ClientError, GameClient, GuessReply};

// Crate-level exports - Time
pub use clock::{Clock, FixedClock, SystemClock};

// Crate-level exports - Configuration
pub use config::{ConfigError, GridleConfig};

// Crate-level exports - Persistence
pub use db::{
    MIGRATIONS, MemoryStore, NewRecord, Record, RecordStore, SCHEMA_VERSION, SESSION_KEY,
    STATS_KEY, SessionRecord, SqliteStore, StoreError, checked_statistics, decode, encode,
};

// Crate-level exports - Terminal client
pub use play::{
    Flow, Input, PlayLoop, UNAVAILABLE_ANSWER, board_header, hint_row, print_statistics,
    run as run_play,
};

// Crate-level exports - Player state
pub use player_service::{GuessRecorded, PlayerService};

// Crate-level exports - Roster sources
pub use roster::{JsonFileRoster, RosterError, RosterProvider, StaticRoster, parse_roster};

// Crate-level exports - Server types
pub use server::{ApiError, ErrorBody, GameServer, GuessRequest};

// Crate-level exports - Game rules
pub use gridle_rules::{
    Attempt, Attribute, DailySession, Driver, GuessResult, Hint, HintVector, MAX_ATTEMPTS,
    Roster, RulesError, SessionStatus, Statistics, SubmitOutcome, judge_guess, select_target,
    suggest, utc_today,
};
