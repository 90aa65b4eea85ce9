//! Versioned JSON records for the daily session and lifetime statistics.
//!
//! Every record is wrapped as `{ "version": N, "data": ... }`. A record with
//! another version, a different shape, or values that break the game
//! invariants is treated as absent.

use chrono::{DateTime, FixedOffset, NaiveDate};
use gridle_rules::{Attempt, DailySession, Driver, HintVector, Statistics};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Current record schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Store key of the daily session record.
pub const SESSION_KEY: &str = "game_data";

/// Store key of the lifetime statistics record.
pub const STATS_KEY: &str = "game_stats";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Wraps `data` in a versioned envelope.
///
/// # Errors
///
/// Returns the serializer error if `data` cannot be encoded.
pub fn encode<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        data,
    })
}

/// Unwraps a versioned envelope. Returns `None` for malformed payloads and
/// other schema versions.
#[instrument(skip(payload), fields(bytes = payload.len()))]
pub fn decode<T: DeserializeOwned>(payload: &str) -> Option<T> {
    match serde_json::from_str::<Envelope<T>>(payload) {
        Ok(envelope) if envelope.version == SCHEMA_VERSION => Some(envelope.data),
        Ok(envelope) => {
            warn!(version = envelope.version, expected = SCHEMA_VERSION, "Unsupported record version");
            None
        }
        Err(e) => {
            warn!(error = %e, "Malformed record");
            None
        }
    }
}

/// Persisted shape of a daily session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// One hint vector per attempt.
    pub hints: Vec<HintVector>,
    /// One guessed driver per attempt.
    pub guesses: Vec<Driver>,
    /// True once the target has been guessed.
    pub is_correct: bool,
    /// Time of the last save, in epoch milliseconds.
    pub timestamp: i64,
}

impl SessionRecord {
    /// Captures `session` as of `now`.
    pub fn capture(session: &DailySession, now: DateTime<FixedOffset>) -> Self {
        let (guesses, hints): (Vec<Driver>, Vec<HintVector>) = session
            .attempts()
            .iter()
            .map(|a| (a.guess().clone(), *a.hints()))
            .unzip();

        Self {
            hints,
            guesses,
            is_correct: *session.won(),
            timestamp: now.timestamp_millis(),
        }
    }

    /// Calendar day of the last save, in the offset of `now`.
    pub fn day(&self, now: DateTime<FixedOffset>) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.timestamp)
            .map(|utc| utc.with_timezone(now.offset()).date_naive())
    }

    /// Rebuilds the session if it is valid and belongs to the day of `now`.
    ///
    /// Returns `None` for stale or inconsistent records.
    #[instrument(skip(self), fields(attempts = self.guesses.len(), timestamp = self.timestamp))]
    pub fn restore(self, now: DateTime<FixedOffset>) -> Option<DailySession> {
        let today = now.date_naive();
        let Some(day) = self.day(now) else {
            warn!("Session timestamp out of range");
            return None;
        };

        if day != today {
            debug!(%day, %today, "Session record is stale");
            return None;
        }

        if self.guesses.len() != self.hints.len() {
            warn!(
                guesses = self.guesses.len(),
                hints = self.hints.len(),
                "Session record has mismatched guesses and hints"
            );
            return None;
        }

        let attempts = self
            .guesses
            .into_iter()
            .zip(self.hints)
            .map(|(guess, hints)| Attempt::new(guess, hints))
            .collect();

        DailySession::restore(day, attempts, self.is_correct).ok()
    }
}

/// Validates decoded statistics.
pub fn checked_statistics(stats: Statistics) -> Option<Statistics> {
    if stats.is_consistent() {
        Some(stats)
    } else {
        warn!(?stats, "Statistics record violates invariants");
        None
    }
}
