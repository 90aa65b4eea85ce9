//! Client-side game state: today's session and lifetime statistics.

use chrono::NaiveDate;
use derive_getters::Getters;
use gridle_rules::{DailySession, GuessResult, Statistics, SubmitOutcome};
use tracing::{debug, info, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::db::{
    RecordStore, SESSION_KEY, STATS_KEY, SessionRecord, StoreError, checked_statistics, decode,
    encode,
};

/// What happened when a judged guess was folded into local state.
#[derive(Debug, Clone, Getters)]
pub struct GuessRecorded {
    outcome: SubmitOutcome,
    session: DailySession,
    statistics: Option<Statistics>,
}

/// Service layer over a [`RecordStore`] holding one player's game state.
///
/// Assumes a single writer. Two clients sharing a store race on both
/// records and the last write wins.
#[derive(Debug, Clone)]
pub struct PlayerService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: RecordStore> PlayerService<S, SystemClock> {
    /// Creates a service on the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: RecordStore, C: Clock> PlayerService<S, C> {
    /// Creates a service with an explicit clock.
    #[instrument(skip_all)]
    pub fn with_clock(store: S, clock: C) -> Self {
        info!("Creating PlayerService");
        Self { store, clock }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Local calendar day according to the clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    /// Loads today's session.
    ///
    /// Stale, malformed or inconsistent records are cleared and a fresh
    /// session is returned in their place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store itself fails.
    #[instrument(skip(self))]
    pub fn session(&self) -> Result<DailySession, StoreError> {
        let now = self.clock.now();
        let today = now.date_naive();

        let Some(payload) = self.store.read(SESSION_KEY)? else {
            debug!(%today, "No stored session");
            return Ok(DailySession::new(today));
        };

        match decode::<SessionRecord>(&payload).and_then(|record| record.restore(now)) {
            Some(session) => {
                debug!(attempts = session.attempts().len(), status = %session.status(), "Session restored");
                Ok(session)
            }
            None => {
                info!(%today, "Discarding stored session");
                self.store.clear(SESSION_KEY)?;
                Ok(DailySession::new(today))
            }
        }
    }

    /// Loads lifetime statistics; unreadable records reset to zero.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store itself fails.
    #[instrument(skip(self))]
    pub fn statistics(&self) -> Result<Statistics, StoreError> {
        let Some(payload) = self.store.read(STATS_KEY)? else {
            return Ok(Statistics::new());
        };

        match decode::<Statistics>(&payload).and_then(checked_statistics) {
            Some(stats) => Ok(stats),
            None => {
                warn!("Resetting unreadable statistics");
                self.store.clear(STATS_KEY)?;
                Ok(Statistics::new())
            }
        }
    }

    /// Folds a judged guess into today's session.
    ///
    /// Statistics are updated only on the submission that resolves the
    /// session. Guesses against a resolved session change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if reading or writing state fails.
    #[instrument(skip(self, result), fields(guess = %result.guess.name(), is_correct = result.is_correct))]
    pub fn record_guess(&self, result: &GuessResult) -> Result<GuessRecorded, StoreError> {
        let mut session = self.session()?;
        let outcome = session.submit(result);

        if let SubmitOutcome::Ignored(status) = outcome {
            warn!(%status, "Session already resolved; guess not recorded");
            return Ok(GuessRecorded {
                outcome,
                session,
                statistics: None,
            });
        }

        let session_payload = encode(&SessionRecord::capture(&session, self.clock.now()))?;

        // Resolution commits session and statistics as one write.
        let statistics = match outcome.resolution() {
            Some(won) => {
                let stats = self.statistics()?.record(won);
                let stats_payload = encode(&stats)?;
                self.store.write_all(&[
                    (SESSION_KEY, session_payload.as_str()),
                    (STATS_KEY, stats_payload.as_str()),
                ])?;
                info!(won, played = stats.played(), streak = stats.streak(), "Statistics updated");
                Some(stats)
            }
            None => {
                self.store.write(SESSION_KEY, &session_payload)?;
                None
            }
        };

        Ok(GuessRecorded {
            outcome,
            session,
            statistics,
        })
    }

    /// Drops today's session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store fails.
    #[instrument(skip(self))]
    pub fn reset_session(&self) -> Result<(), StoreError> {
        info!("Resetting session");
        self.store.clear(SESSION_KEY)
    }
}
