//! Per-day game session state machine.
//!
//! ```text
//! NotStarted ──guess──▶ InProgress ──guess──▶ InProgress
//!                           │                     │
//!                       correct              6th miss
//!                           ▼                     ▼
//!                          Won                   Lost
//! ```
//!
//! `Won` and `Lost` are terminal for the day: further submissions are
//! ignored.

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{Driver, GuessResult, Hint, HintVector, RulesError};

/// Maximum number of guesses per day.
pub const MAX_ATTEMPTS: usize = 6;

/// One guess and the hints it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Attempt {
    guess: Driver,
    hints: HintVector,
}

impl From<&GuessResult> for Attempt {
    fn from(result: &GuessResult) -> Self {
        Self::new(result.guess.clone(), result.hints)
    }
}

/// Phase of a daily session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum SessionStatus {
    /// No guess yet today.
    #[display("not started")]
    NotStarted,
    /// At least one guess, not yet resolved.
    #[display("in progress")]
    InProgress,
    /// The target was guessed.
    #[display("won")]
    Won,
    /// All attempts were used without finding the target.
    #[display("lost")]
    Lost,
}

impl SessionStatus {
    /// Returns true for the terminal phases.
    pub fn is_resolved(self) -> bool {
        matches!(self, SessionStatus::Won | SessionStatus::Lost)
    }
}

/// Outcome of submitting a judged guess to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The session was already resolved; nothing changed.
    Ignored(SessionStatus),
    /// The attempt was recorded and the game continues.
    Continue {
        /// Guesses left today.
        remaining: usize,
    },
    /// The attempt found the target.
    Won {
        /// Attempts used, including the winning one.
        attempts: usize,
    },
    /// The attempt was the last one and missed.
    Lost,
}

impl SubmitOutcome {
    /// Returns `Some(won)` if this submission resolved the session.
    ///
    /// Statistics must be recorded exactly when this is `Some`.
    pub fn resolution(&self) -> Option<bool> {
        match self {
            SubmitOutcome::Won { .. } => Some(true),
            SubmitOutcome::Lost => Some(false),
            SubmitOutcome::Ignored(_) | SubmitOutcome::Continue { .. } => None,
        }
    }
}

/// Guesses made on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DailySession {
    day: NaiveDate,
    attempts: Vec<Attempt>,
    won: bool,
}

impl DailySession {
    /// Creates an empty session for `day`.
    #[instrument]
    pub fn new(day: NaiveDate) -> Self {
        debug!("Creating daily session");
        Self {
            day,
            attempts: Vec::new(),
            won: false,
        }
    }

    /// Rebuilds a session from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::CorruptedSession`] if there are more than
    /// [`MAX_ATTEMPTS`] attempts, or if the win flag disagrees with the
    /// attempts: a win needs a correct last attempt and nothing correct
    /// before it, and a session that is not won holds no correct attempt.
    #[instrument(skip(attempts), fields(attempts = attempts.len()))]
    pub fn restore(day: NaiveDate, attempts: Vec<Attempt>, won: bool) -> Result<Self, RulesError> {
        if attempts.len() > MAX_ATTEMPTS {
            warn!("Restored session exceeds attempt limit");
            return Err(RulesError::CorruptedSession(format!(
                "{} attempts recorded, limit is {}",
                attempts.len(),
                MAX_ATTEMPTS
            )));
        }

        // A correct name ends the game, so it can only be the last attempt.
        let correct_at = attempts
            .iter()
            .position(|a| a.hints().name == Hint::Correct);
        match (won, correct_at) {
            (true, Some(index)) if index + 1 == attempts.len() => {}
            (false, None) => {}
            (true, _) => {
                warn!("Restored session claims a win without a correct final guess");
                return Err(RulesError::CorruptedSession(
                    "won without a correct final guess".to_string(),
                ));
            }
            (false, Some(index)) => {
                warn!(index, "Restored session holds a correct guess but no win");
                return Err(RulesError::CorruptedSession(
                    "correct guess recorded without a win".to_string(),
                ));
            }
        }

        Ok(Self { day, attempts, won })
    }

    /// Returns this session if it belongs to `today`, otherwise a fresh one.
    #[instrument(skip(self), fields(session_day = %self.day))]
    pub fn for_day(self, today: NaiveDate) -> Self {
        if self.day == today {
            self
        } else {
            info!(%today, "Discarding stale session");
            Self::new(today)
        }
    }

    /// Current phase, derived from the recorded attempts.
    pub fn status(&self) -> SessionStatus {
        if self.won {
            SessionStatus::Won
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            SessionStatus::Lost
        } else if self.attempts.is_empty() {
            SessionStatus::NotStarted
        } else {
            SessionStatus::InProgress
        }
    }

    /// Returns true once the session is won or lost.
    pub fn is_resolved(&self) -> bool {
        self.status().is_resolved()
    }

    /// Guesses left today.
    pub fn remaining(&self) -> usize {
        if self.is_resolved() {
            0
        } else {
            MAX_ATTEMPTS - self.attempts.len()
        }
    }

    /// Folds a judged guess into the session.
    ///
    /// Resolved sessions are frozen: the guess is ignored and the session is
    /// left untouched.
    #[instrument(skip(self, result), fields(day = %self.day, guess = %result.guess.name()))]
    pub fn submit(&mut self, result: &GuessResult) -> SubmitOutcome {
        let status = self.status();
        if status.is_resolved() {
            warn!(%status, "Guess submitted to a resolved session");
            return SubmitOutcome::Ignored(status);
        }

        self.attempts.push(Attempt::from(result));

        if result.is_correct {
            self.won = true;
            info!(attempts = self.attempts.len(), "Session won");
            SubmitOutcome::Won {
                attempts: self.attempts.len(),
            }
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            info!("Session lost");
            SubmitOutcome::Lost
        } else {
            let remaining = MAX_ATTEMPTS - self.attempts.len();
            debug!(remaining, "Guess recorded");
            SubmitOutcome::Continue { remaining }
        }
    }
}
