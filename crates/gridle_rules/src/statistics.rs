//! Lifetime win/loss counters.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Aggregate results across days.
///
/// Invariants: `won + lost == played` and `max_streak >= streak`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    played: u32,
    won: u32,
    lost: u32,
    streak: u32,
    max_streak: u32,
}

impl Statistics {
    /// Fresh counters, all zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counters after one more resolved session.
    ///
    /// A loss resets the streak; a win extends it and may raise the best
    /// streak. Nothing is ever decremented.
    #[must_use]
    #[instrument]
    pub fn record(self, won: bool) -> Self {
        let played = self.played.saturating_add(1);
        if won {
            let streak = self.streak.saturating_add(1);
            Self {
                played,
                won: self.won.saturating_add(1),
                streak,
                max_streak: self.max_streak.max(streak),
                ..self
            }
        } else {
            Self {
                played,
                lost: self.lost.saturating_add(1),
                streak: 0,
                ..self
            }
        }
    }

    /// Win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            (f64::from(self.won) / f64::from(self.played)) * 100.0
        }
    }

    /// Returns true if the counters satisfy their invariants.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.won) + u64::from(self.lost) == u64::from(self.played)
            && self.max_streak >= self.streak
            && self.streak <= self.won
    }
}
