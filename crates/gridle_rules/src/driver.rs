//! Driver records supplied by the roster.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A driver as seen by the game.
///
/// Upstream records carry more keys (`driverId`, `nationality`, ...);
/// those are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Canonical display name.
    name: String,
    /// Opaque nationality identifier, usually a flag image URL.
    flag: String,
    /// Teams in chronological order; the last one is the current team.
    teams: Vec<String>,
    /// Permanent car number.
    car_number: u32,
    /// Age in years.
    age: u32,
    /// Debut season.
    first_year: u32,
    /// Career race wins.
    wins: u32,
}

impl Driver {
    /// Returns the current team (the last entry of [`Driver::teams`]).
    pub fn current_team(&self) -> Option<&str> {
        self.teams.last().map(String::as_str)
    }

    /// Returns true if the driver ever raced for `team`.
    pub fn raced_for(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }
}
