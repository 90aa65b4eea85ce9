//! The ordered list of candidate drivers.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Driver, RulesError};

/// Ordered, immutable snapshot of the drivers eligible for the puzzle.
///
/// Order matters: the daily target is picked by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    drivers: Vec<Driver>,
}

impl Roster {
    /// Creates a roster from drivers in their canonical order.
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self { drivers }
    }

    /// Returns the drivers in order.
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// Number of drivers.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Returns true if the roster has no drivers.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Returns the driver at `index`.
    pub fn get(&self, index: usize) -> Option<&Driver> {
        self.drivers.get(index)
    }

    /// Returns every driver name in roster order.
    pub fn names(&self) -> Vec<String> {
        self.drivers.iter().map(|d| d.name().clone()).collect()
    }

    /// Returns every driver name in a uniformly random order.
    ///
    /// The order carries no information about the daily target.
    pub fn shuffled_names<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut names = self.names();
        names.shuffle(rng);
        names
    }

    /// Resolves a submitted name to a driver.
    ///
    /// Matching is exact but case-insensitive; surrounding whitespace is
    /// ignored. There is no fuzzy matching.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::DriverNotFound`] if no driver has that name.
    #[instrument(skip(self), fields(roster_len = self.drivers.len()))]
    pub fn find(&self, raw_name: &str) -> Result<&Driver, RulesError> {
        let wanted = raw_name.trim().to_lowercase();
        let found = self
            .drivers
            .iter()
            .find(|d| d.name().to_lowercase() == wanted);

        match found {
            Some(driver) => {
                debug!(driver = %driver.name(), "Resolved guess");
                Ok(driver)
            }
            None => {
                debug!("No driver matches guess");
                Err(RulesError::DriverNotFound(raw_name.to_string()))
            }
        }
    }
}

impl From<Vec<Driver>> for Roster {
    fn from(drivers: Vec<Driver>) -> Self {
        Self::new(drivers)
    }
}
