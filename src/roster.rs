//! Roster providers: where the server gets its ordered driver list.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use derive_more::{Display, Error};
use gridle_rules::{Driver, Roster};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Supplies the ordered driver list for a request.
///
/// Implementations decide how the roster is cached or refreshed; callers
/// treat each returned roster as an immutable snapshot.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Returns the current roster.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] if the roster cannot be produced.
    async fn roster(&self) -> Result<Roster, RosterError>;
}

/// The roster could not be produced.
#[derive(Debug, Clone, Display, Error)]
#[display("Roster unavailable: {} at {}:{}", message, file, line)]
pub struct RosterError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RosterError {
    /// Creates a new roster error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Provider over a roster held in memory.
#[derive(Debug, Clone)]
pub struct StaticRoster {
    roster: Roster,
}

impl StaticRoster {
    /// Wraps an existing roster.
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }
}

#[async_trait]
impl RosterProvider for StaticRoster {
    async fn roster(&self) -> Result<Roster, RosterError> {
        Ok(self.roster.clone())
    }
}

/// Provider that reads a JSON roster file on every request.
///
/// The file holds either an array of drivers or an object keyed by
/// position (`{"0": {...}, "1": {...}}`), which is ordered by key.
#[derive(Debug, Clone)]
pub struct JsonFileRoster {
    path: PathBuf,
}

impl JsonFileRoster {
    /// Creates a provider for the file at `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating JSON file roster provider");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the roster file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RosterProvider for JsonFileRoster {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn roster(&self) -> Result<Roster, RosterError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(error = %e, "Failed to read roster file");
            RosterError::new(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let roster = parse_roster(&content)?;
        debug!(drivers = roster.len(), "Roster loaded");
        Ok(roster)
    }
}

/// Parses and validates a JSON roster document.
///
/// # Errors
///
/// Returns [`RosterError`] if the document is not a driver array or an
/// index-keyed object, or if any driver has no team.
#[instrument(skip(content), fields(bytes = content.len()))]
pub fn parse_roster(content: &str) -> Result<Roster, RosterError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| RosterError::new(format!("Invalid roster JSON: {}", e)))?;

    let drivers: Vec<Driver> = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value::<Driver>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RosterError::new(format!("Invalid driver record: {}", e)))?,
        Value::Object(map) => {
            let mut indexed = map
                .into_iter()
                .map(|(key, driver)| {
                    let index = key
                        .parse::<usize>()
                        .map_err(|_| RosterError::new(format!("Roster key '{}' is not an index", key)))?;
                    let driver = serde_json::from_value::<Driver>(driver)
                        .map_err(|e| RosterError::new(format!("Invalid driver record '{}': {}", key, e)))?;
                    Ok((index, driver))
                })
                .collect::<Result<Vec<_>, RosterError>>()?;
            indexed.sort_by_key(|(index, _)| *index);
            indexed.into_iter().map(|(_, driver)| driver).collect()
        }
        _ => return Err(RosterError::new("Roster must be an array or an object")),
    };

    if let Some(driver) = drivers.iter().find(|d| d.teams().is_empty()) {
        return Err(RosterError::new(format!("Driver '{}' has no team", driver.name())));
    }

    Ok(Roster::new(drivers))
}
