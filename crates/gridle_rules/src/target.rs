//! Deterministic selection of the day's target driver.
//!
//! The target is derived from the SHA-256 digest of the UTC date written as
//! `YYYY-MM-DD`: the first four digest bytes (the first eight hex digits),
//! read big-endian, reduced modulo the roster length.

use chrono::{NaiveDate, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::{Driver, Roster, RulesError};

/// Formats a calendar day the way the digest expects it.
pub fn iso_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Returns the current UTC calendar day.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Unsigned seed taken from the first eight hex digits of the digest.
pub fn day_seed(iso_date: &str) -> u32 {
    let digest = Sha256::digest(iso_date.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Maps a pre-formatted ISO date to a roster index.
///
/// # Errors
///
/// Returns [`RulesError::EmptyRoster`] if `roster_len` is zero.
pub fn day_index(iso_date: &str, roster_len: usize) -> Result<usize, RulesError> {
    if roster_len == 0 {
        return Err(RulesError::EmptyRoster);
    }
    let seed = u64::from(day_seed(iso_date));
    // roster_len fits in u64 on every supported target
    Ok((seed % roster_len as u64) as usize)
}

/// Picks the target driver for `day`.
///
/// Pure in `(roster, day)`: no clock, no randomness.
///
/// # Errors
///
/// Returns [`RulesError::EmptyRoster`] if the roster has no drivers.
#[instrument(skip(roster), fields(roster_len = roster.len()))]
pub fn select_target(roster: &Roster, day: NaiveDate) -> Result<&Driver, RulesError> {
    let iso = iso_day(day);
    let index = day_index(&iso, roster.len())?;
    let target = roster.get(index).ok_or(RulesError::EmptyRoster)?;
    debug!(day = %iso, index, "Selected daily target");
    Ok(target)
}
