//! Pure game logic for the daily driver-guessing game.
//!
//! Everything in this crate is deterministic and free of I/O:
//!
//! - **Target selection**: today's driver is a pure function of the roster
//!   and the calendar day ([`select_target`]).
//! - **Evaluation**: a guess is scored attribute by attribute into a
//!   [`HintVector`] ([`evaluate`], [`judge_guess`]).
//! - **Session**: a per-day state machine capped at [`MAX_ATTEMPTS`]
//!   guesses ([`DailySession`]).
//! - **Statistics**: lifetime counters updated once per resolved session
//!   ([`Statistics`]).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod driver;
mod error;
mod evaluate;
mod hint;
mod roster;
mod session;
mod statistics;
mod suggest;
mod target;

pub use driver::Driver;
pub use error::RulesError;
pub use evaluate::{Evaluation, GuessResult, evaluate, judge_guess, numeric_hint, team_hint};
pub use hint::{ATTRIBUTE_COUNT, Attribute, Hint, HintVector};
pub use roster::Roster;
pub use session::{Attempt, DailySession, MAX_ATTEMPTS, SessionStatus, SubmitOutcome};
pub use statistics::Statistics;
pub use suggest::{fold_name, suggest};
pub use target::{day_index, day_seed, iso_day, select_target, utc_today};
