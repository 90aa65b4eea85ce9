//! Scoring a guess against the target.

use std::cmp::Ordering;

use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Driver, Hint, HintVector, Roster, RulesError, select_target};

/// Hints for a guess plus whether it named the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Evaluation {
    hints: HintVector,
    is_correct: bool,
}

/// Result of a judged guess, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    /// True if the guess named the target.
    pub is_correct: bool,
    /// Per-attribute hints.
    pub hints: HintVector,
    /// The resolved driver that was guessed.
    pub guess: Driver,
}

/// Hint for a numeric attribute.
///
/// `Down` means the target's value is lower than the guess.
pub fn numeric_hint(guess: u32, target: u32) -> Hint {
    match guess.cmp(&target) {
        Ordering::Equal => Hint::Correct,
        Ordering::Greater => Hint::Down,
        Ordering::Less => Hint::Up,
    }
}

/// Hint for the team attribute.
///
/// Current teams are compared first; failing that, the guess's current team
/// is looked up anywhere in the target's history.
pub fn team_hint(guess: &Driver, target: &Driver) -> Hint {
    match guess.current_team() {
        Some(team) if target.current_team() == Some(team) => Hint::Correct,
        Some(team) if target.raced_for(team) => Hint::PartiallyCorrect,
        _ => Hint::Incorrect,
    }
}

fn equality_hint<T: PartialEq + ?Sized>(guess: &T, target: &T) -> Hint {
    if guess == target {
        Hint::Correct
    } else {
        Hint::Incorrect
    }
}

/// Scores `guess` against `target`.
///
/// Correctness is an exact, case-sensitive name comparison; it is not
/// derived from the hint vector.
pub fn evaluate(guess: &Driver, target: &Driver) -> Evaluation {
    let hints = HintVector {
        name: equality_hint(guess.name(), target.name()),
        flag: equality_hint(guess.flag(), target.flag()),
        team: team_hint(guess, target),
        car_number: numeric_hint(*guess.car_number(), *target.car_number()),
        age: numeric_hint(*guess.age(), *target.age()),
        first_year: numeric_hint(*guess.first_year(), *target.first_year()),
        wins: numeric_hint(*guess.wins(), *target.wins()),
    };

    Evaluation {
        hints,
        is_correct: guess.name() == target.name(),
    }
}

/// Resolves a submitted name, picks the day's target and scores the guess.
///
/// # Errors
///
/// - [`RulesError::DriverNotFound`] if the name matches no roster entry.
/// - [`RulesError::EmptyRoster`] if no target can be selected.
#[instrument(skip(roster), fields(roster_len = roster.len()))]
pub fn judge_guess(
    roster: &Roster,
    raw_name: &str,
    day: NaiveDate,
) -> Result<GuessResult, RulesError> {
    let guess = roster.find(raw_name)?;
    let target = select_target(roster, day)?;
    let evaluation = evaluate(guess, target);

    debug!(
        guess = %guess.name(),
        is_correct = evaluation.is_correct,
        hints = %evaluation.hints.display(),
        "Guess judged"
    );

    Ok(GuessResult {
        is_correct: evaluation.is_correct,
        hints: evaluation.hints,
        guess: guess.clone(),
    })
}
