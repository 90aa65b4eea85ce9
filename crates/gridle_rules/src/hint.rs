//! Hints and the fixed-order hint vector.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Number of scored attributes, and so the length of every hint vector.
pub const ATTRIBUTE_COUNT: usize = 7;

/// Feedback for one attribute of a guess.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Hint {
    /// The attribute matches the target.
    #[display("correct")]
    Correct,
    /// The attribute does not match the target.
    #[display("incorrect")]
    Incorrect,
    /// The target's value is higher than the guess.
    #[display("up")]
    Up,
    /// The target's value is lower than the guess.
    #[display("down")]
    Down,
    /// The guessed current team is somewhere in the target's team history.
    #[serde(rename = "partially correct", alias = "partially-correct")]
    #[display("partially correct")]
    PartiallyCorrect,
}

impl Hint {
    /// Short symbol used when printing a row of hints.
    pub fn symbol(self) -> &'static str {
        match self {
            Hint::Correct => "✔",
            Hint::Incorrect => "✘",
            Hint::Up => "↑",
            Hint::Down => "↓",
            Hint::PartiallyCorrect => "~",
        }
    }
}

/// The seven scored attributes, in hint-vector order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, strum::EnumIter,
)]
pub enum Attribute {
    /// Driver name.
    #[display("Name")]
    Name,
    /// Nationality flag.
    #[display("Flag")]
    Flag,
    /// Current team.
    #[display("Team")]
    Team,
    /// Car number.
    #[display("Number")]
    CarNumber,
    /// Age.
    #[display("Age")]
    Age,
    /// Debut season.
    #[display("Debut")]
    FirstYear,
    /// Career wins.
    #[display("Wins")]
    Wins,
}

/// One hint per attribute, in the fixed order of [`Attribute`].
///
/// Serialized as a seven-element array so the wire form stays positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Hint; ATTRIBUTE_COUNT]", into = "[Hint; ATTRIBUTE_COUNT]")]
pub struct HintVector {
    /// Name hint.
    pub name: Hint,
    /// Flag hint.
    pub flag: Hint,
    /// Team hint.
    pub team: Hint,
    /// Car number hint.
    pub car_number: Hint,
    /// Age hint.
    pub age: Hint,
    /// Debut season hint.
    pub first_year: Hint,
    /// Wins hint.
    pub wins: Hint,
}

impl HintVector {
    /// A vector with every attribute correct.
    pub const ALL_CORRECT: Self = Self {
        name: Hint::Correct,
        flag: Hint::Correct,
        team: Hint::Correct,
        car_number: Hint::Correct,
        age: Hint::Correct,
        first_year: Hint::Correct,
        wins: Hint::Correct,
    };

    /// Returns the hint for a single attribute.
    pub fn get(&self, attribute: Attribute) -> Hint {
        match attribute {
            Attribute::Name => self.name,
            Attribute::Flag => self.flag,
            Attribute::Team => self.team,
            Attribute::CarNumber => self.car_number,
            Attribute::Age => self.age,
            Attribute::FirstYear => self.first_year,
            Attribute::Wins => self.wins,
        }
    }

    /// Iterates over `(attribute, hint)` pairs in vector order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Hint)> + '_ {
        Attribute::iter().map(move |attribute| (attribute, self.get(attribute)))
    }

    /// Formats the vector as a row of symbols.
    pub fn display(&self) -> String {
        self.iter()
            .map(|(_, hint)| hint.symbol())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns true if every hint is [`Hint::Correct`].
    pub fn all_correct(&self) -> bool {
        self.iter().all(|(_, hint)| hint == Hint::Correct)
    }
}

impl From<[Hint; ATTRIBUTE_COUNT]> for HintVector {
    fn from(hints: [Hint; ATTRIBUTE_COUNT]) -> Self {
        let [name, flag, team, car_number, age, first_year, wins] = hints;
        Self {
            name,
            flag,
            team,
            car_number,
            age,
            first_year,
            wins,
        }
    }
}

impl From<HintVector> for [Hint; ATTRIBUTE_COUNT] {
    fn from(v: HintVector) -> Self {
        [
            v.name,
            v.flag,
            v.team,
            v.car_number,
            v.age,
            v.first_year,
            v.wins,
        ]
    }
}
