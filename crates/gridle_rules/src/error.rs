//! Errors raised by the pure game rules.

/// Failure of a rules operation.
///
/// All variants are raised before any state is mutated.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RulesError {
    /// The roster has no drivers, so there is no target to select.
    #[display("Roster is empty; no target can be selected")]
    EmptyRoster,

    /// No roster entry matches the submitted name.
    #[display("Driver not found: {}", _0)]
    DriverNotFound(String),

    /// A restored session violates the session invariants.
    #[display("Corrupted session: {}", _0)]
    CorruptedSession(String),
}

impl std::error::Error for RulesError {}
