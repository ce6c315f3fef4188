//! First-class invariants for 2048 boards.
//!
//! Invariants are logical properties that must hold for every reachable board.
//! They are testable on their own and composed into sets for contract checks.

pub mod merge_provenance;
pub mod positions_match;
pub mod power_of_two;

pub use merge_provenance::MergeProvenanceInvariant;
pub use positions_match::PositionsMatchCellsInvariant;
pub use power_of_two::PowerOfTwoValuesInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect_violations([
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ])
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect_violations([
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ])
    }
}

fn collect_violations<const N: usize>(
    checks: [(bool, &'static str); N],
) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = checks
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (
    PowerOfTwoValuesInvariant,
    PositionsMatchCellsInvariant,
    MergeProvenanceInvariant,
);
