//! Custom assertion helpers for common test patterns

use std::path::Path;

use crate::fixer::FixOutcome;
use crate::steps::Phase;

/// Asserts that a path exists and is a directory
pub fn assert_dir_exists<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    assert!(
        path.is_dir(),
        "Expected directory to exist at path: {}",
        path.display()
    );
}

/// Asserts that a path does not exist
pub fn assert_not_exists<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    assert!(
        !path.exists(),
        "Expected path to not exist: {}",
        path.display()
    );
}

/// Asserts that exactly the phases up to and including `last` were visited.
pub fn assert_ran_through(outcome: &FixOutcome, last: Phase) {
    let expected: Vec<Phase> = Phase::ALL.iter().copied().filter(|p| *p <= last).collect();
    assert_eq!(
        outcome.visited(),
        expected,
        "Expected phases up to {last} to have run"
    );
}
