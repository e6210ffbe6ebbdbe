//! Run State
//!
//! Lifecycle position of a suite run. The engine moves through these
//! states strictly in order; `Aborted` is terminal and reachable from any
//! state.

use std::fmt;

/// Where a suite run currently is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Nothing has been invoked yet
    NotStarted,
    /// Suite setup ran (or there was none)
    SuiteSetupDone,
    /// Per-test setups for the named test ran
    TestSetupDone(String),
    /// The named test returned normally
    TestInvoked(String),
    /// Per-test teardowns for the named test ran
    TestTeardownDone(String),
    /// Suite teardown ran (or there was none)
    SuiteTeardownDone,
    /// Run completed successfully
    Finished,
    /// Run stopped at the first error
    Aborted,
}

impl RunState {
    /// Returns true for `Finished` and `Aborted`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Aborted)
    }

    /// Returns true if `next` is a legal successor of this state.
    pub fn can_advance_to(&self, next: &RunState) -> bool {
        use RunState::*;

        match (self, next) {
            _ if self.is_terminal() => false,
            (_, Aborted) => true,
            (NotStarted, SuiteSetupDone) => true,
            (SuiteSetupDone, TestSetupDone(_)) | (SuiteSetupDone, SuiteTeardownDone) => true,
            (TestSetupDone(a), TestInvoked(b)) | (TestInvoked(a), TestTeardownDone(b)) => a == b,
            (TestTeardownDone(_), TestSetupDone(_)) | (TestTeardownDone(_), SuiteTeardownDone) => {
                true
            }
            (SuiteTeardownDone, Finished) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::SuiteSetupDone => write!(f, "suite setup done"),
            Self::TestSetupDone(test) => write!(f, "setup done for '{}'", test),
            Self::TestInvoked(test) => write!(f, "'{}' invoked", test),
            Self::TestTeardownDone(test) => write!(f, "teardown done for '{}'", test),
            Self::SuiteTeardownDone => write!(f, "suite teardown done"),
            Self::Finished => write!(f, "finished"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            RunState::NotStarted,
            RunState::SuiteSetupDone,
            RunState::TestSetupDone(t("a")),
            RunState::TestInvoked(t("a")),
            RunState::TestTeardownDone(t("a")),
            RunState::TestSetupDone(t("b")),
            RunState::TestInvoked(t("b")),
            RunState::TestTeardownDone(t("b")),
            RunState::SuiteTeardownDone,
            RunState::Finished,
        ];

        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(&pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_no_tests_path() {
        assert!(RunState::SuiteSetupDone.can_advance_to(&RunState::SuiteTeardownDone));
    }

    #[test]
    fn test_abort_from_anywhere_but_terminal() {
        assert!(RunState::NotStarted.can_advance_to(&RunState::Aborted));
        assert!(RunState::TestInvoked(t("a")).can_advance_to(&RunState::Aborted));
        assert!(!RunState::Finished.can_advance_to(&RunState::Aborted));
        assert!(!RunState::Aborted.can_advance_to(&RunState::Aborted));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!RunState::NotStarted.can_advance_to(&RunState::TestSetupDone(t("a"))));
        assert!(!RunState::TestSetupDone(t("a")).can_advance_to(&RunState::TestInvoked(t("b"))));
        assert!(!RunState::TestInvoked(t("a")).can_advance_to(&RunState::SuiteTeardownDone));
    }

    #[test]
    fn test_terminal() {
        assert!(RunState::Finished.is_terminal());
        assert!(RunState::Aborted.is_terminal());
        assert!(!RunState::SuiteTeardownDone.is_terminal());
    }
}
