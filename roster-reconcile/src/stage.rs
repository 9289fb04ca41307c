//! Session stages.

use std::fmt;

/// Stage of a reconciliation session. Stages are entered strictly in order;
/// `create` sessions skip `Fetching`, `Presenting` and `AdminWarning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetching,
    Presenting,
    AdminWarning,
    Collecting,
    Diffing,
    Confirming,
    Applying,
    Done,
    Aborted,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Aborted)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Presenting => "presenting",
            Stage::AdminWarning => "admin-warning",
            Stage::Collecting => "collecting",
            Stage::Diffing => "diffing",
            Stage::Confirming => "confirming",
            Stage::Applying => "applying",
            Stage::Done => "done",
            Stage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_done_and_aborted_are_terminal() {
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Aborted.is_terminal());
        assert!(!Stage::Applying.is_terminal());
        assert_eq!(Stage::AdminWarning.to_string(), "admin-warning");
    }
}
