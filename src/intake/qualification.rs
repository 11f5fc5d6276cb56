//! Prior qualification branch of the academic section.
//!
//! The branch is a tagged union: only the selected alternative carries
//! fields, so leaving a branch discards its values structurally.

use std::fmt;
use std::str::FromStr;

/// Semesters in a diploma programme.
pub const DIPLOMA_SEMESTERS: usize = 6;

/// Discrete choice driving the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualificationKind {
    #[default]
    None,
    PlusTwo,
    Diploma,
}

impl QualificationKind {
    pub const ALL: [QualificationKind; 3] = [
        QualificationKind::PlusTwo,
        QualificationKind::Diploma,
        QualificationKind::None,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QualificationKind::None => "None",
            QualificationKind::PlusTwo => "12th",
            QualificationKind::Diploma => "Diploma",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.label()).collect()
    }
}

impl fmt::Display for QualificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QualificationKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(QualificationKind::None),
            "12th" | "twelfth" | "hsc" | "plus two" | "plustwo" => Ok(QualificationKind::PlusTwo),
            "diploma" => Ok(QualificationKind::Diploma),
            other => Err(format!(
                "Unknown qualification `{other}` (expected 12th, Diploma or None)"
            )),
        }
    }
}

/// Branch state. Only the live alternative holds values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PriorQualification {
    #[default]
    None,
    PlusTwo {
        score: String,
        year: String,
    },
    Diploma {
        scores: [String; DIPLOMA_SEMESTERS],
        year: String,
    },
}

impl PriorQualification {
    /// Empty state for `kind`.
    pub fn empty(kind: QualificationKind) -> Self {
        match kind {
            QualificationKind::None => PriorQualification::None,
            QualificationKind::PlusTwo => PriorQualification::PlusTwo {
                score: String::new(),
                year: String::new(),
            },
            QualificationKind::Diploma => PriorQualification::Diploma {
                scores: Default::default(),
                year: String::new(),
            },
        }
    }

    pub fn kind(&self) -> QualificationKind {
        match self {
            PriorQualification::None => QualificationKind::None,
            PriorQualification::PlusTwo { .. } => QualificationKind::PlusTwo,
            PriorQualification::Diploma { .. } => QualificationKind::Diploma,
        }
    }

    /// Switches branch. Re-selecting the current branch keeps its values.
    ///
    /// Returns `true` when the branch actually changed.
    pub fn set_qualification(&mut self, kind: QualificationKind) -> bool {
        if self.kind() == kind {
            return false;
        }
        tracing::debug!(from = %self.kind(), to = %kind, "qualification branch switched");
        *self = PriorQualification::empty(kind);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_plus_two() -> PriorQualification {
        PriorQualification::PlusTwo {
            score: "91.2".into(),
            year: "2021".into(),
        }
    }

    #[test]
    fn reselecting_same_branch_keeps_values() {
        let mut branch = filled_plus_two();
        assert!(!branch.set_qualification(QualificationKind::PlusTwo));
        assert!(!branch.set_qualification(QualificationKind::PlusTwo));
        assert_eq!(branch, filled_plus_two());
    }

    #[test]
    fn switching_to_diploma_starts_empty() {
        let mut branch = filled_plus_two();
        assert!(branch.set_qualification(QualificationKind::Diploma));
        assert_eq!(branch, PriorQualification::empty(QualificationKind::Diploma));
        match &branch {
            PriorQualification::Diploma { scores, year } => {
                assert_eq!(scores.len(), DIPLOMA_SEMESTERS);
                assert!(scores.iter().all(String::is_empty));
                assert!(year.is_empty());
            }
            other => panic!("unexpected branch: {other:?}"),
        }
    }

    #[test]
    fn returning_to_previous_branch_does_not_restore_stale_values() {
        let mut branch = filled_plus_two();
        branch.set_qualification(QualificationKind::Diploma);
        branch.set_qualification(QualificationKind::PlusTwo);
        assert_eq!(branch, PriorQualification::empty(QualificationKind::PlusTwo));
    }

    #[test]
    fn kind_parses_common_spellings() {
        assert_eq!("12th".parse::<QualificationKind>(), Ok(QualificationKind::PlusTwo));
        assert_eq!("Twelfth".parse::<QualificationKind>(), Ok(QualificationKind::PlusTwo));
        assert_eq!("DIPLOMA".parse::<QualificationKind>(), Ok(QualificationKind::Diploma));
        assert_eq!("".parse::<QualificationKind>(), Ok(QualificationKind::None));
        assert!("degree".parse::<QualificationKind>().is_err());
    }
}
