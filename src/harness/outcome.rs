//! Classification of a single case into one of four outcomes.

use std::fmt;

use super::grammar::{Elapsed, ExtractedReport};
use crate::runner::ExecutionResult;
use crate::table::{TableInt, TestCase, Violation};

/// The result of one case, as written to the results file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The reported count matched. `elapsed` is absent if no timing line was printed.
    Passed { elapsed: Option<Elapsed> },
    /// The reported count differed, or no count line was printed (`actual` absent).
    BadCount {
        actual: Option<i128>,
        expected: TableInt,
    },
    /// The case lies outside the target's domain and was not run.
    BadTest { violations: Vec<Violation> },
    /// The target program exited with a non-zero code.
    Error { exit_code: i32 },
}

/// Record tag for an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeTag {
    Passed,
    BadCount,
    BadTest,
    Error,
}

impl OutcomeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeTag::Passed => "PASSED",
            OutcomeTag::BadCount => "BADCOUNT",
            OutcomeTag::BadTest => "BADTEST",
            OutcomeTag::Error => "ERROR",
        }
    }
}

impl fmt::Display for OutcomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Outcome {
    pub fn tag(&self) -> OutcomeTag {
        match self {
            Outcome::Passed { .. } => OutcomeTag::Passed,
            Outcome::BadCount { .. } => OutcomeTag::BadCount,
            Outcome::BadTest { .. } => OutcomeTag::BadTest,
            Outcome::Error { .. } => OutcomeTag::Error,
        }
    }

    /// Whether this outcome counts against the target program.
    ///
    /// `BADTEST` is a rejection of the table row, not a failure of the program.
    pub fn is_failure(&self) -> bool {
        match self {
            Outcome::BadCount { .. } | Outcome::Error { .. } => true,
            Outcome::Passed { .. } | Outcome::BadTest { .. } => false,
        }
    }

    /// The `data` column of the results record.
    pub fn data(&self) -> String {
        match self {
            Outcome::Passed { elapsed } => elapsed
                .as_ref()
                .map(Elapsed::to_string)
                .unwrap_or_default(),
            Outcome::BadCount { actual, expected } => {
                let actual = actual.map(|a| a.to_string()).unwrap_or_default();
                format!("{actual}!={expected}")
            }
            Outcome::BadTest { violations } => violations
                .iter()
                .map(|v| match v {
                    Violation::Start(_) | Violation::Length(_) => format!("{v},"),
                    Violation::Sum { .. } => v.to_string(),
                })
                .collect(),
            Outcome::Error { exit_code } => exit_code.to_string(),
        }
    }
}

impl From<Vec<Violation>> for Outcome {
    fn from(violations: Vec<Violation>) -> Self {
        Outcome::BadTest { violations }
    }
}

/// Classify a case that passed domain validation and was executed.
pub fn classify(case: &TestCase, execution: &ExecutionResult, report: &ExtractedReport) -> Outcome {
    if !execution.success() {
        return Outcome::Error {
            exit_code: execution.exit_code,
        };
    }

    match report.count {
        Some(actual) if Some(actual) == case.expected_count.value() => Outcome::Passed {
            elapsed: report.elapsed.clone(),
        },
        actual => Outcome::BadCount {
            actual,
            expected: case.expected_count.clone(),
        },
    }
}
