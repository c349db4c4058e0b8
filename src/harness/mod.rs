//! Per-case evaluation: output extraction, classification, results persistence and reporting.
//!
//! The harness sits after the executor in the pipeline:
//! `CaseParser → RangeValidator → Executor → OutputGrammar → classify → ResultsWriter`.

mod formatter;
pub mod grammar;
mod outcome;
mod writer;

pub use formatter::{OutputSink, StatusReporter};
pub use grammar::{
    CountMatch, Elapsed, ExtractedReport, OutputGrammar, ProgramGrammar, TimingMatch, extract,
};
pub use outcome::{Outcome, OutcomeTag, classify};
pub use writer::{RESULTS_HEADER, ResultsWriter, ensure_distinct, results_path_for};

/// Tally of a run over one or more tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cases classified (parse diagnostics are not cases).
    pub cases_seen: usize,
    /// Number of `PASSED` outcomes.
    pub passed: usize,
    /// Number of `BADCOUNT` and `ERROR` outcomes, plus tables that could not be processed.
    pub failures: usize,
    /// Number of `BADTEST` outcomes.
    pub bad_tests: usize,
    /// Whether the run stopped early on an interrupt.
    pub cancelled: bool,
}

impl RunSummary {
    /// Account for one classified case.
    pub fn record(&mut self, outcome: &Outcome) {
        self.cases_seen += 1;
        match outcome.tag() {
            OutcomeTag::Passed => self.passed += 1,
            OutcomeTag::BadTest => self.bad_tests += 1,
            OutcomeTag::BadCount | OutcomeTag::Error => self.failures += 1,
        }
    }

    /// Fold another table's summary into this one.
    pub fn merge(&mut self, other: &RunSummary) {
        self.cases_seen += other.cases_seen;
        self.passed += other.passed;
        self.failures += other.failures;
        self.bad_tests += other.bad_tests;
        self.cancelled |= other.cancelled;
    }

    /// No failures and not interrupted.
    pub fn is_success(&self) -> bool {
        self.failures == 0 && !self.cancelled
    }
}
