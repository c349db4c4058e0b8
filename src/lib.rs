//! rangecheck: a harness that validates a range-counting program against a table of cases.
//!
//! Each table row declares a half-open interval `[start, start+length)` and the count the target
//! program must report for it. The harness runs the program once per row, reads the count and
//! running time from its output, classifies the result and appends a record to a results file
//! next to the table.
//!
//! # Quick Start
//!
//! ```no_run
//! use rangecheck::builder;
//!
//! # fn main() -> rangecheck::Result<()> {
//! let harness = builder()
//!     .executable("./count_primes")
//!     .direct()
//!     .build()?;
//!
//! let summary = harness.run_tables(&["tests/small.csv"])?;
//! println!("{} failures", summary.failures);
//! # Ok(())
//! # }
//! ```
//!
//! # Table format
//!
//! ```text
//! # start  length  expected_count
//! 0        100     25
//! 10       50      10
//! ```
//!
//! # Results format
//!
//! A four-line `#` header followed by one record per case:
//!
//! ```text
//! 0	100	PASSED	0.003
//! 10	50	BADCOUNT	9!=10
//! -5	10	BADTEST	-5,
//! 0	5	ERROR	2
//! ```
//!
//! # Architecture
//!
//! - [`table`]: [`CaseParser`](table::CaseParser) and [`RangeValidator`](table::RangeValidator)
//! - [`runner`]: [`Executor`](runner::Executor) over a pluggable
//!   [`ProcessRunner`](runner::ProcessRunner)
//! - [`harness`]: output extraction, outcome classification, results writing
//! - [`core`]: the [`Harness`] that drives a table, plus errors and cancellation
//!
//! # Features
//!
//! - `default` - Enables `cli`
//! - `cli` - The `rangecheck` command-line binary

pub mod config;
pub mod core;
pub mod harness;
pub mod runner;
pub mod table;
pub mod util;

// Re-export commonly used types
pub use crate::core::{CancelToken, Error, Harness, HarnessBuilder, Result};
pub use config::{Config, ConfigLoader, ShowOutput, StrategyKind};
pub use harness::{Outcome, RunSummary};
pub use runner::ExecutionStrategy;

/// Create a new harness builder.
///
/// This is the main entry point for the fluent API.
pub fn builder() -> HarnessBuilder {
    HarnessBuilder::new()
}
