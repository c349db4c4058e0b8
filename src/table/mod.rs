//! Test tables: decoding declared cases and checking them against the target's domain.
//!
//! A table is a text file of `start length expected_count` rows. Lines starting with `#` and
//! blank lines are ignored.

mod parser;
mod range;

pub use parser::{CaseParser, ParseDiagnostic, TableInt, TestCase, parse_line};
pub use range::{DOMAIN_MAX, RangeValidator, ValidatedInterval, Violation};
