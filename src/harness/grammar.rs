//! Regex-based output grammar for extracting the reported count and running time.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ASCII-only classes: `\s` must not match Unicode spaces.
static COUNT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^([0-9]+)\s+primes\s+found\s+in\s+\[([+-]?[0-9]+),\s+([+-]?[0-9]+)\)")
        .expect("count line pattern is valid")
});

static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^([0-9]+\.[0-9]+)\s+seconds").expect("timing line pattern is valid")
});

/// A matched count line: `<count> primes found in [<low>, <high>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMatch {
    pub count: i128,
    pub low: i128,
    pub high: i128,
}

/// A matched timing line: `<seconds> seconds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingMatch {
    pub elapsed: Elapsed,
}

/// Running time reported by the target program.
///
/// Keeps the literal text so results files reproduce exactly what the program printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elapsed {
    literal: String,
}

impl Elapsed {
    /// Parse a decimal seconds literal such as `0.003`.
    pub fn parse(literal: &str) -> Option<Self> {
        literal.parse::<f64>().ok()?;
        Some(Self {
            literal: literal.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// The two line grammars understood in the target program's standard output.
pub trait OutputGrammar {
    fn try_match_count(&self, line: &str) -> Option<CountMatch>;
    fn try_match_timing(&self, line: &str) -> Option<TimingMatch>;
}

/// Grammar of the prime-counting program.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramGrammar;

impl OutputGrammar for ProgramGrammar {
    fn try_match_count(&self, line: &str) -> Option<CountMatch> {
        let caps = COUNT_LINE.captures(line)?;
        Some(CountMatch {
            count: caps[1].parse().ok()?,
            low: caps[2].parse().ok()?,
            high: caps[3].parse().ok()?,
        })
    }

    fn try_match_timing(&self, line: &str) -> Option<TimingMatch> {
        let caps = TIMING_LINE.captures(line)?;
        Some(TimingMatch {
            elapsed: Elapsed::parse(&caps[1])?,
        })
    }
}

/// Everything extracted from one run's standard output. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedReport {
    pub count: Option<i128>,
    pub reported_start: Option<i128>,
    pub reported_end: Option<i128>,
    pub elapsed: Option<Elapsed>,
}

/// Scan `stdout` line by line; the last count line and the last timing line win.
pub fn extract(grammar: &impl OutputGrammar, stdout: &str) -> ExtractedReport {
    stdout
        .lines()
        .fold(ExtractedReport::default(), |mut report, line| {
            if let Some(m) = grammar.try_match_count(line) {
                report.count = Some(m.count);
                report.reported_start = Some(m.low);
                report.reported_end = Some(m.high);
            }
            if let Some(m) = grammar.try_match_timing(line) {
                report.elapsed = Some(m.elapsed);
            }
            report
        })
}
