//! Line-oriented decoder for test tables.

use std::fmt;
use std::io::BufRead;

/// An integer token from a table.
///
/// Keeps the text exactly as written so records and invocations echo the table row. The value
/// is absent when the token is a well-formed integer too wide for `i128`; such values are always
/// outside the target's domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInt {
    literal: String,
    value: Option<i128>,
}

impl TableInt {
    /// Parse a `[+-]?[0-9]+` token.
    pub fn parse(token: &str) -> Option<Self> {
        let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            literal: token.to_string(),
            value: token.parse().ok(),
        })
    }

    pub fn value(&self) -> Option<i128> {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl fmt::Display for TableInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// One declared test of the target program.
///
/// Fields are not limited to the 64-bit domain so that out-of-domain values still parse and can
/// be reported as `BADTEST` by the [`RangeValidator`](super::RangeValidator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub start: TableInt,
    pub length: TableInt,
    pub expected_count: TableInt,
}

/// A data line that could not be decoded into a [`TestCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-based line number within the table.
    pub line_number: usize,
    /// The offending line with surrounding whitespace removed.
    pub line_text: String,
}

impl ParseDiagnostic {
    fn new(line_number: usize, line: &str) -> Self {
        Self {
            line_number,
            line_text: line.trim().to_string(),
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error parsing line \"{}\"", self.line_text)
    }
}

/// Decode a single table line.
///
/// Returns `None` for comment and blank lines.
pub fn parse_line(line_number: usize, line: &str) -> Option<Result<TestCase, ParseDiagnostic>> {
    if line.starts_with('#') {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    let [start, length, expected] = tokens.as_slice() else {
        return Some(Err(ParseDiagnostic::new(line_number, line)));
    };

    let case = match (
        TableInt::parse(start),
        TableInt::parse(length),
        TableInt::parse(expected),
    ) {
        (Some(start), Some(length), Some(expected_count)) => TestCase {
            start,
            length,
            expected_count,
        },
        _ => return Some(Err(ParseDiagnostic::new(line_number, line))),
    };

    Some(Ok(case))
}

/// Lazy, single-pass iterator over the cases of a table.
///
/// Yields `Ok(Ok(case))` for data lines, `Ok(Err(diagnostic))` for malformed lines (including
/// lines that are not valid UTF-8), and `Err(io_error)` if the underlying reader fails.
pub struct CaseParser<R> {
    reader: R,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> CaseParser<R> {
    /// Create a parser over a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    fn decode(&self) -> Option<Result<TestCase, ParseDiagnostic>> {
        // Comments are skipped before decoding, whatever bytes they contain.
        if self.buf.first() == Some(&b'#') {
            return None;
        }

        match std::str::from_utf8(&self.buf) {
            Ok(line) => parse_line(self.line_number, line),
            Err(_) => Some(Err(ParseDiagnostic::new(
                self.line_number,
                &String::from_utf8_lossy(&self.buf),
            ))),
        }
    }
}

impl<R: BufRead> Iterator for CaseParser<R> {
    type Item = std::io::Result<Result<TestCase, ParseDiagnostic>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    if let Some(item) = self.decode() {
                        return Some(Ok(item));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
