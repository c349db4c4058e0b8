//! Incremental, flushed-per-record results file writer.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::Outcome;
use crate::core::error::{Error, Result};
use crate::table::TestCase;

/// Header written at the top of every results file.
pub const RESULTS_HEADER: &str = "\
# Result format: start\tlength\toutcome\tdata
# If outcome is PASSED, data is running time; if ERROR, data is the exit code.
# If outcome is BADCOUNT, data is <received_count>!=<expected_count>.
# If outcome is BADTEST, data lists the out-of-range operands.
";

/// Results path for a table: same directory and base name, extension replaced.
///
/// `tables/small.csv` becomes `tables/small.results`.
pub fn results_path_for(table: &Path, extension: &str) -> PathBuf {
    table.with_extension(extension)
}

/// Refuse a results path that resolves to the table itself.
///
/// Creating the results file truncates it, which would destroy the table before it is read.
pub fn ensure_distinct(table: &Path, results: &Path) -> Result<()> {
    if let (Ok(table), Ok(existing)) = (table.canonicalize(), results.canonicalize()) {
        if table == existing {
            return Err(Error::resource(
                "create",
                results,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "results file would overwrite the test table",
                ),
            ));
        }
    }
    Ok(())
}

/// Appends one tab-separated record per outcome, flushing after each.
pub struct ResultsWriter<W: Write> {
    out: W,
}

impl ResultsWriter<File> {
    /// Create (truncating) the results file at `path` and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::resource("open", path, e))?;
        Self::new(file).map_err(|e| Error::resource("write", path, e))
    }
}

impl<W: Write> ResultsWriter<W> {
    /// Wrap a writer and emit the header.
    pub fn new(mut out: W) -> io::Result<Self> {
        out.write_all(RESULTS_HEADER.as_bytes())?;
        out.flush()?;
        Ok(Self { out })
    }

    /// Append the record for one case and flush it.
    ///
    /// `start` and `length` are echoed as written in the table.
    pub fn write_record(&mut self, case: &TestCase, outcome: &Outcome) -> io::Result<()> {
        let record = format!(
            "{}\t{}\t{}\t{}\n",
            case.start,
            case.length,
            outcome.tag(),
            outcome.data()
        );
        self.out.write_all(record.as_bytes())?;
        self.out.flush()
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
