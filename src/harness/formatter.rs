//! Terminal output for harness progress, alerts and summaries.
//!
//! Status lines go to stdout and are suppressed in quiet mode. Alerts and errors always go to
//! stderr.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::ShowOutput;
use crate::runner::{CommandLine, ExecutionResult, ExecutionStrategy};
use crate::table::{ParseDiagnostic, TestCase};

use super::{Outcome, RunSummary};

/// Shared destination for reporter output.
pub type OutputSink = Arc<Mutex<dyn Write + Send>>;

/// Formats and prints harness messages.
#[derive(Clone)]
pub struct StatusReporter {
    quiet: bool,
    show_output: ShowOutput,
    out: OutputSink,
    err: OutputSink,
}

impl StatusReporter {
    /// Create a reporter on the process's stdout and stderr.
    pub fn new(quiet: bool, show_output: ShowOutput) -> Self {
        Self::with_sinks(
            quiet,
            show_output,
            Arc::new(Mutex::new(io::stdout())),
            Arc::new(Mutex::new(io::stderr())),
        )
    }

    /// Create a reporter writing status lines to `out` and alerts to `err`.
    pub fn with_sinks(
        quiet: bool,
        show_output: ShowOutput,
        out: OutputSink,
        err: OutputSink,
    ) -> Self {
        Self {
            quiet,
            show_output,
            out,
            err,
        }
    }

    pub fn writing_results(&self, path: &Path) {
        self.status(format_args!("Writing results to \"{}\".", path.display()));
    }

    pub fn running(&self, target: &CommandLine, strategy: &ExecutionStrategy) {
        self.status(format_args!("{}", running_line(target, strategy)));
    }

    pub fn parse_alert(&self, diagnostic: &ParseDiagnostic) {
        self.alert(format_args!("ALERT: {diagnostic}.  Skipping."));
    }

    pub fn bad_test_alert(&self, case: &TestCase) {
        self.alert(format_args!(
            "ALERT: Test \"{} {}\" does not meet specification.  Skipping.",
            case.start, case.length
        ));
    }

    pub fn table_error(&self, err: &crate::core::Error) {
        self.alert(format_args!("ERROR: {err}"));
    }

    pub fn interrupted(&self) {
        self.alert(format_args!("Caught signal; terminating tests early."));
    }

    /// Print a case's captured output based on the show_output policy.
    pub fn case_output(&self, outcome: &Outcome, execution: &ExecutionResult) {
        let should_show = match self.show_output {
            ShowOutput::Always => true,
            ShowOutput::Never => false,
            ShowOutput::OnFailure => outcome.is_failure(),
        };

        if !should_show {
            return;
        }

        let Ok(mut out) = self.out.lock() else {
            return;
        };
        for (stream, text) in [("stdout", &execution.stdout), ("stderr", &execution.stderr)] {
            if text.is_empty() {
                continue;
            }
            let newline = if text.ends_with('\n') { "" } else { "\n" };
            let _ = write!(
                out,
                "--- captured {stream} ---\n{text}{newline}--- end {stream} ---\n"
            );
        }
    }

    /// Print the summary line for a finished table.
    pub fn summary(&self, summary: &RunSummary) {
        self.status(format_args!("{}", summary_line(summary)));
    }

    fn status(&self, line: fmt::Arguments<'_>) {
        if !self.quiet {
            emit(&self.out, line);
        }
    }

    fn alert(&self, line: fmt::Arguments<'_>) {
        emit(&self.err, line);
    }
}

// Terminal write failures are not worth aborting a run over.
fn emit(sink: &OutputSink, line: fmt::Arguments<'_>) {
    if let Ok(mut w) = sink.lock() {
        let _ = writeln!(w, "{line}");
    }
}

fn running_line(target: &CommandLine, strategy: &ExecutionStrategy) -> String {
    match strategy {
        ExecutionStrategy::Direct => format!("Running \"{target}\""),
        ExecutionStrategy::Wrapped { launcher } => format!(
            "Running \"{target}\" via {launcher} (use Ctrl-C Ctrl-C to terminate)"
        ),
    }
}

fn summary_line(summary: &RunSummary) -> String {
    let status = if summary.is_success() { "ok" } else { "FAILED" };
    let mut line = format!(
        "test result: {status}. {} passed, {} failed, {} bad tests",
        summary.passed, summary.failures, summary.bad_tests
    );
    if summary.cancelled {
        line.push_str(" (interrupted)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    type Buffer = Arc<Mutex<Vec<u8>>>;

    fn capture(quiet: bool, show_output: ShowOutput) -> (StatusReporter, Buffer, Buffer) {
        let out: Buffer = Arc::default();
        let err: Buffer = Arc::default();
        let reporter = StatusReporter::with_sinks(quiet, show_output, out.clone(), err.clone());
        (reporter, out, err)
    }

    fn text(buffer: &Buffer) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_running_line_direct() {
        let target = CommandLine::new("./count_primes").arg("0").arg("100");
        assert_eq!(
            running_line(&target, &ExecutionStrategy::Direct),
            "Running \"./count_primes 0 100\""
        );
    }

    #[test]
    fn test_running_line_wrapped() {
        let target = CommandLine::new("./count_primes").arg("0").arg("100");
        assert_eq!(
            running_line(&target, &ExecutionStrategy::wrapped("lrun")),
            "Running \"./count_primes 0 100\" via lrun (use Ctrl-C Ctrl-C to terminate)"
        );
    }

    #[test]
    fn test_summary_line() {
        let summary = RunSummary {
            cases_seen: 4,
            passed: 2,
            failures: 1,
            bad_tests: 1,
            cancelled: false,
        };
        assert_eq!(
            summary_line(&summary),
            "test result: FAILED. 2 passed, 1 failed, 1 bad tests"
        );

        let summary = RunSummary {
            passed: 1,
            cases_seen: 1,
            cancelled: true,
            ..Default::default()
        };
        assert_eq!(
            summary_line(&summary),
            "test result: FAILED. 1 passed, 0 failed, 0 bad tests (interrupted)"
        );
    }

    #[test]
    fn test_status_and_alert_streams() {
        let (reporter, out, err) = capture(false, ShowOutput::Never);
        reporter.writing_results(Path::new("t.results"));
        reporter.summary(&RunSummary::default());
        reporter.parse_alert(&ParseDiagnostic {
            line_number: 1,
            line_text: "abc def".to_string(),
        });

        assert_eq!(
            text(&out),
            "Writing results to \"t.results\".\ntest result: ok. 0 passed, 0 failed, 0 bad tests\n"
        );
        assert_eq!(
            text(&err),
            "ALERT: Error parsing line \"abc def\".  Skipping.\n"
        );
    }

    #[test]
    fn test_quiet_keeps_alerts() {
        let (reporter, out, err) = capture(true, ShowOutput::Never);
        reporter.writing_results(Path::new("t.results"));
        reporter.interrupted();
        assert_eq!(text(&out), "");
        assert_eq!(text(&err), "Caught signal; terminating tests early.\n");
    }

    #[test]
    fn test_captured_output_on_failure() {
        let (reporter, out, _) = capture(true, ShowOutput::OnFailure);
        let execution = ExecutionResult::new(2).with_output("partial", "some error\n");
        reporter.case_output(&Outcome::Error { exit_code: 2 }, &execution);
        assert_eq!(
            text(&out),
            "--- captured stdout ---\npartial\n--- end stdout ---\n\
             --- captured stderr ---\nsome error\n--- end stderr ---\n"
        );
    }

    #[test]
    fn test_on_failure_hides_passing_output() {
        let (reporter, out, _) = capture(false, ShowOutput::OnFailure);
        let execution = ExecutionResult::new(0).with_output("should not be printed\n", "");
        reporter.case_output(&Outcome::Passed { elapsed: None }, &execution);
        assert_eq!(text(&out), "");

        let (reporter, out, _) = capture(false, ShowOutput::Always);
        reporter.case_output(&Outcome::Passed { elapsed: None }, &execution);
        assert!(text(&out).contains("should not be printed"));
    }
}
