use crate::config::Config;
use crate::core::cancel::CancelToken;
use crate::core::error::{Error, Result};
use crate::harness::{
    ExtractedReport, Outcome, OutputSink, ProgramGrammar, ResultsWriter, RunSummary,
    StatusReporter, classify, ensure_distinct, extract, results_path_for,
};
use crate::runner::{ExecutionStrategy, Executor, ProcessRunner, SystemProcessRunner};
use crate::table::{CaseParser, RangeValidator, TestCase, ValidatedInterval};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Builder for creating a harness.
pub struct HarnessBuilder {
    config: Option<Config>,
    executable: Option<PathBuf>,
    strategy: Option<ExecutionStrategy>,
    quiet: Option<bool>,
    process: Option<Box<dyn ProcessRunner>>,
    cancel: Option<CancelToken>,
    sinks: Option<(OutputSink, OutputSink)>,
}

impl HarnessBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: None,
            executable: None,
            strategy: None,
            quiet: None,
            process: None,
            cancel: None,
            sinks: None,
        }
    }

    /// Set the configuration directly.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the target program path.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Set the execution strategy for every case in the run.
    pub fn strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Invoke the target program directly.
    pub fn direct(self) -> Self {
        self.strategy(ExecutionStrategy::Direct)
    }

    /// Prefix every invocation with `launcher`.
    pub fn wrapped(self, launcher: impl Into<String>) -> Self {
        self.strategy(ExecutionStrategy::wrapped(launcher))
    }

    /// Suppress status output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }

    /// Set a custom process runner implementation.
    pub fn process_runner<R: ProcessRunner + 'static>(mut self, runner: R) -> Self {
        self.process = Some(Box::new(runner));
        self
    }

    /// Share a cancellation token with the harness.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Send status lines to `out` and alerts to `err` instead of the terminal.
    pub fn output(mut self, out: OutputSink, err: OutputSink) -> Self {
        self.sinks = Some((out, err));
        self
    }

    /// Build the harness.
    pub fn build(self) -> Result<Harness> {
        let config = self.config.unwrap_or_default();

        if config.results.extension.is_empty() {
            return Err(Error::InvalidConfig {
                field: "results.extension".to_string(),
                value: String::new(),
            });
        }

        let strategy = self.strategy.unwrap_or_else(|| config.strategy());
        if let ExecutionStrategy::Wrapped { launcher } = &strategy {
            if launcher.trim().is_empty() {
                return Err(Error::config("wrapped strategy requires a launcher"));
            }
        }

        let executable = self.executable.unwrap_or_else(|| config.executable.clone());
        let process = self
            .process
            .unwrap_or_else(|| Box::new(SystemProcessRunner::new()));
        let quiet = self.quiet.unwrap_or(config.quiet);
        let show_output = config.results.show_output;
        let reporter = match self.sinks {
            Some((out, err)) => StatusReporter::with_sinks(quiet, show_output, out, err),
            None => StatusReporter::new(quiet, show_output),
        };

        Ok(Harness {
            executor: Executor::new(executable, strategy, process),
            validator: RangeValidator::new(),
            grammar: ProgramGrammar,
            reporter,
            results_extension: config.results.extension,
            cancel: self.cancel.unwrap_or_default(),
        })
    }
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Harness that drives the target program over one or more test tables.
pub struct Harness {
    executor: Executor,
    validator: RangeValidator,
    grammar: ProgramGrammar,
    reporter: StatusReporter,
    results_extension: String,
    cancel: CancelToken,
}

impl Harness {
    /// Where results for `table` are written.
    pub fn results_path(&self, table: &Path) -> PathBuf {
        results_path_for(table, &self.results_extension)
    }

    /// Check that the target program can be launched.
    pub fn validate(&self) -> Result<()> {
        self.executor.validate()
    }

    /// Run every table in order and return the combined summary.
    ///
    /// A table that cannot be processed is reported and counted as one failure on top of the
    /// cases it had already recorded; the run continues with the next table. An interrupt stops
    /// the remaining tables.
    pub fn run_tables<P: AsRef<Path>>(&self, tables: &[P]) -> Result<RunSummary> {
        self.validate()?;

        let mut total = RunSummary::default();
        for table in tables {
            if self.cancel.is_cancelled() {
                total.cancelled = true;
                break;
            }

            let mut summary = RunSummary::default();
            let result = self.process_table(table.as_ref(), &mut summary);
            total.merge(&summary);
            if let Err(e) = result {
                self.reporter.table_error(&e);
                total.failures += 1;
            }
        }

        Ok(total)
    }

    /// Run every case in `table`, streaming records to its results file.
    pub fn run_table(&self, table: &Path) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        self.process_table(table, &mut summary)?;
        Ok(summary)
    }

    /// Process one table, tallying into `summary` as cases are recorded.
    ///
    /// On error, `summary` still accounts for every record written before it, and the results
    /// file is flushed and synced.
    fn process_table(&self, table: &Path, summary: &mut RunSummary) -> Result<()> {
        let file = File::open(table).map_err(|e| Error::resource("open", table, e))?;
        let results_path = self.results_path(table);
        ensure_distinct(table, &results_path)?;
        let mut writer = ResultsWriter::create(&results_path)?;
        self.reporter.writing_results(&results_path);

        let ran = self.run_cases(table, file, &results_path, &mut writer, summary);
        let finished = writer
            .finish()
            .map_err(|e| Error::resource("write", &results_path, e))
            .and_then(|file| {
                file.sync_all()
                    .map_err(|e| Error::resource("sync", &results_path, e))
            });

        if summary.cancelled {
            self.reporter.interrupted();
        }
        ran.and(finished)?;
        self.reporter.summary(summary);
        Ok(())
    }

    fn run_cases(
        &self,
        table: &Path,
        file: File,
        results_path: &Path,
        writer: &mut ResultsWriter<File>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        for item in CaseParser::new(BufReader::new(file)) {
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let case = match item.map_err(|e| Error::resource("read", table, e))? {
                Ok(case) => case,
                Err(diagnostic) => {
                    self.reporter.parse_alert(&diagnostic);
                    continue;
                }
            };

            let Some(outcome) = self.run_case(&case)? else {
                summary.cancelled = true;
                break;
            };

            writer
                .write_record(&case, &outcome)
                .map_err(|e| Error::resource("write", results_path, e))?;
            summary.record(&outcome);
        }
        Ok(())
    }

    /// Validate, execute and classify one case.
    ///
    /// Returns `None` if the run was cancelled while the program was running; that case is not
    /// recorded.
    fn run_case(&self, case: &TestCase) -> Result<Option<Outcome>> {
        let interval = match self.validator.validate(case) {
            Ok(interval) => interval,
            Err(violations) => {
                self.reporter.bad_test_alert(case);
                return Ok(Some(Outcome::from(violations)));
            }
        };

        self.reporter.running(
            &self.executor.target_command(&interval),
            self.executor.strategy(),
        );
        let execution = self.executor.execute(&interval)?;
        if self.cancel.is_cancelled() {
            return Ok(None);
        }

        let report = extract(&self.grammar, &execution.stdout);
        if execution.success() {
            self.check_reported_interval(&interval, &report);
        }

        let outcome = classify(case, &execution, &report);
        self.reporter.case_output(&outcome, &execution);
        Ok(Some(outcome))
    }

    fn check_reported_interval(&self, interval: &ValidatedInterval, report: &ExtractedReport) {
        let (Some(low), Some(high)) = (report.reported_start, report.reported_end) else {
            return;
        };

        if low != i128::from(interval.start) || high != i128::from(interval.end) {
            tracing::warn!(
                executable = %self.executor.executable().display(),
                "test specified the interval [{}, {}), but the program reported [{}, {})",
                interval.start,
                interval.end,
                low,
                high
            );
        }
    }
}
