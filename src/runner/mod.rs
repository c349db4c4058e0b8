//! Executing the target program for a single validated interval.
//!
//! The [`Executor`] builds the command line for the run's [`ExecutionStrategy`] and hands it to
//! a [`ProcessRunner`]. The production runner is [`SystemProcessRunner`]; tests inject fakes.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::table::ValidatedInterval;

pub mod process;

pub use process::SystemProcessRunner;

/// Process runner trait for launching a command and capturing its output.
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion.
    ///
    /// Blocks until the child exits. An `Err` means the process could not be started or waited
    /// on; a non-zero exit is reported through [`ExecutionResult::exit_code`].
    fn run(&self, command: &CommandLine) -> Result<ExecutionResult>;

    /// Check whether the program at `path` can be launched.
    fn is_available(&self, path: &Path) -> bool {
        let _ = path;
        true
    }

    /// Get a human-readable name for this runner.
    fn name(&self) -> &str;
}

/// How the target program is launched. Selected once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// `<executable> <start> <length>`
    Direct,
    /// `<launcher> <executable> <start> <length>`, for remote or batch scheduling.
    Wrapped { launcher: String },
}

impl ExecutionStrategy {
    /// Wrap invocations with the given launcher token.
    pub fn wrapped(launcher: impl Into<String>) -> Self {
        ExecutionStrategy::Wrapped {
            launcher: launcher.into(),
        }
    }
}

/// A fully resolved command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Exit status and captured output of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code; `-N` when the child was killed by signal `N`.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    /// Create a result with the given exit code and no output.
    pub fn new(exit_code: i32) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Attach captured output to the result.
    pub fn with_output(mut self, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self.stderr = stderr.into();
        self
    }

    /// Whether the program exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs the target program under a fixed strategy.
pub struct Executor {
    executable: PathBuf,
    strategy: ExecutionStrategy,
    process: Box<dyn ProcessRunner>,
}

impl Executor {
    /// Create an executor for `executable`.
    pub fn new(
        executable: impl Into<PathBuf>,
        strategy: ExecutionStrategy,
        process: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            executable: executable.into(),
            strategy,
            process,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn strategy(&self) -> &ExecutionStrategy {
        &self.strategy
    }

    /// Check that the target program exists before any case is run.
    pub fn validate(&self) -> Result<()> {
        if !self.process.is_available(&self.executable) {
            return Err(Error::FileNotFound(self.executable.clone()));
        }
        Ok(())
    }

    /// The target program's own invocation, without any launcher.
    ///
    /// Operands are passed as written in the table.
    pub fn target_command(&self, interval: &ValidatedInterval) -> CommandLine {
        let [start, length] = &interval.args;
        CommandLine::new(&self.executable).arg(start).arg(length)
    }

    /// The command actually spawned for `interval` under the current strategy.
    pub fn command_line(&self, interval: &ValidatedInterval) -> CommandLine {
        let target = self.target_command(interval);
        match &self.strategy {
            ExecutionStrategy::Direct => target,
            ExecutionStrategy::Wrapped { launcher } => {
                let mut wrapped = CommandLine::new(launcher).arg(&target.program);
                wrapped.args.extend(target.args);
                wrapped
            }
        }
    }

    /// Run the target program for `interval` and wait for it to finish.
    pub fn execute(&self, interval: &ValidatedInterval) -> Result<ExecutionResult> {
        let command = self.command_line(interval);
        tracing::debug!(runner = self.process.name(), %command, "executing case");
        self.process.run(&command)
    }
}
