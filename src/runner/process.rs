use super::{CommandLine, ExecutionResult, ProcessRunner};
use crate::core::error::{Error, Result};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Runs commands as local child processes via `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    /// Create a new system process runner.
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &CommandLine) -> Result<ExecutionResult> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                Error::executor(format!(
                    "failed to execute {}: {}",
                    command.program.to_string_lossy(),
                    e
                ))
            })?;

        Ok(ExecutionResult::new(exit_code(output.status)).with_output(
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }

    fn is_available(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn name(&self) -> &str {
        "local"
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
