//! Tool runner port for invoking external command-line programs.

use std::ffi::OsString;

/// The captured result of one external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ToolOutput {
    /// Returns `true` when the tool exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external tools as blocking subprocesses.
///
/// Invocations take an explicit argument vector, never a concatenated shell
/// string: file and layer names come from user-controlled input and must not
/// pass through shell interpretation.
///
/// There is no timeout handling; a hung tool blocks the task.
pub trait ToolRunner: Send + Sync {
    /// Runs `program` with `args` and waits for it to finish.
    ///
    /// A non-zero exit is reported through [`ToolOutput`], not as an `Err`;
    /// the `Err` case is reserved for failures to spawn the process at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned (not installed,
    /// not executable).
    fn run(
        &self,
        program: &str,
        args: &[OsString],
    ) -> Result<ToolOutput, Box<dyn std::error::Error + Send + Sync>>;
}
