//! Live tool runner using `std::process::Command`.

use std::ffi::OsString;
use std::process::Command;

use crate::ports::runner::{ToolOutput, ToolRunner};

/// Live runner that spawns external tools directly, without a shell.
pub struct LiveToolRunner;

impl ToolRunner for LiveToolRunner {
    fn run(
        &self,
        program: &str,
        args: &[OsString],
    ) -> Result<ToolOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new(program).args(args).output()?;
        Ok(ToolOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn captures_stdout_and_exit_code() {
        let runner = LiveToolRunner;
        let result = runner.run("echo", &os(&["hello"])).unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hello");
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn reports_nonzero_exit_without_err() {
        let runner = LiveToolRunner;
        let result = runner.run("false", &[]).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(!result.success());
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let runner = LiveToolRunner;
        let result = runner.run("vectiles-no-such-tool", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn arguments_are_not_shell_interpreted() {
        let runner = LiveToolRunner;
        // A shell would expand this; argv invocation passes it through as-is.
        let result = runner.run("echo", &os(&["$HOME; rm -rf /"])).unwrap();
        assert_eq!(result.stdout.trim(), "$HOME; rm -rf /");
    }
}
