//! Command dispatch and handlers.

pub mod ports;
pub mod run;

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::error::Result;

/// Dispatch a parsed command to its handler against the live environment.
///
/// # Errors
///
/// Returns the first error raised by the selected command handler.
pub fn dispatch(command: &Command) -> Result<()> {
    let ctx = ServiceContext::live();
    match command {
        Command::Run(paths) => run::run_with_context(&ctx, &paths.work_path, &paths.task_def),
        Command::Ports(paths) => ports::run_with_context(&ctx, &paths.work_path, &paths.task_def),
    }
}
