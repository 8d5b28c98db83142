//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `vectiles`.
#[derive(Debug, Parser)]
#[command(name = "vectiles", version, about = "Package vector datasets into an MBTiles bundle")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Where the task reads its configuration from.
#[derive(Debug, Args)]
pub struct TaskPaths {
    /// Task working directory; inputs live under `<work-path>/input`.
    #[arg(long, default_value = "/mnt/work")]
    pub work_path: PathBuf,

    /// Path to the task definition document.
    #[arg(long, default_value = "./task-definition.json")]
    pub task_def: PathBuf,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert the input directory and build the tile package.
    Run(TaskPaths),
    /// Resolve and print the input ports without invoking any tools.
    Ports(TaskPaths),
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn parses_run_subcommand_with_defaults() {
        let cli = Cli::parse_from(["vectiles", "run"]);
        match cli.command {
            Command::Run(paths) => {
                assert_eq!(paths.work_path, Path::new("/mnt/work"));
                assert_eq!(paths.task_def, Path::new("./task-definition.json"));
            }
            Command::Ports(_) => panic!("expected run"),
        }
    }

    #[test]
    fn parses_ports_subcommand_with_overrides() {
        let cli = Cli::parse_from([
            "vectiles",
            "ports",
            "--work-path",
            "/tmp/job",
            "--task-def",
            "/tmp/job/def.json",
        ]);
        match cli.command {
            Command::Ports(paths) => {
                assert_eq!(paths.work_path, Path::new("/tmp/job"));
                assert_eq!(paths.task_def, Path::new("/tmp/job/def.json"));
            }
            Command::Run(_) => panic!("expected ports"),
        }
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["vectiles", "publish"]).is_err());
    }
}
