//! Error types for task configuration and execution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving input ports or running the task.
#[derive(Error, Debug)]
pub enum TaskError {
    /// The task definition or value file is missing, unreadable, or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A supplied value does not parse for the port's declared data type.
    #[error("invalid value for input port {port}: {reason}")]
    InvalidValue {
        /// Name of the offending port.
        port: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A directory port resolved to a path that does not exist or is not a directory.
    #[error("input port {port} points at {path}, which is not an existing directory")]
    PathNotFound {
        /// Name of the offending port.
        port: String,
        /// The resolved path that failed the check.
        path: PathBuf,
    },

    /// An external tool could not be spawned or exited non-zero.
    #[error("{tool} failed: {detail}")]
    ExternalTool {
        /// The tool binary name.
        tool: String,
        /// Captured stderr, stdout, or the spawn error.
        detail: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::TaskError;
    use std::path::PathBuf;

    #[test]
    fn messages_name_the_port() {
        let err = TaskError::InvalidValue {
            port: "skip_errors".to_string(),
            reason: "expected 'true' or 'false', got 'maybe'".to_string(),
        };
        assert!(err.to_string().contains("skip_errors"));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn path_not_found_shows_resolved_path() {
        let err = TaskError::PathNotFound {
            port: "data".to_string(),
            path: PathBuf::from("/mnt/work/input/data"),
        };
        assert!(err.to_string().contains("/mnt/work/input/data"));
    }
}
