//! Service context bundling the port trait objects.

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::runner::ToolRunner;

/// Bundles the boundary ports into a single context.
///
/// Each field provides access to one external boundary. The registry and the
/// conversion driver take a context rather than reaching for `std::fs` or
/// `std::process` directly, so tests can substitute fakes.
pub struct ServiceContext {
    /// Filesystem for reading configuration and enumerating inputs.
    pub fs: Box<dyn FileSystem>,
    /// Runner for the external conversion and packaging tools.
    pub runner: Box<dyn ToolRunner>,
    /// Clock for timestamping the status report.
    pub clock: Box<dyn Clock>,
}

impl ServiceContext {
    /// Creates a context wired to the real filesystem, process spawner, and clock.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::{LiveClock, LiveFileSystem, LiveToolRunner};

        Self {
            fs: Box::new(LiveFileSystem),
            runner: Box::new(LiveToolRunner),
            clock: Box::new(LiveClock),
        }
    }
}
