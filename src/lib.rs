//! Core library for the `vectiles` CLI.
//!
//! The crate wraps two external tools — `ogr2ogr` for format conversion and
//! `tippecanoe` for tile packaging — behind a typed input-port configuration
//! layer. See [`inputs`] for port resolution and [`tiles`] for the driver.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod inputs;
pub mod ports;
pub mod tiles;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::TaskError;

/// Run a parsed command against the live environment.
///
/// # Errors
///
/// Returns the error raised by the selected command handler.
pub fn run(command: &cli::Command) -> Result<(), TaskError> {
    commands::dispatch(command)
}
