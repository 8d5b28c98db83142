//! `vectiles ports` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::Result;
use crate::inputs::{PortRegistry, ResolveMode};

/// Execute the `ports` command: resolve the registry and print one line per
/// port without invoking any external tool.
///
/// Resolution is lenient — directory ports are reported even when the
/// directory has not been supplied yet.
///
/// # Errors
///
/// Returns any error from loading or parsing the task configuration.
pub fn run_with_context(ctx: &ServiceContext, work_path: &Path, task_def: &Path) -> Result<()> {
    let registry =
        PortRegistry::load(ctx.fs.as_ref(), work_path, task_def, ResolveMode::Lenient)?;
    for port in registry.iter() {
        let value = port.value().map_or_else(|| "<unset>".to_string(), ToString::to_string);
        println!("{}\t{}\t{}", port.sanitized_name(), port.data_type(), value);
    }
    Ok(())
}
