//! Task orchestration: resolve ports, collect inputs, package, report.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::context::ServiceContext;
use crate::error::{Result, TaskError};
use crate::inputs::{PortRegistry, ResolveMode};

use super::convert::collect_geojson;
use super::package::build_package;

/// The document written to `<workPath>/status.json` when the run succeeds.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    status: &'a str,
    reason: &'a str,
    completed_at: String,
}

/// Runs the whole task: port resolution through tile packaging.
///
/// Reads four well-known ports: `data` (the input directory), `name` (the
/// output artifact name), `layers` (base-name to layer-name remapping), and
/// `skip_errors` (tolerate per-file conversion failures). Returns the
/// human-readable success reason.
///
/// # Errors
///
/// Propagates every error from registry construction, input collection, and
/// packaging; all are fatal to the run.
pub fn run_task(ctx: &ServiceContext, work_path: &Path, task_def_path: &Path) -> Result<String> {
    let registry =
        PortRegistry::load(ctx.fs.as_ref(), work_path, task_def_path, ResolveMode::Strict)?;

    let data_dir = registry.directory("data")?;
    let name = registry.string("name")?;
    let layers = registry.mapping("layers")?;
    let skip_errors = registry.boolean("skip_errors")?;

    let output_dir = registry.output_path("data");
    ctx.fs.create_dir_all(&output_dir).map_err(|e| {
        TaskError::Config(format!("cannot create output directory {}: {e}", output_dir.display()))
    })?;

    let files = collect_geojson(ctx, data_dir, skip_errors)?;
    if files.is_empty() {
        return Err(TaskError::Config(format!(
            "no usable vector files found in {}",
            data_dir.display()
        )));
    }
    info!(count = files.len(), "collected GeoJSON inputs");

    let artifact = build_package(ctx, &files, layers, &output_dir, name)?;
    info!(artifact = %artifact.display(), "tile package written");

    let reason = format!("Successfully created {name}.mbtiles");
    write_status(ctx, work_path, &reason)?;
    Ok(reason)
}

fn write_status(ctx: &ServiceContext, work_path: &Path, reason: &str) -> Result<()> {
    let report = StatusReport {
        status: "success",
        reason,
        completed_at: ctx.clock.now().to_rfc3339(),
    };
    let body = serde_json::to_string_pretty(&report)
        .map_err(|e| TaskError::Config(format!("cannot serialize status report: {e}")))?;
    let path = work_path.join("status.json");
    ctx.fs
        .write(&path, &body)
        .map_err(|e| TaskError::Config(format!("cannot write {}: {e}", path.display())))
}
