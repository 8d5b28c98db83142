//! Input enumeration and format conversion.
//!
//! Files already in GeoJSON form are taken as-is; everything else goes
//! through the external conversion tool, which writes a same-named
//! `.geojson` sibling next to the source file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::context::ServiceContext;
use crate::error::{Result, TaskError};

use super::failure_detail;

const CONVERT_TOOL: &str = "ogr2ogr";

/// Every converted file is reprojected into geographic coordinates.
const TARGET_SRS: &str = "EPSG:4326";

/// Collects the GeoJSON files for packaging from one input directory.
///
/// Entries are processed in sorted order. A failed conversion aborts the run
/// unless `skip_errors` is set, in which case the file is dropped with a
/// warning and processing continues.
///
/// # Errors
///
/// Returns [`TaskError::Config`] when the directory cannot be listed and
/// [`TaskError::ExternalTool`] when a conversion fails with `skip_errors`
/// unset.
pub fn collect_geojson(
    ctx: &ServiceContext,
    data_dir: &Path,
    skip_errors: bool,
) -> Result<Vec<PathBuf>> {
    let entries = ctx.fs.list_dir(data_dir).map_err(|e| {
        TaskError::Config(format!("cannot list input directory {}: {e}", data_dir.display()))
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let full_path = data_dir.join(&entry);
        if ctx.fs.is_dir(&full_path) {
            debug!(entry = %entry, "skipping subdirectory");
            continue;
        }

        if is_geojson(&full_path) {
            if !files.contains(&full_path) {
                files.push(full_path);
            }
            continue;
        }

        let stem = full_path
            .file_stem()
            .map_or_else(|| entry.clone(), |s| s.to_string_lossy().into_owned());
        let target = data_dir.join(format!("{stem}.geojson"));
        match convert(ctx, &full_path, &target) {
            Ok(()) => {
                if !files.contains(&target) {
                    files.push(target);
                }
            }
            Err(err) if skip_errors => {
                warn!(file = %entry, %err, "conversion failed, skipping");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(files)
}

fn is_geojson(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| {
        ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("geojson")
    })
}

fn convert(ctx: &ServiceContext, source: &Path, target: &Path) -> Result<()> {
    debug!(source = %source.display(), "converting to GeoJSON");
    let args: Vec<OsString> = vec![
        "-f".into(),
        "GeoJSON".into(),
        target.into(),
        source.into(),
        "-t_srs".into(),
        TARGET_SRS.into(),
    ];

    let output = ctx.runner.run(CONVERT_TOOL, &args).map_err(|e| TaskError::ExternalTool {
        tool: CONVERT_TOOL.to_string(),
        detail: format!("converting {}: {e}", source.display()),
    })?;
    if !output.success() {
        return Err(TaskError::ExternalTool {
            tool: CONVERT_TOOL.to_string(),
            detail: format!("converting {}: {}", source.display(), failure_detail(&output)),
        });
    }
    Ok(())
}
