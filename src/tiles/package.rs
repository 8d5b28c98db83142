//! Tile packaging via the external packaging tool.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::context::ServiceContext;
use crate::error::{Result, TaskError};

use super::failure_detail;

const PACKAGE_TOOL: &str = "tippecanoe";

/// The layer identifier for one dataset file: its base name, remapped
/// through the `layers` port when an entry exists.
#[must_use]
pub fn layer_name(layers: &BTreeMap<String, String>, file: &Path) -> String {
    let base = file.file_stem().map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    layers.get(&base).cloned().unwrap_or(base)
}

/// Packages all collected files into one `<name>.mbtiles` artifact.
///
/// The packaging tool is invoked exactly once, with a
/// `--named-layer=<layer>:<file>` association per input file and `-zg` to
/// let it pick the zoom range.
///
/// # Errors
///
/// Returns [`TaskError::ExternalTool`] when the tool cannot be spawned or
/// exits non-zero. Packaging failures are always fatal; the skip-errors
/// port only guards the per-file conversion step.
pub fn build_package(
    ctx: &ServiceContext,
    files: &[PathBuf],
    layers: &BTreeMap<String, String>,
    output_dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let artifact = output_dir.join(format!("{name}.mbtiles"));

    let mut args: Vec<OsString> = vec!["-o".into(), artifact.clone().into()];
    for file in files {
        let mut layer_arg = OsString::from(format!("--named-layer={}:", layer_name(layers, file)));
        layer_arg.push(file.as_os_str());
        args.push(layer_arg);
    }
    args.push("-zg".into());
    args.extend(files.iter().map(|file| file.clone().into()));

    info!(artifact = %artifact.display(), files = files.len(), "packaging tiles");
    let output = ctx.runner.run(PACKAGE_TOOL, &args).map_err(|e| TaskError::ExternalTool {
        tool: PACKAGE_TOOL.to_string(),
        detail: format!("packaging {}: {e}", artifact.display()),
    })?;
    if !output.success() {
        return Err(TaskError::ExternalTool {
            tool: PACKAGE_TOOL.to_string(),
            detail: format!("packaging {}: {}", artifact.display(), failure_detail(&output)),
        });
    }
    Ok(artifact)
}
