//! `vectiles run` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::Result;
use crate::tiles;

/// Execute the `run` command: the full convert-and-package task.
///
/// # Errors
///
/// Returns any error from port resolution, conversion, or packaging.
pub fn run_with_context(ctx: &ServiceContext, work_path: &Path, task_def: &Path) -> Result<()> {
    let reason = tiles::run_task(ctx, work_path, task_def)?;
    println!("{reason}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{context, FakeRunner, MemFs};
    use serde_json::json;

    #[test]
    fn runs_the_task_end_to_end() {
        let fs = MemFs::new();
        fs.put(
            "/work/def.json",
            &json!({
                "inputPortDescriptors": [
                    {"name": "data", "type": "directory"},
                    {"name": "name", "type": "string", "defaultValue": "output"},
                    {"name": "layers", "type": "string", "dataType": "mapping",
                     "defaultValue": ""},
                    {"name": "skip_errors", "type": "string", "dataType": "boolean",
                     "defaultValue": "false"}
                ]
            })
            .to_string(),
        );
        fs.put("/work/input/ports.json", "{}");
        fs.add_dir("/work/input/data");
        fs.put("/work/input/data/a.geojson", "");
        let runner = FakeRunner::new();
        let ctx = context(&fs, &runner);

        run_with_context(&ctx, Path::new("/work"), Path::new("/work/def.json")).unwrap();
        assert_eq!(runner.invocations_of("tippecanoe"), 1);
        assert!(fs.contents("/work/status.json").is_some());
    }
}
