//! In-memory fakes for the port traits, shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::runner::{ToolOutput, ToolRunner};

/// In-memory filesystem. Clones share the same backing store, so a test can
/// keep one handle for assertions and box another into a context.
#[derive(Clone, Default)]
pub struct MemFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, path: &str, contents: &str) {
        self.files.lock().unwrap().insert(PathBuf::from(path), contents.to_string());
    }

    pub fn add_dir(&self, path: &str) {
        self.dirs.lock().unwrap().insert(PathBuf::from(path));
    }

    pub fn remove_dir(&self, path: &str) {
        self.dirs.lock().unwrap().remove(Path::new(path));
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("file not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let has_file = self.files.lock().unwrap().contains_key(path);
        has_file || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
            || self.files.lock().unwrap().keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut names: Vec<String> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .chain(self.dirs.lock().unwrap().iter())
            .filter(|k| k.parent() == Some(path))
            .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }
}

/// Scripted tool runner that records every invocation.
///
/// All invocations succeed with empty output unless a failure rule matches.
#[derive(Clone, Default)]
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    fail_matching: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes any invocation whose arguments contain `needle` exit non-zero.
    pub fn fail_when_args_contain(&self, needle: &str) {
        self.fail_matching.lock().unwrap().push(needle.to_string());
    }

    /// Every recorded `(program, args)` pair, in invocation order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `program` was invoked.
    pub fn invocations_of(&self, program: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(p, _)| p == program).count()
    }
}

impl ToolRunner for FakeRunner {
    fn run(
        &self,
        program: &str,
        args: &[OsString],
    ) -> Result<ToolOutput, Box<dyn std::error::Error + Send + Sync>> {
        let rendered: Vec<String> =
            args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        self.calls.lock().unwrap().push((program.to_string(), rendered.clone()));

        let failed = self
            .fail_matching
            .lock()
            .unwrap()
            .iter()
            .any(|needle| rendered.iter().any(|arg| arg.contains(needle.as_str())));
        Ok(ToolOutput {
            exit_code: i32::from(failed),
            stdout: String::new(),
            stderr: if failed { "simulated tool failure".to_string() } else { String::new() },
        })
    }
}

/// Clock pinned to a fixed instant.
#[derive(Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a context over clones of the given fakes.
pub fn context(fs: &MemFs, runner: &FakeRunner) -> ServiceContext {
    ServiceContext {
        fs: Box::new(fs.clone()),
        runner: Box::new(runner.clone()),
        clock: Box::new(FixedClock::default()),
    }
}
