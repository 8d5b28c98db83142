//! The resolved collection of input ports for one task run.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TaskError};
use crate::ports::filesystem::FileSystem;

use super::descriptor::{PortDeclaration, PortDescriptor};
use super::value::{sanitize_name, PortValue};

/// How directory ports are checked during registry construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Resolve directory ports lexically without touching the filesystem.
    Lenient,
    /// Additionally require each directory port to exist and be a directory.
    Strict,
}

/// The parsed task definition document.
#[derive(Debug, Deserialize)]
struct TaskDefinition {
    #[serde(rename = "inputPortDescriptors")]
    input_port_descriptors: Vec<PortDeclaration>,
}

/// All resolved input ports for one run, keyed by sanitized name.
///
/// Built once at task start and read-only thereafter.
#[derive(Debug)]
pub struct PortRegistry {
    ports: Vec<PortDescriptor>,
    index: HashMap<String, usize>,
    work_path: PathBuf,
}

impl PortRegistry {
    /// Loads the task definition and value file and resolves every port.
    ///
    /// Directory ports take their own name as the raw value (they are
    /// supplied by filesystem convention under `<workPath>/input`). Other
    /// ports read `<workPath>/input/ports.json`, which is required only when
    /// at least one declared port has base type `string`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] for an unreadable or malformed task
    /// definition, a missing required value file, or duplicate port names;
    /// [`TaskError::InvalidValue`] when a value fails to parse; and
    /// [`TaskError::PathNotFound`] in [`ResolveMode::Strict`] when a
    /// directory port does not resolve to an existing directory.
    pub fn load(
        fs: &dyn FileSystem,
        work_path: &Path,
        task_def_path: &Path,
        mode: ResolveMode,
    ) -> Result<Self> {
        let raw = fs.read_to_string(task_def_path).map_err(|e| {
            TaskError::Config(format!(
                "cannot read task definition {}: {e}",
                task_def_path.display()
            ))
        })?;
        let definition: TaskDefinition = serde_json::from_str(&raw).map_err(|e| {
            TaskError::Config(format!(
                "task definition {} is not valid JSON: {e}",
                task_def_path.display()
            ))
        })?;

        let input_root = work_path.join("input");
        let supplied = load_value_file(fs, &input_root, &definition.input_port_descriptors)?;

        let mut ports = Vec::with_capacity(definition.input_port_descriptors.len());
        let mut index = HashMap::new();
        for declaration in &definition.input_port_descriptors {
            // Directory ports are named after their on-disk location, so the
            // declaration itself is the value source.
            let own_name;
            let raw = if declaration.base_type == "directory" {
                own_name = Value::String(declaration.name.clone());
                Some(&own_name)
            } else {
                supplied.get(&declaration.name)
            };

            let port = PortDescriptor::resolve(declaration, raw, &input_root)?;
            if mode == ResolveMode::Strict {
                verify_directory(fs, &port)?;
            }

            if index.insert(port.sanitized_name().to_string(), ports.len()).is_some() {
                return Err(TaskError::Config(format!(
                    "duplicate input port name {} after sanitization",
                    port.sanitized_name()
                )));
            }
            ports.push(port);
        }

        Ok(Self { ports, index, work_path: work_path.to_path_buf() })
    }

    /// The working directory this registry was resolved against.
    #[must_use]
    pub fn work_path(&self) -> &Path {
        &self.work_path
    }

    /// The conventional location of a named output port directory.
    #[must_use]
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.work_path.join("output").join(name)
    }

    /// Iterates the resolved ports in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PortDescriptor> {
        self.ports.iter()
    }

    /// Looks up a port by name (sanitized before lookup).
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when no such port is declared.
    pub fn get(&self, name: &str) -> Result<&PortDescriptor> {
        let key = sanitize_name(name);
        self.index
            .get(&key)
            .map(|&i| &self.ports[i])
            .ok_or_else(|| TaskError::Config(format!("no input port named {name}")))
    }

    /// The value of a string port.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when the port is missing, unset, or of
    /// another type.
    pub fn string(&self, name: &str) -> Result<&str> {
        self.require(name)?.as_str().ok_or_else(|| mismatch(name, "string"))
    }

    /// The value of a boolean port.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when the port is missing, unset, or of
    /// another type.
    pub fn boolean(&self, name: &str) -> Result<bool> {
        self.require(name)?.as_bool().ok_or_else(|| mismatch(name, "boolean"))
    }

    /// The value of an integer port.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when the port is missing, unset, or of
    /// another type.
    pub fn integer(&self, name: &str) -> Result<i64> {
        self.require(name)?.as_int().ok_or_else(|| mismatch(name, "integer"))
    }

    /// The value of a list port.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when the port is missing, unset, or of
    /// another type.
    pub fn list(&self, name: &str) -> Result<&[String]> {
        self.require(name)?.as_list().ok_or_else(|| mismatch(name, "list"))
    }

    /// The value of a mapping port.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when the port is missing, unset, or of
    /// another type.
    pub fn mapping(&self, name: &str) -> Result<&BTreeMap<String, String>> {
        self.require(name)?.as_map().ok_or_else(|| mismatch(name, "mapping"))
    }

    /// The resolved path of a directory port.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when the port is missing, unset, or of
    /// another type.
    pub fn directory(&self, name: &str) -> Result<&Path> {
        self.require(name)?
            .as_dir()
            .ok_or_else(|| mismatch(name, "directory"))
    }

    fn require(&self, name: &str) -> Result<&PortValue> {
        self.get(name)?.value().ok_or_else(|| {
            TaskError::Config(format!("input port {name} has no value and no default"))
        })
    }
}

fn mismatch(name: &str, expected: &str) -> TaskError {
    TaskError::Config(format!("input port {name} is not a {expected} port"))
}

fn load_value_file(
    fs: &dyn FileSystem,
    input_root: &Path,
    declarations: &[PortDeclaration],
) -> Result<serde_json::Map<String, Value>> {
    if !declarations.iter().any(|d| d.base_type == "string") {
        return Ok(serde_json::Map::new());
    }

    let path = input_root.join("ports.json");
    if !fs.exists(&path) {
        return Err(TaskError::Config(format!(
            "string ports are declared but the value file {} is missing",
            path.display()
        )));
    }
    let raw = fs
        .read_to_string(&path)
        .map_err(|e| TaskError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| TaskError::Config(format!("{} is not a JSON object: {e}", path.display())))
}

fn verify_directory(fs: &dyn FileSystem, port: &PortDescriptor) -> Result<()> {
    if let Some(path) = port.value().and_then(PortValue::as_dir) {
        if !fs.is_dir(path) {
            return Err(TaskError::PathNotFound {
                port: port.name().to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
