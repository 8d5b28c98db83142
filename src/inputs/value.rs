//! Data types and value parsing for input ports.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;

use crate::error::{Result, TaskError};

/// The set of value types an input port can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Free-form text.
    String,
    /// `true`/`false`.
    Boolean,
    /// A signed integer.
    Integer,
    /// A comma-separated sequence of strings.
    List,
    /// Comma-separated `key=value` pairs.
    Mapping,
    /// A directory under `<workPath>/input`, supplied by convention.
    Directory,
}

impl DataType {
    /// The `dataType` spelling used in task definitions.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::List => "list",
            Self::Mapping => "mapping",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "list" => Ok(Self::List),
            "mapping" => Ok(Self::Mapping),
            "directory" => Ok(Self::Directory),
            other => Err(format!("unknown data type `{other}`")),
        }
    }
}

/// A resolved, typed port value.
///
/// One variant per [`DataType`]; the payload is the native Rust type rather
/// than a string that callers re-parse.
#[derive(Debug, Clone, PartialEq)]
pub enum PortValue {
    /// A string value.
    Str(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A list of strings.
    List(Vec<String>),
    /// A string-to-string mapping.
    Map(BTreeMap<String, String>),
    /// An absolute directory path.
    Dir(PathBuf),
}

impl PortValue {
    /// The string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The list payload, if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The mapping payload, if this is a mapping value.
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The directory payload, if this is a directory value.
    #[must_use]
    pub fn as_dir(&self) -> Option<&Path> {
        match self {
            Self::Dir(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::List(items) => f.write_str(&items.join(", ")),
            Self::Map(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{k}={v}")).collect();
                f.write_str(&pairs.join(", "))
            }
            Self::Dir(path) => f.write_str(&path.to_string_lossy()),
        }
    }
}

/// Normalizes a port name for lookup: every non-word character becomes `_`,
/// then the whole name is lower-cased. Idempotent.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

/// Parses a raw JSON value into a typed [`PortValue`] for the given type.
///
/// `input_root` anchors directory ports; resolution here is purely lexical
/// (existence checking belongs to the registry's resolve mode).
///
/// # Errors
///
/// Returns [`TaskError::InvalidValue`] when the raw value does not conform
/// to the declared data type.
pub fn parse_value(
    port: &str,
    raw: &Value,
    data_type: DataType,
    input_root: &Path,
) -> Result<PortValue> {
    match data_type {
        DataType::String => parse_string(port, raw).map(PortValue::Str),
        DataType::Boolean => parse_boolean(port, raw).map(PortValue::Bool),
        DataType::Integer => parse_integer(port, raw).map(PortValue::Int),
        DataType::List => parse_list(port, raw).map(PortValue::List),
        DataType::Mapping => parse_mapping(port, raw).map(PortValue::Map),
        DataType::Directory => {
            let segment = parse_string(port, raw)?;
            Ok(PortValue::Dir(input_root.join(segment)))
        }
    }
}

fn invalid(port: &str, reason: impl Into<String>) -> TaskError {
    TaskError::InvalidValue { port: port.to_string(), reason: reason.into() }
}

fn scalar_to_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_string(port: &str, raw: &Value) -> Result<String> {
    scalar_to_string(raw).ok_or_else(|| invalid(port, "expected a string value"))
}

fn parse_boolean(port: &str, raw: &Value) -> Result<bool> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(invalid(port, format!("expected 'true' or 'false', got '{other}'"))),
        },
        other => Err(invalid(port, format!("expected a boolean, got {other}"))),
    }
}

fn parse_integer(port: &str, raw: &Value) -> Result<i64> {
    match raw {
        Value::Number(n) => {
            n.as_i64().ok_or_else(|| invalid(port, format!("expected an integer, got {n}")))
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(port, format!("expected an integer, got '{s}'"))),
        other => Err(invalid(port, format!("expected an integer, got {other}"))),
    }
}

fn parse_list(port: &str, raw: &Value) -> Result<Vec<String>> {
    match raw {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                scalar_to_string(item)
                    .ok_or_else(|| invalid(port, "list elements must be scalars"))
            })
            .collect(),
        Value::String(s) => {
            if s.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok(s.split(',').map(|item| item.trim().to_string()).collect())
        }
        other => Err(invalid(port, format!("expected a list, got {other}"))),
    }
}

fn parse_mapping(port: &str, raw: &Value) -> Result<BTreeMap<String, String>> {
    match raw {
        Value::Object(entries) => entries
            .iter()
            .map(|(key, item)| {
                scalar_to_string(item)
                    .map(|v| (key.clone(), v))
                    .ok_or_else(|| invalid(port, "mapping values must be scalars"))
            })
            .collect(),
        Value::String(s) => {
            if s.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            let mut map = BTreeMap::new();
            for pair in s.split(',') {
                let pair = pair.trim();
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    invalid(port, format!("mapping entry '{pair}' is missing '='"))
                })?;
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
            Ok(map)
        }
        other => Err(invalid(port, format!("expected a mapping, got {other}"))),
    }
}
