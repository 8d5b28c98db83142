//! Declared and resolved input ports.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TaskError};

use super::value::{parse_value, sanitize_name, DataType, PortValue};

/// One port declaration as it appears in the task definition document.
#[derive(Debug, Clone, Deserialize)]
pub struct PortDeclaration {
    /// The declared port name.
    pub name: String,
    /// The base port type (`"string"` or `"directory"`).
    #[serde(rename = "type")]
    pub base_type: String,
    /// Optional refined data type; inferred from `base_type` when absent.
    #[serde(rename = "dataType")]
    pub data_type: Option<String>,
    /// Optional raw default applied when no value is supplied.
    #[serde(rename = "defaultValue")]
    pub default_value: Option<Value>,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl PortDeclaration {
    /// The effective data type: the declared `dataType` if present, else
    /// `directory` for directory-base ports and `string` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] when the declared `dataType` is not a
    /// supported type.
    pub fn effective_data_type(&self) -> Result<DataType> {
        match &self.data_type {
            Some(spelled) => spelled.parse().map_err(|reason| {
                TaskError::Config(format!("input port {}: {reason}", self.name))
            }),
            None if self.base_type == "directory" => Ok(DataType::Directory),
            None => Ok(DataType::String),
        }
    }
}

/// A resolved input port: declaration metadata plus the final typed value.
///
/// Immutable once constructed; the registry hands out shared references.
#[derive(Debug, Clone)]
pub struct PortDescriptor {
    name: String,
    sanitized: String,
    data_type: DataType,
    description: Option<String>,
    value: Option<PortValue>,
}

impl PortDescriptor {
    /// Resolves a declaration against the raw value chosen by the registry.
    ///
    /// When `raw` is absent the declaration's default is parsed instead;
    /// with neither, the port resolves to no value and typed access fails
    /// later with a message naming the port.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Config`] for an invalid declared data type and
    /// [`TaskError::InvalidValue`] when the value fails to parse.
    pub fn resolve(
        declaration: &PortDeclaration,
        raw: Option<&Value>,
        input_root: &Path,
    ) -> Result<Self> {
        let data_type = declaration.effective_data_type()?;
        let effective = raw.or(declaration.default_value.as_ref());
        let value = effective
            .map(|raw| parse_value(&declaration.name, raw, data_type, input_root))
            .transpose()?;

        Ok(Self {
            name: declaration.name.clone(),
            sanitized: sanitize_name(&declaration.name),
            data_type,
            description: declaration.description.clone(),
            value,
        })
    }

    /// The declared port name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sanitized lookup key.
    #[must_use]
    pub fn sanitized_name(&self) -> &str {
        &self.sanitized
    }

    /// The effective data type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The declared description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The resolved value, if one was supplied or defaulted.
    #[must_use]
    pub fn value(&self) -> Option<&PortValue> {
        self.value.as_ref()
    }
}
