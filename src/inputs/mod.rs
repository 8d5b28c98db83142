//! Typed input-port configuration layer.
//!
//! A task declares its inputs in a JSON task definition
//! (`inputPortDescriptors`). Per-run values arrive either by filesystem
//! convention (directory ports live under `<workPath>/input/<name>`) or
//! through a flat `<workPath>/input/ports.json` value file. This module
//! coerces those raw values into typed [`PortValue`]s and exposes them as a
//! read-only named lookup.

pub mod descriptor;
pub mod registry;
pub mod value;

pub use descriptor::{PortDeclaration, PortDescriptor};
pub use registry::{PortRegistry, ResolveMode};
pub use value::{sanitize_name, DataType, PortValue};
