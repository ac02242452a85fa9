//! Result type alias shared across the workspace.
//!
//! Functions can simply return `Result<T>` and get `SensorError` as the error type.
use crate::error::SensorError;

/// Workspace-wide `Result` alias with `SensorError` as the default error.
pub type Result<T, E = SensorError> = std::result::Result<T, E>;
