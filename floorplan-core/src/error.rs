//! Error types for floor plan operations.

use thiserror::Error;

/// Result type for floor plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that can occur at the edges of the floor plan core.
///
/// Store mutations never fail; these only surface from validated
/// construction, catalog lookups and JSON parsing.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A room or opening was constructed with a non-positive size.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// No template with the given name or id exists in the catalog.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// No device with the given id exists in the catalog.
    #[error("Device not found: {0}")]
    DeviceNotFound(u32),

    /// No solution package with the given id exists in the catalog.
    #[error("Solution not found: {0}")]
    SolutionNotFound(u32),

    /// Template or scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
