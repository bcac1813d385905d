//! Error types for section capacity computations

use thiserror::Error;

/// Main error type for fiber-section operations
#[derive(Error, Debug)]
pub enum SectionError {
    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Material id {0} not found in section")]
    MaterialNotFound(usize),

    #[error("Section has no fibers")]
    EmptySection,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Sweep produced no usable angle rows: {0}")]
    SweepFailed(String),

    #[error("Load point lies outside the range of the interaction diagram")]
    OutOfRange,

    #[error("Malformed diagram dump: {0}")]
    MalformedDump(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for fiber-section operations
pub type SectionResult<T> = Result<T, SectionError>;
