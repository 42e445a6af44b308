//! Error types for the laminate solver

use thiserror::Error;

/// Main error type for laminate operations
#[derive(Error, Debug)]
pub enum LaminateError {
    #[error(
        "Degenerate material: 1 - v12*v21 = {denominator:e} (E11={e11}, E22={e22}, v12={v12})"
    )]
    DegenerateMaterial {
        e11: f64,
        e22: f64,
        v12: f64,
        denominator: f64,
    },

    #[error("Invalid layup: {0}")]
    InvalidLayup(String),

    #[error("Singular laminate: ABD condition estimate {condition:e} exceeds limit {limit:e}")]
    SingularLaminate { condition: f64, limit: f64 },

    #[error("Ply {ply} out of range - laminate has {count} plies (numbered from 1)")]
    PlyIndexOutOfRange { ply: usize, count: usize },

    #[error("Degenerate laminate: {0}")]
    DegenerateLaminate(String),

    #[error("Material '{0}' not found in catalog")]
    MaterialNotFound(String),

    #[error("Component '{0}' not found in catalog")]
    ComponentNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for laminate operations
pub type LaminateResult<T> = Result<T, LaminateError>;
