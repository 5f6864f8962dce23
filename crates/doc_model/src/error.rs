//! Error types for document model operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of the z-order a layer move ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    /// The front-most position (last index)
    Front,
    /// The back-most position (index 0)
    Back,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Front => write!(f, "front"),
            Boundary::Back => write!(f, "back"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocModelError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(String),

    #[error("Cannot use '{value}' for attribute '{attribute}': expected {expected}")]
    AttributeCast {
        attribute: String,
        value: String,
        expected: &'static str,
    },

    #[error("Shape '{shape}' has no attribute '{attribute}'")]
    UnknownAttribute { shape: String, attribute: String },

    #[error("Missing attribute '{attribute}' for shape '{shape}'")]
    MissingAttribute { shape: String, attribute: String },

    #[error("Shape '{name}' is already at the {boundary}")]
    AlreadyAtBoundary { name: String, boundary: Boundary },

    #[error("Layer index {index} is out of range for {len} shapes")]
    ArgumentRange { index: usize, len: usize },

    #[error("A shape named '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl DocModelError {
    /// Whether this error is a user-facing warning rather than a failure
    pub fn is_warning(&self) -> bool {
        matches!(self, DocModelError::AlreadyAtBoundary { .. })
    }
}

pub type Result<T> = std::result::Result<T, DocModelError>;
