//! Error types for fleet operations and persistence.

use crate::codec::Format;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why `Fleet::add` refused a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnspecifiedVariant,
    MissingNumber,
    NonFiniteCargoWeight,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnspecifiedVariant => f.write_str("aircraft variant is unspecified"),
            Rejection::MissingNumber => f.write_str("tail number is empty"),
            Rejection::NonFiniteCargoWeight => f.write_str("cargo weight is not a finite number"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FleetError {
    /// Plane violates the fleet admission rule.
    #[error("invalid plane: {0}")]
    InvalidPlane(Rejection),

    /// File missing, unreadable or unwritable.
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted content does not match the expected schema.
    #[error("malformed {format} fleet data: {reason}")]
    MalformedData { format: Format, reason: String },

    /// Weight requested for a plane whose variant has no table entry.
    #[error("plane '{number}' has no resolvable variant")]
    UnresolvedVariant { number: String },

    #[error("failed to encode fleet as {format}: {reason}")]
    Encode { format: Format, reason: String },
}

impl FleetError {
    pub(crate) fn malformed(format: Format, reason: impl Into<String>) -> Self {
        FleetError::MalformedData {
            format,
            reason: reason.into(),
        }
    }
}
