//! Table store and interpolation errors.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building, loading or querying tables.
#[derive(Error, Debug)]
pub enum TableError {
    /// Query coordinate outside the tabulated domain. Never clamped.
    #[error("{axis} = {value} is outside the table domain [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Tables are internally inconsistent (ambiguous or flat inverse,
    /// mismatched block seam, degenerate saturation pair).
    #[error("Data integrity fault: {what}")]
    DataIntegrity { what: String },

    /// Shape or ordering problem found while constructing a table.
    #[error("Malformed table: {what}")]
    Malformed { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    pub(crate) fn out_of_range(axis: &'static str, value: f64, domain: (f64, f64)) -> Self {
        TableError::OutOfRange {
            axis,
            value,
            min: domain.0,
            max: domain.1,
        }
    }

    pub(crate) fn malformed(what: impl Into<String>) -> Self {
        TableError::Malformed { what: what.into() }
    }

    pub(crate) fn integrity(what: impl Into<String>) -> Self {
        TableError::DataIntegrity { what: what.into() }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, TableError::OutOfRange { .. })
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, TableError::DataIntegrity { .. })
    }
}
