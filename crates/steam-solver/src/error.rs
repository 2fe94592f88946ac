//! State solver errors.

use steam_core::CoreError;
use steam_tables::TableError;
use thiserror::Error;

use crate::property::PropertyId;

/// Result type for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    /// Table faults pass through untouched.
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Quality supplied outside `[0, 1]`.
    #[error("Quality {quality} is outside [0, 1]")]
    QualityOutOfRange { quality: f64 },

    /// A supplied property disagrees with the state resolved from the
    /// higher-priority pair. `resolved` is `None` when the resolved state has
    /// no such property (quality of a single-phase state).
    #[error("Inconsistent knowns: {property} = {given} but resolved state has {resolved:?}")]
    InconsistentKnowns {
        property: PropertyId,
        given: f64,
        resolved: Option<f64>,
    },

    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SolverError {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SolverError::Table(e) if e.is_out_of_range())
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, SolverError::Table(e) if e.is_data_integrity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_errors_are_transparent() {
        let inner = TableError::DataIntegrity {
            what: "enthalpy column is not strictly monotonic".into(),
        };
        let msg = inner.to_string();
        let err: SolverError = inner.into();
        assert_eq!(err.to_string(), msg);
        assert!(err.is_data_integrity());
        assert!(!err.is_out_of_range());
    }

    #[test]
    fn inconsistent_knowns_names_property() {
        let err = SolverError::InconsistentKnowns {
            property: PropertyId::Enthalpy,
            given: 3000.0,
            resolved: Some(3264.5),
        };
        let msg = err.to_string();
        assert!(msg.contains("enthalpy"));
        assert!(msg.contains("3264.5"));
    }
}
