//! Error types for the birth quality core
//!
//! The age mapping itself never fails; these errors only come out of
//! configuration loading and the binding boundary.

use thiserror::Error;

/// Main error type for the birth quality core
#[derive(Error, Debug)]
pub enum BirthQualityError {
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    #[error("Species not found: {0}")]
    SpeciesNotFound(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Config not initialized. Call init_config() first.")]
    ConfigNotInitialized,
}

impl From<serde_json::Error> for BirthQualityError {
    fn from(err: serde_json::Error) -> Self {
        BirthQualityError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<BirthQualityError> for pyo3::PyErr {
    fn from(err: BirthQualityError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};

        match err {
            BirthQualityError::InvalidCurve(msg) => {
                PyValueError::new_err(format!("Invalid curve: {}", msg))
            }
            BirthQualityError::SpeciesNotFound(def_name) => {
                PyKeyError::new_err(format!("Species not found: {}", def_name))
            }
            BirthQualityError::DeserializationError(msg) => {
                PyValueError::new_err(format!("Deserialization error: {}", msg))
            }
            BirthQualityError::ConfigNotInitialized => PyRuntimeError::new_err(
                "Config not initialized. Call init_config() first.",
            ),
        }
    }
}

/// Result type alias for the birth quality core
pub type Result<T> = std::result::Result<T, BirthQualityError>;
