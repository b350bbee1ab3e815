use thiserror::Error;

/// Top-level error type for path authoring and evaluation.
#[derive(Debug, Error)]
pub enum PathError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by control-point storage.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("control point index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("control point id refers to a deleted point")]
    StaleId,
}

/// Errors related to curve evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to path configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("simplify tolerance {0} must lie in [0, 1)")]
    InvalidTolerance(f64),

    #[error("section sample count {0} must be at least 1")]
    InvalidSampleCount(usize),
}

/// Convenience type alias for results using [`PathError`].
pub type Result<T> = std::result::Result<T, PathError>;
