//! Errors for the ordinal regression stack (data validation, parameter
//! checks, options validation, and optimizer failures).
//!
//! This module defines the model error type, [`OrdinalError`], used across the
//! ordinal regression core and models. It implements `Display`/`Error` and
//! converts from the optimizer-layer [`OptError`].
//!
//! ## Conventions
//! - **Indices are 0-based** (rows, columns, parameter coordinates).
//! - Features must be **finite**; labels are plain integers with at least two
//!   distinct values per fit.
//! - Optimizer/backend errors are normalized to
//!   [`OrdinalError::OptimizationFailed`] with a human-readable status.
use crate::optimization::errors::OptError;

/// Crate-wide result alias for ordinal-model operations that may produce
/// [`OrdinalError`].
pub type OrdinalResult<T> = Result<T, OrdinalError>;

/// Unified error type for ordinal regression modeling.
///
/// Covers input/data validation, label canonicalization, parameter and
/// options checks, and estimation/optimizer failures.
#[derive(Debug, Clone, PartialEq)]
pub enum OrdinalError {
    // ---- Input/data validation ----
    /// Feature matrix has zero rows or zero columns.
    EmptyFeatureMatrix,

    /// Feature matrix row count and label count disagree.
    SampleCountMismatch { rows: usize, labels: usize },

    /// A feature entry is NaN/±inf.
    NonFiniteFeature { row: usize, col: usize, value: f64 },

    /// Fewer than two distinct label values were observed.
    TooFewClasses { found: usize },

    /// A label value is not part of the canonical mapping.
    UnknownLabel { value: i64 },

    // ---- Parameter validation ----
    /// Joint optimizer point has the wrong length (expected d + k).
    PointLengthMismatch { expected: usize, actual: usize },

    /// Joint optimizer point entries must be finite.
    NonFinitePoint { index: usize, value: f64 },

    /// Weight entries must be finite.
    NonFiniteWeight { index: usize, value: f64 },

    /// Threshold entries must be finite.
    NonFiniteThreshold { index: usize, value: f64 },

    /// Threshold vector must be non-empty.
    EmptyThresholds,

    /// Prediction input column count does not match the weight vector.
    FeatureDimMismatch { expected: usize, found: usize },

    // ---- Options validation ----
    /// Ridge penalty weight must be finite and >= 0.
    InvalidRidge { value: f64 },

    /// Barrier floor must be finite and > 0.
    InvalidBarrierFloor { value: f64 },

    /// Gap floor must be finite and > 0 when provided.
    InvalidGapFloor { value: f64 },

    /// Gap guard must be finite and above the effective gap floor.
    InvalidGapGuard { value: f64, floor: f64 },

    // ---- Model shape ----
    /// Model was built for a different number of features than the data.
    ModelFeatureMismatch { expected: usize, found: usize },

    /// Model was built for a different number of classes than the data.
    ModelClassMismatch { expected: usize, found: usize },

    /// A model needs at least one feature and at least two classes.
    InvalidModelShape { n_features: usize, n_classes: usize, reason: &'static str },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,
}

impl std::error::Error for OrdinalError {}

impl std::fmt::Display for OrdinalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            OrdinalError::EmptyFeatureMatrix => {
                write!(f, "Feature matrix is empty.")
            }
            OrdinalError::SampleCountMismatch { rows, labels } => {
                write!(f, "Feature matrix has {rows} rows but {labels} labels were provided.")
            }
            OrdinalError::NonFiniteFeature { row, col, value } => {
                write!(f, "Feature at ({row}, {col}) is non-finite: {value}")
            }
            OrdinalError::TooFewClasses { found } => {
                write!(f, "At least two distinct label values are required; found {found}.")
            }
            OrdinalError::UnknownLabel { value } => {
                write!(f, "Label {value} is not part of the canonical mapping.")
            }

            // ---- Parameter validation ----
            OrdinalError::PointLengthMismatch { expected, actual } => {
                write!(f, "Parameter point length mismatch: expected {expected}, actual {actual}")
            }
            OrdinalError::NonFinitePoint { index, value } => {
                write!(f, "Parameter point at index {index} is non-finite: {value}")
            }
            OrdinalError::NonFiniteWeight { index, value } => {
                write!(f, "Weight at index {index} is non-finite: {value}")
            }
            OrdinalError::NonFiniteThreshold { index, value } => {
                write!(f, "Threshold at index {index} is non-finite: {value}")
            }
            OrdinalError::EmptyThresholds => {
                write!(f, "Threshold vector is empty.")
            }
            OrdinalError::FeatureDimMismatch { expected, found } => {
                write!(f, "Feature dimension mismatch: expected {expected} columns, found {found}")
            }

            // ---- Options validation ----
            OrdinalError::InvalidRidge { value } => {
                write!(f, "Invalid ridge weight: {value}, must be finite and >= 0")
            }
            OrdinalError::InvalidBarrierFloor { value } => {
                write!(f, "Invalid barrier floor: {value}, must be finite and > 0")
            }
            OrdinalError::InvalidGapFloor { value } => {
                write!(f, "Invalid gap floor: {value}, must be finite and > 0")
            }
            OrdinalError::InvalidGapGuard { value, floor } => {
                write!(
                    f,
                    "Invalid gap guard: {value}, must be finite and above the gap floor {floor}"
                )
            }

            // ---- Model shape ----
            OrdinalError::ModelFeatureMismatch { expected, found } => {
                write!(f, "Model expects {expected} features, data has {found}.")
            }
            OrdinalError::ModelClassMismatch { expected, found } => {
                write!(f, "Model expects {expected} classes, data has {found}.")
            }
            OrdinalError::InvalidModelShape { n_features, n_classes, reason } => {
                write!(
                    f,
                    "Invalid model shape ({n_features} features, {n_classes} classes): {reason}"
                )
            }

            // ---- Estimation / optimizer ----
            OrdinalError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }
            OrdinalError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet.")
            }
        }
    }
}

impl From<OptError> for OrdinalError {
    fn from(err: OptError) -> Self {
        OrdinalError::OptimizationFailed { status: err.to_string() }
    }
}
