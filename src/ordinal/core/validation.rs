//! Validation helpers for the ordinal regression core.
//!
//! This module centralizes the consistency checks shared by data containers,
//! parameter types, and the model layer:
//!
//! - **Feature checks**: [`validate_features`] enforces non-emptiness and
//!   finite entries; [`validate_sample_alignment`] and
//!   [`validate_feature_dim`] enforce shape agreement.
//! - **Parameter checks**: [`validate_point`] guards the joint optimizer
//!   vector; [`validate_weights`] and [`validate_thresholds`] guard the
//!   recovered model-space parameters.
//! - **Options checks**: [`validate_ridge`], [`validate_barrier_floor`], and
//!   [`validate_gap_floor`] guard the numeric fit constants.
//!
//! All helpers report domain-specific [`OrdinalError`] variants so failures
//! carry the offending index and value.
use crate::ordinal::errors::{OrdinalError, OrdinalResult};
use ndarray::{ArrayView1, ArrayView2};

/// Validate a feature matrix: non-empty in both dimensions, finite entries.
///
/// # Errors
/// - [`OrdinalError::EmptyFeatureMatrix`] for zero rows or zero columns.
/// - [`OrdinalError::NonFiniteFeature`] with the first offending position.
pub fn validate_features(features: ArrayView2<f64>) -> OrdinalResult<()> {
    if features.nrows() == 0 || features.ncols() == 0 {
        return Err(OrdinalError::EmptyFeatureMatrix);
    }
    for ((row, col), &value) in features.indexed_iter() {
        if !value.is_finite() {
            return Err(OrdinalError::NonFiniteFeature { row, col, value });
        }
    }
    Ok(())
}

/// Validate that the feature row count matches the label count.
///
/// # Errors
/// Returns [`OrdinalError::SampleCountMismatch`] on disagreement.
pub fn validate_sample_alignment(rows: usize, labels: usize) -> OrdinalResult<()> {
    if rows != labels {
        return Err(OrdinalError::SampleCountMismatch { rows, labels });
    }
    Ok(())
}

/// Validate a prediction input's column count against the weight dimension.
///
/// # Errors
/// Returns [`OrdinalError::FeatureDimMismatch`] on disagreement.
pub fn validate_feature_dim(expected: usize, found: usize) -> OrdinalResult<()> {
    if expected != found {
        return Err(OrdinalError::FeatureDimMismatch { expected, found });
    }
    Ok(())
}

/// Validate a joint optimizer point `[w | z]` for a (d, k) model.
///
/// Checks:
/// - `point.len() == d + k`
/// - every element is finite
///
/// # Errors
/// - [`OrdinalError::PointLengthMismatch`] on the wrong length.
/// - [`OrdinalError::NonFinitePoint`] with the first offending element.
pub fn validate_point(
    point: ArrayView1<f64>, n_features: usize, n_classes: usize,
) -> OrdinalResult<()> {
    let expected = n_features + n_classes;
    if point.len() != expected {
        return Err(OrdinalError::PointLengthMismatch { expected, actual: point.len() });
    }
    for (index, &value) in point.iter().enumerate() {
        if !value.is_finite() {
            return Err(OrdinalError::NonFinitePoint { index, value });
        }
    }
    Ok(())
}

/// Validate that a weight vector has only finite entries.
///
/// # Errors
/// Returns [`OrdinalError::NonFiniteWeight`] with the first offending element.
pub fn validate_weights(weights: ArrayView1<f64>) -> OrdinalResult<()> {
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() {
            return Err(OrdinalError::NonFiniteWeight { index, value });
        }
    }
    Ok(())
}

/// Validate that a threshold vector is non-empty with finite entries.
///
/// Ordering is **not** checked here: fitted thresholds are non-decreasing by
/// construction, while user-supplied thresholds are re-sorted at prediction
/// time, so both call sites only need finiteness.
///
/// # Errors
/// - [`OrdinalError::EmptyThresholds`] for an empty vector.
/// - [`OrdinalError::NonFiniteThreshold`] with the first offending element.
pub fn validate_thresholds(thresholds: ArrayView1<f64>) -> OrdinalResult<()> {
    if thresholds.is_empty() {
        return Err(OrdinalError::EmptyThresholds);
    }
    for (index, &value) in thresholds.iter().enumerate() {
        if !value.is_finite() {
            return Err(OrdinalError::NonFiniteThreshold { index, value });
        }
    }
    Ok(())
}

/// Validate the ridge penalty weight (finite, >= 0).
///
/// # Errors
/// Returns [`OrdinalError::InvalidRidge`] otherwise.
pub fn validate_ridge(value: f64) -> OrdinalResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(OrdinalError::InvalidRidge { value });
    }
    Ok(())
}

/// Validate the barrier floor ε (finite, > 0).
///
/// # Errors
/// Returns [`OrdinalError::InvalidBarrierFloor`] otherwise.
pub fn validate_barrier_floor(value: f64) -> OrdinalResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OrdinalError::InvalidBarrierFloor { value });
    }
    Ok(())
}

/// Validate an explicit gap floor (finite, > 0).
///
/// # Errors
/// Returns [`OrdinalError::InvalidGapFloor`] otherwise.
pub fn validate_gap_floor(value: f64) -> OrdinalResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OrdinalError::InvalidGapFloor { value });
    }
    Ok(())
}

/// Validate a gap guard against the effective gap floor (finite, > floor).
///
/// # Errors
/// Returns [`OrdinalError::InvalidGapGuard`] otherwise.
pub fn validate_gap_guard(value: f64, floor: f64) -> OrdinalResult<()> {
    if !value.is_finite() || value <= floor {
        return Err(OrdinalError::InvalidGapGuard { value, floor });
    }
    Ok(())
}
