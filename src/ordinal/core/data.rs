//! Training-data containers for ordinal regression.
//!
//! Purpose
//! -------
//! Provide a small, validated container for (feature matrix, label vector)
//! pairs used by proportional-odds models. This module centralizes input
//! validation for raw training data and owns the label canonicalization step,
//! so downstream likelihood code can assume clean, canonical inputs.
//!
//! Key behaviors
//! -------------
//! - [`OrdinalData`] enforces basic data invariants (non-empty feature
//!   matrix, finite entries, row/label count agreement, at least two distinct
//!   label values).
//! - Raw labels are canonicalized once at construction through [`LabelMap`]
//!   (order-preserving codes in `[0, k-1]`); the raw vector is not retained.
//!
//! Invariants & assumptions
//! ------------------------
//! - Features must be **finite**; no missing-value handling is performed.
//! - `features.nrows() == codes.len()` and every code is `< labels.n_classes()`.
//! - Caller-supplied arrays are read, never mutated: canonicalization copies
//!   into owned storage, and no row permutation is applied (per-class
//!   accumulation in the objective makes a label sort unnecessary).
//!
//! Conventions
//! -----------
//! - Rows are samples, columns are features; indexing is 0-based.
//! - `k = labels.n_classes()` is the number of ordered classes; canonical
//!   codes preserve the rank order of the raw values.
//!
//! Downstream usage
//! ----------------
//! - Construct [`OrdinalData`] at the boundary where raw training data enter
//!   the modeling stack, then pass it to `ProportionalOddsModel::fit`.
//! - Consumers may rely on the invariants above when implementing
//!   likelihoods and gradients.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction behavior (happy path, empty matrix, shape
//!   mismatch, non-finite features, degenerate label sets) and the
//!   canonicalization of the stored codes.
use crate::ordinal::{
    core::{
        labels::LabelMap,
        validation::{validate_features, validate_sample_alignment},
    },
    errors::OrdinalResult,
};
use ndarray::{Array1, Array2, ArrayView1};

/// Validated training data: features plus canonicalized ordinal labels.
///
/// Construction validates the feature matrix, checks shape agreement, and
/// canonicalizes the raw labels through an order-preserving [`LabelMap`].
/// After construction the container is immutable and downstream code can
/// assume every invariant documented on the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalData {
    /// Feature matrix, n_samples × n_features (finite entries).
    pub features: Array2<f64>,
    /// Canonical label codes in `[0, k-1]`, one per row of `features`.
    pub codes: Array1<usize>,
    /// Order-preserving mapping between raw labels and canonical codes.
    pub labels: LabelMap,
}

impl OrdinalData {
    /// Construct validated training data from raw features and labels.
    ///
    /// Validates in order: feature matrix (non-empty, finite), row/label
    /// agreement, then label canonicalization (at least two distinct
    /// values). The raw label vector is consumed into canonical codes; the
    /// caller's arrays are never mutated.
    ///
    /// # Errors
    /// - [`OrdinalError::EmptyFeatureMatrix`](crate::ordinal::errors::OrdinalError::EmptyFeatureMatrix)
    ///   for a matrix with zero rows or columns.
    /// - [`OrdinalError::NonFiniteFeature`](crate::ordinal::errors::OrdinalError::NonFiniteFeature)
    ///   with the first offending position.
    /// - [`OrdinalError::SampleCountMismatch`](crate::ordinal::errors::OrdinalError::SampleCountMismatch)
    ///   when rows and labels disagree.
    /// - [`OrdinalError::TooFewClasses`](crate::ordinal::errors::OrdinalError::TooFewClasses)
    ///   when fewer than two distinct labels are observed.
    pub fn new(features: Array2<f64>, labels: ArrayView1<i64>) -> OrdinalResult<Self> {
        validate_features(features.view())?;
        validate_sample_alignment(features.nrows(), labels.len())?;
        let label_map = LabelMap::from_labels(labels)?;
        let codes = label_map.encode(labels)?;
        Ok(OrdinalData { features, codes, labels: label_map })
    }

    /// Number of samples (rows).
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features (columns).
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Number of distinct ordered classes `k`.
    pub fn n_classes(&self) -> usize {
        self.labels.n_classes()
    }
}
