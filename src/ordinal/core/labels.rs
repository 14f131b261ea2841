//! Order-preserving label canonicalization for ordinal models.
//!
//! Raw ordinal labels are arbitrary integers (grades, ratings, rounded
//! scores). The model works on canonical codes in `[0, k-1]` where `k` is the
//! number of distinct raw values and the mapping preserves rank order: the
//! i-th smallest distinct raw value maps to code `i`. Ties (repeated raw
//! values) collapse to the same code by construction.
use crate::ordinal::errors::{OrdinalError, OrdinalResult};
use ndarray::{Array1, ArrayView1};

/// Canonical, order-preserving mapping between raw labels and codes.
///
/// Built from the distinct values observed in a label vector. Invariants:
/// - `classes` is strictly increasing,
/// - `classes.len() >= 2` (a single-class fit is degenerate and rejected).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    /// Distinct raw label values, sorted ascending.
    classes: Vec<i64>,
}

impl LabelMap {
    /// Build the canonical mapping from the distinct values in `labels`.
    ///
    /// # Errors
    /// - [`OrdinalError::TooFewClasses`] when fewer than two distinct values
    ///   are observed (including the empty case).
    pub fn from_labels(labels: ArrayView1<i64>) -> OrdinalResult<Self> {
        let mut classes: Vec<i64> = labels.iter().copied().collect();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(OrdinalError::TooFewClasses { found: classes.len() });
        }
        Ok(LabelMap { classes })
    }

    /// Number of distinct classes `k`.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Distinct raw label values, ascending.
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Canonical code of a single raw label.
    ///
    /// # Errors
    /// - [`OrdinalError::UnknownLabel`] when `label` was not observed at
    ///   construction time.
    pub fn code_of(&self, label: i64) -> OrdinalResult<usize> {
        self.classes
            .binary_search(&label)
            .map_err(|_| OrdinalError::UnknownLabel { value: label })
    }

    /// Raw label value of a canonical code, if in range.
    pub fn label_of(&self, code: usize) -> Option<i64> {
        self.classes.get(code).copied()
    }

    /// Encode a full label vector into canonical codes.
    ///
    /// # Errors
    /// - [`OrdinalError::UnknownLabel`] on the first label that was not part
    ///   of the construction set.
    pub fn encode(&self, labels: ArrayView1<i64>) -> OrdinalResult<Array1<usize>> {
        let mut codes = Vec::with_capacity(labels.len());
        for &label in labels.iter() {
            codes.push(self.code_of(label)?);
        }
        Ok(Array1::from(codes))
    }
}
