//! Fitted parameters for proportional-odds models.
//!
//! Purpose
//! -------
//! Provide the **model-space** parameter container [`OrdinalParams`] — the
//! linear weights `w` and the ordered thresholds `θ` — plus the mapping from
//! the **optimizer-space** joint vector `[w | z]` and the nearest-center
//! prediction rule.
//!
//! ## Mapping conventions
//! - The optimizer iterates over `x = [w | z]` with `z.len() = k`.
//! - Thresholds are the cumulative sums `θ[j] = z[0] + … + z[j]`, computed as
//!   a matrix-free prefix sum (the lower-triangular-ones product in the
//!   reference formulation). Whenever `z[1:]` is non-negative — which the fit
//!   guarantees through its box bounds and barrier — `θ` is non-decreasing by
//!   construction, not by post-hoc sorting.
//!
//! ## Prediction rule
//! - Thresholds are sorted and exact duplicates are collapsed into a single
//!   band; band centers are the midpoints of consecutive distinct thresholds
//!   with a `-1` sentinel for the open lowest band.
//! - A row's class is the index of the center nearest to its linear score,
//!   ties broken toward the lowest index. Centers are monotone midpoints of a
//!   partition, so nearest-center matching approximates interval containment.
//!
//! ## Invariants validated by constructors
//! - `w` finite elementwise; `θ` non-empty and finite elementwise.
//! - Ordering of `θ` is **not** validated: fitted parameters are ordered by
//!   construction, and user-supplied thresholds are re-sorted at prediction
//!   time.
use crate::ordinal::{
    core::validation::{
        validate_feature_dim, validate_point, validate_thresholds, validate_weights,
    },
    errors::{OrdinalError, OrdinalResult},
};
use ndarray::{Array1, ArrayView1, ArrayView2, s};

/// Sentinel center for the open lowest band: any score below every threshold
/// is nearer to this center than to the first midpoint.
const LOWEST_BAND_CENTER: f64 = -1.0;

/// Fitted proportional-odds parameters: weights and ordered thresholds.
///
/// Obtained from a fit via [`OrdinalParams::from_point`], or constructed
/// directly from caller-supplied vectors for prediction. See the module docs
/// for the optimizer-space mapping and the prediction rule.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalParams {
    /// Linear combination coefficients, one per feature.
    pub weights: Array1<f64>,
    /// Decision thresholds, one per class; non-decreasing after a fit.
    pub thresholds: Array1<f64>,
}

impl OrdinalParams {
    /// Create validated parameters from explicit weight/threshold vectors.
    ///
    /// Validates finiteness of both vectors and non-emptiness of `θ`; the
    /// threshold order is left to the prediction-time sort.
    ///
    /// # Errors
    /// - [`OrdinalError::NonFiniteWeight`] / [`OrdinalError::NonFiniteThreshold`]
    ///   with the first offending element.
    /// - [`OrdinalError::EmptyThresholds`] for an empty threshold vector.
    pub fn new(weights: Array1<f64>, thresholds: Array1<f64>) -> OrdinalResult<Self> {
        validate_weights(weights.view())?;
        validate_thresholds(thresholds.view())?;
        Ok(OrdinalParams { weights, thresholds })
    }

    /// Recover model-space parameters from a joint optimizer point.
    ///
    /// Splits `point` into `[w | z]` at `n_features` and rebuilds the
    /// thresholds as prefix sums of `z`. This is the inverse of the fit's
    /// reparameterization: the optimizer constrains `z[1:]` to positive
    /// values, so the recovered `θ` is strictly increasing.
    ///
    /// # Errors
    /// - [`OrdinalError::PointLengthMismatch`] /
    ///   [`OrdinalError::NonFinitePoint`] from point validation.
    pub fn from_point(
        point: ArrayView1<f64>, n_features: usize, n_classes: usize,
    ) -> OrdinalResult<Self> {
        validate_point(point, n_features, n_classes)?;
        let weights = point.slice(s![..n_features]).to_owned();
        let mut thresholds = Array1::<f64>::zeros(n_classes);
        let mut running = 0.0;
        for (j, &gap) in point.slice(s![n_features..]).iter().enumerate() {
            running += gap;
            thresholds[j] = running;
        }
        OrdinalParams::new(weights, thresholds)
    }

    /// Number of features `d`.
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Number of classes `k` (one threshold per class).
    pub fn n_classes(&self) -> usize {
        self.thresholds.len()
    }

    /// Band centers for nearest-center classification.
    ///
    /// Sorts the thresholds, collapses exact duplicates into a single band,
    /// and returns `[-1, mid(θ'[0], θ'[1]), …]` over the distinct sorted
    /// thresholds `θ'`. The result has one entry per distinct threshold, so
    /// predicted codes always stay within `[0, k-1]` even for degenerate
    /// (tied-threshold) parameter vectors.
    pub fn band_centers(&self) -> Array1<f64> {
        let mut sorted: Vec<f64> = self.thresholds.to_vec();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup_by(|a, b| a == b);
        let mut centers = Vec::with_capacity(sorted.len());
        centers.push(LOWEST_BAND_CENTER);
        for pair in sorted.windows(2) {
            centers.push(0.5 * (pair[0] + pair[1]));
        }
        Array1::from(centers)
    }

    /// Predict canonical class codes for a feature matrix.
    ///
    /// Computes the linear score `x·w` per row and assigns the index of the
    /// nearest band center, ties broken toward the lowest index (first
    /// occurrence in a left-to-right scan).
    ///
    /// An empty feature matrix yields an empty prediction vector.
    ///
    /// # Errors
    /// - [`OrdinalError::FeatureDimMismatch`] when the column count differs
    ///   from the weight dimension.
    /// - [`OrdinalError::NonFiniteFeature`] with the first non-finite entry.
    pub fn predict(&self, features: ArrayView2<f64>) -> OrdinalResult<Array1<usize>> {
        validate_feature_dim(self.weights.len(), features.ncols())?;
        for ((row, col), &value) in features.indexed_iter() {
            if !value.is_finite() {
                return Err(OrdinalError::NonFiniteFeature { row, col, value });
            }
        }
        let centers = self.band_centers();
        let scores = features.dot(&self.weights);
        Ok(scores.mapv(|score| nearest_center(score, &centers)))
    }
}

/// Index of the center nearest to `score`, first occurrence on ties.
fn nearest_center(score: f64, centers: &Array1<f64>) -> usize {
    let mut best = 0;
    let mut best_dist = (score - centers[0]).abs();
    for (index, &center) in centers.iter().enumerate().skip(1) {
        let dist = (score - center).abs();
        if dist < best_dist {
            best = index;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Prefix-sum threshold recovery in `from_point`.
    // - Band-center construction: sentinel, midpoints, duplicate collapsing.
    // - Nearest-center prediction, including tie breaking and the
    //   stay-in-range property for extreme scores.
    //
    // They intentionally DO NOT cover:
    // - The fit that produces these parameters; that is the model layer's
    //   and the integration suite's job.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `from_point` splits the joint vector at the feature count
    // and rebuilds thresholds as cumulative sums of the latent gaps.
    //
    // Given
    // -----
    // - d = 2, k = 3, point = [0.5, -1.0 | -0.5, 0.4, 0.6].
    //
    // Expect
    // ------
    // - weights = [0.5, -1.0], thresholds = [-0.5, -0.1, 0.5], and the
    //   thresholds are non-decreasing.
    fn from_point_rebuilds_thresholds_by_prefix_sums() {
        // Arrange
        let point = array![0.5, -1.0, -0.5, 0.4, 0.6];

        // Act
        let params = OrdinalParams::from_point(point.view(), 2, 3)
            .expect("valid point should recover parameters");

        // Assert
        assert_eq!(params.weights, array![0.5, -1.0]);
        assert_abs_diff_eq!(params.thresholds[0], -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(params.thresholds[1], -0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(params.thresholds[2], 0.5, epsilon = 1e-12);
        for pair in params.thresholds.to_vec().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the band-center layout: `-1` sentinel first, then midpoints of
    // consecutive distinct sorted thresholds.
    //
    // Given
    // -----
    // - Unsorted thresholds [2.0, 0.0, 4.0] (k = 3).
    //
    // Expect
    // ------
    // - Centers [-1, 1, 3].
    fn band_centers_are_sentinel_plus_midpoints() {
        // Arrange
        let params = OrdinalParams::new(array![1.0], array![2.0, 0.0, 4.0])
            .expect("finite parameters should construct");

        // Act
        let centers = params.band_centers();

        // Assert
        assert_eq!(centers, array![-1.0, 1.0, 3.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that exactly-tied thresholds collapse into a single band, so a
    // degenerate parameter vector still yields in-range codes.
    //
    // Given
    // -----
    // - Thresholds [1.0, 1.0, 3.0] (k = 3, one exact tie).
    //
    // Expect
    // ------
    // - Centers [-1, 2] (two bands) and predictions bounded by 1 < k.
    fn band_centers_collapse_exact_ties() {
        // Arrange
        let params = OrdinalParams::new(array![1.0], array![1.0, 1.0, 3.0])
            .expect("finite parameters should construct");

        // Act
        let centers = params.band_centers();
        let codes = params
            .predict(array![[100.0], [-100.0]].view())
            .expect("prediction should succeed");

        // Assert
        assert_eq!(centers, array![-1.0, 2.0]);
        assert!(codes.iter().all(|&c| c < 3));
        assert_eq!(codes, array![1_usize, 0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify nearest-center classification and the lowest-index tie break.
    //
    // Given
    // -----
    // - Weights [1.0], thresholds [1.0, 3.0] → centers [-1, 2].
    // - Scores at -2 (below everything), 2.4 (upper band), and 0.5
    //   (equidistant from both centers).
    //
    // Expect
    // ------
    // - Codes [0, 1, 0]: the tie at 0.5 resolves to the lower index.
    fn predict_assigns_nearest_center_with_low_tie_break() {
        // Arrange
        let params = OrdinalParams::new(array![1.0], array![1.0, 3.0])
            .expect("finite parameters should construct");
        let features = array![[-2.0], [2.4], [0.5]];

        // Act
        let codes = params.predict(features.view()).expect("prediction should succeed");

        // Assert
        assert_eq!(codes, array![0_usize, 1, 0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the prediction-range property for arbitrarily extreme finite
    // scores: codes never leave [0, k-1].
    //
    // Given
    // -----
    // - k = 4 thresholds and scores at ±1e9.
    //
    // Expect
    // ------
    // - Every code < 4; the extreme negative score maps to band 0 and the
    //   extreme positive score to the top band.
    fn predict_stays_in_range_for_extreme_scores() {
        // Arrange
        let params = OrdinalParams::new(array![1.0], array![-2.0, -1.0, 1.0, 2.0])
            .expect("finite parameters should construct");
        let features = array![[-1e9], [1e9]];

        // Act
        let codes = params.predict(features.view()).expect("prediction should succeed");

        // Assert
        assert!(codes.iter().all(|&c| c < 4));
        assert_eq!(codes[0], 0);
        assert_eq!(codes[1], 3);
    }

    #[test]
    // Purpose
    // -------
    // Ensure prediction rejects a feature matrix whose column count differs
    // from the weight dimension.
    //
    // Given
    // -----
    // - A 2-feature parameter set and a 1-column matrix.
    //
    // Expect
    // ------
    // - `Err(OrdinalError::FeatureDimMismatch { expected: 2, found: 1 })`.
    fn predict_rejects_feature_dim_mismatch() {
        // Arrange
        let params = OrdinalParams::new(array![1.0, -1.0], array![0.0, 1.0])
            .expect("finite parameters should construct");

        // Act
        let err = params.predict(array![[1.0], [2.0]].view()).unwrap_err();

        // Assert
        assert_eq!(err, OrdinalError::FeatureDimMismatch { expected: 2, found: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure constructors reject empty thresholds and non-finite entries.
    //
    // Given
    // -----
    // - An empty threshold vector, then a NaN weight.
    //
    // Expect
    // ------
    // - `EmptyThresholds` and `NonFiniteWeight { index: 0, .. }`.
    fn new_rejects_empty_thresholds_and_non_finite_weights() {
        // Arrange + Act
        let empty = OrdinalParams::new(array![1.0], array![]).unwrap_err();
        let nan = OrdinalParams::new(array![f64::NAN], array![0.0]).unwrap_err();

        // Assert
        assert_eq!(empty, OrdinalError::EmptyThresholds);
        assert!(matches!(nan, OrdinalError::NonFiniteWeight { index: 0, .. }));
    }
}
