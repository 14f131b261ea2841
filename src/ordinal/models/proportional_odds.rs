//! Proportional-odds model: analytic penalized log-likelihood and gradient.
//!
//! This module wires the ordinal regression specification to the
//! `LogLikelihood` trait. The optimizer iterates over the joint vector
//! `x = [w | z]`, where `w` are the linear weights and `z` generates the
//! thresholds as prefix sums `θ = cumsum(z)` — monotone by construction
//! whenever `z[1:]` stays positive.
//!
//! Key ideas:
//! - Per-sample likelihood is the band mass `σ(θ[c] − x·w) − σ(θ[c−1] − x·w)`;
//!   the lowest band is open below, so its lower term is fixed to zero.
//! - The objective adds a ridge penalty `½·α·‖w‖²` and the interior barrier
//!   `−Σ log(max(z[1:], ε))`, which keeps the threshold gaps away from zero.
//!   The optimizer additionally boxes `z[1:]` between the gap floor (default
//!   `1/k`) and the gap guard, so the band masses stay strictly positive
//!   along the whole iterate path and the top threshold — whose growth the
//!   barrier rewards without any data signal once the band mass saturates —
//!   cannot run off toward overflow.
//! - The gradient is assembled per class and pushed through the prefix-sum
//!   reparameterization with suffix sums; no triangular matrix is
//!   materialized.
//!
//! Saturated samples can underflow the band mass to zero; the mass is floored
//! at the smallest positive `f64` before the logarithm so such samples
//! contribute a large finite penalty instead of a non-finite cost.
use crate::{
    optimization::{
        errors::OptResult,
        loglik_optimizer::{BoxBounds, Cost, Grad, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::transformations::safe_sigmoid,
    },
    ordinal::{
        core::{
            data::OrdinalData,
            labels::LabelMap,
            options::OrdinalOptions,
            params::OrdinalParams,
            validation::{validate_gap_guard, validate_point},
        },
        errors::{OrdinalError, OrdinalResult},
    },
};
use log::warn;
use ndarray::{Array1, ArrayView1, ArrayView2, s};

/// Floor applied to the per-sample band mass before the logarithm. Keeps the
/// objective finite when a saturated sample underflows the sigmoid
/// difference.
const MASS_FLOOR: f64 = f64::MIN_POSITIVE;

/// Seed for the first latent entry: places the baseline threshold slightly
/// below zero at the start of the fit.
const BASELINE_SEED: f64 = -0.5;

/// Proportional-odds ordinal regression model.
///
/// Encapsulates the model shape (feature and class counts), the estimation
/// options, and — after fitting — the optimizer outcome, the recovered
/// parameters, and the label mapping of the training data.
///
/// # Notes
/// - The fit operates on a validated [`OrdinalData`]; caller arrays are never
///   mutated and no row permutation is applied.
/// - Implements [`LogLikelihood`], so it plugs directly into the bounded
///   Argmin-based optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionalOddsModel {
    /// Number of features `d`.
    pub n_features: usize,
    /// Number of ordered classes `k`.
    pub n_classes: usize,
    /// Estimation options (optimizer configuration + numeric constants).
    pub options: OrdinalOptions,
    /// Optimizer outcome (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Recovered parameters (populated after `fit`).
    pub fitted_params: Option<OrdinalParams>,
    /// Label mapping of the training data (populated after `fit`).
    pub label_map: Option<LabelMap>,
}

impl ProportionalOddsModel {
    /// Construct a model for `n_features` features and `n_classes` ordered
    /// classes.
    ///
    /// # Errors
    /// - [`OrdinalError::InvalidModelShape`] when `n_features == 0` or
    ///   `n_classes < 2`.
    pub fn new(
        n_features: usize, n_classes: usize, options: OrdinalOptions,
    ) -> OrdinalResult<Self> {
        if n_features == 0 {
            return Err(OrdinalError::InvalidModelShape {
                n_features,
                n_classes,
                reason: "At least one feature is required.",
            });
        }
        if n_classes < 2 {
            return Err(OrdinalError::InvalidModelShape {
                n_features,
                n_classes,
                reason: "At least two ordered classes are required.",
            });
        }
        Ok(ProportionalOddsModel {
            n_features,
            n_classes,
            options,
            results: None,
            fitted_params: None,
            label_map: None,
        })
    }

    /// Construct a model shaped after a validated data set.
    pub fn from_data(data: &OrdinalData, options: OrdinalOptions) -> OrdinalResult<Self> {
        ProportionalOddsModel::new(data.n_features(), data.n_classes(), options)
    }

    /// Fit by bounded maximum likelihood and cache the results.
    ///
    /// ## Steps
    /// 1. Check that the data shape matches the model shape and that the gap
    ///    guard sits above the effective gap floor.
    /// 2. Build the initial point: `w = 0`, `z[0] = -0.5`, `z[1:] = 2/k` —
    ///    spread, strictly increasing starting thresholds.
    /// 3. Build the box: `w` and `z[0]` free, `z[1:]` between the gap floor
    ///    (explicit option or `1/k`) and the gap guard.
    /// 4. Run the bounded L-BFGS via `maximize` with the analytic objective
    ///    and gradient.
    /// 5. On a non-converged exit (iteration cap), emit a warning and keep
    ///    the best-found parameters — non-convergence is not an error.
    /// 6. Recover `(w, θ)` from the terminal point and cache the outcome,
    ///    the parameters, and the data's label mapping.
    ///
    /// ## Errors
    /// - [`OrdinalError::ModelFeatureMismatch`] /
    ///   [`OrdinalError::ModelClassMismatch`] on shape disagreement.
    /// - [`OrdinalError::OptimizationFailed`] when the solver itself fails
    ///   (line-search breakdown, non-finite cost); distinct from the
    ///   non-fatal non-convergence path.
    pub fn fit(&mut self, data: &OrdinalData) -> OrdinalResult<()> {
        if data.n_features() != self.n_features {
            return Err(OrdinalError::ModelFeatureMismatch {
                expected: self.n_features,
                found: data.n_features(),
            });
        }
        if data.n_classes() != self.n_classes {
            return Err(OrdinalError::ModelClassMismatch {
                expected: self.n_classes,
                found: data.n_classes(),
            });
        }

        let d = self.n_features;
        let k = self.n_classes;
        let dim = d + k;
        let mut x0 = Array1::<f64>::zeros(dim);
        x0[d] = BASELINE_SEED;
        let gap_seed = 2.0 / k as f64;
        for entry in x0.slice_mut(s![d + 1..]).iter_mut() {
            *entry = gap_seed;
        }
        let floor = self.gap_floor();
        validate_gap_guard(self.options.gap_guard, floor)?;
        let bounds = BoxBounds::unbounded(dim)
            .with_lower(d + 1..dim, floor)
            .and_then(|b| b.with_upper(d + 1..dim, self.options.gap_guard))
            .map_err(OrdinalError::from)?;

        let outcome = maximize(&*self, x0, Some(&bounds), data, &self.options.mle_opts)
            .map_err(OrdinalError::from)?;
        if !outcome.converged {
            warn!(
                "proportional-odds fit did not converge after {} iterations ({}); \
                 returning best-found parameters",
                outcome.iterations, outcome.status
            );
        }
        let params = OrdinalParams::from_point(outcome.theta_hat.view(), d, k)?;
        self.results = Some(outcome);
        self.fitted_params = Some(params);
        self.label_map = Some(data.labels.clone());
        Ok(())
    }

    /// Predict canonical class codes in `[0, k-1]` for a feature matrix.
    ///
    /// Delegates to the cached [`OrdinalParams`] (threshold sort, band
    /// centers, nearest-center rule).
    ///
    /// # Errors
    /// - [`OrdinalError::ModelNotFitted`] before a successful `fit`.
    /// - Propagates dimension and finiteness errors from the parameters.
    pub fn predict(&self, features: ArrayView2<f64>) -> OrdinalResult<Array1<usize>> {
        let params = self.fitted_params.as_ref().ok_or(OrdinalError::ModelNotFitted)?;
        params.predict(features)
    }

    /// Predict raw label values by decoding the canonical codes through the
    /// training data's label mapping.
    ///
    /// # Errors
    /// - [`OrdinalError::ModelNotFitted`] before a successful `fit`.
    pub fn predict_labels(&self, features: ArrayView2<f64>) -> OrdinalResult<Array1<i64>> {
        let label_map = self.label_map.as_ref().ok_or(OrdinalError::ModelNotFitted)?;
        let codes = self.predict(features)?;
        let mut labels = Array1::<i64>::zeros(codes.len());
        for (slot, &code) in labels.iter_mut().zip(codes.iter()) {
            // Codes index the deduplicated bands, so they are always in range.
            *slot = label_map.label_of(code).ok_or(OrdinalError::ModelNotFitted)?;
        }
        Ok(labels)
    }

    /// Effective lower bound for the latent gaps `z[1:]`.
    fn gap_floor(&self) -> f64 {
        self.options.gap_floor.unwrap_or(1.0 / self.n_classes as f64)
    }

    /// Split a joint point into its weight and latent views.
    fn split_point<'a>(
        &self, point: &'a Theta,
    ) -> (ArrayView1<'a, f64>, ArrayView1<'a, f64>) {
        (point.slice(s![..self.n_features]), point.slice(s![self.n_features..]))
    }
}

impl LogLikelihood for ProportionalOddsModel {
    type Data = OrdinalData;

    /// Penalized log-likelihood `ℓ(x) = -(nll + ridge + barrier)` at the
    /// joint point `x = [w | z]`.
    ///
    /// # Steps
    /// 1. Split `x` and rebuild `θ` by prefix sums.
    /// 2. Per sample: band mass between the sigmoid-transformed boundaries
    ///    (lower term zero for the lowest class), floored, negative log.
    /// 3. Add the ridge penalty on `w` and the barrier on `z[1:]`.
    fn value(&self, point: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let (w, z) = self.split_point(point);
        let thresholds = prefix_sums(z);
        let scores = data.features.dot(&w);
        let mut nll = 0.0;
        for (i, &code) in data.codes.iter().enumerate() {
            let upper = safe_sigmoid(thresholds[code] - scores[i]);
            let lower = if code == 0 {
                0.0
            } else {
                safe_sigmoid(thresholds[code - 1] - scores[i])
            };
            nll -= (upper - lower).max(MASS_FLOOR).ln();
        }
        let ridge = 0.5 * self.options.ridge * w.dot(&w);
        let mut barrier = 0.0;
        for &gap in z.iter().skip(1) {
            barrier -= gap.max(self.options.barrier_floor).ln();
        }
        Ok(-(nll + ridge + barrier))
    }

    /// Validate a joint point: length `d + k`, finite entries.
    fn check(&self, point: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_point(point.view(), self.n_features, self.n_classes)?;
        Ok(())
    }

    /// Analytic gradient `∇ℓ(x)` at the joint point `x = [w | z]`.
    ///
    /// # Steps
    /// 1. Per sample, accumulate the boundary slope ratios
    ///    `σ'(·)/mass` into per-class buckets (upper boundary at class `c`,
    ///    lower boundary at class `c − 1`) and the per-sample w-ratio
    ///    `(σ'(a) − σ'(b))/mass`.
    /// 2. w-block of the objective gradient: `Xᵀ·ratio + α·w`.
    /// 3. z-block: suffix sums over the class buckets (each class's boundary
    ///    terms touch every gap at or below it), minus the barrier gradient
    ///    `1/max(z[1:], ε)` on the constrained entries.
    /// 4. Negate to log-likelihood space.
    fn grad(&self, point: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let d = self.n_features;
        let k = self.n_classes;
        let (w, z) = self.split_point(point);
        let thresholds = prefix_sums(z);
        let scores = data.features.dot(&w);
        let n = data.n_samples();

        let mut ratio = Array1::<f64>::zeros(n);
        let mut upper_acc = Array1::<f64>::zeros(k);
        let mut lower_acc = Array1::<f64>::zeros(k);
        for (i, &code) in data.codes.iter().enumerate() {
            let phi_a = safe_sigmoid(thresholds[code] - scores[i]);
            let phi_b = if code == 0 {
                0.0
            } else {
                safe_sigmoid(thresholds[code - 1] - scores[i])
            };
            let mass = (phi_a - phi_b).max(MASS_FLOOR);
            let slope_a = phi_a * (1.0 - phi_a);
            let slope_b = phi_b * (1.0 - phi_b);
            ratio[i] = (slope_a - slope_b) / mass;
            upper_acc[code] += slope_a / mass;
            if code > 0 {
                lower_acc[code - 1] += slope_b / mass;
            }
        }

        let grad_w = data.features.t().dot(&ratio) + &w.mapv(|v| self.options.ridge * v);

        let mut grad_z = Array1::<f64>::zeros(k);
        let mut upper_tail = 0.0;
        let mut lower_tail = 0.0;
        for j in (0..k).rev() {
            upper_tail += upper_acc[j];
            lower_tail += lower_acc[j];
            grad_z[j] = lower_tail - upper_tail;
            if j > 0 {
                grad_z[j] -= 1.0 / z[j].max(self.options.barrier_floor);
            }
        }

        let mut grad = Array1::<f64>::zeros(d + k);
        grad.slice_mut(s![..d]).assign(&grad_w);
        grad.slice_mut(s![d..]).assign(&grad_z);
        Ok(grad.mapv(|g| -g))
    }
}

/// Thresholds from latent gaps: `θ[j] = z[0] + … + z[j]`.
fn prefix_sums(z: ArrayView1<f64>) -> Array1<f64> {
    let mut thresholds = Array1::<f64>::zeros(z.len());
    let mut running = 0.0;
    for (j, &gap) in z.iter().enumerate() {
        running += gap;
        thresholds[j] = running;
    }
    thresholds
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
    // - `LogLikelihood` conformance: `check` rejection, a hand-computed
    //   objective value, and agreement of the analytic gradient with central
    //   finite differences.
    // - `fit` behavior on a tiny separable data set and the `ModelNotFitted`
    //   error path.
    // - Shape validation between model and data.
    //
    // They intentionally DO NOT cover:
    // - Recoverability on synthetic generators and relabeling invariance;
    //   those live in the integration suite.
    // -------------------------------------------------------------------------

    fn two_class_data() -> OrdinalData {
        let features = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
        let labels = array![0_i64, 0, 0, 1, 1, 1];
        OrdinalData::new(features, labels.view()).expect("valid training data")
    }

    #[test]
    // Purpose
    // -------
    // Verify that `check` rejects a joint point of the wrong length.
    //
    // Given
    // -----
    // - A (d = 1, k = 2) model and a length-2 point (expected 3).
    //
    // Expect
    // ------
    // - `check` returns an error.
    fn check_rejects_wrong_point_length() {
        // Arrange
        let model = ProportionalOddsModel::new(1, 2, OrdinalOptions::default())
            .expect("valid shape");
        let data = two_class_data();

        // Act
        let result = model.check(&array![0.0, 0.0], &data);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    // Purpose
    // -------
    // Verify the objective value against a hand computation on a minimal
    // instance.
    //
    // Given
    // -----
    // - Data X = [[0], [0]], y = [0, 1]; point w = 0, z = [0, 1]
    //   (thresholds [0, 1]); ridge off, barrier on z[1] = 1 contributes 0.
    //
    // Expect
    // ------
    // - ℓ = -( -ln σ(0) - ln(σ(1) - σ(0)) ) ≈ -2.15823.
    fn value_matches_hand_computation() {
        // Arrange
        let features = array![[0.0], [0.0]];
        let labels = array![0_i64, 1];
        let data = OrdinalData::new(features, labels.view()).expect("valid data");
        let model = ProportionalOddsModel::new(1, 2, OrdinalOptions::default())
            .expect("valid shape");
        let point = array![0.0, 0.0, 1.0];

        // Act
        let value = model.value(&point, &data).expect("objective should evaluate");

        // Assert
        assert_abs_diff_eq!(value, -2.15823, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Verify the analytic gradient against central finite differences of the
    // objective at a generic interior point.
    //
    // Given
    // -----
    // - A (d = 2, k = 3) data set with all three classes present and the
    //   point [0.3, -0.2 | -0.4, 0.7, 0.9].
    //
    // Expect
    // ------
    // - Every coordinate of the analytic gradient matches a central
    //   difference with step 1e-6 to within 1e-4.
    fn grad_matches_central_finite_differences() {
        // Arrange
        let features = array![
            [0.5, -1.0],
            [1.5, 0.5],
            [-0.5, 2.0],
            [2.5, 1.0],
            [0.0, -0.5],
            [3.0, 0.0]
        ];
        let labels = array![0_i64, 1, 0, 2, 1, 2];
        let data = OrdinalData::new(features, labels.view()).expect("valid data");
        let model = ProportionalOddsModel::new(2, 3, OrdinalOptions::default())
            .expect("valid shape");
        let point = array![0.3, -0.2, -0.4, 0.7, 0.9];

        // Act
        let analytic = model.grad(&point, &data).expect("gradient should evaluate");

        // Assert
        let step = 1e-6;
        for index in 0..point.len() {
            let mut forward = point.clone();
            let mut backward = point.clone();
            forward[index] += step;
            backward[index] -= step;
            let fd = (model.value(&forward, &data).expect("value at forward point")
                - model.value(&backward, &data).expect("value at backward point"))
                / (2.0 * step);
            assert_abs_diff_eq!(analytic[index], fd, epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that fitting a tiny separable two-class problem yields a
    // positive weight, ordered thresholds, and cached diagnostics.
    //
    // Given
    // -----
    // - X = [[0]..[5]], y = [0, 0, 0, 1, 1, 1] and default options.
    //
    // Expect
    // ------
    // - `fit` succeeds; w[0] > 0; θ non-decreasing; `results` and
    //   `fitted_params` are populated.
    fn fit_separable_two_class_problem() {
        // Arrange
        let data = two_class_data();
        let mut model = ProportionalOddsModel::from_data(&data, OrdinalOptions::default())
            .expect("valid shape");

        // Act
        model.fit(&data).expect("fit should succeed on separable data");

        // Assert
        let params = model.fitted_params.as_ref().expect("parameters cached after fit");
        assert!(params.weights[0] > 0.0, "separation direction should be positive");
        assert!(params.thresholds[0] <= params.thresholds[1]);
        assert!(model.results.is_some());
    }

    #[test]
    // Purpose
    // -------
    // Verify the `ModelNotFitted` error paths of `predict` and
    // `predict_labels`.
    //
    // Given
    // -----
    // - A freshly constructed, unfitted model.
    //
    // Expect
    // ------
    // - Both prediction entry points return `Err(OrdinalError::ModelNotFitted)`.
    fn predict_before_fit_is_an_error() {
        // Arrange
        let model = ProportionalOddsModel::new(1, 2, OrdinalOptions::default())
            .expect("valid shape");
        let features = array![[1.0]];

        // Act + Assert
        assert_eq!(
            model.predict(features.view()).unwrap_err(),
            OrdinalError::ModelNotFitted
        );
        assert_eq!(
            model.predict_labels(features.view()).unwrap_err(),
            OrdinalError::ModelNotFitted
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that `fit` rejects data whose shape disagrees with the model.
    //
    // Given
    // -----
    // - A (d = 2, k = 2) model and one-feature training data.
    //
    // Expect
    // ------
    // - `Err(OrdinalError::ModelFeatureMismatch { expected: 2, found: 1 })`.
    fn fit_rejects_shape_mismatch() {
        // Arrange
        let data = two_class_data();
        let mut model = ProportionalOddsModel::new(2, 2, OrdinalOptions::default())
            .expect("valid shape");

        // Act
        let err = model.fit(&data).unwrap_err();

        // Assert
        assert_eq!(err, OrdinalError::ModelFeatureMismatch { expected: 2, found: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Verify that model construction rejects degenerate shapes.
    //
    // Given
    // -----
    // - Zero features, then a single class.
    //
    // Expect
    // ------
    // - `Err(OrdinalError::InvalidModelShape { .. })` in both cases.
    fn new_rejects_degenerate_shapes() {
        // Arrange + Act
        let no_features = ProportionalOddsModel::new(0, 2, OrdinalOptions::default());
        let one_class = ProportionalOddsModel::new(3, 1, OrdinalOptions::default());

        // Assert
        assert!(matches!(
            no_features.unwrap_err(),
            OrdinalError::InvalidModelShape { n_features: 0, .. }
        ));
        assert!(matches!(
            one_class.unwrap_err(),
            OrdinalError::InvalidModelShape { n_classes: 1, .. }
        ));
    }
}
