//! Numerical stability utilities.
//!
//! Provides safe implementations of the logistic-family transforms that are
//! prone to overflow/underflow in naïve form. The functions here follow the
//! classic branch-split strategy: evaluate `exp` only at non-positive
//! arguments so the intermediate value can never overflow an `f64`.
//!
//! # Provided items
//! - [`safe_sigmoid(t)`]: stable logistic function, mapping ℝ → (0, 1).
//! - [`sigmoid(t)`]: elementwise [`safe_sigmoid`] over an array view.
//! - [`safe_log_logistic(t)`]: stable version of `ln(1 + exp(-t))`.
//! - [`log_logistic(t)`]: elementwise [`safe_log_logistic`] reduced to a
//!   scalar sum (diagnostic use; not on the gradient-carrying path).
//!
//! # Rationale
//! These transforms are the building blocks of the proportional-odds
//! likelihood: per-sample band masses are differences of sigmoids at the
//! two band boundaries, and the log-logistic is the per-sample negative
//! log-likelihood of the lowest band.
use ndarray::{Array1, ArrayView1};

/// Numerically stable logistic function `σ(t) = 1 / (1 + exp(-t))`.
///
/// Uses a branch split so `exp` is only evaluated at non-positive arguments:
///
/// - For `t > 0`: `1 / (1 + exp(-t))`.
/// - For `t ≤ 0`: `exp(t) / (1 + exp(t))`.
///
/// Both branches keep the exponent ≤ 0, so the computation cannot overflow
/// for any finite `t`. Output lies strictly in `(0, 1)` (it saturates to the
/// nearest representable value for very large `|t|`), and `safe_sigmoid(0.0)`
/// is exactly `0.5`.
///
/// # Parameters
/// - `t`: real input
///
/// # Returns
/// - `σ(t)` as `f64`.
pub fn safe_sigmoid(t: f64) -> f64 {
    if t > 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let exp_t = t.exp();
        exp_t / (1.0 + exp_t)
    }
}

/// Elementwise [`safe_sigmoid`] over a vector.
///
/// Returns an array of the same length with every entry mapped through the
/// stable logistic function.
pub fn sigmoid(t: ArrayView1<f64>) -> Array1<f64> {
    t.mapv(safe_sigmoid)
}

/// Numerically stable logistic loss `ln(1 + exp(-t))`.
///
/// Mirrors the branch split of [`safe_sigmoid`]:
///
/// - For `t > 0`: `ln_1p(exp(-t))`.
/// - For `t ≤ 0`: `-t + ln_1p(exp(t))`.
///
/// # Parameters
/// - `t`: real input
///
/// # Returns
/// - `ln(1 + exp(-t))` as `f64`.
pub fn safe_log_logistic(t: f64) -> f64 {
    if t > 0.0 { (-t).exp().ln_1p() } else { -t + t.exp().ln_1p() }
}

/// Sum of the elementwise logistic loss over a vector.
///
/// Diagnostic helper: `Σ_i ln(1 + exp(-t_i))`, computed stably. Not used on
/// the gradient-carrying path of the ordinal objective.
pub fn log_logistic(t: ArrayView1<f64>) -> f64 {
    t.iter().map(|&v| safe_log_logistic(v)).sum()
}
