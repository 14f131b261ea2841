//! Configuration for proportional-odds estimation.
//!
//! Purpose
//! -------
//! Collect the configuration knobs for a proportional-odds fit in one place:
//! the optimizer options (tolerances, iteration cap, line search, verbosity)
//! and the numeric constants of the penalized objective. The latter are
//! deliberately explicit configuration rather than hidden module constants,
//! so tests and callers can vary them.
//!
//! Key behaviors
//! -------------
//! - Represent estimation configuration via [`OrdinalOptions`], bundling
//!   [`MLEOptions`] with the ridge weight α, the barrier floor ε, and the
//!   latent gap bounds (floor and guard).
//! - Validate the numeric constants at construction (`ridge` finite and
//!   ≥ 0, floors finite and > 0, guard above the floor) so the objective
//!   and the fit's box constraints can assume sane values.
//!
//! Invariants & assumptions
//! ------------------------
//! - `mle_opts` is assumed to have been validated by its own constructor.
//! - `gap_floor = None` means "use the data-dependent default `1/k`",
//!   resolved at fit time when the class count is known.
//! - `gap_guard` caps the latent gaps from above. A gap of a few dozen
//!   already saturates the band mass below `f64` resolution, so the default
//!   of `1e6` carries no likelihood information; it pins the otherwise
//!   unidentified growth direction of the top threshold so the recursion of
//!   solver iterates cannot run off toward overflow.
//!
//! Conventions
//! -----------
//! - α weighs the ridge penalty `½·α·‖w‖²`; the default `0.0` disables it,
//!   matching the reference behavior, but the math supports any α ≥ 0.
//! - ε floors the latent gaps inside the barrier term `−Σ log(max(z, ε))`
//!   and its gradient, keeping the logarithm defined near the boundary.
//!
//! Downstream usage
//! ----------------
//! - Build an [`OrdinalOptions`] (or start from `Default`) and pass it to
//!   `ProportionalOddsModel::new`; the fit reads all of its fields.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the documented defaults and rejection of invalid
//!   numeric constants; the effect of the constants on the objective is
//!   tested in the model layer and the integration suite.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    ordinal::{
        core::validation::{
            validate_barrier_floor, validate_gap_floor, validate_gap_guard, validate_ridge,
        },
        errors::OrdinalResult,
    },
};

/// Default upper guard for the latent gaps. Far beyond sigmoid saturation,
/// so it never binds a data-identified gap.
pub const DEFAULT_GAP_GUARD: f64 = 1e6;

/// Estimation-time configuration for proportional-odds models.
///
/// Bundles the optimizer configuration with the numeric constants of the
/// penalized objective. Construct via [`OrdinalOptions::new`] or start from
/// [`OrdinalOptions::default`] and override fields.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalOptions {
    /// Bounded L-BFGS optimizer configuration (tolerances, line search,
    /// verbosity, memory).
    pub mle_opts: MLEOptions,
    /// Ridge penalty weight α on the linear weights (≥ 0; 0 disables).
    pub ridge: f64,
    /// Floor ε inside the barrier term and its gradient (> 0).
    pub barrier_floor: f64,
    /// Optional explicit lower bound for the latent gaps `z[1:]`; `None`
    /// resolves to `1/k` at fit time.
    pub gap_floor: Option<f64>,
    /// Upper bound for the latent gaps `z[1:]`, preventing runaway growth
    /// of the top threshold ([`DEFAULT_GAP_GUARD`] by default).
    pub gap_guard: f64,
}

impl OrdinalOptions {
    /// Construct validated estimation options.
    ///
    /// # Rules
    /// - `ridge` must be finite and ≥ 0.
    /// - `barrier_floor` must be finite and > 0.
    /// - `gap_floor`, when provided, must be finite and > 0.
    /// - `gap_guard` must be finite and strictly above the explicit gap
    ///   floor (when `gap_floor` is `None`, the guard is checked against the
    ///   data-dependent `1/k` at fit time).
    ///
    /// # Errors
    /// - [`OrdinalError::InvalidRidge`](crate::ordinal::errors::OrdinalError::InvalidRidge),
    ///   [`OrdinalError::InvalidBarrierFloor`](crate::ordinal::errors::OrdinalError::InvalidBarrierFloor),
    ///   [`OrdinalError::InvalidGapFloor`](crate::ordinal::errors::OrdinalError::InvalidGapFloor),
    ///   or
    ///   [`OrdinalError::InvalidGapGuard`](crate::ordinal::errors::OrdinalError::InvalidGapGuard)
    ///   for out-of-domain constants.
    pub fn new(
        mle_opts: MLEOptions, ridge: f64, barrier_floor: f64, gap_floor: Option<f64>,
        gap_guard: f64,
    ) -> OrdinalResult<Self> {
        validate_ridge(ridge)?;
        validate_barrier_floor(barrier_floor)?;
        if let Some(floor) = gap_floor {
            validate_gap_floor(floor)?;
            validate_gap_guard(gap_guard, floor)?;
        } else {
            validate_gap_guard(gap_guard, 0.0)?;
        }
        Ok(OrdinalOptions { mle_opts, ridge, barrier_floor, gap_floor, gap_guard })
    }
}

impl Default for OrdinalOptions {
    /// Reference-faithful defaults: ridge off, ε = 1e-6, data-dependent gap
    /// floor, wide gap guard, and the default optimizer configuration
    /// (gradient tolerance 1e-6, iteration cap 10 000, More–Thuente line
    /// search, quiet).
    fn default() -> Self {
        OrdinalOptions {
            mle_opts: MLEOptions::default(),
            ridge: 0.0,
            barrier_floor: 1e-6,
            gap_floor: None,
            gap_guard: DEFAULT_GAP_GUARD,
        }
    }
}
