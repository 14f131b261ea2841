//! optimization — bounded MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed log-likelihood optimizer with box-constraint support,
//! numerically stable logistic transforms, and a single error/result surface.
//! Callers implement a log-likelihood, choose tolerances and bounds, and
//! obtain fitted parameters and diagnostics without touching backend solver
//! details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)` under
//!   optional per-coordinate box bounds (`loglik_optimizer`), including
//!   configuration of solvers and stopping criteria.
//! - Supply shared numerical primitives (`numerical_stability`) for the
//!   logistic-family transforms the proportional-odds likelihood is built
//!   from.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - The solver iterates in θ-space and assumes inputs are finite once
//!   validation has passed; invalid states are reported as `OptError`, not
//!   panics.
//! - Box constraints are enforced by clamped evaluation, gradient projection
//!   at active bounds, and projection of the terminal point; objectives that
//!   need strict feasibility pair the box with an interior barrier term.
//! - Log-likelihood implementations are expected to treat domain violations
//!   as recoverable errors surfaced through the optimization layer.
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - Parameters and gradients are represented using `ndarray`-based aliases
//!   (`Theta`, `Grad`); any mapping between optimizer θ-space and structured
//!   model parameters (e.g., weights and thresholds) is handled by the model
//!   layer.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors or model-specific error enums.
//! - This module and its submodules avoid I/O; the optional `obs_slog`
//!   observer and the initial-state line under `verbose` are the only
//!   progress channels.
//!
//! Downstream usage
//! ----------------
//! - Model code implements `LogLikelihood` for its types and calls `maximize`
//!   with a parameter guess, optional `BoxBounds`, a data payload, and
//!   `MLEOptions` to obtain an `OptimOutcome` (via `loglik_optimizer`).
//! - The ordinal likelihood and gradient are assembled from the
//!   `numerical_stability` transforms.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`, which forwards the submodule preludes and
//!   the core error types.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns:
//!   - `loglik_optimizer`: solver wiring, tolerance and bounds handling, and
//!     basic MLE behavior on toy models.
//!   - `numerical_stability`: agreement with naïve formulas on safe grids and
//!     well-behaved tails.
//! - Higher-level integration tests exercise end-to-end bounded MLE through
//!   the proportional-odds model, verifying that configuration mistakes,
//!   numerical problems, and backend failures all surface as sensible
//!   `OptError` values and that successful runs produce stable
//!   `OptimOutcome`s.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_ordinal::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
