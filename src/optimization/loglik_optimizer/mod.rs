//! loglik_optimizer — bounded, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)` under optional per-coordinate box constraints.
//! Callers implement a single trait, [`LogLikelihood`], and invoke
//! [`maximize`] to run L-BFGS with a configurable line search, tolerances,
//! bounds, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`].
//! - Apply box constraints ([`BoxBounds`]) by clamped evaluation: the initial
//!   point is projected into the box, every cost/gradient evaluation happens
//!   at the clamped point, gradient components pointing out of the box at an
//!   active bound are removed, and the terminal point is projected before it
//!   is reported. Bound-pinned optima therefore present a vanishing gradient
//!   and terminate through the ordinary tolerance.
//! - Expose a single, user-facing entrypoint [`maximize`] that:
//!   - validates the initial guess with [`LogLikelihood::check`],
//!   - validates and applies the optional bounds,
//!   - selects an L-BFGS solver via [`builders`] based on
//!     [`traits::LineSearcher`],
//!   - executes the solver via [`run::run_lbfgs`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Provide a robust finite-difference fallback in [`finite_diff`] for
//!   gradients when analytic derivatives are missing, with post-hoc
//!   validation and error capture.
//! - Centralize optimizer configuration ([`Tolerances`], [`MLEOptions`]) and
//!   validation logic ([`validation`]) so downstream code can assume sane,
//!   finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by minimizing
//!   a cost `c(θ) = -ℓ(θ)`; user code must implement `ℓ(θ)` and `∇ℓ(θ)`
//!   (when available), **never** the cost directly.
//! - [`LogLikelihood::value`] and [`LogLikelihood::grad`] must treat invalid
//!   inputs as recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - Vectors use the canonical aliases [`Theta`] and [`Grad`]; all are
//!   assumed finite whenever optimization proceeds.
//! - Configuration types ([`Tolerances`], [`MLEOptions`], [`BoxBounds`]) are
//!   validated on construction and treated as internally consistent by the
//!   solver layer.
//!
//! Conventions
//! -----------
//! - Cost is always `c(θ) = -ℓ(θ)` internally; all user-facing APIs and
//!   diagnostics (including [`OptimOutcome::value`]) are expressed in terms
//!   of the log-likelihood `ℓ`.
//! - Gradients exposed by [`LogLikelihood::grad`] are for the log-likelihood
//!   (`∇ℓ(θ)`); the adapter is responsible for flipping signs to obtain the
//!   cost gradient (`∇c(θ) = -∇ℓ(θ)`).
//! - `OptimOutcome::converged` is `true` only for tolerance/target exits;
//!   iteration-cap exits report `false` while still carrying the best-found
//!   parameters, so callers can warn without aborting.
//! - Errors bubble up as `OptResult<T>` / `OptError`; this module and its
//!   children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Model crates implement [`LogLikelihood`] for their types, then call
//!   [`maximize`] with:
//!   - a model instance `&M`,
//!   - an initial parameter vector [`Theta`],
//!   - optional [`BoxBounds`],
//!   - a data payload `&M::Data`, and
//!   - an [`MLEOptions`] configuration (tolerances, line search, L-BFGS
//!     memory).
//! - Front-ends are expected to interact only with the re-exported surface:
//!   [`maximize`], [`LogLikelihood`], [`MLEOptions`], [`Tolerances`],
//!   [`BoxBounds`], [`OptimOutcome`], plus numeric aliases from [`types`].
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - sign conventions, FD fallback, and clamped evaluation in [`adapter`],
//!   - solver construction and tolerance wiring in [`builders`],
//!   - bounds construction and projection in [`bounds`],
//!   - configuration and outcome invariants in [`traits`],
//!   - end-to-end toy maximization (bounded and unbounded) in [`api`].
//! - Integration tests exercise [`maximize`] implicitly by fitting the
//!   proportional-odds model, verifying tolerance handling, the bounded
//!   region, and [`OptimOutcome`] diagnostics.

pub mod adapter;
pub mod api;
pub mod bounds;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::bounds::BoxBounds;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_ordinal::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::bounds::BoxBounds;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
