//! ordinal — proportional-odds regression stack: core containers, models,
//! and errors.
//!
//! Purpose
//! -------
//! Provide a cohesive ordinal regression layer that bundles validated data /
//! parameter types, the proportional-odds model with its analytic penalized
//! likelihood, and shared error types under a single namespace. This is the
//! surface most consumers should depend on.
//!
//! Key behaviors
//! -------------
//! - Collect core building blocks in [`core`]: training-data containers,
//!   order-preserving label canonicalization, fitted parameters with the
//!   nearest-center prediction rule, estimation options, and validation.
//! - Expose the user-facing model API in [`models`] via
//!   [`ProportionalOddsModel`]: bounded MLE over the joint
//!   `[weights | latent gaps]` vector, prediction, and fit diagnostics.
//! - Centralize ordinal-specific error types in [`errors`] (`OrdinalError`
//!   and the `OrdinalResult` alias) so callers see a uniform error surface.
//! - Re-export the everyday types directly from this module and via
//!   [`prelude`] for ergonomic imports in downstream crates.
//!
//! Invariants & assumptions
//! ------------------------
//! - Training data are carried in validated [`OrdinalData`] instances:
//!   finite features, aligned shapes, and at least two distinct labels, with
//!   canonical codes in `[0, k-1]` preserving rank order.
//! - Joint optimizer vectors have length `d + k` and finite entries; the
//!   threshold reparameterization (prefix sums of the latent gaps) makes
//!   fitted thresholds non-decreasing by construction, with the box bounds
//!   and barrier keeping the gaps strictly positive during the fit.
//! - Caller-supplied arrays are never mutated; every container owns its
//!   storage.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based throughout; rows are samples, columns are features.
//! - Optimization is performed over `x = [w | z]` with `θ = cumsum(z)`; the
//!   optimizer layer maximizes the penalized log-likelihood `ℓ(x)`.
//! - The stack performs no I/O; the single logging side channel is a `warn!`
//!   when a fit exhausts its iteration budget (best-found parameters are
//!   still returned). Error conditions surface as [`OrdinalResult`].
//!
//! Downstream usage
//! ----------------
//! - Typical end-to-end flow:
//!   1. Construct [`OrdinalData`] from a feature matrix and integer labels.
//!   2. Build an [`OrdinalOptions`] (or start from its `Default`).
//!   3. Construct a model with `ProportionalOddsModel::from_data`.
//!   4. Fit with `model.fit(&data)`.
//!   5. Predict canonical codes with `model.predict(x.view())`, or raw
//!      labels with `model.predict_labels(x.view())`; standalone parameter
//!      sets can predict via [`OrdinalParams::predict`].
//!
//! Testing notes
//! -------------
//! - Unit tests in [`core`] cover container construction, canonicalization,
//!   threshold recovery, band centers, and the prediction rule.
//! - Unit tests in [`models`] cover `LogLikelihood` conformance (`check`,
//!   `value`, `grad` vs. finite differences), fit behavior on separable
//!   data, and the `ModelNotFitted` error paths.
//! - The integration suite exercises full pipelines (fit → predict) over
//!   synthetic generators, relabeling invariance, and the non-convergence
//!   path through the public API.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------
//
// These are the "everyday" types most users need. More specialized items
// (validation helpers, the label map internals) remain under their
// respective submodules.

pub use self::core::{LabelMap, OrdinalData, OrdinalOptions, OrdinalParams};

pub use self::errors::{OrdinalError, OrdinalResult};

pub use self::models::ProportionalOddsModel;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_ordinal::ordinal::prelude::*;
//
// to import the main model surface in a single line.

pub mod prelude {
    pub use super::{
        LabelMap, OrdinalData, OrdinalError, OrdinalOptions, OrdinalParams, OrdinalResult,
        ProportionalOddsModel,
    };
}
