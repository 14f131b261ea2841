//! Core building blocks of the ordinal regression stack.
//!
//! Purpose
//! -------
//! Collect the data, parameter, configuration, and validation types the
//! proportional-odds model is assembled from: validated training data
//! ([`OrdinalData`]), order-preserving label canonicalization ([`LabelMap`]),
//! fitted parameters with the prediction rule ([`OrdinalParams`]), estimation
//! options ([`OrdinalOptions`]), and the shared validation helpers.
//!
//! Key behaviors
//! -------------
//! - Fail fast on degenerate input (empty matrices, shape mismatches,
//!   non-finite entries, single-class labels) with typed errors before the
//!   optimizer is ever entered.
//! - Keep caller-supplied arrays read-only: canonicalization copies into
//!   owned storage and no row permutation is applied anywhere in the stack.
//!
//! Downstream usage
//! ----------------
//! - Construct [`OrdinalData`] at the data boundary, configure the fit with
//!   [`OrdinalOptions`], and consume fitted [`OrdinalParams`] for
//!   prediction; the validation helpers are shared with the model layer.

pub mod data;
pub mod labels;
pub mod options;
pub mod params;
pub mod validation;

pub use self::data::OrdinalData;
pub use self::labels::LabelMap;
pub use self::options::OrdinalOptions;
pub use self::params::OrdinalParams;
