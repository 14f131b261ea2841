//! rust_ordinal — proportional-odds ordinal regression on an argmin-backed
//! bounded MLE stack.
//!
//! Purpose
//! -------
//! Fit and predict with ordinal (proportional-odds) logistic regression:
//! given a feature matrix and ordered integer labels, jointly estimate a
//! linear weight vector and a monotone set of decision thresholds, then
//! classify new rows into ordered score bands.
//!
//! Key behaviors
//! -------------
//! - Re-export the two public layers as the crate surface:
//!   - [`ordinal`]: validated data containers, label canonicalization,
//!     fitted parameters, and the [`ProportionalOddsModel`](crate::ordinal::ProportionalOddsModel)
//!     itself.
//!   - [`optimization`]: the bounded log-likelihood optimizer (L-BFGS with
//!     box constraints via clamped evaluation), numeric stability helpers,
//!     and the optimizer error surface.
//! - Threshold monotonicity is structural: thresholds are prefix sums of a
//!   latent gap vector whose constrained entries stay positive through box
//!   bounds and a log-barrier, never a post-hoc sort.
//!
//! Conventions
//! -----------
//! - All numeric data are `ndarray` arrays over `f64`; labels are `i64` and
//!   canonical class codes are `usize` values in `[0, k-1]`.
//! - Fallible operations return typed errors (`OrdinalResult`, `OptResult`);
//!   solver non-convergence is a warning, not an error.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::array;
//! use rust_ordinal::ordinal::prelude::*;
//!
//! # fn main() -> Result<(), OrdinalError> {
//! let x = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
//! let y = array![0_i64, 0, 0, 1, 1, 1];
//! let data = OrdinalData::new(x.clone(), y.view())?;
//! let mut model = ProportionalOddsModel::from_data(&data, OrdinalOptions::default())?;
//! model.fit(&data)?;
//! let codes = model.predict(x.view())?;
//! # let _ = codes;
//! # Ok(())
//! # }
//! ```

pub mod optimization;
pub mod ordinal;
