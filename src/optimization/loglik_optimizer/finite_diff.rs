//! loglik_optimizer::finite_diff — finite-difference gradient fallback.
//!
//! Purpose
//! -------
//! Provide the forward-difference gradient fallback used by the adapter when
//! a `LogLikelihood` implementation has no analytic gradient, together with
//! error capture and post-hoc validation, so the rest of the optimizer does
//! not depend directly on the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - Compute forward-difference gradients with error capture and
//!   post-hoc validation via [`run_fd_diff`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameter vectors and gradients are `ndarray` containers over `f64`
//!   (`Theta`, `Grad`).
//! - Any error raised by the user-supplied objective during finite
//!   differencing is routed into the shared `closure_err` cell and treated as
//!   a hard failure for the gradient computation.
//! - Gradients returned from this module satisfy [`validate_grad`].
//!
//! Conventions
//! -----------
//! - Finite differences are taken with respect to the optimizer-space vector
//!   `Theta`; any reparameterization is handled by higher layers.
//! - Domain errors are surfaced as [`OptError`] via `OptResult`; Argmin's
//!   [`Error`] is confined to the thin boundary where finite-difference
//!   closures are invoked.
//!
//! Downstream usage
//! ----------------
//! - The optimizer adapter calls [`run_fd_diff`] when central differences
//!   fail evaluation or validation and a forward-difference retry is needed.
//! - This module is internal to the optimizer layer.
//!
//! Testing notes
//! -------------
//! - The fallback path is exercised by the adapter's unit tests on a
//!   gradient-less toy objective; the error-capture branch is covered there
//!   implicitly through cost evaluations that cannot fail.
use crate::optimization::loglik_optimizer::{Grad, Theta, validation::validate_grad};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Compute a forward-difference gradient of `func` at `theta`, with error
/// capture.
///
/// The FD closure can't return `Result`, so any error raised by `func` is
/// stored into `closure_err` and the closure returns `NaN`. This helper:
/// - clears `closure_err`,
/// - performs `forward_diff`,
/// - if an error was captured, returns it as `Err`,
/// - validates the resulting gradient,
/// - if validation succeeds, returns the gradient as `Ok(grad)`.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD routine
/// or by validation of the resulting gradient.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
