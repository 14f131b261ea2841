//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a *minimization*
//! problem by defining the cost as `c(θ) = -ℓ(θ)`. Analytic gradients (if
//! provided by the user) are negated accordingly. If a gradient is not
//! provided, we finite-difference the **cost** closure, so no sign flip is
//! needed in that branch.
//!
//! Box constraints are applied here: when bounds are attached, every cost and
//! gradient evaluation happens at the bounds-clamped point, so the solver
//! never observes the objective outside the feasible box. On top of the
//! clamp, the cost gradient is passed through
//! [`BoxBounds::project_gradient`]: components pointing out of the box at an
//! active bound are zeroed, so a bound-pinned optimum presents a vanishing
//! gradient and the run terminates through the ordinary tolerance instead of
//! stalling in a line search with no feasible descent.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        bounds::BoxBounds,
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood) at the
///   bounds-clamped point.
/// - `Gradient::gradient` returns:
///   - `-∇ℓ(θ)` if the user provides an analytic gradient, or
///   - a finite-difference gradient of the cost (no sign flip needed).
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
    pub bounds: Option<&'a BoxBounds>,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)` at the clamped point.
    ///
    /// - Projects `θ` into the box when bounds are attached.
    /// - Calls the user's `value(θ, data)` and checks the result is finite.
    /// - Returns `Error(NonFiniteCost)` if the value is not finite.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user's `value` via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = match self.bounds {
            Some(bounds) if !bounds.contains(theta) => {
                self.f.value(&bounds.clamp(theta), self.data)?
            }
            _ => self.f.value(theta, self.data)?,
        };
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at the clamped `θ`.
    ///
    /// Behavior:
    /// - Projects `θ` into the box when bounds are attached; the resulting
    ///   cost gradient then has its infeasible components removed via
    ///   [`BoxBounds::project_gradient`].
    /// - If the user implements `grad(θ, data)`, we validate it and return
    ///   `-grad` (because the cost is `-ℓ`).
    /// - Otherwise, we compute a finite-difference gradient of the **cost**:
    ///   - Try *central* differences first.
    ///   - If any evaluation of the `cost` closure failed (captured via
    ///     `closure_err`), retry with *forward* differences.
    ///   - Validate the FD gradient; if it fails (e.g., non-finite), retry once
    ///     with *forward* differences and validate again.
    ///
    /// Implementation notes:
    /// - The FD closure must return `f64`, so we can't use `?` inside it; we capture
    ///   the first error in `closure_err` and return `NaN` from the closure. After
    ///   FD, we turn that captured error back into a real error (or switch to
    ///   forward diff).
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (non-`GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns validation errors if the gradient has wrong dimension or
    ///   non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let clamped;
        let eval_point: &Theta = match self.bounds {
            Some(bounds) if !bounds.contains(theta) => {
                clamped = bounds.clamp(theta);
                &clamped
            }
            _ => theta,
        };
        let dim = eval_point.len();
        let mut cost_grad = match self.f.grad(eval_point, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                -g
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = eval_point.central_diff(&cost_func);
                if closure_err.borrow().is_some() || validate_grad(&fd_grad, dim).is_err() {
                    run_fd_diff(eval_point, &cost_func, &closure_err)?
                } else {
                    fd_grad
                }
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(bounds) = self.bounds {
            bounds.project_gradient(theta, &mut cost_grad);
        }
        Ok(cost_grad)
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood`, its data, and
    /// optional box bounds.
    pub fn new(f: &'a F, data: &'a F::Data, bounds: Option<&'a BoxBounds>) -> Self {
        Self { f, data, bounds }
    }
}
