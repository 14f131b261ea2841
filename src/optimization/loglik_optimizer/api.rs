//! High-level entry point for maximizing a user-provided `LogLikelihood`
//! under optional box constraints.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)` at
//! bounds-clamped points), and delegates the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        bounds::BoxBounds,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
        validation::validate_bounds_dim,
    },
};

/// Maximize a log-likelihood `ℓ(θ)` with L-BFGS under optional box bounds.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - When `bounds` is provided, validates its dimension against `theta0` and
///   projects `theta0` into the box before the first iteration.
/// - Wraps `(f, data, bounds)` in an `ArgMinAdapter` that exposes a
///   *minimization* problem `c(θ) = -ℓ(θ)` to `argmin`, evaluating at the
///   clamped point whenever an iterate leaves the box.
/// - Builds an L-BFGS solver with either **Hager–Zhang** or **More–Thuente**
///   line search based on `opts.line_searcher`.
/// - Calls `run_lbfgs`, which configures the executor (initial params,
///   max iters, optional observers), projects the terminal point, and returns
///   an `OptimOutcome`.
///
/// # Parameters
/// - `f`: Your model implementing [`LogLikelihood`].
/// - `theta0`: Initial parameter vector (consumed).
/// - `bounds`: Optional per-coordinate box constraints; `None` runs fully
///   unconstrained.
/// - `data`: Model data passed through to `value`/`grad`.
/// - `opts`: Optimizer options (tolerances, line search choice, verbosity, etc.).
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Returns a bounds-dimension error when `bounds` does not match `theta0`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
///
/// # Returns
/// An [`OptimOutcome`] containing `theta_hat`, best value `ℓ(θ̂)`, the
/// convergence flag (tolerance exits only; iteration-cap exits report
/// `false` with parameters still present), termination status, iteration
/// counts, function-evaluation counts, and optionally the gradient norm.
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, bounds: Option<&BoxBounds>, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let theta0 = match bounds {
        Some(b) => {
            validate_bounds_dim(b, theta0.len())?;
            b.clamp(&theta0)
        }
        None => theta0,
    };
    let problem = ArgMinAdapter::new(f, data, bounds);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
