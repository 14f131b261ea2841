//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers used by the bounded
//! log-likelihood optimizer. These helpers hide Argmin's generic wiring and
//! apply crate-level options (tolerances, memory size) so that higher-level
//! code can request a configured solver without touching Argmin-specific
//! types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente line
//!   search based on the crate-level aliases.
//! - Apply optional gradient and cost-change tolerances from [`MLEOptions`]
//!   via a shared configuration helper.
//! - Leave the initial parameter vector, bounds handling, and maximum
//!   iterations to the runner/executor layer, keeping these builders
//!   side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on the canonical optimizer numeric types [`Theta`],
//!   [`Grad`], and [`Cost`].
//! - The L-BFGS memory (`m`) is either provided via `opts.lbfgs_mem` or
//!   defaults to [`DEFAULT_LBFGS_MEM`].
//! - Any invalid tolerance passed into Argmin's `with_tolerance_grad` /
//!   `with_tolerance_cost` is surfaced as an [`OptError`] via the crate's
//!   `From<Error>` implementation; raw Argmin errors never leak across module
//!   boundaries.
//!
//! Downstream usage
//! ----------------
//! - The high-level entry point calls [`build_optimizer_hager_zhang`] or
//!   [`build_optimizer_more_thuente`] based on the configured `LineSearcher`
//!   in [`MLEOptions`], then hands the solver to the runner together with the
//!   adapted problem, bounds, and initial point.
//! - [`configure_lbfgs`] is the shared wiring function that applies
//!   tolerances; it is generic over the line-search type.
//!
//! Testing notes
//! -------------
//! - Unit tests verify solver construction for both line searches, the
//!   propagation of `lbfgs_mem`, and tolerance application (present and
//!   absent).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct an L-BFGS solver with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// applies any tolerances via [`configure_lbfgs`]. The initial point and
/// iteration cap are runtime concerns applied by the runner.
///
/// # Errors
/// Propagates `OptError` when Argmin rejects a tolerance setting.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct an L-BFGS solver with More–Thuente line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// applies any tolerances via [`configure_lbfgs`]. The initial point and
/// iteration cap are runtime concerns applied by the runner.
///
/// # Errors
/// Propagates `OptError` when Argmin rejects a tolerance setting.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver.
///
/// Generic over the line-search type `L` so both builders (and any future
/// variant) share the same tolerance wiring. When a tolerance is `None`, the
/// corresponding `with_tolerance_*` method is not called and Argmin's default
/// remains in effect. This helper does not touch the initial point, the
/// iteration cap, or the line-search settings.
///
/// # Errors
/// Propagates `OptError` when `with_tolerance_grad` or `with_tolerance_cost`
/// rejects a value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of L-BFGS solvers with Hager–Zhang and
    //   More–Thuente line searches.
    // - Propagation of `lbfgs_mem` (Some vs None) into the builder paths.
    // - Application of gradient and cost tolerances via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior (e.g., `run_lbfgs`), which is tested
    //   in the optimizer runner layer and the integration suite.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that `build_optimizer_hager_zhang` succeeds and uses the crate
    // default L-BFGS memory when `opts.lbfgs_mem` is `None`.
    //
    // Given
    // -----
    // - Valid `Tolerances`.
    // - `MLEOptions` with `line_searcher = HagerZhang` and `lbfgs_mem = None`.
    //
    // Expect
    // ------
    // - `build_optimizer_hager_zhang` returns `Ok(_)` and does not panic.
    fn build_optimizer_hager_zhang_uses_default_memory_when_none() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("MLEOptions should be valid");

        // Act
        let solver = build_optimizer_hager_zhang(&opts);

        // Assert
        assert!(
            solver.is_ok(),
            "Builder should succeed when lbfgs_mem is None and tolerances are valid"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that `build_optimizer_hager_zhang` accepts an explicit L-BFGS
    // memory value and still constructs a solver.
    //
    // Given
    // -----
    // - Valid `Tolerances`.
    // - `MLEOptions` with `line_searcher = HagerZhang` and `lbfgs_mem = Some(11)`.
    //
    // Expect
    // ------
    // - `build_optimizer_hager_zhang` returns `Ok(_)`.
    fn build_optimizer_hager_zhang_respects_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), None, Some(25)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false, Some(11))
            .expect("MLEOptions should be valid");

        // Act
        let solver = build_optimizer_hager_zhang(&opts);

        // Assert
        assert!(solver.is_ok(), "Builder should succeed when lbfgs_mem is explicitly provided");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `build_optimizer_more_thuente` succeeds and uses the crate
    // default L-BFGS memory when `opts.lbfgs_mem` is `None`.
    //
    // Given
    // -----
    // - Valid `Tolerances`.
    // - `MLEOptions` with `line_searcher = MoreThuente` and `lbfgs_mem = None`.
    //
    // Expect
    // ------
    // - `build_optimizer_more_thuente` returns `Ok(_)`.
    fn build_optimizer_more_thuente_uses_default_memory_when_none() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("MLEOptions should be valid");

        // Act
        let solver = build_optimizer_more_thuente(&opts);

        // Assert
        assert!(
            solver.is_ok(),
            "Builder should succeed when lbfgs_mem is None and tolerances are valid"
        );
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `configure_lbfgs` applies tolerances without error when
    // both `tol_grad` and `tol_cost` are present and valid, and succeeds when
    // both are absent (Argmin defaults stay in effect).
    //
    // Given
    // -----
    // - L-BFGS solvers created with `DEFAULT_LBFGS_MEM`.
    // - One `MLEOptions` with finite positive tolerances, one with
    //   `max_iter` only.
    //
    // Expect
    // ------
    // - `configure_lbfgs` returns `Ok(_)` in both cases.
    fn configure_lbfgs_applies_present_and_absent_tolerances() {
        // Arrange
        let with_tols = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
        let without_tols = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(100)).expect("Tolerances should be valid");
        let opts_with = MLEOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("MLEOptions should be valid");
        let bare = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts_without = MLEOptions::new(bare, LineSearcher::MoreThuente, false, None)
            .expect("MLEOptions should be valid");

        // Act
        let configured_with = configure_lbfgs(with_tols, &opts_with);
        let configured_without = configure_lbfgs(without_tols, &opts_without);

        // Assert
        assert!(configured_with.is_ok(), "configure_lbfgs should accept valid tolerances");
        assert!(configured_without.is_ok(), "configure_lbfgs should accept absent tolerances");
    }
}
