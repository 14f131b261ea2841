//! Box constraints for bounded log-likelihood maximization.
//!
//! Purpose
//! -------
//! Provide a small, validated container for per-coordinate box bounds on the
//! optimizer parameter vector θ. The solver backend is unconstrained, so the
//! bounds are applied by clamping: the initial point is projected into the
//! box, every cost/gradient evaluation happens at the clamped point, and the
//! terminal point is projected before it is reported.
//!
//! Key behaviors
//! -------------
//! - Construct [`BoxBounds`] values that enforce per-coordinate sanity
//!   (`lower[i] <= upper[i]`, no NaN entries; ±∞ marks a free side).
//! - Reject invalid configurations via typed errors (`OptError`) instead of
//!   panicking at call sites.
//! - Expose `clamp` / `clamp_in_place` / `contains` helpers that the adapter
//!   and runner use at evaluation and reporting time, and
//!   [`BoxBounds::project_gradient`], which zeroes the gradient components
//!   that point out of the box at active bounds (the standard
//!   gradient-projection treatment, so the solver sees a stationary point
//!   once only infeasible descent remains).
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower.len() == upper.len()` and both match the parameter dimension of
//!   the problem the bounds are attached to (checked in `maximize`).
//! - NaN is never a legal bound; infinite bounds are legal and mean "free".
//! - Objectives that pair these bounds with an interior barrier keep iterates
//!   strictly inside the box, so the clamp rarely activates in practice.
//!
//! Conventions
//! -----------
//! - A coordinate with `(-∞, +∞)` is unconstrained; [`BoxBounds::unbounded`]
//!   builds a fully free box to be tightened with [`BoxBounds::with_lower`].
//!
//! Downstream usage
//! ----------------
//! - Model layers build bounds once per fit (e.g., lower bounds on threshold
//!   gap parameters) and hand them to `maximize`; the optimizer internals
//!   consume them through the adapter and runner only.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction validation (dimension agreement, NaN
//!   rejection, inverted pairs) and clamping behavior for interior, exterior,
//!   and unbounded coordinates.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::types::Theta,
};
use ndarray::Array1;

/// Per-coordinate box bounds for the optimizer parameter vector.
///
/// `lower[i] <= theta[i] <= upper[i]` is enforced by clamping; use
/// `f64::NEG_INFINITY` / `f64::INFINITY` to leave a side open.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBounds {
    /// Lower bounds (−∞ for a free side).
    lower: Array1<f64>,
    /// Upper bounds (+∞ for a free side).
    upper: Array1<f64>,
}

impl BoxBounds {
    /// Construct validated box bounds from lower/upper vectors.
    ///
    /// # Rules
    /// - `lower.len() == upper.len()`.
    /// - No entry may be NaN (infinities are allowed and mean "free side").
    /// - `lower[i] <= upper[i]` for every coordinate.
    ///
    /// # Errors
    /// - [`OptError::BoundsDimMismatch`] if the vectors differ in length.
    /// - [`OptError::InvalidBound`] for NaN entries or inverted pairs, with
    ///   the offending index and pair.
    pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> OptResult<Self> {
        if lower.len() != upper.len() {
            return Err(OptError::BoundsDimMismatch {
                expected: lower.len(),
                found: upper.len(),
            });
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(OptError::InvalidBound {
                    index,
                    lower: lo,
                    upper: hi,
                    reason: "Bounds must not be NaN.",
                });
            }
            if lo > hi {
                return Err(OptError::InvalidBound {
                    index,
                    lower: lo,
                    upper: hi,
                    reason: "Lower bound must not exceed upper bound.",
                });
            }
        }
        Ok(BoxBounds { lower, upper })
    }

    /// Build a fully unconstrained box of dimension `dim`.
    pub fn unbounded(dim: usize) -> Self {
        BoxBounds {
            lower: Array1::from_elem(dim, f64::NEG_INFINITY),
            upper: Array1::from_elem(dim, f64::INFINITY),
        }
    }

    /// Set the lower bound of every coordinate in `range` to `value`.
    ///
    /// Builder-style helper used by model layers to tighten a block of
    /// coordinates (e.g., all threshold gap entries) in one call.
    ///
    /// # Errors
    /// - [`OptError::InvalidBound`] if `value` is NaN or exceeds the current
    ///   upper bound of any coordinate in the range.
    ///
    /// Out-of-range indices are ignored rather than reported; callers are
    /// expected to pass ranges within the box dimension.
    pub fn with_lower(mut self, range: std::ops::Range<usize>, value: f64) -> OptResult<Self> {
        for index in range {
            if index >= self.lower.len() {
                break;
            }
            if value.is_nan() || value > self.upper[index] {
                return Err(OptError::InvalidBound {
                    index,
                    lower: value,
                    upper: self.upper[index],
                    reason: "Lower bound must be non-NaN and not exceed the upper bound.",
                });
            }
            self.lower[index] = value;
        }
        Ok(self)
    }

    /// Set the upper bound of every coordinate in `range` to `value`.
    ///
    /// Mirror of [`BoxBounds::with_lower`] for the upper side.
    ///
    /// # Errors
    /// - [`OptError::InvalidBound`] if `value` is NaN or falls below the
    ///   current lower bound of any coordinate in the range.
    pub fn with_upper(mut self, range: std::ops::Range<usize>, value: f64) -> OptResult<Self> {
        for index in range {
            if index >= self.upper.len() {
                break;
            }
            if value.is_nan() || value < self.lower[index] {
                return Err(OptError::InvalidBound {
                    index,
                    lower: self.lower[index],
                    upper: value,
                    reason: "Upper bound must be non-NaN and not fall below the lower bound.",
                });
            }
            self.upper[index] = value;
        }
        Ok(self)
    }

    /// Number of coordinates covered by the box.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Whether the box covers zero coordinates.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Whether `theta` lies inside the box (inclusive on both sides).
    pub fn contains(&self, theta: &Theta) -> bool {
        theta.len() == self.lower.len()
            && theta
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(&t, (&lo, &hi))| t >= lo && t <= hi)
    }

    /// Project `theta` onto the box, returning a new vector.
    pub fn clamp(&self, theta: &Theta) -> Theta {
        let mut out = theta.clone();
        self.clamp_in_place(&mut out);
        out
    }

    /// Project `theta` onto the box in place.
    pub fn clamp_in_place(&self, theta: &mut Theta) {
        for (index, t) in theta.iter_mut().enumerate() {
            if *t < self.lower[index] {
                *t = self.lower[index];
            } else if *t > self.upper[index] {
                *t = self.upper[index];
            }
        }
    }

    /// Zero the components of a **cost** gradient that point out of the box.
    ///
    /// For a coordinate at (or beyond) its lower bound, a positive cost
    /// derivative asks for a step below the bound; for a coordinate at its
    /// upper bound, a negative derivative asks for a step above it. Both are
    /// infeasible directions, so their components are removed. Feasible
    /// (inward) components are kept, which lets an iterate leave an active
    /// bound when the objective pulls it back inside.
    ///
    /// With this projection applied, the gradient the solver observes
    /// vanishes at a constrained stationary point, so bound-pinned fits
    /// terminate through the ordinary gradient tolerance instead of stalling
    /// in a line search with no feasible descent.
    pub fn project_gradient(&self, theta: &Theta, grad: &mut Theta) {
        for (index, g) in grad.iter_mut().enumerate() {
            if theta[index] <= self.lower[index] && *g > 0.0 {
                *g = 0.0;
            } else if theta[index] >= self.upper[index] && *g < 0.0 {
                *g = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation behavior of `BoxBounds::new` and `with_lower` for valid and
    //   invalid bound configurations.
    // - Clamping behavior for interior, exterior, and unbounded coordinates.
    //
    // They intentionally DO NOT cover:
    // - How bounds interact with the L-BFGS iterates; that is exercised by the
    //   runner and by end-to-end fits in the integration suite.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `BoxBounds::new` accepts a valid configuration, including
    // infinite (free) sides.
    //
    // Given
    // -----
    // - `lower = [-inf, 0.0]`, `upper = [inf, 2.0]`.
    //
    // Expect
    // ------
    // - Construction succeeds and `len` reports the dimension.
    fn boxbounds_new_accepts_valid_bounds() {
        // Arrange
        let lower = array![f64::NEG_INFINITY, 0.0];
        let upper = array![f64::INFINITY, 2.0];

        // Act
        let bounds = BoxBounds::new(lower, upper).expect("valid bounds should construct");

        // Assert
        assert_eq!(bounds.len(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `BoxBounds::new` rejects vectors of different lengths.
    //
    // Given
    // -----
    // - `lower` of length 2 and `upper` of length 3.
    //
    // Expect
    // ------
    // - `Err(OptError::BoundsDimMismatch { expected: 2, found: 3 })`.
    fn boxbounds_new_rejects_dim_mismatch() {
        // Arrange
        let lower = array![0.0, 0.0];
        let upper = array![1.0, 1.0, 1.0];

        // Act
        let err = BoxBounds::new(lower, upper).unwrap_err();

        // Assert
        assert_eq!(err, OptError::BoundsDimMismatch { expected: 2, found: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `BoxBounds::new` rejects NaN entries and inverted pairs.
    //
    // Given
    // -----
    // - One configuration with a NaN lower bound.
    // - One configuration with `lower > upper` at index 1.
    //
    // Expect
    // ------
    // - Both constructions return `Err(OptError::InvalidBound { .. })`.
    fn boxbounds_new_rejects_nan_and_inverted_pairs() {
        // Arrange + Act
        let nan_err = BoxBounds::new(array![f64::NAN], array![1.0]).unwrap_err();
        let inv_err = BoxBounds::new(array![0.0, 2.0], array![1.0, 1.0]).unwrap_err();

        // Assert
        match nan_err {
            OptError::InvalidBound { index: 0, .. } => {}
            other => panic!("expected InvalidBound for NaN, got {other:?}"),
        }
        match inv_err {
            OptError::InvalidBound { index: 1, lower, upper, .. } => {
                assert_eq!(lower, 2.0);
                assert_eq!(upper, 1.0);
            }
            other => panic!("expected InvalidBound for inverted pair, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `with_lower` tightens only the requested range and leaves
    // the rest of the box free.
    //
    // Given
    // -----
    // - An unbounded box of dimension 4 tightened to `lower = 0.25` on `2..4`.
    //
    // Expect
    // ------
    // - Clamping `[-1, -1, -1, 1]` yields `[-1, -1, 0.25, 1]`.
    fn with_lower_tightens_requested_range_only() {
        // Arrange
        let bounds = BoxBounds::unbounded(4)
            .with_lower(2..4, 0.25)
            .expect("finite lower bound below +inf should be accepted");
        let theta = array![-1.0, -1.0, -1.0, 1.0];

        // Act
        let clamped = bounds.clamp(&theta);

        // Assert
        assert_eq!(clamped, array![-1.0, -1.0, 0.25, 1.0]);
        assert!(bounds.contains(&clamped));
        assert!(!bounds.contains(&theta));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `project_gradient` removes only the infeasible components:
    // outward pushes at active bounds are zeroed, inward pulls and interior
    // components are kept.
    //
    // Given
    // -----
    // - Bounds `[0, 0, -inf] .. [1, 1, 1]` and the point `[0.0, 1.0, 0.5]`
    //   (lower-active, upper-active, interior).
    // - Cost gradient `[2.0, -3.0, 4.0]` (outward, outward, interior) and a
    //   second gradient `[-2.0, 3.0, 4.0]` (inward, inward, interior).
    //
    // Expect
    // ------
    // - The first becomes `[0, 0, 4]`; the second is unchanged.
    fn project_gradient_zeroes_outward_components_only() {
        // Arrange
        let bounds = BoxBounds::new(
            array![0.0, 0.0, f64::NEG_INFINITY],
            array![1.0, 1.0, 1.0],
        )
        .expect("valid bounds");
        let theta = array![0.0, 1.0, 0.5];
        let mut outward = array![2.0, -3.0, 4.0];
        let mut inward = array![-2.0, 3.0, 4.0];

        // Act
        bounds.project_gradient(&theta, &mut outward);
        bounds.project_gradient(&theta, &mut inward);

        // Assert
        assert_eq!(outward, array![0.0, 0.0, 4.0]);
        assert_eq!(inward, array![-2.0, 3.0, 4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that clamping an interior point is the identity.
    //
    // Given
    // -----
    // - Bounds `[0, 0] .. [1, 1]` and the interior point `[0.5, 0.75]`.
    //
    // Expect
    // ------
    // - `clamp` returns the point unchanged and `contains` is true.
    fn clamp_is_identity_on_interior_points() {
        // Arrange
        let bounds =
            BoxBounds::new(array![0.0, 0.0], array![1.0, 1.0]).expect("valid bounds");
        let theta = array![0.5, 0.75];

        // Act
        let clamped = bounds.clamp(&theta);

        // Assert
        assert_eq!(clamped, theta);
        assert!(bounds.contains(&theta));
    }
}
