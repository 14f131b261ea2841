//! Numerically stable building blocks shared by the optimization stack.
//!
//! Houses the guarded logistic-family transforms used by the
//! proportional-odds likelihood and its gradient. See [`transformations`]
//! for the individual helpers and their stability strategies.

pub mod transformations;

pub mod prelude {
    pub use super::transformations::{log_logistic, safe_log_logistic, safe_sigmoid, sigmoid};
}
