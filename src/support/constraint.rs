//! Numeric invariants checked once, at construction.
//!
//! Ground heat exchanger inputs carry physical invariants: conductivities
//! and resistances are strictly positive, and part-load ratios lie in `[0, 1]`. Wrapping a value in [`Constrained<T, C>`] records that the check
//! has already happened, so downstream code can rely on it without re-checking.
//!
//! # Provided constraints
//!
//! - [`StrictlyPositive`]: Greater than zero (conductivity, heat capacity, resistance).
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1` (part-load ratios).
//!
//! Each marker has an associated `new()` constructor, for example
//! `StrictlyPositive::new(2.4e6)`.
//!
//! Custom invariants can be added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A numeric invariant that can be checked on a value.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// The ways a value can violate a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value of type `T` known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use twine_ghe::support::constraint::{Constrained, StrictlyPositive};
///
/// let boreholes = Constrained::<_, StrictlyPositive>::new(120).unwrap();
/// assert_eq!(boreholes.into_inner(), 120);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Unwraps the checked value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
