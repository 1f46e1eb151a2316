//! Thermal response (g-function) of a borefield.
//!
//! The response of a borefield to a constant unit heat rate is expressed as a
//! dimensionless g-function: the borehole wall temperature rise after a time
//! `t` of constant extraction `q` per meter is `q / (2π k) · g(t)`.
//!
//! Sizing treats the response as an external collaborator behind the
//! [`ThermalResponse`] trait. [`InfiniteLineSource`] is a self-contained
//! implementation that is adequate for regular fields and long horizons.

mod exp_integral;

use std::{cell::RefCell, convert::Infallible, error::Error as StdError};

use uom::si::{
    f64::{Length, Time},
    time::second,
};

use crate::support::borefield::BoreField;

pub use exp_integral::exp_integral_e1;

/// Evaluates a borefield's g-function at a set of times.
///
/// Implementations may cache results, so they are free to assume repeated
/// calls with the same arguments.
pub trait ThermalResponse {
    type Error: StdError + Send + Sync + 'static;

    /// Returns one g-value per entry of `times`, in the same order.
    ///
    /// `diffusivity` is the ground thermal diffusivity in m²/s.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the response cannot be evaluated for this
    /// field, depth, or set of times.
    fn g_values(
        &self,
        field: &BoreField,
        depth: Length,
        diffusivity: f64,
        times: &[Time],
    ) -> Result<Vec<f64>, Self::Error>;
}

impl<R: ThermalResponse> ThermalResponse for &R {
    type Error = R::Error;

    fn g_values(
        &self,
        field: &BoreField,
        depth: Length,
        diffusivity: f64,
        times: &[Time],
    ) -> Result<Vec<f64>, Self::Error> {
        (**self).g_values(field, depth, diffusivity, times)
    }
}

/// Infinite line source response superposed over every borehole pair.
///
/// Each borehole is a line of infinite length. The field g-function is the
/// average, over all boreholes, of the summed pair responses
/// `½ E₁(d² / 4αt)`, where a borehole paired with itself uses its radius.
/// The result does not depend on depth.
///
/// The most recent request is cached.
#[derive(Debug, Default)]
pub struct InfiniteLineSource {
    cache: RefCell<Option<CachedResponse>>,
}

#[derive(Debug)]
struct CachedResponse {
    field: BoreField,
    diffusivity: f64,
    times: Vec<f64>,
    values: Vec<f64>,
}

impl InfiniteLineSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn evaluate(field: &BoreField, diffusivity: f64, times: &[f64]) -> Vec<f64> {
        let pairs = field.pair_distances();
        #[allow(clippy::cast_precision_loss)]
        let n = field.len() as f64;

        times
            .iter()
            .map(|&t| {
                if t <= 0.0 {
                    return 0.0;
                }
                let sum: f64 = pairs
                    .iter()
                    .map(|&(d, count)| {
                        #[allow(clippy::cast_precision_loss)]
                        let count = count as f64;
                        count * 0.5 * exp_integral_e1(d * d / (4.0 * diffusivity * t))
                    })
                    .sum();
                sum / n
            })
            .collect()
    }
}

impl ThermalResponse for InfiniteLineSource {
    type Error = Infallible;

    fn g_values(
        &self,
        field: &BoreField,
        _depth: Length,
        diffusivity: f64,
        times: &[Time],
    ) -> Result<Vec<f64>, Self::Error> {
        let times: Vec<f64> = times.iter().map(|t| t.get::<second>()).collect();

        if let Some(cached) = self.cache.borrow().as_ref() {
            #[allow(clippy::float_cmp)]
            let hit = cached.diffusivity == diffusivity
                && cached.times == times
                && cached.field == *field;
            if hit {
                return Ok(cached.values.clone());
            }
        }

        let values = Self::evaluate(field, diffusivity, &times);
        *self.cache.borrow_mut() = Some(CachedResponse {
            field: field.clone(),
            diffusivity,
            times,
            values: values.clone(),
        });
        Ok(values)
    }
}
