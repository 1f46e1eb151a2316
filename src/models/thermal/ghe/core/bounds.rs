use thiserror::Error;
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::units::TemperatureDifference;

use super::load::{Direction, Directional};

/// Errors in the fluid temperature bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("the minimum fluid temperature must be below the maximum")]
    Inverted,

    #[error("the undisturbed ground temperature lies outside the fluid temperature bounds")]
    GroundOutside,
}

/// Minimum and maximum allowed average fluid temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBounds {
    min: ThermodynamicTemperature,
    max: ThermodynamicTemperature,
}

impl Default for TemperatureBounds {
    /// 0 °C to 16 °C.
    fn default() -> Self {
        Self {
            min: ThermodynamicTemperature::new::<degree_celsius>(0.0),
            max: ThermodynamicTemperature::new::<degree_celsius>(16.0),
        }
    }
}

impl TemperatureBounds {
    /// # Errors
    ///
    /// Returns [`BoundsError::Inverted`] unless `min < max`.
    pub fn new(
        min: ThermodynamicTemperature,
        max: ThermodynamicTemperature,
    ) -> Result<Self, BoundsError> {
        if min < max {
            Ok(Self { min, max })
        } else {
            Err(BoundsError::Inverted)
        }
    }

    #[must_use]
    pub fn min(&self) -> ThermodynamicTemperature {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> ThermodynamicTemperature {
        self.max
    }

    /// Whether `temperature` lies strictly between the bounds.
    #[must_use]
    pub fn contains(&self, temperature: ThermodynamicTemperature) -> bool {
        self.min < temperature && temperature < self.max
    }

    /// Room between the ground and the bound of `direction`, in kelvin.
    ///
    /// Positive when the ground lies on the allowed side of the bound.
    /// How far `ground` lies from each bound, positive when inside.
    #[must_use]
    pub fn margins(&self, ground: ThermodynamicTemperature) -> Directional<TemperatureInterval> {
        Directional {
            extraction: ground.minus(self.min),
            injection: self.max.minus(ground),
        }
    }

    /// Same as [`Self::margins`] for one direction, in kelvin.
    pub(crate) fn margin(&self, direction: Direction, ground_kelvin: f64) -> f64 {
        match direction {
            Direction::Extraction => ground_kelvin - self.min.get::<kelvin>(),
            Direction::Injection => self.max.get::<kelvin>() - ground_kelvin,
        }
    }
}
