//! Problem formulation for the threshold search.

use std::convert::Infallible;

use twine_core::EquationProblem;
use twine_core::Model;
use uom::si::{f64::Power, power::watt, thermodynamic_temperature::kelvin};

use crate::{
    models::thermal::ghe::core::{
        bounds::TemperatureBounds,
        load::{Direction, Directional},
        response::TemperatureProfile,
    },
    support::{borefield::ResistanceModel, response::ThermalResponse},
};

use super::{FieldCheck, GroundSide, LoadSplit, OptimiseError};

/// Model adapter for one direction's threshold.
///
/// The threshold of the other direction stays fixed while this one is
/// searched. Calling the model splits the load, converts the served part to
/// ground-side loads and returns the field's temperatures.
pub(super) struct ThresholdModel<'a, 'e, R, B> {
    check: &'a FieldCheck<'a, 'e, R, B>,
    split: &'a LoadSplit,
    ground_side: &'a GroundSide,
    direction: Direction,
    thresholds: Directional<f64>,
}

impl<'a, 'e, R, B> ThresholdModel<'a, 'e, R, B> {
    pub(super) fn new(
        check: &'a FieldCheck<'a, 'e, R, B>,
        split: &'a LoadSplit,
        ground_side: &'a GroundSide,
        direction: Direction,
        thresholds: Directional<f64>,
    ) -> Self {
        Self {
            check,
            split,
            ground_side,
            direction,
            thresholds,
        }
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }
}

impl<R: ThermalResponse, B: ResistanceModel> Model for ThresholdModel<'_, '_, R, B> {
    type Input = Power;
    type Output = TemperatureProfile;
    type Error = OptimiseError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut thresholds = self.thresholds;
        *thresholds.get_mut(self.direction) = input.get::<watt>();

        let served = self.split.served(thresholds);
        let secondary = self.ground_side.secondary(&served)?;
        Ok(self.check.profile(&secondary)?)
    }
}

/// Equation problem for one direction's threshold.
///
/// The residual is how far the extreme fluid temperature in the searched
/// direction lies beyond its bound, in kelvin. It grows with the threshold.
pub(super) struct ThresholdProblem {
    direction: Direction,
    bounds: TemperatureBounds,
}

impl ThresholdProblem {
    pub(super) fn new(direction: Direction, bounds: TemperatureBounds) -> Self {
        Self { direction, bounds }
    }

    pub(super) fn residual(&self, profile: &TemperatureProfile) -> f64 {
        match self.direction {
            Direction::Injection => profile.max_injection().map_or(f64::NEG_INFINITY, |max| {
                max.temperature.get::<kelvin>() - self.bounds.max().get::<kelvin>()
            }),
            Direction::Extraction => profile.min_extraction().map_or(f64::NEG_INFINITY, |min| {
                self.bounds.min().get::<kelvin>() - min.temperature.get::<kelvin>()
            }),
        }
    }
}

impl EquationProblem<1> for ThresholdProblem {
    type Input = Power;
    type Output = TemperatureProfile;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Power::new::<watt>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([self.residual(output)])
    }
}
