//! Fluid temperatures from the ground's thermal response.
//!
//! The borehole wall temperature is the undisturbed ground temperature plus
//! the superposed response to every load increment so far. The fluid sits a
//! further `q · Rb / L` above the wall, where `L` is the total borehole
//! length.

mod profile;

pub use profile::{Extreme, Resolution, TemperatureProfile};

use std::f64::consts::PI;

use uom::si::{
    energy::joule,
    f64::{Length, Time},
    length::meter,
    power::watt,
    thermal_conductivity::watt_per_meter_kelvin,
    time::hour,
};

use crate::support::{
    borefield::{BoreField, ResistanceModel},
    convolve::causal_convolve,
    ground::GroundProperties,
    response::ThermalResponse,
};

use super::{
    load::{AVERAGE_MONTH_HOURS, HOURS_PER_YEAR, HourlyLoad, MONTHS, MonthlySummary},
    sizing::SizingError,
};

/// Everything needed to turn loads into fluid temperatures at a given depth.
///
/// Depths are in meters, temperatures in kelvin and loads in watts.
pub(crate) struct ResponseEvaluator<'a, R, B> {
    field: &'a BoreField,
    ground: &'a GroundProperties,
    resistance: &'a B,
    response: &'a R,
    years: usize,
}

impl<'a, R: ThermalResponse, B: ResistanceModel> ResponseEvaluator<'a, R, B> {
    pub(crate) fn new(
        field: &'a BoreField,
        ground: &'a GroundProperties,
        resistance: &'a B,
        response: &'a R,
        years: usize,
    ) -> Self {
        Self {
            field,
            ground,
            resistance,
            response,
            years,
        }
    }

    pub(crate) fn years(&self) -> usize {
        self.years
    }

    /// Undisturbed ground temperature averaged over `depth`.
    pub(crate) fn ground_kelvin(&self, depth: f64) -> f64 {
        self.ground.undisturbed_kelvin(depth)
    }

    /// Total borehole length of the field at `depth`.
    pub(crate) fn total_length(&self, depth: f64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let count = self.field.len() as f64;
        count * depth
    }

    /// Converts a g-value into a wall temperature rise per watt, `1 / (2π k L)`.
    pub(crate) fn response_scale(&self, depth: f64) -> f64 {
        let k = self.ground.conductivity().get::<watt_per_meter_kelvin>();
        1.0 / (2.0 * PI * k * self.total_length(depth))
    }

    /// Fluid-to-wall temperature difference per watt, `Rb / L`.
    pub(crate) fn resistance_scale(&self, depth: f64) -> f64 {
        let rb = self
            .resistance
            .borehole_resistance(Length::new::<meter>(depth))
            .value;
        rb / self.total_length(depth)
    }

    /// Evaluates the g-function at times given in hours.
    ///
    /// # Errors
    ///
    /// Wraps any failure of the response collaborator in
    /// [`SizingError::Response`].
    pub(crate) fn g(&self, depth: f64, hours: &[f64]) -> Result<Vec<f64>, SizingError> {
        let times: Vec<Time> = hours.iter().map(|&h| Time::new::<hour>(h)).collect();
        self.response
            .g_values(
                self.field,
                Length::new::<meter>(depth),
                self.ground.diffusivity(),
                &times,
            )
            .map_err(|error| SizingError::Response(Box::new(error)))
    }

    /// Monthly temperatures over the simulation period.
    ///
    /// Each month applies its average net load for 730 hours. The peak
    /// series add a pulse of `peak_hours` at the month's effective peak.
    pub(crate) fn monthly(
        &self,
        depth: f64,
        summary: &MonthlySummary,
        peak_hours: f64,
    ) -> Result<TemperatureProfile, SizingError> {
        let steps = MONTHS * self.years;

        let mut hours = Vec::with_capacity(steps + 1);
        hours.push(peak_hours);
        #[allow(clippy::cast_precision_loss)]
        hours.extend((1..=steps).map(|i| i as f64 * AVERAGE_MONTH_HOURS));
        let g = self.g(depth, &hours)?;
        let (g_peak, g_monthly) = (g[0], &g[1..]);

        let month_seconds = AVERAGE_MONTH_HOURS * 3600.0;
        let heating = summary.baseload.extraction.map(|e| e.get::<joule>() / month_seconds);
        let cooling = summary.baseload.injection.map(|e| e.get::<joule>() / month_seconds);
        let peak_heating = summary.peak.extraction.map(|p| p.get::<watt>());
        let peak_cooling = summary.peak.injection.map(|p| p.get::<watt>());

        let net: Vec<f64> = (0..steps)
            .map(|i| cooling[i % MONTHS] - heating[i % MONTHS])
            .collect();
        let rise = causal_convolve(&increments(&net), g_monthly);

        let ground = self.ground_kelvin(depth);
        let scale = self.response_scale(depth);
        let rb = self.resistance_scale(depth);

        let mut wall = Vec::with_capacity(steps);
        let mut fluid = Vec::with_capacity(steps);
        let mut injection = Vec::with_capacity(steps);
        let mut extraction = Vec::with_capacity(steps);
        for (i, (&q, &r)) in net.iter().zip(&rise).enumerate() {
            let month = i % MONTHS;
            let tb = ground + r * scale;
            wall.push(tb);
            fluid.push(tb + q * rb);
            injection.push(tb + (peak_cooling[month] - q) * g_peak * scale + peak_cooling[month] * rb);
            extraction.push(tb - (peak_heating[month] + q) * g_peak * scale - peak_heating[month] * rb);
        }

        Ok(TemperatureProfile::new(
            Resolution::Monthly,
            wall,
            fluid,
            injection,
            extraction,
        ))
    }

    /// Hourly temperatures over the simulation period.
    ///
    /// Loads shorter than the simulation period repeat year by year.
    pub(crate) fn hourly(
        &self,
        depth: f64,
        load: &HourlyLoad,
    ) -> Result<TemperatureProfile, SizingError> {
        let steps = HOURS_PER_YEAR * self.years;
        let net = load.net_watts(steps);

        #[allow(clippy::cast_precision_loss)]
        let hours: Vec<f64> = (1..=steps).map(|h| h as f64).collect();
        let g = self.g(depth, &hours)?;
        let rise = causal_convolve(&increments(&net), &g);

        let ground = self.ground_kelvin(depth);
        let scale = self.response_scale(depth);
        let rb = self.resistance_scale(depth);

        let wall: Vec<f64> = rise.iter().map(|r| ground + r * scale).collect();
        let fluid: Vec<f64> = wall.iter().zip(&net).map(|(tb, q)| tb + q * rb).collect();

        Ok(TemperatureProfile::new(
            Resolution::Hourly,
            wall,
            fluid.clone(),
            fluid.clone(),
            fluid,
        ))
    }
}

/// Step changes of a load series, starting from zero.
pub(crate) fn increments(series: &[f64]) -> Vec<f64> {
    let mut previous = 0.0;
    series
        .iter()
        .map(|&value| {
            let step = value - previous;
            previous = value;
            step
        })
        .collect()
}
