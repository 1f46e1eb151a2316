use thiserror::Error;
use uom::si::{
    energy::kilowatt_hour,
    f64::{Energy, Length, Power, ThermalConductivity, ThermodynamicTemperature, Time},
    length::meter,
    power::{kilowatt, watt},
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    borefield::{BoreField, BoreholeResistance},
    ground::{GroundProperties, GroundTemperature},
    response::ThermalResponse,
    units::{linear_thermal_resistance, volumetric_heat_capacity},
};

use super::{
    bounds::TemperatureBounds,
    load::{HOURS_PER_YEAR, HourlyLoad, MONTH_HOURS, MONTHS, MonthlyLoad, month_of_hour},
};

const PEAK_HEATING: [f64; MONTHS] = [
    160.0, 142.0, 102.0, 55.0, 0.0, 0.0, 0.0, 0.0, 40.4, 85.0, 119.0, 136.0,
];
const PEAK_COOLING: [f64; MONTHS] = [
    0.0, 0.0, 34.0, 69.0, 133.0, 187.0, 213.0, 240.0, 160.0, 37.0, 0.0, 0.0,
];
const HEATING_SHARE: [f64; MONTHS] = [
    0.155, 0.148, 0.125, 0.099, 0.064, 0.0, 0.0, 0.0, 0.061, 0.087, 0.117, 0.144,
];
const COOLING_SHARE: [f64; MONTHS] = [
    0.025, 0.05, 0.05, 0.05, 0.075, 0.1, 0.2, 0.2, 0.1, 0.075, 0.05, 0.025,
];

/// 300 MWh of heating and 160 MWh of cooling a year, with the monthly peaks
/// of a mid-size office building.
pub(crate) fn reference_monthly_load() -> MonthlyLoad {
    let energy = |annual: f64, share: [f64; MONTHS]| {
        share.map(|s| Energy::new::<kilowatt_hour>(annual * s))
    };
    MonthlyLoad::new(
        &energy(300_000.0, HEATING_SHARE),
        &energy(160_000.0, COOLING_SHARE),
        &PEAK_HEATING.map(Power::new::<kilowatt>),
        &PEAK_COOLING.map(Power::new::<kilowatt>),
    )
    .unwrap()
}

/// Scales the heating and cooling baseloads and peaks of a monthly load.
pub(crate) fn scaled(
    load: &MonthlyLoad,
    baseload_heating: f64,
    baseload_cooling: f64,
    peak_heating: f64,
    peak_cooling: f64,
) -> MonthlyLoad {
    MonthlyLoad::new(
        &load.baseload_heating().map(|e| e * baseload_heating),
        &load.baseload_cooling().map(|e| e * baseload_cooling),
        &load.peak_heating().map(|p| p * peak_heating),
        &load.peak_cooling().map(|p| p * peak_cooling),
    )
    .unwrap()
}

/// Spreads each month's energy evenly over the hours of that month.
pub(crate) fn flat_hourly_from_monthly(load: &MonthlyLoad) -> HourlyLoad {
    let spread = |energy: &[Energy; MONTHS]| -> Vec<Power> {
        (0..HOURS_PER_YEAR)
            .map(|h| {
                let month = month_of_hour(h);
                #[allow(clippy::cast_precision_loss)]
                let hours = MONTH_HOURS[month] as f64;
                Power::new::<watt>(energy[month].get::<kilowatt_hour>() * 1000.0 / hours)
            })
            .collect()
    };
    HourlyLoad::new(
        spread(load.baseload_heating()),
        spread(load.baseload_cooling()),
    )
    .unwrap()
}

/// A 10 × 12 rectangle with 6 m spacing.
pub(crate) fn reference_field() -> BoreField {
    BoreField::rectangle(
        10,
        12,
        Length::new::<meter>(6.0),
        Length::new::<meter>(6.0),
        Length::new::<meter>(0.075),
    )
    .unwrap()
}

pub(crate) fn reference_ground() -> GroundProperties {
    GroundProperties::new(
        ThermalConductivity::new::<watt_per_meter_kelvin>(3.0),
        volumetric_heat_capacity(2.4e6),
        GroundTemperature::Constant(ThermodynamicTemperature::new::<degree_celsius>(10.0)),
    )
    .unwrap()
}

pub(crate) fn reference_resistance() -> BoreholeResistance {
    BoreholeResistance::new(linear_thermal_resistance(0.2)).unwrap()
}

/// Fluid between 0 °C and 16 °C.
pub(crate) fn reference_bounds() -> TemperatureBounds {
    TemperatureBounds::new(
        ThermodynamicTemperature::new::<degree_celsius>(0.0),
        ThermodynamicTemperature::new::<degree_celsius>(16.0),
    )
    .unwrap()
}

#[derive(Debug, Error)]
#[error("response unavailable")]
pub(crate) struct ResponseUnavailable;

/// A response that always fails.
pub(crate) struct FailingResponse;

impl ThermalResponse for FailingResponse {
    type Error = ResponseUnavailable;

    fn g_values(
        &self,
        _field: &BoreField,
        _depth: Length,
        _diffusivity: f64,
        _times: &[Time],
    ) -> Result<Vec<f64>, Self::Error> {
        Err(ResponseUnavailable)
    }
}
