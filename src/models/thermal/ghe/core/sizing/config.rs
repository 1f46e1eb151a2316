use uom::si::{
    f64::{Length, TemperatureInterval, Time},
    length::meter,
    temperature_interval::kelvin as delta_kelvin,
    time::hour,
};

use crate::models::thermal::ghe::core::quadrant::Quadrant;

use super::SizingLevel;

/// Configuration for depth sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingConfig {
    /// Sizing level, or `None` to pick one from the load resolution:
    /// [`SizingLevel::Level2`] for monthly data and [`SizingLevel::Level4`]
    /// for hourly data.
    pub level: Option<SizingLevel>,

    /// Evaluate only this quadrant instead of selecting one automatically.
    pub quadrant: Option<Quadrant>,

    /// Depth at which iteration starts.
    pub initial_depth: Length,

    /// Maximum iterations per direction.
    pub max_iters: usize,

    /// Stop when the extreme fluid temperature is this close to its bound.
    pub temperature_tol: TemperatureInterval,

    /// Stop when successive depths differ by less than this.
    pub depth_tol: Length,

    /// Fail once the required depth exceeds this.
    pub max_depth: Length,

    /// Duration of the synthetic peak pulse in monthly evaluations.
    pub peak_duration: Time,

    /// Number of successive alternating, non-shrinking depth steps treated
    /// as oscillation.
    pub oscillation_window: usize,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            level: None,
            quadrant: None,
            initial_depth: Length::new::<meter>(100.0),
            max_iters: 40,
            temperature_tol: TemperatureInterval::new::<delta_kelvin>(0.01),
            depth_tol: Length::new::<meter>(0.01),
            max_depth: Length::new::<meter>(500.0),
            peak_duration: Time::new::<hour>(6.0),
            oscillation_window: 4,
        }
    }
}
