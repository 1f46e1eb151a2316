use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, TemperatureInterval, Time},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    time::hour,
};

use crate::models::thermal::ghe::core::response::Resolution;

/// How the share of the load served by the field is limited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptimiseMethod {
    /// Every hour is capped at a power threshold.
    #[default]
    Power,

    /// Every month's energy is capped at the threshold times an average
    /// month, and each hour is scaled by the resulting served fraction.
    Energy,
}

/// Configuration for load optimisation at a fixed depth.
#[derive(Debug, Clone, Copy)]
pub struct OptimiseConfig {
    pub method: OptimiseMethod,

    /// Resolution at which the served load is checked against the bounds.
    pub resolution: Resolution,

    /// Upper limit on the extraction load served in any hour.
    pub max_peak_extraction: Option<Power>,

    /// Upper limit on the injection load served in any hour.
    pub max_peak_injection: Option<Power>,

    /// Peak duration used at monthly resolution.
    pub peak_duration: Time,

    /// Absolute tolerance on the extreme fluid temperature.
    pub temperature_tol: TemperatureInterval,

    /// Absolute tolerance on a threshold.
    pub threshold_tol: Power,

    /// Maximum iteration count for each threshold search.
    pub max_iters: usize,

    /// Maximum number of alternating extraction and injection rounds.
    pub max_rounds: usize,
}

impl Default for OptimiseConfig {
    fn default() -> Self {
        Self {
            method: OptimiseMethod::Power,
            resolution: Resolution::Monthly,
            max_peak_extraction: None,
            max_peak_injection: None,
            peak_duration: Time::new::<hour>(6.0),
            temperature_tol: TemperatureInterval::new::<delta_kelvin>(0.05),
            threshold_tol: Power::new::<watt>(1.0),
            max_iters: 100,
            max_rounds: 10,
        }
    }
}

impl OptimiseConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.threshold_tol.get::<watt>(),
            x_rel_tol: 0.0,
            residual_tol: self.temperature_tol.get::<delta_kelvin>(),
        }
    }
}
