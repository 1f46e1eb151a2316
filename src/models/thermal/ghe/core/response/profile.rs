use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

/// Time step of a temperature profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// One value per average month of 730 hours.
    #[default]
    Monthly,

    /// One value per hour.
    Hourly,
}

/// An extreme fluid temperature and the time step at which it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extreme {
    pub temperature: ThermodynamicTemperature,
    pub index: usize,
}

/// Borehole wall and fluid temperatures over the simulation period.
///
/// At monthly resolution the peak series add the synthetic peak pulse of each
/// month on top of the monthly average. At hourly resolution the load is
/// already resolved, so both peak series equal the average fluid series.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureProfile {
    resolution: Resolution,
    wall: Vec<f64>,
    fluid: Vec<f64>,
    peak_injection: Vec<f64>,
    peak_extraction: Vec<f64>,
}

impl TemperatureProfile {
    /// Builds a profile from kelvin series of equal length.
    pub(crate) fn new(
        resolution: Resolution,
        wall: Vec<f64>,
        fluid: Vec<f64>,
        peak_injection: Vec<f64>,
        peak_extraction: Vec<f64>,
    ) -> Self {
        debug_assert!(
            wall.len() == fluid.len()
                && fluid.len() == peak_injection.len()
                && fluid.len() == peak_extraction.len()
        );
        Self {
            resolution,
            wall,
            fluid,
            peak_injection,
            peak_extraction,
        }
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fluid.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fluid.is_empty()
    }

    /// Borehole wall temperature at each step.
    #[must_use]
    pub fn wall(&self) -> Vec<ThermodynamicTemperature> {
        to_temperatures(&self.wall)
    }

    /// Average fluid temperature at each step.
    #[must_use]
    pub fn fluid(&self) -> Vec<ThermodynamicTemperature> {
        to_temperatures(&self.fluid)
    }

    /// Fluid temperature during the injection peak of each step.
    #[must_use]
    pub fn peak_injection(&self) -> Vec<ThermodynamicTemperature> {
        to_temperatures(&self.peak_injection)
    }

    /// Fluid temperature during the extraction peak of each step.
    #[must_use]
    pub fn peak_extraction(&self) -> Vec<ThermodynamicTemperature> {
        to_temperatures(&self.peak_extraction)
    }

    /// The highest peak injection temperature, the earliest on ties.
    ///
    /// Returns `None` for an empty profile.
    #[must_use]
    pub fn max_injection(&self) -> Option<Extreme> {
        self.extreme_where(true, |_| true)
    }

    /// The lowest peak extraction temperature, the earliest on ties.
    ///
    /// Returns `None` for an empty profile.
    #[must_use]
    pub fn min_extraction(&self) -> Option<Extreme> {
        self.extreme_where(false, |_| true)
    }

    /// Average fluid temperatures in kelvin.
    pub(crate) fn fluid_kelvin(&self) -> &[f64] {
        &self.fluid
    }

    /// The injection maximum or extraction minimum over the steps accepted
    /// by `filter`.
    pub(crate) fn extreme_where(
        &self,
        injection: bool,
        filter: impl Fn(usize) -> bool,
    ) -> Option<Extreme> {
        let series = if injection {
            &self.peak_injection
        } else {
            &self.peak_extraction
        };

        let mut best: Option<(usize, f64)> = None;
        for (index, &value) in series.iter().enumerate() {
            if !filter(index) {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, current)) if injection => value > current,
                Some((_, current)) => value < current,
            };
            if better {
                best = Some((index, value));
            }
        }

        best.map(|(index, value)| Extreme {
            temperature: ThermodynamicTemperature::new::<kelvin>(value),
            index,
        })
    }
}

fn to_temperatures(values: &[f64]) -> Vec<ThermodynamicTemperature> {
    values
        .iter()
        .map(|&k| ThermodynamicTemperature::new::<kelvin>(k))
        .collect()
}
