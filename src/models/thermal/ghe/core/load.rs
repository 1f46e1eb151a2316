//! Heating and cooling loads at monthly or hourly resolution.
//!
//! Heating loads extract heat from the ground and cooling loads inject it.
//! Monthly data stores four arrays per year: the baseload energy and the peak
//! power for each direction. Hourly data stores one power value per hour and
//! derives the monthly arrays on demand.

mod duration;
mod error;
mod hourly;
mod monthly;
mod reader;

pub use duration::LoadDurationCurve;
pub use error::LoadError;
pub use hourly::HourlyLoad;
pub use monthly::MonthlyLoad;
pub use reader::{ColumnOrder, ProfileError, ProfileFormat};

pub(crate) use hourly::month_of_hour;

use uom::si::{
    energy::joule,
    f64::{Energy, Power},
    power::watt,
};

/// Months in a year.
pub const MONTHS: usize = 12;

/// Hours in a (non-leap) year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Average hours per month, `8760 / 12`.
pub(crate) const AVERAGE_MONTH_HOURS: f64 = 730.0;

/// Calendar hours in each month of a non-leap year.
pub(crate) const MONTH_HOURS: [usize; MONTHS] =
    [744, 672, 744, 720, 744, 720, 744, 744, 720, 744, 720, 744];

/// Direction of heat flow relative to the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Heat removed from the ground, serving a heating load.
    Extraction,

    /// Heat added to the ground, serving a cooling load.
    Injection,
}

impl Direction {
    /// Both directions, extraction first.
    pub const BOTH: [Direction; 2] = [Direction::Extraction, Direction::Injection];

    /// `+1` for injection, `-1` for extraction.
    pub(crate) fn sign(self) -> f64 {
        match self {
            Direction::Extraction => -1.0,
            Direction::Injection => 1.0,
        }
    }
}

/// A pair of values, one per [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directional<T> {
    /// Heating side: heat drawn from the ground.
    pub extraction: T,
    /// Cooling side: heat rejected into the ground.
    pub injection: T,
}

impl<T> Directional<T> {
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Extraction => &self.extraction,
            Direction::Injection => &self.injection,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::Extraction => &mut self.extraction,
            Direction::Injection => &mut self.injection,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Direction, T) -> U) -> Directional<U> {
        Directional {
            extraction: f(Direction::Extraction, self.extraction),
            injection: f(Direction::Injection, self.injection),
        }
    }
}

/// Monthly baseloads (energy) and effective peaks (power) for a typical year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySummary {
    pub baseload: Directional<[Energy; MONTHS]>,
    pub peak: Directional<[Power; MONTHS]>,
}

/// A building load at either resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadProfile {
    Monthly(MonthlyLoad),
    Hourly(HourlyLoad),
}

impl From<MonthlyLoad> for LoadProfile {
    fn from(load: MonthlyLoad) -> Self {
        LoadProfile::Monthly(load)
    }
}

impl From<HourlyLoad> for LoadProfile {
    fn from(load: HourlyLoad) -> Self {
        LoadProfile::Hourly(load)
    }
}

impl Default for LoadProfile {
    fn default() -> Self {
        LoadProfile::Monthly(MonthlyLoad::default())
    }
}

impl LoadProfile {
    /// Monthly baseload energies as `(heating, cooling)`.
    ///
    /// Hourly data is resampled by summing the energy within each calendar
    /// month, averaged over the years present.
    #[must_use]
    pub fn monthly_baseload(&self) -> ([Energy; MONTHS], [Energy; MONTHS]) {
        match self {
            LoadProfile::Monthly(m) => (*m.baseload_heating(), *m.baseload_cooling()),
            LoadProfile::Hourly(h) => h.monthly_baseload(),
        }
    }

    /// Monthly peak powers as `(heating, cooling)`.
    ///
    /// Hourly data is resampled by taking the largest hourly value within each
    /// calendar month over all years present.
    #[must_use]
    pub fn monthly_peak(&self) -> ([Power; MONTHS], [Power; MONTHS]) {
        match self {
            LoadProfile::Monthly(m) => (*m.peak_heating(), *m.peak_cooling()),
            LoadProfile::Hourly(h) => h.monthly_peak(),
        }
    }

    /// Annual cooling energy minus annual heating energy.
    ///
    /// Positive values mean the ground gains heat each year.
    #[must_use]
    pub fn imbalance(&self) -> Energy {
        let (heating, cooling) = self.monthly_baseload();
        total(&cooling) - total(&heating)
    }

    /// Baseloads with peaks raised so no month needs more than
    /// [`AVERAGE_MONTH_HOURS`] of full-load operation.
    #[must_use]
    pub fn summary(&self) -> MonthlySummary {
        let (baseload_heating, baseload_cooling) = self.monthly_baseload();
        let (peak_heating, peak_cooling) = self.monthly_peak();
        MonthlySummary {
            baseload: Directional {
                extraction: baseload_heating,
                injection: baseload_cooling,
            },
            peak: Directional {
                extraction: super::eflh::effective_peaks(&baseload_heating, &peak_heating),
                injection: super::eflh::effective_peaks(&baseload_cooling, &peak_cooling),
            },
        }
    }

    /// The hourly data, if this profile has any.
    #[must_use]
    pub fn hourly(&self) -> Option<&HourlyLoad> {
        match self {
            LoadProfile::Monthly(_) => None,
            LoadProfile::Hourly(h) => Some(h),
        }
    }
}

/// Sum of a set of energies.
pub(crate) fn total(values: &[Energy]) -> Energy {
    values
        .iter()
        .fold(Energy::new::<joule>(0.0), |acc, &value| acc + value)
}

/// Checks one value: finite and non-negative.
fn check_value(index: usize, si: f64) -> Result<(), LoadError> {
    if !si.is_finite() {
        return Err(LoadError::NotFinite { index });
    }
    if si < 0.0 {
        return Err(LoadError::Negative { index });
    }
    Ok(())
}

/// Validates a monthly energy array.
pub(crate) fn checked_energies(values: &[Energy]) -> Result<[Energy; MONTHS], LoadError> {
    let months: [Energy; MONTHS] = values.try_into().map_err(|_| LoadError::Length {
        expected: MONTHS,
        actual: values.len(),
    })?;
    for (index, value) in months.iter().enumerate() {
        check_value(index, value.get::<joule>())?;
    }
    Ok(months)
}

/// Validates a monthly power array.
pub(crate) fn checked_powers(values: &[Power]) -> Result<[Power; MONTHS], LoadError> {
    let months: [Power; MONTHS] = values.try_into().map_err(|_| LoadError::Length {
        expected: MONTHS,
        actual: values.len(),
    })?;
    check_series(&months)?;
    Ok(months)
}

/// Validates a power series of any length.
pub(crate) fn check_series(values: &[Power]) -> Result<(), LoadError> {
    for (index, value) in values.iter().enumerate() {
        check_value(index, value.get::<watt>())?;
    }
    Ok(())
}

/// Index of the largest value, preferring the earliest on ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = index;
        }
    }
    best
}
