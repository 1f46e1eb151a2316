use uom::si::{
    energy::joule,
    f64::{Energy, Power},
    power::watt,
};

use super::{HOURS_PER_YEAR, LoadError, MONTH_HOURS, MONTHS, check_series};

/// Hourly heating and cooling demand over one or more whole years.
///
/// Both series have the same length, a non-zero multiple of
/// [`HOURS_PER_YEAR`](super::HOURS_PER_YEAR), and hold finite, non-negative
/// powers. Each value is the average power over its hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyLoad {
    heating: Vec<Power>,
    cooling: Vec<Power>,
}

impl HourlyLoad {
    /// Creates an hourly load from separate heating and cooling series.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the lengths differ, the length is not a
    /// whole number of years, or any value is negative or non-finite.
    pub fn new(heating: Vec<Power>, cooling: Vec<Power>) -> Result<Self, LoadError> {
        if heating.len() != cooling.len() {
            return Err(LoadError::LengthMismatch {
                heating: heating.len(),
                cooling: cooling.len(),
            });
        }
        if heating.is_empty() || heating.len() % HOURS_PER_YEAR != 0 {
            return Err(LoadError::YearMultiple {
                len: heating.len(),
            });
        }
        check_series(&heating)?;
        check_series(&cooling)?;
        Ok(Self { heating, cooling })
    }

    /// Splits a single signed series at zero.
    ///
    /// Positive values are cooling (injection) and negative values are
    /// heating (extraction).
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the length is not a whole number of years
    /// or any value is non-finite.
    pub fn from_signed(net: &[Power]) -> Result<Self, LoadError> {
        let zero = Power::new::<watt>(0.0);
        let mut heating = Vec::with_capacity(net.len());
        let mut cooling = Vec::with_capacity(net.len());
        for (index, &value) in net.iter().enumerate() {
            if !value.get::<watt>().is_finite() {
                return Err(LoadError::NotFinite { index });
            }
            if value >= zero {
                heating.push(zero);
                cooling.push(value);
            } else {
                heating.push(-value);
                cooling.push(zero);
            }
        }
        Self::new(heating, cooling)
    }

    #[must_use]
    pub fn heating(&self) -> &[Power] {
        &self.heating
    }

    #[must_use]
    pub fn cooling(&self) -> &[Power] {
        &self.cooling
    }

    /// Number of hours covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heating.len()
    }

    /// Always `false`, empty series are rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heating.is_empty()
    }

    /// Number of whole years covered.
    #[must_use]
    pub fn years(&self) -> usize {
        self.len() / HOURS_PER_YEAR
    }

    /// Monthly energies as `(heating, cooling)`, averaged over the years present.
    #[must_use]
    pub fn monthly_baseload(&self) -> ([Energy; MONTHS], [Energy; MONTHS]) {
        let hour_seconds = 3600.0;
        #[allow(clippy::cast_precision_loss)]
        let years = self.years() as f64;
        let resample = |series: &[Power]| {
            let mut sums = [0.0; MONTHS];
            for (hour, value) in series.iter().enumerate() {
                sums[month_of_hour(hour)] += value.get::<watt>();
            }
            sums.map(|watt_hours| Energy::new::<joule>(watt_hours * hour_seconds / years))
        };
        (resample(&self.heating), resample(&self.cooling))
    }

    /// Monthly peaks as `(heating, cooling)`, the largest hour over all years.
    #[must_use]
    pub fn monthly_peak(&self) -> ([Power; MONTHS], [Power; MONTHS]) {
        let resample = |series: &[Power]| {
            let mut peaks = [0.0_f64; MONTHS];
            for (hour, value) in series.iter().enumerate() {
                let month = month_of_hour(hour);
                peaks[month] = peaks[month].max(value.get::<watt>());
            }
            peaks.map(Power::new::<watt>)
        };
        (resample(&self.heating), resample(&self.cooling))
    }

    /// Net injection (cooling minus heating) in watts, cycled to `hours`.
    pub(crate) fn net_watts(&self, hours: usize) -> Vec<f64> {
        (0..hours)
            .map(|h| {
                let i = h % self.len();
                self.cooling[i].get::<watt>() - self.heating[i].get::<watt>()
            })
            .collect()
    }
}

/// Calendar month (0-based) of an hour index, repeating every year.
pub(crate) fn month_of_hour(hour: usize) -> usize {
    let mut remaining = hour % HOURS_PER_YEAR;
    for (month, &hours) in MONTH_HOURS.iter().enumerate() {
        if remaining < hours {
            return month;
        }
        remaining -= hours;
    }
    MONTHS - 1
}
