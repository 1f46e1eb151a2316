use uom::si::{
    energy::joule,
    f64::{Energy, Power},
    power::watt,
};

use super::{LoadError, MONTHS, checked_energies, checked_powers};

/// Monthly heating and cooling loads for a typical year, January first.
///
/// Every array holds exactly twelve finite, non-negative values. Setters
/// validate before replacing anything, so a failed call leaves the load
/// unchanged.
///
/// # Example
///
/// ```
/// use twine_ghe::models::thermal::ghe::MonthlyLoad;
/// use uom::si::{energy::kilowatt_hour, f64::Energy};
///
/// let mut load = MonthlyLoad::default();
/// let heating = [46.5, 44.4, 37.5, 29.7, 19.2, 0.0, 0.0, 0.0, 18.3, 26.1, 35.1, 43.2]
///     .map(|mwh| Energy::new::<kilowatt_hour>(mwh * 1000.0));
///
/// load.set_baseload_heating(&heating).unwrap();
/// assert_eq!(load.baseload_heating(), &heating);
///
/// // Eleven months are rejected and the stored values are kept.
/// assert!(load.set_baseload_heating(&heating[..11]).is_err());
/// assert_eq!(load.baseload_heating(), &heating);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyLoad {
    baseload_heating: [Energy; MONTHS],
    baseload_cooling: [Energy; MONTHS],
    peak_heating: [Power; MONTHS],
    peak_cooling: [Power; MONTHS],
}

impl Default for MonthlyLoad {
    /// A load of zero in every month.
    fn default() -> Self {
        let energy = Energy::new::<joule>(0.0);
        let power = Power::new::<watt>(0.0);
        Self {
            baseload_heating: [energy; MONTHS],
            baseload_cooling: [energy; MONTHS],
            peak_heating: [power; MONTHS],
            peak_cooling: [power; MONTHS],
        }
    }
}

impl MonthlyLoad {
    /// Creates a monthly load from four twelve-month arrays.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if any array does not have twelve entries or
    /// holds a negative or non-finite value.
    pub fn new(
        baseload_heating: &[Energy],
        baseload_cooling: &[Energy],
        peak_heating: &[Power],
        peak_cooling: &[Power],
    ) -> Result<Self, LoadError> {
        Ok(Self {
            baseload_heating: checked_energies(baseload_heating)?,
            baseload_cooling: checked_energies(baseload_cooling)?,
            peak_heating: checked_powers(peak_heating)?,
            peak_cooling: checked_powers(peak_cooling)?,
        })
    }

    /// Replaces the monthly heating energy.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if `values` is not a valid twelve-month array.
    pub fn set_baseload_heating(&mut self, values: &[Energy]) -> Result<(), LoadError> {
        self.baseload_heating = checked_energies(values)?;
        Ok(())
    }

    /// Replaces the monthly cooling energy.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if `values` is not a valid twelve-month array.
    pub fn set_baseload_cooling(&mut self, values: &[Energy]) -> Result<(), LoadError> {
        self.baseload_cooling = checked_energies(values)?;
        Ok(())
    }

    /// Replaces the monthly heating peaks.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if `values` is not a valid twelve-month array.
    pub fn set_peak_heating(&mut self, values: &[Power]) -> Result<(), LoadError> {
        self.peak_heating = checked_powers(values)?;
        Ok(())
    }

    /// Replaces the monthly cooling peaks.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if `values` is not a valid twelve-month array.
    pub fn set_peak_cooling(&mut self, values: &[Power]) -> Result<(), LoadError> {
        self.peak_cooling = checked_powers(values)?;
        Ok(())
    }

    #[must_use]
    pub fn baseload_heating(&self) -> &[Energy; MONTHS] {
        &self.baseload_heating
    }

    #[must_use]
    pub fn baseload_cooling(&self) -> &[Energy; MONTHS] {
        &self.baseload_cooling
    }

    #[must_use]
    pub fn peak_heating(&self) -> &[Power; MONTHS] {
        &self.peak_heating
    }

    #[must_use]
    pub fn peak_cooling(&self) -> &[Power; MONTHS] {
        &self.peak_cooling
    }
}
