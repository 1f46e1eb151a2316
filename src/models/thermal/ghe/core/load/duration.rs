use uom::si::{
    energy::joule,
    f64::{Energy, Power},
    power::watt,
};

/// Hourly powers sorted from largest to smallest.
///
/// The curve answers how many hours, and how much energy, lie above a power
/// threshold. Load optimisation searches thresholds on it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadDurationCurve {
    descending: Vec<f64>,
}

impl LoadDurationCurve {
    /// Builds a curve from an hourly power series.
    #[must_use]
    pub fn new(series: &[Power]) -> Self {
        let mut descending: Vec<f64> = series.iter().map(|p| p.get::<watt>()).collect();
        descending.sort_by(|a, b| b.total_cmp(a));
        Self { descending }
    }

    /// The largest hourly power, or zero for an empty series.
    #[must_use]
    pub fn peak(&self) -> Power {
        Power::new::<watt>(self.descending.first().copied().unwrap_or(0.0))
    }

    /// Number of hours strictly above `threshold`.
    #[must_use]
    pub fn hours_above(&self, threshold: Power) -> usize {
        let threshold = threshold.get::<watt>();
        self.descending.partition_point(|&p| p > threshold)
    }

    /// Energy above `threshold`, the part that would be shed if the load
    /// were capped at that power.
    #[must_use]
    pub fn energy_above(&self, threshold: Power) -> Energy {
        let threshold = threshold.get::<watt>();
        let watt_hours: f64 = self.descending[..self.hours_above(Power::new::<watt>(threshold))]
            .iter()
            .map(|p| p - threshold)
            .sum();
        Energy::new::<joule>(watt_hours * 3600.0)
    }

    /// The power exceeded for `hours` hours of the series.
    ///
    /// Returns zero past the end of the curve.
    #[must_use]
    pub fn power_at(&self, hours: usize) -> Power {
        Power::new::<watt>(self.descending.get(hours).copied().unwrap_or(0.0))
    }

    /// Number of hours in the curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descending.is_empty()
    }
}
