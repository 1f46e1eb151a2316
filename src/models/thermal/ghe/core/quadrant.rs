//! Limiting design cases.
//!
//! A borefield is limited either by its minimum fluid temperature
//! (extraction) or its maximum fluid temperature (injection), and within that
//! direction either by the month with the most energy or by the month with
//! the highest peak. The four combinations are the quadrants.

use thiserror::Error;
use uom::si::{energy::joule, power::watt};

use super::load::{Direction, Directional, MONTHS, MonthlySummary, argmax};

/// One of the four limiting design cases, numbered 1 to 4.
///
/// Quadrants are ordered by number, and ties between quadrants are resolved
/// in favour of the lower number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    /// Extraction limits the design in the month with the most heating energy.
    ExtractionBaseloadMonth = 1,

    /// Extraction limits the design in the month with the highest heating peak.
    ExtractionPeakMonth = 2,

    /// Injection limits the design in the month with the most cooling energy.
    InjectionBaseloadMonth = 3,

    /// Injection limits the design in the month with the highest cooling peak.
    InjectionPeakMonth = 4,
}

/// A requested quadrant number outside `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quadrant must be between 1 and 4, got {0}")]
pub struct InvalidQuadrant(pub u8);

impl TryFrom<u8> for Quadrant {
    type Error = InvalidQuadrant;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quadrant::ExtractionBaseloadMonth),
            2 => Ok(Quadrant::ExtractionPeakMonth),
            3 => Ok(Quadrant::InjectionBaseloadMonth),
            4 => Ok(Quadrant::InjectionPeakMonth),
            other => Err(InvalidQuadrant(other)),
        }
    }
}

impl From<Quadrant> for u8 {
    fn from(quadrant: Quadrant) -> Self {
        quadrant as u8
    }
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::ExtractionBaseloadMonth,
        Quadrant::ExtractionPeakMonth,
        Quadrant::InjectionBaseloadMonth,
        Quadrant::InjectionPeakMonth,
    ];

    /// The direction whose temperature bound this quadrant tests.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Quadrant::ExtractionBaseloadMonth | Quadrant::ExtractionPeakMonth => {
                Direction::Extraction
            }
            Quadrant::InjectionBaseloadMonth | Quadrant::InjectionPeakMonth => Direction::Injection,
        }
    }

    /// Whether the quadrant is tied to the peak month rather than the baseload month.
    #[must_use]
    pub fn is_peak(self) -> bool {
        matches!(
            self,
            Quadrant::ExtractionPeakMonth | Quadrant::InjectionPeakMonth
        )
    }

    /// The calendar month (0-based) this quadrant evaluates.
    #[must_use]
    pub fn month(self, months: &LimitingMonths) -> usize {
        let direction = self.direction();
        if self.is_peak() {
            *months.peak.get(direction)
        } else {
            *months.baseload.get(direction)
        }
    }

    fn of(direction: Direction, peak: bool) -> Self {
        match (direction, peak) {
            (Direction::Extraction, false) => Quadrant::ExtractionBaseloadMonth,
            (Direction::Extraction, true) => Quadrant::ExtractionPeakMonth,
            (Direction::Injection, false) => Quadrant::InjectionBaseloadMonth,
            (Direction::Injection, true) => Quadrant::InjectionPeakMonth,
        }
    }

    /// Names the quadrant of a limiting month found by evaluation.
    ///
    /// The month is matched against the month of largest baseload first,
    /// then the month of largest peak. A month matching neither is assigned
    /// to whichever it is relatively closer to, measured as its share of the
    /// respective maximum.
    #[must_use]
    pub fn classify(
        direction: Direction,
        month: usize,
        summary: &MonthlySummary,
        months: &LimitingMonths,
    ) -> Self {
        if month == *months.baseload.get(direction) {
            return Self::of(direction, false);
        }
        if month == *months.peak.get(direction) {
            return Self::of(direction, true);
        }

        let baseload = summary.baseload.get(direction).map(|e| e.get::<joule>());
        let peak = summary.peak.get(direction).map(|p| p.get::<watt>());
        let share = |values: &[f64; MONTHS], best: usize| {
            if values[best] > 0.0 {
                values[month] / values[best]
            } else {
                0.0
            }
        };
        let peak_closer = share(&peak, *months.peak.get(direction))
            > share(&baseload, *months.baseload.get(direction));
        Self::of(direction, peak_closer)
    }
}

/// Candidate limiting months for each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitingMonths {
    /// Month with the most energy, the earliest on ties.
    pub baseload: Directional<usize>,

    /// Month with the highest effective peak, the earliest on ties.
    pub peak: Directional<usize>,
}

impl LimitingMonths {
    #[must_use]
    pub fn from_summary(summary: &MonthlySummary) -> Self {
        Self {
            baseload: summary
                .baseload
                .map(|_, values| argmax(&values.map(|e| e.get::<joule>()))),
            peak: summary
                .peak
                .map(|_, values| argmax(&values.map(|p| p.get::<watt>()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::thermal::ghe::core::{
        load::LoadProfile, test_support::reference_monthly_load,
    };

    #[test]
    fn numbers_round_trip() {
        for quadrant in Quadrant::ALL {
            assert_eq!(Quadrant::try_from(u8::from(quadrant)), Ok(quadrant));
        }
        assert_eq!(Quadrant::try_from(0), Err(InvalidQuadrant(0)));
        assert_eq!(Quadrant::try_from(5), Err(InvalidQuadrant(5)));
    }

    #[test]
    fn reference_limiting_months() {
        let summary = LoadProfile::Monthly(reference_monthly_load()).summary();
        let months = LimitingMonths::from_summary(&summary);

        // January has the most heating energy and the largest heating peak.
        assert_eq!(months.baseload.extraction, 0);
        assert_eq!(months.peak.extraction, 0);
        // July and August tie on cooling energy; August has the cooling peak.
        assert_eq!(months.baseload.injection, 6);
        assert_eq!(months.peak.injection, 7);

        assert_eq!(Quadrant::InjectionBaseloadMonth.month(&months), 6);
        assert_eq!(Quadrant::InjectionPeakMonth.month(&months), 7);
    }

    #[test]
    fn classification_prefers_the_baseload_quadrant() {
        let summary = LoadProfile::Monthly(reference_monthly_load()).summary();
        let months = LimitingMonths::from_summary(&summary);

        // January is both the heating baseload and heating peak month.
        assert_eq!(
            Quadrant::classify(Direction::Extraction, 0, &summary, &months),
            Quadrant::ExtractionBaseloadMonth
        );
        assert_eq!(
            Quadrant::classify(Direction::Injection, 7, &summary, &months),
            Quadrant::InjectionPeakMonth
        );
        assert_eq!(
            Quadrant::classify(Direction::Injection, 6, &summary, &months),
            Quadrant::InjectionBaseloadMonth
        );
    }

    #[test]
    fn unmatched_months_go_to_the_closer_case() {
        let summary = LoadProfile::Monthly(reference_monthly_load()).summary();
        let months = LimitingMonths::from_summary(&summary);

        // September cooling: 16 000 of 32 000 kWh, but 160 of 240 kW.
        assert_eq!(
            Quadrant::classify(Direction::Injection, 8, &summary, &months),
            Quadrant::InjectionPeakMonth
        );
    }

    #[test]
    fn directions() {
        assert_eq!(Quadrant::ExtractionPeakMonth.direction(), Direction::Extraction);
        assert_eq!(Quadrant::InjectionBaseloadMonth.direction(), Direction::Injection);
        assert!(Quadrant::InjectionPeakMonth > Quadrant::ExtractionBaseloadMonth);
    }
}
