//! Equivalent full-load hours.
//!
//! Monthly data carries an energy and a peak power per month. Their ratio is
//! the time the peak would have to run to deliver the month's energy. A month
//! whose energy cannot be delivered within an average month at its peak has
//! an inconsistent peak, and sizing raises that peak to the month's average
//! power.

use uom::si::{
    energy::joule,
    f64::{Energy, Power, Time},
    power::watt,
    time::{hour, second},
};

use super::load::{AVERAGE_MONTH_HOURS, MONTHS};

/// Equivalent full-load hours `B / P` of one month.
///
/// A month with neither energy nor peak has zero full-load hours. Returns
/// `None` when the month has energy but no peak power to deliver it.
pub(crate) fn full_load_hours(energy: Energy, peak: Power) -> Option<Time> {
    let energy = energy.get::<joule>();
    let power = peak.get::<watt>();
    if power > 0.0 {
        Some(Time::new::<second>(energy / power))
    } else if energy > 0.0 {
        None
    } else {
        Some(Time::new::<second>(0.0))
    }
}

/// Peaks raised so that every month's energy fits within an average month.
///
/// A month needing more than 730 full-load hours, or one with energy and no
/// peak, gets its average power `B / 730 h` as its peak.
pub(crate) fn effective_peaks(
    baseload: &[Energy; MONTHS],
    peak: &[Power; MONTHS],
) -> [Power; MONTHS] {
    let month_seconds = AVERAGE_MONTH_HOURS * 3600.0;
    let mut effective = *peak;
    for (value, &energy) in effective.iter_mut().zip(baseload) {
        let fits = full_load_hours(energy, *value)
            .is_some_and(|hours| hours.get::<hour>() <= AVERAGE_MONTH_HOURS);
        if !fits {
            *value = Power::new::<watt>(energy.get::<joule>() / month_seconds);
        }
    }
    effective
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{energy::kilowatt_hour, power::kilowatt};

    use crate::models::thermal::ghe::core::test_support::reference_monthly_load;

    #[test]
    fn hours_at_peak_deliver_the_energy() {
        let hours = full_load_hours(
            Energy::new::<kilowatt_hour>(1000.0),
            Power::new::<kilowatt>(50.0),
        )
        .unwrap();
        assert_relative_eq!(hours.get::<hour>(), 20.0, max_relative = 1e-12);

        let idle = full_load_hours(
            Energy::new::<kilowatt_hour>(0.0),
            Power::new::<kilowatt>(0.0),
        );
        assert_eq!(idle, Some(Time::new::<second>(0.0)));
    }

    #[test]
    fn baseload_without_peak_has_no_full_load_hours() {
        let load = reference_monthly_load();

        // May has heating energy but a zero heating peak.
        assert_eq!(
            full_load_hours(load.baseload_heating()[4], load.peak_heating()[4]),
            None
        );

        // Raising the peak gives it exactly one average month at full load.
        let effective = effective_peaks(load.baseload_heating(), load.peak_heating());
        assert_relative_eq!(effective[4].get::<kilowatt>(), 26.301_369_863, epsilon = 1e-8);
        let hours = full_load_hours(load.baseload_heating()[4], effective[4]).unwrap();
        assert_relative_eq!(hours.get::<hour>(), AVERAGE_MONTH_HOURS, max_relative = 1e-12);
    }

    #[test]
    fn sufficient_peaks_are_unchanged() {
        let load = reference_monthly_load();
        let effective = effective_peaks(load.baseload_cooling(), load.peak_cooling());

        // August: 32 000 kWh against a 240 kW peak.
        assert_relative_eq!(effective[7].get::<kilowatt>(), 240.0);
        // January: 4 000 kWh of cooling and no peak.
        assert_relative_eq!(
            effective[0].get::<kilowatt>(),
            4000.0 / AVERAGE_MONTH_HOURS,
            max_relative = 1e-12
        );
        for (raised, raw) in effective.iter().zip(load.peak_cooling()) {
            assert!(raised >= raw);
        }
    }
}
