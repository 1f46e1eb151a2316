//! Splitting a building load between the field and an auxiliary source.
//!
//! At a fixed depth, each direction gets a threshold that limits how much of
//! the building load the field serves. The rest is shed to external
//! equipment. The thresholds are searched one direction at a time with
//! bisection, each holding the other fixed, and the pair is refined over a
//! few rounds. Heat pump efficiencies are evaluated at the fluid
//! temperatures of the previous round.

mod config;
mod error;
mod problem;

pub use config::{OptimiseConfig, OptimiseMethod};
pub use error::OptimiseError;

use twine_core::Model;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Length, Power, TemperatureInterval, ThermodynamicTemperature},
    length::meter,
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    time::hour,
};

use crate::support::{
    borefield::ResistanceModel,
    constraint::UnitInterval,
    efficiency::{Efficiency, EfficiencyError, OperatingPoint},
    response::ThermalResponse,
};

use super::{
    bounds::{BoundsError, TemperatureBounds},
    load::{
        AVERAGE_MONTH_HOURS, Direction, Directional, HOURS_PER_YEAR, HourlyLoad, LoadDurationCurve,
        LoadError, LoadProfile, MONTHS, month_of_hour,
    },
    response::{Resolution, ResponseEvaluator, TemperatureProfile},
    sizing::{SizingError, SizingEvent, SizingObserver},
};

use problem::{ThresholdModel, ThresholdProblem};

/// The outcome of load optimisation.
///
/// `primary` and `external` are building-side loads and add up to the
/// original load in every hour. `secondary` is the load the field sees once
/// the heat pump's own work is accounted for.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisedLoads {
    /// Building load served by the field.
    pub primary: HourlyLoad,

    /// Ground-side load of the served part.
    pub secondary: HourlyLoad,

    /// Building load shed to external equipment.
    pub external: HourlyLoad,

    /// Final thresholds, as a power or as an equivalent monthly power
    /// depending on the method.
    pub thresholds: Directional<Power>,

    /// Fluid temperatures with the secondary load applied.
    pub profile: TemperatureProfile,

    /// Rounds performed.
    pub rounds: usize,
}

/// Optimises the share of `load` served by a field of fixed `depth`.
///
/// # Errors
///
/// - [`OptimiseError::InsufficientData`] if `load` is monthly.
/// - [`OptimiseError::Sizing`] if the ground temperature lies outside the
///   bounds or the response evaluation fails.
/// - [`OptimiseError::Efficiency`] if an efficiency lookup fails.
/// - [`OptimiseError::MaxIters`] or [`OptimiseError::Bisection`] if a
///   threshold search fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn optimise<R, B>(
    evaluator: &ResponseEvaluator<'_, R, B>,
    depth: Length,
    load: &LoadProfile,
    bounds: &TemperatureBounds,
    heating: &impl Efficiency,
    cooling: &impl Efficiency,
    config: &OptimiseConfig,
    observer: &mut impl SizingObserver,
) -> Result<OptimisedLoads, OptimiseError>
where
    R: ThermalResponse,
    B: ResistanceModel,
{
    let hourly = load.hourly().ok_or(OptimiseError::InsufficientData)?;

    let depth = depth.get::<meter>();
    let ground = evaluator.ground_kelvin(depth);
    if !Direction::BOTH
        .iter()
        .all(|&direction| bounds.margin(direction, ground) > 0.0)
    {
        return Err(SizingError::from(BoundsError::GroundOutside).into());
    }

    let check = FieldCheck {
        evaluator,
        depth,
        resolution: config.resolution,
        peak_hours: config.peak_duration.get::<hour>(),
    };
    let split = LoadSplit::new(hourly, config);
    let upper = split.upper;
    let tol = config.threshold_tol.get::<watt>();

    let mut thresholds = upper;
    let fluid = vec![ground; hourly.len()];
    let mut ground_side = GroundSide::new(heating, cooling, &fluid, &split.served(thresholds))?;
    let mut rounds = 0;

    loop {
        rounds += 1;
        let previous = thresholds;

        for direction in Direction::BOTH {
            let model = ThresholdModel::new(&check, &split, &ground_side, direction, thresholds);
            let problem = ThresholdProblem::new(direction, *bounds);
            let threshold = search(&model, &problem, *upper.get(direction), config)?;

            *thresholds.get_mut(direction) = threshold;
            observer.observe(&SizingEvent::ThresholdUpdated {
                direction,
                round: rounds,
                threshold: Power::new::<watt>(threshold),
            });
        }

        let served = split.served(thresholds);
        let secondary = ground_side.secondary(&served)?;
        let profile = check.profile(&secondary)?;

        let settled = Direction::BOTH
            .iter()
            .all(|&d| (thresholds.get(d) - previous.get(d)).abs() <= tol);
        if settled || rounds >= config.max_rounds {
            let (primary, external) = split.split(&served)?;
            return Ok(OptimisedLoads {
                primary,
                secondary,
                external,
                thresholds: thresholds.map(|_, t| Power::new::<watt>(t)),
                profile,
                rounds,
            });
        }

        let fluid = check.fluid_by_hour(&profile, hourly.len());
        ground_side = GroundSide::new(heating, cooling, &fluid, &served)?;
    }
}

/// Searches the threshold of one direction in `[0, upper]`.
///
/// If the whole load fits, the upper end is returned. If the bound is
/// violated even with nothing served, zero is returned.
fn search<R, B>(
    model: &ThresholdModel<'_, '_, R, B>,
    problem: &ThresholdProblem,
    upper: f64,
    config: &OptimiseConfig,
) -> Result<f64, OptimiseError>
where
    R: ThermalResponse,
    B: ResistanceModel,
{
    if upper <= 0.0 {
        return Ok(0.0);
    }

    let residual_at = |threshold: f64| -> Result<f64, OptimiseError> {
        let profile = model.call(&Power::new::<watt>(threshold))?;
        Ok(problem.residual(&profile))
    };
    if residual_at(upper)? <= 0.0 {
        return Ok(upper);
    }
    if residual_at(0.0)? >= 0.0 {
        return Ok(0.0);
    }

    let solution = bisection::solve(
        model,
        problem,
        [0.0, upper],
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(OptimiseError::MaxIters {
            direction: model.direction(),
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.input.get::<watt>())
}

/// Evaluates a ground-side load on the field at the fixed depth.
struct FieldCheck<'a, 'e, R, B> {
    evaluator: &'a ResponseEvaluator<'e, R, B>,
    depth: f64,
    resolution: Resolution,
    peak_hours: f64,
}

impl<R: ThermalResponse, B: ResistanceModel> FieldCheck<'_, '_, R, B> {
    fn profile(&self, load: &HourlyLoad) -> Result<TemperatureProfile, SizingError> {
        match self.resolution {
            Resolution::Monthly => {
                let summary = LoadProfile::Hourly(load.clone()).summary();
                self.evaluator.monthly(self.depth, &summary, self.peak_hours)
            }
            Resolution::Hourly => self.evaluator.hourly(self.depth, load),
        }
    }

    /// Average fluid temperature in each hour of a load `len` hours long,
    /// averaged over every repetition within the simulation period.
    fn fluid_by_hour(&self, profile: &TemperatureProfile, len: usize) -> Vec<f64> {
        let fluid = profile.fluid_kelvin();
        match profile.resolution() {
            Resolution::Hourly => {
                let mut sum = vec![0.0; len];
                let mut count = vec![0_u32; len];
                for (step, &t) in fluid.iter().enumerate() {
                    sum[step % len] += t;
                    count[step % len] += 1;
                }
                sum.iter()
                    .zip(&count)
                    .map(|(s, &n)| s / f64::from(n.max(1)))
                    .collect()
            }
            Resolution::Monthly => {
                let mut sum = [0.0; MONTHS];
                let mut count = [0_u32; MONTHS];
                for (step, &t) in fluid.iter().enumerate() {
                    sum[step % MONTHS] += t;
                    count[step % MONTHS] += 1;
                }
                let average: Vec<f64> = sum
                    .iter()
                    .zip(&count)
                    .map(|(s, &n)| s / f64::from(n.max(1)))
                    .collect();
                (0..len).map(|h| average[month_of_hour(h)]).collect()
            }
        }
    }
}

/// The building load and the rule that decides how much of it is served.
///
/// Loads are in watts. Months of the load are numbered consecutively over
/// its years, and each keeps its total energy in joules.
struct LoadSplit {
    method: OptimiseMethod,
    load: Directional<Vec<f64>>,
    caps: Directional<f64>,
    months: Vec<usize>,
    month_energy: Directional<Vec<f64>>,
    upper: Directional<f64>,
}

impl LoadSplit {
    fn new(load: &HourlyLoad, config: &OptimiseConfig) -> Self {
        let watts = |series: &[Power]| -> Vec<f64> { series.iter().map(|p| p.get::<watt>()).collect() };
        let building = Directional {
            extraction: watts(load.heating()),
            injection: watts(load.cooling()),
        };
        let caps = Directional {
            extraction: config.max_peak_extraction,
            injection: config.max_peak_injection,
        }
        .map(|_, cap| cap.map_or(f64::INFINITY, |p| p.get::<watt>()));

        let months: Vec<usize> = (0..load.len())
            .map(|h| (h / HOURS_PER_YEAR) * MONTHS + month_of_hour(h))
            .collect();
        let energy = |series: &[f64]| -> Vec<f64> {
            let mut totals = vec![0.0; load.years() * MONTHS];
            for (&q, &month) in series.iter().zip(&months) {
                totals[month] += q * 3600.0;
            }
            totals
        };
        let month_energy = Directional {
            extraction: energy(&building.extraction),
            injection: energy(&building.injection),
        };

        let upper = match config.method {
            OptimiseMethod::Power => Directional {
                extraction: LoadDurationCurve::new(load.heating()).peak(),
                injection: LoadDurationCurve::new(load.cooling()).peak(),
            }
            .map(|direction, peak| peak.get::<watt>().min(*caps.get(direction))),
            OptimiseMethod::Energy => month_energy.clone().map(|_, totals| {
                totals.iter().fold(0.0, |max: f64, &e| max.max(e)) / MONTH_SECONDS
            }),
        };

        Self {
            method: config.method,
            load: building,
            caps,
            months,
            month_energy,
            upper,
        }
    }

    /// Building load served by the field in each hour.
    fn served(&self, thresholds: Directional<f64>) -> Directional<Vec<f64>> {
        thresholds.map(|direction, threshold| {
            let threshold = threshold.max(0.0);
            let cap = *self.caps.get(direction);
            let load = self.load.get(direction);
            match self.method {
                OptimiseMethod::Power => load.iter().map(|&q| q.min(threshold).min(cap)).collect(),
                OptimiseMethod::Energy => {
                    let energy = self.month_energy.get(direction);
                    load.iter()
                        .zip(&self.months)
                        .map(|(&q, &month)| {
                            let fraction = if energy[month] > 0.0 {
                                (threshold * MONTH_SECONDS / energy[month]).min(1.0)
                            } else {
                                1.0
                            };
                            (q * fraction).min(cap)
                        })
                        .collect()
                }
            }
        })
    }

    /// Splits the building load into served and shed parts.
    ///
    /// The shed part is rounded first and the served part is recovered from
    /// it, so the two add back to the building load exactly.
    fn split(&self, served: &Directional<Vec<f64>>) -> Result<(HourlyLoad, HourlyLoad), LoadError> {
        let parts = |direction: Direction| -> (Vec<Power>, Vec<Power>) {
            self.load
                .get(direction)
                .iter()
                .zip(served.get(direction))
                .map(|(&q, &s)| {
                    let shed = q - s;
                    (Power::new::<watt>(q - shed), Power::new::<watt>(shed))
                })
                .unzip()
        };
        let (heating_primary, heating_external) = parts(Direction::Extraction);
        let (cooling_primary, cooling_external) = parts(Direction::Injection);
        Ok((
            HourlyLoad::new(heating_primary, cooling_primary)?,
            HourlyLoad::new(heating_external, cooling_external)?,
        ))
    }
}

const MONTH_SECONDS: f64 = AVERAGE_MONTH_HOURS * 3600.0;

/// Converts served building loads to ground-side loads.
///
/// Extraction is `q · (1 − 1/COP)` and injection is `q · (1 + 1/EER)`, with
/// the factor fixed per hour for the duration of a round.
struct GroundSide {
    factors: Directional<Vec<f64>>,
}

impl GroundSide {
    /// Evaluates the efficiencies at the given hourly fluid temperatures.
    ///
    /// The part-load ratio of an hour is its served load relative to the
    /// largest served load in that direction.
    fn new(
        heating: &impl Efficiency,
        cooling: &impl Efficiency,
        fluid: &[f64],
        served: &Directional<Vec<f64>>,
    ) -> Result<Self, EfficiencyError> {
        let mut factors = Directional::<Vec<f64>>::default();
        for direction in Direction::BOTH {
            let served = served.get(direction);
            let peak = served.iter().fold(0.0, |max: f64, &q| max.max(q));
            let mut values = Vec::with_capacity(served.len());
            for (&q, &t) in served.iter().zip(fluid) {
                let ratio = if peak > 0.0 { q / peak } else { 0.0 };
                let point = OperatingPoint {
                    temperature: ThermodynamicTemperature::new::<kelvin>(t),
                    secondary_temperature: None,
                    part_load: Some(UnitInterval::new(ratio.clamp(0.0, 1.0))?),
                };
                values.push(match direction {
                    Direction::Extraction => 1.0 - 1.0 / heating.coefficient(&point)?,
                    Direction::Injection => 1.0 + 1.0 / cooling.coefficient(&point)?,
                });
            }
            *factors.get_mut(direction) = values;
        }
        Ok(Self { factors })
    }

    fn secondary(&self, served: &Directional<Vec<f64>>) -> Result<HourlyLoad, LoadError> {
        let ground = |direction: Direction| -> Vec<Power> {
            served
                .get(direction)
                .iter()
                .zip(self.factors.get(direction))
                .map(|(q, f)| Power::new::<watt>(q * f))
                .collect()
        };
        HourlyLoad::new(ground(Direction::Extraction), ground(Direction::Injection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{energy::joule, power::kilowatt, thermodynamic_temperature::degree_celsius};

    use crate::{
        models::thermal::ghe::core::test_support::{
            flat_hourly_from_monthly, reference_bounds, reference_field, reference_ground,
            reference_monthly_load, reference_resistance,
        },
        support::{
            borefield::BoreField,
            efficiency::{EfficiencyCurve, EfficiencyMap, SecondAxis, Seasonal},
            response::InfiniteLineSource,
        },
    };

    // Temperature tolerance plus the slack left by alternating the directions.
    const TOL: f64 = 0.1;

    fn seasonal(value: f64) -> Seasonal {
        Seasonal::new(value).unwrap()
    }

    fn reference_hourly() -> LoadProfile {
        LoadProfile::Hourly(flat_hourly_from_monthly(&reference_monthly_load()))
    }

    fn assert_conserved(original: &HourlyLoad, result: &OptimisedLoads) {
        let pairs = [
            (original.heating(), result.primary.heating(), result.external.heating()),
            (original.cooling(), result.primary.cooling(), result.external.cooling()),
        ];
        for (load, primary, external) in pairs {
            for h in 0..load.len() {
                assert_eq!(primary[h] + external[h], load[h], "hour {h}");
            }
        }
    }

    fn assert_within_bounds(profile: &TemperatureProfile) {
        let max = profile.max_injection().unwrap().temperature;
        let min = profile.min_extraction().unwrap().temperature;
        assert!(max.get::<degree_celsius>() <= 16.0 + TOL, "max {max:?}");
        assert!(min.get::<degree_celsius>() >= -TOL, "min {min:?}");
    }

    #[test]
    fn monthly_loads_cannot_be_optimised() {
        let field = reference_field();
        let ground = reference_ground();
        let resistance = reference_resistance();
        let response = InfiniteLineSource::new();
        let evaluator = ResponseEvaluator::new(&field, &ground, &resistance, &response, 20);

        let err = optimise(
            &evaluator,
            Length::new::<meter>(100.0),
            &LoadProfile::Monthly(reference_monthly_load()),
            &reference_bounds(),
            &seasonal(4.0),
            &seasonal(4.0),
            &OptimiseConfig::default(),
            &mut (),
        )
        .unwrap_err();
        assert!(matches!(err, OptimiseError::InsufficientData));
    }

    #[test]
    fn undersized_field_sheds_load_and_keeps_the_bounds() {
        let field = reference_field();
        let ground = reference_ground();
        let resistance = reference_resistance();
        let response = InfiniteLineSource::new();
        let evaluator = ResponseEvaluator::new(&field, &ground, &resistance, &response, 20);
        let load = reference_hourly();

        let mut events = Vec::new();
        let result = optimise(
            &evaluator,
            Length::new::<meter>(20.0),
            &load,
            &reference_bounds(),
            &seasonal(4.0),
            &seasonal(5.0),
            &OptimiseConfig::default(),
            &mut |event: &SizingEvent| events.push(*event),
        )
        .unwrap();

        let original = load.hourly().unwrap();
        assert_conserved(original, &result);
        assert_within_bounds(&result.profile);

        // Something is shed in at least one direction.
        let shed: f64 = result
            .external
            .heating()
            .iter()
            .chain(result.external.cooling())
            .map(|p| p.get::<kilowatt>())
            .sum();
        assert!(shed > 0.0);

        // No served hour exceeds its threshold.
        let heating_threshold = result.thresholds.extraction;
        assert!(result.primary.heating().iter().all(|&q| q <= heating_threshold));

        // The ground-side extraction is three quarters of the served heating.
        for (ground_side, building) in result.secondary.heating().iter().zip(result.primary.heating()) {
            assert_relative_eq!(
                ground_side.get::<watt>(),
                0.75 * building.get::<watt>(),
                max_relative = 1e-12
            );
        }

        assert!(result.rounds >= 1);
        assert_eq!(events.len(), 2 * result.rounds);
        assert!(matches!(
            events[0],
            SizingEvent::ThresholdUpdated {
                direction: Direction::Extraction,
                round: 1,
                ..
            }
        ));
    }

    #[test]
    fn efficiencies_follow_the_previous_round() {
        let field = reference_field();
        let ground = reference_ground();
        let resistance = reference_resistance();
        let response = InfiniteLineSource::new();
        let evaluator = ResponseEvaluator::new(&field, &ground, &resistance, &response, 20);
        let load = reference_hourly();

        let celsius = ThermodynamicTemperature::new::<degree_celsius>;
        let cop = EfficiencyCurve::new(vec![celsius(0.0), celsius(20.0)], vec![3.0, 5.0]).unwrap();
        let eer = EfficiencyMap::new(
            vec![celsius(0.0), celsius(20.0)],
            SecondAxis::PartLoad(vec![0.0, 1.0]),
            vec![vec![6.0, 5.0], vec![4.0, 3.0]],
        )
        .unwrap();

        let result = optimise(
            &evaluator,
            Length::new::<meter>(20.0),
            &load,
            &reference_bounds(),
            &cop,
            &eer,
            &OptimiseConfig::default(),
            &mut (),
        )
        .unwrap();

        assert_conserved(load.hourly().unwrap(), &result);
        assert_within_bounds(&result.profile);
        // Round one evaluates at the ground temperature, later rounds at the fluid.
        assert!(result.rounds >= 2);

        let ratios = |ground_side: &[Power], building: &[Power]| -> Vec<f64> {
            ground_side
                .iter()
                .zip(building)
                .filter(|(_, q)| q.get::<watt>() > 0.0)
                .map(|(g, q)| g.get::<watt>() / q.get::<watt>())
                .collect()
        };

        let heating = ratios(result.secondary.heating(), result.primary.heating());
        assert!(!heating.is_empty());
        for &ratio in &heating {
            assert!((2.0 / 3.0 - 1e-9..=0.8 + 1e-9).contains(&ratio), "heating {ratio}");
        }
        let (low, high) = heating
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| (lo.min(r), hi.max(r)));
        assert!(high - low > 1e-4, "heating factors do not vary with the fluid");

        let cooling = ratios(result.secondary.cooling(), result.primary.cooling());
        assert!(!cooling.is_empty());
        for &ratio in &cooling {
            assert!(
                (1.0 + 1.0 / 6.0 - 1e-9..=1.0 + 1.0 / 3.0 + 1e-9).contains(&ratio),
                "cooling {ratio}"
            );
        }
    }

    #[test]
    fn deep_field_serves_everything() {
        let field = reference_field();
        let ground = reference_ground();
        let resistance = reference_resistance();
        let response = InfiniteLineSource::new();
        let evaluator = ResponseEvaluator::new(&field, &ground, &resistance, &response, 20);
        let load = reference_hourly();

        let result = optimise(
            &evaluator,
            Length::new::<meter>(250.0),
            &load,
            &reference_bounds(),
            &seasonal(4.0),
            &seasonal(5.0),
            &OptimiseConfig::default(),
            &mut (),
        )
        .unwrap();

        assert_eq!(&result.primary, load.hourly().unwrap());
        assert!(result.external.heating().iter().all(|p| p.get::<watt>() == 0.0));
        assert!(result.external.cooling().iter().all(|p| p.get::<watt>() == 0.0));
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn energy_method_caps_monthly_energy() {
        let field = reference_field();
        let ground = reference_ground();
        let resistance = reference_resistance();
        let response = InfiniteLineSource::new();
        let evaluator = ResponseEvaluator::new(&field, &ground, &resistance, &response, 20);
        let load = reference_hourly();
        let config = OptimiseConfig {
            method: OptimiseMethod::Energy,
            ..OptimiseConfig::default()
        };

        let result = optimise(
            &evaluator,
            Length::new::<meter>(60.0),
            &load,
            &reference_bounds(),
            &seasonal(4.0),
            &seasonal(5.0),
            &config,
            &mut (),
        )
        .unwrap();

        assert_conserved(load.hourly().unwrap(), &result);
        assert_within_bounds(&result.profile);

        let cap = result.thresholds.extraction.get::<watt>() * MONTH_SECONDS;
        let (served, _) = result.primary.monthly_baseload();
        for energy in served {
            assert!(energy.get::<joule>() <= cap * (1.0 + 1e-9));
        }
    }

    #[test]
    fn peak_caps_limit_every_hour() {
        let field = reference_field();
        let ground = reference_ground();
        let resistance = reference_resistance();
        let response = InfiniteLineSource::new();
        let evaluator = ResponseEvaluator::new(&field, &ground, &resistance, &response, 20);
        let load = reference_hourly();
        let cap = Power::new::<kilowatt>(20.0);
        let config = OptimiseConfig {
            max_peak_injection: Some(cap),
            ..OptimiseConfig::default()
        };

        let result = optimise(
            &evaluator,
            Length::new::<meter>(250.0),
            &load,
            &reference_bounds(),
            &seasonal(4.0),
            &seasonal(5.0),
            &config,
            &mut (),
        )
        .unwrap();

        assert!(result.primary.cooling().iter().all(|&q| q <= cap));
        assert_relative_eq!(result.thresholds.injection.get::<kilowatt>(), 20.0);
        assert_conserved(load.hourly().unwrap(), &result);
    }

    #[test]
    fn hourly_resolution_keeps_the_bounds() {
        let m = Length::new::<meter>;
        let field = BoreField::rectangle(3, 3, m(6.0), m(6.0), m(0.075)).unwrap();
        let ground = reference_ground();
        let resistance = reference_resistance();
        let response = InfiniteLineSource::new();
        let evaluator = ResponseEvaluator::new(&field, &ground, &resistance, &response, 1);

        let mut cooling = vec![Power::new::<kilowatt>(2.0); HOURS_PER_YEAR];
        for q in &mut cooling[4344..5088] {
            *q = Power::new::<kilowatt>(15.0);
        }
        let heating = vec![Power::new::<kilowatt>(0.0); HOURS_PER_YEAR];
        let load = LoadProfile::Hourly(HourlyLoad::new(heating, cooling).unwrap());
        let config = OptimiseConfig {
            resolution: Resolution::Hourly,
            ..OptimiseConfig::default()
        };

        let result = optimise(
            &evaluator,
            Length::new::<meter>(80.0),
            &load,
            &reference_bounds(),
            &seasonal(4.0),
            &seasonal(5.0),
            &config,
            &mut (),
        )
        .unwrap();

        assert_eq!(result.profile.resolution(), Resolution::Hourly);
        assert_conserved(load.hourly().unwrap(), &result);
        assert_within_bounds(&result.profile);
        assert!(result.thresholds.injection < Power::new::<kilowatt>(15.0));
    }
}
