//! Iterative depth sizing.
//!
//! Each direction is sized on its own by a fixed-point iteration on depth:
//! the temperature deviation from the undisturbed ground scales roughly as
//! `1 / H`, so `H · deviation / margin` is the next guess. The deeper of the
//! two directions governs the design.
//!
//! Three levels trade accuracy for cost:
//!
//! - [`SizingLevel::Level2`] uses three load pulses per candidate month: the
//!   yearly imbalance, the month's average load and the month's peak.
//! - [`SizingLevel::Level3`] superposes every month of the simulation period
//!   and adds each month's peak on top.
//! - [`SizingLevel::Level4`] superposes the full hourly load.

mod config;
mod error;
mod event;
mod level2;
mod level3;
mod level4;
mod monitor;

pub use config::SizingConfig;
pub use error::{ConvergenceReason, SizingError};
pub use event::{SizingEvent, SizingObserver};

use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    length::meter,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::thermal::ghe::core::{
        bounds::TemperatureBounds,
        load::{Direction, LoadProfile, MonthlySummary},
        quadrant::{LimitingMonths, Quadrant},
        response::{ResponseEvaluator, TemperatureProfile},
    },
    support::{borefield::ResistanceModel, response::ThermalResponse},
};

use monitor::IterationMonitor;

/// Sizing fidelity, in increasing order of cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizingLevel {
    /// Three-pulse monthly method.
    Level2,

    /// Monthly superposition with a peak on every month.
    Level3,

    /// Hourly superposition. Needs hourly load data.
    Level4,
}

/// The outcome of a successful sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingResult {
    /// Required borehole depth.
    pub depth: Length,

    /// The quadrant that governs the depth.
    pub quadrant: Quadrant,

    /// Calendar month (0-based) in which the governing bound is reached.
    pub month: usize,

    /// Level the depth was sized at.
    pub level: SizingLevel,

    /// Depth iterations used, summed over the directions evaluated.
    pub iterations: usize,
}

/// Depth one direction needs, or `month: None` if it needs none.
#[derive(Debug, Clone, Copy)]
struct DirectionSizing {
    depth: f64,
    month: Option<usize>,
    iterations: usize,
}

impl DirectionSizing {
    fn unloaded(iterations: usize) -> Self {
        Self {
            depth: 0.0,
            month: None,
            iterations,
        }
    }
}

/// Inputs shared by every level for one sizing call.
struct Context<'a, 'e, R, B> {
    evaluator: &'a ResponseEvaluator<'e, R, B>,
    load: &'a LoadProfile,
    summary: MonthlySummary,
    bounds: &'a TemperatureBounds,
    config: &'a SizingConfig,
}

impl<R: ThermalResponse, B: ResistanceModel> Context<'_, '_, R, B> {
    /// Margin between ground and bound at `depth`, which must be positive.
    fn margin(
        &self,
        direction: Direction,
        depth: f64,
        iterations: usize,
    ) -> Result<f64, SizingError> {
        let margin = self
            .bounds
            .margin(direction, self.evaluator.ground_kelvin(depth));
        if margin > 0.0 {
            Ok(margin)
        } else if margin.is_nan() {
            Err(SizingError::convergence(
                depth,
                iterations,
                ConvergenceReason::NonFinite,
            ))
        } else {
            Err(SizingError::convergence(
                depth,
                iterations,
                ConvergenceReason::NoTemperatureMargin,
            ))
        }
    }
}

/// Sizes the borefield for `load`.
///
/// # Errors
///
/// Returns a [`SizingError`] if the level needs data the load lacks, the
/// response collaborator fails, an iteration does not converge, or the load
/// never approaches either bound.
pub(crate) fn size<R, B>(
    evaluator: &ResponseEvaluator<'_, R, B>,
    load: &LoadProfile,
    bounds: &TemperatureBounds,
    config: &SizingConfig,
    observer: &mut impl SizingObserver,
) -> Result<SizingResult, SizingError>
where
    R: ThermalResponse,
    B: ResistanceModel,
{
    let level = config.level.unwrap_or(match load {
        LoadProfile::Monthly(_) => SizingLevel::Level2,
        LoadProfile::Hourly(_) => SizingLevel::Level4,
    });
    observer.observe(&SizingEvent::LevelSelected { level });
    if level == SizingLevel::Level4 && load.hourly().is_none() {
        return Err(SizingError::InsufficientData { level });
    }

    let summary = load.summary();
    let months = LimitingMonths::from_summary(&summary);
    let context = Context {
        evaluator,
        load,
        summary,
        bounds,
        config,
    };

    let cases: Vec<(Direction, Option<usize>)> = match config.quadrant {
        Some(quadrant) => vec![(quadrant.direction(), Some(quadrant.month(&months)))],
        None => Direction::BOTH.iter().map(|&d| (d, None)).collect(),
    };

    let mut iterations = 0;
    let mut limiting: Option<(Direction, f64, usize)> = None;
    for (direction, month) in cases {
        let sized = match level {
            SizingLevel::Level2 => level2::size_direction(&context, direction, month, observer)?,
            SizingLevel::Level3 => level3::size_direction(&context, direction, month, observer)?,
            SizingLevel::Level4 => level4::size_direction(&context, direction, month, observer)?,
        };
        iterations += sized.iterations;

        let Some(month) = sized.month else {
            continue;
        };
        observer.observe(&SizingEvent::DirectionSized {
            direction,
            depth: Length::new::<meter>(sized.depth),
            month,
        });
        if limiting.is_none_or(|(_, depth, _)| sized.depth > depth) {
            limiting = Some((direction, sized.depth, month));
        }
    }

    let (direction, depth, month) = limiting.ok_or(SizingError::Unloaded)?;
    let quadrant = config
        .quadrant
        .unwrap_or_else(|| Quadrant::classify(direction, month, &summary, &months));

    Ok(SizingResult {
        depth: Length::new::<meter>(depth),
        quadrant,
        month,
        level,
        iterations,
    })
}

/// Fixed-point iteration on a full temperature profile, shared by the
/// superposition levels.
///
/// `month_of` maps a profile index to its calendar month. When `month` is
/// set, only steps in that month are considered.
fn iterate_profile<R, B>(
    context: &Context<'_, '_, R, B>,
    level: SizingLevel,
    direction: Direction,
    month: Option<usize>,
    month_of: impl Fn(usize) -> usize,
    profile_at: impl Fn(f64) -> Result<TemperatureProfile, SizingError>,
    observer: &mut impl SizingObserver,
) -> Result<DirectionSizing, SizingError>
where
    R: ThermalResponse,
    B: ResistanceModel,
{
    let injection = direction == Direction::Injection;
    let mut monitor = IterationMonitor::new(context.config);
    let mut depth = context.config.initial_depth.get::<meter>();

    loop {
        let iteration = monitor.iterations() + 1;
        let margin = context.margin(direction, depth, monitor.iterations())?;
        let profile = profile_at(depth)?;

        let Some(extreme) =
            profile.extreme_where(injection, |i| month.is_none_or(|m| month_of(i) == m))
        else {
            return Ok(DirectionSizing::unloaded(iteration));
        };

        let temperature = extreme.temperature.get::<kelvin>();
        let ground = context.evaluator.ground_kelvin(depth);
        let deviation = if injection {
            temperature - ground
        } else {
            ground - temperature
        };

        observer.observe(&SizingEvent::Iteration {
            level,
            direction,
            iteration,
            depth: Length::new::<meter>(depth),
            temperature: extreme.temperature,
        });

        if deviation <= 0.0 {
            return Ok(DirectionSizing::unloaded(iteration));
        }

        let next = depth * deviation / margin;
        if monitor.step(depth, next, deviation - margin)? {
            return Ok(DirectionSizing {
                depth: next,
                month: Some(month_of(extreme.index)),
                iterations: monitor.iterations(),
            });
        }
        depth = next;
    }
}

/// Fluid temperature `deviation` away from the ground in `direction`.
fn deviated(direction: Direction, ground: f64, deviation: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(ground + direction.sign() * deviation)
}
