//! Three-pulse sizing on monthly data.
//!
//! For each candidate month the field sees the yearly imbalance since the
//! start of operation, the month's average load for one average month, and
//! the month's peak for the peak duration. The month is evaluated in the
//! first and in the last year of the simulation period, and the worst case
//! sets the depth.

use uom::si::{energy::joule, f64::Length, length::meter, power::watt, time::hour};

use crate::{
    models::thermal::ghe::core::load::{AVERAGE_MONTH_HOURS, Direction, HOURS_PER_YEAR, MONTHS},
    support::{borefield::ResistanceModel, response::ThermalResponse},
};

use super::{
    Context, ConvergenceReason, DirectionSizing, IterationMonitor, SizingError, SizingEvent,
    SizingLevel, SizingObserver, deviated,
};

/// A candidate month and the hour at which its pulse starts.
struct Case {
    month: usize,
    start: f64,
}

pub(super) fn size_direction<R, B>(
    context: &Context<'_, '_, R, B>,
    direction: Direction,
    month: Option<usize>,
    observer: &mut impl SizingObserver,
) -> Result<DirectionSizing, SizingError>
where
    R: ThermalResponse,
    B: ResistanceModel,
{
    let evaluator = context.evaluator;
    let years = evaluator.years();
    let peak_hours = context.config.peak_duration.get::<hour>();

    let month_seconds = AVERAGE_MONTH_HOURS * 3600.0;
    let baseload = context
        .summary
        .baseload
        .get(direction)
        .map(|e| e.get::<joule>() / month_seconds);
    let peak = context.summary.peak.get(direction).map(|p| p.get::<watt>());
    #[allow(clippy::cast_precision_loss)]
    let annual = direction.sign() * context.load.imbalance().get::<joule>()
        / (HOURS_PER_YEAR as f64 * 3600.0);

    let cases = cases(month, years);
    let mut hours = vec![peak_hours, peak_hours + AVERAGE_MONTH_HOURS];
    hours.extend(
        cases
            .iter()
            .map(|case| case.start + AVERAGE_MONTH_HOURS + peak_hours),
    );

    let mut monitor = IterationMonitor::new(context.config);
    let mut depth = context.config.initial_depth.get::<meter>();

    loop {
        let iteration = monitor.iterations() + 1;
        let margin = context.margin(direction, depth, monitor.iterations())?;

        let g = evaluator.g(depth, &hours)?;
        let (g_peak, g_month) = (g[0], g[1]);
        let scale = evaluator.response_scale(depth);
        let rb = evaluator.resistance_scale(depth);

        let mut limiting: Option<(usize, f64)> = None;
        for (case, &g_total) in cases.iter().zip(&g[2..]) {
            // Operation starting with this month has no history before it.
            let g_annual = if case.start > 0.0 { g_total } else { g_month };
            let deviation = annual * (g_annual - g_month) * scale
                + baseload[case.month] * (g_month - g_peak) * scale
                + peak[case.month] * (g_peak * scale + rb);

            if !deviation.is_finite() {
                return Err(SizingError::convergence(
                    depth,
                    iteration,
                    ConvergenceReason::NonFinite,
                ));
            }
            if deviation > limiting.map_or(0.0, |(_, worst)| worst) {
                limiting = Some((case.month, deviation));
            }
        }

        let Some((limiting_month, deviation)) = limiting else {
            return Ok(DirectionSizing::unloaded(iteration));
        };

        let ground = evaluator.ground_kelvin(depth);
        observer.observe(&SizingEvent::Iteration {
            level: SizingLevel::Level2,
            direction,
            iteration,
            depth: Length::new::<meter>(depth),
            temperature: deviated(direction, ground, deviation),
        });

        let next = depth * deviation / margin;
        if monitor.step(depth, next, deviation - margin)? {
            return Ok(DirectionSizing {
                depth: next,
                month: Some(limiting_month),
                iterations: monitor.iterations(),
            });
        }
        depth = next;
    }
}

/// Candidate months, each evaluated in the first and last year.
fn cases(month: Option<usize>, years: usize) -> Vec<Case> {
    let months: Vec<usize> = month.map_or_else(|| (0..MONTHS).collect(), |m| vec![m]);
    let mut start_years = vec![0];
    if years > 1 {
        start_years.push(years - 1);
    }

    let mut cases = Vec::with_capacity(months.len() * start_years.len());
    for &month in &months {
        for &year in &start_years {
            #[allow(clippy::cast_precision_loss)]
            let start = (year * HOURS_PER_YEAR) as f64 + month as f64 * AVERAGE_MONTH_HOURS;
            cases.push(Case { month, start });
        }
    }
    cases
}
