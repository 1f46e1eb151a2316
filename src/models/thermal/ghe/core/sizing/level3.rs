//! Sizing on monthly superposition with a peak on every month.

use uom::si::time::hour;

use crate::{
    models::thermal::ghe::core::load::{Direction, MONTHS},
    support::{borefield::ResistanceModel, response::ThermalResponse},
};

use super::{Context, DirectionSizing, SizingError, SizingLevel, SizingObserver, iterate_profile};

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
    let peak_hours = context.config.peak_duration.get::<hour>();
    iterate_profile(
        context,
        SizingLevel::Level3,
        direction,
        month,
        |index| index % MONTHS,
        |depth| context.evaluator.monthly(depth, &context.summary, peak_hours),
        observer,
    )
}
