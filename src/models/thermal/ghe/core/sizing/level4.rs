//! Sizing on the full hourly load.

use crate::{
    models::thermal::ghe::core::load::{Direction, month_of_hour},
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
    let hourly = context
        .load
        .hourly()
        .ok_or(SizingError::InsufficientData {
            level: SizingLevel::Level4,
        })?;

    iterate_profile(
        context,
        SizingLevel::Level4,
        direction,
        month,
        month_of_hour,
        |depth| context.evaluator.hourly(depth, hourly),
        observer,
    )
}
