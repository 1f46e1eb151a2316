//! Load representation, temperature evaluation, sizing and load optimisation
//! for a borefield.
//!
//! Everything here works on one field configuration at a time and holds no
//! state between calls. The [`Borefield`](super::Borefield) facade owns the
//! inputs and the last sizing result.

mod bounds;
mod eflh;
mod load;
mod optimise;
mod quadrant;
mod response;
mod sizing;

#[cfg(test)]
pub(crate) mod test_support;

pub use bounds::{BoundsError, TemperatureBounds};
pub use load::{
    ColumnOrder, Direction, Directional, HOURS_PER_YEAR, HourlyLoad, LoadDurationCurve,
    LoadError, LoadProfile, MONTHS, MonthlyLoad, MonthlySummary, ProfileError, ProfileFormat,
};
pub use optimise::{OptimiseConfig, OptimiseError, OptimiseMethod, OptimisedLoads};
pub use quadrant::{InvalidQuadrant, LimitingMonths, Quadrant};
pub use response::{Extreme, Resolution, TemperatureProfile};
pub use sizing::{
    ConvergenceReason, SizingConfig, SizingError, SizingEvent, SizingLevel, SizingObserver,
    SizingResult,
};

pub(crate) use optimise::optimise;
pub(crate) use response::ResponseEvaluator;
pub(crate) use sizing::size;
