use uom::si::f64::{Length, Power, ThermodynamicTemperature};

use crate::models::thermal::ghe::core::load::Direction;

use super::SizingLevel;

/// Progress reported while sizing or optimising.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingEvent {
    /// The sizing level has been chosen.
    LevelSelected { level: SizingLevel },

    /// One depth iteration has been evaluated.
    Iteration {
        level: SizingLevel,
        direction: Direction,
        iteration: usize,
        depth: Length,

        /// The extreme fluid temperature at `depth`.
        temperature: ThermodynamicTemperature,
    },

    /// A direction has been sized.
    DirectionSized {
        direction: Direction,
        depth: Length,
        month: usize,
    },

    /// Load optimisation moved a direction's threshold.
    ThresholdUpdated {
        direction: Direction,
        round: usize,
        threshold: Power,
    },
}

/// Receives [`SizingEvent`]s.
///
/// Closures taking `&SizingEvent` implement this trait, and `()` is a
/// silent observer.
pub trait SizingObserver {
    fn observe(&mut self, event: &SizingEvent);
}

impl<F> SizingObserver for F
where
    F: FnMut(&SizingEvent),
{
    fn observe(&mut self, event: &SizingEvent) {
        self(event);
    }
}

impl SizingObserver for () {
    fn observe(&mut self, _event: &SizingEvent) {}
}
