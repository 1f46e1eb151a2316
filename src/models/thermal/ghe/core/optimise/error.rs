use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::TemperatureInterval;

use crate::{
    models::thermal::ghe::core::{
        load::{Direction, LoadError},
        sizing::SizingError,
    },
    support::efficiency::EfficiencyError,
};

/// Errors that can occur while optimising a load profile.
#[derive(Debug, Error)]
pub enum OptimiseError {
    /// Optimisation splits the load hour by hour and needs hourly data.
    #[error("load optimisation needs an hourly load profile")]
    InsufficientData,

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error(transparent)]
    Efficiency(#[from] EfficiencyError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("threshold search failed")]
    Bisection(#[from] bisection::Error),

    /// A threshold search ran out of iterations.
    #[error("{direction:?} threshold search stopped after {iters} iterations")]
    MaxIters {
        direction: Direction,

        /// Distance between the extreme fluid temperature and its bound.
        residual: TemperatureInterval,

        iters: usize,
    },
}
