use thiserror::Error;
use uom::si::{f64::Length, length::meter};

use crate::models::thermal::ghe::core::{bounds::BoundsError, quadrant::InvalidQuadrant};

use super::SizingLevel;

/// Why a depth iteration stopped without converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceReason {
    /// The iteration budget ran out.
    MaxIterations,

    /// Successive depth steps alternated in sign without shrinking.
    Oscillation,

    /// The required depth exceeded the configured maximum.
    DepthLimit,

    /// The depth or a temperature became NaN or infinite.
    NonFinite,

    /// The undisturbed ground temperature reached the fluid bound, leaving
    /// no margin to size against.
    NoTemperatureMargin,
}

/// Errors that can occur while sizing a borefield.
#[derive(Debug, Error)]
pub enum SizingError {
    /// The requested level needs hourly load data.
    #[error("{level:?} sizing needs an hourly load profile")]
    InsufficientData { level: SizingLevel },

    /// The thermal-response collaborator failed.
    #[error("thermal response evaluation failed")]
    Response(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The depth iteration did not converge.
    #[error("sizing did not converge after {iterations} iterations: {reason:?}")]
    Convergence {
        /// Last depth reached before stopping.
        depth: Length,

        /// Iterations performed.
        iterations: usize,

        reason: ConvergenceReason,
    },

    /// No direction moves the fluid temperature towards its bound.
    #[error("the load never moves the fluid temperature towards a bound")]
    Unloaded,

    #[error(transparent)]
    Quadrant(#[from] InvalidQuadrant),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

impl SizingError {
    /// Builds a convergence failure from an SI depth.
    pub(crate) fn convergence(depth: f64, iterations: usize, reason: ConvergenceReason) -> Self {
        Self::Convergence {
            depth: Length::new::<meter>(depth),
            iterations,
            reason,
        }
    }
}
