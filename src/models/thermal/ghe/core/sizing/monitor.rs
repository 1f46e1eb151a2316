use uom::si::{length::meter, temperature_interval::kelvin as delta_kelvin};

use super::{ConvergenceReason, SizingConfig, SizingError};

/// Tracks a depth iteration and decides when it stops.
pub(super) struct IterationMonitor {
    max_iters: usize,
    depth_tol: f64,
    temperature_tol: f64,
    max_depth: f64,
    window: usize,
    steps: Vec<f64>,
}

impl IterationMonitor {
    pub(super) fn new(config: &SizingConfig) -> Self {
        Self {
            max_iters: config.max_iters,
            depth_tol: config.depth_tol.get::<meter>(),
            temperature_tol: config.temperature_tol.get::<delta_kelvin>(),
            max_depth: config.max_depth.get::<meter>(),
            window: config.oscillation_window,
            steps: Vec::new(),
        }
    }

    /// Iterations recorded so far.
    pub(super) fn iterations(&self) -> usize {
        self.steps.len()
    }

    /// Records a step from `previous` to `next`.
    ///
    /// `temperature_error` is the distance between the extreme fluid
    /// temperature at `previous` and its bound. Returns `Ok(true)` once the
    /// iteration has converged.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Convergence`] when the depth becomes
    /// non-finite, exceeds the maximum, oscillates, or runs out of
    /// iterations.
    pub(super) fn step(
        &mut self,
        previous: f64,
        next: f64,
        temperature_error: f64,
    ) -> Result<bool, SizingError> {
        let step = next - previous;
        self.steps.push(step);
        let iterations = self.iterations();

        if !next.is_finite() || !temperature_error.is_finite() {
            return Err(SizingError::convergence(
                previous,
                iterations,
                ConvergenceReason::NonFinite,
            ));
        }
        if next > self.max_depth {
            return Err(SizingError::convergence(
                next,
                iterations,
                ConvergenceReason::DepthLimit,
            ));
        }
        if step.abs() < self.depth_tol || temperature_error.abs() < self.temperature_tol {
            return Ok(true);
        }
        if self.oscillating() {
            return Err(SizingError::convergence(
                next,
                iterations,
                ConvergenceReason::Oscillation,
            ));
        }
        if iterations >= self.max_iters {
            return Err(SizingError::convergence(
                next,
                iterations,
                ConvergenceReason::MaxIterations,
            ));
        }
        Ok(false)
    }

    /// Whether the last `window` steps alternate in sign without shrinking.
    fn oscillating(&self) -> bool {
        if self.window < 2 || self.steps.len() < self.window {
            return false;
        }
        let recent = &self.steps[self.steps.len() - self.window..];
        recent
            .windows(2)
            .all(|pair| pair[0] * pair[1] < 0.0 && pair[1].abs() >= pair[0].abs())
    }
}
