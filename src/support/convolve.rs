//! Causal discrete convolution for temporal superposition.
//!
//! Borehole wall temperatures are the superposition of step-response
//! kernels weighted by load increments:
//! `y[i] = Σ_{j ≤ i} x[j] · h[i − j]`.
//! Hourly horizons run to hundreds of thousands of steps, so long inputs are
//! convolved through `rustfft`. Short inputs use the direct sum.

use rustfft::{FftPlanner, num_complex::Complex};

/// Above this many multiply-adds the FFT path is used.
const DIRECT_LIMIT: usize = 1 << 16;

/// Returns the first `x.len()` terms of the causal convolution of `x` with `h`.
///
/// Kernel terms beyond `x.len()` are ignored. A kernel shorter than `x`
/// is treated as zero past its end.
#[must_use]
pub fn causal_convolve(x: &[f64], h: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h = &h[..h.len().min(n)];
    if n == 0 || h.is_empty() {
        return vec![0.0; n];
    }
    if n.saturating_mul(h.len()) <= DIRECT_LIMIT {
        direct(x, h)
    } else {
        fft_convolve(x, h)
    }
}

fn direct(x: &[f64], h: &[f64]) -> Vec<f64> {
    (0..x.len())
        .map(|i| {
            let lo = (i + 1).saturating_sub(h.len());
            (lo..=i).map(|j| x[j] * h[i - j]).sum()
        })
        .collect()
}

fn fft_convolve(x: &[f64], h: &[f64]) -> Vec<f64> {
    let n = x.len();
    let size = (n + h.len() - 1).next_power_of_two();

    let padded = |values: &[f64]| -> Vec<Complex<f64>> {
        let mut buffer = vec![Complex::new(0.0, 0.0); size];
        for (slot, &value) in buffer.iter_mut().zip(values) {
            slot.re = value;
        }
        buffer
    };
    let mut a = padded(x);
    let mut b = padded(h);

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(size);
    forward.process(&mut a);
    forward.process(&mut b);
    for (lhs, rhs) in a.iter_mut().zip(&b) {
        *lhs *= *rhs;
    }
    planner.plan_fft_inverse(size).process(&mut a);

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / size as f64;
    a.iter().take(n).map(|c| c.re * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn direct_matches_hand_computation() {
        let y = causal_convolve(&[1.0, 2.0, 3.0], &[1.0, 0.5, 0.25]);
        assert_relative_eq!(y[0], 1.0);
        assert_relative_eq!(y[1], 2.5);
        assert_relative_eq!(y[2], 4.25);
    }

    #[test]
    fn fft_matches_direct_on_long_inputs() {
        let n = 1000;
        #[allow(clippy::cast_precision_loss)]
        let x: Vec<f64> = (0..n).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
        #[allow(clippy::cast_precision_loss)]
        let h: Vec<f64> = (1..=n).map(|i| (i as f64).ln()).collect();

        let fast = fft_convolve(&x, &h);
        let slow = direct(&x, &h);
        for (f, s) in fast.iter().zip(&slow) {
            assert_relative_eq!(*f, *s, epsilon = 1e-8, max_relative = 1e-10);
        }
    }

    #[test]
    fn step_input_accumulates_the_kernel() {
        let mut x = vec![0.0; 300];
        x[0] = 2.0;
        let h: Vec<f64> = (0..300).map(f64::from).collect();
        let y = causal_convolve(&x, &h);
        assert_relative_eq!(y[299], 598.0, max_relative = 1e-9);
    }

    #[test]
    fn short_kernel_is_zero_padded() {
        let y = causal_convolve(&[1.0, 1.0, 1.0, 1.0], &[1.0]);
        assert_eq!(y, vec![1.0; 4]);
        assert!(causal_convolve(&[], &[1.0]).is_empty());
    }
}
