const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Exponential integral `E₁(x) = ∫ₓ^∞ e^(−t) / t dt` for `x > 0`.
///
/// Uses the power series for `x ≤ 1` and a continued fraction (modified
/// Lentz) above. Returns `+∞` for `x ≤ 0` and `0` once `e^(−x)` underflows.
#[must_use]
pub fn exp_integral_e1(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return f64::INFINITY;
    }
    if x > 700.0 {
        return 0.0;
    }
    if x <= 1.0 { series(x) } else { continued_fraction(x) }
}

fn series(x: f64) -> f64 {
    let mut sum = 0.0;
    let mut term = 1.0;
    for k in 1..=200 {
        let k = f64::from(k);
        term *= -x / k;
        let delta = term / k;
        sum += delta;
        if delta.abs() < 1e-16 * sum.abs() {
            break;
        }
    }
    -EULER_GAMMA - x.ln() - sum
}

fn continued_fraction(x: f64) -> f64 {
    let tiny = 1e-300;
    let mut b = x + 1.0;
    let mut c = 1.0 / tiny;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=200 {
        let i = f64::from(i);
        let a = -i * i;
        b += 2.0;
        d = 1.0 / (a * d + b);
        c = b + a / c;
        let delta = c * d;
        h *= delta;
        if (delta - 1.0).abs() < 1e-15 {
            break;
        }
    }
    h * (-x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn tabulated_values() {
        // Abramowitz & Stegun, table 5.1.
        assert_relative_eq!(exp_integral_e1(0.1), 1.822_923_958, max_relative = 1e-9);
        assert_relative_eq!(exp_integral_e1(0.5), 0.559_773_595, max_relative = 1e-9);
        assert_relative_eq!(exp_integral_e1(1.0), 0.219_383_934, max_relative = 1e-8);
        assert_relative_eq!(exp_integral_e1(2.0), 0.048_900_511, max_relative = 1e-8);
        assert_relative_eq!(exp_integral_e1(5.0), 0.001_148_296, max_relative = 1e-6);
    }

    #[test]
    fn branches_agree_at_the_switch() {
        let below = exp_integral_e1(1.0);
        let above = continued_fraction(1.0);
        assert_relative_eq!(below, above, max_relative = 1e-12);
    }

    #[test]
    fn limits() {
        assert!(exp_integral_e1(0.0).is_infinite());
        assert!(exp_integral_e1(-1.0).is_infinite());
        assert!(exp_integral_e1(800.0).abs() < f64::EPSILON);
        assert!(exp_integral_e1(f64::NAN).is_nan());
    }
}
