//! Heat pump and chiller efficiency lookups.
//!
//! Load optimisation converts building-side loads to ground-side loads with
//! a coefficient of performance (heating) or an energy efficiency ratio
//! (cooling). The coefficient may be a seasonal constant or interpolated from
//! tabulated data as a function of the average fluid temperature.
//!
//! All tables interpolate linearly and clamp to their end values outside the
//! tabulated range.

use thiserror::Error;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive, UnitInterval};

/// Errors from building or evaluating an efficiency table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EfficiencyError {
    #[error("efficiency table is empty")]
    Empty,

    #[error("table axis has {axis} entries but {values} values were given")]
    Shape { axis: usize, values: usize },

    #[error("table axis must be strictly increasing")]
    NotIncreasing,

    #[error("efficiencies must be strictly positive: {0}")]
    Coefficient(#[from] ConstraintError),

    #[error("this table needs a {0} to be evaluated")]
    MissingInput(&'static str),

    #[error("operating point {0} is not finite")]
    NonFinite(&'static str),
}

/// Conditions at which an efficiency is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Average fluid temperature on the ground side.
    pub temperature: ThermodynamicTemperature,

    /// Temperature on the building side, if known.
    pub secondary_temperature: Option<ThermodynamicTemperature>,

    /// Part-load ratio, if known.
    pub part_load: Option<Constrained<f64, UnitInterval>>,
}

impl OperatingPoint {
    #[must_use]
    pub fn at(temperature: ThermodynamicTemperature) -> Self {
        Self {
            temperature,
            secondary_temperature: None,
            part_load: None,
        }
    }
}

/// Supplies a heating COP or a cooling EER.
pub trait Efficiency {
    /// Returns the efficiency coefficient at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`EfficiencyError::MissingInput`] if the table needs an input
    /// that `point` does not carry.
    fn coefficient(&self, point: &OperatingPoint) -> Result<f64, EfficiencyError>;
}

impl<E: Efficiency> Efficiency for &E {
    fn coefficient(&self, point: &OperatingPoint) -> Result<f64, EfficiencyError> {
        (**self).coefficient(point)
    }
}

/// A constant seasonal efficiency (SCOP or SEER).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seasonal(Constrained<f64, StrictlyPositive>);

impl Seasonal {
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] unless `value` is strictly positive.
    pub fn new(value: f64) -> Result<Self, ConstraintError> {
        Ok(Self(StrictlyPositive::new(value)?))
    }
}

impl Efficiency for Seasonal {
    fn coefficient(&self, _point: &OperatingPoint) -> Result<f64, EfficiencyError> {
        Ok(self.0.into_inner())
    }
}

/// Efficiency tabulated against the average fluid temperature.
///
/// ```
/// use twine_ghe::support::efficiency::{Efficiency, EfficiencyCurve, OperatingPoint};
/// use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};
///
/// let celsius = ThermodynamicTemperature::new::<degree_celsius>;
/// let cop = EfficiencyCurve::new(
///     vec![celsius(5.0), celsius(10.0), celsius(15.0)],
///     vec![3.0, 4.0, 6.0],
/// )
/// .unwrap();
///
/// let at = |t| cop.coefficient(&OperatingPoint::at(celsius(t))).unwrap();
/// assert!((at(7.5) - 3.5).abs() < 1e-9);
/// assert!((at(0.0) - 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyCurve {
    temperatures: Vec<f64>,
    values: Vec<f64>,
}

impl EfficiencyCurve {
    /// # Errors
    ///
    /// Returns an [`EfficiencyError`] if the table is empty, the lengths
    /// differ, the temperatures are not strictly increasing, or any value is
    /// not strictly positive.
    pub fn new(
        temperatures: Vec<ThermodynamicTemperature>,
        values: Vec<f64>,
    ) -> Result<Self, EfficiencyError> {
        let temperatures = axis(&temperatures)?;
        if temperatures.len() != values.len() {
            return Err(EfficiencyError::Shape {
                axis: temperatures.len(),
                values: values.len(),
            });
        }
        check_positive(&values)?;
        Ok(Self {
            temperatures,
            values,
        })
    }
}

impl Efficiency for EfficiencyCurve {
    fn coefficient(&self, point: &OperatingPoint) -> Result<f64, EfficiencyError> {
        let (i, w) = locate(&self.temperatures, fluid_kelvin(point)?);
        Ok(lerp(&self.values, i, w))
    }
}

/// The second axis of an [`EfficiencyMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum SecondAxis {
    SecondaryTemperature(Vec<ThermodynamicTemperature>),
    PartLoad(Vec<f64>),
}

/// Efficiency tabulated against the average fluid temperature and a second
/// variable, interpolated bilinearly.
///
/// `values[i][j]` is the efficiency at the `i`-th fluid temperature and the
/// `j`-th entry of the second axis.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyMap {
    temperatures: Vec<f64>,
    second: Vec<f64>,
    uses_part_load: bool,
    values: Vec<Vec<f64>>,
}

impl EfficiencyMap {
    /// # Errors
    ///
    /// Returns an [`EfficiencyError`] if an axis is empty or not strictly
    /// increasing, the value grid does not match the axes, or any value is not
    /// strictly positive.
    pub fn new(
        temperatures: Vec<ThermodynamicTemperature>,
        second: SecondAxis,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, EfficiencyError> {
        let temperatures = axis(&temperatures)?;
        let (second, uses_part_load) = match second {
            SecondAxis::SecondaryTemperature(t) => (axis(&t)?, false),
            SecondAxis::PartLoad(ratios) => {
                for ratio in &ratios {
                    UnitInterval::new(*ratio)?;
                }
                check_increasing(&ratios)?;
                (ratios, true)
            }
        };

        if values.len() != temperatures.len() {
            return Err(EfficiencyError::Shape {
                axis: temperatures.len(),
                values: values.len(),
            });
        }
        for row in &values {
            if row.len() != second.len() {
                return Err(EfficiencyError::Shape {
                    axis: second.len(),
                    values: row.len(),
                });
            }
            check_positive(row)?;
        }

        Ok(Self {
            temperatures,
            second,
            uses_part_load,
            values,
        })
    }
}

impl Efficiency for EfficiencyMap {
    fn coefficient(&self, point: &OperatingPoint) -> Result<f64, EfficiencyError> {
        let y = if self.uses_part_load {
            point
                .part_load
                .ok_or(EfficiencyError::MissingInput("part-load ratio"))?
                .into_inner()
        } else {
            point
                .secondary_temperature
                .ok_or(EfficiencyError::MissingInput("secondary temperature"))?
                .get::<kelvin>()
        };
        if !y.is_finite() {
            return Err(EfficiencyError::NonFinite("secondary temperature"));
        }

        let (i, wx) = locate(&self.temperatures, fluid_kelvin(point)?);
        let (j, wy) = locate(&self.second, y);

        let row = |i: usize| lerp(&self.values[i], j, wy);
        if i + 1 < self.values.len() {
            Ok(row(i) * (1.0 - wx) + row(i + 1) * wx)
        } else {
            Ok(row(i))
        }
    }
}

fn axis(temperatures: &[ThermodynamicTemperature]) -> Result<Vec<f64>, EfficiencyError> {
    let values: Vec<f64> = temperatures.iter().map(|t| t.get::<kelvin>()).collect();
    check_increasing(&values)?;
    Ok(values)
}

fn check_increasing(values: &[f64]) -> Result<(), EfficiencyError> {
    if values.is_empty() {
        return Err(EfficiencyError::Empty);
    }
    if values.windows(2).all(|pair| pair[0] < pair[1]) {
        Ok(())
    } else {
        Err(EfficiencyError::NotIncreasing)
    }
}

fn check_positive(values: &[f64]) -> Result<(), EfficiencyError> {
    for value in values {
        StrictlyPositive::new(*value)?;
    }
    Ok(())
}

fn fluid_kelvin(point: &OperatingPoint) -> Result<f64, EfficiencyError> {
    let t = point.temperature.get::<kelvin>();
    if t.is_finite() {
        Ok(t)
    } else {
        Err(EfficiencyError::NonFinite("fluid temperature"))
    }
}

/// Finds the interval containing `x` and the weight of its upper end.
///
/// Values outside the axis clamp to the nearest end with zero weight. `x`
/// must be finite.
fn locate(axis: &[f64], x: f64) -> (usize, f64) {
    let last = axis.len() - 1;
    if last == 0 || x <= axis[0] {
        return (0, 0.0);
    }
    if x >= axis[last] {
        return (last, 0.0);
    }
    let i = axis.partition_point(|&a| a <= x) - 1;
    (i, (x - axis[i]) / (axis[i + 1] - axis[i]))
}

fn lerp(values: &[f64], i: usize, weight: f64) -> f64 {
    if i + 1 < values.len() {
        values[i] * (1.0 - weight) + values[i + 1] * weight
    } else {
        values[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn point(t: f64) -> OperatingPoint {
        OperatingPoint::at(celsius(t))
    }

    #[test]
    fn seasonal_is_constant() {
        let scop = Seasonal::new(4.5).unwrap();
        assert_relative_eq!(scop.coefficient(&point(-5.0)).unwrap(), 4.5);
        assert_relative_eq!(scop.coefficient(&point(25.0)).unwrap(), 4.5);
        assert!(Seasonal::new(0.0).is_err());
    }

    #[test]
    fn curve_interpolates_and_clamps() {
        let cop = EfficiencyCurve::new(
            vec![celsius(5.0), celsius(10.0), celsius(15.0)],
            vec![3.0, 4.0, 6.0],
        )
        .unwrap();

        assert_relative_eq!(cop.coefficient(&point(5.0)).unwrap(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(cop.coefficient(&point(7.5)).unwrap(), 3.5, epsilon = 1e-9);
        assert_relative_eq!(cop.coefficient(&point(10.0)).unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(cop.coefficient(&point(12.5)).unwrap(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(cop.coefficient(&point(0.0)).unwrap(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(cop.coefficient(&point(40.0)).unwrap(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn curve_validation() {
        assert_eq!(
            EfficiencyCurve::new(vec![celsius(3.0), celsius(4.0), celsius(6.0)], vec![5.0, 15.0]),
            Err(EfficiencyError::Shape { axis: 3, values: 2 })
        );
        assert!(matches!(
            EfficiencyCurve::new(vec![celsius(5.0), celsius(10.0)], vec![0.0, 4.0]),
            Err(EfficiencyError::Coefficient(_))
        ));
        assert_eq!(
            EfficiencyCurve::new(vec![celsius(10.0), celsius(5.0)], vec![3.0, 4.0]),
            Err(EfficiencyError::NotIncreasing)
        );
        assert_eq!(
            EfficiencyCurve::new(vec![], vec![]),
            Err(EfficiencyError::Empty)
        );
    }

    #[test]
    fn map_with_secondary_temperature() {
        let cop = EfficiencyMap::new(
            vec![celsius(1.5), celsius(2.5)],
            SecondAxis::SecondaryTemperature(vec![celsius(2.5), celsius(4.5)]),
            vec![vec![1.0, 2.0], vec![2.0, 4.0]],
        )
        .unwrap();

        let at = |t: f64, secondary: f64| {
            cop.coefficient(&OperatingPoint {
                secondary_temperature: Some(celsius(secondary)),
                ..point(t)
            })
            .unwrap()
        };
        assert_relative_eq!(at(1.5, 3.5), 1.5, epsilon = 1e-9);
        assert_relative_eq!(at(1.5, 3.0), 1.25, epsilon = 1e-9);
        assert_relative_eq!(at(2.0, 4.0), 2.625, epsilon = 1e-9);
        assert_relative_eq!(at(3.0, 4.0), 3.5, epsilon = 1e-9);

        assert_eq!(
            cop.coefficient(&point(2.0)),
            Err(EfficiencyError::MissingInput("secondary temperature"))
        );
    }

    #[test]
    fn non_finite_temperatures_are_rejected() {
        let cop = EfficiencyCurve::new(vec![celsius(5.0), celsius(15.0)], vec![3.0, 6.0]).unwrap();
        assert_eq!(
            cop.coefficient(&point(f64::NAN)),
            Err(EfficiencyError::NonFinite("fluid temperature"))
        );

        let map = EfficiencyMap::new(
            vec![celsius(5.0), celsius(15.0)],
            SecondAxis::SecondaryTemperature(vec![celsius(30.0), celsius(40.0)]),
            vec![vec![4.0, 3.0], vec![5.0, 4.0]],
        )
        .unwrap();
        let secondary_nan = OperatingPoint {
            secondary_temperature: Some(celsius(f64::NAN)),
            ..point(10.0)
        };
        assert_eq!(
            map.coefficient(&secondary_nan),
            Err(EfficiencyError::NonFinite("secondary temperature"))
        );
        assert_eq!(
            map.coefficient(&OperatingPoint {
                secondary_temperature: Some(celsius(35.0)),
                ..point(f64::INFINITY)
            }),
            Err(EfficiencyError::NonFinite("fluid temperature"))
        );
    }

    #[test]
    fn map_with_part_load() {
        let eer = EfficiencyMap::new(
            vec![celsius(10.0), celsius(20.0)],
            SecondAxis::PartLoad(vec![0.25, 1.0]),
            vec![vec![6.0, 5.0], vec![4.0, 3.0]],
        )
        .unwrap();

        let half = OperatingPoint {
            part_load: Some(UnitInterval::new(0.625).unwrap()),
            ..point(15.0)
        };
        assert_relative_eq!(eer.coefficient(&half).unwrap(), 4.5, epsilon = 1e-9);
        assert!(matches!(
            eer.coefficient(&point(15.0)),
            Err(EfficiencyError::MissingInput(_))
        ));
        assert!(matches!(
            EfficiencyMap::new(
                vec![celsius(10.0)],
                SecondAxis::PartLoad(vec![0.5, 1.5]),
                vec![vec![3.0, 3.0]],
            ),
            Err(EfficiencyError::Coefficient(ConstraintError::AboveMaximum))
        ));
    }
}
