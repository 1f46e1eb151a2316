//! Borefield geometry and borehole thermal resistance.
//!
//! A [`BoreField`] is the opaque layout handed to a thermal-response
//! collaborator: borehole positions in plan view and a common borehole
//! radius. The depth is not part of the geometry because it is the unknown
//! that sizing solves for.

use thiserror::Error;
use uom::si::{f64::Length, length::meter};

use crate::support::{
    constraint::{Constrained, ConstraintError, StrictlyPositive},
    units::LinearThermalResistance,
};

/// Errors raised while building a [`BoreField`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("a borefield needs at least one borehole")]
    Empty,

    #[error("boreholes {first} and {second} overlap")]
    Overlapping { first: usize, second: usize },

    #[error("invalid borehole radius: {0}")]
    Radius(#[from] ConstraintError),
}

/// Plan-view position of a single borehole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Borehole {
    pub x: Length,
    pub y: Length,
}

impl Borehole {
    #[must_use]
    pub fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }
}

/// A field of vertical boreholes sharing one radius.
#[derive(Debug, Clone, PartialEq)]
pub struct BoreField {
    boreholes: Vec<Borehole>,
    radius: Constrained<Length, StrictlyPositive>,
}

impl BoreField {
    /// Creates a borefield from explicit borehole positions.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the field is empty, the radius is not
    /// positive, or two boreholes are closer than one diameter.
    pub fn new(boreholes: Vec<Borehole>, radius: Length) -> Result<Self, GeometryError> {
        let radius = StrictlyPositive::new(radius)?;
        if boreholes.is_empty() {
            return Err(GeometryError::Empty);
        }

        let min_distance = 2.0 * radius.as_ref().get::<meter>();
        for (first, a) in boreholes.iter().enumerate() {
            for (offset, b) in boreholes[first + 1..].iter().enumerate() {
                if distance(a, b) < min_distance {
                    return Err(GeometryError::Overlapping {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }

        Ok(Self { boreholes, radius })
    }

    /// Creates a rectangular `n_x` by `n_y` grid with the given spacings.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if either count is zero, the radius is not
    /// positive, or the spacing is smaller than one borehole diameter.
    ///
    /// # Example
    ///
    /// ```
    /// use twine_ghe::support::borefield::BoreField;
    /// use uom::si::{f64::Length, length::meter};
    ///
    /// let m = Length::new::<meter>;
    /// let field = BoreField::rectangle(10, 12, m(6.0), m(6.0), m(0.075)).unwrap();
    /// assert_eq!(field.len(), 120);
    /// ```
    pub fn rectangle(
        n_x: usize,
        n_y: usize,
        spacing_x: Length,
        spacing_y: Length,
        radius: Length,
    ) -> Result<Self, GeometryError> {
        let mut boreholes = Vec::with_capacity(n_x * n_y);
        for i in 0..n_x {
            for j in 0..n_y {
                #[allow(clippy::cast_precision_loss)]
                let (fx, fy) = (i as f64, j as f64);
                boreholes.push(Borehole::new(spacing_x * fx, spacing_y * fy));
            }
        }
        Self::new(boreholes, radius)
    }

    /// Number of boreholes in the field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boreholes.len()
    }

    /// Always `false`, construction rejects empty fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boreholes.is_empty()
    }

    #[must_use]
    pub fn boreholes(&self) -> &[Borehole] {
        &self.boreholes
    }

    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius.into_inner()
    }

    /// Distinct borehole-to-borehole distances in meters and how many ordered
    /// pairs share each one.
    ///
    /// A borehole paired with itself contributes the borehole radius.
    /// Distances are grouped after rounding to the nearest micrometer, which
    /// collapses the many repeated distances of a regular grid.
    #[must_use]
    pub fn pair_distances(&self) -> Vec<(f64, usize)> {
        let radius = self.radius.as_ref().get::<meter>();
        let mut keyed: Vec<(i64, f64)> = Vec::with_capacity(self.len() * self.len());
        for (i, a) in self.boreholes.iter().enumerate() {
            for (j, b) in self.boreholes.iter().enumerate() {
                let d = if i == j { radius } else { distance(a, b) };
                #[allow(clippy::cast_possible_truncation)]
                keyed.push(((d * 1e6).round() as i64, d));
            }
        }
        keyed.sort_by_key(|&(key, _)| key);

        let mut grouped: Vec<(f64, usize)> = Vec::new();
        let mut last_key = None;
        for (key, d) in keyed {
            match grouped.last_mut() {
                Some((_, count)) if last_key == Some(key) => *count += 1,
                _ => grouped.push((d, 1)),
            }
            last_key = Some(key);
        }
        grouped
    }
}

fn distance(a: &Borehole, b: &Borehole) -> f64 {
    let dx = (a.x - b.x).get::<meter>();
    let dy = (a.y - b.y).get::<meter>();
    dx.hypot(dy)
}

/// Supplies the effective borehole thermal resistance `Rb` for a depth.
///
/// A constant [`BoreholeResistance`] is the common case. Implementations that
/// derive `Rb` from fluid and pipe data can vary it with depth, and sizing
/// re-queries it at every iteration.
pub trait ResistanceModel {
    fn borehole_resistance(&self, depth: Length) -> LinearThermalResistance;
}

/// A constant, strictly positive borehole thermal resistance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoreholeResistance(Constrained<LinearThermalResistance, StrictlyPositive>);

impl BoreholeResistance {
    /// Creates a constant borehole resistance.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] unless the resistance is strictly positive.
    pub fn new(value: LinearThermalResistance) -> Result<Self, ConstraintError> {
        Ok(Self(StrictlyPositive::new(value)?))
    }

    #[must_use]
    pub fn get(&self) -> LinearThermalResistance {
        self.0.into_inner()
    }
}

impl ResistanceModel for BoreholeResistance {
    fn borehole_resistance(&self, _depth: Length) -> LinearThermalResistance {
        self.get()
    }
}
