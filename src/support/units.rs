//! Extensions to [`uom`] for ground heat exchanger modeling.
//!
//! All physical values in this crate are [`uom`] quantities. This module adds
//! the few that [`uom`] does not define directly:
//!
//! - [`VolumetricHeatCapacity`]: J/m³·K, the ground's heat storage per volume.
//! - [`LinearThermalResistance`]: m·K/W, borehole resistance per unit length.
//!
//! Values of these types are built with [`volumetric_heat_capacity`] and
//! [`linear_thermal_resistance`], which take SI magnitudes.
//!
//! ## Temperature differences
//!
//! [`TemperatureDifference::minus`] subtracts two absolute temperatures and
//! yields a `TemperatureInterval`, which is how temperature margins between
//! the ground and the fluid bounds are expressed:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use uom::si::temperature_interval::kelvin;
//! use twine_ghe::support::units::TemperatureDifference;
//!
//! let max_fluid = ThermodynamicTemperature::new::<degree_celsius>(16.0);
//! let ground = ThermodynamicTemperature::new::<degree_celsius>(10.0);
//! let margin = max_fluid.minus(ground);
//! assert!((margin.get::<kelvin>() - 6.0).abs() < 1e-9);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{
    LinearThermalResistance, VolumetricHeatCapacity, linear_thermal_resistance,
    volumetric_heat_capacity,
};
pub use temperature_difference::TemperatureDifference;
