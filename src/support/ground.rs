//! Ground thermal properties and undisturbed ground temperature models.

use uom::si::{
    f64::{HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintError, StrictlyPositive},
    units::VolumetricHeatCapacity,
};

/// The undisturbed temperature of the ground surrounding a borefield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundTemperature {
    /// The same temperature at every depth.
    Constant(ThermodynamicTemperature),

    /// A surface temperature plus a geothermal heat flux.
    ///
    /// The temperature rises linearly with depth at a rate of `flux / k`,
    /// so the average along a borehole of depth `H` is
    /// `surface + flux · H / (2 k)`.
    Flux {
        surface: ThermodynamicTemperature,
        flux: HeatFluxDensity,
    },
}

/// Thermal properties of the ground around a borefield.
///
/// # Example
///
/// ```
/// use twine_ghe::support::{
///     ground::{GroundProperties, GroundTemperature},
///     units::volumetric_heat_capacity,
/// };
/// use uom::si::{
///     f64::{ThermalConductivity, ThermodynamicTemperature},
///     thermal_conductivity::watt_per_meter_kelvin,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let ground = GroundProperties::new(
///     ThermalConductivity::new::<watt_per_meter_kelvin>(3.0),
///     volumetric_heat_capacity(2.4e6),
///     GroundTemperature::Constant(ThermodynamicTemperature::new::<degree_celsius>(10.0)),
/// )
/// .unwrap();
///
/// assert!((ground.diffusivity() - 1.25e-6).abs() < 1e-18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProperties {
    conductivity: Constrained<ThermalConductivity, StrictlyPositive>,
    heat_capacity: Constrained<VolumetricHeatCapacity, StrictlyPositive>,
    temperature: GroundTemperature,
}

impl GroundProperties {
    /// Creates ground properties.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the conductivity or the volumetric
    /// heat capacity is not strictly positive.
    pub fn new(
        conductivity: ThermalConductivity,
        heat_capacity: VolumetricHeatCapacity,
        temperature: GroundTemperature,
    ) -> Result<Self, ConstraintError> {
        Ok(Self {
            conductivity: StrictlyPositive::new(conductivity)?,
            heat_capacity: StrictlyPositive::new(heat_capacity)?,
            temperature,
        })
    }

    #[must_use]
    pub fn conductivity(&self) -> ThermalConductivity {
        self.conductivity.into_inner()
    }

    #[must_use]
    pub fn heat_capacity(&self) -> VolumetricHeatCapacity {
        self.heat_capacity.into_inner()
    }

    #[must_use]
    pub fn temperature(&self) -> GroundTemperature {
        self.temperature
    }

    /// Thermal diffusivity `k / C_v` in m²/s.
    #[must_use]
    pub fn diffusivity(&self) -> f64 {
        self.conductivity.as_ref().get::<watt_per_meter_kelvin>() / self.heat_capacity.as_ref().value
    }

    /// Average undisturbed temperature along a borehole of the given depth.
    #[must_use]
    pub fn undisturbed_temperature(&self, depth: Length) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.undisturbed_kelvin(depth.get::<meter>()))
    }

    /// Same as [`Self::undisturbed_temperature`] with SI magnitudes, for inner loops.
    pub(crate) fn undisturbed_kelvin(&self, depth_m: f64) -> f64 {
        match self.temperature {
            GroundTemperature::Constant(t) => t.get::<kelvin>(),
            GroundTemperature::Flux { surface, flux } => {
                let k = self.conductivity.as_ref().get::<watt_per_meter_kelvin>();
                surface.get::<kelvin>() + flux.get::<watt_per_square_meter>() * depth_m / (2.0 * k)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    use crate::support::units::volumetric_heat_capacity;

    fn conductivity(k: f64) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(k)
    }

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn constant_temperature_ignores_depth() {
        let ground = GroundProperties::new(
            conductivity(3.0),
            volumetric_heat_capacity(2.4e6),
            GroundTemperature::Constant(celsius(10.0)),
        )
        .unwrap();

        for depth in [0.0, 50.0, 200.0] {
            let t = ground.undisturbed_temperature(Length::new::<meter>(depth));
            assert_relative_eq!(t.get::<degree_celsius>(), 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn flux_temperature_rises_with_depth() {
        let ground = GroundProperties::new(
            conductivity(2.0),
            volumetric_heat_capacity(2.4e6),
            GroundTemperature::Flux {
                surface: celsius(10.0),
                flux: HeatFluxDensity::new::<watt_per_square_meter>(0.06),
            },
        )
        .unwrap();

        // 0.06 W/m² over 100 m at 2 W/m·K averages 1.5 K above the surface.
        let t = ground.undisturbed_temperature(Length::new::<meter>(100.0));
        assert_relative_eq!(t.get::<degree_celsius>(), 11.5, epsilon = 1e-9);
    }

    #[test]
    fn rejects_non_physical_properties() {
        let temperature = GroundTemperature::Constant(celsius(10.0));
        assert_eq!(
            GroundProperties::new(conductivity(0.0), volumetric_heat_capacity(2.4e6), temperature),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            GroundProperties::new(conductivity(3.0), volumetric_heat_capacity(-1.0), temperature),
            Err(ConstraintError::Negative)
        );
    }
}
