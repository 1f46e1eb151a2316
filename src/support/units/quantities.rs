use std::marker::PhantomData;

use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P3, Z0},
};

/// Volumetric heat capacity, J/m³·K in SI.
pub type VolumetricHeatCapacity = Quantity<ISQ<N1, P1, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Thermal resistance per unit length, m·K/W in SI.
pub type LinearThermalResistance = Quantity<ISQ<N1, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`VolumetricHeatCapacity`] from a value in J/m³·K.
#[must_use]
pub fn volumetric_heat_capacity(joule_per_cubic_meter_kelvin: f64) -> VolumetricHeatCapacity {
    Quantity {
        dimension: PhantomData,
        units: PhantomData,
        value: joule_per_cubic_meter_kelvin,
    }
}

/// Creates a [`LinearThermalResistance`] from a value in m·K/W.
#[must_use]
pub fn linear_thermal_resistance(meter_kelvin_per_watt: f64) -> LinearThermalResistance {
    Quantity {
        dimension: PhantomData,
        units: PhantomData,
        value: meter_kelvin_per_watt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Power, TemperatureInterval, ThermalConductivity},
        length::meter,
        power::watt,
        temperature_interval::kelvin,
        thermal_conductivity::watt_per_meter_kelvin,
    };

    #[test]
    fn resistance_times_power_per_length_is_temperature() {
        let rb = linear_thermal_resistance(0.2);
        let q = Power::new::<watt>(12_000.0);
        let length = Length::new::<meter>(1_200.0);
        let delta: TemperatureInterval = rb * q / length;
        assert_relative_eq!(delta.get::<kelvin>(), 2.0);
    }

    #[test]
    fn diffusivity_from_conductivity_and_capacity() {
        let k = ThermalConductivity::new::<watt_per_meter_kelvin>(3.0);
        let cv = volumetric_heat_capacity(2.4e6);
        let alpha = k / cv;
        assert_relative_eq!(alpha.value, 1.25e-6);
    }
}
