//! Borehole ground heat exchanger sizing.
//!
//! [`Borefield`] holds everything that describes a field (ground, layout,
//! borehole resistance, fluid temperature bounds, simulation period, and the
//! building load) and sizes the depth that keeps the fluid within bounds.
//! It also implements [`twine_core::Model`], sizing the stored field for
//! whatever load it is called with.
//!
//! The computational core lives in an internal module and holds no state.
//!
//! # Example
//!
//! ```
//! use twine_ghe::{
//!     models::thermal::ghe::{Borefield, MonthlyLoad, Quadrant},
//!     support::{
//!         borefield::{BoreField, BoreholeResistance},
//!         ground::{GroundProperties, GroundTemperature},
//!         response::InfiniteLineSource,
//!         units::{linear_thermal_resistance, volumetric_heat_capacity},
//!     },
//! };
//! use uom::si::{
//!     energy::kilowatt_hour,
//!     f64::{Energy, Length, Power, ThermalConductivity, ThermodynamicTemperature},
//!     length::meter,
//!     power::kilowatt,
//!     thermal_conductivity::watt_per_meter_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let ground = GroundProperties::new(
//!     ThermalConductivity::new::<watt_per_meter_kelvin>(3.0),
//!     volumetric_heat_capacity(2.4e6),
//!     GroundTemperature::Constant(ThermodynamicTemperature::new::<degree_celsius>(10.0)),
//! )
//! .unwrap();
//! let m = Length::new::<meter>;
//! let field = BoreField::rectangle(10, 12, m(6.0), m(6.0), m(0.075)).unwrap();
//! let resistance = BoreholeResistance::new(linear_thermal_resistance(0.2)).unwrap();
//!
//! let mut borefield = Borefield::new(ground, field, resistance, InfiniteLineSource::new());
//!
//! let heating = [0.155, 0.148, 0.125, 0.099, 0.064, 0.0, 0.0, 0.0, 0.061, 0.087, 0.117, 0.144]
//!     .map(|share| Energy::new::<kilowatt_hour>(300_000.0 * share));
//! let cooling = [0.025, 0.05, 0.05, 0.05, 0.075, 0.1, 0.2, 0.2, 0.1, 0.075, 0.05, 0.025]
//!     .map(|share| Energy::new::<kilowatt_hour>(160_000.0 * share));
//! let peak_heating = [160.0, 142.0, 102.0, 55.0, 0.0, 0.0, 0.0, 0.0, 40.4, 85.0, 119.0, 136.0]
//!     .map(Power::new::<kilowatt>);
//! let peak_cooling = [0.0, 0.0, 34.0, 69.0, 133.0, 187.0, 213.0, 240.0, 160.0, 37.0, 0.0, 0.0]
//!     .map(Power::new::<kilowatt>);
//! borefield.set_load(MonthlyLoad::new(&heating, &cooling, &peak_heating, &peak_cooling).unwrap());
//!
//! let depth = borefield.size(None, None).unwrap();
//! assert!((depth.get::<meter>() - 91.71).abs() < 0.01);
//! assert_eq!(borefield.result().unwrap().quadrant, Quadrant::InjectionPeakMonth);
//! ```

pub(crate) mod core;

pub use self::core::{
    BoundsError, ColumnOrder, ConvergenceReason, Direction, Directional, Extreme, HOURS_PER_YEAR,
    HourlyLoad, InvalidQuadrant, LimitingMonths, LoadDurationCurve, LoadError, LoadProfile,
    MONTHS, MonthlyLoad, MonthlySummary, OptimiseConfig, OptimiseError, OptimiseMethod,
    OptimisedLoads, ProfileError, ProfileFormat, Quadrant, Resolution, SizingConfig, SizingError,
    SizingEvent, SizingLevel, SizingObserver, SizingResult, TemperatureBounds,
    TemperatureProfile,
};

use twine_core::Model;
use uom::{
    ConstZero,
    si::{
        f64::{Length, TemperatureInterval, ThermodynamicTemperature},
        length::meter,
        time::hour,
    },
};

use crate::support::{
    borefield::{BoreField, BoreholeResistance, ResistanceModel},
    constraint::{ConstraintError, StrictlyPositive},
    efficiency::Efficiency,
    ground::GroundProperties,
    response::ThermalResponse,
};

use self::core::ResponseEvaluator;

/// Where a [`Borefield`] stands with respect to sizing.
///
/// Any change to the inputs returns the borefield to
/// [`SizingState::Unsized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingState {
    Unsized,
    Sized(SizingResult),

    /// The last sizing attempt at this level failed.
    Failed(SizingLevel),
}

/// A borehole field together with its load and design constraints.
///
/// Fluid temperature bounds default to 0 °C and 16 °C and the simulation
/// period to 20 years. The load starts at zero.
#[derive(Debug, Clone)]
pub struct Borefield<R, B = BoreholeResistance> {
    ground: GroundProperties,
    field: BoreField,
    resistance: B,
    response: R,
    bounds: TemperatureBounds,
    years: usize,
    load: LoadProfile,
    config: SizingConfig,
    state: SizingState,
}

impl<R: ThermalResponse, B: ResistanceModel> Borefield<R, B> {
    /// Creates an unsized borefield with the default bounds and period.
    pub fn new(ground: GroundProperties, field: BoreField, resistance: B, response: R) -> Self {
        Self {
            ground,
            field,
            resistance,
            response,
            bounds: TemperatureBounds::default(),
            years: 20,
            load: LoadProfile::default(),
            config: SizingConfig::default(),
            state: SizingState::Unsized,
        }
    }

    #[must_use]
    pub fn ground(&self) -> &GroundProperties {
        &self.ground
    }

    #[must_use]
    pub fn borefield(&self) -> &BoreField {
        &self.field
    }

    #[must_use]
    pub fn bounds(&self) -> TemperatureBounds {
        self.bounds
    }

    /// Simulation period in years.
    #[must_use]
    pub fn simulation_period(&self) -> usize {
        self.years
    }

    #[must_use]
    pub fn load(&self) -> &LoadProfile {
        &self.load
    }

    #[must_use]
    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SizingState {
        self.state
    }

    /// The result of the last successful sizing, unless an input has
    /// changed since.
    #[must_use]
    pub fn result(&self) -> Option<&SizingResult> {
        match &self.state {
            SizingState::Sized(result) => Some(result),
            SizingState::Unsized | SizingState::Failed(_) => None,
        }
    }

    /// Replaces the ground properties.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::GroundOutside`] if the new undisturbed ground
    /// temperature is not strictly inside the current bounds. The ground is
    /// unchanged on error.
    pub fn set_ground_parameters(&mut self, ground: GroundProperties) -> Result<(), BoundsError> {
        check_ground(&ground, &self.bounds, self.config.initial_depth)?;
        self.ground = ground;
        self.invalidate();
        Ok(())
    }

    pub fn set_borefield(&mut self, field: BoreField) {
        self.field = field;
        self.invalidate();
    }

    pub fn set_borehole_resistance(&mut self, resistance: B) {
        self.resistance = resistance;
        self.invalidate();
    }

    pub fn set_load(&mut self, load: impl Into<LoadProfile>) {
        self.load = load.into();
        self.invalidate();
    }

    /// Replaces the sizing configuration.
    ///
    /// The level and quadrant passed to [`Self::size`] override the ones
    /// stored here.
    pub fn set_config(&mut self, config: SizingConfig) {
        self.config = config;
        self.invalidate();
    }

    /// Sets the maximum average fluid temperature.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Inverted`] if `max` is not above the current
    /// minimum, or [`BoundsError::GroundOutside`] if the undisturbed ground
    /// temperature is not below `max`. The bounds are unchanged on error.
    pub fn set_max_ground_temperature(
        &mut self,
        max: ThermodynamicTemperature,
    ) -> Result<(), BoundsError> {
        self.set_bounds(TemperatureBounds::new(self.bounds.min(), max)?)
    }

    /// Sets the minimum average fluid temperature.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Inverted`] if `min` is not below the current
    /// maximum, or [`BoundsError::GroundOutside`] if the undisturbed ground
    /// temperature is not above `min`. The bounds are unchanged on error.
    pub fn set_min_ground_temperature(
        &mut self,
        min: ThermodynamicTemperature,
    ) -> Result<(), BoundsError> {
        self.set_bounds(TemperatureBounds::new(min, self.bounds.max())?)
    }

    /// Sets the number of years the field must stay within bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `years` is zero.
    pub fn set_simulation_period(&mut self, years: usize) -> Result<(), ConstraintError> {
        self.years = StrictlyPositive::new(years)?.into_inner();
        self.invalidate();
        Ok(())
    }

    /// Sizes the field and returns the required depth.
    ///
    /// `level` overrides the configured level, and `quadrant` (1 to 4)
    /// forces a limiting case instead of evaluating both directions.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Quadrant`] for a quadrant outside `1..=4`, and
    /// any other [`SizingError`] from the sizing itself.
    pub fn size(
        &mut self,
        level: Option<SizingLevel>,
        quadrant: Option<u8>,
    ) -> Result<Length, SizingError> {
        self.size_observed(level, quadrant, &mut ())
            .map(|result| result.depth)
    }

    /// Sizes with the three-pulse monthly method.
    ///
    /// # Errors
    ///
    /// See [`Self::size`].
    pub fn size_l2(&mut self, quadrant: Option<u8>) -> Result<Length, SizingError> {
        self.size(Some(SizingLevel::Level2), quadrant)
    }

    /// Sizes with monthly superposition.
    ///
    /// # Errors
    ///
    /// See [`Self::size`].
    pub fn size_l3(&mut self, quadrant: Option<u8>) -> Result<Length, SizingError> {
        self.size(Some(SizingLevel::Level3), quadrant)
    }

    /// Sizes with hourly superposition.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InsufficientData`] unless the load is hourly.
    /// See [`Self::size`] for the rest.
    pub fn size_l4(&mut self, quadrant: Option<u8>) -> Result<Length, SizingError> {
        self.size(Some(SizingLevel::Level4), quadrant)
    }

    /// Sizes the field, reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// See [`Self::size`].
    pub fn size_observed(
        &mut self,
        level: Option<SizingLevel>,
        quadrant: Option<u8>,
        observer: &mut impl SizingObserver,
    ) -> Result<SizingResult, SizingError> {
        let config = SizingConfig {
            level: level.or(self.config.level),
            quadrant: match quadrant {
                Some(number) => Some(Quadrant::try_from(number)?),
                None => self.config.quadrant,
            },
            ..self.config
        };

        let outcome = self::core::size(&self.evaluator(), &self.load, &self.bounds, &config, observer);
        self.state = match &outcome {
            Ok(result) => SizingState::Sized(*result),
            Err(_) => SizingState::Failed(config.level.unwrap_or(match self.load {
                LoadProfile::Monthly(_) => SizingLevel::Level2,
                LoadProfile::Hourly(_) => SizingLevel::Level4,
            })),
        };
        outcome
    }

    /// Fluid temperatures over the simulation period at a given depth.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InsufficientData`] for hourly resolution
    /// without hourly data, or [`SizingError::Response`] if the response
    /// collaborator fails.
    pub fn calculate_temperatures(
        &self,
        depth: Length,
        resolution: Resolution,
    ) -> Result<TemperatureProfile, SizingError> {
        let evaluator = self.evaluator();
        let depth = depth.get::<meter>();
        match resolution {
            Resolution::Monthly => {
                let peak_hours = self.config.peak_duration.get::<hour>();
                evaluator.monthly(depth, &self.load.summary(), peak_hours)
            }
            Resolution::Hourly => {
                let hourly = self.load.hourly().ok_or(SizingError::InsufficientData {
                    level: SizingLevel::Level4,
                })?;
                evaluator.hourly(depth, hourly)
            }
        }
    }

    /// Splits the hourly load into the part a field of `depth` can serve and
    /// the part that must go to external equipment.
    ///
    /// # Errors
    ///
    /// Returns [`OptimiseError::InsufficientData`] unless the load is hourly,
    /// and any other [`OptimiseError`] from the threshold searches.
    pub fn optimise_load_profile(
        &self,
        depth: Length,
        heating: &impl Efficiency,
        cooling: &impl Efficiency,
        config: &OptimiseConfig,
    ) -> Result<OptimisedLoads, OptimiseError> {
        self.optimise_load_profile_observed(depth, heating, cooling, config, &mut ())
    }

    /// Same as [`Self::optimise_load_profile`], reporting each threshold
    /// update to `observer`.
    ///
    /// # Errors
    ///
    /// See [`Self::optimise_load_profile`].
    pub fn optimise_load_profile_observed(
        &self,
        depth: Length,
        heating: &impl Efficiency,
        cooling: &impl Efficiency,
        config: &OptimiseConfig,
        observer: &mut impl SizingObserver,
    ) -> Result<OptimisedLoads, OptimiseError> {
        self::core::optimise(
            &self.evaluator(),
            depth,
            &self.load,
            &self.bounds,
            heating,
            cooling,
            config,
            observer,
        )
    }

    fn evaluator(&self) -> ResponseEvaluator<'_, R, B> {
        ResponseEvaluator::new(
            &self.field,
            &self.ground,
            &self.resistance,
            &self.response,
            self.years,
        )
    }

    fn set_bounds(&mut self, bounds: TemperatureBounds) -> Result<(), BoundsError> {
        check_ground(&self.ground, &bounds, self.config.initial_depth)?;
        self.bounds = bounds;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.state = SizingState::Unsized;
    }
}

/// Checks that the undisturbed ground at `depth` lies strictly inside `bounds`.
fn check_ground(
    ground: &GroundProperties,
    bounds: &TemperatureBounds,
    depth: Length,
) -> Result<(), BoundsError> {
    let margins = bounds.margins(ground.undisturbed_temperature(depth));
    if margins.extraction <= TemperatureInterval::ZERO
        || margins.injection <= TemperatureInterval::ZERO
    {
        return Err(BoundsError::GroundOutside);
    }
    Ok(())
}

/// Sizes the stored field for the given load without touching its state.
impl<R: ThermalResponse, B: ResistanceModel> Model for Borefield<R, B> {
    type Input = LoadProfile;
    type Output = SizingResult;
    type Error = SizingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::size(&self.evaluator(), input, &self.bounds, &self.config, &mut ())
    }
}
