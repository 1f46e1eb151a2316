//! # Twine GHE
//!
//! Borehole ground heat exchanger sizing for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! Given a building's heating and cooling loads, the ground's thermal
//! properties and a borehole layout, the crate finds the borehole depth that
//! keeps the circulating fluid between two temperature bounds over a
//! multi-year horizon. For a field of fixed depth it can instead work out how
//! much of the load the field can carry and how much must go to auxiliary
//! equipment.
//!
//! ## Crate layout
//!
//! - [`models`]: the [`Borefield`](models::thermal::ghe::Borefield) facade and
//!   its [`twine_core::Model`] implementation.
//! - [`support`]: ground properties, field geometry, the line-source response,
//!   efficiency tables and unit helpers.
//!
//! Modules in [`support`] are public because they are useful on their own,
//! but their APIs are not stable yet.
//!
//! ## Units
//!
//! Public APIs take and return [`uom`] quantities. Loads follow one sign
//! convention throughout: heating extracts heat from the ground and cooling
//! injects it.

pub mod models;
pub mod support;
