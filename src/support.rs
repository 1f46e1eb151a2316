//! Building blocks shared by ground heat exchanger models.
//!
//! These modules are public because they are useful on their own (a caller
//! may want the line-source response or an efficiency table without sizing
//! anything), but their APIs are not yet stable.

pub mod borefield;
pub mod constraint;
pub mod convolve;
pub mod efficiency;
pub mod ground;
pub mod response;
pub mod units;
