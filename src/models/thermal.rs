//! Thermal systems models.
//!
//! This module contains models for ground heat exchangers and the fields of
//! boreholes they are built from.

pub mod ghe;
