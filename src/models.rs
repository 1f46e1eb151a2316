//! Public Twine models.
//!
//! # Model structure
//!
//! A model lives in its own module with an internal `core` submodule that
//! holds the numerics. `core` is not part of the public API, although the
//! types its functions take and return are re-exported by the model module.
//!
//! The model module owns a stateful facade for interactive use and a
//! [`twine_core::Model`] implementation for composition with other Twine
//! models. Both delegate to `core`.

pub mod thermal;
