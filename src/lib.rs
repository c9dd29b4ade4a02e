//! Birth Quality Core - lifespan-aware birth ritual quality
//!
//! The vanilla birth quality curve is authored in human years: it peaks for
//! mothers aged 20 to 30 and falls off by 65. This crate remaps a mother's
//! biological age into a human-equivalent age using her species' maturation
//! age and lifespan, so long- and short-lived races are scored on their own
//! timescale.
//!
//! Python bindings are available behind the `python` feature.

pub mod age;
pub mod config;
pub mod curve;
pub mod error;
pub mod ritual;

#[cfg(feature = "python")]
mod python;

pub use age::{human_equivalent_age, AgeMapping, AgeProfile, ReferenceProfile};
pub use config::{EngineConfig, Settings, SpeciesProfile, SpeciesRegistry};
pub use curve::SimpleCurve;
pub use error::{BirthQualityError, Result};
pub use ritual::{BirthQualityEngine, QualityFactor, Subject};
