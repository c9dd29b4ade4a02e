//! Configuration module for species data and settings
//!
//! Engine configuration can be built in Rust, loaded from JSON, or
//! extracted from Python dicts by the bindings.

mod settings;
mod species;

pub use settings::*;
pub use species::*;

use crate::age::AgeMapping;
use crate::curve::SimpleCurve;
use crate::error::Result;
use serde::Deserialize;

/// Static engine configuration, shared by JSON loading and the Python
/// `init_config` dict
///
/// Expected JSON format:
/// `{"species": [{"def_name": "Human", "adult_min_age": 18, "life_expectancy": 80}],
///   "curve": [[14, 0.0], [15, 0.3]], "mapping": "plateau"}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Empty means the default registry (humans only)
    pub species: Vec<SpeciesProfile>,
    /// Quality curve points; `None` uses the vanilla birth curve
    pub curve: Option<Vec<(f32, f32)>>,
    pub mapping: AgeMapping,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn registry(&self) -> SpeciesRegistry {
        if self.species.is_empty() {
            SpeciesRegistry::default()
        } else {
            SpeciesRegistry::new(self.species.clone())
        }
    }

    pub fn quality_curve(&self) -> Result<SimpleCurve> {
        match &self.curve {
            Some(points) => SimpleCurve::new(points.iter().copied()),
            None => Ok(SimpleCurve::birth_quality()),
        }
    }
}
