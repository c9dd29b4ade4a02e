//! Species definitions and the human baseline

use crate::age::{AgeProfile, ReferenceProfile};
use crate::error::{BirthQualityError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Def name of the baseline species
pub const HUMAN_DEF_NAME: &str = "Human";

/// Adult stage start used when a species does not define one
pub const FALLBACK_MATURATION_AGE: f32 = 18.0;

/// Vanilla human life expectancy
pub const HUMAN_LIFE_EXPECTANCY: f32 = 80.0;

/// Static age data for one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    pub def_name: String,
    /// Minimum age of the adult life stage, if the species has one
    #[serde(default)]
    pub adult_min_age: Option<f32>,
    pub life_expectancy: f32,
}

impl SpeciesProfile {
    pub fn new(def_name: impl Into<String>, adult_min_age: Option<f32>, life_expectancy: f32) -> Self {
        Self {
            def_name: def_name.into(),
            adult_min_age,
            life_expectancy,
        }
    }

    pub fn human() -> Self {
        Self::new(
            HUMAN_DEF_NAME,
            Some(FALLBACK_MATURATION_AGE),
            HUMAN_LIFE_EXPECTANCY,
        )
    }
}

/// Species lookup keyed by def name
#[derive(Debug, Clone)]
pub struct SpeciesRegistry {
    species: AHashMap<String, SpeciesProfile>,
}

impl Default for SpeciesRegistry {
    fn default() -> Self {
        Self::new(vec![SpeciesProfile::human()])
    }
}

impl SpeciesRegistry {
    /// Build a registry; later entries win on duplicate def names
    pub fn new(profiles: Vec<SpeciesProfile>) -> Self {
        let mut species = AHashMap::with_capacity(profiles.len());
        for profile in profiles {
            species.insert(profile.def_name.clone(), profile);
        }
        Self { species }
    }

    pub fn insert(&mut self, profile: SpeciesProfile) {
        self.species.insert(profile.def_name.clone(), profile);
    }

    pub fn get(&self, def_name: &str) -> Option<&SpeciesProfile> {
        self.species.get(def_name)
    }

    /// Strict lookup for callers that want to report unknown species
    pub fn require(&self, def_name: &str) -> Result<&SpeciesProfile> {
        self.get(def_name)
            .ok_or_else(|| BirthQualityError::SpeciesNotFound(def_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Resolve the human baseline.
    ///
    /// Without a registered human the lifespan resolves to 0, which makes
    /// the mapper pass ages through unchanged.
    pub fn reference(&self) -> ReferenceProfile {
        match self.get(HUMAN_DEF_NAME) {
            Some(human) => ReferenceProfile::resolve(human.adult_min_age, human.life_expectancy),
            None => {
                warn!("no {} species registered; ages will pass through", HUMAN_DEF_NAME);
                ReferenceProfile::resolve(None, 0.0)
            }
        }
    }

    /// Build the age profile of a pawn of `def_name`.
    ///
    /// Unknown species get a zero lifespan so the mapper falls back to the
    /// raw biological age instead of failing the caller.
    pub fn age_profile(&self, def_name: &str, biological_age: f32) -> AgeProfile {
        match self.get(def_name) {
            Some(species) => AgeProfile::new(
                biological_age,
                species.adult_min_age.unwrap_or(0.0),
                species.life_expectancy,
            ),
            None => {
                warn!(def_name, "unknown species; using biological age as-is");
                AgeProfile::new(biological_age, 0.0, 0.0)
            }
        }
    }
}
