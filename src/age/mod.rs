//! Age equivalence module
//!
//! Maps a race's biological age onto the human timescale the birth quality
//! curve was authored for.

mod legacy;
mod mapper;


pub use legacy::*;
pub use mapper::*;

use crate::config::Settings;
use serde::{Deserialize, Serialize};

/// Which mapping algorithm the engine uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeMapping {
    /// Ratio-based three-segment mapping with configurable options
    #[default]
    Plateau,
    /// Fixed six-breakpoint mapping; ignores settings
    Legacy,
}

impl AgeMapping {
    /// Dispatch to the selected mapping
    #[inline]
    pub fn equivalent_age(
        self,
        profile: Option<&AgeProfile>,
        reference: &ReferenceProfile,
        settings: &Settings,
        ageless: bool,
    ) -> f32 {
        match self {
            AgeMapping::Plateau => human_equivalent_age(profile, reference, settings, ageless),
            AgeMapping::Legacy => legacy_equivalent_age(profile, reference),
        }
    }
}
