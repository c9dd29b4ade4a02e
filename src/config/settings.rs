//! User-facing settings

use serde::{Deserialize, Serialize};

/// The two toggles exposed in the host's settings window.
///
/// Field names on disk follow the host save keys so existing saves load
/// unchanged. Missing keys default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Short-lived races keep at least a full human-width peak plateau
    #[serde(rename = "preventShortLifespanPenalty")]
    pub prevent_short_lifespan_penalty: bool,
    /// Non-aging mothers are pinned at or before the end of the peak
    #[serde(rename = "AgelessAtPeakBirthQuality")]
    pub ageless_at_peak_birth_quality: bool,
}

impl Settings {
    pub fn new(prevent_short_lifespan_penalty: bool, ageless_at_peak_birth_quality: bool) -> Self {
        Self {
            prevent_short_lifespan_penalty,
            ageless_at_peak_birth_quality,
        }
    }
}
