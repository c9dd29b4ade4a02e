//! Six-breakpoint age mapping
//!
//! The first version of the mapping: each vanilla curve breakpoint is moved
//! into the race's timescale (14, 15 and 20 by maturation, 30, 40 and 65 by
//! lifespan) and ages are interpolated between the moved points. Kept for
//! hosts that need to reproduce older saves.

use super::mapper::{AgeProfile, AgeRatios, ReferenceProfile, MIN_PLATEAU_WIDTH};

/// Human ages of the vanilla curve breakpoints
pub const LEGACY_BREAKPOINTS: [f32; 6] = [14.0, 15.0, 20.0, 30.0, 40.0, 65.0];

/// Breakpoints below this index scale with maturation, the rest with lifespan
const LIFESPAN_SCALED_FROM: usize = 3;

/// Breakpoints moved into the race's biological years, non-decreasing
fn scaled_breakpoints(ratios: &AgeRatios) -> [f32; 6] {
    let mut scaled = [0.0f32; 6];
    let mut floor = 0.0f32;
    for (i, human_age) in LEGACY_BREAKPOINTS.iter().enumerate() {
        let ratio = if i < LIFESPAN_SCALED_FROM {
            ratios.mature_ratio
        } else {
            ratios.lifespan_ratio
        };
        floor = floor.max(human_age * ratio);
        scaled[i] = floor;
    }
    scaled
}

/// Legacy human-equivalent age. Same fallbacks as the plateau mapping,
/// ignores settings.
pub fn legacy_equivalent_age(profile: Option<&AgeProfile>, reference: &ReferenceProfile) -> f32 {
    let Some(profile) = profile else {
        return 0.0;
    };
    let Some(ratios) = AgeRatios::resolve(profile, reference) else {
        return profile.biological_age;
    };

    let age = profile.biological_age;
    let bio = scaled_breakpoints(&ratios);
    let last = bio.len() - 1;

    if age <= bio[0] {
        return age / ratios.mature_ratio;
    }
    if age >= bio[last] {
        return LEGACY_BREAKPOINTS[last] + (age - bio[last]) / ratios.lifespan_ratio;
    }

    for i in 0..last {
        let (lo, hi) = (bio[i], bio[i + 1]);
        if age < hi {
            let range = hi - lo;
            if range <= MIN_PLATEAU_WIDTH {
                return LEGACY_BREAKPOINTS[i];
            }
            let progress = (age - lo) / range;
            return LEGACY_BREAKPOINTS[i]
                + progress * (LEGACY_BREAKPOINTS[i + 1] - LEGACY_BREAKPOINTS[i]);
        }
    }
    LEGACY_BREAKPOINTS[last]
}
