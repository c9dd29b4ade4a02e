//! Ratio-based age mapping with a peak plateau
//!
//! A pawn's biological age is split into three segments around the human
//! peak (20..30). Growth scales with the maturation ratio, decline with the
//! lifespan ratio, and the plateau is stretched linearly in between.

use crate::config::{Settings, FALLBACK_MATURATION_AGE, HUMAN_LIFE_EXPECTANCY};
use tracing::trace;

/// Human age where the quality curve reaches its peak
pub const PEAK_START: f32 = 20.0;
/// Human age where the quality curve starts to decline
pub const PEAK_END: f32 = 30.0;
/// Plateaus narrower than this map straight to `PEAK_START`
pub const MIN_PLATEAU_WIDTH: f32 = 0.01;

/// Age data of one pawn at call time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeProfile {
    pub biological_age: f32,
    pub race_maturation_age: f32,
    pub race_lifespan: f32,
}

impl AgeProfile {
    pub fn new(biological_age: f32, race_maturation_age: f32, race_lifespan: f32) -> Self {
        Self {
            biological_age,
            race_maturation_age,
            race_lifespan,
        }
    }
}

/// The human baseline the curve was authored for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceProfile {
    pub maturation_age: f32,
    pub lifespan: f32,
}

impl ReferenceProfile {
    /// Resolve from species data; a missing adult stage means 18
    pub fn resolve(maturation_age: Option<f32>, lifespan: f32) -> Self {
        Self {
            maturation_age: maturation_age.unwrap_or(FALLBACK_MATURATION_AGE),
            lifespan,
        }
    }

    pub fn human() -> Self {
        Self::resolve(Some(FALLBACK_MATURATION_AGE), HUMAN_LIFE_EXPECTANCY)
    }
}

impl Default for ReferenceProfile {
    fn default() -> Self {
        Self::human()
    }
}

/// Race-to-human scale factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeRatios {
    pub mature_ratio: f32,
    pub lifespan_ratio: f32,
}

impl AgeRatios {
    /// `None` when any denominator or numerator is non-positive
    pub fn resolve(profile: &AgeProfile, reference: &ReferenceProfile) -> Option<Self> {
        let race_maturation_age = if profile.race_maturation_age <= 0.0 {
            FALLBACK_MATURATION_AGE
        } else {
            profile.race_maturation_age
        };

        if race_maturation_age <= 0.0
            || profile.race_lifespan <= 0.0
            || reference.maturation_age <= 0.0
            || reference.lifespan <= 0.0
        {
            return None;
        }

        Some(Self {
            mature_ratio: race_maturation_age / reference.maturation_age,
            lifespan_ratio: profile.race_lifespan / reference.lifespan,
        })
    }
}

/// Where a biological age falls relative to the scaled peak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Growth,
    Plateau,
    Decline,
}

/// The peak plateau expressed in the race's own biological years
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakWindow {
    pub ratios: AgeRatios,
    pub bio_peak_start: f32,
    pub bio_peak_end: f32,
}

impl PeakWindow {
    pub fn new(ratios: AgeRatios, settings: &Settings) -> Self {
        let bio_peak_start = PEAK_START * ratios.mature_ratio;
        let mut bio_peak_end = PEAK_END * ratios.lifespan_ratio;

        if settings.prevent_short_lifespan_penalty && ratios.lifespan_ratio < 1.0 {
            let guaranteed_end = bio_peak_start + (PEAK_END - PEAK_START);
            bio_peak_end = bio_peak_end.max(guaranteed_end);
        }

        // Plateau never has negative width
        bio_peak_end = bio_peak_end.max(bio_peak_start);

        Self {
            ratios,
            bio_peak_start,
            bio_peak_end,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bio_peak_end - self.bio_peak_start
    }

    #[inline]
    pub fn segment(&self, biological_age: f32) -> Segment {
        if biological_age <= self.bio_peak_start {
            Segment::Growth
        } else if biological_age >= self.bio_peak_end {
            Segment::Decline
        } else {
            Segment::Plateau
        }
    }

    /// Map a biological age to the human timescale
    pub fn map(&self, biological_age: f32) -> f32 {
        match self.segment(biological_age) {
            Segment::Growth => biological_age / self.ratios.mature_ratio,
            Segment::Decline => {
                PEAK_END + (biological_age - self.bio_peak_end) / self.ratios.lifespan_ratio
            }
            Segment::Plateau => {
                let range = self.width();
                if range <= MIN_PLATEAU_WIDTH {
                    return PEAK_START;
                }
                let progress = (biological_age - self.bio_peak_start) / range;
                PEAK_START + progress * (PEAK_END - PEAK_START)
            }
        }
    }
}

/// Convert a pawn's biological age into the human-equivalent age used by
/// the birth quality curve.
///
/// Returns 0 for a missing pawn and the raw biological age when the race
/// or human data cannot be scaled. Never fails.
pub fn human_equivalent_age(
    profile: Option<&AgeProfile>,
    reference: &ReferenceProfile,
    settings: &Settings,
    ageless: bool,
) -> f32 {
    let Some(profile) = profile else {
        return 0.0;
    };

    let Some(ratios) = AgeRatios::resolve(profile, reference) else {
        trace!(?profile, ?reference, "unscalable age data, passing through");
        return profile.biological_age;
    };

    if ageless && settings.ageless_at_peak_birth_quality {
        return profile.biological_age.min(PEAK_END);
    }

    PeakWindow::new(ratios, settings).map(profile.biological_age)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn half_species(age: f32) -> AgeProfile {
        AgeProfile::new(age, 9.0, 40.0)
    }

    fn compute(profile: &AgeProfile, settings: Settings) -> f32 {
        human_equivalent_age(Some(profile), &ReferenceProfile::human(), &settings, false)
    }

    #[test]
    fn test_missing_pawn_is_zero() {
        let result = human_equivalent_age(None, &ReferenceProfile::human(), &Settings::default(), false);
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_worked_example() {
        let settings = Settings::default();
        assert!((compute(&half_species(5.0), settings) - 10.0).abs() < EPS);
        assert!((compute(&half_species(12.5), settings) - 25.0).abs() < EPS);
        assert!((compute(&half_species(20.0), settings) - 40.0).abs() < EPS);
    }

    #[test]
    fn test_worked_example_window() {
        let ratios = AgeRatios::resolve(&half_species(0.0), &ReferenceProfile::human()).unwrap();
        assert_eq!(ratios.mature_ratio, 0.5);
        assert_eq!(ratios.lifespan_ratio, 0.5);

        let window = PeakWindow::new(ratios, &Settings::default());
        assert_eq!(window.bio_peak_start, 10.0);
        assert_eq!(window.bio_peak_end, 15.0);
        assert_eq!(window.segment(10.0), Segment::Growth);
        assert_eq!(window.segment(12.0), Segment::Plateau);
        assert_eq!(window.segment(15.0), Segment::Decline);
    }

    #[test]
    fn test_human_is_identity() {
        let settings = Settings::new(true, true);
        for age in [0.0, 3.0, 14.0, 19.99, 20.0, 25.0, 30.0, 47.5, 90.0] {
            let profile = AgeProfile::new(age, 18.0, 80.0);
            assert!((compute(&profile, settings) - age).abs() < EPS, "age {}", age);
        }
    }

    #[test]
    fn test_zero_maturation_falls_back_to_18() {
        let profile = AgeProfile::new(25.0, 0.0, 80.0);
        assert!((compute(&profile, Settings::default()) - 25.0).abs() < EPS);
    }

    #[test]
    fn test_non_positive_lifespan_passes_through() {
        let profile = AgeProfile::new(42.0, 9.0, 0.0);
        assert_eq!(compute(&profile, Settings::default()), 42.0);

        let reference = ReferenceProfile::resolve(None, -1.0);
        let profile = AgeProfile::new(42.0, 9.0, 40.0);
        let result = human_equivalent_age(Some(&profile), &reference, &Settings::default(), false);
        assert_eq!(result, 42.0);
    }

    #[test]
    fn test_non_positive_human_maturation_passes_through() {
        let reference = ReferenceProfile::resolve(Some(0.0), 80.0);
        let profile = AgeProfile::new(33.0, 9.0, 40.0);
        let result = human_equivalent_age(Some(&profile), &reference, &Settings::default(), false);
        assert_eq!(result, 33.0);
    }

    #[test]
    fn test_short_lifespan_guard_widens_plateau() {
        let ratios = AgeRatios::resolve(&half_species(0.0), &ReferenceProfile::human()).unwrap();

        let plain = PeakWindow::new(ratios, &Settings::default());
        assert!((plain.width() - 5.0).abs() < EPS);

        let guarded = PeakWindow::new(ratios, &Settings::new(true, false));
        assert!(guarded.width() >= PEAK_END - PEAK_START - EPS);
        assert!((guarded.bio_peak_end - 20.0).abs() < EPS);

        // 15 is mid-plateau once widened, already declining without the guard
        assert!((compute(&half_species(15.0), Settings::new(true, false)) - 25.0).abs() < EPS);
        assert!((compute(&half_species(15.0), Settings::default()) - 30.0).abs() < EPS);
    }

    #[test]
    fn test_short_lifespan_guard_ignored_for_long_lived() {
        let profile = AgeProfile::new(0.0, 36.0, 800.0);
        let ratios = AgeRatios::resolve(&profile, &ReferenceProfile::human()).unwrap();
        assert_eq!(
            PeakWindow::new(ratios, &Settings::default()),
            PeakWindow::new(ratios, &Settings::new(true, false))
        );
    }

    #[test]
    fn test_ageless_clamps_at_peak_end() {
        let settings = Settings::new(false, true);
        let reference = ReferenceProfile::human();

        let old = AgeProfile::new(100.0, 9.0, 40.0);
        assert_eq!(human_equivalent_age(Some(&old), &reference, &settings, true), 30.0);

        let young = AgeProfile::new(10.0, 9.0, 40.0);
        assert_eq!(human_equivalent_age(Some(&young), &reference, &settings, true), 10.0);
    }

    #[test]
    fn test_ageless_needs_setting() {
        let old = AgeProfile::new(100.0, 18.0, 80.0);
        let result = human_equivalent_age(Some(&old), &ReferenceProfile::human(), &Settings::default(), true);
        assert!((result - 100.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_plateau_returns_peak_start() {
        // bio_peak_start = 30.0, bio_peak_end ~= 30.006
        let reference = ReferenceProfile::human();
        let profile = AgeProfile::new(30.003, 27.0, 80.016);
        let ratios = AgeRatios::resolve(&profile, &reference).unwrap();
        let window = PeakWindow::new(ratios, &Settings::default());
        assert!(window.width() > 0.0 && window.width() < MIN_PLATEAU_WIDTH);
        assert_eq!(window.segment(profile.biological_age), Segment::Plateau);

        let result = human_equivalent_age(Some(&profile), &reference, &Settings::default(), false);
        assert_eq!(result, PEAK_START);
    }

    #[test]
    fn test_inverted_window_is_clamped() {
        // Matures late, dies early: start 40, raw end 15
        let profile = AgeProfile::new(0.0, 36.0, 40.0);
        let ratios = AgeRatios::resolve(&profile, &ReferenceProfile::human()).unwrap();
        let window = PeakWindow::new(ratios, &Settings::default());
        assert_eq!(window.bio_peak_start, window.bio_peak_end);
        assert!((window.map(40.0) - PEAK_START).abs() < EPS);
        assert!((window.map(41.0) - 32.0).abs() < EPS);
    }
}
