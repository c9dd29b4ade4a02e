//! Birth ritual hooks
//!
//! The host replaces three results of its pawn-age outcome component with
//! the values computed here: the raw magnitude, the description line and
//! the quality factor row. Each returns the host's value untouched (or
//! `None`) when the hook does not apply.

use crate::age::{AgeMapping, ReferenceProfile};
use crate::config::{EngineConfig, Settings, SpeciesRegistry};
use crate::curve::SimpleCurve;
use crate::error::Result;
use tracing::debug;

use super::format::{capitalize_first, percent, QualityChange};
use super::subject::{applies_to, Subject};

/// Placeholder for the pawn name in outcome labels
pub const PAWN_PLACEHOLDER: &str = "{PAWN}";

/// One row of the ritual quality breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct QualityFactor {
    pub label: String,
    /// Diagnostic count, e.g. "25 (actual: 12)"
    pub count: String,
    pub quality: f32,
    pub positive: bool,
    pub quality_change: QualityChange,
}

/// Species data, quality curve and mapping shared by all hooks
#[derive(Debug, Clone)]
pub struct BirthQualityEngine {
    registry: SpeciesRegistry,
    reference: ReferenceProfile,
    curve: SimpleCurve,
    mapping: AgeMapping,
}

impl Default for BirthQualityEngine {
    fn default() -> Self {
        Self::new(SpeciesRegistry::default(), SimpleCurve::birth_quality(), AgeMapping::default())
    }
}

impl BirthQualityEngine {
    pub fn new(registry: SpeciesRegistry, curve: SimpleCurve, mapping: AgeMapping) -> Self {
        let reference = registry.reference();
        Self {
            registry,
            reference,
            curve,
            mapping,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(config.registry(), config.quality_curve()?, config.mapping))
    }

    pub fn registry(&self) -> &SpeciesRegistry {
        &self.registry
    }

    pub fn curve(&self) -> &SimpleCurve {
        &self.curve
    }

    pub fn mapping(&self) -> AgeMapping {
        self.mapping
    }

    /// Human-equivalent age of `subject`; 0 when there is no subject
    pub fn equivalent_age(&self, subject: Option<&Subject>, settings: &Settings) -> f32 {
        let Some(subject) = subject else {
            return 0.0;
        };
        let profile = self
            .registry
            .age_profile(&subject.def_name, subject.biological_age);
        self.mapping.equivalent_age(
            Some(&profile),
            &self.reference,
            settings,
            subject.is_ageless(),
        )
    }

    /// Quality offset for a human-equivalent age
    #[inline]
    pub fn evaluate_quality(&self, equivalent_age: f32) -> f32 {
        self.curve.evaluate(equivalent_age)
    }

    /// Magnitude hook: the age the outcome curve is evaluated at
    pub fn count(
        &self,
        role_id: &str,
        subject: Option<&Subject>,
        original: f32,
        settings: &Settings,
    ) -> f32 {
        let Some(subject) = applies_to(role_id, subject) else {
            return original;
        };
        let age = self.equivalent_age(Some(subject), settings);
        debug!(
            pawn = %subject.name,
            def_name = %subject.def_name,
            biological_age = subject.biological_age,
            equivalent_age = age,
            "birth quality count"
        );
        age
    }

    /// Description hook: "Label: +50% ritual quality."
    pub fn describe(
        &self,
        role_id: &str,
        label: &str,
        subject: Option<&Subject>,
        settings: &Settings,
    ) -> Option<String> {
        let subject = applies_to(role_id, subject)?;
        let quality = self.evaluate_quality(self.equivalent_age(Some(subject), settings));
        let sign = if quality < 0.0 { "" } else { "+" };

        Some(format!(
            "{}: {}{} ritual quality.",
            format_label(&capitalize_first(label), subject),
            sign,
            percent(quality)
        ))
    }

    /// Quality-factor hook: the breakdown row with a diagnostic count
    pub fn quality_factor(
        &self,
        role_id: &str,
        label: &str,
        subject: Option<&Subject>,
        settings: &Settings,
    ) -> Option<QualityFactor> {
        let subject = applies_to(role_id, subject)?;
        let age = self.equivalent_age(Some(subject), settings);
        let quality = self.evaluate_quality(age);

        debug!(
            pawn = %subject.name,
            equivalent_age = age,
            biological_years = subject.biological_years(),
            quality,
            "birth quality factor"
        );

        Some(QualityFactor {
            label: format_label(label, subject),
            count: format!("{:.0} (actual: {})", age.round(), subject.biological_years()),
            quality,
            positive: quality > 0.0,
            quality_change: QualityChange::from_quality(quality),
        })
    }
}

fn format_label(label: &str, subject: &Subject) -> String {
    label.replace(PAWN_PLACEHOLDER, &subject.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeciesProfile;
    use crate::ritual::MOTHER_ROLE;

    const EPS: f32 = 1e-4;

    /// Humans plus a race maturing and dying twice as fast
    fn engine() -> BirthQualityEngine {
        let mut registry = SpeciesRegistry::default();
        registry.insert(SpeciesProfile::new("Halfling", Some(9.0), 40.0));
        BirthQualityEngine::new(registry, SimpleCurve::birth_quality(), AgeMapping::Plateau)
    }

    #[test]
    fn test_count_replaces_for_other_species() {
        let subject = Subject::new("Ada", "Halfling", 12.5);
        let result = engine().count(MOTHER_ROLE, Some(&subject), 12.5, &Settings::default());
        assert!((result - 25.0).abs() < EPS);
    }

    #[test]
    fn test_count_keeps_original_when_gated() {
        let engine = engine();
        let settings = Settings::default();
        let human = Subject::new("Ada", "Human", 50.0);
        let halfling = Subject::new("Bea", "Halfling", 12.5);

        assert_eq!(engine.count(MOTHER_ROLE, Some(&human), 50.0, &settings), 50.0);
        assert_eq!(engine.count("father", Some(&halfling), 12.5, &settings), 12.5);
        assert_eq!(engine.count(MOTHER_ROLE, None, 7.0, &settings), 7.0);
    }

    #[test]
    fn test_unknown_species_passes_through() {
        let subject = Subject::new("Ada", "Dragon", 300.0);
        let result = engine().count(MOTHER_ROLE, Some(&subject), 0.0, &Settings::default());
        assert_eq!(result, 300.0);
    }

    #[test]
    fn test_ageless_human_pinned() {
        let subject = Subject::new("Ada", "Human", 90.0).with_tick_factor(Some(0.0));
        let engine = engine();

        let pinned = engine.count(MOTHER_ROLE, Some(&subject), 90.0, &Settings::new(false, true));
        assert_eq!(pinned, 30.0);

        let unpinned = engine.count(MOTHER_ROLE, Some(&subject), 90.0, &Settings::default());
        assert!((unpinned - 90.0).abs() < EPS);
    }

    #[test]
    fn test_describe() {
        let subject = Subject::new("Ada", "Halfling", 12.5);
        let text = engine()
            .describe(MOTHER_ROLE, "{PAWN} age", Some(&subject), &Settings::default())
            .unwrap();
        assert_eq!(text, "Ada age: +50% ritual quality.");
    }

    #[test]
    fn test_describe_capitalizes_label() {
        let subject = Subject::new("Ada", "Halfling", 5.0);
        let text = engine()
            .describe(MOTHER_ROLE, "mother age", Some(&subject), &Settings::default())
            .unwrap();
        // bio 5 -> human 10, below the curve start
        assert_eq!(text, "Mother age: +0% ritual quality.");
    }

    #[test]
    fn test_describe_gated() {
        let human = Subject::new("Ada", "Human", 25.0);
        assert!(engine()
            .describe(MOTHER_ROLE, "age", Some(&human), &Settings::default())
            .is_none());
    }

    #[test]
    fn test_quality_factor_peak() {
        let subject = Subject::new("Ada", "Halfling", 12.5);
        let factor = engine()
            .quality_factor(MOTHER_ROLE, "{PAWN}'s age", Some(&subject), &Settings::default())
            .unwrap();

        assert_eq!(factor.label, "Ada's age");
        assert_eq!(factor.count, "25 (actual: 12)");
        assert!((factor.quality - 0.5).abs() < EPS);
        assert!(factor.positive);
        assert_eq!(factor.quality_change, QualityChange::Gain("+50%".to_string()));
    }

    #[test]
    fn test_quality_factor_too_old() {
        // bio 40 -> human 80, past the end of the curve
        let subject = Subject::new("Ada", "Halfling", 40.0);
        let factor = engine()
            .quality_factor(MOTHER_ROLE, "age", Some(&subject), &Settings::default())
            .unwrap();

        assert_eq!(factor.count, "80 (actual: 40)");
        assert_eq!(factor.quality, 0.0);
        assert!(!factor.positive);
        assert!(matches!(factor.quality_change, QualityChange::OutOf { .. }));
        assert_eq!(factor.quality_change.to_string(), "+0 / 0%");
    }

    #[test]
    fn test_short_lifespan_setting_improves_quality() {
        // bio 17.5: plain -> human 35 (0.4), guarded -> human 27.5 (0.5)
        let engine = engine();
        let subject = Subject::new("Ada", "Halfling", 17.5);

        let plain = engine.evaluate_quality(engine.equivalent_age(Some(&subject), &Settings::default()));
        let guarded = engine.evaluate_quality(engine.equivalent_age(Some(&subject), &Settings::new(true, false)));

        assert!((plain - 0.4).abs() < EPS);
        assert!((guarded - 0.5).abs() < EPS);
    }

    #[test]
    fn test_from_config_species_list() {
        // Field-by-field build, as the Python bindings do
        let config = EngineConfig {
            species: vec![
                SpeciesProfile::human(),
                SpeciesProfile::new("Halfling", Some(9.0), 40.0),
            ],
            curve: Some(vec![(14.0, 0.0), (20.0, 0.5), (30.0, 0.5), (65.0, 0.0)]),
            mapping: AgeMapping::Plateau,
        };
        let engine = BirthQualityEngine::from_config(&config).unwrap();
        assert_eq!(engine.registry().len(), 2);

        let subject = Subject::new("Ada", "Halfling", 12.5);
        let age = engine.count(MOTHER_ROLE, Some(&subject), 0.0, &Settings::default());
        assert!((age - 25.0).abs() < EPS);
        assert!((engine.evaluate_quality(age) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_from_config_rejects_bad_curve() {
        let config = EngineConfig {
            curve: Some(Vec::new()),
            ..EngineConfig::default()
        };
        assert!(BirthQualityEngine::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_legacy() {
        let config = EngineConfig::from_json(r#"{"mapping": "legacy"}"#).unwrap();
        let engine = BirthQualityEngine::from_config(&config).unwrap();
        assert_eq!(engine.mapping(), AgeMapping::Legacy);
        assert_eq!(engine.registry().len(), 1);
    }
}
