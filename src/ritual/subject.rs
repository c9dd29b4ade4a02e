//! The pawn being scored, as seen by the ritual hooks

use crate::config::HUMAN_DEF_NAME;

/// Role whose age drives birth quality
pub const MOTHER_ROLE: &str = "mother";

/// Snapshot of the pawn assigned to a ritual role
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    /// Short display name, substituted for `{PAWN}` in labels
    pub name: String,
    /// Species def name
    pub def_name: String,
    pub biological_age: f32,
    /// Gene-driven aging speed; `None` when the pawn has no genes
    pub biological_age_tick_factor: Option<f32>,
}

impl Subject {
    pub fn new(name: impl Into<String>, def_name: impl Into<String>, biological_age: f32) -> Self {
        Self {
            name: name.into(),
            def_name: def_name.into(),
            biological_age,
            biological_age_tick_factor: Some(1.0),
        }
    }

    pub fn with_tick_factor(mut self, factor: Option<f32>) -> Self {
        self.biological_age_tick_factor = factor;
        self
    }

    /// Whole biological years, as shown next to the equivalent age
    #[inline]
    pub fn biological_years(&self) -> i32 {
        self.biological_age.floor() as i32
    }

    /// Does not age at all
    #[inline]
    pub fn is_ageless(&self) -> bool {
        self.biological_age_tick_factor == Some(0.0)
    }

    /// A baseline human aging at normal speed; the host's own value is right
    #[inline]
    pub fn is_ordinary_human(&self) -> bool {
        self.def_name == HUMAN_DEF_NAME && self.biological_age_tick_factor == Some(1.0)
    }
}

/// Hooks only touch the mother role, and leave ordinary humans alone
#[inline]
pub fn applies_to<'a>(role_id: &str, subject: Option<&'a Subject>) -> Option<&'a Subject> {
    if role_id != MOTHER_ROLE {
        return None;
    }
    subject.filter(|s| !s.is_ordinary_human())
}
