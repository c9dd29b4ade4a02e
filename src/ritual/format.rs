//! Display formatting for quality offsets

use std::fmt;

/// `-0.0` prints as "-0"; fold it into `0.0`
#[inline]
fn positive_zero(value: f32) -> f32 {
    value + 0.0
}

/// Whole-number percent, e.g. `0.5` -> `"50%"`
pub fn percent(value: f32) -> String {
    format!("{:.0}%", positive_zero((value * 100.0).round()))
}

/// Percent with at most one decimal and a `+` on positive values,
/// e.g. `0.125` -> `"+12.5%"`, `-0.3` -> `"-30%"`, `0.0` -> `"0%"`
pub fn signed_percent(value: f32) -> String {
    let tenths = positive_zero((value * 1000.0).round() / 10.0);
    let number = if tenths.fract() == 0.0 {
        format!("{:.0}", tenths)
    } else {
        format!("{:.1}", tenths)
    };
    if value > 0.0 {
        format!("+{}%", number)
    } else {
        format!("{}%", number)
    }
}

/// Uppercase the first character
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Quality change column of a quality factor row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityChange {
    /// Positive contribution, e.g. "+50%"
    Gain(String),
    /// No gain; the best reachable value comes first, as in the host's
    /// "out of" template
    OutOf { best: String, actual: String },
}

impl QualityChange {
    pub fn from_quality(quality: f32) -> Self {
        if quality > 0.0 {
            QualityChange::Gain(signed_percent(quality))
        } else {
            QualityChange::OutOf {
                best: "+0".to_string(),
                actual: signed_percent(quality),
            }
        }
    }
}

impl fmt::Display for QualityChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityChange::Gain(text) => f.write_str(text),
            QualityChange::OutOf { best, actual } => write!(f, "{} / {}", best, actual),
        }
    }
}
