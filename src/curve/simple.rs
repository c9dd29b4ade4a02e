//! Piecewise-linear lookup curve

use crate::error::{BirthQualityError, Result};
use smallvec::SmallVec;

/// Vanilla birth quality control points: (mother age, quality offset)
pub const BIRTH_QUALITY_POINTS: [(f32, f32); 6] = [
    (14.0, 0.0),
    (15.0, 0.3),
    (20.0, 0.5),
    (30.0, 0.5),
    (40.0, 0.3),
    (65.0, 0.0),
];

/// A single control point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}

/// Monotonic-breakpoint interpolator, flat beyond its first and last points
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCurve {
    // Sorted by x, never empty
    points: SmallVec<[CurvePoint; 8]>,
}

impl SimpleCurve {
    /// Build a curve from `(x, y)` pairs in any order
    pub fn new(points: impl IntoIterator<Item = (f32, f32)>) -> Result<Self> {
        let mut points: SmallVec<[CurvePoint; 8]> = points
            .into_iter()
            .map(|(x, y)| CurvePoint { x, y })
            .collect();

        if points.is_empty() {
            return Err(BirthQualityError::InvalidCurve(
                "curve needs at least one point".to_string(),
            ));
        }
        if let Some(bad) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(BirthQualityError::InvalidCurve(format!(
                "non-finite point ({}, {})",
                bad.x, bad.y
            )));
        }

        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Ok(Self { points })
    }

    /// The vanilla birth quality curve
    pub fn birth_quality() -> Self {
        Self {
            points: BIRTH_QUALITY_POINTS
                .iter()
                .map(|&(x, y)| CurvePoint { x, y })
                .collect(),
        }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Look up `x`, clamping to the end values outside the point range
    #[inline]
    pub fn evaluate(&self, x: f32) -> f32 {
        let first = self.points[0];
        if x <= first.x {
            return first.y;
        }
        let last = self.points[self.points.len() - 1];
        if x >= last.x {
            return last.y;
        }

        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            // a.x < x holds here, so the span is positive
            if x <= b.x {
                let t = (x - a.x) / (b.x - a.x);
                return a.y + t * (b.y - a.y);
            }
        }
        last.y
    }
}

impl Default for SimpleCurve {
    fn default() -> Self {
        Self::birth_quality()
    }
}
