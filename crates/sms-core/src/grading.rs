//! Exam score to grade derivation.

use serde::{Deserialize, Serialize};

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// Percentage of the maximum score, clamped to `0.0..=100.0`.
///
/// A non-positive `max_score` yields `0.0` rather than a division error; the
/// service layer rejects such records before they are stored.
pub fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return 0.0;
    }
    (score / max_score * 100.0).clamp(0.0, 100.0)
}

/// Map a percentage onto the school's grade bands.
pub fn grade_for_percentage(pct: f64) -> Grade {
    match pct {
        p if p >= 90.0 => Grade::APlus,
        p if p >= 80.0 => Grade::A,
        p if p >= 70.0 => Grade::BPlus,
        p if p >= 60.0 => Grade::B,
        p if p >= 50.0 => Grade::C,
        p if p >= 40.0 => Grade::D,
        _ => Grade::F,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(75.0, 100.0), 75.0);
        assert_eq!(percentage(40.0, 50.0), 80.0);
        assert_eq!(percentage(0.0, 100.0), 0.0);
        // Degenerate max score
        assert_eq!(percentage(10.0, 0.0), 0.0);
        // Score above max clamps rather than exceeding 100
        assert_eq!(percentage(120.0, 100.0), 100.0);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(grade_for_percentage(100.0), Grade::APlus);
        assert_eq!(grade_for_percentage(90.0), Grade::APlus);
        assert_eq!(grade_for_percentage(89.9), Grade::A);
        assert_eq!(grade_for_percentage(80.0), Grade::A);
        assert_eq!(grade_for_percentage(70.0), Grade::BPlus);
        assert_eq!(grade_for_percentage(60.0), Grade::B);
        assert_eq!(grade_for_percentage(50.0), Grade::C);
        assert_eq!(grade_for_percentage(40.0), Grade::D);
        assert_eq!(grade_for_percentage(39.9), Grade::F);
        assert_eq!(grade_for_percentage(0.0), Grade::F);
    }

    #[test]
    fn test_grade_as_str() {
        assert_eq!(Grade::APlus.as_str(), "A+");
        assert_eq!(Grade::F.as_str(), "F");
    }
}
