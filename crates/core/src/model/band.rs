use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest percentage (inclusive) that counts as on pace with the exam pass rate.
pub const AT_PACE_MIN: f64 = 65.33;

/// Highest percentage (inclusive) that still counts as on pace.
pub const AT_PACE_MAX: f64 = 71.33;

/// Performance band for a score percentage.
///
/// The thresholds are fixed exam pass-rate markers:
/// - `Below`: under 65.33%
/// - `AtPace`: 65.33% through 71.33%, both ends inclusive
/// - `Above`: over 71.33%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Band {
    Below,
    AtPace,
    Above,
}

impl Band {
    /// Classify a percentage in `[0, 100]`.
    #[must_use]
    pub fn classify(percent: f64) -> Self {
        if percent < AT_PACE_MIN {
            Self::Below
        } else if percent <= AT_PACE_MAX {
            Self::AtPace
        } else {
            Self::Above
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Band::Below => "below",
            Band::AtPace => "at-pace",
            Band::Above => "above",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A score percentage rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Percentage(f64);

impl Percentage {
    /// `correct / total * 100`, rounded to hundredths. `None` when `total` is zero.
    #[must_use]
    pub fn of(correct: u32, total: u32) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let raw = f64::from(correct) / f64::from(total) * 100.0;
        Some(Self((raw * 100.0).round() / 100.0))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Band of the rounded value, so a displayed "71.33%" is always at pace.
    #[must_use]
    pub fn band(self) -> Band {
        Band::classify(self.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
