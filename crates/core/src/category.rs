//! Popularity tiers derived from a question's rate.
//!
//! The tier is computed at display time and never stored.

use std::fmt;

use serde::Serialize;

/// Rate above which a question is HOT.
pub const HOT_THRESHOLD: i32 = 50;

/// Rate above which a question is WARM.
pub const WARM_THRESHOLD: i32 = 10;

/// Display tier of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// rate > 50
    Hot,
    /// 10 < rate <= 50
    Warm,
    /// rate <= 10, shown without a label
    Plain,
}

impl Category {
    /// Classify a rate.
    #[must_use]
    pub const fn from_rate(rate: i32) -> Self {
        if rate > HOT_THRESHOLD {
            Self::Hot
        } else if rate > WARM_THRESHOLD {
            Self::Warm
        } else {
            Self::Plain
        }
    }

    /// The label shown next to a question, if any.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Hot => Some("HOT"),
            Self::Warm => Some("WARM"),
            Self::Plain => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or_default())
    }
}
