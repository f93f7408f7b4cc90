//! Row highlighting by win rate.

use serde::Serialize;
use serde_json::Value;

use crate::format::coerce_number;

/// Rows strictly above this win rate are highlighted as `High`.
pub const HIGH_THRESHOLD: f64 = 0.5;
/// Rows strictly above this (and not above [`HIGH_THRESHOLD`]) are `Medium`.
pub const MEDIUM_THRESHOLD: f64 = 0.3;

const HIGH_COLOR: &str = "#d4edda";
const MEDIUM_COLOR: &str = "#fff3cd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightTier {
    High,
    Medium,
    None,
}

impl HighlightTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::None => "none",
        }
    }

    /// Background override for the tier, `None` keeps the default.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Self::High => Some(HIGH_COLOR),
            Self::Medium => Some(MEDIUM_COLOR),
            Self::None => None,
        }
    }
}

/// Classifies rows by one numeric field.
///
/// Only the deck table uses one, keyed on `win_rate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDisplayRule {
    field: &'static str,
}

impl RowDisplayRule {
    pub fn win_rate() -> Self {
        Self { field: "win_rate" }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn classify(&self, value: f64) -> HighlightTier {
        if value > HIGH_THRESHOLD {
            HighlightTier::High
        } else if value > MEDIUM_THRESHOLD {
            HighlightTier::Medium
        } else {
            HighlightTier::None
        }
    }

    /// Classifies a decoded row; a missing or dirty field counts as zero.
    pub fn classify_row(&self, row: &Value) -> HighlightTier {
        let value = row.get(self.field).map(coerce_number).unwrap_or(0.0);
        self.classify(value)
    }
}

#[derive(Serialize)]
struct TierDescription {
    above: f64,
    tier: HighlightTier,
    color: &'static str,
}

// Serialized as data for the page's `rowFormatter` callback.
impl Serialize for RowDisplayRule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Description {
            field: &'static str,
            tiers: [TierDescription; 2],
        }

        Description {
            field: self.field,
            tiers: [
                TierDescription {
                    above: HIGH_THRESHOLD,
                    tier: HighlightTier::High,
                    color: HIGH_COLOR,
                },
                TierDescription {
                    above: MEDIUM_THRESHOLD,
                    tier: HighlightTier::Medium,
                    color: MEDIUM_COLOR,
                },
            ],
        }
        .serialize(serializer)
    }
}
