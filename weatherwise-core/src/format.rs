//! Presentation helpers for probabilities and state icons.

use std::fmt;

use crate::state::StateName;

/// Icon used for names that are not a known weather state.
pub const FALLBACK_EMOJI: &str = "🌡️";

/// `0.567` → `"57%"`.
pub fn format_probability(probability: f64) -> String {
    format!("{}%", (probability * 100.0).round() as i64)
}

/// Three-way hint for how likely a transition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbabilityBucket {
    Favorable,
    Neutral,
    Unfavorable,
}

impl ProbabilityBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbabilityBucket::Favorable => "favorable",
            ProbabilityBucket::Neutral => "neutral",
            ProbabilityBucket::Unfavorable => "unfavorable",
        }
    }
}

impl fmt::Display for ProbabilityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `>= 0.6` favorable, `>= 0.3` neutral, anything else unfavorable.
pub fn probability_bucket(probability: f64) -> ProbabilityBucket {
    if probability >= 0.6 {
        ProbabilityBucket::Favorable
    } else if probability >= 0.3 {
        ProbabilityBucket::Neutral
    } else {
        ProbabilityBucket::Unfavorable
    }
}

/// Emoji for a state given by name, with [`FALLBACK_EMOJI`] for unknown names.
pub fn state_emoji(name: &str) -> &'static str {
    name.parse::<StateName>()
        .map(|state| state.emoji())
        .unwrap_or(FALLBACK_EMOJI)
}
