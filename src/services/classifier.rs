//! Sentiment classifier
//!
//! Turns an analyzer's compound score into a label and a confidence value

use crate::models::Label;
use std::fmt;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound scores at or above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound scores at or below this are negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Model identifier reported for VADER scores
pub const VADER_MODEL: &str = "VADER";

/// Source of compound sentiment scores
///
/// Implementations must be pure over their input.
pub trait SentimentScorer: Send + Sync {
    /// Model identifier reported in result records
    fn model_name(&self) -> &str;

    /// Compound polarity in `[-1.0, 1.0]`
    fn compound(&self, text: &str) -> f64;
}

/// VADER lexicon scorer
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaderScorer").finish_non_exhaustive()
    }
}

impl SentimentScorer for VaderScorer {
    fn model_name(&self) -> &str {
        VADER_MODEL
    }

    fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

/// Label and confidence for one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub confidence: f64,
}

impl Classification {
    /// Apply the polarity thresholds to a compound score
    pub fn from_compound(compound: f64) -> Self {
        let label = if compound >= POSITIVE_THRESHOLD {
            Label::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Label::Negative
        } else {
            Label::Neutral
        };

        Self {
            label,
            confidence: round_to_millis(compound.abs()),
        }
    }
}

fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Classify a text with the given scorer
pub fn classify(scorer: &dyn SentimentScorer, text: &str) -> Classification {
    Classification::from_compound(scorer.compound(text))
}
