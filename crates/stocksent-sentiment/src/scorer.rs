//! Two-model sentiment scoring with fixed-weight fusion.

use vader_sentiment::SentimentIntensityAnalyzer;

use stocksent_core::SentimentCategory;

use crate::lexicon::lexicon_score;

/// Fusion weights favoring the social-text-aware analyzer.
///
/// Configuration constants, not derived values.
pub const LEXICON_WEIGHT: f64 = 0.4;
pub const VADER_WEIGHT: f64 = 0.6;

/// Category thresholds on the fused score.
pub const BULLISH_THRESHOLD: f64 = 0.2;
pub const BEARISH_THRESHOLD: f64 = -0.2;

/// Both independent scores plus the fused result for one message.
#[derive(Debug, Clone, Copy)]
pub struct MessageScore {
    /// General-purpose lexicon polarity in [-1, 1].
    pub lexicon: f64,
    /// VADER compound polarity in [-1, 1].
    pub vader: f64,
    pub fused: f64,
    pub category: SentimentCategory,
}

impl MessageScore {
    fn neutral_zero() -> Self {
        Self {
            lexicon: 0.0,
            vader: 0.0,
            fused: 0.0,
            category: SentimentCategory::Neutral,
        }
    }
}

/// Combine the two independent scores into the fused score.
#[must_use]
pub fn fuse(lexicon: f64, vader: f64) -> f64 {
    LEXICON_WEIGHT * lexicon + VADER_WEIGHT * vader
}

/// Map a fused score onto a category using the fixed thresholds.
#[must_use]
pub fn categorize(fused: f64) -> SentimentCategory {
    if fused > BULLISH_THRESHOLD {
        SentimentCategory::Bullish
    } else if fused < BEARISH_THRESHOLD {
        SentimentCategory::Bearish
    } else {
        SentimentCategory::Neutral
    }
}

/// Message scorer holding the VADER analyzer.
///
/// The analyzer builds its lexicon tables on construction, so one scorer is
/// created per process and shared across ticker pipelines.
pub struct MessageScorer {
    vader: SentimentIntensityAnalyzer<'static>,
}

impl MessageScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            vader: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score one cleaned message.
    ///
    /// Empty or whitespace-only text yields an all-zero Neutral score; there
    /// is no other failure mode.
    #[must_use]
    pub fn score(&self, text: &str) -> MessageScore {
        if text.trim().is_empty() {
            return MessageScore::neutral_zero();
        }

        let lexicon = lexicon_score(text);
        let vader = self
            .vader
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0);
        let fused = fuse(lexicon, vader);

        MessageScore {
            lexicon,
            vader,
            fused,
            category: categorize(fused),
        }
    }
}

impl Default for MessageScorer {
    fn default() -> Self {
        Self::new()
    }
}
