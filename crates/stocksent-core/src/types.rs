use chrono::NaiveDateTime;
use serde::Serialize;

/// Sentiment category derived from the fused score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SentimentCategory {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentCategory::Bullish => "Bullish",
            SentimentCategory::Bearish => "Bearish",
            SentimentCategory::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message as extracted from the rendered page: original timestamp marker
/// plus the untouched message text.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// ISO-8601 timestamp string from the `datetime` attribute.
    pub timestamp: String,
    pub text: String,
}

/// A message after normalization, before spam filtering and scoring.
#[derive(Debug, Clone)]
pub struct NormalizedMessage {
    pub ticker: String,
    pub raw_text: String,
    pub clean_text: String,
    /// Canonical timestamp; sinks render it as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: NaiveDateTime,
}

/// Terminal record type: a normalized message plus its sentiment scores.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMessage {
    pub ticker: String,
    pub platform: String,
    pub text: String,
    pub timestamp: NaiveDateTime,
    /// General-purpose lexicon polarity in [-1, 1].
    pub lexicon_score: f64,
    /// Social-text-aware compound polarity in [-1, 1].
    pub vader_score: f64,
    /// Fixed linear combination of the two scores.
    pub fused_score: f64,
    pub category: SentimentCategory,
}

/// Per-ticker aggregate for one scrape cycle. Immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct TickerSummary {
    pub ticker: String,
    pub total: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    pub avg_lexicon_score: f64,
    pub avg_vader_score: f64,
    pub formatted_text: String,
}

impl TickerSummary {
    /// Zero-count summary emitted when a ticker's pipeline fails.
    ///
    /// The scheduler converts every per-ticker error into one of these so a
    /// single failing ticker never aborts the cycle for the others.
    #[must_use]
    pub fn degraded(ticker: &str, reason: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            total: 0,
            bullish: 0,
            bearish: 0,
            neutral: 0,
            avg_lexicon_score: 0.0,
            avg_vader_score: 0.0,
            formatted_text: format!("**{ticker} Sentiment Summary**\n- No data: {reason}"),
        }
    }
}

/// Market-wide aggregate over all ticker summaries in one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    pub total: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    pub avg_lexicon_score: f64,
    pub avg_vader_score: f64,
    /// Overall label: Bullish when bullish > bearish, Bearish when the
    /// reverse, Neutral on a tie.
    pub overall: SentimentCategory,
    pub formatted_text: String,
}
