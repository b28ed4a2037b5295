//! Sentiment analysis for the stocksent pipeline.
//!
//! Filters near-duplicate messages with a bounded, time-windowed fuzzy
//! cache, scores each surviving message with two independent analyzers
//! (general-purpose lexicon + VADER compound) fused into one category, and
//! reduces scored messages into per-ticker and market-wide summaries.

pub mod aggregate;
pub mod lexicon;
pub mod scorer;
pub mod spam;

pub use aggregate::{aggregate_market, aggregate_ticker};
pub use lexicon::lexicon_score;
pub use scorer::{categorize, fuse, MessageScore, MessageScorer};
pub use spam::SpamFilter;
