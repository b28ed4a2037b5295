//! Per-cycle report assembly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stocksent_core::{MarketSummary, TickerSummary};

/// Everything one scrape cycle produced, in a shape a notification
/// consumer can post directly.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub generated_at: DateTime<Utc>,
    pub tickers: Vec<TickerSummary>,
    pub market: MarketSummary,
}

impl CycleReport {
    #[must_use]
    pub fn new(tickers: Vec<TickerSummary>, market: MarketSummary) -> Self {
        Self {
            generated_at: Utc::now(),
            tickers,
            market,
        }
    }

    /// Render the full report as the text blocks produced by aggregation,
    /// one per ticker, followed by the market block.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for summary in &self.tickers {
            out.push_str(&summary.formatted_text);
            out.push_str("\n\n");
        }
        out.push_str(&self.market.formatted_text);
        out
    }
}
