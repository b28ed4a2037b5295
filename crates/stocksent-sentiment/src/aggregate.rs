//! Reduction of scored messages into per-ticker and market summaries.

use stocksent_core::{MarketSummary, ScoredMessage, SentimentCategory, TickerSummary};

/// Percentage of `count` in `total`, 0 when `total` is 0.
fn pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        {
            count as f64 / total as f64 * 100.0
        }
    }
}

/// Reduce one ticker's scored messages into its cycle summary.
///
/// Pure and deterministic: category counts, percentages (0% when empty),
/// mean of each analyzer's score (0 when empty), and a fixed-format text
/// block for reporting. `bullish + bearish + neutral == total` always.
#[must_use]
pub fn aggregate_ticker(ticker: &str, messages: &[ScoredMessage]) -> TickerSummary {
    let total = messages.len();
    let bullish = messages
        .iter()
        .filter(|m| m.category == SentimentCategory::Bullish)
        .count();
    let bearish = messages
        .iter()
        .filter(|m| m.category == SentimentCategory::Bearish)
        .count();
    let neutral = total - bullish - bearish;

    let (avg_lexicon_score, avg_vader_score) = if total == 0 {
        (0.0, 0.0)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = total as f64;
        (
            messages.iter().map(|m| m.lexicon_score).sum::<f64>() / denom,
            messages.iter().map(|m| m.vader_score).sum::<f64>() / denom,
        )
    };

    let formatted_text = format!(
        "**{ticker} Sentiment Summary**\n\
         - Total messages: {total}\n\
         - Bullish: {bullish} ({:.1}%)\n\
         - Bearish: {bearish} ({:.1}%)\n\
         - Neutral: {neutral} ({:.1}%)\n\
         - Avg. Lexicon Score: {avg_lexicon_score:.3}\n\
         - Avg. VADER Score: {avg_vader_score:.3}",
        pct(bullish, total),
        pct(bearish, total),
        pct(neutral, total),
    );

    TickerSummary {
        ticker: ticker.to_string(),
        total,
        bullish,
        bearish,
        neutral,
        avg_lexicon_score,
        avg_vader_score,
        formatted_text,
    }
}

/// Combine all ticker summaries of one cycle into the market-wide view.
///
/// Score means are weighted by each ticker's message count. The overall
/// label compares bullish and bearish counts; a tie is Neutral.
#[must_use]
pub fn aggregate_market(summaries: &[TickerSummary]) -> MarketSummary {
    let total: usize = summaries.iter().map(|s| s.total).sum();
    let bullish: usize = summaries.iter().map(|s| s.bullish).sum();
    let bearish: usize = summaries.iter().map(|s| s.bearish).sum();
    let neutral: usize = summaries.iter().map(|s| s.neutral).sum();

    let (avg_lexicon_score, avg_vader_score) = if total == 0 {
        (0.0, 0.0)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let denom = total as f64;
        #[allow(clippy::cast_precision_loss)]
        let weighted = |f: fn(&TickerSummary) -> f64| {
            summaries
                .iter()
                .map(|s| f(s) * s.total as f64)
                .sum::<f64>()
                / denom
        };
        (
            weighted(|s| s.avg_lexicon_score),
            weighted(|s| s.avg_vader_score),
        )
    };

    let overall = if bullish > bearish {
        SentimentCategory::Bullish
    } else if bearish > bullish {
        SentimentCategory::Bearish
    } else {
        SentimentCategory::Neutral
    };

    let formatted_text = if total == 0 {
        "**Market Sentiment Summary**\n- No market sentiment data available.".to_string()
    } else {
        format!(
            "**Market Sentiment Summary**\n\
             - Total messages: {total}\n\
             - Bullish: {bullish} ({:.1}%)\n\
             - Bearish: {bearish} ({:.1}%)\n\
             - Neutral: {neutral} ({:.1}%)\n\
             - Overall Market Sentiment: {overall}",
            pct(bullish, total),
            pct(bearish, total),
            pct(neutral, total),
        )
    };

    MarketSummary {
        total,
        bullish,
        bearish,
        neutral,
        avg_lexicon_score,
        avg_vader_score,
        overall,
        formatted_text,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn message(category: SentimentCategory, lexicon: f64, vader: f64) -> ScoredMessage {
        ScoredMessage {
            ticker: "TSLA".to_string(),
            platform: "Stocktwits".to_string(),
            text: "some message".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2025, 2, 27)
                .unwrap()
                .and_hms_opt(8, 36, 59)
                .unwrap(),
            lexicon_score: lexicon,
            vader_score: vader,
            fused_score: 0.4 * lexicon + 0.6 * vader,
            category,
        }
    }

    #[test]
    fn empty_input_yields_zeroed_summary() {
        let s = aggregate_ticker("TSLA", &[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.bullish + s.bearish + s.neutral, 0);
        assert_eq!(s.avg_lexicon_score, 0.0);
        assert_eq!(s.avg_vader_score, 0.0);
        assert!(s.formatted_text.contains("Bullish: 0 (0.0%)"));
    }

    #[test]
    fn counts_sum_to_total() {
        let messages = vec![
            message(SentimentCategory::Bullish, 0.5, 0.7),
            message(SentimentCategory::Bullish, 0.3, 0.4),
            message(SentimentCategory::Bearish, -0.6, -0.5),
            message(SentimentCategory::Neutral, 0.0, 0.1),
        ];
        let s = aggregate_ticker("TSLA", &messages);
        assert_eq!(s.total, 4);
        assert_eq!(s.bullish, 2);
        assert_eq!(s.bearish, 1);
        assert_eq!(s.neutral, 1);
        assert_eq!(s.bullish + s.bearish + s.neutral, s.total);
    }

    #[test]
    fn percentages_match_count_over_total() {
        let messages = vec![
            message(SentimentCategory::Bullish, 0.5, 0.5),
            message(SentimentCategory::Bearish, -0.5, -0.5),
        ];
        let s = aggregate_ticker("TSLA", &messages);
        assert!(s.formatted_text.contains("Bullish: 1 (50.0%)"));
        assert!(s.formatted_text.contains("Bearish: 1 (50.0%)"));
        assert!(s.formatted_text.contains("Neutral: 0 (0.0%)"));
    }

    #[test]
    fn score_means_are_simple_averages() {
        let messages = vec![
            message(SentimentCategory::Bullish, 0.4, 0.8),
            message(SentimentCategory::Neutral, 0.0, 0.2),
        ];
        let s = aggregate_ticker("TSLA", &messages);
        assert!((s.avg_lexicon_score - 0.2).abs() < 1e-12);
        assert!((s.avg_vader_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_bullish_message_summary_and_market_agree() {
        let messages = vec![message(SentimentCategory::Bullish, 0.6, 0.8)];
        let ticker = aggregate_ticker("TSLA", &messages);
        assert_eq!(ticker.total, 1);
        assert_eq!(ticker.bullish, 1);
        assert_eq!(ticker.bearish, 0);
        assert_eq!(ticker.neutral, 0);

        let market = aggregate_market(&[ticker]);
        assert_eq!(market.total, 1);
        assert_eq!(market.bullish, 1);
        assert_eq!(market.overall, SentimentCategory::Bullish);
    }

    #[test]
    fn market_totals_sum_across_tickers() {
        let a = aggregate_ticker(
            "TSLA",
            &[
                message(SentimentCategory::Bullish, 0.5, 0.5),
                message(SentimentCategory::Bearish, -0.5, -0.5),
            ],
        );
        let b = aggregate_ticker("SPY", &[message(SentimentCategory::Bearish, -0.3, -0.4)]);
        let market = aggregate_market(&[a, b]);
        assert_eq!(market.total, 3);
        assert_eq!(market.bullish, 1);
        assert_eq!(market.bearish, 2);
        assert_eq!(market.neutral, 0);
        assert_eq!(market.overall, SentimentCategory::Bearish);
        assert_eq!(market.bullish + market.bearish + market.neutral, market.total);
    }

    #[test]
    fn market_score_means_are_count_weighted() {
        let a = aggregate_ticker(
            "TSLA",
            &[
                message(SentimentCategory::Bullish, 0.6, 0.6),
                message(SentimentCategory::Bullish, 0.6, 0.6),
            ],
        );
        let b = aggregate_ticker("SPY", &[message(SentimentCategory::Neutral, 0.0, 0.0)]);
        let market = aggregate_market(&[a, b]);
        assert!((market.avg_lexicon_score - 0.4).abs() < 1e-12);
        assert!((market.avg_vader_score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn tie_between_bullish_and_bearish_is_neutral_market() {
        let a = aggregate_ticker("TSLA", &[message(SentimentCategory::Bullish, 0.5, 0.5)]);
        let b = aggregate_ticker("SPY", &[message(SentimentCategory::Bearish, -0.5, -0.5)]);
        let market = aggregate_market(&[a, b]);
        assert_eq!(market.overall, SentimentCategory::Neutral);
    }

    #[test]
    fn degraded_summaries_contribute_nothing_to_market() {
        let degraded = TickerSummary::degraded("QQQ", "session creation failed");
        let live = aggregate_ticker("TSLA", &[message(SentimentCategory::Bullish, 0.5, 0.5)]);
        let market = aggregate_market(&[live, degraded]);
        assert_eq!(market.total, 1);
        assert_eq!(market.bullish, 1);
    }
}
