//! Per-ticker scrape pipeline: session, collection, scoring, persistence.
//!
//! Every failure inside one ticker's run is absorbed here and converted
//! into a degraded summary. Nothing propagates to the scheduler.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::Mutex;

use stocksent_archive::{append_by_category, sweep_expired};
use stocksent_core::{AppConfig, RawMessage, ScoredMessage, TickerSummary};
use stocksent_db::{bulk_insert_messages, NewSentimentMessage};
use stocksent_scraper::{
    canonical_timestamp, clean_text, extract_messages, scroll_and_collect, BrowserSession,
    ScraperError, ScrollOptions,
};
use stocksent_sentiment::{aggregate_ticker, MessageScorer, SpamFilter};

/// Shared, read-mostly state handed to every ticker pipeline.
pub struct PipelineContext {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
    pub pool: PgPool,
    pub scorer: Arc<MessageScorer>,
    pub spam: Arc<Mutex<SpamFilter>>,
}

/// Run one ticker end to end, always yielding a summary.
///
/// Scrape failures degrade the summary; persistence failures are logged
/// but still leave a live summary, since the messages were scored.
pub async fn run_ticker(ctx: &PipelineContext, ticker: &str) -> TickerSummary {
    match scrape_ticker(ctx, ticker).await {
        Ok(raw) => {
            let scored = score_messages(ctx, ticker, raw).await;
            persist(ctx, ticker, &scored).await;
            aggregate_ticker(ticker, &scored)
        }
        Err(error) => {
            tracing::error!(ticker = %ticker, error = %error, "ticker pipeline failed");
            TickerSummary::degraded(ticker, &error.to_string())
        }
    }
}

/// Drive an ephemeral browser session for one ticker and return the raw
/// extracted messages. The session is released on every path.
async fn scrape_ticker(
    ctx: &PipelineContext,
    ticker: &str,
) -> Result<Vec<RawMessage>, ScraperError> {
    let config = &ctx.config;
    let session = BrowserSession::acquire(&ctx.http, &config.webdriver_url).await?;
    tracing::info!(ticker = %ticker, session_id = session.session_id(), "session acquired");

    let html = drive_session(&session, ctx, ticker).await;
    session.release().await;
    let html = html?;

    let raw = extract_messages(&html);
    tracing::info!(ticker = %ticker, messages = raw.len(), "extraction complete");
    Ok(raw)
}

async fn drive_session(
    session: &BrowserSession,
    ctx: &PipelineContext,
    ticker: &str,
) -> Result<String, ScraperError> {
    let config = &ctx.config;
    session.navigate(&config.symbol_url(ticker)).await?;
    tokio::time::sleep(Duration::from_secs(config.page_load_wait_secs)).await;

    scroll_and_collect(
        session,
        ScrollOptions {
            max_attempts: config.max_scroll_attempts,
            pause: Duration::from_millis(config.scroll_pause_ms),
        },
    )
    .await
}

/// Normalize, dedup, and score raw messages into persistable rows.
///
/// Unparseable timestamps and spam are dropped with a log line; neither is
/// ever fatal.
pub async fn score_messages(
    ctx: &PipelineContext,
    ticker: &str,
    raw: Vec<RawMessage>,
) -> Vec<ScoredMessage> {
    let mut scored = Vec::with_capacity(raw.len());
    let mut skipped_spam = 0usize;
    let mut skipped_invalid = 0usize;

    for message in raw {
        let timestamp = match canonical_timestamp(&message.timestamp) {
            Ok(ts) => ts,
            Err(error) => {
                tracing::warn!(ticker = %ticker, error = %error, "bad message timestamp, skipping");
                skipped_invalid += 1;
                continue;
            }
        };

        let text = clean_text(&message.text);
        if text.is_empty() {
            skipped_invalid += 1;
            continue;
        }

        if ctx.spam.lock().await.is_spam(&text) {
            skipped_spam += 1;
            continue;
        }

        let score = ctx.scorer.score(&text);
        scored.push(ScoredMessage {
            ticker: ticker.to_string(),
            platform: ctx.config.platform_label.clone(),
            text,
            timestamp,
            lexicon_score: score.lexicon,
            vader_score: score.vader,
            fused_score: score.fused,
            category: score.category,
        });
    }

    tracing::info!(
        ticker = %ticker,
        kept = scored.len(),
        spam = skipped_spam,
        invalid = skipped_invalid,
        "scoring complete"
    );
    scored
}

/// Best-effort persistence: database batch, CSV groups, retention sweep.
/// Each stage failing only loses that stage's output.
async fn persist(ctx: &PipelineContext, ticker: &str, scored: &[ScoredMessage]) {
    let rows: Vec<NewSentimentMessage> = scored
        .iter()
        .map(|m| NewSentimentMessage {
            ticker: m.ticker.clone(),
            platform: m.platform.clone(),
            content: m.text.clone(),
            message_ts: m.timestamp,
            lexicon_score: m.lexicon_score,
            vader_score: m.vader_score,
            fused_score: m.fused_score,
            category: m.category.as_str().to_string(),
        })
        .collect();

    match bulk_insert_messages(&ctx.pool, &rows).await {
        Ok(inserted) => tracing::info!(ticker = %ticker, rows = inserted, "database batch saved"),
        Err(error) => tracing::error!(ticker = %ticker, error = %error, "database batch failed"),
    }

    let failures = append_by_category(&ctx.config.data_dir, scored);
    if !failures.is_empty() {
        tracing::error!(ticker = %ticker, groups = failures.len(), "csv group writes failed");
    }

    match sweep_expired(&ctx.config.data_dir, ticker, ctx.config.retention_days) {
        Ok(0) => {}
        Ok(removed) => tracing::info!(ticker = %ticker, removed, "retention sweep"),
        Err(error) => tracing::warn!(ticker = %ticker, error = %error, "retention sweep failed"),
    }
}
