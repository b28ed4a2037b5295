//! Bounded-duration cycle loop with per-ticker fault isolation.

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use stocksent_core::TickerSummary;
use stocksent_sentiment::aggregate_market;

use crate::pipeline::{run_ticker, PipelineContext};
use crate::report::CycleReport;

/// How the loop controls its lifetime.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Run exactly one cycle, then stop.
    pub once: bool,
}

/// Run scrape cycles until the configured duration elapses or shutdown is
/// signaled. Every cycle sends exactly one report, even if all tickers
/// degraded.
pub async fn run(
    ctx: &PipelineContext,
    options: RunOptions,
    reports: mpsc::Sender<CycleReport>,
    mut shutdown: watch::Receiver<bool>,
) {
    let config = &ctx.config;
    let end_time = Instant::now() + Duration::from_secs(config.run_duration_hours * 3600);
    let interval = Duration::from_secs(config.cycle_interval_mins * 60);
    let mut cycle = 0u64;

    loop {
        cycle += 1;
        tracing::info!(cycle, "starting scrape cycle");
        let report = run_cycle(ctx).await;
        if reports.send(report).await.is_err() {
            tracing::warn!("report consumer dropped, stopping scheduler");
            break;
        }

        if options.once {
            tracing::info!("single cycle requested, stopping");
            break;
        }
        if Instant::now() >= end_time {
            tracing::info!(cycles = cycle, "run duration reached, stopping");
            break;
        }

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    tracing::info!("shutdown requested, stopping scheduler");
                    break;
                }
            }
        }
    }
}

/// Run all configured tickers, bounded by the concurrency limit, and
/// assemble the cycle report. Ticker order in the report matches the
/// configured order.
async fn run_cycle(ctx: &PipelineContext) -> CycleReport {
    let config = &ctx.config;
    let summaries: Vec<TickerSummary> = futures::stream::iter(config.tickers.iter())
        .map(|ticker| run_ticker(ctx, ticker))
        .buffered(config.max_concurrent_tickers.max(1))
        .collect()
        .await;

    let market = aggregate_market(&summaries);
    tracing::info!(
        tickers = summaries.len(),
        total_messages = market.total,
        overall = %market.overall,
        "cycle complete"
    );
    CycleReport::new(summaries, market)
}
