mod pipeline;
mod report;
mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::{mpsc, watch, Mutex};
use tracing_subscriber::EnvFilter;

use stocksent_sentiment::{MessageScorer, SpamFilter};

use crate::pipeline::PipelineContext;
use crate::report::CycleReport;
use crate::scheduler::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "stocksent-bot")]
#[command(about = "Recurring social sentiment scraper for stock tickers")]
struct Cli {
    /// Run a single scrape cycle and exit.
    #[arg(long)]
    once: bool,

    /// Comma-separated ticker list overriding the configured one.
    #[arg(long)]
    tickers: Option<String>,

    /// Total run duration in hours, overriding the configured one.
    #[arg(long)]
    duration_hours: Option<u64>,

    /// Print the most recent stored messages for a ticker and exit.
    #[arg(long, value_name = "TICKER")]
    recent: Option<String>,
}

const RECENT_LIMIT: i64 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = stocksent_core::load_app_config_from_env()?;
    if let Some(tickers) = cli.tickers {
        config.tickers = tickers
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        anyhow::ensure!(!config.tickers.is_empty(), "--tickers produced an empty list");
    }
    if let Some(hours) = cli.duration_hours {
        config.run_duration_hours = hours;
    }
    let config = Arc::new(config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(?config, "configuration loaded");

    let pool_config = stocksent_db::PoolConfig::from_app_config(&config);
    let pool = stocksent_db::connect_pool(&config.database_url, pool_config).await?;
    stocksent_db::run_migrations(&pool).await?;

    if let Some(ticker) = cli.recent {
        let ticker = ticker.trim().to_uppercase();
        let rows = stocksent_db::fetch_recent_messages(&pool, &ticker, RECENT_LIMIT).await?;
        for row in rows {
            println!(
                "{} [{}] {:.3} {}",
                row.message_ts.format("%Y-%m-%d %H:%M:%S"),
                row.category,
                row.fused_score,
                row.content
            );
        }
        pool.close().await;
        return Ok(());
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.session_request_timeout_secs))
        .build()?;

    let ctx = PipelineContext {
        config: Arc::clone(&config),
        http,
        pool: pool.clone(),
        scorer: Arc::new(MessageScorer::new()),
        spam: Arc::new(Mutex::new(SpamFilter::new(
            config.spam_threshold,
            config.spam_window_cap,
            config.spam_reset_hours,
        ))),
    };

    let (report_tx, mut report_rx) = mpsc::channel::<CycleReport>(8);
    let consumer = tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            println!("{}", report.render());
        }
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    scheduler::run(&ctx, RunOptions { once: cli.once }, report_tx, shutdown_rx).await;

    consumer.await?;
    pool.close().await;
    tracing::info!("pipeline shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal");
}
