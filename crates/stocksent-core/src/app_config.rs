use std::path::PathBuf;

/// Application configuration, validated once at startup.
///
/// All pipeline components read from this read-only structure; no component
/// performs its own environment lookups.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_level: String,

    /// WebDriver endpoint used to create per-ticker browser sessions.
    pub webdriver_url: String,
    /// Symbols scraped each cycle, in configured order.
    pub tickers: Vec<String>,
    /// Base URL for symbol pages; the ticker is appended as a path segment.
    pub symbol_url_base: String,
    /// Value written to the `platform` column of every persisted row.
    pub platform_label: String,

    pub data_dir: PathBuf,
    pub cycle_interval_mins: u64,
    pub run_duration_hours: u64,
    pub retention_days: i64,

    pub max_scroll_attempts: u32,
    pub scroll_pause_ms: u64,
    pub page_load_wait_secs: u64,
    pub session_request_timeout_secs: u64,
    pub max_concurrent_tickers: usize,

    pub spam_threshold: f64,
    pub spam_window_cap: usize,
    pub spam_reset_hours: i64,

    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("webdriver_url", &self.webdriver_url)
            .field("tickers", &self.tickers)
            .field("symbol_url_base", &self.symbol_url_base)
            .field("platform_label", &self.platform_label)
            .field("data_dir", &self.data_dir)
            .field("cycle_interval_mins", &self.cycle_interval_mins)
            .field("run_duration_hours", &self.run_duration_hours)
            .field("retention_days", &self.retention_days)
            .field("max_scroll_attempts", &self.max_scroll_attempts)
            .field("scroll_pause_ms", &self.scroll_pause_ms)
            .field("page_load_wait_secs", &self.page_load_wait_secs)
            .field(
                "session_request_timeout_secs",
                &self.session_request_timeout_secs,
            )
            .field("max_concurrent_tickers", &self.max_concurrent_tickers)
            .field("spam_threshold", &self.spam_threshold)
            .field("spam_window_cap", &self.spam_window_cap)
            .field("spam_reset_hours", &self.spam_reset_hours)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Full URL of the message-board page for one ticker.
    #[must_use]
    pub fn symbol_url(&self, ticker: &str) -> String {
        format!("{}/{ticker}", self.symbol_url_base.trim_end_matches('/'))
    }
}
