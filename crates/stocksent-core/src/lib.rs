//! Shared configuration and domain types for the stocksent pipeline.

pub mod app_config;
pub mod config;
pub mod types;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{
    MarketSummary, NormalizedMessage, RawMessage, ScoredMessage, SentimentCategory, TickerSummary,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
