use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// The browser runtime could not start a fresh session. Fatal for the
    /// attempt that requested it, never for the process.
    #[error("session creation failed: {reason}")]
    SessionCreation { reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed WebDriver response for {context}")]
    Protocol { context: String },

    #[error("invalid timestamp \"{raw}\": {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}
