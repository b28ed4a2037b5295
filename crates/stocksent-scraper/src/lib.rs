//! Browser-session scraping for the stocksent pipeline.
//!
//! Creates ephemeral WebDriver sessions (one per ticker attempt), drives
//! scroll-to-load content collection, extracts `(timestamp, text)` message
//! records from the rendered HTML, and normalizes message text and
//! timestamps for downstream scoring.

pub mod collect;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod session;

pub use collect::{scroll_and_collect, ScrollOptions};
pub use error::ScraperError;
pub use extract::extract_messages;
pub use normalize::{canonical_timestamp, clean_text};
pub use session::BrowserSession;
