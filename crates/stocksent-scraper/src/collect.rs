//! Incremental scroll-to-load content collection.

use std::time::Duration;

use crate::error::ScraperError;
use crate::session::BrowserSession;

const SCROLL_HEIGHT_SCRIPT: &str = "return document.body.scrollHeight";
const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Bounds for the scroll loop.
#[derive(Debug, Clone, Copy)]
pub struct ScrollOptions {
    /// Maximum number of scroll attempts before giving up on loading more.
    pub max_attempts: u32,
    /// Pause between attempts, giving the page time to append content.
    pub pause: Duration,
}

/// Scroll to the bottom of the page up to `max_attempts` times and return the
/// final rendered page source.
///
/// Stops early as soon as the measured scroll height is unchanged between two
/// consecutive attempts — the only termination condition besides the attempt
/// cap. May block for up to `max_attempts * pause` wall-clock time.
///
/// # Errors
///
/// Propagates any [`ScraperError`] from the session; no internal retry.
pub async fn scroll_and_collect(
    session: &BrowserSession,
    opts: ScrollOptions,
) -> Result<String, ScraperError> {
    let mut last_height = measure_height(session).await?;

    for attempt in 0..opts.max_attempts {
        session.execute(SCROLL_TO_BOTTOM_SCRIPT).await?;
        tokio::time::sleep(opts.pause).await;

        let new_height = measure_height(session).await?;
        if new_height == last_height {
            tracing::debug!(attempt, height = new_height, "content growth stopped");
            break;
        }
        last_height = new_height;
    }

    tracing::info!(session_id = %session.session_id(), "scrolling complete, reading page source");
    session.page_source().await
}

async fn measure_height(session: &BrowserSession) -> Result<i64, ScraperError> {
    let value = session.execute(SCROLL_HEIGHT_SCRIPT).await?;
    value.as_i64().ok_or(ScraperError::Protocol {
        context: "scrollHeight".to_string(),
    })
}
