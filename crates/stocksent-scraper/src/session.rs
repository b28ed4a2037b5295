//! Ephemeral WebDriver browser sessions.
//!
//! One session is created per ticker scrape attempt and destroyed before the
//! attempt returns, so no session state is ever shared across tickers or
//! cycles. Staleness never has to be detected because nothing lives long
//! enough to go stale.

use std::time::Instant;

use reqwest::Client;
use serde_json::{json, Value};

use crate::error::ScraperError;

/// Browser arguments mirroring a low-noise headless scrape profile.
const CHROME_ARGS: &[&str] = &[
    "--headless=new",
    "--disable-blink-features=AutomationControlled",
    "--disable-popup-blocking",
    "--disable-extensions",
    "--window-size=1920,1080",
];

/// Handle to one isolated browser session on a WebDriver endpoint.
///
/// Owned exclusively by the scrape attempt that created it. Consuming
/// [`BrowserSession::release`] is the only way to end the session, so a
/// released handle cannot be used again.
#[derive(Debug)]
pub struct BrowserSession {
    client: Client,
    base_url: String,
    session_id: String,
    created_at: Instant,
}

impl BrowserSession {
    /// Create a fresh session via `POST /session`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::SessionCreation`] if the WebDriver endpoint is
    /// unreachable, rejects the capabilities, or returns a malformed response.
    pub async fn acquire(client: &Client, webdriver_url: &str) -> Result<Self, ScraperError> {
        let base_url = webdriver_url.trim_end_matches('/').to_string();
        let url = format!("{base_url}/session");

        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": CHROME_ARGS }
                }
            }
        });

        let response = client
            .post(&url)
            .json(&capabilities)
            .send()
            .await
            .map_err(|e| ScraperError::SessionCreation {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScraperError::SessionCreation {
                reason: format!("status {status}: {body}"),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ScraperError::SessionCreation {
                reason: format!("unreadable session response: {e}"),
            })?;

        let session_id = body
            .pointer("/value/sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| ScraperError::SessionCreation {
                reason: "response has no value.sessionId".to_string(),
            })?
            .to_string();

        tracing::info!(session_id = %session_id, "browser session created");
        Ok(Self {
            client: client.clone(),
            base_url,
            session_id,
            created_at: Instant::now(),
        })
    }

    /// Navigate the session to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on transport failure or
    /// [`ScraperError::UnexpectedStatus`] on a non-2xx response.
    pub async fn navigate(&self, url: &str) -> Result<(), ScraperError> {
        let endpoint = format!("{}/session/{}/url", self.base_url, self.session_id);
        let response = self
            .client
            .post(&endpoint)
            .json(&json!({ "url": url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint,
            });
        }
        Ok(())
    }

    /// Run a synchronous script in the page and return its result value.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`], [`ScraperError::UnexpectedStatus`], or
    /// [`ScraperError::Protocol`] if the response has no `value` field.
    pub async fn execute(&self, script: &str) -> Result<Value, ScraperError> {
        let endpoint = format!(
            "{}/session/{}/execute/sync",
            self.base_url, self.session_id
        );
        let response = self
            .client
            .post(&endpoint)
            .json(&json!({ "script": script, "args": [] }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint,
            });
        }

        let mut body: Value = response.json().await?;
        match body.get_mut("value") {
            Some(value) => Ok(value.take()),
            None => Err(ScraperError::Protocol {
                context: "execute/sync".to_string(),
            }),
        }
    }

    /// Read the fully rendered page source.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`], [`ScraperError::UnexpectedStatus`], or
    /// [`ScraperError::Protocol`] if the response value is not a string.
    pub async fn page_source(&self) -> Result<String, ScraperError> {
        let endpoint = format!("{}/session/{}/source", self.base_url, self.session_id);
        let response = self.client.get(&endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint,
            });
        }

        let body: Value = response.json().await?;
        body.pointer("/value")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ScraperError::Protocol {
                context: "source".to_string(),
            })
    }

    /// End the session via `DELETE /session/{id}`.
    ///
    /// Never fails: a session that is already dead (or an endpoint that has
    /// gone away) only logs a warning. Consuming `self` guarantees release
    /// happens at most once per acquired session.
    pub async fn release(self) {
        let endpoint = format!("{}/session/{}", self.base_url, self.session_id);
        match self.client.delete(&endpoint).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(
                    session_id = %self.session_id,
                    lived_secs = self.created_at.elapsed().as_secs(),
                    "browser session released"
                );
            }
            Ok(response) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    status = response.status().as_u16(),
                    "session delete returned non-success; session may already be dead"
                );
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "session delete failed");
            }
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
