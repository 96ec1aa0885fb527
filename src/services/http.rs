use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, TravelError};

/// Thin JSON-over-HTTP transport for the planner service.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TravelError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST `body` as JSON. A non-2xx status becomes [`TravelError::Api`]
    /// carrying the response text, or `fallback_message` when it is empty.
    pub async fn post_json<B>(&self, path: &str, body: &B, fallback_message: &str) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| TravelError::Http(format!("{url}: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| TravelError::Http(format!("Failed to read response: {err}")))?;

        debug!(
            target: "trip_viewer::http",
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "planner service responded"
        );

        if !status.is_success() {
            warn!(target: "trip_viewer::http", %url, status = status.as_u16(), "request rejected");
            let message = if response_text.trim().is_empty() {
                fallback_message.to_string()
            } else {
                response_text
            };
            return Err(TravelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&response_text)?)
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(TravelError::Config(
            "planner base address must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
