// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP page fetching for the repository list producers.
//!
//! ```text
//! PageFetcher::new(FetchPolicy)
//!        |
//!   fetch_text(url) / fetch_json(url)
//!        |
//!   attempt 1 ..= 1 + retries
//!     2xx            -> body
//!     4xx            -> HttpError (no retry)
//!     5xx, transport -> sleep(retry_interval), next attempt
//!        |
//!   RetriesExhausted
//! ```

use std::time::Duration;

use bon::Builder;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::types::DiscoverConfig;
use crate::error::{MirrorResult, NetworkError};

/// Timeouts, retries and identification of outgoing requests.
#[derive(Debug, Clone, Builder)]
pub struct FetchPolicy {
    #[builder(into, default = format!("git-mirror/{}", env!("CARGO_PKG_VERSION")))]
    user_agent: String,
    #[builder(default = Duration::from_secs(15))]
    connect_timeout: Duration,
    #[builder(default = Duration::from_secs(15))]
    request_timeout: Duration,
    /// Extra attempts after the first failed one.
    #[builder(default = 3)]
    retries: u32,
    #[builder(default = Duration::from_secs(3))]
    retry_interval: Duration,
}

impl From<&DiscoverConfig> for FetchPolicy {
    fn from(config: &DiscoverConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            connect_timeout: config.connect_timeout(),
            request_timeout: config.request_timeout(),
            retries: config.retries,
            retry_interval: config.retry_interval(),
        }
    }
}

/// Outcome of one failed attempt.
enum Attempt {
    /// Worth trying again.
    Retry(String),
    /// Retrying would not help.
    Fatal(NetworkError),
}

/// Async HTTP client with bounded retries.
///
/// # Example
/// ```ignore
/// use git_mirror::net::{FetchPolicy, PageFetcher};
///
/// let fetcher = PageFetcher::new(FetchPolicy::builder().retries(1).build())?;
/// let html = fetcher.fetch_text("https://git.example.org/").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    policy: FetchPolicy,
}

impl PageFetcher {
    /// Build the underlying client.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Reqwest` if the client cannot be configured.
    pub fn new(policy: FetchPolicy) -> MirrorResult<Self> {
        let client = Client::builder()
            .user_agent(policy.user_agent.as_str())
            .connect_timeout(policy.connect_timeout)
            .timeout(policy.request_timeout)
            .build()
            .map_err(NetworkError::Reqwest)?;
        Ok(Self { client, policy })
    }

    /// GET `url` and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `url` is not an absolute URL.
    /// - The server answers with a 4xx status.
    /// - Every attempt failed with a transport error or a 5xx status.
    pub async fn fetch_text(&self, url: &str) -> MirrorResult<String> {
        url::Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")))?;

        let attempts = self.policy.retries.saturating_add(1);
        let mut last = String::new();

        for attempt in 1..=attempts {
            debug!(url, attempt, "GET");
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(Attempt::Fatal(error)) => return Err(error.into()),
                Err(Attempt::Retry(message)) => {
                    warn!(url, attempt, "request failed: {message}");
                    last = message;
                    if attempt < attempts {
                        tokio::time::sleep(self.policy.retry_interval).await;
                    }
                }
            }
        }

        Err(NetworkError::RetriesExhausted {
            url: url.to_string(),
            attempts,
            last,
        }
        .into())
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_text`], plus `NetworkError::Decode` if the body
    /// does not deserialize into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> MirrorResult<T> {
        let body = self.fetch_text(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            NetworkError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    async fn get_once(&self, url: &str) -> Result<String, Attempt> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Attempt::Retry(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(Attempt::Retry(format!("http error {}", status.as_u16())));
        }
        if !status.is_success() {
            return Err(Attempt::Fatal(NetworkError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            }));
        }

        response
            .text()
            .await
            .map_err(|e| Attempt::Retry(e.to_string()))
    }
}
