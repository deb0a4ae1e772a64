// SPDX-License-Identifier: AGPL-3.0
// Voyara Network - Shared HTTP client
//
// Timeouts are sized for a backend that may be asleep when the first
// request arrives. Only 5xx responses and transport failures are retried.

use crate::error::{ApiError, ErrorKind, Failure};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use voyara_core::AppConfig;

/// Retry schedule for failed requests
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay: Duration::from_millis(1000),
            multiplier: 1.5,
        }
    }
}

impl RetryPolicy {
    /// Delay before the `retry`-th retry (1-based): base * multiplier^retry
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.powi(retry as i32);
        self.base_delay.mul_f64(factor)
    }
}

/// Transport tuning shared by every service
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    /// Whole request, connect through last body byte
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Maximum silence between reads
    pub socket_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for HttpConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            socket_timeout: Duration::from_millis(config.socket_timeout_ms),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                base_delay: Duration::from_millis(config.retry_base_delay_ms),
                multiplier: config.retry_multiplier,
            },
        }
    }
}

/// HTTP client shared by the auth, trip and suggestion services.
///
/// Immutable after construction; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.socket_timeout)
            .build()
            .map_err(|e| {
                ApiError::new(
                    ErrorKind::Other,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            http_client,
            retry: config.retry,
        })
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send the request built by `build`, retrying per the policy.
    ///
    /// `build` runs once per attempt. Any non-2xx final status is an error.
    pub(crate) async fn execute<F>(&self, build: F) -> Result<Response, Failure>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut retries = 0;

        loop {
            let failure = match build(&self.http_client).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    Failure::Status { status, body }
                }
                Err(e) => Failure::from(e),
            };

            if retries < self.retry.max_retries && failure.is_retryable() {
                retries += 1;
                let delay = self.retry.delay_for(retries);
                tracing::warn!(
                    "Request failed ({}), retry {} in {:?}",
                    failure,
                    retries,
                    delay
                );
                sleep(delay).await;
                continue;
            }

            return Err(failure);
        }
    }

    /// Read a success body and decode it, ignoring unknown fields
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Failure> {
        let text = response.text().await.map_err(Failure::from)?;
        serde_json::from_str(&text).map_err(|e| Failure::Decode(e.to_string()))
    }
}

/// Attach `Authorization: Bearer <token>`
pub(crate) fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", format!("Bearer {}", token))
}
