//! JSON request client.
//!
//! Issues JSON HTTP requests against the dashboard origin and normalizes every
//! failure into [`ApiError`]. Failures are logged once and handed back to the
//! caller; nothing is retried or swallowed here.

mod error;
mod options;

pub use error::ApiError;
pub use options::{RequestOptions, DEFAULT_CONTENT_TYPE};

use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Anything that can perform a JSON API call.
///
/// [`RequestClient`] is the HTTP implementation; the status poller only
/// depends on this trait so its timing can be driven without a network.
#[async_trait]
pub trait ApiCaller: Send + Sync + 'static {
    async fn call(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError>;
}

/// HTTP client bound to a base URL.
#[derive(Debug, Clone)]
pub struct RequestClient {
    /// HTTP client with connection pooling
    client: reqwest::Client,
    /// Origin that relative endpoints resolve against
    base_url: Url,
    timeout_seconds: u64,
}

impl RequestClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Create a request client with a custom HTTP client (for testing).
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            timeout_seconds: ClientConfig::default().timeout_seconds,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint: absolute URLs are used as-is, anything else is
    /// joined onto the base URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| ApiError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
    }

    /// Issue one request and decode its JSON body.
    ///
    /// Failures are logged at `error` level and returned unchanged.
    pub async fn call(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let start = Instant::now();
        let method = options.effective_method();
        let result = self.send(endpoint, &options).await;

        metrics::histogram!("gitsage_api_call_duration_seconds",
            "method" => method.to_string()
        )
        .record(start.elapsed().as_secs_f64());

        if let Err(ref e) = result {
            tracing::error!(
                endpoint = endpoint,
                method = %method,
                error = %e,
                "API call failed"
            );
        }

        result
    }

    /// `GET` an endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.call(endpoint, RequestOptions::new()).await
    }

    /// `POST` a JSON body to an endpoint.
    pub async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, ApiError> {
        self.call(
            endpoint,
            RequestOptions::new().method(reqwest::Method::POST).json(body),
        )
        .await
    }

    async fn send(&self, endpoint: &str, options: &RequestOptions) -> Result<Value, ApiError> {
        let url = self.resolve(endpoint)?;
        let headers = options.header_map()?;

        let mut request = self
            .client
            .request(options.effective_method(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_seconds))?;

        // Status is checked before the body is read.
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_seconds))?;

        tracing::debug!(endpoint = endpoint, bytes = bytes.len(), "API call succeeded");

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ApiCaller for RequestClient {
    async fn call(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        RequestClient::call(self, endpoint, options).await
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    Url::parse(base_url).map_err(|e| ApiError::InvalidEndpoint {
        endpoint: base_url.to_string(),
        message: e.to_string(),
    })
}
