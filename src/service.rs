//! The dashboard client service.
//!
//! Built once at startup and shared by reference with whatever needs to call
//! the API, show a notification or refresh environment status.

use crate::client::{ApiCaller, ApiError, RequestClient, RequestOptions};
use crate::config::GitSageConfig;
use crate::notify::{NodeId, NotificationPresenter, NotifyError, RenderTarget, Severity};
use crate::status::{PollError, StatusPayload, StatusPoller};
use serde_json::Value;
use std::sync::Arc;

/// Owns the request client, status poller and notification presenter.
///
/// Dropping the service stops the poller.
pub struct GitSage {
    caller: Arc<dyn ApiCaller>,
    poller: StatusPoller,
    presenter: NotificationPresenter,
}

impl GitSage {
    /// Build the service with an HTTP request client.
    pub fn new(config: &GitSageConfig, target: Arc<dyn RenderTarget>) -> Result<Self, ApiError> {
        let client = RequestClient::new(&config.client)?;
        Ok(Self::with_caller(Arc::new(client), config, target))
    }

    /// Build the service around any [`ApiCaller`].
    pub fn with_caller(
        caller: Arc<dyn ApiCaller>,
        config: &GitSageConfig,
        target: Arc<dyn RenderTarget>,
    ) -> Self {
        Self {
            poller: StatusPoller::new(Arc::clone(&caller), config.status.clone()),
            presenter: NotificationPresenter::new(target, config.notifications.clone()),
            caller,
        }
    }

    /// Call a JSON endpoint. Failures are logged by the client and returned.
    pub async fn api_call(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        self.caller.call(endpoint, options).await
    }

    /// Show a transient notification.
    pub fn show_notification(&self, message: &str, severity: Severity) -> Result<NodeId, NotifyError> {
        self.presenter.show(message, severity)
    }

    /// Fetch environment status once and log the outcome.
    pub async fn update_environment_status(&self) -> Result<StatusPayload, PollError> {
        self.poller.refresh().await
    }

    /// Page-ready hook. Arms status polling when `page_path` is the root page.
    pub fn on_page_ready(&self, page_path: &str) -> bool {
        tracing::info!(page_path = page_path, "GitSage dashboard client initialized");
        self.poller.start(page_path)
    }

    /// Stop status polling.
    pub fn stop(&self) {
        self.poller.stop();
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    pub fn presenter(&self) -> &NotificationPresenter {
        &self.presenter
    }
}
