//! Environment status polling.
//!
//! Once the dashboard root page is ready, the poller fetches the status
//! endpoint immediately and then on a fixed interval until stopped. A failed
//! cycle is logged and never cancels later cycles, and a slow one may overlap
//! the next. Stopping abandons cycles still in flight.

mod config;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use config::*;
pub use error::*;
pub use state::*;

use crate::client::{ApiCaller, RequestOptions};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The only page path that arms polling.
pub const ROOT_PATH: &str = "/";

/// Outcome of one poll cycle.
pub type CycleResult = Result<StatusPayload, PollError>;

const UPDATE_CAPACITY: usize = 16;

/// Background service that periodically fetches environment status.
pub struct StatusPoller {
    inner: Arc<PollerInner>,
    cancel_token: CancellationToken,
    /// Set once the loop is armed
    handle: Mutex<Option<JoinHandle<()>>>,
}

struct PollerInner {
    caller: Arc<dyn ApiCaller>,
    config: StatusConfig,
    last_status: RwLock<Option<StatusPayload>>,
    stats: Mutex<PollerStats>,
    updates: broadcast::Sender<CycleResult>,
}

impl StatusPoller {
    pub fn new(caller: Arc<dyn ApiCaller>, config: StatusConfig) -> Self {
        Self {
            inner: Arc::new(PollerInner {
                caller,
                config,
                last_status: RwLock::new(None),
                stats: Mutex::new(PollerStats::default()),
                updates: broadcast::channel(UPDATE_CAPACITY).0,
            }),
            cancel_token: CancellationToken::new(),
            handle: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &StatusConfig {
        &self.inner.config
    }

    /// Receive the outcome of every cycle the loop runs from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CycleResult> {
        self.inner.updates.subscribe()
    }

    /// Run a single poll cycle and return its outcome.
    ///
    /// Stats and the last good payload are updated; nothing is logged.
    pub async fn poll_once(&self) -> CycleResult {
        self.inner.poll_once().await
    }

    /// Run a single poll cycle and log its outcome the way the loop does.
    pub async fn refresh(&self) -> CycleResult {
        let result = self.inner.poll_once().await;
        report(&self.inner.config.endpoint, &result);
        result
    }

    /// Arm the polling loop for the page at `page_path`.
    ///
    /// Only the root path arms polling: one fetch right away, then one per
    /// interval. Returns `true` if this call armed the loop; a disabled
    /// poller, another path, a stopped poller or an already-armed loop all
    /// return `false` without issuing a request.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, page_path: &str) -> bool {
        if !self.inner.config.enabled {
            tracing::debug!("Status polling disabled");
            return false;
        }
        if page_path != ROOT_PATH {
            tracing::debug!(page_path = page_path, "Not the root page, status polling not armed");
            return false;
        }
        if self.cancel_token.is_cancelled() {
            tracing::debug!("Status poller already stopped");
            return false;
        }

        let mut handle = self.handle.lock().unwrap_or_else(|e| e.into_inner());
        if handle.is_some() {
            return false;
        }

        let inner = Arc::clone(&self.inner);
        let cancel_token = self.cancel_token.clone();
        *handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(inner.config.interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                endpoint = %inner.config.endpoint,
                interval_ms = inner.config.interval_ms,
                "Status poller started"
            );

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Status poller shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        // Cycles run in their own task so a slow request
                        // never holds back the next tick.
                        let inner = Arc::clone(&inner);
                        let cancel_token = cancel_token.clone();
                        tokio::spawn(async move {
                            tokio::select! {
                                _ = cancel_token.cancelled() => {}
                                result = inner.poll_once() => {
                                    report(&inner.config.endpoint, &result);
                                    // No subscribers is fine
                                    let _ = inner.updates.send(result);
                                }
                            }
                        });
                    }
                }
            }
        }));

        true
    }

    /// Stop the polling loop. Later calls to `start` do nothing.
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    /// Whether the loop is armed and has not exited.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Take the loop's join handle, e.g. to await it after `stop`.
    pub fn take_handle(&self) -> Option<JoinHandle<()>> {
        self.handle.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// Last payload received, successful or not at the application level.
    pub fn last_status(&self) -> Option<StatusPayload> {
        self.inner
            .last_status
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn stats(&self) -> PollerStats {
        self.inner
            .stats
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

impl PollerInner {
    async fn poll_once(&self) -> CycleResult {
        let result = match self
            .caller
            .call(&self.config.endpoint, RequestOptions::new())
            .await
        {
            Ok(value) => StatusPayload::from_value(value),
            Err(e) => Err(PollError::from(e)),
        };

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!("gitsage_status_polls_total", "outcome" => outcome).increment(1);

        if let Ok(payload) = &result {
            *self
                .last_status
                .write()
                .unwrap_or_else(|e| e.into_inner()) = Some(payload.clone());
        }
        self.stats
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record(&result);

        result
    }
}

/// Log a cycle outcome. Failures stay in the log; they never stop the loop.
fn report(endpoint: &str, result: &CycleResult) {
    match result {
        Ok(payload) if payload.success => {
            tracing::info!(
                endpoint = endpoint,
                payload = %serde_json::Value::Object(payload.extra.clone()),
                "Environment data loaded"
            );
        }
        Ok(_) => {
            tracing::warn!(endpoint = endpoint, "Environment endpoint reported success=false");
        }
        Err(e) => {
            tracing::warn!(
                endpoint = endpoint,
                error = %e,
                "Failed to load environment status"
            );
        }
    }
}
