//! Transient notifications.
//!
//! The presenter inserts a node at the top of the content container and
//! removes it again after a fixed visibility window. Overlapping
//! notifications simply stack up, each on its own timer.

mod target;
mod types;

pub use target::{MemoryTarget, RenderTarget, TerminalTarget};
pub use types::{NodeId, Notification, NotificationNode, Severity};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Notification rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Selector of the container notifications are inserted into
    pub container: String,
    /// How long a notification stays visible
    pub display_ms: u64,
}

impl NotificationConfig {
    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            container: ".container".to_string(),
            display_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("notification container '{0}' not found")]
    ContainerMissing(String),

    /// Removal timers need a tokio runtime
    #[error("no tokio runtime to schedule notification removal")]
    NoRuntime,
}

/// Shows notifications on a render target.
#[derive(Clone)]
pub struct NotificationPresenter {
    target: Arc<dyn RenderTarget>,
    config: NotificationConfig,
}

impl NotificationPresenter {
    pub fn new(target: Arc<dyn RenderTarget>, config: NotificationConfig) -> Self {
        Self { target, config }
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Show `message` and schedule its removal after the display window.
    ///
    /// Outside a tokio runtime nothing is inserted and
    /// [`NotifyError::NoRuntime`] is returned.
    pub fn show(&self, message: &str, severity: Severity) -> Result<NodeId, NotifyError> {
        self.show_notification(&Notification::new(message, severity))
            .map(|(id, _)| id)
    }

    /// Like [`show`](Self::show), also returning the removal task.
    pub fn show_notification(
        &self,
        notification: &Notification,
    ) -> Result<(NodeId, JoinHandle<()>), NotifyError> {
        let runtime = Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;
        let node = NotificationNode::from_notification(notification);
        let id = node.id;

        self.target.insert_first(&self.config.container, node)?;
        tracing::debug!(
            node_id = %id,
            severity = %notification.severity,
            "Notification shown"
        );

        let removal = Self::expire(Arc::clone(&self.target), id, self.config.display());
        Ok((id, runtime.spawn(removal)))
    }

    /// Remove a node once `after` has elapsed. Removing a node that is
    /// already gone is a no-op.
    ///
    /// Must be called from within a tokio runtime.
    pub fn remove_after(&self, id: NodeId, after: Duration) -> JoinHandle<()> {
        tokio::spawn(Self::expire(Arc::clone(&self.target), id, after))
    }

    fn expire(
        target: Arc<dyn RenderTarget>,
        id: NodeId,
        after: Duration,
    ) -> impl std::future::Future<Output = ()> + Send + 'static {
        async move {
            tokio::time::sleep(after).await;
            let removed = target.remove(id);
            tracing::debug!(node_id = %id, removed = removed, "Notification expired");
        }
    }
}
