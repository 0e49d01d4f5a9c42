//! Render targets notifications are inserted into.

use super::{NodeId, NotificationNode, NotifyError, Severity};
use colored::Colorize;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

/// Where notification nodes live while they are visible.
///
/// Each call is one critical section, so concurrent inserts and removals
/// never interleave halfway.
pub trait RenderTarget: Send + Sync + 'static {
    /// Insert `node` as the first child of `container`.
    ///
    /// Fails with `ContainerMissing` if the container does not exist.
    fn insert_first(&self, container: &str, node: NotificationNode) -> Result<(), NotifyError>;

    /// Remove a node wherever it is. Returns `false` if it was already gone.
    fn remove(&self, id: NodeId) -> bool;
}

/// In-memory containers, most recent child first.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    containers: Mutex<HashMap<String, Vec<NotificationNode>>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target with a single empty container.
    pub fn with_container(selector: &str) -> Self {
        let target = Self::new();
        target.add_container(selector);
        target
    }

    /// Create an empty container; an existing one is left untouched.
    pub fn add_container(&self, selector: &str) {
        self.lock().entry(selector.to_string()).or_default();
    }

    /// Snapshot of a container's children, or None if it doesn't exist.
    pub fn children(&self, selector: &str) -> Option<Vec<NotificationNode>> {
        self.lock().get(selector).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<NotificationNode>>> {
        self.containers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RenderTarget for MemoryTarget {
    fn insert_first(&self, container: &str, node: NotificationNode) -> Result<(), NotifyError> {
        let mut containers = self.lock();
        let children = containers
            .get_mut(container)
            .ok_or_else(|| NotifyError::ContainerMissing(container.to_string()))?;
        children.insert(0, node);
        Ok(())
    }

    fn remove(&self, id: NodeId) -> bool {
        let mut containers = self.lock();
        for children in containers.values_mut() {
            if let Some(pos) = children.iter().position(|n| n.id == id) {
                children.remove(pos);
                return true;
            }
        }
        false
    }
}

/// Prints notifications as colored lines.
///
/// A terminal has one content region, named by `container`. Removal only
/// forgets the node; printed lines stay on screen.
pub struct TerminalTarget {
    container: String,
    out: Mutex<Box<dyn Write + Send>>,
    visible: Mutex<Vec<NodeId>>,
}

impl TerminalTarget {
    /// Target printing to stdout.
    pub fn stdout(container: &str) -> Self {
        Self::with_writer(container, Box::new(std::io::stdout()))
    }

    pub fn with_writer(container: &str, out: Box<dyn Write + Send>) -> Self {
        Self {
            container: container.to_string(),
            out: Mutex::new(out),
            visible: Mutex::new(Vec::new()),
        }
    }

    /// Nodes inserted and not yet removed, most recent first.
    pub fn visible(&self) -> Vec<NodeId> {
        self.visible.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RenderTarget for TerminalTarget {
    fn insert_first(&self, container: &str, node: NotificationNode) -> Result<(), NotifyError> {
        if container != self.container {
            return Err(NotifyError::ContainerMissing(container.to_string()));
        }

        let label = format!("[{}]", node.severity.as_str().to_uppercase());
        let label = match node.severity {
            Severity::Error => label.red().bold(),
            Severity::Warning => label.yellow().bold(),
            Severity::Success => label.green().bold(),
            Severity::Info => label.cyan().bold(),
            Severity::Custom(_) => label.normal(),
        };

        {
            let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
            if let Err(e) = writeln!(out, "{} {}", label, plain_text(&node.text)) {
                tracing::warn!(error = %e, "Failed to write notification");
            }
            if let Err(e) = out.flush() {
                tracing::warn!(error = %e, "Failed to flush notification output");
            }
        }

        self.visible
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(0, node.id);
        Ok(())
    }

    fn remove(&self, id: NodeId) -> bool {
        let mut visible = self.visible.lock().unwrap_or_else(|e| e.into_inner());
        match visible.iter().position(|v| *v == id) {
            Some(pos) => {
                visible.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Drop control characters so a message can't move the cursor or restyle
/// the terminal.
fn plain_text(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}
