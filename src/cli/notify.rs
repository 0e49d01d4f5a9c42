//! Notify command implementation

use crate::cli::{init_logging, load_config_with_overrides, NotifyArgs};
use crate::notify::{Notification, NotificationPresenter, TerminalTarget};
use std::sync::Arc;

/// Handle `gitsage-dashboard notify`
pub async fn run_notify(args: NotifyArgs) -> anyhow::Result<()> {
    let config = load_config_with_overrides(&args.connection)?;
    init_logging(&config)?;

    let target = Arc::new(TerminalTarget::stdout(&config.notifications.container));
    let presenter = NotificationPresenter::new(target, config.notifications.clone());

    let notification = Notification::new(args.message, args.severity.as_str());
    let (_, expiry) = presenter.show_notification(&notification)?;

    if !args.no_wait {
        expiry.await?;
    }

    Ok(())
}
