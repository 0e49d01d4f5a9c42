//! Watch command implementation

use crate::cli::output::{format_stats, format_status};
use crate::cli::{init_logging, load_config_with_overrides, WatchArgs};
use crate::notify::TerminalTarget;
use crate::service::GitSage;
use crate::status::ROOT_PATH;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Handle `gitsage-dashboard watch`
///
/// Behaves like the dashboard's page-ready hook: on the root page it polls
/// and prints every cycle until Ctrl+C, on any other page it does nothing.
pub async fn run_watch(args: WatchArgs) -> anyhow::Result<()> {
    let mut config = load_config_with_overrides(&args.connection)?;
    if let Some(interval_ms) = args.interval_ms {
        config.status.interval_ms = interval_ms;
        config.validate()?;
    }

    init_logging(&config)?;

    let target = Arc::new(TerminalTarget::stdout(&config.notifications.container));
    let service = GitSage::new(&config, target)?;

    if args.once {
        let result = service.update_environment_status().await;
        print!("{}", format_status(&result));
        result?;
        return Ok(());
    }

    let mut updates = service.poller().subscribe();
    if !service.on_page_ready(&args.path) {
        println!(
            "Status polling runs on the root page ({}) only; nothing to do for '{}'",
            ROOT_PATH, args.path
        );
        return Ok(());
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                signal.context("Failed to install CTRL+C handler")?;
                break;
            }
            update = updates.recv() => match update {
                Ok(result) => print!("{}", format_status(&result)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Dropped status output for slow terminal");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    service.stop();
    if let Some(handle) = service.poller().take_handle() {
        let _ = handle.await;
    }

    println!("{}", format_stats(&service.poller().stats()));

    Ok(())
}
