//! Hosts-file actions: load the records, reconcile them, save them back.

use std::future::Future;

use tracing::{info, warn};

use crate::error::Result;
use crate::platform::HostsStore;
use crate::reconcile::{Change, Clock, Reconciler};

/// Block domains in the store.
pub fn block(
    store: &dyn HostsStore,
    reconciler: &Reconciler,
    domains: &[String],
) -> Result<Vec<Change>> {
    let text = store.load()?;
    let result = reconciler.block(domains, &text.lines);
    store.save(&text.with_lines(result.lines))?;
    info!(domains = domains.len(), changes = result.changes.len(), "blocked");
    Ok(result.changes)
}

/// Unblock domains in the store. Nothing is written if a time window forbids it.
pub fn unblock(
    store: &dyn HostsStore,
    reconciler: &Reconciler,
    domains: &[String],
    clock: &dyn Clock,
) -> Result<Vec<Change>> {
    let text = store.load()?;
    let result = reconciler.unblock(domains, &text.lines, clock)?;
    store.save(&text.with_lines(result.lines))?;
    info!(domains = domains.len(), changes = result.changes.len(), "unblocked");
    Ok(result.changes)
}

/// Unblock domains until `shutdown` resolves, then block them again.
///
/// A timing violation is returned before anything is written, so there is
/// nothing to block again in that case.
pub async fn open<F>(
    store: &dyn HostsStore,
    reconciler: &Reconciler,
    domains: &[String],
    clock: &dyn Clock,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    unblock(store, reconciler, domains, clock)?;
    eprintln!("Domains temporarily unblocked:");
    for domain in domains {
        eprintln!("- {domain}");
    }

    shutdown.await;

    eprintln!("\nBlocking domains again...");
    block(store, reconciler, domains)?;
    eprintln!("\tdone.");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
///
/// If no signal handler can be installed this resolves right away, so the
/// domains get blocked again instead of staying open.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    res = tokio::signal::ctrl_c() => {
                        if let Err(err) = res {
                            warn!("Failed to listen for Ctrl-C: {err}");
                        }
                    }
                    _ = term.recv() => {}
                }
                info!("shutdown signal received");
                return;
            }
            Err(err) => warn!("Failed to listen for SIGTERM: {err}"),
        }
    }

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {err}");
    }
    info!("shutdown signal received");
}
