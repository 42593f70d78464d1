use tokio::sync::broadcast;

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Broadcast channel size for shutdown notifications (single signal fan-out).
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Turns Ctrl+C (and SIGTERM on unix) into a broadcast interrupt.
///
/// The task exits on its own once anything is sent on `shutdown_tx`, so the
/// runner stops it by broadcasting when the plan is done.
pub fn spawn_interrupt_listener(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();

        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        let terminate = async {
            if let Some(signal) = term_signal.as_mut() {
                signal.recv().await;
            } else {
                std::future::pending::<()>().await;
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = shutdown_rx.recv() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Interrupt received; finishing the current batch.");
                drop(shutdown_tx.send(()));
            }
            () = terminate => {
                tracing::warn!("SIGTERM received; finishing the current batch.");
                drop(shutdown_tx.send(()));
            }
        }
    })
}
