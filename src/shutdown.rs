use std::time::Duration;

use tokio::sync::broadcast;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Returns true once an interrupt has been broadcast (or every sender is gone).
pub fn interrupt_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(())
        | Err(
            broadcast::error::TryRecvError::Lagged(_) | broadcast::error::TryRecvError::Closed,
        ) => true,
        Err(broadcast::error::TryRecvError::Empty) => false,
    }
}

/// Sleeps for `pause`, returning early with `true` if an interrupt arrives.
pub async fn pause_unless_interrupted(pause: Duration, shutdown_rx: &mut ShutdownReceiver) -> bool {
    tokio::select! {
        _ = shutdown_rx.recv() => true,
        () = tokio::time::sleep(pause) => false,
    }
}
