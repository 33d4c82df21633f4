// External shutdown: SIGINT/SIGTERM latch a flag the key reader polls

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;
use tracing::info;

use crate::error::TeleopError;

#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Register SIGINT/SIGTERM handlers, then spawn a task that sets `flag` on
/// the first one received
///
/// Registration happens before this returns, so a signal arriving right after
/// is caught rather than killing the process. While a key read holds the
/// terminal in raw mode, Ctrl-C arrives as a key instead of SIGINT; that path
/// is handled by the session loop.
#[cfg(unix)]
pub fn install_signal_listener(flag: ShutdownFlag) -> Result<JoinHandle<()>, TeleopError> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sig_terminate = signal(SignalKind::terminate())?;
    let mut sig_interrupt = signal(SignalKind::interrupt())?;

    Ok(tokio::spawn(async move {
        let name = tokio::select! {
            _ = sig_terminate.recv() => "SIGTERM",
            _ = sig_interrupt.recv() => "SIGINT",
        };
        info!("Received {}, shutting down", name);
        flag.request();
    }))
}

#[cfg(not(unix))]
pub fn install_signal_listener(flag: ShutdownFlag) -> Result<JoinHandle<()>, TeleopError> {
    let ctrl_c = tokio::signal::ctrl_c();

    Ok(tokio::spawn(async move {
        match ctrl_c.await {
            Ok(()) => {
                info!("Received Ctrl-C, shutting down");
                flag.request();
            }
            Err(e) => tracing::warn!("Failed to listen for Ctrl-C: {}", e),
        }
    }))
}
