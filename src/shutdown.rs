// src/shutdown.rs

//! Graceful shutdown plumbing.
//!
//! A [`ShutdownTrigger`] flips a flag that any number of [`ShutdownSignal`]s
//! observe. The loop checks the flag between cycles and can also await it
//! while idle; it never uses it to interrupt a running job.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::errors::Result;

/// Requesting side of the shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    tx: Arc<watch::Sender<bool>>,
}

/// Observing side of the shutdown flag.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

/// Create a connected trigger/signal pair, not yet requested.
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx: Arc::new(tx) }, ShutdownSignal { rx })
}

impl ShutdownTrigger {
    /// Request shutdown. Idempotent.
    pub fn request(&self) {
        self.tx.send_replace(true);
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl ShutdownSignal {
    /// A signal that is never requested.
    pub fn never() -> Self {
        channel().1
    }

    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown has been requested. If every trigger is gone
    /// without a request, this never resolves.
    pub async fn requested(&mut self) {
        let closed = self.rx.wait_for(|requested| *requested).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

/// Install SIGINT / SIGTERM (Ctrl-C on Windows) handlers that request
/// shutdown.
pub fn install_signal_handlers() -> Result<ShutdownSignal> {
    let (trigger, shutdown) = channel();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("received SIGTERM; finishing current job before shutting down");
                }
                _ = sigint.recv() => {
                    info!("received SIGINT; finishing current job before shutting down");
                }
            }
            trigger.request();
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            info!("received Ctrl+C; finishing current job before shutting down");
            trigger.request();
        });
    }

    Ok(shutdown)
}
