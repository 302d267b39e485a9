//! Shutdown coordination.
//!
//! The interrupt signal is translated into a shutdown trigger exactly once,
//! at the outermost composition point; everything below reacts to the
//! coordinator's broadcast channel instead of watching signals itself.

use std::future::Future;

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Trigger the shutdown signal. Safe to call with no waiters.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// A future that resolves once shutdown is triggered.
    ///
    /// Subscribes at call time; triggers before the call are missed, so
    /// obtain the future before spawning whatever calls [`Shutdown::trigger`].
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Block until the process receives the interrupt signal.
pub async fn wait_for_interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("unable to listen for interrupt signal: {err}");
    }
}
