//! Graceful HTTP server wrapper.
//!
//! # Lifecycle
//! ```text
//! Created (new) → Listening (run) → ShuttingDown (shutdown future resolves)
//!     → Terminated (run returns)
//! ```
//!
//! # Design Decisions
//! - The accept loop runs on its own task; `run` blocks its caller until
//!   shutdown completes
//! - Shutdown is driven by a caller-supplied future; translating an OS
//!   signal into that future happens once at the composition point
//! - Caller closers run first, in insertion order; the built-in listener
//!   closer always runs last
//! - A server that cannot bind or serve is unrecoverable: the error is
//!   logged and the process terminates

pub mod shutdown;

pub use shutdown::{wait_for_interrupt, Shutdown};

use std::any::Any;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::timeout::TimeoutLayer;

use crate::logger::Logger;

/// A teardown callback invoked during shutdown.
pub type Closer = Box<dyn FnOnce() + Send>;

/// HTTP server with signal-driven graceful shutdown and an ordered teardown
/// sequence.
pub struct Server {
    addr: String,
    read_timeout: Duration,
    shutdown_timeout: Duration,
    logger: Logger,
    closers: Vec<Closer>,
}

impl Server {
    /// Create a server. No network activity happens until [`Server::run`].
    pub fn new(
        addr: String,
        read_timeout: Duration,
        shutdown_timeout: Duration,
        logger: Logger,
    ) -> Self {
        Self {
            addr,
            read_timeout,
            shutdown_timeout,
            logger,
            closers: Vec::new(),
        }
    }

    /// Append a teardown callback. Closers run in insertion order, before
    /// the built-in listener closer.
    pub fn add_closer(&mut self, closer: impl FnOnce() + Send + 'static) {
        self.closers.push(Box::new(closer));
    }

    /// Serve `app` until the `shutdown` future resolves, then run the
    /// teardown sequence. Blocks the caller for the whole lifetime.
    pub async fn run(self, app: Router, shutdown: impl Future<Output = ()>) {
        let Server {
            addr,
            read_timeout,
            shutdown_timeout,
            logger,
            closers,
        } = self;

        let app = if read_timeout.is_zero() {
            app
        } else {
            app.layer(TimeoutLayer::new(read_timeout))
        };

        let closing = Arc::new(AtomicBool::new(false));
        let (drain_tx, drain_rx) = oneshot::channel::<()>();

        let mut accept_task = {
            let closing = closing.clone();
            let logger = logger.clone();
            let addr = addr.clone();
            tokio::spawn(async move {
                let serve = async {
                    let listener = TcpListener::bind(&addr).await?;
                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            let _ = drain_rx.await;
                        })
                        .await
                };
                if let Err(err) = serve.await {
                    // An intentional close is not an error; anything else
                    // means the server cannot run at all.
                    if !closing.load(Ordering::Acquire) {
                        logger.fatal(&format!("server error: {err}"));
                    }
                }
            })
        };
        logger.info(&format!("starting to listen on {addr}"));

        shutdown.await;
        logger.info("shutting down");
        let shutdown_started = Instant::now();

        for closer in closers {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(closer)) {
                logger.error(&format!("closer panicked: {}", panic_message(&*payload)));
            }
        }

        // Built-in listener closer. Precondition: the closing flag is stored
        // before the drain is triggered, so the accept task's error path can
        // tell an intentional close from a genuine failure.
        closing.store(true, Ordering::Release);
        let _ = drain_tx.send(());

        // The drain shares the shutdown budget with the closers above.
        let remaining = shutdown_timeout.saturating_sub(shutdown_started.elapsed());
        match tokio::time::timeout(remaining, &mut accept_task).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger.error(&format!("shutdown error: {err}")),
            Err(_) => {
                accept_task.abort();
                logger.error(&format!(
                    "shutdown error: listener did not drain within {shutdown_timeout:?}"
                ));
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
