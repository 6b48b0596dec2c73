//! In-process server handle
//!
//! Integration suites start the mock on a random local port, point their
//! Chargify Direct base URL at [`MockChargifyServer::base_url`], and drop or
//! [`shutdown`](MockChargifyServer::shutdown) it when done.

use crate::error::MockError;
use crate::error::MockResult;
use crate::router::CALLS_PREFIX;
use crate::router::SIGNUPS_PREFIX;
use crate::router::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

/// A running mock server
pub struct MockChargifyServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl MockChargifyServer {
    /// Start on `127.0.0.1` with an OS-assigned port
    pub async fn start(state: AppState) -> MockResult<Self> {
        Self::bind(state, "127.0.0.1:0").await
    }

    /// Start on `addr`
    pub async fn bind(state: AppState, addr: &str) -> MockResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| MockError::ServerStart(format!("Failed to bind to {addr}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| MockError::ServerStart(format!("Failed to read local address: {e}")))?;

        let app = create_router(state);
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
        });

        info!("Mock Chargify server listening on {}", addr);
        Ok(Self {
            addr,
            shutdown: Some(tx),
            handle: Some(handle),
        })
    }

    /// Bound socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://host:port` of the running server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the signup redirect endpoint
    pub fn signup_url(&self) -> String {
        format!("{}{SIGNUPS_PREFIX}", self.base_url())
    }

    /// URL of the call lookup endpoint
    pub fn calls_url(&self) -> String {
        format!("{}{CALLS_PREFIX}", self.base_url())
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(mut self) -> MockResult<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .map_err(|e| MockError::Internal(format!("Server task failed: {e}")))?
                .map_err(|e| MockError::Internal(format!("Server error: {e}")))?;
        }
        info!("Mock Chargify server on {} stopped", self.addr);
        Ok(())
    }
}

impl Drop for MockChargifyServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
