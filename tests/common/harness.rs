//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tender::gateway::{AppState, create_router_with_state};
use tender::{CatalogLoad, MatchingSession, ServiceCatalog, SessionSettings};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Serves a fresh session over `catalog` on an ephemeral port.
pub async fn spawn_test_server(catalog: ServiceCatalog) -> std::io::Result<TestServer> {
    let load = CatalogLoad {
        catalog,
        warnings: Vec::new(),
    };
    let session = MatchingSession::new(load, SessionSettings::default())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let app = create_router_with_state(AppState::new(Arc::new(session), Duration::from_secs(5)));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(addr).await?;

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

async fn wait_for_server_ready(addr: SocketAddr) -> std::io::Result<()> {
    let client = reqwest::Client::new();
    let url = format!("http://{}/healthz", addr);
    let deadline = tokio::time::Instant::now() + Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS);

    while tokio::time::Instant::now() < deadline {
        if let Ok(res) = client.get(&url).send().await
            && res.status().is_success()
        {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(STARTUP_POLL_INTERVAL_MS)).await;
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        format!("server at {addr} did not become healthy"),
    ))
}
