//! Fixtures shared by the cross-crate tests.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wallet_agent::{AgentConfig, AgentError, AgentFactory, IdentityAgent, OutboundTransport};
use wallet_core::GenesisTransaction;

/// Fresh directory under the system temp dir. Not created until written.
pub fn temp_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}-{}", prefix, rand::random::<u64>()))
}

/// One newline-delimited genesis record for a node endpoint.
pub fn genesis_line(ip: &str, port: &str) -> String {
    serde_json::to_string(&GenesisTransaction::for_endpoint(ip, port)).unwrap_or_default()
}

/// Serve an axum router on an ephemeral local port.
pub async fn serve(app: axum::Router) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "test server stopped");
        }
    });
    Ok(addr)
}

/// Agent factory that records what it was asked to open.
#[derive(Default)]
pub struct RecordingFactory {
    opens: AtomicUsize,
    configs: Mutex<Vec<AgentConfig>>,
}

impl RecordingFactory {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<AgentConfig> {
        self.configs.lock().ok().and_then(|c| c.last().cloned())
    }
}

#[async_trait]
impl AgentFactory for RecordingFactory {
    async fn open(&self, config: &AgentConfig) -> Result<Arc<dyn IdentityAgent>, AgentError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut configs) = self.configs.lock() {
            configs.push(config.clone());
        }
        Ok(Arc::new(NoopAgent))
    }
}

struct NoopAgent;

#[async_trait]
impl IdentityAgent for NoopAgent {
    async fn register_outbound_transport(
        &self,
        _transport: OutboundTransport,
    ) -> Result<(), AgentError> {
        Ok(())
    }

    async fn initialize(&self) -> Result<(), AgentError> {
        Ok(())
    }

    async fn ensure_link_secret(&self) -> Result<(), AgentError> {
        Ok(())
    }
}
