//! Connection-only reachability probes for ledger nodes.

use futures::future::join_all;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

use wallet_core::LedgerNode;

/// Probe timeout used when none is configured.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Outcome of probing one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub node: LedgerNode,
    pub reachable: bool,
}

/// Probe outcomes for every node of a pool, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReachability {
    pub results: Vec<ProbeResult>,
}

impl PoolReachability {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn reachable(&self) -> usize {
        self.results.iter().filter(|r| r.reachable).count()
    }

    pub fn any_reachable(&self) -> bool {
        self.results.iter().any(|r| r.reachable)
    }
}

/// Opens a TCP connection to a node and closes it as soon as it is
/// established. No application data is exchanged and nothing is retried.
#[derive(Debug, Clone)]
pub struct LedgerReachabilityProbe {
    timeout: Duration,
}

impl Default for LedgerReachabilityProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl LedgerReachabilityProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe with the configured timeout.
    pub async fn probe(&self, node: &LedgerNode) -> bool {
        self.probe_with_timeout(node, self.timeout).await
    }

    /// `true` only if a connection is established within `timeout`. A
    /// connection that would complete later is abandoned with the timed-out
    /// attempt.
    pub async fn probe_with_timeout(&self, node: &LedgerNode, timeout: Duration) -> bool {
        let connect = TcpStream::connect((node.host.as_str(), node.port));
        settle(node, timeout, connect).await
    }

    /// Probe every node concurrently and wait for all of them.
    pub async fn probe_all(&self, nodes: &[LedgerNode]) -> PoolReachability {
        let outcomes = join_all(nodes.iter().map(|node| self.probe(node))).await;
        let results: Vec<ProbeResult> = nodes
            .iter()
            .cloned()
            .zip(outcomes)
            .map(|(node, reachable)| ProbeResult { node, reachable })
            .collect();

        let report = PoolReachability { results };
        tracing::info!(
            reachable = report.reachable(),
            total = report.total(),
            "ledger pool probed"
        );
        report
    }
}

/// Resolve one connection attempt to reachable or not, giving up after
/// `timeout`. The connection is closed as soon as it is established.
async fn settle<F, S>(node: &LedgerNode, timeout: Duration, connect: F) -> bool
where
    F: Future<Output = io::Result<S>>,
{
    match tokio::time::timeout(timeout, connect).await {
        Ok(Ok(stream)) => {
            drop(stream);
            tracing::debug!(%node, "ledger node reachable");
            true
        }
        Ok(Err(e)) => {
            tracing::warn!(%node, error = %e, "ledger node connection failed");
            false
        }
        Err(_) => {
            tracing::warn!(
                %node,
                timeout_ms = timeout.as_millis() as u64,
                "ledger node timeout"
            );
            false
        }
    }
}
