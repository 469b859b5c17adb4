//! Integration test: genesis materialization from bundled and remote
//! sources feeding the reachability probe.

use axum::{routing::get, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use wallet_agent::materialize_pool;
use wallet_core::LedgerPoolConfig;
use wallet_integration_tests::{genesis_line, serve, temp_dir};
use wallet_network::{GenesisDownloader, LedgerReachabilityProbe};
use wallet_storage::{GenesisMaterializer, LocalFileStore, MemoryStore};

fn materializer(dir: &std::path::Path) -> GenesisMaterializer {
    GenesisMaterializer::new(
        Arc::new(LocalFileStore::new(dir)),
        Arc::new(MemoryStore::new()),
    )
}

#[tokio::test]
async fn test_remote_genesis_fetched_once_then_probed() {
    let up = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let down = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let up_port = up.local_addr().unwrap().port();
    let down_port = down.local_addr().unwrap().port();
    drop(down);

    let body = format!(
        "{}\n{}\n",
        genesis_line("127.0.0.1", &up_port.to_string()),
        genesis_line("127.0.0.1", &down_port.to_string())
    );
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let addr = serve(Router::new().route(
        "/genesis",
        get(move || {
            let counter = counter.clone();
            let body = body.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                body
            }
        }),
    ))
    .await
    .unwrap();

    let dir = temp_dir("wallet-it-remote-genesis");
    let genesis = materializer(&dir);
    let downloader = GenesisDownloader::default();
    let pool = LedgerPoolConfig {
        indy_namespace: "bcovrin:test".into(),
        is_production: false,
        genesis_transactions: None,
        genesis_url: Some(format!("http://{}/genesis", addr)),
    };

    let first = materialize_pool(&genesis, &downloader, &pool).await.unwrap();
    let second = materialize_pool(&genesis, &downloader, &pool).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let nodes = genesis.parse_nodes("bcovrin:test").await;
    assert_eq!(nodes.len(), 2);

    let report = LedgerReachabilityProbe::new(Duration::from_secs(2))
        .probe_all(&nodes)
        .await;
    assert_eq!(report.total(), 2);
    assert_eq!(report.reachable(), 1);
    assert!(report.results[0].reachable);
    assert!(!report.results[1].reachable);

    drop(up);
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_malformed_bundled_genesis_yields_no_nodes() {
    let dir = temp_dir("wallet-it-malformed");
    let genesis = materializer(&dir);
    let pool = LedgerPoolConfig {
        indy_namespace: "broken".into(),
        is_production: false,
        genesis_transactions: Some(format!(
            "{}\n{}",
            genesis_line("127.0.0.1", "9701"),
            genesis_line("127.0.0.1", "not-a-port")
        )),
        genesis_url: None,
    };

    // Materialization still succeeds; the pool just has no usable nodes.
    let path = materialize_pool(&genesis, &GenesisDownloader::default(), &pool)
        .await
        .unwrap();
    assert!(path.exists());

    let nodes = genesis.parse_nodes("broken").await;
    assert!(nodes.is_empty());

    let report = LedgerReachabilityProbe::default().probe_all(&nodes).await;
    assert!(!report.any_reachable());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_pools_materialize_independently() {
    let dir = temp_dir("wallet-it-pools");
    let genesis = Arc::new(materializer(&dir));
    let downloader = GenesisDownloader::default();

    let pools: Vec<LedgerPoolConfig> = ["sovrin", "sovrin:staging", "indicio:test"]
        .iter()
        .enumerate()
        .map(|(i, ns)| LedgerPoolConfig {
            indy_namespace: (*ns).into(),
            is_production: i == 0,
            genesis_transactions: Some(genesis_line("10.0.0.1", &(9700 + i).to_string())),
            genesis_url: None,
        })
        .collect();

    let mut paths = Vec::new();
    for pool in &pools {
        paths.push(materialize_pool(&genesis, &downloader, pool).await.unwrap());
    }
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 3);

    let nodes = genesis.parse_nodes("sovrin:staging").await;
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].port, 9701);

    std::fs::remove_dir_all(&dir).ok();
}
