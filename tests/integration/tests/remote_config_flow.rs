//! Integration test: remote configuration feeding the agent's mediator
//! target, and degrading to defaults when unreachable.

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use std::time::Duration;

use wallet_agent::{AgentProvisioner, ProvisionRequest};
use wallet_core::{LedgerPoolConfig, ProvisionConfig};
use wallet_integration_tests::{genesis_line, serve, temp_dir, RecordingFactory};
use wallet_network::{ConfigEntry, RemoteConfigClient, MEDIATOR_URL};
use wallet_storage::{
    GenesisMaterializer, KeyValueStore, LocalFileStore, MemoryStore, SecureKeyStore,
};

fn pool() -> LedgerPoolConfig {
    LedgerPoolConfig {
        indy_namespace: "local".into(),
        is_production: false,
        genesis_transactions: Some(genesis_line("127.0.0.1", "9701")),
        genesis_url: None,
    }
}

fn provisioner(
    dir: &std::path::Path,
    settings: ProvisionConfig,
    client: RemoteConfigClient,
    factory: Arc<RecordingFactory>,
) -> AgentProvisioner {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    AgentProvisioner::new(
        settings,
        Arc::new(SecureKeyStore::new(kv.clone())),
        Arc::new(GenesisMaterializer::new(Arc::new(LocalFileStore::new(dir)), kv)),
        factory,
    )
    .with_config_source(Arc::new(client))
}

#[tokio::test]
async fn test_remote_mediator_reaches_agent() {
    let addr = serve(Router::new().route(
        "/urls",
        get(|| async {
            Json(vec![ConfigEntry {
                id: MEDIATOR_URL.into(),
                value: "https://mediator.example/invite?oob=xyz".into(),
            }])
        }),
    ))
    .await
    .unwrap();

    let dir = temp_dir("wallet-it-remote");
    let factory = Arc::new(RecordingFactory::default());
    let client =
        RemoteConfigClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let p = provisioner(&dir, ProvisionConfig::default(), client, factory.clone());

    p.provision(&ProvisionRequest::new(pool())).await.unwrap();
    assert_eq!(
        factory.last_config().unwrap().mediator_connection_target.as_deref(),
        Some("https://mediator.example/invite?oob=xyz")
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_unreachable_config_does_not_block_provisioning() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = temp_dir("wallet-it-remote-down");
    let factory = Arc::new(RecordingFactory::default());
    let client =
        RemoteConfigClient::new(&format!("http://{}", addr), Duration::from_millis(500)).unwrap();
    let settings = ProvisionConfig {
        mediator_url: Some("https://fallback.example/invite".into()),
        ..ProvisionConfig::default()
    };
    let p = provisioner(&dir, settings, client, factory.clone());

    let session = p.provision(&ProvisionRequest::new(pool())).await.unwrap();
    assert_eq!(p.session().unwrap().id(), session.id());
    assert_eq!(
        factory.last_config().unwrap().mediator_connection_target.as_deref(),
        Some("https://fallback.example/invite")
    );

    std::fs::remove_dir_all(&dir).ok();
}
