//! Integration test: onboarding, launch routing and provisioning over
//! durable storage, including an app relaunch.

use std::path::Path;
use std::sync::Arc;

use wallet_agent::{AgentProvisioner, WalletBootstrap};
use wallet_core::{LedgerPoolConfig, Milestone, PoolRegistry, Preferences, ProvisionConfig, Screen};
use wallet_integration_tests::{genesis_line, temp_dir, RecordingFactory};
use wallet_storage::{
    GenesisMaterializer, KeyValueStore, LocalFileStore, PersistedState, RocksStore, SecureKeyStore,
};

struct App {
    bootstrap: WalletBootstrap,
    factory: Arc<RecordingFactory>,
    kv: Arc<dyn KeyValueStore>,
}

fn local_pool() -> LedgerPoolConfig {
    LedgerPoolConfig {
        indy_namespace: "local:dev".into(),
        is_production: false,
        genesis_transactions: Some(format!(
            "{}\n{}\n",
            genesis_line("127.0.0.1", "9701"),
            genesis_line("127.0.0.1", "9703")
        )),
        genesis_url: None,
    }
}

/// Build the app stack the way a fresh process would.
fn launch(dir: &Path) -> App {
    let kv: Arc<dyn KeyValueStore> = Arc::new(RocksStore::open(&dir.join("db")).unwrap());
    let factory = Arc::new(RecordingFactory::default());
    let provisioner = AgentProvisioner::new(
        ProvisionConfig::default(),
        Arc::new(SecureKeyStore::new(kv.clone())),
        Arc::new(GenesisMaterializer::new(
            Arc::new(LocalFileStore::new(dir.join("files"))),
            kv.clone(),
        )),
        factory.clone(),
    );
    let bootstrap = WalletBootstrap::new(
        kv.clone(),
        PoolRegistry::new(vec![local_pool()]),
        Arc::new(provisioner),
    );
    App {
        bootstrap,
        factory,
        kv,
    }
}

// =========================================================================
// First run through onboarding, then relaunch
// =========================================================================

#[tokio::test]
async fn test_onboarding_then_provision_then_relaunch() {
    let dir = temp_dir("wallet-it-bootstrap");
    let app = launch(&dir);
    let router = app.bootstrap.router();

    assert_eq!(app.bootstrap.start(false).await.unwrap().screen, Screen::Onboarding);

    router.mark(Milestone::Tutorial).await.unwrap();
    router.mark(Milestone::Terms).await.unwrap();
    assert_eq!(app.bootstrap.start(false).await.unwrap().screen, Screen::CreatePin);

    router.mark(Milestone::Pin).await.unwrap();
    assert_eq!(app.bootstrap.start(false).await.unwrap().screen, Screen::UseBiometry);

    router.mark(Milestone::Biometry).await.unwrap();
    let locked = app.bootstrap.start(false).await.unwrap();
    assert_eq!(locked.screen, Screen::EnterPin);
    assert!(locked.session.is_none());
    assert_eq!(app.factory.opens(), 0);

    let main = app.bootstrap.start(true).await.unwrap();
    assert_eq!(main.screen, Screen::Main);
    let first_session = main.session.unwrap();
    let first_config = app.factory.last_config().unwrap();
    assert_eq!(first_config.wallet_id, "walletId");
    assert_eq!(first_config.label, "Wallet");
    let genesis_path = first_config.ledger.genesis_path.clone();
    let genesis_bytes = std::fs::read(&genesis_path).unwrap();

    // Naming was back-filled for the completed onboarding.
    let stored = PersistedState::load(app.kv.as_ref()).await.unwrap();
    assert!(stored.onboarding.unwrap().did_name_wallet);

    drop(app);

    // Relaunch: same key, same artifact, new session.
    let app = launch(&dir);
    let main = app.bootstrap.start(true).await.unwrap();
    assert_eq!(main.screen, Screen::Main);
    assert_ne!(main.session.unwrap().id(), first_session.id());

    let second_config = app.factory.last_config().unwrap();
    assert_eq!(
        second_config.wallet_key.fingerprint(),
        first_config.wallet_key.fingerprint()
    );
    assert_eq!(second_config.ledger.genesis_path, genesis_path);
    assert_eq!(std::fs::read(&genesis_path).unwrap(), genesis_bytes);

    drop(app);
    std::fs::remove_dir_all(&dir).ok();
}

// =========================================================================
// Wallet naming enabled
// =========================================================================

#[tokio::test]
async fn test_wallet_naming_step_and_label() {
    let dir = temp_dir("wallet-it-naming");
    let app = launch(&dir);
    let router = app.bootstrap.router();

    let prefs = Preferences {
        enable_wallet_naming: true,
        ..Preferences::default()
    };
    PersistedState::save_preferences(app.kv.as_ref(), &prefs).await.unwrap();

    for milestone in [Milestone::Tutorial, Milestone::Terms, Milestone::Pin] {
        router.mark(milestone).await.unwrap();
    }
    assert_eq!(app.bootstrap.start(false).await.unwrap().screen, Screen::NameWallet);

    let prefs = Preferences {
        wallet_name: Some("Conference Badge".into()),
        ..prefs
    };
    PersistedState::save_preferences(app.kv.as_ref(), &prefs).await.unwrap();
    router.mark(Milestone::WalletName).await.unwrap();
    assert_eq!(app.bootstrap.start(false).await.unwrap().screen, Screen::UseBiometry);

    router.mark(Milestone::Biometry).await.unwrap();
    let main = app.bootstrap.start(true).await.unwrap();
    assert!(main.session.is_some());
    assert_eq!(app.factory.last_config().unwrap().label, "Conference Badge");

    drop(app);
    std::fs::remove_dir_all(&dir).ok();
}

// =========================================================================
// Lockout
// =========================================================================

#[tokio::test]
async fn test_lockout_blocks_provisioning() {
    let dir = temp_dir("wallet-it-lockout");
    let app = launch(&dir);

    for milestone in Milestone::ALL {
        app.bootstrap.router().mark(milestone).await.unwrap();
    }
    app.kv
        .set(
            wallet_storage::keys::LOGIN_ATTEMPTS,
            r#"{"loginAttempts":5,"lockoutDate":1700000000000,"servedPenalty":false}"#,
        )
        .await
        .unwrap();

    let outcome = app.bootstrap.start(true).await.unwrap();
    assert_eq!(outcome.screen, Screen::AttemptLockout);
    assert!(outcome.session.is_none());
    assert_eq!(app.factory.opens(), 0);
    assert!(SecureKeyStore::new(app.kv.clone()).load().await.unwrap().is_none());

    drop(app);
    std::fs::remove_dir_all(&dir).ok();
}
