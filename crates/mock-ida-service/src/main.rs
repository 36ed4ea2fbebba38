//! Mock IDA Server Binary
//!
//! Runs the mock authenticator's HTTP server.

use std::env;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mock_ida_core::{JwsSigner, KycPackager, MockIdaConfig, UnresolvedKeyEncrypter};
use mock_ida_service::{
    create_router, AppState, AuthenticationService, IdentityLookup, InMemoryIdentityStore,
    MemoryTransactionStore, TransactionStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let log_level = env::var("MOCK_IDA_LOG_LEVEL")
        .unwrap_or_else(|_| "info".into())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let port: u16 = env::var("MOCK_IDA_PORT")
        .unwrap_or_else(|_| "8082".into())
        .parse()
        .map_err(|e| format!("MOCK_IDA_PORT must be a valid port number: {}", e))?;

    let signing_kid =
        env::var("MOCK_IDA_SIGNING_KID").unwrap_or_else(|_| "mock-ida-signing-key".into());

    let config = Arc::new(MockIdaConfig::from_env()?);

    let identities = match env::var("MOCK_IDA_IDENTITIES_PATH") {
        Ok(path) => InMemoryIdentityStore::from_json_file(&path)?,
        Err(_) => InMemoryIdentityStore::new(),
    };
    let identity_count = identities.len();
    let identities: Arc<dyn IdentityLookup> = Arc::new(identities);

    let transactions: Arc<dyn TransactionStore> = Arc::new(MemoryTransactionStore::new());

    // Encryption keys are never resolved, so enabling encryption fails every exchange
    let signer = Arc::new(JwsSigner::generate(signing_kid));
    let packager = KycPackager::new(
        signer.clone(),
        Arc::new(UnresolvedKeyEncrypter),
        config.encrypt_kyc,
    );

    info!(
        kid = %signer.kid(),
        identities = identity_count,
        timeout_secs = config.transaction_timeout_secs,
        encrypt_kyc = config.encrypt_kyc,
        port = port,
        "Starting mock IDA server"
    );

    let service = AuthenticationService::new(config, identities, transactions, packager);
    let state = Arc::new(AppState { service });
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(addr = %addr, "Mock IDA listening");

    axum::serve(listener, app).await?;
    Ok(())
}
