//! HTTP API tests
//!
//! Runs the router on an ephemeral port and drives it over real HTTP.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use std::sync::Arc;

use mock_ida_core::{
    IdentityRecord, JwsSigner, KycPackager, LanguageValue, MockIdaConfig, UnresolvedKeyEncrypter,
};
use mock_ida_service::{
    create_router, AppState, AuthenticationService, InMemoryIdentityStore, MemoryTransactionStore,
};

const JOHN: &str = "8267411571";

fn verify_kyc(signer: &JwsSigner, token: &str) -> Value {
    let x = URL_SAFE_NO_PAD.encode(signer.verifying_key_bytes());
    let key = DecodingKey::from_ed_components(&x).unwrap();
    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    decode::<Value>(token, &key, &validation).unwrap().claims
}

async fn spawn_server() -> (String, Arc<JwsSigner>) {
    let config = MockIdaConfig::default();
    let signer = Arc::new(JwsSigner::generate("http-test-key"));
    let packager = KycPackager::new(signer.clone(), Arc::new(UnresolvedKeyEncrypter), false);
    let identities = InMemoryIdentityStore::with_identities(vec![IdentityRecord::new(JOHN)
        .with_full_name(vec![LanguageValue::new("eng", "John")])
        .with_email("john@example.com")]);

    let service = AuthenticationService::new(
        Arc::new(config),
        Arc::new(identities),
        Arc::new(MemoryTransactionStore::new()),
        packager,
    );
    let app = create_router(Arc::new(AppState { service }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), signer)
}

#[tokio::test]
async fn test_health() {
    let (base, _) = spawn_server().await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_full_flow_over_http() {
    let (base, signer) = spawn_server().await;
    let client = reqwest::Client::new();

    let send: Value = client
        .post(format!("{}/v1/send-otp/rp-1/client-1", base))
        .json(&json!({
            "individualId": JOHN,
            "transactionId": "txn-1",
            "otpChannels": ["email"]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(send["maskedEmail"], "XXhX@example.com");
    assert!(send.get("maskedMobile").is_none());

    let auth: Value = client
        .post(format!("{}/v1/kyc/auth/rp-1/client-1", base))
        .json(&json!({
            "individualId": JOHN,
            "transactionId": "txn-1",
            "otp": "111111"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(auth["authStatus"], true);
    let kyc_token = auth["kycToken"].as_str().unwrap().to_string();

    let exchange: Value = client
        .post(format!("{}/v1/kyc/exchange/rp-1/client-1", base))
        .json(&json!({
            "individualId": JOHN,
            "transactionId": "txn-1",
            "kycToken": kyc_token,
            "requestDateTime": Utc::now(),
            "acceptedClaims": ["name"],
            "claimLocales": ["eng"]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let claims = verify_kyc(&signer, exchange["kyc"].as_str().unwrap());
    assert_eq!(claims["name"], "John");
    assert_eq!(claims["sub"], auth["partnerSpecificUserToken"]);
}

#[tokio::test]
async fn test_kyc_auth_accepts_biometric_list() {
    let (base, _) = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{}/v1/kyc/auth/rp-1/client-1", base))
        .json(&json!({
            "individualId": JOHN,
            "transactionId": "txn-1",
            "biometrics": [
                {
                    "data": "eyJiaW9UeXBlIjoiRmluZ2VyIn0",
                    "hash": "9F86D081884C7D65",
                    "sessionKey": "c2Vzc2lvbi1rZXk",
                    "specVersion": "1.0.0",
                    "thumbprint": "B4A1"
                }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["authStatus"], true);
    assert!(body["kycToken"].is_string());
}

#[tokio::test]
async fn test_errors_carry_code_and_status() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/v1/kyc/auth/rp-1/client-1", base))
        .json(&json!({
            "individualId": JOHN,
            "transactionId": "txn-1",
            "otp": "111111"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "invalid_transaction");

    let response = client
        .post(format!("{}/v1/send-otp/rp-1/client-1", base))
        .json(&json!({
            "individualId": "unknown",
            "transactionId": "txn-1",
            "otpChannels": ["email"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "invalid_individual_id");
}

#[tokio::test]
async fn test_identity_inspection() {
    let (base, _) = spawn_server().await;

    let response = reqwest::get(format!("{}/v1/identity/{}", base, JOHN)).await.unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["individualId"], JOHN);
    assert_eq!(body["email"], "john@example.com");

    let missing = reqwest::get(format!("{}/v1/identity/nobody", base)).await.unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}
