//! HTTP boundary tests
//!
//! Drive the router in-process with `oneshot` and check status codes and
//! envelope bodies for each role.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use credential_core::StaticIdentity;
use credential_service::{
    create_router, AppState, CredentialStore, DuplicatePolicy, MemoryStore, ServiceRole,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn router_for(role: ServiceRole, store: Arc<dyn CredentialStore>) -> Router {
    let state = AppState::new(
        role,
        store,
        Arc::new(StaticIdentity::new("test-worker")),
        DuplicatePolicy::default(),
    );
    create_router(Arc::new(state))
}

fn combined() -> Router {
    router_for(ServiceRole::Combined, Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn issue_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/credentials/issue")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn valid_body(credential_id: &str) -> Value {
    json!({
        "credentialId": credential_id,
        "holderName": "John Doe",
        "holderEmail": "john@example.com",
        "credentialType": "Certificate"
    })
}

// =============================================================================
// Issuance
// =============================================================================

#[tokio::test]
async fn test_issue_then_duplicate() {
    let app = combined();

    let (status, body) = send(&app, issue_request(valid_body("CRED-001"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["credentialId"], "CRED-001");
    assert_eq!(body["data"]["workerId"], "test-worker");
    assert!(body["data"]["createdAt"].is_string());
    assert!(body.get("message").is_none());

    let (status, again) = send(&app, issue_request(valid_body("CRED-001"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(again["status"], "already_issued");
    assert_eq!(again["data"], body["data"]);
}

#[tokio::test]
async fn test_issue_missing_fields_is_conflict() {
    let app = combined();

    let (status, body) = send(
        &app,
        issue_request(json!({ "credentialId": "CRED-001", "holderName": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "missing required fields");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_issue_without_body_is_validation_failure() {
    let app = combined();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/credentials/issue")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "missing required fields");
}

#[tokio::test]
async fn test_issue_malformed_json_is_bad_request() {
    let app = combined();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/credentials/issue")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"credentialId\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Error issuing credential");
}

#[tokio::test]
async fn test_issue_coerces_scalar_fields() {
    let app = combined();

    let (status, body) = send(
        &app,
        issue_request(json!({
            "credentialId": 1001,
            "holderName": 123,
            "holderEmail": "john@example.com",
            "credentialType": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["credentialId"], "1001");
    assert_eq!(body["data"]["holderName"], "123");
    assert_eq!(body["data"]["credentialType"], "true");

    let (status, _) = send(&app, get("/credentials/verify/1001")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_issue_accepts_long_credential_id() {
    let app = combined();
    let long_id = "C".repeat(300);

    let (status, body) = send(&app, issue_request(valid_body(&long_id))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["credentialId"], long_id.as_str());

    let (status, _) = send(&app, get(&format!("/credentials/verify/{}", long_id))).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Verification
// =============================================================================

#[tokio::test]
async fn test_verify_found_and_not_found() {
    let app = combined();
    send(&app, issue_request(valid_body("CRED-001"))).await;

    let (status, body) = send(&app, get("/credentials/verify/CRED-001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["holderName"], "John Doe");

    let (status, body) = send(&app, get("/credentials/verify/cred-001")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Credential not found");
}

#[tokio::test]
async fn test_verify_without_id_is_bad_request() {
    let app = combined();

    let (status, body) = send(&app, get("/credentials/verify")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Error verifying credential");
}

// =============================================================================
// Roles
// =============================================================================

#[tokio::test]
async fn test_split_roles_share_store() {
    let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
    let issuance = router_for(ServiceRole::Issuance, store.clone());
    let verification = router_for(ServiceRole::Verification, store);

    let (status, _) = send(&issuance, issue_request(valid_body("CRED-SPLIT"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&verification, get("/credentials/verify/CRED-SPLIT")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["workerId"], "test-worker");
}

#[tokio::test]
async fn test_role_gates_routes() {
    let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
    let issuance = router_for(ServiceRole::Issuance, store.clone());
    let verification = router_for(ServiceRole::Verification, store);

    let (status, _) = send(&issuance, get("/credentials/verify/CRED-001")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&verification, issue_request(valid_body("CRED-001"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_worker() {
    let app = router_for(ServiceRole::Verification, Arc::new(MemoryStore::new()));

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["service"], "verification-service");
    assert_eq!(body["data"]["workerId"], "test-worker");
    assert!(body["data"]["version"].is_string());
}
