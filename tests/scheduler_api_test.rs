use std::env;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

fn setup_app() -> Router {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("WEBHOOK_SECRET", "whsec_test");
    env::set_var("RECRUITER_RPS", "100");
    let _ = blindhire_backend::config::init_config();

    let store = Arc::new(blindhire_backend::store::memory::MemoryStore::new());
    let (state, dispatcher) = blindhire_backend::AppState::new(store);
    tokio::spawn(dispatcher.run());
    blindhire_backend::app(state)
}

fn recruiter_token() -> String {
    let claims = blindhire_backend::middleware::auth::Claims {
        sub: "recruiter-1".into(),
        exp: 4102444800,
        role: Some("recruiter".into()),
        name: Some("Avery".into()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test_secret_key"),
    )
    .expect("encode token")
}

fn authed_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", recruiter_token()))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", recruiter_token()))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json body")
}

#[tokio::test]
async fn single_invite_creates_and_marks_sent() {
    let app = setup_app();

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/scheduler/invitations",
            json!({
                "role": "Senior Backend Engineer",
                "email": "sarah.j@gmail.com",
                "date_time": "2024-02-10 14:00",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["candidate_id"], 1);
    assert_eq!(body["reference"], "CANDIDATE #0001");

    let resp = app
        .oneshot(authed_get("/api/scheduler/history?limit=10"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let history = body_json(resp).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["email"], "sarah.j@gmail.com");
    assert_eq!(entries[0]["delivery_state"], "sent");
    assert_eq!(entries[0]["scheduled_at"], "2024-02-10 14:00");
}

#[tokio::test]
async fn scheduler_routes_require_a_recruiter_token() {
    let app = setup_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/scheduler/invitations")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"role": "x", "email": "a@b.com", "date_time": "2024-01-01 10:00"}).to_string(),
        ))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_field_creates_nothing() {
    let app = setup_app();

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/scheduler/invitations",
            json!({"role": "", "email": "x@y.com", "date_time": "2024-01-01 10:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "missing_field");

    let resp = app.clone().oneshot(authed_get("/api/candidates")).await.unwrap();
    let listing = body_json(resp).await;
    assert_eq!(listing["candidates"].as_array().unwrap().len(), 0);

    let resp = app.oneshot(authed_get("/api/scheduler/history")).await.unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn bulk_payload_is_best_effort_and_audited() {
    let app = setup_app();

    let resp = app
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/scheduler/invitations/bulk",
            json!({
                "text": "a@b.com, Role X, 2024-02-10 14:00\nbad-line\nc@d.com, Role Y, 2024-02-11 09:30",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let summary = body_json(resp).await;
    assert_eq!(summary["created"], 2);
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["errors"][0]["line"], 2);
    assert_eq!(summary["candidate_ids"].as_array().unwrap().len(), 2);

    let batch_id = summary["batch_id"].as_str().unwrap();
    let resp = app
        .clone()
        .oneshot(authed_get(&format!("/api/scheduler/batches/{}", batch_id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let batch = body_json(resp).await;
    assert_eq!(batch["outcomes"].as_array().unwrap().len(), 3);
    assert_eq!(batch["outcomes"][1]["outcome"], "invalid");

    let resp = app.oneshot(authed_get("/api/scheduler/history")).await.unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_bulk_payload_is_rejected() {
    let app = setup_app();

    let resp = app
        .oneshot(authed_json(
            "POST",
            "/api/scheduler/invitations/bulk",
            json!({"text": "  \n "}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "empty_batch");
}
