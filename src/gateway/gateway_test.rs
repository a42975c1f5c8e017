//! Tests for the Saral HTTP gateway
//! Saral HTTP网关的测试

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::completion::{CompletionBackend, CompletionError, CompletionResult};
use crate::gateway::{create_gateway_router, GatewayState};

/// Scripted completion backend for tests / 用于测试的脚本化补全后端
struct ScriptedBackend {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(reply: Result<String, String>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _prompt: &str) -> CompletionResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(CompletionError::Network {
                message: message.clone(),
            }),
        }
    }
}

fn router_with(state: GatewayState) -> axum::Router {
    create_gateway_router(state, Duration::from_secs(5))
}

fn state_with_backend(backend: Arc<ScriptedBackend>) -> GatewayState {
    GatewayState {
        completion: Some(backend),
        index_html: None,
    }
}

fn post_generate(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/gemini")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_generate_rejects_missing_fields() {
    let backend = ScriptedBackend::new(Ok("unused".to_string()));
    for body in [
        "{}",
        r#"{"prompt":"hello"}"#,
        r#"{"type":"chat"}"#,
        r#"{"prompt":"","type":"chat"}"#,
        r#"{"prompt":"hello","type":""}"#,
    ] {
        let router = router_with(state_with_backend(backend.clone()));
        let response = router.oneshot(post_generate(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);

        let json = json_body(response).await;
        assert_eq!(
            json["error"], "Missing required fields: prompt and type.",
            "body: {}",
            body
        );
    }
    // Validation failed before the backend was reached / 校验失败时不会触达后端
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_generate_rejects_unknown_type() {
    let backend = ScriptedBackend::new(Ok("unused".to_string()));
    let router = router_with(state_with_backend(backend.clone()));

    let response = router
        .oneshot(post_generate(r#"{"prompt":"hello","type":"summon"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"], "Invalid request type: summon");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_generate_rejects_malformed_json() {
    let backend = ScriptedBackend::new(Ok("unused".to_string()));
    let router = router_with(state_with_backend(backend.clone()));

    let response = router.oneshot(post_generate("not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_generate_without_backend_is_unavailable() {
    let router = router_with(GatewayState {
        completion: None,
        index_html: None,
    });

    let response = router
        .oneshot(post_generate(r#"{"prompt":"hello","type":"chat"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = json_body(response).await;
    assert_eq!(
        json["error"],
        "Completion client not initialized on server. Check server logs."
    );
}

#[tokio::test]
async fn test_generate_success() {
    let backend = ScriptedBackend::new(Ok("ok".to_string()));
    let router = router_with(state_with_backend(backend.clone()));

    let response = router
        .oneshot(post_generate(r#"{"prompt":"hello","type":"chat"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["response"], "ok");
    // Exactly one upstream call per successful response / 每个成功响应恰好一次上游调用
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_generate_empty_text_is_success() {
    let backend = ScriptedBackend::new(Ok(String::new()));
    let router = router_with(state_with_backend(backend.clone()));

    let response = router
        .oneshot(post_generate(r#"{"prompt":"hello","type":"analysis"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["response"], "");
}

#[tokio::test]
async fn test_generate_upstream_failure_is_generic() {
    let backend = ScriptedBackend::new(Err("secret provider detail".to_string()));
    let router = router_with(state_with_backend(backend.clone()));

    let response = router
        .oneshot(post_generate(r#"{"prompt":"hello","type":"chat"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    // Provider detail never reaches the client / 供应商错误细节不会返回给客户端
    assert!(!text.contains("secret provider detail"));

    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        json["error"],
        "Failed to get response from the completion backend. See server logs."
    );
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_health_check() {
    let router = router_with(GatewayState {
        completion: None,
        index_html: None,
    });

    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "saral-gateway");
    assert_eq!(json["completion_ready"], false);
}

#[tokio::test]
async fn test_spa_fallback_serves_entry_document() {
    let router = router_with(GatewayState {
        completion: None,
        index_html: Some(Arc::new("<html><body>SaralCredit</body></html>".to_string())),
    });

    let response = router.oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"<html><body>SaralCredit</body></html>");
}

#[tokio::test]
async fn test_spa_fallback_never_captures_api_paths() {
    let router = router_with(GatewayState {
        completion: None,
        index_html: Some(Arc::new("<html></html>".to_string())),
    });

    let response = router.oneshot(get("/api/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = json_body(response).await;
    assert_eq!(json["error"], "Unknown API route: /api/unknown");
}

#[tokio::test]
async fn test_spa_fallback_without_document() {
    let router = router_with(GatewayState {
        completion: None,
        index_html: None,
    });

    let response = router.oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
