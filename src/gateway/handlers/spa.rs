use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, info};

use crate::gateway::GatewayState;

/// Load the SPA entry document at startup / 启动时加载SPA入口文档
///
/// A missing document is logged prominently but never aborts the process;
/// the API routes keep serving without the static fallback.
/// 入口文档缺失会记录显著日志，但不会中止进程；API路由继续服务，
/// 只是没有静态回退。
pub fn load_entry_document(frontend_dir: &Path) -> Option<Arc<String>> {
    let path = frontend_dir.join("index.html");
    match std::fs::read_to_string(&path) {
        Ok(html) => {
            info!("Frontend entry document loaded from {}", path.display());
            Some(Arc::new(html))
        }
        Err(e) => {
            error!(
                "Frontend entry document not found at {}: {}; static routes disabled",
                path.display(),
                e
            );
            None
        }
    }
}

/// Fallback for any path the API routes did not match
/// API路由未匹配到的所有路径的回退处理
///
/// Paths under the API prefix are never answered with the document; they
/// get a JSON 404 so browser clients see an API-shaped error.
/// API前缀下的路径不会返回入口文档，而是JSON格式的404。
pub async fn spa_fallback(State(state): State<GatewayState>, uri: Uri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown API route: {}", path) })),
        )
            .into_response();
    }

    match state.index_html.as_ref() {
        Some(html) => Html(html.as_ref().clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
