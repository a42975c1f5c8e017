use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::gateway::GatewayState;

/// Health check endpoint / 健康检查端点
/// GET /health
pub async fn health_check(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "saral-gateway",
        "completion_ready": state.completion.is_some(),
        "frontend_ready": state.index_html.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
