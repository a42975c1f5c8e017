use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::gateway::GatewayState;
use crate::prompt::PromptKind;

/// Request body for the completion endpoint / 补全端点的请求体
///
/// Missing fields deserialize to empty strings so validation can answer
/// with the same 400 envelope as an explicitly empty field.
/// 缺失字段反序列化为空字符串，使校验与显式空字段返回相同的400响应。
#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, rename = "type")]
    pub request_type: String,
}

/// REST endpoint: POST /api/gemini
///
/// The request passes three one-way gates (validate, render, complete).
/// The first failure short-circuits and nothing is retried.
/// 请求依次通过三道单向关卡（校验、渲染、补全）。
/// 首个失败立即返回，任何阶段都不重试。
pub async fn generate(
    State(state): State<GatewayState>,
    Json(req): Json<GenerateRequest>,
) -> (StatusCode, Json<Value>) {
    if req.prompt.is_empty() || req.request_type.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields: prompt and type." })),
        );
    }

    let Some(kind) = PromptKind::parse(&req.request_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid request type: {}", req.request_type) })),
        );
    };

    let Some(backend) = state.completion.as_ref() else {
        error!("completion backend not initialized; rejecting request");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Completion client not initialized on server. Check server logs."
            })),
        );
    };

    let request_id = Uuid::new_v4();
    let full_prompt = kind.render(&req.prompt);
    info!(%request_id, kind = %kind, backend = backend.name(), "generating completion");

    match backend.generate(&full_prompt).await {
        Ok(text) => (StatusCode::OK, Json(json!({ "response": text }))),
        Err(e) => {
            // Provider detail stays in the server logs; the client gets a
            // generic message / 供应商错误细节只留在服务端日志；客户端收到通用消息
            error!(%request_id, "completion failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to get response from the completion backend. See server logs."
                })),
            )
        }
    }
}
