//! HTTP routes for the Saral gateway
//! Saral网关的HTTP路由
//!
//! This module defines all HTTP routes and their mappings to handlers
//! 此模块定义所有HTTP路由及其到处理器的映射

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{generate, health_check, spa_fallback};
use super::GatewayState;

/// Create HTTP routes / 创建HTTP路由
pub(crate) fn create_routes(state: GatewayState) -> Router {
    Router::new()
        // Completion endpoint / 补全端点
        .route("/api/gemini", post(generate))
        // Health check endpoint / 健康检查端点
        .route("/health", get(health_check))
        // Everything else falls back to the SPA entry document
        // 其余路径回退到SPA入口文档
        .fallback(spa_fallback)
        .with_state(state)
}
