//! HTTP gateway for the Saral completion relay
//! Saral补全中继的HTTP网关

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::completion::CompletionBackend;

pub mod handlers;
pub mod http_gateway;
pub(crate) mod routes;

#[cfg(test)]
mod gateway_test;

/// Slack added on top of the upstream timeout so the inbound guard only
/// fires when a request hangs outside the provider call
/// 在上游超时之上增加的余量，保证入站保护只在请求卡在供应商调用之外时触发
const INBOUND_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// HTTP gateway state / HTTP网关状态
///
/// Both fields are constructed once at startup and read-only afterwards;
/// concurrent requests share them through `Arc` with no further locking.
/// 两个字段都在启动时构造一次，之后只读；并发请求通过`Arc`共享，无需加锁。
#[derive(Clone)]
pub struct GatewayState {
    /// Completion backend handle; absent when the credential is missing or
    /// construction failed at startup
    /// 补全后端句柄；凭证缺失或启动时构造失败则为空
    pub completion: Option<Arc<dyn CompletionBackend>>,
    /// SPA entry document loaded at startup / 启动时加载的SPA入口文档
    pub index_html: Option<Arc<String>>,
}

/// Create HTTP gateway router / 创建HTTP网关路由器
pub fn create_gateway_router(state: GatewayState, upstream_timeout: Duration) -> Router {
    routes::create_routes(state)
        // Add CORS support / 添加CORS支持
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(
            upstream_timeout + INBOUND_TIMEOUT_MARGIN,
        ))
        .layer(middleware::from_fn(log_request))
}

/// Log every inbound request / 记录每个入站请求
async fn log_request(req: Request, next: Next) -> Response {
    info!("[Request] {} {}", req.method(), req.uri());
    next.run(req).await
}
