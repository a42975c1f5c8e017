//! Completion backends for the external generation provider
//! 外部生成服务的补全后端

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::GeminiConfig;

pub mod gemini;
pub use gemini::GeminiClient;

/// Completion result type / 补全结果类型
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Completion error types / 补全错误类型
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Upstream status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

/// A handle to an external text generation service
/// 外部文本生成服务的句柄
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name used in logs / 日志中使用的后端名称
    fn name(&self) -> &str;

    /// Generate text for a fully rendered prompt. An upstream response with
    /// no text is an empty-string success, not an error.
    /// 为完整渲染的提示词生成文本。上游响应不含文本时视为空字符串成功，而非错误。
    async fn generate(&self, prompt: &str) -> CompletionResult<String>;
}

/// Construct the completion backend at startup, if configured
/// 启动时构造补全后端（若已配置）
///
/// Happens at most once per process. Returns `None` when the credential is
/// absent or construction fails; both conditions are logged prominently and
/// leave the gateway serving in degraded mode.
/// 每个进程最多执行一次。凭证缺失或构造失败时返回`None`；两种情况都会
/// 记录显著日志，网关以降级模式继续服务。
pub fn init_backend(config: &GeminiConfig) -> Option<Arc<dyn CompletionBackend>> {
    let api_key = match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => {
            error!("GEMINI_API_KEY is not set; completion endpoint disabled");
            return None;
        }
    };

    match GeminiClient::new(
        &config.model,
        &config.base_url,
        api_key,
        Duration::from_secs(config.request_timeout),
    ) {
        Ok(client) => {
            info!(model = %config.model, "Gemini client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Could not initialize Gemini client: {:#}", e);
            None
        }
    }
}
