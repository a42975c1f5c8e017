//! Configuration management for the Saral gateway
//! Saral网关的配置管理
//!
//! This module provides a unified configuration framework that supports:
//! - Command line arguments / 命令行参数
//! - Environment variables / 环境变量
//! - Configuration files (TOML) / 配置文件（TOML）
//!
//! Precedence order (highest to lowest):
//! 优先级顺序（从高到低）：
//! 1. Command line arguments / 命令行参数
//! 2. Environment variables / 环境变量
//! 3. Configuration file / 配置文件
//! 4. Default values / 默认值

use anyhow::{Context, Result};
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Base configuration shared building blocks / 共享的基础配置构件
pub mod base;
pub use base::*;

/// Gateway command line arguments / 网关命令行参数
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gateway",
    version = "0.1.0",
    about = "Saral Gateway - prompt relay for the SaralCredit app\nSaral网关 - SaralCredit应用的提示词中继"
)]
pub struct CliArgs {
    /// Configuration file path / 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path / 配置文件路径"
    )]
    pub config: Option<String>,

    /// HTTP server address / HTTP服务器地址
    #[arg(
        long,
        value_name = "ADDR",
        help = "HTTP server address (e.g., 0.0.0.0:3000) / HTTP服务器地址"
    )]
    pub http_addr: Option<String>,

    /// Generation model identifier / 生成模型标识符
    #[arg(
        long,
        value_name = "NAME",
        help = "Generation model identifier / 生成模型标识符"
    )]
    pub model: Option<String>,

    /// Frontend directory / 前端目录
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory holding the SPA entry document / 存放SPA入口文档的目录"
    )]
    pub frontend_dir: Option<String>,

    /// Log level / 日志级别
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level (trace, debug, info, warn, error) / 日志级别"
    )]
    pub log_level: Option<String>,
}

/// Completion provider configuration / 补全服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Provider credential; also read from GEMINI_API_KEY
    /// 服务凭证；也可通过GEMINI_API_KEY读取
    pub api_key: Option<String>,
    /// Model identifier / 模型标识符
    pub model: String,
    /// Provider base URL / 服务基础URL
    pub base_url: String,
    /// Outbound request timeout in seconds / 出站请求超时时间（秒）
    pub request_timeout: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash-latest".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            request_timeout: 30,
        }
    }
}

/// Frontend serving configuration / 前端服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Directory holding index.html / 存放index.html的目录
    pub dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: "frontend".to_string(),
        }
    }
}

/// Gateway application configuration / 网关应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration / HTTP服务器配置
    pub http: ServerConfig,
    /// Completion provider configuration / 补全服务配置
    pub gemini: GeminiConfig,
    /// Frontend configuration / 前端配置
    pub frontend: FrontendConfig,
    /// Logging configuration / 日志配置
    pub log: LogConfig,
}

impl GatewayConfig {
    /// Load configuration with CLI arguments / 使用CLI参数加载配置
    pub fn load_with_cli(args: &CliArgs) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(GatewayConfig::default()));

        figment = match &args.config {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment.merge(Toml::file("config.toml")),
        };

        figment = figment.merge(Env::prefixed("SARAL_").split("__"));

        let mut config: GatewayConfig =
            figment.extract().context("Failed to load configuration")?;

        config.apply_cli_overrides(args)?;

        // Compatibility with the original deployment, which configured the
        // credential via a bare GEMINI_API_KEY variable
        // 兼容原部署方式：凭证通过GEMINI_API_KEY环境变量配置
        if config
            .gemini
            .api_key
            .as_deref()
            .map_or(true, |k| k.trim().is_empty())
        {
            config.gemini.api_key = std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty());
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides / 应用CLI参数覆盖
    fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<()> {
        if let Some(addr) = &args.http_addr {
            self.http.addr = addr
                .parse()
                .with_context(|| format!("Invalid --http-addr: {}", addr))?;
        }
        if let Some(model) = &args.model {
            self.gemini.model = model.clone();
        }
        if let Some(dir) = &args.frontend_dir {
            self.frontend.dir = dir.clone();
        }
        if let Some(level) = &args.log_level {
            self.log.level = level.clone();
        }
        Ok(())
    }

    /// Validate the configuration / 验证配置
    pub fn validate(&self) -> Result<()> {
        if self.gemini.model.trim().is_empty() {
            anyhow::bail!("gemini.model must not be empty");
        }
        if self.gemini.base_url.trim().is_empty() {
            anyhow::bail!("gemini.base_url must not be empty");
        }
        if self.gemini.request_timeout == 0 {
            anyhow::bail!("gemini.request_timeout must be greater than zero");
        }
        if self.frontend.dir.trim().is_empty() {
            anyhow::bail!("frontend.dir must not be empty");
        }
        Ok(())
    }
}

/// Initialize tracing based on logging configuration
/// 基于日志配置初始化跟踪
pub fn init_tracing(config: &LogConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.level.trim().is_empty() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new(config.level.clone())
        }
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_timer(tracing_subscriber::fmt::time::uptime())
                .with_level(true);
            registry.with(stdout_layer).init();
        }
        "compact" => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_timer(tracing_subscriber::fmt::time::uptime())
                .with_level(true);
            registry.with(stdout_layer).init();
        }
        _ => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_timer(tracing_subscriber::fmt::time::uptime())
                .with_level(true);
            registry.with(stdout_layer).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            config: None,
            http_addr: None,
            model: None,
            frontend_dir: None,
            log_level: None,
        }
    }

    #[test]
    fn defaults_are_complete() {
        let config = GatewayConfig::default();
        assert_eq!(config.http.addr.port(), 3000);
        assert_eq!(config.gemini.model, "gemini-1.5-flash-latest");
        assert_eq!(
            config.gemini.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.gemini.request_timeout, 30);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.frontend.dir, "frontend");
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(GatewayConfig::default()))
            .merge(Toml::string(
                r#"
                [http]
                addr = "127.0.0.1:9999"

                [gemini]
                model = "gemini-test"
                request_timeout = 5
                "#,
            ));

        let config: GatewayConfig = figment.extract().unwrap();
        assert_eq!(config.http.addr.port(), 9999);
        assert_eq!(config.gemini.model, "gemini-test");
        assert_eq!(config.gemini.request_timeout, 5);
        // Untouched sections keep their defaults / 未覆盖的部分保持默认值
        assert_eq!(config.frontend.dir, "frontend");
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = GatewayConfig::default();
        let args = CliArgs {
            http_addr: Some("127.0.0.1:8088".to_string()),
            model: Some("gemini-cli".to_string()),
            frontend_dir: Some("web".to_string()),
            log_level: Some("debug".to_string()),
            ..no_args()
        };

        config.apply_cli_overrides(&args).unwrap();
        assert_eq!(config.http.addr.port(), 8088);
        assert_eq!(config.gemini.model, "gemini-cli");
        assert_eq!(config.frontend.dir, "web");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn invalid_http_addr_is_rejected() {
        let mut config = GatewayConfig::default();
        let args = CliArgs {
            http_addr: Some("not-an-addr".to_string()),
            ..no_args()
        };
        assert!(config.apply_cli_overrides(&args).is_err());
    }

    #[test]
    fn validate_rejects_empty_model() {
        let mut config = GatewayConfig::default();
        config.gemini.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = GatewayConfig::default();
        config.gemini.request_timeout = 0;
        assert!(config.validate().is_err());
    }
}
