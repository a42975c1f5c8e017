//! Saral gateway main entry point
//! Saral网关主入口点

use clap::Parser;
use saral_gateway::completion;
use saral_gateway::config::{init_tracing, CliArgs, GatewayConfig};
use saral_gateway::gateway::handlers::load_entry_document;
use saral_gateway::gateway::http_gateway::HttpGateway;
use saral_gateway::gateway::GatewayState;
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments / 解析命令行参数
    let args = CliArgs::parse();

    // Load configuration / 加载配置
    let config = GatewayConfig::load_with_cli(&args)?;

    // Initialize logging with configuration / 使用配置初始化日志
    init_tracing(&config.log);

    tracing::info!("Saral gateway starting with:");
    tracing::info!("  - HTTP server on: {}", config.http.addr);
    tracing::info!("  - Completion model: {}", config.gemini.model);
    tracing::info!("  - Frontend directory: {}", config.frontend.dir);

    // Both initializations degrade to "absent" on failure; the process
    // keeps serving whatever remains
    // 两项初始化失败时都降级为"缺失"；进程继续提供其余服务
    let completion = completion::init_backend(&config.gemini);
    let index_html = load_entry_document(Path::new(&config.frontend.dir));

    let state = GatewayState {
        completion,
        index_html,
    };
    let gateway = HttpGateway::new(
        config.http.addr,
        state,
        Duration::from_secs(config.gemini.request_timeout),
    );

    tracing::info!("Saral gateway running at http://{}", config.http.addr);

    gateway
        .start_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
