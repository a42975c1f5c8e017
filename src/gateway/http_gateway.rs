//! HTTP gateway implementation for the Saral completion relay
//! Saral补全中继的HTTP网关实现

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info};

use super::{create_gateway_router, GatewayState};

/// Saral HTTP gateway / Saral HTTP网关
pub struct HttpGateway {
    addr: SocketAddr,
    state: GatewayState,
    upstream_timeout: Duration,
}

impl HttpGateway {
    /// Create a new HTTP gateway / 创建新的HTTP网关
    pub fn new(addr: SocketAddr, state: GatewayState, upstream_timeout: Duration) -> Self {
        Self {
            addr,
            state,
            upstream_timeout,
        }
    }

    /// Get the HTTP address / 获取HTTP地址
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the HTTP gateway / 启动HTTP网关
    pub async fn start(self) -> Result<()> {
        let (listener, app) = self.prepare().await?;
        if let Err(e) = axum::serve(listener, app).await {
            error!("Saral HTTP gateway error: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    /// Start HTTP gateway with shutdown signal / 使用关闭信号启动HTTP网关
    pub async fn start_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let (listener, app) = self.prepare().await?;
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            error!("Saral HTTP gateway error: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    async fn prepare(self) -> Result<(tokio::net::TcpListener, axum::Router)> {
        info!("Starting Saral HTTP gateway on {}", self.addr);

        let app = create_gateway_router(self.state, self.upstream_timeout);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("Saral HTTP gateway listening on {}", self.addr);
        Ok((listener, app))
    }
}
