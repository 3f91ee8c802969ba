//! 開発用プロキシサーバー
//!
//! ブラウザから直接呼べない（CORS非対応の）外部APIを、
//! `/api/<provider>` のパスで中継する。開発時専用。

pub mod error;
pub mod routes;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::{Result, StudioError};
use routes::RouteTable;
use upstream::UpstreamClient;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "ai-studio",
    })
}

async fn forward(State(upstream): State<Arc<UpstreamClient>>, req: Request<Body>) -> Response {
    let path = req.uri().path().to_string();
    match upstream.forward(req).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(%path, error = %err, "proxy request failed");
            err.into_response()
        }
    }
}

/// `/health` 以外はすべてルート表で転送する
pub fn build_router(upstream: Arc<UpstreamClient>) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(forward)
        .with_state(upstream)
        .layer(CorsLayer::permissive())
}

pub struct ProxyServer {
    listener: TcpListener,
    router: Router,
}

impl ProxyServer {
    /// 設定からルート表を作り、待ち受けアドレスにバインドする
    pub async fn bind(config: &Config, bind_addr: &str) -> Result<Self> {
        let routes = RouteTable::new(config.effective_routes())?;
        let upstream = UpstreamClient::new(routes, config.timeout())
            .map_err(|e| StudioError::Config(e.to_string()))?;

        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| StudioError::Bind(format!("'{}': {}", bind_addr, e)))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| StudioError::Bind(format!("{}: {}", addr, e)))?;

        Ok(Self {
            listener,
            router: build_router(Arc::new(upstream)),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Ctrl-Cを受けるまで待ち受ける
    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        tracing::info!("Proxy listening on http://{}", addr);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down");
            })
            .await?;

        Ok(())
    }
}
