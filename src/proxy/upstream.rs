//! 上流APIへのリクエスト転送

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{HeaderName, CONTENT_LENGTH, CONTENT_TYPE, HOST};
use axum::http::{Request, Response};
use reqwest::Client;
use tokio::time::{timeout_at, Instant};

use crate::proxy::error::ProxyError;
use crate::proxy::routes::RouteTable;

/// 転送するリクエストボディの上限（画像のBase64を含むため大きめ）
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// 転送しないホップ間ヘッダ
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// 長さはボディを組み直す側で付け直す
fn is_forwardable(name: &HeaderName) -> bool {
    name != HOST && name != CONTENT_LENGTH && !HOP_BY_HOP.contains(&name.as_str())
}

pub struct UpstreamClient {
    client: Client,
    routes: RouteTable,
    request_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(routes: RouteTable, request_timeout: Duration) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProxyError::Http(format!("Failed to build upstream client: {}", e)))?;

        Ok(Self {
            client,
            routes,
            request_timeout,
        })
    }

    pub async fn forward(&self, req: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_string();

        let target = self
            .routes
            .resolve(&path_and_query)
            .ok_or_else(|| ProxyError::RouteNotFound(req.uri().path().to_string()))?;

        tracing::debug!(prefix = %target.prefix, method = %req.method(), "forwarding to upstream");

        let mut builder = self.client.request(req.method().clone(), target.url.as_str());
        for (name, value) in req.headers() {
            if is_forwardable(name) {
                builder = builder.header(name, value);
            }
        }

        let body_bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| ProxyError::InvalidRequest(format!("Failed to read request body: {}", e)))?;

        // 非ストリーミング応答は本文の受信完了までを1つの期限で区切る
        let deadline = Instant::now() + self.request_timeout;
        let upstream = match timeout_at(deadline, builder.body(body_bytes).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(source)) => {
                return Err(ProxyError::Connection {
                    upstream: target.prefix,
                    source,
                })
            }
            Err(_) => return Err(self.timeout_error(target.prefix)),
        };

        let status = upstream.status();
        tracing::info!(prefix = %target.prefix, status = status.as_u16(), "upstream responded");

        let is_streaming = upstream
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/event-stream"));

        let mut response_builder = Response::builder().status(status);
        for (name, value) in upstream.headers() {
            if is_forwardable(name) {
                response_builder = response_builder.header(name, value);
            }
        }

        if is_streaming {
            Ok(response_builder.body(Body::from_stream(upstream.bytes_stream()))?)
        } else {
            let bytes = match timeout_at(deadline, upstream.bytes()).await {
                Ok(Ok(bytes)) => bytes,
                Ok(Err(e)) => {
                    return Err(ProxyError::Http(format!("Failed to read response body: {}", e)))
                }
                Err(_) => return Err(self.timeout_error(target.prefix)),
            };
            Ok(response_builder.body(Body::from(bytes))?)
        }
    }

    fn timeout_error(&self, upstream: String) -> ProxyError {
        ProxyError::Timeout {
            upstream,
            seconds: self.request_timeout.as_secs(),
        }
    }
}
