//! 開発用プロキシの転送テスト
//!
//! ローカルに立てたモック上流へ実際に転送して検証

use ai_studio::proxy::build_router;
use ai_studio::proxy::routes::{ProxyRoute, RouteTable};
use ai_studio::proxy::upstream::UpstreamClient;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// 受け取ったリクエストをそのままJSONで返す上流
async fn echo(req: Request<Body>) -> Json<Value> {
    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(req.into_body(), usize::MAX).await.unwrap();
    Json(json!({
        "method": method,
        "uri": uri,
        "authorization": auth,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn rate_limited() -> impl IntoResponse {
    (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "error": "slow down" })))
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "late"
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/limited", post(rate_limited))
        .route("/slow", post(slow))
        .fallback(echo);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn route(prefix: &str, addr: SocketAddr, path: &str) -> ProxyRoute {
    ProxyRoute {
        prefix: prefix.into(),
        origin: format!("http://{}", addr),
        path: path.into(),
    }
}

fn proxy(routes: Vec<ProxyRoute>, timeout: Duration) -> Router {
    let table = RouteTable::new(routes).unwrap();
    let upstream = UpstreamClient::new(table, timeout).unwrap();
    build_router(Arc::new(upstream))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// パス・クエリ・ボディ・認証ヘッダがそのまま上流へ届く
#[tokio::test]
async fn test_forwards_request_to_rewritten_path() {
    let addr = spawn_upstream().await;
    let app = proxy(vec![route("/api/gemini", addr, "/v1beta/generate")], Duration::from_secs(5));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/gemini?key=test-key")
                .header("content-type", "application/json")
                .header("authorization", "Bearer abc")
                .body(Body::from(r#"{"contents":[]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let echoed = body_json(response).await;
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["uri"], "/v1beta/generate?key=test-key");
    assert_eq!(echoed["authorization"], "Bearer abc");
    assert_eq!(echoed["body"], r#"{"contents":[]}"#);
}

/// 上流のエラーステータスは書き換えずに返す
#[tokio::test]
async fn test_upstream_status_is_passed_through() {
    let addr = spawn_upstream().await;
    let app = proxy(vec![route("/api/perplexity", addr, "/limited")], Duration::from_secs(5));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/perplexity")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await["error"], "slow down");
}

/// 未登録のプレフィックスは404のJSONエラー
#[tokio::test]
async fn test_unknown_prefix_is_404() {
    let addr = spawn_upstream().await;
    let app = proxy(vec![route("/api/gemini", addr, "/x")], Duration::from_secs(5));

    let response = app
        .oneshot(Request::builder().uri("/api/gemini2").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "route_not_found");
}

/// 接続できない上流は502
#[tokio::test]
async fn test_unreachable_upstream_is_502() {
    let closed = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let app = proxy(vec![route("/api/doubao", closed, "/gen")], Duration::from_secs(5));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/doubao")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"]["type"], "connection_error");
}

/// 応答が遅い上流は504
#[tokio::test]
async fn test_slow_upstream_is_504() {
    let addr = spawn_upstream().await;
    let app = proxy(vec![route("/api/openrouter", addr, "/slow")], Duration::from_millis(200));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/openrouter")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

/// ヘッダと本文の一部だけ返して止まる上流
async fn spawn_stalled_body_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 13\r\n\r\n";
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(br#"{"a":"#).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        let _ = socket.write_all(br#" "late"}"#).await;
    });
    addr
}

/// ヘッダ受信後に本文が止まった場合も期限内に504を返す
#[tokio::test]
async fn test_stalled_body_is_504() {
    let addr = spawn_stalled_body_upstream().await;
    let app = proxy(vec![route("/api/gemini", addr, "/gen")], Duration::from_millis(200));

    let started = std::time::Instant::now();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/gemini")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(body_json(response).await["error"]["type"], "request_timeout");
}

#[tokio::test]
async fn test_health() {
    let app = proxy(Vec::new(), Duration::from_secs(1));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ai-studio");
}

/// ブラウザからのプリフライトにCORSヘッダを返す
#[tokio::test]
async fn test_cors_preflight() {
    let app = proxy(Vec::new(), Duration::from_secs(1));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/gemini")
                .header("origin", "http://localhost:8080")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("access-control-allow-origin"));
}
