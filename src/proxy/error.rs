//! プロキシのエラー型とHTTPレスポンスへの変換

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("No proxy route for '{0}'")]
    RouteNotFound(String),

    #[error("Connection failed to '{upstream}': {source}")]
    Connection {
        upstream: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to '{upstream}' timed out after {seconds}s")]
    Timeout { upstream: String, seconds: u64 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<axum::http::Error> for ProxyError {
    fn from(err: axum::http::Error) -> Self {
        ProxyError::Http(err.to_string())
    }
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::Connection { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ProxyError::RouteNotFound(_) => "route_not_found",
            ProxyError::Connection { .. } => "connection_error",
            ProxyError::Timeout { .. } => "request_timeout",
            ProxyError::InvalidRequest(_) => "invalid_request",
            ProxyError::Http(_) => "http_error",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });

        let mut response = Response::new(Body::from(body.to_string()));
        *response.status_mut() = self.status_code();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/json"),
        );
        response
    }
}
