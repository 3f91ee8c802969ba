//! API疎通確認
//!
//! プロバイダごとに1回だけPOSTし、応答の成否を報告する。リトライはしない。

use std::time::{Duration, Instant};

use reqwest::Client;

use crate::config::Config;
use crate::error::{Result, StudioError};
use crate::provider::Provider;
use crate::proxy::routes::{ProxyRoute, RouteTable};

/// 1プロバイダ分の結果
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    Passed { status: u16, elapsed: Duration },
    Failed { reason: String, elapsed: Duration },
    Skipped { reason: String },
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub provider: Provider,
    pub status: CheckStatus,
}

impl CheckOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, CheckStatus::Failed { .. })
    }

    /// 1行表示（例: "✔ gemini  200 (312ms)"）
    pub fn line(&self) -> String {
        match &self.status {
            CheckStatus::Passed { status, elapsed } => {
                format!("✔ {:<11} {} ({}ms)", self.provider, status, elapsed.as_millis())
            }
            CheckStatus::Failed { reason, elapsed } => {
                format!("✘ {:<11} {} ({}ms)", self.provider, reason, elapsed.as_millis())
            }
            CheckStatus::Skipped { reason } => format!("- {:<11} スキップ: {}", self.provider, reason),
        }
    }
}

/// 疎通確認用のHTTPクライアント
pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// 指定プロバイダを順番に確認する
pub async fn run_checks(client: &Client, config: &Config, providers: &[Provider]) -> Result<Vec<CheckOutcome>> {
    let table = RouteTable::new(config.effective_routes())?;
    let mut outcomes = Vec::with_capacity(providers.len());

    for &provider in providers {
        let status = match config.api_key(provider) {
            Ok(key) => {
                let route = table
                    .find(&provider.route_prefix())
                    .cloned()
                    .unwrap_or_else(|| ProxyRoute::for_provider(provider));
                check_one(client, provider, &route, &key).await
            }
            Err(StudioError::MissingApiKey(_)) => CheckStatus::Skipped {
                reason: format!("{} が未設定", provider.env_var()),
            },
            Err(err) => return Err(err),
        };
        outcomes.push(CheckOutcome { provider, status });
    }

    Ok(outcomes)
}

async fn check_one(client: &Client, provider: Provider, route: &ProxyRoute, key: &str) -> CheckStatus {
    let url = route.upstream_url("", None);
    let mut request = client.post(&url).json(&provider.probe_body());
    request = if provider.uses_query_key() {
        request.query(&[("key", key)])
    } else {
        request.bearer_auth(key)
    };

    tracing::debug!(%provider, %url, "sending probe request");
    let started = Instant::now();
    match request.send().await {
        Ok(response) => {
            let elapsed = started.elapsed();
            let status = response.status();
            if status.is_success() {
                CheckStatus::Passed {
                    status: status.as_u16(),
                    elapsed,
                }
            } else {
                let detail = match response.text().await {
                    Ok(body) => summarize_body(&body),
                    Err(err) => format!("(本文を読み取れません: {})", err),
                };
                CheckStatus::Failed {
                    reason: format!("HTTP {} {}", status.as_u16(), detail),
                    elapsed,
                }
            }
        }
        Err(err) => CheckStatus::Failed {
            reason: if err.is_timeout() {
                "タイムアウト".to_string()
            } else {
                format!("接続失敗: {}", err)
            },
            elapsed: started.elapsed(),
        },
    }
}

/// エラーレスポンス本文を1行に縮める
fn summarize_body(body: &str) -> String {
    let line: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > 120 {
        let cut: String = line.chars().take(120).collect();
        format!("{}...", cut)
    } else {
        line
    }
}
