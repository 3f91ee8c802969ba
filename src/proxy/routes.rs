//! パスプレフィックス → 上流URL の書き換え表

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};
use crate::provider::Provider;

/// 1プレフィックス分の転送ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRoute {
    /// 例: "/api/gemini"
    pub prefix: String,
    /// 例: "https://generativelanguage.googleapis.com"
    pub origin: String,
    /// プレフィックスを置き換えるパス
    pub path: String,
}

impl ProxyRoute {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            prefix: provider.route_prefix(),
            origin: provider.upstream_origin().to_string(),
            path: provider.upstream_path().to_string(),
        }
    }

    pub fn defaults() -> Vec<Self> {
        Provider::ALL.into_iter().map(Self::for_provider).collect()
    }

    /// 書き換え後のURL（プレフィックス以降の残りパスとクエリは付け足す）
    pub fn upstream_url(&self, rest: &str, query: Option<&str>) -> String {
        let mut url = format!("{}{}{}", self.origin.trim_end_matches('/'), self.path, rest);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    fn validate(&self) -> Result<()> {
        if !self.prefix.starts_with('/') || self.prefix.len() < 2 {
            return Err(StudioError::InvalidRoute(format!(
                "プレフィックスは'/'で始まる必要があります: {}",
                self.prefix
            )));
        }
        if !(self.origin.starts_with("http://") || self.origin.starts_with("https://")) {
            return Err(StudioError::InvalidRoute(format!(
                "上流はhttp(s)のURLである必要があります: {}",
                self.origin
            )));
        }
        if !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(StudioError::InvalidRoute(format!(
                "書き換えパスは'/'で始まる必要があります: {}",
                self.path
            )));
        }
        Ok(())
    }
}

/// 解決済みの転送先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub prefix: String,
    pub url: String,
}

/// ルート表（長いプレフィックスから順に照合）
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<ProxyRoute>,
}

impl RouteTable {
    pub fn new(mut routes: Vec<ProxyRoute>) -> Result<Self> {
        for route in &routes {
            route.validate()?;
        }
        for (i, route) in routes.iter().enumerate() {
            if routes[..i].iter().any(|r| r.prefix == route.prefix) {
                return Err(StudioError::InvalidRoute(format!(
                    "プレフィックスが重複しています: {}",
                    route.prefix
                )));
            }
        }
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[ProxyRoute] {
        &self.routes
    }

    pub fn find(&self, prefix: &str) -> Option<&ProxyRoute> {
        self.routes.iter().find(|r| r.prefix == prefix)
    }

    /// `path_and_query` を上流URLへ書き換える
    ///
    /// プレフィックスはパスセグメント境界でのみ一致する（`/api/gemini2` は `/api/gemini` に一致しない）。
    pub fn resolve(&self, path_and_query: &str) -> Option<ResolvedRoute> {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path_and_query, None),
        };

        self.routes.iter().find_map(|route| {
            let rest = path.strip_prefix(route.prefix.as_str())?;
            if !rest.is_empty() && !rest.starts_with('/') {
                return None;
            }
            Some(ResolvedRoute {
                prefix: route.prefix.clone(),
                url: route.upstream_url(rest, query),
            })
        })
    }
}
