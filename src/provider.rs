use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// 外部AI APIプロバイダ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Doubao,
    Perplexity,
    Gemini,
    #[value(name = "openrouter")]
    OpenRouter,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Doubao,
        Provider::Perplexity,
        Provider::Gemini,
        Provider::OpenRouter,
    ];

    /// 疎通確認でデフォルト対象とするプロバイダ
    pub const DEFAULT_CHECKS: [Provider; 3] = [Provider::Doubao, Provider::Perplexity, Provider::Gemini];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Doubao => "doubao",
            Provider::Perplexity => "perplexity",
            Provider::Gemini => "gemini",
            Provider::OpenRouter => "openrouter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name.trim().to_lowercase())
    }

    /// APIキーを読む環境変数名
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::Doubao => "DOUBAO_API_KEY",
            Provider::Perplexity => "PERPLEXITY_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// フロントエンドから呼ぶパスのプレフィックス
    pub fn route_prefix(&self) -> String {
        format!("/api/{}", self.name())
    }

    pub fn upstream_origin(&self) -> &'static str {
        match self {
            Provider::Doubao => "https://ark.cn-beijing.volces.com",
            Provider::Perplexity => "https://api.perplexity.ai",
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::OpenRouter => "https://openrouter.ai",
        }
    }

    pub fn upstream_path(&self) -> &'static str {
        match self {
            Provider::Doubao => "/api/v3/images/generations",
            Provider::Perplexity => "/chat/completions",
            Provider::Gemini => "/v1beta/models/gemini-2.0-flash-exp:generateContent",
            Provider::OpenRouter => "/api/v1/chat/completions",
        }
    }

    /// Geminiはクエリ文字列、それ以外はBearerヘッダで認証する
    pub fn uses_query_key(&self) -> bool {
        matches!(self, Provider::Gemini)
    }

    /// 疎通確認用の最小リクエストボディ
    pub fn probe_body(&self) -> Value {
        match self {
            Provider::Doubao => json!({
                "model": "doubao-seedream-3-0-t2i-250415",
                "prompt": "a small red apple on a white table",
                "size": "512x512",
                "response_format": "url"
            }),
            Provider::Perplexity => json!({
                "model": "sonar",
                "messages": [{ "role": "user", "content": "ping" }],
                "max_tokens": 8
            }),
            Provider::Gemini => json!({
                "contents": [{ "parts": [{ "text": "ping" }] }],
                "generationConfig": { "temperature": 0.1, "maxOutputTokens": 8 }
            }),
            Provider::OpenRouter => json!({
                "model": "openai/gpt-4o-mini",
                "messages": [{ "role": "user", "content": "ping" }],
                "max_tokens": 8
            }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_prefixes() {
        let prefixes: Vec<String> = Provider::ALL.iter().map(|p| p.route_prefix()).collect();
        assert_eq!(
            prefixes,
            vec!["/api/doubao", "/api/perplexity", "/api/gemini", "/api/openrouter"]
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Provider::from_name("Gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::from_name("openrouter"), Some(Provider::OpenRouter));
        assert_eq!(Provider::from_name("claude"), None);
    }

    #[test]
    fn test_serde_names_match_display() {
        for p in Provider::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p));
        }
    }

    #[test]
    fn test_only_gemini_uses_query_key() {
        assert!(Provider::Gemini.uses_query_key());
        assert!(!Provider::Doubao.uses_query_key());
    }
}
