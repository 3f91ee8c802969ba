//! 設定ファイルテスト
//!
//! 保存と読み込み、カスタムルートの扱いを検証

use ai_studio::config::{key_fingerprint, Config};
use ai_studio::proxy::routes::{ProxyRoute, RouteTable};
use ai_studio::provider::Provider;
use tempfile::tempdir;

/// 存在しない設定ファイルはデフォルト
#[test]
fn test_load_missing_file_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config.bind_addr, "127.0.0.1:8787");
    assert!(config.api_keys.is_empty());
}

/// 保存すると親ディレクトリも作られ、読み戻せる
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("ai-studio").join("config.json");

    let mut config = Config::default();
    config.bind_addr = "0.0.0.0:9000".into();
    config.set_api_key(Provider::Perplexity, "pplx-123".into());
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.bind_addr, "0.0.0.0:9000");
    assert_eq!(loaded.api_keys.get(&Provider::Perplexity).map(String::as_str), Some("pplx-123"));
}

/// 壊れたJSONはエラー
#[test]
fn test_invalid_json_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

/// 設定ファイルのルートがデフォルトを置き換える
#[test]
fn test_custom_routes_replace_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "routes": [
                { "prefix": "/api/local", "origin": "http://127.0.0.1:11434", "path": "/api/chat" }
            ]
        }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let routes = config.effective_routes();
    assert_eq!(
        routes,
        vec![ProxyRoute {
            prefix: "/api/local".into(),
            origin: "http://127.0.0.1:11434".into(),
            path: "/api/chat".into(),
        }]
    );

    let table = RouteTable::new(routes).unwrap();
    assert_eq!(
        table.resolve("/api/local").unwrap().url,
        "http://127.0.0.1:11434/api/chat"
    );
    assert!(table.resolve("/api/gemini").is_none());
}

/// 保存されたファイルにキーの平文は含まれるが、表示用の指紋からは復元できない
#[test]
fn test_fingerprint_does_not_contain_key() {
    let key = "sk-or-v1-abcdef";
    let fp = key_fingerprint(key);
    assert!(!fp.contains("abcdef"));
    assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
}
