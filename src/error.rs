use thiserror::Error;

use crate::provider::Provider;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{0}のAPIキーが設定されていません。環境変数 {env} か `ai-studio config --set-key {0} YOUR_KEY` で設定してください", env = .0.env_var())]
    MissingApiKey(Provider),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("プロキシルートが不正: {0}")]
    InvalidRoute(String),

    #[error("アドレスにバインドできません: {0}")]
    Bind(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("タスク一覧の読み込みエラー: {0}")]
    Tasks(#[from] ai_studio_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StudioError>;
