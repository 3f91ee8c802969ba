//! AI Studio 開発用ツール
//!
//! - 開発用プロキシ（`/api/<provider>` を各APIへ転送）
//! - API疎通確認
//! - タスク進捗スナップショットの表示

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod provider;
pub mod proxy;
pub mod status;
