use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::provider::Provider;

#[derive(Parser)]
#[command(name = "ai-studio")]
#[command(about = "AI Studio 開発用プロキシ・API疎通確認ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/ai-studio/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 開発用プロキシを起動（/api/<provider> を各APIへ転送）
    Serve {
        /// 待ち受けアドレス（例: 127.0.0.1:8787）
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// プロキシのルート表を表示
    Routes,

    /// 各APIへ1回ずつリクエストして疎通確認
    Check {
        /// 確認するプロバイダ（省略時: doubao/perplexity/gemini）
        #[arg(short, long)]
        provider: Vec<Provider>,

        /// 1リクエストのタイムアウト秒数
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// タスク進捗JSONを表示
    Status {
        /// 入力JSONファイル（TaskProgressの配列）
        #[arg(required = true)]
        input: PathBuf,

        /// 全体の所要時間（秒）。全件完了時に表示
        #[arg(short, long)]
        elapsed: Option<f64>,
    },

    /// 設定を表示・変更
    Config(ConfigArgs),
}

#[derive(Args)]
#[group(required = false, multiple = false)]
pub struct ConfigArgs {
    /// 現在の設定を表示（キーは指紋のみ）
    #[arg(long)]
    pub show: bool,

    /// APIキーを設定
    #[arg(long, num_args = 2, value_names = ["PROVIDER", "KEY"])]
    pub set_key: Option<Vec<String>>,

    /// APIキーを対話入力で設定
    #[arg(long, value_name = "PROVIDER")]
    pub prompt: Option<Provider>,
}
