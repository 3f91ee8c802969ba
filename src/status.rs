//! タスク進捗スナップショットの端末表示
//!
//! ブラウザの並列進捗インジケータと同じ集計・表記を使う。

use std::path::Path;

use ai_studio_common::{format_elapsed, load_tasks, TaskProgress, TaskSummary};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Result, StudioError};

/// 1タスク分の行（例: "✓ 完了     doubao 画像生成 - 3枚生成"）
pub fn task_line(task: &TaskProgress) -> String {
    let theme = task.status.theme();
    match &task.message {
        Some(message) if !message.is_empty() => {
            format!("{} {:<6} {} - {}", theme.icon, theme.label, task.name, message)
        }
        _ => format!("{} {:<6} {}", theme.icon, theme.label, task.name),
    }
}

/// 集計行（完了/実行中/待機/失敗）
pub fn summary_line(summary: &TaskSummary) -> String {
    format!(
        "完了 {} / 実行中 {} / 待機 {} / 失敗 {}",
        summary.completed, summary.running, summary.pending, summary.failed
    )
}

/// 全件完了かつ経過時間がある場合のみ完了メッセージを返す
pub fn completion_banner(summary: &TaskSummary, elapsed: Option<f64>) -> Option<String> {
    if !summary.shows_banner(elapsed) {
        return None;
    }
    elapsed.map(|secs| format!("すべてのタスクが完了しました（所要時間: {}）", format_elapsed(secs)))
}

fn summary_bar(summary: &TaskSummary) -> ProgressBar {
    let bar = ProgressBar::new(summary.total as u64);
    let style = ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} 完了 ({msg})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar.set_position(summary.completed as u64);
    bar.set_message(format!("{}%", summary.percentage()));
    bar
}

/// JSONファイルを読み込んで進捗を表示する
pub fn show(path: &Path, elapsed: Option<f64>) -> Result<TaskSummary> {
    if !path.exists() {
        return Err(StudioError::FileNotFound(path.display().to_string()));
    }

    let tasks = load_tasks(path)?;
    let summary = TaskSummary::from_tasks(&tasks);
    tracing::debug!(tasks = tasks.len(), "loaded task snapshot");

    println!("📊 並列処理の進捗: {}/{} 完了\n", summary.completed, summary.total);
    for task in &tasks {
        println!("  {}", task_line(task));
    }
    println!();

    let bar = summary_bar(&summary);
    bar.abandon();

    println!("{}", summary_line(&summary));
    if let Some(banner) = completion_banner(&summary, elapsed) {
        println!("\n✅ {}", banner);
    }

    Ok(summary)
}
