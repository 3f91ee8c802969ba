//! 並列タスクの進捗集計
//!
//! タスク一覧は呼び出し側が所有する。ここでは1回の描画ごとのスナップショットを
//! 1パスで数え上げるだけで、状態は持たない。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// タスクの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Completed,
    Failed,
    /// 未知の値もここに落とす
    #[default]
    #[serde(other)]
    Pending,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

/// 1タスク分の進捗レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TaskProgress {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// 状態ごとの件数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub completed: usize,
    pub failed: usize,
    pub running: usize,
    pub pending: usize,
    pub total: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[TaskProgress]) -> Self {
        let mut summary = TaskSummary {
            total: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Completed => summary.completed += 1,
                TaskStatus::Failed => summary.failed += 1,
                TaskStatus::Running => summary.running += 1,
                TaskStatus::Pending => summary.pending += 1,
            }
        }
        summary
    }

    /// 完了率（0〜100の整数、四捨五入）。タスク0件なら0
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// 全件完了したか（件数の比較のみ）
    pub fn is_all_completed(&self) -> bool {
        self.completed == self.total
    }

    /// 完了バナーを出すか
    pub fn shows_banner(&self, elapsed_secs: Option<f64>) -> bool {
        self.is_all_completed() && elapsed_secs.is_some()
    }
}

/// 経過時間を表示用に整形（60秒未満は "12.3秒"、以上は "2分05秒"）
pub fn format_elapsed(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    if secs < 60.0 {
        format!("{:.1}秒", secs)
    } else {
        let whole = secs.round() as u64;
        format!("{}分{:02}秒", whole / 60, whole % 60)
    }
}

/// JSON配列からタスク一覧を読み込む
///
/// IDが重複している場合はエラー（行のキーに使うため）。
pub fn parse_tasks(json: &str) -> Result<Vec<TaskProgress>> {
    let tasks: Vec<TaskProgress> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    for task in &tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(Error::InvalidTasks(format!("IDが重複しています: {}", task.id)));
        }
    }
    Ok(tasks)
}

/// ファイルからタスク一覧を読み込む
pub fn load_tasks(path: &Path) -> Result<Vec<TaskProgress>> {
    let content = std::fs::read_to_string(path)?;
    parse_tasks(&content)
}
