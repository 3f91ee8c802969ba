//! 表示テーマ表
//!
//! カテゴリ（色名・ステータス）ごとに固定のスタイル設定を返す。
//! 未知のリテラルはデフォルト値に落とす（エラーにはしない）。

use serde::{Deserialize, Serialize};

use crate::tasks::TaskStatus;

// ---------------------------------------------------------------------------
// StatCard
// ---------------------------------------------------------------------------

/// StatCardの色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatColor {
    Green,
    Purple,
    Orange,
    Red,
    #[default]
    #[serde(other)]
    Blue,
}

/// StatCardのスタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatTheme {
    pub icon_bg: &'static str,
    pub icon_text: &'static str,
    pub accent: &'static str,
}

impl StatColor {
    /// 色名から変換（未知の値は青）
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "green" => StatColor::Green,
            "purple" => StatColor::Purple,
            "orange" => StatColor::Orange,
            "red" => StatColor::Red,
            _ => StatColor::Blue,
        }
    }

    pub fn theme(&self) -> StatTheme {
        match self {
            StatColor::Blue => StatTheme {
                icon_bg: "bg-blue-100",
                icon_text: "text-blue-600",
                accent: "border-blue-500",
            },
            StatColor::Green => StatTheme {
                icon_bg: "bg-green-100",
                icon_text: "text-green-600",
                accent: "border-green-500",
            },
            StatColor::Purple => StatTheme {
                icon_bg: "bg-purple-100",
                icon_text: "text-purple-600",
                accent: "border-purple-500",
            },
            StatColor::Orange => StatTheme {
                icon_bg: "bg-orange-100",
                icon_text: "text-orange-600",
                accent: "border-orange-500",
            },
            StatColor::Red => StatTheme {
                icon_bg: "bg-red-100",
                icon_text: "text-red-600",
                accent: "border-red-500",
            },
        }
    }
}

/// 前期比などの増減（パーセント）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub value: f64,
}

impl Trend {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn is_positive(&self) -> bool {
        self.value > 0.0
    }

    /// 正の値には "+" を付ける（例: "+12.5%", "-3%", "0%"）
    pub fn label(&self) -> String {
        if self.value == 0.0 || self.value.is_nan() {
            "0%".to_string()
        } else if self.is_positive() {
            format!("+{}%", self.value)
        } else {
            format!("{}%", self.value)
        }
    }

    pub fn arrow(&self) -> &'static str {
        if self.is_positive() { "↑" } else { "↓" }
    }

    pub fn class(&self) -> &'static str {
        if self.is_positive() { "text-green-600" } else { "text-red-600" }
    }
}

// ---------------------------------------------------------------------------
// StatusCard
// ---------------------------------------------------------------------------

/// StatusCardの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Warning,
    Error,
    Loading,
    #[default]
    #[serde(other)]
    Info,
}

/// StatusCardのスタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTheme {
    pub icon: &'static str,
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub button: &'static str,
    /// アイコンを回転させるか（loadingのみ）
    pub spin: bool,
}

impl StatusKind {
    /// 文字列から変換（未知の値はinfo）
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "success" => StatusKind::Success,
            "warning" => StatusKind::Warning,
            "error" => StatusKind::Error,
            "loading" => StatusKind::Loading,
            _ => StatusKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Warning => "warning",
            StatusKind::Error => "error",
            StatusKind::Info => "info",
            StatusKind::Loading => "loading",
        }
    }

    pub fn theme(&self) -> StatusTheme {
        match self {
            StatusKind::Success => StatusTheme {
                icon: "✅",
                background: "bg-green-50",
                border: "border-green-200",
                text: "text-green-800",
                button: "bg-green-600 hover:bg-green-700",
                spin: false,
            },
            StatusKind::Warning => StatusTheme {
                icon: "⚠️",
                background: "bg-yellow-50",
                border: "border-yellow-200",
                text: "text-yellow-800",
                button: "bg-yellow-600 hover:bg-yellow-700",
                spin: false,
            },
            StatusKind::Error => StatusTheme {
                icon: "❌",
                background: "bg-red-50",
                border: "border-red-200",
                text: "text-red-800",
                button: "bg-red-600 hover:bg-red-700",
                spin: false,
            },
            StatusKind::Info => StatusTheme {
                icon: "ℹ️",
                background: "bg-blue-50",
                border: "border-blue-200",
                text: "text-blue-800",
                button: "bg-blue-600 hover:bg-blue-700",
                spin: false,
            },
            StatusKind::Loading => StatusTheme {
                icon: "⏳",
                background: "bg-gray-50",
                border: "border-gray-200",
                text: "text-gray-800",
                button: "bg-gray-600 hover:bg-gray-700",
                spin: true,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ParallelProgressIndicator
// ---------------------------------------------------------------------------

/// タスク行のスタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTheme {
    pub icon: &'static str,
    pub label: &'static str,
    pub text: &'static str,
    pub background: &'static str,
    pub spin: bool,
}

impl TaskStatus {
    pub fn theme(&self) -> TaskTheme {
        match self {
            TaskStatus::Pending => TaskTheme {
                icon: "○",
                label: "待機中",
                text: "text-gray-500",
                background: "bg-gray-50",
                spin: false,
            },
            TaskStatus::Running => TaskTheme {
                icon: "⟳",
                label: "実行中",
                text: "text-blue-600",
                background: "bg-blue-50",
                spin: true,
            },
            TaskStatus::Completed => TaskTheme {
                icon: "✓",
                label: "完了",
                text: "text-green-600",
                background: "bg-green-50",
                spin: false,
            },
            TaskStatus::Failed => TaskTheme {
                icon: "✗",
                label: "失敗",
                text: "text-red-600",
                background: "bg-red-50",
                spin: false,
            },
        }
    }
}
