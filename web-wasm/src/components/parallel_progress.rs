//! 並列タスク進捗コンポーネント
//!
//! 内部状態は持たない。タスク一覧が変わるたびに件数と完了率を数え直す。

use ai_studio_common::{format_elapsed, TaskProgress, TaskSummary};
use leptos::prelude::*;

use super::progress_bar::ProgressBar;

#[component]
pub fn ParallelProgressIndicator(
    #[prop(into)] tasks: Signal<Vec<TaskProgress>>,
    #[prop(into, default = "並列処理の進捗".to_string())] title: String,
    /// 全体の経過時間（秒）。全件完了時のバナーに表示する
    #[prop(optional, into)]
    total_time: MaybeProp<f64>,
) -> impl IntoView {
    let summary = Memo::new(move |_| tasks.with(|t| TaskSummary::from_tasks(t)));
    let percentage = Signal::derive(move || summary.get().percentage() as f64);

    view! {
        <div class="parallel-progress bg-white rounded-xl shadow-sm p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h3 class="text-lg font-semibold text-gray-900">{title}</h3>
                <span class="text-sm text-gray-600">
                    {move || {
                        let s = summary.get();
                        format!("{}/{} 完了", s.completed, s.total)
                    }}
                </span>
            </div>

            <ProgressBar progress=percentage show_percentage=true color="bg-green-500" />

            <ul class="task-list space-y-2">
                <For
                    each=move || tasks.get()
                    key=|task| (task.id.clone(), task.status, task.message.clone())
                    children=move |task| view! { <TaskRow task=task /> }
                />
            </ul>

            <div class="summary-grid grid grid-cols-4 gap-2 text-center">
                <SummaryCell label="完了" tone="text-green-600" count=Signal::derive(move || summary.get().completed) />
                <SummaryCell label="実行中" tone="text-blue-600" count=Signal::derive(move || summary.get().running) />
                <SummaryCell label="待機中" tone="text-gray-500" count=Signal::derive(move || summary.get().pending) />
                <SummaryCell label="失敗" tone="text-red-600" count=Signal::derive(move || summary.get().failed) />
            </div>

            <Show when=move || summary.get().shows_banner(total_time.get())>
                <div class="completion-banner rounded-lg bg-green-50 border border-green-200 p-3 text-green-800 text-sm">
                    "✓ すべてのタスクが完了しました（所要時間: "
                    {move || total_time.get().map(format_elapsed).unwrap_or_default()}
                    "）"
                </div>
            </Show>
        </div>
    }
}

#[component]
fn TaskRow(task: TaskProgress) -> impl IntoView {
    let theme = task.status.theme();
    let icon_class = if theme.spin { "task-icon animate-spin" } else { "task-icon" };

    view! {
        <li
            class=format!("task-row flex items-center gap-3 rounded-md px-3 py-2 {}", theme.background)
            data-status=task.status.as_str()
        >
            <span class=format!("{} {}", icon_class, theme.text)>{theme.icon}</span>
            <div class="flex-1 min-w-0">
                <p class="text-sm font-medium text-gray-900 truncate">{task.name}</p>
                {task.message.map(|message| view! {
                    <p class="text-xs text-gray-500 truncate">{message}</p>
                })}
            </div>
            <span class=format!("text-xs font-medium {}", theme.text)>{theme.label}</span>
        </li>
    }
}

#[component]
fn SummaryCell(
    label: &'static str,
    tone: &'static str,
    #[prop(into)] count: Signal<usize>,
) -> impl IntoView {
    view! {
        <div class="summary-cell rounded-md bg-gray-50 py-2">
            <p class=format!("text-xl font-bold {}", tone)>{move || count.get()}</p>
            <p class="text-xs text-gray-600">{label}</p>
        </div>
    }
}
