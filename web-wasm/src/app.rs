//! デモページ
//!
//! 各コンポーネントを並べて表示する。タスク一覧はこのコンポーネントが所有し、
//! ボタン操作で状態を進める（インジケータ側は読むだけ）。

use ai_studio_common::{parse_tasks, StatColor, StatusKind, TaskProgress, TaskStatus, Trend};
use leptos::prelude::*;

use crate::components::{
    LazyImage, ParallelProgressIndicator, ProgressBar, ProgressSize, StatCard, StatusAction,
    StatusCard,
};

const DEMO_TASKS: &str = r#"[
    {"id": "doubao", "name": "画像生成 (Doubao)", "status": "pending"},
    {"id": "perplexity", "name": "リサーチ (Perplexity)", "status": "pending"},
    {"id": "gemini", "name": "要約 (Gemini)", "status": "pending"},
    {"id": "openrouter", "name": "翻訳 (OpenRouter)", "status": "pending"}
]"#;

const DEMO_IMAGES: [&str; 4] = [
    "https://picsum.photos/seed/studio-1/480/320",
    "https://picsum.photos/seed/studio-2/480/320",
    "https://picsum.photos/seed/studio-3/480/320",
    "https://invalid.example/missing.png",
];

fn all_completed(tasks: &[TaskProgress]) -> bool {
    !tasks.is_empty() && tasks.iter().all(|task| task.status == TaskStatus::Completed)
}

/// 1ステップ分タスクを進める（pending → running → completed）
///
/// `fail_last` なら最後のタスクは失敗扱いにしてfailed表示を確認できるようにする。
/// このステップで全件完了になった場合だけ true を返す。
fn advance_tasks(tasks: &mut [TaskProgress], fail_last: bool) -> bool {
    let was_completed = all_completed(tasks);
    step_one(tasks, fail_last);
    !was_completed && all_completed(tasks)
}

fn step_one(tasks: &mut [TaskProgress], fail_last: bool) {
    let last = tasks.len().saturating_sub(1);
    for (i, task) in tasks.iter_mut().enumerate() {
        match task.status {
            TaskStatus::Running => {
                if fail_last && i == last {
                    task.status = TaskStatus::Failed;
                    task.message = Some("レート制限に達しました".to_string());
                } else {
                    task.status = TaskStatus::Completed;
                    task.message = None;
                }
                return;
            }
            TaskStatus::Pending => {
                task.status = TaskStatus::Running;
                task.message = Some("処理中...".to_string());
                return;
            }
            TaskStatus::Completed | TaskStatus::Failed => {}
        }
    }
}

fn demo_tasks() -> Vec<TaskProgress> {
    match parse_tasks(DEMO_TASKS) {
        Ok(tasks) => tasks,
        Err(err) => {
            gloo::console::error!(format!("デモタスクの読み込みに失敗: {}", err));
            Vec::new()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (tasks, set_tasks) = signal(demo_tasks());
    let (started_at, set_started_at) = signal(None::<f64>);
    let (elapsed, set_elapsed) = signal(None::<f64>);
    let (fail_last, set_fail_last) = signal(false);
    let (manual_progress, set_manual_progress) = signal(35.0_f64);
    let (generated, set_generated) = signal(1284_i64);
    let (loaded_images, set_loaded_images) = signal(0_i64);
    let (failed_images, set_failed_images) = signal(0_i64);

    let step = move |_| {
        if started_at.get_untracked().is_none() {
            set_started_at.set(Some(js_sys::Date::now()));
        }
        let mut finished = false;
        set_tasks.update(|t| finished = advance_tasks(t, fail_last.get_untracked()));

        if finished {
            if let Some(start) = started_at.get_untracked() {
                set_elapsed.set(Some((js_sys::Date::now() - start) / 1000.0));
            }
            set_generated.update(|n| *n += 1);
        }
    };

    let reset = move |_| {
        set_tasks.set(demo_tasks());
        set_started_at.set(None);
        set_elapsed.set(None);
    };

    let on_image_load = Callback::new(move |_| set_loaded_images.update(|n| *n += 1));
    let on_image_error = Callback::new(move |_| set_failed_images.update(|n| *n += 1));

    view! {
        <div class="container mx-auto p-6 space-y-8">
            <header class="header">
                <h1 class="text-2xl font-bold">"AI Studio"</h1>
            </header>

            <section class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard title="生成した画像" value=generated icon="🎨" color=StatColor::Purple trend=Trend::new(12.5) />
                <StatCard title="読み込み済み" value=loaded_images icon="🖼️" color=StatColor::Green />
                <StatCard title="読み込み失敗" value=failed_images icon="⚠️" color=StatColor::Red trend=Trend::new(-3.0) />
            </section>

            <section class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <StatusCard
                    kind=StatusKind::Success
                    title="APIに接続しました"
                    message="すべてのプロバイダが応答しています"
                />
                <StatusCard
                    kind=StatusKind::Error
                    title="生成に失敗しました"
                    message="最後のタスクを失敗させるモードを切り替えます"
                    action=StatusAction::new("失敗モード切替", move || set_fail_last.update(|f| *f = !*f))
                />
                <StatusCard kind=StatusKind::Loading title="待機中" message="キューの空きを待っています" />
                <StatusCard kind=StatusKind::parse("unknown") title="お知らせ" message="未知の種類はinfoとして表示されます" />
            </section>

            <section class="space-y-3">
                <ParallelProgressIndicator tasks=tasks total_time=elapsed />
                <div class="flex gap-2">
                    <button class="btn btn-primary" on:click=step>"次のステップ"</button>
                    <button class="btn btn-secondary" on:click=reset>"リセット"</button>
                </div>
            </section>

            <section class="space-y-2">
                <ProgressBar progress=manual_progress label="手動プログレス" size=ProgressSize::Large />
                <input
                    type="range"
                    min="-20"
                    max="120"
                    prop:value=move || manual_progress.get().to_string()
                    on:input=move |ev| {
                        let value: f64 = event_target_value(&ev).parse().unwrap_or(0.0);
                        set_manual_progress.set(value);
                    }
                />
            </section>

            <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {DEMO_IMAGES
                    .iter()
                    .enumerate()
                    .map(|(i, url)| view! {
                        <LazyImage
                            src=*url
                            alt=format!("サンプル画像 {}", i + 1)
                            class="h-40 rounded-lg"
                            on_load=on_image_load
                            on_error=on_image_error
                        />
                    })
                    .collect_view()}
            </section>
        </div>
    }
}
