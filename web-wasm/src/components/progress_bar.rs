//! プログレスバーコンポーネント

use ai_studio_common::{clamp_progress, percent_label};
use leptos::prelude::*;

/// バーの太さ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ProgressSize {
    pub fn height_class(&self) -> &'static str {
        match self {
            ProgressSize::Small => "h-1",
            ProgressSize::Medium => "h-2",
            ProgressSize::Large => "h-4",
        }
    }
}

/// 0〜100に丸めた値を塗りつぶし幅として描画する
#[component]
pub fn ProgressBar(
    #[prop(into)] progress: Signal<f64>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(default = true)] show_percentage: bool,
    #[prop(optional)] size: ProgressSize,
    #[prop(default = "bg-blue-600")] color: &'static str,
) -> impl IntoView {
    let width = move || clamp_progress(progress.get());
    let has_header = label.is_some() || show_percentage;

    view! {
        <div class="progress-container w-full">
            {has_header.then(|| view! {
                <div class="flex justify-between mb-1 text-sm text-gray-700">
                    <span class="progress-label">{label.clone().unwrap_or_default()}</span>
                    {show_percentage.then(|| view! {
                        <span class="progress-text">{move || percent_label(progress.get())}</span>
                    })}
                </div>
            })}
            <div class=format!("progress-bar w-full bg-gray-200 rounded-full {}", size.height_class())>
                <div
                    class=format!("progress-fill rounded-full transition-all duration-300 {} {}", color, size.height_class())
                    style=move || format!("width: {}%", width())
                />
            </div>
        </div>
    }
}
