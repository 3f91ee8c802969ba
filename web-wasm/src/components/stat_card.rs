//! 統計カードコンポーネント

use ai_studio_common::{StatColor, Trend};
use leptos::prelude::*;

use super::animated_counter::AnimatedCounter;

#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<i64>,
    #[prop(into)] icon: String,
    #[prop(optional)] color: StatColor,
    #[prop(optional)] trend: Option<Trend>,
    #[prop(optional, into)] suffix: String,
) -> impl IntoView {
    let theme = color.theme();

    view! {
        <div class=format!("stat-card bg-white rounded-xl shadow-sm border-l-4 p-6 {}", theme.accent)>
            <div class="flex items-center justify-between">
                <div>
                    <p class="stat-label text-sm font-medium text-gray-600">{title}</p>
                    <p class="stat-value text-3xl font-bold text-gray-900 mt-2">
                        <AnimatedCounter value=value suffix=suffix />
                    </p>
                    {trend.map(|trend| view! {
                        <p class=format!("stat-trend text-sm mt-2 {}", trend.class())>
                            <span>{trend.arrow()}</span>
                            " "
                            <span>{trend.label()}</span>
                            <span class="text-gray-500 ml-1">"前期比"</span>
                        </p>
                    })}
                </div>
                <div class=format!("stat-icon rounded-full p-3 text-2xl {} {}", theme.icon_bg, theme.icon_text)>
                    {icon}
                </div>
            </div>
        </div>
    }
}
