//! ステータスカードコンポーネント

use ai_studio_common::StatusKind;
use leptos::prelude::*;

/// カード下部のボタン（クリック処理は呼び出し側に委ねる）
#[derive(Clone)]
pub struct StatusAction {
    pub label: String,
    pub on_click: Callback<()>,
}

impl StatusAction {
    pub fn new(label: impl Into<String>, on_click: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Callback::new(move |_| on_click()),
        }
    }
}

#[component]
pub fn StatusCard(
    kind: StatusKind,
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional)] action: Option<StatusAction>,
) -> impl IntoView {
    let theme = kind.theme();
    let icon_class = if theme.spin { "status-icon text-2xl animate-spin" } else { "status-icon text-2xl" };

    view! {
        <div
            class=format!("status-card rounded-lg border p-4 {} {}", theme.background, theme.border)
            data-status=kind.as_str()
        >
            <div class="flex items-start gap-3">
                <span class=icon_class>{theme.icon}</span>
                <div class="flex-1">
                    <h3 class=format!("font-semibold {}", theme.text)>{title}</h3>
                    <p class=format!("text-sm mt-1 {}", theme.text)>{message}</p>
                    {action.map(|action| {
                        let on_click = action.on_click;
                        view! {
                            <button
                                class=format!("mt-3 px-4 py-2 text-sm text-white rounded-md {}", theme.button)
                                on:click=move |_| on_click.run(())
                            >
                                {action.label}
                            </button>
                        }
                    })}
                </div>
            </div>
        </div>
    }
}
