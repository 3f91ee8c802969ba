//! 遅延読み込み画像コンポーネント
//!
//! 要素がビューポートに入るまで `src` を付けない。
//! 交差検出は1回きりで、検出後はすぐに監視を外す。

use ai_studio_common::lazy_image::{ROOT_MARGIN, VISIBILITY_THRESHOLD};
use ai_studio_common::LoadState;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// IntersectionObserverとそのコールバックの組
///
/// dropで監視を外す。コールバックのClosureはobserverより長く生かす必要がある。
struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    fn observe<F>(target: &Element, on_visible: F) -> Result<Self, JsValue>
    where
        F: Fn() + 'static,
    {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let visible = entries
                    .iter()
                    .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                    .any(|entry| entry.is_intersecting());
                if visible {
                    observer.disconnect();
                    on_visible();
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        options.set_root_margin(ROOT_MARGIN);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(target);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[component]
pub fn LazyImage(
    #[prop(into)] src: String,
    #[prop(into)] alt: String,
    #[prop(optional, into)] class: String,
    /// 読み込み前に表示する内容
    #[prop(optional, into)]
    placeholder: Option<ViewFn>,
    /// 読み込み失敗時に表示する内容
    #[prop(optional, into)]
    fallback: Option<ViewFn>,
    #[prop(optional)] on_load: Option<Callback<()>>,
    #[prop(optional)] on_error: Option<Callback<()>>,
) -> impl IntoView {
    let container = NodeRef::<html::Div>::new();
    let (state, set_state) = signal(LoadState::Unseen);
    let observer = StoredValue::new_local(None::<VisibilityObserver>);
    let src = StoredValue::new(src);
    let alt = StoredValue::new(alt);

    Effect::new(move |_| {
        let Some(element) = container.get() else {
            return;
        };
        if observer.with_value(|o| o.is_some()) || state.get_untracked() != LoadState::Unseen {
            return;
        }

        let mark_visible = move || set_state.update(|s| {
            s.intersect();
        });
        match VisibilityObserver::observe(&element, mark_visible) {
            Ok(visibility) => observer.set_value(Some(visibility)),
            Err(err) => {
                // IntersectionObserver非対応: 即座に表示扱い
                gloo::console::warn!(format!("IntersectionObserver unavailable: {:?}", err));
                mark_visible();
            }
        }
    });

    on_cleanup(move || {
        observer.try_update_value(|o| {
            o.take();
        });
    });

    let handle_load = move |_| {
        let mut changed = false;
        set_state.update(|s| changed = s.load());
        if changed {
            if let Some(cb) = on_load {
                cb.run(());
            }
        }
    };

    let handle_error = move |_| {
        let mut changed = false;
        set_state.update(|s| changed = s.fail());
        if changed {
            gloo::console::warn!(format!("画像の読み込みに失敗: {}", src.get_value()));
            if let Some(cb) = on_error {
                cb.run(());
            }
        }
    };

    let view_state = move || state.get().view();

    view! {
        <div node_ref=container class=format!("lazy-image relative overflow-hidden {}", class)>
            {move || view_state().show_placeholder.then(|| match &placeholder {
                Some(custom) => custom.run(),
                None => view! { <DefaultPlaceholder /> }.into_any(),
            })}

            <Show when=move || view_state().show_image>
                <img
                    src=move || view_state().attach_source.then(|| src.get_value())
                    alt=move || alt.get_value()
                    class=move || {
                        if view_state().image_visible {
                            "w-full h-full object-cover transition-opacity duration-300 opacity-100"
                        } else {
                            "w-full h-full object-cover transition-opacity duration-300 opacity-0"
                        }
                    }
                    on:load=handle_load
                    on:error=handle_error
                />
            </Show>

            {move || view_state().show_fallback.then(|| match &fallback {
                Some(custom) => custom.run(),
                None => view! { <DefaultFallback /> }.into_any(),
            })}
        </div>
    }
}

#[component]
fn DefaultPlaceholder() -> impl IntoView {
    view! {
        <div class="lazy-placeholder absolute inset-0 flex items-center justify-center bg-gray-200 animate-pulse">
            <span class="text-3xl text-gray-400">"🖼️"</span>
        </div>
    }
}

#[component]
fn DefaultFallback() -> impl IntoView {
    view! {
        <div class="lazy-fallback absolute inset-0 flex flex-col items-center justify-center bg-gray-100 text-gray-500">
            <span class="text-3xl">"⚠️"</span>
            <p class="text-sm mt-1">"画像を読み込めませんでした"</p>
        </div>
    }
}
