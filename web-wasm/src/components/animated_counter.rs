//! カウントアップ表示コンポーネント

use ai_studio_common::counter::DEFAULT_DURATION_MS;
use ai_studio_common::{format_grouped, CounterAnimation};
use leptos::prelude::*;

use crate::animation::FrameLoop;

/// 0 から `value` までを ease-out で数え上げる
///
/// `value` か `duration` が変わるたびに0からやり直す。
/// 進行中のフレームは再開時とアンマウント時に取り消す。
#[component]
pub fn AnimatedCounter(
    #[prop(into)] value: Signal<i64>,
    /// ミリ秒
    #[prop(into, default = DEFAULT_DURATION_MS.into())]
    duration: Signal<f64>,
    #[prop(optional, into)] prefix: String,
    #[prop(optional, into)] suffix: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let (display, set_display) = signal(0_i64);
    let running = StoredValue::new_local(None::<FrameLoop>);

    Effect::new(move |_| {
        let target = value.get();
        let duration_ms = duration.get();

        running.update_value(|current| {
            if let Some(previous) = current.take() {
                previous.cancel();
            }
        });
        set_display.set(0);

        let mut animation = CounterAnimation::new(target, duration_ms);
        let frame_loop = FrameLoop::start(move |timestamp| {
            let frame = animation.sample(timestamp);
            set_display.set(frame.value);
            !frame.finished
        });
        running.set_value(Some(frame_loop));
    });

    on_cleanup(move || {
        running.try_update_value(|current| {
            if let Some(frame_loop) = current.take() {
                frame_loop.cancel();
            }
        });
    });

    view! {
        <span class=format!("animated-counter tabular-nums {}", class)>
            {prefix}
            {move || format_grouped(display.get())}
            {suffix}
        </span>
    }
}
