//! requestAnimationFrame ループ
//!
//! `gloo::render::AnimationFrame` はdropでフレーム要求を取り消すので、
//! 次フレームのハンドルを1つだけ保持して自己再スケジュールする。

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};

/// 毎フレームのコールバックループ
#[derive(Clone, Default)]
pub struct FrameLoop {
    pending: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameLoop {
    /// `tick` が true を返す間、毎フレーム呼び出す
    ///
    /// 引数はrequestAnimationFrameのタイムスタンプ（ミリ秒）。
    pub fn start<F>(tick: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let frame_loop = Self::default();
        schedule(frame_loop.pending.clone(), tick);
        frame_loop
    }

    /// 未実行のフレームを取り消す
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

fn schedule<F>(pending: Rc<RefCell<Option<AnimationFrame>>>, mut tick: F)
where
    F: FnMut(f64) -> bool + 'static,
{
    let next = pending.clone();
    let frame = request_animation_frame(move |timestamp| {
        if tick(timestamp) {
            schedule(next, tick);
        } else {
            next.borrow_mut().take();
        }
    });
    *pending.borrow_mut() = Some(frame);
}
