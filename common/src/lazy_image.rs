//! 遅延読み込み画像の状態遷移
//!
//! `Unseen → Loading → {Loaded | Errored}` の一方向のみ。
//! 順序外のイベント（表示前のload、2回目の交差、読み込み後のerror）は無視する。

/// 交差判定の閾値（要素面積の10%）
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// ビューポート外側の先読みマージン
pub const ROOT_MARGIN: &str = "50px";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// まだビューポートに入っていない
    #[default]
    Unseen,
    /// 表示範囲に入り、読み込み中
    Loading,
    Loaded,
    Errored,
}

/// 描画内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LazyView {
    /// `<img>` に実際の src を付けるか
    pub attach_source: bool,
    pub show_placeholder: bool,
    /// `<img>` 要素を置くか（読み込み中は透明）
    pub show_image: bool,
    /// 不透明にするか（フェードイン）
    pub image_visible: bool,
    pub show_fallback: bool,
}

impl LoadState {
    /// 交差通知。Unseenの時だけLoadingへ
    pub fn intersect(&mut self) -> bool {
        self.advance(LoadState::Unseen, LoadState::Loading)
    }

    /// 読み込み完了通知
    pub fn load(&mut self) -> bool {
        self.advance(LoadState::Loading, LoadState::Loaded)
    }

    /// 読み込み失敗通知
    pub fn fail(&mut self) -> bool {
        self.advance(LoadState::Loading, LoadState::Errored)
    }

    fn advance(&mut self, from: LoadState, to: LoadState) -> bool {
        if *self == from {
            *self = to;
            true
        } else {
            false
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Errored)
    }

    pub fn view(&self) -> LazyView {
        match self {
            LoadState::Unseen => LazyView {
                attach_source: false,
                show_placeholder: true,
                show_image: false,
                image_visible: false,
                show_fallback: false,
            },
            LoadState::Loading => LazyView {
                attach_source: true,
                show_placeholder: true,
                show_image: true,
                image_visible: false,
                show_fallback: false,
            },
            LoadState::Loaded => LazyView {
                attach_source: true,
                show_placeholder: false,
                show_image: true,
                image_visible: true,
                show_fallback: false,
            },
            LoadState::Errored => LazyView {
                attach_source: false,
                show_placeholder: false,
                show_image: false,
                image_visible: false,
                show_fallback: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offscreen_shows_placeholder_without_source() {
        let view = LoadState::Unseen.view();
        assert!(view.show_placeholder);
        assert!(!view.attach_source);
        assert!(!view.show_fallback);
    }

    #[test]
    fn test_successful_load_path() {
        let mut state = LoadState::default();
        assert!(state.intersect());
        assert_eq!(state, LoadState::Loading);
        assert!(state.view().attach_source);
        assert!(!state.view().image_visible);

        assert!(state.load());
        assert_eq!(state, LoadState::Loaded);
        let view = state.view();
        assert!(view.image_visible);
        assert!(!view.show_placeholder);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_failed_load_path() {
        let mut state = LoadState::default();
        state.intersect();
        assert!(state.fail());
        let view = state.view();
        assert!(view.show_fallback);
        assert!(!view.show_placeholder);
        assert!(!view.show_image);
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut state = LoadState::default();
        assert!(!state.load());
        assert!(!state.fail());
        assert_eq!(state, LoadState::Unseen);

        state.intersect();
        assert!(!state.intersect());

        state.load();
        assert!(!state.fail());
        assert!(!state.intersect());
        assert_eq!(state, LoadState::Loaded);
    }

    #[test]
    fn test_placeholder_and_fallback_never_together() {
        for state in [
            LoadState::Unseen,
            LoadState::Loading,
            LoadState::Loaded,
            LoadState::Errored,
        ] {
            let view = state.view();
            assert!(!(view.show_placeholder && view.show_fallback), "{:?}", state);
        }
    }
}
