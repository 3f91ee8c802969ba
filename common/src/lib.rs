//! AI Studio Common Library
//!
//! CLIとWeb(WASM)コンポーネントで共有される表示状態ロジック。
//! ブラウザに依存しない計算（クランプ、イージング、集計、テーマ表）はすべてここに置く。

pub mod counter;
pub mod error;
pub mod lazy_image;
pub mod progress;
pub mod tasks;
pub mod theme;

pub use counter::{ease_out_quart, format_grouped, CounterAnimation, CounterFrame};
pub use error::{Error, Result};
pub use lazy_image::{LazyView, LoadState};
pub use progress::{clamp_progress, percent_label};
pub use tasks::{format_elapsed, load_tasks, parse_tasks, TaskProgress, TaskStatus, TaskSummary};
pub use theme::{StatColor, StatTheme, StatusKind, StatusTheme, TaskTheme, Trend};
