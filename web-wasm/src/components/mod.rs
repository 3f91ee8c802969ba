//! 表示コンポーネント

pub mod animated_counter;
pub mod lazy_image;
pub mod parallel_progress;
pub mod progress_bar;
pub mod stat_card;
pub mod status_card;

pub use animated_counter::AnimatedCounter;
pub use lazy_image::LazyImage;
pub use parallel_progress::ParallelProgressIndicator;
pub use progress_bar::{ProgressBar, ProgressSize};
pub use stat_card::StatCard;
pub use status_card::{StatusAction, StatusCard};
