//! プログレスバーの値計算

/// 任意の進捗値を 0〜100 に丸め込む（NaNは0扱い）
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// パーセント表示用ラベル（例: "42%"）
pub fn percent_label(progress: f64) -> String {
    format!("{}%", clamp_progress(progress).round() as u32)
}
