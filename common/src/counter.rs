//! カウンターアニメーション計算
//!
//! 0 から目標値までを quartic ease-out で補間する。
//! 描画フレームごとに `CounterAnimation::sample` を呼び、返された値を表示する。

/// デフォルトのアニメーション時間（ミリ秒）
pub const DEFAULT_DURATION_MS: f64 = 2000.0;

/// quartic ease-out: `1 - (1 - t)^4`
///
/// `t` は [0, 1] に丸め込まれる。
pub fn ease_out_quart(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    1.0 - (1.0 - t).powi(4)
}

/// 1フレーム分のサンプル結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub finished: bool,
}

/// 1回分のカウントアップ状態
///
/// 開始時刻は最初の `sample` 呼び出し時のタイムスタンプ。
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
        }
    }

    /// 経過時間の割合（0〜1）
    pub fn progress(&self, now_ms: f64) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        if !(self.duration_ms > 0.0) {
            return 1.0;
        }
        ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// `now_ms` 時点の表示値を計算する
    pub fn sample(&mut self, now_ms: f64) -> CounterFrame {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
        }

        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return CounterFrame {
                value: self.target,
                finished: true,
            };
        }

        let value = (ease_out_quart(progress) * self.target as f64).floor() as i64;
        CounterFrame {
            value,
            finished: false,
        }
    }
}

/// 3桁区切りで整形（例: 12345 -> "12,345"）
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(-1.0), 0.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_first_frame_starts_at_zero() {
        let mut anim = CounterAnimation::new(500, 1000.0);
        let frame = anim.sample(12_345.0);
        assert_eq!(frame, CounterFrame { value: 0, finished: false });
    }

    #[test]
    fn test_sequence_is_non_decreasing_and_ends_at_target() {
        for &target in &[0_i64, 1, 7, 99, 1234, 1_000_000] {
            let mut anim = CounterAnimation::new(target, 2000.0);
            let mut last = i64::MIN;
            let mut now = 100.0;
            let mut frame = anim.sample(now);
            while !frame.finished {
                assert!(frame.value >= last, "target {} went backwards", target);
                assert!(frame.value <= target);
                last = frame.value;
                now += 16.7;
                frame = anim.sample(now);
            }
            assert_eq!(frame.value, target);
            assert!(now - 100.0 >= 2000.0);
        }
    }

    #[test]
    fn test_decelerates_near_completion() {
        let mut anim = CounterAnimation::new(1000, 1000.0);
        anim.sample(0.0);
        let early = anim.sample(100.0).value - anim.sample(0.0).value;
        let late = anim.sample(1000.0 - 1.0).value - anim.sample(900.0).value;
        assert!(early > late);
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let mut anim = CounterAnimation::new(42, 0.0);
        assert_eq!(anim.sample(5.0), CounterFrame { value: 42, finished: true });
    }

    #[test]
    fn test_negative_target_stays_within_bounds() {
        let mut anim = CounterAnimation::new(-100, 1000.0);
        anim.sample(0.0);
        let mid = anim.sample(500.0).value;
        assert!((-100..=0).contains(&mid));
        assert_eq!(anim.sample(1000.0).value, -100);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1,000");
        assert_eq!(format_grouped(1234567), "1,234,567");
        assert_eq!(format_grouped(-45678), "-45,678");
    }
}
