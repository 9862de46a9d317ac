//! Easing curves and one-shot transitions.
//!
//! Transitions are rendered as SVG `<animate>` elements, so each curve
//! is sampled into discrete keyframes that the browser interpolates
//! linearly.

/// Easing curve applied to a transition's normalized time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Cubic acceleration then deceleration.
    CubicInOut,
    /// Pulls back before starting and overshoots before settling.
    BackInOut {
        /// How far the curve pulls back/overshoots.
        overshoot: f64,
    },
}

impl Easing {
    /// Evaluates the curve at `t`, clamped to `[0, 1]`.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::CubicInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t * t / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * t + 2.0) / 2.0
                }
            }
            Self::BackInOut { overshoot: s } => {
                let t = t * 2.0;
                if t < 1.0 {
                    t * t * ((s + 1.0) * t - s) / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * ((s + 1.0) * t + s) + 2.0) / 2.0
                }
            }
        }
    }
}

/// A one-shot, non-interactive transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Time before the transition starts.
    pub delay_ms: u64,
    /// Time the transition takes once started.
    pub duration_ms: u64,
    /// Progress curve.
    pub easing: Easing,
}

impl Transition {
    /// Samples the eased progress at `intervals + 1` evenly spaced times.
    ///
    /// Returns `(time, progress)` pairs with `time` in `[0, 1]`. The first
    /// pair is always `(0, 0)` and the last `(1, 1)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn keyframes(&self, intervals: usize) -> Vec<(f64, f64)> {
        let intervals = intervals.max(1);
        (0..=intervals)
            .map(|i| {
                let t = i as f64 / intervals as f64;
                (t, self.easing.apply(t))
            })
            .collect()
    }

    /// Interpolates between `from` and `to` along the sampled curve.
    ///
    /// Returns `(time, value)` pairs ready to emit as keyframes.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn interpolate(&self, from: f64, to: f64, intervals: usize) -> Vec<(f64, f64)> {
        self.keyframes(intervals)
            .into_iter()
            .map(|(t, p)| (t, from + (to - from) * p))
            .collect()
    }
}
