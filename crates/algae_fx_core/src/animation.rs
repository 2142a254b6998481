//! Easing curves, keyframe tracks and the glide used for pointer
//! avoidance.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Progress curve, mapping [0, 1] onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Straight line.
    #[default]
    Linear,
    /// `1 - 2^(-10t)`: fast start, long tail. Counters and avoidance.
    ExpoOut,
    /// Slow at both ends. Orbit segments.
    CubicInOut,
    /// Half a cosine wave.
    SineInOut,
    /// Holds 0 until the very end, then jumps to 1.
    Step,
}

impl Easing {
    /// Eases `t`, clamped to [0, 1] first.
    ///
    /// Non-decreasing on [0, 1] with `ease(0) == 0` and `ease(1) == 1` for
    /// every variant.
    #[must_use]
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::ExpoOut if t >= 1.0 => 1.0,
            Self::ExpoOut => 1.0 - (-10.0 * t).exp2(),
            Self::CubicInOut if t < 0.5 => 4.0 * t.powi(3),
            Self::CubicInOut => 1.0 - (2.0 - 2.0 * t).powi(3) * 0.5,
            Self::SineInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
            Self::Step => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    /// False for curves with a jump.
    #[must_use]
    pub const fn is_continuous(self) -> bool {
        !matches!(self, Self::Step)
    }
}

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Samples a looping keyframe track.
///
/// The track is split into `frames.len() - 1` equal segments and `easing`
/// is applied within each segment. `progress` is wrapped into [0, 1).
#[must_use]
pub fn sample_keyframes(frames: &[f32], progress: f32, easing: Easing) -> f32 {
    match frames {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (frames.len() - 1) as f32;
            let scaled = progress.rem_euclid(1.0) * segments;
            let index = (scaled.floor() as usize).min(frames.len() - 2);
            let local = easing.ease(scaled - index as f32);
            lerp(frames[index], frames[index + 1], local)
        }
    }
}

/// A point easing toward a destination over a fixed time.
///
/// Retargeting mid-flight starts a new leg from wherever the point is,
/// so the path never jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    from: Vec2,
    to: Vec2,
    elapsed_s: f32,
    duration_s: f32,
    easing: Easing,
}

impl Glide {
    /// Settled at `at`.
    #[must_use]
    pub fn resting(at: Vec2, duration_s: f32, easing: Easing) -> Self {
        Self {
            from: at,
            to: at,
            elapsed_s: duration_s,
            duration_s,
            easing,
        }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        if self.is_settled() {
            return self.to;
        }
        let t = self.easing.ease(self.elapsed_s / self.duration_s);
        Vec2::new(lerp(self.from.x, self.to.x, t), lerp(self.from.y, self.to.y, t))
    }

    /// Where the current leg ends.
    #[must_use]
    pub fn destination(&self) -> Vec2 {
        self.to
    }

    /// True once the current leg is over.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.duration_s <= 0.0 || self.elapsed_s >= self.duration_s
    }

    /// Heads for `to`. A destination within 1e-4 px of the current one is
    /// ignored so per-frame retargeting does not restart the leg.
    pub fn retarget(&mut self, to: Vec2) {
        if self.to.distance(to) <= 1e-4 {
            return;
        }
        self.from = self.position();
        self.to = to;
        self.elapsed_s = 0.0;
    }

    /// Advances by `dt_s` seconds.
    pub fn tick(&mut self, dt_s: f32) {
        self.elapsed_s = (self.elapsed_s + dt_s).min(self.duration_s.max(0.0));
    }
}
