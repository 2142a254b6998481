//! # Bubble Emitter
//!
//! Fire-and-forget bubbles. Every `spawn_interval_ms` one bubble appears
//! below the container, waits its delay, rises past the top while growing
//! and fading in then out, and is removed by its own timeout at
//! `delay + duration`. Nothing is pooled; the timeout alone bounds memory.

use algae_fx_core::animation::lerp;
use algae_fx_core::{
    BubbleConfig, Color, FxResult, Gradient, RandomSource, Rect, TickSource, Vec2,
};
use tracing::{debug, trace};

use crate::effect::{Effect, EffectKind, PointerEvent};
use crate::render::DrawCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BubbleTimer {
    Spawn,
    Remove(u64),
}

/// One rising bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Unique within the emitter.
    pub id: u64,
    /// Horizontal position (percent of container width).
    pub x_percent: f32,
    /// Final diameter (px).
    pub size: f32,
    /// Wait before rising (ms).
    pub delay_ms: u64,
    /// Rise duration (ms).
    pub duration_ms: u64,
    /// Virtual time of the spawn (ms).
    pub spawned_at_ms: u64,
}

/// Where a bubble is drawn at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleFrame {
    /// Center (px).
    pub center: Vec2,
    /// Radius after scaling (px).
    pub radius: f32,
    /// Opacity (0-1).
    pub opacity: f32,
}

impl Bubble {
    /// Rise progress (0-1) at `now_ms`, or `None` while still delayed.
    #[must_use]
    pub fn progress(&self, now_ms: u64) -> Option<f32> {
        let start = self.spawned_at_ms + self.delay_ms;
        if now_ms < start {
            return None;
        }
        if self.duration_ms == 0 {
            return Some(1.0);
        }
        Some(((now_ms - start) as f32 / self.duration_ms as f32).min(1.0))
    }

    /// Time at which the removal timeout fires.
    #[must_use]
    pub fn expires_at_ms(&self) -> u64 {
        self.spawned_at_ms + self.delay_ms + self.duration_ms
    }

    /// Computes the bubble's appearance inside `container`.
    ///
    /// Rises from `baseline_offset_px` below the bottom edge to
    /// `exit_height_px` above the top, scaling 0 to 1. Opacity goes
    /// 0, `peak_opacity` at the midpoint, then back to 0.
    #[must_use]
    pub fn frame(&self, now_ms: u64, container: Rect, config: &BubbleConfig) -> Option<BubbleFrame> {
        let t = self.progress(now_ms)?;
        let start_y = container.height + config.baseline_offset_px;
        let end_y = -config.exit_height_px;
        let radius = self.size * 0.5 * t;
        let top = lerp(start_y, end_y, t);
        let x = self.x_percent / 100.0 * container.width;
        let opacity = config.peak_opacity * (1.0 - (2.0 * t - 1.0).abs());
        Some(BubbleFrame {
            center: Vec2::new(x + self.size * 0.5, top + self.size * 0.5),
            radius,
            opacity,
        })
    }
}

/// Counters for an emitter lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BubbleStats {
    /// Bubbles created.
    pub spawned: u64,
    /// Bubbles removed by their timeout.
    pub expired: u64,
    /// Spawn ticks skipped because the container was gone.
    pub skipped: u64,
}

/// The bubble emitter simulator.
pub struct BubbleEmitter {
    config: BubbleConfig,
    rng: Box<dyn RandomSource>,
    ticks: TickSource<BubbleTimer>,
    container: Option<Rect>,
    bubbles: Vec<Bubble>,
    /// Appearance of every risen bubble, refreshed once per frame.
    frames: Vec<BubbleFrame>,
    next_id: u64,
    mounted: bool,
    stats: BubbleStats,
    gradient: Gradient,
}

impl BubbleEmitter {
    /// Creates an unmounted emitter.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: BubbleConfig, rng: Box<dyn RandomSource>) -> FxResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            ticks: TickSource::new(),
            container: None,
            bubbles: Vec::new(),
            frames: Vec::new(),
            next_id: 0,
            mounted: false,
            stats: BubbleStats::default(),
            gradient: Gradient::new(Color::AQUA.with_alpha(0.5), Color::AQUA.with_alpha(0.1)),
        })
    }

    /// Live bubbles, oldest first.
    #[must_use]
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> BubbleStats {
        self.stats
    }

    /// Current virtual time (ms).
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.ticks.now_ms()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    fn spawn(&mut self) {
        if self.container.is_none() {
            self.stats.skipped += 1;
            trace!("bubble spawn skipped: container gone");
            return;
        }

        let rng = self.rng.as_mut();
        let size = self.config.size.at(rng.next_unit());
        let x_percent = rng.range(0.0, 100.0);
        let duration_ms = self.config.rise_duration_ms.at(rng.next_unit()).round() as u64;
        let delay_ms = self.config.delay_ms.at(rng.next_unit()).round() as u64;

        let id = self.next_id;
        self.next_id += 1;
        self.ticks
            .set_timeout(delay_ms + duration_ms, BubbleTimer::Remove(id));

        self.bubbles.push(Bubble {
            id,
            x_percent,
            size,
            delay_ms,
            duration_ms,
            spawned_at_ms: self.ticks.now_ms(),
        });
        self.stats.spawned += 1;
        trace!(id, size, delay_ms, duration_ms, "bubble spawned");
    }

    /// Recomputes where every risen bubble is drawn.
    fn refresh_frames(&mut self) {
        self.frames.clear();
        let Some(container) = self.container else {
            return;
        };
        let now = self.ticks.now_ms();
        self.frames.extend(
            self.bubbles
                .iter()
                .filter_map(|bubble| bubble.frame(now, container, &self.config)),
        );
    }

    fn remove(&mut self, id: u64) {
        let before = self.bubbles.len();
        self.bubbles.retain(|b| b.id != id);
        if self.bubbles.len() != before {
            self.stats.expired += 1;
            trace!(id, "bubble removed");
        }
    }
}

impl Effect for BubbleEmitter {
    fn kind(&self) -> EffectKind {
        EffectKind::BubbleEmitter
    }

    fn mount(&mut self, container: Rect) {
        if self.mounted {
            return;
        }
        self.container = Some(container);
        self.ticks
            .set_interval(self.config.spawn_interval_ms, BubbleTimer::Spawn);
        self.ticks.start_frames();
        self.mounted = true;
        debug!(interval_ms = self.config.spawn_interval_ms, "bubble emitter mounted");
    }

    fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
        if self.ticks.frame_loop_active() {
            self.refresh_frames();
        }
    }

    fn pointer(&mut self, _event: PointerEvent) {}

    fn advance(&mut self, dt_ms: u64) {
        let until = self.ticks.now_ms() + dt_ms;
        while let Some(fired) = self.ticks.next_due(until) {
            match fired.event {
                BubbleTimer::Spawn => self.spawn(),
                BubbleTimer::Remove(id) => self.remove(id),
            }
        }
        self.ticks.settle(until);
        if self.ticks.frame_loop_active() {
            self.refresh_frames();
        }
    }

    fn render(&self, commands: &mut Vec<DrawCommand>) {
        let peak = self.config.peak_opacity.max(f32::EPSILON);
        for frame in &self.frames {
            commands.push(DrawCommand::Bubble {
                center: frame.center,
                radius: frame.radius,
                gradient: self.gradient.fade(frame.opacity / peak),
            });
        }
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.ticks.cancel_all();
        let removed = self.bubbles.len();
        self.bubbles.clear();
        self.frames.clear();
        self.mounted = false;
        debug!(removed, "bubble emitter unmounted");
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn pending_timers(&self) -> usize {
        self.ticks.pending_timers()
    }

    fn frame_loop_active(&self) -> bool {
        self.ticks.frame_loop_active()
    }

    fn live_elements(&self) -> usize {
        self.bubbles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algae_fx_core::SeededRandom;

    const CONTAINER: Rect = Rect::sized(800.0, 600.0);

    fn emitter() -> BubbleEmitter {
        BubbleEmitter::new(BubbleConfig::default(), Box::new(SeededRandom::new(11))).unwrap()
    }

    #[test]
    fn test_spawns_one_per_interval() {
        let mut emitter = emitter();
        emitter.mount(CONTAINER);

        emitter.advance(1_999);
        assert_eq!(emitter.live_elements(), 0);
        emitter.advance(1);
        assert_eq!(emitter.live_elements(), 1);
        emitter.advance(4_000);
        assert_eq!(emitter.live_elements(), 3);
    }

    #[test]
    fn test_ten_bubbles_all_expire() {
        let mut emitter = emitter();
        emitter.mount(CONTAINER);
        emitter.advance(20_000);
        assert_eq!(emitter.stats().spawned, 10);

        // Stop further spawns, then wait past the longest lifetime.
        emitter.set_container(None);
        emitter.advance(emitter.config().max_lifetime_ms() + 1);

        assert_eq!(emitter.live_elements(), 0);
        assert_eq!(emitter.stats().expired, 10);
        assert!(emitter.stats().skipped > 0);
        // Only the spawn interval remains.
        assert_eq!(emitter.pending_timers(), 1);
    }

    #[test]
    fn test_each_bubble_expires_exactly_on_time() {
        let mut emitter = emitter();
        emitter.mount(CONTAINER);
        emitter.advance(2_000);
        let bubble = emitter.bubbles()[0].clone();

        let remaining = bubble.expires_at_ms() - emitter.now_ms();
        emitter.set_container(None);
        emitter.advance(remaining - 1);
        assert_eq!(emitter.live_elements(), 1);
        emitter.advance(1);
        assert_eq!(emitter.live_elements(), 0);
    }

    #[test]
    fn test_opacity_curve_peaks_midway() {
        let config = BubbleConfig::default();
        let bubble = Bubble {
            id: 0,
            x_percent: 50.0,
            size: 40.0,
            delay_ms: 1_000,
            duration_ms: 10_000,
            spawned_at_ms: 0,
        };

        assert!(bubble.frame(999, CONTAINER, &config).is_none());

        let start = bubble.frame(1_000, CONTAINER, &config).unwrap();
        assert!(start.opacity.abs() < 1e-5);
        assert!(start.radius.abs() < 1e-5);

        let mid = bubble.frame(6_000, CONTAINER, &config).unwrap();
        assert!((mid.opacity - 0.6).abs() < 1e-5);

        let end = bubble.frame(11_000, CONTAINER, &config).unwrap();
        assert!(end.opacity.abs() < 1e-5);
        assert!((end.radius - 20.0).abs() < 1e-5);
        assert!(end.center.y < 0.0, "ends above the container");
    }

    #[test]
    fn test_unmount_clears_interval_and_bubbles() {
        let mut emitter = emitter();
        emitter.mount(CONTAINER);
        emitter.advance(9_000);
        assert!(emitter.pending_timers() > 1);

        emitter.unmount();

        assert_eq!(emitter.pending_timers(), 0);
        assert_eq!(emitter.live_elements(), 0);
        assert!(!emitter.frame_loop_active());
    }

    #[test]
    fn test_frame_loop_moves_drawn_bubbles() {
        let mut emitter = emitter();
        emitter.mount(CONTAINER);
        assert!(emitter.frame_loop_active());

        // Long enough for the first bubbles to clear their delay.
        emitter.advance(12_000);
        let mut before = Vec::new();
        emitter.render(&mut before);
        let drawn = before.len();
        assert!(drawn > 0);
        assert!(drawn <= emitter.live_elements());

        emitter.advance(16);
        let mut after = Vec::new();
        emitter.render(&mut after);
        assert_ne!(before, after, "positions refresh every frame");

        emitter.set_container(None);
        let mut gone = Vec::new();
        emitter.render(&mut gone);
        assert!(gone.is_empty());
    }
}
