//! Headless preview sessions.
//!
//! Mounts a section, steers a scripted pointer along a Lissajous path,
//! scrolls the page up and down through it, advances in fixed frames and
//! summarizes each simulated second.

use std::time::{SystemTime, UNIX_EPOCH};

use algae_fx_core::{EffectsConfig, Rect, Vec2};
use algae_fx_effects::{DrawCommand, FrameBuffer, PointerEvent, ScrollSample, ScrollTracker, Section};
use tracing::debug;

/// Session parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewOptions {
    /// Simulated seconds.
    pub seconds: u32,
    /// Frame length (ms).
    pub frame_ms: u64,
    /// Section width (px).
    pub width: f32,
    /// Section height (px).
    pub height: f32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            seconds: 10,
            frame_ms: 16,
            width: 1_280.0,
            height: 720.0,
        }
    }
}

/// What the last frame of one simulated second looked like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecondSummary {
    /// 1-based second.
    pub second: u32,
    /// Frames advanced during the second.
    pub frames: u32,
    /// Commands in the last frame.
    pub commands: usize,
    /// Particle dots.
    pub dots: usize,
    /// Bubbles.
    pub bubbles: usize,
    /// Cell sprites.
    pub cells: usize,
    /// Tooltips (0 or 1).
    pub tooltips: usize,
    /// Timers pending across the section.
    pub pending_timers: usize,
    /// Header "scrolled" state at the end of the second.
    pub scrolled: bool,
}

/// A finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewReport {
    /// One entry per simulated second.
    pub seconds: Vec<SecondSummary>,
    /// Timers left after unmount.
    pub timers_after_unmount: usize,
    /// Entities left after unmount.
    pub elements_after_unmount: usize,
    /// Times the header "scrolled" state flipped.
    pub scroll_flips: usize,
}

/// Seed from the config, or from the wall clock when none is set.
#[must_use]
pub fn resolve_seed(config: &EffectsConfig) -> u64 {
    config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64)
    })
}

/// Pointer position at `t_ms` on the scripted path.
#[must_use]
pub fn pointer_at(t_ms: u64, bounds: Rect) -> Vec2 {
    let t = t_ms as f32;
    Vec2::new(
        bounds.width * (0.5 + 0.4 * (t * 0.000_7).sin()),
        bounds.height * (0.5 + 0.35 * (t * 0.001_1).sin()),
    )
}

/// Page scroll offset at `t_ms`: eases from the top down one section
/// height and back every 8 seconds.
#[must_use]
pub fn scroll_at(t_ms: u64, bounds: Rect) -> f32 {
    let phase = (t_ms % 8_000) as f32 / 8_000.0 * std::f32::consts::TAU;
    bounds.height * 0.5 * (1.0 - phase.cos())
}

/// Runs a full session: mount, drive, unmount.
///
/// The page scroll goes through `tracker`, whose samples the section sees.
pub fn run(section: &mut Section, tracker: &mut ScrollTracker, options: PreviewOptions) -> PreviewReport {
    let bounds = Rect::sized(options.width, options.height);
    let frame_ms = options.frame_ms.max(1);
    section.mount(bounds);
    section.pointer(PointerEvent::Enter(pointer_at(0, bounds)));

    let mut frame = FrameBuffer::new();
    let mut report = PreviewReport::default();
    let mut now_ms = 0u64;

    for second in 1..=options.seconds {
        let end_ms = u64::from(second) * 1_000;
        let mut frames = 0;
        while now_ms < end_ms {
            let dt = frame_ms.min(end_ms - now_ms);
            section.pointer(PointerEvent::Move(pointer_at(now_ms, bounds)));
            if tracker.update(ScrollSample::new(scroll_at(now_ms, bounds), bounds.height)) {
                report.scroll_flips += 1;
            }
            section.scroll(tracker.sample());
            section.advance(dt);
            now_ms += dt;
            frames += 1;
        }

        frame.begin_frame();
        section.render(&mut frame);
        report.seconds.push(SecondSummary {
            second,
            frames,
            commands: frame.len(),
            dots: frame.count(|c| matches!(c, DrawCommand::Dot { .. })),
            bubbles: frame.count(|c| matches!(c, DrawCommand::Bubble { .. })),
            cells: frame.count(|c| matches!(c, DrawCommand::Cell { .. })),
            tooltips: frame.count(|c| matches!(c, DrawCommand::RectOutline { .. })),
            pending_timers: section.pending_timers(),
            scrolled: tracker.is_scrolled(),
        });
    }

    section.pointer(PointerEvent::Leave);
    section.unmount();
    report.timers_after_unmount = section.pending_timers();
    report.elements_after_unmount = section.live_elements();
    debug!(seconds = options.seconds, "preview finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use algae_fx_effects::section;

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = EffectsConfig::from_toml_str(include_str!("../../../data/effects.toml")).unwrap();
        let defaults = EffectsConfig {
            seed: Some(42),
            ..EffectsConfig::default()
        };
        assert_eq!(shipped, defaults);
    }

    #[test]
    fn test_pointer_path_stays_inside() {
        let bounds = Rect::sized(1_280.0, 720.0);
        for t in (0..60_000).step_by(16) {
            assert!(bounds.contains(pointer_at(t, bounds)));
        }
    }

    #[test]
    fn test_session_reports_every_second_and_cleans_up() {
        let config = EffectsConfig {
            seed: Some(7),
            ..EffectsConfig::default()
        };
        let mut hero = section::hero(&config, resolve_seed(&config)).unwrap();
        let mut tracker = ScrollTracker::new(config.scroll.clone());

        let report = run(
            &mut hero,
            &mut tracker,
            PreviewOptions {
                seconds: 5,
                ..PreviewOptions::default()
            },
        );

        assert_eq!(report.seconds.len(), 5);
        assert!(report.seconds.iter().all(|s| s.dots == 30 && s.cells == 6));
        assert!(report.seconds.iter().all(|s| s.tooltips <= 1));
        assert!(report.seconds.iter().all(|s| s.bubbles <= 2));
        assert_eq!(report.timers_after_unmount, 0);
        assert_eq!(report.elements_after_unmount, 0);

        // Down then back up within the first 8 seconds.
        assert!(report.seconds[1].scrolled);
        assert!(report.scroll_flips >= 1);
    }

    #[test]
    fn test_scroll_path_returns_to_top() {
        let bounds = Rect::sized(1_280.0, 720.0);
        assert!(scroll_at(0, bounds).abs() < 1e-3);
        assert!((scroll_at(4_000, bounds) - 720.0).abs() < 1e-2);
        assert!(scroll_at(8_000, bounds).abs() < 1e-3);
    }
}
