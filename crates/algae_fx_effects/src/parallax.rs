//! # Scroll-Linked Parallax
//!
//! A background layer whose vertical offset and opacity follow the
//! section's progress through the viewport:
//!
//! ```text
//! progress 0: section top touches the viewport bottom
//! progress 1: section bottom touches the viewport top
//! ```
//!
//! The mapping is a pure function of the scroll sample. Updates after
//! `unsubscribe` are ignored.

use algae_fx_core::animation::lerp;
use algae_fx_core::{FxResult, ParallaxConfig, Rect};

use crate::render::DrawCommand;
use crate::scroll::ScrollSample;

/// Progress (0-1) of `section` (document px) through the viewport.
#[must_use]
pub fn scroll_progress(section: Rect, sample: ScrollSample) -> f32 {
    let start = section.y - sample.viewport_height;
    let end = section.bottom();
    let span = end - start;
    if span <= 0.0 {
        return if sample.scroll_y >= end { 1.0 } else { 0.0 };
    }
    ((sample.scroll_y - start) / span).clamp(0.0, 1.0)
}

/// Output of the mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxFrame {
    /// Vertical translation (px).
    pub offset_y: f32,
    /// Layer opacity.
    pub opacity: f32,
}

/// A scroll-driven background layer.
#[derive(Debug, Clone)]
pub struct ParallaxLayer {
    name: String,
    config: ParallaxConfig,
    section: Option<Rect>,
    progress: f32,
    frame: ParallaxFrame,
    subscribed: bool,
}

impl ParallaxLayer {
    /// Creates an unsubscribed layer at progress 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(name: impl Into<String>, config: ParallaxConfig) -> FxResult<Self> {
        config.validate()?;
        let frame = map(&config, 0.0);
        Ok(Self {
            name: name.into(),
            config,
            section: None,
            progress: 0.0,
            frame,
            subscribed: false,
        })
    }

    /// Starts listening to scroll samples for `section` (document px).
    pub fn subscribe(&mut self, section: Rect) {
        self.section = Some(section);
        self.subscribed = true;
    }

    /// Stops listening; later samples are ignored.
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.section = None;
    }

    /// True while listening.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Progress from the last accepted sample.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Offset and opacity from the last accepted sample.
    #[must_use]
    pub fn frame(&self) -> ParallaxFrame {
        self.frame
    }

    /// Maps a progress value without touching the layer.
    #[must_use]
    pub fn map(&self, progress: f32) -> ParallaxFrame {
        map(&self.config, progress)
    }

    /// Recomputes from a scroll sample.
    pub fn on_scroll(&mut self, sample: ScrollSample) {
        let Some(section) = self.section.filter(|_| self.subscribed) else {
            return;
        };
        self.progress = scroll_progress(section, sample);
        self.frame = map(&self.config, self.progress);
    }

    /// Emits the layer transform.
    pub fn render(&self, commands: &mut Vec<DrawCommand>) {
        commands.push(DrawCommand::Layer {
            name: self.name.clone(),
            offset_y: self.frame.offset_y,
            opacity: self.frame.opacity,
        });
    }
}

fn map(config: &ParallaxConfig, progress: f32) -> ParallaxFrame {
    let t = config.easing.ease(progress.clamp(0.0, 1.0));
    ParallaxFrame {
        offset_y: lerp(config.from_offset_px, config.to_offset_px, t),
        opacity: lerp(config.from_opacity, config.to_opacity, t),
    }
}
