//! Page scroll tracking: the "scrolled" header state and in-page
//! navigation targets.
//!
//! The tracker is page-wide, so the host owns one and hands its
//! [`ScrollTracker::sample`] to every [`Section::scroll`](crate::Section::scroll).

use algae_fx_core::{Rect, ScrollConfig};
use tracing::trace;

/// One scroll position report from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollSample {
    /// Document scroll offset (px).
    pub scroll_y: f32,
    /// Viewport height (px).
    pub viewport_height: f32,
}

impl ScrollSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(scroll_y: f32, viewport_height: f32) -> Self {
        Self {
            scroll_y,
            viewport_height,
        }
    }

    /// The visible part of the document, for a column spanning `x..x+width`.
    #[must_use]
    pub fn viewport(&self, x: f32, width: f32) -> Rect {
        Rect::new(x, self.scroll_y, width, self.viewport_height)
    }
}

/// Tracks the latest scroll sample.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    config: ScrollConfig,
    sample: ScrollSample,
    scrolled: bool,
}

impl ScrollTracker {
    /// Creates a tracker at the top of the page.
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            sample: ScrollSample::default(),
            scrolled: false,
        }
    }

    /// Records a sample. Returns true if `is_scrolled` flipped.
    pub fn update(&mut self, sample: ScrollSample) -> bool {
        self.sample = sample;
        let scrolled = sample.scroll_y > self.config.scrolled_threshold_px;
        let flipped = scrolled != self.scrolled;
        if flipped {
            trace!(scroll_y = sample.scroll_y, scrolled, "scroll state changed");
        }
        self.scrolled = scrolled;
        flipped
    }

    /// True once the page is scrolled past the threshold.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Latest sample.
    #[must_use]
    pub fn sample(&self) -> ScrollSample {
        self.sample
    }

    /// Document offset to smooth-scroll to so the section whose top is at
    /// `section_top` (viewport-relative px) lands below the fixed header.
    #[must_use]
    pub fn scroll_target(&self, section_top: f32) -> f32 {
        (section_top + self.sample.scroll_y - self.config.header_offset_px).max(0.0)
    }
}
