//! Draw commands derived from simulator state.
//!
//! Simulators never touch the host's scene. Each frame the host asks a
//! section for its commands and paints them in order.

use algae_fx_core::{Color, Gradient, Rect, Vec2};

use crate::swarm::CellShape;

/// A single paint instruction in container-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid dot (particle).
    Dot {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Fill color, opacity folded into alpha.
        color: Color,
    },
    /// Gradient-filled circle (bubble).
    Bubble {
        /// Center.
        center: Vec2,
        /// Radius after scaling.
        radius: f32,
        /// Fill, opacity folded into both stops.
        gradient: Gradient,
    },
    /// A floating cell sprite.
    Cell {
        /// Unrotated bounds.
        bounds: Rect,
        /// Rotation about the center (degrees).
        rotation_deg: f32,
        /// Outline shape.
        shape: CellShape,
        /// Body fill.
        gradient: Gradient,
        /// True while the pointer is over the cell.
        hovered: bool,
    },
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Text run.
    Text {
        /// Text content.
        text: String,
        /// Top-left position.
        position: Vec2,
        /// Text color.
        color: Color,
        /// Font size.
        font_size: f32,
        /// Bold weight.
        bold: bool,
    },
    /// Transform applied to a whole background layer.
    Layer {
        /// Layer name, as configured by the section.
        name: String,
        /// Vertical translation (px).
        offset_y: f32,
        /// Layer opacity.
        opacity: f32,
    },
}

/// Per-frame command buffer with simple counters.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    /// Commands in paint order.
    pub commands: Vec<DrawCommand>,
}

impl FrameBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the buffer for a new frame, keeping the allocation.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Number of commands recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Counts commands matching a predicate.
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}
