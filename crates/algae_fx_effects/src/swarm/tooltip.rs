//! Cell info tooltip.
//!
//! Anchored at the bottom-center: horizontally centered on the hovered
//! cell, a small gap above its top edge. Kept inside the container.

use algae_fx_core::{Color, Rect, Vec2};

use super::catalog::{CellInfo, CellKind};
use super::CellId;
use crate::render::DrawCommand;

/// Configuration for tooltip rendering.
#[derive(Debug, Clone, Copy)]
pub struct TooltipStyle {
    /// Background color.
    pub background: Color,
    /// Border color.
    pub border: Color,
    /// Title color.
    pub title: Color,
    /// Body text color.
    pub text: Color,
    /// Padding inside tooltip.
    pub padding: f32,
    /// Border width.
    pub border_width: f32,
    /// Maximum width before wrapping.
    pub max_width: f32,
    /// Body font size.
    pub font_size: f32,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE.with_alpha(0.92),
            border: Color::AQUA.with_alpha(0.6),
            title: Color::DEEP_TEAL,
            text: Color::CHARCOAL,
            padding: 10.0,
            border_width: 1.0,
            max_width: 240.0,
            font_size: 13.0,
        }
    }
}

/// A visible tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// The cell it describes.
    pub cell: CellId,
    /// The cell's species.
    pub kind: CellKind,
    /// Text content.
    pub info: CellInfo,
    /// Bottom-center anchor (px).
    pub anchor: Vec2,
    /// Calculated bounds after layout.
    pub bounds: Rect,
}

/// Text metrics shared by layout and rendering.
#[derive(Debug, Clone, Copy)]
struct TextMetrics {
    char_width: f32,
    line_height: f32,
    per_line: usize,
}

impl TextMetrics {
    /// Estimates text size: ~0.55em per character, 1.4em lines.
    fn of(style: &TooltipStyle) -> Self {
        let char_width = style.font_size * 0.55;
        let inner_width = style.max_width - style.padding * 2.0;
        Self {
            char_width,
            line_height: style.font_size * 1.4,
            per_line: (inner_width / char_width).floor().max(1.0) as usize,
        }
    }
}

/// Word-wraps `text` to at most `per_line` characters per line.
///
/// Words longer than a line are split. Always returns at least one line.
fn wrap(text: &str, per_line: usize) -> Vec<String> {
    let per_line = per_line.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > per_line {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word.char_indices().nth(per_line).map_or(word.len(), |(i, _)| i);
            lines.push(word[..split].to_owned());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }

        let len = current.chars().count();
        if len > 0 && len + 1 + word.chars().count() > per_line {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Title line followed by the wrapped fact and applications.
fn layout_lines(info: &CellInfo, per_line: usize) -> Vec<(String, bool)> {
    let mut lines: Vec<(String, bool)> = wrap(info.name, per_line).into_iter().map(|l| (l, true)).collect();
    for body in [info.fact, info.applications] {
        lines.extend(wrap(body, per_line).into_iter().map(|l| (l, false)));
    }
    lines
}

impl Tooltip {
    /// Lays out a tooltip above `cell_rect`, clamped to `container`.
    #[must_use]
    pub fn above(cell: CellId, kind: CellKind, cell_rect: Rect, gap: f32, container: Rect, style: &TooltipStyle) -> Self {
        let info = kind.info();
        let anchor = Vec2::new(cell_rect.center().x, cell_rect.y - gap);

        let metrics = TextMetrics::of(style);
        let lines = layout_lines(&info, metrics.per_line);
        let longest = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) as f32;

        let width = longest * metrics.char_width + style.padding * 2.0;
        let height = lines.len() as f32 * metrics.line_height + style.padding * 2.0;

        let mut x = anchor.x - width * 0.5;
        let mut y = anchor.y - height;
        x = x.min(container.right() - width).max(container.x);
        y = y.max(container.y);

        Self {
            cell,
            kind,
            info,
            anchor,
            bounds: Rect::new(x, y, width, height),
        }
    }

    /// Generates render commands for this tooltip, one text run per
    /// wrapped line.
    pub fn render(&self, style: &TooltipStyle, commands: &mut Vec<DrawCommand>) {
        commands.push(DrawCommand::Rect {
            bounds: self.bounds,
            color: style.background,
            corner_radius: 8.0,
        });
        commands.push(DrawCommand::RectOutline {
            bounds: self.bounds,
            color: style.border,
            width: style.border_width,
            corner_radius: 8.0,
        });

        let metrics = TextMetrics::of(style);
        let x = self.bounds.x + style.padding;
        let mut y = self.bounds.y + style.padding;
        for (text, title) in layout_lines(&self.info, metrics.per_line) {
            commands.push(DrawCommand::Text {
                text,
                position: Vec2::new(x, y),
                color: if title { style.title } else { style.text },
                font_size: style.font_size,
                bold: title,
            });
            y += metrics.line_height;
        }
    }
}
