//! # Effects Configuration
//!
//! All tuning lives in one TOML file, one table per simulator. Every field
//! has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! seed = 42
//!
//! [particle_field]
//! count = 30
//! interaction_radius = 150.0
//!
//! [cells]
//! dwell_ms = 2000
//! interaction_radius = 150.0
//! ```
//!
//! Near-duplicate page variants disagree on dwell thresholds (600ms vs
//! 2000ms) and radii (100px vs 150px); none of them is authoritative, so
//! they are all plain fields here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{FxError, FxResult};

/// Hard cap on pooled entities per simulator.
pub const MAX_POOL: usize = 1_000;

/// An inclusive-exclusive `[min, max)` sampling range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Maps a unit value into the span.
    #[must_use]
    pub fn at(self, unit: f32) -> f32 {
        self.min + (self.max - self.min) * unit
    }

    /// Returns true if `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(self, name: &'static str) -> FxResult<()> {
        if self.min.is_nan() || self.max.is_nan() || self.min > self.max {
            return Err(FxError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> FxResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(FxError::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> FxResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(FxError::InvalidConfig(format!("{name} must be non-negative, got {value}")))
    }
}

fn pool(name: &str, count: usize) -> FxResult<()> {
    if (1..=MAX_POOL).contains(&count) {
        Ok(())
    } else {
        Err(FxError::InvalidConfig(format!(
            "{name} must be between 1 and {MAX_POOL}, got {count}"
        )))
    }
}

/// Ambient drifting dots with cursor repulsion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleFieldConfig {
    /// Pool size, fixed for the mount lifetime.
    pub count: usize,
    /// Dot diameter (px).
    pub size: Span,
    /// Dot opacity.
    pub opacity: Span,
    /// Maximum drift speed per axis (percent of container per second).
    pub max_speed: f32,
    /// Pointer influence radius (px).
    pub interaction_radius: f32,
    /// Displacement is `(radius - distance) / force_divisor` px.
    pub force_divisor: f32,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: 30,
            size: Span::new(5.0, 25.0),
            opacity: Span::new(0.1, 0.6),
            max_speed: 3.0,
            interaction_radius: 150.0,
            force_divisor: 10.0,
        }
    }
}

impl ParticleFieldConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> FxResult<()> {
        pool("particle_field.count", self.count)?;
        self.size.validate("particle_field.size")?;
        self.opacity.validate("particle_field.opacity")?;
        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(FxError::InvalidConfig(format!(
                "particle_field.max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        positive("particle_field.interaction_radius", self.interaction_radius)?;
        positive("particle_field.force_divisor", self.force_divisor)
    }
}

/// Periodically spawned rising bubbles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    /// Time between spawns (ms).
    pub spawn_interval_ms: u64,
    /// Bubble diameter (px).
    pub size: Span,
    /// Rise duration (ms).
    pub rise_duration_ms: Span,
    /// Delay before the rise starts (ms).
    pub delay_ms: Span,
    /// How far below the container bottom bubbles start (px).
    pub baseline_offset_px: f32,
    /// How far above the container top bubbles end (px).
    pub exit_height_px: f32,
    /// Opacity at the middle of the rise.
    pub peak_opacity: f32,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 2_000,
            size: Span::new(20.0, 80.0),
            rise_duration_ms: Span::new(10_000.0, 30_000.0),
            delay_ms: Span::new(0.0, 2_000.0),
            baseline_offset_px: 20.0,
            exit_height_px: 100.0,
            peak_opacity: 0.6,
        }
    }
}

impl BubbleConfig {
    /// Longest possible bubble lifetime (ms).
    #[must_use]
    pub fn max_lifetime_ms(&self) -> u64 {
        (self.delay_ms.max + self.rise_duration_ms.max).ceil() as u64
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> FxResult<()> {
        if self.spawn_interval_ms == 0 {
            return Err(FxError::InvalidConfig(
                "bubbles.spawn_interval_ms must be non-zero".into(),
            ));
        }
        self.size.validate("bubbles.size")?;
        self.rise_duration_ms.validate("bubbles.rise_duration_ms")?;
        self.delay_ms.validate("bubbles.delay_ms")?;
        positive("bubbles.rise_duration_ms.min", self.rise_duration_ms.min)?;
        if self.delay_ms.min < 0.0 {
            return Err(FxError::InvalidConfig("bubbles.delay_ms must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.peak_opacity) {
            return Err(FxError::InvalidConfig(format!(
                "bubbles.peak_opacity must be within 0..=1, got {}",
                self.peak_opacity
            )));
        }
        Ok(())
    }
}

/// Orbiting cells with hover tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSwarmConfig {
    /// Number of cells, fixed for the mount lifetime.
    pub count: usize,
    /// Horizontal placement (percent of container width).
    pub x_percent: Span,
    /// Vertical placement (percent of container height).
    pub y_percent: Span,
    /// Cell size (px).
    pub size: Span,
    /// Initial rotation (degrees).
    pub rotation_deg: Span,
    /// Delay before the orbit starts (ms).
    pub orbit_delay_ms: Span,
    /// Length of one full orbit (ms).
    pub orbit_duration_ms: Span,
    /// Pointer influence radius (px).
    pub interaction_radius: f32,
    /// Displacement is `(radius - distance) / force_divisor` px.
    pub force_divisor: f32,
    /// Cap on the repulsion offset (px).
    pub max_displacement: f32,
    /// Hover time before the tooltip shows (ms).
    pub dwell_ms: u64,
    /// How long a tooltip lingers after the pointer leaves (ms).
    pub hide_grace_ms: u64,
    /// Gap between the cell top and the tooltip (px).
    pub tooltip_gap_px: f32,
    /// Time for a displaced cell to glide back (seconds).
    pub return_duration_s: f32,
}

impl Default for CellSwarmConfig {
    fn default() -> Self {
        Self {
            count: 6,
            x_percent: Span::new(10.0, 90.0),
            y_percent: Span::new(15.0, 85.0),
            size: Span::new(40.0, 100.0),
            rotation_deg: Span::new(0.0, 360.0),
            orbit_delay_ms: Span::new(0.0, 2_000.0),
            orbit_duration_ms: Span::new(15_000.0, 25_000.0),
            interaction_radius: 100.0,
            force_divisor: 5.0,
            max_displacement: 20.0,
            dwell_ms: 600,
            hide_grace_ms: 0,
            tooltip_gap_px: 10.0,
            return_duration_s: 0.3,
        }
    }
}

impl CellSwarmConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> FxResult<()> {
        pool("cells.count", self.count)?;
        self.x_percent.validate("cells.x_percent")?;
        self.y_percent.validate("cells.y_percent")?;
        self.size.validate("cells.size")?;
        self.rotation_deg.validate("cells.rotation_deg")?;
        self.orbit_delay_ms.validate("cells.orbit_delay_ms")?;
        self.orbit_duration_ms.validate("cells.orbit_duration_ms")?;
        positive("cells.orbit_duration_ms.min", self.orbit_duration_ms.min)?;
        positive("cells.interaction_radius", self.interaction_radius)?;
        positive("cells.force_divisor", self.force_divisor)?;
        positive("cells.max_displacement", self.max_displacement)?;
        non_negative("cells.tooltip_gap_px", self.tooltip_gap_px)?;
        non_negative("cells.return_duration_s", self.return_duration_s)
    }
}

/// Scroll-linked background layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Vertical offset at progress 0 (px).
    pub from_offset_px: f32,
    /// Vertical offset at progress 1 (px).
    pub to_offset_px: f32,
    /// Opacity at progress 0.
    pub from_opacity: f32,
    /// Opacity at progress 1.
    pub to_opacity: f32,
    /// Monotonic curve applied to progress.
    pub easing: Easing,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            from_offset_px: 0.0,
            to_offset_px: 150.0,
            from_opacity: 1.0,
            to_opacity: 0.2,
            easing: Easing::Linear,
        }
    }
}

impl ParallaxConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> FxResult<()> {
        for (name, value) in [
            ("parallax.from_opacity", self.from_opacity),
            ("parallax.to_opacity", self.to_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FxError::InvalidConfig(format!(
                    "{name} must be within 0..=1, got {value}"
                )));
            }
        }
        if !self.easing.is_continuous() {
            return Err(FxError::InvalidConfig(format!(
                "parallax.easing must be continuous, got {:?}",
                self.easing
            )));
        }
        Ok(())
    }
}

/// Count-up statistic display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Count-up duration (ms).
    pub duration_ms: u64,
    /// Update interval (ms), ~60fps.
    pub tick_ms: u64,
    /// Fraction of the element that must be visible to start.
    pub visibility_threshold: f32,
    /// Viewport shrink applied at the top and bottom (px).
    pub root_margin_px: f32,
    /// Text appended to the number.
    pub suffix: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2_500,
            tick_ms: 16,
            visibility_threshold: 0.1,
            root_margin_px: 100.0,
            suffix: "+".into(),
        }
    }
}

impl CounterConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> FxResult<()> {
        if self.duration_ms == 0 || self.tick_ms == 0 {
            return Err(FxError::InvalidConfig(
                "counter.duration_ms and counter.tick_ms must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(FxError::InvalidConfig(format!(
                "counter.visibility_threshold must be within 0..=1, got {}",
                self.visibility_threshold
            )));
        }
        non_negative("counter.root_margin_px", self.root_margin_px)
    }
}

/// Page scroll tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// `is_scrolled` turns on strictly above this offset (px).
    pub scrolled_threshold_px: f32,
    /// Height of the fixed header subtracted from scroll targets (px).
    pub header_offset_px: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: 10.0,
            header_offset_px: 80.0,
        }
    }
}

impl ScrollConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> FxResult<()> {
        non_negative("scroll.scrolled_threshold_px", self.scrolled_threshold_px)?;
        non_negative("scroll.header_offset_px", self.header_offset_px)
    }
}

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Seed for the shared random source; `None` means time-seeded.
    pub seed: Option<u64>,
    /// Particle field tuning.
    pub particle_field: ParticleFieldConfig,
    /// Bubble emitter tuning.
    pub bubbles: BubbleConfig,
    /// Cell swarm tuning.
    pub cells: CellSwarmConfig,
    /// Parallax layer tuning.
    pub parallax: ParallaxConfig,
    /// Statistic counter tuning.
    pub counter: CounterConfig,
    /// Scroll tracking tuning.
    pub scroll: ScrollConfig,
}

impl EffectsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns a parse error or the first invalid field.
    pub fn from_toml_str(source: &str) -> FxResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error, a parse error or the first invalid field.
    pub fn from_file(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| FxError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every table.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> FxResult<()> {
        self.particle_field.validate()?;
        self.bubbles.validate()?;
        self.cells.validate()?;
        self.parallax.validate()?;
        self.counter.validate()?;
        self.scroll.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = EffectsConfig::from_toml_str("").unwrap();
        assert_eq!(config, EffectsConfig::default());
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let config = EffectsConfig::from_toml_str(
            r#"
            seed = 7

            [cells]
            dwell_ms = 2000
            interaction_radius = 150.0

            [parallax]
            easing = "cubic_in_out"
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cells.dwell_ms, 2_000);
        assert!((config.cells.interaction_radius - 150.0).abs() < f32::EPSILON);
        assert_eq!(config.cells.count, 6);
        assert_eq!(config.parallax.easing, Easing::CubicInOut);
    }

    #[test]
    fn test_inverted_span_is_rejected() {
        let err = EffectsConfig::from_toml_str(
            r"
            [particle_field]
            size = { min = 30.0, max = 5.0 }
            ",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            FxError::InvalidRange { name: "particle_field.size", .. }
        ));
    }

    #[test]
    fn test_zero_pool_is_rejected() {
        let config = ParticleFieldConfig {
            count: 0,
            ..ParticleFieldConfig::default()
        };
        assert!(matches!(config.validate(), Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = EffectsConfig::from_toml_str("[cells\ncount = 3").unwrap_err();
        assert!(matches!(err, FxError::ConfigParse(_)));
    }

    #[test]
    fn test_parallax_rejects_jumping_curve() {
        let err = EffectsConfig::from_toml_str("[parallax]\neasing = \"step\"").unwrap_err();
        assert!(matches!(err, FxError::InvalidConfig(_)));
    }

    #[test]
    fn test_max_lifetime_covers_delay_and_rise() {
        assert_eq!(BubbleConfig::default().max_lifetime_ms(), 32_000);
    }

    #[test]
    fn test_nan_and_negative_lengths_are_rejected() {
        let cells = CellSwarmConfig {
            return_duration_s: f32::NAN,
            ..CellSwarmConfig::default()
        };
        assert!(matches!(cells.validate(), Err(FxError::InvalidConfig(_))));

        let cells = CellSwarmConfig {
            tooltip_gap_px: -4.0,
            ..CellSwarmConfig::default()
        };
        assert!(matches!(cells.validate(), Err(FxError::InvalidConfig(_))));

        let counter = CounterConfig {
            root_margin_px: f32::INFINITY,
            ..CounterConfig::default()
        };
        assert!(matches!(counter.validate(), Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn test_scroll_table_is_validated() {
        let err = EffectsConfig::from_toml_str("[scroll]
header_offset_px = -80.0").unwrap_err();
        assert!(matches!(err, FxError::InvalidConfig(msg) if msg.contains("scroll.header_offset_px")));
    }
}
