//! # ALGAE FX Core
//!
//! Shared primitives for the decorative effects engine:
//! - Container geometry and colors
//! - Easing curves, tweens and keyframe tracks
//! - The per-simulator tick source (timeouts, intervals, frame loop)
//! - Pluggable random sources for reproducible layouts
//! - TOML configuration and construction errors
//!
//! ## Design Principles
//!
//! 1. **Owned state** - simulators own their entities; hosts only read
//! 2. **One tick source per simulator** - teardown is one call
//! 3. **Injectable randomness** - tests script exact sequences
//! 4. **External configuration** - every tuning value lives in TOML

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod random;
pub mod schedule;
pub mod style;

pub use animation::{Easing, Glide};
pub use config::{
    BubbleConfig, CellSwarmConfig, CounterConfig, EffectsConfig, ParallaxConfig,
    ParticleFieldConfig, ScrollConfig, Span,
};
pub use error::{FxError, FxResult};
pub use geometry::{Rect, Vec2};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use schedule::{Fired, TickSource, TickStats, TimerId};
pub use style::{Color, Gradient};
