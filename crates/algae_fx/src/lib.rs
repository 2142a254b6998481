//! # ALGAE FX
//!
//! Decorative effects for the algae biotech landing page, in one import.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          ALGAE FX                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  algae_fx_core            algae_fx_effects                   │
//! │  • geometry, colors       • particle field                   │
//! │  • easing, keyframes      • bubble emitter                   │
//! │  • tick source            • cell swarm + tooltips            │
//! │  • random sources         • parallax, scroll, counters       │
//! │  • TOML config, errors    • sections, draw commands          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `preview`: headless session driver used by the `fx_preview` binary

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod preview;

pub use algae_fx_core as fx_core;
pub use algae_fx_effects as fx_effects;

pub use algae_fx_core::{EffectsConfig, FxError, FxResult, Rect, Vec2};
pub use algae_fx_effects::{section, DrawCommand, FrameBuffer, PointerEvent, ScrollSample, ScrollTracker, Section};
