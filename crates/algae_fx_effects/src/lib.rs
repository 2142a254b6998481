//! # ALGAE FX Effects
//!
//! The decorative simulators behind the landing page:
//!
//! - [`ParticleField`]: a fixed pool of drifting dots pushed away by the cursor
//! - [`BubbleEmitter`]: bubbles spawned on an interval, each removed by its own timeout
//! - [`CellSwarm`]: orbiting algae cells with cursor avoidance and dwell tooltips
//! - [`ParallaxLayer`], [`ScrollTracker`], [`StatCounter`]: scroll-driven extras
//! - [`Section`]: mounts one to three simulators and collects their draw commands
//!
//! ## Usage
//!
//! ```
//! use algae_fx_core::{EffectsConfig, Rect};
//! use algae_fx_effects::{section, FrameBuffer, PointerEvent};
//! use algae_fx_core::Vec2;
//!
//! let mut hero = section::hero(&EffectsConfig::default(), 42).unwrap();
//! hero.mount(Rect::sized(1200.0, 800.0));
//! hero.pointer(PointerEvent::Enter(Vec2::new(600.0, 400.0)));
//! hero.advance(16);
//!
//! let mut frame = FrameBuffer::new();
//! hero.render(&mut frame);
//! assert!(!frame.is_empty());
//!
//! hero.unmount();
//! assert_eq!(hero.pending_timers(), 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bubbles;
pub mod counter;
pub mod effect;
pub mod parallax;
pub mod particle_field;
pub mod render;
pub mod scroll;
pub mod section;
pub mod swarm;

pub use bubbles::{Bubble, BubbleEmitter, BubbleFrame, BubbleStats};
pub use counter::{CounterPhase, StatCounter};
pub use effect::{Effect, EffectKind, PointerEvent, PointerSnapshot};
pub use parallax::{scroll_progress, ParallaxFrame, ParallaxLayer};
pub use particle_field::{Particle, ParticleField};
pub use render::{DrawCommand, FrameBuffer};
pub use scroll::{ScrollSample, ScrollTracker};
pub use section::Section;
pub use swarm::{CellId, CellKind, CellSwarm, FloatingCell, HoverPhase, Tooltip, TooltipStyle};
