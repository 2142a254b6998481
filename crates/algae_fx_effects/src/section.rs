//! # Sections
//!
//! A page section owns one to three effect layers plus any parallax
//! layers and counters. It forwards geometry, pointer, scroll and time to
//! all of them and tears them down together.
//!
//! ## Paint order
//!
//! 1. Parallax layer transforms
//! 2. Effect layers, in the order given at construction
//! 3. Counters

use algae_fx_core::{Color, EffectsConfig, FxError, FxResult, Rect, SeededRandom};
use tracing::debug;

use crate::bubbles::BubbleEmitter;
use crate::counter::StatCounter;
use crate::effect::{Effect, PointerEvent};
use crate::parallax::ParallaxLayer;
use crate::particle_field::ParticleField;
use crate::render::FrameBuffer;
use crate::scroll::ScrollSample;
use crate::swarm::CellSwarm;

/// Most effect layers a section may mount.
pub const MAX_LAYERS: usize = 3;

/// The statistics shown on the landing page: value, start delay, caption.
pub const LANDING_STATS: [(u64, u64, &str); 3] = [
    (15, 200, "Years Experience"),
    (250, 400, "Successful Projects"),
    (100, 600, "Algae Strains"),
];

/// A page section and everything decorating it.
pub struct Section {
    name: String,
    layers: Vec<Box<dyn Effect>>,
    parallax: Vec<ParallaxLayer>,
    counters: Vec<StatCounter>,
    bounds: Option<Rect>,
    mounted: bool,
}

impl Section {
    /// Creates a section over `layers`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::InvalidLayerCount`] unless there are 1 to 3 layers.
    pub fn new(name: impl Into<String>, layers: Vec<Box<dyn Effect>>) -> FxResult<Self> {
        let name = name.into();
        if layers.is_empty() || layers.len() > MAX_LAYERS {
            return Err(FxError::InvalidLayerCount {
                section: name,
                count: layers.len(),
                max: MAX_LAYERS,
            });
        }
        Ok(Self {
            name,
            layers,
            parallax: Vec::new(),
            counters: Vec::new(),
            bounds: None,
            mounted: false,
        })
    }

    /// Adds a parallax layer.
    #[must_use]
    pub fn with_parallax(mut self, layer: ParallaxLayer) -> Self {
        self.parallax.push(layer);
        self
    }

    /// Adds a counter.
    #[must_use]
    pub fn with_counter(mut self, counter: StatCounter) -> Self {
        self.counters.push(counter);
        self
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effect layers in paint order.
    #[must_use]
    pub fn layers(&self) -> &[Box<dyn Effect>] {
        &self.layers
    }

    /// Parallax layers.
    #[must_use]
    pub fn parallax_layers(&self) -> &[ParallaxLayer] {
        &self.parallax
    }

    /// Counters.
    #[must_use]
    pub fn counters(&self) -> &[StatCounter] {
        &self.counters
    }

    /// True between `mount` and `unmount`.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mounts everything over `bounds` (document px). Effect layers see
    /// a container-local rect of the same size.
    pub fn mount(&mut self, bounds: Rect) {
        if self.mounted {
            return;
        }
        let local = Rect::sized(bounds.width, bounds.height);
        for layer in &mut self.layers {
            layer.mount(local);
        }
        for layer in &mut self.parallax {
            layer.subscribe(bounds);
        }
        for counter in &mut self.counters {
            counter.mount(bounds);
        }
        self.bounds = Some(bounds);
        self.mounted = true;
        debug!(
            section = %self.name,
            layers = self.layers.len(),
            parallax = self.parallax.len(),
            counters = self.counters.len(),
            "section mounted"
        );
    }

    /// Updates geometry. `None` means the section element is gone.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        if !self.mounted {
            return;
        }
        self.bounds = bounds;
        let local = bounds.map(|b| Rect::sized(b.width, b.height));
        for layer in &mut self.layers {
            layer.set_container(local);
        }
        for layer in &mut self.parallax {
            match bounds {
                Some(b) => layer.subscribe(b),
                None => layer.unsubscribe(),
            }
        }
        for counter in &mut self.counters {
            counter.set_section(bounds);
        }
    }

    /// Forwards pointer input (section-local px) to every effect layer.
    pub fn pointer(&mut self, event: PointerEvent) {
        for layer in &mut self.layers {
            layer.pointer(event);
        }
    }

    /// Forwards a scroll sample to parallax layers and counters.
    pub fn scroll(&mut self, sample: ScrollSample) {
        if !self.mounted {
            return;
        }
        for layer in &mut self.parallax {
            layer.on_scroll(sample);
        }
        for counter in &mut self.counters {
            counter.on_scroll(sample);
        }
    }

    /// Advances every clock by `dt_ms`.
    pub fn advance(&mut self, dt_ms: u64) {
        if !self.mounted {
            return;
        }
        for layer in &mut self.layers {
            layer.advance(dt_ms);
        }
        for counter in &mut self.counters {
            counter.advance(dt_ms);
        }
    }

    /// Appends this frame's commands to `frame`.
    pub fn render(&self, frame: &mut FrameBuffer) {
        if !self.mounted {
            return;
        }
        for layer in &self.parallax {
            layer.render(&mut frame.commands);
        }
        for layer in &self.layers {
            layer.render(&mut frame.commands);
        }
        for counter in &self.counters {
            counter.render(&mut frame.commands);
        }
    }

    /// Tears down every layer, parallax subscription and counter.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        for layer in &mut self.layers {
            layer.unmount();
        }
        for layer in &mut self.parallax {
            layer.unsubscribe();
        }
        for counter in &mut self.counters {
            counter.unmount();
        }
        self.bounds = None;
        self.mounted = false;
        debug!(section = %self.name, "section unmounted");
    }

    /// Timers scheduled across all layers and counters.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.layers.iter().map(|l| l.pending_timers()).sum::<usize>()
            + self.counters.iter().map(StatCounter::pending_timers).sum::<usize>()
    }

    /// Number of layers with a running frame loop.
    #[must_use]
    pub fn active_frame_loops(&self) -> usize {
        self.layers.iter().filter(|l| l.frame_loop_active()).count()
    }

    /// Live entities across all layers.
    #[must_use]
    pub fn live_elements(&self) -> usize {
        self.layers.iter().map(|l| l.live_elements()).sum()
    }
}

impl Drop for Section {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Hero section: particle field, bubbles and the cell swarm over a
/// parallax background.
///
/// Each layer draws from its own generator derived from `seed`.
///
/// # Errors
///
/// Returns an error if any part of `config` is invalid.
pub fn hero(config: &EffectsConfig, seed: u64) -> FxResult<Section> {
    let layers: Vec<Box<dyn Effect>> = vec![
        Box::new(ParticleField::new(
            config.particle_field.clone(),
            Box::new(SeededRandom::new(seed)),
        )?),
        Box::new(BubbleEmitter::new(
            config.bubbles.clone(),
            Box::new(SeededRandom::new(seed.wrapping_add(1))),
        )?),
        Box::new(CellSwarm::new(
            config.cells.clone(),
            Box::new(SeededRandom::new(seed.wrapping_add(2))),
        )?),
    ];
    Ok(Section::new("hero", layers)?
        .with_parallax(ParallaxLayer::new("hero-background", config.parallax.clone())?))
}

/// Statistics section: an aqua particle field behind three count-up
/// numbers.
///
/// # Errors
///
/// Returns an error if any part of `config` is invalid.
pub fn statistics(config: &EffectsConfig, seed: u64) -> FxResult<Section> {
    let layers: Vec<Box<dyn Effect>> = vec![Box::new(
        ParticleField::new(config.particle_field.clone(), Box::new(SeededRandom::new(seed)))?
            .with_color(Color::AQUA),
    )];

    let mut section = Section::new("statistics", layers)?;
    for (column, (value, delay_ms, label)) in LANDING_STATS.into_iter().enumerate() {
        let slot = Rect::new(80.0 + column as f32 * 360.0, 160.0, 280.0, 120.0);
        section = section.with_counter(StatCounter::new(
            label,
            value,
            delay_ms,
            slot,
            config.counter.clone(),
        )?);
    }
    Ok(section)
}
