//! # Particle Field
//!
//! A fixed pool of translucent dots drifting inside the container.
//!
//! Each frame:
//! 1. Positions advance by velocity (percent of container per second)
//! 2. A coordinate leaving [0, 100] is mirrored back and its velocity
//!    component flips, so positions are in range at every tick
//! 3. While the pointer is inside, dots within the interaction radius are
//!    pushed away by `(radius - distance) / force_divisor` px; the rest sit
//!    at their unshifted position
//!
//! The pool is allocated at mount and never grows.

use algae_fx_core::{
    Color, FxResult, ParticleFieldConfig, RandomSource, Rect, TickSource, Vec2,
};
use tracing::{debug, trace};

use crate::effect::{Effect, EffectKind, PointerEvent, PointerSnapshot};
use crate::render::DrawCommand;

/// Upper edge of the percentage domain.
const EDGE: f32 = 100.0;

/// One drifting dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in percent of the container (0-100 on both axes).
    pub position: Vec2,
    /// Velocity in percent per second.
    pub velocity: Vec2,
    /// Diameter (px).
    pub size: f32,
    /// Opacity (0-1).
    pub opacity: f32,
    /// Pointer displacement applied on top of `position` (px).
    pub offset: Vec2,
}

impl Particle {
    /// Moves by `velocity * dt` and reflects off the container edges.
    pub fn step(&mut self, dt_s: f32) {
        self.position.x += self.velocity.x * dt_s;
        self.position.y += self.velocity.y * dt_s;
        reflect(&mut self.position.x, &mut self.velocity.x);
        reflect(&mut self.position.y, &mut self.velocity.y);
    }

    /// Unshifted center in container pixels.
    #[must_use]
    pub fn base_px(&self, container: Rect) -> Vec2 {
        container.percent_to_px(self.position.x, self.position.y)
    }
}

fn reflect(position: &mut f32, velocity: &mut f32) {
    if *position < 0.0 {
        *position = -*position;
        *velocity = -*velocity;
    } else if *position > EDGE {
        *position = 2.0 * EDGE - *position;
        *velocity = -*velocity;
    }
    // A single huge step can overshoot twice; pin it.
    *position = position.clamp(0.0, EDGE);
}

/// Repulsion offset for an element at `center` given the pointer.
///
/// Zero outside `radius`.
#[must_use]
pub fn repulsion(center: Vec2, pointer: Vec2, radius: f32, force_divisor: f32) -> Vec2 {
    let distance = center.distance(pointer);
    if distance >= radius {
        return Vec2::ZERO;
    }
    center.away_from(pointer, (radius - distance) / force_divisor)
}

/// The particle field simulator.
pub struct ParticleField {
    config: ParticleFieldConfig,
    rng: Box<dyn RandomSource>,
    ticks: TickSource<()>,
    container: Option<Rect>,
    particles: Vec<Particle>,
    pointer: PointerSnapshot,
    mounted: bool,
    color: Color,
}

impl ParticleField {
    /// Creates an unmounted field.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ParticleFieldConfig, rng: Box<dyn RandomSource>) -> FxResult<Self> {
        config.validate()?;
        Ok(Self {
            particles: Vec::with_capacity(config.count),
            config,
            rng,
            ticks: TickSource::new(),
            container: None,
            pointer: PointerSnapshot::default(),
            mounted: false,
            color: Color::ALGAE,
        })
    }

    /// Overrides the dot color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// The particle pool.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }

    fn spawn_particle(&mut self) -> Particle {
        let rng = self.rng.as_mut();
        let size = self.config.size.at(rng.next_unit());
        let position = Vec2::new(rng.range(0.0, EDGE), rng.range(0.0, EDGE));
        let opacity = self.config.opacity.at(rng.next_unit());
        let velocity = Vec2::new(
            rng.signed(self.config.max_speed),
            rng.signed(self.config.max_speed),
        );
        Particle {
            position,
            velocity,
            size,
            opacity,
            offset: Vec2::ZERO,
        }
    }

    fn reset_offsets(&mut self) {
        for particle in &mut self.particles {
            particle.offset = Vec2::ZERO;
        }
    }

    fn frame(&mut self, dt_s: f32) {
        let Some(container) = self.container else {
            trace!("particle frame skipped: container gone");
            return;
        };

        let snapshot = self.pointer;
        let radius = self.config.interaction_radius;
        let divisor = self.config.force_divisor;

        for particle in &mut self.particles {
            particle.step(dt_s);
            particle.offset = if snapshot.inside {
                repulsion(particle.base_px(container), snapshot.position, radius, divisor)
            } else {
                Vec2::ZERO
            };
        }
    }
}

impl Effect for ParticleField {
    fn kind(&self) -> EffectKind {
        EffectKind::ParticleField
    }

    fn mount(&mut self, container: Rect) {
        if self.mounted {
            return;
        }
        self.container = Some(container);
        self.particles.clear();
        for _ in 0..self.config.count {
            let particle = self.spawn_particle();
            self.particles.push(particle);
        }
        self.ticks.start_frames();
        self.mounted = true;
        debug!(count = self.particles.len(), "particle field mounted");
    }

    fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
    }

    fn pointer(&mut self, event: PointerEvent) {
        if !self.mounted {
            return;
        }
        self.pointer.apply(event);
        if event == PointerEvent::Leave {
            self.reset_offsets();
        }
    }

    fn advance(&mut self, dt_ms: u64) {
        let until = self.ticks.now_ms() + dt_ms;
        self.ticks.settle(until);
        if self.ticks.frame_loop_active() {
            self.frame(dt_ms as f32 / 1_000.0);
        }
    }

    fn render(&self, commands: &mut Vec<DrawCommand>) {
        let Some(container) = self.container else {
            return;
        };
        for particle in &self.particles {
            commands.push(DrawCommand::Dot {
                center: particle.base_px(container) + particle.offset,
                radius: particle.size * 0.5,
                color: self.color.with_alpha(particle.opacity),
            });
        }
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.ticks.cancel_all();
        let removed = self.particles.len();
        self.particles.clear();
        self.pointer = PointerSnapshot::default();
        self.mounted = false;
        debug!(removed, "particle field unmounted");
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn pending_timers(&self) -> usize {
        self.ticks.pending_timers()
    }

    fn frame_loop_active(&self) -> bool {
        self.ticks.frame_loop_active()
    }

    fn live_elements(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algae_fx_core::{SeededRandom, SequenceRandom};

    const CONTAINER: Rect = Rect::sized(1000.0, 500.0);

    fn field(seed: u64) -> ParticleField {
        ParticleField::new(ParticleFieldConfig::default(), Box::new(SeededRandom::new(seed))).unwrap()
    }

    #[test]
    fn test_mount_allocates_fixed_pool() {
        let mut field = field(1);
        field.mount(CONTAINER);
        assert_eq!(field.live_elements(), 30);
        assert!(field.frame_loop_active());

        for _ in 0..100 {
            field.advance(16);
        }
        assert_eq!(field.live_elements(), 30);
    }

    #[test]
    fn test_spawn_ranges_from_scripted_rng() {
        // size, x, y, opacity, vx, vy
        let rng = SequenceRandom::new(vec![0.5, 0.25, 0.75, 0.0, 1.0, 0.5]);
        let config = ParticleFieldConfig {
            count: 1,
            ..ParticleFieldConfig::default()
        };
        let mut field = ParticleField::new(config, Box::new(rng)).unwrap();
        field.mount(CONTAINER);

        let p = field.particles()[0];
        assert!((p.size - 15.0).abs() < 1e-4);
        assert!((p.position.x - 25.0).abs() < 1e-4);
        assert!((p.position.y - 75.0).abs() < 1e-4);
        assert!((p.opacity - 0.1).abs() < 1e-4);
        assert!(p.velocity.x > 2.99);
        assert!(p.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_reflection_keeps_positions_in_range() {
        let mut particle = Particle {
            position: Vec2::new(99.0, 1.0),
            velocity: Vec2::new(10.0, -10.0),
            size: 5.0,
            opacity: 0.5,
            offset: Vec2::ZERO,
        };

        particle.step(0.2);

        assert!((particle.position.x - 99.0).abs() < 1e-4);
        assert!((particle.position.y - 1.0).abs() < 1e-4);
        assert!(particle.velocity.x < 0.0);
        assert!(particle.velocity.y > 0.0);
    }

    #[test]
    fn test_positions_stay_in_range_every_tick() {
        let config = ParticleFieldConfig {
            max_speed: 400.0,
            ..ParticleFieldConfig::default()
        };
        let mut field = ParticleField::new(config, Box::new(SeededRandom::new(9))).unwrap();
        field.mount(CONTAINER);

        for _ in 0..500 {
            field.advance(33);
            for p in field.particles() {
                assert!((0.0..=100.0).contains(&p.position.x), "x out of range: {}", p.position.x);
                assert!((0.0..=100.0).contains(&p.position.y), "y out of range: {}", p.position.y);
            }
        }
    }

    #[test]
    fn test_repulsion_inside_radius_only() {
        let center = Vec2::new(100.0, 100.0);

        let near = repulsion(center, Vec2::new(150.0, 100.0), 150.0, 10.0);
        assert!((near.x + 10.0).abs() < 1e-4, "pushed left by (150-50)/10");
        assert!(near.y.abs() < 1e-4);

        let far = repulsion(center, Vec2::new(400.0, 100.0), 150.0, 10.0);
        assert_eq!(far, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_leave_resets_offsets() {
        let mut field = field(3);
        field.mount(CONTAINER);
        let target = field.particles()[0].base_px(CONTAINER);

        field.pointer(PointerEvent::Enter(target + Vec2::new(5.0, 0.0)));
        field.advance(0);
        assert_ne!(field.particles()[0].offset, Vec2::ZERO);

        field.pointer(PointerEvent::Leave);
        assert!(field.particles().iter().all(|p| p.offset == Vec2::ZERO));
    }

    #[test]
    fn test_missing_container_is_noop() {
        let mut field = field(4);
        field.mount(CONTAINER);
        let before: Vec<Particle> = field.particles().to_vec();

        field.set_container(None);
        field.advance(16);

        assert_eq!(field.particles(), before.as_slice());
        let mut commands = Vec::new();
        field.render(&mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_unmount_releases_everything() {
        let mut field = field(5);
        field.mount(CONTAINER);
        field.advance(16);

        field.unmount();

        assert_eq!(field.pending_timers(), 0);
        assert!(!field.frame_loop_active());
        assert_eq!(field.live_elements(), 0);
    }
}
