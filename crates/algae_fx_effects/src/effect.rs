//! The lifecycle every mounted simulator follows.
//!
//! ```text
//! new(config, rng) ──► mount(container) ──► { pointer / advance / render }* ──► unmount()
//! ```
//!
//! After `unmount` the simulator holds no timers, no frame loop and no
//! entities. Mounting again starts a fresh lifetime.

use algae_fx_core::{Rect, Vec2};

use crate::render::DrawCommand;

/// Pointer input in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer entered the container.
    Enter(Vec2),
    /// The pointer moved inside the container.
    Move(Vec2),
    /// The pointer left the container.
    Leave,
}

/// The last pointer sample, copied once per frame so every entity in a
/// simulator is updated against the same position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// True between `Enter` and `Leave`.
    pub inside: bool,
    /// Last known position.
    pub position: Vec2,
}

impl PointerSnapshot {
    /// Folds an event into the snapshot.
    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(position) | PointerEvent::Move(position) => {
                self.inside = true;
                self.position = position;
            }
            PointerEvent::Leave => self.inside = false,
        }
    }
}

/// Which simulator a layer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Ambient drifting dots.
    ParticleField,
    /// Rising bubbles.
    BubbleEmitter,
    /// Orbiting cells with tooltips.
    CellSwarm,
}

/// A self-contained decorative simulator.
pub trait Effect {
    /// Which simulator this is.
    fn kind(&self) -> EffectKind;

    /// Allocates entities and starts timers inside `container`.
    ///
    /// Mounting an already mounted effect is a no-op.
    fn mount(&mut self, container: Rect);

    /// Updates container geometry. `None` means the container is gone;
    /// scheduled callbacks then become no-ops.
    fn set_container(&mut self, container: Option<Rect>);

    /// Feeds pointer input.
    fn pointer(&mut self, event: PointerEvent);

    /// Advances the clock by `dt_ms`, firing due timers and running one
    /// animation frame.
    fn advance(&mut self, dt_ms: u64);

    /// Appends this frame's draw commands.
    fn render(&self, commands: &mut Vec<DrawCommand>);

    /// Cancels every timer and the frame loop, drops every entity.
    fn unmount(&mut self);

    /// True between `mount` and `unmount`.
    fn is_mounted(&self) -> bool;

    /// Timers still scheduled on the tick source.
    fn pending_timers(&self) -> usize;

    /// True while the per-frame update loop runs.
    fn frame_loop_active(&self) -> bool;

    /// Entities currently alive (particles, bubbles, cells, tooltips).
    fn live_elements(&self) -> usize;
}
