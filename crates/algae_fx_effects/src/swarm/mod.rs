//! # Floating Cell Swarm
//!
//! A handful of algae cells drifting on looping orbits. Each cell shies
//! away from the pointer and, when hovered long enough, shows a tooltip
//! describing its species.
//!
//! ## Hover lifecycle
//!
//! One slot for the whole swarm, so at most one tooltip exists:
//!
//! ```text
//!            enter(c)                 dwell elapsed
//!   Idle ─────────────► Dwelling(c) ────────────────► Visible(c)
//!    ▲                      │                            │
//!    │       leave(c)       │          leave(c)          │ grace > 0
//!    ├──────────────────────┘◄───────────────────────────┤
//!    │                                                   ▼
//!    └──────────────── grace elapsed ─────────────── Lingering(c)
//! ```
//!
//! Entering another cell from any phase cancels the pending timer, drops
//! the tooltip and starts a fresh dwell.

pub mod catalog;
pub mod tooltip;

pub use catalog::{CellInfo, CellKind, CellShape};
pub use tooltip::{Tooltip, TooltipStyle};

use algae_fx_core::animation::sample_keyframes;
use algae_fx_core::{
    CellSwarmConfig, Easing, FxResult, Glide, RandomSource, Rect, TickSource, TimerId, Vec2,
};
use tracing::{debug, trace};

use crate::effect::{Effect, EffectKind, PointerEvent, PointerSnapshot};
use crate::render::DrawCommand;

/// Orbit drift keyframes (px).
const ORBIT_X: [f32; 4] = [0.0, 30.0, -30.0, 0.0];
const ORBIT_Y: [f32; 4] = [0.0, -40.0, 20.0, 0.0];
/// Orbit wobble on top of the base rotation (degrees).
const ORBIT_SPIN: [f32; 4] = [0.0, 30.0, -30.0, 0.0];

/// Identifies a cell within its swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

/// Looping orbit timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orbit {
    /// Wait before the first loop (ms).
    pub delay_ms: u64,
    /// Length of one loop (ms).
    pub duration_ms: u64,
}

impl Orbit {
    /// Drift offset and extra rotation at `now_ms`.
    #[must_use]
    pub fn pose(&self, now_ms: u64) -> (Vec2, f32) {
        if now_ms < self.delay_ms || self.duration_ms == 0 {
            return (Vec2::ZERO, 0.0);
        }
        let progress = ((now_ms - self.delay_ms) % self.duration_ms) as f32 / self.duration_ms as f32;
        let drift = Vec2::new(
            sample_keyframes(&ORBIT_X, progress, Easing::CubicInOut),
            sample_keyframes(&ORBIT_Y, progress, Easing::CubicInOut),
        );
        (drift, sample_keyframes(&ORBIT_SPIN, progress, Easing::CubicInOut))
    }
}

/// One floating cell.
#[derive(Debug, Clone)]
pub struct FloatingCell {
    /// Identifier.
    pub id: CellId,
    /// Species.
    pub kind: CellKind,
    /// Top-left position in percent of the container.
    pub position: Vec2,
    /// Edge length (px).
    pub size: f32,
    /// Base rotation (degrees).
    pub rotation_deg: f32,
    /// Orbit timing.
    pub orbit: Orbit,
    repulsion: Glide,
}

impl FloatingCell {
    /// Current pointer-avoidance offset (px).
    #[must_use]
    pub fn repulsion(&self) -> Vec2 {
        self.repulsion.position()
    }

    /// Where the pointer-avoidance offset is heading (px).
    #[must_use]
    pub fn repulsion_target(&self) -> Vec2 {
        self.repulsion.destination()
    }

    /// On-screen rect: base position plus orbit drift plus avoidance.
    #[must_use]
    pub fn rect(&self, container: Rect, now_ms: u64) -> Rect {
        let base = container.percent_to_px(self.position.x, self.position.y);
        let (drift, _) = self.orbit.pose(now_ms);
        let at = base + drift + self.repulsion();
        Rect::new(at.x, at.y, self.size, self.size)
    }

    /// Rotation including orbit wobble (degrees).
    #[must_use]
    pub fn rotation_at(&self, now_ms: u64) -> f32 {
        self.rotation_deg + self.orbit.pose(now_ms).1
    }
}

/// Where the hover slot is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverPhase {
    /// No hover in progress.
    #[default]
    Idle,
    /// Pointer is over the cell, dwell timer running.
    Dwelling(CellId),
    /// Tooltip shown for the cell.
    Visible(CellId),
    /// Pointer left, tooltip shown until the grace timer fires.
    Lingering(CellId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwarmTimer {
    Dwell(CellId),
    Linger,
}

/// The floating cell swarm simulator.
pub struct CellSwarm {
    config: CellSwarmConfig,
    rng: Box<dyn RandomSource>,
    ticks: TickSource<SwarmTimer>,
    container: Option<Rect>,
    cells: Vec<FloatingCell>,
    pointer: PointerSnapshot,
    hovered: Option<CellId>,
    phase: HoverPhase,
    pending: Option<TimerId>,
    tooltip: Option<Tooltip>,
    style: TooltipStyle,
    mounted: bool,
}

impl CellSwarm {
    /// Creates an unmounted swarm.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CellSwarmConfig, rng: Box<dyn RandomSource>) -> FxResult<Self> {
        config.validate()?;
        Ok(Self {
            cells: Vec::with_capacity(config.count),
            config,
            rng,
            ticks: TickSource::new(),
            container: None,
            pointer: PointerSnapshot::default(),
            hovered: None,
            phase: HoverPhase::Idle,
            pending: None,
            tooltip: None,
            style: TooltipStyle::default(),
            mounted: false,
        })
    }

    /// Overrides the tooltip look.
    #[must_use]
    pub fn with_tooltip_style(mut self, style: TooltipStyle) -> Self {
        self.style = style;
        self
    }

    /// The cells, in paint order.
    #[must_use]
    pub fn cells(&self) -> &[FloatingCell] {
        &self.cells
    }

    /// Looks up a cell.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&FloatingCell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// On-screen rect of a cell, if the cell and the container exist.
    #[must_use]
    pub fn cell_rect(&self, id: CellId) -> Option<Rect> {
        let container = self.container?;
        self.cell(id).map(|c| c.rect(container, self.ticks.now_ms()))
    }

    /// The visible tooltip, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Current hover phase.
    #[must_use]
    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    /// The cell currently under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<CellId> {
        self.hovered
    }

    /// Current virtual time (ms).
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.ticks.now_ms()
    }

    fn spawn_cells(&mut self) {
        self.cells.clear();
        for index in 0..self.config.count {
            let rng = self.rng.as_mut();
            let position = Vec2::new(
                self.config.x_percent.at(rng.next_unit()),
                self.config.y_percent.at(rng.next_unit()),
            );
            let size = self.config.size.at(rng.next_unit());
            let rotation_deg = self.config.rotation_deg.at(rng.next_unit());
            let orbit = Orbit {
                delay_ms: self.config.orbit_delay_ms.at(rng.next_unit()).round() as u64,
                duration_ms: self.config.orbit_duration_ms.at(rng.next_unit()).round() as u64,
            };
            let kind = CellKind::ALL[rng.index(CellKind::ALL.len())];

            self.cells.push(FloatingCell {
                id: CellId(index as u32),
                kind,
                position,
                size,
                rotation_deg,
                orbit,
                repulsion: Glide::resting(Vec2::ZERO, self.config.return_duration_s, Easing::ExpoOut),
            });
        }
    }

    /// Drops any pending timer and tooltip, returning the slot to idle.
    fn clear_hover(&mut self) {
        if let Some(timer) = self.pending.take() {
            self.ticks.cancel(timer);
        }
        self.tooltip = None;
        self.phase = HoverPhase::Idle;
    }

    /// The pointer entered `id`. Starts a dwell unless one is already
    /// running or shown for the same cell.
    pub fn hover_cell(&mut self, id: CellId) {
        if !self.mounted {
            trace!(cell = id.0, "hover ignored: swarm not mounted");
            return;
        }
        if self.cell(id).is_none() {
            trace!(cell = id.0, "hover ignored: no such cell");
            return;
        }
        self.hovered = Some(id);

        match self.phase {
            HoverPhase::Dwelling(c) | HoverPhase::Visible(c) if c == id => {}
            HoverPhase::Lingering(c) if c == id => {
                if let Some(timer) = self.pending.take() {
                    self.ticks.cancel(timer);
                }
                self.phase = HoverPhase::Visible(id);
            }
            _ => {
                self.clear_hover();
                self.pending = Some(self.ticks.set_timeout(self.config.dwell_ms, SwarmTimer::Dwell(id)));
                self.phase = HoverPhase::Dwelling(id);
            }
        }
    }

    /// The pointer left `id`. Events for cells other than the current
    /// hover target are ignored.
    pub fn unhover_cell(&mut self, id: CellId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }

        match self.phase {
            HoverPhase::Dwelling(c) if c == id => self.clear_hover(),
            HoverPhase::Visible(c) if c == id => {
                if self.config.hide_grace_ms == 0 {
                    self.clear_hover();
                } else {
                    self.pending = Some(self.ticks.set_timeout(self.config.hide_grace_ms, SwarmTimer::Linger));
                    self.phase = HoverPhase::Lingering(id);
                }
            }
            _ => {}
        }
    }

    fn show_tooltip(&mut self, id: CellId) {
        if self.phase != HoverPhase::Dwelling(id) {
            return;
        }
        self.pending = None;

        let Some(container) = self.container else {
            trace!(cell = id.0, "tooltip skipped: container gone");
            self.phase = HoverPhase::Idle;
            return;
        };
        let now = self.ticks.now_ms();
        let Some(cell) = self.cells.iter().find(|c| c.id == id) else {
            self.phase = HoverPhase::Idle;
            return;
        };

        let tooltip = Tooltip::above(
            id,
            cell.kind,
            cell.rect(container, now),
            self.config.tooltip_gap_px,
            container,
            &self.style,
        );
        trace!(cell = id.0, name = tooltip.info.name, "tooltip shown");
        self.tooltip = Some(tooltip);
        self.phase = HoverPhase::Visible(id);
    }

    fn push_away(&mut self, pointer: Vec2, container: Rect) {
        let now = self.ticks.now_ms();
        let radius = self.config.interaction_radius;
        for cell in &mut self.cells {
            let center = cell.rect(container, now).center();
            let distance = center.distance(pointer);
            if distance < radius {
                let force = ((radius - distance) / self.config.force_divisor).min(self.config.max_displacement);
                let current = cell.repulsion();
                let push = (center - current).away_from(pointer, force);
                cell.repulsion.retarget(push);
            } else {
                cell.repulsion.retarget(Vec2::ZERO);
            }
        }
    }

    fn relax(&mut self) {
        for cell in &mut self.cells {
            cell.repulsion.retarget(Vec2::ZERO);
        }
    }

    fn hit_test(&self, point: Vec2, container: Rect) -> Option<CellId> {
        let now = self.ticks.now_ms();
        self.cells
            .iter()
            .rev()
            .find(|c| c.rect(container, now).contains(point))
            .map(|c| c.id)
    }
}

impl Effect for CellSwarm {
    fn kind(&self) -> EffectKind {
        EffectKind::CellSwarm
    }

    fn mount(&mut self, container: Rect) {
        if self.mounted {
            return;
        }
        self.container = Some(container);
        self.spawn_cells();
        self.ticks.start_frames();
        self.mounted = true;
        debug!(count = self.cells.len(), dwell_ms = self.config.dwell_ms, "cell swarm mounted");
    }

    fn set_container(&mut self, container: Option<Rect>) {
        self.container = container;
    }

    fn pointer(&mut self, event: PointerEvent) {
        if !self.mounted {
            return;
        }
        self.pointer.apply(event);

        match event {
            PointerEvent::Enter(position) | PointerEvent::Move(position) => {
                let Some(container) = self.container else {
                    return;
                };
                self.push_away(position, container);
                let under = self.hit_test(position, container);
                if under != self.hovered {
                    if let Some(previous) = self.hovered {
                        self.unhover_cell(previous);
                    }
                    if let Some(next) = under {
                        self.hover_cell(next);
                    }
                }
            }
            PointerEvent::Leave => {
                self.relax();
                if let Some(previous) = self.hovered {
                    self.unhover_cell(previous);
                }
            }
        }
    }

    fn advance(&mut self, dt_ms: u64) {
        let until = self.ticks.now_ms() + dt_ms;
        while let Some(fired) = self.ticks.next_due(until) {
            match fired.event {
                SwarmTimer::Dwell(id) => self.show_tooltip(id),
                SwarmTimer::Linger => {
                    if matches!(self.phase, HoverPhase::Lingering(_)) {
                        self.pending = None;
                        self.tooltip = None;
                        self.phase = HoverPhase::Idle;
                    }
                }
            }
        }
        self.ticks.settle(until);

        if self.ticks.frame_loop_active() {
            let dt_s = dt_ms as f32 / 1_000.0;
            for cell in &mut self.cells {
                cell.repulsion.tick(dt_s);
            }
        }
    }

    fn render(&self, commands: &mut Vec<DrawCommand>) {
        let Some(container) = self.container else {
            return;
        };
        let now = self.ticks.now_ms();
        for cell in &self.cells {
            commands.push(DrawCommand::Cell {
                bounds: cell.rect(container, now),
                rotation_deg: cell.rotation_at(now),
                shape: cell.kind.shape(),
                gradient: cell.kind.gradient(),
                hovered: self.hovered == Some(cell.id),
            });
        }
        if let Some(tooltip) = &self.tooltip {
            tooltip.render(&self.style, commands);
        }
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.ticks.cancel_all();
        self.pending = None;
        self.tooltip = None;
        self.phase = HoverPhase::Idle;
        self.hovered = None;
        self.pointer = PointerSnapshot::default();
        let removed = self.cells.len();
        self.cells.clear();
        self.mounted = false;
        debug!(removed, "cell swarm unmounted");
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
        self.cells.len() + usize::from(self.tooltip.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algae_fx_core::{Color, SeededRandom};

    const CONTAINER: Rect = Rect::sized(1200.0, 800.0);

    fn swarm(config: CellSwarmConfig) -> CellSwarm {
        let mut swarm = CellSwarm::new(config, Box::new(SeededRandom::new(21))).unwrap();
        swarm.mount(CONTAINER);
        swarm
    }

    #[test]
    fn test_cells_generated_in_configured_ranges() {
        let config = CellSwarmConfig::default();
        let swarm = swarm(config.clone());

        assert_eq!(swarm.cells().len(), 6);
        for cell in swarm.cells() {
            assert!(config.x_percent.contains(cell.position.x));
            assert!(config.y_percent.contains(cell.position.y));
            assert!(config.size.contains(cell.size));
            assert!(cell.orbit.duration_ms >= 15_000 && cell.orbit.duration_ms <= 25_000);
        }
    }

    #[test]
    fn test_orbit_starts_after_delay() {
        let orbit = Orbit {
            delay_ms: 1_000,
            duration_ms: 15_000,
        };

        assert_eq!(orbit.pose(500), (Vec2::ZERO, 0.0));
        let (drift, spin) = orbit.pose(1_000 + 5_000);
        assert!((drift.x - 30.0).abs() < 1e-2);
        assert!((drift.y + 40.0).abs() < 1e-2);
        assert!((spin - 30.0).abs() < 1e-2);
    }

    #[test]
    fn test_long_hover_shows_matching_tooltip() {
        let mut swarm = swarm(CellSwarmConfig::default());
        let id = CellId(2);
        let kind = swarm.cell(id).unwrap().kind;

        swarm.hover_cell(id);
        swarm.advance(700);

        let tooltip = swarm.tooltip().expect("tooltip after dwell");
        assert_eq!(tooltip.cell, id);
        assert_eq!(tooltip.kind, kind);
        assert_eq!(tooltip.info, kind.info());
        assert_eq!(swarm.phase(), HoverPhase::Visible(id));
    }

    #[test]
    fn test_short_hover_never_shows_tooltip() {
        let mut swarm = swarm(CellSwarmConfig::default());

        swarm.hover_cell(CellId(0));
        swarm.advance(500);
        swarm.unhover_cell(CellId(0));
        swarm.advance(5_000);

        assert!(swarm.tooltip().is_none());
        assert_eq!(swarm.phase(), HoverPhase::Idle);
        assert_eq!(swarm.pending_timers(), 0);
    }

    #[test]
    fn test_rapid_switch_only_latest_dwell_completes() {
        let mut swarm = swarm(CellSwarmConfig::default());

        swarm.hover_cell(CellId(0));
        swarm.advance(300);
        swarm.unhover_cell(CellId(0));
        swarm.hover_cell(CellId(1));
        swarm.advance(400);
        // Cell 0's dwell would have elapsed at 600ms.
        assert!(swarm.tooltip().is_none());

        swarm.advance(200);
        assert_eq!(swarm.tooltip().map(|t| t.cell), Some(CellId(1)));
        assert_eq!(swarm.pending_timers(), 0);
    }

    #[test]
    fn test_new_hover_replaces_visible_tooltip() {
        let mut swarm = swarm(CellSwarmConfig::default());

        swarm.hover_cell(CellId(0));
        swarm.advance(700);
        assert!(swarm.tooltip().is_some());

        swarm.hover_cell(CellId(3));
        assert!(swarm.tooltip().is_none());
        assert_eq!(swarm.phase(), HoverPhase::Dwelling(CellId(3)));
    }

    #[test]
    fn test_grace_delay_keeps_tooltip_briefly() {
        let mut swarm = swarm(CellSwarmConfig {
            hide_grace_ms: 200,
            ..CellSwarmConfig::default()
        });

        swarm.hover_cell(CellId(1));
        swarm.advance(600);
        swarm.unhover_cell(CellId(1));
        assert_eq!(swarm.phase(), HoverPhase::Lingering(CellId(1)));

        swarm.advance(199);
        assert!(swarm.tooltip().is_some());
        swarm.advance(1);
        assert!(swarm.tooltip().is_none());
        assert_eq!(swarm.phase(), HoverPhase::Idle);
    }

    #[test]
    fn test_dwell_with_container_gone_is_noop() {
        let mut swarm = swarm(CellSwarmConfig::default());

        swarm.hover_cell(CellId(0));
        swarm.set_container(None);
        swarm.advance(1_000);

        assert!(swarm.tooltip().is_none());
        assert_eq!(swarm.phase(), HoverPhase::Idle);
    }

    #[test]
    fn test_pointer_near_cell_pushes_it_away_and_caps() {
        let mut swarm = swarm(CellSwarmConfig::default());
        let rect = swarm.cell_rect(CellId(0)).unwrap();
        let center = rect.center();

        // Pointer 10px to the right of the center.
        swarm.pointer(PointerEvent::Enter(center + Vec2::new(10.0, 0.0)));
        let target = swarm.cell(CellId(0)).unwrap().repulsion_target();
        assert!(target.x < 0.0, "pushed left");
        assert!(target.length() <= 20.0 + 1e-4, "capped at max displacement");

        swarm.advance(1_000);
        let settled = swarm.cell(CellId(0)).unwrap().repulsion();
        assert!((settled.x - target.x).abs() < 1e-3);

        swarm.pointer(PointerEvent::Leave);
        swarm.advance(1_000);
        assert_eq!(swarm.cell(CellId(0)).unwrap().repulsion(), Vec2::ZERO);
    }

    #[test]
    fn test_unmount_with_pending_dwell_leaves_nothing() {
        let mut swarm = swarm(CellSwarmConfig::default());
        swarm.hover_cell(CellId(0));
        assert_eq!(swarm.pending_timers(), 1);

        swarm.unmount();

        assert_eq!(swarm.pending_timers(), 0);
        assert!(!swarm.frame_loop_active());
        assert_eq!(swarm.live_elements(), 0);
        assert!(swarm.tooltip().is_none());
    }

    #[test]
    fn test_tooltip_style_override_reaches_render() {
        let style = TooltipStyle {
            border: Color::DEEP_TEAL,
            max_width: 160.0,
            ..TooltipStyle::default()
        };
        let mut narrow = CellSwarm::new(CellSwarmConfig::default(), Box::new(SeededRandom::new(21)))
            .unwrap()
            .with_tooltip_style(style);
        narrow.mount(CONTAINER);
        let mut wide = swarm(CellSwarmConfig::default());

        for swarm in [&mut narrow, &mut wide] {
            swarm.hover_cell(CellId(0));
            swarm.advance(700);
        }
        let narrow_box = narrow.tooltip().unwrap().bounds;
        let wide_box = wide.tooltip().unwrap().bounds;
        assert!(narrow_box.width <= 160.0 + 1e-3);
        assert!(narrow_box.height > wide_box.height);

        let mut commands = Vec::new();
        narrow.render(&mut commands);
        assert!(commands
            .iter()
            .any(|c| matches!(c, DrawCommand::RectOutline { color, .. } if *color == Color::DEEP_TEAL)));
    }

    #[test]
    fn test_hover_before_mount_is_ignored() {
        let mut unmounted = CellSwarm::new(CellSwarmConfig::default(), Box::new(SeededRandom::new(21))).unwrap();
        unmounted.hover_cell(CellId(0));
        assert_eq!(unmounted.phase(), HoverPhase::Idle);
        assert_eq!(unmounted.pending_timers(), 0);

        let mut mounted = swarm(CellSwarmConfig::default());
        mounted.hover_cell(CellId(99));
        assert_eq!(mounted.phase(), HoverPhase::Idle);
        assert_eq!(mounted.pending_timers(), 0);
    }
}
