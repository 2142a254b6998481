//! # Lifecycle Integration Tests
//!
//! Mount, drive and unmount every simulator the way a page would, and
//! check nothing outlives its section.

use algae_fx_core::{
    BubbleConfig, CellSwarmConfig, EffectsConfig, ParticleFieldConfig, Rect, SeededRandom, Vec2,
};
use algae_fx_effects::{
    section, BubbleEmitter, CellSwarm, Effect, FrameBuffer, ParticleField, PointerEvent,
};

const CONTAINER: Rect = Rect::sized(1_280.0, 720.0);

fn simulators(seed: u64) -> Vec<Box<dyn Effect>> {
    vec![
        Box::new(ParticleField::new(ParticleFieldConfig::default(), Box::new(SeededRandom::new(seed))).unwrap()),
        Box::new(BubbleEmitter::new(BubbleConfig::default(), Box::new(SeededRandom::new(seed))).unwrap()),
        Box::new(CellSwarm::new(CellSwarmConfig::default(), Box::new(SeededRandom::new(seed))).unwrap()),
    ]
}

/// Test: unmounting in the middle of activity leaves nothing behind.
#[test]
fn test_unmount_mid_activity_leaves_nothing() {
    for (offset, mut effect) in simulators(99).into_iter().enumerate() {
        effect.mount(CONTAINER);

        // Sweep the pointer across the container while time runs.
        effect.pointer(PointerEvent::Enter(Vec2::new(0.0, 360.0)));
        for step in 0..300u64 {
            let x = (step * 4 + offset as u64 * 7) as f32;
            effect.pointer(PointerEvent::Move(Vec2::new(x, 360.0)));
            effect.advance(33);
        }

        assert!(effect.frame_loop_active(), "{:?} frame loop should run", effect.kind());
        effect.unmount();

        assert_eq!(effect.pending_timers(), 0, "{:?} left timers", effect.kind());
        assert_eq!(effect.live_elements(), 0, "{:?} left elements", effect.kind());
        assert!(!effect.frame_loop_active(), "{:?} left its frame loop", effect.kind());

        // Time keeps passing after teardown; nothing comes back.
        effect.advance(60_000);
        assert_eq!(effect.live_elements(), 0);
    }
}

/// Test: remount starts a fresh lifetime.
#[test]
fn test_remount_after_unmount() {
    let mut emitter = BubbleEmitter::new(BubbleConfig::default(), Box::new(SeededRandom::new(3))).unwrap();

    emitter.mount(CONTAINER);
    emitter.advance(6_000);
    emitter.unmount();

    emitter.mount(CONTAINER);
    assert_eq!(emitter.live_elements(), 0);
    assert_eq!(emitter.pending_timers(), 1);
    emitter.advance(2_000);
    assert_eq!(emitter.live_elements(), 1);
}

/// Test: ten bubbles spawned, all gone once the longest lifetime passes.
#[test]
fn test_bubble_memory_is_bounded() {
    let config = BubbleConfig::default();
    let max_lifetime = config.max_lifetime_ms();
    let mut emitter = BubbleEmitter::new(config, Box::new(SeededRandom::new(17))).unwrap();
    emitter.mount(CONTAINER);

    emitter.advance(20_000);
    assert_eq!(emitter.stats().spawned, 10);

    emitter.set_container(None);
    emitter.advance(max_lifetime + 1);
    assert_eq!(emitter.live_elements(), 0);

    // Over a long session the live count stays bounded by spawn rate times lifetime.
    emitter.set_container(Some(CONTAINER));
    let bound = (max_lifetime / emitter.config().spawn_interval_ms + 1) as usize;
    for _ in 0..600 {
        emitter.advance(1_000);
        assert!(emitter.live_elements() <= bound);
    }
}

/// Test: a whole hero section renders every frame and tears down in one call.
#[test]
fn test_hero_section_session() {
    let mut hero = section::hero(&EffectsConfig::default(), 2024).unwrap();
    hero.mount(CONTAINER);

    let mut frame = FrameBuffer::new();
    hero.pointer(PointerEvent::Enter(Vec2::new(640.0, 360.0)));
    for step in 0..600u64 {
        let t = step as f32 / 600.0;
        hero.pointer(PointerEvent::Move(Vec2::new(t * 1_280.0, 360.0 + (t * std::f32::consts::TAU).sin() * 200.0)));
        hero.advance(16);

        frame.begin_frame();
        hero.render(&mut frame);
        assert!(!frame.is_empty());
    }
    hero.pointer(PointerEvent::Leave);

    hero.unmount();
    assert_eq!(hero.pending_timers(), 0);
    assert_eq!(hero.live_elements(), 0);

    frame.begin_frame();
    hero.render(&mut frame);
    assert!(frame.is_empty());
}
