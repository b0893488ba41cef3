//! Item spawning and the difficulty curve
//!
//! Difficulty is driven by score only: the spawn interval lags toward a
//! shrinking target and the base fall speed grows linearly up to a cap.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, GameEvent, GameState, ItemKind};
use crate::Tuning;

/// Spawn interval the difficulty curve is heading for at `score` (ms)
pub fn target_interval(score: u32, tuning: &Tuning) -> f32 {
    (tuning.initial_spawn_interval_ms - tuning.spawn_interval_per_point_ms * score as f32)
        .max(tuning.min_spawn_interval_ms)
}

/// Move `current` a fixed fraction of the remaining gap toward `target`
///
/// First-order lag: never overshoots for `lag` in [0, 1].
pub fn approach_interval(current: f32, target: f32, lag: f32) -> f32 {
    current + (target - current) * lag
}

/// Base fall speed at `score` (px/s)
pub fn base_speed(score: u32, tuning: &Tuning) -> f32 {
    tuning.initial_item_speed
        + (tuning.item_speed_per_point * score as f32).min(tuning.max_item_speed_bonus)
}

/// Roll a new item just above the top edge
pub fn spawn_item<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    viewport_width: f32,
    base_speed: f32,
    tuning: &Tuning,
) -> FallingItem {
    let size = tuning.item_size_min + rng.random::<f32>() * tuning.item_size_range;
    // Fully inside the viewport horizontally
    let x = rng.random::<f32>() * (viewport_width - size).max(0.0);
    let y = -size - tuning.spawn_height_offset;
    let speed = base_speed + rng.random::<f32>() * tuning.item_speed_jitter;
    let spin = (rng.random::<f32>() * 2.0 - 1.0) * tuning.item_spin_max;
    let kind = if rng.random::<f32>() < tuning.hazard_chance {
        ItemKind::Hazard
    } else {
        ItemKind::Fruit
    };

    FallingItem {
        id,
        kind,
        pos: Vec2::new(x, y),
        size,
        speed,
        spin,
        rotation: 0.0,
    }
}

/// Per-frame spawner step: ramp difficulty, then spawn if the interval elapsed
///
/// Returns the id of the spawned item, if any. Only runs while playing.
pub fn update(state: &mut GameState, dt: f32) -> Option<u32> {
    if !state.phase.is_running() {
        return None;
    }

    let tuning = &state.tuning;
    let target = target_interval(state.score, tuning);
    state.spawn_interval_ms =
        approach_interval(state.spawn_interval_ms, target, tuning.spawn_interval_lag);
    state.base_item_speed = base_speed(state.score, tuning);

    state.since_spawn_ms += dt * 1000.0;
    if state.since_spawn_ms <= state.spawn_interval_ms {
        return None;
    }
    state.since_spawn_ms = 0.0;

    let id = state.next_entity_id();
    let item = spawn_item(
        &mut state.rng,
        id,
        state.viewport.width,
        state.base_item_speed,
        &state.tuning,
    );
    log::debug!(
        "Spawned {:?} #{} at x={:.0} speed={:.0}",
        item.kind,
        id,
        item.pos.x,
        item.speed
    );
    state.events.push(GameEvent::Spawned {
        id,
        kind: item.kind,
    });
    state.items.push(item);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{InputMode, Viewport};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_target_interval_floor() {
        let tuning = Tuning::default();
        assert_eq!(target_interval(0, &tuning), 1200.0);
        assert_eq!(target_interval(100, &tuning), 600.0);
        assert_eq!(target_interval(130, &tuning), 420.0);
        assert_eq!(target_interval(10_000, &tuning), 420.0);
    }

    #[test]
    fn test_base_speed_caps() {
        let tuning = Tuning::default();
        assert_eq!(base_speed(0, &tuning), 160.0);
        assert_eq!(base_speed(50, &tuning), 310.0);
        assert_eq!(base_speed(120, &tuning), 520.0);
        assert_eq!(base_speed(5000, &tuning), 520.0);
    }

    #[test]
    fn test_spawned_item_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let item = spawn_item(&mut rng, id, 320.0, 200.0, &tuning);
            assert!(item.size >= 26.0 && item.size < 36.0);
            assert!(item.pos.x >= 0.0 && item.pos.x + item.size <= 320.0);
            assert_eq!(item.pos.y, -item.size - 10.0);
            assert!(item.speed >= 200.0 && item.speed < 280.0);
            assert!(item.spin >= -0.05 && item.spin < 0.05);
            assert_eq!(item.rotation, 0.0);
        }
    }

    #[test]
    fn test_hazard_chance_extremes() {
        let mut rng = Pcg32::seed_from_u64(3);
        let all_fruit = Tuning {
            hazard_chance: 0.0,
            ..Tuning::default()
        };
        let all_hazard = Tuning {
            hazard_chance: 1.0,
            ..Tuning::default()
        };
        for id in 0..100 {
            assert_eq!(
                spawn_item(&mut rng, id, 400.0, 160.0, &all_fruit).kind,
                ItemKind::Fruit
            );
            assert_eq!(
                spawn_item(&mut rng, id, 400.0, 160.0, &all_hazard).kind,
                ItemKind::Hazard
            );
        }
    }

    #[test]
    fn test_hazard_share_near_default() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let hazards = (0..10_000)
            .filter(|&id| spawn_item(&mut rng, id, 400.0, 160.0, &tuning).kind == ItemKind::Hazard)
            .count();
        assert!((2_700..3_300).contains(&hazards), "hazards = {hazards}");
    }

    #[test]
    fn test_same_seed_same_items() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(9);
        let mut b = Pcg32::seed_from_u64(9);
        for id in 0..20 {
            let ia = spawn_item(&mut a, id, 400.0, 160.0, &tuning);
            let ib = spawn_item(&mut b, id, 400.0, 160.0, &tuning);
            assert_eq!(ia.pos, ib.pos);
            assert_eq!(ia.kind, ib.kind);
        }
    }

    #[test]
    fn test_update_spawns_once_interval_elapses() {
        let mut state = GameState::new(1, Viewport::new(400.0, 800.0));
        state.start(InputMode::Keys);

        // 1.1 s of frames: interval is still ~1200 ms, nothing yet
        for _ in 0..22 {
            assert_eq!(update(&mut state, 0.05), None);
        }
        // Keep going until exactly one item appears
        let mut spawned = 0;
        for _ in 0..3 {
            if update(&mut state, 0.05).is_some() {
                spawned += 1;
            }
        }
        assert_eq!(spawned, 1);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.since_spawn_ms, 0.0);
    }

    #[test]
    fn test_update_idle_does_nothing() {
        let mut state = GameState::new(1, Viewport::new(400.0, 800.0));
        for _ in 0..100 {
            assert_eq!(update(&mut state, 0.05), None);
        }
        assert!(state.items.is_empty());
        assert_eq!(state.spawn_interval_ms, 1200.0);
    }

    proptest! {
        #[test]
        fn prop_interval_converges_without_overshoot(
            score in 0u32..400,
            start in 420.0f32..1200.0,
            frames in 1usize..600,
        ) {
            let tuning = Tuning::default();
            let target = target_interval(score, &tuning);
            let mut interval = start;
            for _ in 0..frames {
                let next = approach_interval(interval, target, tuning.spawn_interval_lag);
                prop_assert!((next - target).abs() <= (interval - target).abs() + 1e-3);
                if interval >= target {
                    prop_assert!(next >= target - 1e-3);
                } else {
                    prop_assert!(next <= target + 1e-3);
                }
                interval = next;
            }
        }
    }
}
