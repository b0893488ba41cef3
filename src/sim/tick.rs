//! Per-frame simulation step
//!
//! `tick` is the whole simulation: input -> basket -> spawner -> items ->
//! catches/misses. The driver only measures time and calls it once per
//! display refresh.

use super::collision::{self, Outcome};
use super::input::Controls;
use super::spawn;
use super::state::{FallingItem, GameEvent, GameState, HIT_FLASH_COLOR, ItemKind};
use crate::consts::{FALLBACK_FRAME_DT, MAX_FRAME_DT};

/// Seconds to simulate for a frame stamped `now_ms` after one stamped `last_ms`
///
/// Large gaps (tab in background) are capped; a missing or unusable delta
/// falls back to a nominal 60 Hz step.
pub fn frame_dt(last_ms: Option<f64>, now_ms: f64) -> f32 {
    let Some(last) = last_ms else {
        return FALLBACK_FRAME_DT;
    };
    let dt = ((now_ms - last) / 1000.0) as f32;
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_FRAME_DT)
    } else {
        FALLBACK_FRAME_DT
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, controls: &mut Controls, dt: f32) {
    state.clock_ms += dt as f64 * 1000.0;

    if !state.phase.is_running() {
        controls.idle(&state.tuning);
        return;
    }

    // Basket
    let dx = controls.displacement(state.input_mode, dt, &state.tuning);
    state.basket.pos.x += dx;
    state.basket.clamp_to(state.viewport);

    spawn::update(state, dt);

    // Items
    let gravity = state.tuning.gravity;
    for item in &mut state.items {
        item.advance(dt, gravity);
    }

    resolve_items(state);
}

/// Settle every item exactly once; terminal items leave the list immediately
///
/// Once the round ends mid-frame the remaining items stay where they are,
/// so nothing scores after `GameOver`.
fn resolve_items(state: &mut GameState) {
    let zone = collision::catch_zone(&state.basket, state.tuning.catch_tolerance);
    let floor_y = state.viewport.height + state.tuning.despawn_margin;

    let items = std::mem::take(&mut state.items);
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if !state.phase.is_running() {
            kept.push(item);
            continue;
        }
        match collision::resolve(&item, &zone, floor_y) {
            Outcome::Caught => on_caught(state, &item),
            Outcome::Fell => on_fell(state, &item),
            Outcome::Falling => kept.push(item),
        }
    }
    state.items = kept;
}

fn on_caught(state: &mut GameState, item: &FallingItem) {
    state.events.push(GameEvent::Caught {
        id: item.id,
        kind: item.kind,
    });
    match item.kind {
        ItemKind::Fruit => {
            state.score += 1;
            log::debug!("Caught fruit #{}, score {}", item.id, state.score);
        }
        ItemKind::Hazard => {
            state
                .basket
                .flash(HIT_FLASH_COLOR, state.clock_ms, state.tuning.flash_duration_ms);
            log::debug!("Caught hazard #{}", item.id);
            lose_life(state);
        }
    }
}

fn on_fell(state: &mut GameState, item: &FallingItem) {
    state.events.push(GameEvent::Fell {
        id: item.id,
        kind: item.kind,
    });
    // Dodged hazards are neither rewarded nor punished
    if item.kind == ItemKind::Fruit {
        log::debug!("Missed fruit #{}", item.id);
        lose_life(state);
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.end_game();
    }
}
