//! Game state and core simulation types
//!
//! One `GameState` is one round: basket, falling items, counters and the
//! seeded RNG that drives spawning. It is owned by the frame driver and passed
//! into `tick`; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputMode;
use super::session::GamePhase;
use crate::Tuning;
use crate::{clamp_span, hex_color};

/// Basket color while a hazard hit is being signalled
pub const HIT_FLASH_COLOR: [f32; 4] = hex_color(0xff6b6b, 1.0);

/// Current drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

/// What a falling item does when it meets the basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Apple: +1 when caught, -1 life when missed
    Fruit,
    /// Bomb: -1 life when caught, harmless when missed
    Hazard,
}

/// A falling item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner of the item's bounding square
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed (px/s)
    pub speed: f32,
    /// Rotation added every frame (radians)
    pub spin: f32,
    pub rotation: f32,
}

impl FallingItem {
    /// Center of the bounding square (pivot for drawing)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Reference point used for catching: horizontal center, bottom edge
    pub fn catch_point(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y + self.size)
    }

    /// Fall for `dt` seconds and turn by one frame of spin
    pub fn advance(&mut self, dt: f32, gravity: f32) {
        // Gravity is a flat speed addend, not an acceleration
        self.pos.y += (self.speed + gravity) * dt;
        self.rotation += self.spin;
    }
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Override color while a hit is being signalled
    pub flash_color: Option<[f32; 4]>,
    /// Sim clock (ms) at which the flash ends
    pub flash_until_ms: f64,
}

impl Basket {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.basket_width, tuning.basket_height),
            flash_color: None,
            flash_until_ms: 0.0,
        }
    }

    /// Rest the basket on its layout line above the bottom edge
    pub fn place(&mut self, viewport: Viewport, bottom_offset: f32) {
        self.pos.y = viewport.height - bottom_offset;
    }

    /// Center horizontally in the viewport
    pub fn center_in(&mut self, viewport: Viewport) {
        self.pos.x = viewport.width / 2.0 - self.size.x / 2.0;
        self.clamp_to(viewport);
    }

    /// Keep the basket fully inside `[0, width - basket width]`
    pub fn clamp_to(&mut self, viewport: Viewport) {
        self.pos.x = clamp_span(self.pos.x, 0.0, viewport.width - self.size.x);
    }

    pub fn flash(&mut self, color: [f32; 4], now_ms: f64, duration_ms: f32) {
        self.flash_color = Some(color);
        self.flash_until_ms = now_ms + duration_ms as f64;
    }

    /// Flash color if a flash is still running at `now_ms`
    pub fn active_flash(&self, now_ms: f64) -> Option<[f32; 4]> {
        self.flash_color.filter(|_| now_ms < self.flash_until_ms)
    }
}

/// Things that happened during a tick, for the driver to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: ItemKind },
    Caught { id: u32, kind: ItemKind },
    Fell { id: u32, kind: ItemKind },
    GameOver { score: u32 },
}

/// Complete round state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub input_mode: InputMode,
    pub score: u32,
    /// Never drops below zero
    pub lives: u8,
    /// Current spawn interval (ms), lags toward the difficulty target
    pub spawn_interval_ms: f32,
    /// Base fall speed for new items (px/s)
    pub base_item_speed: f32,
    /// Time since the last spawn (ms)
    pub since_spawn_ms: f32,
    /// Simulation clock (ms); advances every tick in every phase
    pub clock_ms: f64,
    pub viewport: Viewport,
    pub basket: Basket,
    /// Live items in spawn order
    pub items: Vec<FallingItem>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle round with default tuning
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    /// Create an idle round with explicit tuning
    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut basket = Basket::new(&tuning);
        basket.place(viewport, tuning.basket_bottom_offset);
        basket.center_in(viewport);

        Self {
            seed,
            phase: GamePhase::Idle,
            input_mode: InputMode::default(),
            score: 0,
            lives: tuning.start_lives,
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            base_item_speed: tuning.initial_item_speed,
            since_spawn_ms: 0.0,
            clock_ms: 0.0,
            viewport,
            basket,
            items: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Track a new viewport size (layout line and clamp follow it)
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.basket.place(viewport, self.tuning.basket_bottom_offset);
        self.basket.clamp_to(viewport);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Restore the round-start counters without touching phase or mode
    pub(crate) fn reset_round(&mut self) {
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.items.clear();
        self.spawn_interval_ms = self.tuning.initial_spawn_interval_ms;
        self.base_item_speed = self.tuning.initial_item_speed;
        self.since_spawn_ms = 0.0;
        self.basket.flash_color = None;
        self.basket.flash_until_ms = 0.0;
        self.basket.place(self.viewport, self.tuning.basket_bottom_offset);
        self.basket.center_in(self.viewport);
    }
}
