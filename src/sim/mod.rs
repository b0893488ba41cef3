//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `tick`'s `dt`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Outcome, Rect};
pub use input::{Controls, Direction, InputMode, KeyState, PointerDrag, TiltFilter};
pub use session::{GamePhase, ModeChoice, SensorAccess, negotiate_input_mode};
pub use state::{
    Basket, FallingItem, GameEvent, GameState, HIT_FLASH_COLOR, ItemKind, Viewport,
};
pub use tick::{frame_dt, tick};
