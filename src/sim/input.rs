//! Input shaping
//!
//! Event handlers only stage the latest raw signal here (tilt sample,
//! pointer delta, key flags). The next tick consumes the staged values and
//! turns them into one horizontal basket displacement.

use serde::{Deserialize, Serialize};

use crate::Tuning;

/// How the basket is steered this round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    /// Device tilt (gamma angle)
    #[default]
    Tilt,
    /// Direct 1:1 drag
    Touch,
    /// Arrow keys / A-D
    Keys,
}

/// Logical keyboard directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Calibrated, exponentially smoothed tilt
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltFilter {
    /// Zero point subtracted from raw readings (degrees)
    pub offset: f32,
    /// Filtered tilt (degrees, within ±range)
    pub smoothed: f32,
    /// Whether the sensor has reported at least once
    seen: bool,
}

impl TiltFilter {
    /// Feed one raw reading (degrees); non-finite readings are ignored
    pub fn observe(&mut self, raw_deg: f32, smoothing: f32, range_deg: f32) {
        if !raw_deg.is_finite() {
            return;
        }
        let capped = (raw_deg - self.offset).clamp(-range_deg, range_deg);
        self.smoothed += smoothing * (capped - self.smoothed);
        self.seen = true;
    }

    /// Make the current orientation the new zero, keeping earlier calibration
    pub fn calibrate(&mut self) {
        self.offset += self.smoothed;
        self.smoothed = 0.0;
    }

    /// Smoothed tilt mapped to [-1, 1]
    pub fn normalized(&self, range_deg: f32) -> f32 {
        (self.smoothed / range_deg).clamp(-1.0, 1.0)
    }

    pub fn has_reading(&self) -> bool {
        self.seen
    }
}

/// Active pointer drag, accumulating movement until the next tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerDrag {
    last_x: Option<f32>,
    pending_dx: f32,
}

impl PointerDrag {
    pub fn press(&mut self, x: f32) {
        self.last_x = Some(x);
    }

    pub fn moved(&mut self, x: f32) {
        if let Some(last) = self.last_x {
            self.pending_dx += x - last;
            self.last_x = Some(x);
        }
    }

    /// Release or cancel
    pub fn release(&mut self) {
        self.last_x = None;
    }

    pub fn is_active(&self) -> bool {
        self.last_x.is_some()
    }

    /// Movement since the previous call
    pub fn take(&mut self) -> f32 {
        std::mem::take(&mut self.pending_dx)
    }
}

/// Held state of the steering keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Record a key-down/up; returns true if the key steers the basket
    pub fn set(&mut self, direction: Direction, down: bool) -> bool {
        match direction {
            Direction::Left => self.left = down,
            Direction::Right => self.right = down,
            Direction::Up | Direction::Down => return false,
        }
        true
    }

    /// -1, 0 or 1; both held contributes nothing
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }
}

/// Staged raw input plus the long-lived tilt calibration
///
/// Lives outside `GameState` so calibration survives restarts.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub tilt: TiltFilter,
    pub pointer: PointerDrag,
    pub keys: KeyState,
    staged_tilt: Option<f32>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the latest tilt reading; missing or non-numeric samples are dropped
    pub fn stage_tilt(&mut self, sample: Option<f64>) {
        match sample {
            Some(deg) if deg.is_finite() => self.staged_tilt = Some(deg as f32),
            _ => {}
        }
    }

    pub fn calibrate(&mut self) {
        self.tilt.calibrate();
        log::info!("Tilt calibrated, zero offset now {:.1}°", self.tilt.offset);
    }

    /// Consume staged input and return this frame's basket displacement (px)
    pub fn displacement(&mut self, mode: InputMode, dt: f32, tuning: &Tuning) -> f32 {
        self.absorb_tilt(tuning);
        let drag = self.pointer.take();

        match mode {
            InputMode::Tilt if self.tilt.has_reading() => {
                self.tilt.normalized(tuning.tilt_range_deg) * tuning.max_tilt_speed * dt
            }
            InputMode::Tilt => 0.0,
            InputMode::Touch => drag,
            InputMode::Keys => self.keys.axis() * tuning.key_speed * dt,
        }
    }

    /// Frame with no round running: the tilt filter keeps tracking so a
    /// calibration from the start screen is meaningful, drag is dropped
    pub fn idle(&mut self, tuning: &Tuning) {
        self.absorb_tilt(tuning);
        self.pointer.take();
    }

    fn absorb_tilt(&mut self, tuning: &Tuning) {
        if let Some(raw) = self.staged_tilt.take() {
            self.tilt
                .observe(raw, tuning.tilt_smoothing, tuning.tilt_range_deg);
        }
    }
}
