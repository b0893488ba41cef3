//! Round lifecycle: Idle -> Playing -> GameOver -> Playing
//!
//! Also decides which input mode a round starts in once the sensor
//! permission outcome is known.

use serde::{Deserialize, Serialize};

use super::input::InputMode;
use super::state::{GameEvent, GameState};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start overlay up, nothing simulated yet
    #[default]
    Idle,
    /// Simulation active
    Playing,
    /// Round ended; the final frame stays on screen
    GameOver,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Outcome of asking the platform for tilt sensor access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorAccess {
    Granted,
    Denied,
    /// No orientation sensor on this device/browser
    Unsupported,
}

impl SensorAccess {
    /// Parse the string reported by the permission prompt glue
    pub fn from_answer(s: &str) -> Self {
        match s {
            "granted" => SensorAccess::Granted,
            "unsupported" => SensorAccess::Unsupported,
            _ => SensorAccess::Denied,
        }
    }
}

/// Input mode a round will use plus whether the drag hint should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChoice {
    pub mode: InputMode,
    pub show_touch_guide: bool,
}

/// Settle the requested input mode against the sensor outcome
///
/// Tilt falls back to touch (with the guide) unless access was granted.
pub fn negotiate_input_mode(requested: InputMode, access: SensorAccess) -> ModeChoice {
    match (requested, access) {
        (InputMode::Tilt, SensorAccess::Granted) => ModeChoice {
            mode: InputMode::Tilt,
            show_touch_guide: false,
        },
        (InputMode::Tilt, denied) => {
            log::warn!("Tilt unavailable ({denied:?}), falling back to touch");
            ModeChoice {
                mode: InputMode::Touch,
                show_touch_guide: true,
            }
        }
        (InputMode::Touch, _) => ModeChoice {
            mode: InputMode::Touch,
            show_touch_guide: true,
        },
        (InputMode::Keys, _) => ModeChoice {
            mode: InputMode::Keys,
            show_touch_guide: false,
        },
    }
}

impl GameState {
    /// Enter Playing with fresh counters, from any phase
    pub fn start(&mut self, mode: InputMode) {
        self.reset_round();
        self.input_mode = mode;
        self.phase = GamePhase::Playing;
        log::info!("Round started ({mode:?}, seed {})", self.seed);
    }

    /// Start another round with the same input mode
    pub fn restart(&mut self) {
        self.start(self.input_mode);
    }

    /// Freeze the round; called when the last life is lost
    pub fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over with score {}", self.score);
    }
}
