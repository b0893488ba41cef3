//! Platform abstraction layer
//!
//! The HUD is driven through `HudSink` so the presenter can be tested
//! without a DOM. Browser glue lives in `web` (wasm32 only).

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{GamePhase, GameState, InputMode};

/// Destination for HUD updates (DOM on web, a recorder in tests)
pub trait HudSink {
    fn set_score(&mut self, score: u32);
    fn set_lives(&mut self, lives: u8);
    fn set_final_score(&mut self, score: u32);
    fn set_start_visible(&mut self, visible: bool);
    fn set_game_over_visible(&mut self, visible: bool);
    fn set_touch_guide_visible(&mut self, visible: bool);
}

/// Everything the HUD shows, derived from the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HudSnapshot {
    score: u32,
    lives: u8,
    start_visible: bool,
    game_over_visible: bool,
    touch_guide_visible: bool,
}

impl HudSnapshot {
    fn of(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            start_visible: state.phase == GamePhase::Idle,
            game_over_visible: state.phase == GamePhase::GameOver,
            touch_guide_visible: state.phase != GamePhase::Idle
                && state.input_mode == InputMode::Touch,
        }
    }
}

/// Pushes HUD changes to a sink, skipping values that did not change
#[derive(Debug, Default)]
pub struct HudPresenter {
    last: Option<HudSnapshot>,
}

impl HudPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was shown so the next `present` writes everything
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn present<S: HudSink + ?Sized>(&mut self, state: &GameState, sink: &mut S) {
        let next = HudSnapshot::of(state);
        let prev = self.last;

        if prev.is_none_or(|p| p.score != next.score) {
            sink.set_score(next.score);
        }
        if prev.is_none_or(|p| p.lives != next.lives) {
            sink.set_lives(next.lives);
        }
        if prev.is_none_or(|p| p.game_over_visible != next.game_over_visible) {
            // Final score lands before the overlay appears
            if next.game_over_visible {
                sink.set_final_score(next.score);
            }
            sink.set_game_over_visible(next.game_over_visible);
        }
        if prev.is_none_or(|p| p.start_visible != next.start_visible) {
            sink.set_start_visible(next.start_visible);
        }
        if prev.is_none_or(|p| p.touch_guide_visible != next.touch_guide_visible) {
            sink.set_touch_guide_visible(next.touch_guide_visible);
        }

        self.last = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;

    #[derive(Debug, Clone, PartialEq)]
    enum Update {
        Score(u32),
        Lives(u8),
        FinalScore(u32),
        Start(bool),
        GameOver(bool),
        TouchGuide(bool),
    }

    #[derive(Default)]
    struct Recorder(Vec<Update>);

    impl HudSink for Recorder {
        fn set_score(&mut self, score: u32) {
            self.0.push(Update::Score(score));
        }
        fn set_lives(&mut self, lives: u8) {
            self.0.push(Update::Lives(lives));
        }
        fn set_final_score(&mut self, score: u32) {
            self.0.push(Update::FinalScore(score));
        }
        fn set_start_visible(&mut self, visible: bool) {
            self.0.push(Update::Start(visible));
        }
        fn set_game_over_visible(&mut self, visible: bool) {
            self.0.push(Update::GameOver(visible));
        }
        fn set_touch_guide_visible(&mut self, visible: bool) {
            self.0.push(Update::TouchGuide(visible));
        }
    }

    fn state() -> GameState {
        GameState::new(11, Viewport::new(400.0, 800.0))
    }

    #[test]
    fn test_first_present_writes_everything() {
        let mut hud = HudPresenter::new();
        let mut sink = Recorder::default();
        hud.present(&state(), &mut sink);
        assert_eq!(
            sink.0,
            vec![
                Update::Score(0),
                Update::Lives(3),
                Update::GameOver(false),
                Update::Start(true),
                Update::TouchGuide(false),
            ]
        );
    }

    #[test]
    fn test_unchanged_state_writes_nothing() {
        let mut hud = HudPresenter::new();
        let s = state();
        hud.present(&s, &mut Recorder::default());
        let mut sink = Recorder::default();
        hud.present(&s, &mut sink);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_score_and_lives_changes_only() {
        let mut hud = HudPresenter::new();
        let mut s = state();
        s.start(InputMode::Keys);
        hud.present(&s, &mut Recorder::default());

        s.score = 4;
        s.lives = 2;
        let mut sink = Recorder::default();
        hud.present(&s, &mut sink);
        assert_eq!(sink.0, vec![Update::Score(4), Update::Lives(2)]);
    }

    #[test]
    fn test_game_over_sets_final_score_and_restart_hides_it() {
        let mut hud = HudPresenter::new();
        let mut s = state();
        s.start(InputMode::Touch);
        hud.present(&s, &mut Recorder::default());

        s.score = 9;
        s.lives = 0;
        s.end_game();
        let mut sink = Recorder::default();
        hud.present(&s, &mut sink);
        assert!(sink.0.contains(&Update::FinalScore(9)));
        assert!(sink.0.contains(&Update::GameOver(true)));
        let final_at = sink.0.iter().position(|u| *u == Update::FinalScore(9));
        let shown_at = sink.0.iter().position(|u| *u == Update::GameOver(true));
        assert!(final_at < shown_at);

        s.restart();
        let mut sink = Recorder::default();
        hud.present(&s, &mut sink);
        assert!(sink.0.contains(&Update::GameOver(false)));
        assert!(sink.0.contains(&Update::Score(0)));
        assert!(sink.0.contains(&Update::Lives(3)));
        assert!(!sink.0.iter().any(|u| matches!(u, Update::TouchGuide(_))));
    }

    #[test]
    fn test_touch_guide_follows_mode() {
        let mut hud = HudPresenter::new();
        let mut s = state();
        hud.present(&s, &mut Recorder::default());

        s.start(InputMode::Touch);
        let mut sink = Recorder::default();
        hud.present(&s, &mut sink);
        assert!(sink.0.contains(&Update::TouchGuide(true)));
        assert!(sink.0.contains(&Update::Start(false)));

        s.start(InputMode::Tilt);
        let mut sink = Recorder::default();
        hud.present(&s, &mut sink);
        assert_eq!(sink.0, vec![Update::TouchGuide(false)]);
    }

    #[test]
    fn test_invalidate_rewrites() {
        let mut hud = HudPresenter::new();
        let s = state();
        hud.present(&s, &mut Recorder::default());
        hud.invalidate();
        let mut sink = Recorder::default();
        hud.present(&s, &mut sink);
        assert_eq!(sink.0.len(), 5);
    }
}
