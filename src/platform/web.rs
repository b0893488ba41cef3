//! Browser glue: DOM HUD, sensor permission, page-provided tuning

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element};

use super::HudSink;
use crate::sim::SensorAccess;

// iOS 13+ gates orientation events behind an explicit prompt
#[wasm_bindgen(inline_js = "
    export function orientation_permission() {
        const D = window.DeviceOrientationEvent;
        if (typeof D === 'undefined') {
            return Promise.resolve('unsupported');
        }
        if (typeof D.requestPermission === 'function') {
            return D.requestPermission()
                .then((res) => (res === 'granted' ? 'granted' : 'denied'))
                .catch(() => 'denied');
        }
        return Promise.resolve('granted');
    }
")]
extern "C" {
    fn orientation_permission() -> js_sys::Promise;
}

/// Ask for tilt sensor access; must run inside a user gesture on iOS
pub async fn request_sensor_access() -> SensorAccess {
    match JsFuture::from(orientation_permission()).await {
        Ok(value) => {
            let answer = value.as_string().unwrap_or_default();
            log::info!("Sensor permission: {answer}");
            SensorAccess::from_answer(&answer)
        }
        Err(e) => {
            log::warn!("Sensor permission request failed: {e:?}");
            SensorAccess::Denied
        }
    }
}

/// Tuning JSON from `<script id="tuning" type="application/json">`, if present
pub fn page_tuning(document: &Document) -> Option<String> {
    document
        .get_element_by_id("tuning")
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
}

/// HUD backed by the page's elements; missing elements are skipped
pub struct DomHud {
    score: Option<Element>,
    lives: Option<Element>,
    final_score: Option<Element>,
    start_overlay: Option<Element>,
    game_over_overlay: Option<Element>,
    touch_guide: Option<Element>,
}

impl DomHud {
    pub fn from_document(document: &Document) -> Self {
        let find = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("HUD element #{id} missing");
            }
            el
        };
        Self {
            score: find("score"),
            lives: find("lives"),
            final_score: find("finalScore"),
            start_overlay: find("overlay"),
            game_over_overlay: find("gameover"),
            touch_guide: find("touchGuide"),
        }
    }
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

fn set_class(el: &Option<Element>, class: &str, on: bool) {
    if let Some(el) = el {
        let _ = el.class_list().toggle_with_force(class, on);
    }
}

impl HudSink for DomHud {
    fn set_score(&mut self, score: u32) {
        set_text(&self.score, &score.to_string());
    }

    fn set_lives(&mut self, lives: u8) {
        set_text(&self.lives, &lives.to_string());
    }

    fn set_final_score(&mut self, score: u32) {
        set_text(&self.final_score, &score.to_string());
    }

    fn set_start_visible(&mut self, visible: bool) {
        set_class(&self.start_overlay, "visible", visible);
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        set_class(&self.game_over_overlay, "visible", visible);
    }

    fn set_touch_guide_visible(&mut self, visible: bool) {
        set_class(&self.touch_guide, "hidden", !visible);
    }
}
