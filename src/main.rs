//! Tilt Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, DeviceOrientationEvent, Document, HtmlCanvasElement,
        KeyboardEvent, PointerEvent, Window,
    };

    use tilt_catch::Tuning;
    use tilt_catch::consts::MAX_PIXEL_RATIO;
    use tilt_catch::platform::HudPresenter;
    use tilt_catch::platform::web::{DomHud, page_tuning, request_sensor_access};
    use tilt_catch::renderer::{RenderState, Tessellator, draw_frame};
    use tilt_catch::sim::{
        Controls, Direction, GameEvent, GamePhase, GameState, InputMode, ModeChoice,
        SensorAccess, Viewport, frame_dt, negotiate_input_mode, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        controls: Controls,
        render_state: Option<RenderState>,
        tessellator: Tessellator,
        presenter: HudPresenter,
        hud: DomHud,
        last_time: Option<f64>,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport, tuning: Tuning, hud: DomHud) -> Self {
            Self {
                state: GameState::with_tuning(seed, viewport, tuning),
                controls: Controls::new(),
                render_state: None,
                tessellator: Tessellator::new(),
                presenter: HudPresenter::new(),
                hud,
                last_time: None,
            }
        }

        /// Start a round in the negotiated mode
        fn begin(&mut self, choice: ModeChoice) {
            self.controls.pointer.release();
            self.state.start(choice.mode);
        }

        /// Run one simulation step for the frame stamped `time`
        fn update(&mut self, time: f64) {
            let dt = frame_dt(self.last_time, time);
            self.last_time = Some(time);

            tick(&mut self.state, &mut self.controls, dt);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::GameOver { score } => log::info!("Final score: {score}"),
                    other => log::debug!("{other:?}"),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.tessellator.clear();
            draw_frame(&self.state, &mut self.tessellator);

            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(self.tessellator.vertices()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn update_hud(&mut self) {
            self.presenter.present(&self.state, &mut self.hud);
        }

        /// Match the backing store to the canvas' CSS size
        fn resize(&mut self, window: &Window, canvas: &HtmlCanvasElement) {
            let (viewport, width, height) = canvas_size(window, canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            self.state.resize(viewport);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height, viewport);
            }
        }
    }

    /// CSS viewport plus backing store size, DPR capped
    fn canvas_size(window: &Window, canvas: &HtmlCanvasElement) -> (Viewport, u32, u32) {
        let dpr = window.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let client_w = canvas.client_width().max(1) as f64;
        let client_h = canvas.client_height().max(1) as f64;
        (
            Viewport::new(client_w as f32, client_h as f32),
            (client_w * dpr).floor() as u32,
            (client_h * dpr).floor() as u32,
        )
    }

    fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{context}: {e}"))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_err("logger", e))?;

        log::info!("Tilt Catch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;

        let (viewport, width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::from_json_or_default(page_tuning(&document).as_deref());
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            viewport,
            tuning,
            DomHud::from_document(&document),
        )));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_err("surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err("adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, viewport)
            .await
            .map_err(|e| js_err("device", e))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &document, &canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Tilt Catch running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Tilt: stage the latest gamma reading
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                game.borrow_mut().controls.stage_tilt(event.gamma());
            });
            window.add_event_listener_with_callback_and_bool(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
                true,
            )?;
            closure.forget();
        }

        // Drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut()
                    .controls
                    .pointer
                    .press(event.client_x() as f32);
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut()
                    .controls
                    .pointer
                    .moved(event.client_x() as f32);
            });
            canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        for name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().controls.pointer.release();
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(direction) = Direction::from_key(&key) {
                    if g.controls.keys.set(direction, true) {
                        event.prevent_default();
                    }
                    return;
                }
                // Enter/Space on an overlay starts a keyboard round
                if matches!(key.as_str(), "Enter" | " ") && g.state.phase != GamePhase::Playing {
                    event.prevent_default();
                    g.begin(negotiate_input_mode(InputMode::Keys, SensorAccess::Unsupported));
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = Direction::from_key(&event.key()) {
                    game.borrow_mut().controls.keys.set(direction, false);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Viewport changes
        {
            let game = game.clone();
            let window_clone = window.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize(&window_clone, &canvas_clone);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keep the page from scrolling/bouncing under a drag
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        handler: impl FnMut(web_sys::MouseEvent) + 'static,
    ) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{id} missing");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Start: tilt if the sensor is allowed, touch otherwise
        {
            let game = game.clone();
            on_click(document, "startBtn", move |_| {
                let game = game.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let access = request_sensor_access().await;
                    game.borrow_mut()
                        .begin(negotiate_input_mode(InputMode::Tilt, access));
                });
            })?;
        }
        {
            let game = game.clone();
            on_click(document, "touchModeBtn", move |_| {
                game.borrow_mut()
                    .begin(negotiate_input_mode(InputMode::Touch, SensorAccess::Unsupported));
            })?;
        }
        {
            let game = game.clone();
            on_click(document, "restartBtn", move |_| {
                let mut g = game.borrow_mut();
                g.controls.pointer.release();
                g.state.restart();
            })?;
        }
        on_click(document, "calibrateBtn", move |_| {
            game.borrow_mut().controls.calibrate();
        })?;
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tilt Catch (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let tuning_json = std::env::var("TILT_CATCH_TUNING")
        .ok()
        .and_then(|path| match std::fs::read_to_string(&path) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Could not read tuning file {path}: {e}");
                None
            }
        });
    let tuning = tilt_catch::Tuning::from_json_or_default(tuning_json.as_deref());
    let seed = std::env::var("TILT_CATCH_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    demo::autoplay(seed, tuning);
}

/// Headless round with a simple keyboard autopilot
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use tilt_catch::Tuning;
    use tilt_catch::sim::{
        Controls, GameEvent, GamePhase, GameState, InputMode, ItemKind, Viewport, tick,
    };

    /// Simulated frames (two minutes at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 120;
    const DT: f32 = 1.0 / 60.0;

    pub fn autoplay(seed: u64, tuning: Tuning) {
        let mut state = GameState::with_tuning(seed, Viewport::default(), tuning);
        let mut controls = Controls::new();
        state.start(InputMode::Keys);

        let (mut caught, mut dodged) = (0u32, 0u32);
        let mut frames = 0;
        while frames < MAX_FRAMES && state.phase == GamePhase::Playing {
            steer(&state, &mut controls);
            tick(&mut state, &mut controls, DT);
            frames += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::Caught { .. } => caught += 1,
                    GameEvent::Fell {
                        kind: ItemKind::Hazard,
                        ..
                    } => dodged += 1,
                    _ => {}
                }
            }
        }

        log::info!(
            "Seed {seed}: score {} lives {} after {:.1}s ({caught} catches, {dodged} bombs dodged, {:?})",
            state.score,
            state.lives,
            frames as f32 * DT,
            state.phase
        );
    }

    /// Chase the lowest fruit
    fn steer(state: &GameState, controls: &mut Controls) {
        let target = state
            .items
            .iter()
            .filter(|item| item.kind == ItemKind::Fruit)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|item| item.center().x);

        let basket_center = state.basket.pos.x + state.basket.size.x / 2.0;
        let (left, right) = match target {
            Some(x) if x < basket_center - 8.0 => (true, false),
            Some(x) if x > basket_center + 8.0 => (false, true),
            _ => (false, false),
        };
        controls.keys.left = left;
        controls.keys.right = right;
    }
}
