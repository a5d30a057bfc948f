//! Brain Surfing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent, Response};

    use brain_surfing::data::{SignalPayload, StagePayload};
    use brain_surfing::renderer::{CanvasSurface, paint_brainwave, paint_obstacle_course};
    use brain_surfing::sim::{FrameClock, FrameInput, ObstacleCourse, PhysicsParams, Player, World};
    use brain_surfing::{GameVariant, LoadError, Session, Settings};

    /// Which world the loop is driving
    enum Mode {
        Brainwave(Session),
        Obstacles(World<ObstacleCourse>),
    }

    /// Game instance holding all state
    struct Game {
        mode: Mode,
        settings: Settings,
        surface: CanvasSurface,
        clock: FrameClock,
        input: FrameInput,
        width: f32,
        height: f32,
        // Last status pushed to the DOM
        shown_status: String,
    }

    impl Game {
        fn new(settings: Settings, surface: CanvasSurface, width: f32, height: f32) -> Self {
            let mode = match settings.variant {
                GameVariant::Brainwave => Mode::Brainwave(Session::new(width, height, settings.clone())),
                GameVariant::ObstacleCourse => {
                    let params = PhysicsParams::obstacle_course(width);
                    Mode::Obstacles(obstacle_world(ObstacleCourse::starter(params.ground_y), params))
                }
            };
            Self {
                mode,
                settings,
                surface,
                clock: FrameClock::default(),
                input: FrameInput::default(),
                width,
                height,
                shown_status: String::new(),
            }
        }

        /// Run one simulation step
        fn update(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            match &mut self.mode {
                Mode::Brainwave(session) => session.frame(dt, &self.input),
                Mode::Obstacles(world) => world.step(self.settings.clamp_dt(dt), &self.input),
            }
            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }

        /// Render the current frame
        fn render(&mut self) {
            match &self.mode {
                Mode::Brainwave(session) => paint_brainwave(&mut self.surface, session),
                Mode::Obstacles(world) => {
                    paint_obstacle_course(&mut self.surface, world, self.width, self.height)
                }
            }
        }

        /// Update status/info panels in DOM when the load status changes
        fn update_hud(&mut self) {
            let Mode::Brainwave(session) = &self.mode else {
                return;
            };
            let hud = session.hud();
            if hud.status == self.shown_status {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("eeg-status") {
                el.set_text_content(Some(&hud.status));
                let class = match session.status() {
                    brain_surfing::LoadStatus::Loading => "loading",
                    brain_surfing::LoadStatus::Loaded { .. } => "loaded",
                    brain_surfing::LoadStatus::Fallback(_) => "failed",
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("eeg-info") {
                el.set_inner_html(&hud.info.join("<br>"));
            }
            self.shown_status = hud.status;
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            match &mut self.mode {
                Mode::Brainwave(session) => session.restart(),
                Mode::Obstacles(world) => {
                    let seed = js_sys::Date::now() as u64;
                    let course = ObstacleCourse::generate(seed, self.width, world.params.ground_y);
                    *world = obstacle_world(course, world.params);
                    log::info!("Game restarted with seed: {}", seed);
                }
            }
            self.clock.reset();
            self.input = FrameInput::default();
        }
    }

    fn obstacle_world(course: ObstacleCourse, params: PhysicsParams) -> World<ObstacleCourse> {
        let player = Player::new(glam::Vec2::new(50.0, 300.0), params.player_size, false);
        World::new(player, course, params)
    }

    fn js_err(e: JsValue) -> LoadError {
        LoadError::Fetch(format!("{:?}", e))
    }

    /// GET `url` and return the body as text
    async fn fetch_text(url: &str) -> Result<String, LoadError> {
        let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
        let value = JsFuture::from(window.fetch_with_str(url)).await.map_err(js_err)?;
        let response: Response = value.dyn_into().map_err(js_err)?;
        if !response.ok() {
            return Err(LoadError::Http(response.status()));
        }
        let body = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        body.as_string()
            .ok_or_else(|| LoadError::Fetch("response body is not text".into()))
    }

    /// Start both data loads; each settles into the session when done
    fn spawn_loads(game: Rc<RefCell<Game>>) {
        let (signal_url, stages_url) = {
            let g = game.borrow();
            if !matches!(g.mode, Mode::Brainwave(_)) {
                return;
            }
            (g.settings.signal_url.clone(), g.settings.stages_url.clone())
        };

        {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_text(&signal_url)
                    .await
                    .and_then(|text| SignalPayload::from_json(&text));
                if let Mode::Brainwave(session) = &mut game.borrow_mut().mode {
                    session.apply_signal(result);
                }
            });
        }

        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_text(&stages_url)
                .await
                .and_then(|text| StagePayload::from_json(&text));
            if let Mode::Brainwave(session) = &mut game.borrow_mut().mode {
                session.apply_stages(result);
            }
        });
    }

    /// `?variant=obstacles` overrides and replaces the stored setting
    fn variant_from_query() -> Option<GameVariant> {
        let search = web_sys::window()?.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "variant")
            .and_then(|(_, value)| GameVariant::from_str(value))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Brain Surfing starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or_else(|| JsValue::from_str("no #game-canvas"))?
            .dyn_into()?;

        // Size once from layout
        let rect = canvas.get_bounding_client_rect();
        let width = rect.width().max(1.0) as u32;
        let height = rect.height().max(1.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let mut settings = Settings::load();
        if let Some(variant) = variant_from_query() {
            if variant != settings.variant {
                settings.variant = variant;
                // Remember the choice for the next visit
                settings.save();
            }
        }
        log::info!("Variant: {} ({}x{})", settings.variant.as_str(), width, height);

        let surface = CanvasSurface::new(&canvas)?;
        let game = Rc::new(RefCell::new(Game::new(
            settings,
            surface,
            width as f32,
            height as f32,
        )));

        spawn_loads(game.clone());
        setup_input_handlers(game.clone())?;
        setup_restart_button(game.clone());

        // Draw once so the canvas isn't empty before the first refresh
        game.borrow_mut().render();

        request_animation_frame(game);

        log::info!("Brain Surfing running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Keyboard down: jump, walk, restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" => {
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "r" | "R" => g.restart(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard up: release walk
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer press (mouse, touch, pen) jumps
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.jump = true;
            });
            window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            // Pressing the button must not reach the window's jump handler
            let press = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.stop_propagation();
            });
            let _ = btn.add_event_listener_with_callback("pointerdown", press.as_ref().unchecked_ref());
            press.forget();

            let click = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());
            click.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
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
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brain Surfing (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ten simulated seconds on the synthetic wave, jumping whenever possible
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use brain_surfing::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use brain_surfing::sim::{FrameClock, FrameInput};
    use brain_surfing::{LoadError, Session, Settings};

    let mut session = Session::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, Settings::load());
    session.apply_signal(Err(LoadError::Fetch("no network in headless mode".into())));
    session.apply_stages(Err(LoadError::Fetch("no network in headless mode".into())));

    let mut clock = FrameClock::default();
    let mut input = FrameInput::default();
    let mut jumps = 0u32;

    for frame in 0..=600u32 {
        let time_ms = frame as f64 * 1000.0 / 60.0;
        input.jump = frame % 45 == 0 && session.player().resting;
        if input.jump {
            jumps += 1;
        }
        session.frame(clock.delta(time_ms), &input);
        input.clear_one_shots();

        if frame % 120 == 0 {
            let hud = session.hud();
            let player = session.player();
            println!(
                "{} | {} | y={:.1} angle={:.3} resting={}",
                hud.clock,
                hud.stage,
                player.pos.y,
                player.angle(),
                player.resting
            );
        }
    }

    println!("{} | {} jumps", session.hud().status, jumps);
}
