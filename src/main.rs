//! Space Race entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use space_race::persistence::LocalStorage;
    use space_race::renderer::{RenderState, scene};
    use space_race::sim::{GameEvent, GameState, TickInput, tick};
    use space_race::{HighScores, Settings, Tuning, normalize_pilot_name};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        settings: Settings,
        storage: LocalStorage,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Whether a frame callback is scheduled
        loop_running: bool,
        /// Final score waiting for a pilot name
        pending_score: Option<u64>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            let storage = LocalStorage::open();
            let settings = Settings::load(&storage);
            Self {
                state: GameState::with_tuning(seed, tuning),
                input: TickInput::default(),
                settings,
                storage,
                render_state: None,
                last_time: 0.0,
                loop_running: false,
                pending_score: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation step for this frame
        fn update(&mut self, time: f64) -> Vec<GameEvent> {
            let dt_ms = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            tick(&mut self.state, &mut self.input, dt_ms);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 && time > oldest_time {
                self.fps = (60000.0 / (time - oldest_time)).round() as u32;
            }

            self.state.drain_events()
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.display_score())));
            }
            if let Some(el) = document.get_element_by_id("status") {
                el.set_text_content(Some(self.state.phase.status_message()));
            }
            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    el.set_text_content(None);
                }
            }
        }

        /// Queue a restart if the run has ended
        fn request_restart(&mut self) -> bool {
            if !self.input.request_restart(self.state.phase) {
                return false;
            }
            // Time spent crashed is not part of the next run
            self.last_time = 0.0;
            self.pending_score = None;
            true
        }

        /// Record the pending score under the entered name
        fn submit_name(&mut self, raw: &str) -> Option<(String, HighScores)> {
            let score = self.pending_score.take()?;
            let name = normalize_pilot_name(raw);
            let (board, rank) =
                HighScores::record(&mut self.storage, &name, score as i64, js_sys::Date::now());
            match rank {
                Some(rank) => log::info!("{} placed #{} with {}", name, rank, score),
                None => log::info!("{} scored {} (not ranked)", name, score),
            }
            Some((name, board))
        }

        fn toggle_setting(&mut self, key: &str) {
            match key {
                "f" | "F" => self.settings.show_fps = !self.settings.show_fps,
                "m" | "M" => self.settings.reduced_motion = !self.settings.reduced_motion,
                "h" | "H" => self.settings.high_contrast = !self.settings.high_contrast,
                _ => return,
            }
            if let Err(e) = self.settings.save(&mut self.storage) {
                log::warn!("Failed to save settings: {e}");
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Space Race starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #game canvas found");
            return;
        };

        // The canvas attributes define the world; the backing store is scaled for DPI
        let tuning = Tuning::for_canvas(canvas.width() as f32, canvas.height() as f32);
        let dpr = window.device_pixel_ratio();
        let width = (tuning.width as f64 * dpr) as u32;
        let height = (tuning.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let world_size = (tuning.width, tuning.height);
        let game = Rc::new(RefCell::new(Game::new(seed, tuning)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, world_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        render_leaderboard(&document, &HighScores::load(&game.borrow().storage));

        setup_input_handlers(game.clone());
        setup_name_entry(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Space Race running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: lane shifts, restart, preference toggles
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.move_left = true,
                    "ArrowRight" => g.input.move_right = true,
                    " " => {
                        drop(g);
                        restart_from_key(&game, &event);
                    }
                    key => g.toggle_setting(key),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release held lane shifts
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.move_left = false,
                    "ArrowRight" => g.input.move_right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_name_entry(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("name-submit") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                submit_name_entry(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(input) = document.get_element_by_id("name-input") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Typing a name must not steer the ship or toggle settings
                event.stop_propagation();
                match event.key().as_str() {
                    "Enter" => submit_name_entry(&game),
                    // Names are letters only, so Space still restarts
                    " " => restart_from_key(&game, &event),
                    _ => {}
                }
            });
            let _ =
                input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Space while crashed: start a new run and wake the frame loop
    fn restart_from_key(game: &Rc<RefCell<Game>>, event: &KeyboardEvent) {
        let wake = {
            let mut g = game.borrow_mut();
            if !g.request_restart() {
                return;
            }
            !g.loop_running
        };
        event.prevent_default();
        if let Some(document) = document() {
            hide_name_entry(&document);
        }
        if wake {
            request_animation_frame(game.clone());
        }
    }

    fn name_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("name-input")?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    fn submit_name_entry(game: &Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };
        let raw = name_input(&document).map(|i| i.value()).unwrap_or_default();

        let Some((name, board)) = game.borrow_mut().submit_name(&raw) else {
            hide_name_entry(&document);
            return;
        };
        if let Some(el) = document.get_element_by_id("player") {
            el.set_text_content(Some(&format!("Pilot: {}", name)));
        }
        render_leaderboard(&document, &board);
        hide_name_entry(&document);
    }

    fn show_name_entry(document: &Document) {
        if let Some(el) = document.get_element_by_id("name-entry") {
            let _ = el.class_list().remove_1("hidden");
            let _ = el.set_attribute("aria-hidden", "false");
        }
        if let Some(input) = name_input(document) {
            input.set_value("");
            let _ = input.focus();
        }
    }

    fn hide_name_entry(document: &Document) {
        if let Some(el) = document.get_element_by_id("name-entry") {
            let _ = el.class_list().add_1("hidden");
            let _ = el.set_attribute("aria-hidden", "true");
        }
        // A hidden input must not keep eating game keys
        if let Some(input) = name_input(document) {
            let _ = input.blur();
        }
    }

    fn render_leaderboard(document: &Document, board: &HighScores) {
        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_inner_html("");

        if board.is_empty() {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some("No scores yet"));
                let _ = list.append_child(&item);
            }
            return;
        }

        for (index, entry) in board.entries().iter().enumerate() {
            let (Ok(item), Ok(rank), Ok(value)) = (
                document.create_element("li"),
                document.create_element("span"),
                document.create_element("span"),
            ) else {
                continue;
            };
            rank.set_text_content(Some(&format!("{}. {}", index + 1, entry.name)));
            value.set_text_content(Some(&entry.score.to_string()));
            let _ = item.append_child(&rank);
            let _ = item.append_child(&value);
            let _ = list.append_child(&item);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        game.borrow_mut().loop_running = true;
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let Some(document) = document() else {
            return;
        };

        let keep_running = {
            let mut g = game.borrow_mut();
            let events = g.update(time);
            for event in events {
                match event {
                    GameEvent::Crashed { score } => {
                        g.pending_score = Some(score);
                        show_name_entry(&document);
                        render_leaderboard(&document, &HighScores::load(&g.storage));
                    }
                    GameEvent::Restarted => hide_name_entry(&document),
                    _ => {}
                }
            }
            g.render();
            g.update_hud(&document);

            // Loop stops on crash; a restart schedules it again
            g.loop_running = g.state.is_running();
            g.loop_running
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Race (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let options = native::Options::from_args(std::env::args().skip(1));
    native::run(&options);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use space_race::persistence::MemoryStorage;
    use space_race::sim::{GameState, TickInput, tick};
    use space_race::{HighScores, Tuning};

    /// Fixed frame time for headless runs (~60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// How far above the ship a missile counts as a threat
    const LOOKAHEAD: f32 = 420.0;

    pub struct Options {
        pub seed: u64,
        pub runs: u32,
        pub max_frames: u32,
        pub tuning: Tuning,
    }

    impl Options {
        /// `--seed N --runs N --frames N --tuning file.json`
        pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
            let mut options = Self {
                seed: 1,
                runs: 3,
                max_frames: 60 * 120,
                tuning: Tuning::default(),
            };
            while let Some(arg) = args.next() {
                let value = args.next();
                match (arg.as_str(), value) {
                    ("--seed", Some(v)) => options.seed = v.parse().unwrap_or(options.seed),
                    ("--runs", Some(v)) => options.runs = v.parse().unwrap_or(options.runs),
                    ("--frames", Some(v)) => {
                        options.max_frames = v.parse().unwrap_or(options.max_frames)
                    }
                    ("--tuning", Some(path)) => match std::fs::read_to_string(&path) {
                        Ok(json) => options.tuning = Tuning::from_json(&json),
                        Err(e) => log::warn!("Can't read tuning file {path}: {e}"),
                    },
                    (other, _) => log::warn!("Ignoring argument {other}"),
                }
            }
            options
        }
    }

    /// Whether a lane is about to be unsafe for the ship
    fn lane_threatened(state: &GameState, lane: usize) -> bool {
        let flashing = state.warnings.get(lane).is_some_and(|w| w.active);
        let incoming = state.obstacles.iter().any(|o| {
            o.lane == lane && o.y < state.player.y + o.half_extents().y + 40.0
                && o.y > state.player.y - LOOKAHEAD
        });
        flashing || incoming
    }

    /// Sidestep into the nearest safe neighbor when the current lane is threatened
    fn autopilot(state: &GameState, input: &mut TickInput) {
        let lane = state.player.lane;
        if !lane_threatened(state, lane) {
            return;
        }
        let left = lane.checked_sub(1).filter(|&l| !lane_threatened(state, l));
        let right = Some(lane + 1).filter(|&l| l < state.layout.lanes && !lane_threatened(state, l));
        match (left, right) {
            (Some(_), _) => input.move_left = true,
            (None, Some(_)) => input.move_right = true,
            (None, None) => {}
        }
    }

    pub fn run(options: &Options) {
        let mut storage = MemoryStorage::new();
        let mut state = GameState::with_tuning(options.seed, options.tuning.clone());
        let mut input = TickInput::default();

        for run in 1..=options.runs {
            let mut frames = 0;
            while state.is_running() && frames < options.max_frames {
                autopilot(&state, &mut input);
                tick(&mut state, &mut input, FRAME_MS);
                input.move_left = false;
                input.move_right = false;
                frames += 1;
                for event in state.drain_events() {
                    log::trace!("Frame {frames}: {event:?}");
                }
            }

            let score = state.display_score();
            let outcome = if state.is_running() { "survived" } else { "crashed" };
            log::info!("Run {run}: {outcome} after {frames} frames, score {score}");
            let (_, rank) = HighScores::record(&mut storage, "CPU", score as i64, run as f64);
            if let Some(rank) = rank {
                log::info!("Run {run} placed #{rank}");
            }

            if state.is_running() {
                state = GameState::with_tuning(options.seed + run as u64, options.tuning.clone());
            } else {
                input.restart = true;
                tick(&mut state, &mut input, 0.0);
                state.drain_events();
            }
        }

        println!("\nLeaderboard:");
        for (i, entry) in HighScores::load(&storage).entries().iter().enumerate() {
            println!("{:>2}. {} {:>6}", i + 1, entry.name, entry.score);
        }
    }
}
