//! Geometry Jumper entry point
//!
//! The browser build drives a `Session` from `requestAnimationFrame`, draws it
//! with WebGPU and keeps the HUD in the DOM. The native build has no window:
//! it plays one autopiloted run headlessly and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use geometry_jumper::audio::{AudioManager, SoundEffect};
    use geometry_jumper::clock::ManualClock;
    use geometry_jumper::persistence::LocalStorage;
    use geometry_jumper::renderer::{RenderState, scene};
    use geometry_jumper::sim::{GameEvent, GamePhase};
    use geometry_jumper::{Session, Settings, ui};

    struct Game {
        session: Session<LocalStorage>,
        settings: Settings,
        clock: ManualClock,
        audio: AudioManager,
        render_state: Option<RenderState>,
        document: Document,
        /// Frame timing for the FPS readout
        last_frame: f64,
        fps: f64,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            self.clock.set(Duration::from_secs_f64(time.max(0.0) / 1000.0));
            self.session.pump(&self.clock);

            for event in self.session.drain_events() {
                self.on_event(&event);
            }

            if let Some(render_state) = self.render_state.as_mut() {
                let vertices = scene(self.session.state(), self.session.layout());
                match render_state.render(&vertices) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = render_state.size;
                        render_state.resize(w, h);
                    }
                    Err(e) => log::error!("Render error: {e:?}"),
                }
            }

            if self.last_frame > 0.0 {
                let dt = (time - self.last_frame).max(1.0);
                self.fps = self.fps * 0.9 + (1000.0 / dt) * 0.1;
            }
            self.last_frame = time;

            self.update_hud();
        }

        fn on_event(&mut self, event: &GameEvent) {
            if self.settings.sound {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }

            let finished = matches!(event, GameEvent::Crashed { .. } | GameEvent::Won);
            if finished {
                let beat_record = self.session.report().is_some_and(|r| r.new_high_score);
                if beat_record && self.settings.sound {
                    self.audio.play(SoundEffect::HighScore);
                }
                self.show_end_overlay();
            }
        }

        fn update_hud(&self) {
            let state = self.session.state();
            set_text(
                &self.document,
                "hud-score",
                &ui::hud_line(state.score, self.session.high_score()),
            );
            set_text(&self.document, "hud-level", &ui::level_banner(state.level_index));
            set_text(
                &self.document,
                "hud-autopilot",
                if self.session.autopilot_enabled() { "AUTO" } else { "" },
            );
            if self.settings.show_fps {
                set_text(&self.document, "hud-fps", &format!("{:.0} FPS", self.fps));
            }
        }

        fn show_end_overlay(&self) {
            let Some(report) = self.session.report() else {
                return;
            };
            set_text(&self.document, "overlay-title", &ui::end_headline(report));
            set_text(&self.document, "overlay-detail", &ui::end_detail(report));
            set_text(&self.document, "start-btn", ui::RESTART_LABEL);
            set_visible(&self.document, "overlay", true);
        }

        fn start(&mut self) {
            self.audio.resume();
            // A human run replaces any demo
            self.session.set_autopilot(None);
            self.session.start();
            set_visible(&self.document, "overlay", false);
            for event in self.session.drain_events() {
                self.on_event(&event);
            }
        }

        fn jump(&mut self) {
            self.audio.resume();
            self.session.jump();
        }

        /// Apply a settings change and write it back to storage
        fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
            change(&mut self.settings);
            self.audio.set_volume(self.settings.effective_volume());
            set_visible(&self.document, "hud-fps", self.settings.show_fps);
            if let Err(e) = self.settings.save(self.session.store_mut()) {
                log::warn!("Settings not persisted: {e}");
            }
        }

        fn toggle_autopilot(&mut self) {
            let seed = if self.session.autopilot_enabled() {
                None
            } else {
                Some(js_sys::Date::now() as u64)
            };
            self.session.set_autopilot(seed);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger unavailable: {e}").into());
        }

        log::info!("Geometry Jumper starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let store = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let settings = Settings::load(&store);
        let mut session = Session::with_store(store);
        if settings.demo_when_idle {
            session.set_autopilot(Some(js_sys::Date::now() as u64));
            session.start();
        }

        let game = Rc::new(RefCell::new(Game {
            session,
            audio: AudioManager::new(settings.effective_volume()),
            settings,
            clock: ManualClock::new(),
            render_state: None,
            document: document.clone(),
            last_frame: 0.0,
            fps: 60.0,
        }));

        set_text(&document, "overlay-title", ui::TITLE);
        set_text(&document, "overlay-detail", ui::INSTRUCTIONS);
        set_text(&document, "start-btn", ui::START_LABEL);
        set_visible(&document, "hud-fps", game.borrow().settings.show_fps);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let viewport = game.borrow().session.layout().viewport;
        let render_state = RenderState::new(surface, &adapter, width, height, viewport)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(&document, game.clone());
        setup_visibility(&document, game.clone());

        set_visible(&document, "hud", true);
        request_animation_frame(game);

        log::info!("Geometry Jumper running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.jump();
                    }
                    "i" | "I" => g.toggle_autopilot(),
                    "m" | "M" => g.update_settings(|s| s.sound = !s.sound),
                    "f" | "F" => g.update_settings(|s| s.show_fps = !s.show_fps),
                    "c" | "C" => g.update_settings(|s| s.click_to_jump = !s.click_to_jump),
                    "d" | "D" => g.update_settings(|s| s.demo_when_idle = !s.demo_when_idle),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.settings.click_to_jump {
                    g.jump();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.settings.click_to_jump {
                    g.jump();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Hidden tabs get no frames; on return the time spent hidden is dropped
    /// instead of being replayed as catch-up ticks.
    fn setup_visibility(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                let mut g = game.borrow_mut();
                g.last_frame = 0.0;
                g.session.resync_clock();
                if g.session.phase() == GamePhase::Running {
                    log::info!("Tab visible again");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use geometry_jumper::clock::ManualClock;
    use geometry_jumper::persistence::{FileStore, MemoryStore, ScalarStore};
    use geometry_jumper::sim::{GameEvent, Layout};
    use geometry_jumper::{LevelCatalog, Session, Tuning, ui};

    /// Stop a run that somehow never ends after this much game time
    const MAX_TICKS: u64 = 60 * 60 * 30;

    fn store_path() -> PathBuf {
        std::env::var_os("GEOMETRY_JUMPER_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".geometry-jumper"))
            .join("store.json")
    }

    fn open_store() -> Box<dyn ScalarStore> {
        let path = store_path();
        match FileStore::open(&path) {
            Ok(store) => {
                log::info!("Using store at {}", path.display());
                Box::new(store)
            }
            Err(e) => {
                log::warn!("Store at {} unusable ({e}), keeping scores in memory", path.display());
                Box::new(MemoryStore::new())
            }
        }
    }

    fn load_tuning() -> Result<Tuning, Box<dyn std::error::Error>> {
        match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                let tuning = Tuning::from_json(&json)?;
                log::info!("Loaded tuning from {path}");
                Ok(tuning)
            }
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let tuning = load_tuning()?;
        let mut session = Session::new(
            LevelCatalog::standard(),
            tuning,
            Layout::default(),
            open_store(),
        )?;
        println!("{}", ui::TITLE);

        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        session.set_autopilot(Some(seed));
        session.start();

        let clock = ManualClock::new();
        session.pump(&clock);
        while session.report().is_none() && session.state().time_ticks < MAX_TICKS {
            clock.advance(session.step_duration());
            session.pump(&clock);
            for event in session.drain_events() {
                if let GameEvent::LevelCleared { level } = event {
                    println!("{} cleared (score {})", ui::level_banner(level), session.state().score);
                }
            }
        }

        match session.report() {
            Some(report) => {
                println!("{}", ui::end_headline(report));
                println!("{}", ui::end_detail(report));
            }
            None => println!("Run stopped after {MAX_TICKS} ticks"),
        }
        println!("High Score: {}", session.high_score());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Geometry Jumper (native) starting...");

    if let Err(e) = headless::run() {
        eprintln!("geometry-jumper: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
