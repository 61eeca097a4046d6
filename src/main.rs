//! Road Skater entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

    use road_skater::audio::{AudioManager, SoundEffect};
    use road_skater::game::{Game, SessionPhase};
    use road_skater::persistence::LocalStorage;
    use road_skater::platform::{FrameClock, Key, KeyboardState};
    use road_skater::renderer::{RenderState, SKATER, Scene, Sprite};
    use road_skater::sim::GameEvent;

    /// Frame clock backed by requestAnimationFrame.
    ///
    /// Clones share state, so the game owns one handle and the host keeps
    /// another to re-arm the callback chain.
    #[derive(Clone, Default)]
    struct AnimationFrameClock {
        active: Rc<Cell<bool>>,
        /// A frame request is outstanding
        pending: Rc<Cell<bool>>,
        callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    }

    impl AnimationFrameClock {
        fn install(&self, callback: Closure<dyn FnMut(f64)>) {
            *self.callback.borrow_mut() = Some(callback);
        }

        fn schedule(&self) {
            if self.pending.get() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(callback) = self.callback.borrow().as_ref() {
                if window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .is_ok()
                {
                    self.pending.set(true);
                }
            }
        }

        fn frame_started(&self) {
            self.pending.set(false);
        }
    }

    impl FrameClock for AnimationFrameClock {
        fn start(&mut self) {
            self.active.set(true);
            self.schedule();
        }

        fn stop(&mut self) {
            self.active.set(false);
        }

        fn is_running(&self) -> bool {
            self.active.get()
        }
    }

    /// Host-side state around the game controller
    struct App {
        game: Game<AnimationFrameClock, LocalStorage>,
        clock: AnimationFrameClock,
        render_state: Option<RenderState>,
        sprite: Option<Sprite>,
        keys: KeyboardState,
        audio: AudioManager,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let clock = AnimationFrameClock::default();
            let mut game = Game::new(clock.clone(), LocalStorage, seed);

            let sprite = match Sprite::parse(SKATER) {
                Ok(sprite) => {
                    game.fit_player_sprite(sprite.aspect());
                    Some(sprite)
                }
                Err(e) => {
                    log::warn!("Skater sprite unavailable ({}), using placeholder", e);
                    None
                }
            };

            let mut audio = AudioManager::new();
            audio.set_volume(game.settings().effective_volume());

            Self {
                game,
                clock,
                render_state: None,
                sprite,
                keys: KeyboardState::new(),
                audio,
            }
        }

        /// One animation frame: tick, cues, draw, HUD
        fn frame(&mut self) {
            self.clock.frame_started();

            let input = self.keys.take_tick_input();
            self.game.frame(&input);
            self.dispatch_events();
            self.render();
            self.update_hud();

            if self.game.clock().is_running() {
                self.clock.schedule();
            }
        }

        fn dispatch_events(&mut self) {
            for event in self.game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if let GameEvent::RoundOver { score, best } = event {
                    show_round_result(score, best);
                    show_ranking(&self.game);
                }
            }
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = Scene::build(self.game.world()).tessellate(self.sprite.as_ref());
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (width, height) = render_state.size;
                    render_state.resize(width, height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Score display and panel visibility
        fn update_hud(&self) {
            let Some(document) = document() else { return };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.game.world().score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("top-score") {
                let top = self.game.ranking().top_score();
                el.set_text_content(top.map(|t| format!("Top {}", t)).as_deref());
            }

            let phase = self.game.phase();
            set_visible(&document, "menu", phase == SessionPhase::Menu);
            set_visible(&document, "game-over", phase == SessionPhase::GameOver);
        }

        /// Start from the menu form values
        fn start_from_form(&mut self) {
            let (difficulty, name) = read_form();
            if self.game.start_from_selection(&difficulty, &name) {
                self.keys.discard_jump();
                self.update_hud();
            }
        }

        /// Flip mute and remember it
        fn toggle_mute(&mut self) {
            let settings = self.game.settings();
            let (volume, muted) = (settings.master_volume, !settings.muted);
            self.game.set_volume(volume, muted);
            self.audio.set_volume(self.game.settings().effective_volume());
            log::info!("Sound {}", if muted { "off" } else { "on" });
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "panel" } else { "panel hidden" });
        }
    }

    /// (difficulty, player name) as typed in the menu
    fn read_form() -> (String, String) {
        let Some(document) = document() else {
            return (String::new(), String::new());
        };
        let difficulty = document
            .get_element_by_id("difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|el| el.value())
            .unwrap_or_default();
        let name = document
            .get_element_by_id("player-name")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|el| el.value())
            .unwrap_or_default();
        (difficulty, name)
    }

    /// Pre-fill the menu with the remembered choices
    fn fill_form(game: &Game<AnimationFrameClock, LocalStorage>) {
        let Some(document) = document() else { return };
        if let Some(el) = document
            .get_element_by_id("difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            el.set_value(game.settings().difficulty.as_str());
        }
        if let Some(el) = document
            .get_element_by_id("player-name")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            el.set_value(&game.settings().player_name);
        }
    }

    fn show_round_result(score: u32, best: u32) {
        let Some(document) = document() else { return };
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&format!("Score: {}", score)));
        }
        if let Some(el) = document.get_element_by_id("best-score") {
            el.set_text_content(Some(&format!("Best: {}", best)));
        }
    }

    fn show_ranking(game: &Game<AnimationFrameClock, LocalStorage>) {
        let Some(document) = document() else { return };
        let Some(list) = document.get_element_by_id("ranking") else {
            return;
        };
        list.set_text_content(None);
        for line in game.ranking().display_lines() {
            if let Ok(row) = document.create_element("div") {
                row.set_text_content(Some(&line));
                let _ = list.append_child(&row);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Road Skater starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Frame callback chain
        {
            let frame_app = app.clone();
            let clock = app.borrow().clock.clone();
            clock.install(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                frame_app.borrow_mut().frame();
            }));
        }

        setup_input_handlers(app.clone());
        setup_buttons(app.clone());
        {
            let app = app.borrow();
            fill_form(&app.game);
            show_ranking(&app.game);
            app.update_hud();
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
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
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => {
                let mut app = app.borrow_mut();
                app.render_state = Some(render_state);
                // Road behind the menu
                app.render();
            }
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        log::info!("Road Skater ready!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_key_name(&event.key()) else {
                    return;
                };
                let mut app = app.borrow_mut();
                let phase = app.game.phase();
                match key {
                    Key::Confirm => {
                        if phase == SessionPhase::Menu {
                            app.start_from_form();
                        }
                    }
                    Key::Mute => {
                        if !event.repeat() {
                            app.toggle_mute();
                        }
                    }
                    _ => {
                        // Keep arrows/space from scrolling the page mid-run
                        if phase == SessionPhase::Running {
                            event.prevent_default();
                        }
                        app.keys.key_down(key);
                        if phase != SessionPhase::Running {
                            app.keys.discard_jump();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_key_name(&event.key()) {
                    app.borrow_mut().keys.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().keys.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_click("start-btn", move |_| app.borrow_mut().start_from_form());
        }

        {
            let app = app.clone();
            on_click("retry-btn", move |_| {
                let mut app = app.borrow_mut();
                if app.game.retry() {
                    app.keys.discard_jump();
                    app.update_hud();
                }
            });
        }

        {
            let app = app.clone();
            on_click("menu-btn", move |_| {
                let mut app = app.borrow_mut();
                app.game.back_to_menu();
                app.update_hud();
            });
        }

        on_click("clear-btn", move |_| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Clear the whole ranking?").ok())
                .unwrap_or(false);
            if confirmed {
                let mut app = app.borrow_mut();
                app.game.clear_ranking();
                show_ranking(&app.game);
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use road_skater::game::{Game, SessionPhase};
    use road_skater::persistence::MemoryStorage;
    use road_skater::platform::ManualClock;
    use road_skater::renderer::{SKATER, Sprite};
    use road_skater::settings::Difficulty;
    use road_skater::sim::TickInput;

    env_logger::init();
    log::info!("Road Skater (native) starting...");
    log::info!("Native mode runs headless rounds - build for wasm32 to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut game = Game::new(ManualClock::new(), MemoryStorage::new(), seed);
    match Sprite::parse(SKATER) {
        Ok(sprite) => game.fit_player_sprite(sprite.aspect()),
        Err(e) => log::warn!("Skater sprite unavailable ({})", e),
    }

    const ROUNDS: u32 = 3;
    const MAX_FRAMES: u32 = 100_000;

    game.start(Difficulty::Medium, "Headless");
    loop {
        // Standing still in the middle of the road ends sooner or later
        let mut frames = 0u32;
        while game.phase() == SessionPhase::Running && frames < MAX_FRAMES {
            game.frame(&TickInput::default());
            frames += 1;
        }
        if game.phase() == SessionPhase::Running {
            log::warn!("Round still running after {} frames, giving up", frames);
            break;
        }

        let round_no = game.clock().starts;
        if let Some(round) = game.last_round() {
            println!(
                "Round {}: {} scored {} after {} frames (best {})",
                round_no, round.name, round.score, frames, round.best
            );
        }
        if round_no >= ROUNDS {
            break;
        }
        game.retry();
    }

    for line in game.ranking().display_lines() {
        println!("{}", line);
    }
    if let Some(top) = game.ranking().top_score() {
        println!("Top score: {}", top);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
