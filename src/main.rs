//! Eating Simulator entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent};

    use eating_sim::audio::AudioManager;
    use eating_sim::consts::*;
    use eating_sim::poll::{VotePoll, format_percent};
    use eating_sim::renderer::{CanvasRenderer, SceneOptions, scene};
    use eating_sim::sim::{GameEvent, GameMode, Hud, Session, SessionSummary, TickInput, tick};
    use eating_sim::{Settings, Tuning};

    const TITLE: &str = "Eating Simulator";

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f64,
        last_time: f64,
        /// Next key press becomes the swing key
        rebinding: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                session: Session::new(Tuning::load(), seed),
                renderer: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                rebinding: false,
            }
        }

        /// Run fixed animation steps for the elapsed time
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).min(100.0)
            } else {
                FRAME_MS
            };
            self.last_time = time;
            self.accumulator += dt;

            let input = TickInput::default();
            let mut substeps = 0;
            while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
                tick(&mut self.session, &input, time);
                self.accumulator -= FRAME_MS;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            if let Some(renderer) = &self.renderer {
                let opts = SceneOptions {
                    flashes: self.settings.flashes_enabled(),
                    show_strike_zone: self.settings.show_strike_zone,
                };
                renderer.draw(&scene(self.session.state(), time, opts));
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn performance_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(id: &str, display: &str) {
        let el = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(el) = el {
            let _ = el.style().set_property("display", display);
        }
    }

    fn on_click(id: &str, handler: impl FnMut() + 'static) {
        if let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) {
            let closure = Closure::<dyn FnMut()>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn update_hud(hud: Hud) {
        set_text("scoreValue", &hud.score.to_string());
        set_text("timerValue", &hud.time.to_string());
    }

    /// React to everything the session reported since the last frame
    fn handle_events(game: &Rc<RefCell<Game>>) {
        let events = game.borrow_mut().session.drain_events();
        for event in events {
            match event {
                GameEvent::SessionStarted(mode) => {
                    log::info!("{} mode started", mode.name());
                    set_display("startScreen", "none");
                }
                GameEvent::HudChanged(hud) => update_hud(hud),
                GameEvent::Eat(_) => game.borrow_mut().audio.play_eat(),
                GameEvent::SessionEnded(summary) => show_game_over(game.clone(), &summary),
                GameEvent::SessionQuit => show_start_screen(game.clone()),
                GameEvent::Spawned(_)
                | GameEvent::Missed { .. }
                | GameEvent::Penalty { .. }
                | GameEvent::SpeedUp { .. } => {}
            }
        }
    }

    fn show_start_screen(game: Rc<RefCell<Game>>) {
        let Some(screen) = document().and_then(|d| d.get_element_by_id("startScreen")) else {
            return;
        };
        let buttons: String = GameMode::all()
            .iter()
            .map(|m| format!("<button id=\"mode-{:?}\">{}</button>", m, m.name()))
            .collect();
        let key = game.borrow().settings.swing_key.clone();
        screen.set_inner_html(&format!(
            "<h1>{}</h1><div style=\"margin: 20px 0;\">{}</div>\
             <p>Choose a gamemode!<br>Press {} to take a big bite!</p>",
            TITLE, buttons, key
        ));
        set_display("startScreen", "block");

        for &mode in GameMode::all() {
            let game = game.clone();
            on_click(&format!("mode-{:?}", mode), move || {
                game.borrow_mut().session.start_session(mode, performance_now());
                handle_events(&game);
            });
        }
    }

    fn show_game_over(game: Rc<RefCell<Game>>, summary: &SessionSummary) {
        let Some(screen) = document().and_then(|d| d.get_element_by_id("startScreen")) else {
            return;
        };
        screen.set_inner_html(&format!(
            "<h1>{}</h1><p>Game Over ({})<br>Final score: {}</p>\
             <button id=\"backButton\">Back to Menu</button>",
            TITLE,
            summary.mode_name(),
            summary.score
        ));
        set_display("startScreen", "block");
        on_click("backButton", move || show_start_screen(game.clone()));
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("{} starting...", TITLE);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Settings::load())));

        let canvas = document()
            .and_then(|d| d.get_element_by_id("gameCanvas"))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        match canvas.as_ref().and_then(CanvasRenderer::new) {
            Some(renderer) => game.borrow_mut().renderer = Some(renderer),
            None => log::warn!("No #gameCanvas with a 2D context, rendering disabled"),
        }

        setup_input_handlers(game.clone());
        setup_exit_button(game.clone());
        setup_settings_controls(game.clone());
        on_click("trivia-submit", check_trivia);
        show_start_screen(game.clone());
        show_percentages(&VotePoll::load(VotePoll::GAME_OPTIONS, VotePoll::GAME_ANSWER));

        // Start game loop
        request_animation_frame(game);

        log::info!("{} running (seed {})", TITLE, seed);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow().rebinding {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.rebinding = false;
                if g.settings.rebind_swing(&event.code()) {
                    g.settings.save();
                }
                set_text("rebindKey", &format!("Swing key: {}", g.settings.swing_key));
                return;
            }
            let is_swing = game.borrow().settings.is_swing_key(&event.code());
            if !is_swing || !game.borrow().session.is_active() {
                return;
            }
            event.prevent_default();
            game.borrow_mut().session.swing(performance_now());
            handle_events(&game);
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Apply a settings change, persist it and refresh the audio volume
    fn change_settings(game: &Rc<RefCell<Game>>, change: impl FnOnce(&mut Settings) -> bool) -> bool {
        let mut g = game.borrow_mut();
        let on = change(&mut g.settings);
        g.settings.save();
        let volume = g.settings.effective_volume();
        g.audio.set_volume(volume);
        on
    }

    fn setup_settings_controls(game: Rc<RefCell<Game>>) {
        let label = |on: bool| if on { "on" } else { "off" };
        {
            let s = &game.borrow().settings;
            set_text("soundToggle", &format!("Sound: {}", label(s.sound)));
            set_text("motionToggle", &format!("Reduced motion: {}", label(s.reduced_motion)));
            set_text("zoneToggle", &format!("Strike zone: {}", label(s.show_strike_zone)));
            set_text("rebindKey", &format!("Swing key: {}", s.swing_key));
        }

        let g = game.clone();
        on_click("soundToggle", move || {
            let on = change_settings(&g, Settings::toggle_sound);
            set_text("soundToggle", &format!("Sound: {}", label(on)));
        });
        let g = game.clone();
        on_click("motionToggle", move || {
            let on = change_settings(&g, Settings::toggle_reduced_motion);
            set_text("motionToggle", &format!("Reduced motion: {}", label(on)));
        });
        let g = game.clone();
        on_click("zoneToggle", move || {
            let on = change_settings(&g, Settings::toggle_strike_zone);
            set_text("zoneToggle", &format!("Strike zone: {}", label(on)));
        });
        on_click("rebindKey", move || {
            game.borrow_mut().rebinding = true;
            set_text("rebindKey", "Press a key...");
        });
    }

    fn setup_exit_button(game: Rc<RefCell<Game>>) {
        on_click("exitButton", move || {
            game.borrow_mut().session.quit();
            handle_events(&game);
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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
            g.render(time);
        }
        handle_events(&game);

        request_animation_frame(game);
    }

    // === Trivia poll ===

    fn show_percentages(poll: &VotePoll) {
        let total = poll.total();
        for (option, pct) in poll.percentages() {
            set_text(&format!("percent-{}", option), &format_percent(pct, total));
        }
    }

    /// Submit the checked `game` radio button
    #[wasm_bindgen(js_name = checkTrivia)]
    pub fn check_trivia() {
        let choice = document()
            .and_then(|d| d.query_selector("input[name=\"game\"]:checked").ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value());

        let mut poll = VotePoll::load(VotePoll::GAME_OPTIONS, VotePoll::GAME_ANSWER);
        let verdict = poll.submit(choice.as_deref());
        if poll.save() {
            show_percentages(&poll);
        }
        set_text("trivia-result", &verdict.message());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
use eating_sim::sim::GameMode;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eating Simulator (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless autoplay demo, every mode unless one is named
    let modes: Vec<GameMode> = match std::env::args().nth(1) {
        Some(arg) => match GameMode::from_str(&arg) {
            Some(mode) => vec![mode],
            None => {
                log::error!("Unknown mode '{}'", arg);
                std::process::exit(2);
            }
        },
        None => GameMode::all().to_vec(),
    };

    println!("\nRunning autoplay demo...");
    for mode in modes {
        let summary = autoplay_demo(mode, 90_000.0);
        println!(
            "  {:<16} score {:>5}  misses {}",
            summary.mode_name(),
            summary.score,
            summary.misses
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Let the bot play a mode for up to `limit_ms` of simulated time
#[cfg(not(target_arch = "wasm32"))]
fn autoplay_demo(mode: GameMode, limit_ms: f64) -> eating_sim::sim::SessionSummary {
    use eating_sim::consts::FRAME_MS;
    use eating_sim::sim::{Session, TickInput, tick};

    let mut session = Session::new(eating_sim::Tuning::load(), 2024);
    session.start_session(mode, 0.0);
    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let mut now = 0.0;
    while session.is_active() && now < limit_ms {
        now += FRAME_MS;
        tick(&mut session, &input, now);
    }
    let summary = session.state().summary();
    session.quit();
    summary
}
