//! Ghost Runner entry point
//!
//! Web: canvas/keyboard/fetch glue driving the game loop.
//! Native: reads the best-run store and re-simulates the stored ghost.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent,
        Request, RequestInit, Response,
    };

    use ghost_runner::persistence::{Candidate, Standing, SubmitReply};
    use ghost_runner::{App, InputEvent, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        app: App,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        /// Draw the current run
        fn render(&self) {
            let Some(run) = self.app.run() else { return };
            let tuning = &self.app.tuning;
            let ctx = &self.ctx;

            ctx.set_fill_style_str("rgb(12, 16, 24)");
            ctx.fill_rect(0.0, 0.0, tuning.field_width as f64, tuning.field_height as f64);

            ctx.set_stroke_style_str("rgb(60, 60, 60)");
            ctx.set_line_width(2.0);
            ctx.begin_path();
            ctx.move_to(0.0, tuning.ground_y() as f64);
            ctx.line_to(tuning.field_width as f64, tuning.ground_y() as f64);
            ctx.stroke();

            ctx.set_fill_style_str("rgb(200, 220, 255)");
            for o in &run.obstacles {
                ctx.fill_rect(o.pos.x as f64, o.pos.y as f64, o.size.x as f64, o.size.y as f64);
            }

            if let Some(ghost) = run.ghost.as_ref().filter(|_| self.app.settings.show_ghost) {
                let a = &ghost.actor;
                ctx.set_fill_style_str("rgba(120, 200, 255, 0.47)");
                ctx.fill_rect(a.pos.x as f64, a.pos.y as f64, a.size.x as f64, a.size.y as f64);
            }

            let p = &run.player;
            ctx.set_fill_style_str("rgb(80, 255, 160)");
            ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size.x as f64, p.size.y as f64);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("{:.1}", self.app.score())));
            }
            update_best_labels(&self.app, document);
        }
    }

    fn update_best_labels(app: &App, document: &Document) {
        if let Some(el) = document.get_element_by_id("high") {
            el.set_text_content(Some(&app.best.score_label()));
        }
        if let Some(el) = document.get_element_by_id("ghostLabel") {
            el.set_text_content(Some(&app.best.ghost_label()));
        }
    }

    /// GET or POST JSON, returning the response body
    async fn fetch_json(url: &str, body: Option<&str>) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        match body {
            Some(body) => {
                opts.set_method("POST");
                opts.set_body(&JsValue::from_str(body));
            }
            None => opts.set_method("GET"),
        }
        let request = Request::new_with_str_and_init(url, &opts)?;
        if body.is_some() {
            request.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let text = JsFuture::from(response.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("response body is not text"))
    }

    async fn load_standing(url: &str) -> Option<Standing> {
        match fetch_json(url, None).await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(standing) => Some(standing),
                Err(e) => {
                    log::error!("Failed to parse highscore: {}", e);
                    None
                }
            },
            Err(e) => {
                log::error!("Failed to load highscore: {:?}", e);
                None
            }
        }
    }

    /// Fire-and-forget submission; the reply only refreshes the cached best
    fn submit(game: Rc<RefCell<Game>>, url: String, candidate: Candidate) {
        spawn_local(async move {
            let body = match serde_json::to_string(&candidate) {
                Ok(body) => body,
                Err(e) => {
                    log::error!("submit-highscore failed: {}", e);
                    return;
                }
            };
            let reply = match fetch_json(&url, Some(&body)).await {
                Ok(text) => serde_json::from_str::<SubmitReply>(&text)
                    .map_err(|e| JsValue::from_str(&e.to_string())),
                Err(e) => Err(e),
            };
            match reply {
                Ok(reply) => {
                    let mut g = game.borrow_mut();
                    g.app.apply_reply(&reply);
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        update_best_labels(&g.app, &document);
                    }
                    log::info!("Highscore submitted (updated: {})", reply.updated);
                }
                Err(e) => log::error!("submit-highscore failed: {:?}", e),
            }
        });
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ghost Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let tuning = Tuning::default();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(tuning.field_width as u32);
        canvas.set_height(tuning.field_height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let api_url = settings.api_url.clone();
        let mut app = App::new(settings, tuning);

        // Best run is read once up front; the first run starts with its ghost
        if let Some(standing) = load_standing(&api_url).await {
            app.apply_standing(&standing);
        }
        update_best_labels(&app, &document);

        let game = Rc::new(RefCell::new(Game { app, ctx }));

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_name_input(game.clone());

        request_animation_frame(game);

        log::info!("Ghost Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                " " | "ArrowUp" => {
                    event.prevent_default();
                    g.app.push_input(InputEvent::Jump);
                }
                "r" | "R" => g.app.push_input(InputEvent::Restart),
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().app.push_input(InputEvent::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_name_input(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(input) = document
            .get_element_by_id("playerName")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        input.set_value(&game.borrow().app.settings.player_name);

        let input_clone = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.app.settings.player_name = input_clone.value();
            g.app.settings.save();
        });
        let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let (pending, api_url) = {
            let mut g = game.borrow_mut();
            g.app.frame(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
            (g.app.take_outbox(), g.app.settings.api_url.clone())
        };

        for candidate in pending {
            submit(game.clone(), api_url.clone(), candidate);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ghost_runner::persistence::{HighscoreService, JsonFileRepository};
    use ghost_runner::sim::replay;
    use ghost_runner::{App, Settings, Tuning};

    /// Tick interval used for headless re-simulation (60 Hz)
    const REPLAY_TICK_MS: f64 = 1000.0 / 60.0;

    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("GHOST_RUNNER_DB").ok())
        .unwrap_or_else(|| "db.json".to_string());
    log::info!("Ghost Runner (native) reading {}", path);

    let store = HighscoreService::new(JsonFileRepository::new(&path));
    let mut app = App::new(Settings::load(), Tuning::default());
    if !app.refresh(&store) {
        eprintln!("Could not read {}", path);
        std::process::exit(1);
    }

    println!("Best: {}s", app.best.score_label());
    let Some(ghost) = app.best.ghost.as_ref() else {
        println!("No ghost recorded yet");
        return;
    };

    println!(
        "Ghost: {} (seed {}, {} jumps)",
        ghost.name,
        ghost.seed,
        ghost.jumps.len()
    );
    let horizon = app.best.score * 1000.0 + 60_000.0;
    let score = replay(ghost.seed, &ghost.jumps, REPLAY_TICK_MS, horizon, &app.tuning);
    println!("Replayed at 60 Hz: {:.1}s", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
