//! Storm Dodge entry point
//!
//! Platform wiring: canvas and DOM on the web, a headless demo loop on
//! native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use storm_dodge::platform::LocalStorage;
    use storm_dodge::render::{Renderer, ScoreDisplay};
    use storm_dodge::sim::{Direction, Player, Raindrop};
    use storm_dodge::{Bounds, GameLoop, Phase};

    type Game = GameLoop<LocalStorage, CanvasRenderer, DomHud>;

    /// 2D-canvas renderer: an orange umbrella under sky-blue teardrops
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        bounds: Bounds,
    }

    impl CanvasRenderer {
        fn new(canvas: &HtmlCanvasElement) -> Self {
            let ctx = canvas
                .get_context("2d")
                .expect("2d context unavailable")
                .expect("2d context unavailable")
                .dyn_into::<CanvasRenderingContext2d>()
                .expect("not a 2d context");
            Self {
                ctx,
                bounds: Bounds {
                    width: canvas.width() as f32,
                    height: canvas.height() as f32,
                },
            }
        }

        fn draw_player(&self, player: &Player) {
            let ctx = &self.ctx;
            let cx = (player.pos.x + player.width / 2.0) as f64;
            let cy = (player.pos.y + player.height / 2.0) as f64;
            let canopy = (player.width / 1.2) as f64;

            ctx.save();
            let _ = ctx.translate(cx, cy);

            ctx.begin_path();
            let _ = ctx.arc(0.0, 0.0, canopy, PI, 2.0 * PI);
            ctx.set_fill_style_str("#f97316");
            ctx.fill();

            // Scalloped rim
            ctx.set_fill_style_str("#fb923c");
            for i in 0..4 {
                let angle = PI + i as f64 * PI / 4.0;
                ctx.begin_path();
                let _ = ctx.arc(
                    angle.cos() * canopy * 0.6,
                    angle.sin() * canopy * 0.4 + 3.0,
                    6.0,
                    0.0,
                    2.0 * PI,
                );
                ctx.fill();
            }

            // Handle with a hooked end
            ctx.set_stroke_style_str("#111827");
            ctx.set_line_width(4.0);
            ctx.begin_path();
            ctx.move_to(0.0, 0.0);
            ctx.line_to(0.0, 30.0);
            ctx.stroke();
            ctx.begin_path();
            let _ = ctx.arc_with_anticlockwise(6.0, 30.0, 6.0, PI / 2.0, 3.0 * PI / 2.0, true);
            ctx.stroke();

            ctx.restore();
        }

        fn draw_drop(&self, drop: &Raindrop) {
            let ctx = &self.ctx;
            let x = drop.pos.x as f64;
            let y = drop.pos.y as f64;
            let r = drop.radius as f64;
            ctx.begin_path();
            ctx.move_to(x + r, y);
            ctx.quadratic_curve_to(x + r * 1.5, y + r, x + r, y + r * 2.0);
            ctx.quadratic_curve_to(x, y + r, x + r, y);
            ctx.set_fill_style_str("#38bdf8");
            ctx.fill();
        }
    }

    impl Renderer for CanvasRenderer {
        fn draw(&mut self, player: &Player, drops: &[Raindrop]) {
            self.ctx.clear_rect(
                0.0,
                0.0,
                self.bounds.width as f64,
                self.bounds.height as f64,
            );
            self.draw_player(player);
            for drop in drops {
                self.draw_drop(drop);
            }
        }
    }

    /// Pushes scores into the page: #score, #bestScore and the game-over
    /// overlay
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_overlay_visible(&self, visible: bool) {
            if let Some(el) = self
                .document
                .get_element_by_id("overlay")
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            {
                let _ = el
                    .style()
                    .set_property("display", if visible { "flex" } else { "none" });
            }
        }
    }

    impl ScoreDisplay for DomHud {
        fn score_changed(&mut self, score: u32, best: u32) {
            self.set_text("score", &score.to_string());
            self.set_text("bestScore", &best.to_string());
        }

        fn game_over(&mut self, final_score: u32, _best: u32) {
            self.set_text("overlay-title", "Game Over");
            self.set_text(
                "overlay-message",
                &format!(
                    "You scored {} points. Can you dodge the storm even longer?",
                    final_score
                ),
            );
            self.set_text("startBtn", "Play Again");
            self.set_overlay_visible(true);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Storm Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no gameCanvas")
            .dyn_into()
            .expect("not a canvas");

        let bounds = Bounds {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        };

        let seed = js_sys::Date::now() as u64;
        let renderer = CanvasRenderer::new(&canvas);
        let hud = DomHud {
            document: document.clone(),
        };
        let game = Rc::new(RefCell::new(GameLoop::new(
            bounds,
            seed,
            LocalStorage::new(),
            renderer,
            hud,
        )));

        log::info!(
            "Canvas {}x{}, seed {}",
            bounds.width,
            bounds.height,
            seed
        );

        setup_key_handlers(game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_start_button(&document, game);

        log::info!("Storm Dodge ready");
    }

    fn key_direction(key: &str) -> Option<Direction> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    fn setup_key_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = key_direction(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().set_direction(direction, true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = key_direction(&event.key()) {
                    game.borrow_mut().set_direction(direction, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        bind_touch_button(document, "touch-left", Direction::Left, game.clone());
        bind_touch_button(document, "touch-right", Direction::Right, game);
    }

    fn bind_touch_button(
        document: &Document,
        id: &str,
        direction: Direction,
        game: Rc<RefCell<Game>>,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().set_direction(direction, true);
            });
            let _ =
                btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for release in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().set_direction(direction, false);
            });
            let _ = btn.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("startBtn") else {
            log::warn!("No startBtn element; game cannot be started");
            return;
        };

        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            // Put the intro text back for the next time the overlay shows
            if let Some(el) = document.get_element_by_id("overlay-title") {
                el.set_text_content(Some("Storm Dodge"));
            }
            if let Some(el) = document.get_element_by_id("overlay-message") {
                el.set_text_content(Some(
                    "Use the arrow keys to move the umbrella and dodge the raindrops.",
                ));
            }
            if let Some(el) = document
                .get_element_by_id("overlay")
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            {
                let _ = el.style().set_property("display", "none");
            }

            // Restarting mid-run must not stack a second rAF chain on the
            // one already going
            let was_running = game.borrow().phase() == Phase::Running;
            game.borrow_mut().start();
            if !was_running {
                request_animation_frame(game.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        let running = game.borrow_mut().frame(time);
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use storm_dodge::platform::MemoryStore;
    use storm_dodge::{Bounds, GameLoop};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };
    let mut game = GameLoop::new(bounds, seed, MemoryStore::new(), (), ());

    log::info!("Storm Dodge (headless) seed {}", seed);

    // Stationary umbrella, synthetic 60 Hz clock: run until a drop lands,
    // capped at ten simulated minutes
    game.start();
    let step = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut frames = 0u32;
    while game.frame(now) && frames < 60 * 600 {
        now += step;
        frames += 1;
    }

    println!(
        "Survived {:.1}s: score {}, {} drops on screen, best {}",
        now / 1000.0,
        game.session().score.display(),
        game.session().drops.len(),
        game.best_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main; this only satisfies the compiler
}
