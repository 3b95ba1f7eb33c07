//! Dino Run entry point
//!
//! Web: mounts the game on `#canvas` and drives it from requestAnimationFrame.
//! Native: plays a headless session with a simple autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use dino_run::consts::*;
    use dino_run::render::{DrawCommand, draw_list};
    use dino_run::{GameEngine, GameHost, Session, Settings, Tuning};

    /// Page-side callbacks: mirror the score into the DOM
    struct PageHost {
        document: web_sys::Document,
    }

    impl GameHost for PageHost {
        fn on_score_update(&mut self, score: u32) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn on_game_over(&mut self, final_score: u32) {
            log::info!("Game Over! Final Score: {}", final_score);
            if let Some(el) = self.document.get_element_by_id("final-score") {
                el.set_text_content(Some(&final_score.to_string()));
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        host: PageHost,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            if let Err(e) = self.session.frame(time, &mut self.host) {
                log::warn!("Frame rejected: {}", e);
            }
        }

        fn render(&self) {
            for command in draw_list(self.session.snapshot()) {
                match command {
                    DrawCommand::Rect {
                        x,
                        y,
                        width,
                        height,
                        color,
                    } => {
                        self.ctx.set_fill_style_str(color);
                        self.ctx
                            .fill_rect(x as f64, y as f64, width as f64, height as f64);
                    }
                    DrawCommand::Text {
                        x,
                        y,
                        text,
                        font,
                        align,
                        color,
                    } => {
                        self.ctx.set_fill_style_str(color);
                        self.ctx.set_font(font);
                        self.ctx.set_text_align(align.as_str());
                        let _ = self.ctx.fill_text(&text, x as f64, y as f64);
                    }
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let engine = GameEngine::with_seed(Tuning::default(), seed).expect("default tuning is valid");
        let mut host = PageHost {
            document: document.clone(),
        };
        let mut session = Session::new(engine);
        session.begin(&mut host).expect("fresh engine starts");

        let game = Rc::new(RefCell::new(Game {
            session,
            host,
            settings: Settings::load(),
            ctx,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Dino Run running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: jump / restart
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let g = &mut *game.borrow_mut();
                let action = g.settings.action_for_key(&event.code());
                if !action.is_none() {
                    // Keep Space/ArrowUp from scrolling the page
                    event.prevent_default();
                    g.session.handle_key(&event.code(), &g.settings);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (jump)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let g = &mut *game.borrow_mut();
                g.session.handle_touch(&g.settings);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        // Keep looping after game over so a restart key can resume play
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use dino_run::consts::*;
    use dino_run::{FrameStatus, GameEngine, GameHost, Session, Snapshot, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    /// Logs notifications instead of updating a page
    #[derive(Default)]
    struct LogHost {
        final_score: Option<u32>,
    }

    impl GameHost for LogHost {
        fn on_score_update(&mut self, score: u32) {
            if score % 50 == 0 {
                log::info!("Score: {}", score);
            } else {
                log::debug!("Score: {}", score);
            }
        }

        fn on_game_over(&mut self, final_score: u32) {
            log::info!("Game Over! Final Score: {}", final_score);
            self.final_score = Some(final_score);
        }
    }

    /// Jump when the nearest obstacle ahead is within a few frames' travel
    fn should_jump(snapshot: &Snapshot) -> bool {
        let front = CHARACTER_X + CHARACTER_WIDTH;
        snapshot
            .obstacles
            .iter()
            .map(|o| o.x - front)
            .filter(|&distance| distance >= 0.0)
            .any(|distance| distance <= snapshot.speed * 12.0)
    }

    /// `dino-run [seed] [tuning.json]`
    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(raw) => raw.parse::<u64>()?,
            None => 2024,
        };
        let tuning = match args.next() {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Tuning::default(),
        };

        log::info!("Dino Run (headless) starting with seed {}", seed);

        let mut host = LogHost::default();
        let mut session = Session::new(GameEngine::with_seed(tuning, seed)?);
        session.begin(&mut host)?;

        for frame in 0..MAX_FRAMES {
            let snapshot = session.snapshot();
            if !snapshot.is_airborne && should_jump(snapshot) {
                session.press_jump();
            }
            if let FrameStatus::GameOver { .. } = session.frame(frame as f64 * FRAME_MS, &mut host)? {
                break;
            }
        }

        match host.final_score {
            Some(score) => println!("Final score: {}", score),
            None => println!(
                "Survived {} frames, score {}",
                MAX_FRAMES,
                session.snapshot().score
            ),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
