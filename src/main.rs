//! Canvas Pong entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent};

    use canvas_pong::consts::{HEIGHT, WIDTH};
    use canvas_pong::platform;
    use canvas_pong::renderer::{RenderError, RenderState};
    use canvas_pong::sim::{MatchState, Winner, on_pointer_move, step};

    /// End-of-match overlay, built once and attached only between matches
    struct GameOverOverlay {
        container: Element,
        title: Element,
        button: Element,
    }

    impl GameOverOverlay {
        fn new(document: &Document) -> Result<Self, JsValue> {
            let container = document.create_element("div")?;
            container.set_class_name("game-over-container");

            let title = document.create_element("h1")?;
            let button = document.create_element("button")?;
            button.set_text_content(Some("Play Again"));

            container.append_child(&title)?;
            container.append_child(&button)?;
            Ok(Self {
                container,
                title,
                button,
            })
        }
    }

    /// Game instance holding all state
    struct Game {
        state: MatchState,
        render_state: Option<RenderState>,
        document: Document,
        canvas: HtmlCanvasElement,
        overlay: Option<GameOverOverlay>,
        overlay_shown: bool,
    }

    impl Game {
        /// Run one simulation step and draw it. Returns the winner on the
        /// frame that ends the match.
        fn frame(&mut self) -> Option<Winner> {
            let outcome = step(&mut self.state);
            for event in &outcome.events {
                log::debug!("{:?}", event);
            }

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&outcome.snapshot) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            outcome.winner
        }

        /// Show the "<winner> Wins!" overlay, then hide the playfield.
        /// The canvas stays visible if the overlay can't be attached.
        fn show_game_over(&mut self, winner: Winner) {
            let Some(ref overlay) = self.overlay else {
                log::error!("{} wins, but there is no overlay to show", winner.as_str());
                return;
            };
            overlay
                .title
                .set_text_content(Some(&format!("{} Wins!", winner.as_str())));

            let attached = self
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))
                .and_then(|body| body.append_child(&overlay.container));
            match attached {
                Ok(_) => {
                    self.canvas.set_hidden(true);
                    self.overlay_shown = true;
                }
                Err(e) => log::error!("Failed to show game over overlay: {:?}", e),
            }
        }

        fn dismiss_game_over(&mut self) {
            if self.overlay_shown {
                if let Some(ref overlay) = self.overlay {
                    overlay.container.remove();
                }
                self.overlay_shown = false;
            }
            self.canvas.set_hidden(false);
        }
    }

    /// One click listener for the lifetime of the page
    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let button = match game.borrow().overlay {
            Some(ref overlay) => overlay.button.clone(),
            None => return,
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            start_match(game.clone());
        });
        if let Err(e) =
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to wire restart button: {:?}", e);
        }
        closure.forget();
    }

    /// Start (or restart) a match and kick off the frame loop
    fn start_match(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.state.is_running() {
                return;
            }
            let start = g.state.start_new_match();
            if start.dismiss_overlay {
                g.dismiss_game_over();
            }
        }
        request_animation_frame(game);
    }

    async fn init_renderer(canvas: &HtmlCanvasElement) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, canvas.width(), canvas.height()).await
    }

    fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(WIDTH as u32);
        canvas.set_height(HEIGHT as u32);
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&canvas)?;
        Ok(canvas)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Canvas Pong starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let canvas = match create_canvas(&document) {
            Ok(canvas) => canvas,
            Err(e) => {
                log::error!("Failed to create canvas: {:?}", e);
                return;
            }
        };

        let device = platform::detect_device_class();
        let state = MatchState::for_device(device);

        let render_state = match init_renderer(&canvas).await {
            Ok(rs) => Some(rs),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };

        let overlay = match GameOverOverlay::new(&document) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::error!("Failed to build game over overlay: {:?}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            state,
            render_state,
            document,
            canvas: canvas.clone(),
            overlay,
            overlay_shown: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        start_match(game);

        log::info!("Canvas Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let left = platform::playfield_left(&canvas_clone);
            let mut g = game.borrow_mut();
            on_pointer_move(&mut g.state, event.client_x() as f32, left);
            let _ = canvas_clone.style().set_property("cursor", "none");
        });
        let _ =
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let winner = {
            let mut g = game.borrow_mut();
            if !g.state.is_running() {
                return;
            }
            g.frame()
        };

        match winner {
            Some(winner) => game.borrow_mut().show_game_over(winner),
            None => request_animation_frame(game),
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
    log::info!("Canvas Pong (native) starting...");
    log::info!("Native mode runs a headless match - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless match with a scripted pointer standing in for the player
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use canvas_pong::consts::PADDLE_DIFF;
    use canvas_pong::platform;
    use canvas_pong::sim::{MatchEvent, MatchState, on_pointer_move, step};

    /// Pixels per frame the scripted hand can move
    const HAND_SPEED: f32 = 4.0;
    /// Give up after this many frames (about 30 minutes at 60 fps)
    const MAX_FRAMES: u64 = 60 * 60 * 30;

    pub fn run() {
        let device = platform::detect_device_class();
        let mut state = MatchState::for_device(device);
        state.start_new_match();

        // Pointer in playfield coordinates, starts over the paddle center
        let mut pointer = state.bottom.x + PADDLE_DIFF;
        let mut frames = 0u64;
        let mut rallies = 0u32;

        let winner = loop {
            if frames >= MAX_FRAMES {
                break None;
            }
            frames += 1;

            let delta = (state.ball.pos.x - pointer).clamp(-HAND_SPEED, HAND_SPEED);
            pointer += delta;
            on_pointer_move(&mut state, pointer, 0.0);

            let outcome = step(&mut state);
            for event in &outcome.events {
                match event {
                    MatchEvent::PaddleHit { .. } => rallies += 1,
                    MatchEvent::Goal { scorer } => log::info!(
                        "{:?} scores after {} hits: {}-{}",
                        scorer,
                        rallies,
                        state.player_score,
                        state.computer_score
                    ),
                    other => log::debug!("{:?}", other),
                }
                if matches!(event, MatchEvent::Goal { .. }) {
                    rallies = 0;
                }
            }

            if outcome.winner.is_some() {
                break outcome.winner;
            }
        };

        match winner {
            Some(winner) => println!("{} Wins! ({} frames)", winner.as_str(), frames),
            None => println!("No winner after {} frames", frames),
        }

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize final snapshot: {}", e),
        }
    }
}
