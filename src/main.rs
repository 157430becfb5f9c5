//! Gesture Dino entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use gesture_dino::platform::{AnimationFrameSource, TickSource};
    use gesture_dino::renderer::CanvasRenderer;
    use gesture_dino::sim::{GameEvent, GamePhase, GameSession, TickInput, tick};
    use gesture_dino::input::parse_predictions;
    use gesture_dino::{Action, InputResolver, Settings, StartupError, ui};

    // Teachable Machine bindings (tmImage is loaded by the page)
    #[wasm_bindgen(inline_js = "
        let model = null;
        let webcam = null;

        export async function load_classifier(base_url) {
            model = await tmImage.load(base_url + 'model.json', base_url + 'metadata.json');
            return JSON.stringify(model.getClassLabels());
        }

        export async function start_webcam(size, flip) {
            webcam = new tmImage.Webcam(size, size, flip);
            await webcam.setup();
            await webcam.play();
            const container = document.getElementById('webcam-container');
            if (container) {
                container.appendChild(webcam.canvas);
            }
        }

        export async function predict_frame() {
            webcam.update();
            const prediction = await model.predict(webcam.canvas);
            return JSON.stringify(prediction.map(p => ({
                label: p.className,
                probability: p.probability,
            })));
        }

        export function next_frame() {
            return new Promise(resolve => window.requestAnimationFrame(resolve));
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        async fn load_classifier(base_url: &str) -> Result<JsValue, JsValue>;
        #[wasm_bindgen(catch)]
        async fn start_webcam(size: u32, flip: bool) -> Result<JsValue, JsValue>;
        #[wasm_bindgen(catch)]
        async fn predict_frame() -> Result<JsValue, JsValue>;
        async fn next_frame() -> JsValue;
    }

    struct Game {
        session: GameSession,
        resolver: InputResolver,
        renderer: CanvasRenderer,
        /// Latest action resolved since the last tick
        pending_action: Option<Action>,
        show_probabilities: bool,
    }

    impl Game {
        /// Handle one classifier result (runs on the prediction task)
        fn on_predictions(&mut self, payload: &str) {
            let Some(predictions) = parse_predictions(payload) else {
                return;
            };

            if self.show_probabilities {
                set_text("label-container", &self.resolver.readout(&predictions).join("\n"));
            }

            if let Some(action) = self.resolver.resolve(&predictions) {
                self.pending_action = Some(action);
            }
        }

        /// Tick, publish status changes, and draw
        fn frame(&mut self, now_ms: f64) {
            let input = TickInput {
                action: self.pending_action.take(),
                now_ms,
            };
            tick(&mut self.session, &input);

            for event in self.session.drain_events() {
                match event {
                    GameEvent::PhaseChanged { to, .. } => set_text("status", ui::status_text(to)),
                    GameEvent::Collision { obstacle_id } => {
                        log::debug!("Hit obstacle #{}", obstacle_id)
                    }
                    _ => {}
                }
            }

            self.render();
        }

        fn render(&self) {
            let label = self.resolver.labels().label_for(self.session.last_action);
            self.renderer.render(&self.session.snapshot(), label);
        }
    }

    /// Update a DOM element's text
    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    fn js_error_text(e: &JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{:?}", e))
    }

    /// Load the model, check its classes, and start the camera
    async fn init_classifier(settings: &Settings) -> Result<(), StartupError> {
        let model_error = |reason: String| StartupError::ModelLoad {
            url: settings.model_url.clone(),
            reason,
        };

        let classes = load_classifier(&settings.model_url)
            .await
            .map_err(|e| model_error(js_error_text(&e)))?;
        let classes: Vec<String> = classes
            .as_string()
            .and_then(|json| serde_json::from_str(&json).ok())
            .ok_or_else(|| model_error("class list unreadable".to_string()))?;
        log::info!("Classifier classes: {:?}", classes);
        settings.labels.validate(classes.iter().map(String::as_str))?;

        start_webcam(settings.webcam_size, settings.webcam_flip)
            .await
            .map_err(|e| StartupError::Camera(js_error_text(&e)))?;
        Ok(())
    }

    /// Classifier cadence: one prediction per browser frame, independent of ticks
    async fn prediction_loop(game: Rc<RefCell<Game>>) {
        loop {
            next_frame().await;
            match predict_frame().await {
                Ok(value) => {
                    let payload = value.as_string().unwrap_or_default();
                    game.borrow_mut().on_predictions(&payload);
                }
                Err(e) => log::warn!("Prediction failed: {}", js_error_text(&e)),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gesture Dino starting...");

        let settings = Settings::load();
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(settings.canvas_width as u32);
        canvas.set_height(settings.canvas_height as u32);

        let renderer = match CanvasRenderer::new(&canvas) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Canvas unavailable: {}", js_error_text(&e));
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: GameSession::with_canvas(seed, settings.canvas_width, settings.canvas_height),
            resolver: settings.resolver(),
            renderer,
            pending_action: None,
            show_probabilities: settings.show_probabilities,
        }));
        log::info!("Game initialized with seed: {}", seed);

        set_text("status", ui::status_text(GamePhase::Loading));
        game.borrow().render();

        if let Err(err) = init_classifier(&settings).await {
            let mut g = game.borrow_mut();
            g.session.startup_failed(&err);
            set_text("status", &ui::startup_error_text(&err.to_string()));
            g.render();
            return;
        }

        game.borrow_mut().session.finish_loading();

        wasm_bindgen_futures::spawn_local(prediction_loop(game.clone()));

        let driven = game.clone();
        AnimationFrameSource.run(move |frame| driven.borrow_mut().frame(frame.now_ms));

        log::info!("Gesture Dino running!");
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
    log::info!("Gesture Dino (native) starting...");
    log::info!("Native mode plays scripted rounds headless - run with `trunk serve` for the web version");

    headless::run(3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted classifier feeding the real resolver and simulation
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gesture_dino::platform::{FixedStepSource, TickSource};
    use gesture_dino::sim::{GameEvent, GamePhase, GameSession, Snapshot, TickInput, tick};
    use gesture_dino::{InputResolver, Prediction, Settings, ui};

    struct Demo {
        session: GameSession,
        resolver: InputResolver,
        rounds_left: u32,
        scores: Vec<u32>,
    }

    /// What a player would show the camera for this snapshot
    fn scripted_gesture(snapshot: &Snapshot, settings: &Settings) -> Vec<Prediction> {
        let labels = &settings.labels;
        let confident = |label: &str| {
            vec![
                Prediction::new(labels.idle.clone(), 0.04),
                Prediction::new(label, 0.92),
            ]
        };

        match snapshot.phase {
            GamePhase::TutorialStart | GamePhase::TutorialReady | GamePhase::GameOver => {
                confident(&labels.start)
            }
            GamePhase::TutorialJump => confident(&labels.jump),
            GamePhase::Playing => {
                let dino_right = snapshot.dino.right();
                let incoming = snapshot
                    .obstacles
                    .iter()
                    .any(|o| (0.0..30.0).contains(&(o.left() - dino_right)));
                if incoming {
                    confident(&labels.jump)
                } else {
                    confident(&labels.idle)
                }
            }
            GamePhase::Loading => Vec::new(),
        }
    }

    pub fn run(rounds: u32) {
        let settings = Settings::load();
        let demo = Rc::new(RefCell::new(Demo {
            session: GameSession::with_canvas(42, settings.canvas_width, settings.canvas_height),
            resolver: settings.resolver(),
            rounds_left: rounds,
            scores: Vec::new(),
        }));
        demo.borrow_mut().session.finish_loading();

        let driven = demo.clone();
        FixedStepSource::new(60 * 60 * 5).run(move |frame| {
            let mut d = driven.borrow_mut();
            if d.rounds_left == 0 {
                return;
            }

            let gesture = scripted_gesture(&d.session.snapshot(), &settings);
            let action = d.resolver.resolve(&gesture);
            tick(&mut d.session, &TickInput { action, now_ms: frame.now_ms });

            for event in d.session.drain_events() {
                match event {
                    GameEvent::PhaseChanged { to, .. } => {
                        log::info!("[{:>6}] {}", frame.index, ui::status_text(to));
                        if to == GamePhase::GameOver {
                            let score = d.session.score;
                            d.scores.push(score);
                            d.rounds_left -= 1;
                        }
                    }
                    GameEvent::ObstacleCleared { score } => log::debug!("Cleared, score {}", score),
                    _ => {}
                }
            }
        });

        let demo = demo.borrow();
        println!("\nRounds played: {}", demo.scores.len());
        for (i, score) in demo.scores.iter().enumerate() {
            println!("  Round {}: {} obstacles cleared", i + 1, score);
        }
    }
}
