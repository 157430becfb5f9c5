//! Gesture Dino - a side-scrolling runner controlled by hand gestures
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (phases, physics, obstacles, collisions)
//! - `input`: Classifier output -> discrete action resolution
//! - `platform`: Tick sources (animation frame / fixed step)
//! - `renderer`: 2D canvas render sink (wasm only)
//! - `ui`: Status and overlay text per phase

pub mod error;
pub mod input;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::StartupError;
pub use input::{Action, InputResolver, LabelSet, Prediction};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;
    /// Gap between the ground line and the bottom of the canvas
    pub const GROUND_MARGIN: f32 = 10.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;

    /// Dino defaults
    pub const DINO_X: f32 = 50.0;
    pub const DINO_WIDTH: f32 = 40.0;
    pub const DINO_HEIGHT: f32 = 60.0;
    pub const JUMP_FORCE: f32 = 20.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 50.0;

    /// Horizontal scroll speed at the start of every round (pixels/tick)
    pub const BASE_GAME_SPEED: f32 = 3.0;
    /// Speed gained per cleared obstacle
    pub const SPEED_STEP: f32 = 0.05;

    /// Ticks between spawns when the page first loads
    pub const INITIAL_SPAWN_INTERVAL: f32 = 240.0;
    /// Spawn interval shrink per spawned obstacle
    pub const SPAWN_INTERVAL_STEP: f32 = 0.1;
    /// Spawn interval never drops below this
    pub const MIN_SPAWN_INTERVAL: f32 = 30.0;

    /// Classifier confidence an action must strictly exceed
    pub const ACTION_THRESHOLD: f32 = 0.8;

    /// Real-time delay between the tutorial jump and the ready screen
    pub const TUTORIAL_JUMP_DELAY_MS: f64 = 1000.0;
}

/// Y coordinate that places an entity of `height` on the ground line
#[inline]
pub fn ground_y(canvas_height: f32, height: f32) -> f32 {
    canvas_height - height - consts::GROUND_MARGIN
}
