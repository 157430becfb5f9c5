//! Canvas rendering module
//!
//! Draws a `Snapshot` with the 2D canvas API. No game logic lives here.

pub mod canvas;

pub use canvas::CanvasRenderer;
