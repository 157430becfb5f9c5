//! Status and overlay text
//!
//! What each phase tells the player. The render sink decides where and how
//! to draw it.

use crate::sim::{GamePhase, Snapshot};

/// Status line shown outside the canvas on every phase change
pub fn status_text(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Loading => "Loading gesture model...",
        GamePhase::TutorialStart => "Tutorial: follow the instructions on screen.",
        GamePhase::TutorialJump => "Tutorial: time to jump!",
        GamePhase::TutorialReady => "Tutorial complete! Let's play.",
        GamePhase::Playing => "Game in progress!",
        GamePhase::GameOver => "Game over! Show the start gesture to try again.",
    }
}

/// Status line for a failed startup
pub fn startup_error_text(reason: &str) -> String {
    format!("Could not start: {reason}")
}

/// Text emphasis for overlay lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Headline,
    Body,
}

impl TextStyle {
    /// Font size in CSS pixels
    pub fn size_px(&self) -> u32 {
        match self {
            TextStyle::Title => 30,
            TextStyle::Headline => 24,
            TextStyle::Body => 20,
        }
    }
}

/// One centered line of overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub text: String,
    pub style: TextStyle,
    /// Baseline in canvas pixels
    pub y: f32,
}

fn line(text: impl Into<String>, style: TextStyle, y: f32) -> OverlayLine {
    OverlayLine {
        text: text.into(),
        style,
        y,
    }
}

/// Centered instruction text for the current phase
pub fn overlay_lines(snapshot: &Snapshot) -> Vec<OverlayLine> {
    match snapshot.phase {
        GamePhase::Loading | GamePhase::Playing => Vec::new(),
        GamePhase::TutorialStart => vec![
            line("TUTORIAL", TextStyle::Headline, 80.0),
            line("Open your hand to begin", TextStyle::Body, 120.0),
        ],
        GamePhase::TutorialJump => vec![
            line("TUTORIAL", TextStyle::Headline, 80.0),
            line("Point UP to jump", TextStyle::Body, 120.0),
        ],
        GamePhase::TutorialReady => vec![
            line("All set!", TextStyle::Headline, 80.0),
            line("Open your hand to start the game", TextStyle::Body, 120.0),
        ],
        GamePhase::GameOver => vec![
            line("Game Over!", TextStyle::Title, 100.0),
            line("Open your hand to try again", TextStyle::Body, 140.0),
            line(format!("Score: {}", snapshot.score), TextStyle::Body, 180.0),
        ],
    }
}

/// Score counter shown in the corner while playing
pub fn score_text(snapshot: &Snapshot) -> Option<String> {
    (snapshot.phase == GamePhase::Playing).then(|| format!("Score: {}", snapshot.score))
}

/// "Action: <label>" footer, always shown
pub fn last_action_text(label: &str) -> String {
    format!("Action: {label}")
}
