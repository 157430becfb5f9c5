//! Game settings
//!
//! Persisted in LocalStorage so a page can point at a different model or
//! retune the gesture threshold without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::{ACTION_THRESHOLD, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::input::{InputResolver, LabelSet};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Classifier ===
    /// Directory holding `model.json` and `metadata.json`
    pub model_url: String,
    /// Class names for each gesture
    pub labels: LabelSet,
    /// Confidence a gesture must strictly exceed
    pub threshold: f32,

    // === Camera ===
    /// Webcam capture size (square)
    pub webcam_size: u32,
    /// Mirror the webcam preview
    pub webcam_flip: bool,

    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === HUD ===
    /// Show per-class probabilities next to the camera preview
    pub show_probabilities: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_url: "./model/".to_string(),
            labels: LabelSet::default(),
            threshold: ACTION_THRESHOLD,
            webcam_size: 200,
            webcam_flip: true,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            show_probabilities: true,
        }
    }
}

impl Settings {
    /// Build the input resolver these settings describe
    pub fn resolver(&self) -> InputResolver {
        InputResolver::new(self.labels.clone(), self.threshold.clamp(0.0, 1.0))
    }

    /// Parse settings JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "gesture_dino_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: settings come from `GESTURE_DINO_SETTINGS` (JSON) if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        std::env::var(Self::STORAGE_KEY.to_uppercase())
            .ok()
            .and_then(|json| Self::from_json(&json))
            .unwrap_or_default()
    }
}
