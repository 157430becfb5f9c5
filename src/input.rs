//! Gesture input resolution
//!
//! Turns the classifier's per-frame probability list into at most one action.
//! Resolution is pure: it never touches game state, so the state machine stays
//! synchronous no matter how predictions arrive.

use serde::{Deserialize, Serialize};

use crate::consts::ACTION_THRESHOLD;
use crate::error::StartupError;

/// Discrete action a gesture maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    /// Resting hand; displayed but has no effect
    #[default]
    Idle,
    Jump,
    Start,
}

/// One classifier output entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub probability: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Parse the browser-side classifier payload
/// (`[{"label": .., "probability": ..}, ..]`). Malformed payloads yield `None`.
pub fn parse_predictions(payload: &str) -> Option<Vec<Prediction>> {
    match serde_json::from_str(payload) {
        Ok(predictions) => Some(predictions),
        Err(e) => {
            log::warn!("Malformed classifier output: {}", e);
            None
        }
    }
}

/// Classifier class names for each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSet {
    pub idle: String,
    pub jump: String,
    pub start: String,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            idle: "clean".to_string(),
            jump: "pular".to_string(),
            start: "iniciar".to_string(),
        }
    }
}

impl LabelSet {
    /// Map a class name to its action
    pub fn action_for(&self, label: &str) -> Option<Action> {
        if label == self.jump {
            Some(Action::Jump)
        } else if label == self.start {
            Some(Action::Start)
        } else if label == self.idle {
            Some(Action::Idle)
        } else {
            None
        }
    }

    /// Class name for an action (used for the "last action" readout)
    pub fn label_for(&self, action: Action) -> &str {
        match action {
            Action::Idle => &self.idle,
            Action::Jump => &self.jump,
            Action::Start => &self.start,
        }
    }

    /// Check the classifier's class list against this set at startup.
    ///
    /// Every class must map to an action, and the jump and start gestures
    /// must both be present. The idle class is optional.
    pub fn validate<'a>(
        &self,
        classes: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), StartupError> {
        let mut has_jump = false;
        let mut has_start = false;
        for class in classes {
            match self.action_for(class) {
                Some(Action::Jump) => has_jump = true,
                Some(Action::Start) => has_start = true,
                Some(Action::Idle) => {}
                None => return Err(StartupError::UnknownLabel(class.to_string())),
            }
        }
        if !has_jump {
            return Err(StartupError::MissingLabel {
                role: "jump",
                label: self.jump.clone(),
            });
        }
        if !has_start {
            return Err(StartupError::MissingLabel {
                role: "start",
                label: self.start.clone(),
            });
        }
        Ok(())
    }
}

/// Thresholded argmax over classifier output
#[derive(Debug, Clone)]
pub struct InputResolver {
    labels: LabelSet,
    threshold: f32,
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new(LabelSet::default(), ACTION_THRESHOLD)
    }
}

impl InputResolver {
    pub fn new(labels: LabelSet, threshold: f32) -> Self {
        Self { labels, threshold }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Resolve one frame of predictions.
    ///
    /// The first entry holding the maximum probability wins. It is only
    /// accepted if that probability strictly exceeds the threshold. Entries
    /// with non-finite probabilities are skipped; an unknown winning label
    /// resolves to `None`.
    pub fn resolve(&self, predictions: &[Prediction]) -> Option<Action> {
        let mut best: Option<&Prediction> = None;
        for prediction in predictions {
            if !prediction.probability.is_finite() {
                log::debug!("Skipping non-finite probability for {:?}", prediction.label);
                continue;
            }
            if best.is_none_or(|b| prediction.probability > b.probability) {
                best = Some(prediction);
            }
        }

        let best = best?;
        if best.probability <= self.threshold {
            return None;
        }

        let action = self.labels.action_for(&best.label);
        if action.is_none() {
            log::warn!("Classifier produced unknown label {:?}", best.label);
        }
        action
    }

    /// Display lines for the label panel (`"pular: 0.93"`); the idle class is hidden
    pub fn readout(&self, predictions: &[Prediction]) -> Vec<String> {
        predictions
            .iter()
            .filter(|p| p.label != self.labels.idle)
            .map(|p| format!("{}: {:.2}", p.label, p.probability))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preds(entries: &[(&str, f32)]) -> Vec<Prediction> {
        entries.iter().map(|&(l, p)| Prediction::new(l, p)).collect()
    }

    #[test]
    fn test_confident_start_resolves() {
        let resolver = InputResolver::default();
        let p = preds(&[("clean", 0.05), ("pular", 0.05), ("iniciar", 0.9)]);
        assert_eq!(resolver.resolve(&p), Some(Action::Start));
    }

    #[test]
    fn test_threshold_is_strict() {
        let resolver = InputResolver::default();
        assert_eq!(resolver.resolve(&preds(&[("pular", 0.8)])), None);
        assert_eq!(resolver.resolve(&preds(&[("pular", 0.81)])), Some(Action::Jump));
    }

    #[test]
    fn test_low_confidence_is_no_action() {
        let resolver = InputResolver::default();
        let p = preds(&[("clean", 0.4), ("pular", 0.35), ("iniciar", 0.25)]);
        assert_eq!(resolver.resolve(&p), None);
    }

    #[test]
    fn test_idle_can_win() {
        let resolver = InputResolver::default();
        let p = preds(&[("clean", 0.95), ("pular", 0.05)]);
        assert_eq!(resolver.resolve(&p), Some(Action::Idle));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let resolver = InputResolver::new(LabelSet::default(), 0.4);
        let p = preds(&[("iniciar", 0.5), ("pular", 0.5)]);
        assert_eq!(resolver.resolve(&p), Some(Action::Start));
    }

    #[test]
    fn test_malformed_output_is_no_action() {
        let resolver = InputResolver::default();
        assert_eq!(resolver.resolve(&[]), None);
        assert_eq!(resolver.resolve(&preds(&[("pular", f32::NAN)])), None);
        assert_eq!(resolver.resolve(&preds(&[("wave", 0.99)])), None);
        assert_eq!(parse_predictions("not json"), None);
        assert_eq!(parse_predictions(r#"[{"label":"pular"}]"#), None);
        assert_eq!(resolver.resolve(&parse_predictions("[]").unwrap()), None);
    }

    #[test]
    fn test_nan_does_not_mask_valid_entry() {
        let resolver = InputResolver::default();
        let p = preds(&[("iniciar", f32::NAN), ("pular", 0.95)]);
        assert_eq!(resolver.resolve(&p), Some(Action::Jump));
    }

    #[test]
    fn test_parse_and_resolve_payload() {
        let resolver = InputResolver::default();
        let json = r#"[{"label":"clean","probability":0.01},{"label":"pular","probability":0.97}]"#;
        let predictions = parse_predictions(json).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(resolver.resolve(&predictions), Some(Action::Jump));
    }

    #[test]
    fn test_readout_hides_idle() {
        let resolver = InputResolver::default();
        let p = preds(&[("clean", 0.1), ("pular", 0.934), ("iniciar", 0.0)]);
        assert_eq!(resolver.readout(&p), vec!["pular: 0.93", "iniciar: 0.00"]);
    }

    #[test]
    fn test_validate_labels() {
        let labels = LabelSet::default();
        assert!(labels.validate(["clean", "pular", "iniciar"]).is_ok());
        assert!(labels.validate(["pular", "iniciar"]).is_ok());
        assert_eq!(
            labels.validate(["clean", "pular", "iniciar", "wave"]),
            Err(StartupError::UnknownLabel("wave".to_string()))
        );
        assert!(matches!(
            labels.validate(["clean", "iniciar"]),
            Err(StartupError::MissingLabel { role: "jump", .. })
        ));
    }
}
