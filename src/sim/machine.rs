//! Phase transitions
//!
//! | Phase         | Trigger         | Next                          |
//! |---------------|-----------------|-------------------------------|
//! | Loading       | classifier ready| TutorialStart                 |
//! | TutorialStart | Start           | TutorialJump                  |
//! | TutorialJump  | Jump            | TutorialReady (1 s later)     |
//! | TutorialReady | Start           | Playing                       |
//! | Playing       | Jump            | Playing (dino jumps)          |
//! | Playing       | collision       | GameOver                      |
//! | GameOver      | Start           | Playing                       |
//!
//! Anything else is ignored.

use super::state::{GamePhase, GameSession, PendingTransition};
use crate::consts::*;
use crate::error::StartupError;
use crate::input::Action;

impl GameSession {
    /// Classifier and camera are up; enter the tutorial
    pub fn finish_loading(&mut self) {
        if self.phase != GamePhase::Loading {
            return;
        }
        if let Some(err) = &self.startup_error {
            log::warn!("Ignoring ready signal after failed startup: {}", err);
            return;
        }
        self.set_phase(GamePhase::TutorialStart);
    }

    /// Startup failed; stay in `Loading` and keep the reason for display
    pub fn startup_failed(&mut self, err: &StartupError) {
        log::error!("Startup failed: {}", err);
        self.startup_error = Some(err.to_string());
    }

    /// Apply a resolved action at wall-clock time `now_ms`
    pub fn handle_action(&mut self, action: Action, now_ms: f64) {
        self.last_action = action;

        match (self.phase, action) {
            (GamePhase::TutorialStart, Action::Start) => {
                self.set_phase(GamePhase::TutorialJump);
            }
            (GamePhase::TutorialJump, Action::Jump) => {
                self.jump();
                self.schedule(GamePhase::TutorialReady, now_ms + TUTORIAL_JUMP_DELAY_MS);
            }
            (GamePhase::TutorialReady, Action::Start) | (GamePhase::GameOver, Action::Start) => {
                self.start_game();
            }
            (GamePhase::Playing, Action::Jump) => {
                self.jump();
            }
            _ => {}
        }
    }

    /// Schedule a phase change. An already pending one keeps its deadline.
    fn schedule(&mut self, to: GamePhase, due_ms: f64) {
        if self.pending.is_some() {
            return;
        }
        let token = self.next_timer_token();
        log::debug!("Scheduled transition #{} to {:?} at {}ms", token, to, due_ms);
        self.pending = Some(PendingTransition { token, to, due_ms });
    }

    /// Fire the pending transition if its deadline has passed
    pub fn fire_due_transition(&mut self, now_ms: f64) -> bool {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                self.set_phase(p.to);
                true
            }
            _ => false,
        }
    }

    /// Begin a fresh round
    pub fn start_game(&mut self) {
        self.score = 0;
        self.obstacles.clear();
        self.game_speed = BASE_GAME_SPEED;
        self.obstacle_timer = 0;
        self.set_phase(GamePhase::Playing);
    }

    /// End the round; obstacles and dino are left where they are
    pub fn game_over(&mut self) {
        log::info!("Game over with score {}", self.score);
        self.set_phase(GamePhase::GameOver);
    }
}
