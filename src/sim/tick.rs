//! Per-frame simulation tick
//!
//! One call per animation frame: apply the pending action, fire any due
//! deferred transition, run physics, and route the collision to the state
//! machine.

use super::state::{GameEvent, GamePhase, GameSession};
use crate::input::Action;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Action resolved since the last tick (one-shot)
    pub action: Option<Action>,
    /// Wall-clock time in milliseconds
    pub now_ms: f64,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    if let Some(action) = input.action {
        session.handle_action(action, input.now_ms);
    }

    session.fire_due_transition(input.now_ms);

    // Dino physics run in every phase
    session.step_dino();

    if session.phase == GamePhase::Playing {
        let report = session.advance_obstacles();
        if let Some(obstacle_id) = report.collision {
            session.emit(GameEvent::Collision { obstacle_id });
            session.game_over();
        }
    }
}
