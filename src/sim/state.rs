//! Game session and core simulation types
//!
//! One `GameSession` owns everything a running game needs. Hosts pass it
//! explicitly to `tick`; there is no ambient state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::ground_y;
use crate::input::Action;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the classifier and camera
    Loading,
    /// Tutorial: show the start gesture
    TutorialStart,
    /// Tutorial: show the jump gesture
    TutorialJump,
    /// Tutorial done, waiting for the start gesture
    TutorialReady,
    /// Active round
    Playing,
    /// Round ended by a collision
    GameOver,
}

/// The player character. Only vertical motion is simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dino {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub dy: f32,
    /// Resting on the ground line
    pub grounded: bool,
}

impl Dino {
    /// A dino standing on the ground of a canvas `canvas_height` tall
    pub fn new(canvas_height: f32) -> Self {
        Self {
            pos: Vec2::new(DINO_X, ground_y(canvas_height, DINO_HEIGHT)),
            size: Vec2::new(DINO_WIDTH, DINO_HEIGHT),
            dy: 0.0,
            grounded: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A ground obstacle scrolling toward the dino
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    Jumped,
    ObstacleSpawned { id: u32 },
    ObstacleCleared { score: u32 },
    Collision { obstacle_id: u32 },
}

/// A phase change scheduled for a wall-clock time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTransition {
    pub token: u64,
    pub to: GamePhase,
    pub due_ms: f64,
}

/// Read-only view handed to the render sink each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub dino: Rect,
    pub obstacles: Vec<Rect>,
    pub score: u32,
    pub last_action: Action,
    pub game_speed: f32,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed for obstacle heights
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Canvas size in pixels
    pub canvas: Vec2,
    pub dino: Dino,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Obstacles cleared this round
    pub score: u32,
    /// Scroll speed (pixels/tick); grows with every cleared obstacle
    pub game_speed: f32,
    /// Ticks between spawns; shrinks with every spawn and survives restarts
    pub spawn_interval: f32,
    /// Ticks since the last spawn
    pub obstacle_timer: u32,
    /// Most recent resolved action, for display
    pub last_action: Action,
    /// Why startup failed, if it did
    pub startup_error: Option<String>,
    pub(crate) pending: Option<PendingTransition>,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_token: u64,
    next_id: u32,
}

impl GameSession {
    /// Create a session on the default canvas
    pub fn new(seed: u64) -> Self {
        Self::with_canvas(seed, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn with_canvas(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            phase: GamePhase::Loading,
            canvas: Vec2::new(width, height),
            dino: Dino::new(height),
            obstacles: Vec::new(),
            score: 0,
            game_speed: BASE_GAME_SPEED,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            obstacle_timer: 0,
            last_action: Action::Idle,
            startup_error: None,
            pending: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_token: 1,
            next_id: 1,
        }
    }

    /// Ground line for the dino's top edge
    pub fn dino_ground_y(&self) -> f32 {
        ground_y(self.canvas.y, self.dino.size.y)
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn next_timer_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    /// Pending deferred transition, if any
    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.pending
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch phase. Any pending deferred transition is invalidated.
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        if let Some(p) = self.pending.take() {
            log::debug!("Cancelled deferred transition #{} to {:?}", p.token, p.to);
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            dino: self.dino.rect(),
            obstacles: self.obstacles.iter().map(|o| o.rect).collect(),
            score: self.score,
            last_action: self.last_action,
            game_speed: self.game_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new(7);
        assert_eq!(session.phase, GamePhase::Loading);
        assert_eq!(session.score, 0);
        assert_eq!(session.game_speed, BASE_GAME_SPEED);
        assert_eq!(session.spawn_interval, INITIAL_SPAWN_INTERVAL);
        assert!(session.obstacles.is_empty());
        assert!(session.dino.grounded);
        assert_eq!(session.dino.pos.y, session.dino_ground_y());
        assert_eq!(session.dino_ground_y(), CANVAS_HEIGHT - DINO_HEIGHT - GROUND_MARGIN);
    }

    #[test]
    fn test_phase_change_emits_event_and_cancels_timer() {
        let mut session = GameSession::new(7);
        session.pending = Some(PendingTransition {
            token: 1,
            to: GamePhase::TutorialReady,
            due_ms: 1000.0,
        });
        session.set_phase(GamePhase::TutorialStart);
        assert!(session.pending_transition().is_none());
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Loading,
                to: GamePhase::TutorialStart
            }]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(7);
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Loading\""));
        assert!(json.contains("\"last_action\":\"Idle\""));
    }
}
