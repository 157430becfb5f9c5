//! Dino motion and obstacle lifecycle
//!
//! Dino gravity runs every tick in every phase. Obstacles only spawn, move,
//! and score while a round is being played.

use rand::Rng;

use super::collision::Rect;
use super::state::{Dino, GameEvent, GameSession, Obstacle};
use crate::consts::*;
use crate::ground_y;

impl Dino {
    /// Integrate gravity for one tick and clamp to the ground line
    pub fn step(&mut self, ground_y: f32) {
        self.dy += GRAVITY;
        self.pos.y += self.dy;

        if self.pos.y >= ground_y {
            self.pos.y = ground_y;
            self.dy = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// Start a jump. Ignored while airborne. Returns whether it took effect.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.dy = -JUMP_FORCE;
        self.grounded = false;
        true
    }
}

/// Outcome of one obstacle pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicsReport {
    /// Obstacle that hit the dino, if any
    pub collision: Option<u32>,
    /// Obstacles that scrolled off-screen this tick
    pub cleared: u32,
}

impl GameSession {
    /// Advance the dino's vertical motion
    pub fn step_dino(&mut self) {
        let ground = self.dino_ground_y();
        self.dino.step(ground);
    }

    /// Jump if grounded
    pub fn jump(&mut self) -> bool {
        let jumped = self.dino.jump();
        if jumped {
            self.emit(GameEvent::Jumped);
        }
        jumped
    }

    /// Add one obstacle at the right edge with a random height
    pub fn spawn_obstacle(&mut self) {
        let height = self.rng.random_range(OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT);
        let id = self.next_entity_id();
        let rect = Rect::new(
            self.canvas.x,
            ground_y(self.canvas.y, height),
            OBSTACLE_WIDTH,
            height,
        );
        self.obstacles.push(Obstacle { id, rect });
        self.emit(GameEvent::ObstacleSpawned { id });
    }

    /// Spawn, scroll, collide and retire obstacles for one tick.
    ///
    /// A collision stops the pass: the hit obstacle stays in place and
    /// nothing after it moves or scores this tick.
    pub fn advance_obstacles(&mut self) -> PhysicsReport {
        let mut report = PhysicsReport::default();

        self.obstacle_timer += 1;
        if self.obstacle_timer as f32 > self.spawn_interval {
            self.spawn_obstacle();
            self.obstacle_timer = 0;
            self.spawn_interval = (self.spawn_interval - SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
        }

        let dino = self.dino.rect();
        let mut i = 0;
        while i < self.obstacles.len() {
            let obstacle = &mut self.obstacles[i];
            obstacle.rect.pos.x -= self.game_speed;

            if dino.overlaps(&obstacle.rect) {
                report.collision = Some(obstacle.id);
                // Later obstacles skip this tick's move; they sit further right and can't score
                return report;
            }

            if obstacle.rect.right() < 0.0 {
                self.obstacles.remove(i);
                self.score += 1;
                self.game_speed += SPEED_STEP;
                report.cleared += 1;
                self.emit(GameEvent::ObstacleCleared { score: self.score });
            } else {
                i += 1;
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing_session() -> GameSession {
        let mut session = GameSession::new(42);
        session.phase = crate::sim::GamePhase::Playing;
        session
    }

    #[test]
    fn test_resting_dino_stays_grounded() {
        let mut dino = Dino::new(CANVAS_HEIGHT);
        let ground = ground_y(CANVAS_HEIGHT, DINO_HEIGHT);
        for _ in 0..10 {
            dino.step(ground);
            assert!(dino.grounded);
            assert_eq!(dino.pos.y, ground);
            assert_eq!(dino.dy, 0.0);
        }
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut dino = Dino::new(CANVAS_HEIGHT);
        let ground = ground_y(CANVAS_HEIGHT, DINO_HEIGHT);
        assert!(dino.jump());
        assert_eq!(dino.dy, -JUMP_FORCE);

        dino.step(ground);
        assert!(!dino.grounded);
        assert!(dino.pos.y < ground);

        let mut ticks = 1;
        while !dino.grounded {
            dino.step(ground);
            ticks += 1;
            assert!(ticks < 200, "dino never landed");
        }
        assert_eq!(dino.pos.y, ground);
        assert_eq!(dino.dy, 0.0);
        // -20 + 0.6n crosses back over the ground after ~66 ticks
        assert!((60..=70).contains(&ticks));
    }

    #[test]
    fn test_no_double_jump() {
        let mut dino = Dino::new(CANVAS_HEIGHT);
        let ground = ground_y(CANVAS_HEIGHT, DINO_HEIGHT);
        assert!(dino.jump());
        dino.step(ground);
        let before = dino.clone();
        assert!(!dino.jump());
        assert_eq!(dino, before);
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut session = playing_session();
        session.spawn_interval = 33.0;
        for _ in 0..33 {
            session.advance_obstacles();
            assert!(session.obstacles.is_empty());
        }
        session.advance_obstacles();
        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.obstacle_timer, 0);
        assert!((session.spawn_interval - 32.9).abs() < 1e-4);

        let rect = session.obstacles[0].rect;
        assert_eq!(rect.size.x, OBSTACLE_WIDTH);
        assert!(rect.size.y >= OBSTACLE_MIN_HEIGHT && rect.size.y < OBSTACLE_MAX_HEIGHT);
        assert!((rect.bottom() - (CANVAS_HEIGHT - GROUND_MARGIN)).abs() < 1e-3);
        // Spawned at the right edge, then moved once in the same pass
        assert_eq!(rect.left(), CANVAS_WIDTH - BASE_GAME_SPEED);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut session = playing_session();
        session.spawn_interval = MIN_SPAWN_INTERVAL + 0.05;
        session.obstacle_timer = 31;
        session.advance_obstacles();
        assert_eq!(session.spawn_interval, MIN_SPAWN_INTERVAL);
        session.obstacle_timer = 31;
        session.advance_obstacles();
        assert_eq!(session.spawn_interval, MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn test_collision_stops_pass_without_scoring() {
        let mut session = playing_session();
        session.dino.pos.x = -10.0;
        let ground = session.canvas.y - GROUND_MARGIN;
        // Would be both overlapping and off-screen after moving 3px
        let id = session.next_entity_id();
        session.obstacles.push(Obstacle {
            id,
            rect: Rect::new(-18.0, ground - 40.0, 20.0, 40.0),
        });
        let report = session.advance_obstacles();
        assert_eq!(report.collision, Some(id));
        assert_eq!(report.cleared, 0);
        assert_eq!(session.score, 0);
        assert_eq!(session.obstacles.len(), 1);
    }

    #[test]
    fn test_clearing_ten_obstacles() {
        let mut session = playing_session();
        for _ in 0..10 {
            let id = session.next_entity_id();
            session
                .obstacles
                .push(Obstacle { id, rect: Rect::new(-18.0, 250.0, 20.0, 40.0) });
        }
        let report = session.advance_obstacles();
        assert_eq!(report.collision, None);
        assert_eq!(report.cleared, 10);
        assert_eq!(session.score, 10);
        assert!((session.game_speed - 3.5).abs() < 1e-4);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_not_scored_before_leaving() {
        let mut session = playing_session();
        let id = session.next_entity_id();
        // Right edge lands exactly on x = 0 after moving
        session
            .obstacles
            .push(Obstacle { id, rect: Rect::new(-17.0, 250.0, 20.0, 40.0) });
        session.advance_obstacles();
        assert_eq!(session.score, 0);
        assert_eq!(session.obstacles.len(), 1);
        session.advance_obstacles();
        assert_eq!(session.score, 1);
    }

    proptest! {
        #[test]
        fn prop_dino_never_below_ground(jumps in proptest::collection::vec(any::<bool>(), 1..300)) {
            let mut dino = Dino::new(CANVAS_HEIGHT);
            let ground = ground_y(CANVAS_HEIGHT, DINO_HEIGHT);
            for jump in jumps {
                if jump {
                    dino.jump();
                }
                dino.step(ground);
                prop_assert!(dino.pos.y <= ground);
                if dino.pos.y == ground {
                    prop_assert!(dino.grounded);
                    prop_assert_eq!(dino.dy, 0.0);
                }
            }
        }

        #[test]
        fn prop_airborne_jump_is_noop(y in 0.0f32..229.0, dy in -20.0f32..20.0) {
            let mut dino = Dino::new(CANVAS_HEIGHT);
            dino.pos.y = y;
            dino.dy = dy;
            dino.grounded = false;
            let before = dino.clone();
            prop_assert!(!dino.jump());
            prop_assert_eq!(dino, before);
        }

        #[test]
        fn prop_score_tracks_removals(ticks in 1usize..2000) {
            let mut session = playing_session();
            let mut last_speed = session.game_speed;
            let mut removed = 0;
            for _ in 0..ticks {
                let report = session.advance_obstacles();
                if report.collision.is_some() {
                    break;
                }
                removed += report.cleared;
                prop_assert!(session.game_speed >= last_speed);
                last_speed = session.game_speed;
            }
            prop_assert_eq!(session.score, removed);
        }
    }
}
