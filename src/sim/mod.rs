//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One tick per animation frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod machine;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use physics::PhysicsReport;
pub use state::{Dino, GameEvent, GamePhase, GameSession, Obstacle, PendingTransition, Snapshot};
pub use tick::{TickInput, tick};
