//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap};
pub use state::{GamePhase, GameState, ObstacleField, ObstaclePair, Player, ScoreState};
pub use tick::{TickInput, tick};
