//! Floppy - a gravity-dodging tube-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, tube field, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted top-5 leaderboard
//! - `platform`: Presentation backend abstraction (draw/input primitives)
//! - `ui`: Read-only projection of game state into backend draw calls
//! - `app`: Game controller, resource ownership and the frame loop

pub mod app;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 450.0;

    /// Player defaults
    pub const FLOPPY_RADIUS: f32 = 20.0;
    pub const FLOPPY_START_X: f32 = 80.0;

    /// Tube geometry - each pair is two rectangles sharing an x coordinate
    pub const TUBE_WIDTH: f32 = 80.0;
    pub const TUBE_HEIGHT: f32 = 255.0;
    /// Distance from the top rectangle's y to the bottom of the pair's
    /// span; the gap between the rectangles is `TUBE_SPAN - 2 * TUBE_HEIGHT`
    pub const TUBE_SPAN: f32 = 600.0;
    /// The top rectangle is pushed up by a random amount in [0, this]
    pub const TUBE_OFFSET_RANGE: f32 = 120.0;

    /// Fixed presentation frame rate; one simulation tick per frame
    pub const TARGET_FPS: u32 = 60;
}
