//! Dino Run - endless-runner mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, score)
//! - `tuning`: Data-driven game balance
//! - `session`: Host embedding (input triggers, score/game-over callbacks)
//! - `settings`: Input bindings
//! - `render`: Snapshot to draw-command adapter

pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameInput, FrameStatus, GameHost, Session};
pub use settings::{KeyAction, Settings};
pub use sim::{EngineError, GameEngine, Snapshot, StepOutcome};
pub use tuning::{Tuning, TuningError};

/// Play-field geometry (screen space, pixels, y grows downward)
pub mod consts {
    /// Play-field dimensions
    pub const GAME_WIDTH: f32 = 600.0;
    pub const GAME_HEIGHT: f32 = 200.0;

    /// Ground line: the character's feet and every obstacle's base rest here
    pub const GROUND_LINE_Y: f32 = 180.0;

    /// Character rectangle (fixed horizontal placement)
    pub const CHARACTER_X: f32 = 50.0;
    pub const CHARACTER_WIDTH: f32 = 20.0;
    pub const CHARACTER_HEIGHT: f32 = 30.0;
}
