//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied timestamps only
//! - Injected RNG only
//! - Stable obstacle order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod state;

pub use collision::Rect;
pub use engine::{EngineError, Frame, GameEngine, StepOutcome};
pub use state::{Obstacle, SimulationState, Snapshot};
