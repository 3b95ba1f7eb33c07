//! Simulation state and core types
//!
//! Everything the renderer needs lives in `SimulationState`; the timing
//! accumulators stay on the engine.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// An obstacle scrolling toward the character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge (pixels from the play-field's left border)
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True once the obstacle has fully left the play-field on the left
    pub fn is_off_screen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Complete simulation state for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Vertical offset from the ground line (0 = standing, negative = above)
    pub character_y: f32,
    /// Vertical velocity (negative = rising)
    pub vertical_velocity: f32,
    pub is_airborne: bool,
    /// Obstacles in spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub is_game_over: bool,
    /// Scroll rate in pixels per frame
    pub speed: f32,
}

impl SimulationState {
    /// Fresh state for a new session
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            character_y: 0.0,
            vertical_velocity: 0.0,
            is_airborne: false,
            obstacles: Vec::new(),
            score: 0,
            is_game_over: false,
            speed: tuning.base_speed,
        }
    }

    /// Height of the character's feet above the ground line
    pub fn height_above_ground(&self) -> f32 {
        -self.character_y
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            character_y: self.character_y,
            is_airborne: self.is_airborne,
            obstacles: self.obstacles.clone(),
            score: self.score,
            is_game_over: self.is_game_over,
            speed: self.speed,
        }
    }
}

/// Read-only copy of the state published to the host after each step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub character_y: f32,
    pub is_airborne: bool,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub is_game_over: bool,
    pub speed: f32,
}
