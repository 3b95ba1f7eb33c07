//! Axis-aligned collision detection
//!
//! Everything in the play-field is an axis-aligned box: the character is a
//! fixed-width rectangle that only moves vertically, and obstacles are
//! rectangles standing on the ground line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::consts::*;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from top-left position and size
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap test. Rectangles that merely touch along an edge do
    /// not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Character rectangle for a given vertical offset from the ground line
pub fn character_rect(offset_y: f32) -> Rect {
    Rect::from_xywh(
        CHARACTER_X,
        GROUND_LINE_Y - CHARACTER_HEIGHT + offset_y,
        CHARACTER_WIDTH,
        CHARACTER_HEIGHT,
    )
}

/// Obstacle rectangle, anchored on the ground line
pub fn obstacle_rect(obstacle: &Obstacle) -> Rect {
    Rect::from_xywh(
        obstacle.x,
        GROUND_LINE_Y - obstacle.height,
        obstacle.width,
        obstacle.height,
    )
}

/// Returns true if the character at `offset_y` overlaps any obstacle.
/// Stops at the first hit.
pub fn character_hits_any(offset_y: f32, obstacles: &[Obstacle]) -> bool {
    let character = character_rect(offset_y);
    obstacles
        .iter()
        .any(|obstacle| character.overlaps(&obstacle_rect(obstacle)))
}
