//! Data-driven game balance
//!
//! Physics, spawning and scoring constants. Defaults reproduce the original
//! game feel; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be negative (got {value})")]
    NotNegative { field: &'static str, value: f32 },
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositiveMs { field: &'static str, value: f64 },
    #[error("`{field}` must be at least {min} (got {value})")]
    TooSmall {
        field: &'static str,
        value: f64,
        min: f64,
    },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("range `{min_field}..={max_field}` is inverted ({min} > {max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f32,
        max: f32,
    },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vertical velocity every frame
    pub gravity: f32,
    /// Vertical velocity set on jump (negative = upward)
    pub jump_impulse: f32,
    /// Initial scroll speed (pixels per frame)
    pub base_speed: f32,
    /// Scroll speed added every frame
    pub speed_increment: f32,
    /// Spawn gap range behind the most recent obstacle (pixels)
    pub min_gap: f32,
    pub max_gap: f32,
    /// Minimum time between spawns at speed 1.0; divided by current speed
    pub base_spawn_interval_ms: f64,
    /// Time quantum worth one point
    pub score_tick_ms: f64,
    pub obstacle_width: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: -10.0,
            base_speed: 5.0,
            speed_increment: 0.001,
            min_gap: 200.0,
            max_gap: 400.0,
            base_spawn_interval_ms: 500.0,
            score_tick_ms: 100.0,
            obstacle_width: 20.0,
            obstacle_min_height: 40.0,
            obstacle_max_height: 40.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields fall back
    /// to defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the parameters describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("gravity", self.gravity)?;
        finite("jump_impulse", self.jump_impulse as f64)?;
        if self.jump_impulse >= 0.0 {
            return Err(TuningError::NotNegative {
                field: "jump_impulse",
                value: self.jump_impulse,
            });
        }
        positive("base_speed", self.base_speed)?;
        non_negative("speed_increment", self.speed_increment)?;
        non_negative("min_gap", self.min_gap)?;
        ordered("min_gap", "max_gap", self.min_gap, self.max_gap)?;
        positive_ms("base_spawn_interval_ms", self.base_spawn_interval_ms)?;
        positive_ms("score_tick_ms", self.score_tick_ms)?;
        if self.score_tick_ms < MIN_SCORE_TICK_MS {
            return Err(TuningError::TooSmall {
                field: "score_tick_ms",
                value: self.score_tick_ms,
                min: MIN_SCORE_TICK_MS,
            });
        }
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_min_height", self.obstacle_min_height)?;
        ordered(
            "obstacle_min_height",
            "obstacle_max_height",
            self.obstacle_min_height,
            self.obstacle_max_height,
        )?;
        Ok(())
    }
}

/// Shortest accepted score tick
pub const MIN_SCORE_TICK_MS: f64 = 1.0;

fn finite(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    finite(field, value as f64)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn positive_ms(field: &'static str, value: f64) -> Result<(), TuningError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositiveMs { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    finite(field, value as f64)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { field, value })
    }
}

fn ordered(
    min_field: &'static str,
    max_field: &'static str,
    min: f32,
    max: f32,
) -> Result<(), TuningError> {
    finite(min_field, min as f64)?;
    finite(max_field, max as f64)?;
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::InvertedRange {
            min_field,
            max_field,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "max_gap": 500.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.max_gap, 500.0);
        assert_eq!(tuning.jump_impulse, Tuning::default().jump_impulse);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            obstacle_max_height: 55.0,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ gravity: "),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = Tuning::from_json(r#"{ "gravity": -0.6 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotPositive { field: "gravity", .. }));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = Tuning::from_json(r#"{ "jump_impulse": 4.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotNegative { field: "jump_impulse", .. }));
    }

    #[test]
    fn test_rejects_infinite_values() {
        // 1e39 overflows f32 to infinity
        let err = Tuning::from_json(r#"{ "max_gap": 1e39 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonFinite { field: "max_gap" }));

        let err = Tuning::from_json(r#"{ "gravity": 1e39 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonFinite { field: "gravity" }));

        let tuning = Tuning {
            base_spawn_interval_ms: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonFinite { field: "base_spawn_interval_ms" })
        ));
    }

    #[test]
    fn test_rejects_tiny_score_tick() {
        let err = Tuning::from_json(r#"{ "score_tick_ms": 1e-40 }"#).unwrap_err();
        assert!(matches!(err, TuningError::TooSmall { field: "score_tick_ms", .. }));

        let err = Tuning::from_json(r#"{ "score_tick_ms": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotPositiveMs { field: "score_tick_ms", .. }));
    }

    #[test]
    fn test_rejects_inverted_gap() {
        let err = Tuning::from_json(r#"{ "min_gap": 300.0, "max_gap": 100.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvertedRange { min_field: "min_gap", .. }));
    }
}
