//! Frame-driven game loop
//!
//! The engine owns the simulation state and every timing accumulator. The
//! host calls `step` once per display refresh with a monotonic timestamp and
//! forwards jump/restart triggers between frames.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::character_hits_any;
use super::state::{Obstacle, SimulationState, Snapshot};
use crate::consts::GAME_WIDTH;
use crate::tuning::{Tuning, TuningError};

/// Caller misuse of the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("step called before the engine was started")]
    NotStarted,
    #[error("engine is already running; use restart() to begin a new session")]
    AlreadyStarted,
    #[error("timestamp went backwards ({current} < {previous})")]
    TimestampRewind { previous: f64, current: f64 },
    #[error("timestamp is not a finite number ({0})")]
    InvalidTimestamp(f64),
}

/// State published after a regular frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub snapshot: Snapshot,
    /// Score differs from the previous frame
    pub score_changed: bool,
}

/// Result of a single `step`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Simulation advanced; render the snapshot
    Frame(Frame),
    /// First step after the collision frame. Emitted once per session.
    GameOver { final_score: u32 },
    /// Game over was already signalled; nothing changed
    Halted,
}

/// The game loop engine, generic over its random source
#[derive(Debug, Clone)]
pub struct GameEngine<R = Pcg32> {
    tuning: Tuning,
    rng: R,
    state: SimulationState,
    running: bool,
    last_frame_ms: Option<f64>,
    last_spawn_ms: f64,
    score_accumulator_ms: f64,
    game_over_signalled: bool,
}

impl GameEngine<Pcg32> {
    /// Engine with a seeded PCG generator
    pub fn with_seed(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::new(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an idle engine. `start` or `restart` must be called before
    /// the first `step`.
    pub fn new(tuning: Tuning, rng: R) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = SimulationState::new(&tuning);
        Ok(Self {
            tuning,
            rng,
            state,
            running: false,
            last_frame_ms: None,
            last_spawn_ms: 0.0,
            score_accumulator_ms: 0.0,
            game_over_signalled: false,
        })
    }

    /// Begin the first session
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.running {
            log::warn!("start() called on a running engine");
            return Err(EngineError::AlreadyStarted);
        }
        self.reset();
        log::info!("Dino Run started");
        Ok(())
    }

    /// Discard the current session and begin a new one. Valid in any state.
    pub fn restart(&mut self) {
        let previous_score = self.state.score;
        self.reset();
        log::info!("Dino Run restarted (previous score {})", previous_score);
    }

    fn reset(&mut self) {
        self.state = SimulationState::new(&self.tuning);
        self.last_frame_ms = None;
        self.last_spawn_ms = 0.0;
        self.score_accumulator_ms = 0.0;
        self.game_over_signalled = false;
        self.running = true;
    }

    /// Trigger a jump. Ignored while airborne, after game over, or before
    /// the engine is started.
    pub fn jump(&mut self) {
        if !self.running || self.state.is_airborne || self.state.is_game_over {
            return;
        }
        self.state.vertical_velocity = self.tuning.jump_impulse;
        self.state.is_airborne = true;
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self, timestamp_ms: f64) -> Result<StepOutcome, EngineError> {
        if !self.running {
            return Err(EngineError::NotStarted);
        }
        if !timestamp_ms.is_finite() {
            return Err(EngineError::InvalidTimestamp(timestamp_ms));
        }
        let delta_ms = match self.last_frame_ms {
            Some(previous) if timestamp_ms < previous => {
                return Err(EngineError::TimestampRewind {
                    previous,
                    current: timestamp_ms,
                });
            }
            Some(previous) => timestamp_ms - previous,
            None => 0.0,
        };
        self.last_frame_ms = Some(timestamp_ms);

        // Game over surfaces one step after the collision frame
        if self.state.is_game_over {
            if self.game_over_signalled {
                return Ok(StepOutcome::Halted);
            }
            self.game_over_signalled = true;
            log::info!("Game over! Final score: {}", self.state.score);
            return Ok(StepOutcome::GameOver {
                final_score: self.state.score,
            });
        }

        let previous_score = self.state.score;

        self.integrate_character();
        self.advance_obstacles();
        self.maybe_spawn(timestamp_ms);

        if character_hits_any(self.state.character_y, &self.state.obstacles) {
            self.state.is_game_over = true;
            log::debug!("Collision at score {}", self.state.score);
        }

        self.accrue_score(delta_ms);
        self.state.speed += self.tuning.speed_increment;

        Ok(StepOutcome::Frame(Frame {
            snapshot: self.state.snapshot(),
            score_changed: self.state.score != previous_score,
        }))
    }

    fn integrate_character(&mut self) {
        let state = &mut self.state;
        state.vertical_velocity += self.tuning.gravity;
        state.character_y += state.vertical_velocity;

        if state.character_y >= 0.0 {
            state.character_y = 0.0;
            state.vertical_velocity = 0.0;
            state.is_airborne = false;
        }
    }

    fn advance_obstacles(&mut self) {
        let speed = self.state.speed;
        for obstacle in &mut self.state.obstacles {
            obstacle.x -= speed;
        }
        self.state.obstacles.retain(|o| !o.is_off_screen());
    }

    fn maybe_spawn(&mut self, timestamp_ms: f64) {
        let eligible = match self.state.obstacles.last() {
            None => true,
            Some(last) => {
                let opened = GAME_WIDTH - last.x;
                let gap = self
                    .rng
                    .random_range(self.tuning.min_gap..=self.tuning.max_gap);
                let since_spawn = timestamp_ms - self.last_spawn_ms;
                let min_interval = self.tuning.base_spawn_interval_ms / self.state.speed as f64;
                opened >= gap && since_spawn >= min_interval
            }
        };
        if !eligible {
            return;
        }

        let height = self
            .rng
            .random_range(self.tuning.obstacle_min_height..=self.tuning.obstacle_max_height);
        self.state.obstacles.push(Obstacle {
            x: GAME_WIDTH,
            width: self.tuning.obstacle_width,
            height,
        });
        self.last_spawn_ms = timestamp_ms;
        log::debug!(
            "Spawned obstacle (h={:.1}) at speed {:.3}, {} on screen",
            height,
            self.state.speed,
            self.state.obstacles.len()
        );
    }

    /// Credit every whole tick in the accumulator, carrying the remainder
    fn accrue_score(&mut self, delta_ms: f64) {
        let tick = self.tuning.score_tick_ms;
        self.score_accumulator_ms += delta_ms;
        if self.score_accumulator_ms < tick {
            return;
        }
        let ticks = (self.score_accumulator_ms / tick).floor();
        self.score_accumulator_ms -= ticks * tick;
        let ticks = ticks.min(u32::MAX as f64) as u32;
        self.state.score = self.state.score.saturating_add(ticks);
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// True between start/restart and teardown, including after game over
    pub fn is_running(&self) -> bool {
        self.running
    }
}
