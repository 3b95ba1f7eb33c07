//! Host embedding
//!
//! A `Session` sits between the page (or any other host) and the engine:
//! it buffers one-shot input triggers between frames, steps the engine from
//! the host's frame callback and forwards score/game-over notifications.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{EngineError, GameEngine, Snapshot, StepOutcome};

/// Callbacks the embedding page supplies
pub trait GameHost {
    /// Called whenever the displayed score changes (and once with 0 when a
    /// session begins)
    fn on_score_update(&mut self, score: u32);
    /// Called exactly once per session, one frame after the collision
    fn on_game_over(&mut self, final_score: u32);
}

/// One-shot input commands for the next frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub jump: bool,
    pub restart: bool,
}

/// What a call to `Session::frame` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Simulation advanced; `snapshot()` holds the new state
    Advanced,
    /// Game over was reported to the host this frame
    GameOver { final_score: u32 },
    /// Session is over and waiting for a restart
    Idle,
}

/// Drives a `GameEngine` on behalf of a host
pub struct Session<R = Pcg32> {
    engine: GameEngine<R>,
    input: FrameInput,
    active: bool,
    reported_score: Option<u32>,
    snapshot: Snapshot,
}

impl<R: Rng> Session<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        let snapshot = engine.snapshot();
        Self {
            engine,
            input: FrameInput::default(),
            active: false,
            reported_score: None,
            snapshot,
        }
    }

    /// Start a fresh game: at mount, or after game over
    pub fn begin(&mut self, host: &mut impl GameHost) -> Result<(), EngineError> {
        if self.engine.is_running() {
            self.engine.restart();
        } else {
            self.engine.start()?;
        }
        self.input = FrameInput::default();
        self.active = true;
        self.reported_score = None;
        self.snapshot = self.engine.snapshot();
        self.report_score(host, self.snapshot.score);
        Ok(())
    }

    pub fn press_jump(&mut self) {
        self.input.jump = true;
    }

    /// Request a restart. Only honoured once the game is over.
    pub fn press_restart(&mut self) {
        self.input.restart = true;
    }

    /// Route a keyboard `code` through the bindings
    pub fn handle_key(&mut self, code: &str, settings: &Settings) {
        let action = settings.action_for_key(code);
        if action.jump {
            self.press_jump();
        }
        if action.restart {
            self.press_restart();
        }
    }

    /// A tap on the play-field jumps while a game is in progress
    pub fn handle_touch(&mut self, settings: &Settings) {
        if settings.touch_jump && !self.is_game_over() {
            self.press_jump();
        }
    }

    /// Per-frame callback from the host's animation loop
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        host: &mut impl GameHost,
    ) -> Result<FrameStatus, EngineError> {
        if !self.engine.is_running() {
            return Err(EngineError::NotStarted);
        }

        let input = std::mem::take(&mut self.input);
        if input.restart && self.is_game_over() && !self.active {
            // The key that restarts must not also launch a jump
            self.begin(host)?;
        } else {
            if input.restart && self.is_game_over() {
                // Collision frame: hold the restart until the host has
                // been told the game is over
                self.input.restart = true;
            }
            if input.jump {
                self.engine.jump();
            }
        }

        if !self.active {
            return Ok(FrameStatus::Idle);
        }

        match self.engine.step(timestamp_ms)? {
            StepOutcome::Frame(frame) => {
                self.report_score(host, frame.snapshot.score);
                self.snapshot = frame.snapshot;
                Ok(FrameStatus::Advanced)
            }
            StepOutcome::GameOver { final_score } => {
                self.active = false;
                host.on_game_over(final_score);
                Ok(FrameStatus::GameOver { final_score })
            }
            StepOutcome::Halted => {
                self.active = false;
                Ok(FrameStatus::Idle)
            }
        }
    }

    fn report_score(&mut self, host: &mut impl GameHost, score: u32) {
        if self.reported_score != Some(score) {
            self.reported_score = Some(score);
            host.on_score_update(score);
        }
    }

    /// Latest published state
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.state().is_game_over
    }

    /// True while frames still advance the simulation
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct RecordingHost {
        scores: Vec<u32>,
        game_overs: Vec<u32>,
    }

    impl GameHost for RecordingHost {
        fn on_score_update(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn on_game_over(&mut self, final_score: u32) {
            self.game_overs.push(final_score);
        }
    }

    fn session(seed: u64) -> Session {
        Session::new(GameEngine::with_seed(Tuning::default(), seed).unwrap())
    }

    /// Run frames at 16ms until the host hears about game over
    fn play_until_game_over(session: &mut Session, host: &mut RecordingHost, mut t: f64) -> f64 {
        for _ in 0..5000 {
            let status = session.frame(t, host).unwrap();
            t += 16.0;
            if matches!(status, FrameStatus::GameOver { .. }) {
                return t;
            }
        }
        panic!("session never ended");
    }

    #[test]
    fn test_frame_before_begin_is_rejected() {
        let mut host = RecordingHost::default();
        let mut session = session(1);
        assert_eq!(session.frame(0.0, &mut host), Err(EngineError::NotStarted));
    }

    #[test]
    fn test_begin_reports_zero_score() {
        let mut host = RecordingHost::default();
        let mut session = session(1);
        session.begin(&mut host).unwrap();
        assert_eq!(host.scores, vec![0]);
        assert!(session.is_active());
    }

    #[test]
    fn test_score_updates_only_on_change() {
        let mut host = RecordingHost::default();
        let mut session = session(1);
        session.begin(&mut host).unwrap();
        for t in [0.0, 50.0, 99.0, 100.0, 150.0, 320.0] {
            session.frame(t, &mut host).unwrap();
        }
        assert_eq!(host.scores, vec![0, 1, 3]);
    }

    #[test]
    fn test_game_over_reported_once_on_following_frame() {
        let mut host = RecordingHost::default();
        let mut session = session(6);
        session.begin(&mut host).unwrap();

        let mut t = 0.0;
        loop {
            assert_eq!(session.frame(t, &mut host).unwrap(), FrameStatus::Advanced);
            t += 16.0;
            if session.snapshot().is_game_over {
                break;
            }
        }
        // Collision frame itself does not notify
        assert!(host.game_overs.is_empty());

        let final_score = session.snapshot().score;
        assert_eq!(
            session.frame(t, &mut host).unwrap(),
            FrameStatus::GameOver { final_score }
        );
        assert_eq!(session.frame(t + 16.0, &mut host).unwrap(), FrameStatus::Idle);
        assert_eq!(host.game_overs, vec![final_score]);
        assert!(!session.is_active());
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut host = RecordingHost::default();
        let mut session = session(2);
        session.begin(&mut host).unwrap();
        session.frame(0.0, &mut host).unwrap();
        session.frame(500.0, &mut host).unwrap();
        let score = session.snapshot().score;
        assert!(score > 0);

        session.press_restart();
        session.frame(516.0, &mut host).unwrap();
        assert!(session.snapshot().score >= score);
    }

    #[test]
    fn test_restart_key_starts_new_game_without_jumping() {
        let settings = Settings::default();
        let mut host = RecordingHost::default();
        let mut session = session(4);
        session.begin(&mut host).unwrap();
        let t = play_until_game_over(&mut session, &mut host, 0.0);
        assert_eq!(session.frame(t, &mut host).unwrap(), FrameStatus::Idle);

        // Space is bound to both jump and restart
        session.handle_key("Space", &settings);
        assert_eq!(session.frame(t + 16.0, &mut host).unwrap(), FrameStatus::Advanced);
        let snapshot = session.snapshot();
        assert!(!snapshot.is_game_over);
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.is_airborne);
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(host.scores.last(), Some(&0));

        // A second game ends with a second notification
        play_until_game_over(&mut session, &mut host, t + 32.0);
        assert_eq!(host.game_overs.len(), 2);
    }

    #[test]
    fn test_restart_during_collision_frame_still_reports_game_over() {
        let mut host = RecordingHost::default();
        let mut session = session(6);
        session.begin(&mut host).unwrap();

        let mut t = 0.0;
        while !session.snapshot().is_game_over {
            session.frame(t, &mut host).unwrap();
            t += 16.0;
        }
        let final_score = session.snapshot().score;

        // Restart arrives before the host has heard about the game over
        session.press_restart();
        assert_eq!(
            session.frame(t, &mut host).unwrap(),
            FrameStatus::GameOver { final_score }
        );
        assert_eq!(host.game_overs, vec![final_score]);

        // The held restart applies on the following frame
        assert_eq!(session.frame(t + 16.0, &mut host).unwrap(), FrameStatus::Advanced);
        assert!(session.is_active());
        assert!(!session.snapshot().is_game_over);
        assert_eq!(session.snapshot().score, 0);
        assert_eq!(host.game_overs.len(), 1);
    }

    #[test]
    fn test_jump_key_and_touch() {
        let settings = Settings::default();
        let mut host = RecordingHost::default();
        let mut session = session(4);
        session.begin(&mut host).unwrap();
        session.frame(0.0, &mut host).unwrap();

        session.handle_key("ArrowUp", &settings);
        session.frame(16.0, &mut host).unwrap();
        assert!(session.snapshot().is_airborne);
        assert!(session.snapshot().character_y < 0.0);

        let mut t = 32.0;
        while session.snapshot().is_airborne {
            session.frame(t, &mut host).unwrap();
            t += 16.0;
        }
        session.handle_touch(&settings);
        session.frame(t, &mut host).unwrap();
        assert!(session.snapshot().is_airborne);
    }

    #[test]
    fn test_touch_disabled_in_settings() {
        let settings = Settings {
            touch_jump: false,
            ..Default::default()
        };
        let mut host = RecordingHost::default();
        let mut session = session(4);
        session.begin(&mut host).unwrap();
        session.handle_touch(&settings);
        session.frame(0.0, &mut host).unwrap();
        assert!(!session.snapshot().is_airborne);
    }
}
