pub mod config;
pub mod physics;
pub mod track;

use serde::{Deserialize, Serialize};

use parlor_core::engine::{EngineEvent, EngineMetadata, ParlorEngine};
use parlor_core::parlor_engine_boilerplate;
use parlor_core::registry::{GameEntry, GameId};

use config::RacerConfig;
use track::{CrossingDir, FinishLine};

/// Serializable racer state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacerState {
    /// Position in canvas units.
    pub x: f32,
    pub y: f32,
    /// Heading in radians (0 = +X).
    pub angle: f32,
    /// Velocity in units/ms.
    pub vx: f32,
    pub vy: f32,
    /// Completed laps (preferred-direction crossings only).
    pub laps: u32,
    /// Direction of the most recent finish-segment crossing, either way.
    /// Kept for display and debugging.
    pub last_crossing: Option<CrossingDir>,
    /// Accumulated simulated milliseconds.
    pub elapsed_ms: f32,
    pub score: u32,
    /// The racer has no terminal condition; this stays false.
    pub game_over: bool,
}

/// Control flags from the input adapter. `set_input` overwrites all four.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RacerInput {
    pub accelerate: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// The continuous 2D physics racer engine.
pub struct RacerGame {
    state: RacerState,
    input: RacerInput,
    finish: FinishLine,
    game_config: RacerConfig,
    paused: bool,
}

impl RacerGame {
    pub fn new() -> Self {
        Self::with_config(RacerConfig::load())
    }

    pub fn with_config(config: RacerConfig) -> Self {
        Self {
            state: Self::start_state(&config),
            input: RacerInput::default(),
            finish: FinishLine::from_config(&config),
            game_config: config,
            paused: false,
        }
    }

    pub fn state(&self) -> &RacerState {
        &self.state
    }

    pub fn config(&self) -> &RacerConfig {
        &self.game_config
    }

    /// Catalog entry for the arcade shell.
    pub fn entry() -> GameEntry {
        GameEntry {
            id: GameId("racer".to_string()),
            metadata: Self::default().metadata(),
        }
    }

    /// Overwrite the four control flags.
    pub fn set_input(&mut self, input: RacerInput) {
        self.input = input;
    }

    fn start_state(config: &RacerConfig) -> RacerState {
        RacerState {
            x: config.start_x,
            y: config.start_y,
            angle: config.start_angle,
            vx: 0.0,
            vy: 0.0,
            laps: 0,
            last_crossing: None,
            elapsed_ms: 0.0,
            score: 0,
            game_over: false,
        }
    }
}

impl Default for RacerGame {
    fn default() -> Self {
        Self::with_config(RacerConfig::default())
    }
}

impl ParlorEngine for RacerGame {
    fn metadata(&self) -> EngineMetadata {
        EngineMetadata {
            name: "Turbo Track".to_string(),
            description: "Throttle, brake, and steer around the track. Cross the line to lap!"
                .to_string(),
            canvas_width: self.game_config.track_width as u32,
            canvas_height: self.game_config.track_height as u32,
        }
    }

    fn step(&mut self, dt_ms: f32) -> Vec<EngineEvent> {
        if self.paused || self.state.game_over {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.state.elapsed_ms += dt_ms;

        physics::apply_turning(&mut self.state, &self.input, dt_ms, &self.game_config);
        physics::apply_throttle(&mut self.state, &self.input, dt_ms, &self.game_config);
        physics::clamp_speed(&mut self.state, &self.game_config);
        physics::apply_friction(&mut self.state, dt_ms, &self.game_config);
        physics::integrate(&mut self.state, dt_ms);
        physics::clamp_to_bounds(&mut self.state, &self.game_config);

        // Reconstruct the previous position from the last velocity delta
        // rather than storing the true prior pose.
        let prev_x = self.state.x - self.state.vx * dt_ms;
        let prev_y = self.state.y - self.state.vy * dt_ms;
        if let Some(dir) = self
            .finish
            .crossing(prev_x, prev_y, self.state.x, self.state.y)
        {
            self.state.last_crossing = Some(dir);
            if dir == self.finish.preferred {
                self.state.laps += 1;
                self.state.score = self.state.laps;
                events.push(EngineEvent::LapCompleted {
                    laps: self.state.laps,
                });
                events.push(EngineEvent::ScoreUpdate {
                    score: self.state.score,
                });
            }
        }

        events
    }

    fn reset(&mut self) {
        self.state = Self::start_state(&self.game_config);
        self.input = RacerInput::default();
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<RacerInput>(input) {
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed racer input");
            },
            Ok(ri) => self.set_input(ri),
        }
    }

    parlor_engine_boilerplate!(state_type: RacerState);
}
