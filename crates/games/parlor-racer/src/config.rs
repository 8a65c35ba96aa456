use serde::{Deserialize, Serialize};

use crate::track::CrossingDir;

/// Data-driven configuration for the racer engine. All rate constants are
/// per simulated millisecond so `step` integrates correctly for variable
/// and irregular `dt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RacerConfig {
    /// Track width in canvas units.
    pub track_width: f32,
    /// Track height in canvas units.
    pub track_height: f32,
    /// Start pose.
    pub start_x: f32,
    pub start_y: f32,
    /// Start heading in radians (0 = +X).
    pub start_angle: f32,
    /// Throttle acceleration (units/ms^2).
    pub accel: f32,
    /// Brake deceleration (units/ms^2).
    pub brake_accel: f32,
    /// Velocity magnitude cap (units/ms).
    pub max_speed: f32,
    /// Multiplicative velocity decay factor per millisecond.
    pub friction: f32,
    /// Turn rate (radians/ms).
    pub turn_rate: f32,
    /// Finish segment X extent.
    pub finish_x1: f32,
    pub finish_x2: f32,
    /// Finish segment Y coordinate.
    pub finish_y: f32,
    /// Crossing direction that counts as a lap.
    pub finish_preferred: CrossingDir,
}

impl Default for RacerConfig {
    fn default() -> Self {
        Self {
            track_width: 800.0,
            track_height: 600.0,
            start_x: 400.0,
            start_y: 520.0,
            start_angle: -std::f32::consts::FRAC_PI_2,
            accel: 0.0002,
            brake_accel: 0.0004,
            max_speed: 0.35,
            friction: 0.9995,
            turn_rate: 0.003,
            finish_x1: 340.0,
            finish_x2: 460.0,
            finish_y: 520.0,
            finish_preferred: CrossingDir::Up,
        }
    }
}

impl RacerConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARLOR_RACER_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/racer.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }
}
