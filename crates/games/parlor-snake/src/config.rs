use serde::{Deserialize, Serialize};

/// Data-driven configuration for the snake engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Grid width in cells.
    pub cols: u32,
    /// Grid height in cells.
    pub rows: u32,
    /// Snake length at spawn (clamped to the grid so the trailing body
    /// cannot overlap itself under wrap).
    pub initial_length: u32,
    /// Simulated milliseconds between grid advances.
    pub step_interval_ms: f32,
    /// Maximum uniform samples when placing food before giving up for the
    /// current advance.
    pub food_retry_limit: u32,
    /// Cell edge in CSS pixels, used for the suggested canvas size.
    pub cell_px: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            cols: 24,
            rows: 18,
            initial_length: 4,
            step_interval_ms: 120.0,
            food_retry_limit: 64,
            cell_px: 20,
        }
    }
}

impl SnakeConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARLOR_SNAKE_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/snake.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    /// Clamp extents and rates to playable minimums.
    pub fn sanitized(mut self) -> Self {
        self.cols = self.cols.max(4);
        self.rows = self.rows.max(4);
        self.initial_length = self.initial_length.clamp(1, self.cols);
        self.step_interval_ms = self.step_interval_ms.max(1.0);
        self.food_retry_limit = self.food_retry_limit.max(1);
        self
    }
}
