use serde::{Deserialize, Serialize};

/// Data-driven configuration for the bubble engine. Rates are per
/// simulated millisecond.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    /// Grid width in cells.
    pub cols: u32,
    /// Grid height in cells. Row 0 touches the ceiling.
    pub rows: u32,
    /// Cell edge in canvas units.
    pub cell_size: f32,
    /// How many palette colors are in play (clamped to the palette).
    pub color_count: u32,
    /// Fully-filled random rows seeded at the top on reset.
    pub seed_rows: u32,
    /// Projectile speed (units/ms).
    pub projectile_speed: f32,
    /// Center-to-center distance that counts as contact with a settled
    /// bubble.
    pub contact_radius: f32,
    /// Aim smoothing rate (radians/ms).
    pub aim_rate: f32,
    /// Half-angle of the allowed forward aiming arc, radians from
    /// straight up.
    pub max_aim_arc: f32,
    /// Simulated milliseconds between row shifts.
    pub shift_interval_ms: f32,
    /// Per-cell fill probability for the new top row after a shift.
    pub shift_fill_chance: f64,
    /// Minimum connected same-color cluster size that pops.
    pub min_cluster: u32,
    /// Score per popped bubble.
    pub pop_points: u32,
    /// Score per dropped (floating) bubble.
    pub drop_points: u32,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            cols: 12,
            rows: 14,
            cell_size: 32.0,
            color_count: 4,
            seed_rows: 5,
            projectile_speed: 0.6,
            contact_radius: 30.0,
            aim_rate: 0.012,
            max_aim_arc: 1.2,
            shift_interval_ms: 15_000.0,
            shift_fill_chance: 0.8,
            min_cluster: 3,
            pop_points: 10,
            drop_points: 20,
        }
    }
}

impl BubbleConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PARLOR_BUBBLE_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/bubble.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    /// Clamp extents and rates to playable values.
    pub fn sanitized(mut self) -> Self {
        self.cols = self.cols.max(4);
        self.rows = self.rows.max(4);
        self.cell_size = self.cell_size.max(1.0);
        self.color_count = self.color_count.clamp(1, crate::board::BubbleColor::ALL.len() as u32);
        self.seed_rows = self.seed_rows.min(self.rows - 1);
        self.projectile_speed = self.projectile_speed.max(0.01);
        self.contact_radius = self.contact_radius.max(1.0);
        self.max_aim_arc = self
            .max_aim_arc
            .clamp(0.1, std::f32::consts::FRAC_PI_2 - 0.05);
        self.shift_interval_ms = self.shift_interval_ms.max(1000.0);
        self.shift_fill_chance = self.shift_fill_chance.clamp(0.0, 1.0);
        self.min_cluster = self.min_cluster.max(2);
        self
    }
}
