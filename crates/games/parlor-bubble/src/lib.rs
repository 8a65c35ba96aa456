pub mod board;
pub mod clusters;
pub mod config;
pub mod shooter;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use parlor_core::engine::{EngineEvent, EngineMetadata, ParlorEngine};
use parlor_core::geom::Vec2;
use parlor_core::parlor_engine_boilerplate;
use parlor_core::registry::{GameEntry, GameId};

use board::Board;
use config::BubbleConfig;
use shooter::{Projectile, Shooter};

/// Serializable bubble state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleState {
    pub board: Board,
    pub shooter: Shooter,
    /// Time since the last row shift.
    pub shift_timer_ms: f32,
    pub score: u32,
    pub elapsed_ms: f32,
    pub game_over: bool,
}

/// Input records for the bubble engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum BubbleInput {
    Aim { x: f32, y: f32 },
    Shoot,
}

/// The bubble-matching shooter engine.
pub struct BubbleGame {
    state: BubbleState,
    game_config: BubbleConfig,
    rng: StdRng,
    paused: bool,
}

impl BubbleGame {
    pub fn new() -> Self {
        Self::with_config(BubbleConfig::load(), rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(BubbleConfig::load(), seed)
    }

    pub fn with_config(config: BubbleConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let mut game = Self {
            state: BubbleState {
                board: Board::new(config.cols, config.rows),
                shooter: Shooter {
                    angle: 0.0,
                    target_angle: 0.0,
                    loaded: board::BubbleColor::Red,
                    queued: board::BubbleColor::Red,
                    projectile: None,
                },
                shift_timer_ms: 0.0,
                score: 0,
                elapsed_ms: 0.0,
                game_over: false,
            },
            game_config: config,
            rng: StdRng::seed_from_u64(seed),
            paused: false,
        };
        game.reset();
        game
    }

    pub fn state(&self) -> &BubbleState {
        &self.state
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.game_config
    }

    /// Catalog entry for the arcade shell.
    pub fn entry() -> GameEntry {
        GameEntry {
            id: GameId("bubble".to_string()),
            metadata: Self::with_config(BubbleConfig::default(), 0).metadata(),
        }
    }

    /// Board width in canvas units.
    fn board_width(&self) -> f32 {
        self.game_config.cols as f32 * self.game_config.cell_size
    }

    /// Launcher position: bottom center of the board.
    fn shooter_origin(&self) -> Vec2 {
        Vec2::new(
            self.board_width() / 2.0,
            self.game_config.rows as f32 * self.game_config.cell_size,
        )
    }

    /// Swing the aim toward a canvas point, clamped to the forward arc.
    pub fn aim(&mut self, x: f32, y: f32) {
        let origin = self.shooter_origin();
        self.state
            .shooter
            .aim_at(Vec2::new(x, y), origin, self.game_config.max_aim_arc);
    }

    /// Fire the loaded bubble. No-op while a projectile is in flight or
    /// the engine is stopped.
    pub fn shoot(&mut self) {
        if self.paused || self.state.game_over || self.state.shooter.projectile.is_some() {
            return;
        }
        let origin = self.shooter_origin();
        self.state.shooter.launch(
            origin,
            self.game_config.projectile_speed,
            &mut self.rng,
            self.game_config.color_count as usize,
        );
    }

    /// Whether the projectile touches the ceiling or any settled bubble.
    fn projectile_contact(&self, p: &Projectile) -> bool {
        if p.pos.y <= self.game_config.cell_size / 2.0 {
            return true;
        }
        let r2 = self.game_config.contact_radius * self.game_config.contact_radius;
        self.state.board.occupied().any(|(row, col, _)| {
            self.state
                .board
                .cell_center(row, col, self.game_config.cell_size)
                .sub(p.pos)
                .length_squared()
                <= r2
        })
    }

    /// Settle a contacted projectile into the grid, then run cluster
    /// clearing and floating cleanup. An exhausted attachment search
    /// silently discards the projectile.
    fn resolve_attachment(&mut self, p: Projectile, events: &mut Vec<EngineEvent>) {
        let cell_size = self.game_config.cell_size;
        match self.state.board.attach_cell(p.pos, cell_size) {
            None => {
                tracing::debug!("Projectile discarded: attachment search exhausted");
            },
            Some((row, col)) => {
                self.state.board.set(row, col, Some(p.color));

                let cluster = clusters::same_color_cluster(&self.state.board, row, col);
                if cluster.len() >= self.game_config.min_cluster as usize {
                    for &(r, c) in &cluster {
                        self.state.board.set(r, c, None);
                    }
                    self.state.score += cluster.len() as u32 * self.game_config.pop_points;

                    let dropped = clusters::drop_floating(&mut self.state.board);
                    self.state.score += dropped * self.game_config.drop_points;

                    events.push(EngineEvent::ScoreUpdate {
                        score: self.state.score,
                    });
                }
            },
        }
    }

    /// Integrate the projectile, reflecting off the side walls, and
    /// settle it on contact.
    fn step_projectile(&mut self, dt_ms: f32, events: &mut Vec<EngineEvent>) {
        let Some(mut p) = self.state.shooter.projectile.take() else {
            return;
        };

        p.pos = p.pos.add(p.vel.scale(dt_ms));

        let radius = self.game_config.cell_size / 2.0;
        let width = self.board_width();
        if p.pos.x < radius {
            p.pos.x = radius;
            p.vel.x = p.vel.x.abs();
        } else if p.pos.x > width - radius {
            p.pos.x = width - radius;
            p.vel.x = -p.vel.x.abs();
        }

        if self.projectile_contact(&p) {
            self.resolve_attachment(p, events);
        } else {
            self.state.shooter.projectile = Some(p);
        }
    }
}

impl Default for BubbleGame {
    fn default() -> Self {
        Self::with_config(BubbleConfig::default(), 0)
    }
}

impl ParlorEngine for BubbleGame {
    fn metadata(&self) -> EngineMetadata {
        EngineMetadata {
            name: "Bubble Burst".to_string(),
            description: "Aim, shoot, and match three to pop. Don't let the rows reach the floor!"
                .to_string(),
            canvas_width: (self.game_config.cols as f32 * self.game_config.cell_size) as u32,
            canvas_height: (self.game_config.rows as f32 * self.game_config.cell_size) as u32,
        }
    }

    fn step(&mut self, dt_ms: f32) -> Vec<EngineEvent> {
        if self.paused || self.state.game_over {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.state.elapsed_ms += dt_ms;

        self.state.shift_timer_ms += dt_ms;
        while self.state.shift_timer_ms >= self.game_config.shift_interval_ms {
            self.state.shift_timer_ms -= self.game_config.shift_interval_ms;
            if self.state.board.bottom_row_occupied() {
                // A shift would push past the bottom row: terminal, and
                // the grid is left untouched.
                self.state.game_over = true;
                events.push(EngineEvent::GameOver);
                return events;
            }
            self.state.board.shift_down(
                &mut self.rng,
                self.game_config.color_count as usize,
                self.game_config.shift_fill_chance,
            );
        }

        self.state
            .shooter
            .smooth(dt_ms, self.game_config.aim_rate);

        self.step_projectile(dt_ms, &mut events);

        events
    }

    fn reset(&mut self) {
        let config = &self.game_config;
        let mut board = Board::new(config.cols, config.rows);
        board.seed_top_rows(
            &mut self.rng,
            config.color_count as usize,
            config.seed_rows,
        );
        self.state = BubbleState {
            board,
            shooter: Shooter::new(&mut self.rng, config.color_count as usize),
            shift_timer_ms: 0.0,
            score: 0,
            elapsed_ms: 0.0,
            game_over: false,
        };
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<BubbleInput>(input) {
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed bubble input");
            },
            Ok(BubbleInput::Aim { x, y }) => self.aim(x, y),
            Ok(BubbleInput::Shoot) => self.shoot(),
        }
    }

    parlor_engine_boilerplate!(state_type: BubbleState);
}
