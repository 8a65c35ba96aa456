pub mod config;
pub mod grid;

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use parlor_core::engine::{EngineEvent, EngineMetadata, ParlorEngine};
use parlor_core::parlor_engine_boilerplate;
use parlor_core::registry::{GameEntry, GameId};

use config::SnakeConfig;
use grid::{Cell, Direction};

/// Serializable snake state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeState {
    /// Body cells, head first. Length never drops below 1.
    pub body: VecDeque<Cell>,
    /// Direction applied on the most recent advance.
    pub direction: Direction,
    /// Buffered direction input, applied at the start of the next advance.
    pub pending_direction: Option<Direction>,
    /// Current food cell. None while placement is abandoned on a nearly
    /// full board; re-attempted on the next advance.
    pub food: Option<Cell>,
    pub score: u32,
    /// Count of grid advances since reset.
    pub ticks: u64,
    pub elapsed_ms: f32,
    pub game_over: bool,
}

/// Input record for the snake engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SnakeInput {
    pub direction: Direction,
}

/// The toroidal grid snake engine.
pub struct SnakeGame {
    state: SnakeState,
    game_config: SnakeConfig,
    rng: StdRng,
    step_accum_ms: f32,
    paused: bool,
}

/// Direction the snake faces at spawn.
const SPAWN_DIRECTION: Direction = Direction::Right;

impl SnakeGame {
    pub fn new() -> Self {
        Self::with_config(SnakeConfig::load(), rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SnakeConfig::load(), seed)
    }

    pub fn with_config(config: SnakeConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let mut game = Self {
            state: SnakeState {
                body: VecDeque::new(),
                direction: SPAWN_DIRECTION,
                pending_direction: None,
                food: None,
                score: 0,
                ticks: 0,
                elapsed_ms: 0.0,
                game_over: false,
            },
            game_config: config,
            rng: StdRng::seed_from_u64(seed),
            step_accum_ms: 0.0,
            paused: false,
        };
        game.reset();
        game
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.game_config
    }

    /// Catalog entry for the arcade shell.
    pub fn entry() -> GameEntry {
        GameEntry {
            id: GameId("snake".to_string()),
            metadata: Self::default().metadata(),
        }
    }

    /// Buffer a direction change for the next advance. Rejected without
    /// state change when it is the exact reverse of the current direction.
    pub fn change_direction(&mut self, dir: Direction) {
        if dir.is_reversal_of(self.state.direction) {
            return;
        }
        self.state.pending_direction = Some(dir);
    }

    /// One discrete grid advance.
    fn advance(&mut self, events: &mut Vec<EngineEvent>) {
        // Apply the buffered direction, re-checking reversal against the
        // current direction at apply time.
        if let Some(pending) = self.state.pending_direction.take()
            && !pending.is_reversal_of(self.state.direction)
        {
            self.state.direction = pending;
        }

        let cols = self.game_config.cols as i32;
        let rows = self.game_config.rows as i32;
        let head = self.state.body[0];
        let next = head.stepped(self.state.direction, cols, rows);

        // Self-collision against the pre-move body, excluding the current
        // head. The tail counts: it has not been removed yet.
        if self.state.body.iter().skip(1).any(|&c| c == next) {
            self.state.game_over = true;
            events.push(EngineEvent::GameOver);
            return;
        }

        self.state.body.push_front(next);
        if self.state.food == Some(next) {
            self.state.score += 1;
            self.state.food = None;
            events.push(EngineEvent::ScoreUpdate {
                score: self.state.score,
            });
        } else {
            self.state.body.pop_back();
        }

        if self.state.food.is_none() {
            self.place_food();
        }
        self.state.ticks += 1;
    }

    /// Sample a food cell uniformly among cells the snake does not occupy.
    /// Gives up after `food_retry_limit` failed samples; the board is
    /// nearly full when that happens and the next advance retries.
    fn place_food(&mut self) {
        let cols = self.game_config.cols as i32;
        let rows = self.game_config.rows as i32;
        for _ in 0..self.game_config.food_retry_limit {
            let cell = Cell::new(
                self.rng.random_range(0..cols),
                self.rng.random_range(0..rows),
            );
            if !self.state.body.contains(&cell) {
                self.state.food = Some(cell);
                return;
            }
        }
        tracing::debug!(
            retries = self.game_config.food_retry_limit,
            "Food placement abandoned for this advance"
        );
    }

    /// Build the spawn body: head centered, trailing cells extending
    /// opposite the spawn direction, wrapping if the grid is small.
    fn spawn_body(config: &SnakeConfig) -> VecDeque<Cell> {
        let cols = config.cols as i32;
        let rows = config.rows as i32;
        let head = Cell::new(cols / 2, rows / 2);
        let (dx, dy) = SPAWN_DIRECTION.delta();
        (0..config.initial_length as i32)
            .map(|i| {
                Cell::new(
                    parlor_core::geom::wrap(head.x - dx * i, cols),
                    parlor_core::geom::wrap(head.y - dy * i, rows),
                )
            })
            .collect()
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::with_config(SnakeConfig::default(), 0)
    }
}

impl ParlorEngine for SnakeGame {
    fn metadata(&self) -> EngineMetadata {
        EngineMetadata {
            name: "Snake".to_string(),
            description: "Eat, grow, and never bite yourself. The edges wrap around!".to_string(),
            canvas_width: self.game_config.cols * self.game_config.cell_px,
            canvas_height: self.game_config.rows * self.game_config.cell_px,
        }
    }

    fn tick_rate(&self) -> f32 {
        30.0
    }

    fn step(&mut self, dt_ms: f32) -> Vec<EngineEvent> {
        if self.paused || self.state.game_over {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.state.elapsed_ms += dt_ms;
        self.step_accum_ms += dt_ms;
        while self.step_accum_ms >= self.game_config.step_interval_ms && !self.state.game_over {
            self.step_accum_ms -= self.game_config.step_interval_ms;
            self.advance(&mut events);
        }
        events
    }

    fn reset(&mut self) {
        self.state = SnakeState {
            body: Self::spawn_body(&self.game_config),
            direction: SPAWN_DIRECTION,
            pending_direction: None,
            food: None,
            score: 0,
            ticks: 0,
            elapsed_ms: 0.0,
            game_over: false,
        };
        self.step_accum_ms = 0.0;
        self.place_food();
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<SnakeInput>(input) {
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed snake input");
            },
            Ok(si) => self.change_direction(si.direction),
        }
    }

    parlor_engine_boilerplate!(state_type: SnakeState);
}
