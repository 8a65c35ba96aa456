use serde::{Deserialize, Serialize};

use parlor_core::geom::wrap;

/// A cell on the toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in `dir`, wrapping both axes onto the
    /// grid. Moving past any edge reappears on the opposite edge.
    pub fn stepped(self, dir: Direction, cols: i32, rows: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: wrap(self.x + dx, cols),
            y: wrap(self.y + dy, rows),
        }
    }
}

/// Cardinal movement direction on the grid. Y grows downward (canvas
/// convention), so `Up` is (0, -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit cell delta for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Whether this direction is the exact reverse of `other`.
    pub fn is_reversal_of(self, other: Self) -> bool {
        self == other.reversed()
    }
}
