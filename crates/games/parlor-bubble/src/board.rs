use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use parlor_core::geom::Vec2;

/// Bubble colors. A game samples uniformly from the first `color_count`
/// entries of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleColor {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
    Cyan,
}

impl BubbleColor {
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Red,
        BubbleColor::Yellow,
        BubbleColor::Green,
        BubbleColor::Blue,
        BubbleColor::Purple,
        BubbleColor::Cyan,
    ];

    /// Sample uniformly from the first `count` palette colors.
    pub fn sample(rng: &mut StdRng, count: usize) -> Self {
        let count = count.clamp(1, Self::ALL.len());
        Self::ALL[rng.random_range(0..count)]
    }
}

/// Candidate neighbor offsets for projectile attachment: the four
/// cardinals plus the two diagonal cells below, since bubbles settle
/// downward. Ranked by distance to the contact point at search time.
const ATTACH_NEIGHBORS: [(i32, i32); 6] = [(0, -1), (0, 1), (-1, 0), (1, 0), (1, -1), (1, 1)];

/// The bubble grid, stored row-major. Row 0 is adjacent to the ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub cols: u32,
    pub rows: u32,
    cells: Vec<Option<BubbleColor>>,
}

impl Board {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; (cols * rows) as usize],
        }
    }

    pub fn index(&self, row: u32, col: u32) -> usize {
        (row * self.cols + col) as usize
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && row < self.rows as i32 && col < self.cols as i32
    }

    /// Color at (row, col), or None when empty or out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<BubbleColor> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells[self.index(row as u32, col as u32)]
    }

    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some()
    }

    pub fn set(&mut self, row: u32, col: u32, value: Option<BubbleColor>) {
        if row < self.rows && col < self.cols {
            let i = self.index(row, col);
            self.cells[i] = value;
        }
    }

    /// Iterate occupied cells as (row, col, color).
    pub fn occupied(&self) -> impl Iterator<Item = (u32, u32, BubbleColor)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|color| (i as u32 / self.cols, i as u32 % self.cols, color))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn bottom_row_occupied(&self) -> bool {
        (0..self.cols as i32).any(|col| self.is_occupied(self.rows as i32 - 1, col))
    }

    /// Center of a cell in canvas units.
    pub fn cell_center(&self, row: u32, col: u32, cell_size: f32) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * cell_size,
            (row as f32 + 0.5) * cell_size,
        )
    }

    /// The cell containing a point, clamped onto the grid.
    pub fn cell_at(&self, pos: Vec2, cell_size: f32) -> (i32, i32) {
        let row = (pos.y / cell_size).floor() as i32;
        let col = (pos.x / cell_size).floor() as i32;
        (
            row.clamp(0, self.rows as i32 - 1),
            col.clamp(0, self.cols as i32 - 1),
        )
    }

    /// Resolve the empty cell a projectile attaches to, nearest the
    /// contact point. Search order: the contact cell itself, then its six
    /// neighbor candidates ranked by distance, then an expanding-radius
    /// ring scan. Returns None only when the scan exhausts the board.
    pub fn attach_cell(&self, contact: Vec2, cell_size: f32) -> Option<(u32, u32)> {
        let (row, col) = self.cell_at(contact, cell_size);
        if !self.is_occupied(row, col) {
            return Some((row as u32, col as u32));
        }

        let ranked = self.nearest_empty(
            ATTACH_NEIGHBORS.iter().map(|&(dr, dc)| (row + dr, col + dc)),
            contact,
            cell_size,
        );
        if ranked.is_some() {
            return ranked;
        }

        // The ring scan starts at radius 1 so the two upper-diagonal cells
        // the ranked candidates skip are still reachable.
        let max_radius = self.rows.max(self.cols) as i32;
        for radius in 1..=max_radius {
            let ring = ((row - radius)..=(row + radius)).flat_map(move |r| {
                ((col - radius)..=(col + radius))
                    .filter(move |c| (r - row).abs().max((c - col).abs()) == radius)
                    .map(move |c| (r, c))
            });
            let found = self.nearest_empty(ring, contact, cell_size);
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// The in-bounds empty candidate nearest the contact point, if any.
    fn nearest_empty(
        &self,
        candidates: impl Iterator<Item = (i32, i32)>,
        contact: Vec2,
        cell_size: f32,
    ) -> Option<(u32, u32)> {
        let mut best: Option<(f32, u32, u32)> = None;
        for (r, c) in candidates {
            if !self.in_bounds(r, c) || self.is_occupied(r, c) {
                continue;
            }
            let d = self
                .cell_center(r as u32, c as u32, cell_size)
                .sub(contact)
                .length_squared();
            if best.is_none_or(|(bd, _, _)| d < bd) {
                best = Some((d, r as u32, c as u32));
            }
        }
        best.map(|(_, r, c)| (r, c))
    }

    /// Fill rows 0..seed_rows with random colors. Used on reset.
    pub fn seed_top_rows(&mut self, rng: &mut StdRng, color_count: usize, seed_rows: u32) {
        for row in 0..seed_rows.min(self.rows) {
            for col in 0..self.cols {
                let color = BubbleColor::sample(rng, color_count);
                self.set(row, col, Some(color));
            }
        }
    }

    /// Move every row down by one and seed a partially-random new top
    /// row. The caller checks the bottom row for the terminal condition
    /// before shifting.
    pub fn shift_down(&mut self, rng: &mut StdRng, color_count: usize, fill_chance: f64) {
        for row in (1..self.rows).rev() {
            for col in 0..self.cols {
                let above = self.get(row as i32 - 1, col as i32);
                self.set(row, col, above);
            }
        }
        for col in 0..self.cols {
            let cell = if rng.random_bool(fill_chance) {
                Some(BubbleColor::sample(rng, color_count))
            } else {
                None
            };
            self.set(0, col, cell);
        }
    }
}
