//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{GRID_COLS, MIN_ROW, WALL_ROW};

/// Position on the playfield grid.
/// `col` grows to the right, `row` grows toward the wall (downfield).
/// Both are fractional; integer values are cell centers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPos {
    pub col: f64,
    pub row: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl GridPos {
    pub fn new(col: f64, row: f64) -> Self {
        Self { col, row }
    }

    /// Euclidean distance to another position, in cells.
    pub fn distance_to(&self, other: &GridPos) -> f64 {
        let dc = other.col - self.col;
        let dr = other.row - self.row;
        (dc * dc + dr * dr).sqrt()
    }

    /// Discrete lane (column index) this position belongs to.
    pub fn lane(&self) -> i32 {
        self.col.round() as i32
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.col, self.row)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { col: v.x, row: v.y }
    }

    /// Whether the position lies inside the playfield (spawn margin included).
    pub fn in_bounds(&self) -> bool {
        self.col >= 0.0
            && self.col <= (GRID_COLS - 1) as f64
            && self.row >= MIN_ROW
            && self.row <= WALL_ROW
    }

    /// Clamp to the playfield bounds.
    pub fn clamped(&self) -> Self {
        Self {
            col: self.col.clamp(0.0, (GRID_COLS - 1) as f64),
            row: self.row.clamp(MIN_ROW, WALL_ROW),
        }
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
