//! Plain-data views of the world handed to the tactical algorithms.

use rampart_core::types::GridPos;

/// Another live enemy, as seen by the steering primitives.
/// `key` identifies the entity so an enemy can skip itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub key: u64,
    pub pos: GridPos,
    /// Lane the neighbor is heading for. Mid-switch it occupies both lanes.
    pub target_lane: i32,
}

/// A tower's coverage area, weighted by how much it threatens the mover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerCoverage {
    pub pos: GridPos,
    pub range: f64,
    /// Multiplier on the lane coverage penalty (1.0 = neutral).
    pub pressure: f64,
}

impl TowerCoverage {
    pub fn new(pos: GridPos, range: f64) -> Self {
        Self {
            pos,
            range,
            pressure: 1.0,
        }
    }

    pub fn covers(&self, point: &GridPos) -> bool {
        self.pos.distance_to(point) <= self.range
    }
}
