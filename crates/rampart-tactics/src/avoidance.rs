//! Neighbor avoidance steering.
//!
//! Each live neighbor inside the detection radius pushes the mover away,
//! with a strength that grows linearly as the gap closes. The pushes are
//! averaged so a dense crowd does not produce an unbounded force.

use glam::DVec2;

use rampart_core::constants::{AVOIDANCE_BLOCK_THRESHOLD, MIN_FORWARD_FACTOR};
use rampart_core::types::GridPos;

use crate::context::Neighbor;

/// Average repulsion from neighbors within `radius`, scaled by `strength`.
/// `x` is the lateral (column) component, `y` the forward (row) component.
/// Exactly zero when no other neighbor is inside the radius.
pub fn avoidance_force(
    pos: GridPos,
    self_key: u64,
    neighbors: &[Neighbor],
    radius: f64,
    strength: f64,
) -> DVec2 {
    let origin = pos.as_vec();
    let mut sum = DVec2::ZERO;
    let mut count = 0usize;

    for neighbor in neighbors {
        if neighbor.key == self_key {
            continue;
        }
        let away = origin - neighbor.pos.as_vec();
        let distance = away.length();
        // Coincident neighbors have no direction to push along.
        if distance >= radius || distance <= f64::EPSILON {
            continue;
        }
        let closeness = (radius - distance) / radius;
        sum += away / distance * closeness;
        count += 1;
    }

    if count == 0 {
        return DVec2::ZERO;
    }
    sum / count as f64 * strength
}

/// Forward speed multiplier derived from the vertical avoidance component.
/// A strong push back (negative `y`) means something is blocking ahead.
pub fn forward_damping(force: DVec2) -> f64 {
    if force.y < -AVOIDANCE_BLOCK_THRESHOLD {
        (1.0 + force.y).clamp(MIN_FORWARD_FACTOR, 1.0)
    } else {
        1.0
    }
}
