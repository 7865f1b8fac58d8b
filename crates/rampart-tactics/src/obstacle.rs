//! Personal-space checks and fixed-offset de-confliction.

use rampart_core::constants::{DECONFLICT_OFFSETS, PERSONAL_SPACE_RADIUS};
use rampart_core::types::GridPos;

use crate::context::Neighbor;

/// Whether any other neighbor sits within the personal-space radius of `pos`.
pub fn is_crowded(pos: GridPos, self_key: u64, neighbors: &[Neighbor]) -> bool {
    neighbors
        .iter()
        .any(|n| n.key != self_key && n.pos.distance_to(&pos) < PERSONAL_SPACE_RADIUS)
}

/// First offset alternative around `pos` that is in bounds, not above
/// `min_row`, and uncrowded.
pub fn find_free_cell(
    pos: GridPos,
    self_key: u64,
    neighbors: &[Neighbor],
    min_row: f64,
) -> Option<GridPos> {
    DECONFLICT_OFFSETS
        .iter()
        .map(|&(dc, dr)| GridPos::new(pos.col + dc, pos.row + dr))
        .find(|candidate| {
            candidate.in_bounds()
                && candidate.row >= min_row
                && !is_crowded(*candidate, self_key, neighbors)
        })
}
