//! Lane scoring and hysteresis-bounded lane selection.

use rampart_core::constants::*;
use rampart_core::types::GridPos;

use crate::context::{Neighbor, TowerCoverage};

/// Score a lane for an enemy at `pos`. Higher is better.
///
/// Penalizes same-lane enemies ahead within the lookahead window (closer is
/// worse), same-lane enemies very close in either direction, and towers
/// covering the lane just ahead; adds a small bias toward the center lane.
/// A neighbor is in a lane when its column is within half a lane of it or
/// it is heading there.
pub fn lane_score(
    lane: i32,
    pos: GridPos,
    self_key: u64,
    neighbors: &[Neighbor],
    towers: &[TowerCoverage],
) -> f64 {
    let lane_col = lane as f64;
    let mut score = 0.0;

    for neighbor in neighbors {
        let in_lane = (neighbor.pos.col - lane_col).abs() < 0.5 || neighbor.target_lane == lane;
        if neighbor.key == self_key || !in_lane {
            continue;
        }
        let ahead = neighbor.pos.row - pos.row;
        if ahead > 0.0 && ahead < LANE_LOOKAHEAD_ROWS {
            score -= LANE_CROWD_PENALTY * (1.0 - ahead / LANE_LOOKAHEAD_ROWS);
        }
        if ahead.abs() < LANE_VERY_CLOSE_ROWS {
            score -= LANE_VERY_CLOSE_PENALTY;
        }
    }

    let just_ahead = GridPos::new(lane_col, pos.row + 1.0);
    for tower in towers {
        if tower.covers(&just_ahead) {
            score -= LANE_TOWER_PENALTY * tower.pressure;
        }
    }

    let center = (GRID_COLS - 1) as f64 / 2.0;
    score += LANE_CENTER_BIAS * (1.0 - (lane_col - center).abs() / center);
    score
}

/// Whether a candidate lane beats the current one by more than the margin.
pub fn beats_with_hysteresis(current_score: f64, candidate_score: f64) -> bool {
    candidate_score - current_score > LANE_HYSTERESIS_MARGIN
}

/// Result of one lane evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneDecision {
    pub current_score: f64,
    /// Best adjacent lane and its score, if any adjacent lane exists.
    pub best_adjacent: Option<(i32, f64)>,
    /// The lane to switch to, when the best adjacent lane clears the margin.
    pub switch_to: Option<i32>,
}

/// Score the current lane and its two neighbors and decide whether to switch.
/// Ties between the adjacent lanes go to the one nearer the center, then to
/// the lower index.
pub fn decide_lane(
    current: i32,
    pos: GridPos,
    self_key: u64,
    neighbors: &[Neighbor],
    towers: &[TowerCoverage],
) -> LaneDecision {
    let current_score = lane_score(current, pos, self_key, neighbors, towers);
    let center = (GRID_COLS - 1) as f64 / 2.0;

    let mut best_adjacent: Option<(i32, f64)> = None;
    for lane in [current - 1, current + 1] {
        if lane < 0 || lane >= GRID_COLS as i32 {
            continue;
        }
        let score = lane_score(lane, pos, self_key, neighbors, towers);
        best_adjacent = match best_adjacent {
            None => Some((lane, score)),
            Some((best_lane, best_score)) => {
                let nearer_center =
                    (lane as f64 - center).abs() < (best_lane as f64 - center).abs();
                if score > best_score || (score == best_score && nearer_center) {
                    Some((lane, score))
                } else {
                    Some((best_lane, best_score))
                }
            }
        };
    }

    let switch_to = best_adjacent
        .filter(|&(_, score)| beats_with_hysteresis(current_score, score))
        .map(|(lane, _)| lane);

    LaneDecision {
        current_score,
        best_adjacent,
        switch_to,
    }
}
