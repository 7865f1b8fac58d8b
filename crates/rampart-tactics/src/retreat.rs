//! Timed retreat when the way ahead is jammed.

use rampart_core::components::EnemyAi;
use rampart_core::constants::{BLOCKER_AHEAD_ROWS, BLOCKER_LATERAL_BAND, RETREAT_BLOCKER_THRESHOLD};
use rampart_core::types::GridPos;

use crate::context::Neighbor;
use crate::profiles::MovementProfile;

/// Count neighbors directly ahead in a narrow lateral band.
pub fn count_blockers(pos: GridPos, self_key: u64, neighbors: &[Neighbor]) -> usize {
    neighbors
        .iter()
        .filter(|n| {
            let ahead = n.pos.row - pos.row;
            n.key != self_key
                && (n.pos.col - pos.col).abs() < BLOCKER_LATERAL_BAND
                && ahead > 0.0
                && ahead < BLOCKER_AHEAD_ROWS
        })
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatDecision {
    /// Not retreating; move forward.
    Advance,
    /// Start a retreat this tick.
    Begin,
    /// Retreat in progress.
    Continue,
    /// Retreat timer expired this tick; move forward again.
    End,
}

/// Decide the retreat transition. `evade_ordered` forces a retreat start
/// (subject to the same cooldown) regardless of blockers.
pub fn evaluate(
    ai: &EnemyAi,
    blockers: usize,
    evade_ordered: bool,
    now: f64,
    profile: &MovementProfile,
) -> RetreatDecision {
    if ai.retreating {
        return if now >= ai.retreat_until {
            RetreatDecision::End
        } else {
            RetreatDecision::Continue
        };
    }

    let cooled_down = ai
        .last_retreat_at
        .is_none_or(|started| now - started >= profile.retreat_cooldown_secs);
    if cooled_down && (blockers >= RETREAT_BLOCKER_THRESHOLD || evade_ordered) {
        RetreatDecision::Begin
    } else {
        RetreatDecision::Advance
    }
}

/// Apply a retreat decision to the AI state.
pub fn apply(ai: &mut EnemyAi, decision: RetreatDecision, now: f64, profile: &MovementProfile) {
    match decision {
        RetreatDecision::Begin => {
            ai.retreating = true;
            ai.retreat_until = now + profile.retreat_duration_secs;
            ai.last_retreat_at = Some(now);
        }
        RetreatDecision::End => {
            ai.retreating = false;
        }
        RetreatDecision::Advance | RetreatDecision::Continue => {}
    }
}
