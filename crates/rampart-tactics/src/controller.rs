//! Movement controller: composes the steering primitives into one
//! per-enemy update.
//!
//! Operates on a `Mover` copied out of the world; the caller writes the
//! resulting position and AI state back. Per-kind behavior comes from
//! `MovementProfile` configuration, not from separate controller types.

use std::collections::HashMap;

use rand::Rng;

use rampart_core::components::{EnemyAi, EnemyStatus, SquadDirective};
use rampart_core::constants::*;
use rampart_core::enums::EnemyKind;
use rampart_core::types::GridPos;

use crate::avoidance;
use crate::context::{Neighbor, TowerCoverage};
use crate::lane;
use crate::obstacle;
use crate::profiles::{movement_profile, MovementProfile};
use crate::retreat::{self, RetreatDecision};

/// Everything the controller reads and writes for one enemy.
#[derive(Debug, Clone)]
pub struct Mover {
    pub key: u64,
    pub kind: EnemyKind,
    pub pos: GridPos,
    pub base_speed: f64,
    pub status: EnemyStatus,
    pub directive: SquadDirective,
    pub ai: EnemyAi,
}

/// What happened during one update, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementOutcome {
    pub moved: bool,
    /// (from, to) when the target lane changed.
    pub lane_switch: Option<(i32, i32)>,
    pub retreat_started: bool,
    pub deconflicted: bool,
}

/// Speed after slow and squad throttling.
pub fn effective_speed(
    base_speed: f64,
    status: &EnemyStatus,
    directive: &SquadDirective,
    now: f64,
) -> f64 {
    let slow = if now < status.slowed_until {
        if status.slow_factor > 0.0 {
            status.slow_factor
        } else {
            DEFAULT_SLOW_FACTOR
        }
    } else {
        1.0
    };
    base_speed * slow * directive.speed_factor.max(0.0)
}

#[derive(Debug, Clone, Default)]
pub struct MovementController {
    overrides: HashMap<EnemyKind, MovementProfile>,
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in tuning for one kind.
    pub fn with_profile(mut self, kind: EnemyKind, profile: MovementProfile) -> Self {
        self.overrides.insert(kind, profile);
        self
    }

    pub fn profile(&self, kind: EnemyKind) -> MovementProfile {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| movement_profile(kind))
    }

    /// Set the initial AI state for a freshly spawned enemy. The first lane
    /// decision is delayed by a small random amount so a swarm spawned on the
    /// same tick does not decide in lockstep.
    pub fn initialize_enemy<R: Rng>(&self, ai: &mut EnemyAi, pos: GridPos, now: f64, rng: &mut R) {
        *ai = EnemyAi {
            target_lane: pos.lane(),
            lane_switch_ready_at: now + rng.gen_range(0.0..INITIAL_LANE_JITTER_SECS),
            at_wall: (WALL_ROW - pos.row) <= WALL_EPSILON,
            ..EnemyAi::default()
        };
    }

    /// Advance one enemy by `dt`. `neighbors` are the other live enemies
    /// (an entry with the mover's own key is ignored).
    pub fn update_movement(
        &self,
        mover: &mut Mover,
        dt: f64,
        now: f64,
        neighbors: &[Neighbor],
        towers: &[TowerCoverage],
    ) -> MovementOutcome {
        let mut outcome = MovementOutcome::default();
        if now < mover.status.stunned_until {
            return outcome;
        }

        let profile = self.profile(mover.kind);
        let speed = effective_speed(mover.base_speed, &mover.status, &mover.directive, now);
        let key = mover.key;

        // Retreat.
        let blockers = retreat::count_blockers(mover.pos, key, neighbors);
        let evade_ordered = mover.directive.evade_at.is_some_and(|at| now >= at);
        let decision = retreat::evaluate(&mover.ai, blockers, evade_ordered, now, &profile);
        retreat::apply(&mut mover.ai, decision, now, &profile);
        outcome.retreat_started = decision == RetreatDecision::Begin;
        if outcome.retreat_started {
            tracing::debug!(enemy = key, blockers, evade_ordered, "retreat started");
        }
        let retreating = mover.ai.retreating;

        let mut d_row = if retreating {
            -speed * RETREAT_SPEED_FACTOR * dt
        } else {
            speed * dt
        };

        // Lane decision.
        if now >= mover.ai.lane_switch_ready_at {
            let current = mover.ai.target_lane;
            let decision = lane::decide_lane(current, mover.pos, key, neighbors, towers);
            if let Some(next) = decision.switch_to {
                mover.ai.target_lane = next;
                outcome.lane_switch = Some((current, next));
                tracing::debug!(enemy = key, from = current, to = next, "lane switch");
            }
            mover.ai.lane_switch_ready_at = now + profile.lane_switch_cooldown_secs;
        }

        // Avoidance.
        let force = avoidance::avoidance_force(
            mover.pos,
            key,
            neighbors,
            profile.detection_radius,
            profile.avoidance_strength,
        );
        if !retreating {
            d_row *= avoidance::forward_damping(force);
        }

        let target_col = mover.ai.target_lane as f64;
        let mut desired_col = target_col + force.x * AVOIDANCE_LATERAL_WEIGHT;
        if (mover.pos.col - target_col).abs() > LANE_ARRIVAL_EPSILON {
            // Mid-switch: never aim past the target lane.
            let (lo, hi) = if mover.pos.col < target_col {
                (mover.pos.col, target_col)
            } else {
                (target_col, mover.pos.col)
            };
            desired_col = desired_col.clamp(lo, hi);
        }

        // Lateral closing.
        let max_lateral = speed * profile.lateral_speed_factor * dt;
        let d_col = (desired_col - mover.pos.col).clamp(-max_lateral, max_lateral);

        // Apply, clamp, and hold the spawn boundary.
        let mut next = GridPos::new(mover.pos.col + d_col, mover.pos.row + d_row).clamped();
        let min_row = if retreating { MIN_ROW } else { SPAWN_ROW.min(mover.pos.row) };
        if next.row < min_row {
            next.row = min_row;
        }

        // De-confliction.
        if !retreating && obstacle::is_crowded(next, key, neighbors) {
            if let Some(free) = obstacle::find_free_cell(next, key, neighbors, min_row) {
                next = free;
                outcome.deconflicted = true;
            }
        }

        outcome.moved = next != mover.pos;
        mover.pos = next;
        mover.ai.at_wall = (WALL_ROW - mover.pos.row) <= WALL_EPSILON;
        outcome
    }
}
