//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//!
//! Write ownership per tick: movement owns `GridPos` (enemies) and `EnemyAi`;
//! combat owns `Vitals`, `EnemyStatus`, `AbilityState` flags and `TowerStatus`;
//! the squad coordinator owns `SquadDirective`, which movement only reads.
//! All `*_until` deadlines are simulation seconds; a deadline at or before
//! `now` is inactive, so 0.0 means "never set".

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GridPos;

/// Marks an entity as a hostile unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Wave-scaled combat and movement stats, fixed at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyStats {
    pub kind: EnemyKind,
    /// Rows per second.
    pub base_speed: f64,
    /// Flat reduction applied to each incoming hit.
    pub armor: f64,
    /// Probability (0..1) of dodging a projectile.
    pub dodge_chance: f64,
    /// Fraction (0..1) by which slow durations are shortened.
    pub cc_resistance: f64,
    /// Damage dealt to the defender per wall strike.
    pub wall_damage: f64,
    /// Gold credited on kill.
    pub bounty: f64,
}

/// Hit points and shield. `alive` flips to false the moment hp reaches 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: f64,
    pub max_hp: f64,
    /// Absorbs damage before hp.
    pub shield: f64,
    pub alive: bool,
}

/// Timed status effects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyStatus {
    pub slowed_until: f64,
    /// Speed multiplier while slowed.
    pub slow_factor: f64,
    pub stunned_until: f64,
    pub invulnerable_until: f64,
    pub invisible_until: f64,
}

/// Ability readiness. The trigger system raises the `needs_*` flags;
/// the matching ability handler lowers them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityState {
    pub needs_stomp: bool,
    pub needs_scream: bool,
    pub needs_drain: bool,
    /// Cells traveled since the last cell-triggered ability.
    pub cells_traveled: f64,
    /// Position at the previous trigger evaluation.
    pub last_pos: GridPos,
    pub last_heal_at: Option<f64>,
    pub last_drain_at: Option<f64>,
    pub last_wall_strike_at: Option<f64>,
}

/// Per-enemy movement AI state, owned by the movement subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyAi {
    pub target_lane: i32,
    /// Earliest time the next lane decision may run.
    pub lane_switch_ready_at: f64,
    pub retreating: bool,
    pub retreat_until: f64,
    /// Start of the most recent retreat (gates the retreat cooldown).
    pub last_retreat_at: Option<f64>,
    pub at_wall: bool,
}

/// Squad affiliation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SquadTag {
    pub squad_id: u32,
    pub role: TacticalRole,
}

/// Transient per-tick orders from the squad coordinator, read by movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadDirective {
    /// Multiplier on effective speed (1.0 = unchanged).
    pub speed_factor: f64,
    /// Time at which the member should begin an evasion (retreat).
    pub evade_at: Option<f64>,
}

impl Default for SquadDirective {
    fn default() -> Self {
        Self {
            speed_factor: 1.0,
            evade_at: None,
        }
    }
}

/// A defensive emplacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
    pub level: u32,
    /// Gold spent on placement and upgrades (drives the sell refund).
    pub invested_gold: f64,
}

/// Slow applied by a projectile on a direct hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowPayload {
    /// Speed multiplier while slowed.
    pub factor: f64,
    pub duration_secs: f64,
}

/// Tower stats derived from kind and level via the balance tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: f64,
    /// Range in cells.
    pub range: f64,
    /// Seconds between shots.
    pub fire_interval_secs: f64,
    pub damage_type: DamageType,
    /// 0.0 for single-target towers.
    pub splash_radius: f64,
    /// Extra enemies a projectile may pass through.
    pub pierce: u32,
    /// Chain hops after a primary hit.
    pub chain: u32,
    pub slow: Option<SlowPayload>,
}

/// Tower disable state and fire bookkeeping, owned by combat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TowerStatus {
    pub stunned_until: f64,
    pub disabled_until: f64,
    pub last_fire_at: Option<f64>,
    /// Display flag: the tower is currently stunned.
    pub shows_stunned: bool,
    /// Display flag: the tower is currently disabled.
    pub shows_disabled: bool,
}
