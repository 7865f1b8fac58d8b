//! Sim-side components that hold entity handles.
//!
//! These live here rather than in rampart-core because they reference
//! `hecs::Entity`. Handles are weak: every use revalidates them against the
//! world.

use glam::DVec2;
use hecs::Entity;

use rampart_core::components::SlowPayload;

/// A projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: DVec2,
    /// Cells per second.
    pub velocity: DVec2,
    pub damage: f64,
    pub ignores_armor: bool,
    /// Tower that fired it.
    pub owner: Entity,
    /// Homing target. `None` once a piercing projectile flies on straight.
    pub target: Option<Entity>,
    pub splash_radius: f64,
    pub pierce_remaining: u32,
    pub chain: u32,
    pub slow: Option<SlowPayload>,
    /// Enemies already struck or dodged. Never holds duplicates.
    pub hit: Vec<Entity>,
    pub active: bool,
    pub spawned_at: f64,
}

impl Projectile {
    pub fn has_hit(&self, entity: Entity) -> bool {
        self.hit.contains(&entity)
    }

    /// Record `entity` in the hit set (no-op if already present).
    pub fn mark_hit(&mut self, entity: Entity) {
        if !self.has_hit(entity) {
            self.hit.push(entity);
        }
    }
}

/// A tower's current target lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetLock(pub Option<Entity>);
