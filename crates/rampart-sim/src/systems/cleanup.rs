//! Cleanup system: removes dead enemies, enemies off the playfield, and
//! spent projectiles.

use hecs::Entity;

use rampart_core::components::{Enemy, Vitals};
use rampart_core::types::GridPos;

use rampart_tactics::threat::ThreatAssessment;

use crate::context::{entity_id, SimContext};
use crate::projectile::Projectile;

/// Despawn everything that is finished and forget its cached threat scores.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(ctx: &mut SimContext, threat: &mut ThreatAssessment, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_enemy, pos, vitals)) in ctx.world.query_mut::<(&Enemy, &GridPos, &Vitals)>() {
        if !vitals.alive || !pos.in_bounds() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in ctx.world.query_mut::<&Projectile>() {
        if !projectile.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        threat.forget(entity_id(entity));
        let _ = ctx.world.despawn(entity);
    }
    threat.prune(ctx.now);
}
