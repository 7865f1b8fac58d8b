//! Enemy movement system.
//!
//! Snapshot-then-apply: every live enemy is copied out of the world, run
//! through the movement controller against the shared neighbor snapshot, and
//! written back. Enemies nearest the wall move first (ties by id), and each
//! snapshot entry is refreshed as soon as its enemy has moved, so the ones
//! behind see the leaders' new positions and lane choices.

use hecs::Entity;

use rampart_core::components::*;
use rampart_core::types::GridPos;

use rampart_tactics::context::Neighbor;
use rampart_tactics::controller::{Mover, MovementController};
use rampart_tactics::threat::{EnemySnapshot, ThreatAssessment};

use crate::context::{entity_id, SimContext};
use crate::systems::survey;

pub fn run(ctx: &mut SimContext, controller: &MovementController, threat: &mut ThreatAssessment) {
    let towers = survey::tower_snapshots(ctx.world);

    let mut movers: Vec<(Entity, Mover, EnemySnapshot)> = ctx
        .world
        .query::<(
            &Enemy,
            &GridPos,
            &EnemyStats,
            &Vitals,
            &EnemyStatus,
            &SquadDirective,
            &EnemyAi,
        )>()
        .iter()
        .filter(|(_, (_, _, _, vitals, ..))| vitals.alive)
        .map(|(entity, (_, pos, stats, vitals, status, directive, ai))| {
            let key = entity_id(entity);
            let mover = Mover {
                key,
                kind: stats.kind,
                pos: *pos,
                base_speed: stats.base_speed,
                status: status.clone(),
                directive: directive.clone(),
                ai: ai.clone(),
            };
            (entity, mover, survey::enemy_snapshot(key, *pos, stats, vitals))
        })
        .collect();
    movers.sort_by(|(_, a, _), (_, b, _)| {
        b.pos.row.total_cmp(&a.pos.row).then(a.key.cmp(&b.key))
    });

    let mut neighbors: Vec<Neighbor> = movers
        .iter()
        .map(|(_, mover, _)| Neighbor {
            key: mover.key,
            pos: mover.pos,
            target_lane: mover.ai.target_lane,
        })
        .collect();

    for (index, (_, mover, snapshot)) in movers.iter_mut().enumerate() {
        let coverage = survey::coverage_for(threat, &towers, snapshot, ctx.now);
        controller.update_movement(mover, ctx.dt, ctx.now, &neighbors, &coverage);
        neighbors[index].pos = mover.pos;
        neighbors[index].target_lane = mover.ai.target_lane;
    }

    for (entity, mover, _) in movers {
        if let Ok((pos, ai)) = ctx.world.query_one_mut::<(&mut GridPos, &mut EnemyAi)>(entity) {
            *pos = mover.pos;
            *ai = mover.ai;
        }
    }
}
