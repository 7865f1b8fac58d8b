//! Combat system: abilities, then tower fire, then projectile collisions.
//!
//! Runs in a fixed order each tick: ability effects first, so a stun or
//! disable raised this tick already stops the affected towers from firing;
//! then every tower gets at most one shot; then projectiles resolve.

pub mod abilities;
pub mod collision;
pub mod damage;
pub mod targeting;
pub mod tower_status;

use hecs::Entity;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::enums::TowerKind;
use rampart_core::events::AudioEvent;
use rampart_core::types::GridPos;

use crate::context::{entity_id, SimContext};
use crate::projectile::{Projectile, TargetLock};

pub fn run(ctx: &mut SimContext) {
    abilities::run(ctx);
    fire_towers(ctx);
    collision::run(ctx);
}

/// Give every ready tower one shot at its best target.
pub fn fire_towers(ctx: &mut SimContext) {
    let towers: Vec<(Entity, TowerKind, GridPos, TowerStats)> = ctx
        .world
        .query::<(&Tower, &GridPos, &TowerStats)>()
        .iter()
        .map(|(entity, (tower, pos, stats))| (entity, tower.kind, *pos, stats.clone()))
        .collect();

    for (entity, kind, pos, stats) in towers {
        let now = ctx.now;
        let ready = match ctx.world.query_one_mut::<&mut TowerStatus>(entity) {
            Ok(status) => {
                tower_status::can_act(status, now)
                    && tower_status::is_reloaded(status, stats.fire_interval_secs, now)
            }
            Err(_) => false,
        };
        if !ready {
            continue;
        }

        let target = targeting::find_target(ctx.world, pos, stats.range, now);
        if let Ok(mut lock) = ctx.world.get::<&mut TargetLock>(entity) {
            lock.0 = target;
        }
        let Some(target) = target else {
            continue;
        };
        let Some(target_pos) = ctx.world.get::<&GridPos>(target).ok().map(|p| *p) else {
            continue;
        };

        if let Ok(mut status) = ctx.world.get::<&mut TowerStatus>(entity) {
            status.last_fire_at = Some(now);
        }

        let origin = pos.as_vec();
        let velocity = (target_pos.as_vec() - origin).normalize_or_zero() * PROJECTILE_SPEED;
        ctx.world.spawn((Projectile {
            pos: origin,
            velocity,
            damage: stats.damage,
            ignores_armor: stats.damage_type.ignores_armor(),
            owner: entity,
            target: Some(target),
            splash_radius: stats.splash_radius,
            pierce_remaining: stats.pierce,
            chain: stats.chain,
            slow: stats.slow,
            hit: Vec::new(),
            active: true,
            spawned_at: now,
        },));

        let tower = entity_id(entity);
        ctx.audio.push(AudioEvent::TowerFired {
            tower,
            kind,
            col: pos.col,
            row: pos.row,
        });
        ctx.events
            .schedule(now + TOWER_RECOIL_SECS, AudioEvent::TowerRecoilEnd { tower });
        tracing::debug!(tower, target = entity_id(target), "tower fired");
    }
}
