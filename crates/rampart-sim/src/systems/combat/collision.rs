//! Projectile flight and collision resolution.
//!
//! Each active projectile homes on its target while the target lives, then
//! tests for contact with any live, visible enemy it has not hit yet. A hit
//! rolls dodge first; a real hit applies primary damage, slow, splash, then
//! chain, and ends the projectile unless piercing budget remains.

use hecs::Entity;
use rand::Rng;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::events::AudioEvent;
use rampart_core::types::GridPos;

use crate::context::{entity_id, SimContext};
use crate::projectile::Projectile;
use crate::systems::combat::damage;

/// A live enemy as seen by collision tests.
#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    id: u64,
    pos: GridPos,
    dodge_chance: f64,
    visible: bool,
}

fn live_bodies(ctx: &SimContext) -> Vec<Body> {
    ctx.world
        .query::<(&Enemy, &GridPos, &EnemyStats, &Vitals, &EnemyStatus)>()
        .iter()
        .filter(|(_, (_, _, _, vitals, _))| vitals.alive)
        .map(|(entity, (_, pos, stats, _, status))| Body {
            entity,
            id: entity_id(entity),
            pos: *pos,
            dodge_chance: stats.dodge_chance,
            visible: ctx.now >= status.invisible_until,
        })
        .collect()
}

/// Nearest body matching `eligible` within `radius` of `from`; ties go to
/// the lowest entity id.
fn nearest(bodies: &[Body], from: GridPos, radius: f64, eligible: impl Fn(&Body) -> bool) -> Option<Body> {
    bodies
        .iter()
        .filter(|b| eligible(b))
        .map(|b| (b.pos.distance_to(&from), b))
        .filter(|(d, _)| *d <= radius)
        .min_by(|(da, a), (db, b)| da.total_cmp(db).then(a.id.cmp(&b.id)))
        .map(|(_, b)| *b)
}

fn is_live(ctx: &SimContext, entity: Entity) -> bool {
    ctx.world
        .get::<&Vitals>(entity)
        .map(|vitals| vitals.alive)
        .unwrap_or(false)
}

pub fn run(ctx: &mut SimContext) {
    let entities: Vec<Entity> = ctx
        .world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, projectile)| projectile.active)
        .map(|(entity, _)| entity)
        .collect();

    for entity in entities {
        let Some(mut projectile) = ctx.world.get::<&Projectile>(entity).ok().map(|p| (*p).clone()) else {
            continue;
        };
        step(ctx, &mut projectile);
        if let Ok(mut stored) = ctx.world.get::<&mut Projectile>(entity) {
            *stored = projectile;
        }
    }
}

/// Advance one projectile by one tick.
pub fn step(ctx: &mut SimContext, projectile: &mut Projectile) {
    // Revalidate the homing target.
    if let Some(target) = projectile.target {
        let target_pos = if is_live(ctx, target) {
            ctx.world.get::<&GridPos>(target).ok().map(|pos| *pos)
        } else {
            None
        };
        match target_pos {
            Some(pos) => {
                let heading = (pos.as_vec() - projectile.pos).normalize_or_zero();
                if heading != glam::DVec2::ZERO {
                    projectile.velocity = heading * PROJECTILE_SPEED;
                }
            }
            None => {
                projectile.active = false;
                return;
            }
        }
    }

    projectile.pos += projectile.velocity * ctx.dt;
    let expired = ctx.now - projectile.spawned_at > PROJECTILE_MAX_LIFETIME_SECS;
    if expired || !GridPos::from_vec(projectile.pos).in_bounds() {
        projectile.active = false;
        return;
    }

    let bodies = live_bodies(ctx);
    let here = GridPos::from_vec(projectile.pos);
    let Some(struck) = nearest(&bodies, here, PROJECTILE_HIT_RADIUS, |b| {
        b.visible && !projectile.has_hit(b.entity)
    }) else {
        return;
    };

    projectile.mark_hit(struck.entity);

    if ctx.rng.gen::<f64>() < struck.dodge_chance {
        ctx.audio.push(AudioEvent::EnemyDodged {
            enemy: struck.id,
            col: struck.pos.col,
            row: struck.pos.row,
        });
        if projectile.target == Some(struck.entity) {
            projectile.target = None;
        }
        return;
    }

    damage::deal(ctx, struck.entity, projectile.damage, projectile.ignores_armor);
    if let Some(slow) = projectile.slow {
        if let Ok((stats, vitals, status)) = ctx
            .world
            .query_one_mut::<(&EnemyStats, &Vitals, &mut EnemyStatus)>(struck.entity)
        {
            if vitals.alive {
                damage::apply_slow(status, stats.cc_resistance, &slow, ctx.now);
            }
        }
    }

    if projectile.splash_radius > 0.0 {
        splash(ctx, projectile, &struck, &bodies);
    }
    if projectile.chain > 0 {
        chain(ctx, projectile, &struck);
    }

    if projectile.pierce_remaining > 0 {
        projectile.pierce_remaining -= 1;
        projectile.target = None;
    } else {
        projectile.active = false;
    }
}

/// Half damage to every other live enemy within the splash radius of the
/// primary hit, once each.
fn splash(ctx: &mut SimContext, projectile: &Projectile, primary: &Body, bodies: &[Body]) {
    let radius = projectile.splash_radius;
    ctx.audio.push(AudioEvent::SplashDetonated {
        col: primary.pos.col,
        row: primary.pos.row,
        radius,
    });
    let amount = projectile.damage * SPLASH_DAMAGE_FRACTION;
    for body in bodies {
        if body.entity != primary.entity && body.pos.distance_to(&primary.pos) <= radius {
            damage::deal(ctx, body.entity, amount, projectile.ignores_armor);
        }
    }
}

/// Jump from the primary hit to the nearest unhit visible enemy, losing
/// damage at every hop, until the budget or the candidates run out.
fn chain(ctx: &mut SimContext, projectile: &mut Projectile, primary: &Body) {
    let mut from = primary.pos;
    let mut amount = projectile.damage;
    for hop in 1..=projectile.chain {
        // Kills along the way change who is eligible.
        let bodies = live_bodies(ctx);
        let Some(next) = nearest(&bodies, from, CHAIN_RADIUS, |b| {
            b.visible && !projectile.has_hit(b.entity)
        }) else {
            break;
        };
        amount *= CHAIN_DAMAGE_FALLOFF;
        projectile.mark_hit(next.entity);
        damage::deal(ctx, next.entity, amount, projectile.ignores_armor);
        ctx.audio.push(AudioEvent::ChainJump {
            col: next.pos.col,
            row: next.pos.row,
            hop,
            damage: amount,
        });
        from = next.pos;
    }
}
