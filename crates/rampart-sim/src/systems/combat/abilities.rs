//! Enemy ability handlers.
//!
//! A closed set of handlers, each with a readiness check and an effect.
//! Every live enemy is checked against every handler once per tick, so an
//! ability runs at most once per enemy per tick.

use hecs::Entity;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::enums::{AbilityKind, EnemyKind, UnitClass};
use rampart_core::events::AudioEvent;
use rampart_core::types::GridPos;

use crate::context::SimContext;

/// The enemy an ability is evaluated for, copied out of the world.
#[derive(Debug, Clone)]
pub struct Caster {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub pos: GridPos,
    pub abilities: AbilityState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityHandler {
    /// Stuns towers around the caster.
    AreaStun,
    /// Disables towers around the caster.
    AreaDisable,
    /// Converts defender gold into caster hp.
    LifestealDrain,
    /// Heals damaged allies around the caster on a cooldown.
    PeriodicHeal,
}

impl AbilityHandler {
    pub const ALL: [AbilityHandler; 4] = [
        AbilityHandler::AreaStun,
        AbilityHandler::AreaDisable,
        AbilityHandler::LifestealDrain,
        AbilityHandler::PeriodicHeal,
    ];

    pub fn kind(&self) -> AbilityKind {
        match self {
            AbilityHandler::AreaStun => AbilityKind::Stomp,
            AbilityHandler::AreaDisable => AbilityKind::Scream,
            AbilityHandler::LifestealDrain => AbilityKind::Drain,
            AbilityHandler::PeriodicHeal => AbilityKind::Heal,
        }
    }

    pub fn can_handle(&self, caster: &Caster, now: f64) -> bool {
        match self {
            AbilityHandler::AreaStun => caster.abilities.needs_stomp,
            AbilityHandler::AreaDisable => caster.abilities.needs_scream,
            AbilityHandler::LifestealDrain => caster.abilities.needs_drain,
            AbilityHandler::PeriodicHeal => {
                caster.kind.class() == UnitClass::Support
                    && caster
                        .abilities
                        .last_heal_at
                        .is_none_or(|last| now - last >= HEAL_INTERVAL_SECS)
            }
        }
    }

    pub fn execute(&self, ctx: &mut SimContext, caster: &Caster) {
        let now = ctx.now;
        let magnitude = match self {
            AbilityHandler::AreaStun => {
                let stunned = affect_towers(ctx, caster.pos, STOMP_RADIUS, |status| {
                    status.stunned_until = status.stunned_until.max(now + STOMP_STUN_SECS);
                });
                if let Ok((abilities, status)) = ctx
                    .world
                    .query_one_mut::<(&mut AbilityState, &mut EnemyStatus)>(caster.entity)
                {
                    abilities.needs_stomp = false;
                    status.invulnerable_until = status.invulnerable_until.max(now + STOMP_INVULNERABLE_SECS);
                }
                stunned as f64
            }
            AbilityHandler::AreaDisable => {
                let disabled = affect_towers(ctx, caster.pos, SCREAM_RADIUS, |status| {
                    status.disabled_until = status.disabled_until.max(now + SCREAM_DISABLE_SECS);
                });
                if let Ok(abilities) = ctx.world.query_one_mut::<&mut AbilityState>(caster.entity) {
                    abilities.needs_scream = false;
                }
                disabled as f64
            }
            AbilityHandler::LifestealDrain => {
                let drained = DRAIN_AMOUNT.min(ctx.defender.gold.max(0.0));
                ctx.defender.gold -= drained;
                if let Ok((abilities, vitals)) = ctx
                    .world
                    .query_one_mut::<(&mut AbilityState, &mut Vitals)>(caster.entity)
                {
                    abilities.needs_drain = false;
                    vitals.hp = (vitals.hp + drained * DRAIN_HEAL_RATIO).min(vitals.max_hp);
                }
                if drained == 0.0 {
                    return;
                }
                drained
            }
            AbilityHandler::PeriodicHeal => {
                let healed = heal_allies(ctx, caster);
                if let Ok(abilities) = ctx.world.query_one_mut::<&mut AbilityState>(caster.entity) {
                    abilities.last_heal_at = Some(now);
                }
                if healed == 0 {
                    return;
                }
                healed as f64
            }
        };

        ctx.audio.push(AudioEvent::AbilityTriggered {
            ability: self.kind(),
            col: caster.pos.col,
            row: caster.pos.row,
            magnitude,
        });
        tracing::debug!(ability = ?self.kind(), magnitude, "ability triggered");
    }
}

/// Apply `effect` to every tower within `radius` of `center`. Returns how
/// many towers were affected.
fn affect_towers(
    ctx: &mut SimContext,
    center: GridPos,
    radius: f64,
    effect: impl Fn(&mut TowerStatus),
) -> usize {
    let mut affected = 0;
    for (_entity, (_tower, pos, status)) in ctx
        .world
        .query_mut::<(&Tower, &GridPos, &mut TowerStatus)>()
    {
        if pos.distance_to(&center) <= radius {
            effect(status);
            affected += 1;
        }
    }
    affected
}

/// Heal every other damaged live enemy within the heal radius, up to max hp.
fn heal_allies(ctx: &mut SimContext, caster: &Caster) -> usize {
    let mut healed = 0;
    for (entity, (_enemy, pos, vitals)) in ctx.world.query_mut::<(&Enemy, &GridPos, &mut Vitals)>() {
        if entity == caster.entity
            || !vitals.alive
            || vitals.hp >= vitals.max_hp
            || pos.distance_to(&caster.pos) > HEAL_RADIUS
        {
            continue;
        }
        vitals.hp = (vitals.hp + HEAL_AMOUNT).min(vitals.max_hp);
        healed += 1;
    }
    healed
}

/// Check every live enemy against every handler.
pub fn run(ctx: &mut SimContext) {
    let casters: Vec<Caster> = ctx
        .world
        .query::<(&Enemy, &GridPos, &EnemyStats, &Vitals, &AbilityState)>()
        .iter()
        .filter(|(_, (_, _, _, vitals, _))| vitals.alive)
        .map(|(entity, (_, pos, stats, _, abilities))| Caster {
            entity,
            kind: stats.kind,
            pos: *pos,
            abilities: abilities.clone(),
        })
        .collect();

    for caster in &casters {
        for handler in AbilityHandler::ALL {
            if handler.can_handle(caster, ctx.now) {
                handler.execute(ctx, caster);
            }
        }
    }
}
