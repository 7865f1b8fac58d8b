//! Damage resolution shared by every damage path (primary, splash, chain).
//!
//! Order: invulnerability blocks everything; otherwise the shield soaks up
//! to its current value; whatever is left is reduced by armor (unless the
//! damage ignores armor) and floored at `MIN_DAMAGE`. Hp never drops below 0.

use hecs::Entity;

use rampart_core::components::*;
use rampart_core::constants::MIN_DAMAGE;
use rampart_core::events::AudioEvent;
use rampart_core::types::GridPos;

use crate::context::{entity_id, SimContext};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Invulnerable; nothing applied.
    Blocked,
    Applied {
        /// Taken off the shield.
        absorbed: f64,
        /// Taken off hp.
        dealt: f64,
        /// This hit brought hp to 0.
        killed: bool,
    },
}

/// Resolve `raw` damage against one enemy's vitals.
pub fn resolve(
    vitals: &mut Vitals,
    status: &EnemyStatus,
    armor: f64,
    raw: f64,
    ignores_armor: bool,
    now: f64,
) -> DamageOutcome {
    if now < status.invulnerable_until {
        return DamageOutcome::Blocked;
    }

    let raw = raw.max(0.0);
    let absorbed = vitals.shield.min(raw);
    vitals.shield -= absorbed;

    let remainder = raw - absorbed;
    let dealt = if remainder > 0.0 {
        let reduced = if ignores_armor {
            remainder
        } else {
            remainder - armor
        };
        reduced.max(MIN_DAMAGE)
    } else {
        0.0
    };

    let was_alive = vitals.alive;
    vitals.hp = (vitals.hp - dealt).max(0.0);
    if vitals.hp <= 0.0 {
        vitals.alive = false;
    }

    DamageOutcome::Applied {
        absorbed,
        dealt,
        killed: was_alive && !vitals.alive,
    }
}

/// Apply damage to `target` in the world, emit the matching cues, and credit
/// the bounty on a kill. Returns `None` if the target is gone or already dead.
pub fn deal(ctx: &mut SimContext, target: Entity, raw: f64, ignores_armor: bool) -> Option<DamageOutcome> {
    let now = ctx.now;
    let (outcome, pos, stats) = {
        let (pos, stats, vitals, status) = ctx
            .world
            .query_one_mut::<(&GridPos, &EnemyStats, &mut Vitals, &EnemyStatus)>(target)
            .ok()?;
        if !vitals.alive {
            return None;
        }
        let outcome = resolve(vitals, status, stats.armor, raw, ignores_armor, now);
        (outcome, *pos, stats.clone())
    };

    let enemy = entity_id(target);
    match outcome {
        DamageOutcome::Blocked => ctx.audio.push(AudioEvent::DamageBlocked { enemy }),
        DamageOutcome::Applied {
            absorbed,
            dealt,
            killed,
        } => {
            if absorbed > 0.0 {
                ctx.audio.push(AudioEvent::ShieldAbsorbed { enemy, absorbed });
            }
            if dealt > 0.0 {
                ctx.audio.push(AudioEvent::EnemyHit {
                    enemy,
                    col: pos.col,
                    row: pos.row,
                    damage: dealt,
                });
            }
            if killed {
                ctx.defender.gold += stats.bounty;
                ctx.audio.push(AudioEvent::EnemyKilled {
                    enemy,
                    kind: stats.kind,
                    col: pos.col,
                    row: pos.row,
                });
                tracing::debug!(enemy, kind = %stats.kind, bounty = stats.bounty, "enemy killed");
            }
        }
    }
    Some(outcome)
}

/// Apply a slow, shortened by the enemy's CC resistance. A longer running
/// slow is not cut short.
pub fn apply_slow(status: &mut EnemyStatus, cc_resistance: f64, slow: &SlowPayload, now: f64) {
    let duration = slow.duration_secs * (1.0 - cc_resistance.clamp(0.0, 1.0));
    if duration <= 0.0 {
        return;
    }
    status.slowed_until = status.slowed_until.max(now + duration);
    status.slow_factor = slow.factor;
}
