//! Wall assault: enemies at the wall wear down the defender.

use rampart_core::components::*;
use rampart_core::constants::WALL_ATTACK_INTERVAL_SECS;
use rampart_core::events::AudioEvent;

use crate::context::SimContext;

pub fn run(ctx: &mut SimContext) {
    if ctx.defender.fallen {
        return;
    }
    let now = ctx.now;

    let mut strikes = Vec::new();
    for (_entity, (_enemy, stats, vitals, ai, abilities)) in ctx.world.query_mut::<(
        &Enemy,
        &EnemyStats,
        &Vitals,
        &EnemyAi,
        &mut AbilityState,
    )>() {
        if !vitals.alive || !ai.at_wall {
            continue;
        }
        let due = abilities
            .last_wall_strike_at
            .is_none_or(|last| now - last >= WALL_ATTACK_INTERVAL_SECS);
        if due {
            abilities.last_wall_strike_at = Some(now);
            strikes.push(stats.wall_damage);
        }
    }

    for damage in strikes {
        ctx.defender.health = (ctx.defender.health - damage).max(0.0);
        ctx.audio.push(AudioEvent::WallStruck {
            damage,
            health_left: ctx.defender.health,
        });
        if ctx.defender.health <= 0.0 {
            ctx.defender.fallen = true;
            ctx.audio.push(AudioEvent::DefenderFallen);
            tracing::info!(time = now, "defender fallen");
            return;
        }
    }
}
