//! Ability trigger system: raises the `needs_*` flags consumed by the
//! combat ability handlers.
//!
//! Runs after movement so distance covered this tick counts immediately.
//! Stompers and screamers trigger on cells traveled; drainers trigger on a
//! timer while at the wall.

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::enums::EnemyKind;
use rampart_core::types::GridPos;

use crate::context::SimContext;

pub fn run(ctx: &mut SimContext) {
    let now = ctx.now;
    for (_entity, (_enemy, pos, stats, vitals, ai, abilities)) in ctx.world.query_mut::<(
        &Enemy,
        &GridPos,
        &EnemyStats,
        &Vitals,
        &EnemyAi,
        &mut AbilityState,
    )>() {
        if !vitals.alive {
            continue;
        }

        abilities.cells_traveled += abilities.last_pos.distance_to(pos);
        abilities.last_pos = *pos;

        match stats.kind {
            EnemyKind::Boss => {
                if abilities.cells_traveled >= STOMP_EVERY_CELLS {
                    abilities.cells_traveled -= STOMP_EVERY_CELLS;
                    abilities.needs_stomp = true;
                }
            }
            EnemyKind::Banshee => {
                if abilities.cells_traveled >= SCREAM_EVERY_CELLS {
                    abilities.cells_traveled -= SCREAM_EVERY_CELLS;
                    abilities.needs_scream = true;
                }
            }
            EnemyKind::Vampire => {
                let due = abilities
                    .last_drain_at
                    .is_none_or(|last| now - last >= DRAIN_INTERVAL_SECS);
                if ai.at_wall && due {
                    abilities.last_drain_at = Some(now);
                    abilities.needs_drain = true;
                }
            }
            _ => {}
        }
    }
}
