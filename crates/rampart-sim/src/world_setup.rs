//! Entity spawn factories.
//!
//! Creates enemy and tower entities with complete component bundles, with
//! stats taken from the balance tables.

use hecs::{Entity, World};
use rand::Rng;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::enums::*;
use rampart_core::tables::BalanceTables;
use rampart_core::types::GridPos;

use rampart_tactics::controller::MovementController;

use crate::projectile::TargetLock;

/// Spawn an enemy of `kind` at `pos` with stats scaled to `wave`, and run
/// the movement controller's initialization on it.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy<R: Rng>(
    world: &mut World,
    rng: &mut R,
    tables: &BalanceTables,
    controller: &MovementController,
    kind: EnemyKind,
    pos: GridPos,
    wave: u32,
    now: f64,
) -> Entity {
    let template = tables.enemy_for_wave(kind, wave);

    let mut ai = EnemyAi::default();
    controller.initialize_enemy(&mut ai, pos, now, rng);

    let mut status = EnemyStatus::default();
    if kind.class() == UnitClass::Assassin {
        status.invisible_until = now + ASSASSIN_CLOAK_SECS;
    }

    world.spawn((
        Enemy,
        pos,
        EnemyStats {
            kind,
            base_speed: template.speed,
            armor: template.armor,
            dodge_chance: template.dodge_chance,
            cc_resistance: template.cc_resistance,
            wall_damage: template.wall_damage,
            bounty: template.bounty,
        },
        Vitals {
            hp: template.hp,
            max_hp: template.hp,
            shield: template.shield,
            alive: true,
        },
        status,
        AbilityState {
            last_pos: pos,
            ..AbilityState::default()
        },
        ai,
        SquadDirective::default(),
    ))
}

/// Spawn a level-1 tower of `kind` on the cell at `pos`.
pub fn spawn_tower(world: &mut World, tables: &BalanceTables, kind: TowerKind, pos: GridPos) -> Entity {
    world.spawn((
        Tower {
            kind,
            level: 1,
            invested_gold: tables.tower_cost(kind),
        },
        pos,
        tables.tower_stats(kind, 1),
        TowerStatus::default(),
        TargetLock::default(),
    ))
}

/// The tower standing on the cell at (`col`, `row`), if any.
pub fn tower_at(world: &World, col: i32, row: i32) -> Option<Entity> {
    world
        .query::<(&Tower, &GridPos)>()
        .iter()
        .find(|(_, (_, pos))| pos.lane() == col && pos.row.round() as i32 == row)
        .map(|(entity, _)| entity)
}

/// Whether a tower may be built on the cell at (`col`, `row`).
pub fn is_buildable(world: &World, col: i32, row: i32) -> bool {
    let in_grid = (0..GRID_COLS as i32).contains(&col) && (0..=WALL_ROW as i32).contains(&row);
    in_grid && tower_at(world, col, row).is_none()
}

/// Re-derive a tower's stats from its kind and level.
pub fn refresh_tower_stats(world: &mut World, tables: &BalanceTables, tower: Entity) {
    if let Ok((info, stats)) = world.query_one_mut::<(&Tower, &mut TowerStats)>(tower) {
        *stats = tables.tower_stats(info.kind, info.level);
    }
}
