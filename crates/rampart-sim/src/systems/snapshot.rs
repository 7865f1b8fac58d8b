//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::GamePhase;
use rampart_core::events::AudioEvent;
use rampart_core::state::*;
use rampart_core::types::{GridPos, SimTime};

use crate::context::{entity_id, DefenderState};
use crate::projectile::{Projectile, TargetLock};
use crate::systems::director::SpawnDirector;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    wave: u32,
    defender: &DefenderState,
    director: &SpawnDirector,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    let now = time.elapsed_secs;
    GameStateSnapshot {
        time: *time,
        phase,
        wave,
        defender: DefenderView {
            health: defender.health,
            gold: defender.gold,
            fallen: defender.fallen,
        },
        enemies: build_enemies(world, now),
        towers: build_towers(world, now),
        projectile_count: world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, p)| p.active)
            .count() as u32,
        squads: director.active_squads().iter().map(|s| s.view()).collect(),
        audio_events,
    }
}

fn build_enemies(world: &World, now: f64) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &GridPos, &EnemyStats, &Vitals, &EnemyStatus, &EnemyAi, Option<&SquadTag>)>()
        .iter()
        .filter(|(_, (_, _, _, vitals, ..))| vitals.alive)
        .map(|(entity, (_, pos, stats, vitals, status, ai, tag))| EnemyView {
            id: entity_id(entity),
            kind: stats.kind,
            position: *pos,
            hp: vitals.hp,
            max_hp: vitals.max_hp,
            shield: vitals.shield,
            target_lane: ai.target_lane,
            retreating: ai.retreating,
            at_wall: ai.at_wall,
            stunned: now < status.stunned_until,
            slowed: now < status.slowed_until,
            invisible: now < status.invisible_until,
            squad: tag.map(|t| t.squad_id),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_towers(world: &World, now: f64) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &GridPos, &TowerStatus, &TargetLock)>()
        .iter()
        .map(|(entity, (tower, pos, status, lock))| TowerView {
            id: entity_id(entity),
            kind: tower.kind,
            level: tower.level,
            position: *pos,
            stunned: now < status.stunned_until,
            disabled: now < status.disabled_until,
            target: lock
                .0
                .filter(|&target| world.get::<&Vitals>(target).is_ok_and(|v| v.alive))
                .map(entity_id),
        })
        .collect();
    towers.sort_by_key(|t| t.id);
    towers
}
