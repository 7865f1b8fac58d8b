//! Read-only views of the world in the shape the tactics crate expects.

use hecs::World;

use rampart_core::components::*;
use rampart_core::types::GridPos;

use rampart_tactics::context::TowerCoverage;
use rampart_tactics::threat::{effective_dps, EnemySnapshot, ThreatAssessment, TowerSnapshot};

use crate::context::entity_id;

/// Lowest and highest weight a tower's coverage may carry in lane scoring.
const PRESSURE_RANGE: (f64, f64) = (0.25, 2.0);

pub fn tower_snapshots(world: &World) -> Vec<TowerSnapshot> {
    world
        .query::<(&Tower, &GridPos, &TowerStats)>()
        .iter()
        .map(|(entity, (tower, pos, stats))| TowerSnapshot {
            key: entity_id(entity),
            pos: *pos,
            level: tower.level,
            stats: stats.clone(),
        })
        .collect()
}

pub fn enemy_snapshot(key: u64, pos: GridPos, stats: &EnemyStats, vitals: &Vitals) -> EnemySnapshot {
    EnemySnapshot {
        key,
        kind: stats.kind,
        pos,
        hp: vitals.hp,
        armor: stats.armor,
        dodge_chance: stats.dodge_chance,
        cc_resistance: stats.cc_resistance,
    }
}

/// Tower coverage as seen by one enemy. Each tower's lane penalty is weighted
/// by how hard it actually hits this enemy relative to its raw output.
pub fn coverage_for(
    threat: &mut ThreatAssessment,
    towers: &[TowerSnapshot],
    enemy: &EnemySnapshot,
    now: f64,
) -> Vec<TowerCoverage> {
    towers
        .iter()
        .map(|tower| {
            let dps = effective_dps(tower);
            let score = threat.tower_threat(tower, enemy, now);
            let pressure = if dps > 0.0 && score > 0.0 {
                (score / dps).clamp(PRESSURE_RANGE.0, PRESSURE_RANGE.1)
            } else {
                1.0
            };
            TowerCoverage {
                pos: tower.pos,
                range: tower.stats.range,
                pressure,
            }
        })
        .collect()
}
