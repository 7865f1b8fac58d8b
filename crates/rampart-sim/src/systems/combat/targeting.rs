//! Tower target selection.
//!
//! Prefers enemies that are far along, low on hp, at the wall, or hugging
//! the edge columns. Equal scores go to the enemy nearer the wall, then to
//! the lowest entity id, so selection never depends on iteration order.

use std::cmp::Ordering;

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::types::GridPos;

use crate::context::entity_id;

pub fn target_score(pos: &GridPos, hp: f64, at_wall: bool) -> f64 {
    let edge_limit = (GRID_COLS - 1) as f64 - EDGE_COLUMN_BAND;
    let mut score = pos.row * TARGET_ROW_WEIGHT - hp;
    if at_wall {
        score += TARGET_WALL_BONUS;
    }
    if pos.col < EDGE_COLUMN_BAND || pos.col > edge_limit {
        score += TARGET_EDGE_BONUS;
    }
    score
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    entity: Entity,
    score: f64,
    row: f64,
    id: u64,
}

fn ranks_above(a: &Candidate, b: &Candidate) -> bool {
    match a.score.total_cmp(&b.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match a.row.total_cmp(&b.row) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => a.id < b.id,
        },
    }
}

/// Best visible live enemy within `range` of `tower_pos`.
pub fn find_target(world: &World, tower_pos: GridPos, range: f64, now: f64) -> Option<Entity> {
    let mut best: Option<Candidate> = None;
    for (entity, (_enemy, pos, vitals, status, ai)) in world
        .query::<(&Enemy, &GridPos, &Vitals, &EnemyStatus, &EnemyAi)>()
        .iter()
    {
        if !vitals.alive || now < status.invisible_until || tower_pos.distance_to(pos) > range {
            continue;
        }
        let candidate = Candidate {
            entity,
            score: target_score(pos, vitals.hp, ai.at_wall),
            row: pos.row,
            id: entity_id(entity),
        };
        if best.as_ref().is_none_or(|current| ranks_above(&candidate, current)) {
            best = Some(candidate);
        }
    }
    best.map(|c| c.entity)
}
