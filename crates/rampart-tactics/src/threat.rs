//! Threat assessment: how much damage a tower can put on an enemy, how well
//! defended each column is, and how dangerous an enemy is.
//!
//! Tower-vs-enemy scores are cached per (tower, enemy) pair. A cached score
//! younger than the TTL is returned as-is even if the enemy changed since;
//! older entries are recomputed.

use std::collections::HashMap;

use rampart_core::components::TowerStats;
use rampart_core::constants::*;
use rampart_core::enums::EnemyKind;
use rampart_core::types::GridPos;

use crate::profiles::threat_multiplier;

/// Tower inputs to threat scoring.
#[derive(Debug, Clone)]
pub struct TowerSnapshot {
    pub key: u64,
    pub pos: GridPos,
    pub level: u32,
    pub stats: TowerStats,
}

/// Enemy inputs to threat scoring.
#[derive(Debug, Clone, Copy)]
pub struct EnemySnapshot {
    pub key: u64,
    pub kind: EnemyKind,
    pub pos: GridPos,
    pub hp: f64,
    pub armor: f64,
    pub dodge_chance: f64,
    pub cc_resistance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatCacheEntry {
    pub score: f64,
    pub computed_at: f64,
}

/// Damage per second at the tower's level, before any enemy modifiers.
pub fn effective_dps(tower: &TowerSnapshot) -> f64 {
    if tower.stats.fire_interval_secs <= 0.0 {
        return 0.0;
    }
    let level_steps = tower.level.saturating_sub(1) as i32;
    tower.stats.damage / tower.stats.fire_interval_secs * THREAT_LEVEL_SCALE.powi(level_steps)
}

/// Uncached tower-vs-enemy threat.
pub fn compute_tower_threat(tower: &TowerSnapshot, enemy: &EnemySnapshot) -> f64 {
    let distance = tower.pos.distance_to(&enemy.pos);
    if distance > tower.stats.range || tower.stats.range <= 0.0 {
        return 0.0;
    }

    let mut threat = effective_dps(tower);

    // Armor
    if tower.stats.damage_type.ignores_armor() {
        if enemy.armor > 0.0 {
            threat *= 1.0 + THREAT_ARMOR_IGNORE_BONUS;
        }
    } else if tower.stats.damage > 0.0 {
        threat *= (tower.stats.damage - enemy.armor).max(MIN_DAMAGE) / tower.stats.damage;
    }

    // Dodge: area damage cannot be dodged.
    if tower.stats.splash_radius > 0.0 {
        threat *= 1.0 + enemy.dodge_chance;
    } else {
        threat *= 1.0 - enemy.dodge_chance;
    }

    if tower.stats.slow.is_some() {
        threat *= 1.0 - enemy.cc_resistance * THREAT_CC_WEIGHT;
    }

    // Proximity
    threat * (1.0 + (1.0 - distance / tower.stats.range) * THREAT_PROXIMITY_BONUS)
}

/// Current hp weighted by armor, progress toward the wall, and kind.
pub fn enemy_threat_level(enemy: &EnemySnapshot) -> f64 {
    let progress = (enemy.pos.row / WALL_ROW).clamp(0.0, 1.0);
    enemy.hp.max(0.0)
        * (1.0 + enemy.armor * ENEMY_THREAT_ARMOR_WEIGHT)
        * (1.0 + progress)
        * threat_multiplier(enemy.kind)
}

/// Sum of effective DPS of all towers standing in `column`.
pub fn column_threat(column: i32, towers: &[TowerSnapshot]) -> f64 {
    towers
        .iter()
        .filter(|t| t.pos.lane() == column)
        .map(effective_dps)
        .sum()
}

/// The least defended of `candidates`. Ties go to the lowest column index.
pub fn find_weakest_column(towers: &[TowerSnapshot], candidates: &[i32]) -> Option<i32> {
    let mut best: Option<(i32, f64)> = None;
    for &column in candidates {
        let threat = column_threat(column, towers);
        best = match best {
            Some((c, t)) if t < threat || (t == threat && c < column) => Some((c, t)),
            _ => Some((column, threat)),
        };
    }
    best.map(|(column, _)| column)
}

/// Cached tower-vs-enemy threat scores.
#[derive(Debug, Clone)]
pub struct ThreatAssessment {
    cache: HashMap<(u64, u64), ThreatCacheEntry>,
    ttl_secs: f64,
}

impl Default for ThreatAssessment {
    fn default() -> Self {
        Self::new(THREAT_CACHE_TTL_SECS)
    }
}

impl ThreatAssessment {
    pub fn new(ttl_secs: f64) -> Self {
        Self {
            cache: HashMap::new(),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> f64 {
        self.ttl_secs
    }

    /// Threat of `tower` against `enemy`, served from cache while fresh.
    pub fn tower_threat(&mut self, tower: &TowerSnapshot, enemy: &EnemySnapshot, now: f64) -> f64 {
        let key = (tower.key, enemy.key);
        if let Some(entry) = self.cache.get(&key) {
            if now - entry.computed_at < self.ttl_secs {
                return entry.score;
            }
        }
        let score = compute_tower_threat(tower, enemy);
        self.cache.insert(
            key,
            ThreatCacheEntry {
                score,
                computed_at: now,
            },
        );
        score
    }

    /// Total threat all `towers` put on `enemy`.
    pub fn total_threat(&mut self, towers: &[TowerSnapshot], enemy: &EnemySnapshot, now: f64) -> f64 {
        towers
            .iter()
            .map(|tower| self.tower_threat(tower, enemy, now))
            .sum()
    }

    pub fn column_threat(&self, column: i32, towers: &[TowerSnapshot]) -> f64 {
        column_threat(column, towers)
    }

    pub fn find_weakest_column(&self, towers: &[TowerSnapshot], candidates: &[i32]) -> Option<i32> {
        find_weakest_column(towers, candidates)
    }

    pub fn enemy_threat_level(&self, enemy: &EnemySnapshot) -> f64 {
        enemy_threat_level(enemy)
    }

    /// Drop every entry involving `key` (as tower or as enemy).
    pub fn forget(&mut self, key: u64) {
        self.cache.retain(|&(tower, enemy), _| tower != key && enemy != key);
    }

    /// Drop entries that have outlived the TTL.
    pub fn prune(&mut self, now: f64) {
        let ttl = self.ttl_secs;
        self.cache.retain(|_, entry| now - entry.computed_at < ttl);
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
