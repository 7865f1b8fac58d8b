//! Static balance tables: per-kind stats and per-level / per-wave scaling.
//!
//! Loaded once before the simulation starts and read-only afterwards.
//! Lookups never fail on the tick path: a kind missing from the tables
//! falls back to a default template and logs a warning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{SlowPayload, TowerStats};
use crate::enums::{DamageType, EnemyKind, TowerKind};
use crate::error::{RampartError, RampartResult};

/// Base stats for an enemy kind at wave 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub hp: f64,
    /// Rows per second.
    pub speed: f64,
    pub armor: f64,
    pub dodge_chance: f64,
    pub cc_resistance: f64,
    pub shield: f64,
    pub wall_damage: f64,
    pub bounty: f64,
}

/// Base stats for a tower kind at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerTemplate {
    pub damage: f64,
    pub range: f64,
    pub fire_interval_secs: f64,
    pub damage_type: DamageType,
    #[serde(default)]
    pub splash_radius: f64,
    #[serde(default)]
    pub pierce: u32,
    #[serde(default)]
    pub chain: u32,
    #[serde(default)]
    pub slow: Option<SlowPayload>,
    pub cost: f64,
}

/// Per-level tower growth. Level 1 is the template itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelScaling {
    /// Additive damage fraction per level.
    pub damage_per_level: f64,
    /// Additive range fraction per level.
    pub range_per_level: f64,
    /// Multiplicative fire-interval factor per level.
    pub interval_per_level: f64,
    /// Upgrade cost as a fraction of base cost, times the current level.
    pub upgrade_cost_factor: f64,
    pub max_level: u32,
}

/// Per-wave enemy growth. Wave 1 is the template itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveScaling {
    pub hp_per_wave: f64,
    pub speed_per_wave: f64,
    pub armor_per_wave: f64,
    pub shield_per_wave: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceTables {
    pub enemies: BTreeMap<EnemyKind, EnemyTemplate>,
    pub towers: BTreeMap<TowerKind, TowerTemplate>,
    pub level_scaling: LevelScaling,
    pub wave_scaling: WaveScaling,
}

impl EnemyTemplate {
    /// Template used when a kind is missing from the tables.
    pub const FALLBACK: EnemyTemplate = EnemyTemplate {
        hp: 60.0,
        speed: 0.8,
        armor: 1.0,
        dodge_chance: 0.05,
        cc_resistance: 0.0,
        shield: 0.0,
        wall_damage: 1.0,
        bounty: 5.0,
    };
}

impl TowerTemplate {
    /// Template used when a kind is missing from the tables.
    pub const FALLBACK: TowerTemplate = TowerTemplate {
        damage: 12.0,
        range: 3.5,
        fire_interval_secs: 0.6,
        damage_type: DamageType::Physical,
        splash_radius: 0.0,
        pierce: 0,
        chain: 0,
        slow: None,
        cost: 50.0,
    };
}

impl Default for BalanceTables {
    fn default() -> Self {
        let enemy = |hp, speed, armor, dodge_chance, cc_resistance, shield, wall_damage, bounty| {
            EnemyTemplate {
                hp,
                speed,
                armor,
                dodge_chance,
                cc_resistance,
                shield,
                wall_damage,
                bounty,
            }
        };
        let enemies = BTreeMap::from([
            (EnemyKind::Grunt, EnemyTemplate::FALLBACK),
            (EnemyKind::Rusher, enemy(35.0, 1.6, 0.0, 0.15, 0.1, 0.0, 1.0, 6.0)),
            (EnemyKind::Flyer, enemy(40.0, 1.3, 0.0, 0.25, 0.2, 0.0, 1.0, 7.0)),
            (EnemyKind::Tank, enemy(180.0, 0.5, 4.0, 0.0, 0.4, 30.0, 2.0, 15.0)),
            (EnemyKind::Boss, enemy(600.0, 0.4, 6.0, 0.0, 0.6, 80.0, 5.0, 60.0)),
            (EnemyKind::Healer, enemy(50.0, 0.7, 0.0, 0.1, 0.1, 0.0, 1.0, 10.0)),
            (EnemyKind::Banshee, enemy(70.0, 0.8, 1.0, 0.1, 0.2, 0.0, 1.0, 12.0)),
            (EnemyKind::Vampire, enemy(90.0, 0.9, 2.0, 0.1, 0.2, 0.0, 1.0, 12.0)),
            (EnemyKind::Assassin, enemy(45.0, 1.2, 0.0, 0.3, 0.3, 0.0, 3.0, 14.0)),
            (EnemyKind::Skirmisher, enemy(55.0, 1.1, 1.0, 0.2, 0.1, 0.0, 1.0, 8.0)),
        ]);

        let towers = BTreeMap::from([
            (TowerKind::Arrow, TowerTemplate::FALLBACK),
            (
                TowerKind::Cannon,
                TowerTemplate {
                    damage: 25.0,
                    range: 3.0,
                    fire_interval_secs: 1.5,
                    splash_radius: 1.2,
                    cost: 80.0,
                    ..TowerTemplate::FALLBACK
                },
            ),
            (
                TowerKind::Frost,
                TowerTemplate {
                    damage: 6.0,
                    range: 3.0,
                    fire_interval_secs: 1.0,
                    damage_type: DamageType::Magic,
                    slow: Some(SlowPayload {
                        factor: 0.5,
                        duration_secs: 2.0,
                    }),
                    cost: 70.0,
                    ..TowerTemplate::FALLBACK
                },
            ),
            (
                TowerKind::Tesla,
                TowerTemplate {
                    damage: 14.0,
                    range: 3.0,
                    fire_interval_secs: 1.2,
                    damage_type: DamageType::Magic,
                    chain: 3,
                    cost: 100.0,
                    ..TowerTemplate::FALLBACK
                },
            ),
            (
                TowerKind::Ballista,
                TowerTemplate {
                    damage: 30.0,
                    range: 5.0,
                    fire_interval_secs: 2.0,
                    damage_type: DamageType::Piercing,
                    pierce: 2,
                    cost: 90.0,
                    ..TowerTemplate::FALLBACK
                },
            ),
        ]);

        Self {
            enemies,
            towers,
            level_scaling: LevelScaling {
                damage_per_level: 0.5,
                range_per_level: 0.1,
                interval_per_level: 0.9,
                upgrade_cost_factor: 0.75,
                max_level: 5,
            },
            wave_scaling: WaveScaling {
                hp_per_wave: 0.15,
                speed_per_wave: 0.02,
                armor_per_wave: 0.25,
                shield_per_wave: 0.1,
            },
        }
    }
}

impl BalanceTables {
    /// Parse and validate tables from JSON.
    pub fn from_json(json: &str) -> RampartResult<Self> {
        let tables: BalanceTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Reject values that would break the simulation (zero fire rate,
    /// probabilities outside 0..1, non-positive hp).
    pub fn validate(&self) -> RampartResult<()> {
        for (kind, t) in &self.enemies {
            if t.hp <= 0.0 || t.speed < 0.0 || t.armor < 0.0 || t.shield < 0.0 {
                return Err(RampartError::InvalidTable(format!(
                    "enemy {kind}: hp must be positive and speed/armor/shield non-negative"
                )));
            }
            if !(0.0..=1.0).contains(&t.dodge_chance) || !(0.0..=1.0).contains(&t.cc_resistance) {
                return Err(RampartError::InvalidTable(format!(
                    "enemy {kind}: dodge and cc resistance must be within 0..=1"
                )));
            }
        }
        for (kind, t) in &self.towers {
            if t.fire_interval_secs <= 0.0 || t.range <= 0.0 || t.damage < 0.0 {
                return Err(RampartError::InvalidTable(format!(
                    "tower {kind:?}: fire interval and range must be positive"
                )));
            }
        }
        if self.level_scaling.interval_per_level <= 0.0 || self.level_scaling.max_level == 0 {
            return Err(RampartError::InvalidTable(
                "level scaling: interval factor and max level must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn try_enemy(&self, kind: EnemyKind) -> RampartResult<EnemyTemplate> {
        self.enemies
            .get(&kind)
            .copied()
            .ok_or(RampartError::MissingEnemyTemplate(kind))
    }

    pub fn try_tower(&self, kind: TowerKind) -> RampartResult<TowerTemplate> {
        self.towers
            .get(&kind)
            .copied()
            .ok_or(RampartError::MissingTowerTemplate(kind))
    }

    /// Template for `kind`, or the fallback template when it is missing.
    pub fn enemy(&self, kind: EnemyKind) -> EnemyTemplate {
        self.try_enemy(kind).unwrap_or_else(|err| {
            tracing::warn!(%err, "using fallback enemy template");
            EnemyTemplate::FALLBACK
        })
    }

    /// Template for `kind`, or the fallback template when it is missing.
    pub fn tower(&self, kind: TowerKind) -> TowerTemplate {
        self.try_tower(kind).unwrap_or_else(|err| {
            tracing::warn!(%err, "using fallback tower template");
            TowerTemplate::FALLBACK
        })
    }

    /// Enemy stats scaled to the given wave (wave 1 = template).
    pub fn enemy_for_wave(&self, kind: EnemyKind, wave: u32) -> EnemyTemplate {
        let base = self.enemy(kind);
        let steps = wave.saturating_sub(1) as f64;
        let s = &self.wave_scaling;
        EnemyTemplate {
            hp: base.hp * (1.0 + s.hp_per_wave * steps),
            speed: base.speed * (1.0 + s.speed_per_wave * steps),
            armor: base.armor + s.armor_per_wave * steps,
            shield: base.shield * (1.0 + s.shield_per_wave * steps),
            ..base
        }
    }

    /// Derived tower stats for a kind at a level (level 1 = template).
    pub fn tower_stats(&self, kind: TowerKind, level: u32) -> TowerStats {
        let base = self.tower(kind);
        let level = level.max(1).min(self.level_scaling.max_level.max(1));
        let steps = (level - 1) as f64;
        let s = &self.level_scaling;
        TowerStats {
            damage: base.damage * (1.0 + s.damage_per_level * steps),
            range: base.range * (1.0 + s.range_per_level * steps),
            fire_interval_secs: base.fire_interval_secs * s.interval_per_level.powi(level as i32 - 1),
            damage_type: base.damage_type,
            splash_radius: base.splash_radius,
            pierce: base.pierce,
            chain: base.chain,
            slow: base.slow,
        }
    }

    pub fn tower_cost(&self, kind: TowerKind) -> f64 {
        self.tower(kind).cost
    }

    /// Cost of upgrading a tower currently at `level`. `None` at max level.
    pub fn upgrade_cost(&self, kind: TowerKind, level: u32) -> Option<f64> {
        if level >= self.level_scaling.max_level {
            return None;
        }
        Some(self.tower(kind).cost * self.level_scaling.upgrade_cost_factor * level as f64)
    }
}
