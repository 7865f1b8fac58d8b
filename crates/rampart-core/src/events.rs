//! Cues emitted by the simulation for the audio/VFX side channel.
//!
//! Fire-and-forget: the simulation never reads them back. Entity ids are
//! `hecs::Entity::to_bits` values.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A tower launched a projectile.
    TowerFired {
        tower: u64,
        kind: TowerKind,
        col: f64,
        row: f64,
    },
    /// Deferred end of a tower's firing recoil.
    TowerRecoilEnd { tower: u64 },
    /// Damage landed on an enemy (after shield and armor).
    EnemyHit {
        enemy: u64,
        col: f64,
        row: f64,
        damage: f64,
    },
    /// Shield soaked (part of) a hit.
    ShieldAbsorbed { enemy: u64, absorbed: f64 },
    /// Invulnerability blocked a hit.
    DamageBlocked { enemy: u64 },
    /// A projectile was dodged.
    EnemyDodged { enemy: u64, col: f64, row: f64 },
    /// An enemy died.
    EnemyKilled {
        enemy: u64,
        kind: EnemyKind,
        col: f64,
        row: f64,
    },
    /// Area damage went off.
    SplashDetonated { col: f64, row: f64, radius: f64 },
    /// A chain hop struck an enemy.
    ChainJump {
        col: f64,
        row: f64,
        hop: u32,
        damage: f64,
    },
    /// An enemy used an ability.
    AbilityTriggered {
        ability: AbilityKind,
        col: f64,
        row: f64,
        /// Towers stunned/disabled, allies healed, or gold drained.
        magnitude: f64,
    },
    /// An enemy struck the wall.
    WallStruck { damage: f64, health_left: f64 },
    /// Deferred wave-start announcement.
    WaveAnnounced { wave: u32 },
    /// All squads of the wave are spawned and dead.
    WaveCleared { wave: u32 },
    /// Defender health reached zero.
    DefenderFallen,
}
