//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RampartError;

/// Hostile unit type. Drives stats (via balance tables), movement tuning,
/// and which abilities the unit carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline infantry.
    #[default]
    Grunt,
    /// Fast, fragile, switches lanes eagerly.
    Rusher,
    /// Fast airborne unit, weak avoidance.
    Flyer,
    /// Slow, armored, shielded.
    Tank,
    /// Stomps periodically, stunning nearby towers.
    Boss,
    /// Support unit that heals nearby allies.
    Healer,
    /// Screams periodically, disabling nearby towers.
    Banshee,
    /// Drains the defender's gold while at the wall.
    Vampire,
    /// Spawns cloaked; throttles until buffed.
    Assassin,
    /// Flanker that mirrors squad-mates' evasions.
    Skirmisher,
}

/// Tactical class of a unit inside a squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitClass {
    Frontline,
    Fast,
    Tank,
    Support,
    Assassin,
    Skirmisher,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 10] = [
        EnemyKind::Grunt,
        EnemyKind::Rusher,
        EnemyKind::Flyer,
        EnemyKind::Tank,
        EnemyKind::Boss,
        EnemyKind::Healer,
        EnemyKind::Banshee,
        EnemyKind::Vampire,
        EnemyKind::Assassin,
        EnemyKind::Skirmisher,
    ];

    pub fn class(&self) -> UnitClass {
        match self {
            EnemyKind::Grunt | EnemyKind::Banshee | EnemyKind::Vampire => UnitClass::Frontline,
            EnemyKind::Rusher | EnemyKind::Flyer => UnitClass::Fast,
            EnemyKind::Tank | EnemyKind::Boss => UnitClass::Tank,
            EnemyKind::Healer => UnitClass::Support,
            EnemyKind::Assassin => UnitClass::Assassin,
            EnemyKind::Skirmisher => UnitClass::Skirmisher,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Grunt => "grunt",
            EnemyKind::Rusher => "rusher",
            EnemyKind::Flyer => "flyer",
            EnemyKind::Tank => "tank",
            EnemyKind::Boss => "boss",
            EnemyKind::Healer => "healer",
            EnemyKind::Banshee => "banshee",
            EnemyKind::Vampire => "vampire",
            EnemyKind::Assassin => "assassin",
            EnemyKind::Skirmisher => "skirmisher",
        }
    }

    /// Parse a kind name from external wave content, falling back to
    /// `Grunt` (with a warning) when the name is unknown.
    pub fn parse_or_default(name: &str) -> EnemyKind {
        match name.parse() {
            Ok(kind) => kind,
            Err(err) => {
                tracing::warn!(%err, "falling back to default enemy kind");
                EnemyKind::default()
            }
        }
    }
}

impl FromStr for EnemyKind {
    type Err = RampartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EnemyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| RampartError::UnknownEnemyKind(s.to_string()))
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Defensive emplacement type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Single-target physical damage.
    #[default]
    Arrow,
    /// Area damage (splash).
    Cannon,
    /// Applies a slow payload.
    Frost,
    /// Chains between nearby enemies.
    Tesla,
    /// Piercing bolts that ignore armor.
    Ballista,
}

impl TowerKind {
    pub const ALL: [TowerKind; 5] = [
        TowerKind::Arrow,
        TowerKind::Cannon,
        TowerKind::Frost,
        TowerKind::Tesla,
        TowerKind::Ballista,
    ];
}

/// How a tower's damage interacts with armor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    /// Reduced by armor.
    #[default]
    Physical,
    /// Ignores armor.
    Piercing,
    /// Ignores armor.
    Magic,
}

impl DamageType {
    pub fn ignores_armor(&self) -> bool {
        matches!(self, DamageType::Piercing | DamageType::Magic)
    }
}

/// Tactical role of a squad, inferred from its composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticalRole {
    #[default]
    Standard,
    /// Many fast units, released fastest-first.
    Rush,
    /// Tanks lead, supports trail behind the lead tank.
    Siege,
    /// Supports released first and held behind the frontline.
    BuffedAssault,
    /// Members mirror each other's evasions.
    Flanking,
    /// Assassins wait for a support buff, then surge.
    Assassination,
}

/// Enemy ability handled by the combat system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Area stun on nearby towers.
    Stomp,
    /// Area disable on nearby towers.
    Scream,
    /// Gold-to-hp lifesteal.
    Drain,
    /// Periodic heal of nearby allies.
    Heal,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Towers may be placed; no wave running yet.
    #[default]
    Setup,
    Active,
    Paused,
    /// Defender health depleted. Terminal.
    Defeated,
}
