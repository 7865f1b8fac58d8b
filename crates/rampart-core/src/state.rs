//! Game state snapshot: the complete visible state produced each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{GridPos, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    pub defender: DefenderView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectile_count: u32,
    pub squads: Vec<SquadView>,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenderView {
    pub health: f64,
    pub gold: f64,
    pub fallen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub kind: EnemyKind,
    pub position: GridPos,
    pub hp: f64,
    pub max_hp: f64,
    pub shield: f64,
    pub target_lane: i32,
    pub retreating: bool,
    pub at_wall: bool,
    pub stunned: bool,
    pub slowed: bool,
    pub invisible: bool,
    pub squad: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u64,
    pub kind: TowerKind,
    pub level: u32,
    pub position: GridPos,
    pub stunned: bool,
    pub disabled: bool,
    /// Currently locked target, if still alive.
    pub target: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadView {
    pub id: u32,
    pub role: TacticalRole,
    pub lane: i32,
    pub spawned: u32,
    pub formation_len: u32,
    pub live_members: u32,
}
