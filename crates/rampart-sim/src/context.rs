//! Per-tick simulation context handed to every system.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use rampart_core::events::AudioEvent;
use rampart_core::tables::BalanceTables;

use crate::event_queue::EventQueue;

/// The defender's resource pools.
#[derive(Debug, Clone, PartialEq)]
pub struct DefenderState {
    pub health: f64,
    pub gold: f64,
    /// Set once when health reaches 0.
    pub fallen: bool,
}

impl DefenderState {
    pub fn new(health: f64, gold: f64) -> Self {
        Self {
            health,
            gold,
            fallen: false,
        }
    }
}

/// Everything a system may read or mutate during one tick.
pub struct SimContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub tables: &'a BalanceTables,
    pub defender: &'a mut DefenderState,
    pub audio: &'a mut Vec<AudioEvent>,
    pub events: &'a mut EventQueue,
    /// Simulation seconds at the start of this tick.
    pub now: f64,
    pub dt: f64,
}

/// Stable numeric id of an entity, as exposed in snapshots and cues.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
