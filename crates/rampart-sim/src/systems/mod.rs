//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over a `SimContext`. They do not own state;
//! all per-entity state lives in components, and the few stateful services
//! (movement controller, threat cache, spawn director) are passed in.

pub mod ability_triggers;
pub mod cleanup;
pub mod combat;
pub mod director;
pub mod movement;
pub mod snapshot;
pub mod survey;
pub mod wall;
