//! Tactical AI for RAMPART.
//!
//! Steering primitives (avoidance, lane selection, obstacle detection,
//! retreat), the movement controller that composes them, per-kind movement
//! profiles, and cached threat assessment. No ECS dependency; operates on
//! plain data snapshots supplied by the simulation.

pub mod avoidance;
pub mod context;
pub mod controller;
pub mod lane;
pub mod obstacle;
pub mod profiles;
pub mod retreat;
pub mod threat;

pub use rampart_core as core;

#[cfg(test)]
mod tests;
