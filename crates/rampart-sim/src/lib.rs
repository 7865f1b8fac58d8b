//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and produces
//! GameStateSnapshots for the host. Completely headless.

pub mod context;
pub mod engine;
pub mod event_queue;
pub mod projectile;
pub mod squad;
pub mod systems;
pub mod waves;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use rampart_core as core;
