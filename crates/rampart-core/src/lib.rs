//! Core types and definitions for the RAMPART lane-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, balance tables, commands, state snapshots, events, and
//! constants. It has no dependency on the ECS runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod tables;
pub mod types;

pub use error::{RampartError, RampartResult};

#[cfg(test)]
mod tests;
