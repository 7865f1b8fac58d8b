//! Player commands fed into the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start the given wave (activates the simulation if in Setup).
    StartWave { wave: u32 },
    /// Build a level-1 tower on a cell.
    PlaceTower { kind: TowerKind, col: i32, row: i32 },
    /// Raise the tower on a cell by one level.
    UpgradeTower { col: i32, row: i32 },
    /// Remove the tower on a cell for a partial refund.
    SellTower { col: i32, row: i32 },
    Pause,
    Resume,
}
