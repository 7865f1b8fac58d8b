//! Error type for boundary operations (table loading, name parsing).
//!
//! The per-tick simulation path never returns these; it falls back and logs.

use thiserror::Error;

use crate::enums::{EnemyKind, TowerKind};

#[derive(Debug, Error)]
pub enum RampartError {
    #[error("unknown enemy kind: {0:?}")]
    UnknownEnemyKind(String),
    #[error("balance table has no entry for enemy kind {0}")]
    MissingEnemyTemplate(EnemyKind),
    #[error("balance table has no entry for tower kind {0:?}")]
    MissingTowerTemplate(TowerKind),
    #[error("invalid balance table: {0}")]
    InvalidTable(String),
    #[error("failed to parse balance table: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type RampartResult<T> = Result<T, RampartError>;
