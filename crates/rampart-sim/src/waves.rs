//! Wave content: which units a wave contains and how fast they are released.

use std::collections::BTreeMap;

use rampart_core::enums::EnemyKind;

/// One entry of a wave's composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveGroup {
    pub kind: EnemyKind,
    pub count: u32,
    /// Seconds between consecutive releases of the squad this group joins.
    pub spawn_delay: f64,
}

impl WaveGroup {
    pub fn new(kind: EnemyKind, count: u32, spawn_delay: f64) -> Self {
        Self {
            kind,
            count,
            spawn_delay,
        }
    }

    /// Build a group from an external kind name. Unknown names fall back to
    /// `Grunt` with a warning.
    pub fn named(name: &str, count: u32, spawn_delay: f64) -> Self {
        Self::new(EnemyKind::parse_or_default(name), count, spawn_delay)
    }
}

/// Source of wave compositions, consumed once per wave.
pub trait WaveContent {
    fn composition(&self, wave: u32) -> Vec<WaveGroup>;
}

/// Built-in escalation: a five-wave cycle whose counts grow every cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWaves;

impl WaveContent for StandardWaves {
    fn composition(&self, wave: u32) -> Vec<WaveGroup> {
        let wave = wave.max(1);
        let cycle = (wave - 1) / 5;
        let extra = cycle * 2;
        match (wave - 1) % 5 {
            0 => vec![WaveGroup::new(EnemyKind::Grunt, 6 + extra, 1.0)],
            1 => vec![
                WaveGroup::new(EnemyKind::Grunt, 4 + extra, 1.0),
                WaveGroup::new(EnemyKind::Rusher, 4 + extra, 0.5),
                WaveGroup::new(EnemyKind::Flyer, 2 + cycle, 0.5),
            ],
            2 => vec![
                WaveGroup::new(EnemyKind::Tank, 1 + cycle, 1.5),
                WaveGroup::new(EnemyKind::Healer, 1 + cycle, 1.5),
                WaveGroup::new(EnemyKind::Skirmisher, 3 + extra, 0.8),
            ],
            3 => vec![
                WaveGroup::new(EnemyKind::Healer, 1 + cycle, 1.2),
                WaveGroup::new(EnemyKind::Grunt, 4 + extra, 1.2),
                WaveGroup::new(EnemyKind::Banshee, 1 + cycle, 1.2),
                WaveGroup::new(EnemyKind::Healer, 1, 2.0),
                WaveGroup::new(EnemyKind::Assassin, 2 + cycle, 2.0),
            ],
            _ => vec![
                WaveGroup::new(EnemyKind::Boss, 1 + cycle, 2.0),
                WaveGroup::new(EnemyKind::Vampire, 2 + cycle, 2.0),
                WaveGroup::new(EnemyKind::Rusher, 6 + extra, 0.4),
            ],
        }
    }
}

/// Hand-authored compositions keyed by wave number. Waves without an entry
/// are empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWaves {
    waves: BTreeMap<u32, Vec<WaveGroup>>,
}

impl ScriptedWaves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wave(mut self, wave: u32, groups: Vec<WaveGroup>) -> Self {
        self.waves.insert(wave, groups);
        self
    }
}

impl WaveContent for ScriptedWaves {
    fn composition(&self, wave: u32) -> Vec<WaveGroup> {
        self.waves.get(&wave).cloned().unwrap_or_default()
    }
}
