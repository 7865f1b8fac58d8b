//! Spawn director: turns wave content into staggered, role-aware squads.
//!
//! A wave's groups are merged by spawn delay into squads. Squads wait in a
//! pending list until their stagger elapses, are then released member by
//! member, coordinated every tick, and retired once fully spawned and dead.

use std::collections::BTreeMap;

use hecs::World;

use rampart_core::constants::*;
use rampart_core::enums::EnemyKind;
use rampart_core::events::AudioEvent;
use rampart_core::tables::BalanceTables;

use rampart_tactics::controller::MovementController;
use rampart_tactics::threat::ThreatAssessment;

use crate::context::SimContext;
use crate::squad::Squad;
use crate::systems::survey;
use crate::waves::{WaveContent, WaveGroup};

#[derive(Debug, Clone)]
struct PendingSquad {
    squad: Squad,
    activate_at: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SpawnDirector {
    pending: Vec<PendingSquad>,
    active: Vec<Squad>,
    next_squad_id: u32,
    /// Squads not yet retired, per wave.
    open_waves: BTreeMap<u32, usize>,
    /// Aim the first squad of each wave at the weakest spawn lane.
    tactical_variance: bool,
}

/// Merge groups that share a spawn delay, in order of first appearance.
pub fn group_by_delay(groups: &[WaveGroup]) -> Vec<(f64, Vec<EnemyKind>)> {
    let mut merged: Vec<(f64, Vec<EnemyKind>)> = Vec::new();
    for group in groups {
        let units = std::iter::repeat(group.kind).take(group.count as usize);
        match merged.iter_mut().find(|(delay, _)| *delay == group.spawn_delay) {
            Some((_, kinds)) => kinds.extend(units),
            None => merged.push((group.spawn_delay, units.collect())),
        }
    }
    merged.retain(|(_, kinds)| !kinds.is_empty());
    merged
}

impl SpawnDirector {
    pub fn new(tactical_variance: bool) -> Self {
        Self {
            tactical_variance,
            ..Self::default()
        }
    }

    /// Build and queue the squads of `wave`. Returns how many were queued.
    pub fn start_wave(
        &mut self,
        wave: u32,
        content: &dyn WaveContent,
        world: &World,
        tables: &BalanceTables,
        threat: &ThreatAssessment,
        now: f64,
    ) -> usize {
        let batches = group_by_delay(&content.composition(wave));
        if batches.is_empty() {
            tracing::warn!(wave, "wave has no units");
            return 0;
        }

        let towers = survey::tower_snapshots(world);
        let count = batches.len();
        for (index, (delay, kinds)) in batches.into_iter().enumerate() {
            let rotated = SPAWN_LANES[(wave as usize + index) % SPAWN_LANES.len()];
            let lane = if self.tactical_variance && index == 0 {
                threat
                    .find_weakest_column(&towers, &SPAWN_LANES)
                    .unwrap_or(rotated)
            } else {
                rotated
            };
            let squad = Squad::new(self.next_squad_id, wave, kinds, lane, delay, tables);
            self.next_squad_id += 1;
            self.pending.push(PendingSquad {
                squad,
                activate_at: now + index as f64 * SQUAD_STAGGER_SECS,
            });
        }
        *self.open_waves.entry(wave).or_default() += count;
        tracing::debug!(wave, squads = count, "wave started");
        count
    }

    /// Activate due squads and let every active squad release its next member.
    pub fn spawn(&mut self, ctx: &mut SimContext, controller: &MovementController) {
        let now = ctx.now;
        let (due, waiting): (Vec<PendingSquad>, Vec<PendingSquad>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.activate_at <= now);
        self.pending = waiting;
        for pending in due {
            tracing::debug!(squad = pending.squad.id, "squad activated");
            self.active.push(pending.squad);
        }

        for squad in &mut self.active {
            squad.spawn(ctx, controller);
        }
    }

    /// Coordinate active squads, retire spent ones, and announce cleared waves.
    pub fn update(&mut self, ctx: &mut SimContext) {
        for squad in &mut self.active {
            squad.update(ctx.world, ctx.now);
        }

        let (spent, live): (Vec<Squad>, Vec<Squad>) =
            std::mem::take(&mut self.active).into_iter().partition(Squad::is_spent);
        self.active = live;

        for squad in spent {
            tracing::debug!(squad = squad.id, wave = squad.wave, "squad retired");
            let Some(open) = self.open_waves.get_mut(&squad.wave) else {
                continue;
            };
            *open = open.saturating_sub(1);
            if *open == 0 {
                self.open_waves.remove(&squad.wave);
                ctx.audio.push(AudioEvent::WaveCleared { wave: squad.wave });
                tracing::info!(wave = squad.wave, "wave cleared");
            }
        }
    }

    pub fn active_squads(&self) -> &[Squad] {
        &self.active
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// No squad pending or active.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty()
    }
}
