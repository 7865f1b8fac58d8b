//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::PlayerCommand;
use rampart_core::components::Tower;
use rampart_core::constants::*;
use rampart_core::enums::{GamePhase, TowerKind};
use rampart_core::events::AudioEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_core::tables::BalanceTables;
use rampart_core::types::{GridPos, SimTime};

use rampart_tactics::controller::MovementController;
use rampart_tactics::threat::ThreatAssessment;

use crate::context::{entity_id, DefenderState, SimContext};
use crate::event_queue::EventQueue;
use crate::systems;
use crate::systems::director::SpawnDirector;
use crate::waves::{StandardWaves, WaveContent};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub starting_health: f64,
    pub starting_gold: f64,
    /// Aim the first squad of each wave at the weakest spawn lane.
    pub tactical_variance: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_health: DEFAULT_STARTING_HEALTH,
            starting_gold: DEFAULT_STARTING_GOLD,
            tactical_variance: false,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    wave: u32,
    rng: ChaCha8Rng,
    tables: BalanceTables,
    content: Box<dyn WaveContent>,
    controller: MovementController,
    threat: ThreatAssessment,
    director: SpawnDirector,
    events: EventQueue,
    defender: DefenderState,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with built-in tables and waves.
    pub fn new(config: SimConfig) -> Self {
        Self::with_content(config, BalanceTables::default(), Box::new(StandardWaves))
    }

    /// Create a new simulation engine with external tables and wave content.
    pub fn with_content(config: SimConfig, tables: BalanceTables, content: Box<dyn WaveContent>) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            wave: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tables,
            content,
            controller: MovementController::new(),
            threat: ThreatAssessment::default(),
            director: SpawnDirector::new(config.tactical_variance),
            events: EventQueue::new(),
            defender: DefenderState::new(config.starting_health, config.starting_gold),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
            if self.defender.fallen {
                self.phase = GamePhase::Defeated;
            }
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.wave,
            &self.defender,
            &self.director,
            audio_events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn defender(&self) -> &DefenderState {
        &self.defender
    }

    pub fn tables(&self) -> &BalanceTables {
        &self.tables
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn director(&self) -> &SpawnDirector {
        &self.director
    }

    pub fn threat(&self) -> &ThreatAssessment {
        &self.threat
    }

    /// Mutable world access for tests that place entities by hand.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        if self.phase == GamePhase::Defeated {
            tracing::warn!(?command, "command ignored after defeat");
            return;
        }
        match command {
            PlayerCommand::StartWave { wave } => self.start_wave(wave),
            PlayerCommand::PlaceTower { kind, col, row } => self.place_tower(kind, col, row),
            PlayerCommand::UpgradeTower { col, row } => self.upgrade_tower(col, row),
            PlayerCommand::SellTower { col, row } => self.sell_tower(col, row),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    fn start_wave(&mut self, wave: u32) {
        if self.phase == GamePhase::Paused {
            tracing::warn!(wave, "cannot start a wave while paused");
            return;
        }
        let now = self.time.elapsed_secs;
        self.director.start_wave(
            wave,
            self.content.as_ref(),
            &self.world,
            &self.tables,
            &self.threat,
            now,
        );
        self.wave = wave;
        self.phase = GamePhase::Active;
        self.events.schedule(
            now + WAVE_ANNOUNCE_DELAY_SECS,
            AudioEvent::WaveAnnounced { wave },
        );
    }

    fn place_tower(&mut self, kind: TowerKind, col: i32, row: i32) {
        if !world_setup::is_buildable(&self.world, col, row) {
            tracing::warn!(?kind, col, row, "cell is not buildable");
            return;
        }
        let cost = self.tables.tower_cost(kind);
        if cost > self.defender.gold {
            tracing::warn!(?kind, cost, gold = self.defender.gold, "cannot afford tower");
            return;
        }
        self.defender.gold -= cost;
        let pos = GridPos::new(col as f64, row as f64);
        let tower = world_setup::spawn_tower(&mut self.world, &self.tables, kind, pos);
        tracing::debug!(tower = entity_id(tower), ?kind, col, row, "tower placed");
    }

    fn upgrade_tower(&mut self, col: i32, row: i32) {
        let Some(entity) = world_setup::tower_at(&self.world, col, row) else {
            tracing::warn!(col, row, "no tower to upgrade");
            return;
        };
        let Ok(mut tower) = self.world.get::<&mut Tower>(entity) else {
            return;
        };
        let Some(cost) = self.tables.upgrade_cost(tower.kind, tower.level) else {
            tracing::warn!(col, row, level = tower.level, "tower already at max level");
            return;
        };
        if cost > self.defender.gold {
            tracing::warn!(cost, gold = self.defender.gold, "cannot afford upgrade");
            return;
        }
        self.defender.gold -= cost;
        tower.level += 1;
        tower.invested_gold += cost;
        drop(tower);
        world_setup::refresh_tower_stats(&mut self.world, &self.tables, entity);
        self.threat.forget(entity_id(entity));
    }

    fn sell_tower(&mut self, col: i32, row: i32) {
        let Some(entity) = world_setup::tower_at(&self.world, col, row) else {
            tracing::warn!(col, row, "no tower to sell");
            return;
        };
        let refund = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| tower.invested_gold * SELL_REFUND_FRACTION)
            .unwrap_or(0.0);
        self.defender.gold += refund;
        self.threat.forget(entity_id(entity));
        let _ = self.world.despawn(entity);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        let released = self.events.release_due(now);
        self.audio_events.extend(released);

        let mut ctx = SimContext {
            world: &mut self.world,
            rng: &mut self.rng,
            tables: &self.tables,
            defender: &mut self.defender,
            audio: &mut self.audio_events,
            events: &mut self.events,
            now,
            dt: DT,
        };

        // 1. Squad activation and releases
        self.director.spawn(&mut ctx, &self.controller);
        // 2. Movement
        systems::movement::run(&mut ctx, &self.controller, &mut self.threat);
        // 3. Ability triggers
        systems::ability_triggers::run(&mut ctx);
        // 4. Combat (abilities, fire, collisions)
        systems::combat::run(&mut ctx);
        // 5. Wall assault
        systems::wall::run(&mut ctx);
        // 6. Squad coordination, retirement, wave clear
        self.director.update(&mut ctx);
        // 7. Cleanup
        systems::cleanup::run(&mut ctx, &mut self.threat, &mut self.despawn_buffer);
    }
}
