//! Squads: a group of enemies released together under one tactical role.
//!
//! The role is inferred from the composition and fixes the formation order
//! (who is released first). After movement each tick the squad coordinates
//! its live members by writing their `SquadDirective`: supports hang back
//! behind tanks or the frontline, flankers mirror a squad-mate's evasion,
//! assassins wait for a buff, and overlapping members give way.

use hecs::{Entity, World};
use rand::Rng;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::enums::{EnemyKind, TacticalRole, UnitClass};
use rampart_core::state::SquadView;
use rampart_core::tables::BalanceTables;
use rampart_core::types::GridPos;

use rampart_tactics::controller::MovementController;
use rampart_tactics::threat::{enemy_threat_level, EnemySnapshot};

use crate::context::{entity_id, SimContext};
use crate::world_setup;

/// Infer the tactical role of a composition. First match wins.
pub fn infer_role(kinds: &[EnemyKind]) -> TacticalRole {
    let has = |class: UnitClass| kinds.iter().any(|k| k.class() == class);
    let fast = kinds.iter().filter(|k| k.class() == UnitClass::Fast).count();

    if has(UnitClass::Assassin) {
        TacticalRole::Assassination
    } else if has(UnitClass::Tank) {
        TacticalRole::Siege
    } else if has(UnitClass::Support) {
        TacticalRole::BuffedAssault
    } else if has(UnitClass::Skirmisher) {
        TacticalRole::Flanking
    } else if kinds.len() >= 3 && fast * 2 >= kinds.len() {
        TacticalRole::Rush
    } else {
        TacticalRole::Standard
    }
}

/// Release order for a role. Every reordering is a stable sort, so units of
/// equal rank keep their composition order.
pub fn formation_order(role: TacticalRole, mut kinds: Vec<EnemyKind>, tables: &BalanceTables) -> Vec<EnemyKind> {
    match role {
        TacticalRole::Siege => kinds.sort_by_key(|k| match k.class() {
            UnitClass::Tank => 0,
            UnitClass::Support => 2,
            _ => 1,
        }),
        TacticalRole::BuffedAssault => kinds.sort_by_key(|k| k.class() != UnitClass::Support),
        TacticalRole::Assassination => kinds.sort_by_key(|k| match k.class() {
            UnitClass::Support => 0,
            UnitClass::Assassin => 1,
            _ => 2,
        }),
        TacticalRole::Rush => {
            kinds.sort_by(|a, b| tables.enemy(*b).speed.total_cmp(&tables.enemy(*a).speed))
        }
        TacticalRole::Standard | TacticalRole::Flanking => {}
    }
    kinds
}

/// What the coordinator needs to know about one live member.
#[derive(Debug, Clone, Copy)]
struct Member {
    entity: Entity,
    key: u64,
    class: UnitClass,
    pos: GridPos,
    retreating: bool,
    threat_level: f64,
}

#[derive(Debug, Clone)]
pub struct Squad {
    pub id: u32,
    pub wave: u32,
    pub role: TacticalRole,
    pub formation: Vec<EnemyKind>,
    /// Next formation slot to release. Never exceeds `formation.len()`.
    pub spawn_index: usize,
    /// Live members only.
    pub members: Vec<Entity>,
    pub lane: i32,
    pub spawn_delay: f64,
    last_spawn_at: Option<f64>,
    /// Members that were retreating at the previous update.
    retreating: Vec<Entity>,
}

impl Squad {
    pub fn new(
        id: u32,
        wave: u32,
        kinds: Vec<EnemyKind>,
        lane: i32,
        spawn_delay: f64,
        tables: &BalanceTables,
    ) -> Self {
        let role = infer_role(&kinds);
        let formation = formation_order(role, kinds, tables);
        tracing::debug!(squad = id, ?role, size = formation.len(), lane, "squad formed");
        Self {
            id,
            wave,
            role,
            formation,
            spawn_index: 0,
            members: Vec::new(),
            lane,
            spawn_delay: spawn_delay.max(0.0),
            last_spawn_at: None,
            retreating: Vec::new(),
        }
    }

    pub fn is_fully_spawned(&self) -> bool {
        self.spawn_index >= self.formation.len()
    }

    /// Fully spawned with no live member left.
    pub fn is_spent(&self) -> bool {
        self.is_fully_spawned() && self.members.is_empty()
    }

    /// Release the next formation member if its delay has elapsed.
    pub fn spawn(&mut self, ctx: &mut SimContext, controller: &MovementController) -> Option<Entity> {
        if self.is_fully_spawned() {
            return None;
        }
        if self
            .last_spawn_at
            .is_some_and(|last| ctx.now - last < self.spawn_delay)
        {
            return None;
        }

        let kind = self.formation[self.spawn_index];
        let jitter = ctx.rng.gen_range(-SPAWN_LATERAL_JITTER..=SPAWN_LATERAL_JITTER);
        let pos = GridPos::new(self.lane as f64 + jitter, SPAWN_ROW).clamped();
        let entity = world_setup::spawn_enemy(
            ctx.world, ctx.rng, ctx.tables, controller, kind, pos, self.wave, ctx.now,
        );
        let tag = SquadTag {
            squad_id: self.id,
            role: self.role,
        };
        if ctx.world.insert_one(entity, tag).is_err() {
            return None;
        }

        self.members.push(entity);
        self.spawn_index += 1;
        self.last_spawn_at = Some(ctx.now);
        tracing::debug!(squad = self.id, %kind, slot = self.spawn_index, "squad member spawned");
        Some(entity)
    }

    /// Coordinate live members for the next tick.
    pub fn update(&mut self, world: &mut World, now: f64) {
        self.members.retain(|&entity| {
            world
                .get::<&Vitals>(entity)
                .map(|vitals| vitals.alive)
                .unwrap_or(false)
        });

        let members: Vec<Member> = self
            .members
            .iter()
            .filter_map(|&entity| {
                let (pos, stats, vitals, ai) = world
                    .query_one_mut::<(&GridPos, &EnemyStats, &Vitals, &EnemyAi)>(entity)
                    .ok()?;
                let key = entity_id(entity);
                let snapshot = EnemySnapshot {
                    key,
                    kind: stats.kind,
                    pos: *pos,
                    hp: vitals.hp,
                    armor: stats.armor,
                    dodge_chance: stats.dodge_chance,
                    cc_resistance: stats.cc_resistance,
                };
                Some(Member {
                    entity,
                    key,
                    class: stats.kind.class(),
                    pos: *pos,
                    retreating: ai.retreating,
                    threat_level: enemy_threat_level(&snapshot),
                })
            })
            .collect();

        // Speed resets every tick; a pending evasion survives until it has
        // been acted on or has gone stale.
        let mut directives: Vec<SquadDirective> = members
            .iter()
            .map(|m| {
                let previous = world
                    .get::<&SquadDirective>(m.entity)
                    .map(|d| (*d).clone())
                    .unwrap_or_default();
                SquadDirective {
                    speed_factor: 1.0,
                    evade_at: previous
                        .evade_at
                        .filter(|&at| !m.retreating && now <= at + FLANK_MIRROR_DELAY_SECS),
                }
            })
            .collect();

        match self.role {
            TacticalRole::Siege => siege(&members, &mut directives),
            TacticalRole::BuffedAssault => buffed_assault(&members, &mut directives),
            TacticalRole::Flanking => self.flanking(&members, &mut directives, now),
            TacticalRole::Assassination => assassination(&members, &mut directives),
            TacticalRole::Standard | TacticalRole::Rush => {}
        }
        maintain_spacing(&members, &mut directives);

        for (member, directive) in members.iter().zip(directives) {
            if let Ok(slot) = world.query_one_mut::<&mut SquadDirective>(member.entity) {
                *slot = directive;
            }
        }
    }

    fn flanking(&mut self, members: &[Member], directives: &mut [SquadDirective], now: f64) {
        let started = members
            .iter()
            .any(|m| m.retreating && !self.retreating.contains(&m.entity));
        if started {
            for (member, directive) in members.iter().zip(directives.iter_mut()) {
                if !member.retreating && directive.evade_at.is_none() {
                    directive.evade_at = Some(now + FLANK_MIRROR_DELAY_SECS);
                }
            }
        }
        self.retreating = members
            .iter()
            .filter(|m| m.retreating)
            .map(|m| m.entity)
            .collect();
    }

    pub fn view(&self) -> SquadView {
        SquadView {
            id: self.id,
            role: self.role,
            lane: self.lane,
            spawned: self.spawn_index as u32,
            formation_len: self.formation.len() as u32,
            live_members: self.members.len() as u32,
        }
    }
}

/// Supports lagging too far behind the lead tank slow down so the tank
/// pulls away less; once close enough they run at full speed.
fn siege(members: &[Member], directives: &mut [SquadDirective]) {
    let Some(lead_row) = members
        .iter()
        .filter(|m| m.class == UnitClass::Tank)
        .map(|m| m.pos.row)
        .max_by(f64::total_cmp)
    else {
        return;
    };
    for (member, directive) in members.iter().zip(directives.iter_mut()) {
        if member.class == UnitClass::Support && lead_row - member.pos.row > SIEGE_FOLLOW_DISTANCE {
            directive.speed_factor = SIEGE_SUPPORT_SPEED_FACTOR;
        }
    }
}

/// Supports that drift ahead of the frontline's average row slow down.
fn buffed_assault(members: &[Member], directives: &mut [SquadDirective]) {
    let frontline: Vec<f64> = members
        .iter()
        .filter(|m| m.class != UnitClass::Support)
        .map(|m| m.pos.row)
        .collect();
    if frontline.is_empty() {
        return;
    }
    let average = frontline.iter().sum::<f64>() / frontline.len() as f64;
    for (member, directive) in members.iter().zip(directives.iter_mut()) {
        if member.class == UnitClass::Support && member.pos.row > average {
            directive.speed_factor = ASSAULT_SUPPORT_SPEED_FACTOR;
        }
    }
}

/// Assassins creep until a support is in aura range, then surge.
fn assassination(members: &[Member], directives: &mut [SquadDirective]) {
    for (member, directive) in members.iter().zip(directives.iter_mut()) {
        if member.class != UnitClass::Assassin {
            continue;
        }
        let buffed = members.iter().any(|other| {
            other.class == UnitClass::Support
                && other.entity != member.entity
                && other.pos.distance_to(&member.pos) <= SUPPORT_AURA_RADIUS
        });
        directive.speed_factor = if buffed {
            ASSASSIN_SURGE_FACTOR
        } else {
            ASSASSIN_THROTTLE_FACTOR
        };
    }
}

/// For every overlapping pair, the trailing member gives way. Equal rows go
/// to the lower threat level yielding, then to the higher id.
fn maintain_spacing(members: &[Member], directives: &mut [SquadDirective]) {
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            let (a, b) = (&members[i], &members[j]);
            if a.pos.distance_to(&b.pos) >= PERSONAL_SPACE_RADIUS {
                continue;
            }
            let a_trails = if a.pos.row != b.pos.row {
                a.pos.row < b.pos.row
            } else if a.threat_level != b.threat_level {
                a.threat_level < b.threat_level
            } else {
                a.key > b.key
            };
            let trailing = if a_trails { i } else { j };
            directives[trailing].speed_factor = directives[trailing].speed_factor.min(FORMATION_TRAILING_FACTOR);
        }
    }
}
