#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::RampartError;
    use crate::events::AudioEvent;
    use crate::state::GameStateSnapshot;
    use crate::tables::{BalanceTables, EnemyTemplate, TowerTemplate};
    use crate::types::{GridPos, SimTime};

    // ---- Enemy kinds ----

    #[test]
    fn test_enemy_kind_parse_is_case_insensitive() {
        assert_eq!("Tank".parse::<EnemyKind>().unwrap(), EnemyKind::Tank);
        assert_eq!(" healer ".parse::<EnemyKind>().unwrap(), EnemyKind::Healer);
        for kind in EnemyKind::ALL {
            assert_eq!(kind.name().parse::<EnemyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_enemy_kind_errors_and_falls_back() {
        let err = "dragon".parse::<EnemyKind>().unwrap_err();
        assert!(matches!(err, RampartError::UnknownEnemyKind(ref name) if name == "dragon"));
        assert_eq!(EnemyKind::parse_or_default("dragon"), EnemyKind::Grunt);
    }

    #[test]
    fn test_unit_classes() {
        assert_eq!(EnemyKind::Boss.class(), UnitClass::Tank);
        assert_eq!(EnemyKind::Healer.class(), UnitClass::Support);
        assert_eq!(EnemyKind::Flyer.class(), UnitClass::Fast);
        assert_eq!(EnemyKind::Banshee.class(), UnitClass::Frontline);
    }

    #[test]
    fn test_damage_type_armor_rules() {
        assert!(!DamageType::Physical.ignores_armor());
        assert!(DamageType::Piercing.ignores_armor());
        assert!(DamageType::Magic.ignores_armor());
    }

    // ---- Grid ----

    #[test]
    fn test_grid_lane_and_bounds() {
        assert_eq!(GridPos::new(3.4, 2.0).lane(), 3);
        assert_eq!(GridPos::new(3.6, 2.0).lane(), 4);
        assert!(GridPos::new(0.0, SPAWN_ROW).in_bounds());
        assert!(!GridPos::new(-0.1, 1.0).in_bounds());
        assert!(!GridPos::new(1.0, WALL_ROW + 0.5).in_bounds());

        let clamped = GridPos::new(20.0, -5.0).clamped();
        assert_eq!(clamped.col, (GRID_COLS - 1) as f64);
        assert_eq!(clamped.row, MIN_ROW);
    }

    #[test]
    fn test_grid_distance() {
        let a = GridPos::new(0.0, 0.0);
        let b = GridPos::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(GridPos::from_vec(b.as_vec()), b);
    }

    #[test]
    fn test_tick_timing() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    // ---- Balance tables ----

    #[test]
    fn test_default_tables_cover_every_kind() {
        let tables = BalanceTables::default();
        tables.validate().unwrap();
        for kind in EnemyKind::ALL {
            assert!(tables.try_enemy(kind).is_ok(), "missing enemy {kind}");
        }
        for kind in TowerKind::ALL {
            assert!(tables.try_tower(kind).is_ok(), "missing tower {kind:?}");
        }
    }

    #[test]
    fn test_missing_template_falls_back() {
        let mut tables = BalanceTables::default();
        tables.enemies.remove(&EnemyKind::Vampire);
        tables.towers.remove(&TowerKind::Tesla);

        assert!(matches!(
            tables.try_enemy(EnemyKind::Vampire),
            Err(RampartError::MissingEnemyTemplate(EnemyKind::Vampire))
        ));
        assert_eq!(tables.enemy(EnemyKind::Vampire), EnemyTemplate::FALLBACK);
        assert_eq!(tables.tower(TowerKind::Tesla), TowerTemplate::FALLBACK);
    }

    #[test]
    fn test_wave_scaling() {
        let tables = BalanceTables::default();
        let base = tables.enemy_for_wave(EnemyKind::Tank, 1);
        assert_eq!(base, tables.enemy(EnemyKind::Tank));

        let wave5 = tables.enemy_for_wave(EnemyKind::Tank, 5);
        assert!((wave5.hp - base.hp * 1.6).abs() < 1e-9);
        assert!((wave5.armor - (base.armor + 1.0)).abs() < 1e-9);
        assert!(wave5.speed > base.speed);
        assert_eq!(wave5.bounty, base.bounty);
    }

    #[test]
    fn test_tower_level_scaling() {
        let tables = BalanceTables::default();
        let l1 = tables.tower_stats(TowerKind::Arrow, 1);
        let l3 = tables.tower_stats(TowerKind::Arrow, 3);
        assert!((l3.damage - l1.damage * 2.0).abs() < 1e-9);
        assert!((l3.fire_interval_secs - l1.fire_interval_secs * 0.81).abs() < 1e-9);
        assert!(l3.range > l1.range);

        // Levels beyond the cap are clamped.
        let capped = tables.tower_stats(TowerKind::Arrow, 99);
        let max = tables.tower_stats(TowerKind::Arrow, tables.level_scaling.max_level);
        assert_eq!(capped.damage, max.damage);
        assert_eq!(tables.upgrade_cost(TowerKind::Arrow, tables.level_scaling.max_level), None);
    }

    #[test]
    fn test_tower_stats_with_zero_level_cap() {
        let mut tables = BalanceTables::default();
        tables.level_scaling.max_level = 0;
        let base = BalanceTables::default().tower_stats(TowerKind::Arrow, 1);
        assert_eq!(tables.tower_stats(TowerKind::Arrow, 0).damage, base.damage);
        assert_eq!(tables.tower_stats(TowerKind::Arrow, 4).damage, base.damage);
    }

    #[test]
    fn test_tables_json_load_and_validate() {
        let json = serde_json::to_string(&BalanceTables::default()).unwrap();
        let loaded = BalanceTables::from_json(&json).unwrap();
        assert_eq!(loaded.enemy(EnemyKind::Boss), BalanceTables::default().enemy(EnemyKind::Boss));

        let mut broken = BalanceTables::default();
        broken.towers.get_mut(&TowerKind::Cannon).unwrap().fire_interval_secs = 0.0;
        let json = serde_json::to_string(&broken).unwrap();
        assert!(matches!(
            BalanceTables::from_json(&json),
            Err(RampartError::InvalidTable(_))
        ));

        assert!(matches!(
            BalanceTables::from_json("{not json"),
            Err(RampartError::Parse(_))
        ));
    }

    // ---- Wire shapes ----

    #[test]
    fn test_command_and_event_tagging() {
        let cmd = PlayerCommand::PlaceTower {
            kind: TowerKind::Frost,
            col: 2,
            row: 7,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"PlaceTower\""), "got {json}");

        let event = AudioEvent::WaveAnnounced { wave: 3 };
        let json = serde_json::to_string(&event).unwrap();
        let back: AudioEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_default_snapshot() {
        let snap = GameStateSnapshot::default();
        assert_eq!(snap.phase, GamePhase::Setup);
        assert!(snap.enemies.is_empty());
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.time.tick, 0);
    }
}
