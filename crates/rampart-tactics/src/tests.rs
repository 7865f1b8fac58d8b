#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use rampart_core::components::{EnemyAi, EnemyStatus, SlowPayload, SquadDirective, TowerStats};
    use rampart_core::constants::*;
    use rampart_core::enums::{DamageType, EnemyKind};
    use rampart_core::types::GridPos;

    use crate::avoidance::{avoidance_force, forward_damping};
    use crate::context::{Neighbor, TowerCoverage};
    use crate::controller::{effective_speed, Mover, MovementController};
    use crate::lane::{beats_with_hysteresis, decide_lane, lane_score};
    use crate::obstacle::{find_free_cell, is_crowded};
    use crate::profiles::movement_profile;
    use crate::retreat::{self, count_blockers, RetreatDecision};
    use crate::threat::*;

    fn neighbor(key: u64, col: f64, row: f64) -> Neighbor {
        Neighbor {
            key,
            pos: GridPos::new(col, row),
            target_lane: col.round() as i32,
        }
    }

    fn grunt_at(key: u64, col: f64, row: f64, lane: i32) -> Mover {
        Mover {
            key,
            kind: EnemyKind::Grunt,
            pos: GridPos::new(col, row),
            base_speed: 0.8,
            status: EnemyStatus::default(),
            directive: SquadDirective::default(),
            ai: EnemyAi {
                target_lane: lane,
                ..EnemyAi::default()
            },
        }
    }

    // ---- Avoidance ----

    #[test]
    fn test_avoidance_zero_without_neighbors_in_radius() {
        let pos = GridPos::new(4.0, 5.0);
        let neighbors = [
            neighbor(1, 4.0, 5.0), // self
            neighbor(2, 5.0, 5.0), // exactly at the radius
            neighbor(3, 4.0, 7.0),
        ];
        let force = avoidance_force(pos, 1, &neighbors, 1.0, 1.0);
        assert_eq!(force, glam::DVec2::ZERO);
        assert_eq!(forward_damping(force), 1.0);
    }

    #[test]
    fn test_avoidance_pushes_away_and_damps_forward() {
        let pos = GridPos::new(4.0, 5.0);
        // Neighbor straight ahead at half the radius.
        let force = avoidance_force(pos, 1, &[neighbor(2, 4.0, 5.5)], 1.0, 1.0);
        assert!(force.x.abs() < 1e-12);
        assert!((force.y + 0.5).abs() < 1e-12, "got {force}");
        assert!((forward_damping(force) - 0.5).abs() < 1e-12);

        // Neighbor to the right pushes left.
        let force = avoidance_force(pos, 1, &[neighbor(2, 4.5, 5.0)], 1.0, 1.0);
        assert!(force.x < 0.0);
    }

    // ---- Lanes ----

    #[test]
    fn test_lane_score_penalties() {
        let pos = GridPos::new(4.0, 2.0);
        let empty = lane_score(4, pos, 0, &[], &[]);
        assert!((empty - LANE_CENTER_BIAS).abs() < 1e-12);

        let crowded = lane_score(4, pos, 0, &[neighbor(1, 4.0, 3.5)], &[]);
        assert!((crowded - (empty - 6.0)).abs() < 1e-12);

        let beside = lane_score(4, pos, 0, &[neighbor(1, 4.1, 2.2)], &[]);
        assert!(beside < crowded, "very close neighbor must cost more");

        let tower = TowerCoverage::new(GridPos::new(4.0, 4.0), 2.0);
        let covered = lane_score(4, pos, 0, &[], &[tower]);
        assert!((covered - (empty - LANE_TOWER_PENALTY)).abs() < 1e-12);
    }

    #[test]
    fn test_neighbor_heading_into_lane_counts_there() {
        let pos = GridPos::new(4.0, 2.0);
        let switching = Neighbor {
            target_lane: 3,
            ..neighbor(1, 4.0, 3.5)
        };
        let empty = lane_score(3, pos, 0, &[], &[]);
        let claimed = lane_score(3, pos, 0, &[switching], &[]);
        assert!((claimed - (empty - 6.0)).abs() < 1e-12);
        // It still counts in the lane it is leaving.
        let left = lane_score(4, pos, 0, &[switching], &[]);
        assert!((left - (LANE_CENTER_BIAS - 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_hysteresis_boundary() {
        assert!(!beats_with_hysteresis(0.0, LANE_HYSTERESIS_MARGIN));
        assert!(beats_with_hysteresis(0.0, LANE_HYSTERESIS_MARGIN + 1e-6));

        // Lane 3 beats lane 4 by exactly the margin: 0.75 vs -4.25.
        let pos = GridPos::new(4.0, 0.0);
        let neighbors = [neighbor(1, 4.0, 1.6875)];
        let decision = decide_lane(4, pos, 0, &neighbors, &[]);
        assert!((decision.current_score + 4.25).abs() < 1e-12);
        let (_, best) = decision.best_adjacent.unwrap();
        assert!((best - decision.current_score - LANE_HYSTERESIS_MARGIN).abs() < 1e-12);
        assert_eq!(decision.switch_to, None);

        // A little closer and the margin is cleared.
        let neighbors = [neighbor(1, 4.0, 1.6)];
        assert_eq!(decide_lane(4, pos, 0, &neighbors, &[]).switch_to, Some(3));
    }

    #[test]
    fn test_edge_lane_has_single_neighbor() {
        let decision = decide_lane(0, GridPos::new(0.0, 2.0), 0, &[], &[]);
        assert_eq!(decision.best_adjacent.map(|(lane, _)| lane), Some(1));
    }

    // ---- Obstacles and retreat ----

    #[test]
    fn test_deconflict_takes_first_free_offset() {
        let pos = GridPos::new(4.0, 2.0);
        let neighbors = [neighbor(1, 4.0, 2.0)];
        assert!(is_crowded(pos, 0, &neighbors));
        assert!(!is_crowded(pos, 1, &neighbors));

        let free = find_free_cell(pos, 0, &neighbors, SPAWN_ROW).unwrap();
        assert!((free.col - 4.3).abs() < 1e-9);
        assert!((free.row - 1.8).abs() < 1e-9);

        // Nothing above min_row qualifies when the only free offsets go up.
        assert!(find_free_cell(pos, 0, &neighbors, 2.0).is_none());
    }

    #[test]
    fn test_retreat_needs_two_blockers_and_cooldown() {
        let profile = movement_profile(EnemyKind::Grunt);
        let pos = GridPos::new(4.0, 2.0);
        let one = [neighbor(1, 4.0, 2.3)];
        let two = [neighbor(1, 4.0, 2.3), neighbor(2, 4.2, 2.5)];
        assert_eq!(count_blockers(pos, 0, &one), 1);
        assert_eq!(count_blockers(pos, 0, &two), 2);

        let mut ai = EnemyAi::default();
        assert_eq!(retreat::evaluate(&ai, 1, false, 10.0, &profile), RetreatDecision::Advance);
        let begin = retreat::evaluate(&ai, 2, false, 10.0, &profile);
        assert_eq!(begin, RetreatDecision::Begin);
        retreat::apply(&mut ai, begin, 10.0, &profile);
        assert!(ai.retreating);

        let later = 10.0 + profile.retreat_duration_secs;
        let end = retreat::evaluate(&ai, 2, false, later, &profile);
        assert_eq!(end, RetreatDecision::End);
        retreat::apply(&mut ai, end, later, &profile);

        // Still cooling down.
        assert_eq!(retreat::evaluate(&ai, 2, false, later + 0.1, &profile), RetreatDecision::Advance);
        let cooled = 10.0 + profile.retreat_cooldown_secs;
        assert_eq!(retreat::evaluate(&ai, 2, false, cooled, &profile), RetreatDecision::Begin);
    }

    // ---- Controller ----

    #[test]
    fn test_initialize_enemy_jitters_first_decision() {
        let controller = MovementController::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut ai = EnemyAi::default();
        controller.initialize_enemy(&mut ai, GridPos::new(5.2, SPAWN_ROW), 3.0, &mut rng);
        assert_eq!(ai.target_lane, 5);
        assert!(ai.lane_switch_ready_at >= 3.0);
        assert!(ai.lane_switch_ready_at < 3.0 + INITIAL_LANE_JITTER_SECS);
        assert!(!ai.retreating);
    }

    #[test]
    fn test_effective_speed_applies_slow_and_directive() {
        let status = EnemyStatus {
            slowed_until: 5.0,
            slow_factor: 0.4,
            ..EnemyStatus::default()
        };
        let directive = SquadDirective {
            speed_factor: 0.5,
            evade_at: None,
        };
        assert!((effective_speed(1.0, &status, &directive, 4.0) - 0.2).abs() < 1e-12);
        assert!((effective_speed(1.0, &status, &directive, 5.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stunned_enemy_does_not_move() {
        let controller = MovementController::new();
        let mut mover = grunt_at(1, 4.0, 2.0, 4);
        mover.status.stunned_until = 1.0;
        let outcome = controller.update_movement(&mut mover, DT, 0.5, &[], &[]);
        assert!(!outcome.moved);
        assert_eq!(mover.pos, GridPos::new(4.0, 2.0));
    }

    #[test]
    fn test_forward_motion_stops_at_wall() {
        let controller = MovementController::new();
        let mut mover = grunt_at(1, 4.0, WALL_ROW - 0.01, 4);
        mover.ai.lane_switch_ready_at = 100.0;
        controller.update_movement(&mut mover, 1.0, 0.0, &[], &[]);
        assert_eq!(mover.pos.row, WALL_ROW);
        assert!(mover.ai.at_wall);
    }

    #[test]
    fn test_retreat_moves_backward() {
        let controller = MovementController::new();
        let mut mover = grunt_at(1, 4.0, 2.0, 4);
        mover.ai.lane_switch_ready_at = 100.0;
        let neighbors = [neighbor(2, 4.0, 2.3), neighbor(3, 4.2, 2.5)];
        let outcome = controller.update_movement(&mut mover, DT, 0.0, &neighbors, &[]);
        assert!(outcome.retreat_started);
        assert!(mover.ai.retreating);
        assert!(mover.pos.row < 2.0);
    }

    #[test]
    fn test_spawn_boundary_holds_without_retreat() {
        let controller = MovementController::new();
        let mut mover = grunt_at(1, 4.0, SPAWN_ROW, 4);
        mover.ai.lane_switch_ready_at = 100.0;
        // One neighbor just ahead damps forward motion without blocking it.
        let neighbors = [neighbor(2, 4.0, SPAWN_ROW + 0.3)];
        controller.update_movement(&mut mover, DT, 0.0, &neighbors, &[]);
        assert!(mover.pos.row >= SPAWN_ROW);
    }

    #[test]
    fn test_three_in_lane_switch_converges_without_overshoot() {
        let controller = MovementController::new();
        let mut mover = grunt_at(1, 4.0, 2.0, 4);
        let neighbors = [
            neighbor(1, 4.0, 2.0),
            neighbor(2, 4.0, 3.5),
            neighbor(3, 4.0, 5.0),
        ];

        // Lane 4 scores -5, lanes 3 and 5 score 0.75; the lower index wins.
        let decision = decide_lane(4, mover.pos, 1, &neighbors, &[]);
        assert!((decision.current_score + 5.0).abs() < 1e-12);
        assert_eq!(decision.switch_to, Some(3));

        let mut now = 0.0;
        let outcome = controller.update_movement(&mut mover, DT, now, &neighbors, &[]);
        assert_eq!(outcome.lane_switch, Some((4, 3)));
        assert_eq!(mover.ai.target_lane, 3);

        let mut previous = mover.pos.col;
        for _ in 0..60 {
            now += DT;
            controller.update_movement(&mut mover, DT, now, &neighbors, &[]);
            assert!(mover.pos.col <= previous + 1e-12, "column moved back");
            assert!(mover.pos.col >= 3.0 - 1e-12, "overshot lane 3");
            previous = mover.pos.col;
        }
        assert_eq!(mover.ai.target_lane, 3);
        assert!((mover.pos.col - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_override() {
        let custom = crate::profiles::MovementProfile {
            lane_switch_cooldown_secs: 9.0,
            ..movement_profile(EnemyKind::Rusher)
        };
        let controller = MovementController::new().with_profile(EnemyKind::Rusher, custom);
        assert_eq!(controller.profile(EnemyKind::Rusher).lane_switch_cooldown_secs, 9.0);
        assert_eq!(controller.profile(EnemyKind::Tank), movement_profile(EnemyKind::Tank));
    }

    // ---- Threat assessment ----

    fn arrow_tower(key: u64, col: f64, row: f64) -> TowerSnapshot {
        TowerSnapshot {
            key,
            pos: GridPos::new(col, row),
            level: 1,
            stats: TowerStats {
                damage: 12.0,
                range: 3.0,
                fire_interval_secs: 0.6,
                damage_type: DamageType::Physical,
                splash_radius: 0.0,
                pierce: 0,
                chain: 0,
                slow: None,
            },
        }
    }

    fn target(key: u64, col: f64, row: f64) -> EnemySnapshot {
        EnemySnapshot {
            key,
            kind: EnemyKind::Grunt,
            pos: GridPos::new(col, row),
            hp: 60.0,
            armor: 2.0,
            dodge_chance: 0.0,
            cc_resistance: 0.0,
        }
    }

    #[test]
    fn test_tower_threat_modifiers() {
        let tower = arrow_tower(1, 4.0, 10.0);
        let enemy = target(2, 4.0, 10.0);
        // Point blank: 20 dps × (10/12 after armor) × 1.5 proximity.
        let expected = 20.0 * (10.0 / 12.0) * 1.5;
        assert!((compute_tower_threat(&tower, &enemy) - expected).abs() < 1e-9);

        let far = target(2, 4.0, 14.0);
        assert_eq!(compute_tower_threat(&tower, &far), 0.0);

        let mut magic = tower.clone();
        magic.stats.damage_type = DamageType::Magic;
        assert!(compute_tower_threat(&magic, &enemy) > 20.0 * 1.5);

        let mut dodgy = enemy;
        dodgy.dodge_chance = 0.5;
        let mut cannon = tower.clone();
        cannon.stats.splash_radius = 1.0;
        assert!(compute_tower_threat(&cannon, &dodgy) > compute_tower_threat(&cannon, &enemy));
        assert!(compute_tower_threat(&tower, &dodgy) < compute_tower_threat(&tower, &enemy));

        let mut frost = tower.clone();
        frost.stats.slow = Some(SlowPayload {
            factor: 0.5,
            duration_secs: 1.0,
        });
        let mut stubborn = enemy;
        stubborn.cc_resistance = 1.0;
        assert!(compute_tower_threat(&frost, &stubborn) < compute_tower_threat(&frost, &enemy));

        let mut veteran = tower.clone();
        veteran.level = 3;
        assert!((effective_dps(&veteran) - 20.0 * 1.25 * 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_threat_cache_ttl() {
        let mut threat = ThreatAssessment::default();
        let tower = arrow_tower(1, 4.0, 10.0);
        let mut enemy = target(2, 4.0, 8.0);

        let first = threat.tower_threat(&tower, &enemy, 1.0);
        enemy.hp = 5.0;
        enemy.pos = GridPos::new(4.0, 10.0);
        let cached = threat.tower_threat(&tower, &enemy, 1.0 + THREAT_CACHE_TTL_SECS * 0.5);
        assert_eq!(first, cached);

        let fresh = threat.tower_threat(&tower, &enemy, 1.0 + THREAT_CACHE_TTL_SECS);
        assert!(fresh > first, "closer enemy must score higher once stale");
        assert_eq!(threat.cached_entries(), 1);

        threat.forget(2);
        assert_eq!(threat.cached_entries(), 0);
    }

    #[test]
    fn test_column_threat_and_weakest_column() {
        let towers = [arrow_tower(1, 4.0, 10.0), arrow_tower(2, 4.0, 8.0), arrow_tower(3, 2.0, 9.0)];
        assert!((column_threat(4, &towers) - 40.0).abs() < 1e-9);
        assert!((column_threat(2, &towers) - 20.0).abs() < 1e-9);
        assert_eq!(find_weakest_column(&towers, &SPAWN_LANES), Some(3));
        assert_eq!(find_weakest_column(&towers, &[4, 2]), Some(2));
        assert_eq!(find_weakest_column(&towers, &[]), None);
    }

    #[test]
    fn test_enemy_threat_level_grows_with_progress() {
        let near_spawn = target(1, 4.0, 0.0);
        let near_wall = target(1, 4.0, WALL_ROW);
        assert!((enemy_threat_level(&near_spawn) - 60.0 * 1.2).abs() < 1e-9);
        assert!((enemy_threat_level(&near_wall) - 60.0 * 1.2 * 2.0).abs() < 1e-9);

        let mut boss = near_spawn;
        boss.kind = EnemyKind::Boss;
        assert!(enemy_threat_level(&boss) > enemy_threat_level(&near_spawn));
    }
}
