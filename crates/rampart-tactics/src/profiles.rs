//! Kind-specific behavioral profiles.
//!
//! Every enemy kind runs the same movement controller; the differences are
//! these tuning constants.

use rampart_core::enums::EnemyKind;

/// Movement tuning for an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementProfile {
    /// Seconds between lane decisions.
    pub lane_switch_cooldown_secs: f64,
    /// Lateral speed as a fraction of effective forward speed.
    pub lateral_speed_factor: f64,
    /// Multiplier on the avoidance vector.
    pub avoidance_strength: f64,
    /// Radius within which neighbors repel.
    pub detection_radius: f64,
    /// Minimum seconds between retreat starts.
    pub retreat_cooldown_secs: f64,
    /// How long a retreat lasts.
    pub retreat_duration_secs: f64,
}

const BASELINE: MovementProfile = MovementProfile {
    lane_switch_cooldown_secs: 1.0,
    lateral_speed_factor: 0.8,
    avoidance_strength: 1.0,
    detection_radius: 1.0,
    retreat_cooldown_secs: 5.0,
    retreat_duration_secs: 0.8,
};

/// Get the movement profile for a given kind.
pub fn movement_profile(kind: EnemyKind) -> MovementProfile {
    match kind {
        EnemyKind::Grunt | EnemyKind::Banshee | EnemyKind::Vampire => BASELINE,
        EnemyKind::Rusher => MovementProfile {
            lane_switch_cooldown_secs: 0.6,
            lateral_speed_factor: 1.2,
            avoidance_strength: 0.6,
            detection_radius: 0.8,
            retreat_cooldown_secs: 4.0,
            retreat_duration_secs: 0.5,
        },
        EnemyKind::Flyer => MovementProfile {
            lane_switch_cooldown_secs: 0.8,
            avoidance_strength: 0.3,
            detection_radius: 0.6,
            retreat_cooldown_secs: 6.0,
            retreat_duration_secs: 0.5,
            ..BASELINE
        },
        EnemyKind::Tank => MovementProfile {
            lane_switch_cooldown_secs: 2.5,
            lateral_speed_factor: 0.5,
            avoidance_strength: 1.5,
            detection_radius: 1.2,
            retreat_cooldown_secs: 8.0,
            ..BASELINE
        },
        EnemyKind::Boss => MovementProfile {
            lane_switch_cooldown_secs: 3.0,
            lateral_speed_factor: 0.4,
            avoidance_strength: 2.0,
            detection_radius: 1.5,
            retreat_cooldown_secs: 12.0,
            ..BASELINE
        },
        EnemyKind::Healer => MovementProfile {
            lane_switch_cooldown_secs: 1.2,
            ..BASELINE
        },
        EnemyKind::Assassin => MovementProfile {
            lane_switch_cooldown_secs: 0.8,
            lateral_speed_factor: 1.1,
            avoidance_strength: 0.8,
            detection_radius: 0.9,
            retreat_cooldown_secs: 4.0,
            retreat_duration_secs: 0.6,
        },
        EnemyKind::Skirmisher => MovementProfile {
            lane_switch_cooldown_secs: 0.7,
            lateral_speed_factor: 1.1,
            avoidance_strength: 0.8,
            retreat_cooldown_secs: 3.0,
            retreat_duration_secs: 0.6,
            ..BASELINE
        },
    }
}

/// Relative importance of a kind when weighing coordination decisions.
pub fn threat_multiplier(kind: EnemyKind) -> f64 {
    match kind {
        EnemyKind::Grunt => 1.0,
        EnemyKind::Rusher => 1.2,
        EnemyKind::Flyer => 1.3,
        EnemyKind::Tank => 1.5,
        EnemyKind::Boss => 3.0,
        EnemyKind::Healer => 1.4,
        EnemyKind::Banshee => 1.6,
        EnemyKind::Vampire => 1.5,
        EnemyKind::Assassin => 1.8,
        EnemyKind::Skirmisher => 1.1,
    }
}
