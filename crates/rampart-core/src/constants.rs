//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Playfield ---

/// Number of lanes (columns). Lanes are indexed 0..GRID_COLS.
pub const GRID_COLS: usize = 9;

/// Row at which enemies enter the playfield.
pub const SPAWN_ROW: f64 = 0.0;

/// Upper bound for retreating enemies (one row of margin above spawn).
pub const MIN_ROW: f64 = -1.0;

/// Row of the defender's wall. Enemies stop here.
pub const WALL_ROW: f64 = 14.0;

/// Distance from the wall row within which an enemy counts as "at wall".
pub const WALL_EPSILON: f64 = 0.05;

// --- Movement ---

/// Speed multiplier applied while slowed, when the slow payload carries none.
pub const DEFAULT_SLOW_FACTOR: f64 = 0.5;

/// Lateral half-width of the band in which another enemy counts as a blocker.
pub const BLOCKER_LATERAL_BAND: f64 = 0.5;

/// Rows ahead within which another enemy counts as a blocker.
pub const BLOCKER_AHEAD_ROWS: f64 = 0.8;

/// Blockers needed to trigger a retreat.
pub const RETREAT_BLOCKER_THRESHOLD: usize = 2;

/// Backward speed while retreating, as a fraction of effective speed.
pub const RETREAT_SPEED_FACTOR: f64 = 0.6;

/// Rows ahead scanned when scoring a lane.
pub const LANE_LOOKAHEAD_ROWS: f64 = 3.0;

/// Maximum penalty for a same-lane enemy ahead (scaled by closeness).
pub const LANE_CROWD_PENALTY: f64 = 12.0;

/// Rows within which a same-lane enemy is "very close".
pub const LANE_VERY_CLOSE_ROWS: f64 = 0.6;

/// Extra penalty for each very close same-lane enemy.
pub const LANE_VERY_CLOSE_PENALTY: f64 = 15.0;

/// Penalty for each tower covering the lane just ahead of the enemy.
pub const LANE_TOWER_PENALTY: f64 = 8.0;

/// Bonus for the center lane, falling off linearly toward the edges.
pub const LANE_CENTER_BIAS: f64 = 1.0;

/// Score improvement an adjacent lane needs before a switch happens.
pub const LANE_HYSTERESIS_MARGIN: f64 = 5.0;

/// Upper bound of the randomized initial lane-switch cooldown.
pub const INITIAL_LANE_JITTER_SECS: f64 = 0.5;

/// Column distance below which an enemy has arrived in its target lane.
pub const LANE_ARRIVAL_EPSILON: f64 = 0.02;

/// Weight of the horizontal avoidance component when nudging the lane target.
pub const AVOIDANCE_LATERAL_WEIGHT: f64 = 0.5;

/// Vertical avoidance below which the way ahead counts as blocked.
pub const AVOIDANCE_BLOCK_THRESHOLD: f64 = 0.2;

/// Lowest forward speed fraction left after avoidance damping.
pub const MIN_FORWARD_FACTOR: f64 = 0.2;

/// Minimum personal space; a neighbor closer than this makes a cell crowded.
pub const PERSONAL_SPACE_RADIUS: f64 = 0.35;

/// Alternatives tried, in order, when the resulting cell is crowded.
pub const DECONFLICT_OFFSETS: [(f64, f64); 5] = [
    (0.3, 0.0),
    (-0.3, 0.0),
    (0.0, -0.2),
    (0.3, -0.2),
    (-0.3, -0.2),
];

/// Width of the edge band (in columns) that attracts tower fire.
pub const EDGE_COLUMN_BAND: f64 = 1.5;

// --- Targeting ---

/// Score weight per row of progress.
pub const TARGET_ROW_WEIGHT: f64 = 10.0;

/// Score bonus for enemies at the wall.
pub const TARGET_WALL_BONUS: f64 = 50.0;

/// Score bonus for enemies in the outermost columns.
pub const TARGET_EDGE_BONUS: f64 = 30.0;

// --- Projectiles ---

/// Projectile flight speed (cells per second).
pub const PROJECTILE_SPEED: f64 = 12.0;

/// Distance at which a projectile connects with an enemy.
pub const PROJECTILE_HIT_RADIUS: f64 = 0.4;

/// Seconds of flight after which a projectile counts as a miss.
pub const PROJECTILE_MAX_LIFETIME_SECS: f64 = 3.0;

/// Fraction of primary damage dealt to each splash victim.
pub const SPLASH_DAMAGE_FRACTION: f64 = 0.5;

/// Damage multiplier applied at every chain hop.
pub const CHAIN_DAMAGE_FALLOFF: f64 = 0.7;

/// Maximum jump distance of a chain hop.
pub const CHAIN_RADIUS: f64 = 2.5;

/// Floor applied to armor-reduced damage.
pub const MIN_DAMAGE: f64 = 1.0;

/// Delay before a tower's recoil cue fires.
pub const TOWER_RECOIL_SECS: f64 = 0.15;

// --- Abilities ---

pub const STOMP_RADIUS: f64 = 2.0;
pub const STOMP_STUN_SECS: f64 = 2.0;
/// Cells a stomper travels between stomps.
pub const STOMP_EVERY_CELLS: f64 = 3.0;
/// Invulnerability a boss gains after stomping.
pub const STOMP_INVULNERABLE_SECS: f64 = 1.0;

pub const SCREAM_RADIUS: f64 = 2.5;
pub const SCREAM_DISABLE_SECS: f64 = 3.0;
/// Cells a screamer travels between screams.
pub const SCREAM_EVERY_CELLS: f64 = 4.0;

/// Gold drained per drain.
pub const DRAIN_AMOUNT: f64 = 5.0;
/// HP gained per unit of gold drained.
pub const DRAIN_HEAL_RATIO: f64 = 2.0;
/// Seconds between drains while at the wall.
pub const DRAIN_INTERVAL_SECS: f64 = 2.0;

pub const HEAL_INTERVAL_SECS: f64 = 3.0;
pub const HEAL_RADIUS: f64 = 2.0;
pub const HEAL_AMOUNT: f64 = 15.0;

/// Seconds an assassin stays invisible after spawning.
pub const ASSASSIN_CLOAK_SECS: f64 = 3.0;

// --- Wall ---

/// Seconds between strikes of an enemy at the wall.
pub const WALL_ATTACK_INTERVAL_SECS: f64 = 1.0;

// --- Threat assessment ---

/// Time-to-live of a cached tower-vs-enemy threat score.
pub const THREAT_CACHE_TTL_SECS: f64 = 0.5;

/// Exponential threat growth per tower level above 1.
pub const THREAT_LEVEL_SCALE: f64 = 1.25;

/// Threat bonus for armor-ignoring towers against armored enemies.
pub const THREAT_ARMOR_IGNORE_BONUS: f64 = 0.25;

/// Maximum threat bonus for an enemy at point-blank range.
pub const THREAT_PROXIMITY_BONUS: f64 = 0.5;

/// Fraction of CC resistance that discounts a slowing tower's threat.
pub const THREAT_CC_WEIGHT: f64 = 0.5;

/// Enemy threat-level weight per point of armor.
pub const ENEMY_THREAT_ARMOR_WEIGHT: f64 = 0.1;

// --- Squads and spawning ---

/// Spawn lanes rotated through by wave number.
pub const SPAWN_LANES: [i32; 5] = [4, 2, 6, 3, 5];

/// Delay between consecutive squads of one wave becoming active.
pub const SQUAD_STAGGER_SECS: f64 = 2.0;

/// Random lateral spread of spawned members around the squad lane.
pub const SPAWN_LATERAL_JITTER: f64 = 0.2;

/// Rows behind the lead tank a siege support may trail at full speed.
pub const SIEGE_FOLLOW_DISTANCE: f64 = 1.5;

/// Speed fraction of a siege support outside the follow distance.
pub const SIEGE_SUPPORT_SPEED_FACTOR: f64 = 0.5;

/// Speed fraction of a buffed-assault support ahead of the frontline.
pub const ASSAULT_SUPPORT_SPEED_FACTOR: f64 = 0.6;

/// Delay before flankers mirror a squad-mate's evasion.
pub const FLANK_MIRROR_DELAY_SECS: f64 = 0.3;

/// Speed fraction of an assassin waiting for a buff.
pub const ASSASSIN_THROTTLE_FACTOR: f64 = 0.5;

/// Speed multiplier of a buffed assassin.
pub const ASSASSIN_SURGE_FACTOR: f64 = 1.5;

/// Radius in which a support buffs squad-mates.
pub const SUPPORT_AURA_RADIUS: f64 = 2.0;

/// Speed fraction of the trailing member of an overlapping pair.
pub const FORMATION_TRAILING_FACTOR: f64 = 0.7;

/// Delay between starting a wave and its announcement cue.
pub const WAVE_ANNOUNCE_DELAY_SECS: f64 = 1.0;

// --- Defender ---

pub const DEFAULT_STARTING_HEALTH: f64 = 20.0;
pub const DEFAULT_STARTING_GOLD: f64 = 150.0;

/// Fraction of the invested gold refunded on sale.
pub const SELL_REFUND_FRACTION: f64 = 0.5;
