//! Game constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Session ---

/// Countdown at the start of a run (seconds).
pub const START_TIME_SECS: f64 = 90.0;

/// Number of dream fragments in the maze.
pub const TOTAL_FRAGMENTS: u32 = 8;

// --- Difficulty ramp ---

/// Time remaining below which difficulty starts ramping (seconds).
pub const RAMP_THRESHOLD_SECS: f64 = 30.0;

/// Enemy speed multiplier gained over the full ramp.
pub const RAMP_SPEED_GAIN: f64 = 0.5;

/// Enemy aggressiveness multiplier gained over the full ramp.
pub const RAMP_AGGRESSION_GAIN: f64 = 0.3;

// --- Enemy AI ---

/// Base enemy movement speed (units/sec) before the difficulty multiplier.
pub const ENEMY_BASE_SPEED: f64 = 3.0;

/// Distance at which the enemy perceives the player (units).
pub const ENEMY_VIEW_DISTANCE: f64 = 8.0;

/// Distance at which the enemy can strike (units).
pub const ENEMY_ATTACK_RANGE: f64 = 1.5;

/// Multiple of attack range beyond which an attacked player has escaped.
pub const ENEMY_ATTACK_BREAK_FACTOR: f64 = 1.5;

/// Cooldown after a strike (seconds).
pub const ENEMY_ATTACK_COOLDOWN_SECS: f64 = 1.0;

/// Distance at which a movement target counts as reached (units).
pub const ENEMY_ARRIVE_DISTANCE: f64 = 0.5;

/// Duration of the capture flash effect (milliseconds).
pub const CAPTURE_FLASH_MS: u64 = 300;

// --- Maze geometry ---

/// Agents may not move to |x| or |z| at or beyond this value.
pub const MAZE_MOVE_BOUND: f64 = 24.0;

/// Outer walkable square half-extent (before the wall margin).
pub const MAZE_WALK_BOUND: f64 = 24.5;

/// Clearance kept between a walkable position and any wall face.
pub const WALL_MARGIN: f64 = 0.8;

/// Pickup radius for a dream fragment (units).
pub const FRAGMENT_PICKUP_DISTANCE: f64 = 1.5;

/// Radius of the exit portal trigger (units).
pub const PORTAL_REACH_DISTANCE: f64 = 3.0;

// --- Scoring ---

/// Base points for collecting one fragment.
pub const FRAGMENT_VALUE: i64 = 100;

/// Points per remaining second at the win.
pub const TIME_BONUS_MULTIPLIER: i64 = 10;

/// Points deducted when the enemy catches the player.
pub const CAUGHT_PENALTY: i64 = 50;

/// Points per extra combo step.
pub const COMBO_BONUS: i64 = 25;

/// Maximum speed-bonus points for an instant follow-up pickup.
pub const SPEED_BONUS: i64 = 10;

/// Awarded at the end of a run with zero captures.
pub const PERFECT_RUN_BONUS: i64 = 500;

/// Two score events within this window extend the combo (milliseconds).
pub const COMBO_WINDOW_MS: u64 = 3000;

/// Fragment pickups within this window of the previous one earn a
/// speed bonus (milliseconds).
pub const SPEED_BONUS_WINDOW_MS: u64 = 5000;
