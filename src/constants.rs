/// Gameplay constants.  All distances are logical canvas units, all times
/// are frame ticks at `TARGET_FPS`.

// ── Canvas ────────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 1000.0;

pub const TARGET_FPS: u32 = 60;

// ── Ships ─────────────────────────────────────────────────────────────────────

/// Ticks between two shots of the same ship.
pub const COOLDOWN_TIME: u32 = 30;

pub const PLAYER_SPAWN: (f32, f32) = (500.0, 480.0);
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_SPEED: f32 = 7.0;
pub const MAX_SHIELD_CHARGES: u32 = 3;
/// Horizontal gap between parallel lasers of a multi-shot volley.
pub const LASER_SPREAD: f32 = 20.0;

pub const ENEMY_HEALTH: i32 = 100;
/// Enemy lasers leave from `x + width/2 - ENEMY_LASER_OFFSET`.
pub const ENEMY_LASER_OFFSET: f32 = 20.0;

// ── Velocities ────────────────────────────────────────────────────────────────

pub const PLAYER_LASER_VELOCITY: f32 = -6.0;
pub const POWER_UP_VELOCITY: f32 = 3.0;
pub const POWER_UP_SIZE: u32 = 20;

// ── Damage & score ────────────────────────────────────────────────────────────

pub const LASER_DAMAGE: i32 = 10;
pub const RAM_DAMAGE: i32 = 25;
pub const PASS_THROUGH_DAMAGE: i32 = 20;

pub const KILL_SCORE: i64 = 10;
pub const RAM_PENALTY: i64 = -15;
pub const PASS_THROUGH_PENALTY: i64 = -20;

pub const HEALTH_PICKUP: i32 = 30;

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn window, half-open like `gen_range`.
pub const SPAWN_X_MIN: f32 = 50.0;
pub const SPAWN_X_MARGIN: f32 = 100.0;
pub const SPAWN_Y_RANGE: (i32, i32) = (-150, -50);

/// One power-up roughly every this many ticks.
pub const POWER_UP_CHANCE: u32 = 180;

pub const HIGH_SCORE_SLOTS: usize = 5;
