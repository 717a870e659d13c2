//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz). One tick per display frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Convert a duration in milliseconds to whole ticks (rounded up).
pub const fn ms_to_ticks(ms: u64) -> u64 {
    (ms * TICK_RATE as u64).div_ceil(1000)
}

// --- Arena ---

/// Arena width in pixels.
pub const ARENA_WIDTH: f64 = 640.0;

/// Arena height in pixels.
pub const ARENA_HEIGHT: f64 = 640.0;

/// Tile edge length of the built-in map (pixels).
pub const DEFAULT_TILE_SIZE: f64 = 32.0;

// --- Players ---

/// Minimum number of player slots in a match.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of player slots in a match.
pub const MAX_PLAYERS: usize = 4;

/// Player count used when none is configured.
pub const DEFAULT_PLAYERS: usize = 2;

/// Player movement speed (px/s).
pub const PLAYER_SPEED: f64 = 150.0;

/// Player hitbox half extent (px).
pub const PLAYER_HALF_SIZE: f64 = 16.0;

/// Shots each player holds at round start.
pub const INITIAL_AMMO: u32 = 2;

/// Minimum time between two shots of the same player.
pub const FIRE_COOLDOWN_MS: u64 = 500;
pub const FIRE_COOLDOWN_TICKS: u64 = ms_to_ticks(FIRE_COOLDOWN_MS);

// --- Projectiles ---

/// Projectile speed (px/s).
pub const PROJECTILE_SPEED: f64 = 500.0;

/// Projectile hitbox half extent (px).
pub const PROJECTILE_HALF_SIZE: f64 = 4.0;

/// Projectiles that hit nothing are removed after this long.
pub const PROJECTILE_TTL_MS: u64 = 5_000;
pub const PROJECTILE_TTL_TICKS: u64 = ms_to_ticks(PROJECTILE_TTL_MS);

/// Projectiles further than this outside the arena are discarded (px).
pub const PROJECTILE_OOB_MARGIN: f64 = 64.0;

// --- Explosions ---

/// Lifetime of the explosion left behind by an elimination.
pub const EXPLOSION_TTL_MS: u64 = 200;
pub const EXPLOSION_TTL_TICKS: u64 = ms_to_ticks(EXPLOSION_TTL_MS);

// --- Ammo crates ---

/// Shots granted by one crate.
pub const AMMO_PICKUP_VALUE: u32 = 2;

/// Crate hitbox half extent (px).
pub const CRATE_HALF_SIZE: f64 = 14.0;

/// Interval between crate spawns, independent of pickups.
pub const AMMO_RESPAWN_MS: u64 = 10_000;
pub const AMMO_RESPAWN_TICKS: u64 = ms_to_ticks(AMMO_RESPAWN_MS);

/// Inclusive range for random crate coordinates (both axes).
pub const AMMO_SPAWN_MIN: f64 = 50.0;
pub const AMMO_SPAWN_MAX: f64 = 600.0;

// --- Rounds ---

/// Countdown steps shown between rounds.
pub const COUNTDOWN_STEPS: u32 = 3;

/// Duration of one countdown step.
pub const COUNTDOWN_STEP_MS: u64 = 1_000;
pub const COUNTDOWN_STEP_TICKS: u64 = ms_to_ticks(COUNTDOWN_STEP_MS);

// --- Time scale ---

/// Upper bound for `SetTimeScale`.
pub const MAX_TIME_SCALE: f64 = 4.0;
