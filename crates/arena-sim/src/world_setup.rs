//! Entity spawn factories for setting up the arena world.
//!
//! Creates players, projectiles, ammo crates and explosions with
//! the appropriate component bundles.

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::*;
use arena_core::constants::*;
use arena_core::enums::{Facing, PlayerSlot};
use arena_core::types::{Aabb, Position, Velocity};
use arena_map::ArenaMap;

/// Attempts at finding a crate position clear of walls and spawn points.
const CRATE_PLACEMENT_ATTEMPTS: usize = 16;

/// Spawn point numbers `1..=count` in random order.
pub fn shuffled_spawn_order(rng: &mut ChaCha8Rng, count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (1..=count).collect();
    order.shuffle(rng);
    order
}

/// Spawn one player per slot at a shuffled spawn point.
/// A slot whose spawn point is missing from the map sits the round out.
/// Returns the number of players placed.
pub fn spawn_players(
    world: &mut World,
    map: &ArenaMap,
    rng: &mut ChaCha8Rng,
    count: usize,
) -> u32 {
    let order = shuffled_spawn_order(rng, count);
    let mut spawned = 0;
    for (i, &spawn_index) in order.iter().enumerate() {
        let slot = PlayerSlot(i as u8);
        let Some(spawn) = map.find_spawn(spawn_index) else {
            tracing::warn!(%slot, spawn_index, "no spawn point, skipping player");
            continue;
        };
        spawn_player(world, slot, spawn.position());
        spawned += 1;
    }
    spawned
}

/// Spawn a single player with a full magazine.
pub fn spawn_player(world: &mut World, slot: PlayerSlot, position: Position) -> hecs::Entity {
    world.spawn((
        Player::new(slot),
        position,
        Velocity::default(),
        Hitbox::square(PLAYER_HALF_SIZE),
    ))
}

/// Spawn a projectile just ahead of the shooter, travelling the way it faces.
pub fn spawn_projectile(
    world: &mut World,
    owner: PlayerSlot,
    shooter: Position,
    facing: Facing,
    now: u64,
) -> hecs::Entity {
    let (ox, oy) = facing.muzzle_offset();
    let (ux, uy) = facing.unit();
    world.spawn((
        Projectile { owner, facing },
        shooter.offset(ox, oy),
        Velocity::new(ux * PROJECTILE_SPEED, uy * PROJECTILE_SPEED),
        Hitbox::square(PROJECTILE_HALF_SIZE),
        Lifetime {
            expires_at_tick: now + PROJECTILE_TTL_TICKS,
        },
    ))
}

pub fn spawn_crate(world: &mut World, position: Position) -> hecs::Entity {
    world.spawn((
        AmmoCrate {
            value: AMMO_PICKUP_VALUE,
        },
        position,
        Hitbox::square(CRATE_HALF_SIZE),
    ))
}

pub fn spawn_explosion(world: &mut World, position: Position, now: u64) -> hecs::Entity {
    world.spawn((
        Explosion,
        position,
        Lifetime {
            expires_at_tick: now + EXPLOSION_TTL_TICKS,
        },
    ))
}

/// Pick a random crate position inside the spawn range.
/// Positions on a wall or on top of a spawn point are re-rolled a few times;
/// if every attempt fails the last roll is used.
pub fn random_crate_position(rng: &mut ChaCha8Rng, map: &ArenaMap) -> Position {
    let (lo_x, hi_x) = spawn_range(map.width());
    let (lo_y, hi_y) = spawn_range(map.height());

    let mut position = Position::new(lo_x, lo_y);
    for _ in 0..CRATE_PLACEMENT_ATTEMPTS {
        position = Position::new(rng.gen_range(lo_x..=hi_x), rng.gen_range(lo_y..=hi_y));
        let crate_box = Aabb::new(position, CRATE_HALF_SIZE, CRATE_HALF_SIZE);
        let on_spawn = map.spawns().iter().any(|spawn| {
            Aabb::new(spawn.position(), PLAYER_HALF_SIZE, PLAYER_HALF_SIZE).overlaps(&crate_box)
        });
        if !on_spawn && !map.blocked(&crate_box) {
            break;
        }
    }
    position
}

/// Random coordinate range on one axis, shrunk for arenas smaller than the default.
fn spawn_range(extent: f64) -> (f64, f64) {
    let hi = AMMO_SPAWN_MAX.min(extent - CRATE_HALF_SIZE);
    if hi < AMMO_SPAWN_MIN {
        let mid = extent / 2.0;
        (mid, mid)
    } else {
        (AMMO_SPAWN_MIN, hi)
    }
}
