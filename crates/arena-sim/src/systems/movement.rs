//! Kinematic integration system.
//!
//! Players move through the tile map and stop at walls and the arena edge.
//! Projectiles ignore walls and fly straight.

use hecs::World;

use arena_core::components::{Hitbox, Player, Projectile};
use arena_core::constants::DT;
use arena_core::types::{Aabb, Position, Velocity};
use arena_map::ArenaMap;

pub fn run(world: &mut World, map: &ArenaMap) {
    for (_entity, (player, pos, vel, hitbox)) in
        world.query_mut::<(&Player, &mut Position, &Velocity, &Hitbox)>()
    {
        if !player.alive || vel.is_zero() {
            continue;
        }
        let aabb = Aabb::new(*pos, hitbox.half_width, hitbox.half_height);
        *pos = map.resolve_move(aabb, vel.as_vec2() * DT).into();
    }

    for (_entity, (_projectile, pos, vel)) in
        world.query_mut::<(&Projectile, &mut Position, &Velocity)>()
    {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
    }
}

/// Stop every player in place.
pub fn halt_players(world: &mut World) {
    for (_entity, (_player, vel)) in world.query_mut::<(&Player, &mut Velocity)>() {
        *vel = Velocity::default();
    }
}
