//! Time-to-live system: despawns projectiles and explosions whose time is up.

use hecs::{Entity, World};

use arena_core::components::Lifetime;

pub fn run(world: &mut World, now: u64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, lifetime) in world.query_mut::<&Lifetime>() {
        if now >= lifetime.expires_at_tick {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
