//! Cleanup system: removes projectiles that have left the arena.

use hecs::{Entity, World};

use arena_core::components::Projectile;
use arena_core::constants::PROJECTILE_OOB_MARGIN;
use arena_core::types::Position;
use arena_map::ArenaMap;

/// Remove projectiles more than `PROJECTILE_OOB_MARGIN` outside the arena.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, map: &ArenaMap, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let (min, max_x, max_y) = (
        -PROJECTILE_OOB_MARGIN,
        map.width() + PROJECTILE_OOB_MARGIN,
        map.height() + PROJECTILE_OOB_MARGIN,
    );

    for (entity, (_projectile, pos)) in world.query_mut::<(&Projectile, &Position)>() {
        if pos.x < min || pos.y < min || pos.x > max_x || pos.y > max_y {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
