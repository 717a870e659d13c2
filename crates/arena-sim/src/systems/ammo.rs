//! Ammo crates: a repeating spawn timer and pickup on overlap.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use arena_core::components::{AmmoCrate, Hitbox, Player};
use arena_core::events::GameEvent;
use arena_core::types::{Aabb, Position};
use arena_map::ArenaMap;

use crate::timers::RepeatingTimer;
use crate::world_setup;

/// Drop a crate when the respawn timer fires. The timer runs on its own
/// schedule; picking crates up neither delays nor advances it.
pub fn spawn_due(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    map: &ArenaMap,
    timer: &mut RepeatingTimer,
    now: u64,
    events: &mut Vec<GameEvent>,
) {
    if timer.poll(now) {
        drop_crate(world, rng, map, events);
    }
}

/// Place one crate at a random position.
pub fn drop_crate(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    map: &ArenaMap,
    events: &mut Vec<GameEvent>,
) -> Entity {
    let position = world_setup::random_crate_position(rng, map);
    tracing::debug!(x = position.x, y = position.y, "ammo crate spawned");
    events.push(GameEvent::AmmoSpawned { position });
    world_setup::spawn_crate(world, position)
}

/// Hand each crate to the first living player touching it.
pub fn collect(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<GameEvent>) {
    despawn_buffer.clear();

    let mut players: Vec<(Entity, Aabb, u8)> = world
        .query::<(&Player, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (player, _, _))| player.alive)
        .map(|(entity, (player, pos, hitbox))| {
            (
                entity,
                Aabb::new(*pos, hitbox.half_width, hitbox.half_height),
                player.slot.0,
            )
        })
        .collect();
    players.sort_by_key(|(_, _, slot)| *slot);

    let mut pickups: Vec<(Entity, u32)> = Vec::new();
    for (crate_entity, (ammo, pos, hitbox)) in
        world.query::<(&AmmoCrate, &Position, &Hitbox)>().iter()
    {
        let crate_box = Aabb::new(*pos, hitbox.half_width, hitbox.half_height);
        if let Some((player, _, _)) = players.iter().find(|(_, aabb, _)| aabb.overlaps(&crate_box)) {
            pickups.push((*player, ammo.value));
            despawn_buffer.push(crate_entity);
        }
    }

    for (entity, value) in pickups {
        if let Ok(player) = world.query_one_mut::<&mut Player>(entity) {
            if !player.alive {
                continue;
            }
            player.remaining_shots += value;
            tracing::debug!(slot = %player.slot, remaining = player.remaining_shots, "ammo collected");
            events.push(GameEvent::AmmoCollected {
                slot: player.slot,
                remaining_shots: player.remaining_shots,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
