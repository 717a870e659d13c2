//! Hit resolution: projectiles that overlap a living opponent eliminate them.

use hecs::{Entity, World};

use arena_core::components::{Hitbox, Player, Projectile};
use arena_core::enums::{AnimState, PlayerSlot};
use arena_core::events::GameEvent;
use arena_core::types::{Aabb, Position, Velocity};

use crate::world_setup;

/// Resolve projectile hits for this tick. Returns the number of eliminations.
///
/// A projectile never hits its owner, and a player already eliminated this
/// tick cannot absorb a second projectile; that projectile keeps flying.
pub fn run(
    world: &mut World,
    now: u64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) -> usize {
    despawn_buffer.clear();

    let mut targets: Vec<(Entity, PlayerSlot, Aabb)> = world
        .query::<(&Player, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (player, _, _))| player.alive)
        .map(|(entity, (player, pos, hitbox))| {
            (
                entity,
                player.slot,
                Aabb::new(*pos, hitbox.half_width, hitbox.half_height),
            )
        })
        .collect();
    targets.sort_by_key(|(_, slot, _)| *slot);

    // (victim entity, victim slot, shooter slot)
    let mut hits: Vec<(Entity, PlayerSlot, PlayerSlot)> = Vec::new();
    {
        let mut query = world.query::<(&Projectile, &Position, &Hitbox)>();
        for (entity, (projectile, pos, hitbox)) in query.iter() {
            let shot = Aabb::new(*pos, hitbox.half_width, hitbox.half_height);
            let victim = targets.iter().find(|(victim, slot, aabb)| {
                *slot != projectile.owner
                    && !hits.iter().any(|(hit, _, _)| hit == victim)
                    && aabb.overlaps(&shot)
            });
            if let Some(&(victim, slot, _)) = victim {
                hits.push((victim, slot, projectile.owner));
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for &(victim, slot, by) in &hits {
        let position = match eliminate(world, victim) {
            Some(position) => position,
            None => continue,
        };
        world_setup::spawn_explosion(world, position, now);
        tracing::info!(%slot, %by, x = position.x, y = position.y, "player eliminated");
        events.push(GameEvent::PlayerEliminated { slot, by, position });
    }

    hits.len()
}

/// Mark a player as out of the round. Returns where they fell,
/// or `None` if the entity is gone or was already eliminated.
pub fn eliminate(world: &mut World, entity: Entity) -> Option<Position> {
    let (player, pos, vel) = world
        .query_one_mut::<(&mut Player, &Position, &mut Velocity)>(entity)
        .ok()?;
    if !player.alive {
        return None;
    }
    player.alive = false;
    player.anim = AnimState::Idle;
    *vel = Velocity::default();
    Some(*pos)
}
