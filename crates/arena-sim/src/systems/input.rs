//! Input system: turns each living player's key state into velocity,
//! facing and shots.

use hecs::World;

use arena_core::components::Player;
use arena_core::constants::{FIRE_COOLDOWN_TICKS, PLAYER_SPEED};
use arena_core::enums::{AnimState, Facing, PlayerSlot};
use arena_core::events::GameEvent;
use arena_core::types::{Position, Velocity};

use crate::keyboard::Keyboard;
use crate::world_setup;

/// Apply one tick of input to every living player.
pub fn run(world: &mut World, keyboard: &Keyboard, now: u64, events: &mut Vec<GameEvent>) {
    let mut shots: Vec<(PlayerSlot, Position, Facing)> = Vec::new();

    for (_entity, (player, pos, vel)) in
        world.query_mut::<(&mut Player, &Position, &mut Velocity)>()
    {
        if !player.alive {
            continue;
        }

        let input = keyboard.input_for(player.slot);
        match input.direction() {
            Some(facing) => {
                let (ux, uy) = facing.unit();
                *vel = Velocity::new(ux * PLAYER_SPEED, uy * PLAYER_SPEED);
                player.facing = facing;
                player.anim = AnimState::Moving;
            }
            None => {
                *vel = Velocity::default();
                player.anim = AnimState::Idle;
            }
        }

        if input.fire && try_fire(player, now) {
            player.anim = AnimState::Shooting;
            shots.push((player.slot, *pos, player.facing));
        }
    }

    for (slot, pos, facing) in shots {
        world_setup::spawn_projectile(world, slot, pos, facing, now);
        tracing::debug!(%slot, ?facing, "shot fired");
        events.push(GameEvent::ShotFired { slot, facing });
    }
}

/// Spend one shot if the player is allowed to fire at `now`.
/// Refused for eliminated players, an empty magazine, or an active cooldown.
pub fn try_fire(player: &mut Player, now: u64) -> bool {
    if !player.alive || player.remaining_shots == 0 || !player.can_shoot(now) {
        return false;
    }
    player.remaining_shots -= 1;
    player.cooldown_until_tick = now + FIRE_COOLDOWN_TICKS;
    true
}
