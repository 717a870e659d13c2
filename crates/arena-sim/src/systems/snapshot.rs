//! Snapshot system: queries the ECS world and builds a complete ArenaSnapshot.
//!
//! Read-only: never modifies the world.

use hecs::World;

use arena_core::components::*;
use arena_core::enums::GamePhase;
use arena_core::events::GameEvent;
use arena_core::state::*;
use arena_core::types::{Position, SimTime};
use arena_map::ArenaMap;

use crate::round::{RoundState, ScoreTable};

/// Build a complete ArenaSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    map: &ArenaMap,
    time: &SimTime,
    phase: GamePhase,
    round: &RoundState,
    scores: &ScoreTable,
    events: Vec<GameEvent>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: *time,
        phase,
        round: round.view(),
        arena: ArenaView {
            width: map.width(),
            height: map.height(),
            tile_size: map.tile_size,
        },
        players: build_players(world, time.tick),
        projectiles: build_projectiles(world),
        crates: build_crates(world),
        explosions: build_explosions(world),
        scoreboard: scores.entries(),
        events,
    }
}

fn build_players(world: &World, now: u64) -> Vec<PlayerView> {
    let mut players: Vec<PlayerView> = world
        .query::<(&Player, &Position)>()
        .iter()
        .map(|(_, (player, pos))| PlayerView {
            slot: player.slot,
            name: player.name.clone(),
            label: player.label(),
            position: *pos,
            facing: player.facing,
            rotation: player.facing.rotation(),
            alive: player.alive,
            remaining_shots: player.remaining_shots,
            can_shoot: player.alive && player.can_shoot(now),
            anim: player.anim,
        })
        .collect();
    players.sort_by_key(|p| p.slot);
    players
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            owner: projectile.owner,
            position: *pos,
            rotation: projectile.facing.projectile_rotation(),
        })
        .collect()
}

fn build_crates(world: &World) -> Vec<CrateView> {
    world
        .query::<(&AmmoCrate, &Position)>()
        .iter()
        .map(|(_, (_, pos))| CrateView { position: *pos })
        .collect()
}

fn build_explosions(world: &World) -> Vec<Position> {
    world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (_, pos))| *pos)
        .collect()
}
