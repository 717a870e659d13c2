//! Tests for the arena engine, combat rules, ammo economy and round flow.

use hecs::World;

use arena_core::commands::PlayerCommand;
use arena_core::components::Player;
use arena_core::constants::*;
use arena_core::controls::InputState;
use arena_core::enums::*;
use arena_core::events::GameEvent;
use arena_core::state::ArenaSnapshot;
use arena_core::types::Position;

use crate::engine::{ArenaEngine, SimConfig};
use crate::round::{RoundState, ScoreTable};
use crate::systems::lifetime;
use crate::timers::RepeatingTimer;
use crate::world_setup;

const GREEN: PlayerSlot = PlayerSlot(0);
const RED: PlayerSlot = PlayerSlot(1);
const YELLOW: PlayerSlot = PlayerSlot(2);

fn engine_with(seed: u64, player_count: usize) -> ArenaEngine {
    ArenaEngine::new(SimConfig {
        seed,
        player_count,
        ..Default::default()
    })
}

/// Start a match and clear the opening crate so tests control the ammo supply.
fn started(player_count: usize) -> ArenaEngine {
    let mut engine = engine_with(7, player_count);
    engine.queue_command(PlayerCommand::StartMatch);
    engine.tick();
    engine.clear_crates();
    engine
}

fn position_of(engine: &ArenaEngine, slot: PlayerSlot) -> Position {
    engine
        .world()
        .query::<(&Player, &Position)>()
        .iter()
        .find(|(_, (player, _))| player.slot == slot)
        .map(|(_, (_, pos))| *pos)
        .expect("player on the field")
}

/// Drop a projectile owned by `owner` right on top of `victim`.
fn shoot_at(engine: &mut ArenaEngine, owner: PlayerSlot, victim: PlayerSlot) {
    let target = position_of(engine, victim);
    let (ox, oy) = Facing::Down.muzzle_offset();
    engine.spawn_test_projectile(owner, target.offset(-ox, -oy), Facing::Down);
}

fn hold(slot: PlayerSlot, input: InputState) -> PlayerCommand {
    PlayerCommand::SetInput { slot, input }
}

fn has_event(snap: &ArenaSnapshot, pred: impl Fn(&GameEvent) -> bool) -> bool {
    snap.events.iter().any(pred)
}

/// Tick until a snapshot satisfies `pred`, returning it.
fn tick_until(
    engine: &mut ArenaEngine,
    max_ticks: usize,
    pred: impl Fn(&ArenaSnapshot) -> bool,
) -> ArenaSnapshot {
    for _ in 0..max_ticks {
        let snap = engine.tick();
        if pred(&snap) {
            return snap;
        }
    }
    panic!("condition not reached within {max_ticks} ticks");
}

/// Two-player match where Green stands at (100, 200) facing Red at (400, 200).
fn duel() -> ArenaEngine {
    let mut engine = started(2);
    engine.place_player(GREEN, Position::new(100.0, 200.0), Facing::Right);
    engine.place_player(RED, Position::new(400.0, 200.0), Facing::Left);
    engine
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with(12345, 4);
    let mut engine_b = engine_with(12345, 4);

    let script = |tick: usize| -> Vec<PlayerCommand> {
        match tick {
            0 => vec![PlayerCommand::StartMatch],
            5 => vec![PlayerCommand::KeyDown {
                key: KeyCode::ArrowRight,
            }],
            40 => vec![
                PlayerCommand::KeyDown { key: KeyCode::Shift },
                PlayerCommand::KeyDown { key: KeyCode::S },
            ],
            90 => vec![PlayerCommand::KeyUp {
                key: KeyCode::ArrowRight,
            }],
            _ => Vec::new(),
        }
    };

    for tick in 0..900 {
        engine_a.queue_commands(script(tick));
        engine_b.queue_commands(script(tick));
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine_with(111, 2);
    let mut engine_b = engine_with(222, 2);
    engine_a.queue_command(PlayerCommand::StartMatch);
    engine_b.queue_command(PlayerCommand::StartMatch);

    let snap_a = engine_a.tick();
    let snap_b = engine_b.tick();
    assert_eq!(snap_a.crates.len(), 1);
    assert_eq!(snap_b.crates.len(), 1);
    assert_ne!(
        snap_a.crates[0].position, snap_b.crates[0].position,
        "Different seeds should place the opening crate differently"
    );
}

// ---- Match setup ----

#[test]
fn test_lobby_does_not_tick() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Lobby);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.players.is_empty());
    assert_eq!(snap.arena.width, ARENA_WIDTH);
    assert_eq!(snap.arena.height, ARENA_HEIGHT);
}

#[test]
fn test_start_match_spawns_fresh_round() {
    let mut engine = engine_with(99, 2);
    engine.queue_command(PlayerCommand::StartMatch);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.round.number, 1);
    assert_eq!(snap.round.phase, RoundPhase::Playing);
    assert_eq!(snap.players.len(), 2);
    assert_eq!(snap.crates.len(), 1, "first crate drops immediately");
    for player in &snap.players {
        assert!(player.alive);
        assert_eq!(player.remaining_shots, INITIAL_AMMO);
        assert!(player.can_shoot);
        assert_eq!(player.label, format!("{}: 2", player.name));
    }
    assert!(has_event(&snap, |e| matches!(
        e,
        GameEvent::RoundStarted {
            round: 1,
            players: 2
        }
    )));
    assert!(has_event(&snap, |e| matches!(e, GameEvent::AmmoSpawned { .. })));

    // Both players stand on distinct spawn points from the map.
    let spawns: Vec<Position> = engine
        .map()
        .spawns()
        .iter()
        .take(2)
        .map(|s| s.position())
        .collect();
    assert_ne!(snap.players[0].position, snap.players[1].position);
    for player in &snap.players {
        assert!(spawns.contains(&player.position), "{:?}", player.position);
    }
}

#[test]
fn test_player_count_is_clamped() {
    assert_eq!(engine_with(1, 9).player_count(), MAX_PLAYERS);
    assert_eq!(engine_with(1, 1).player_count(), MIN_PLAYERS);

    let engine = started(4);
    let mut positions: Vec<(i64, i64)> = PlayerSlot::all()
        .map(|slot| {
            let p = position_of(&engine, slot);
            (p.x as i64, p.y as i64)
        })
        .collect();
    positions.sort();
    positions.dedup();
    assert_eq!(positions.len(), 4, "every player gets its own spawn");
}

#[test]
fn test_missing_spawn_point_skips_player() {
    let map = arena_map::ArenaMap::from_json(
        r#"{
            "tile_size": 32,
            "rows": ["....", "....", "....", "...."],
            "spawns": [{ "name": "spawn1", "x": 16, "y": 16 }]
        }"#,
    )
    .unwrap();
    let mut engine = ArenaEngine::new(SimConfig {
        map,
        player_count: 2,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartMatch);
    let snap = engine.tick();
    assert_eq!(snap.players.len(), 1);
    assert!(has_event(&snap, |e| matches!(
        e,
        GameEvent::RoundStarted { players: 1, .. }
    )));
}

// ---- Movement ----

#[test]
fn test_movement_and_facing() {
    let mut engine = duel();
    engine.queue_command(PlayerCommand::KeyDown {
        key: KeyCode::ArrowRight,
    });
    let mut snap = engine.tick();
    for _ in 1..60 {
        snap = engine.tick();
    }
    let green = &snap.players[0];
    assert!((green.position.x - 250.0).abs() < 1e-6, "x = {}", green.position.x);
    assert_eq!(green.position.y, 200.0);
    assert_eq!(green.facing, Facing::Right);
    assert_eq!(green.anim, AnimState::Moving);
    assert_eq!(green.rotation, Facing::Right.rotation());

    engine.queue_command(PlayerCommand::KeyUp {
        key: KeyCode::ArrowRight,
    });
    let snap = engine.tick();
    let green = &snap.players[0];
    assert!((green.position.x - 250.0).abs() < 1e-6);
    assert_eq!(green.anim, AnimState::Idle);
    assert_eq!(green.facing, Facing::Right, "facing sticks after release");
}

#[test]
fn test_no_diagonal_movement() {
    let mut engine = duel();
    engine.queue_commands([
        PlayerCommand::KeyDown {
            key: KeyCode::ArrowLeft,
        },
        PlayerCommand::KeyDown {
            key: KeyCode::ArrowUp,
        },
    ]);
    let mut snap = engine.tick();
    for _ in 1..10 {
        snap = engine.tick();
    }
    let green = &snap.players[0];
    assert!(green.position.x < 100.0);
    assert_eq!(green.position.y, 200.0, "left wins over up");
    assert_eq!(green.facing, Facing::Left);
}

#[test]
fn test_each_slot_uses_its_own_keys() {
    let mut engine = duel();
    engine.queue_command(PlayerCommand::KeyDown { key: KeyCode::S });
    let mut snap = engine.tick();
    for _ in 1..20 {
        snap = engine.tick();
    }
    assert_eq!(snap.players[0].position, Position::new(100.0, 200.0));
    assert!(snap.players[1].position.y > 200.0);
    assert_eq!(snap.players[1].facing, Facing::Down);
}

#[test]
fn test_injected_input_combines_with_held_keys() {
    let mut engine = duel();
    engine.place_player(GREEN, Position::new(100.0, 200.0), Facing::Up);
    engine.queue_commands([
        PlayerCommand::KeyDown {
            key: KeyCode::ArrowRight,
        },
        hold(GREEN, InputState::default().with_fire()),
    ]);
    let snap = engine.tick();
    let green = &snap.players[0];
    assert!(green.position.x > 100.0, "held key still moves");
    assert_eq!(green.facing, Facing::Right);
    assert_eq!(green.remaining_shots, INITIAL_AMMO - 1, "injected fire still shoots");
}

#[test]
fn test_map_smaller_than_player_does_not_crash() {
    // Constructed directly so the loader's size check does not apply.
    let map = arena_map::ArenaMap::new(
        8.0,
        4,
        2,
        vec![false; 8],
        vec![
            arena_map::SpawnPoint::new("spawn1", 4.0, 4.0),
            arena_map::SpawnPoint::new("spawn2", 28.0, 12.0),
        ],
    );
    let mut engine = ArenaEngine::new(SimConfig {
        map,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartMatch);
    engine.tick();
    engine.queue_commands([
        hold(GREEN, InputState::moving(Facing::Down)),
        hold(RED, InputState::moving(Facing::Down)),
    ]);
    for _ in 0..5 {
        engine.tick();
    }
    engine.queue_commands([
        hold(GREEN, InputState::moving(Facing::Left)),
        hold(RED, InputState::moving(Facing::Left)),
    ]);
    let mut snap = engine.tick();
    for _ in 0..5 {
        snap = engine.tick();
    }
    assert_eq!(snap.players.len(), 2);
    for player in &snap.players {
        assert_eq!(player.position.y, 8.0, "pinned to the middle of the short axis");
        assert_eq!(player.position.x, 16.0);
    }
}

#[test]
fn test_walls_and_bounds_block_players() {
    let mut engine = duel();
    // Row 9 holds a wall from x = 256.
    engine.place_player(GREEN, Position::new(100.0, 300.0), Facing::Right);
    engine.queue_command(hold(GREEN, InputState::moving(Facing::Right)));
    for _ in 0..120 {
        engine.tick();
    }
    assert_eq!(position_of(&engine, GREEN), Position::new(240.0, 300.0));

    engine.queue_command(hold(GREEN, InputState::moving(Facing::Up)));
    for _ in 0..200 {
        engine.tick();
    }
    let pos = position_of(&engine, GREEN);
    assert_eq!(pos.y, PLAYER_HALF_SIZE, "stopped at the top edge");
}

// ---- Firing ----

#[test]
fn test_cannot_fire_without_ammo() {
    let mut engine = duel();
    engine.set_ammo(GREEN, 0);
    engine.queue_command(hold(GREEN, InputState::default().with_fire()));
    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
    assert!(!has_event(&snap, |e| matches!(e, GameEvent::ShotFired { .. })));
    assert_eq!(snap.players[0].remaining_shots, 0);
}

#[test]
fn test_fire_spends_one_shot_and_starts_cooldown() {
    let mut engine = duel();
    engine.place_player(GREEN, Position::new(100.0, 200.0), Facing::Up);
    engine.set_ammo(GREEN, 5);
    engine.queue_command(hold(GREEN, InputState::default().with_fire()));

    let snap = engine.tick();
    assert_eq!(snap.players[0].remaining_shots, 4);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].owner, GREEN);
    assert_eq!(snap.players[0].anim, AnimState::Shooting);
    assert!(!snap.players[0].can_shoot);
    assert!(has_event(&snap, |e| *e
        == GameEvent::ShotFired {
            slot: GREEN,
            facing: Facing::Up
        }));

    // Fire held the whole time: nothing more for 500 ms.
    for _ in 1..FIRE_COOLDOWN_TICKS {
        let snap = engine.tick();
        assert_eq!(snap.players[0].remaining_shots, 4);
    }
    let snap = engine.tick();
    assert_eq!(snap.players[0].remaining_shots, 3);
}

#[test]
fn test_projectile_spawns_ahead_and_travels() {
    let mut engine = duel();
    engine.place_player(GREEN, Position::new(100.0, 200.0), Facing::Up);
    engine.queue_command(hold(GREEN, InputState::default().with_fire()));
    let snap = engine.tick();
    let shot = &snap.projectiles[0];
    // Spawned at (105, 180) then moved one tick upwards.
    assert_eq!(shot.position.x, 105.0);
    assert!((shot.position.y - (180.0 - PROJECTILE_SPEED * DT)).abs() < 1e-9);
    assert_eq!(shot.rotation, Facing::Up.projectile_rotation());
}

#[test]
fn test_projectiles_leaving_the_arena_are_removed() {
    let mut engine = duel();
    engine.place_player(GREEN, Position::new(100.0, 200.0), Facing::Up);
    engine.queue_command(hold(GREEN, InputState::default().with_fire()));
    engine.tick();
    engine.queue_command(hold(GREEN, InputState::default()));
    // 180 px to the edge plus the margin takes well under a second.
    for _ in 0..60 {
        engine.tick();
    }
    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
}

#[test]
fn test_projectile_lifetime_five_seconds() {
    let mut world = World::new();
    world_setup::spawn_projectile(&mut world, GREEN, Position::new(0.0, 0.0), Facing::Down, 0);
    let mut buffer = Vec::new();

    lifetime::run(&mut world, PROJECTILE_TTL_TICKS - 1, &mut buffer);
    assert_eq!(world.len(), 1);
    lifetime::run(&mut world, PROJECTILE_TTL_TICKS, &mut buffer);
    assert_eq!(world.len(), 0);
}

// ---- Hits ----

#[test]
fn test_projectile_never_hits_owner() {
    let mut engine = duel();
    shoot_at(&mut engine, GREEN, GREEN);
    for _ in 0..5 {
        let snap = engine.tick();
        assert!(snap.players.iter().all(|p| p.alive));
        assert!(!has_event(&snap, |e| matches!(e, GameEvent::PlayerEliminated { .. })));
    }
}

#[test]
fn test_hit_eliminates_and_ends_round() {
    let mut engine = duel();
    engine.queue_command(hold(GREEN, InputState::default().with_fire()));
    engine.tick();
    engine.queue_command(hold(GREEN, InputState::default()));

    let snap = tick_until(&mut engine, 60, |s| {
        has_event(s, |e| matches!(e, GameEvent::PlayerEliminated { .. }))
    });

    assert!(has_event(&snap, |e| matches!(
        e,
        GameEvent::PlayerEliminated { slot, by, .. } if *slot == RED && *by == GREEN
    )));
    assert!(snap.players[0].alive);
    assert!(!snap.players[1].alive);
    assert!(snap.projectiles.is_empty(), "the projectile is consumed");
    assert_eq!(snap.explosions.len(), 1);

    assert!(has_event(&snap, |e| *e
        == GameEvent::RoundEnded {
            round: 1,
            winner: Some(GREEN)
        }));
    assert_eq!(snap.round.phase, RoundPhase::Countdown);
    assert_eq!(snap.round.countdown, COUNTDOWN_STEPS);
    assert_eq!(engine.scores().get(GREEN), 1);
    assert_eq!(engine.scores().get(RED), 0);
    assert_eq!(snap.scoreboard[0].score, 1);
}

#[test]
fn test_simultaneous_elimination_scores_nobody() {
    let mut engine = duel();
    shoot_at(&mut engine, RED, GREEN);
    shoot_at(&mut engine, GREEN, RED);
    let snap = engine.tick();

    assert!(snap.players.iter().all(|p| !p.alive));
    assert!(has_event(&snap, |e| *e
        == GameEvent::RoundEnded {
            round: 1,
            winner: None
        }));
    assert!(snap.scoreboard.iter().all(|entry| entry.score == 0));
    assert_eq!(snap.round.phase, RoundPhase::Countdown);
}

#[test]
fn test_round_continues_while_two_remain() {
    let mut engine = started(3);
    engine.place_player(GREEN, Position::new(100.0, 200.0), Facing::Down);
    engine.place_player(RED, Position::new(500.0, 200.0), Facing::Down);
    engine.place_player(YELLOW, Position::new(300.0, 450.0), Facing::Down);

    shoot_at(&mut engine, GREEN, YELLOW);
    let snap = engine.tick();
    assert!(!snap.players[2].alive);
    assert!(engine.player(YELLOW).is_some_and(|p| !p.alive));
    assert!(engine.player(PlayerSlot(3)).is_none(), "only three slots in play");
    assert_eq!(snap.round.phase, RoundPhase::Playing);
    assert!(!has_event(&snap, |e| matches!(e, GameEvent::RoundEnded { .. })));

    // Eliminated players ignore input and pickups.
    engine.spawn_test_crate(Position::new(300.0, 450.0));
    engine.queue_command(hold(YELLOW, InputState::moving(Facing::Up).with_fire()));
    let snap = engine.tick();
    assert_eq!(snap.crates.len(), 1);
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.players[2].position, Position::new(300.0, 450.0));
    assert!(!has_event(&snap, |e| matches!(e, GameEvent::AmmoCollected { .. })));

    // The eliminated player is already down; a second shot at them is ignored.
    shoot_at(&mut engine, RED, YELLOW);
    let snap = engine.tick();
    assert!(!has_event(&snap, |e| matches!(e, GameEvent::PlayerEliminated { .. })));
    assert_eq!(snap.projectiles.len(), 1, "the shot flies on");
}

// ---- Explosions ----

#[test]
fn test_explosion_lasts_200ms() {
    let mut engine = duel();
    shoot_at(&mut engine, GREEN, RED);
    let snap = engine.tick();
    assert_eq!(snap.explosions.len(), 1);
    assert_eq!(snap.explosions[0], Position::new(400.0, 200.0));

    for _ in 1..EXPLOSION_TTL_TICKS {
        let snap = engine.tick();
        assert_eq!(snap.explosions.len(), 1);
    }
    let snap = engine.tick();
    assert!(snap.explosions.is_empty());
}

// ---- Ammo ----

#[test]
fn test_pickup_grants_exactly_two() {
    let mut engine = duel();
    engine.set_ammo(GREEN, 0);
    engine.spawn_test_crate(Position::new(100.0, 200.0));
    let snap = engine.tick();
    assert_eq!(snap.players[0].remaining_shots, AMMO_PICKUP_VALUE);
    assert!(snap.crates.is_empty());
    assert!(has_event(&snap, |e| *e
        == GameEvent::AmmoCollected {
            slot: GREEN,
            remaining_shots: 2
        }));

    engine.set_ammo(GREEN, 7);
    engine.spawn_test_crate(Position::new(110.0, 205.0));
    let snap = engine.tick();
    assert_eq!(snap.players[0].remaining_shots, 9);
}

#[test]
fn test_ammo_respawns_every_ten_seconds() {
    let mut engine = started(2);
    let mut spawned = 0;
    while engine.time().tick <= 2 * AMMO_RESPAWN_TICKS {
        let snap = engine.tick();
        spawned += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::AmmoSpawned { .. }))
            .count();
    }
    assert_eq!(spawned, 2);
    assert_eq!(engine.tick().crates.len(), 2);
}

#[test]
fn test_crates_spawn_inside_range() {
    let mut engine = started(2);
    for _ in 0..(5 * AMMO_RESPAWN_TICKS) {
        engine.tick();
    }
    let snap = engine.tick();
    assert!(snap.crates.len() >= 5);
    for c in &snap.crates {
        assert!((AMMO_SPAWN_MIN..=AMMO_SPAWN_MAX).contains(&c.position.x));
        assert!((AMMO_SPAWN_MIN..=AMMO_SPAWN_MAX).contains(&c.position.y));
    }
}

// ---- Round flow ----

#[test]
fn test_countdown_then_full_reset() {
    let mut engine = duel();
    engine.set_ammo(GREEN, 1);
    engine.queue_command(hold(GREEN, InputState::default().with_fire()));
    let ended = tick_until(&mut engine, 60, |s| {
        has_event(s, |e| matches!(e, GameEvent::RoundEnded { .. }))
    });

    assert_eq!(ended.round.countdown, COUNTDOWN_STEPS);
    let restarted = tick_until(&mut engine, 400, |s| {
        has_event(s, |e| matches!(e, GameEvent::RoundStarted { .. }))
    });
    assert!(has_event(&restarted, |e| *e
        == GameEvent::CountdownTick { remaining: 0 }));
    assert_eq!(
        restarted.time.tick - ended.time.tick,
        COUNTDOWN_STEPS as u64 * COUNTDOWN_STEP_TICKS
    );

    assert_eq!(restarted.round.number, 2);
    assert_eq!(restarted.round.phase, RoundPhase::Playing);
    assert_eq!(restarted.players.len(), 2);
    for player in &restarted.players {
        assert!(player.alive);
        assert_eq!(player.remaining_shots, INITIAL_AMMO);
    }
    assert!(restarted.projectiles.is_empty());
    assert!(restarted.explosions.is_empty());
    assert_eq!(restarted.crates.len(), 1);
    assert_eq!(restarted.scoreboard[0].score, 1, "scores survive the restart");
}

#[test]
fn test_countdown_steps_are_one_second_apart() {
    let mut engine = duel();
    shoot_at(&mut engine, GREEN, RED);
    let ended = engine.tick();
    assert_eq!(ended.round.countdown, 3);

    let mut steps = Vec::new();
    for _ in 0..(3 * COUNTDOWN_STEP_TICKS) {
        let snap = engine.tick();
        for event in &snap.events {
            if let GameEvent::CountdownTick { remaining } = event {
                steps.push((snap.time.tick - ended.time.tick, *remaining));
            }
        }
    }
    assert_eq!(steps, vec![(60, 2), (120, 1), (180, 0)]);
}

#[test]
fn test_restart_clears_projectiles_in_flight() {
    let mut engine = started(3);
    engine.place_player(GREEN, Position::new(100.0, 200.0), Facing::Up);
    engine.place_player(RED, Position::new(500.0, 200.0), Facing::Down);
    engine.place_player(YELLOW, Position::new(300.0, 450.0), Facing::Down);

    // Green fires away from everyone while both opponents go down.
    engine.queue_command(hold(GREEN, InputState::default().with_fire()));
    shoot_at(&mut engine, GREEN, RED);
    shoot_at(&mut engine, GREEN, YELLOW);
    let ended = engine.tick();
    engine.queue_command(hold(GREEN, InputState::default()));

    assert_eq!(ended.round.phase, RoundPhase::Countdown);
    assert_eq!(ended.projectiles.len(), 1);
    assert_eq!(ended.projectiles[0].owner, GREEN);
    assert_eq!(ended.players[0].remaining_shots, INITIAL_AMMO - 1);

    // Keep the shot inside the arena for the whole countdown.
    engine.stall_projectiles();
    let mut last_countdown = ended;
    let restarted = loop {
        let snap = engine.tick();
        if has_event(&snap, |e| matches!(e, GameEvent::RoundStarted { .. })) {
            break snap;
        }
        assert!(snap.time.tick < 1000, "round never restarted");
        last_countdown = snap;
    };

    assert_eq!(last_countdown.round.phase, RoundPhase::Countdown);
    assert_eq!(last_countdown.projectiles.len(), 1, "still flying during the countdown");
    assert!(restarted.projectiles.is_empty());
    assert_eq!(restarted.players.len(), 3);
    for player in &restarted.players {
        assert!(player.alive);
        assert_eq!(player.remaining_shots, INITIAL_AMMO);
    }
}

#[test]
fn test_survivor_is_frozen_during_countdown() {
    let mut engine = duel();
    shoot_at(&mut engine, GREEN, RED);
    engine.tick();

    engine.queue_command(hold(GREEN, InputState::moving(Facing::Down).with_fire()));
    for _ in 0..30 {
        let snap = engine.tick();
        assert!(!has_event(&snap, |e| matches!(e, GameEvent::ShotFired { .. })));
        assert_eq!(snap.players[0].position, Position::new(100.0, 200.0));
        assert_eq!(snap.players[0].remaining_shots, INITIAL_AMMO);
    }
}

#[test]
fn test_scores_accumulate_across_rounds() {
    let mut engine = started(2);
    for round in 1..=2u32 {
        shoot_at(&mut engine, GREEN, RED);
        engine.tick();
        assert_eq!(engine.scores().get(GREEN), round);
        tick_until(&mut engine, 400, |s| {
            has_event(s, |e| matches!(e, GameEvent::RoundStarted { .. }))
        });
        engine.clear_crates();
    }
    assert_eq!(engine.round().number, 3);
    assert_eq!(engine.scores().get(RED), 0);
}

// ---- Match control ----

#[test]
fn test_pause_resume() {
    let mut engine = started(2);
    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    let paused_tick = snap.time.tick;

    let snap = engine.tick();
    assert_eq!(snap.time.tick, paused_tick);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.time.tick > paused_tick);
}

#[test]
fn test_return_to_lobby_clears_session() {
    let mut engine = duel();
    shoot_at(&mut engine, GREEN, RED);
    engine.tick();
    assert_eq!(engine.scores().get(GREEN), 1);

    engine.queue_command(PlayerCommand::ReturnToLobby);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Lobby);
    assert!(snap.players.is_empty());
    assert!(snap.scoreboard.iter().all(|e| e.score == 0));

    engine.queue_command(PlayerCommand::StartMatch);
    let snap = engine.tick();
    assert_eq!(snap.round.number, 1);
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_time_scale_is_clamped() {
    let mut engine = started(2);
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 10.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), MAX_TIME_SCALE);
    engine.queue_command(PlayerCommand::SetTimeScale { scale: -1.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 0.0);
}

#[test]
fn test_input_for_unknown_slot_is_ignored() {
    let mut engine = started(2);
    engine.queue_command(hold(PlayerSlot(9), InputState::default().with_fire()));
    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
}

// ---- Building blocks ----

#[test]
fn test_repeating_timer() {
    let mut timer = RepeatingTimer::new(10);
    assert!(!timer.poll(100), "disarmed timers never fire");
    timer.arm(100);
    assert!(!timer.poll(109));
    assert!(timer.poll(110));
    assert!(!timer.poll(110));
    assert!(timer.poll(120));
    timer.disarm();
    assert!(!timer.poll(1000));
}

#[test]
fn test_round_state_countdown() {
    let mut round = RoundState::default();
    round.begin_next();
    assert_eq!(round.number, 1);
    assert_eq!(round.step_countdown(1000), None, "no countdown while playing");

    round.begin_countdown(0);
    assert_eq!(round.step_countdown(59), None);
    assert_eq!(round.step_countdown(60), Some(2));
    assert_eq!(round.step_countdown(120), Some(1));
    assert_eq!(round.step_countdown(180), Some(0));
}

#[test]
fn test_score_table() {
    let mut scores = ScoreTable::default();
    scores.credit(RED);
    scores.credit(RED);
    scores.credit(PlayerSlot(7));
    assert_eq!(scores.get(RED), 2);
    assert_eq!(scores.get(PlayerSlot(7)), 0);

    let entries = scores.entries();
    assert_eq!(entries.len(), MAX_PLAYERS);
    assert_eq!(entries[1].name, "Red");
    assert_eq!(entries[1].score, 2);

    scores.reset();
    assert_eq!(scores.get(RED), 0);
}

#[test]
fn test_spawn_order_is_a_permutation() {
    use rand::SeedableRng;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
    for count in MIN_PLAYERS..=MAX_PLAYERS {
        let mut order = world_setup::shuffled_spawn_order(&mut rng, count);
        order.sort();
        assert_eq!(order, (1..=count).collect::<Vec<_>>());
    }
}
