//! The arena engine.
//!
//! `ArenaEngine` owns the hecs world and all match state outside it (round,
//! scores, ammo timer). Each `tick` applies queued commands, runs the systems
//! for the current round phase and returns an `ArenaSnapshot`.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::commands::PlayerCommand;
use arena_core::components::Player;
use arena_core::constants::{
    AMMO_RESPAWN_TICKS, DEFAULT_PLAYERS, MAX_PLAYERS, MAX_TIME_SCALE, MIN_PLAYERS,
};
use arena_core::enums::{GamePhase, PlayerSlot, RoundPhase};
use arena_core::events::GameEvent;
use arena_core::state::ArenaSnapshot;
use arena_core::types::SimTime;
use arena_map::ArenaMap;

use crate::keyboard::Keyboard;
use crate::round::{RoundState, ScoreTable};
use crate::systems;
use crate::timers::RepeatingTimer;
use crate::world_setup;

/// Per-match engine settings.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same match.
    pub seed: u64,
    /// Number of player slots in play (clamped to 2..=4).
    pub player_count: usize,
    /// 1.0 is real time.
    pub time_scale: f64,
    pub map: ArenaMap,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player_count: DEFAULT_PLAYERS,
            time_scale: 1.0,
            map: ArenaMap::default_arena(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all match state.
pub struct ArenaEngine {
    world: World,
    map: ArenaMap,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    player_count: usize,
    rng: ChaCha8Rng,
    keyboard: Keyboard,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,

    round: RoundState,
    scores: ScoreTable,
    ammo_timer: RepeatingTimer,
}

impl ArenaEngine {
    /// Create a new engine with the given config. The engine starts in the lobby.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            map: config.map,
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            player_count: config.player_count.clamp(MIN_PLAYERS, MAX_PLAYERS),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            keyboard: Keyboard::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            round: RoundState::default(),
            scores: ScoreTable::default(),
            ammo_timer: RepeatingTimer::new(AMMO_RESPAWN_TICKS),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, step one tick if the match is live, and
    /// return what the arena looks like now.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.map,
            &self.time,
            self.phase,
            &self.round,
            &self.scores,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Pacing hint for real-time runners; the tick itself is fixed.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn map(&self) -> &ArenaMap {
        &self.map
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current state of the player in `slot`, if they are on the field.
    pub fn player(&self, slot: PlayerSlot) -> Option<Player> {
        self.world
            .query::<&Player>()
            .iter()
            .find(|(_, player)| player.slot == slot)
            .map(|(_, player)| player.clone())
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { key } => self.keyboard.press(key),
            PlayerCommand::KeyUp { key } => self.keyboard.release(key),
            PlayerCommand::SetInput { slot, input } => self.keyboard.set_input(slot, input),
            PlayerCommand::StartMatch => {
                if self.phase == GamePhase::Lobby {
                    self.time = SimTime::default();
                    self.round = RoundState::default();
                    self.scores.reset();
                    self.phase = GamePhase::Active;
                    tracing::info!(players = self.player_count, "match started");
                    self.start_round();
                }
            }
            PlayerCommand::ReturnToLobby => {
                if self.phase != GamePhase::Lobby {
                    self.world.clear();
                    self.keyboard.clear();
                    self.ammo_timer.disarm();
                    self.round = RoundState::default();
                    self.scores.reset();
                    self.phase = GamePhase::Lobby;
                    tracing::info!("returned to lobby");
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
        }
    }

    /// Clear the field and begin the next round with fresh spawns and ammo.
    /// Scores carry over.
    fn start_round(&mut self) {
        self.world.clear();
        let players =
            world_setup::spawn_players(&mut self.world, &self.map, &mut self.rng, self.player_count);
        self.round.begin_next();
        self.ammo_timer.arm(self.time.tick);
        systems::ammo::drop_crate(&mut self.world, &mut self.rng, &self.map, &mut self.events);

        tracing::info!(round = self.round.number, players, "round started");
        self.events.push(GameEvent::RoundStarted {
            round: self.round.number,
            players,
        });
    }

    /// One tick of gameplay. Which systems run depends on the round phase.
    fn run_systems(&mut self) {
        let now = self.time.tick;

        match self.round.phase {
            RoundPhase::Playing => {
                // 1. Input: movement intent, facing, firing
                systems::input::run(&mut self.world, &self.keyboard, now, &mut self.events);
                // 2. Ammo respawn timer
                systems::ammo::spawn_due(
                    &mut self.world,
                    &mut self.rng,
                    &self.map,
                    &mut self.ammo_timer,
                    now,
                    &mut self.events,
                );
                // 3. Movement integration
                systems::movement::run(&mut self.world, &self.map);
                // 4. Ammo pickup
                systems::ammo::collect(&mut self.world, &mut self.despawn_buffer, &mut self.events);
                // 5. Projectile hits, then round-end check
                let eliminated = systems::combat::run(
                    &mut self.world,
                    now,
                    &mut self.despawn_buffer,
                    &mut self.events,
                );
                if eliminated > 0 {
                    systems::round::check_round_end(
                        &mut self.world,
                        &mut self.round,
                        &mut self.scores,
                        now,
                        &mut self.events,
                    );
                }
            }
            RoundPhase::Countdown => {
                // Shots already in flight keep travelling but can no longer hit anyone.
                systems::movement::run(&mut self.world, &self.map);
                if systems::round::advance_countdown(&mut self.round, now, &mut self.events) {
                    self.start_round();
                    return;
                }
            }
        }

        // 6. Expired projectiles and explosions
        systems::lifetime::run(&mut self.world, now, &mut self.despawn_buffer);
        // 7. Projectiles that left the arena
        systems::cleanup::run(&mut self.world, &self.map, &mut self.despawn_buffer);
    }
}

#[cfg(test)]
impl ArenaEngine {
    /// Move a player and point them in a direction.
    pub fn place_player(
        &mut self,
        slot: PlayerSlot,
        position: arena_core::types::Position,
        facing: arena_core::enums::Facing,
    ) {
        for (_entity, (player, pos)) in self
            .world
            .query_mut::<(&mut Player, &mut arena_core::types::Position)>()
        {
            if player.slot == slot {
                *pos = position;
                player.facing = facing;
            }
        }
    }

    pub fn set_ammo(&mut self, slot: PlayerSlot, shots: u32) {
        for (_entity, player) in self.world.query_mut::<&mut Player>() {
            if player.slot == slot {
                player.remaining_shots = shots;
            }
        }
    }

    /// Remove every crate from the field.
    pub fn clear_crates(&mut self) {
        let crates: Vec<hecs::Entity> = self
            .world
            .query::<&arena_core::components::AmmoCrate>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in crates {
            let _ = self.world.despawn(entity);
        }
    }

    /// Stop every projectile where it is.
    pub fn stall_projectiles(&mut self) {
        for (_entity, (_projectile, vel)) in self
            .world
            .query_mut::<(&arena_core::components::Projectile, &mut arena_core::types::Velocity)>()
        {
            *vel = arena_core::types::Velocity::default();
        }
    }

    pub fn spawn_test_crate(&mut self, position: arena_core::types::Position) {
        world_setup::spawn_crate(&mut self.world, position);
    }

    pub fn spawn_test_projectile(
        &mut self,
        owner: PlayerSlot,
        shooter: arena_core::types::Position,
        facing: arena_core::enums::Facing,
    ) {
        world_setup::spawn_projectile(&mut self.world, owner, shooter, facing, self.time.tick);
    }
}
