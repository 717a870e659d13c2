//! Game loop thread: runs the engine at 60 Hz, lets the bots play and hands
//! each snapshot to a sink.
//!
//! The engine is created inside the thread so it never has to be shared.
//! Commands arrive via an `mpsc` channel; the latest snapshot is also kept
//! in shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use arena_core::constants::TICK_RATE;
use arena_core::events::GameEvent;
use arena_core::state::{ArenaSnapshot, ScoreEntry};
use arena_sim::{ArenaEngine, SimConfig};

use crate::bots::BotDriver;
use crate::state::{GameLoopCommand, SharedSnapshot};

/// One tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Wall-clock length of one tick at `time_scale`. A zero scale runs at
/// normal speed; `Pause` is what stops the clock.
pub fn tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// When the loop stops and how it is paced.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Stop once this many rounds have ended. 0 runs until shut down.
    pub target_rounds: u32,
    pub max_ticks: Option<u64>,
    pub realtime: bool,
    /// Let bots drive every slot.
    pub bots: bool,
}

/// Outcome of a finished game loop.
#[derive(Debug, Clone, Default)]
pub struct MatchSummary {
    pub rounds_played: u32,
    pub ticks: u64,
    pub scoreboard: Vec<ScoreEntry>,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the match summary
/// when the loop stops.
pub fn spawn_game_loop<F>(
    sim: SimConfig,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
    sink: F,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<MatchSummary>)>
where
    F: FnMut(&ArenaSnapshot) + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arena-game-loop".into())
        .spawn(move || {
            let engine = ArenaEngine::new(sim);
            run_game_loop(engine, cmd_rx, options, &latest_snapshot, sink)
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the round target or tick limit is reached,
/// a Shutdown command arrives, or the channel disconnects.
pub fn run_game_loop<F>(
    mut engine: ArenaEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    options: LoopOptions,
    latest_snapshot: &SharedSnapshot,
    mut sink: F,
) -> MatchSummary
where
    F: FnMut(&ArenaSnapshot),
{
    let mut bots = options.bots.then(|| BotDriver::new(engine.player_count()));
    let mut summary = MatchSummary::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Command(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if shutdown {
            tracing::info!(ticks = summary.ticks, "game loop shutting down");
            break;
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        summary.ticks += 1;
        summary.rounds_played += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundEnded { .. }))
            .count() as u32;
        summary.scoreboard.clone_from(&snapshot.scoreboard);

        // 3. Bot inputs apply on the next tick
        if let Some(bots) = bots.as_mut() {
            engine.queue_commands(bots.commands(&snapshot));
        }

        // 4. Hand the snapshot out
        sink(&snapshot);
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.target_rounds > 0 && summary.rounds_played >= options.target_rounds {
            tracing::info!(rounds = summary.rounds_played, "round target reached");
            break;
        }
        if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
            tracing::warn!(ticks = summary.ticks, "tick limit reached");
            break;
        }

        // 5. Pace to real time, scaled
        if options.realtime {
            let effective_tick_duration = tick_duration(engine.time_scale());

            next_tick_time += effective_tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > effective_tick_duration * 2 {
                // Too far behind: reset instead of spiralling to catch up
                next_tick_time = now;
            }
        }
    }

    summary
}
