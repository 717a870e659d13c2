use std::io::Write;
use std::process::ExitCode;

use arena_app::config::AppConfig;
use arena_app::core::commands::PlayerCommand;
use arena_app::core::state::ArenaSnapshot;
use arena_app::game_loop::{self, LoopOptions, MatchSummary};
use arena_app::state::AppState;
use arena_app::AppError;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Snapshots may go to stdout, so logs always go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn print_snapshot(snapshot: &ArenaSnapshot) {
    let line = match serde_json::to_string(snapshot) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize snapshot");
            return;
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{line}") {
        tracing::warn!(error = %e, "failed to write snapshot");
    }
}

fn run(config: AppConfig) -> Result<MatchSummary, AppError> {
    let sim = config.sim_config()?;
    let options = LoopOptions {
        target_rounds: config.rounds,
        max_ticks: config.max_ticks,
        realtime: config.realtime,
        bots: true,
    };
    let state = AppState::new();

    let snapshot_json = config.snapshot_json;
    let (tx, handle) = game_loop::spawn_game_loop(
        sim,
        options,
        state.latest_snapshot.clone(),
        move |snapshot| {
            if snapshot_json {
                print_snapshot(snapshot);
            }
        },
    )
    .map_err(AppError::Spawn)?;

    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(tx);
    }
    state.send(PlayerCommand::StartMatch);

    handle.join().map_err(|_| AppError::LoopPanicked)
}

fn main() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        seed = config.seed,
        players = config.players,
        rounds = config.rounds,
        map = ?config.map_path,
        "starting arena"
    );

    let players = config.players;
    match run(config) {
        Ok(summary) => {
            tracing::info!(
                rounds = summary.rounds_played,
                ticks = summary.ticks,
                "match finished"
            );
            for entry in summary.scoreboard.iter().take(players) {
                tracing::info!(player = %entry.name, wins = entry.score, "final score");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "arena stopped");
            ExitCode::FAILURE
        }
    }
}
