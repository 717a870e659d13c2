//! Round-end detection and the between-rounds countdown.

use hecs::World;

use arena_core::components::Player;
use arena_core::enums::{PlayerSlot, RoundPhase};
use arena_core::events::GameEvent;

use crate::round::{RoundState, ScoreTable};
use crate::systems::movement;

/// Slots of players still in the round, in slot order.
pub fn alive_slots(world: &World) -> Vec<PlayerSlot> {
    let mut alive: Vec<PlayerSlot> = world
        .query::<&Player>()
        .iter()
        .filter(|(_, player)| player.alive)
        .map(|(_, player)| player.slot)
        .collect();
    alive.sort();
    alive
}

/// End the round once at most one player is left standing.
/// A lone survivor scores one point; nobody scores if everyone fell.
/// Returns true if the round ended this call.
pub fn check_round_end(
    world: &mut World,
    round: &mut RoundState,
    scores: &mut ScoreTable,
    now: u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    if round.phase != RoundPhase::Playing {
        return false;
    }

    let alive = alive_slots(world);
    if alive.len() > 1 {
        return false;
    }

    let winner = match alive.as_slice() {
        [survivor] => Some(*survivor),
        _ => None,
    };
    if let Some(slot) = winner {
        scores.credit(slot);
    }
    tracing::info!(
        round = round.number,
        winner = winner.map(|s| s.name()).unwrap_or("nobody"),
        "round over"
    );
    events.push(GameEvent::RoundEnded {
        round: round.number,
        winner,
    });

    movement::halt_players(world);
    round.begin_countdown(now);
    events.push(GameEvent::CountdownTick {
        remaining: round.countdown,
    });
    true
}

/// Advance the countdown. Returns true when it has run out and the
/// next round should start.
pub fn advance_countdown(round: &mut RoundState, now: u64, events: &mut Vec<GameEvent>) -> bool {
    match round.step_countdown(now) {
        Some(remaining) => {
            events.push(GameEvent::CountdownTick { remaining });
            remaining == 0
        }
        None => false,
    }
}
