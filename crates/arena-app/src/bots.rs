//! Drives every slot with a bot so matches run without a keyboard.

use arena_bots::{decide, get_profile, BotContext, BotMemory, BotPersonality, BotProfile};
use arena_core::commands::PlayerCommand;
use arena_core::enums::{GamePhase, PlayerSlot, RoundPhase};
use arena_core::events::GameEvent;
use arena_core::state::ArenaSnapshot;

struct Seat {
    slot: PlayerSlot,
    profile: BotProfile,
    memory: BotMemory,
}

/// One bot per slot. Even slots play aggressively, odd slots cautiously.
pub struct BotDriver {
    seats: Vec<Seat>,
}

impl BotDriver {
    pub fn new(player_count: usize) -> Self {
        let seats = PlayerSlot::all()
            .take(player_count)
            .map(|slot| Seat {
                slot,
                profile: get_profile(personality_for(slot)),
                memory: BotMemory::default(),
            })
            .collect();
        Self { seats }
    }

    /// Inputs for the next tick, derived from the latest snapshot.
    /// Nothing is produced outside live play.
    pub fn commands(&mut self, snapshot: &ArenaSnapshot) -> Vec<PlayerCommand> {
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundStarted { .. }))
        {
            for seat in &mut self.seats {
                seat.memory = BotMemory::default();
            }
        }

        if snapshot.phase != GamePhase::Active || snapshot.round.phase != RoundPhase::Playing {
            return Vec::new();
        }

        let crates: Vec<_> = snapshot.crates.iter().map(|c| c.position).collect();
        let mut commands = Vec::with_capacity(self.seats.len());
        for seat in &mut self.seats {
            let Some(me) = snapshot
                .players
                .iter()
                .find(|p| p.slot == seat.slot && p.alive)
            else {
                continue;
            };
            let ctx = BotContext {
                position: me.position,
                facing: me.facing,
                remaining_shots: me.remaining_shots,
                can_shoot: me.can_shoot,
                opponents: snapshot
                    .players
                    .iter()
                    .filter(|p| p.alive && p.slot != seat.slot)
                    .map(|p| p.position)
                    .collect(),
                crates: crates.clone(),
            };
            let input = decide(&ctx, &seat.profile, &mut seat.memory);
            commands.push(PlayerCommand::SetInput {
                slot: seat.slot,
                input,
            });
        }
        commands
    }
}

fn personality_for(slot: PlayerSlot) -> BotPersonality {
    if slot.index() % 2 == 0 {
        BotPersonality::Aggressive
    } else {
        BotPersonality::Cautious
    }
}
