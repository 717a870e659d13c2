//! Computer-controlled players for ARENA.
//!
//! Pure decision functions that turn what a bot can see into the key state
//! a human would hold. No ECS dependency; the caller gathers the context
//! and feeds the resulting `InputState` back as a command.

pub mod brain;
pub mod profiles;

pub use brain::{decide, BotContext, BotMemory};
pub use profiles::{get_profile, BotPersonality, BotProfile};
