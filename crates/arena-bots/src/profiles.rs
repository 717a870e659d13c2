//! Behaviour presets for bots.

/// Named bot personalities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BotPersonality {
    #[default]
    Aggressive,
    Cautious,
}

/// Tuning knobs read by the decision function.
#[derive(Debug, Clone, Copy)]
pub struct BotProfile {
    /// Max perpendicular offset (px) at which a target counts as lined up.
    pub align_tolerance: f64,
    /// Only fire at targets closer than this (px).
    pub fire_range: f64,
    /// Ticks without progress before trying a detour.
    pub stuck_limit: u32,
    /// Ticks spent on a detour once stuck.
    pub detour_ticks: u32,
}

/// Get the behaviour profile for a personality.
pub fn get_profile(personality: BotPersonality) -> BotProfile {
    match personality {
        BotPersonality::Aggressive => BotProfile {
            align_tolerance: 8.0,
            fire_range: f64::INFINITY,
            stuck_limit: 6,
            detour_ticks: 20,
        },
        BotPersonality::Cautious => BotProfile {
            align_tolerance: 4.0,
            fire_range: 320.0,
            stuck_limit: 10,
            detour_ticks: 30,
        },
    }
}
