//! Bot decision making.

use arena_core::controls::InputState;
use arena_core::enums::Facing;
use arena_core::types::Position;

use crate::profiles::BotProfile;

/// What a bot knows about the arena this tick.
#[derive(Debug, Clone)]
pub struct BotContext {
    pub position: Position,
    pub facing: Facing,
    pub remaining_shots: u32,
    pub can_shoot: bool,
    /// Positions of living opponents.
    pub opponents: Vec<Position>,
    /// Positions of ammo crates on the field.
    pub crates: Vec<Position>,
}

/// State a bot carries between ticks to notice it is stuck against a wall.
#[derive(Debug, Clone, Default)]
pub struct BotMemory {
    last_position: Option<Position>,
    last_direction: Option<Facing>,
    stuck_ticks: u32,
    detour: Option<(Facing, u32)>,
}

/// Choose this tick's key state.
pub fn decide(ctx: &BotContext, profile: &BotProfile, memory: &mut BotMemory) -> InputState {
    track_progress(ctx, profile, memory);

    if let Some((facing, remaining)) = memory.detour {
        memory.detour = (remaining > 1).then(|| (facing, remaining - 1));
        return remember(memory, InputState::moving(facing));
    }

    let input = if ctx.remaining_shots == 0 {
        match nearest(&ctx.position, &ctx.crates) {
            Some(target) => approach(&ctx.position, &target, profile.align_tolerance),
            None => InputState::default(),
        }
    } else {
        match nearest(&ctx.position, &ctx.opponents) {
            Some(target) => engage(ctx, &target, profile),
            None => InputState::default(),
        }
    };
    remember(memory, input)
}

/// Line up with the target on one axis, turn to face it, then fire.
fn engage(ctx: &BotContext, target: &Position, profile: &BotProfile) -> InputState {
    let dx = target.x - ctx.position.x;
    let dy = target.y - ctx.position.y;
    let tol = profile.align_tolerance;

    let line_of_fire = if dy.abs() <= tol {
        Some(if dx < 0.0 { Facing::Left } else { Facing::Right })
    } else if dx.abs() <= tol {
        Some(if dy < 0.0 { Facing::Up } else { Facing::Down })
    } else {
        None
    };

    match line_of_fire {
        Some(facing) if facing == ctx.facing => {
            let in_range = ctx.position.distance_to(target) <= profile.fire_range;
            if ctx.can_shoot && in_range {
                InputState::default().with_fire()
            } else if in_range {
                InputState::default()
            } else {
                InputState::moving(facing)
            }
        }
        // Turning costs one tick of movement, the same as a human tapping the key.
        Some(facing) => InputState::moving(facing),
        None => {
            // Close the smaller gap first; it takes fewer ticks to get a shot.
            if dx.abs() < dy.abs() {
                InputState::moving(if dx < 0.0 { Facing::Left } else { Facing::Right })
            } else {
                InputState::moving(if dy < 0.0 { Facing::Up } else { Facing::Down })
            }
        }
    }
}

/// Walk toward a point, horizontal gap first.
fn approach(from: &Position, to: &Position, tol: f64) -> InputState {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > tol {
        InputState::moving(if dx < 0.0 { Facing::Left } else { Facing::Right })
    } else if dy.abs() > tol {
        InputState::moving(if dy < 0.0 { Facing::Up } else { Facing::Down })
    } else {
        InputState::default()
    }
}

fn nearest(from: &Position, candidates: &[Position]) -> Option<Position> {
    candidates
        .iter()
        .min_by(|a, b| from.distance_to(a).total_cmp(&from.distance_to(b)))
        .copied()
}

/// Count ticks where the bot pressed a direction but did not move,
/// and start a perpendicular detour once it has been stuck long enough.
fn track_progress(ctx: &BotContext, profile: &BotProfile, memory: &mut BotMemory) {
    let moved = memory
        .last_position
        .map(|p| p.distance_to(&ctx.position) > f64::EPSILON)
        .unwrap_or(true);

    match memory.last_direction {
        Some(dir) if !moved => {
            memory.stuck_ticks += 1;
            if memory.stuck_ticks >= profile.stuck_limit && memory.detour.is_none() {
                let detour = match dir {
                    Facing::Left | Facing::Right => Facing::Down,
                    Facing::Up | Facing::Down => Facing::Right,
                };
                memory.detour = Some((detour, profile.detour_ticks));
                memory.stuck_ticks = 0;
            }
        }
        _ => memory.stuck_ticks = 0,
    }
    memory.last_position = Some(ctx.position);
}

fn remember(memory: &mut BotMemory, input: InputState) -> InputState {
    memory.last_direction = input.direction();
    input
}
