use rand::Rng;

use super::events::{GameEvent, SoundCue};
use super::field::{Ball, Field, PlayerSlot, Rod, Side, Vector};
use crate::config::PhysicsConfig;

// Extra clearance when the ball is pushed out of a figure after a kick or a block
const KICK_CLEARANCE: f32 = 4.0;
const BLOCK_CLEARANCE: f32 = 1.0;
// Clearance in front of the keeper after a save
const SAVE_CLEARANCE: f32 = 15.0;
// Horizontal and vertical multipliers applied by a keeper save
const SAVE_REBOUND_X: f32 = -0.5;
const SAVE_REBOUND_Y: f32 = 0.5;
// Width of the random vertical spin added to a kick
const KICK_NOISE: f32 = 2.0;

/// Which rules the step plays under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arena {
    /// Normal play: every rod is live and the end walls rebound outside the goal mouth
    Open,
    /// Penalty kick: only the kicker's and keeper's rods move, only the keeper can touch
    /// the ball, and anything that is not a goal is a miss
    Shootout { kicker: usize, keeper: usize },
}

impl Arena {
    fn is_active(&self, rod: &Rod) -> bool {
        match *self {
            Arena::Open => true,
            Arena::Shootout { kicker, keeper } => rod.id == kicker || rod.id == keeper,
        }
    }
}

/// What happened during one physics step
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub goal: Option<Side>,
    pub missed: bool,
    pub rod_kick: bool,
    pub rod_block: bool,
    pub wall_collision: bool,
    pub saved: bool,
    pub nudged: bool,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.goal.is_some()
            || self.missed
            || self.rod_kick
            || self.rod_block
            || self.wall_collision
            || self.saved
            || self.nudged
    }

    /// True once the point is settled and the ball is dead
    pub fn decided(&self) -> bool {
        self.goal.is_some() || self.missed
    }

    /// Translate into frontend notifications
    pub fn to_game_events(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.rod_kick || self.rod_block {
            events.push(GameEvent::Cue(SoundCue::Kick));
        }
        if self.saved {
            events.push(GameEvent::Cue(SoundCue::Save));
        }
        if self.nudged {
            events.push(GameEvent::Cue(SoundCue::Thump));
        }
        if let Some(scorer) = self.goal {
            events.push(GameEvent::Goal { scorer });
            events.push(GameEvent::Cue(SoundCue::Goal));
        }
        if self.missed {
            events.push(GameEvent::ShotMissed);
        }
        events
    }
}

/// Advance the table by one tick.
///
/// Rod targets must already be set by the controllers. Once a goal or miss is
/// signalled the ball stays dead and later calls do nothing until it is served again.
pub fn step(
    field: &mut Field,
    arena: Arena,
    physics: &PhysicsConfig,
    rng: &mut impl Rng,
) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();
    if field.ball_dead {
        return events;
    }

    if !field.ball.pos.is_finite() || !field.ball.vel.is_finite() {
        tracing::warn!(
            pos = ?field.ball.pos,
            vel = ?field.ball.vel,
            "Non-finite ball state, re-centring"
        );
        let center = Vector::new(field.width / 2.0, field.center_y());
        field.ball.place(center);
        field.stuck_ticks = 0;
        return events;
    }

    integrate(&mut field.ball, physics.friction);

    if bounce_off_side_walls(&mut field.ball, field.height, physics.wall_bounce) {
        events.wall_collision = true;
    }

    if let Some(crossed) = check_end_lines(field, arena, physics.wall_bounce) {
        match crossed {
            EndLine::Goal(scorer) => events.goal = Some(scorer),
            EndLine::Miss => events.missed = true,
            EndLine::Rebound => events.wall_collision = true,
        }
        if events.decided() {
            field.ball_dead = true;
            return events;
        }
    }

    let center_y = field.center_y();
    let spin_speed = match arena {
        Arena::Open => physics.spin_speed,
        Arena::Shootout { .. } => physics.shootout_spin_speed,
    };

    for rod in field.rods.iter_mut().filter(|rod| arena.is_active(rod)) {
        // A rod mid-kick holds its displacement until the sweep ends
        if !rod.spinning {
            rod.y += (rod.target_y - rod.y) * rod.easing;
        }
        rod.advance_spin(spin_speed);

        match arena {
            Arena::Open => {
                for player in &rod.players {
                    match resolve_contact(&mut field.ball, rod, player, center_y, physics, rng) {
                        Some(Contact::Kick) => events.rod_kick = true,
                        Some(Contact::Block) => events.rod_block = true,
                        None => {}
                    }
                }
            }
            Arena::Shootout { keeper, .. } if rod.id == keeper => {
                for player in &rod.players {
                    if save_contact(&mut field.ball, rod, player, center_y, physics) {
                        events.saved = true;
                    }
                }
            }
            Arena::Shootout { .. } => {}
        }
    }

    match arena {
        Arena::Open => {
            if recover_stalled_ball(field, physics, rng) {
                events.nudged = true;
            }
        }
        Arena::Shootout { .. } => {
            if field.ball.speed() < physics.shootout_dead_speed {
                events.missed = true;
                field.ball_dead = true;
            }
        }
    }

    events
}

fn integrate(ball: &mut Ball, friction: f32) {
    ball.pos.x += ball.vel.x;
    ball.pos.y += ball.vel.y;
    ball.vel.x *= friction;
    ball.vel.y *= friction;
}

fn bounce_off_side_walls(ball: &mut Ball, height: f32, bounce: f32) -> bool {
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = ball.vel.y.abs() * bounce;
        true
    } else if ball.pos.y + ball.radius > height {
        ball.pos.y = height - ball.radius;
        ball.vel.y = -ball.vel.y.abs() * bounce;
        true
    } else {
        false
    }
}

enum EndLine {
    Goal(Side),
    Miss,
    Rebound,
}

fn check_end_lines(field: &mut Field, arena: Arena, bounce: f32) -> Option<EndLine> {
    // The side attacking the end that was crossed
    let attacker = if field.ball.pos.x < 0.0 {
        Side::Away
    } else if field.ball.pos.x > field.width {
        Side::Home
    } else {
        return None;
    };

    let in_mouth = field.in_goal_band(field.ball.pos.y);
    match arena {
        Arena::Open if in_mouth => Some(EndLine::Goal(attacker)),
        Arena::Open => {
            let ball = &mut field.ball;
            match attacker {
                Side::Away => {
                    ball.pos.x = ball.radius;
                    ball.vel.x = ball.vel.x.abs() * bounce;
                }
                Side::Home => {
                    ball.pos.x = field.width - ball.radius;
                    ball.vel.x = -ball.vel.x.abs() * bounce;
                }
            }
            Some(EndLine::Rebound)
        }
        Arena::Shootout { kicker, .. } => {
            // Only the kicker's target goal counts; a rebound into the other end is a miss
            let kicker_side = field.rod(kicker).map(|rod| rod.side);
            if in_mouth && kicker_side == Some(attacker) {
                Some(EndLine::Goal(attacker))
            } else {
                Some(EndLine::Miss)
            }
        }
    }
}

enum Contact {
    Kick,
    Block,
}

fn resolve_contact(
    ball: &mut Ball,
    rod: &Rod,
    player: &PlayerSlot,
    center_y: f32,
    physics: &PhysicsConfig,
    rng: &mut impl Rng,
) -> Option<Contact> {
    let px = rod.x;
    let py = rod.slot_y(player, center_y);
    let dx = ball.pos.x - px;
    let dy = ball.pos.y - py;
    let reach = physics.player_reach + ball.radius;

    if (dx * dx + dy * dy).sqrt() >= reach {
        return None;
    }

    if rod.spinning {
        let dir = rod.side.attack_direction();
        ball.vel.x = dir * physics.kick_force;
        ball.vel.y = (dy / physics.player_reach) * physics.kick_lift
            + (rng.gen::<f32>() - 0.5) * KICK_NOISE;
        ball.pos.x = px + dir * (reach + KICK_CLEARANCE);
        return Some(Contact::Kick);
    }

    // Passive block: reflect along the axis of greater overlap
    if dx.abs() > dy.abs() {
        ball.vel.x *= -physics.block_damping;
        ball.pos.x = px + dx.signum() * (reach + BLOCK_CLEARANCE);
    } else {
        ball.vel.y *= -physics.block_damping;
        ball.pos.y = py + dy.signum() * (reach + BLOCK_CLEARANCE);
    }
    Some(Contact::Block)
}

fn save_contact(
    ball: &mut Ball,
    rod: &Rod,
    player: &PlayerSlot,
    center_y: f32,
    physics: &PhysicsConfig,
) -> bool {
    let px = rod.x;
    let py = rod.slot_y(player, center_y);
    let dx = ball.pos.x - px;
    let dy = ball.pos.y - py;

    if (dx * dx + dy * dy).sqrt() >= physics.player_reach + ball.radius {
        return false;
    }

    ball.vel.x *= SAVE_REBOUND_X;
    ball.vel.y *= SAVE_REBOUND_Y;
    // Push back toward the kicker, away from the keeper's own goal
    let outward = rod.side.attack_direction();
    ball.pos.x = px + outward * (physics.player_reach + SAVE_CLEARANCE);
    true
}

/// Nudge a ball that has come to rest out of every rod's reach.
/// Returns true when a nudge was applied.
fn recover_stalled_ball(field: &mut Field, physics: &PhysicsConfig, rng: &mut impl Rng) -> bool {
    if field.ball.speed() >= physics.stall_speed {
        field.stuck_ticks = 0;
        return false;
    }

    let lane_reach = physics.player_reach + field.ball.radius + physics.stall_lane_margin;
    let reachable = field
        .rods
        .iter()
        .any(|rod| (field.ball.pos.x - rod.x).abs() < lane_reach);
    if reachable {
        field.stuck_ticks = 0;
        return false;
    }

    field.stuck_ticks += 1;
    if field.stuck_ticks <= physics.stall_ticks {
        return false;
    }

    field.ball.vel.x += (rng.gen::<f32>() - 0.5) * physics.stall_nudge;
    field.ball.vel.y += (rng.gen::<f32>() - 0.5) * physics.stall_nudge;
    field.stuck_ticks = 0;
    tracing::debug!(pos = ?field.ball.pos, "Nudged stalled ball");
    true
}
