// Single penalty kick: aim, strike, celebrate

use rand::Rng;

use crate::config::PhysicsConfig;
use crate::game::field::{AWAY_GOALIE, AWAY_MIDFIELD, HOME_GOALIE, HOME_MIDFIELD};
use crate::game::{Arena, Field, Side};

// Keeper dive stops this far short of the side wall
const KEEPER_DIVE_MARGIN: f32 = 50.0;
// Vertical speed per unit of shot speed for an angled shot
const DIRECTION_BIAS: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyPhase {
    Aiming,
    Kicking,
    Celebration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotDirection {
    Left,
    Center,
    Right,
}

impl ShotDirection {
    pub const ALL: [ShotDirection; 3] = [ShotDirection::Left, ShotDirection::Center, ShotDirection::Right];

    /// -1 toward the top wall, +1 toward the bottom wall
    pub fn sign(self) -> f32 {
        match self {
            ShotDirection::Left => -1.0,
            ShotDirection::Center => 0.0,
            ShotDirection::Right => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShotDirection::Left => "Left",
            ShotDirection::Center => "Center",
            ShotDirection::Right => "Right",
        }
    }

    fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotPower {
    Soft,
    Medium,
    Strong,
}

impl ShotPower {
    pub const ALL: [ShotPower; 3] = [ShotPower::Soft, ShotPower::Medium, ShotPower::Strong];

    /// Initial ball speed in units per tick
    pub fn speed(self) -> f32 {
        match self {
            ShotPower::Soft => 6.0,
            ShotPower::Medium => 9.0,
            ShotPower::Strong => 14.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShotPower::Soft => "Soft",
            ShotPower::Medium => "Medium",
            ShotPower::Strong => "Strong",
        }
    }

    fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Transient state of the kick in progress
///
/// The human picks a direction every turn: where to shoot when kicking,
/// where to dive when keeping. Power only applies to the human's own kicks.
#[derive(Debug, Clone)]
pub struct PenaltyEngine {
    pub kicker: Side,
    pub phase: PenaltyPhase,
    pub direction: ShotDirection,
    pub power: ShotPower,
    /// Where the automatic keeper is leaning; shown to the human kicker
    pub keeper_intent: ShotDirection,
    /// Shoot was pressed and the kick is winding up
    pub locked: bool,
    pub outcome: Option<bool>,
}

impl PenaltyEngine {
    pub fn new(kicker: Side) -> Self {
        Self {
            kicker,
            phase: PenaltyPhase::Aiming,
            direction: ShotDirection::Center,
            power: ShotPower::Medium,
            keeper_intent: ShotDirection::Center,
            locked: false,
            outcome: None,
        }
    }

    fn can_aim(&self) -> bool {
        self.phase == PenaltyPhase::Aiming && !self.locked
    }

    pub fn select_direction(&mut self, direction: ShotDirection) {
        if self.can_aim() {
            self.direction = direction;
        }
    }

    pub fn select_power(&mut self, power: ShotPower) {
        if self.can_aim() && self.kicker == Side::Home {
            self.power = power;
        }
    }

    /// Resample the automatic keeper's lean while the human aims
    pub fn shuffle_keeper(&mut self, rng: &mut impl Rng) {
        if self.can_aim() && self.kicker == Side::Home {
            self.keeper_intent = ShotDirection::random(rng);
        }
    }

    /// Commit to the kick; returns false when already committed or past aiming
    pub fn lock(&mut self) -> bool {
        if !self.can_aim() {
            return false;
        }
        self.locked = true;
        true
    }

    pub fn kicker_rod(&self) -> usize {
        match self.kicker {
            Side::Home => HOME_MIDFIELD,
            Side::Away => AWAY_MIDFIELD,
        }
    }

    pub fn keeper_rod(&self) -> usize {
        match self.kicker {
            Side::Home => AWAY_GOALIE,
            Side::Away => HOME_GOALIE,
        }
    }

    pub fn arena(&self) -> Arena {
        Arena::Shootout {
            kicker: self.kicker_rod(),
            keeper: self.keeper_rod(),
        }
    }

    /// Strike the ball and send the keeper diving
    pub fn execute(&mut self, field: &mut Field, physics: &PhysicsConfig, rng: &mut impl Rng) {
        if self.phase != PenaltyPhase::Aiming {
            return;
        }

        let (direction, power, dive) = match self.kicker {
            Side::Home => (self.direction, self.power, self.keeper_intent),
            // The automatic kicker decides at the last moment; the human keeper
            // dives where the human aimed
            Side::Away => (ShotDirection::random(rng), ShotPower::random(rng), self.direction),
        };

        let speed = power.speed();
        field.ball.vel.x = self.kicker.attack_direction() * speed;
        field.ball.vel.y = direction.sign() * DIRECTION_BIAS * speed + (rng.gen::<f32>() - 0.5);

        if let Some(rod) = field.rod_mut(self.kicker_rod()) {
            rod.start_kick();
        }
        let dive_limit = field.height / 2.0 - KEEPER_DIVE_MARGIN;
        if let Some(rod) = field.rod_mut(self.keeper_rod()) {
            rod.target_y = dive.sign() * dive_limit;
            rod.easing = physics.keeper_easing;
        }

        tracing::debug!(
            kicker = ?self.kicker,
            direction = direction.label(),
            power = power.label(),
            dive = dive.label(),
            "Penalty taken"
        );
        self.phase = PenaltyPhase::Kicking;
    }

    /// Freeze the result once physics has decided it; returns false if already decided
    pub fn conclude(&mut self, scored: bool) -> bool {
        if self.phase != PenaltyPhase::Kicking {
            return false;
        }
        self.phase = PenaltyPhase::Celebration;
        self.outcome = Some(scored);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(kicker: Side) -> (PenaltyEngine, Field, PhysicsConfig, StdRng) {
        let physics = PhysicsConfig::default();
        let mut field = Field::new(&physics);
        field.serve_penalty(kicker, physics.player_reach);
        (PenaltyEngine::new(kicker), field, physics, StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_home_kick_uses_selection() {
        let (mut engine, mut field, physics, mut rng) = setup(Side::Home);
        engine.select_direction(ShotDirection::Right);
        engine.select_power(ShotPower::Strong);
        engine.keeper_intent = ShotDirection::Left;
        assert!(engine.lock());

        engine.execute(&mut field, &physics, &mut rng);
        assert_eq!(engine.phase, PenaltyPhase::Kicking);
        assert_eq!(field.ball.vel.x, 14.0);
        // 0.35 * 14 = 4.9, plus noise in [-0.5, 0.5)
        assert!(field.ball.vel.y > 4.3 && field.ball.vel.y < 5.5);

        assert!(field.rod(HOME_MIDFIELD).unwrap().spinning);
        let keeper = field.rod(AWAY_GOALIE).unwrap();
        assert_eq!(keeper.target_y, -200.0);
        assert_eq!(keeper.easing, physics.keeper_easing);
    }

    #[test]
    fn test_away_kick_heads_left_and_human_keeper_follows_aim() {
        let (mut engine, mut field, physics, mut rng) = setup(Side::Away);
        engine.select_direction(ShotDirection::Right);
        engine.select_power(ShotPower::Strong);
        // Power is the kicker's choice
        assert_eq!(engine.power, ShotPower::Medium);

        engine.execute(&mut field, &physics, &mut rng);
        assert!(field.ball.vel.x < 0.0);
        assert!(field.rod(AWAY_MIDFIELD).unwrap().spinning);
        assert_eq!(field.rod(HOME_GOALIE).unwrap().target_y, 200.0);
        assert_eq!(engine.arena(), Arena::Shootout { kicker: AWAY_MIDFIELD, keeper: HOME_GOALIE });
    }

    #[test]
    fn test_selection_frozen_after_lock() {
        let (mut engine, _, _, mut rng) = setup(Side::Home);
        assert!(engine.lock());
        assert!(!engine.lock());
        engine.select_direction(ShotDirection::Left);
        engine.shuffle_keeper(&mut rng);
        assert_eq!(engine.direction, ShotDirection::Center);
        assert_eq!(engine.keeper_intent, ShotDirection::Center);
    }

    #[test]
    fn test_conclude_only_once() {
        let (mut engine, mut field, physics, mut rng) = setup(Side::Home);
        assert!(!engine.conclude(true));
        engine.execute(&mut field, &physics, &mut rng);
        assert!(engine.conclude(false));
        assert!(!engine.conclude(true));
        assert_eq!(engine.outcome, Some(false));
        assert_eq!(engine.phase, PenaltyPhase::Celebration);
    }
}
