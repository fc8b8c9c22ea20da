use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

// Rod ids in lane order, left to right
pub const HOME_GOALIE: usize = 0;
pub const HOME_DEFENSE: usize = 1;
pub const AWAY_ATTACK: usize = 2;
pub const HOME_MIDFIELD: usize = 3;
pub const AWAY_MIDFIELD: usize = 4;
pub const HOME_ATTACK: usize = 5;
pub const AWAY_DEFENSE: usize = 6;
pub const AWAY_GOALIE: usize = 7;

// Rod lanes on the reference 800-unit table
const LANES: [f32; 8] = [50.0, 140.0, 230.0, 320.0, 480.0, 570.0, 660.0, 750.0];
const REFERENCE_WIDTH: f32 = 800.0;

// Distance behind a figure's reach where a penalty is placed
const PENALTY_SPOT_GAP: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Which bench a rod (or a score) belongs to.
/// Home is the human side, defending the left goal and attacking toward +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Sign of the horizontal direction this side kicks toward
    pub fn attack_direction(self) -> f32 {
        match self {
            Side::Home => 1.0,
            Side::Away => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RodRole {
    Goalie,
    Defense,
    Midfield,
    Attack,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vector,
    pub vel: Vector,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vector, radius: f32) -> Self {
        Self {
            pos,
            vel: Vector::default(),
            radius,
        }
    }

    /// Teleport the ball and bring it to rest
    pub fn place(&mut self, pos: Vector) {
        self.pos = pos;
        self.vel = Vector::default();
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A figure on a rod: its offset from the rod's centre and its shirt colour
#[derive(Debug, Clone, Copy)]
pub struct PlayerSlot {
    pub offset: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone)]
pub struct Rod {
    pub id: usize,
    pub side: Side,
    pub role: RodRole,
    pub x: f32,
    pub y: f32,
    pub target_y: f32,
    // Fraction of the gap to target_y closed each tick
    pub easing: f32,
    pub players: Vec<PlayerSlot>,
    pub spinning: bool,
    pub spin_angle: f32,
}

impl Rod {
    fn new(id: usize, side: Side, role: RodRole, x: f32, offsets: &[f32]) -> Self {
        Self {
            id,
            side,
            role,
            x,
            y: 0.0,
            target_y: 0.0,
            easing: 0.0,
            players: offsets
                .iter()
                .map(|&offset| PlayerSlot {
                    offset,
                    color: [255, 255, 255],
                })
                .collect(),
            spinning: false,
            spin_angle: 0.0,
        }
    }

    /// World y of a slot on this rod
    pub fn slot_y(&self, slot: &PlayerSlot, center_y: f32) -> f32 {
        center_y + self.y + slot.offset
    }

    /// Start a kick sweep; a rod already mid-kick restarts from zero
    pub fn start_kick(&mut self) {
        self.spinning = true;
        self.spin_angle = 0.0;
    }

    /// Advance the kick sweep, returning true when it completes
    pub fn advance_spin(&mut self, step: f32) -> bool {
        if !self.spinning {
            return false;
        }
        self.spin_angle += step;
        if self.spin_angle > TAU {
            self.spin_angle = 0.0;
            self.spinning = false;
            return true;
        }
        false
    }

    fn recentre(&mut self) {
        self.y = 0.0;
        self.target_y = 0.0;
        self.spinning = false;
        self.spin_angle = 0.0;
    }
}

/// The table: ball, eight rods and the counters the physics step keeps between ticks
#[derive(Debug, Clone)]
pub struct Field {
    pub ball: Ball,
    pub rods: Vec<Rod>,
    pub width: f32,
    pub height: f32,
    pub goal_size: f32,
    // Set once a goal or miss has been signalled; cleared on the next serve
    pub ball_dead: bool,
    pub stuck_ticks: u32,
}

impl Field {
    pub fn new(physics: &PhysicsConfig) -> Self {
        let width = physics.field_width;
        let height = physics.field_height;
        let lane = |id: usize| LANES[id] * (width / REFERENCE_WIDTH);

        let rods = vec![
            Rod::new(HOME_GOALIE, Side::Home, RodRole::Goalie, lane(HOME_GOALIE), &[0.0]),
            Rod::new(HOME_DEFENSE, Side::Home, RodRole::Defense, lane(HOME_DEFENSE), &[-100.0, 100.0]),
            Rod::new(AWAY_ATTACK, Side::Away, RodRole::Attack, lane(AWAY_ATTACK), &[0.0, -120.0, 120.0]),
            Rod::new(HOME_MIDFIELD, Side::Home, RodRole::Midfield, lane(HOME_MIDFIELD), &[-100.0, 0.0, 100.0]),
            Rod::new(AWAY_MIDFIELD, Side::Away, RodRole::Midfield, lane(AWAY_MIDFIELD), &[-100.0, 0.0, 100.0]),
            Rod::new(HOME_ATTACK, Side::Home, RodRole::Attack, lane(HOME_ATTACK), &[0.0, -120.0, 120.0]),
            Rod::new(AWAY_DEFENSE, Side::Away, RodRole::Defense, lane(AWAY_DEFENSE), &[-100.0, 100.0]),
            Rod::new(AWAY_GOALIE, Side::Away, RodRole::Goalie, lane(AWAY_GOALIE), &[0.0]),
        ];

        Self {
            ball: Ball::new(Vector::new(width / 2.0, height / 2.0), physics.ball_radius),
            rods,
            width,
            height,
            goal_size: physics.goal_size,
            ball_dead: false,
            stuck_ticks: 0,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Top and bottom of the goal mouth on both end lines
    pub fn goal_band(&self) -> (f32, f32) {
        let half = self.goal_size / 2.0;
        (self.center_y() - half, self.center_y() + half)
    }

    pub fn in_goal_band(&self, y: f32) -> bool {
        let (top, bottom) = self.goal_band();
        y > top && y < bottom
    }

    pub fn rod(&self, id: usize) -> Option<&Rod> {
        self.rods.iter().find(|rod| rod.id == id)
    }

    pub fn rod_mut(&mut self, id: usize) -> Option<&mut Rod> {
        self.rods.iter_mut().find(|rod| rod.id == id)
    }

    /// Put the ball on the centre spot at rest and recentre every rod
    pub fn serve_center(&mut self) {
        let center = Vector::new(self.width / 2.0, self.center_y());
        self.ball.place(center);
        self.reset_rods();
    }

    /// Set the ball just in front of the kicking side's midfield
    pub fn serve_penalty(&mut self, kicker: Side, reach: f32) {
        let spot_rod = match kicker {
            Side::Home => HOME_MIDFIELD,
            Side::Away => AWAY_MIDFIELD,
        };
        let rod_x = self.rod(spot_rod).map_or(self.width / 2.0, |rod| rod.x);
        let x = rod_x + kicker.attack_direction() * (reach + PENALTY_SPOT_GAP);
        self.ball.place(Vector::new(x, self.center_y()));
        self.reset_rods();
    }

    fn reset_rods(&mut self) {
        for rod in &mut self.rods {
            rod.recentre();
        }
        self.ball_dead = false;
        self.stuck_ticks = 0;
    }

    /// Spin the listed rods into a kick
    pub fn kick(&mut self, ids: &[usize]) {
        for rod in self.rods.iter_mut().filter(|rod| ids.contains(&rod.id)) {
            rod.start_kick();
        }
    }

    /// Dress each side's figures in its team colour
    pub fn paint(&mut self, home: [u8; 3], away: [u8; 3]) {
        for rod in &mut self.rods {
            let color = match rod.side {
                Side::Home => home,
                Side::Away => away,
            };
            for player in &mut rod.players {
                player.color = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_lanes() {
        let field = Field::new(&PhysicsConfig::default());
        let lanes: Vec<f32> = field.rods.iter().map(|rod| rod.x).collect();
        assert_eq!(lanes, vec![50.0, 140.0, 230.0, 320.0, 480.0, 570.0, 660.0, 750.0]);

        let home = field.rods.iter().filter(|rod| rod.side == Side::Home).count();
        assert_eq!(home, 4);
        assert_eq!(field.rod(AWAY_GOALIE).unwrap().role, RodRole::Goalie);
    }

    #[test]
    fn test_goal_band_is_centered() {
        let field = Field::new(&PhysicsConfig::default());
        assert_eq!(field.goal_band(), (180.0, 320.0));
        assert!(field.in_goal_band(250.0));
        assert!(!field.in_goal_band(100.0));
    }

    #[test]
    fn test_spin_completes_after_full_turn() {
        let mut field = Field::new(&PhysicsConfig::default());
        let rod = field.rod_mut(HOME_ATTACK).unwrap();
        rod.start_kick();

        let mut ticks = 0;
        while !rod.advance_spin(0.45) {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(!rod.spinning);
        assert_eq!(rod.spin_angle, 0.0);
        assert_eq!(ticks, 13);
    }

    #[test]
    fn test_penalty_spot_sits_in_front_of_kicker() {
        let mut field = Field::new(&PhysicsConfig::default());
        field.serve_penalty(Side::Home, 22.0);
        assert_eq!(field.ball.pos, Vector::new(357.0, 250.0));

        field.serve_penalty(Side::Away, 22.0);
        assert_eq!(field.ball.pos, Vector::new(443.0, 250.0));
        assert_eq!(field.ball.speed(), 0.0);
    }
}
