// Tracking controller for the away rods

use rand::{Rng, RngCore};

use super::controller::{RodCommand, RodController};
use super::prediction::predict_ball_y;
use crate::config::AIConfig;
use crate::game::{Field, Rod, Side};

/// Drives every away rod toward where the ball is heading and kicks when a
/// figure is lined up with it
pub struct AutoController {
    config: AIConfig,
    player_reach: f32,
    player_height: f32,
}

impl AutoController {
    pub fn new(config: AIConfig, player_reach: f32, player_height: f32) -> Self {
        Self {
            config,
            player_reach,
            player_height,
        }
    }

    /// Easing fraction for a rod `distance_x` away from the ball horizontally
    fn easing_for(&self, distance_x: f32) -> f32 {
        let mut easing = self.config.move_speed;
        if distance_x < self.config.near_distance {
            easing *= self.config.near_boost;
        }
        if distance_x < self.config.close_distance {
            easing *= self.config.close_boost;
        }
        easing
    }

    /// Rod displacement that puts the figure closest to `predicted` on it
    fn target_for(&self, rod: &Rod, field: &Field, predicted: f32) -> f32 {
        let center_y = field.center_y();
        let best_offset = rod
            .players
            .iter()
            .map(|slot| (slot.offset, (predicted - rod.slot_y(slot, center_y)).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0.0, |(offset, _)| offset);

        let half = field.height / 2.0;
        (predicted - center_y - best_offset).clamp(-half, half)
    }

    fn wants_kick(&self, rod: &Rod, field: &Field, distance_x: f32) -> bool {
        if rod.spinning || distance_x >= self.player_reach + self.config.kick_margin {
            return false;
        }
        let center_y = field.center_y();
        let alignment = self.player_height * self.config.kick_alignment;
        rod.players
            .iter()
            .any(|slot| (field.ball.pos.y - rod.slot_y(slot, center_y)).abs() < alignment)
    }
}

impl RodController for AutoController {
    fn steer(&mut self, rod: &Rod, field: &Field, rng: &mut dyn RngCore) -> Option<RodCommand> {
        if rod.side != Side::Away {
            return None;
        }

        let ball = &field.ball;
        let predicted = predict_ball_y(
            ball.pos.y,
            ball.vel.y,
            self.config.lookahead_ticks,
            field.height,
        );
        let distance_x = (ball.pos.x - rod.x).abs();

        let kick = self.wants_kick(rod, field, distance_x)
            && rng.gen_bool(self.config.kick_chance.clamp(0.0, 1.0));

        Some(RodCommand {
            target_y: self.target_for(rod, field, predicted),
            easing: self.easing_for(distance_x),
            kick,
        })
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "Auto"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::game::field::{AWAY_DEFENSE, AWAY_GOALIE, AWAY_MIDFIELD, HOME_ATTACK};
    use crate::game::Vector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (AutoController, Field, StdRng) {
        let physics = PhysicsConfig::default();
        let auto = AutoController::new(AIConfig::default(), physics.player_reach, physics.player_height);
        (auto, Field::new(&physics), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_goalie_tracks_predicted_ball() {
        let (mut auto, mut field, mut rng) = setup();
        field.ball.pos = Vector::new(400.0, 250.0);
        field.ball.vel = Vector::new(0.0, 2.0);

        let rod = field.rod(AWAY_GOALIE).unwrap();
        let cmd = auto.steer(rod, &field, &mut rng).unwrap();
        // 250 + 2 * 15 = 280, single centred figure
        assert!((cmd.target_y - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_picks_nearest_figure_on_multi_player_rod() {
        let (mut auto, mut field, mut rng) = setup();
        field.ball.pos = Vector::new(100.0, 140.0);

        let rod = field.rod(AWAY_DEFENSE).unwrap();
        let cmd = auto.steer(rod, &field, &mut rng).unwrap();
        // Upper figure at 150 is closest: shift by -10
        assert!((cmd.target_y + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_easing_boosts_when_ball_is_close() {
        let (auto, _, _) = setup();
        assert!((auto.easing_for(500.0) - 0.12).abs() < 1e-6);
        assert!((auto.easing_for(150.0) - 0.24).abs() < 1e-6);
        assert!((auto.easing_for(50.0) - 0.36).abs() < 1e-6);
    }

    #[test]
    fn test_kicks_only_when_aligned_and_in_reach() {
        let (mut auto, mut field, mut rng) = setup();
        let rod_x = field.rod(AWAY_MIDFIELD).unwrap().x;

        // Lined up with the centre figure: kicks eventually
        field.ball.pos = Vector::new(rod_x - 20.0, 250.0);
        let rod = field.rod(AWAY_MIDFIELD).unwrap().clone();
        let kicked = (0..50).any(|_| auto.steer(&rod, &field, &mut rng).unwrap().kick);
        assert!(kicked);

        // Between figures: never
        field.ball.pos = Vector::new(rod_x - 20.0, 200.0);
        let kicked = (0..50).any(|_| auto.steer(&rod, &field, &mut rng).unwrap().kick);
        assert!(!kicked);

        // Out of reach: never
        field.ball.pos = Vector::new(rod_x - 80.0, 250.0);
        let kicked = (0..50).any(|_| auto.steer(&rod, &field, &mut rng).unwrap().kick);
        assert!(!kicked);
    }

    #[test]
    fn test_spinning_rod_does_not_kick_again() {
        let (mut auto, mut field, mut rng) = setup();
        let rod_x = field.rod(AWAY_MIDFIELD).unwrap().x;
        field.ball.pos = Vector::new(rod_x - 20.0, 250.0);
        field.rod_mut(AWAY_MIDFIELD).unwrap().start_kick();

        let rod = field.rod(AWAY_MIDFIELD).unwrap().clone();
        assert!((0..50).all(|_| !auto.steer(&rod, &field, &mut rng).unwrap().kick));
    }

    #[test]
    fn test_auto_ignores_home_rods() {
        let (mut auto, field, mut rng) = setup();
        let rod = field.rod(HOME_ATTACK).unwrap();
        assert!(auto.steer(rod, &field, &mut rng).is_none());
    }
}
