// Controller trait for driving rods

use rand::RngCore;

use crate::game::{Field, Rod, RodRole, Side};

/// What a controller wants a rod to do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodCommand {
    /// Displacement from the centre line the rod should ease toward
    pub target_y: f32,
    /// Fraction of the remaining gap closed per tick
    pub easing: f32,
    /// Start a kick sweep
    pub kick: bool,
}

impl RodCommand {
    /// Write the command into the rod; the physics step does the moving
    pub fn apply(&self, rod: &mut Rod) {
        rod.target_y = self.target_y;
        rod.easing = self.easing;
        if self.kick && !rod.spinning {
            rod.start_kick();
        }
    }
}

/// Trait for rod controllers
///
/// A controller is asked once per tick for each rod it owns and answers with a
/// target; it never moves the rod itself.
pub trait RodController {
    /// Decide the command for `rod` this tick
    ///
    /// # Returns
    /// * `Some(RodCommand)` - New target for the rod
    /// * `None` - The controller does not drive this rod
    fn steer(&mut self, rod: &Rod, field: &Field, rng: &mut dyn RngCore) -> Option<RodCommand>;

    /// Reset internal state (called when a new point is served)
    fn reset(&mut self);

    /// Controller name for debugging/display
    fn name(&self) -> &str;
}

/// The two stick groups a human player holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Goalie and defense rods
    Defense,
    /// Midfield and attack rods
    Attack,
}

impl Axis {
    pub fn for_role(role: RodRole) -> Axis {
        match role {
            RodRole::Goalie | RodRole::Defense => Axis::Defense,
            RodRole::Midfield | RodRole::Attack => Axis::Attack,
        }
    }
}

/// Maps normalised stick input onto the home rods
pub struct ManualController {
    defense: Option<f32>,
    attack: Option<f32>,
    travel: f32,
    easing: f32,
}

impl ManualController {
    pub fn new(travel: f32, easing: f32) -> Self {
        Self {
            defense: None,
            attack: None,
            travel,
            easing,
        }
    }

    /// Set an axis to a value in [-1, 1], or release it with `None`
    pub fn set_axis(&mut self, axis: Axis, value: Option<f32>) {
        let value = value.map(|v| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 });
        match axis {
            Axis::Defense => self.defense = value,
            Axis::Attack => self.attack = value,
        }
    }

    pub fn axis(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Defense => self.defense,
            Axis::Attack => self.attack,
        }
    }
}

impl RodController for ManualController {
    fn steer(&mut self, rod: &Rod, _field: &Field, _rng: &mut dyn RngCore) -> Option<RodCommand> {
        if rod.side != Side::Home {
            return None;
        }

        // A released stick drifts back to the centre
        let value = self.axis(Axis::for_role(rod.role)).unwrap_or(0.0);
        Some(RodCommand {
            target_y: value * self.travel,
            easing: self.easing,
            kick: false,
        })
    }

    fn reset(&mut self) {
        self.defense = None;
        self.attack = None;
    }

    fn name(&self) -> &str {
        "Manual"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::game::field::{AWAY_MIDFIELD, HOME_DEFENSE, HOME_MIDFIELD};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_axis_maps_linearly_onto_travel() {
        let physics = PhysicsConfig::default();
        let field = Field::new(&physics);
        let mut rng = StdRng::seed_from_u64(1);
        let mut manual = ManualController::new(physics.rod_travel(), physics.manual_easing);

        manual.set_axis(Axis::Attack, Some(0.5));
        let cmd = manual
            .steer(field.rod(HOME_MIDFIELD).unwrap(), &field, &mut rng)
            .unwrap();
        assert_eq!(cmd.target_y, 110.0);
        assert_eq!(cmd.easing, 0.5);

        // Defense axis untouched: centred
        let cmd = manual
            .steer(field.rod(HOME_DEFENSE).unwrap(), &field, &mut rng)
            .unwrap();
        assert_eq!(cmd.target_y, 0.0);
    }

    #[test]
    fn test_input_is_clamped_and_release_recentres() {
        let mut manual = ManualController::new(220.0, 0.5);
        manual.set_axis(Axis::Defense, Some(3.0));
        assert_eq!(manual.axis(Axis::Defense), Some(1.0));

        manual.set_axis(Axis::Defense, None);
        assert_eq!(manual.axis(Axis::Defense), None);
    }

    #[test]
    fn test_manual_ignores_away_rods() {
        let physics = PhysicsConfig::default();
        let field = Field::new(&physics);
        let mut rng = StdRng::seed_from_u64(1);
        let mut manual = ManualController::new(220.0, 0.5);
        assert!(manual
            .steer(field.rod(AWAY_MIDFIELD).unwrap(), &field, &mut rng)
            .is_none());
    }
}
