// Penalty shootout: the per-kick engine and the running record

mod engine;
mod shootout;

pub use engine::{PenaltyEngine, PenaltyPhase, ShotDirection, ShotPower};
pub use shootout::{ShootoutState, ShotOutcome};
