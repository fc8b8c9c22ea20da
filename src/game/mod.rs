pub mod events;
pub mod field;
pub mod input;
pub mod physics;

pub use events::{GameEvent, SoundCue};
pub use field::{Ball, Field, PlayerSlot, Rod, RodRole, Side, Vector};
pub use input::{actions_for_key, key_matches, parse_key, poll_input, InputAction};
pub use physics::{step, Arena, PhysicsEvents};
