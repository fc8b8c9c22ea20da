// Notifications for the rendering and audio collaborators

use super::field::Side;
use crate::tournament::Status;

/// Short sound effects the frontend may play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Kick,
    Goal,
    Thump,
    Whistle,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The ball crossed an end line inside the goal mouth
    Goal { scorer: Side },
    /// A penalty was saved, went wide or died before reaching the line
    ShotMissed,
    Cue(SoundCue),
    /// The match state moved to a new status or mode
    StatusChanged { status: Status },
}
