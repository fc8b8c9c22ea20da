//! Table foosball: rod physics, automatic opponents, penalty shootouts and the
//! arcade, world cup and league competitions around them.

pub mod ai;
pub mod config;
pub mod game;
pub mod penalty;
pub mod save;
pub mod session;
pub mod tournament;
