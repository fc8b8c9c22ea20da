// Competitions: roster, league standings, match state and its transitions

mod league;
mod machine;
mod roster;
mod state;

pub use league::{LeagueStats, LeagueTable};
pub use machine::Referee;
pub use roster::{Pool, Roster, Team};
pub use state::{
    round_name, Contest, Fixture, GameMode, LeagueSeason, MatchState, Scoreline, Selection,
    Status, Summary, TimedMatch, Tournament, Verdict,
};
