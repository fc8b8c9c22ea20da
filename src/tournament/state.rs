// Match state: one tagged value per status, replaced wholesale on every transition

use serde::{Deserialize, Serialize};

use super::league::LeagueTable;
use super::roster::{Pool, Team};
use crate::game::Side;
use crate::penalty::ShootoutState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Arcade,
    WorldCup,
    League,
    Penalties,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Arcade => "Arcade",
            GameMode::WorldCup => "World Cup",
            GameMode::League => "League",
            GameMode::Penalties => "Penalties",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Menu,
    TeamSelect,
    NextLevel,
    Playing,
    GameOver,
    Victory,
    LeagueTable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
}

impl Scoreline {
    pub fn add(&mut self, side: Side) {
        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.home > self.away {
            Verdict::Home
        } else if self.away > self.home {
            Verdict::Away
        } else {
            Verdict::Draw
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Home,
    Away,
    Draw,
}

impl From<Side> for Verdict {
    fn from(side: Side) -> Self {
        match side {
            Side::Home => Verdict::Home,
            Side::Away => Verdict::Away,
        }
    }
}

/// The human's team against the opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub fixture: Fixture,
    /// 0 qualifiers, then quarters, semis and the final
    pub round: u8,
}

impl Tournament {
    pub fn round_name(&self) -> &'static str {
        round_name(self.round)
    }
}

pub fn round_name(round: u8) -> &'static str {
    match round {
        0 => "Qualifiers",
        1 => "Quarter-final",
        2 => "Semi-final",
        _ => "Final",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSeason {
    /// The next (or current) match
    pub fixture: Fixture,
    pub table: LeagueTable,
    /// Opponents already drawn this cycle
    pub faced: Vec<String>,
}

/// Score and clock of a world cup or league match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedMatch {
    pub score: Scoreline,
    /// Seconds remaining
    pub time_left: u32,
}

impl TimedMatch {
    pub fn new(seconds: u32) -> Self {
        Self {
            score: Scoreline::default(),
            time_left: seconds,
        }
    }
}

/// A match in progress, by mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Contest {
    Arcade {
        score: Scoreline,
        /// 1-based number of the ball in play
        ball: u32,
    },
    WorldCup {
        tournament: Tournament,
        play: TimedMatch,
    },
    League {
        season: LeagueSeason,
        play: TimedMatch,
    },
    /// A shootout; `resume` holds the tournament to return to when it broke a
    /// world cup tie
    Penalties {
        shootout: ShootoutState,
        resume: Option<Tournament>,
    },
}

impl Contest {
    pub fn mode(&self) -> GameMode {
        match self {
            Contest::Arcade { .. } => GameMode::Arcade,
            Contest::WorldCup { .. } => GameMode::WorldCup,
            Contest::League { .. } => GameMode::League,
            Contest::Penalties { .. } => GameMode::Penalties,
        }
    }

    pub fn score(&self) -> Scoreline {
        match self {
            Contest::Arcade { score, .. } => *score,
            Contest::WorldCup { play, .. } | Contest::League { play, .. } => play.score,
            Contest::Penalties { shootout, .. } => shootout.score,
        }
    }

    pub fn fixture(&self) -> Option<&Fixture> {
        match self {
            Contest::Arcade { .. } => None,
            Contest::WorldCup { tournament, .. } => Some(&tournament.fixture),
            Contest::League { season, .. } => Some(&season.fixture),
            Contest::Penalties { resume, .. } => resume.as_ref().map(|t| &t.fixture),
        }
    }
}

/// Competition a team list is being offered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    WorldCup,
    League,
}

impl Selection {
    pub fn mode(self) -> GameMode {
        match self {
            Selection::WorldCup => GameMode::WorldCup,
            Selection::League => GameMode::League,
        }
    }

    pub fn pool(self) -> Pool {
        match self {
            Selection::WorldCup => Pool::WorldCup,
            Selection::League => Pool::League,
        }
    }
}

/// How a contest finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mode: GameMode,
    pub verdict: Verdict,
    pub score: Scoreline,
    pub fixture: Option<Fixture>,
    pub round: Option<u8>,
    pub table: Option<LeagueTable>,
    pub shootout: Option<ShootoutState>,
}

impl Summary {
    pub fn new(mode: GameMode, verdict: Verdict, score: Scoreline) -> Self {
        Self {
            mode,
            verdict,
            score,
            fixture: None,
            round: None,
            table: None,
            shootout: None,
        }
    }

    /// The human's finishing place in a league
    pub fn league_position(&self) -> Option<usize> {
        let table = self.table.as_ref()?;
        let fixture = self.fixture.as_ref()?;
        table.position(&fixture.home.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data")]
pub enum MatchState {
    #[default]
    Menu,
    TeamSelect(Selection),
    Playing(Contest),
    /// Between world cup rounds; the tournament already holds the next fixture
    NextLevel(Tournament),
    /// Standings between league matches
    LeagueTable(LeagueSeason),
    GameOver(Summary),
    Victory(Summary),
}

impl MatchState {
    pub fn status(&self) -> Status {
        match self {
            MatchState::Menu => Status::Menu,
            MatchState::TeamSelect(_) => Status::TeamSelect,
            MatchState::Playing(_) => Status::Playing,
            MatchState::NextLevel(_) => Status::NextLevel,
            MatchState::LeagueTable(_) => Status::LeagueTable,
            MatchState::GameOver(_) => Status::GameOver,
            MatchState::Victory(_) => Status::Victory,
        }
    }

    /// The competition being played; `None` only on the menu
    pub fn mode(&self) -> Option<GameMode> {
        match self {
            MatchState::Menu => None,
            MatchState::TeamSelect(selection) => Some(selection.mode()),
            MatchState::Playing(contest) => Some(contest.mode()),
            MatchState::NextLevel(_) => Some(GameMode::WorldCup),
            MatchState::LeagueTable(_) => Some(GameMode::League),
            MatchState::GameOver(summary) | MatchState::Victory(summary) => Some(summary.mode),
        }
    }

    /// Mode a running shootout will hand back to
    pub fn previous_mode(&self) -> Option<GameMode> {
        match self {
            MatchState::Playing(Contest::Penalties {
                resume: Some(_), ..
            }) => Some(GameMode::WorldCup),
            _ => None,
        }
    }

    /// Whether this state is worth persisting and can be resumed later
    pub fn is_resumable(&self) -> bool {
        matches!(
            self,
            MatchState::Playing(_) | MatchState::NextLevel(_) | MatchState::LeagueTable(_)
        )
    }

    /// The one-second match clock only runs during timed matches
    pub fn clock_runs(&self) -> bool {
        matches!(
            self,
            MatchState::Playing(Contest::WorldCup { .. }) | MatchState::Playing(Contest::League { .. })
        )
    }

    pub fn contest(&self) -> Option<&Contest> {
        match self {
            MatchState::Playing(contest) => Some(contest),
            _ => None,
        }
    }

    pub fn fixture(&self) -> Option<&Fixture> {
        match self {
            MatchState::Playing(contest) => contest.fixture(),
            MatchState::NextLevel(tournament) => Some(&tournament.fixture),
            MatchState::LeagueTable(season) => Some(&season.fixture),
            MatchState::GameOver(summary) | MatchState::Victory(summary) => summary.fixture.as_ref(),
            MatchState::Menu | MatchState::TeamSelect(_) => None,
        }
    }
}
