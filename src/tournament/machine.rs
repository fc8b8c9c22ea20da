// Transitions between match states

use rand::Rng;

use super::league::LeagueTable;
use super::roster::{Pool, Roster, Team};
use super::state::{
    Contest, Fixture, GameMode, LeagueSeason, MatchState, Scoreline, Selection, Summary,
    TimedMatch, Tournament, Verdict,
};
use crate::config::MatchRules;
use crate::game::Side;
use crate::penalty::ShootoutState;

/// Applies the rules of every competition to a `MatchState`
///
/// Each operation consumes the current state and returns its successor. An
/// operation that does not apply to the current status returns the state
/// unchanged.
#[derive(Debug, Clone)]
pub struct Referee {
    pub rules: MatchRules,
    pub roster: Roster,
}

impl Referee {
    pub fn new(rules: MatchRules, roster: Roster) -> Self {
        Self { rules, roster }
    }

    /// Begin a new contest from the menu (or after one has finished)
    pub fn start_mode(&self, state: MatchState, mode: GameMode) -> MatchState {
        if !matches!(
            state,
            MatchState::Menu | MatchState::GameOver(_) | MatchState::Victory(_)
        ) {
            tracing::debug!(status = ?state.status(), ?mode, "Ignoring mode start mid-contest");
            return state;
        }

        tracing::info!(?mode, "Starting contest");
        match mode {
            GameMode::Arcade => MatchState::Playing(Contest::Arcade {
                score: Scoreline::default(),
                ball: 1,
            }),
            GameMode::Penalties => MatchState::Playing(Contest::Penalties {
                shootout: ShootoutState::new(self.rules.regulation_penalties),
                resume: None,
            }),
            GameMode::WorldCup => MatchState::TeamSelect(Selection::WorldCup),
            GameMode::League => MatchState::TeamSelect(Selection::League),
        }
    }

    /// Pick the human's team and draw the first opponent
    pub fn select_team(&self, state: MatchState, team_id: &str, rng: &mut impl Rng) -> MatchState {
        let MatchState::TeamSelect(selection) = state else {
            tracing::debug!(status = ?state.status(), "Ignoring team selection");
            return state;
        };

        let pool = selection.pool();
        let Some(team) = self.roster.find(pool, team_id).cloned() else {
            tracing::debug!(team_id, "Unknown team");
            return MatchState::TeamSelect(selection);
        };
        let Some(opponent) = self.roster.draw_opponent(pool, &[team.id.as_str()], rng) else {
            tracing::warn!(?pool, "No opponents available");
            return MatchState::TeamSelect(selection);
        };

        tracing::info!(team = %team.name, opponent = %opponent.name, "Team selected");
        let fixture = Fixture {
            home: team,
            away: opponent,
        };
        match selection {
            Selection::WorldCup => MatchState::Playing(Contest::WorldCup {
                tournament: Tournament { fixture, round: 0 },
                play: TimedMatch::new(self.rules.match_seconds),
            }),
            Selection::League => {
                let faced = vec![fixture.away.id.clone()];
                MatchState::LeagueTable(LeagueSeason {
                    fixture,
                    table: LeagueTable::new(self.roster.pool(Pool::League)),
                    faced,
                })
            }
        }
    }

    /// Leave an interstitial: the next match kicks off, or a finished contest
    /// returns to the menu
    pub fn proceed(&self, state: MatchState) -> MatchState {
        match state {
            MatchState::NextLevel(tournament) => MatchState::Playing(Contest::WorldCup {
                tournament,
                play: TimedMatch::new(self.rules.match_seconds),
            }),
            MatchState::LeagueTable(season) => MatchState::Playing(Contest::League {
                season,
                play: TimedMatch::new(self.rules.match_seconds),
            }),
            MatchState::GameOver(_) | MatchState::Victory(_) => MatchState::Menu,
            other => {
                tracing::debug!(status = ?other.status(), "Nothing to proceed from");
                other
            }
        }
    }

    /// Drop whatever is in progress
    pub fn abandon(&self, state: MatchState) -> MatchState {
        tracing::debug!(status = ?state.status(), "Abandoning to menu");
        MatchState::Menu
    }

    /// Apply an open-play goal
    pub fn on_goal(&self, state: MatchState, scorer: Side) -> MatchState {
        let contest = match state {
            MatchState::Playing(contest) => contest,
            other => {
                tracing::debug!(status = ?other.status(), "Goal outside of play");
                return other;
            }
        };

        match contest {
            Contest::Arcade { mut score, ball } => {
                score.add(scorer);
                if ball >= self.rules.arcade_balls {
                    let verdict = score.verdict();
                    tracing::info!(?verdict, home = score.home, away = score.away, "Arcade match over");
                    MatchState::GameOver(Summary::new(GameMode::Arcade, verdict, score))
                } else {
                    MatchState::Playing(Contest::Arcade {
                        score,
                        ball: ball + 1,
                    })
                }
            }
            Contest::WorldCup { tournament, mut play } => {
                play.score.add(scorer);
                MatchState::Playing(Contest::WorldCup { tournament, play })
            }
            Contest::League { season, mut play } => {
                play.score.add(scorer);
                MatchState::Playing(Contest::League { season, play })
            }
            penalties @ Contest::Penalties { .. } => {
                tracing::debug!("Open-play goal during a shootout ignored");
                MatchState::Playing(penalties)
            }
        }
    }

    /// One second of match clock. At zero the match is decided on the next tick.
    pub fn clock_tick(&self, state: MatchState, rng: &mut impl Rng) -> MatchState {
        match state {
            MatchState::Playing(Contest::WorldCup { tournament, play }) => {
                if play.time_left == 0 {
                    self.end_world_cup_match(tournament, play.score, rng)
                } else {
                    MatchState::Playing(Contest::WorldCup {
                        tournament,
                        play: TimedMatch {
                            time_left: play.time_left - 1,
                            ..play
                        },
                    })
                }
            }
            MatchState::Playing(Contest::League { season, play }) => {
                if play.time_left == 0 {
                    self.end_league_match(season, play.score, rng)
                } else {
                    MatchState::Playing(Contest::League {
                        season,
                        play: TimedMatch {
                            time_left: play.time_left - 1,
                            ..play
                        },
                    })
                }
            }
            other => other,
        }
    }

    /// Record the shot just taken in a shootout
    pub fn record_penalty(&self, state: MatchState, scored: bool, rng: &mut impl Rng) -> MatchState {
        let MatchState::Playing(Contest::Penalties {
            mut shootout,
            resume,
        }) = state
        else {
            tracing::debug!(status = ?state.status(), "No shootout to record into");
            return state;
        };

        if !shootout.record(scored) {
            tracing::debug!("Shootout already decided");
        }

        let Some(winner) = shootout.winner else {
            return MatchState::Playing(Contest::Penalties { shootout, resume });
        };

        tracing::info!(?winner, home = shootout.score.home, away = shootout.score.away, "Shootout decided");
        match resume {
            None => {
                let mut summary = Summary::new(GameMode::Penalties, winner.into(), shootout.score);
                summary.shootout = Some(shootout);
                MatchState::GameOver(summary)
            }
            Some(tournament) => match winner {
                Side::Home => self.advance(tournament, shootout.score, Some(shootout), rng),
                Side::Away => {
                    let mut summary = Summary::new(GameMode::WorldCup, Verdict::Away, shootout.score);
                    summary.round = Some(tournament.round);
                    summary.fixture = Some(tournament.fixture);
                    summary.shootout = Some(shootout);
                    MatchState::GameOver(summary)
                }
            },
        }
    }

    fn end_world_cup_match(&self, tournament: Tournament, score: Scoreline, rng: &mut impl Rng) -> MatchState {
        let verdict = score.verdict();
        tracing::info!(round = tournament.round, ?verdict, home = score.home, away = score.away, "World cup match over");
        match verdict {
            Verdict::Home => self.advance(tournament, score, None, rng),
            Verdict::Draw => MatchState::Playing(Contest::Penalties {
                shootout: ShootoutState::new(self.rules.regulation_penalties),
                resume: Some(tournament),
            }),
            Verdict::Away => {
                let mut summary = Summary::new(GameMode::WorldCup, Verdict::Away, score);
                summary.round = Some(tournament.round);
                summary.fixture = Some(tournament.fixture);
                MatchState::GameOver(summary)
            }
        }
    }

    /// The human won a world cup tie: lift the trophy or move to the next round
    fn advance(
        &self,
        tournament: Tournament,
        score: Scoreline,
        shootout: Option<ShootoutState>,
        rng: &mut impl Rng,
    ) -> MatchState {
        if tournament.round >= self.rules.final_round {
            let mut summary = Summary::new(GameMode::WorldCup, Verdict::Home, score);
            summary.round = Some(tournament.round);
            summary.fixture = Some(tournament.fixture);
            summary.shootout = shootout;
            return MatchState::Victory(summary);
        }

        let Fixture { home, away } = tournament.fixture;
        let next = self.next_opponent(Pool::WorldCup, &[home.id.as_str(), away.id.as_str()], &away, rng);
        tracing::debug!(round = tournament.round + 1, opponent = %next.name, "Advancing");
        MatchState::NextLevel(Tournament {
            fixture: Fixture { home, away: next },
            round: tournament.round + 1,
        })
    }

    fn end_league_match(&self, season: LeagueSeason, score: Scoreline, rng: &mut impl Rng) -> MatchState {
        let LeagueSeason {
            fixture,
            mut table,
            mut faced,
        } = season;
        let (home_id, away_id) = (fixture.home.id.as_str(), fixture.away.id.as_str());

        table.record_match(home_id, away_id, score.home, score.away);
        table.simulate_round(&[home_id, away_id], rng);
        table.sort();

        let played = table.get(home_id).map_or(0, |row| row.played);
        tracing::info!(played, home = score.home, away = score.away, "League match over");

        if played >= self.rules.season_matches {
            let mut summary = Summary::new(GameMode::League, Verdict::Home, score);
            summary.fixture = Some(fixture);
            summary.table = Some(table);
            return MatchState::Victory(summary);
        }

        let pool = self.roster.pool(Pool::League);
        let unfaced = pool
            .iter()
            .any(|team| team.id != home_id && !faced.contains(&team.id));
        if !unfaced {
            tracing::debug!("Every opponent faced, starting a new cycle");
            faced.clear();
        }

        let mut exclude: Vec<&str> = faced.iter().map(String::as_str).collect();
        exclude.push(home_id);
        if faced.is_empty() {
            // Avoid an immediate rematch when the cycle restarts
            exclude.push(away_id);
        }
        let next = self.next_opponent(Pool::League, &exclude, &fixture.away, rng);
        faced.push(next.id.clone());

        MatchState::LeagueTable(LeagueSeason {
            fixture: Fixture {
                home: fixture.home,
                away: next,
            },
            table,
            faced,
        })
    }

    fn next_opponent(&self, pool: Pool, exclude: &[&str], current: &Team, rng: &mut impl Rng) -> Team {
        self.roster
            .draw_opponent(pool, exclude, rng)
            .unwrap_or_else(|| current.clone())
    }
}

impl Default for Referee {
    fn default() -> Self {
        Self::new(MatchRules::default(), Roster::default())
    }
}
