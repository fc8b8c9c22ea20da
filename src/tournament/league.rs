use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::roster::Team;

// Goals per side in a simulated match are drawn from 0..=MAX_SIMULATED_GOALS
const MAX_SIMULATED_GOALS: u32 = 3;

/// One team's row in the standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueStats {
    pub team: Team,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl LeagueStats {
    pub fn new(team: Team) -> Self {
        Self {
            team,
            points: 0,
            goals_for: 0,
            goals_against: 0,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        if scored > conceded {
            self.wins += 1;
            self.points += 3;
        } else if scored == conceded {
            self.draws += 1;
            self.points += 1;
        } else {
            self.losses += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueTable {
    pub rows: Vec<LeagueStats>,
}

impl LeagueTable {
    pub fn new(teams: &[Team]) -> Self {
        Self {
            rows: teams.iter().cloned().map(LeagueStats::new).collect(),
        }
    }

    pub fn get(&self, team_id: &str) -> Option<&LeagueStats> {
        self.rows.iter().find(|row| row.team.id == team_id)
    }

    /// Fold one team's result into its row; unknown ids are ignored
    pub fn record(&mut self, team_id: &str, scored: u32, conceded: u32) {
        match self.rows.iter_mut().find(|row| row.team.id == team_id) {
            Some(row) => row.record(scored, conceded),
            None => tracing::warn!(team_id, "Result for a team not in the league"),
        }
    }

    /// Record both sides of a match
    pub fn record_match(&mut self, home: &str, away: &str, home_goals: u32, away_goals: u32) {
        self.record(home, home_goals, away_goals);
        self.record(away, away_goals, home_goals);
    }

    /// Points, then goal difference, then goals scored; ties keep their order
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
                .then_with(|| b.goals_for.cmp(&a.goals_for))
        });
    }

    /// 1-based standing of a team
    pub fn position(&self, team_id: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.team.id == team_id)
            .map(|index| index + 1)
    }

    /// Play out the rest of the round: every team not in `exclude` is shuffled,
    /// paired off in order and given a random scoreline. An odd team out sits
    /// the round out.
    pub fn simulate_round(&mut self, exclude: &[&str], rng: &mut impl Rng) {
        let mut ids: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.team.id.clone())
            .filter(|id| !exclude.contains(&id.as_str()))
            .collect();
        ids.shuffle(rng);

        for pair in ids.chunks_exact(2) {
            let home_goals = rng.gen_range(0..=MAX_SIMULATED_GOALS);
            let away_goals = rng.gen_range(0..=MAX_SIMULATED_GOALS);
            self.record_match(&pair[0], &pair[1], home_goals, away_goals);
        }
    }
}
