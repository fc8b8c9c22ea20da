use serde::{Deserialize, Serialize};

use crate::game::Side;
use crate::tournament::Scoreline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Pending,
    Goal,
    Miss,
}

/// Kick-by-kick record of a shootout
///
/// Each side's history starts as `regulation` pending slots filled left to
/// right; sudden-death kicks are appended after them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootoutState {
    pub turn: Side,
    pub home: Vec<ShotOutcome>,
    pub away: Vec<ShotOutcome>,
    pub home_taken: usize,
    pub away_taken: usize,
    pub score: Scoreline,
    pub winner: Option<Side>,
    pub regulation: usize,
}

impl ShootoutState {
    /// Home kicks first
    pub fn new(regulation: usize) -> Self {
        Self {
            turn: Side::Home,
            home: vec![ShotOutcome::Pending; regulation],
            away: vec![ShotOutcome::Pending; regulation],
            home_taken: 0,
            away_taken: 0,
            score: Scoreline::default(),
            winner: None,
            regulation,
        }
    }

    pub fn history(&self, side: Side) -> &[ShotOutcome] {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn taken(&self, side: Side) -> usize {
        match side {
            Side::Home => self.home_taken,
            Side::Away => self.away_taken,
        }
    }

    pub fn is_sudden_death(&self) -> bool {
        self.taken(Side::Home) >= self.regulation && self.taken(Side::Away) >= self.regulation
    }

    /// Record the current kicker's shot and hand the turn over.
    ///
    /// Returns false (and changes nothing) once a winner is already set.
    pub fn record(&mut self, scored: bool) -> bool {
        if self.winner.is_some() {
            return false;
        }

        let outcome = if scored {
            ShotOutcome::Goal
        } else {
            ShotOutcome::Miss
        };
        let (history, taken) = match self.turn {
            Side::Home => (&mut self.home, &mut self.home_taken),
            Side::Away => (&mut self.away, &mut self.away_taken),
        };
        if *taken < history.len() {
            history[*taken] = outcome;
        } else {
            history.push(outcome);
        }
        *taken += 1;

        if scored {
            self.score.add(self.turn);
        }
        self.turn = self.turn.opponent();
        self.winner = self.decide();
        true
    }

    fn decide(&self) -> Option<Side> {
        let (home, away) = (self.score.home as usize, self.score.away as usize);

        if !self.is_sudden_death() {
            // A lead the other side can no longer catch with its remaining kicks
            let home_left = self.regulation.saturating_sub(self.taken(Side::Home));
            let away_left = self.regulation.saturating_sub(self.taken(Side::Away));
            if home > away + away_left {
                return Some(Side::Home);
            }
            if away > home + home_left {
                return Some(Side::Away);
            }
            return None;
        }

        // Level on kicks after regulation: any difference decides it
        if self.taken(Side::Home) == self.taken(Side::Away) && home != away {
            return Some(if home > away { Side::Home } else { Side::Away });
        }
        None
    }
}
