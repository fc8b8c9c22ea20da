// The single writer: owns the match state, the table and every timer

mod scheduler;

pub use scheduler::{Scheduler, TimerKind};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::{AutoController, Axis, ManualController, RodController};
use crate::config::Config;
use crate::game::field::{HOME_ATTACK, HOME_DEFENSE, HOME_GOALIE, HOME_MIDFIELD};
use crate::game::{step, Arena, Field, GameEvent, Side, SoundCue};
use crate::penalty::{PenaltyEngine, PenaltyPhase, ShotDirection, ShotPower};
use crate::save::SaveError;
use crate::tournament::{Contest, GameMode, MatchState, Referee, Roster};

/// Everything the frontend can ask for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Defense stick in [-1, 1]; `None` releases it
    MoveDefense(Option<f32>),
    /// Attack stick in [-1, 1]; `None` releases it
    MoveAttack(Option<f32>),
    KickDefense,
    KickAttack,
    Aim(ShotDirection),
    Power(ShotPower),
    Shoot,
    StartMode(GameMode),
    SelectTeam(String),
    Proceed,
    Abandon,
}

pub struct Session {
    config: Config,
    referee: Referee,
    state: MatchState,
    field: Field,
    manual: ManualController,
    auto: AutoController,
    penalty: Option<PenaltyEngine>,
    scheduler: Scheduler,
    // Goal signalled by physics, waiting out the goal pause
    pending_goal: Option<Side>,
    rng: StdRng,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic session for tests and replays of a seed
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: StdRng) -> Self {
        let physics = &config.physics;
        let field = Field::new(physics);
        let manual = ManualController::new(physics.rod_travel(), physics.manual_easing);
        let auto = AutoController::new(config.ai.clone(), physics.player_reach, physics.player_height);
        let referee = Referee::new(config.rules.clone(), Roster::default());

        Self {
            config,
            referee,
            state: MatchState::Menu,
            field,
            manual,
            auto,
            penalty: None,
            scheduler: Scheduler::new(),
            pending_goal: None,
            rng,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.referee.roster
    }

    pub fn penalty(&self) -> Option<&PenaltyEngine> {
        self.penalty.as_ref()
    }

    /// Side whose goal is being celebrated before it counts
    pub fn pending_goal(&self) -> Option<Side> {
        self.pending_goal
    }

    pub fn axis(&self, axis: Axis) -> Option<f32> {
        self.manual.axis(axis)
    }

    /// Continue a saved match. Only resumable states are accepted; the table is
    /// set up fresh.
    pub fn resume(&mut self, state: MatchState) -> Result<Vec<GameEvent>, SaveError> {
        if !state.is_resumable() {
            tracing::warn!(status = ?state.status(), "Refusing to resume");
            return Err(SaveError::NotResumable(state.status()));
        }
        tracing::info!(status = ?state.status(), mode = ?state.mode(), "Resuming saved match");
        let mut events = Vec::new();
        self.install(state, &mut events);
        Ok(events)
    }

    pub fn handle(&mut self, command: Command) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match command {
            Command::MoveDefense(value) => self.manual.set_axis(Axis::Defense, value),
            Command::MoveAttack(value) => self.manual.set_axis(Axis::Attack, value),
            Command::KickDefense => self.manual_kick(&[HOME_GOALIE, HOME_DEFENSE]),
            Command::KickAttack => self.manual_kick(&[HOME_MIDFIELD, HOME_ATTACK]),
            Command::Aim(direction) => {
                if let Some(engine) = self.penalty.as_mut() {
                    engine.select_direction(direction);
                }
            }
            Command::Power(power) => {
                if let Some(engine) = self.penalty.as_mut() {
                    engine.select_power(power);
                }
            }
            Command::Shoot => self.shoot(&mut events),
            Command::StartMode(mode) => {
                self.transition(&mut events, |referee, state, _| referee.start_mode(state, mode));
            }
            Command::SelectTeam(team_id) => {
                self.transition(&mut events, |referee, state, rng| {
                    referee.select_team(state, &team_id, rng)
                });
            }
            Command::Proceed => {
                self.transition(&mut events, |referee, state, _| referee.proceed(state));
            }
            Command::Abandon => {
                self.transition(&mut events, |referee, state, _| referee.abandon(state));
            }
        }
        events
    }

    /// Fixed-rate driver: timers, controllers and one physics step
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for fired in self.scheduler.advance() {
            self.on_timer(fired, &mut events);
        }

        match &self.state {
            MatchState::Playing(Contest::Penalties { .. }) => self.tick_shootout(&mut events),
            MatchState::Playing(_) => self.tick_open_play(&mut events),
            _ => {}
        }
        events
    }

    /// One-second driver for the match clock
    pub fn clock_tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.scheduler.clock_armed() {
            return events;
        }
        // A goal still in its pause counts before the final whistle is evaluated
        if clock_expired(&self.state) {
            if let Some(scorer) = self.pending_goal.take() {
                self.scheduler.cancel(TimerKind::GoalPause);
                tracing::debug!(?scorer, "Goal settled at full time");
                self.transition(&mut events, |referee, state, _| referee.on_goal(state, scorer));
            }
        }
        self.transition(&mut events, |referee, state, rng| referee.clock_tick(state, rng));
        events
    }

    /// Run one referee operation on the live state. Returns true when status or
    /// mode changed, in which case timers are re-armed and the table is set up
    /// for the new state.
    fn transition<F>(&mut self, events: &mut Vec<GameEvent>, apply: F) -> bool
    where
        F: FnOnce(&Referee, MatchState, &mut StdRng) -> MatchState,
    {
        let before = (self.state.status(), self.state.mode());
        let current = std::mem::take(&mut self.state);
        let next = apply(&self.referee, current, &mut self.rng);

        if (next.status(), next.mode()) == before {
            self.state = next;
            return false;
        }
        tracing::debug!(
            from = ?before.0,
            to = ?next.status(),
            mode = ?next.mode(),
            previous_mode = ?next.previous_mode(),
            "Match state transition"
        );
        self.install(next, events);
        true
    }

    fn install(&mut self, next: MatchState, events: &mut Vec<GameEvent>) {
        self.state = next;
        self.scheduler.arm(&self.state);
        self.pending_goal = None;
        self.penalty = None;

        events.push(GameEvent::StatusChanged {
            status: self.state.status(),
        });

        if let MatchState::Playing(contest) = &self.state {
            let (home, away) = match contest.fixture() {
                Some(fixture) => (fixture.home.primary_rgb(), fixture.away.primary_rgb()),
                None => (self.config.display.home_color, self.config.display.away_color),
            };
            self.field.paint(home, away);
            self.manual.reset();
            self.auto.reset();

            if let Contest::Penalties { shootout, .. } = contest {
                let kicker = shootout.turn;
                self.setup_kick(kicker);
            } else {
                self.field.serve_center();
            }
            events.push(GameEvent::Cue(SoundCue::Whistle));
        }
    }

    fn manual_kick(&mut self, rods: &[usize]) {
        let open_play = matches!(self.state, MatchState::Playing(ref contest) if contest.mode() != GameMode::Penalties);
        if open_play && self.pending_goal.is_none() {
            self.field.kick(rods);
        }
    }

    fn shoot(&mut self, events: &mut Vec<GameEvent>) {
        let Some(engine) = self.penalty.as_mut() else {
            return;
        };
        if !engine.lock() {
            return;
        }
        let delay = match engine.kicker {
            Side::Home => self.config.rules.human_kick_delay_ticks,
            Side::Away => self.config.rules.ai_kick_delay_ticks,
        };
        self.scheduler.cancel(TimerKind::KeeperShuffle);
        self.scheduler.schedule(TimerKind::KickWindup, delay);
        events.push(GameEvent::Cue(SoundCue::Whistle));
    }

    fn setup_kick(&mut self, kicker: Side) {
        self.field.serve_penalty(kicker, self.config.physics.player_reach);
        self.penalty = Some(PenaltyEngine::new(kicker));
        if kicker == Side::Home {
            self.scheduler
                .repeat(TimerKind::KeeperShuffle, self.config.rules.keeper_shuffle_ticks);
        }
    }

    fn on_timer(&mut self, fired: TimerKind, events: &mut Vec<GameEvent>) {
        match fired {
            TimerKind::GoalPause => {
                let Some(scorer) = self.pending_goal.take() else {
                    return;
                };
                let changed = self.transition(events, |referee, state, _| referee.on_goal(state, scorer));
                if !changed && matches!(self.state, MatchState::Playing(_)) {
                    self.field.serve_center();
                }
            }
            TimerKind::KeeperShuffle => {
                if let Some(engine) = self.penalty.as_mut() {
                    engine.shuffle_keeper(&mut self.rng);
                }
            }
            TimerKind::KickWindup => {
                if let Some(engine) = self.penalty.as_mut() {
                    engine.execute(&mut self.field, &self.config.physics, &mut self.rng);
                    events.push(GameEvent::Cue(SoundCue::Kick));
                }
            }
            TimerKind::Celebration => {
                let Some(scored) = self.penalty.as_ref().and_then(|engine| engine.outcome) else {
                    return;
                };
                let changed = self.transition(events, |referee, state, rng| {
                    referee.record_penalty(state, scored, rng)
                });
                if !changed {
                    if let MatchState::Playing(Contest::Penalties { shootout, .. }) = &self.state {
                        let kicker = shootout.turn;
                        self.setup_kick(kicker);
                    }
                }
            }
        }
    }

    fn tick_open_play(&mut self, events: &mut Vec<GameEvent>) {
        if self.pending_goal.is_some() {
            return;
        }

        for index in 0..self.field.rods.len() {
            let rod = &self.field.rods[index];
            let command = match rod.side {
                Side::Home => self.manual.steer(rod, &self.field, &mut self.rng),
                Side::Away => self.auto.steer(rod, &self.field, &mut self.rng),
            };
            if let Some(command) = command {
                command.apply(&mut self.field.rods[index]);
            }
        }

        let result = step(&mut self.field, Arena::Open, &self.config.physics, &mut self.rng);
        events.extend(result.to_game_events());

        if let Some(scorer) = result.goal {
            tracing::debug!(?scorer, "Goal signalled");
            self.pending_goal = Some(scorer);
            self.scheduler
                .schedule(TimerKind::GoalPause, self.config.rules.goal_pause_ticks);
        }
    }

    fn tick_shootout(&mut self, events: &mut Vec<GameEvent>) {
        let Some(engine) = self.penalty.as_mut() else {
            return;
        };
        if engine.phase != PenaltyPhase::Kicking {
            return;
        }

        let result = step(&mut self.field, engine.arena(), &self.config.physics, &mut self.rng);
        events.extend(result.to_game_events());

        if result.decided() && engine.conclude(result.goal.is_some()) {
            tracing::debug!(kicker = ?engine.kicker, scored = result.goal.is_some(), "Penalty decided");
            self.scheduler
                .schedule(TimerKind::Celebration, self.config.rules.celebration_ticks);
        }
    }
}

fn clock_expired(state: &MatchState) -> bool {
    matches!(
        state,
        MatchState::Playing(Contest::WorldCup { play, .. } | Contest::League { play, .. })
            if play.time_left == 0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Vector;
    use crate::tournament::{Scoreline, Status};

    fn session() -> Session {
        Session::with_seed(Config::default(), 17)
    }

    fn run(session: &mut Session, ticks: u32) -> Vec<GameEvent> {
        (0..ticks).flat_map(|_| session.tick()).collect()
    }

    #[test]
    fn test_starting_arcade_serves_and_whistles() {
        let mut session = session();
        let events = session.handle(Command::StartMode(GameMode::Arcade));
        assert!(events.contains(&GameEvent::StatusChanged { status: Status::Playing }));
        assert!(events.contains(&GameEvent::Cue(SoundCue::Whistle)));
        assert_eq!(session.field().ball.pos, Vector::new(400.0, 250.0));
        assert!(!session.scheduler.clock_armed());
    }

    #[test]
    fn test_goal_counts_after_pause_and_reserves() {
        let mut session = session();
        session.handle(Command::StartMode(GameMode::Arcade));
        session.field.ball.pos = Vector::new(795.0, 250.0);
        session.field.ball.vel = Vector::new(10.0, 0.0);

        let events = session.tick();
        assert!(events.contains(&GameEvent::Goal { scorer: Side::Home }));
        assert_eq!(session.pending_goal(), Some(Side::Home));

        let pause = session.config.rules.goal_pause_ticks;
        run(&mut session, pause);
        assert_eq!(session.pending_goal(), None);
        assert_eq!(
            session.state(),
            &MatchState::Playing(Contest::Arcade { score: Scoreline { home: 1, away: 0 }, ball: 2 })
        );
        assert_eq!(session.field().ball.pos, Vector::new(400.0, 250.0));
    }

    #[test]
    fn test_manual_kick_spins_home_rods_only_in_open_play() {
        let mut session = session();
        session.handle(Command::StartMode(GameMode::Arcade));
        session.handle(Command::KickAttack);
        assert!(session.field().rod(HOME_MIDFIELD).unwrap().spinning);
        assert!(session.field().rod(HOME_ATTACK).unwrap().spinning);
        assert!(!session.field().rod(HOME_DEFENSE).unwrap().spinning);

        let mut session = self::session();
        session.handle(Command::StartMode(GameMode::Penalties));
        session.handle(Command::KickAttack);
        assert!(!session.field().rod(HOME_MIDFIELD).unwrap().spinning);
    }

    #[test]
    fn test_clock_only_runs_in_timed_matches() {
        let mut session = session();
        session.handle(Command::StartMode(GameMode::WorldCup));
        assert!(session.clock_tick().is_empty());

        session.handle(Command::SelectTeam("arg".to_string()));
        assert!(session.scheduler.clock_armed());
        session.clock_tick();
        match session.state() {
            MatchState::Playing(Contest::WorldCup { play, .. }) => assert_eq!(play.time_left, 179),
            other => panic!("expected world cup match, got {other:?}"),
        }
    }

    #[test]
    fn test_goal_in_pause_at_full_time_still_counts() {
        let mut session = session();
        session.handle(Command::StartMode(GameMode::WorldCup));
        session.handle(Command::SelectTeam("arg".to_string()));
        let seconds = session.config.rules.match_seconds;
        for _ in 0..seconds {
            session.clock_tick();
        }

        session.field.ball.pos = Vector::new(795.0, 250.0);
        session.field.ball.vel = Vector::new(10.0, 0.0);
        let events = session.tick();
        assert!(events.contains(&GameEvent::Goal { scorer: Side::Home }));
        assert_eq!(session.pending_goal(), Some(Side::Home));

        session.clock_tick();
        assert_eq!(session.pending_goal(), None);
        match session.state() {
            MatchState::NextLevel(tournament) => assert_eq!(tournament.round, 1),
            other => panic!("a 1-0 win should advance, got {other:?}"),
        }
    }

    #[test]
    fn test_goal_pause_mid_match_is_left_alone() {
        let mut session = session();
        session.handle(Command::StartMode(GameMode::WorldCup));
        session.handle(Command::SelectTeam("arg".to_string()));
        session.field.ball.pos = Vector::new(795.0, 250.0);
        session.field.ball.vel = Vector::new(10.0, 0.0);
        session.tick();

        session.clock_tick();
        assert_eq!(session.pending_goal(), Some(Side::Home));
        assert!(session.scheduler.is_pending(TimerKind::GoalPause));
    }

    #[test]
    fn test_penalty_kick_cycle_records_and_hands_over() {
        let mut session = session();
        session.handle(Command::StartMode(GameMode::Penalties));
        assert_eq!(session.penalty().unwrap().kicker, Side::Home);
        assert!(session.scheduler.is_pending(TimerKind::KeeperShuffle));

        session.handle(Command::Shoot);
        assert!(!session.scheduler.is_pending(TimerKind::KeeperShuffle));

        // Windup, flight, celebration: the kick is settled well within this
        let mut decided = false;
        for _ in 0..2000 {
            let events = session.tick();
            decided |= events
                .iter()
                .any(|event| matches!(event, GameEvent::Goal { .. } | GameEvent::ShotMissed));
            if session.penalty().map(|engine| engine.kicker) == Some(Side::Away) {
                break;
            }
        }
        assert!(decided);

        match session.state() {
            MatchState::Playing(Contest::Penalties { shootout, .. }) => {
                assert_eq!(shootout.home_taken, 1);
                assert_eq!(shootout.turn, Side::Away);
            }
            other => panic!("expected shootout, got {other:?}"),
        }
        let engine = session.penalty().unwrap();
        assert_eq!(engine.phase, PenaltyPhase::Aiming);
        // Away kicker stands in front of its midfield rod
        assert!(session.field().ball.pos.x < 480.0);
    }

    #[test]
    fn test_abandon_clears_timers() {
        let mut session = session();
        session.handle(Command::StartMode(GameMode::Penalties));
        session.handle(Command::Shoot);
        let events = session.handle(Command::Abandon);
        assert_eq!(events, vec![GameEvent::StatusChanged { status: Status::Menu }]);
        assert!(session.penalty().is_none());
        assert!(!session.scheduler.is_pending(TimerKind::KickWindup));
    }

    #[test]
    fn test_resume_rejects_terminal_states() {
        let mut session = session();
        assert!(session.resume(MatchState::Menu).is_err());

        let saved = MatchState::Playing(Contest::Arcade { score: Scoreline { home: 3, away: 2 }, ball: 6 });
        let events = session.resume(saved.clone()).unwrap();
        assert!(events.contains(&GameEvent::StatusChanged { status: Status::Playing }));
        assert_eq!(session.state(), &saved);
    }
}
