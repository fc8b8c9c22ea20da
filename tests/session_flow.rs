// The session driving the referee through its timers and the save file

use foosball::config::Config;
use foosball::game::{GameEvent, Side};
use foosball::penalty::PenaltyPhase;
use foosball::save;
use foosball::session::{Command, Session};
use foosball::tournament::{GameMode, MatchState, Status};

fn status_changes(events: &[GameEvent]) -> Vec<Status> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::StatusChanged { status } => Some(*status),
            _ => None,
        })
        .collect()
}

fn world_cup_session(seed: u64) -> Session {
    let mut session = Session::with_seed(Config::default(), seed);
    session.handle(Command::StartMode(GameMode::WorldCup));
    let events = session.handle(Command::SelectTeam("ned".to_string()));
    assert_eq!(status_changes(&events), vec![Status::Playing]);
    session
}

#[test]
fn goalless_world_cup_match_hands_over_to_a_shootout() {
    let mut session = world_cup_session(9);
    let seconds = session.config().rules.match_seconds;

    let mut changes = Vec::new();
    for _ in 0..=seconds {
        changes.extend(status_changes(&session.clock_tick()));
    }

    assert_eq!(changes, vec![Status::Playing]);
    assert_eq!(session.state().mode(), Some(GameMode::Penalties));
    assert_eq!(session.state().previous_mode(), Some(GameMode::WorldCup));

    let engine = session.penalty().expect("a kick is set up");
    assert_eq!(engine.kicker, Side::Home);
    assert_eq!(engine.phase, PenaltyPhase::Aiming);

    // The shootout has no clock
    let before = session.state().clone();
    assert!(session.clock_tick().is_empty());
    assert_eq!(session.state(), &before);
}

#[test]
fn saved_match_resumes_with_a_fresh_table() {
    let dir = std::env::temp_dir().join(format!("foosball-flow-{}", std::process::id()));
    let path = dir.join("save.json");

    let mut session = world_cup_session(4);
    for _ in 0..30 {
        session.clock_tick();
    }
    save::sync_at(&path, session.state()).unwrap();

    let loaded = save::load_from(&path).unwrap().expect("snapshot on disk");
    assert_eq!(&loaded, session.state());

    let mut resumed = Session::with_seed(Config::default(), 99);
    let events = resumed.resume(loaded).unwrap();
    assert_eq!(status_changes(&events), vec![Status::Playing]);
    assert_eq!(resumed.state(), session.state());

    let field = resumed.field();
    assert_eq!(field.ball.pos.x, field.width / 2.0);
    assert_eq!(field.ball.speed(), 0.0);

    // Abandoning keeps the save; finishing a contest removes it
    resumed.handle(Command::Abandon);
    save::sync_at(&path, resumed.state()).unwrap();
    assert!(path.exists());

    save::sync_at(&path, &MatchState::Menu).unwrap();
    assert!(path.exists());
    save::clear_at(&path).unwrap();
    assert!(save::load_from(&path).unwrap().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}
