// Whole contests driven through the referee, one operation at a time

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use foosball::game::Side;
use foosball::tournament::{Contest, GameMode, MatchState, Referee, Scoreline, Status, Verdict};

fn setup(seed: u64) -> (Referee, StdRng) {
    (Referee::default(), StdRng::seed_from_u64(seed))
}

/// Tick the match clock until the status changes
fn run_out_clock(referee: &Referee, mut state: MatchState, rng: &mut StdRng) -> MatchState {
    for _ in 0..=referee.rules.match_seconds + 1 {
        state = referee.clock_tick(state, rng);
        if state.status() != Status::Playing {
            return state;
        }
        if matches!(state, MatchState::Playing(Contest::Penalties { .. })) {
            return state;
        }
    }
    panic!("clock never ran out");
}

fn score_of(state: &MatchState) -> Scoreline {
    state.contest().map(|contest| contest.score()).unwrap_or_default()
}

#[test]
fn arcade_six_four_is_a_home_win() {
    let (referee, _) = setup(1);
    let mut state = referee.start_mode(MatchState::Menu, GameMode::Arcade);

    let goals = [
        Side::Home, Side::Away, Side::Home, Side::Home, Side::Away,
        Side::Home, Side::Away, Side::Home, Side::Away, Side::Home,
    ];
    for (i, scorer) in goals.iter().enumerate() {
        assert_eq!(state.status(), Status::Playing, "ball {} should be in play", i + 1);
        state = referee.on_goal(state, *scorer);
    }

    let MatchState::GameOver(summary) = state else {
        panic!("arcade should end after ten balls");
    };
    assert_eq!(summary.mode, GameMode::Arcade);
    assert_eq!(summary.verdict, Verdict::Home);
    assert_eq!(summary.score, Scoreline { home: 6, away: 4 });
}

#[test]
fn arcade_level_match_is_a_draw() {
    let (referee, _) = setup(1);
    let mut state = referee.start_mode(MatchState::Menu, GameMode::Arcade);
    for i in 0..10 {
        let scorer = if i % 2 == 0 { Side::Home } else { Side::Away };
        state = referee.on_goal(state, scorer);
    }
    let MatchState::GameOver(summary) = state else {
        panic!("arcade should end after ten balls");
    };
    assert_eq!(summary.verdict, Verdict::Draw);
}

#[test]
fn world_cup_run_to_the_trophy() {
    let (referee, mut rng) = setup(7);
    let state = referee.start_mode(MatchState::Menu, GameMode::WorldCup);
    assert_eq!(state.status(), Status::TeamSelect);

    let mut state = referee.select_team(state, "arg", &mut rng);
    let mut opponents = Vec::new();

    for round in 0..=referee.rules.final_round {
        let MatchState::Playing(Contest::WorldCup { tournament, .. }) = &state else {
            panic!("round {} should be playing, got {:?}", round, state.status());
        };
        assert_eq!(tournament.round, round);
        assert_eq!(tournament.fixture.home.id, "arg");
        assert_ne!(tournament.fixture.away.id, "arg");
        opponents.push(tournament.fixture.away.id.clone());

        state = referee.on_goal(state, Side::Home);
        state = run_out_clock(&referee, state, &mut rng);

        if round < referee.rules.final_round {
            assert_eq!(state.status(), Status::NextLevel);
            state = referee.proceed(state);
        }
    }

    let MatchState::Victory(summary) = state else {
        panic!("winning the final should be a victory");
    };
    assert_eq!(summary.mode, GameMode::WorldCup);
    assert_eq!(summary.round, Some(referee.rules.final_round));
    assert_eq!(summary.score, Scoreline { home: 1, away: 0 });

    // Consecutive rounds never replay the same opponent
    for pair in opponents.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn world_cup_draw_goes_to_penalties_and_back() {
    let (referee, mut rng) = setup(11);
    let state = referee.start_mode(MatchState::Menu, GameMode::WorldCup);
    let state = referee.select_team(state, "bra", &mut rng);

    let state = referee.on_goal(state, Side::Home);
    let state = referee.on_goal(state, Side::Away);
    let mut state = run_out_clock(&referee, state, &mut rng);

    assert_eq!(state.status(), Status::Playing);
    assert_eq!(state.mode(), Some(GameMode::Penalties));
    assert_eq!(state.previous_mode(), Some(GameMode::WorldCup));
    assert!(!state.clock_runs());
    // The shootout score starts from nothing
    assert_eq!(score_of(&state), Scoreline::default());

    // Home scores three, away misses three: decided before the regulation five
    for scored in [true, false, true, false, true, false] {
        state = referee.record_penalty(state, scored, &mut rng);
    }

    let MatchState::NextLevel(tournament) = state else {
        panic!("a shootout win should advance the tournament");
    };
    assert_eq!(tournament.round, 1);
    assert_eq!(tournament.fixture.home.id, "bra");
}

#[test]
fn world_cup_shootout_defeat_ends_the_run() {
    let (referee, mut rng) = setup(5);
    let state = referee.start_mode(MatchState::Menu, GameMode::WorldCup);
    let state = referee.select_team(state, "esp", &mut rng);
    let mut state = run_out_clock(&referee, state, &mut rng);
    assert_eq!(state.previous_mode(), Some(GameMode::WorldCup));

    for scored in [false, true, false, true, false, true] {
        state = referee.record_penalty(state, scored, &mut rng);
    }

    let MatchState::GameOver(summary) = state else {
        panic!("a shootout defeat should end the tournament");
    };
    assert_eq!(summary.mode, GameMode::WorldCup);
    assert_eq!(summary.verdict, Verdict::Away);
    assert_eq!(summary.round, Some(0));
    assert!(summary.shootout.is_some());
}

#[test]
fn standalone_shootout_sudden_death() {
    let (referee, mut rng) = setup(3);
    let mut state = referee.start_mode(MatchState::Menu, GameMode::Penalties);
    assert_eq!(state.previous_mode(), None);

    // Five each, all scored, then home misses and away scores
    for _ in 0..10 {
        state = referee.record_penalty(state, true, &mut rng);
    }
    assert_eq!(state.status(), Status::Playing);
    state = referee.record_penalty(state, false, &mut rng);
    assert_eq!(state.status(), Status::Playing);
    state = referee.record_penalty(state, true, &mut rng);

    let MatchState::GameOver(summary) = state else {
        panic!("sudden death should decide the shootout");
    };
    assert_eq!(summary.mode, GameMode::Penalties);
    assert_eq!(summary.verdict, Verdict::Away);
    assert_eq!(summary.score, Scoreline { home: 5, away: 6 });
}

#[test]
fn league_season_finishes_after_ten_matches() {
    let (referee, mut rng) = setup(23);
    let state = referee.start_mode(MatchState::Menu, GameMode::League);
    let mut state = referee.select_team(state, "bar", &mut rng);

    let mut opponents = Vec::new();
    for matchday in 1..=referee.rules.season_matches {
        let MatchState::LeagueTable(season) = &state else {
            panic!("matchday {} should start from the table, got {:?}", matchday, state.status());
        };
        assert_eq!(season.fixture.home.id, "bar");
        opponents.push(season.fixture.away.id.clone());

        state = referee.proceed(state);
        assert!(state.clock_runs());
        state = referee.on_goal(state, Side::Home);
        state = run_out_clock(&referee, state, &mut rng);
    }

    let MatchState::Victory(summary) = &state else {
        panic!("the season should end in victory, got {:?}", state.status());
    };
    assert_eq!(summary.mode, GameMode::League);
    let table = summary.table.as_ref().expect("final table");
    let ours = table.get("bar").expect("our row");
    assert_eq!(ours.played, referee.rules.season_matches);
    assert_eq!(ours.wins, referee.rules.season_matches);
    assert_eq!(summary.league_position(), Some(1));

    // Standings are sorted by points
    for pair in table.rows.windows(2) {
        assert!(pair[0].points >= pair[1].points);
    }

    // Every club is met once before anyone is met again, and never twice running
    let first_cycle: HashSet<_> = opponents[..9].iter().collect();
    assert_eq!(first_cycle.len(), 9);
    assert!(!opponents.contains(&"bar".to_string()));
    assert_ne!(opponents[8], opponents[9]);
}

#[test]
fn abandoning_keeps_nothing() {
    let (referee, mut rng) = setup(2);
    let state = referee.start_mode(MatchState::Menu, GameMode::League);
    let state = referee.select_team(state, "sev", &mut rng);
    let state = referee.abandon(state);
    assert_eq!(state, MatchState::Menu);

    // A new contest cannot start mid-contest
    let state = referee.start_mode(MatchState::Menu, GameMode::Arcade);
    let state = referee.start_mode(state, GameMode::League);
    assert_eq!(state.mode(), Some(GameMode::Arcade));
}
