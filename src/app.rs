// Frame loop: reads keys, drives the session and draws the current screen

use std::time::{Duration, Instant};

use ratatui::{backend::Backend, Terminal};

use foosball::ai::Axis;
use foosball::config::{Config, KeyBindings};
use foosball::game::{poll_input, GameEvent, InputAction};
use foosball::penalty::{ShotDirection, ShotPower};
use foosball::save;
use foosball::session::{Command, Session};
use foosball::tournament::{MatchState, Selection};

use crate::menu::{
    handle_list_key, handle_menu_key, read_key, render_menu, render_team_select, Cursor, ListAction,
    MenuAction, MenuState,
};
use crate::ui;

// Stick travel per key press, as a fraction of full deflection
const AXIS_STEP: f32 = 0.25;
const CLOCK_INTERVAL: Duration = Duration::from_secs(1);
const MENU_POLL: Duration = Duration::from_millis(100);

enum Screen {
    Menu,
    Teams(Selection),
    Match,
}

struct App {
    session: Session,
    keys: KeyBindings,
    menu: MenuState,
    team_cursor: Cursor,
    frame_duration: Duration,
    last_clock: Instant,
    // Last state written to the save file
    saved: Option<MatchState>,
    running: bool,
}

/// Sleep out whatever is left of the frame
fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}

fn has_save() -> bool {
    match save::load() {
        Ok(state) => state.is_some(),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unusable save file");
            false
        }
    }
}

/// Turn one frame's key actions into session commands. The same key can mean
/// one thing in open play and another in a shootout, so context decides.
fn commands_for(
    actions: &[InputAction],
    playing: bool,
    shootout: bool,
    defense: f32,
    attack: f32,
) -> Vec<Command> {
    let mut commands = Vec::new();
    let (mut defense, mut attack) = (defense, attack);

    for action in actions {
        let command = match action {
            InputAction::Quit => Some(Command::Abandon),
            InputAction::Proceed if !playing => Some(Command::Proceed),
            _ if !playing => None,

            InputAction::AimLeft if shootout => Some(Command::Aim(ShotDirection::Left)),
            InputAction::AimCenter if shootout => Some(Command::Aim(ShotDirection::Center)),
            InputAction::AimRight if shootout => Some(Command::Aim(ShotDirection::Right)),
            InputAction::PowerSoft if shootout => Some(Command::Power(ShotPower::Soft)),
            InputAction::PowerMedium if shootout => Some(Command::Power(ShotPower::Medium)),
            InputAction::PowerStrong if shootout => Some(Command::Power(ShotPower::Strong)),
            InputAction::Shoot if shootout => Some(Command::Shoot),
            _ if shootout => None,

            InputAction::DefenseUp => {
                defense = (defense - AXIS_STEP).max(-1.0);
                Some(Command::MoveDefense(Some(defense)))
            }
            InputAction::DefenseDown => {
                defense = (defense + AXIS_STEP).min(1.0);
                Some(Command::MoveDefense(Some(defense)))
            }
            InputAction::AttackUp => {
                attack = (attack - AXIS_STEP).max(-1.0);
                Some(Command::MoveAttack(Some(attack)))
            }
            InputAction::AttackDown => {
                attack = (attack + AXIS_STEP).min(1.0);
                Some(Command::MoveAttack(Some(attack)))
            }
            InputAction::DefenseKick => Some(Command::KickDefense),
            InputAction::AttackKick => Some(Command::KickAttack),
            _ => None,
        };
        commands.extend(command);
    }
    commands
}

impl App {
    fn new(config: Config) -> Self {
        let fps = config.display.target_fps.max(1);
        let keys = config.keybindings.clone();
        Self {
            session: Session::new(config),
            keys,
            menu: MenuState::new(has_save()),
            team_cursor: Cursor::new(0),
            frame_duration: Duration::from_millis(1000 / fps),
            last_clock: Instant::now(),
            saved: None,
            running: true,
        }
    }

    fn screen(&self) -> Screen {
        match self.session.state() {
            MatchState::Menu => Screen::Menu,
            MatchState::TeamSelect(selection) => Screen::Teams(*selection),
            _ => Screen::Match,
        }
    }

    fn apply(&mut self, command: Command) {
        let events = self.session.handle(command);
        self.after(events);
    }

    fn after(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::StatusChanged { status } => {
                    tracing::debug!(?status, "Screen change");
                    self.last_clock = Instant::now();
                    match self.session.state() {
                        MatchState::Menu => self.menu = MenuState::new(has_save()),
                        MatchState::TeamSelect(selection) => {
                            let teams = self.session.roster().pool(selection.pool()).len();
                            self.team_cursor = Cursor::new(teams);
                        }
                        _ => {}
                    }
                }
                GameEvent::Cue(cue) => tracing::trace!(?cue, "Sound cue"),
                GameEvent::Goal { .. } | GameEvent::ShotMissed => {}
            }
        }
    }

    /// Write the save file whenever the live state moved on
    fn persist(&mut self) {
        let state = self.session.state();
        if self.saved.as_ref() == Some(state) {
            return;
        }
        if let Err(e) = save::sync(state) {
            tracing::warn!(error = %e, "Could not update save file");
        }
        self.saved = Some(state.clone());
    }

    fn continue_saved(&mut self) {
        match save::load() {
            Ok(Some(state)) => match self.session.resume(state) {
                Ok(events) => {
                    // Already on disk
                    self.saved = Some(self.session.state().clone());
                    self.after(events);
                }
                Err(e) => tracing::warn!(error = %e, "Saved match rejected"),
            },
            Ok(None) => self.menu = MenuState::new(false),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable save");
                if let Err(e) = save::clear() {
                    tracing::warn!(error = %e, "Could not remove save file");
                }
                self.menu = MenuState::new(false);
            }
        }
    }

    fn menu_frame<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|f| render_menu(f, &self.menu, &self.keys))?;

        let Some(code) = read_key(MENU_POLL)? else {
            return Ok(());
        };
        match handle_menu_key(&mut self.menu, &self.keys, code) {
            MenuAction::None => {}
            MenuAction::Quit => self.running = false,
            MenuAction::Continue => self.continue_saved(),
            MenuAction::Start(mode) => self.apply(Command::StartMode(mode)),
        }
        Ok(())
    }

    fn team_frame<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        selection: Selection,
    ) -> anyhow::Result<()> {
        terminal.draw(|f| {
            render_team_select(
                f,
                selection.mode().label(),
                self.session.roster().pool(selection.pool()),
                &self.team_cursor,
                &self.keys,
            )
        })?;

        let Some(code) = read_key(MENU_POLL)? else {
            return Ok(());
        };
        match handle_list_key(&mut self.team_cursor, &self.keys, code) {
            ListAction::None => {}
            ListAction::Back => self.apply(Command::Abandon),
            ListAction::Pick(index) => {
                let team = self.session.roster().pool(selection.pool()).get(index);
                if let Some(id) = team.map(|team| team.id.clone()) {
                    self.apply(Command::SelectTeam(id));
                }
            }
        }
        Ok(())
    }

    fn match_frame<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let actions = poll_input(&self.keys)?;
        let playing = matches!(self.session.state(), MatchState::Playing(_));
        let commands = commands_for(
            &actions,
            playing,
            self.session.penalty().is_some(),
            self.session.axis(Axis::Defense).unwrap_or(0.0),
            self.session.axis(Axis::Attack).unwrap_or(0.0),
        );
        for command in commands {
            self.apply(command);
        }

        let events = self.session.tick();
        self.after(events);

        if self.last_clock.elapsed() >= CLOCK_INTERVAL {
            self.last_clock += CLOCK_INTERVAL;
            let events = self.session.clock_tick();
            self.after(events);
        }

        terminal.draw(|f| ui::render(f, &self.session))?;
        Ok(())
    }
}

pub fn run<B: Backend>(terminal: &mut Terminal<B>, config: Config) -> anyhow::Result<()> {
    let mut app = App::new(config);
    tracing::info!("Foosball started");

    while app.running {
        let frame_start = Instant::now();
        match app.screen() {
            Screen::Menu => app.menu_frame(terminal)?,
            Screen::Teams(selection) => app.team_frame(terminal, selection)?,
            Screen::Match => {
                app.match_frame(terminal)?;
                limit_frame_rate(frame_start, app.frame_duration);
            }
        }
        app.persist();
    }

    tracing::info!("Foosball exiting");
    Ok(())
}
