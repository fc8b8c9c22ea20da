use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use foosball::config::{DisplayConfig, KeyBindings, PhysicsConfig};
use foosball::game::{Field, Side};
use foosball::penalty::{ShootoutState, ShotOutcome};
use foosball::session::Session;
use foosball::tournament::{Contest, MatchState};

use super::braille::BrailleCanvas;
use super::overlay::{overlay_for, render_overlay};
use super::table::render_league_table;

// Layout: two header rows (teams + score, then clock or shootout record),
// the braille field, one row of control hints
const HEADER_ROWS: u16 = 2;
const FOOTER_ROWS: u16 = 1;

pub fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

pub fn render(frame: &mut Frame, session: &Session) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(4),
            Constraint::Length(FOOTER_ROWS),
        ])
        .split(area);

    draw_header(frame, session, chunks[0]);
    draw_field(
        frame,
        session.field(),
        &session.config().physics,
        &session.config().display,
        chunks[1],
    );
    draw_controls(frame, session, chunks[2]);

    match session.state() {
        MatchState::LeagueTable(season) => {
            let footer = vec![format!(
                "Next: {} vs {}. {} to kick off",
                season.fixture.home.name,
                season.fixture.away.name,
                session.config().keybindings.proceed
            )];
            render_league_table(
                frame,
                &season.table,
                Some(&season.fixture.home.id),
                "League Table",
                &footer,
                chunks[1],
            );
        }
        MatchState::GameOver(summary) | MatchState::Victory(summary) if summary.table.is_some() => {
            if let (Some(table), Some(message)) = (summary.table.as_ref(), overlay_for(session)) {
                render_league_table(
                    frame,
                    table,
                    summary.fixture.as_ref().map(|f| f.home.id.as_str()),
                    message.title.as_deref().unwrap_or("Final Table"),
                    &message.lines,
                    chunks[1],
                );
            }
        }
        _ => {
            if let Some(message) = overlay_for(session) {
                render_overlay(frame, &message, chunks[1]);
            }
        }
    }
}

/// Names and colours for both benches; the CPU side when there is no fixture
fn sides(session: &Session) -> [(String, Color); 2] {
    let display = &session.config().display;
    match session.state().fixture() {
        Some(fixture) => [
            (fixture.home.code.clone(), rgb(fixture.home.primary_rgb())),
            (fixture.away.code.clone(), rgb(fixture.away.primary_rgb())),
        ],
        None => [
            ("YOU".to_string(), rgb(display.home_color)),
            ("CPU".to_string(), rgb(display.away_color)),
        ],
    }
}

fn draw_header(frame: &mut Frame, session: &Session, area: Rect) {
    let Some(contest) = session.state().contest() else {
        return;
    };
    let [(home, home_color), (away, away_color)] = sides(session);
    let score = contest.score();
    let bold = Modifier::BOLD;

    let score_line = Line::from(vec![
        Span::styled(format!("{} ", home), Style::default().fg(home_color).add_modifier(bold)),
        Span::styled(
            format!(" {} - {} ", score.home, score.away),
            Style::default().fg(Color::White).add_modifier(bold),
        ),
        Span::styled(format!(" {}", away), Style::default().fg(away_color).add_modifier(bold)),
    ]);

    let detail = match contest {
        Contest::Arcade { ball, .. } => Line::from(Span::styled(
            format!("Ball {}/{}", ball, session.config().rules.arcade_balls),
            Style::default().fg(Color::Gray),
        )),
        Contest::WorldCup { tournament, play } => Line::from(Span::styled(
            format!("{}  {}", tournament.round_name(), clock(play.time_left)),
            Style::default().fg(Color::Gray),
        )),
        Contest::League { season, play } => {
            let matchday = season
                .table
                .get(&season.fixture.home.id)
                .map_or(1, |row| row.played + 1);
            Line::from(Span::styled(
                format!(
                    "Matchday {}/{}  {}",
                    matchday,
                    session.config().rules.season_matches,
                    clock(play.time_left)
                ),
                Style::default().fg(Color::Gray),
            ))
        }
        Contest::Penalties { shootout, .. } => shootout_record(shootout, home_color, away_color),
    };

    let header = Paragraph::new(vec![score_line, detail]).alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn outcome_glyph(outcome: &ShotOutcome) -> char {
    match outcome {
        ShotOutcome::Goal => '●',
        ShotOutcome::Miss => '✕',
        ShotOutcome::Pending => '·',
    }
}

fn shootout_record(shootout: &ShootoutState, home_color: Color, away_color: Color) -> Line<'static> {
    let record = |side: Side| -> String { shootout.history(side).iter().map(outcome_glyph).collect() };
    let mut spans = vec![
        Span::styled(record(Side::Home), Style::default().fg(home_color)),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(record(Side::Away), Style::default().fg(away_color)),
    ];
    if shootout.is_sudden_death() {
        spans.push(Span::styled("  Sudden death", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn draw_field(frame: &mut Frame, field: &Field, physics: &PhysicsConfig, display: &DisplayConfig, area: Rect) {
    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);
    let px_w = canvas.pixel_width();
    let px_h = canvas.pixel_height();
    if px_w < 8 || px_h < 8 {
        return;
    }

    // Virtual units to braille pixels
    let sx = (px_w - 1) as f32 / field.width;
    let sy = (px_h - 1) as f32 / field.height;
    let to_x = |v: f32| (v * sx).max(0.0) as usize;
    let to_y = |v: f32| (v * sy).max(0.0) as usize;

    let line = rgb(display.line_color);
    canvas.horizontal_line(0, 0, px_w, line);
    canvas.horizontal_line(px_h - 1, 0, px_w, line);
    canvas.vertical_line(px_w / 2, 0, px_h, 2, 2, line);

    // Goal mouths, two pixels deep on each end line
    let (top, bottom) = field.goal_band();
    for x in [0, 1, px_w - 2, px_w - 1] {
        canvas.vertical_line(x, to_y(top), to_y(bottom), 1, 0, Color::White);
    }

    for rod in &field.rods {
        canvas.vertical_line(to_x(rod.x), 1, px_h - 1, 1, 3, Color::DarkGray);
    }

    let figure_height = ((2.0 * physics.player_height) * sy).max(2.0) as usize;
    for rod in &field.rods {
        // A spinning figure swings toward the goal it attacks
        let swing = if rod.spinning {
            rod.spin_angle.sin() * physics.player_reach * rod.side.attack_direction()
        } else {
            0.0
        };
        let x = to_x(rod.x + swing).saturating_sub(1);
        for slot in &rod.players {
            let y = rod.slot_y(slot, field.center_y());
            canvas.fill_rect(x, to_y(y - physics.player_height), 3, figure_height, rgb(slot.color));
        }
    }

    let ball = &field.ball;
    if ball.pos.is_finite() {
        let r = ball.radius;
        let w = ((2.0 * r) * sx).max(2.0) as usize;
        let h = ((2.0 * r) * sy).max(2.0) as usize;
        canvas.fill_rect(to_x(ball.pos.x - r), to_y(ball.pos.y - r), w, h, rgb(display.ball_color));
    }

    render_braille_canvas(frame, &canvas, area, rgb(display.field_color));
}

fn styled_run(text: String, color: Option<Color>) -> Span<'static> {
    Span::styled(text, Style::default().fg(color.unwrap_or(Color::Reset)))
}

/// One Line per cell row; neighbouring cells of the same colour share a span
fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect, background: Color) {
    let lines: Vec<Line> = (0..canvas.height())
        .map(|y| {
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_color = None;
            for x in 0..canvas.width() {
                let color = canvas.color_at(x, y);
                if color != run_color && !run.is_empty() {
                    spans.push(styled_run(std::mem::take(&mut run), run_color));
                }
                run_color = color;
                run.push(canvas.to_char(x, y));
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_color));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(background));
    frame.render_widget(paragraph, area);
}

fn hint(key: String, what: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(Color::Gray)),
        Span::styled(format!(": {}  ", what), Style::default().fg(Color::DarkGray)),
    ]
}

fn draw_controls(frame: &mut Frame, session: &Session, area: Rect) {
    let keys: &KeyBindings = &session.config().keybindings;
    let mut spans = Vec::new();

    match session.state() {
        MatchState::Playing(_) if session.penalty().is_some() => {
            spans.extend(hint(
                format!("{}/{}/{}", keys.aim_left, keys.aim_center, keys.aim_right),
                "Aim",
            ));
            spans.extend(hint(
                format!("{}/{}/{}", keys.power_soft, keys.power_medium, keys.power_strong),
                "Power",
            ));
            spans.extend(hint(keys.shoot.clone(), "Shoot"));
        }
        MatchState::Playing(_) => {
            spans.extend(hint(format!("{}/{}", keys.defense_up, keys.defense_down), "Defense"));
            spans.extend(hint(keys.defense_kick.clone(), "Kick"));
            spans.extend(hint(format!("{}/{}", keys.attack_up, keys.attack_down), "Attack"));
            spans.extend(hint(keys.attack_kick.clone(), "Kick"));
        }
        _ => spans.extend(hint(keys.proceed.clone(), "Continue")),
    }
    spans.extend(hint(keys.quit.clone(), "Menu"));

    let controls = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(controls, area);
}
