// Centred boxes over the field: goals, misses, round breaks and results

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use foosball::game::Side;
use foosball::penalty::{PenaltyEngine, PenaltyPhase};
use foosball::session::Session;
use foosball::tournament::{round_name, GameMode, MatchState, Summary, Verdict};

/// A message to display as an overlay in the center of the screen
#[derive(Debug, Clone)]
pub struct OverlayMessage {
    /// Lines of text to display
    pub lines: Vec<String>,
    /// Optional title for the overlay box
    pub title: Option<String>,
    /// Style preset for the overlay
    pub style: OverlayStyle,
}

/// Predefined styles for overlay messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// Round breaks and draws
    Info,
    /// Misses and saves
    Warning,
    /// Defeats
    Error,
    /// Goals and wins
    Success,
}

impl OverlayMessage {
    fn styled(lines: Vec<String>, style: OverlayStyle) -> Self {
        Self {
            lines,
            title: None,
            style,
        }
    }

    pub fn info(lines: Vec<String>) -> Self {
        Self::styled(lines, OverlayStyle::Info)
    }

    pub fn warning(lines: Vec<String>) -> Self {
        Self::styled(lines, OverlayStyle::Warning)
    }

    pub fn error(lines: Vec<String>) -> Self {
        Self::styled(lines, OverlayStyle::Error)
    }

    pub fn success(lines: Vec<String>) -> Self {
        Self::styled(lines, OverlayStyle::Success)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Error => Color::Red,
            OverlayStyle::Success => Color::Green,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Error => Color::LightRed,
            OverlayStyle::Success => Color::LightGreen,
        }
    }
}

/// Render an overlay message in the center of the screen
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    // Calculate overlay dimensions based on content
    let max_line_length = message
        .lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    // Add padding for borders and spacing
    let overlay_width = (max_line_length as u16 + 6).min(area.width.saturating_sub(4));
    let overlay_height = (message.lines.len() as u16 + 4).min(area.height.saturating_sub(4));

    // Center the overlay
    let overlay_area = Rect {
        x: area.x + (area.width.saturating_sub(overlay_width)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_height)) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    // Create the border block
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    if let Some(ref title) = message.title {
        block = block.title(format!(" {} ", title));
    }

    frame.render_widget(block, overlay_area);

    // Render the message text inside the block
    let inner_area = overlay_area.inner(ratatui::layout::Margin::new(2, 1));

    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(message.text_color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);

    frame.render_widget(paragraph, inner_area);
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn summary_message(summary: &Summary, victory: bool, proceed: &str) -> OverlayMessage {
    let (home, away) = match &summary.fixture {
        Some(fixture) => (fixture.home.name.clone(), fixture.away.name.clone()),
        None => ("You".to_string(), "CPU".to_string()),
    };

    let mut lines = Vec::new();
    match (&summary.shootout, summary.mode) {
        (Some(shootout), _) => lines.push(format!(
            "{} {} - {} {} on penalties",
            home, shootout.score.home, shootout.score.away, away
        )),
        (None, GameMode::League) => {}
        (None, _) => lines.push(format!(
            "{} {} - {} {}",
            home, summary.score.home, summary.score.away, away
        )),
    }
    if let Some(round) = summary.round {
        if !victory {
            lines.push(format!("Out in the {}", round_name(round)));
        }
    }
    if let (Some(position), Some(table)) = (summary.league_position(), summary.table.as_ref()) {
        lines.push(format!("Finished {} of {}", ordinal(position), table.rows.len()));
    }
    lines.push(String::new());
    lines.push(format!("{} for the menu", proceed));

    let (title, message) = match (victory, summary.verdict) {
        (true, _) => ("CHAMPIONS", OverlayMessage::success(lines)),
        (false, Verdict::Home) => ("YOU WIN", OverlayMessage::success(lines)),
        (false, Verdict::Draw) => ("DRAW", OverlayMessage::info(lines)),
        (false, Verdict::Away) => ("GAME OVER", OverlayMessage::error(lines)),
    };
    message.with_title(title)
}

fn penalty_message(engine: &PenaltyEngine, shoot: &str) -> Option<OverlayMessage> {
    match engine.phase {
        PenaltyPhase::Aiming if !engine.locked => {
            let message = match engine.kicker {
                Side::Home => OverlayMessage::info(vec![
                    format!("Aim: {}   Power: {}", engine.direction.label(), engine.power.label()),
                    format!("Keeper leans {}", engine.keeper_intent.label()),
                    format!("{} to shoot", shoot),
                ])
                .with_title("Your kick"),
                Side::Away => OverlayMessage::info(vec![
                    format!("Dive: {}", engine.direction.label()),
                    format!("{} to set", shoot),
                ])
                .with_title("Save it"),
            };
            Some(message)
        }
        PenaltyPhase::Celebration => {
            let scored = engine.outcome.unwrap_or(false);
            let message = match (engine.kicker, scored) {
                (Side::Home, true) => OverlayMessage::success(vec!["GOAL!".to_string()]),
                (Side::Home, false) => OverlayMessage::warning(vec!["SAVED".to_string()]),
                (Side::Away, true) => OverlayMessage::error(vec!["They score".to_string()]),
                (Side::Away, false) => OverlayMessage::success(vec!["What a save!".to_string()]),
            };
            Some(message)
        }
        _ => None,
    }
}

/// The message to show over the field for the session's current moment, if any
pub fn overlay_for(session: &Session) -> Option<OverlayMessage> {
    let keys = &session.config().keybindings;
    match session.state() {
        MatchState::Playing(_) => {
            if let Some(engine) = session.penalty() {
                return penalty_message(engine, &keys.shoot);
            }
            let scorer = session.pending_goal()?;
            let name = session
                .state()
                .fixture()
                .map(|fixture| match scorer {
                    Side::Home => fixture.home.name.clone(),
                    Side::Away => fixture.away.name.clone(),
                });
            let message = match scorer {
                Side::Home => OverlayMessage::success(vec![name.unwrap_or_else(|| "You".to_string()) + " score!"]),
                Side::Away => OverlayMessage::error(vec![name.unwrap_or_else(|| "CPU".to_string()) + " score"]),
            };
            Some(message.with_title("GOAL"))
        }
        MatchState::NextLevel(tournament) => Some(
            OverlayMessage::info(vec![
                format!("{} vs {}", tournament.fixture.home.name, tournament.fixture.away.name),
                String::new(),
                format!("{} to kick off", keys.proceed),
            ])
            .with_title(tournament.round_name()),
        ),
        MatchState::GameOver(summary) => Some(summary_message(summary, false, &keys.proceed)),
        MatchState::Victory(summary) => Some(summary_message(summary, true, &keys.proceed)),
        _ => None,
    }
}
