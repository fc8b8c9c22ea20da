// Menu rendering with Ratatui

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use foosball::config::KeyBindings;
use foosball::tournament::Team;

use super::state::{Cursor, MenuState};

const TITLE: [&str; 6] = [
    "███████╗ ██████╗  ██████╗ ███████╗██████╗  █████╗ ██╗     ██╗     ",
    "██╔════╝██╔═══██╗██╔═══██╗██╔════╝██╔══██╗██╔══██╗██║     ██║     ",
    "█████╗  ██║   ██║██║   ██║███████╗██████╔╝███████║██║     ██║     ",
    "██╔══╝  ██║   ██║██║   ██║╚════██║██╔══██╗██╔══██║██║     ██║     ",
    "██║     ╚██████╔╝╚██████╔╝███████║██████╔╝██║  ██║███████╗███████╗",
    "╚═╝      ╚═════╝  ╚═════╝ ╚══════╝╚═════╝ ╚═╝  ╚═╝╚══════╝╚══════╝",
];

fn selectable_line(text: &str, selected: bool) -> Line<'static> {
    let prefix = if selected { "  > " } else { "    " };
    let style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(Span::styled(format!("{}{}", prefix, text), style))
}

fn controls_hint(bindings: &KeyBindings, back: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}/{}", bindings.menu_up, bindings.menu_down),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(": Navigate  ", Style::default().fg(Color::DarkGray)),
        Span::styled(bindings.menu_select.clone(), Style::default().fg(Color::Gray)),
        Span::styled(": Select  ", Style::default().fg(Color::DarkGray)),
        Span::styled(bindings.menu_back.clone(), Style::default().fg(Color::Gray)),
        Span::styled(format!(": {}", back), Style::default().fg(Color::DarkGray)),
    ])
}

/// Render the main menu
pub fn render_menu(frame: &mut Frame, menu_state: &MenuState, bindings: &KeyBindings) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Title area
            Constraint::Min(8),     // Menu items
            Constraint::Length(3),  // Controls hint
        ])
        .split(area);

    let mut title_text = vec![Line::from("")];
    title_text.extend(TITLE.iter().map(|row| {
        Line::from(Span::styled(
            *row,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    }));
    frame.render_widget(Paragraph::new(title_text).alignment(Alignment::Center), chunks[0]);

    let menu_items: Vec<Line> = menu_state
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| selectable_line(item.display_text(), i == menu_state.selected_index()))
        .collect();
    frame.render_widget(Paragraph::new(menu_items).alignment(Alignment::Center), chunks[1]);

    frame.render_widget(
        Paragraph::new(controls_hint(bindings, "Quit")).alignment(Alignment::Center),
        chunks[2],
    );
}

/// Render the team list for a competition, each entry with its colours
pub fn render_team_select(
    frame: &mut Frame,
    heading: &str,
    teams: &[Team],
    cursor: &Cursor,
    bindings: &KeyBindings,
) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} - choose your team", heading),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // Scroll so the cursor stays visible on short terminals
    let visible = chunks[1].height.max(1) as usize;
    let first = cursor.index.saturating_sub(visible.saturating_sub(1));

    let rows: Vec<Line> = teams
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, team)| {
            let selected = i == cursor.index;
            let [r, g, b] = team.primary_rgb();
            let [sr, sg, sb] = team.secondary_rgb();
            let name_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, name_style),
                Span::styled("██", Style::default().fg(Color::Rgb(r, g, b))),
                Span::styled("▌ ", Style::default().fg(Color::Rgb(sr, sg, sb))),
                Span::styled(format!("{:<22}", team.name), name_style),
                Span::styled(team.code.clone(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(rows).alignment(Alignment::Center), chunks[1]);

    frame.render_widget(
        Paragraph::new(controls_hint(bindings, "Back")).alignment(Alignment::Center),
        chunks[2],
    );
}
