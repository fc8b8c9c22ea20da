// League standings widget

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use foosball::tournament::{LeagueStats, LeagueTable};

const HEADINGS: [&str; 10] = ["#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"];

fn row_cells(position: usize, stats: &LeagueStats) -> Vec<String> {
    vec![
        position.to_string(),
        stats.team.name.clone(),
        stats.played.to_string(),
        stats.wins.to_string(),
        stats.draws.to_string(),
        stats.losses.to_string(),
        stats.goals_for.to_string(),
        stats.goals_against.to_string(),
        format!("{:+}", stats.goal_difference()),
        stats.points.to_string(),
    ]
}

/// Standings in a centred box, the human's row highlighted, with footer lines
pub fn render_league_table(
    frame: &mut Frame,
    table: &LeagueTable,
    highlight: Option<&str>,
    title: &str,
    footer: &[String],
    area: Rect,
) {
    let width = 64.min(area.width.saturating_sub(2));
    let height = (table.rows.len() as u16 + footer.len() as u16 + 4).min(area.height);
    let box_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, box_area);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(footer.len() as u16)])
        .split(inner);

    let header = Row::new(HEADINGS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows = table.rows.iter().enumerate().map(|(i, stats)| {
        let style = if highlight == Some(stats.team.id.as_str()) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Row::new(row_cells(i + 1, stats)).style(style)
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(4),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), chunks[0]);

    let footer_lines: Vec<Line> = footer.iter().map(|line| Line::from(line.clone())).collect();
    frame.render_widget(
        Paragraph::new(footer_lines)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        chunks[1],
    );
}
