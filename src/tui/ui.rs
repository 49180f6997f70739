//! Stateless UI rendering for the wheel screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::app::App;

/// Width of one division cell on the wheel strip, in characters.
const CELL_WIDTH: usize = 8;

/// Renders the wheel screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Wheel strip
            Constraint::Length(5), // Readout
            Constraint::Min(5),    // Candidate list
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(area);

    let title = Paragraph::new("Fortune Wheel")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_wheel(frame, chunks[1], app.angle(), app.divisions());
    draw_readout(frame, chunks[2], app);
    draw_candidates(frame, chunks[3], app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[4]);

    let help = Paragraph::new(
        "Space: Spin | ↑↓: Select | f: Force | d: Remove | r: Restore | c: Clear | q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[5]);
}

/// Draws the wheel strip: numbered division cells sliding under a fixed
/// pointer as the angle grows.
fn draw_wheel(frame: &mut Frame, area: Rect, angle: f64, divisions: u32) {
    let divisions = divisions.max(1);
    let inner_width = area.width.saturating_sub(2) as usize;

    let segment = 360.0 / divisions as f64;
    let position = angle.rem_euclid(360.0) / segment;
    let first_cell = position.floor() as i64;
    let shift = ((position - position.floor()) * CELL_WIDTH as f64) as usize;

    let mut spans = Vec::new();
    let mut used = 0;
    let mut cell = first_cell;
    while used < inner_width {
        let division = cell.rem_euclid(divisions as i64) as u32 + 1;
        let text = format!("{:^width$}", division, width = CELL_WIDTH);
        // The leading cell is clipped by the fractional offset so the strip
        // slides smoothly instead of jumping a whole cell at a time.
        let text: String = if cell == first_cell {
            text.chars().skip(shift).collect()
        } else {
            text
        };
        let take = text.len().min(inner_width - used);
        let style = if division % 2 == 0 {
            Style::default().fg(Color::White).bg(Color::Blue)
        } else {
            Style::default().fg(Color::White).bg(Color::Red)
        };
        spans.push(Span::styled(text[..take].to_string(), style));
        used += take;
        cell += 1;
    }

    let pointer_column = inner_width / 2;
    let pointer_line = format!("{:>width$}", "▼", width = pointer_column + 1);

    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            pointer_line,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(spans),
    ])
    .block(Block::default().borders(Borders::ALL).title("Wheel"));
    frame.render_widget(paragraph, area);
}

/// Draws the readout panel: the cycling label mid-spin, the winner banner
/// once a spin completes.
fn draw_readout(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.last_winner() {
        Some(winner) if !app.spinning() => (
            format!("★ {} ★", winner),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        _ => (
            app.readout().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let lines = vec![Line::from(""), Line::from(Span::styled(text, style))];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Readout"));
    frame.render_widget(paragraph, area);
}

/// Draws the candidate list: stable index and label per entry, eliminated
/// entries crossed out, the forced winner starred.
fn draw_candidates(frame: &mut Frame, area: Rect, app: &App) {
    let pool = app.pool();
    let pool = pool.lock().unwrap();

    // The star sits on the occurrence that would actually win: the first
    // available entry with the forced label.
    let mut starred = false;
    let items: Vec<ListItem> = pool
        .candidates()
        .iter()
        .map(|candidate| {
            let eliminated = pool.is_eliminated(candidate.index());
            let force_here = !eliminated && !starred && app.forced() == Some(candidate.label());
            if force_here {
                starred = true;
            }
            let marker = if force_here { "★ " } else { "  " };
            let text = format!("{}{:>3}  {}", marker, candidate.index(), candidate.label());
            let style = if eliminated {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if force_here {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Candidates ({} of {} remaining)",
            pool.available().len(),
            pool.len()
        )))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = app.list_state();
    frame.render_stateful_widget(list, area, &mut list_state);
}
