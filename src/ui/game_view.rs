use super::board_widget::{board_lines, player_color};
use crate::game::Player;
use crate::training::Episode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    episode: &Episode,
    human: Player,
    cursor: usize,
    message: &Option<String>,
    opponent: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(episode.rows() as u16 + 2), // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, episode, human, opponent, chunks[0]);
    render_board(frame, episode, cursor, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, human, chunks[3]);
}

fn render_header(frame: &mut Frame, episode: &Episode, human: Player, opponent: &str, area: Rect) {
    let current = episode.current_player();
    let status = if episode.is_done() {
        format!("Game Over after {} moves  |  vs {}", episode.moves(), opponent)
    } else if current == human {
        format!("Your move ({})  |  vs {}", current.name(), opponent)
    } else {
        format!("{} to move  |  vs {}", current.name(), opponent)
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Hex {}x{}",
            episode.rows(),
            episode.columns()
        )));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, episode: &Episode, cursor: usize, area: Rect) {
    let cursor = (!episode.is_done()).then_some(cursor);
    let board_widget =
        Paragraph::new(board_lines(episode.game().board(), cursor)).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, human: Player, area: Rect) {
    let line1 = Line::from("Arrows: Move  |  Enter: Place  |  R: Restart  |  S: Switch sides  |  Q: Quit");
    let line2 = Line::from(vec![
        Span::styled("Blue", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Span::raw(": left to right   "),
        Span::styled("Red", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(": top to bottom   "),
        Span::raw(format!("You: {}", human.name())),
    ]);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
