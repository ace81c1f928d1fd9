use crate::game::{Board, Cell, Player};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn player_color(player: Player) -> Color {
    match player {
        Player::Blue => Color::Blue,
        Player::Red => Color::Red,
    }
}

/// One line per row, each shifted one column further right than the last.
///
/// Red's edges are drawn above and below the board, Blue's on either side.
pub fn board_lines(board: &Board, cursor: Option<usize>) -> Vec<Line<'static>> {
    let red = Style::default().fg(player_color(Player::Red));
    let blue = Style::default().fg(player_color(Player::Blue));
    let edge = "\u{2500}".repeat(2 * board.columns());
    let mut lines = Vec::with_capacity(board.rows() + 2);

    lines.push(Line::from(vec![Span::raw(" "), Span::styled(edge.clone(), red)]));

    for row in 0..board.rows() {
        let mut spans = vec![Span::raw(" ".repeat(row)), Span::styled("\u{258c}", blue)];
        for column in 0..board.columns() {
            let (symbol, color) = match board.get(row, column) {
                Cell::Empty => ('.', Color::DarkGray),
                Cell::Blue => ('\u{25cf}', player_color(Player::Blue)),
                Cell::Red => ('\u{25cf}', player_color(Player::Red)),
            };
            let mut style = Style::default().fg(color);
            if board.location(row, column) == cursor {
                style = style.bg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(symbol.to_string(), style));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled("\u{2590}", blue));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(vec![
        Span::raw(" ".repeat(board.rows())),
        Span::styled(edge, red),
    ]));
    lines
}
