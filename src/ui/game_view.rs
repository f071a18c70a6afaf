use super::App;
use crate::game::{Cell, GameSession, Player, Status, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Score
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_score(frame, app, chunks[1]);
    render_board(frame, app.session(), app.selected_column(), chunks[2]);
    render_message(frame, app.message(), chunks[3]);
    render_controls(frame, chunks[4]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let (status, color) = match session.status() {
        Status::InProgress => {
            let player = session.current_player();
            (format!("Current Player: {}", app.name(player)), player_color(player))
        }
        Status::Won(player) => (format!("{} wins!", app.name(player)), player_color(player)),
        Status::Draw => ("Draw".to_string(), Color::White),
    };

    let header = Paragraph::new(format!("{status}  |  Game {}", session.game_number()))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_score(frame: &mut Frame, app: &App, area: Rect) {
    let score = app.score();
    let line = Line::from(vec![
        Span::styled(
            format!("{}: {}", app.name(Player::One), score.wins(Player::One)),
            Style::default().fg(player_color(Player::One)),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{}: {}", app.name(Player::Two), score.wins(Player::Two)),
            Style::default().fg(player_color(Player::Two)),
        ),
        Span::raw(format!("   Draws: {}", score.draws())),
    ]);

    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));

    frame.render_widget(widget, area);
}

fn render_board(frame: &mut Frame, session: &GameSession, selected_column: usize, area: Rect) {
    let board = session.board();
    let winning_line = session.winning_line();
    let mut lines = Vec::new();

    // Column numbers with selection indicator; full columns are dimmed
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        let style = if matches!(board.is_column_full(col), Ok(true)) {
            Style::default().fg(Color::DarkGray)
        } else if col == selected_column {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        col_line.push(Span::styled(label, style));
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    // Top border
    lines.push(Line::from("  ╔══════════════════════╗"));

    // Board rows
    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, mut style) = match board.get(row, col) {
                Cell::Empty => (" . ", Style::default().fg(Color::DarkGray)),
                Cell::One => (" ● ", Style::default().fg(player_color(Player::One))),
                Cell::Two => (" ● ", Style::default().fg(player_color(Player::Two))),
            };
            if winning_line.is_some_and(|line| line.contains(row, col)) {
                style = style.bg(Color::Green).add_modifier(Modifier::BOLD);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    // Bottom border
    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    if !session.is_over() {
        let mut indicator_line = vec![Span::raw("   ")];
        for col in 0..COLS {
            if col == selected_column {
                indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
            } else {
                indicator_line.push(Span::raw("   "));
            }
        }
        indicator_line.push(Span::raw("  "));
        lines.push(Line::from(indicator_line));
    }

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter/1-7: Drop  |  R: Play again  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
