use super::help_line;
use super::layout::centered_rect;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Overlay asking whether to throw away the current session.
pub fn draw_restart_confirmation(f: &mut Frame) {
    let area = centered_rect(70, 30, f.area());
    f.render_widget(Clear, area);

    let text = Text::from(vec![
        Line::from(""),
        Line::from("Discard this session and start a new one?"),
        Line::from("Generated content and quiz answers will be lost."),
        Line::from(""),
        help_line(&[
            ("y", "Yes (New Session)"),
            ("n/Esc", "No (Continue)"),
            ("Ctrl+C", "Exit App"),
        ]),
    ]);

    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Start Over ")
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );
    f.render_widget(popup, area);
}
