use super::{draw_header, draw_help, draw_scrolled};
use crate::models::ScoreResult;
use crate::session::Session;
use crate::ui::layout::calculate_stage_chunks;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw_results(f: &mut Frame, session: &mut Session) {
    let layout = calculate_stage_chunks(f.area());
    draw_header(f, layout.header_area, session);

    let text = session
        .score
        .as_ref()
        .map(results_text)
        .unwrap_or_default();
    draw_scrolled(f, layout.body_area, "Results", text, &mut session.scroll_y);

    let banner = session
        .score
        .as_ref()
        .map(|score| score.summary())
        .unwrap_or("No quiz generated yet.");
    let status = Paragraph::new(banner)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title("Feedback"));
    f.render_widget(status, layout.status_area);

    draw_help(
        f,
        layout.help_area,
        &[("r", "Start Over"), ("↑/↓", "Scroll"), ("q", "Quit")],
    );
}

pub fn results_text(score: &ScoreResult) -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        score.score_line(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    for line in &score.feedback {
        let color = if line.contains(": Correct!") {
            Color::Green
        } else {
            Color::Red
        };
        text.push_line(Line::from(Span::styled(
            line.clone(),
            Style::default().fg(color),
        )));
    }
    text
}
