use super::{draw_header, draw_help, key_style};
use crate::models::Question;
use crate::session::Session;
use crate::ui::layout::calculate_stage_chunks;
use crate::utils::estimate_text_height;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_quiz(f: &mut Frame, session: &mut Session) {
    let layout = calculate_stage_chunks(f.area());
    draw_header(f, layout.header_area, session);

    let text = quiz_text(session);

    // Keep the focused question in view
    let visible_height = layout.body_area.height.saturating_sub(2);
    let (start, height) = question_span(session, layout.body_area.width.saturating_sub(2) as usize);
    let mut scroll_y = session.scroll_y;
    if start < scroll_y {
        scroll_y = start;
    } else if start + height > scroll_y + visible_height {
        scroll_y = (start + height).saturating_sub(visible_height);
    }
    session.scroll_y = scroll_y;

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((scroll_y, 0))
        .block(Block::default().borders(Borders::ALL).title("Quiz"));
    f.render_widget(body, layout.body_area);

    let answered = session.answers.len();
    let total = session.quiz.as_ref().map_or(0, Vec::len);
    let status = Paragraph::new(format!(
        "{} of {} questions answered. Unanswered questions count as incorrect.",
        answered, total
    ))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, layout.status_area);

    draw_help(
        f,
        layout.help_area,
        &[
            ("↑/↓", "Question"),
            ("←/→ 1-5", "Choose"),
            ("Enter", "Evaluate"),
            ("Ctrl+R", "Restart"),
            ("q", "Quit"),
        ],
    );
}

/// First row and wrapped row count of the focused question inside `quiz_text`.
fn question_span(session: &Session, width: usize) -> (u16, u16) {
    let Some(quiz) = &session.quiz else {
        return (0, 0);
    };
    let rows = |(i, q): (usize, &Question)| {
        estimate_text_height(&question_text(session, i, q), width).min(u16::MAX as usize) as u16
    };
    let start = quiz
        .iter()
        .enumerate()
        .take(session.focused_question)
        .map(rows)
        .fold(0u16, u16::saturating_add);
    let height = quiz
        .get(session.focused_question)
        .map_or(0, |q| rows((session.focused_question, q)));
    (start, height)
}

/// Radio groups for every question, marking the focused question and selections.
pub fn quiz_text(session: &Session) -> Text<'static> {
    let mut text = Text::default();
    if let Some(quiz) = &session.quiz {
        for (i, question) in quiz.iter().enumerate() {
            text.lines.extend(question_text(session, i, question).lines);
        }
    }
    text
}

fn question_text(session: &Session, i: usize, question: &Question) -> Text<'static> {
    let mut text = Text::default();
    let focused = i == session.focused_question;
    let title_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    text.push_line(Line::from(vec![
        Span::from(if focused { "▶ " } else { "  " }),
        Span::styled(format!("Q{}. {}", i + 1, question.prompt()), title_style),
    ]));

    let selected = session.answers.get(&i).copied();
    for (j, option) in question.options().iter().enumerate() {
        let chosen = selected == Some(j);
        let marker = if chosen { "(•)" } else { "( )" };
        let style = if chosen { key_style() } else { Style::default() };
        text.push_line(Line::from(Span::styled(
            format!("    {} {}. {}", marker, j + 1, option),
            style,
        )));
    }
    text.push_line(Line::from(""));
    text
}
