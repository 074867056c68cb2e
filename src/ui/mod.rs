pub mod layout;
mod confirm;
mod content;
mod quiz;
mod setup;
mod summary;

pub use confirm::draw_restart_confirmation;
pub use content::{content_text, draw_content};
pub use layout::{calculate_setup_chunks, calculate_stage_chunks};
pub use quiz::{draw_quiz, quiz_text};
pub use setup::draw_setup;
pub use summary::{draw_results, results_text};

use crate::models::{AppState, Stage};
use crate::session::Session;
use crate::utils::{calculate_max_scroll, estimate_text_height, truncate_string};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, session: &mut Session, app_state: &AppState) {
    match session.stage {
        Stage::Setup => draw_setup(f, session),
        Stage::Explanation | Stage::Resources | Stage::Roadmap => draw_content(f, session),
        Stage::Quiz => draw_quiz(f, session),
        Stage::Results => draw_results(f, session),
    }
    if *app_state == AppState::RestartConfirm {
        draw_restart_confirmation(f);
    }
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// A footer line of `key description` pairs.
fn help_line(entries: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, description) in entries {
        spans.push(Span::styled(key.to_string(), key_style()));
        spans.push(Span::from(format!(" {}  ", description)));
    }
    Line::from(spans)
}

fn draw_help(f: &mut Frame, area: Rect, entries: &[(&str, &str)]) {
    let help = Paragraph::new(help_line(entries))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

fn draw_header(f: &mut Frame, area: Rect, session: &Session) {
    let title = if session.setup.subject.trim().is_empty() {
        "AI Study Tutor".to_string()
    } else {
        format!(
            "AI Study Tutor - {}: {} ({}, {})",
            session.setup.subject.trim(),
            session.setup.topic.trim(),
            session.setup.language.trim(),
            session.setup.level
        )
    };
    let width = area.width.saturating_sub(2) as usize;
    let header = Paragraph::new(truncate_string(&title, width))
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Render `text` in a bordered, wrapped panel, clamping `scroll_y` to the content.
fn draw_scrolled(f: &mut Frame, area: Rect, title: &str, text: Text<'static>, scroll_y: &mut u16) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2) as usize;
    let content_height = estimate_text_height(&text, text_width);
    *scroll_y = (*scroll_y).min(calculate_max_scroll(content_height, visible_height));

    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((*scroll_y, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );
    f.render_widget(panel, area);
}

/// Pending notice, error, or hint for the step after the current stage.
fn status_text(session: &Session) -> Text<'static> {
    if let Some(kind) = session.pending {
        return Text::from(Line::from(Span::styled(
            format!("Generating {}... please wait.", kind.title().to_lowercase()),
            Style::default().fg(Color::Yellow),
        )));
    }

    let error_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    if let Some(message) = &session.validation_error {
        return Text::from(Line::from(Span::styled(message.clone(), error_style)));
    }

    match session.stage.next_generation() {
        Some(next) => match session.error_for(next) {
            Some(message) => Text::from(vec![
                Line::from(Span::styled(
                    format!("{} failed: {}", next.title(), message),
                    error_style,
                )),
                Line::from("Press the generate key again to retry."),
            ]),
            None => Text::from(format!(
                "Next step: generate the {}.",
                next.title().to_lowercase()
            )),
        },
        None => Text::default(),
    }
}

fn draw_status(f: &mut Frame, area: Rect, session: &Session) {
    let status = Paragraph::new(status_text(session))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}
