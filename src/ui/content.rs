use super::{draw_header, draw_help, draw_scrolled, draw_status};
use crate::models::{ResourceItem, Roadmap, Stage};
use crate::session::Session;
use crate::ui::layout::calculate_stage_chunks;
use crate::utils::render_markdown;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

pub fn draw_content(f: &mut Frame, session: &mut Session) {
    let layout = calculate_stage_chunks(f.area());
    draw_header(f, layout.header_area, session);

    let title = match session.stage {
        Stage::Explanation => "Explanation",
        Stage::Resources => "Resources",
        _ => "Roadmap",
    };
    let text = content_text(session);
    draw_scrolled(f, layout.body_area, title, text, &mut session.scroll_y);

    draw_status(f, layout.status_area, session);

    let next = session
        .stage
        .next_generation()
        .map(|kind| format!("Generate {}", kind.title()))
        .unwrap_or_default();
    draw_help(
        f,
        layout.help_area,
        &[
            ("n", next.as_str()),
            ("↑/↓", "Scroll"),
            ("Ctrl+R", "Restart"),
            ("q", "Quit"),
        ],
    );
}

/// Body of the current content stage.
pub fn content_text(session: &Session) -> Text<'static> {
    match session.stage {
        Stage::Explanation => session
            .explanation
            .as_deref()
            .map(|text| Text::from(render_markdown(text)))
            .unwrap_or_default(),
        Stage::Resources => session
            .resources
            .as_deref()
            .map(resources_text)
            .unwrap_or_default(),
        Stage::Roadmap => session
            .roadmap
            .as_ref()
            .map(roadmap_text)
            .unwrap_or_default(),
        _ => Text::default(),
    }
}

fn resources_text(resources: &[ResourceItem]) -> Text<'static> {
    let mut text = Text::default();
    for (i, resource) in resources.iter().enumerate() {
        let mut title = vec![Span::styled(
            format!("{}. {}", i + 1, resource.title),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(media) = &resource.media {
            title.push(Span::styled(
                format!("  [{}]", media),
                Style::default().fg(Color::Cyan),
            ));
        }
        text.push_line(Line::from(title));
        text.push_line(Line::from(Span::styled(
            format!("   {}", resource.url),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )));
        if !resource.reason.is_empty() {
            text.push_line(Line::from(format!("   {}", resource.reason)));
        }
        text.push_line(Line::from(""));
    }
    text
}

fn roadmap_text(roadmap: &Roadmap) -> Text<'static> {
    let mut text = Text::default();
    for (i, stage) in roadmap.stages.iter().enumerate() {
        text.push_line(Line::from(Span::styled(
            format!("Stage {}: {}", i + 1, stage.stage),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(format!("   Effort: {}", stage.effort)));
        text.push_line(Line::from(format!("   Outcome: {}", stage.outcome)));
        text.push_line(Line::from(""));
    }

    if !roadmap.mistakes.is_empty() {
        text.push_line(Line::from(Span::styled(
            "Common mistakes to avoid:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for mistake in &roadmap.mistakes {
            text.push_line(Line::from(format!("  • {}", mistake)));
        }
    }
    text
}
