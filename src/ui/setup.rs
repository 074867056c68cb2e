use super::{draw_header, draw_help, draw_status, key_style};
use crate::models::Level;
use crate::session::{Session, SetupField};
use crate::ui::layout::calculate_setup_chunks;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw_setup(f: &mut Frame, session: &Session) {
    let layout = calculate_setup_chunks(f.area());
    draw_header(f, layout.header_area, session);

    for (field, area) in SetupField::ALL.iter().zip(layout.field_areas) {
        let focused = session.setup.focused == *field;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let line = match field {
            SetupField::Level => level_line(session.setup.level),
            SetupField::Language if focused => Line::from(vec![
                Span::from(session.setup.language.clone()),
                Span::styled("   ←/→ presets", Style::default().fg(Color::DarkGray)),
            ]),
            _ => {
                let value = session.setup.value(*field);
                if value.is_empty() {
                    Line::from(Span::styled(
                        placeholder(*field),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Line::from(value)
                }
            }
        };

        let input = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(field.label()),
        );
        f.render_widget(input, area);

        if focused && *field != SetupField::Level {
            let typed = session.setup.value(*field);
            let x = area.x + 1 + unicode_width::UnicodeWidthStr::width(typed.as_str()) as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    draw_status(f, layout.message_area, session);
    draw_help(
        f,
        layout.help_area,
        &[
            ("Tab/↑/↓", "Field"),
            ("←/→", "Choose"),
            ("Enter", "Generate Explanation"),
            ("Ctrl+R", "Restart"),
            ("Esc", "Quit"),
        ],
    );
}

fn placeholder(field: SetupField) -> &'static str {
    match field {
        SetupField::Subject => "e.g., Mathematics",
        SetupField::Topic => "e.g., Derivatives of Trigonometric Functions",
        SetupField::Language => "e.g., English",
        SetupField::Level => "",
    }
}

fn level_line(selected: Level) -> Line<'static> {
    let mut spans = Vec::new();
    for level in Level::ALL {
        let (marker, style) = if level == selected {
            ("(•) ", key_style().add_modifier(Modifier::BOLD))
        } else {
            ("( ) ", Style::default())
        };
        spans.push(Span::styled(format!("{}{}   ", marker, level), style));
    }
    Line::from(spans)
}
