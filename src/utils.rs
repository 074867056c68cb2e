pub mod markdown;

pub use markdown::render_markdown;

use ratatui::text::Text;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `s` to at most `max_width` display columns, ending in "...".
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Rows `text` needs once wrapped to `width` columns.
pub fn estimate_text_height(text: &Text, width: usize) -> usize {
    if width == 0 {
        return text.lines.len();
    }
    text.lines
        .iter()
        .map(|line| {
            let line_width: usize = line.spans.iter().map(|s| s.content.width()).sum();
            line_width.div_ceil(width).max(1)
        })
        .sum()
}

pub fn calculate_max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height
        .saturating_sub(visible_height)
        .min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Line;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("This is a very long string that should be truncated", 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.width() <= 20);
    }

    #[test]
    fn test_truncate_string_wide_chars() {
        let result = truncate_string("数学数学数学数学", 9);
        assert_eq!(result, "数学数...");
        assert!(result.width() <= 9);
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 20), "");
    }

    #[test]
    fn test_estimate_text_height_wraps() {
        let text = Text::from(vec![
            Line::from("0123456789abc"),
            Line::from(""),
            Line::from("short"),
        ]);
        assert_eq!(estimate_text_height(&text, 10), 4);
    }

    #[test]
    fn test_calculate_max_scroll() {
        assert_eq!(calculate_max_scroll(30, 10), 20);
        assert_eq!(calculate_max_scroll(5, 10), 0);
    }
}
