//! Boxed text field
//!
//! Renders a titled card with the field value. The end of the value stays
//! visible: single-line values scroll horizontally, multi-line values show
//! their last rows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{styles, Palette};

const CURSOR: &str = "▏";
const MASK: char = '•';

pub struct TextInput<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    masked: bool,
    palette: &'a Palette,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str, value: &'a str, palette: &'a Palette) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            masked: false,
            palette,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Draw every character as a bullet
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    fn display_value(&self) -> String {
        if self.masked {
            self.value.chars().map(|_| MASK).collect()
        } else {
            self.value.to_string()
        }
    }

    fn lines(&self, width: u16, height: u16) -> Vec<Line<'static>> {
        let p = self.palette;

        if self.value.is_empty() && !self.focused {
            return vec![Line::from(Span::styled(
                self.placeholder.to_string(),
                styles::text_muted(p),
            ))];
        }

        let value = self.display_value();
        let rows: Vec<&str> = value.split('\n').collect();
        let skip = rows.len().saturating_sub(usize::from(height.max(1)));
        let last = rows.len() - 1;

        rows.iter()
            .enumerate()
            .skip(skip)
            .map(|(i, row)| {
                if i == last && self.focused {
                    // Leave one column for the cursor
                    let visible = tail_within(row, usize::from(width.saturating_sub(1)));
                    Line::from(vec![
                        Span::styled(visible.to_string(), styles::text_primary(p)),
                        Span::styled(CURSOR, styles::accent_bold(p)),
                    ])
                } else {
                    Line::from(Span::styled(row.to_string(), styles::text_primary(p)))
                }
            })
            .collect()
    }
}

/// Longest suffix of `text` that fits in `width` display columns
pub fn tail_within(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > width {
            return &text[idx + ch.len_utf8()..];
        }
    }
    text
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_card(self.palette, self.label, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        Paragraph::new(self.lines(inner.width, inner.height)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_placeholder_when_empty_and_blurred() {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        let input = TextInput::new("Error Message", "", &palette).placeholder("Paste your error");
        term.render_widget(input, Rect::new(0, 0, 40, 3));

        assert!(term.buffer_contains("Error Message"));
        assert!(term.buffer_contains("Paste your error"));
    }

    #[test]
    fn test_focused_shows_cursor() {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        let input = TextInput::new("Name", "Ada", &palette).focused(true);
        term.render_widget(input, Rect::new(0, 0, 40, 3));

        assert!(term.buffer_contains("Ada▏"));
    }

    #[test]
    fn test_masked_value() {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        let input = TextInput::new("API Key", "sk-secret", &palette).masked(true);
        term.render_widget(input, Rect::new(0, 0, 40, 3));

        assert!(term.buffer_contains("•••••••••"));
        assert!(!term.buffer_contains("sk-secret"));
    }

    #[test]
    fn test_multiline_shows_last_rows() {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        let input = TextInput::new("Error", "one\ntwo\nthree", &palette);
        term.render_widget(input, Rect::new(0, 0, 40, 4));

        assert!(term.buffer_contains("three"));
        assert!(term.buffer_contains("two"));
        assert!(!term.buffer_contains("one"));
    }

    #[test]
    fn test_tail_within() {
        assert_eq!(tail_within("abcdef", 10), "abcdef");
        assert_eq!(tail_within("abcdef", 3), "def");
        assert_eq!(tail_within("日本語", 4), "本語");
        assert_eq!(tail_within("abc", 0), "");
    }
}
