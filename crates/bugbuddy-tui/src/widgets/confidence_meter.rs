//! Confidence gauge coloured by level

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Gauge, Widget},
};

use bugbuddy_core::Confidence;

use crate::theme::Palette;

pub struct ConfidenceMeter<'a> {
    confidence: Confidence,
    palette: &'a Palette,
}

impl<'a> ConfidenceMeter<'a> {
    pub fn new(confidence: Confidence, palette: &'a Palette) -> Self {
        Self {
            confidence,
            palette,
        }
    }

    fn label(&self) -> String {
        format!(
            "{} · {} confidence",
            self.confidence,
            self.confidence.level().label()
        )
    }
}

impl Widget for ConfidenceMeter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.palette.confidence(self.confidence.level());
        let label = Span::styled(
            self.label(),
            Style::default()
                .fg(self.palette.text_primary)
                .add_modifier(Modifier::BOLD),
        );

        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(self.palette.surface))
            .percent(u16::from(self.confidence.value()))
            .label(label)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_meter_label() {
        let palette = Palette::default();
        let mut term = TestTerminal::new();
        let meter = ConfidenceMeter::new(Confidence::new(92).unwrap(), &palette);
        term.render_widget(meter, Rect::new(0, 0, 60, 1));

        assert!(term.buffer_contains("92% · High confidence"));
    }

    #[test]
    fn test_meter_low_level() {
        let palette = Palette::default();
        let meter = ConfidenceMeter::new(Confidence::new(41).unwrap(), &palette);
        assert_eq!(meter.label(), "41% · Low confidence");
    }
}
