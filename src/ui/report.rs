use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{engine::ExitReason, stats::RunStats, theme::Theme, ui::centered};

/// Results of a finished run, shown until the learner starts again or quits
pub struct ReportWidget<'a> {
    pub stats: &'a RunStats,
    pub reason: ExitReason,
    pub theme: &'a Theme,
}

impl Widget for ReportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.bgcol));

        let label = Style::default().fg(self.theme.hicol3);
        let value = Style::default()
            .fg(self.theme.hicol)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![];
        if self.reason == ExitReason::Timeout {
            lines.push(Line::from(Span::styled("time's up", label)));
            lines.push(Line::default());
        }
        lines.extend([
            Line::from(vec![
                Span::styled("WPM: ", label),
                Span::styled(self.stats.wpm.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("CPM: ", label),
                Span::styled(self.stats.cpm.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Accuracy: ", label),
                Span::styled(format!("{:.2}%", self.stats.accuracy), value),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "(esc) new test / (ctrl-c) quit",
                Style::default()
                    .fg(self.theme.fgcol)
                    .add_modifier(Modifier::ITALIC),
            )),
        ]);

        let width = lines.iter().map(Line::width).max().unwrap_or(0);
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(centered(area, width, height), buf);
    }
}
