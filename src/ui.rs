pub mod report;

use std::io;

use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Terminal,
};

use crate::{
    engine::{EngineView, ExitReason, Renderer},
    segment::{Cell, Verdict},
    stats::RunStats,
    theme::Theme,
};

pub use report::ReportWidget;

/// Draws the target text of the active segment with per-character verdicts
pub struct TypingWidget<'a> {
    pub view: &'a EngineView<'a>,
    pub theme: &'a Theme,
}

impl TypingWidget<'_> {
    fn cell_style(&self, cell: &Cell, at_cursor: bool) -> Style {
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let style = match cell.verdict {
            Verdict::Pending => Style::default().fg(self.theme.fgcol),
            Verdict::Correct => Style::default().fg(self.theme.hicol),
            Verdict::Incorrect => bold.fg(self.theme.errcol),
        };

        if at_cursor {
            let cursor = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            if cell.verdict == Verdict::Incorrect {
                cursor
            } else {
                cursor.fg(self.theme.hicol2)
            }
        } else {
            style
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![];
        let mut spans = vec![];

        for (idx, cell) in self.view.cells.iter().enumerate() {
            let style = self.cell_style(cell, idx == self.view.cursor);

            if cell.char == '\n' {
                if idx == self.view.cursor {
                    spans.push(Span::styled(" ", style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
                continue;
            }

            let shown = match (cell.char, cell.verdict) {
                (' ', Verdict::Incorrect) => "·".to_owned(),
                (c, _) => c.to_string(),
            };
            spans.push(Span::styled(shown, style));
        }
        lines.push(Line::from(spans));

        lines
    }

    fn header(&self) -> Option<String> {
        let timer = self.view.remaining.map(|r| {
            let secs = r.as_secs() + u64::from(r.subsec_nanos() > 0);
            secs.to_string()
        });
        let progress = (self.view.segment_count > 1)
            .then(|| format!("{}/{}", self.view.segment + 1, self.view.segment_count));

        match (timer, progress) {
            (Some(t), Some(p)) => Some(format!("{t}  {p}")),
            (Some(t), None) => Some(t),
            (None, Some(p)) => Some(p),
            (None, None) => None,
        }
    }
}

/// Rect of at most `width` x `height` centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Widget for TypingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.bgcol));

        let lines = self.lines();
        let width = lines.iter().map(Line::width).max().unwrap_or(0);
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        // header line plus a blank line above the text
        let block = centered(area, width.max(1), height.saturating_add(2));

        if let Some(header) = self.header() {
            let header_area = Rect { height: 1, ..block };
            Paragraph::new(Span::styled(
                header,
                Style::default()
                    .fg(self.theme.hicol3)
                    .add_modifier(Modifier::BOLD),
            ))
            .render(header_area, buf);
        }

        let text_area = Rect {
            y: block.y + 2u16.min(block.height),
            height: block.height.saturating_sub(2),
            ..block
        };
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(text_area, buf);
    }
}

/// Renderer backed by a ratatui terminal
pub struct TerminalRenderer<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    theme: &'t Theme,
}

impl<'t, B: Backend> TerminalRenderer<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>, theme: &'t Theme) -> Self {
        Self { terminal, theme }
    }

    pub fn draw_report(&mut self, stats: &RunStats, reason: ExitReason) -> io::Result<()> {
        let widget = ReportWidget {
            stats,
            reason,
            theme: self.theme,
        };
        self.terminal.hide_cursor()?;
        self.terminal.draw(|f| f.render_widget(widget, f.area()))?;
        Ok(())
    }
}

impl<B: Backend> Renderer for TerminalRenderer<'_, B> {
    fn draw(&mut self, view: &EngineView<'_>) -> io::Result<()> {
        let theme = self.theme;
        self.terminal
            .draw(|f| f.render_widget(TypingWidget { view, theme }, f.area()))?;
        Ok(())
    }
}
