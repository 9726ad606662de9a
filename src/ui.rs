use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::metrics::completion_message;
use crate::session::Phase;
use crate::typing_test::SessionView;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub const LEGEND: &str =
    "(tab) retry / (enter) new / (f1) difficulty / (f2) content / (f3) time / (f4) sound / (esc) quit";

/// How a single text character is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Correct,
    Incorrect(char),
    Cursor,
    Pending,
}

fn classify(idx: usize, expected: char, view: &SessionView<'_>, typed: &[char]) -> Cell {
    match typed.get(idx) {
        Some(&c) if c == expected => Cell::Correct,
        Some(&c) => Cell::Incorrect(c),
        None if idx == view.cursor_position && !view.is_complete => Cell::Cursor,
        None => Cell::Pending,
    }
}

fn stats_line(view: &SessionView<'_>) -> String {
    let mut line = format!("{} wpm   {}% acc", view.wpm, view.accuracy);
    if !view.settings.time_limit.is_unlimited() {
        line.push_str(&format!("   {}s left", view.time_remaining));
    }
    line
}

fn settings_line(view: &SessionView<'_>) -> String {
    let s = view.settings;
    format!(
        "{} | {} | {} | sound {}",
        s.difficulty,
        s.content_type,
        s.time_limit,
        if s.sound_enabled { "on" } else { "off" }
    )
}

fn text_spans<'a>(view: &SessionView<'a>) -> Vec<Span<'a>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let green = bold.fg(Color::Green);
    let red = bold.fg(Color::Red);
    let dim = bold.add_modifier(Modifier::DIM);
    let cursor = dim.add_modifier(Modifier::UNDERLINED);
    let ghost = Style::default().bg(Color::Magenta);

    let typed: Vec<char> = view.input.chars().collect();

    view.text
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let (symbol, style) = match classify(idx, expected, view, &typed) {
                Cell::Correct => (expected, green),
                Cell::Incorrect(' ') => ('·', red),
                Cell::Incorrect(c) => (c, red),
                Cell::Cursor => (expected, cursor),
                Cell::Pending => (expected, dim),
            };
            let style = if view.ghost_position == Some(idx) {
                style.patch(ghost)
            } else {
                style
            };
            Span::styled(symbol.to_string(), style)
        })
        .collect()
}

fn footer_line(view: &SessionView<'_>) -> Span<'static> {
    if view.phase == Phase::Complete {
        return Span::styled(
            completion_message(view.accuracy),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        );
    }
    if view.is_previous_attempt {
        return Span::styled(
            "racing your previous attempt",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        );
    }
    Span::raw("")
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let italic = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let text_width = self.text.width();
        let prompt_lines = text_width.div_ceil(usize::from(max_chars_per_line)).max(1) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // stats
                Constraint::Length(1), // progress
                Constraint::Min(1),    // padding
                Constraint::Length(prompt_lines),
                Constraint::Min(1), // padding
                Constraint::Length(1), // completion / ghost notice
                Constraint::Length(1), // settings
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(stats_line(&self), bold))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let ratio = (self.progress / 100.0).clamp(0.0, 1.0);
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(format!("{:.0}%", self.progress))
            .render(chunks[1], buf);

        Paragraph::new(Line::from(text_spans(&self)))
            .alignment(if prompt_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[3], buf);

        Paragraph::new(footer_line(&self))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        Paragraph::new(Span::styled(
            settings_line(&self),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

        Paragraph::new(Span::styled(LEGEND, italic)).render(chunks[7], buf);
    }
}
