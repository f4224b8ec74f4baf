use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Key bindings and what they do, in display order
static KEYS: &[(&str, &str)] = &[
    ("j, DOWN", "Scroll down one month"),
    ("k, UP", "Scroll up one month"),
    ("z, PAGE DOWN", "Scroll down one page"),
    ("w, PAGE UP", "Scroll up one page"),
    ("h, LEFT", "Previous month (horizontal)"),
    ("l, RIGHT", "Next month (horizontal)"),
    ("t", "Toggle horizontal layout"),
    ("r", "Reload marks file"),
    ("0, HOME", "Jump to today"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const FOOTER: &str = "Press the Any Key to dismiss.";

/// Blank columns between the key column and the descriptions
const KEY_GAP: usize = 2;

/// A popup listing the key bindings, centered over the calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Help<'a> {
    theme: &'a Theme,
}

impl<'a> Help<'a> {
    pub(crate) fn new(theme: &'a Theme) -> Help<'a> {
        Help { theme }
    }

    fn text(&self) -> Text<'static> {
        let key_width = KEYS
            .iter()
            .map(|(key, _)| key.len())
            .max()
            .unwrap_or_default()
            + KEY_GAP;
        let mut lines = KEYS
            .iter()
            .map(|&(key, action)| {
                Line::from(vec![
                    Span::styled(format!("{key:<key_width$}"), self.theme.weekday),
                    Span::raw(action),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(FOOTER));
        Text::from(lines)
    }
}

impl Widget for Help<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let block = Block::bordered()
            .title(Line::styled(" Commands ", self.theme.month_title))
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        // Two border columns and two padding columns
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let [help_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [help_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(block)
            .style(self.theme.base)
            .render(help_area, buf);
    }
}
