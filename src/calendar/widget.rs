use super::grid::{month_weeks, GridDay, WeekdayExt, DAYS_IN_WEEK};
use crate::marking::{date_key, Marking, MarkingMap};
use crate::numerals::Numerals;
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::iter::successors;
use time::{Date, Weekday};

/// Number of columns per day of week: two for the day number and one for a
/// marking dot
const DAY_WIDTH: u16 = 3;

/// Width of a month grid in columns
const MONTH_WIDTH: u16 = 21;

/// Number of lines taken up by the title and the weekday header
const HEADER_LINES: u16 = 2;

/// Most weeks a month can touch
const MAX_WEEKS: u16 = 6;

/// Number of lines taken up by a month grid in a vertical list, including a
/// blank separator line
pub(crate) const MONTH_HEIGHT: u16 = HEADER_LINES + MAX_WEEKS + 1;

const LEFT_ARROW: &str = "<";
const RIGHT_ARROW: &str = ">";
const DOT: &str = "•";

/// A single month of the calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    month: Date,
    today: Date,
    theme: &'a Theme,
    marked_dates: &'a MarkingMap,
    first_day: Weekday,
    numerals: Numerals,
    hide_extra_days: bool,
    arrows: Option<ArrowState>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum ArrowState {
    Enabled,
    Disabled,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(
        month: Date,
        today: Date,
        theme: &'a Theme,
        marked_dates: &'a MarkingMap,
    ) -> MonthView<'a> {
        MonthView {
            month,
            today,
            theme,
            marked_dates,
            first_day: Weekday::Sunday,
            numerals: Numerals::Latin,
            hide_extra_days: true,
            arrows: None,
        }
    }

    pub(crate) fn first_day(mut self, first_day: Weekday) -> Self {
        self.first_day = first_day;
        self
    }

    pub(crate) fn numerals(mut self, numerals: Numerals) -> Self {
        self.numerals = numerals;
        self
    }

    pub(crate) fn hide_extra_days(mut self, hide: bool) -> Self {
        self.hide_extra_days = hide;
        self
    }

    pub(crate) fn arrows(mut self, arrows: Option<ArrowState>) -> Self {
        self.arrows = arrows;
        self
    }

    fn day_style(&self, day: GridDay, marking: Option<&Marking>) -> Style {
        let mut style = if day.in_month {
            self.theme.base
        } else {
            self.theme.extra_day
        };
        if day.date == self.today {
            style = style.patch(self.theme.today);
        }
        if let Some(marking) = marking {
            if marking.disabled {
                style = style.patch(self.theme.disabled_day);
            }
            if marking.selected {
                style = match marking.selected_color {
                    Some(c) => style.bg(c),
                    None => style.patch(self.theme.selected_day),
                };
            }
        }
        style
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.base);
        let left = area.width.saturating_sub(MONTH_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: (area.width - left).min(MONTH_WIDTH),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        let title = self
            .numerals
            .format(&format!("{} {}", self.month.month(), self.month.year()));
        canvas.draw_centered(0, &title, self.theme.month_title);
        if let Some(state) = self.arrows {
            let style = match state {
                ArrowState::Enabled => self.theme.arrow,
                ArrowState::Disabled => self.theme.disabled_arrow,
            };
            canvas.mvprint(0, 0, LEFT_ARROW, style);
            canvas.mvprint(0, MONTH_WIDTH - 1, RIGHT_ARROW, style);
        }
        let weekdays = successors(Some(self.first_day), |&wd| Some(wd.next())).take(DAYS_IN_WEEK);
        for (i, wd) in std::iter::zip(0u16.., weekdays) {
            canvas.mvprint(1, i * DAY_WIDTH, wd.abbrev(), self.theme.weekday);
        }
        for (week_no, week) in std::iter::zip(0u16.., month_weeks(self.month, self.first_day)) {
            let y = HEADER_LINES + week_no;
            for (col, day) in week.enumerate() {
                if !day.in_month && self.hide_extra_days {
                    continue;
                }
                let marking = self.marked_dates.get(&date_key(day.date));
                let x = col * DAY_WIDTH;
                let number = day.date.day();
                let text = self.numerals.format(&format!("{number:>2}"));
                canvas.mvprint(y, x, &text, self.day_style(day, marking));
                if let Some(color) = marking.and_then(Marking::dot) {
                    let style = match color {
                        Some(c) => self.theme.dot.fg(c),
                        None => self.theme.dot,
                    };
                    canvas.mvprint(y, x + 2, DOT, style);
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_centered(&mut self, y: u16, s: &str, style: Style) {
        let width = u16::try_from(s.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(y, MONTH_WIDTH.saturating_sub(width) / 2, s, style);
    }

    // Text extending beyond the area is truncated.
    fn mvprint(&mut self, y: u16, x: u16, s: &str, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::buffer_lines;
    use ratatui::style::{Color, Modifier};
    use time::macros::date;

    fn render(view: MonthView<'_>, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        buf
    }

    #[test]
    fn test_march_2024() {
        let marks = MarkingMap::new();
        let view = MonthView::new(
            date!(2024 - 03 - 31),
            date!(2024 - 03 - 15),
            &Theme::DEFAULT,
            &marks,
        );
        let buf = render(view, 21, 9);
        assert_eq!(
            buffer_lines(&buf),
            [
                "     March 2024      ",
                "Su Mo Tu We Th Fr Sa ",
                "                1  2 ",
                " 3  4  5  6  7  8  9 ",
                "10 11 12 13 14 15 16 ",
                "17 18 19 20 21 22 23 ",
                "24 25 26 27 28 29 30 ",
                "31                   ",
                "                     ",
            ]
        );
        assert_eq!(buf[(15, 4)].fg, Color::LightYellow);
        assert!(buf[(0, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_arrows_and_extra_days() {
        let marks = MarkingMap::new();
        let view = MonthView::new(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 15),
            &Theme::DEFAULT,
            &marks,
        )
        .hide_extra_days(false)
        .arrows(Some(ArrowState::Enabled));
        let buf = render(view, 21, 9);
        let lines = buffer_lines(&buf);
        assert_eq!(lines[0], "<    March 2024     >");
        assert_eq!(lines[2], "25 26 27 28 29  1  2 ");
        assert_eq!(lines[7], "31  1  2  3  4  5  6 ");
        assert_eq!(buf[(0, 2)].fg, Color::DarkGray);
        assert_eq!(buf[(0, 0)].fg, Color::LightCyan);
    }

    #[test]
    fn test_disabled_arrows() {
        let marks = MarkingMap::new();
        let view = MonthView::new(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 15),
            &Theme::DEFAULT,
            &marks,
        )
        .arrows(Some(ArrowState::Disabled));
        let buf = render(view, 21, 9);
        assert_eq!(buf[(20, 0)].symbol(), ">");
        assert_eq!(buf[(20, 0)].fg, Color::DarkGray);
    }

    #[test]
    fn test_markings() {
        let mut marks = MarkingMap::new();
        marks.insert(
            String::from("2024-03-05"),
            Marking {
                marked: true,
                dot_color: Some(Color::Red),
                ..Marking::default()
            },
        );
        marks.insert(
            String::from("2024-03-12"),
            Marking {
                selected: true,
                ..Marking::default()
            },
        );
        marks.insert(
            String::from("2024-03-20"),
            Marking {
                selected: true,
                selected_color: Some(Color::Blue),
                ..Marking::default()
            },
        );
        let view = MonthView::new(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 15),
            &Theme::DEFAULT,
            &marks,
        );
        let buf = render(view, 21, 9);
        let lines = buffer_lines(&buf);
        assert_eq!(lines[3], " 3  4  5• 6  7  8  9 ");
        assert_eq!(buf[(8, 3)].fg, Color::Red);
        assert!(buf[(6, 4)].modifier.contains(Modifier::REVERSED));
        assert_eq!(buf[(9, 5)].bg, Color::Blue);
    }

    #[test]
    fn test_monday_first_centered() {
        let marks = MarkingMap::new();
        let view = MonthView::new(
            date!(2026 - 02 - 01),
            date!(2026 - 02 - 15),
            &Theme::DEFAULT,
            &marks,
        )
        .first_day(Weekday::Monday);
        let buf = render(view, 25, 9);
        let lines = buffer_lines(&buf);
        assert_eq!(lines[0], "      February 2026      ");
        assert_eq!(lines[1], "  Mo Tu We Th Fr Sa Su   ");
        assert_eq!(lines[2], "                     1   ");
    }

    #[test]
    fn test_numerals() {
        let marks = MarkingMap::new();
        let view = MonthView::new(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 15),
            &Theme::DEFAULT,
            &marks,
        )
        .numerals(Numerals::ArabicIndic);
        let buf = render(view, 21, 9);
        let lines = buffer_lines(&buf);
        assert_eq!(lines[0], "     March ٢٠٢٤      ");
        assert_eq!(lines[4], "١٠ ١١ ١٢ ١٣ ١٤ ١٥ ١٦ ");
    }

    #[test]
    fn test_truncated() {
        let marks = MarkingMap::new();
        let view = MonthView::new(
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 15),
            &Theme::DEFAULT,
            &marks,
        );
        let buf = render(view, 10, 3);
        assert_eq!(
            buffer_lines(&buf),
            ["     March", "Su Mo Tu W", "          "]
        );
    }
}
