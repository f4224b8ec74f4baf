use crate::calendar::{adjacent_month, ArrowState, Direction, MonthView};
use crate::context::CalendarContext;
use crate::marking::MarkingMap;
use crate::numerals::Numerals;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};
use std::fmt;
use std::rc::Rc;
use time::{Date, Weekday};

/// What a calendar list cell shows
#[derive(Clone, Debug)]
pub(crate) enum CellItem {
    /// The month containing the given date
    Month(Date),
    /// Placeholder text shown instead of a month grid
    Label(String),
}

impl CellItem {
    fn same_identity(&self, other: &CellItem) -> bool {
        match (self, other) {
            (CellItem::Month(a), CellItem::Month(b)) => a.to_julian_day() == b.to_julian_day(),
            (CellItem::Label(a), CellItem::Label(b)) => a == b,
            _ => false,
        }
    }
}

/// A shared event handler.  Two callbacks are equal only if they are the same
/// closure.
pub(crate) struct Callback<T>(Rc<dyn Fn(T)>);

impl<T> Callback<T> {
    pub(crate) fn new<F>(func: F) -> Callback<T>
    where
        F: Fn(T) + 'static,
    {
        Callback(Rc::new(func))
    }

    pub(crate) fn call(&self, arg: T) {
        (self.0)(arg);
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Callback<T> {
        Callback(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Callback<T> {
    fn eq(&self, other: &Callback<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for Callback<T> {}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// Passed to an arrow override handler in place of the default month change
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ArrowPress {
    pub(crate) direction: Direction,
    pub(crate) month: Date,
}

impl fmt::Display for ArrowPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} arrow pressed on {}", self.direction, self.month)
    }
}

/// Display configuration of a cell other than its item and markings
#[derive(Clone, Debug)]
pub(crate) struct CellProps {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) horizontal: bool,
    pub(crate) hide_arrows: bool,
    pub(crate) hide_extra_days: bool,
    pub(crate) first_day: Weekday,
    pub(crate) today: Date,
    pub(crate) theme: Theme,
    pub(crate) numerals: Numerals,
    pub(crate) scroll_to_month: Option<Callback<Date>>,
    pub(crate) on_press_arrow_left: Option<Callback<ArrowPress>>,
    pub(crate) on_press_arrow_right: Option<Callback<ArrowPress>>,
}

impl CellProps {
    fn changed_from(&self, other: &CellProps) -> bool {
        let CellProps {
            width,
            height,
            horizontal,
            hide_arrows,
            hide_extra_days,
            first_day,
            today,
            theme,
            numerals,
            scroll_to_month,
            on_press_arrow_left,
            on_press_arrow_right,
        } = self;
        width != &other.width
            || height != &other.height
            || horizontal != &other.horizontal
            || hide_arrows != &other.hide_arrows
            || hide_extra_days != &other.hide_extra_days
            || first_day != &other.first_day
            || today != &other.today
            || theme != &other.theme
            || numerals != &other.numerals
            || scroll_to_month != &other.scroll_to_month
            || on_press_arrow_left != &other.on_press_arrow_left
            || on_press_arrow_right != &other.on_press_arrow_right
    }
}

/// Everything a cell is drawn from
#[derive(Clone, Debug)]
pub(crate) struct CalendarListItem {
    pub(crate) item: CellItem,
    pub(crate) props: CellProps,
    pub(crate) marked_dates: Rc<MarkingMap>,
}

impl CalendarListItem {
    /// Handle a press of the month arrow pointing in `direction`.
    ///
    /// An override handler for the arrow takes precedence.  Otherwise, a
    /// horizontal cell asks its `scroll_to_month` callback to move to the
    /// adjacent month.  With neither, nothing happens.
    pub(crate) fn press_arrow(&self, direction: Direction) {
        let CellItem::Month(month) = self.item else {
            return;
        };
        let handler = match direction {
            Direction::Previous => self.props.on_press_arrow_left.as_ref(),
            Direction::Next => self.props.on_press_arrow_right.as_ref(),
        };
        if let Some(handler) = handler {
            let press = ArrowPress { direction, month };
            log::debug!("{press}; calling override handler");
            handler.call(press);
        } else if self.props.horizontal {
            if let Some(scroll_to_month) = &self.props.scroll_to_month {
                match adjacent_month(month, direction) {
                    Ok(date) => {
                        log::debug!("{direction:?} arrow pressed on {month}; scrolling to {date}");
                        scroll_to_month.call(date);
                    }
                    Err(e) => log::debug!("{direction:?} arrow pressed on {month}: {e}"),
                }
            }
        }
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, context: &CalendarContext) {
        let props = &self.props;
        match &self.item {
            CellItem::Month(month) => {
                let arrows = (props.horizontal && !props.hide_arrows).then(|| {
                    if context.is_disabled() {
                        ArrowState::Disabled
                    } else {
                        ArrowState::Enabled
                    }
                });
                MonthView::new(*month, props.today, &props.theme, &self.marked_dates)
                    .first_day(props.first_day)
                    .numerals(props.numerals)
                    .hide_extra_days(props.hide_extra_days)
                    .arrows(arrows)
                    .render(area, buf);
            }
            CellItem::Label(label) => {
                buf.set_style(area, props.theme.base);
                if area.height > 0 {
                    let text = props.numerals.format(label);
                    let line_area = Rect {
                        y: area.y + area.height / 2,
                        height: 1,
                        ..area
                    };
                    Paragraph::new(Line::styled(text, props.theme.placeholder))
                        .alignment(Alignment::Center)
                        .render(line_area, buf);
                }
            }
        }
    }
}

/// Decide whether a cell drawn from `prev` can be reused in place of drawing
/// `next`
pub(crate) fn should_skip_render(prev: &CalendarListItem, next: &CalendarListItem) -> bool {
    let item_equal = prev.item.same_identity(&next.item);
    let props_changed = next.props.changed_from(&prev.props);
    let markings_equal = Rc::ptr_eq(&prev.marked_dates, &next.marked_dates)
        || prev.marked_dates == next.marked_dates;
    item_equal && !props_changed && markings_equal
}
