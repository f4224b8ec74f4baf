mod item;
use self::item::{should_skip_render, CalendarListItem, Callback, CellItem, CellProps};
use crate::calendar::month::{add_months, DayOverflow};
use crate::calendar::{Direction, MONTH_HEIGHT};
use crate::context::{CalendarContext, UpdateSource};
use crate::marking::MarkingMap;
use crate::numerals::Numerals;
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
use std::cell::Cell;
use std::rc::Rc;
use time::{Date, Weekday};

/// Default number of months shown before and after the start date
pub(crate) const DEFAULT_RANGE: u16 = 50;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ListOptions {
    pub(crate) horizontal: bool,
    pub(crate) hide_arrows: bool,
    pub(crate) hide_extra_days: bool,
    pub(crate) first_day: Weekday,
    pub(crate) numerals: Numerals,
    pub(crate) past_range: u16,
    pub(crate) future_range: u16,
}

impl Default for ListOptions {
    fn default() -> ListOptions {
        ListOptions {
            horizontal: false,
            hide_arrows: false,
            hide_extra_days: true,
            first_day: Weekday::Sunday,
            numerals: Numerals::Latin,
            past_range: DEFAULT_RANGE,
            future_range: DEFAULT_RANGE,
        }
    }
}

/// Counts of cells drawn and of cells reused from a previous frame
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RenderStats {
    pub(crate) rendered: usize,
    pub(crate) skipped: usize,
}

#[derive(Debug)]
struct RenderedCell {
    snapshot: CalendarListItem,
    area: Rect,
    context: CalendarContext,
    buffer: Buffer,
}

/// A scrollable list of months, one per cell
#[derive(Debug)]
pub(crate) struct CalendarList {
    months: Vec<Date>,
    current: usize,
    today: Date,
    options: ListOptions,
    theme: Theme,
    marked_dates: Rc<MarkingMap>,
    scroll_request: Rc<Cell<Option<Date>>>,
    scroll_to_month: Callback<Date>,
    cache: Vec<Option<RenderedCell>>,
    page_size: usize,
    cell_size: (u16, u16),
    stats: RenderStats,
}

impl CalendarList {
    pub(crate) fn new(
        start: Date,
        today: Date,
        options: ListOptions,
        marked_dates: MarkingMap,
    ) -> CalendarList {
        let past = -i32::from(options.past_range);
        let future = i32::from(options.future_range);
        let months = (past..=future)
            .filter_map(|i| add_months(start, i, DayOverflow::Clamp).ok())
            .collect::<Vec<_>>();
        let current = months
            .iter()
            .position(|&d| same_month(d, start))
            .unwrap_or_default();
        let scroll_request = Rc::new(Cell::new(None));
        let slot = Rc::clone(&scroll_request);
        let scroll_to_month = Callback::new(move |date| slot.set(Some(date)));
        CalendarList {
            months,
            current,
            today,
            options,
            theme: Theme::DEFAULT,
            marked_dates: Rc::new(marked_dates),
            scroll_request,
            scroll_to_month,
            cache: Vec::new(),
            page_size: 1,
            cell_size: (0, 0),
            stats: RenderStats::default(),
        }
    }

    /// The month at the top of the list (or shown alone, when horizontal)
    pub(crate) fn current_month(&self) -> Option<Date> {
        self.months.get(self.current).copied()
    }

    pub(crate) fn is_horizontal(&self) -> bool {
        self.options.horizontal
    }

    pub(crate) fn set_horizontal(&mut self, horizontal: bool) {
        self.options.horizontal = horizontal;
    }

    pub(crate) fn set_marked_dates(&mut self, marked_dates: MarkingMap) {
        self.marked_dates = Rc::new(marked_dates);
    }

    pub(crate) fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Move by `delta` cells.  Returns the new current month, or `None` if
    /// that would leave the list.
    pub(crate) fn scroll_by(&mut self, delta: isize) -> Option<Date> {
        let target = self
            .current
            .checked_add_signed(delta)
            .filter(|&i| i < self.months.len() && delta != 0)?;
        self.current = target;
        self.current_month()
    }

    pub(crate) fn scroll_down(&mut self) -> Option<Date> {
        self.scroll_by(1)
    }

    pub(crate) fn scroll_up(&mut self) -> Option<Date> {
        self.scroll_by(-1)
    }

    pub(crate) fn page_down(&mut self) -> Option<Date> {
        self.scroll_by(isize::try_from(self.page_size).unwrap_or(1))
    }

    pub(crate) fn page_up(&mut self) -> Option<Date> {
        self.scroll_by(-isize::try_from(self.page_size).unwrap_or(1))
    }

    fn position(&self, date: Date) -> Option<usize> {
        let key = (date.year(), u8::from(date.month()));
        self.months
            .binary_search_by_key(&key, |d| (d.year(), u8::from(d.month())))
            .ok()
    }

    /// Whether the month containing `date` is in the list
    pub(crate) fn contains_month(&self, date: Date) -> bool {
        self.position(date).is_some()
    }

    /// Make the month containing `date` current.  Returns `false` if the
    /// month is not in the list.
    pub(crate) fn scroll_to(&mut self, date: Date) -> bool {
        match self.position(date) {
            Some(i) => {
                self.current = i;
                true
            }
            None => false,
        }
    }

    /// Follow a change of the context's month made by something other than
    /// the list itself
    pub(crate) fn sync(&mut self, context: &CalendarContext) -> bool {
        if context.update_source() == UpdateSource::ListScroll || !context.month_changed() {
            return false;
        }
        self.scroll_to(context.date())
    }

    /// Press the arrow of the current cell pointing in `direction`.  Returns
    /// the date the cell asked to scroll to, if any.
    pub(crate) fn press_arrow(&self, direction: Direction, context: &CalendarContext) -> Option<Date> {
        if !self.options.horizontal || context.is_disabled() {
            return None;
        }
        let month = self.current_month()?;
        let (width, height) = self.cell_size;
        let cell = self.snapshot(CellItem::Month(month), Rect::new(0, 0, width, height));
        cell.press_arrow(direction);
        self.scroll_request.take()
    }

    fn snapshot(&self, item: CellItem, area: Rect) -> CalendarListItem {
        CalendarListItem {
            item,
            props: CellProps {
                width: area.width,
                height: area.height,
                horizontal: self.options.horizontal,
                hide_arrows: self.options.hide_arrows,
                hide_extra_days: self.options.hide_extra_days,
                first_day: self.options.first_day,
                today: self.today,
                theme: self.theme,
                numerals: self.options.numerals,
                scroll_to_month: Some(self.scroll_to_month.clone()),
                on_press_arrow_left: None,
                on_press_arrow_right: None,
            },
            marked_dates: Rc::clone(&self.marked_dates),
        }
    }

    /// Assign the months from the current one onwards to screen areas.  In a
    /// vertical list, a month that does not fit in the remaining space is
    /// shown as a placeholder label.
    fn layout(&self, area: Rect) -> Vec<(Rect, CellItem)> {
        let upcoming = self.months.get(self.current..).unwrap_or_default();
        if self.options.horizontal {
            return upcoming
                .first()
                .map(|&m| (area, CellItem::Month(m)))
                .into_iter()
                .collect();
        }
        let mut cells = Vec::new();
        let mut y = area.y;
        for &month in upcoming {
            let remaining = area.bottom().saturating_sub(y);
            if remaining == 0 {
                break;
            }
            let height = remaining.min(MONTH_HEIGHT);
            let item = if height == MONTH_HEIGHT {
                CellItem::Month(month)
            } else {
                CellItem::Label(month_label(month))
            };
            cells.push((Rect { y, height, ..area }, item));
            y += height;
        }
        cells
    }
}

/// Renders a [`CalendarList`], reusing each cell's previous drawing when
/// nothing it depends on has changed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarListView<'a> {
    context: &'a CalendarContext,
}

impl<'a> CalendarListView<'a> {
    pub(crate) fn new(context: &'a CalendarContext) -> CalendarListView<'a> {
        CalendarListView { context }
    }
}

impl StatefulWidget for CalendarListView<'_> {
    type State = CalendarList;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut CalendarList) {
        let cells = state
            .layout(area)
            .into_iter()
            .map(|(cell_area, item)| (cell_area, state.snapshot(item, cell_area)))
            .collect::<Vec<_>>();
        state.page_size = cells
            .iter()
            .filter(|(_, snap)| matches!(snap.item, CellItem::Month(_)))
            .count()
            .max(1);
        if let Some((cell_area, _)) = cells.first() {
            state.cell_size = (cell_area.width, cell_area.height);
        }
        state.cache.resize_with(cells.len(), || None);
        let mut stats = RenderStats::default();
        for ((cell_area, snapshot), slot) in cells.into_iter().zip(state.cache.iter_mut()) {
            // The context is compared as a whole, so any date change (a
            // scroll included) redraws every visible cell.
            match slot {
                Some(prev)
                    if prev.area == cell_area
                        && prev.context == *self.context
                        && should_skip_render(&prev.snapshot, &snapshot) =>
                {
                    blit(&prev.buffer, buf);
                    stats.skipped += 1;
                }
                _ => {
                    let mut buffer = Buffer::empty(cell_area);
                    snapshot.render(cell_area, &mut buffer, self.context);
                    blit(&buffer, buf);
                    *slot = Some(RenderedCell {
                        snapshot,
                        area: cell_area,
                        context: *self.context,
                        buffer,
                    });
                    stats.rendered += 1;
                }
            }
        }
        state.stats = stats;
    }
}

fn blit(src: &Buffer, dest: &mut Buffer) {
    let area = src.area.intersection(dest.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(from), Some(to)) = (src.cell((x, y)), dest.cell_mut((x, y))) {
                *to = from.clone();
            }
        }
    }
}

fn same_month(a: Date, b: Date) -> bool {
    (a.year(), a.month()) == (b.year(), b.month())
}

fn month_label(date: Date) -> String {
    format!("{} {}", date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::buffer_lines;
    use crate::marking::Marking;
    use time::macros::date;

    fn list(start: Date, horizontal: bool) -> CalendarList {
        let options = ListOptions {
            horizontal,
            past_range: 2,
            future_range: 3,
            ..ListOptions::default()
        };
        CalendarList::new(start, date!(2024 - 03 - 15), options, MarkingMap::new())
    }

    fn render(list: &mut CalendarList, ctx: &CalendarContext, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        CalendarListView::new(ctx).render(area, &mut buf, list);
        buf
    }

    #[test]
    fn test_months_keep_start_day() {
        let list = list(date!(2024 - 01 - 31), false);
        assert_eq!(
            list.months,
            [
                date!(2023 - 11 - 30),
                date!(2023 - 12 - 31),
                date!(2024 - 01 - 31),
                date!(2024 - 02 - 29),
                date!(2024 - 03 - 31),
                date!(2024 - 04 - 30),
            ]
        );
        assert_eq!(list.current_month(), Some(date!(2024 - 01 - 31)));
    }

    #[test]
    fn test_scroll_by() {
        let mut list = list(date!(2024 - 03 - 01), false);
        assert_eq!(list.scroll_by(1), Some(date!(2024 - 04 - 01)));
        assert_eq!(list.scroll_by(-3), Some(date!(2024 - 01 - 01)));
        assert_eq!(list.scroll_by(-1), None);
        assert_eq!(list.current_month(), Some(date!(2024 - 01 - 01)));
        assert_eq!(list.scroll_by(5), Some(date!(2024 - 06 - 01)));
        assert_eq!(list.scroll_by(1), None);
        assert_eq!(list.scroll_by(0), None);
    }

    #[test]
    fn test_scroll_to() {
        let mut list = list(date!(2024 - 03 - 01), false);
        assert!(list.scroll_to(date!(2024 - 05 - 17)));
        assert_eq!(list.current_month(), Some(date!(2024 - 05 - 01)));
        assert!(!list.scroll_to(date!(2025 - 05 - 17)));
        assert_eq!(list.current_month(), Some(date!(2024 - 05 - 01)));
        assert!(list.contains_month(date!(2024 - 01 - 31)));
        assert!(!list.contains_month(date!(2023 - 12 - 31)));
        assert!(list.contains_month(date!(2024 - 06 - 01)));
        assert!(!list.contains_month(date!(2024 - 07 - 01)));
    }

    #[test]
    fn test_sync() {
        let mut list = list(date!(2024 - 03 - 01), false);
        let mut ctx = CalendarContext::new(date!(2024 - 03 - 01));
        ctx.set_date(date!(2024 - 04 - 01), UpdateSource::ListScroll);
        assert!(!list.sync(&ctx));
        assert_eq!(list.current_month(), Some(date!(2024 - 03 - 01)));
        ctx.set_date(date!(2024 - 05 - 20), UpdateSource::TodayPress);
        assert!(list.sync(&ctx));
        assert_eq!(list.current_month(), Some(date!(2024 - 05 - 01)));
    }

    #[test]
    fn test_vertical_layout() {
        let mut list = list(date!(2024 - 03 - 01), false);
        let ctx = CalendarContext::new(date!(2024 - 03 - 01));
        let buf = render(&mut list, &ctx, 21, 20);
        let lines = buffer_lines(&buf);
        assert_eq!(lines[0], "     March 2024      ");
        assert_eq!(lines[2], "                1  2 ");
        assert_eq!(lines[9], "     April 2024      ");
        assert_eq!(lines[11], "    1  2  3  4  5  6 ");
        assert_eq!(lines[18], "                     ");
        assert_eq!(lines[19], "      May 2024       ");
        assert_eq!(list.page_size, 2);
        assert_eq!(
            list.stats(),
            RenderStats {
                rendered: 3,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_unchanged_cells_are_reused() {
        let mut list = list(date!(2024 - 03 - 01), false);
        let ctx = CalendarContext::new(date!(2024 - 03 - 01));
        let first = render(&mut list, &ctx, 21, 20);
        let second = render(&mut list, &ctx, 21, 20);
        assert_eq!(first, second);
        assert_eq!(
            list.stats(),
            RenderStats {
                rendered: 0,
                skipped: 3
            }
        );
    }

    #[test]
    fn test_scrolling_rerenders_moved_cells() {
        let mut list = list(date!(2024 - 03 - 01), false);
        let ctx = CalendarContext::new(date!(2024 - 03 - 01));
        render(&mut list, &ctx, 21, 20);
        list.scroll_by(1);
        let buf = render(&mut list, &ctx, 21, 20);
        assert_eq!(buffer_lines(&buf)[0], "     April 2024      ");
        assert_eq!(list.stats().rendered, 3);
    }

    #[test]
    fn test_marking_change_rerenders() {
        let mut list = list(date!(2024 - 03 - 01), false);
        let ctx = CalendarContext::new(date!(2024 - 03 - 01));
        render(&mut list, &ctx, 21, 20);
        list.set_marked_dates(MarkingMap::new());
        render(&mut list, &ctx, 21, 20);
        assert_eq!(list.stats().skipped, 3);
        let mut marks = MarkingMap::new();
        marks.insert(
            String::from("2024-03-05"),
            Marking {
                marked: true,
                ..Marking::default()
            },
        );
        list.set_marked_dates(marks);
        let buf = render(&mut list, &ctx, 21, 20);
        assert_eq!(list.stats().rendered, 3);
        assert_eq!(buffer_lines(&buf)[3], " 3  4  5• 6  7  8  9 ");
    }

    #[test]
    fn test_context_change_rerenders() {
        let mut list = list(date!(2024 - 03 - 01), true);
        let mut ctx = CalendarContext::new(date!(2024 - 03 - 01));
        render(&mut list, &ctx, 21, 9);
        ctx.set_disabled(true);
        render(&mut list, &ctx, 21, 9);
        assert_eq!(
            list.stats(),
            RenderStats {
                rendered: 1,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_horizontal_arrows() {
        let mut list = list(date!(2024 - 03 - 31), true);
        let mut ctx = CalendarContext::new(date!(2024 - 03 - 31));
        let buf = render(&mut list, &ctx, 25, 9);
        assert_eq!(buffer_lines(&buf)[0], "  <    March 2024     >  ");
        assert_eq!(
            list.press_arrow(Direction::Previous, &ctx),
            Some(date!(2024 - 02 - 29))
        );
        ctx.set_disabled(true);
        assert_eq!(list.press_arrow(Direction::Previous, &ctx), None);
        ctx.set_disabled(false);
        assert_eq!(
            list.press_arrow(Direction::Next, &ctx),
            Some(date!(2024 - 04 - 30))
        );
        // Pressing an arrow only requests a scroll; the list moves on sync.
        assert_eq!(list.current_month(), Some(date!(2024 - 03 - 31)));
        ctx.set_date(date!(2024 - 04 - 30), UpdateSource::ArrowPress);
        assert!(list.sync(&ctx));
        assert_eq!(list.current_month(), Some(date!(2024 - 04 - 30)));
    }

    #[test]
    fn test_vertical_arrows_do_nothing() {
        let mut list = list(date!(2024 - 03 - 01), false);
        let ctx = CalendarContext::new(date!(2024 - 03 - 01));
        render(&mut list, &ctx, 21, 20);
        assert_eq!(list.press_arrow(Direction::Next, &ctx), None);
    }

    #[test]
    fn test_toggle_orientation_rerenders() {
        let mut list = list(date!(2024 - 03 - 01), false);
        let ctx = CalendarContext::new(date!(2024 - 03 - 01));
        render(&mut list, &ctx, 21, 9);
        assert!(!list.is_horizontal());
        list.set_horizontal(true);
        let buf = render(&mut list, &ctx, 21, 9);
        assert_eq!(buffer_lines(&buf)[0], "<    March 2024     >");
        assert_eq!(list.stats().rendered, 1);
    }

    #[test]
    fn test_page_scroll() {
        let mut list = list(date!(2024 - 01 - 01), false);
        let ctx = CalendarContext::new(date!(2024 - 01 - 01));
        render(&mut list, &ctx, 21, 20);
        assert_eq!(list.page_down(), Some(date!(2024 - 03 - 01)));
        assert_eq!(list.page_up(), Some(date!(2024 - 01 - 01)));
        assert_eq!(list.page_up(), Some(date!(2023 - 11 - 01)));
        assert_eq!(list.page_up(), None);
    }
}
