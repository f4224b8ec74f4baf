use crate::calendar::Direction;
use crate::context::{CalendarContext, UpdateSource};
use crate::help::Help;
use crate::list::{CalendarList, CalendarListView};
use crate::marking::load_markings;
use crate::theme::{Theme, BASE_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};
use std::path::PathBuf;
use time::Date;

#[derive(Debug)]
pub(crate) struct App {
    list: CalendarList,
    context: CalendarContext,
    today: Date,
    marks_file: Option<PathBuf>,
    state: AppState,
}

impl App {
    pub(crate) fn new(list: CalendarList, today: Date, marks_file: Option<PathBuf>) -> App {
        let context = CalendarContext::new(list.current_month().unwrap_or(today));
        App {
            list,
            context,
            today,
            marks_file,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        let stats = self.list.stats();
        log::trace!(
            "Frame drawn: {} cells rendered, {} reused",
            stats.rendered,
            stats.skipped
        );
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('j') | KeyCode::Down => self.scroll(CalendarList::scroll_down),
                KeyCode::Char('k') | KeyCode::Up => self.scroll(CalendarList::scroll_up),
                KeyCode::Char('z') | KeyCode::PageDown => self.scroll(CalendarList::page_down),
                KeyCode::Char('w') | KeyCode::PageUp => self.scroll(CalendarList::page_up),
                KeyCode::Char('h') | KeyCode::Left => self.press_arrow(Direction::Previous),
                KeyCode::Char('l') | KeyCode::Right => self.press_arrow(Direction::Next),
                KeyCode::Char('t') => {
                    self.list.set_horizontal(!self.list.is_horizontal());
                    true
                }
                KeyCode::Char('r') => self.reload_marks(),
                KeyCode::Char('0') | KeyCode::Home => self.jump_to_today(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    self.context.set_disabled(true);
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                self.context.set_disabled(false);
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn scroll<F>(&mut self, func: F) -> bool
    where
        F: FnOnce(&mut CalendarList) -> Option<Date>,
    {
        if let Some(month) = func(&mut self.list) {
            self.context.set_date(month, UpdateSource::ListScroll);
            true
        } else {
            false
        }
    }

    fn press_arrow(&mut self, direction: Direction) -> bool {
        let Some(date) = self.list.press_arrow(direction, &self.context) else {
            return false;
        };
        if !self.list.contains_month(date) {
            log::debug!("Month of {date} is outside the list; ignoring arrow press");
            return false;
        }
        self.context.set_date(date, UpdateSource::ArrowPress);
        self.list.sync(&self.context)
    }

    fn jump_to_today(&mut self) -> bool {
        if !self.list.contains_month(self.today) {
            log::debug!("Today ({}) is outside the list", self.today);
            return false;
        }
        self.context.set_date(self.today, UpdateSource::TodayPress);
        self.list.sync(&self.context);
        true
    }

    fn reload_marks(&mut self) -> bool {
        let Some(path) = self.marks_file.as_deref() else {
            return false;
        };
        match load_markings(path) {
            Ok(marks) => {
                self.list.set_marked_dates(marks);
                true
            }
            Err(e) => {
                log::warn!("Failed to reload marks: {e}");
                false
            }
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        CalendarListView::new(&self.context).render(area, buf, &mut self.list);
        if self.state == AppState::Helping {
            Help::new(&Theme::DEFAULT).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
