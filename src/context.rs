use time::Date;

/// What caused the most recent change to the context's date
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum UpdateSource {
    CalendarInit,
    TodayPress,
    ListScroll,
    ArrowPress,
}

/// State shared by the calendar list with every cell it renders
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarContext {
    date: Date,
    prev_date: Date,
    update_source: UpdateSource,
    disabled: bool,
}

impl CalendarContext {
    pub(crate) fn new(date: Date) -> CalendarContext {
        CalendarContext {
            date,
            prev_date: date,
            update_source: UpdateSource::CalendarInit,
            disabled: false,
        }
    }

    pub(crate) fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn update_source(&self) -> UpdateSource {
        self.update_source
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_date(&mut self, date: Date, source: UpdateSource) {
        log::debug!("Context date set to {date} by {source:?}");
        self.prev_date = self.date;
        self.date = date;
        self.update_source = source;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether the last `set_date()` moved to a different month
    pub(crate) fn month_changed(&self) -> bool {
        (self.date.year(), self.date.month()) != (self.prev_date.year(), self.prev_date.month())
    }
}
