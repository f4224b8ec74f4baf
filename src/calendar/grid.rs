use std::iter::successors;
use time::{Date, Weekday};

pub(super) const DAYS_IN_WEEK: usize = 7;

pub(super) trait WeekdayExt {
    /// Column of the weekday in a week that starts on `first_day`
    fn column(self, first_day: Weekday) -> u16;

    fn abbrev(self) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn column(self, first_day: Weekday) -> u16 {
        let offset = self.number_days_from_sunday() + 7 - first_day.number_days_from_sunday();
        u16::from(offset % 7)
    }

    fn abbrev(self) -> &'static str {
        match self {
            Weekday::Sunday => "Su",
            Weekday::Monday => "Mo",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "We",
            Weekday::Thursday => "Th",
            Weekday::Friday => "Fr",
            Weekday::Saturday => "Sa",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GridDay {
    pub(super) date: Date,
    /// `false` for the days of the neighboring months that pad out the first
    /// and last weeks
    pub(super) in_month: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Week {
    first_day: Weekday,
    days: [Option<GridDay>; DAYS_IN_WEEK],
}

impl Week {
    fn new(first_day: Weekday) -> Self {
        Week {
            first_day,
            days: [None; DAYS_IN_WEEK],
        }
    }

    fn set(&mut self, day: GridDay) {
        let i = usize::from(day.date.weekday().column(self.first_day));
        assert!(i < DAYS_IN_WEEK, "weekday column should be less than 7");
        self.days[i] = Some(day);
    }

    fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    fn last(&self) -> Option<GridDay> {
        self.days.iter().flatten().last().copied()
    }

    /// Iterate over the days of the week paired with their columns
    pub(super) fn enumerate(&self) -> impl Iterator<Item = (u16, GridDay)> + '_ {
        std::iter::zip(0u16.., self.days.iter()).filter_map(|(i, d)| d.map(|d| (i, d)))
    }
}

/// Lay out the month containing `month` as a sequence of weeks, padding the
/// first and last weeks with days from the adjacent months
pub(super) fn month_weeks(month: Date, first_day: Weekday) -> Vec<Week> {
    let Ok(first) = month.replace_day(1) else {
        return Vec::new();
    };
    let mut weeks = Vec::with_capacity(6);
    let mut week = Week::new(first_day);
    let lead = usize::from(first.weekday().column(first_day));
    for date in iter_days_before(first).take(lead) {
        week.set(GridDay {
            date,
            in_month: false,
        });
    }
    for date in successors(Some(first), |&d| d.next_day()).take_while(|d| d.month() == first.month())
    {
        if date.weekday() == first_day && !week.is_empty() {
            weeks.push(week);
            week = Week::new(first_day);
        }
        week.set(GridDay {
            date,
            in_month: true,
        });
    }
    if let Some(last) = week.last() {
        let trail = DAYS_IN_WEEK - 1 - usize::from(last.date.weekday().column(first_day));
        for date in iter_days_after(last.date).take(trail) {
            week.set(GridDay {
                date,
                in_month: false,
            });
        }
    }
    weeks.push(week);
    weeks
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
