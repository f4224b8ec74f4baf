use thiserror::Error;
use time::{Date, Duration, Month};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Previous,
    Next,
}

/// What to do with a day-of-month that does not exist in the target month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DayOverflow {
    /// Use the last day of the target month instead
    Clamp,
    /// Carry the excess days over into the following month
    Spill,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

pub(crate) fn add_months(
    date: Date,
    months: i32,
    overflow: DayOverflow,
) -> Result<Date, OutOfTimeError> {
    let index = date
        .year()
        .checked_mul(12)
        .and_then(|i| i.checked_add(i32::from(u8::from(date.month())) - 1))
        .and_then(|i| i.checked_add(months))
        .ok_or(OutOfTimeError)?;
    let year = index.div_euclid(12);
    let month = u8::try_from(index.rem_euclid(12) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(OutOfTimeError)?;
    let day = date.day();
    match overflow {
        DayOverflow::Clamp => (1..=day)
            .rev()
            .find_map(|d| Date::from_calendar_date(year, month, d).ok())
            .ok_or(OutOfTimeError),
        DayOverflow::Spill => Date::from_calendar_date(year, month, 1)
            .ok()
            .and_then(|first| first.checked_add(Duration::days(i64::from(day) - 1)))
            .ok_or(OutOfTimeError),
    }
}

/// Returns a date in the calendar month immediately before or after that of
/// `reference`.
///
/// Moving forwards keeps the day of the month where possible and otherwise
/// uses the last day of the next month.  Moving backwards always lands in the
/// previous month, never merely thirty-odd days earlier.
pub(crate) fn adjacent_month(reference: Date, direction: Direction) -> Result<Date, OutOfTimeError> {
    match direction {
        Direction::Next => add_months(reference, 1, DayOverflow::Clamp),
        Direction::Previous => {
            let mut date = add_months(reference, -1, DayOverflow::Spill)?;
            // A day past the end of a short month spills back into the
            // reference month.
            while date.month() == reference.month() {
                date = date.previous_day().ok_or(OutOfTimeError)?;
            }
            Ok(date)
        }
    }
}
