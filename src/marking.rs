use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Decorations for the dates of the calendar, keyed by `YYYY-MM-DD`
pub(crate) type MarkingMap = HashMap<String, Marking>;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Marking {
    /// Show a dot next to the date
    pub(crate) marked: bool,
    pub(crate) dot_color: Option<Color>,
    /// Additional dots; only the first one fits next to a date, but the rest
    /// still count when comparing markings
    pub(crate) dots: Vec<Color>,
    pub(crate) selected: bool,
    pub(crate) selected_color: Option<Color>,
    pub(crate) disabled: bool,
}

impl Marking {
    /// Returns `None` if no dot should be drawn, `Some(None)` for a dot in the
    /// theme's color, and `Some(Some(c))` for a dot colored `c`
    pub(crate) fn dot(&self) -> Option<Option<Color>> {
        if let Some(&c) = self.dots.first() {
            Some(Some(c))
        } else {
            self.marked.then_some(self.dot_color)
        }
    }
}

pub(crate) fn date_key(date: Date) -> String {
    let (year, month, day) = (date.year(), u8::from(date.month()), date.day());
    format!("{year:04}-{month:02}-{day:02}")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarksFile {
    #[serde(default)]
    dates: HashMap<String, Marking>,
}

pub(crate) fn parse_markings(src: &str) -> Result<MarkingMap, MarkingsError> {
    let file = toml::from_str::<MarksFile>(src)?;
    file.dates
        .into_iter()
        .map(|(key, marking)| match Date::parse(&key, &YMD_FMT) {
            Ok(date) => Ok((date_key(date), marking)),
            Err(source) => Err(MarkingsError::BadDate { key, source }),
        })
        .collect()
}

pub(crate) fn load_markings(path: &Path) -> Result<MarkingMap, MarkingsError> {
    let src = std::fs::read_to_string(path).map_err(|source| MarkingsError::Read {
        path: path.to_owned(),
        source,
    })?;
    let markings = parse_markings(&src)?;
    log::info!("Loaded {} marked dates from {}", markings.len(), path.display());
    Ok(markings)
}

#[derive(Debug, Error)]
pub(crate) enum MarkingsError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse marks file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid date {key:?} in marks file")]
    BadDate {
        key: String,
        source: time::error::Parse,
    },
}
