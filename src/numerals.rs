use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digit system used when showing numbers in the calendar
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Numerals {
    #[default]
    Latin,
    ArabicIndic,
    Devanagari,
}

impl Numerals {
    fn zero(self) -> u32 {
        match self {
            Numerals::Latin => u32::from('0'),
            Numerals::ArabicIndic => 0x0660,
            Numerals::Devanagari => 0x0966,
        }
    }

    /// Replace every ASCII digit in `s` with the corresponding digit of this
    /// system
    pub(crate) fn format(self, s: &str) -> String {
        if self == Numerals::Latin {
            return s.to_owned();
        }
        let zero = self.zero();
        s.chars()
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| char::from_u32(zero + d))
                    .unwrap_or(c)
            })
            .collect()
    }
}

impl fmt::Display for Numerals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Numerals::Latin => "latin",
            Numerals::ArabicIndic => "arabic",
            Numerals::Devanagari => "devanagari",
        };
        f.write_str(name)
    }
}

impl FromStr for Numerals {
    type Err = UnknownNumeralsError;

    fn from_str(s: &str) -> Result<Numerals, UnknownNumeralsError> {
        match s.to_ascii_lowercase().as_str() {
            "latin" => Ok(Numerals::Latin),
            "arabic" | "arabic-indic" => Ok(Numerals::ArabicIndic),
            "devanagari" => Ok(Numerals::Devanagari),
            _ => Err(UnknownNumeralsError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown numeral system {0:?}; expected latin, arabic, or devanagari")]
pub(crate) struct UnknownNumeralsError(String);
