use crate::error::ParseError;
use std::fmt;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// A validated due-point or occurrence, e.g. `2/12/2019 1800`.
///
/// Accepted forms are `D/M/YYYY HHMM` and `D/M/YYYY`. The text is kept as
/// written (whitespace collapsed) so rendering and persistence never drift
/// from what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    text: String,
    at: PrimitiveDateTime,
}

impl Timing {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let at = match text.split_once(' ') {
            Some(_) => PrimitiveDateTime::parse(
                &text,
                format_description!("[day padding:none]/[month padding:none]/[year] [hour][minute]"),
            ),
            None => Date::parse(
                &text,
                format_description!("[day padding:none]/[month padding:none]/[year]"),
            )
            .map(Date::midnight),
        }
        .map_err(|_| ParseError::BadTiming)?;

        Ok(Self { text, at })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn at(&self) -> PrimitiveDateTime {
        self.at
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
