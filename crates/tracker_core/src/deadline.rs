use crate::clock::Clock;
use crate::error::AppError;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

pub const ACCEPTED_FORMATS: &str = "YYYY-MM-DD, D.M.YYYY or DD.MM.YYYY";

/// Parses a deadline in one of the accepted formats. The whole string must
/// match and name a real calendar date.
pub fn parse_deadline(text: &str) -> Option<Date> {
    if !text.starts_with(|ch: char| ch.is_ascii_digit())
        || !text
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch == '-' || ch == '.')
    {
        return None;
    }

    let iso = format_description!("[year]-[month]-[day]");
    let unpadded = format_description!("[day padding:none].[month padding:none].[year]");
    let padded = format_description!("[day].[month].[year]");

    Date::parse(text, &iso)
        .or_else(|_| Date::parse(text, &unpadded))
        .or_else(|_| Date::parse(text, &padded))
        .ok()
}

/// The instant a deadline date begins: local midnight.
pub fn deadline_start(date: Date, offset: UtcOffset) -> OffsetDateTime {
    date.midnight().assume_offset(offset)
}

pub fn is_valid_at(text: &str, now: OffsetDateTime) -> bool {
    match parse_deadline(text) {
        Some(date) => deadline_start(date, now.offset()) > now,
        None => false,
    }
}

pub struct DeadlineValidator<'a> {
    clock: &'a dyn Clock,
}

impl<'a> DeadlineValidator<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    pub fn is_valid(&self, text: &str) -> bool {
        is_valid_at(text, self.clock.now())
    }

    pub fn check(&self, text: &str) -> Result<(), AppError> {
        if self.is_valid(text) {
            Ok(())
        } else {
            Err(AppError::invalid_deadline(format!(
                "deadline '{text}' must be a future date in {ACCEPTED_FORMATS} format"
            )))
        }
    }
}
