//! Absolute date/time rendering for display.
//!
//! Locale words (month and weekday abbreviations, connectives) come from a
//! [`DateLocale`]; the shipped one is [`PtBr`]. Wall-clock values are shown in
//! the formatter's fixed offset, Brasília time (UTC−03:00) unless configured.
//!
//! Accepted values:
//!   - RFC 3339 timestamps, converted into the display offset
//!   - `YYYY-MM-DDTHH:MM[:SS[.fff]]` or with a space, read as display-offset wall clock
//!   - `YYYY-MM-DD`, midnight wall clock
//!   - up to four digits, a year (midnight, 1 January)
//!   - longer integers, epoch milliseconds

use chrono::{
  DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
  Weekday,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// UTC−03:00, in seconds west of UTC.
const BRASILIA_WEST_SECS: i32 = 3 * 3600;

/// Shorter all-digit values are years, longer ones epoch milliseconds.
const MAX_YEAR_DIGITS: usize = 4;

const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
  #[error("empty date value")]
  Empty,
  #[error("unrecognised date value: {0}")]
  Unparseable(String),
  /// Epoch milliseconds chrono cannot represent, before or after the display offset.
  #[error("epoch milliseconds out of range: {0}")]
  OutOfRange(i64),
}

/// Words a locale contributes to rendered dates.
pub trait DateLocale {
  /// `month` is 1-based.
  fn month_abbrev(&self, month: u32) -> &'static str;
  fn weekday_abbrev(&self, weekday: Weekday) -> &'static str;
  /// Connective between day and month ("15 de mar").
  fn of(&self) -> &'static str;
  /// Connective before a time ("às 14:05").
  fn at(&self) -> &'static str;
}

/// Brazilian Portuguese.
#[derive(Clone, Copy, Debug, Default)]
pub struct PtBr;

impl DateLocale for PtBr {
  fn month_abbrev(&self, month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
      "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
    ];
    MONTHS
      .get(month.saturating_sub(1) as usize)
      .copied()
      .unwrap_or("")
  }

  fn weekday_abbrev(&self, weekday: Weekday) -> &'static str {
    match weekday {
      Weekday::Sun => "dom",
      Weekday::Mon => "seg",
      Weekday::Tue => "ter",
      Weekday::Wed => "qua",
      Weekday::Thu => "qui",
      Weekday::Fri => "sex",
      Weekday::Sat => "sáb",
    }
  }

  fn of(&self) -> &'static str { "de" }
  fn at(&self) -> &'static str { "às" }
}

/// A parsed point in time: either an absolute instant or a bare wall-clock reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Moment {
  Instant(DateTime<FixedOffset>),
  Wall(NaiveDateTime),
}

impl Moment {
  pub fn parse(value: &str) -> Result<Self, DateError> {
    let value = value.trim();
    if value.is_empty() {
      return Err(DateError::Empty);
    }

    if is_year(value) {
      return value
        .parse::<i32>()
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Moment::Wall)
        .ok_or_else(|| DateError::Unparseable(value.to_string()));
    }

    if let Ok(ms) = value.parse::<i64>() {
      return DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| Moment::Instant(dt.fixed_offset()))
        .ok_or(DateError::OutOfRange(ms));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
      return Ok(Moment::Instant(dt));
    }

    for fmt in NAIVE_FORMATS {
      if let Ok(n) = NaiveDateTime::parse_from_str(value, fmt) {
        return Ok(Moment::Wall(n));
      }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
      .ok()
      .and_then(|d| d.and_hms_opt(0, 0, 0))
      .map(Moment::Wall)
      .ok_or_else(|| DateError::Unparseable(value.to_string()))
  }
}

fn is_year(value: &str) -> bool {
  value.len() <= MAX_YEAR_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Moment {
  fn from(dt: DateTime<Tz>) -> Self {
    Moment::Instant(dt.fixed_offset())
  }
}

/// Output patterns a [`DateFormatter`] can render.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
  /// `dd/MM/yyyy`
  Date,
  /// `hh:mm:ss`, 12-hour clock
  Hms,
  /// `hh:mm`, 12-hour clock
  Hm,
  /// `dd/MM/yyyy às HH:mm`
  DateTime,
  /// `E, dd de MMM às HH:mm`
  DateTimeLong,
}

#[derive(Clone, Debug)]
pub struct DateFormatter<L = PtBr> {
  locale: L,
  offset: FixedOffset,
}

impl Default for DateFormatter<PtBr> {
  fn default() -> Self {
    let offset = FixedOffset::west_opt(BRASILIA_WEST_SECS).unwrap_or_else(|| Utc.fix());
    Self::new(PtBr, offset)
  }
}

impl<L: DateLocale> DateFormatter<L> {
  pub fn new(locale: L, offset: FixedOffset) -> Self {
    Self { locale, offset }
  }

  /// Build with an offset given in minutes east of UTC (Brasília is -180).
  pub fn with_offset_minutes(locale: L, minutes: i32) -> Option<Self> {
    FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self::new(locale, offset))
  }

  pub fn offset(&self) -> FixedOffset {
    self.offset
  }

  fn wall(&self, moment: &Moment) -> Result<NaiveDateTime, DateError> {
    match moment {
      Moment::Instant(dt) => dt
        .naive_utc()
        .checked_add_signed(TimeDelta::seconds(i64::from(self.offset.local_minus_utc())))
        .ok_or(DateError::OutOfRange(dt.timestamp_millis())),
      Moment::Wall(n) => Ok(*n),
    }
  }

  /// Render an already parsed moment. Instants at the edge of chrono's range
  /// may not fit once shifted to the display offset.
  pub fn render(&self, moment: &Moment, style: DateStyle) -> Result<String, DateError> {
    let wall = self.wall(moment)?;
    let l = &self.locale;
    let out = match style {
      DateStyle::Date => wall.format("%d/%m/%Y").to_string(),
      DateStyle::Hms => wall.format("%I:%M:%S").to_string(),
      DateStyle::Hm => wall.format("%I:%M").to_string(),
      DateStyle::DateTime => format!(
        "{} {} {}",
        wall.format("%d/%m/%Y"),
        l.at(),
        wall.format("%H:%M")
      ),
      DateStyle::DateTimeLong => format!(
        "{}, {} {} {} {} {}",
        l.weekday_abbrev(wall.weekday()),
        wall.format("%d"),
        l.of(),
        l.month_abbrev(wall.month()),
        l.at(),
        wall.format("%H:%M")
      ),
    };
    Ok(out)
  }

  pub fn format(&self, value: &str, style: DateStyle) -> Result<String, DateError> {
    self.render(&Moment::parse(value)?, style)
  }

  /// `dd/MM/yyyy`, or an empty string when `value` is not a date.
  pub fn format_date(&self, value: &str) -> String {
    match self.format(value, DateStyle::Date) {
      Ok(s) => s,
      Err(e) => {
        debug!(target: "formkit", error = %e, "Date value rejected");
        String::new()
      }
    }
  }

  pub fn format_hms(&self, value: &str) -> Result<String, DateError> {
    self.format(value, DateStyle::Hms)
  }

  pub fn format_hm(&self, value: &str) -> Result<String, DateError> {
    self.format(value, DateStyle::Hm)
  }

  pub fn format_date_time(&self, value: &str) -> Result<String, DateError> {
    self.format(value, DateStyle::DateTime)
  }

  pub fn format_date_time_long(&self, value: &str) -> Result<String, DateError> {
    self.format(value, DateStyle::DateTimeLong)
  }
}
