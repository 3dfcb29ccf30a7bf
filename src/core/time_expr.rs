//! # Time Expressions
//!
//! Turns the free-text reminder typed into a prompt into a timestamp.
//! Only a fixed set of forms is recognised:
//!
//! | Input            | Meaning                                  |
//! |------------------|------------------------------------------|
//! | `3h`             | three hours from now                     |
//! | `morning`        | 07:00 (next day if already past)         |
//! | `evening`        | 18:00 (next day if already past)         |
//! | `tomorrow`       | 07:00 tomorrow                           |
//! | `17:30`          | 17:30 (next day if already past)         |
//! | `5:30 pm`        | 17:30 (next day if already past)         |
//! | `24.12.26`       | 07:00 on that date (`YY` or `YYYY`)      |
//! | `24.12. 18:00`   | that date and time in the current year   |

use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The text matches none of the known forms.
    Unrecognized(String),
    /// The text has a known form but names an impossible time.
    Invalid(String),
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeParseError::Unrecognized(text) => {
                write!(f, "time expression could not be parsed: {text}")
            }
            TimeParseError::Invalid(msg) => write!(f, "invalid time: {msg}"),
        }
    }
}

impl std::error::Error for TimeParseError {}

/// Seam for the reminder parser so the controller can be tested without a clock.
pub trait TimeParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<DateTime<Utc>, TimeParseError>;
}

/// Parses relative to the local wall clock at call time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTimeParser;

impl TimeParser for LocalTimeParser {
    fn parse(&self, text: &str) -> Result<DateTime<Utc>, TimeParseError> {
        parse_time_expression(text, Local::now()).map(|dt| dt.with_timezone(&Utc))
    }
}

const MORNING: (u32, u32) = (7, 0);
const EVENING: (u32, u32) = (18, 0);

pub fn parse_time_expression<Tz: TimeZone>(
    text: &str,
    now: DateTime<Tz>,
) -> Result<DateTime<Tz>, TimeParseError> {
    let text = text.trim();
    let lower = text.to_ascii_lowercase();
    let today = now.date_naive();

    if let Some(hours) = lower.strip_suffix('h')
        && (1..=2).contains(&hours.len())
        && hours.bytes().all(|b| b.is_ascii_digit())
    {
        let hours: i64 = hours
            .parse()
            .map_err(|e| TimeParseError::Invalid(format!("{text}: {e}")))?;
        return Ok(now + TimeDelta::hours(hours));
    }

    match lower.as_str() {
        "morning" => return roll_if_past(&now, today, hm(MORNING)?),
        "evening" => return roll_if_past(&now, today, hm(EVENING)?),
        "tomorrow" => {
            let tomorrow = next_day(today)?;
            return localize(&now, tomorrow, hm(MORNING)?);
        }
        _ => {}
    }

    if lower.ends_with("am") || lower.ends_with("pm") {
        let time = NaiveTime::parse_from_str(&lower, "%I:%M %p")
            .map_err(|e| TimeParseError::Invalid(format!("{text}: {e}")))?;
        return roll_if_past(&now, today, time);
    }

    if looks_like_clock(&lower) {
        let time = NaiveTime::parse_from_str(&lower, "%H:%M")
            .map_err(|e| TimeParseError::Invalid(format!("{text}: {e}")))?;
        return roll_if_past(&now, today, time);
    }

    if let Some((date_part, time_part)) = lower.split_once(' ')
        && date_part.ends_with('.')
        && looks_like_clock(time_part)
    {
        let date = NaiveDate::parse_from_str(
            &format!("{date_part}{}", today.year()),
            "%d.%m.%Y",
        )
        .map_err(|e| TimeParseError::Invalid(format!("{text}: {e}")))?;
        let time = NaiveTime::parse_from_str(time_part, "%H:%M")
            .map_err(|e| TimeParseError::Invalid(format!("{text}: {e}")))?;
        return localize(&now, date, time);
    }

    let parts: Vec<&str> = lower.split('.').collect();
    if parts.len() == 3 && parts.iter().all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit())) {
        let format = match parts[2].len() {
            2 => "%d.%m.%y",
            4 => "%d.%m.%Y",
            _ => return Err(TimeParseError::Unrecognized(text.to_string())),
        };
        let date = NaiveDate::parse_from_str(&lower, format)
            .map_err(|e| TimeParseError::Invalid(format!("{text}: {e}")))?;
        return localize(&now, date, hm(MORNING)?);
    }

    Err(TimeParseError::Unrecognized(text.to_string()))
}

fn looks_like_clock(s: &str) -> bool {
    match s.split_once(':') {
        Some((h, m)) => {
            (1..=2).contains(&h.len())
                && m.len() == 2
                && h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn hm((hour, minute): (u32, u32)) -> Result<NaiveTime, TimeParseError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| TimeParseError::Invalid(format!("{hour:02}:{minute:02}")))
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, TimeParseError> {
    date.succ_opt()
        .ok_or_else(|| TimeParseError::Invalid(format!("no day after {date}")))
}

fn localize<Tz: TimeZone>(
    now: &DateTime<Tz>,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<DateTime<Tz>, TimeParseError> {
    now.timezone()
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| TimeParseError::Invalid(format!("{date} {time} does not exist locally")))
}

fn roll_if_past<Tz: TimeZone>(
    now: &DateTime<Tz>,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<DateTime<Tz>, TimeParseError> {
    let candidate = localize(now, date, time)?;
    if candidate < *now {
        localize(now, next_day(date)?, time)
    } else {
        Ok(candidate)
    }
}
