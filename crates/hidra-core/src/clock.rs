//! Split date/time codec for the gateway clock.
//!
//! The gateway reports its wall clock as two strings (`date` and `time`)
//! and the UI edits them independently. A [`NaiveDateTime`] is the single
//! source of truth; these helpers split it apart and patch one half at a
//! time without disturbing the other.
//!
//! Parsing never fails loudly: malformed input yields `None`, which callers
//! treat as "no change".

use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};

/// Moment used when there is no existing clock to patch.
pub fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Split a moment into `("YYYY-MM-DD", "HH:MM:SS")`.
pub fn decompose(moment: NaiveDateTime) -> (String, String) {
    (
        moment.format("%Y-%m-%d").to_string(),
        moment.format("%H:%M:%S").to_string(),
    )
}

/// Date half of an optional clock; empty when unset.
pub fn date_string(moment: Option<NaiveDateTime>) -> String {
    moment.map(|m| decompose(m).0).unwrap_or_default()
}

/// Time half of an optional clock; empty when unset.
pub fn time_string(moment: Option<NaiveDateTime>) -> String {
    moment.map(|m| decompose(m).1).unwrap_or_default()
}

/// Render the date the way the gateway firmware expects it (`DD/MM/YYYY`).
pub fn gateway_date(moment: NaiveDateTime) -> String {
    moment.format("%d/%m/%Y").to_string()
}

/// Rebuild a moment from an existing one and optional new halves.
///
/// Starts from `existing` (or [`epoch`]); `date` replaces only the
/// year/month/day, `time` only the hour/minute/second. Returns `None` when a
/// supplied half does not parse.
pub fn recompose(
    existing: Option<NaiveDateTime>,
    date: Option<&str>,
    time: Option<&str>,
) -> Option<NaiveDateTime> {
    let base = existing.unwrap_or_else(epoch);

    let new_date = match date {
        Some(raw) => parse_date(raw)?,
        None => base.date(),
    };
    let new_time = match time {
        Some(raw) => parse_time(raw)?,
        None => base.time(),
    };

    Some(NaiveDateTime::new(new_date, new_time))
}

/// Advance a clock by a wall-clock duration, saturating at the calendar end.
pub fn advance(moment: NaiveDateTime, by: Duration) -> NaiveDateTime {
    TimeDelta::from_std(by)
        .ok()
        .and_then(|delta| moment.checked_add_signed(delta))
        .unwrap_or(moment)
}

/// Parse `DD/MM/YYYY` or `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.contains('/') {
        let [day, month, year] = split3(raw, '/')?;
        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
    } else if raw.contains('-') {
        let [year, month, day] = split3(raw, '-')?;
        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
    } else {
        None
    }
}

/// Parse `HH:MM:SS` or `HH:MM`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    let (hour, minute, second) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };
    if hour.is_empty() || minute.is_empty() || second.is_empty() {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, second.parse().ok()?)
}

/// Parse a module reception stamp. The firmware writes module dates as
/// `YYYY-DD-MM`.
pub fn parse_module_stamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let [year, day, month] = split3(date.trim(), '-')?;
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some(NaiveDateTime::new(date, parse_time(time)?))
}

/// `true` if `a` and `b` share hour, minute and second.
pub fn same_time_of_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.hour() == b.hour() && a.minute() == b.minute() && a.second() == b.second()
}

/// `true` if `a` and `b` share year, month and day.
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

fn split3(raw: &str, sep: char) -> Option<[&str; 3]> {
    let mut it = raw.split(sep);
    let parts = [it.next()?, it.next()?, it.next()?];
    if it.next().is_some() || parts.iter().any(|p| p.trim().is_empty()) {
        return None;
    }
    Some(parts)
}
