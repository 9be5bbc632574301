//! Recurrence rules in the iCalendar `RRULE` grammar (RFC 2445 §4.8.5.4).
//!
//! Scheduled blocks carry a time-of-day window plus a rule saying on which
//! dates the window is active. Only date-level questions are answered here:
//! "does this rule occur on date D". The accepted text is an `RRULE` value,
//! optionally prefixed with `RRULE:` and optionally preceded by a `DTSTART`
//! line, for example:
//!
//! ```text
//! DTSTART;VALUE=DATE:20240101
//! RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR
//! ```
//!
//! Supported parts are `FREQ` (daily and coarser), `INTERVAL`, `COUNT`,
//! `UNTIL`, `BYDAY`, `BYMONTHDAY`, `BYMONTH` and `WKST`. Parts that only make
//! sense for sub-daily expansion or that need set arithmetic (`BYSETPOS`,
//! `BYYEARDAY`, `BYWEEKNO`, `BYHOUR`, ...) are rejected instead of being
//! silently ignored. Dates are evaluated as given; callers convert instants to
//! UTC dates first.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("rule is empty")]
    Empty,

    #[error("FREQ is required")]
    MissingFrequency,

    #[error("{0} requires a DTSTART anchor")]
    MissingStart(&'static str),

    #[error("invalid value {value:?} for {name}")]
    InvalidPart { name: String, value: String },

    #[error("{0} is not supported")]
    UnsupportedPart(String),

    #[error("unknown rule part {0}")]
    UnknownPart(String),

    #[error("{0} appears more than once")]
    DuplicatePart(String),

    #[error("COUNT and UNTIL must not both be set")]
    CountWithUntil,

    #[error("invalid DTSTART {0:?}")]
    InvalidStart(String),

    #[error("unexpected line {0:?}")]
    UnexpectedLine(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// A `BYDAY` entry: a weekday, optionally with an ordinal such as `2MO`
/// (second Monday) or `-1FR` (last Friday).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekdayNum {
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub start: Option<NaiveDate>,
    pub frequency: Frequency,
    pub interval: u32,
    pub count: Option<u32>,
    pub until: Option<NaiveDate>,
    pub by_day: Vec<WeekdayNum>,
    pub by_month_day: Vec<i8>,
    pub by_month: Vec<u32>,
    pub week_start: Weekday,
}

impl RecurrenceRule {
    /// Whether the rule produces an occurrence on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.until.is_some_and(|until| date > until) {
            return false;
        }
        if !self.matches(date) {
            return false;
        }
        match (self.count, self.start) {
            (Some(count), Some(start)) => self.occurrences_through(start, date, count) <= count,
            _ => true,
        }
    }

    /// Counts occurrences from `start` through `date`, stopping once `limit`
    /// is exceeded.
    fn occurrences_through(&self, start: NaiveDate, date: NaiveDate, limit: u32) -> u32 {
        let mut seen = 0;
        for day in start.iter_days().take_while(|day| *day <= date) {
            if self.matches(day) {
                seen += 1;
                if seen > limit {
                    break;
                }
            }
        }
        seen
    }

    fn matches(&self, date: NaiveDate) -> bool {
        if !self.in_interval(date) {
            return false;
        }
        if !self.by_month.is_empty() && !self.by_month.contains(&date.month()) {
            return false;
        }
        if !self.by_month_day.is_empty()
            && !self.by_month_day.iter().any(|d| month_day_matches(*d, date))
        {
            return false;
        }

        match self.frequency {
            Frequency::Daily => self.by_day.is_empty() || self.weekday_matches(date),
            Frequency::Weekly => {
                if self.by_day.is_empty() {
                    self.start.is_some_and(|s| s.weekday() == date.weekday())
                } else {
                    self.weekday_matches(date)
                }
            }
            Frequency::Monthly => {
                if !self.by_day.is_empty() {
                    self.weekday_matches(date)
                } else if !self.by_month_day.is_empty() {
                    true
                } else {
                    self.start.is_some_and(|s| s.day() == date.day())
                }
            }
            Frequency::Yearly => {
                if !self.by_day.is_empty() {
                    self.weekday_matches(date)
                } else if !self.by_month_day.is_empty() {
                    true
                } else {
                    self.start.is_some_and(|s| {
                        s.day() == date.day()
                            && (!self.by_month.is_empty() || s.month() == date.month())
                    })
                }
            }
        }
    }

    fn in_interval(&self, date: NaiveDate) -> bool {
        let Some(start) = self.start else {
            return true;
        };
        let interval = i64::from(self.interval);
        let elapsed = match self.frequency {
            Frequency::Daily => (date - start).num_days(),
            Frequency::Weekly => {
                (week_start_of(date, self.week_start) - week_start_of(start, self.week_start))
                    .num_days()
                    / 7
            }
            Frequency::Monthly => {
                i64::from(date.year() - start.year()) * 12 + i64::from(date.month())
                    - i64::from(start.month())
            }
            Frequency::Yearly => i64::from(date.year() - start.year()),
        };
        elapsed % interval == 0
    }

    fn weekday_matches(&self, date: NaiveDate) -> bool {
        self.by_day.iter().any(|entry| {
            if entry.weekday != date.weekday() {
                return false;
            }
            let Some(ordinal) = entry.ordinal else {
                return true;
            };
            let within_year = self.frequency == Frequency::Yearly && self.by_month.is_empty();
            let (position, span) = if within_year {
                (date.ordinal0(), days_in_year(date.year()))
            } else {
                (date.day0(), days_in_month(date.year(), date.month()))
            };
            if ordinal > 0 {
                position / 7 + 1 == ordinal as u32
            } else {
                (span - 1 - position) / 7 + 1 == ordinal.unsigned_abs() as u32
            }
        })
    }

    fn needs_anchor(&self) -> Option<&'static str> {
        if self.interval > 1 {
            return Some("INTERVAL");
        }
        if self.count.is_some() {
            return Some("COUNT");
        }
        let unanchored = match self.frequency {
            Frequency::Daily => false,
            Frequency::Weekly => self.by_day.is_empty(),
            Frequency::Monthly | Frequency::Yearly => {
                self.by_day.is_empty() && self.by_month_day.is_empty()
            }
        };
        unanchored.then_some("FREQ without BYDAY/BYMONTHDAY")
    }
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut start = None;
        let mut rule = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let upper = line.to_ascii_uppercase();
            if upper.starts_with("DTSTART") {
                if start.is_some() {
                    return Err(RecurrenceError::DuplicatePart("DTSTART".into()));
                }
                let value = line
                    .rsplit_once(':')
                    .map(|(_, v)| v)
                    .ok_or_else(|| RecurrenceError::InvalidStart(line.to_string()))?;
                start = Some(
                    parse_date(value).ok_or_else(|| RecurrenceError::InvalidStart(value.into()))?,
                );
            } else if let Some(value) = strip_prefix_ignore_case(line, "RRULE:") {
                if rule.is_some() {
                    return Err(RecurrenceError::DuplicatePart("RRULE".into()));
                }
                rule = Some(value);
            } else if line.contains('=') && rule.is_none() {
                rule = Some(line);
            } else {
                return Err(RecurrenceError::UnexpectedLine(line.to_string()));
            }
        }

        let body = rule.ok_or(RecurrenceError::Empty)?;
        parse_rule(body, start)
    }
}

fn parse_rule(body: &str, start: Option<NaiveDate>) -> Result<RecurrenceRule, RecurrenceError> {
    let mut frequency = None;
    let mut interval = None;
    let mut count = None;
    let mut until = None;
    let mut by_day = None;
    let mut by_month_day = None;
    let mut by_month = None;
    let mut week_start = None;

    for part in body.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, value) = part.split_once('=').ok_or_else(|| RecurrenceError::InvalidPart {
            name: part.to_string(),
            value: String::new(),
        })?;
        let name = name.trim().to_ascii_uppercase();
        let value = value.trim();
        let invalid = || RecurrenceError::InvalidPart {
            name: name.clone(),
            value: value.to_string(),
        };

        match name.as_str() {
            "FREQ" => set_once(&mut frequency, &name, parse_frequency(value, &name)?)?,
            "INTERVAL" => set_once(&mut interval, &name, parse_positive(value).ok_or_else(invalid)?)?,
            "COUNT" => set_once(&mut count, &name, parse_positive(value).ok_or_else(invalid)?)?,
            "UNTIL" => set_once(&mut until, &name, parse_date(value).ok_or_else(invalid)?)?,
            "BYDAY" => set_once(&mut by_day, &name, parse_list(value, parse_weekday_num).ok_or_else(invalid)?)?,
            "BYMONTHDAY" => set_once(&mut by_month_day, &name, parse_list(value, parse_month_day).ok_or_else(invalid)?)?,
            "BYMONTH" => set_once(&mut by_month, &name, parse_list(value, parse_month).ok_or_else(invalid)?)?,
            "WKST" => set_once(&mut week_start, &name, parse_weekday(value).ok_or_else(invalid)?)?,
            "BYSETPOS" | "BYYEARDAY" | "BYWEEKNO" | "BYHOUR" | "BYMINUTE" | "BYSECOND" => {
                return Err(RecurrenceError::UnsupportedPart(name.clone()));
            }
            _ => return Err(RecurrenceError::UnknownPart(name.clone())),
        }
    }

    let rule = RecurrenceRule {
        start,
        frequency: frequency.ok_or(RecurrenceError::MissingFrequency)?,
        interval: interval.unwrap_or(1),
        count,
        until,
        by_day: by_day.unwrap_or_default(),
        by_month_day: by_month_day.unwrap_or_default(),
        by_month: by_month.unwrap_or_default(),
        week_start: week_start.unwrap_or(Weekday::Mon),
    };

    if rule.count.is_some() && rule.until.is_some() {
        return Err(RecurrenceError::CountWithUntil);
    }
    let has_ordinals = rule.by_day.iter().any(|d| d.ordinal.is_some());
    if has_ordinals && !matches!(rule.frequency, Frequency::Monthly | Frequency::Yearly) {
        return Err(RecurrenceError::InvalidPart {
            name: "BYDAY".into(),
            value: "ordinal weekday outside MONTHLY/YEARLY".into(),
        });
    }
    if rule.frequency == Frequency::Weekly && !rule.by_month_day.is_empty() {
        return Err(RecurrenceError::InvalidPart {
            name: "BYMONTHDAY".into(),
            value: "not allowed with FREQ=WEEKLY".into(),
        });
    }
    if rule.start.is_none() {
        if let Some(part) = rule.needs_anchor() {
            return Err(RecurrenceError::MissingStart(part));
        }
    }

    Ok(rule)
}

fn set_once<T>(slot: &mut Option<T>, name: &str, value: T) -> Result<(), RecurrenceError> {
    if slot.is_some() {
        return Err(RecurrenceError::DuplicatePart(name.to_string()));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_frequency(value: &str, name: &str) -> Result<Frequency, RecurrenceError> {
    match value.to_ascii_uppercase().as_str() {
        "DAILY" => Ok(Frequency::Daily),
        "WEEKLY" => Ok(Frequency::Weekly),
        "MONTHLY" => Ok(Frequency::Monthly),
        "YEARLY" => Ok(Frequency::Yearly),
        "HOURLY" | "MINUTELY" | "SECONDLY" => {
            Err(RecurrenceError::UnsupportedPart(format!("{name}={value}")))
        }
        _ => Err(RecurrenceError::InvalidPart {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|v| *v >= 1)
}

fn parse_list<T>(value: &str, item: fn(&str) -> Option<T>) -> Option<Vec<T>> {
    value.split(',').map(|v| item(v.trim())).collect()
}

fn parse_month(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|m| (1..=12).contains(m))
}

fn parse_month_day(value: &str) -> Option<i8> {
    value
        .parse::<i8>()
        .ok()
        .filter(|d| *d != 0 && (-31..=31).contains(d))
}

fn parse_weekday(value: &str) -> Option<Weekday> {
    match value.to_ascii_uppercase().as_str() {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_weekday_num(value: &str) -> Option<WeekdayNum> {
    if value.len() < 2 || !value.is_char_boundary(value.len() - 2) {
        return None;
    }
    let (prefix, day) = value.split_at(value.len() - 2);
    let weekday = parse_weekday(day)?;
    let ordinal = if prefix.is_empty() {
        None
    } else {
        let n = prefix.trim_start_matches('+').parse::<i8>().ok()?;
        if n == 0 || !(-53..=53).contains(&n) {
            return None;
        }
        Some(n)
    };
    Some(WeekdayNum { ordinal, weekday })
}

/// Accepts `YYYYMMDD` or `YYYYMMDDTHHMMSS[Z]`; only the date is kept.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let (date, time) = match value.split_once(|c| c == 'T' || c == 't') {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    };
    if let Some(time) = time {
        let digits = time.trim_end_matches(|c| c == 'Z' || c == 'z');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    if date.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y%m%d").ok()
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &line[prefix.len()..])
}

fn month_day_matches(month_day: i8, date: NaiveDate) -> bool {
    let day = date.day() as i32;
    let wanted = i32::from(month_day);
    if wanted > 0 {
        day == wanted
    } else {
        day == days_in_month(date.year(), date.month()) as i32 + wanted + 1
    }
}

fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    date - chrono::Duration::days(i64::from(offset))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule(text: &str) -> RecurrenceRule {
        text.parse().unwrap()
    }

    #[test]
    fn weekday_dayparts_skip_weekends() {
        let r = rule("FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR");
        // 2024-03-04 is a Monday.
        assert!(r.occurs_on(date(2024, 3, 4)));
        assert!(r.occurs_on(date(2024, 3, 8)));
        assert!(!r.occurs_on(date(2024, 3, 9)));
        assert!(!r.occurs_on(date(2024, 3, 10)));
    }

    #[test]
    fn rrule_prefix_and_dtstart_line_are_accepted() {
        let r = rule("DTSTART;VALUE=DATE:20240101\r\nRRULE:FREQ=DAILY;INTERVAL=3");
        assert_eq!(r.start, Some(date(2024, 1, 1)));
        assert!(r.occurs_on(date(2024, 1, 1)));
        assert!(!r.occurs_on(date(2024, 1, 2)));
        assert!(r.occurs_on(date(2024, 1, 4)));
        assert!(!r.occurs_on(date(2023, 12, 29)));
    }

    #[test]
    fn repeated_rule_or_start_lines_are_rejected() {
        assert_eq!(
            "RRULE:FREQ=DAILY\nRRULE:FREQ=WEEKLY;BYDAY=MO".parse::<RecurrenceRule>(),
            Err(RecurrenceError::DuplicatePart("RRULE".into()))
        );
        assert_eq!(
            "DTSTART:20240101\nDTSTART:20240201\nRRULE:FREQ=DAILY".parse::<RecurrenceRule>(),
            Err(RecurrenceError::DuplicatePart("DTSTART".into()))
        );
    }

    #[test]
    fn biweekly_interval_counts_whole_weeks() {
        let r = rule("DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR");
        assert!(r.occurs_on(date(2024, 1, 1)));
        assert!(r.occurs_on(date(2024, 1, 5)));
        assert!(!r.occurs_on(date(2024, 1, 8)));
        assert!(r.occurs_on(date(2024, 1, 15)));
    }

    #[test]
    fn weekly_without_byday_repeats_start_weekday() {
        // 2024-01-03 is a Wednesday.
        let r = rule("DTSTART:20240103\nRRULE:FREQ=WEEKLY");
        assert!(r.occurs_on(date(2024, 1, 10)));
        assert!(!r.occurs_on(date(2024, 1, 11)));
    }

    #[test]
    fn monthly_ordinal_weekdays() {
        let first_monday = rule("FREQ=MONTHLY;BYDAY=1MO");
        assert!(first_monday.occurs_on(date(2024, 4, 1)));
        assert!(!first_monday.occurs_on(date(2024, 4, 8)));

        let last_friday = rule("FREQ=MONTHLY;BYDAY=-1FR");
        assert!(last_friday.occurs_on(date(2024, 5, 31)));
        assert!(!last_friday.occurs_on(date(2024, 5, 24)));
    }

    #[test]
    fn negative_month_day_counts_from_month_end() {
        let r = rule("FREQ=MONTHLY;BYMONTHDAY=-1");
        assert!(r.occurs_on(date(2024, 2, 29)));
        assert!(!r.occurs_on(date(2024, 2, 28)));
        assert!(r.occurs_on(date(2023, 2, 28)));
    }

    #[test]
    fn until_is_inclusive() {
        let r = rule("FREQ=DAILY;UNTIL=20240110T235959Z");
        assert!(r.occurs_on(date(2024, 1, 10)));
        assert!(!r.occurs_on(date(2024, 1, 11)));
    }

    #[test]
    fn count_limits_occurrences() {
        let r = rule("DTSTART:20240101\nRRULE:FREQ=WEEKLY;BYDAY=MO,TH;COUNT=3");
        assert!(r.occurs_on(date(2024, 1, 1)));
        assert!(r.occurs_on(date(2024, 1, 4)));
        assert!(r.occurs_on(date(2024, 1, 8)));
        assert!(!r.occurs_on(date(2024, 1, 11)));
    }

    #[test]
    fn yearly_with_month_and_day() {
        let r = rule("FREQ=YEARLY;BYMONTH=12;BYMONTHDAY=25");
        assert!(r.occurs_on(date(2030, 12, 25)));
        assert!(!r.occurs_on(date(2030, 11, 25)));
    }

    #[test]
    fn rejects_malformed_rules() {
        assert_eq!("".parse::<RecurrenceRule>(), Err(RecurrenceError::Empty));
        assert_eq!(
            "BYDAY=MO".parse::<RecurrenceRule>(),
            Err(RecurrenceError::MissingFrequency)
        );
        assert_eq!(
            "FREQ=HOURLY".parse::<RecurrenceRule>(),
            Err(RecurrenceError::UnsupportedPart("FREQ=HOURLY".into()))
        );
        assert_eq!(
            "FREQ=DAILY;BYSETPOS=1".parse::<RecurrenceRule>(),
            Err(RecurrenceError::UnsupportedPart("BYSETPOS".into()))
        );
        assert_eq!(
            "FREQ=DAILY;COUNT=2;UNTIL=20240101".parse::<RecurrenceRule>(),
            Err(RecurrenceError::CountWithUntil)
        );
        assert_eq!(
            "FREQ=DAILY;INTERVAL=2".parse::<RecurrenceRule>(),
            Err(RecurrenceError::MissingStart("INTERVAL"))
        );
        assert_eq!(
            "FREQ=DAILY;FREQ=WEEKLY".parse::<RecurrenceRule>(),
            Err(RecurrenceError::DuplicatePart("FREQ".into()))
        );
        assert!(matches!(
            "FREQ=WEEKLY;BYDAY=2MO".parse::<RecurrenceRule>(),
            Err(RecurrenceError::InvalidPart { .. })
        ));
        assert!(matches!(
            "FREQ=DAILY;BYDAY=XX".parse::<RecurrenceRule>(),
            Err(RecurrenceError::InvalidPart { .. })
        ));
    }
}
