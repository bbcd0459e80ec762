//! Time utilities: parsing clock times, hour arithmetic, elapsed formatting.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;

fn clock_regex() -> &'static Regex {
    static CLOCK: OnceLock<Regex> = OnceLock::new();
    CLOCK.get_or_init(|| {
        Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::(\d{2}))?\s*(AM|PM)?$").unwrap()
    })
}

/// Parse a clock time.
///
/// Accepted shapes: `HH:MM`, `HH:MM:SS`, `H:MM AM`, `H:MM PM`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let caps = clock_regex().captures(t.trim())?;

    let mut hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    let seconds: u32 = match caps.get(3) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };

    if let Some(meridiem) = caps.get(4) {
        if hours == 0 || hours > 12 {
            return None;
        }
        let pm = meridiem.as_str().eq_ignore_ascii_case("PM");
        if pm && hours < 12 {
            hours += 12;
        } else if !pm && hours == 12 {
            hours = 0;
        }
    }

    NaiveTime::from_hms_opt(hours, minutes, seconds)
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    match input {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_time(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidTime(s.to_string())),
        None => Ok(None),
    }
}

pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn format_optional_hhmm(t: Option<NaiveTime>) -> String {
    t.map(format_hhmm).unwrap_or_default()
}

/// Drop seconds and below.
pub fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to the nearest half hour (timer granularity).
pub fn round_half_hour(hours: f64) -> f64 {
    (hours * 2.0).round() / 2.0
}

/// Hours between two clock times, wrapping past midnight, rounded to 2 decimals.
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    round_to(minutes as f64 / 60.0, 2)
}

/// Elapsed time as `HH:MM:SS`; negative spans render as zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

pub fn parse_hours(s: &str) -> AppResult<f64> {
    let h: f64 = s
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidNumber(s.to_string()))?;
    if !h.is_finite() || h < 0.0 {
        return Err(AppError::InvalidNumber(s.to_string()));
    }
    Ok(h)
}

/// Serde adapter storing an optional clock time as `"HH:MM"` (or `""`).
pub mod serde_hhmm {
    use super::{format_hhmm, parse_time};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => s.serialize_str(&format_hhmm(*t)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_time(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid clock time '{s}'"))),
        }
    }
}
