use crate::utils::time::parse_time;
use chrono::{NaiveDate, Timelike};

/// Interpret an ISO date or a clock time as an Excel serial value, returning
/// the number format to display it with.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date_serial(d).map(|serial| ("yyyy-mm-dd", serial));
    }

    // Plain numbers such as durations are not clock times.
    if s.contains(':')
        && let Some(t) = parse_time(s)
    {
        let seconds = t.num_seconds_from_midnight() as f64;
        return Some(("hh:mm", seconds / 86400.0));
    }

    None
}

fn date_serial(d: NaiveDate) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - excel_epoch).num_days() as f64)
}
