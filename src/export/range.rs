use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::NaiveDate;

/// Parse `--range` (year / month / day / interval).
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => (s.trim(), e.trim()),
        None => (r.trim(), r.trim()),
    };

    if start.len() != end.len() {
        return Err(AppError::InvalidDate(format!(
            "{r}: start and end must have the same format"
        )));
    }

    let d1 = bound(start, true)?;
    let d2 = bound(end, false)?;

    if d1 > d2 {
        return Err(AppError::InvalidDate(format!("{r}: range ends before it starts")));
    }

    Ok((d1, d2))
}

/// First (`is_start`) or last day covered by a year, month or day.
fn bound(s: &str, is_start: bool) -> AppResult<NaiveDate> {
    let invalid = || AppError::InvalidDate(s.to_string());

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let (m, d) = if is_start { (1, 1) } else { (12, 31) };
            NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
        }
        // YYYY-MM
        7 => {
            let (y, m) = s.split_once('-').ok_or_else(invalid)?;
            let y: i32 = y.parse().map_err(|_| invalid())?;
            let m: u32 = m.parse().map_err(|_| invalid())?;
            let d = if is_start {
                1
            } else {
                month_last_day(y, m).ok_or_else(invalid)?
            };
            NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
        }
        // YYYY-MM-DD
        10 => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid()),
        _ => Err(AppError::InvalidDate(format!(
            "{s}: unsupported range format"
        ))),
    }
}
