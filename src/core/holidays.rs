use crate::core::entries::EntryBook;
use crate::models::category::Category;
use crate::models::entry::NewEntry;
use crate::models::holiday::{Holiday, HolidayCalendar};
use crate::models::pay_period::PayPeriod;
use crate::models::source::EntrySource;
use chrono::{DateTime, NaiveTime, Utc};

pub const HOLIDAY_HOURS: f64 = 8.0;

pub struct HolidayLogic;

impl HolidayLogic {
    /// Ids of the period's holidays the employee already has an entry for.
    pub fn selected_ids(
        book: &EntryBook,
        calendar: &HolidayCalendar,
        employee: &str,
        period: &PayPeriod,
    ) -> Vec<String> {
        calendar
            .in_period(period)
            .into_iter()
            .filter(|h| Self::has_entry(book, employee, h))
            .map(|h| h.id.clone())
            .collect()
    }

    fn has_entry(book: &EntryBook, employee: &str, holiday: &Holiday) -> bool {
        book.entries().iter().any(|e| {
            e.category == Category::Holiday
                && e.date == holiday.date
                && e.employee_name.eq_ignore_ascii_case(employee.trim())
        })
    }

    pub fn entry_for(employee: &str, holiday: &Holiday) -> NewEntry {
        NewEntry {
            employee_name: employee.trim().to_string(),
            date: holiday.date,
            category: Category::Holiday,
            project: holiday.name.clone(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(17, 0, 0),
            duration_hours: HOLIDAY_HOURS,
            description: format!("Holiday: {}", holiday.name),
            source: EntrySource::HolidaySelection,
        }
    }

    /// Make the employee's holiday entries in `period` match `selected`.
    ///
    /// Returns `(added, removed)`.
    pub fn apply_selection(
        book: &mut EntryBook,
        calendar: &HolidayCalendar,
        employee: &str,
        period: &PayPeriod,
        selected: &[String],
        now: DateTime<Utc>,
    ) -> (usize, usize) {
        let mut added = 0;
        let mut removed = 0;
        let employee = employee.trim();

        for holiday in calendar.in_period(period) {
            let wanted = selected.iter().any(|id| id == &holiday.id);
            let present = Self::has_entry(book, employee, holiday);

            if wanted && !present {
                book.add(Self::entry_for(employee, holiday), now);
                added += 1;
            } else if !wanted && present {
                removed += book.retain(|e| {
                    !(e.category == Category::Holiday
                        && e.date == holiday.date
                        && e.employee_name.eq_ignore_ascii_case(employee))
                });
            }
        }

        (added, removed)
    }
}
