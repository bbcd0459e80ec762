use crate::errors::{AppError, AppResult};
use crate::utils::date::{inclusive_days, weekdays_between};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A payroll window over which hours are summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPeriod {
    pub id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub timesheet_due: NaiveDate,
    pub pay_day: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl PayPeriod {
    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.period_start <= date && date <= self.period_end
    }

    pub fn period_days(&self) -> i64 {
        inclusive_days(self.period_start, self.period_end)
    }

    /// Days of the period already started on `today`, clamped to the period length.
    pub fn days_elapsed(&self, today: NaiveDate) -> i64 {
        inclusive_days(self.period_start, today).clamp(0, self.period_days())
    }

    /// Days until the timesheet is due, never negative.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.timesheet_due - today).num_days().max(0)
    }

    pub fn work_days(&self) -> u32 {
        weekdays_between(self.period_start, self.period_end)
    }
}

/// Sorted, non-overlapping list of pay periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPayPeriods")]
pub struct PayPeriodTable {
    pay_periods: Vec<PayPeriod>,
}

/// Stored / imported shape, validated into a [`PayPeriodTable`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayPeriods {
    pub pay_periods: Vec<PayPeriod>,
}

impl PayPeriodTable {
    /// Sort by start date and reject inverted or overlapping periods.
    pub fn new(mut periods: Vec<PayPeriod>) -> AppResult<Self> {
        if periods.is_empty() {
            return Err(AppError::InvalidPayPeriods("no pay periods".into()));
        }

        for p in &periods {
            if p.period_start > p.period_end {
                return Err(AppError::InvalidPayPeriods(format!(
                    "period {} ends before it starts",
                    p.id
                )));
            }
        }

        periods.sort_by_key(|p| p.period_start);

        for pair in periods.windows(2) {
            if pair[1].period_start <= pair[0].period_end {
                return Err(AppError::InvalidPayPeriods(format!(
                    "periods {} and {} overlap",
                    pair[0].id, pair[1].id
                )));
            }
        }

        Ok(Self {
            pay_periods: periods,
        })
    }

    pub fn periods(&self) -> &[PayPeriod] {
        &self.pay_periods
    }

    pub fn len(&self) -> usize {
        self.pay_periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pay_periods.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&PayPeriod> {
        self.pay_periods.iter().find(|p| p.id == id)
    }

    pub fn find_containing(&self, date: NaiveDate) -> Option<&PayPeriod> {
        self.pay_periods.iter().find(|p| p.contains(date))
    }

    /// The period containing `today`, else the next one to start.
    pub fn current_or_next(&self, today: NaiveDate) -> Option<&PayPeriod> {
        self.find_containing(today)
            .or_else(|| self.pay_periods.iter().find(|p| p.period_start > today))
    }

    /// Built-in 2025 table, used whenever no valid table is stored.
    pub fn builtin() -> Self {
        const ROWS: [(&str, &str, &str, &str, &str, &str); 10] = [
            ("2025-15", "2025-08-02", "2025-08-15", "2025-08-15", "2025-08-22", "Pay Period 15 - Aug 2-15, 2025"),
            ("2025-16", "2025-08-16", "2025-08-29", "2025-08-29", "2025-09-05", "Pay Period 16 - Aug 16-29, 2025"),
            ("2025-17", "2025-08-30", "2025-09-15", "2025-09-15", "2025-09-22", "Pay Period 17 - Aug 30 - Sep 15, 2025"),
            ("2025-18", "2025-09-16", "2025-09-30", "2025-09-30", "2025-10-07", "Pay Period 18 - Sep 16-30, 2025"),
            ("2025-19", "2025-10-01", "2025-10-15", "2025-10-15", "2025-10-22", "Pay Period 19 - Oct 1-15, 2025"),
            ("2025-20", "2025-10-16", "2025-10-31", "2025-10-31", "2025-11-07", "Pay Period 20 - Oct 16-31, 2025"),
            ("2025-21", "2025-11-01", "2025-11-14", "2025-11-14", "2025-11-21", "Pay Period 21 - Nov 1-14, 2025"),
            ("2025-22", "2025-11-15", "2025-11-28", "2025-11-28", "2025-12-05", "Pay Period 22 - Nov 15-28, 2025"),
            ("2025-23", "2025-11-29", "2025-12-15", "2025-12-15", "2025-12-22", "Pay Period 23 - Nov 29 - Dec 15, 2025"),
            ("2025-24", "2025-12-16", "2025-12-31", "2025-12-31", "2026-01-07", "Pay Period 24 - Dec 16-31, 2025"),
        ];

        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default();

        Self {
            pay_periods: ROWS
                .iter()
                .map(|(id, start, end, due, pay, desc)| PayPeriod {
                    id: id.to_string(),
                    period_start: d(start),
                    period_end: d(end),
                    timesheet_due: d(due),
                    pay_day: d(pay),
                    description: desc.to_string(),
                })
                .collect(),
        }
    }

    /// Consecutive fixed-length periods starting at `first_start`.
    ///
    /// Timesheets are due on the last day and paid seven days later.
    pub fn generate(first_start: NaiveDate, count: u32, length_days: u32) -> AppResult<Self> {
        if count == 0 || length_days == 0 {
            return Err(AppError::InvalidPayPeriods(
                "count and length must be positive".into(),
            ));
        }

        let mut periods = Vec::with_capacity(count as usize);
        let mut start = first_start;

        for n in 1..=count {
            let end = start + Duration::days(length_days as i64 - 1);
            periods.push(PayPeriod {
                id: format!("PP{:02}-{}", n, first_start.format("%Y")),
                period_start: start,
                period_end: end,
                timesheet_due: end,
                pay_day: end + Duration::days(7),
                description: format!(
                    "Pay Period {} - {} to {}",
                    n,
                    start.format("%b %-d"),
                    end.format("%b %-d, %Y")
                ),
            });
            start = end + Duration::days(1);
        }

        Self::new(periods)
    }
}

impl TryFrom<RawPayPeriods> for PayPeriodTable {
    type Error = AppError;

    fn try_from(raw: RawPayPeriods) -> AppResult<Self> {
        Self::new(raw.pay_periods)
    }
}
