use crate::models::pay_period::PayPeriod;
use crate::utils::date::short_month_day;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_holiday_type() -> String {
    "company".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type", default = "default_holiday_type")]
    pub holiday_type: String,
    #[serde(default)]
    pub description: String,
}

impl Holiday {
    /// Fill the optional columns the way imports expect: blank type means
    /// `company`, blank description repeats the name.
    pub fn normalized(mut self) -> Self {
        if self.holiday_type.trim().is_empty() {
            self.holiday_type = default_holiday_type();
        }
        if self.description.trim().is_empty() {
            self.description = self.name.clone();
        }
        self
    }

    /// `MM/DD - Name`
    pub fn label(&self) -> String {
        format!("{} - {}", short_month_day(self.date), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    pub holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    pub fn new(holidays: Vec<Holiday>) -> Self {
        let mut holidays: Vec<Holiday> = holidays.into_iter().map(Holiday::normalized).collect();
        holidays.sort_by_key(|h| h.date);
        Self { holidays }
    }

    pub fn by_id(&self, id: &str) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.id == id)
    }

    /// Holidays falling inside the period (inclusive).
    pub fn in_period(&self, period: &PayPeriod) -> Vec<&Holiday> {
        self.holidays
            .iter()
            .filter(|h| period.contains(h.date))
            .collect()
    }

    /// Built-in 2025 calendar.
    pub fn builtin() -> Self {
        const ROWS: [(&str, &str, &str, &str, &str); 12] = [
            ("new-years-2025", "2025-01-01", "New Year's Day", "federal", "Federal Holiday - New Year's Day"),
            ("mlk-2025", "2025-01-20", "Martin Luther King Jr. Day", "federal", "Federal Holiday - Martin Luther King Jr. Day"),
            ("presidents-2025", "2025-02-17", "Presidents Day", "federal", "Federal Holiday - Presidents Day"),
            ("memorial-2025", "2025-05-26", "Memorial Day", "federal", "Federal Holiday - Memorial Day"),
            ("juneteenth-2025", "2025-06-19", "Juneteenth", "federal", "Federal Holiday - Juneteenth National Independence Day"),
            ("independence-2025", "2025-07-04", "Independence Day", "federal", "Federal Holiday - Independence Day"),
            ("labor-2025", "2025-09-01", "Labor Day", "federal", "Federal Holiday - Labor Day"),
            ("columbus-2025", "2025-10-13", "Columbus Day", "federal", "Federal Holiday - Columbus Day"),
            ("veterans-2025", "2025-11-11", "Veterans Day", "federal", "Federal Holiday - Veterans Day"),
            ("thanksgiving-2025", "2025-11-27", "Thanksgiving Day", "federal", "Federal Holiday - Thanksgiving Day"),
            ("black-friday-2025", "2025-11-28", "Day After Thanksgiving", "company", "Company Holiday - Day After Thanksgiving"),
            ("christmas-2025", "2025-12-25", "Christmas Day", "federal", "Federal Holiday - Christmas Day"),
        ];

        Self {
            holidays: ROWS
                .iter()
                .map(|(id, date, name, kind, desc)| Holiday {
                    id: id.to_string(),
                    date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default(),
                    name: name.to_string(),
                    holiday_type: kind.to_string(),
                    description: desc.to_string(),
                })
                .collect(),
        }
    }
}
