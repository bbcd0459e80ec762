use serde::{Deserialize, Serialize};

/// Where a time entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrySource {
    Timer,
    Import,
    HolidaySelection,
    Manual,
}

impl EntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::Timer => "timer",
            EntrySource::Import => "import",
            EntrySource::HolidaySelection => "holiday-selection",
            EntrySource::Manual => "manual",
        }
    }
}
