use serde::{Deserialize, Serialize};
use std::fmt;

/// Time entry category.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Overhead,
    Travel,
    Pto,
    Sick,
    Holiday,
    Bereavement,
    Jury,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Work,
        Category::Overhead,
        Category::Travel,
        Category::Pto,
        Category::Sick,
        Category::Holiday,
        Category::Bereavement,
        Category::Jury,
    ];

    /// Convert enum → stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Overhead => "overhead",
            Category::Travel => "travel",
            Category::Pto => "pto",
            Category::Sick => "sick",
            Category::Holiday => "holiday",
            Category::Bereavement => "bereavement",
            Category::Jury => "jury",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Overhead => "Overhead",
            Category::Travel => "Travel",
            Category::Pto => "PTO",
            Category::Sick => "Sick",
            Category::Holiday => "Holiday",
            Category::Bereavement => "Bereavement",
            Category::Jury => "Jury",
        }
    }

    /// Case-insensitive parse of user or CSV input.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
