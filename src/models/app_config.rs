use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPANY: &str = "CAND, LLC";

/// Admin-managed application settings, persisted as one blob.
///
/// Unknown or missing fields in a stored blob fall back to the defaults below,
/// so older blobs keep loading after new settings are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub company_name: String,
    pub allow_edit: bool,
    pub allow_delete: bool,
    pub allow_employee_edit: bool,
    pub allow_employee_delete: bool,
    pub is_licensed: bool,
    pub licensed_company: String,
    pub license_key: String,
    pub logo_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY.to_string(),
            allow_edit: true,
            allow_delete: true,
            allow_employee_edit: true,
            allow_employee_delete: true,
            is_licensed: false,
            licensed_company: String::new(),
            license_key: String::new(),
            logo_url: String::new(),
        }
    }
}
