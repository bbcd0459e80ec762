use crate::errors::{AppError, AppResult};
use crate::models::app_config::{AppConfig, DEFAULT_COMPANY};
use regex::Regex;
use std::sync::OnceLock;

const IMAGE_HOSTS: [&str; 8] = [
    "imgur.com",
    "i.imgur.com",
    "github.com",
    "githubusercontent.com",
    "cloudinary.com",
    "res.cloudinary.com",
    "images.unsplash.com",
    "unsplash.com",
];

fn https_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^https://[^\s/?#]+\.[^\s/?#]+(/\S*)?$").unwrap())
}

fn image_ext_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|svg|webp)(\?.*)?$").unwrap())
}

/// Fields an admin may change; `None` leaves the current value.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub company_name: Option<String>,
    pub allow_edit: Option<bool>,
    pub allow_delete: Option<bool>,
    pub allow_employee_edit: Option<bool>,
    pub allow_employee_delete: Option<bool>,
    pub logo_url: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.allow_edit.is_none()
            && self.allow_delete.is_none()
            && self.allow_employee_edit.is_none()
            && self.allow_employee_delete.is_none()
            && self.logo_url.is_none()
    }
}

pub struct SettingsLogic;

impl SettingsLogic {
    /// An empty URL is valid and means "no logo". Anything else must be
    /// https and point at a known image host or an image file.
    pub fn is_valid_logo_url(url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return true;
        }
        if !https_regex().is_match(url) {
            return false;
        }

        let lower = url.to_ascii_lowercase();
        IMAGE_HOSTS.iter().any(|h| lower.contains(h)) || image_ext_regex().is_match(url)
    }

    pub fn update(cfg: &mut AppConfig, update: SettingsUpdate) -> AppResult<()> {
        if let Some(url) = &update.logo_url {
            let url = url.trim();
            if !url.is_empty() && !cfg.is_licensed {
                return Err(AppError::PermissionDenied(
                    "a custom logo requires a licensed installation".into(),
                ));
            }
            if !Self::is_valid_logo_url(url) {
                return Err(AppError::InvalidUrl(url.to_string()));
            }
        }

        if let Some(name) = update.company_name {
            let name = name.trim();
            if !name.is_empty() {
                cfg.company_name = name.to_string();
            }
        }
        if let Some(v) = update.allow_edit {
            cfg.allow_edit = v;
        }
        if let Some(v) = update.allow_delete {
            cfg.allow_delete = v;
        }
        if let Some(v) = update.allow_employee_edit {
            cfg.allow_employee_edit = v;
        }
        if let Some(v) = update.allow_employee_delete {
            cfg.allow_employee_delete = v;
        }
        if let Some(url) = update.logo_url {
            cfg.logo_url = url.trim().to_string();
        }

        Ok(())
    }

    /// Company name, logo and permissions back to defaults; license data stays.
    pub fn reset_to_defaults(cfg: &mut AppConfig) {
        let defaults = AppConfig::default();
        cfg.company_name = DEFAULT_COMPANY.to_string();
        cfg.logo_url = defaults.logo_url;
        cfg.allow_edit = defaults.allow_edit;
        cfg.allow_delete = defaults.allow_delete;
        cfg.allow_employee_edit = defaults.allow_employee_edit;
        cfg.allow_employee_delete = defaults.allow_employee_delete;
    }
}
