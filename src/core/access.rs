//! Two-tier access control.
//!
//! Admin mode is *requested* by the launch URL and *granted* only after the
//! admin passphrase checks out against the enrolled credential.

use crate::errors::{AppError, AppResult};
use crate::models::credential::{AdminCredential, DEFAULT_PBKDF2_ITERATIONS};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::{DateTime, Utc};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use std::fmt;

pub const ADMIN_CONFIG_CODE: &str = "x7k9m";
pub const ADMIN_FRAGMENT: &str = "admin-setup";
pub const MIN_PASSPHRASE_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    Employee,
    CompanyAdmin,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Employee => f.write_str("Employee"),
            AccessLevel::CompanyAdmin => f.write_str("Company Admin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Timer,
    ViewOwnEntries,
    ExportOwnData,
    EditOwnEntries,
    ViewAllEntries,
    ConfigureCompany,
    ManagePayPeriods,
    ManageHolidays,
    ExportTeamData,
    DataCleanup,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Timer => "timer",
            Feature::ViewOwnEntries => "view_own_entries",
            Feature::ExportOwnData => "export_own_data",
            Feature::EditOwnEntries => "edit_own_entries",
            Feature::ViewAllEntries => "view_all_entries",
            Feature::ConfigureCompany => "configure_company",
            Feature::ManagePayPeriods => "manage_pay_periods",
            Feature::ManageHolidays => "manage_holidays",
            Feature::ExportTeamData => "export_team_data",
            Feature::DataCleanup => "data_cleanup",
        }
    }
}

const EMPLOYEE_FEATURES: [Feature; 4] = [
    Feature::Timer,
    Feature::ViewOwnEntries,
    Feature::ExportOwnData,
    Feature::EditOwnEntries,
];

pub fn has_access(level: AccessLevel, feature: Feature) -> bool {
    match level {
        AccessLevel::CompanyAdmin => true,
        AccessLevel::Employee => EMPLOYEE_FEATURES.contains(&feature),
    }
}

pub fn require(level: AccessLevel, feature: Feature) -> AppResult<()> {
    if has_access(level, feature) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(format!(
            "'{}' requires admin access",
            feature.as_str()
        )))
    }
}

/// What the launch URL asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessRequest {
    pub admin: bool,
}

impl AccessRequest {
    /// `?setup`, `?config=x7k9m` or `#admin-setup` request admin mode; any
    /// other URL, or none, is employee mode.
    pub fn from_url(url: Option<&str>) -> Self {
        let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Self::default();
        };

        let (rest, fragment) = match url.split_once('#') {
            Some((r, f)) => (r, Some(f)),
            None => (url, None),
        };
        let query = rest.split_once('?').map(|(_, q)| q).unwrap_or("");

        let query_admin = query.split('&').any(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            key == "setup" || (key == "config" && value == ADMIN_CONFIG_CODE)
        });

        Self {
            admin: query_admin || fragment == Some(ADMIN_FRAGMENT),
        }
    }
}

fn derive_key(passphrase: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iterations, &mut key);
    key
}

pub struct AccessLogic;

impl AccessLogic {
    pub fn enroll(passphrase: &str, now: DateTime<Utc>) -> AppResult<AdminCredential> {
        if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
            return Err(AppError::Auth(format!(
                "passphrase must be at least {} characters",
                MIN_PASSPHRASE_LEN
            )));
        }

        let mut salt = [0u8; 16];
        OsRng.fill_bytes(&mut salt);
        let key = derive_key(passphrase, &salt, DEFAULT_PBKDF2_ITERATIONS);

        Ok(AdminCredential {
            salt: B64.encode(salt),
            hash: B64.encode(key),
            iterations: DEFAULT_PBKDF2_ITERATIONS,
            enrolled_at: now,
        })
    }

    pub fn verify(credential: &AdminCredential, passphrase: &str) -> bool {
        if passphrase.is_empty() {
            return false;
        }
        let (Ok(salt), Ok(expected)) = (B64.decode(&credential.salt), B64.decode(&credential.hash))
        else {
            return false;
        };

        let key = derive_key(passphrase, &salt, credential.iterations.max(1));

        // Compare every byte regardless of where the first mismatch is.
        key.len() == expected.len()
            && key
                .iter()
                .zip(expected.iter())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    /// Resolve the effective level for one invocation.
    ///
    /// Without an enrolled credential the admin request cannot be honoured and
    /// the caller stays an employee (only `admin enroll` is useful then).
    pub fn resolve(
        request: AccessRequest,
        credential: Option<&AdminCredential>,
        passphrase: Option<&str>,
    ) -> AppResult<AccessLevel> {
        if !request.admin {
            return Ok(AccessLevel::Employee);
        }

        let Some(credential) = credential else {
            return Ok(AccessLevel::Employee);
        };

        match passphrase {
            Some(p) if Self::verify(credential, p) => Ok(AccessLevel::CompanyAdmin),
            Some(_) => Err(AppError::Auth("wrong admin passphrase".into())),
            None => Err(AppError::Auth("admin passphrase required".into())),
        }
    }
}
