use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{
    ADMIN_PASSPHRASE, ADMIN_URL, add_entry, enroll_admin, init_db_for, rti, rti_admin,
    setup_test_db, temp_out,
};

#[test]
fn test_employee_mode_without_url() {
    let db_path = setup_test_db("admin_employee_mode");
    init_db_for(&db_path, "Jane Doe");

    rti()
        .args(["--db", &db_path, "admin", "status"])
        .assert()
        .success()
        .stdout(contains("Access level : Employee"))
        .stdout(contains("not enrolled"));

    rti()
        .args(["--db", &db_path, "admin", "validate"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn test_admin_url_without_enrollment_stays_employee() {
    let db_path = setup_test_db("admin_not_enrolled");
    init_db_for(&db_path, "Jane Doe");

    rti()
        .args(["--db", &db_path, "--url", ADMIN_URL, "admin", "status"])
        .assert()
        .success()
        .stdout(contains("no passphrase is enrolled"))
        .stdout(contains("Access level : Employee"));
}

#[test]
fn test_enroll_and_unlock_admin_mode() {
    let db_path = setup_test_db("admin_enroll");
    init_db_for(&db_path, "Jane Doe");
    enroll_admin(&db_path);

    rti_admin(&db_path)
        .args(["admin", "status"])
        .assert()
        .success()
        .stdout(contains("Access level : Company Admin"))
        .stdout(contains("Data quality  : 100%"))
        .stdout(contains("Categories    : -"));

    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    rti()
        .args([
            "--db", &db_path, "add", "--date", "2025-09-02", "--category", "travel", "--hours",
            "2",
        ])
        .assert()
        .success();

    rti_admin(&db_path)
        .args(["admin", "status"])
        .assert()
        .success()
        .stdout(contains("Categories    : Work, Travel"));

    // The fragment form works too.
    rti()
        .args([
            "--db",
            &db_path,
            "--url",
            "https://tracker.example.com/#admin-setup",
            "--passphrase",
            ADMIN_PASSPHRASE,
            "admin",
            "status",
        ])
        .assert()
        .success()
        .stdout(contains("Company Admin"));
}

#[test]
fn test_passphrase_from_environment() {
    let db_path = setup_test_db("admin_env_passphrase");
    init_db_for(&db_path, "Jane Doe");
    enroll_admin(&db_path);

    rti()
        .env("RTIMETRACKER_ADMIN_PASSPHRASE", ADMIN_PASSPHRASE)
        .args(["--db", &db_path, "--url", "https://x.test/?config=x7k9m", "admin", "status"])
        .assert()
        .success()
        .stdout(contains("Company Admin"));
}

#[test]
fn test_wrong_passphrase_is_rejected() {
    let db_path = setup_test_db("admin_wrong_passphrase");
    init_db_for(&db_path, "Jane Doe");
    enroll_admin(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "--url",
            ADMIN_URL,
            "--passphrase",
            "not the passphrase",
            "admin",
            "status",
        ])
        .assert()
        .failure()
        .stderr(contains("Authentication failed"));

    rti()
        .args(["--db", &db_path, "--url", ADMIN_URL, "admin", "status"])
        .assert()
        .failure()
        .stderr(contains("admin passphrase required"));
}

#[test]
fn test_short_passphrase_and_reenrollment_rules() {
    let db_path = setup_test_db("admin_reenroll");
    init_db_for(&db_path, "Jane Doe");

    rti()
        .args(["--db", &db_path, "admin", "enroll", "--new-passphrase", "short"])
        .assert()
        .failure()
        .stderr(contains("at least 8 characters"));

    enroll_admin(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "admin",
            "enroll",
            "--new-passphrase",
            "another passphrase",
        ])
        .assert()
        .failure()
        .stderr(contains("requires admin mode"));

    rti_admin(&db_path)
        .args(["admin", "enroll", "--new-passphrase", "another passphrase"])
        .assert()
        .success()
        .stdout(contains("Admin passphrase saved."));
}

#[test]
fn test_settings_disable_employee_edit() {
    let db_path = setup_test_db("admin_settings_edit");
    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    enroll_admin(&db_path);

    rti_admin(&db_path)
        .args([
            "admin",
            "settings",
            "--company",
            "Acme Corp",
            "--allow-employee-edit",
            "false",
        ])
        .assert()
        .success()
        .stdout(contains("Acme Corp"))
        .stdout(contains("Employees may edit    : no"));

    rti()
        .args(["--db", &db_path, "edit", "1", "--hours", "2"])
        .assert()
        .failure()
        .stderr(contains("editing entries is disabled"));

    // Admins are not bound by the employee toggles.
    rti_admin(&db_path)
        .args(["edit", "1", "--hours", "2"])
        .assert()
        .success();

    rti_admin(&db_path)
        .args(["admin", "reset-settings"])
        .assert()
        .success()
        .stdout(contains("CAND, LLC"))
        .stdout(contains("Employees may edit    : yes"));
}

#[test]
fn test_logo_requires_license() {
    let db_path = setup_test_db("admin_logo");
    init_db_for(&db_path, "Jane Doe");
    enroll_admin(&db_path);

    rti_admin(&db_path)
        .args([
            "admin",
            "settings",
            "--logo-url",
            "https://i.imgur.com/logo.png",
        ])
        .assert()
        .failure()
        .stderr(contains("licensed installation"));
}

#[test]
fn test_validate_and_clean_duplicates() {
    let db_path = setup_test_db("admin_clean");
    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    rti()
        .args(["--db", &db_path, "add", "--date", "2025-09-02", "--hours", "0"])
        .assert()
        .success();
    enroll_admin(&db_path);

    rti_admin(&db_path)
        .args(["admin", "validate"])
        .assert()
        .success()
        .stdout(contains("Validation complete: 1 valid, 1 invalid, 1 duplicates"))
        .stdout(contains("Data quality      : 33%"));

    rti_admin(&db_path)
        .args(["admin", "clean"])
        .assert()
        .success()
        .stdout(contains("1 zero-hour entries, 1 duplicates removed"));

    rti_admin(&db_path)
        .args(["admin", "clean"])
        .assert()
        .success()
        .stdout(contains("Nothing to clean."));
}

#[test]
fn test_admin_clear_all() {
    let db_path = setup_test_db("admin_clear_all");
    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    enroll_admin(&db_path);

    rti()
        .args(["--db", &db_path, "admin", "clear", "--force"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rti_admin(&db_path)
        .args(["admin", "clear", "--force"])
        .assert()
        .success()
        .stdout(contains("1 entries deleted."));
}

#[test]
fn test_pay_period_management() {
    let db_path = setup_test_db("admin_periods");
    let template = temp_out("MyPeriods", "csv");
    let json_out = temp_out("admin_periods", "json");
    init_db_for(&db_path, "Jane Doe");
    enroll_admin(&db_path);

    rti()
        .args(["--db", &db_path, "periods", "list"])
        .assert()
        .success()
        .stdout(contains("Default 2025 Pay Periods"))
        .stdout(contains("2025-17"));

    rti()
        .args(["--db", &db_path, "periods", "show", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("2025-17"))
        .stdout(contains("09/01 - Labor Day"));

    rti()
        .args(["--db", &db_path, "periods", "template", &template])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rti_admin(&db_path)
        .args(["periods", "template", &template])
        .assert()
        .success();

    rti_admin(&db_path)
        .args(["periods", "import", &template])
        .assert()
        .success()
        .stdout(contains("Imported 3 pay periods as 'MyPeriods_out'"));

    rti_admin(&db_path)
        .args(["periods", "export", &json_out])
        .assert()
        .success();
    let json = fs::read_to_string(&json_out).expect("read json");
    assert!(json.contains("payPeriodsConfig"));
    assert!(json.contains("2025-01"));

    rti_admin(&db_path)
        .args([
            "periods", "generate", "--start", "2026-01-05", "--count", "4", "--days", "14",
        ])
        .assert()
        .success()
        .stdout(contains("Generated 4 pay periods"));

    rti()
        .args(["--db", &db_path, "periods", "list"])
        .assert()
        .success()
        .stdout(contains("PP01-2026"))
        .stdout(contains("PP04-2026"));

    rti_admin(&db_path)
        .args(["periods", "reset"])
        .assert()
        .success()
        .stdout(contains("Default 2025 Pay Periods"));
}

#[test]
fn test_overlapping_periods_are_rejected() {
    let db_path = setup_test_db("admin_periods_overlap");
    let file = temp_out("overlap_periods", "csv");
    fs::write(
        &file,
        "ID,Description,Period Start,Period End,Timesheet Due,Pay Day\n\
         A,First,2026-01-01,2026-01-15,2026-01-15,2026-01-22\n\
         B,Second,2026-01-10,2026-01-31,2026-01-31,2026-02-07\n",
    )
    .expect("write csv");

    init_db_for(&db_path, "Jane Doe");
    enroll_admin(&db_path);

    rti_admin(&db_path)
        .args(["periods", "import", &file])
        .assert()
        .failure()
        .stderr(contains("overlap"));
}

#[test]
fn test_holiday_selection() {
    let db_path = setup_test_db("holiday_select");
    init_db_for(&db_path, "Jane Doe");

    rti()
        .args(["--db", &db_path, "holidays", "list", "--period", "2025-17"])
        .assert()
        .success()
        .stdout(contains("[ ]"))
        .stdout(contains("labor-2025"));

    rti()
        .args([
            "--db", &db_path, "holidays", "select", "--period", "2025-17", "--ids", "labor-2025",
        ])
        .assert()
        .success()
        .stdout(contains("1 added, 0 removed"));

    rti()
        .args(["--db", &db_path, "holidays", "list", "--period", "2025-17"])
        .assert()
        .success()
        .stdout(contains("[x]"));

    rti()
        .args(["--db", &db_path, "list", "--category", "holiday"])
        .assert()
        .success()
        .stdout(contains("Labor Day"))
        .stdout(contains("8.00"));

    // Selecting again is a no-op.
    rti()
        .args([
            "--db", &db_path, "holidays", "select", "--period", "2025-17", "--ids", "labor-2025",
        ])
        .assert()
        .success()
        .stdout(contains("Holiday selection unchanged."));

    // An empty selection removes it.
    rti()
        .args(["--db", &db_path, "holidays", "select", "--period", "2025-17"])
        .assert()
        .success()
        .stdout(contains("0 added, 1 removed"));
}

#[test]
fn test_holiday_calendar_import_export() {
    let db_path = setup_test_db("holiday_calendar");
    let template = temp_out("CompanyHolidays", "csv");
    let export = temp_out("holiday_calendar_export", "csv");
    init_db_for(&db_path, "Jane Doe");
    enroll_admin(&db_path);

    rti_admin(&db_path)
        .args(["holidays", "template", &template])
        .assert()
        .success();

    rti_admin(&db_path)
        .args(["holidays", "import", &template])
        .assert()
        .success()
        .stdout(contains("as 'CompanyHolidays_out'"));

    rti_admin(&db_path)
        .args(["holidays", "export", &export])
        .assert()
        .success();
    let csv = fs::read_to_string(&export).expect("read csv");
    assert!(csv.starts_with("ID,Date,Name,Type,Description"));

    rti_admin(&db_path)
        .args(["holidays", "reset"])
        .assert()
        .success()
        .stdout(contains("Default 2025 Holidays"));
}

#[test]
fn test_backup_requires_admin() {
    let db_path = setup_test_db("admin_backup");
    let backup = temp_out("admin_backup", "sqlite");
    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    enroll_admin(&db_path);

    rti()
        .args(["--db", &db_path, "backup", "--file", &backup])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rti_admin(&db_path)
        .args(["backup", "--file", &backup])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(Path::new(&backup).exists());
}

#[test]
fn test_db_info_and_log() {
    let db_path = setup_test_db("admin_db_info");
    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    enroll_admin(&db_path);

    rti()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rti_admin(&db_path)
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("unifiedTimeEntries"))
        .stdout(contains("Integrity check passed."));

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("add"))
        .stdout(contains("enroll"))
        .stdout(contains("passphrase").and(contains(ADMIN_PASSPHRASE).not()));
}
