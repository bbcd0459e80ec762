use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::env;
use std::fs;

mod common;
use common::{
    add_entry, enroll_admin, init_db_for, rti, rti_admin, setup_test_db, temp_out,
};

#[test]
fn test_export_csv_then_import_round_trip() {
    let src_db = setup_test_db("roundtrip_src");
    let dst_db = setup_test_db("roundtrip_dst");
    let out = temp_out("roundtrip", "csv");

    init_db_for(&src_db, "Jane Doe");
    add_entry(&src_db, "2025-09-01", "09:00", "17:00", "Project Alpha");
    add_entry(&src_db, "2025-09-02", "08:00", "12:30", "Project, Beta");

    rti()
        .args(["--db", &src_db, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(
        content.starts_with(
            "Employee,Date,Category,Project,Start Time,End Time,Duration,Description"
        )
    );
    assert!(content.contains("\"Project, Beta\""));

    init_db_for(&dst_db, "Jane Doe");
    rti()
        .args(["--db", &dst_db, "import", &out])
        .assert()
        .success()
        .stdout(contains("2 imported, 0 duplicates, 0 skipped"));

    rti()
        .args(["--db", &dst_db, "list"])
        .assert()
        .success()
        .stdout(contains("Project Alpha"))
        .stdout(contains("Project, Beta"))
        .stdout(contains("2 entries, 12.50 hours"));

    // Same file again: every row is already there.
    rti()
        .args(["--db", &dst_db, "import", &out])
        .assert()
        .success()
        .stdout(contains("No new entries imported (2 duplicates, 0 skipped)"));
}

#[test]
fn test_export_json_and_xlsx() {
    let db_path = setup_test_db("export_formats");
    let json_out = temp_out("export_formats", "json");
    let xlsx_out = temp_out("export_formats", "xlsx");

    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");

    rti()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &json_out])
        .assert()
        .success();

    let json = fs::read_to_string(&json_out).expect("read json");
    assert!(json.contains("\"employeeName\": \"Jane Doe\""));
    assert!(json.contains("\"project\": \"Project Alpha\""));

    rti()
        .args(["--db", &db_path, "export", "--format", "xlsx", "--file", &xlsx_out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    assert!(fs::metadata(&xlsx_out).map(|m| m.len() > 0).unwrap_or(false));
}

#[test]
fn test_json_export_imports_back() {
    let src_db = setup_test_db("json_roundtrip_src");
    let dst_db = setup_test_db("json_roundtrip_dst");
    let out = temp_out("json_roundtrip", "json");

    init_db_for(&src_db, "Jane Doe");
    add_entry(&src_db, "2025-09-01", "09:00", "17:00", "Project Alpha");

    rti()
        .args(["--db", &src_db, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    init_db_for(&dst_db, "Jane Doe");
    rti()
        .args(["--db", &dst_db, "import", &out])
        .assert()
        .success()
        .stdout(contains("1 imported"));
}

#[test]
fn test_export_with_no_entries_warns() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    init_db_for(&db_path, "Jane Doe");

    rti()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("No entries found for the selected filter."));

    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_export_existing_file_requires_confirmation() {
    let db_path = setup_test_db("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");

    fs::write(&out, "keep me").expect("write existing file");

    rti()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rti()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Project Alpha"));
}

#[test]
fn test_import_takes_employee_from_file_name() {
    let db_path = setup_test_db("import_filename");
    let mut path = env::temp_dir();
    path.push("JohnDoe-TimeSheet.csv");
    fs::write(
        &path,
        "Date,Start Time,End Time,Project\n2025-09-01,9:00 AM,5:00 PM,Client Site\n",
    )
    .expect("write csv");

    init_db_for(&db_path, "John Doe");
    rti()
        .args(["--db", &db_path, "import", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("1 imported"));

    rti()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Client Site"))
        .stdout(contains("8.00"));
}

#[test]
fn test_import_reports_bad_rows() {
    let db_path = setup_test_db("import_bad_rows");
    let out = temp_out("import_bad_rows", "csv");
    fs::write(
        &out,
        "Employee,Date,Category,Project,Start Time,End Time,Duration,Description\n\
         Jane Doe,2025-09-01,work,Alpha,09:00,17:00,8,ok\n\
         Jane Doe,not-a-date,work,Alpha,09:00,17:00,8,bad date\n\
         Jane Doe,2025-09-02,cooking,Alpha,09:00,17:00,8,bad category\n\
         Jane Doe,2025-09-03\n",
    )
    .expect("write csv");

    init_db_for(&db_path, "Jane Doe");
    rti()
        .args(["--db", &db_path, "import", &out])
        .assert()
        .success()
        .stdout(contains("Line 3 skipped"))
        .stdout(contains("Line 4 skipped"))
        .stdout(contains("Line 5 skipped"))
        .stdout(contains("1 imported, 0 duplicates, 3 skipped"));
}

#[test]
fn test_import_missing_file_fails() {
    let db_path = setup_test_db("import_missing");
    init_db_for(&db_path, "Jane Doe");

    rti()
        .args(["--db", &db_path, "import", "/definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(contains("file not found"));
}

#[test]
fn test_sample_timesheet_import_skips_training_row() {
    let db_path = setup_test_db("sample_import");
    let sample = temp_out("sample_import", "csv");

    init_db_for(&db_path, "John Doe");
    enroll_admin(&db_path);

    rti_admin(&db_path)
        .args(["admin", "sample", "--file", &sample])
        .assert()
        .success();

    rti_admin(&db_path)
        .args(["import", &sample])
        .assert()
        .success()
        .stdout(contains("Line 5 skipped"))
        .stdout(contains("5 imported, 0 duplicates, 1 skipped"));

    rti_admin(&db_path)
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(contains("Bob Johnson"))
        .stdout(contains("Python Course").not());
}

#[test]
fn test_team_export_requires_admin() {
    let db_path = setup_test_db("team_export");
    let out = temp_out("team_export", "csv");

    init_db_for(&db_path, "Jane Doe");
    add_entry(&db_path, "2025-09-01", "09:00", "17:00", "Project Alpha");
    enroll_admin(&db_path);

    rti()
        .args(["--db", &db_path, "export", "--all", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rti_admin(&db_path)
        .args(["export", "--all", "--file", &out])
        .assert()
        .success();
}

#[test]
fn test_employee_import_is_limited_to_own_entries() {
    let db_path = setup_test_db("import_scoped");
    let own = temp_out("import_scoped_own", "csv");
    let mixed = temp_out("import_scoped_mixed", "csv");
    fs::write(&own, "Date,Project,Duration\n2025-09-01,Alpha,8\n").expect("write csv");
    fs::write(
        &mixed,
        "Employee,Date,Project,Duration\n\
         Alice,2025-09-02,Alpha,8\n\
         Bob,2025-09-03,Alpha,8\n",
    )
    .expect("write csv");

    init_db_for(&db_path, "Alice");
    enroll_admin(&db_path);

    rti()
        .args(["--db", &db_path, "import", &own, "--employee", "Bob"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rti()
        .args(["--db", &db_path, "import", &mixed])
        .assert()
        .failure()
        .stderr(contains("importing entries for Bob requires admin access"));

    // Nothing was written by the rejected imports.
    rti_admin(&db_path)
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(contains("No entries"));

    rti_admin(&db_path)
        .args(["import", &own, "--employee", "Bob"])
        .assert()
        .success()
        .stdout(contains("1 imported"));

    rti_admin(&db_path)
        .args(["import", &mixed])
        .assert()
        .success()
        .stdout(contains("2 imported"));
}
