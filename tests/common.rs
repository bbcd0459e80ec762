#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN_URL: &str = "https://tracker.example.com/?setup";
pub const ADMIN_PASSPHRASE: &str = "correct horse battery";

/// Binary under test, isolated from any admin settings in the environment.
pub fn rti() -> Command {
    let mut cmd = cargo_bin_cmd!("rtimetracker");
    cmd.env_remove("RTIMETRACKER_URL")
        .env_remove("RTIMETRACKER_ADMIN_PASSPHRASE")
        .env_remove("RTIMETRACKER_NEW_PASSPHRASE");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimetracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and remember `employee` as the workstation user.
pub fn init_db_for(db_path: &str, employee: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rti()
        .args(["--db", db_path, "employee", "--name", employee])
        .assert()
        .success();
}

/// Add a manual entry for the remembered employee.
pub fn add_entry(db_path: &str, date: &str, start: &str, end: &str, project: &str) {
    rti()
        .args([
            "--db", db_path, "add", "--date", date, "--in", start, "--out", end, "--project",
            project,
        ])
        .assert()
        .success();
}

/// Enroll the admin passphrase (first enrollment needs no admin mode).
pub fn enroll_admin(db_path: &str) {
    rti()
        .args([
            "--db",
            db_path,
            "admin",
            "enroll",
            "--new-passphrase",
            ADMIN_PASSPHRASE,
        ])
        .assert()
        .success();
}

/// Command pre-loaded with `--db` and admin-mode flags.
pub fn rti_admin(db_path: &str) -> Command {
    let mut cmd = rti();
    cmd.args([
        "--db",
        db_path,
        "--url",
        ADMIN_URL,
        "--passphrase",
        ADMIN_PASSPHRASE,
    ]);
    cmd
}
