use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rtimetracker::config::Config;
use rtimetracker::core::access::{AccessLevel, AccessLogic, AccessRequest, Feature, has_access};
use rtimetracker::core::entries::{EntryBook, EntryFilter};
use rtimetracker::core::holidays::HolidayLogic;
use rtimetracker::core::settings::SettingsLogic;
use rtimetracker::core::state::{AppState, DEFAULT_PAY_PERIODS_NAME};
use rtimetracker::core::timer::TimerLogic;
use rtimetracker::core::validation::ValidationLogic;
use rtimetracker::db::pool::DbPool;
use rtimetracker::db::store::{BlobStore, MemoryStore, StorageKey};
use rtimetracker::errors::AppError;
use rtimetracker::export::entries_import::read_entries_csv;
use rtimetracker::export::range::parse_range;
use rtimetracker::export::{EntryRow, write_entries_csv};
use rtimetracker::models::category::Category;
use rtimetracker::models::employee::EmployeeSettings;
use rtimetracker::models::entry::NewEntry;
use rtimetracker::models::holiday::HolidayCalendar;
use rtimetracker::models::pay_period::{PayPeriod, PayPeriodTable};
use rtimetracker::models::source::EntrySource;
use rtimetracker::ui::views::render_entries;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

fn t(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn work(employee: &str, date: &str, start: u32, end: u32, project: &str) -> NewEntry {
    NewEntry {
        employee_name: employee.to_string(),
        date: d(date),
        category: Category::Work,
        project: project.to_string(),
        start_time: t(start, 0),
        end_time: t(end, 0),
        duration_hours: (end - start) as f64,
        description: String::new(),
        source: EntrySource::Manual,
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 3, 12, 0, 0).unwrap()
}

#[test]
fn state_round_trips_through_the_store() {
    let store = MemoryStore::new();
    let mut state = AppState::load(&store).expect("load empty");
    assert!(state.book.is_empty());
    assert_eq!(state.pay_periods_name, DEFAULT_PAY_PERIODS_NAME);

    state.book.add(work("Jane Doe", "2025-09-01", 9, 17, "Alpha"), now());
    state.employee = Some(EmployeeSettings {
        employee_name: "Jane Doe".into(),
        last_updated: now(),
    });
    state.save_entries(&store, now()).expect("save entries");
    state.save_employee(&store).expect("save employee");

    let loaded = AppState::load(&store).expect("reload");
    assert_eq!(loaded.book.len(), 1);
    assert_eq!(loaded.book.next_id(), 2);
    assert_eq!(loaded.employee_name(), Some("Jane Doe"));
    assert_eq!(loaded.book.entries()[0].project, "Alpha");
}

#[test]
fn unreadable_blobs_fall_back_to_defaults() {
    let store = MemoryStore::new();
    store.set(StorageKey::TimeEntries, "{not json").unwrap();
    // Overlapping periods never make it into a table.
    store
        .set(
            StorageKey::PayPeriods,
            r#"{"payPeriods":[
                {"id":"A","periodStart":"2026-01-01","periodEnd":"2026-01-15","timesheetDue":"2026-01-15","payDay":"2026-01-22"},
                {"id":"B","periodStart":"2026-01-10","periodEnd":"2026-01-31","timesheetDue":"2026-01-31","payDay":"2026-02-07"}
            ]}"#,
        )
        .unwrap();
    store.set(StorageKey::PayPeriodsName, "Broken").unwrap();

    let state = AppState::load(&store).expect("load");
    assert!(state.book.is_empty());
    assert!(state.pay_periods.by_id("2025-17").is_some());
    assert_eq!(state.pay_periods_name, DEFAULT_PAY_PERIODS_NAME);
}

#[test]
fn stopped_timer_removes_its_key() {
    let store = MemoryStore::new();
    let mut state = AppState::default();

    state.timer = Some(
        TimerLogic::start(None, "Jane Doe", Category::Work, "Alpha", now()).expect("start"),
    );
    state.save_timer(&store).unwrap();
    assert!(store.get(StorageKey::Timer).unwrap().is_some());

    state.timer = None;
    state.save_timer(&store).unwrap();
    assert!(store.get(StorageKey::Timer).unwrap().is_none());
}

#[test]
fn stores_report_blob_sizes_in_bytes() {
    let mut path = std::env::temp_dir();
    path.push("store_sizes_rtimetracker.sqlite");
    std::fs::remove_file(&path).ok();

    let pool = DbPool::open_initialized(&path.to_string_lossy()).expect("open db");
    let sqlite = pool.store();
    let memory = MemoryStore::new();

    let value = "\"Zoë Müller\"";
    assert_eq!(value.len(), 14);
    sqlite.set(StorageKey::EmployeeSettings, value).unwrap();
    memory.set(StorageKey::EmployeeSettings, value).unwrap();

    let expected = vec![(StorageKey::EmployeeSettings.as_str().to_string(), 14)];
    assert_eq!(sqlite.entries().unwrap(), expected);
    assert_eq!(memory.entries().unwrap(), expected);
}

#[test]
fn relative_database_names_live_in_the_config_dir() {
    assert_eq!(
        Config::resolve_db_path("team.sqlite"),
        Config::config_dir().join("team.sqlite")
    );
    let abs = std::env::temp_dir().join("abs_rtimetracker.sqlite");
    assert_eq!(Config::resolve_db_path(&abs.to_string_lossy()), abs);
}

#[test]
fn pay_period_lookup() {
    let table = PayPeriodTable::builtin();

    let p = table.find_containing(d("2025-09-01")).expect("period");
    assert_eq!(p.id, "2025-17");
    // Both ends are inside.
    assert!(p.contains(d("2025-08-30")));
    assert!(p.contains(d("2025-09-15")));
    assert!(!p.contains(d("2025-09-16")));
    assert_eq!(p.period_days(), 17);

    // Before the table starts: the next period.
    assert_eq!(table.current_or_next(d("2025-01-10")).unwrap().id, "2025-15");
    // After the table ends: nothing.
    assert!(table.current_or_next(d("2026-06-01")).is_none());
}

#[test]
fn pay_period_table_rejects_overlaps() {
    let period = |id: &str, start: &str, end: &str| PayPeriod {
        id: id.into(),
        period_start: d(start),
        period_end: d(end),
        timesheet_due: d(end),
        pay_day: d(end),
        description: String::new(),
    };

    let err = PayPeriodTable::new(vec![
        period("A", "2026-01-01", "2026-01-15"),
        period("B", "2026-01-15", "2026-01-31"),
    ])
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidPayPeriods(_)));

    let err = PayPeriodTable::new(vec![period("X", "2026-02-10", "2026-02-01")]).unwrap_err();
    assert!(err.to_string().contains("ends before it starts"));

    // Unsorted input is fine.
    let ok = PayPeriodTable::new(vec![
        period("B", "2026-01-16", "2026-01-31"),
        period("A", "2026-01-01", "2026-01-15"),
    ])
    .expect("valid table");
    assert_eq!(ok.periods()[0].id, "A");
}

#[test]
fn generated_periods_are_contiguous() {
    let table = PayPeriodTable::generate(d("2026-01-05"), 3, 14).expect("generate");
    let p = table.periods();
    assert_eq!(p.len(), 3);
    assert_eq!(p[0].id, "PP01-2026");
    assert_eq!(p[0].period_end, d("2026-01-18"));
    assert_eq!(p[1].period_start, d("2026-01-19"));
    assert_eq!(p[2].pay_day, d("2026-02-22"));

    assert!(PayPeriodTable::generate(d("2026-01-05"), 0, 14).is_err());
}

#[test]
fn timer_rounds_to_half_hours() {
    assert_eq!(TimerLogic::rounded_hours(Duration::minutes(74)), 1.0);
    assert_eq!(TimerLogic::rounded_hours(Duration::minutes(75)), 1.5);
    assert_eq!(TimerLogic::rounded_hours(Duration::minutes(10)), 0.0);
    assert_eq!(TimerLogic::rounded_hours(Duration::minutes(-90)), 0.0);
}

#[test]
fn timer_start_and_stop() {
    let started = now();
    let state = TimerLogic::start(None, "  Jane Doe ", Category::Travel, "", started).expect("start");
    assert_eq!(state.employee_name, "Jane Doe");
    assert_eq!(state.project, "No Project");

    let err = TimerLogic::start(Some(&state), "Jane Doe", Category::Work, "x", started).unwrap_err();
    assert!(matches!(err, AppError::TimerAlreadyRunning(_)));

    let err = TimerLogic::start(None, "  ", Category::Work, "x", started).unwrap_err();
    assert!(matches!(err, AppError::MissingEmployee));

    let entry = TimerLogic::stop(&state, started + Duration::minutes(95), None);
    assert_eq!(entry.duration_hours, 1.5);
    assert_eq!(entry.category, Category::Travel);
    assert_eq!(entry.description, "Timer entry");
    assert_eq!(entry.source, EntrySource::Timer);

    // A clock that went backwards never yields negative time.
    let entry = TimerLogic::stop(&state, started - Duration::hours(2), Some("oops"));
    assert_eq!(entry.duration_hours, 0.0);
    assert_eq!(entry.description, "oops");
}

#[test]
fn holiday_selection_adds_and_removes_entries() {
    let mut book = EntryBook::default();
    let calendar = HolidayCalendar::builtin();
    let table = PayPeriodTable::builtin();
    let period = table.by_id("2025-17").expect("period");
    let selected = vec!["labor-2025".to_string()];

    let changed =
        HolidayLogic::apply_selection(&mut book, &calendar, "Jane Doe", period, &selected, now());
    assert_eq!(changed, (1, 0));
    let entry = &book.entries()[0];
    assert_eq!(entry.category, Category::Holiday);
    assert_eq!(entry.date, d("2025-09-01"));
    assert_eq!(entry.duration_hours, 8.0);

    assert_eq!(
        HolidayLogic::selected_ids(&book, &calendar, "Jane Doe", period),
        selected
    );

    let again =
        HolidayLogic::apply_selection(&mut book, &calendar, "Jane Doe", period, &selected, now());
    assert_eq!(again, (0, 0));

    let removed = HolidayLogic::apply_selection(&mut book, &calendar, "Jane Doe", period, &[], now());
    assert_eq!(removed, (0, 1));
    assert!(book.is_empty());
}

#[test]
fn validation_and_cleanup() {
    let mut book = EntryBook::default();
    book.add(work("Jane Doe", "2025-09-01", 9, 17, "Alpha"), now());
    book.add(work("Jane Doe", "2025-09-01", 9, 17, "Alpha"), now());
    book.add(work("Jane Doe", "2025-09-02", 9, 9, "Alpha"), now());
    book.add(work("John Roe", "2025-09-01", 9, 17, "Alpha"), now());

    let report = ValidationLogic::validate(book.entries());
    assert_eq!(report.total, 4);
    assert_eq!(report.valid, 2);
    assert_eq!(report.invalid, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.duplicate_ids, vec![2]);
    assert_eq!(report.invalid_ids, vec![3]);
    assert_eq!(report.quality_pct(), 50);

    assert_eq!(ValidationLogic::clean(&mut book), (1, 1));
    assert_eq!(book.len(), 2);
    assert_eq!(ValidationLogic::clean(&mut book), (0, 0));

    // Deleting never hands an id out again.
    book.delete(4).expect("delete");
    let e = book.add(work("Jane Doe", "2025-09-03", 9, 12, "Beta"), now());
    assert_eq!(e.id, 5);
}

#[test]
fn filter_combines_criteria() {
    let mut book = EntryBook::default();
    book.add(work("Jane Doe", "2025-09-01", 9, 17, "Alpha"), now());
    book.add(work("Jane Doe", "2025-09-20", 9, 17, "Alpha"), now());
    book.add(work("Jane Doe", "2025-09-02", 9, 12, "Beta"), now());
    book.add(work("John Roe", "2025-09-01", 9, 17, "Alpha"), now());

    let table = PayPeriodTable::builtin();
    let filter = EntryFilter {
        project: Some("alpha".into()),
        ..EntryFilter::for_employee("jane doe")
    }
    .within_period(table.by_id("2025-17").unwrap());

    let ids: Vec<u64> = book.filter(&filter).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1]);

    let days = book.daily_summary(&EntryFilter::for_employee("Jane Doe"));
    // Newest day first.
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, d("2025-09-20"));
    assert_eq!(days[1].total_hours, 3.0);
    assert_eq!(days[2].date, d("2025-09-01"));
}

#[test]
fn csv_rows_read_back() {
    let mut book = EntryBook::default();
    let mut e = work("Jane Doe", "2025-09-01", 9, 17, "Project, Beta");
    e.description = "said \"hello\"".into();
    e.category = Category::Overhead;
    book.add(e, now());

    let rows: Vec<EntryRow> = book.entries().iter().map(EntryRow::from).collect();
    let mut buf = Vec::new();
    write_entries_csv(&mut buf, &rows).expect("write");

    let (parsed, skipped) = read_entries_csv(buf.as_slice(), "Fallback").expect("read");
    assert!(skipped.is_empty());
    assert_eq!(parsed.len(), 1);

    let p = &parsed[0];
    assert_eq!(p.employee_name, "Jane Doe");
    assert_eq!(p.project, "Project, Beta");
    assert_eq!(p.description, "said \"hello\"");
    assert_eq!(p.category, Category::Overhead);
    assert_eq!(p.start_time, t(9, 0));
    assert_eq!(p.duration_hours, 8.0);
    assert_eq!(p.source, EntrySource::Import);
}

#[test]
fn csv_rows_need_a_duration_or_times() {
    let csv = "Employee,Date,Category,Project,Start Time,End Time,Duration,Description\n\
               Al,2025-09-01,work,P,,,,\n\
               Al,2025-09-02,work,P,,,abc,\n\
               Al,2025-09-03,work,P,09:00,11:30,abc,\n\
               Al,2025-09-04,work,P,,,0,\n";

    let (parsed, skipped) = read_entries_csv(csv.as_bytes(), "Fallback").expect("read");
    let lines: Vec<u64> = skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![2, 3]);
    assert!(skipped[0].reason.contains("no duration"));

    // Bad duration falls back to the times; an explicit zero is kept.
    let hours: Vec<f64> = parsed.iter().map(|e| e.duration_hours).collect();
    assert_eq!(hours, vec![2.5, 0.0]);
}

#[test]
fn rendering_is_pure() {
    let mut book = EntryBook::default();
    book.add(work("Jane Doe", "2025-09-01", 9, 17, "Alpha"), now());
    let entries: Vec<_> = book.entries().iter().collect();

    let first = render_entries(&entries, true, '-');
    assert_eq!(first, render_entries(&entries, true, '-'));
    assert!(first.contains("1 entries, 8.00 hours"));
    assert_eq!(render_entries(&[], false, '-'), "No entries found.\n");
}

#[test]
fn admin_request_from_url() {
    let admin = |u: &str| AccessRequest::from_url(Some(u)).admin;

    assert!(admin("https://tracker.example.com/?setup"));
    assert!(admin("https://tracker.example.com/?a=1&config=x7k9m"));
    assert!(admin("https://tracker.example.com/#admin-setup"));
    assert!(!admin("https://tracker.example.com/?config=wrong"));
    assert!(!admin("https://tracker.example.com/#setup"));
    assert!(!admin("https://tracker.example.com/"));
    assert!(!AccessRequest::from_url(None).admin);
}

#[test]
fn feature_gates() {
    assert!(has_access(AccessLevel::Employee, Feature::Timer));
    assert!(has_access(AccessLevel::Employee, Feature::EditOwnEntries));
    assert!(!has_access(AccessLevel::Employee, Feature::ManagePayPeriods));
    assert!(!has_access(AccessLevel::Employee, Feature::ExportTeamData));
    assert!(has_access(AccessLevel::CompanyAdmin, Feature::DataCleanup));
}

#[test]
fn enrollment_and_verification() {
    let cred = AccessLogic::enroll("correct horse battery", now()).expect("enroll");
    assert_ne!(cred.hash, "correct horse battery");
    assert!(AccessLogic::verify(&cred, "correct horse battery"));
    assert!(!AccessLogic::verify(&cred, "correct horse batterY"));
    assert!(!AccessLogic::verify(&cred, ""));

    // Same passphrase, fresh salt.
    let other = AccessLogic::enroll("correct horse battery", now()).expect("enroll");
    assert_ne!(cred.salt, other.salt);

    assert!(matches!(
        AccessLogic::enroll("short", now()),
        Err(AppError::Auth(_))
    ));

    let request = AccessRequest { admin: true };
    assert_eq!(
        AccessLogic::resolve(request, Some(&cred), Some("correct horse battery")).unwrap(),
        AccessLevel::CompanyAdmin
    );
    assert!(AccessLogic::resolve(request, Some(&cred), Some("nope")).is_err());
    assert!(AccessLogic::resolve(request, Some(&cred), None).is_err());
    assert_eq!(
        AccessLogic::resolve(request, None, Some("anything")).unwrap(),
        AccessLevel::Employee
    );
    assert_eq!(
        AccessLogic::resolve(AccessRequest::default(), Some(&cred), None).unwrap(),
        AccessLevel::Employee
    );
}

#[test]
fn logo_urls() {
    assert!(SettingsLogic::is_valid_logo_url(""));
    assert!(SettingsLogic::is_valid_logo_url("https://i.imgur.com/abc"));
    assert!(SettingsLogic::is_valid_logo_url("https://cdn.example.com/logo.PNG"));
    assert!(!SettingsLogic::is_valid_logo_url("http://i.imgur.com/abc.png"));
    assert!(!SettingsLogic::is_valid_logo_url("https://example.com/about"));
}

#[test]
fn ranges() {
    assert_eq!(parse_range("2025").unwrap(), (d("2025-01-01"), d("2025-12-31")));
    assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
    assert_eq!(
        parse_range("2025-09-01:2025-09-15").unwrap(),
        (d("2025-09-01"), d("2025-09-15"))
    );
    assert!(parse_range("2025:2025-02").is_err());
    assert!(parse_range("2025-03:2025-01").is_err());
    assert!(parse_range("2025-13").is_err());
    // Multibyte input is rejected, never sliced mid-character.
    assert!(matches!(parse_range("202é-1"), Err(AppError::InvalidDate(_))));
    assert!(matches!(parse_range("2025-é"), Err(AppError::InvalidDate(_))));
}
