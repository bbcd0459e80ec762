//! Plain-text renderers. Every function is pure: same data, same string.

use crate::core::entries::DaySummary;
use crate::core::stats::{AdminStats, EmployeeStats};
use crate::core::validation::ValidationReport;
use crate::models::app_config::AppConfig;
use crate::models::entry::TimeEntry;
use crate::models::holiday::Holiday;
use crate::models::pay_period::{PayPeriod, PayPeriodTable};
use crate::models::timer::TimerState;
use crate::utils::formatting::join_or_dash;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_elapsed, format_hours, format_optional_hhmm};
use chrono::{Duration, Local, NaiveDate};
use std::fmt::Write;

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

pub fn render_entries(entries: &[&TimeEntry], show_employee: bool, sep: char) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut columns = vec![Column::new("ID", 5), Column::new("Date", 10)];
    if show_employee {
        columns.push(Column::new("Employee", 18));
    }
    columns.extend([
        Column::new("Category", 11),
        Column::new("Project", 18),
        Column::new("In", 5),
        Column::new("Out", 5),
        Column::new("Hours", 6),
        Column::new("Description", 30),
    ]);

    let mut table = Table::new(columns).with_separator(sep);
    for e in entries {
        let mut row = vec![e.id.to_string(), e.date.to_string()];
        if show_employee {
            row.push(e.employee_name.clone());
        }
        row.extend([
            e.category.label().to_string(),
            e.project.clone(),
            format_optional_hhmm(e.start_time),
            format_optional_hhmm(e.end_time),
            format!("{:.2}", e.duration_hours),
            e.description.clone(),
        ]);
        table.add_row(row);
    }

    let total: f64 = entries.iter().map(|e| e.duration_hours).sum();
    let mut out = table.render();
    let _ = writeln!(out, "\n{} entries, {:.2} hours", entries.len(), total);
    out
}

pub fn render_daily_summary(days: &[DaySummary], sep: char) -> String {
    if days.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Entries", 7),
        Column::new("Hours", 6),
        Column::new("Projects", 40),
    ])
    .with_separator(sep);

    for d in days {
        table.add_row(vec![
            d.date.to_string(),
            d.entries.to_string(),
            format!("{:.2}", d.total_hours),
            join_or_dash(&d.projects),
        ]);
    }

    table.render()
}

pub fn render_pay_period(p: &PayPeriod, today: NaiveDate, holidays: &[&Holiday]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pay period     : {} ({})", p.id, p.description);
    let _ = writeln!(out, "Dates          : {} → {}", p.period_start, p.period_end);
    let _ = writeln!(out, "Timesheet due  : {}", p.timesheet_due);
    let _ = writeln!(out, "Pay day        : {}", p.pay_day);
    let _ = writeln!(out, "Work days      : {}", p.work_days());
    let _ = writeln!(out, "Days remaining : {}", p.days_remaining(today));
    let labels: Vec<String> = holidays.iter().map(|h| h.label()).collect();
    let _ = writeln!(
        out,
        "Holidays       : {}",
        if labels.is_empty() {
            "No holidays in this period".to_string()
        } else {
            labels.join(", ")
        }
    );
    out
}

/// The table, with `*` marking the period containing `today`.
pub fn render_pay_periods(table: &PayPeriodTable, name: &str, today: NaiveDate, sep: char) -> String {
    let mut t = Table::new(vec![
        Column::new("", 1),
        Column::new("ID", 10),
        Column::new("Start", 10),
        Column::new("End", 10),
        Column::new("Due", 10),
        Column::new("Pay Day", 10),
        Column::new("Description", 40),
    ])
    .with_separator(sep);

    for p in table.periods() {
        t.add_row(vec![
            if p.contains(today) { "*" } else { "" }.to_string(),
            p.id.clone(),
            p.period_start.to_string(),
            p.period_end.to_string(),
            p.timesheet_due.to_string(),
            p.pay_day.to_string(),
            p.description.clone(),
        ]);
    }

    format!("Configuration: {} ({} periods)\n\n{}", name, table.len(), t.render())
}

/// Holidays with a `[x]` mark for the selected ids.
pub fn render_holidays(holidays: &[&Holiday], selected: &[String], sep: char) -> String {
    if holidays.is_empty() {
        return "No holidays in this period\n".to_string();
    }

    let mut t = Table::new(vec![
        Column::new("", 3),
        Column::new("ID", 20),
        Column::new("Holiday", 30),
        Column::new("Type", 8),
        Column::new("Description", 40),
    ])
    .with_separator(sep);

    for h in holidays {
        let mark = if selected.contains(&h.id) { "[x]" } else { "[ ]" };
        t.add_row(vec![
            mark.to_string(),
            h.id.clone(),
            h.label(),
            h.holiday_type.clone(),
            h.description.clone(),
        ]);
    }

    t.render()
}

pub fn render_employee_stats(s: &EmployeeStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Employee      : {}", s.employee);
    if let Some(p) = &s.period {
        let _ = writeln!(out, "Pay period    : {} ({} → {})", p.id, p.period_start, p.period_end);
        let _ = writeln!(out, "Period days   : {}", s.period_days);
        let _ = writeln!(out, "Days elapsed  : {}", s.days_elapsed);
        if let Some(r) = s.days_remaining {
            let _ = writeln!(out, "Days remaining: {}", r);
        }
    }
    let _ = writeln!(out, "Entries       : {}", s.entries);
    let _ = writeln!(out, "Total hours   : {}", format_hours(s.total_hours));
    let _ = writeln!(out, "Work days     : {}", s.work_days);

    let today = match s.running_hours {
        Some(r) => format!(
            "{} (+{}) / {}h",
            format_hours(s.today_hours),
            format_hours(r),
            format_hours(s.daily_target)
        ),
        None => format!(
            "{} / {}h",
            format_hours(s.today_hours),
            format_hours(s.daily_target)
        ),
    };
    let _ = writeln!(out, "Today         : {}", today);
    let _ = writeln!(out, "Progress      : {}", progress_bar(s.progress_pct, 20));

    if !s.by_category.is_empty() {
        let _ = writeln!(out, "By category   :");
        for (cat, hours) in &s.by_category {
            let _ = writeln!(out, "  {:<12} {:>7}", cat.label(), format_hours(*hours));
        }
    }

    out
}

fn progress_bar(pct: f64, width: usize) -> String {
    let pct = pct.clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        pct
    )
}

pub fn render_admin_stats(s: &AdminStats, cfg: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Company       : {}", cfg.company_name);
    let _ = writeln!(out, "Total entries : {}", s.total_entries);
    let _ = writeln!(out, "Valid hours   : {}", format_hours(s.valid_hours));
    let _ = writeln!(out, "Employees     : {}", s.employees);
    let _ = writeln!(out, "Projects      : {}", s.projects);
    let _ = writeln!(
        out,
        "Categories    : {}",
        join_or_dash(s.categories.iter().map(|c| c.label()))
    );
    let _ = writeln!(out, "Invalid       : {}", s.invalid);
    let _ = writeln!(out, "Duplicates    : {}", s.duplicates);
    let _ = writeln!(out, "Data quality  : {}%", s.quality_pct);
    out
}

pub fn render_validation(r: &ValidationReport) -> String {
    let ids = |v: &[u64]| join_or_dash(v.iter().map(|id| format!("#{id}")));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Validation complete: {} valid, {} invalid, {} duplicates",
        r.valid, r.invalid, r.duplicates
    );
    let _ = writeln!(out, "Invalid entries   : {}", ids(&r.invalid_ids));
    let _ = writeln!(out, "Duplicate entries : {}", ids(&r.duplicate_ids));
    let _ = writeln!(out, "Data quality      : {}%", r.quality_pct());
    out
}

pub fn render_timer(t: &TimerState, elapsed: Duration) -> String {
    format!(
        "⏱  {}  {} | {} | {} (since {})\n",
        format_elapsed(elapsed),
        t.employee_name,
        t.category.label(),
        t.project,
        t.started_at.with_timezone(&Local).format("%H:%M")
    )
}

pub fn render_settings(cfg: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Company name          : {}", cfg.company_name);
    let _ = writeln!(out, "Allow edit            : {}", yes_no(cfg.allow_edit));
    let _ = writeln!(out, "Allow delete          : {}", yes_no(cfg.allow_delete));
    let _ = writeln!(out, "Employees may edit    : {}", yes_no(cfg.allow_employee_edit));
    let _ = writeln!(out, "Employees may delete  : {}", yes_no(cfg.allow_employee_delete));
    let _ = writeln!(
        out,
        "License               : {}",
        if cfg.is_licensed {
            format!("licensed to {}", cfg.licensed_company)
        } else {
            "unlicensed".to_string()
        }
    );
    let _ = writeln!(
        out,
        "Logo URL              : {}",
        if cfg.logo_url.is_empty() { "-" } else { cfg.logo_url.as_str() }
    );
    out
}
