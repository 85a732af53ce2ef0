#![cfg(feature = "cli")]

use assert_cmd::Command;
use chrono::NaiveDate;
use predicates::str::contains as str_contains;
use tempfile::TempDir;
use working_time::{
    DayLength, HolidayCalendar, Jurisdiction, PersonId, PublicHoliday, WeeklyWorkingTime,
    WorkingTimeConfiguration, save_configurations_to_csv, save_configurations_to_json,
    save_holidays_to_json,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_fixtures(dir: &TempDir) {
    let configurations = vec![WorkingTimeConfiguration::new(
        PersonId(1),
        d(2024, 1, 1),
        WeeklyWorkingTime::standard(),
    )];
    save_configurations_to_json(&configurations, dir.path().join("working_times.json")).unwrap();
    save_configurations_to_csv(&configurations, dir.path().join("working_times.csv")).unwrap();

    let mut holidays = HolidayCalendar::new();
    holidays.add_holiday(
        PublicHoliday::new(d(2024, 12, 25), Jurisdiction::new("DE"), DayLength::Full).unwrap(),
    );
    save_holidays_to_json(&holidays, dir.path().join("holidays.json")).unwrap();
}

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("working-time").expect("working-time binary")
}

#[test]
fn cli_prints_calendar_with_holiday() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    cli()
        .arg("--configurations")
        .arg(dir.path().join("working_times.json"))
        .arg("--holidays")
        .arg(dir.path().join("holidays.json"))
        .args(["--jurisdiction", "DE", "--from", "2024-12-23", "--to", "2024-12-27"])
        .assert()
        .success()
        .stdout(str_contains("Person 1"))
        .stdout(str_contains("PUBLIC_HOLIDAY"))
        .stdout(str_contains("Working time: 4"));
}

#[test]
fn cli_reads_csv_and_reports_unconfigured_person() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    cli()
        .arg("--configurations")
        .arg(dir.path().join("working_times.csv"))
        .args(["--jurisdiction", "DE", "--year", "2024", "--person", "2"])
        .assert()
        .success()
        .stdout(str_contains("No working time configured."));
}
