use chrono::{Datelike, NaiveDate, Weekday};
use working_time::{
    DateRange, DayLength, HolidayCalendar, InMemoryWorkingTimeStore, Jurisdiction, PersonId,
    PublicHoliday, WeeklyWorkingTime, WorkingTimeCalendarEntryType as EntryType,
    WorkingTimeCalendarService, WorkingTimeConfiguration,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn de() -> Jurisdiction {
    Jurisdiction::new("GERMANY_BADEN_WUERTTEMBERG")
}

fn holidays() -> HolidayCalendar {
    let mut calendar = HolidayCalendar::new();
    calendar.add_holidays([
        PublicHoliday::new(d(2024, 5, 1), de(), DayLength::Full).unwrap(),
        PublicHoliday::new(d(2024, 12, 24), de(), DayLength::Noon).unwrap(),
        PublicHoliday::new(d(2024, 12, 25), de(), DayLength::Full).unwrap(),
        PublicHoliday::new(d(2024, 12, 26), de(), DayLength::Full).unwrap(),
        PublicHoliday::new(d(2024, 12, 29), de(), DayLength::Full).unwrap(),
        PublicHoliday::new(d(2024, 6, 3), de(), DayLength::Morning).unwrap(),
    ]);
    calendar
}

fn service(
    configurations: Vec<WorkingTimeConfiguration>,
) -> WorkingTimeCalendarService<InMemoryWorkingTimeStore, HolidayCalendar, Jurisdiction> {
    let store = InMemoryWorkingTimeStore::new(configurations).unwrap();
    WorkingTimeCalendarService::new(store, holidays(), de())
}

#[test]
fn full_day_on_full_public_holiday_is_not_worked() {
    let person = PersonId(1);
    let svc = service(vec![WorkingTimeConfiguration::new(
        person,
        d(2024, 1, 1),
        WeeklyWorkingTime::standard(),
    )]);
    let calendars = svc
        .get_working_times_by_persons(&[person], &DateRange::new(d(2024, 12, 23), d(2024, 12, 27)))
        .unwrap();
    let info = calendars[&person].get(d(2024, 12, 25)).unwrap();
    assert_eq!(info.day_length(), DayLength::Zero);
    assert_eq!(info.morning(), EntryType::PublicHoliday);
    assert_eq!(info.noon(), EntryType::PublicHoliday);
}

#[test]
fn full_day_on_morning_holiday_leaves_noon() {
    let person = PersonId(1);
    let svc = service(vec![WorkingTimeConfiguration::new(
        person,
        d(2024, 1, 1),
        WeeklyWorkingTime::standard(),
    )]);
    let calendars = svc
        .get_working_times_by_persons(&[person], &DateRange::new(d(2024, 6, 3), d(2024, 6, 3)))
        .unwrap();
    let info = calendars[&person].get(d(2024, 6, 3)).unwrap();
    assert_eq!(info.day_length(), DayLength::Noon);
    assert_eq!(info.morning(), EntryType::PublicHoliday);
    assert_eq!(info.noon(), EntryType::Workday);
}

#[test]
fn morning_only_week_without_holiday() {
    let person = PersonId(1);
    let morning_only = WeeklyWorkingTime::uniform(
        [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        DayLength::Morning,
    );
    let svc = service(vec![WorkingTimeConfiguration::new(person, d(2024, 1, 1), morning_only)]);
    // 2024-03-05 is a Tuesday
    let calendars = svc
        .get_working_times_by_persons(&[person], &DateRange::new(d(2024, 3, 4), d(2024, 3, 10)))
        .unwrap();
    let info = calendars[&person].get(d(2024, 3, 5)).unwrap();
    assert_eq!(info.day_length(), DayLength::Morning);
    assert_eq!(info.morning(), EntryType::Workday);
    assert_eq!(info.noon(), EntryType::NoWorkday);
    let week = DateRange::new(d(2024, 3, 4), d(2024, 3, 10));
    assert_eq!(calendars[&person].working_time(&week), 2.5);
}

#[test]
fn sunday_holiday_on_free_weekday_stays_no_workday() {
    let person = PersonId(1);
    let svc = service(vec![WorkingTimeConfiguration::new(
        person,
        d(2024, 1, 1),
        WeeklyWorkingTime::standard(),
    )]);
    let sunday = d(2024, 12, 29);
    assert_eq!(sunday.weekday(), Weekday::Sun);
    let calendars = svc
        .get_working_times_by_persons(&[person], &DateRange::new(sunday, sunday))
        .unwrap();
    let info = calendars[&person].get(sunday).unwrap();
    assert_eq!(info.day_length(), DayLength::Zero);
    assert_eq!(info.morning(), EntryType::NoWorkday);
    assert_eq!(info.noon(), EntryType::NoWorkday);
}

#[test]
fn later_working_time_supersedes_earlier_one() {
    let person = PersonId(7);
    let p1 = WeeklyWorkingTime::standard();
    let p2 = WeeklyWorkingTime::uniform(
        [Weekday::Mon, Weekday::Tue, Weekday::Wed],
        DayLength::Full,
    )
    .with_day_length(Weekday::Thu, DayLength::Noon);
    let svc = service(vec![
        WorkingTimeConfiguration::new(person, d(2024, 1, 1), p1),
        WorkingTimeConfiguration::new(person, d(2024, 7, 1), p2),
    ]);
    let range = DateRange::for_year(2024).unwrap();
    let calendars = svc.get_working_times_by_persons(&[person], &range).unwrap();
    let calendar = &calendars[&person];

    assert_eq!(calendar.len(), 366);
    let dates: Vec<NaiveDate> = calendar.dates().collect();
    assert_eq!(dates, range.iter().collect::<Vec<_>>());

    // Fridays: P1 works them, P2 does not. 2024-06-28 and 2024-07-05 are Fridays.
    assert_eq!(calendar.day_length(d(2024, 6, 28)), Some(DayLength::Full));
    assert_eq!(calendar.day_length(d(2024, 7, 5)), Some(DayLength::Zero));
    // Thursdays: 2024-06-27 full under P1, 2024-07-04 noon only under P2
    assert_eq!(calendar.day_length(d(2024, 6, 27)), Some(DayLength::Full));
    assert_eq!(calendar.day_length(d(2024, 7, 4)), Some(DayLength::Noon));
    // switch day itself belongs to P2 (Monday)
    assert_eq!(calendar.day_length(d(2024, 7, 1)), Some(DayLength::Full));
    assert_eq!(calendar.get(d(2024, 6, 30)).unwrap().morning(), EntryType::NoWorkday);
}

#[test]
fn override_jurisdiction_uses_its_own_holidays() {
    let person = PersonId(3);
    let mut holidays = holidays();
    let bavaria = Jurisdiction::new("GERMANY_BAYERN");
    holidays.add_holiday(
        PublicHoliday::new(d(2024, 8, 15), bavaria.clone(), DayLength::Full).unwrap(),
    );
    let store = InMemoryWorkingTimeStore::new(vec![
        WorkingTimeConfiguration::new(person, d(2024, 1, 1), WeeklyWorkingTime::standard())
            .with_jurisdiction(bavaria),
    ])
    .unwrap();
    let svc = WorkingTimeCalendarService::new(store, holidays, de());

    let calendars = svc
        .get_working_times_by_persons(&[person], &DateRange::new(d(2024, 8, 15), d(2024, 12, 25)))
        .unwrap();
    let calendar = &calendars[&person];
    // Assumption Day counts in Bavaria
    assert_eq!(calendar.day_length(d(2024, 8, 15)), Some(DayLength::Zero));
    // Christmas is only registered for the default jurisdiction here
    assert_eq!(calendar.day_length(d(2024, 12, 25)), Some(DayLength::Full));
}

#[test]
fn range_starting_before_first_working_time_is_partially_covered() {
    let person = PersonId(2);
    let svc = service(vec![WorkingTimeConfiguration::new(
        person,
        d(2024, 3, 1),
        WeeklyWorkingTime::standard(),
    )]);
    let calendars = svc
        .get_working_times_by_persons_for_year(&[person], 2024)
        .unwrap();
    let calendar = &calendars[&person];
    assert!(calendar.get(d(2024, 2, 29)).is_none());
    assert!(calendar.get(d(2024, 3, 1)).is_some());
    assert_eq!(calendar.len(), 306);
}
