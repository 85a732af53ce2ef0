use crate::date_range::DateRange;
use crate::day_length::DayLength;
use crate::day_resolver::{self, WorkingDayInformation};
use crate::public_holiday::{HolidayError, PublicHolidayLookup};
use crate::working_time::WorkingTime;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Per-date working information of one person.
///
/// Only dates for which a working time was active are present. An absent date means
/// "unknown", not "no workday".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTimeCalendar {
    working_days: BTreeMap<NaiveDate, WorkingDayInformation>,
}

impl WorkingTimeCalendar {
    pub fn new(working_days: BTreeMap<NaiveDate, WorkingDayInformation>) -> Self {
        Self { working_days }
    }

    /// Walks the working times backwards from `range.end`.
    ///
    /// `working_times` must be ordered by descending `valid_from`. Each record covers
    /// `[max(valid_from, range.start), cursor]`, the cursor then moves to the day
    /// before `valid_from`. The walk stops once the range start is reached.
    pub fn build<H>(
        working_times: &[WorkingTime],
        range: &DateRange,
        holidays: &H,
    ) -> Result<Self, HolidayError>
    where
        H: PublicHolidayLookup + ?Sized,
    {
        let start = range.start_date();
        let end = range.end_date();

        let mut working_days = BTreeMap::new();
        let mut window_end = end;

        for working_time in working_times.iter().filter(|wt| wt.valid_from() <= end) {
            let window_start = working_time.valid_from().max(start);
            let window = DateRange::new(window_start, window_end);
            trace!(
                person = %working_time.person(),
                valid_from = %working_time.valid_from(),
                from = %window_start,
                to = %window_end,
                "applying working time"
            );

            for date in &window {
                let configured = working_time.day_length_for_weekday(date.weekday());
                let info =
                    day_resolver::resolve(configured, working_time.jurisdiction(), date, holidays)?;
                working_days.insert(date, info);
            }

            if window_start == start {
                break;
            }

            match working_time.valid_from().checked_sub_signed(Duration::days(1)) {
                Some(previous_day) => window_end = previous_day,
                None => break,
            }
        }

        Ok(Self::new(working_days))
    }

    pub fn get(&self, date: NaiveDate) -> Option<&WorkingDayInformation> {
        self.working_days.get(&date)
    }

    /// Combined day length on `date`, `None` outside covered territory.
    pub fn day_length(&self, date: NaiveDate) -> Option<DayLength> {
        self.get(date).map(WorkingDayInformation::day_length)
    }

    /// Covered dates, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.working_days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &WorkingDayInformation)> + '_ {
        self.working_days.iter().map(|(date, info)| (*date, info))
    }

    pub fn len(&self) -> usize {
        self.working_days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working_days.is_empty()
    }

    fn covered(
        &self,
        range: &DateRange,
    ) -> impl Iterator<Item = (&NaiveDate, &WorkingDayInformation)> + '_ {
        let bounds = if range.is_empty() {
            None
        } else {
            Some(range.start_date()..=range.end_date())
        };
        bounds
            .into_iter()
            .flat_map(move |bounds| self.working_days.range(bounds))
    }

    /// Combined day lengths of the covered dates inside `range`.
    pub fn day_lengths(&self, range: &DateRange) -> BTreeMap<NaiveDate, DayLength> {
        self.covered(range)
            .map(|(date, info)| (*date, info.day_length()))
            .collect()
    }

    /// Sum of work units owed inside `range`.
    pub fn working_time(&self, range: &DateRange) -> f64 {
        self.covered(range)
            .map(|(_, info)| info.day_length().duration())
            .sum()
    }

    /// Work units an absence of `absence` length costs on every date of `range`.
    ///
    /// A morning absence only counts dates whose morning is a workday, a noon absence
    /// only those whose noon is a workday.
    pub fn working_time_for_absence(&self, range: &DateRange, absence: DayLength) -> f64 {
        self.covered(range)
            .map(|(_, info)| match absence {
                DayLength::Full => info.day_length().duration(),
                DayLength::Morning if info.morning().is_workday() => DayLength::Morning.duration(),
                DayLength::Noon if info.noon().is_workday() => DayLength::Noon.duration(),
                DayLength::Morning | DayLength::Noon | DayLength::Zero => 0.0,
            })
            .sum()
    }
}

/// The part of `records` that [`WorkingTimeCalendar::build`] visits for `range`.
///
/// `records` must be ordered by descending `valid_from`. Records starting after the range
/// end are skipped, and the walk stops at the first record starting on or before the
/// range start.
pub(crate) fn records_in_reach<'a, T>(
    records: &'a [T],
    range: &DateRange,
    valid_from: impl Fn(&T) -> NaiveDate,
) -> &'a [T] {
    let first = records
        .iter()
        .position(|record| valid_from(record) <= range.end_date())
        .unwrap_or(records.len());
    let records = &records[first..];
    let last = records
        .iter()
        .position(|record| valid_from(record) <= range.start_date())
        .map_or(records.len(), |index| index + 1);
    &records[..last]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_resolver::WorkingTimeCalendarEntryType;
    use crate::public_holiday::{HolidayCalendar, PublicHoliday};
    use crate::working_time::{Jurisdiction, PersonId, WeeklyWorkingTime, WorkingTimeConfiguration};
    use std::convert::Infallible;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn working_time(valid_from: NaiveDate, weekly: WeeklyWorkingTime) -> WorkingTime {
        WorkingTimeConfiguration::new(PersonId(1), valid_from, weekly)
            .resolve(|| Ok::<_, Infallible>(Jurisdiction::new("DE")))
            .unwrap()
    }

    #[test]
    fn no_working_times_yield_empty_calendar() {
        let range = DateRange::for_year(2024).unwrap();
        let calendar = WorkingTimeCalendar::build(&[], &range, &HolidayCalendar::new()).unwrap();
        assert!(calendar.is_empty());
    }

    #[test]
    fn working_time_after_range_is_ignored() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        let times = [working_time(d(2024, 2, 1), WeeklyWorkingTime::standard())];
        let calendar = WorkingTimeCalendar::build(&times, &range, &HolidayCalendar::new()).unwrap();
        assert!(calendar.is_empty());
    }

    #[test]
    fn gap_before_earliest_working_time_stays_absent() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        let times = [working_time(d(2024, 1, 15), WeeklyWorkingTime::standard())];
        let calendar = WorkingTimeCalendar::build(&times, &range, &HolidayCalendar::new()).unwrap();
        assert_eq!(calendar.len(), 17);
        assert_eq!(calendar.dates().next(), Some(d(2024, 1, 15)));
        assert!(calendar.get(d(2024, 1, 14)).is_none());
    }

    #[test]
    fn older_records_are_not_consulted_once_range_start_is_covered() {
        let range = DateRange::new(d(2024, 3, 1), d(2024, 3, 31));
        let morning_only =
            WeeklyWorkingTime::uniform(WeeklyWorkingTime::ALL_WEEKDAYS, DayLength::Morning);
        let times = [
            working_time(d(2024, 1, 1), WeeklyWorkingTime::standard()),
            working_time(d(2023, 1, 1), morning_only),
        ];
        let calendar = WorkingTimeCalendar::build(&times, &range, &HolidayCalendar::new()).unwrap();
        assert_eq!(calendar.len(), 31);
        // 2024-03-02 is a Saturday
        assert_eq!(calendar.day_length(d(2024, 3, 2)), Some(DayLength::Zero));
    }

    #[test]
    fn sums_and_absence_costs() {
        let de = Jurisdiction::new("DE");
        let mut holidays = HolidayCalendar::new();
        holidays
            .add_holiday(PublicHoliday::new(d(2024, 12, 24), de.clone(), DayLength::Noon).unwrap());
        holidays
            .add_holiday(PublicHoliday::new(d(2024, 12, 25), de.clone(), DayLength::Full).unwrap());
        holidays.add_holiday(PublicHoliday::new(d(2024, 12, 26), de, DayLength::Full).unwrap());

        // Mon 2024-12-23 .. Fri 2024-12-27
        let range = DateRange::new(d(2024, 12, 23), d(2024, 12, 27));
        let times = [working_time(d(2024, 1, 1), WeeklyWorkingTime::standard())];
        let calendar = WorkingTimeCalendar::build(&times, &range, &holidays).unwrap();

        assert_eq!(calendar.working_time(&range), 2.5);
        assert_eq!(calendar.working_time_for_absence(&range, DayLength::Full), 2.5);
        assert_eq!(calendar.working_time_for_absence(&range, DayLength::Morning), 1.5);
        assert_eq!(calendar.working_time_for_absence(&range, DayLength::Noon), 1.0);
        assert_eq!(calendar.working_time_for_absence(&range, DayLength::Zero), 0.0);

        let christmas_eve = calendar.get(d(2024, 12, 24)).unwrap();
        assert_eq!(christmas_eve.noon(), WorkingTimeCalendarEntryType::PublicHoliday);

        let lengths = calendar.day_lengths(&DateRange::new(d(2024, 12, 24), d(2024, 12, 25)));
        assert_eq!(
            lengths.into_iter().collect::<Vec<_>>(),
            vec![(d(2024, 12, 24), DayLength::Morning), (d(2024, 12, 25), DayLength::Zero)]
        );
    }

    #[test]
    fn records_in_reach_match_the_walk() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 12, 31));
        let starts = [d(2025, 2, 1), d(2024, 6, 1), d(2024, 1, 1), d(2023, 1, 1)];
        assert_eq!(records_in_reach(&starts, &range, |date| *date), &starts[1..3]);

        let inside = [d(2024, 9, 1), d(2024, 3, 1)];
        assert_eq!(records_in_reach(&inside, &range, |date| *date), &inside[..]);

        let after = [d(2025, 1, 1)];
        assert!(records_in_reach(&after, &range, |date| *date).is_empty());
    }

    #[test]
    fn sums_ignore_inverted_ranges() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        let times = [working_time(d(2024, 1, 1), WeeklyWorkingTime::standard())];
        let calendar = WorkingTimeCalendar::build(&times, &range, &HolidayCalendar::new()).unwrap();
        let inverted = DateRange::new(d(2024, 1, 10), d(2024, 1, 5));
        assert_eq!(calendar.working_time(&inverted), 0.0);
        assert!(calendar.day_lengths(&inverted).is_empty());
    }
}
