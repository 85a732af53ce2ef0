use crate::calendar::{WorkingTimeCalendar, records_in_reach};
use crate::date_range::DateRange;
use crate::error::{CalendarError, Result};
use crate::jurisdiction::{CachedJurisdiction, DefaultJurisdictionProvider};
use crate::persistence::WorkingTimeStore;
use crate::public_holiday::PublicHolidayLookup;
use crate::settings::Settings;
use crate::working_time::{PersonId, WorkingTime, WorkingTimeConfiguration};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Entry point computing working-time calendars for many persons at once.
pub struct WorkingTimeCalendarService<S, H, D> {
    store: S,
    holidays: H,
    default_jurisdiction: D,
    parallel: bool,
}

impl<S, H, D> WorkingTimeCalendarService<S, H, D>
where
    S: WorkingTimeStore,
    H: PublicHolidayLookup + Sync,
    D: DefaultJurisdictionProvider + Sync,
{
    pub fn new(store: S, holidays: H, default_jurisdiction: D) -> Self {
        Self {
            store,
            holidays,
            default_jurisdiction,
            parallel: false,
        }
    }

    /// Applies the engine section of `settings`.
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.parallel = settings.engine.parallel;
        self
    }

    /// Builds per-person calendars on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Calendars for the whole calendar year.
    pub fn get_working_times_by_persons_for_year(
        &self,
        persons: &[PersonId],
        year: i32,
    ) -> Result<HashMap<PersonId, WorkingTimeCalendar>> {
        let range = DateRange::for_year(year).ok_or(CalendarError::InvalidYear(year))?;
        self.get_working_times_by_persons(persons, &range)
    }

    /// One calendar per requested person; persons without working times get an empty one.
    ///
    /// The store is queried once and the default jurisdiction is fetched at most once,
    /// on first need. Records the walk never reaches do not need it.
    pub fn get_working_times_by_persons(
        &self,
        persons: &[PersonId],
        range: &DateRange,
    ) -> Result<HashMap<PersonId, WorkingTimeCalendar>> {
        let default_jurisdiction = CachedJurisdiction::new(&self.default_jurisdiction);

        let mut unique_persons: Vec<PersonId> = Vec::with_capacity(persons.len());
        let mut seen = HashSet::with_capacity(persons.len());
        for person in persons {
            if seen.insert(*person) {
                unique_persons.push(*person);
            }
        }

        let mut by_person: HashMap<PersonId, Vec<WorkingTimeConfiguration>> = HashMap::new();
        for configuration in self
            .store
            .find_by_persons_ordered_by_valid_from_desc(&unique_persons)?
        {
            by_person
                .entry(configuration.person)
                .or_default()
                .push(configuration);
        }

        debug!(
            persons = unique_persons.len(),
            with_working_times = by_person.len(),
            from = %range.start_date(),
            to = %range.end_date(),
            parallel = self.parallel,
            "computing working time calendars"
        );

        let holidays = &self.holidays;
        let build = |person: &PersonId| -> Result<(PersonId, WorkingTimeCalendar)> {
            let configurations = by_person.get(person).map(Vec::as_slice).unwrap_or_default();
            let working_times = records_in_reach(configurations, range, |c| c.valid_from)
                .iter()
                .map(|configuration| configuration.resolve(|| default_jurisdiction.get()))
                .collect::<std::result::Result<Vec<WorkingTime>, _>>()?;
            let calendar = WorkingTimeCalendar::build(&working_times, range, holidays)?;
            Ok((*person, calendar))
        };

        if self.parallel {
            unique_persons.par_iter().map(build).collect()
        } else {
            unique_persons.iter().map(build).collect()
        }
    }
}
