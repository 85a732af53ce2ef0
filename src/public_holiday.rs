use crate::date_range::DateRange;
use crate::day_length::DayLength;
use crate::working_time::Jurisdiction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HolidayError {
    #[error("public holiday on {date} in {jurisdiction} must cover at least half a day")]
    ZeroDayLength {
        date: NaiveDate,
        jurisdiction: Jurisdiction,
    },

    #[error("invalid holiday date {month:02}-{day:02} in {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("public holiday lookup failed: {0}")]
    Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HolidayError {
    /// Wraps a backend failure of a custom [`PublicHolidayLookup`].
    pub fn lookup<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        HolidayError::Lookup(err.into())
    }
}

/// A public holiday in one jurisdiction. Its `day_length` names the half(s) of the
/// date that are off: always `Full`, `Morning` or `Noon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PublicHolidayRecord")]
pub struct PublicHoliday {
    date: NaiveDate,
    jurisdiction: Jurisdiction,
    day_length: DayLength,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct PublicHolidayRecord {
    date: NaiveDate,
    jurisdiction: Jurisdiction,
    day_length: DayLength,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<PublicHolidayRecord> for PublicHoliday {
    type Error = HolidayError;

    fn try_from(record: PublicHolidayRecord) -> Result<Self, Self::Error> {
        let holiday = PublicHoliday::new(record.date, record.jurisdiction, record.day_length)?;
        Ok(match record.description {
            Some(description) => holiday.with_description(description),
            None => holiday,
        })
    }
}

impl PublicHoliday {
    pub fn new(
        date: NaiveDate,
        jurisdiction: Jurisdiction,
        day_length: DayLength,
    ) -> Result<Self, HolidayError> {
        if day_length.is_zero() {
            return Err(HolidayError::ZeroDayLength { date, jurisdiction });
        }
        Ok(Self {
            date,
            jurisdiction,
            day_length,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    pub fn day_length(&self) -> DayLength {
        self.day_length
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_full(&self) -> bool {
        self.day_length.is_full()
    }

    pub fn is_morning(&self) -> bool {
        self.day_length.is_morning()
    }

    pub fn is_noon(&self) -> bool {
        self.day_length.is_noon()
    }
}

/// Source of public holidays, queried once per configured working date.
pub trait PublicHolidayLookup {
    fn find(
        &self,
        date: NaiveDate,
        jurisdiction: &Jurisdiction,
    ) -> Result<Option<PublicHoliday>, HolidayError>;
}

impl<T: PublicHolidayLookup + ?Sized> PublicHolidayLookup for &T {
    fn find(
        &self,
        date: NaiveDate,
        jurisdiction: &Jurisdiction,
    ) -> Result<Option<PublicHoliday>, HolidayError> {
        (**self).find(date, jurisdiction)
    }
}

/// In-memory holiday table keyed by jurisdiction and date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidayCalendar {
    holidays: HashMap<Jurisdiction, BTreeMap<NaiveDate, PublicHoliday>>,
}

/// Serializable snapshot of a [`HolidayCalendar`], sorted by jurisdiction then date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayCalendarConfig {
    holidays: Vec<PublicHoliday>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &HolidayCalendarConfig) -> Self {
        let mut calendar = Self::new();
        calendar.add_holidays(config.holidays.iter().cloned());
        calendar
    }

    pub fn to_config(&self) -> HolidayCalendarConfig {
        HolidayCalendarConfig::from(self)
    }

    /// Add a single holiday, replacing any holiday on the same date and jurisdiction.
    pub fn add_holiday(&mut self, holiday: PublicHoliday) {
        self.holidays
            .entry(holiday.jurisdiction.clone())
            .or_default()
            .insert(holiday.date, holiday);
    }

    pub fn add_holidays<I>(&mut self, holidays: I)
    where
        I: IntoIterator<Item = PublicHoliday>,
    {
        for holiday in holidays {
            self.add_holiday(holiday);
        }
    }

    /// Add the same fixed-date holiday for every year in `start_year..=end_year`.
    /// Example: Dec 24 as a noon-only holiday for 2025-2030.
    pub fn add_recurring_holiday(
        &mut self,
        jurisdiction: &Jurisdiction,
        month: u32,
        day: u32,
        day_length: DayLength,
        start_year: i32,
        end_year: i32,
    ) -> Result<(), HolidayError> {
        for year in start_year..=end_year {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or(HolidayError::InvalidDate { year, month, day })?;
            self.add_holiday(PublicHoliday::new(date, jurisdiction.clone(), day_length)?);
        }
        Ok(())
    }

    pub fn holiday(&self, date: NaiveDate, jurisdiction: &Jurisdiction) -> Option<&PublicHoliday> {
        self.holidays.get(jurisdiction)?.get(&date)
    }

    /// Holidays of one jurisdiction inside `range`, ascending.
    pub fn holidays_in_range(
        &self,
        jurisdiction: &Jurisdiction,
        range: &DateRange,
    ) -> Vec<&PublicHoliday> {
        if range.is_empty() {
            return Vec::new();
        }
        self.holidays
            .get(jurisdiction)
            .map(|by_date| {
                by_date
                    .range(range.start_date()..=range.end_date())
                    .map(|(_, holiday)| holiday)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.holidays.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PublicHolidayLookup for HolidayCalendar {
    fn find(
        &self,
        date: NaiveDate,
        jurisdiction: &Jurisdiction,
    ) -> Result<Option<PublicHoliday>, HolidayError> {
        Ok(self.holiday(date, jurisdiction).cloned())
    }
}

impl HolidayCalendarConfig {
    pub fn new<I>(holidays: I) -> Self
    where
        I: IntoIterator<Item = PublicHoliday>,
    {
        let mut holidays: Vec<PublicHoliday> = holidays.into_iter().collect();
        holidays.sort_by(|a, b| (&a.jurisdiction, a.date).cmp(&(&b.jurisdiction, b.date)));
        holidays.dedup_by(|a, b| a.jurisdiction == b.jurisdiction && a.date == b.date);
        Self { holidays }
    }

    pub fn holidays(&self) -> &[PublicHoliday] {
        &self.holidays
    }
}

impl From<&HolidayCalendar> for HolidayCalendarConfig {
    fn from(calendar: &HolidayCalendar) -> Self {
        HolidayCalendarConfig::new(
            calendar
                .holidays
                .values()
                .flat_map(|by_date| by_date.values().cloned()),
        )
    }
}
