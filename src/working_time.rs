use crate::day_length::DayLength;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the person a configuration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Region whose public holiday calendar applies, e.g. `GERMANY_BADEN_WUERTTEMBERG`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jurisdiction(String);

impl Jurisdiction {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Jurisdiction {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Configured day length for each weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WeeklyWorkingTime {
    #[serde(default)]
    pub monday: DayLength,
    #[serde(default)]
    pub tuesday: DayLength,
    #[serde(default)]
    pub wednesday: DayLength,
    #[serde(default)]
    pub thursday: DayLength,
    #[serde(default)]
    pub friday: DayLength,
    #[serde(default)]
    pub saturday: DayLength,
    #[serde(default)]
    pub sunday: DayLength,
}

impl WeeklyWorkingTime {
    pub const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Monday to Friday full days, weekend off.
    pub fn standard() -> Self {
        Self::uniform(
            [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            DayLength::Full,
        )
    }

    /// The given weekdays get `length`, every other weekday is `Zero`.
    pub fn uniform<I>(working_days: I, length: DayLength) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mut pattern = Self::default();
        for day in working_days {
            pattern.set_day_length(day, length);
        }
        pattern
    }

    pub fn day_length(&self, weekday: Weekday) -> DayLength {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    pub fn set_day_length(&mut self, weekday: Weekday, length: DayLength) {
        let slot = match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = length;
    }

    pub fn with_day_length(mut self, weekday: Weekday, length: DayLength) -> Self {
        self.set_day_length(weekday, length);
        self
    }

    /// Weekdays with a non-zero configured length, Monday first.
    pub fn working_days(&self) -> Vec<Weekday> {
        Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !self.day_length(*day).is_zero())
            .collect()
    }
}

/// A stored working-time record as handed out by a [`crate::WorkingTimeStore`].
///
/// The record is authoritative from `valid_from` (inclusive) until the next record
/// of the same person starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTimeConfiguration {
    pub person: PersonId,
    pub valid_from: NaiveDate,
    pub weekly: WeeklyWorkingTime,
    /// Overrides the system default jurisdiction when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_override: Option<Jurisdiction>,
}

impl WorkingTimeConfiguration {
    pub fn new(person: PersonId, valid_from: NaiveDate, weekly: WeeklyWorkingTime) -> Self {
        Self {
            person,
            valid_from,
            weekly,
            jurisdiction_override: None,
        }
    }

    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<Jurisdiction>) -> Self {
        self.jurisdiction_override = Some(jurisdiction.into());
        self
    }

    /// Resolves the jurisdiction, falling back to `default` when no override is set.
    /// `default` is only invoked for records without an override.
    pub fn resolve<F, E>(&self, default: F) -> Result<WorkingTime, E>
    where
        F: FnOnce() -> Result<Jurisdiction, E>,
    {
        let (jurisdiction, is_default) = match &self.jurisdiction_override {
            Some(jurisdiction) => (jurisdiction.clone(), false),
            None => (default()?, true),
        };
        Ok(WorkingTime {
            person: self.person,
            valid_from: self.valid_from,
            weekly: self.weekly,
            jurisdiction,
            is_default_jurisdiction: is_default,
        })
    }
}

/// A configuration with its jurisdiction resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTime {
    person: PersonId,
    valid_from: NaiveDate,
    weekly: WeeklyWorkingTime,
    jurisdiction: Jurisdiction,
    is_default_jurisdiction: bool,
}

impl WorkingTime {
    pub fn person(&self) -> PersonId {
        self.person
    }

    pub fn valid_from(&self) -> NaiveDate {
        self.valid_from
    }

    pub fn weekly(&self) -> &WeeklyWorkingTime {
        &self.weekly
    }

    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    /// Whether the jurisdiction came from the system default rather than an override.
    pub fn is_default_jurisdiction(&self) -> bool {
        self.is_default_jurisdiction
    }

    pub fn day_length_for_weekday(&self, weekday: Weekday) -> DayLength {
        self.weekly.day_length(weekday)
    }
}
