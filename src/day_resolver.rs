//! Half-day classification of a single date.
//!
//! The configured weekday length is combined with the public holiday (if any) of the
//! jurisdiction. A holiday can only take away halves that were configured as working.

use crate::day_length::DayLength;
use crate::public_holiday::{HolidayError, PublicHoliday, PublicHolidayLookup};
use crate::working_time::Jurisdiction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Classification of one half of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkingTimeCalendarEntryType {
    Workday,
    NoWorkday,
    PublicHoliday,
}

impl WorkingTimeCalendarEntryType {
    pub fn is_workday(self) -> bool {
        self == WorkingTimeCalendarEntryType::Workday
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkingTimeCalendarEntryType::Workday => "WORKDAY",
            WorkingTimeCalendarEntryType::NoWorkday => "NO_WORKDAY",
            WorkingTimeCalendarEntryType::PublicHoliday => "PUBLIC_HOLIDAY",
        }
    }
}

/// Outcome for one date: the remaining working length and how each half was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WorkingDayRecord")]
pub struct WorkingDayInformation {
    day_length: DayLength,
    morning: WorkingTimeCalendarEntryType,
    noon: WorkingTimeCalendarEntryType,
}

/// Serialized halves; a stored `day_length` is ignored and derived again.
#[derive(Deserialize)]
struct WorkingDayRecord {
    morning: WorkingTimeCalendarEntryType,
    noon: WorkingTimeCalendarEntryType,
}

impl From<WorkingDayRecord> for WorkingDayInformation {
    fn from(record: WorkingDayRecord) -> Self {
        WorkingDayInformation::new(record.morning, record.noon)
    }
}

impl WorkingDayInformation {
    /// The combined length is always derived from the halves.
    pub fn new(morning: WorkingTimeCalendarEntryType, noon: WorkingTimeCalendarEntryType) -> Self {
        Self {
            day_length: DayLength::from_halves(morning.is_workday(), noon.is_workday()),
            morning,
            noon,
        }
    }

    pub fn day_length(&self) -> DayLength {
        self.day_length
    }

    pub fn morning(&self) -> WorkingTimeCalendarEntryType {
        self.morning
    }

    pub fn noon(&self) -> WorkingTimeCalendarEntryType {
        self.noon
    }
}

use WorkingTimeCalendarEntryType::{NoWorkday, PublicHoliday as Holiday, Workday};

/// Classifies `date` for a person whose pattern configures `configured` on that weekday.
///
/// The holiday lookup is skipped entirely for non-working weekdays. Lookup failures
/// are returned unchanged.
pub fn resolve<H>(
    configured: DayLength,
    jurisdiction: &Jurisdiction,
    date: NaiveDate,
    holidays: &H,
) -> Result<WorkingDayInformation, HolidayError>
where
    H: PublicHolidayLookup + ?Sized,
{
    if configured.is_zero() {
        return Ok(WorkingDayInformation::new(NoWorkday, NoWorkday));
    }

    let holiday = holidays.find(date, jurisdiction)?;
    Ok(classify(configured, holiday.as_ref()))
}

/// Precedence between configured length and holiday length. `configured` is non-zero.
fn classify(configured: DayLength, holiday: Option<&PublicHoliday>) -> WorkingDayInformation {
    let Some(holiday) = holiday else {
        return WorkingDayInformation::new(
            covered(configured.is_morning()),
            covered(configured.is_noon()),
        );
    };

    let (morning, noon) = match configured {
        DayLength::Full => match holiday.day_length() {
            DayLength::Full => (Holiday, Holiday),
            DayLength::Morning => (Holiday, Workday),
            DayLength::Noon => (Workday, Holiday),
            DayLength::Zero => {
                warn!(
                    date = %holiday.date(),
                    jurisdiction = %holiday.jurisdiction(),
                    "public holiday without day length, treating day as fully worked"
                );
                (Workday, Workday)
            }
        },
        DayLength::Morning => {
            let morning = if holiday.is_morning() { Holiday } else { Workday };
            (morning, NoWorkday)
        }
        DayLength::Noon => {
            let noon = if holiday.is_noon() { Holiday } else { Workday };
            (NoWorkday, noon)
        }
        DayLength::Zero => (NoWorkday, NoWorkday),
    };

    WorkingDayInformation::new(morning, noon)
}

fn covered(configured: bool) -> WorkingTimeCalendarEntryType {
    if configured { Workday } else { NoWorkday }
}
