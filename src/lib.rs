pub mod calendar;
pub(crate) mod configuration_validation;
pub mod date_range;
pub mod day_length;
pub mod day_resolver;
pub mod error;
pub mod jurisdiction;
pub mod persistence;
pub mod public_holiday;
pub mod service;
pub mod settings;
pub mod working_time;

pub use calendar::WorkingTimeCalendar;
pub use date_range::DateRange;
pub use day_length::DayLength;
pub use day_resolver::{WorkingDayInformation, WorkingTimeCalendarEntryType};
pub use error::{CalendarError, Result};
pub use jurisdiction::{CachedJurisdiction, DefaultJurisdictionProvider};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteWorkingTimeStore;
pub use persistence::{
    InMemoryWorkingTimeStore, PersistenceError, WorkingTimeStore, load_configurations_from_csv,
    load_configurations_from_json, load_holidays_from_json, save_configurations_to_csv,
    save_configurations_to_json, save_holidays_to_json, validate_configurations,
};
pub use public_holiday::{
    HolidayCalendar, HolidayCalendarConfig, HolidayError, PublicHoliday, PublicHolidayLookup,
};
pub use service::WorkingTimeCalendarService;
pub use settings::{Settings, SettingsError, SettingsJurisdictionProvider};
pub use working_time::{
    Jurisdiction, PersonId, WeeklyWorkingTime, WorkingTime, WorkingTimeConfiguration,
};
