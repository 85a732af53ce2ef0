use super::{PersistenceError, PersistenceResult};
use crate::day_length::DayLength;
use crate::public_holiday::{HolidayCalendar, HolidayCalendarConfig};
use crate::working_time::{Jurisdiction, PersonId, WeeklyWorkingTime, WorkingTimeConfiguration};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct ConfigurationSnapshot {
    configurations: Vec<WorkingTimeConfiguration>,
}

pub fn save_configurations_to_json<P: AsRef<Path>>(
    configurations: &[WorkingTimeConfiguration],
    path: P,
) -> PersistenceResult<()> {
    super::validate_configurations(configurations)?;
    let snapshot = ConfigurationSnapshot {
        configurations: configurations.to_vec(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_configurations_from_json<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<Vec<WorkingTimeConfiguration>> {
    let file = File::open(path)?;
    let snapshot: ConfigurationSnapshot = serde_json::from_reader(file)?;
    super::validate_configurations(&snapshot.configurations)?;
    Ok(snapshot.configurations)
}

pub fn save_holidays_to_json<P: AsRef<Path>>(
    holidays: &HolidayCalendar,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &holidays.to_config())?;
    Ok(())
}

pub fn load_holidays_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<HolidayCalendar> {
    let file = File::open(path)?;
    let config: HolidayCalendarConfig = serde_json::from_reader(file)?;
    Ok(HolidayCalendar::from_config(&config))
}

#[derive(Default, Serialize, Deserialize)]
struct ConfigurationCsvRecord {
    person: i64,
    valid_from: String,
    monday: String,
    tuesday: String,
    wednesday: String,
    thursday: String,
    friday: String,
    saturday: String,
    sunday: String,
    #[serde(default)]
    jurisdiction_override: String,
}

impl From<&WorkingTimeConfiguration> for ConfigurationCsvRecord {
    fn from(configuration: &WorkingTimeConfiguration) -> Self {
        let weekly = &configuration.weekly;
        Self {
            person: configuration.person.0,
            valid_from: format_date(configuration.valid_from),
            monday: weekly.monday.to_string(),
            tuesday: weekly.tuesday.to_string(),
            wednesday: weekly.wednesday.to_string(),
            thursday: weekly.thursday.to_string(),
            friday: weekly.friday.to_string(),
            saturday: weekly.saturday.to_string(),
            sunday: weekly.sunday.to_string(),
            jurisdiction_override: configuration
                .jurisdiction_override
                .as_ref()
                .map(|j| j.code().to_string())
                .unwrap_or_default(),
        }
    }
}

impl ConfigurationCsvRecord {
    fn into_configuration(self) -> PersistenceResult<WorkingTimeConfiguration> {
        let weekly = WeeklyWorkingTime {
            monday: parse_day_length(&self.monday)?,
            tuesday: parse_day_length(&self.tuesday)?,
            wednesday: parse_day_length(&self.wednesday)?,
            thursday: parse_day_length(&self.thursday)?,
            friday: parse_day_length(&self.friday)?,
            saturday: parse_day_length(&self.saturday)?,
            sunday: parse_day_length(&self.sunday)?,
        };
        let override_code = self.jurisdiction_override.trim();
        Ok(WorkingTimeConfiguration {
            person: PersonId(self.person),
            valid_from: parse_date(&self.valid_from)?,
            weekly,
            jurisdiction_override: if override_code.is_empty() {
                None
            } else {
                Some(Jurisdiction::new(override_code))
            },
        })
    }
}

pub fn save_configurations_to_csv<P: AsRef<Path>>(
    configurations: &[WorkingTimeConfiguration],
    path: P,
) -> PersistenceResult<()> {
    super::validate_configurations(configurations)?;
    let mut writer = csv::Writer::from_path(path)?;
    for configuration in configurations {
        writer.serialize(ConfigurationCsvRecord::from(configuration))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_configurations_from_csv<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<Vec<WorkingTimeConfiguration>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut configurations = Vec::new();
    for record in reader.deserialize::<ConfigurationCsvRecord>() {
        configurations.push(record?.into_configuration()?);
    }
    super::validate_configurations(&configurations)?;
    Ok(configurations)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(value: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| PersistenceError::InvalidData(format!("invalid date '{value}': {err}")))
}

pub(crate) fn parse_day_length(value: &str) -> PersistenceResult<DayLength> {
    value.parse().map_err(PersistenceError::InvalidData)
}
