use crate::working_time::{PersonId, WorkingTimeConfiguration};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ConfigurationValidationError {
    message: String,
}

impl ConfigurationValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigurationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigurationValidationError {}

pub fn validate_configuration(
    configuration: &WorkingTimeConfiguration,
) -> Result<(), ConfigurationValidationError> {
    if let Some(jurisdiction) = &configuration.jurisdiction_override {
        if jurisdiction.code().trim().is_empty() {
            return Err(ConfigurationValidationError::new(format!(
                "working time of person {} valid from {} has an empty jurisdiction override",
                configuration.person, configuration.valid_from
            )));
        }
    }
    Ok(())
}

/// Rejects two records of the same person starting on the same date.
pub fn validate_configuration_collection(
    configurations: &[WorkingTimeConfiguration],
) -> Result<(), ConfigurationValidationError> {
    let mut seen: HashSet<(PersonId, NaiveDate)> = HashSet::with_capacity(configurations.len());
    for configuration in configurations {
        if !seen.insert((configuration.person, configuration.valid_from)) {
            return Err(ConfigurationValidationError::new(format!(
                "duplicate working time for person {} valid from {}",
                configuration.person, configuration.valid_from
            )));
        }
        validate_configuration(configuration)?;
    }
    Ok(())
}
