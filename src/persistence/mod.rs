use crate::configuration_validation;
use crate::working_time::{PersonId, WorkingTimeConfiguration};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Source of working-time configuration records.
pub trait WorkingTimeStore {
    /// All records of the given persons, ordered by descending `valid_from`.
    fn find_by_persons_ordered_by_valid_from_desc(
        &self,
        persons: &[PersonId],
    ) -> PersistenceResult<Vec<WorkingTimeConfiguration>>;
}

impl<T: WorkingTimeStore + ?Sized> WorkingTimeStore for &T {
    fn find_by_persons_ordered_by_valid_from_desc(
        &self,
        persons: &[PersonId],
    ) -> PersistenceResult<Vec<WorkingTimeConfiguration>> {
        (**self).find_by_persons_ordered_by_valid_from_desc(persons)
    }
}

pub fn validate_configurations(
    configurations: &[WorkingTimeConfiguration],
) -> PersistenceResult<()> {
    configuration_validation::validate_configuration_collection(configurations)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

/// Sorts records newest first. The sort is stable, so ties keep their input order.
pub(crate) fn sort_by_valid_from_desc(configurations: &mut [WorkingTimeConfiguration]) {
    configurations.sort_by_key(|configuration| Reverse(configuration.valid_from));
}

/// Store backed by a plain vector, e.g. records loaded from a file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkingTimeStore {
    configurations: Vec<WorkingTimeConfiguration>,
}

impl InMemoryWorkingTimeStore {
    pub fn new(configurations: Vec<WorkingTimeConfiguration>) -> PersistenceResult<Self> {
        validate_configurations(&configurations)?;
        Ok(Self { configurations })
    }

    /// Adds a record, replacing the one of the same person and `valid_from`.
    pub fn upsert(&mut self, configuration: WorkingTimeConfiguration) -> PersistenceResult<()> {
        configuration_validation::validate_configuration(&configuration)
            .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
        self.configurations.retain(|existing| {
            existing.person != configuration.person
                || existing.valid_from != configuration.valid_from
        });
        self.configurations.push(configuration);
        Ok(())
    }

    pub fn configurations(&self) -> &[WorkingTimeConfiguration] {
        &self.configurations
    }
}

impl WorkingTimeStore for InMemoryWorkingTimeStore {
    fn find_by_persons_ordered_by_valid_from_desc(
        &self,
        persons: &[PersonId],
    ) -> PersistenceResult<Vec<WorkingTimeConfiguration>> {
        let wanted: HashSet<PersonId> = persons.iter().copied().collect();
        let mut found: Vec<WorkingTimeConfiguration> = self
            .configurations
            .iter()
            .filter(|configuration| wanted.contains(&configuration.person))
            .cloned()
            .collect();
        sort_by_valid_from_desc(&mut found);
        Ok(found)
    }
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    load_configurations_from_csv, load_configurations_from_json, load_holidays_from_json,
    save_configurations_to_csv, save_configurations_to_json, save_holidays_to_json,
};
