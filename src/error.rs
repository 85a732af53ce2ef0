//! Error type returned by the calendar service.

use crate::persistence::PersistenceError;
use crate::public_holiday::HolidayError;
use crate::settings::SettingsError;
use std::sync::Arc;
use thiserror::Error;

/// Collaborator failures, passed through unchanged.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(transparent)]
    Store(#[from] PersistenceError),

    #[error(transparent)]
    Holiday(#[from] HolidayError),

    /// Shared because one failed lookup is reported to every person of the call.
    #[error(transparent)]
    Jurisdiction(#[from] Arc<SettingsError>),

    #[error("year {0} is outside the supported date range")]
    InvalidYear(i32),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
