//! Settings and configuration structures.

use crate::jurisdiction::DefaultJurisdictionProvider;
use crate::working_time::Jurisdiction;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading settings or reading the default jurisdiction.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("no default jurisdiction configured (working_time.default_jurisdiction)")]
    MissingDefaultJurisdiction,

    #[error("default jurisdiction provider failed: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SettingsError {
    /// Wraps a backend failure of a custom [`DefaultJurisdictionProvider`].
    pub fn provider<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        SettingsError::Provider(err.into())
    }
}

/// Main application settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub working_time: WorkingTimeSettings,
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Working-time defaults applied to every person.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WorkingTimeSettings {
    /// Jurisdiction for working times without an override.
    #[serde(default)]
    pub default_jurisdiction: Option<Jurisdiction>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineSettings {
    /// Build per-person calendars on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl Settings {
    /// Load settings from the `config` directory and the environment.
    ///
    /// Sources, later ones override earlier:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `WORKING_TIME_ENV`)
    /// 3. Environment variables prefixed with `WORKING_TIME__`
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_dir("config")
    }

    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, SettingsError> {
        let dir = dir.as_ref();
        let env = std::env::var("WORKING_TIME_ENV").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::from(dir.join("default.toml")).required(false))
            .add_source(File::from(dir.join(format!("{env}.toml"))).required(false))
            .add_source(Environment::with_prefix("WORKING_TIME").separator("__"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    pub fn with_default_jurisdiction(mut self, jurisdiction: impl Into<Jurisdiction>) -> Self {
        self.working_time.default_jurisdiction = Some(jurisdiction.into());
        self
    }
}

/// Reads the default jurisdiction from [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsJurisdictionProvider {
    settings: Settings,
}

impl SettingsJurisdictionProvider {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl DefaultJurisdictionProvider for SettingsJurisdictionProvider {
    fn default_jurisdiction(&self) -> Result<Jurisdiction, SettingsError> {
        self.settings
            .working_time
            .default_jurisdiction
            .clone()
            .ok_or(SettingsError::MissingDefaultJurisdiction)
    }
}
