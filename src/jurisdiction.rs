//! System default jurisdiction and its per-call memoization.

use crate::settings::SettingsError;
use crate::working_time::Jurisdiction;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Supplies the jurisdiction used by working times without an override.
///
/// Backends that fail for their own reasons report it through
/// [`SettingsError::Provider`], keeping the original error as source.
pub trait DefaultJurisdictionProvider {
    fn default_jurisdiction(&self) -> Result<Jurisdiction, SettingsError>;
}

impl<T: DefaultJurisdictionProvider + ?Sized> DefaultJurisdictionProvider for &T {
    fn default_jurisdiction(&self) -> Result<Jurisdiction, SettingsError> {
        (**self).default_jurisdiction()
    }
}

/// A fixed jurisdiction is its own default.
impl DefaultJurisdictionProvider for Jurisdiction {
    fn default_jurisdiction(&self) -> Result<Jurisdiction, SettingsError> {
        Ok(self.clone())
    }
}

/// Compute-once holder for the default jurisdiction, scoped to one batch call.
///
/// The provider runs on first [`get`](Self::get) and never again, whatever it returned.
/// Concurrent first callers wait on the lock, so the provider is not invoked twice.
/// A failure is shared with every later caller.
pub struct CachedJurisdiction<'a, P: ?Sized> {
    provider: &'a P,
    outcome: Mutex<Option<Result<Jurisdiction, Arc<SettingsError>>>>,
}

impl<'a, P> CachedJurisdiction<'a, P>
where
    P: DefaultJurisdictionProvider + ?Sized,
{
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            outcome: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Result<Jurisdiction, Arc<SettingsError>> {
        let mut slot = self.outcome.lock();
        if let Some(outcome) = slot.as_ref() {
            return outcome.clone();
        }
        let outcome = match self.provider.default_jurisdiction() {
            Ok(jurisdiction) => {
                debug!(%jurisdiction, "resolved default jurisdiction");
                Ok(jurisdiction)
            }
            Err(err) => {
                warn!(error = %err, "default jurisdiction unavailable");
                Err(Arc::new(err))
            }
        };
        *slot = Some(outcome.clone());
        outcome
    }

    /// Whether the provider has already been asked, successfully or not.
    pub fn is_resolved(&self) -> bool {
        self.outcome.lock().is_some()
    }
}
