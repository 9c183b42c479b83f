use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::error::LedgerError;
use crate::model::warnings::{Removal, SubjectId, Warning, WarningMap};
use crate::store::WarningStore;

/// Authoritative in-memory record of warnings, mirrored to a [`WarningStore`].
///
/// Every mutation holds the lock for the whole append/pop + save sequence and
/// is rolled back in memory when the save fails, so callers never observe a
/// count that is not on disk. Share it behind an `Arc`.
#[derive(Debug)]
pub struct Ledger {
    store: WarningStore,
    default_reason: String,
    warnings: Mutex<WarningMap>,
}

impl Ledger {
    /// Load the store and build a ledger on top of it.
    pub async fn open(
        store: WarningStore,
        default_reason: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let warnings = store.load().await?;

        info!(
            path = %store.path().display(),
            subjects = warnings.len(),
            warnings = warnings.values().map(Vec::len).sum::<usize>(),
            "warning ledger loaded"
        );

        Ok(Self {
            store,
            default_reason: default_reason.into(),
            warnings: Mutex::new(warnings),
        })
    }

    pub fn default_reason(&self) -> &str {
        &self.default_reason
    }

    /// The reason that will be stored for `reason`: trimmed, or the default when blank.
    pub fn resolve_reason(&self, reason: Option<&str>) -> String {
        reason
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .unwrap_or(self.default_reason.as_str())
            .to_owned()
    }

    pub fn store(&self) -> &WarningStore {
        &self.store
    }

    /// Append a warning for `subject` and return its new warning count.
    ///
    /// The reason goes through [`Ledger::resolve_reason`].
    /// The timestamp never goes backwards within one subject's list.
    pub async fn add_warning(
        &self,
        subject: SubjectId,
        reason: Option<&str>,
        issued_by: u64,
        now: DateTime<Utc>,
    ) -> Result<usize, LedgerError> {
        let reason = self.resolve_reason(reason);
        let mut warnings = self.warnings.lock().await;
        let entries = warnings.entry(subject).or_default();
        let timestamp = entries
            .last()
            .map_or(now, |last| last.timestamp.max(now));
        entries.push(Warning {
            reason,
            timestamp,
            issued_by,
        });
        let count = entries.len();

        if let Err(source) = self.store.save(&warnings).await {
            error!(?source, %subject, "failed to persist warning; rolling back");
            if let Some(entries) = warnings.get_mut(&subject) {
                entries.pop();
                if entries.is_empty() {
                    warnings.remove(&subject);
                }
            }
            return Err(source);
        }

        info!(%subject, issued_by, count, "warning recorded");
        Ok(count)
    }

    /// Undo the most recent warning for `subject`.
    ///
    /// Returns [`LedgerError::NoWarnings`] without touching the store when
    /// there is nothing to remove.
    pub async fn remove_last_warning(&self, subject: SubjectId) -> Result<Removal, LedgerError> {
        let mut warnings = self.warnings.lock().await;
        let Some(removed) = warnings.get_mut(&subject).and_then(Vec::pop) else {
            return Err(LedgerError::NoWarnings { subject });
        };
        let remaining = warnings.get(&subject).map_or(0, Vec::len);

        if let Err(source) = self.store.save(&warnings).await {
            error!(?source, %subject, "failed to persist warning removal; rolling back");
            warnings.entry(subject).or_default().push(removed);
            return Err(source);
        }

        info!(%subject, remaining, "warning removed");
        Ok(Removal { removed, remaining })
    }

    /// Warnings for `subject`, oldest first. Unknown subjects have none.
    pub async fn get_warnings(&self, subject: SubjectId) -> Vec<Warning> {
        self.warnings
            .lock()
            .await
            .get(&subject)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn count_warnings(&self, subject: SubjectId) -> usize {
        self.warnings.lock().await.get(&subject).map_or(0, Vec::len)
    }

    /// Copy of the whole mapping.
    pub async fn snapshot(&self) -> WarningMap {
        self.warnings.lock().await.clone()
    }
}
