use chrono::Utc;
use log::{debug, warn};

use crate::accessor::resolve_record;
use crate::attribution::AttributionRecord;
use crate::capture::capture;
use crate::common::STORAGE_KEY;
use crate::note::format_attribution_note;
use crate::page::PageContext;
use crate::storage::{SessionStorage, StorageError};

/// What [`AttributionTracker::try_update`] did with a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing was stored yet; the candidate became the session's record.
    Stored,
    /// The candidate carried campaign signal and replaced the stored record.
    Replaced,
    /// The candidate had no campaign signal; the stored record was kept.
    Kept,
}

/// Owns the session's attribution record and applies the last-touch policy.
///
/// None of the public operations fail. Storage problems are logged with
/// `warn!` on writes and silently replaced by the direct-traffic default on
/// reads.
pub struct AttributionTracker<S: SessionStorage> {
    storage: S,
    key: String,
}

impl<S: SessionStorage> AttributionTracker<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Capture the page and feed it through [`Self::update`]. Hosts call
    /// this once per page load.
    pub fn capture_or_update(&self, page: &PageContext) {
        self.update(capture(page));
    }

    /// Same as [`Self::capture_or_update`].
    pub fn store_attribution(&self, page: &PageContext) {
        self.capture_or_update(page);
    }

    /// Apply the last-touch policy, warning instead of failing when storage
    /// is unavailable.
    pub fn update(&self, candidate: AttributionRecord) {
        if let Err(e) = self.try_update(candidate) {
            warn!("UTM Tracking: session storage not available ({})", e);
        }
    }

    /// Apply the last-touch policy and report what happened.
    ///
    /// An empty store takes the candidate unconditionally. A stored record is
    /// replaced in full only by a candidate with campaign signal. Stored
    /// content counts as present even when it does not parse, including a
    /// backend whose own data is damaged.
    pub fn try_update(&self, candidate: AttributionRecord) -> Result<UpdateOutcome, StorageError> {
        let has_existing = match self.storage.get_item(&self.key) {
            Ok(existing) => existing.as_deref().is_some_and(|s| !s.is_empty()),
            Err(StorageError::Corrupted(reason)) => {
                debug!("Stored attribution is damaged ({})", reason);
                true
            }
            Err(e) => return Err(e),
        };

        let outcome = if !has_existing {
            UpdateOutcome::Stored
        } else if candidate.has_campaign_signal() {
            UpdateOutcome::Replaced
        } else {
            debug!(
                "No campaign signal on '{}', keeping stored attribution",
                candidate.landing_page
            );
            return Ok(UpdateOutcome::Kept);
        };

        let json = serde_json::to_string(&candidate)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        self.storage.set_item(&self.key, &json)?;
        debug!(
            "Attribution {:?} for '{}' (source='{}')",
            outcome, candidate.landing_page, candidate.utm_source
        );
        Ok(outcome)
    }

    /// The stored record with field defaults applied, or the direct-traffic
    /// default for `page` when nothing usable is stored.
    pub fn read(&self, page: &PageContext) -> AttributionRecord {
        let stored = self.storage.get_item(&self.key).ok().flatten();
        resolve_record(stored.as_deref(), page, Utc::now())
    }

    /// Data for the form submission handler.
    pub fn attribution_data(&self, page: &PageContext) -> AttributionRecord {
        self.read(page)
    }

    /// Multi-line note for a free-text CRM field.
    pub fn format_attribution_note(&self, page: &PageContext) -> String {
        format_attribution_note(&self.read(page))
    }

    /// Forget the stored record.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            warn!("UTM Tracking: could not clear session storage ({})", e);
        }
    }
}
