//! Landing-page campaign attribution.
//!
//! Captures UTM parameters and ad click IDs from the page URL, keeps the
//! session's record under a last-touch policy, and hands it back for form
//! submission as data or as a CRM note.

pub mod accessor;
pub mod attribution;
pub mod capture;
pub mod common;
pub mod note;
pub mod page;
pub mod settings;
pub mod storage;
pub mod tracker;

pub use accessor::{direct_default, resolve_record};
pub use attribution::AttributionRecord;
pub use capture::{capture, capture_at};
pub use note::format_attribution_note;
pub use page::PageContext;
pub use settings::{Settings, StorageBackend, StorageSettings};
pub use storage::{
    DisabledStorage, FileSessionStorage, MemoryStorage, SessionStorage, StorageError,
};
pub use tracker::{AttributionTracker, UpdateOutcome};
