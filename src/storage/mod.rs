//! Session-scoped key/value storage backends

mod disabled;
mod error;
mod file;
mod memory;

pub use disabled::DisabledStorage;
pub use error::{StorageError, StorageResult};
pub use file::{resolve_session_dir, FileSessionStorage};
pub use memory::MemoryStorage;

/// String key/value storage that lives for one browsing session.
///
/// Mirrors the browser `sessionStorage` surface. Any call may fail when the
/// medium is unavailable; callers decide how to degrade.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
