use super::{SessionStorage, StorageError, StorageResult};

/// Storage that refuses every call, like `sessionStorage` in a locked-down
/// private browsing window.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStorage;

impl DisabledStorage {
    fn refuse<T>() -> StorageResult<T> {
        Err(StorageError::Unavailable(
            "session storage is disabled".to_string(),
        ))
    }
}

impl SessionStorage for DisabledStorage {
    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Self::refuse()
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Self::refuse()
    }

    fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Self::refuse()
    }
}
