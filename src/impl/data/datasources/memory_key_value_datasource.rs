use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tokio::sync::Mutex;

use super::key_value_datasource::KeyValueDatasource;

/// Volatile datasource. Clones share the same entries, so a second store
/// built over a clone sees what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueDatasource {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKeyValueDatasource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueDatasource for InMemoryKeyValueDatasource {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ServerError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ServerError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), ServerError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_entries() {
        let a = InMemoryKeyValueDatasource::new();
        let b = a.clone();
        a.set_item("k", "v").await.unwrap();
        assert_eq!(b.get_item("k").await.unwrap().as_deref(), Some("v"));
        b.remove_item("k").await.unwrap();
        assert_eq!(a.get_item("k").await.unwrap(), None);
    }
}
