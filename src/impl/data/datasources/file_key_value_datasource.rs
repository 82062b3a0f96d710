use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use fractic_server_error::ServerError;
use tokio::fs;

use crate::errors::{ReadError, WriteError};

use super::key_value_datasource::KeyValueDatasource;

/// Stores each key as its own file inside `root`. File names are the URL-safe
/// base64 encoding of the key, so any key text is accepted.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKeyValueDatasource {
    root: PathBuf,
}

impl FileKeyValueDatasource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", URL_SAFE_NO_PAD.encode(key.as_bytes())))
    }
}

#[async_trait]
impl KeyValueDatasource for FileKeyValueDatasource {
    async fn get_item(&self, key: &str) -> Result<Option<String>, ServerError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReadError::with_debug(key, &e)),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ServerError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| WriteError::with_debug(key, &e))?;
        let path = self.path_for(key);
        let staging = path.with_extension("tmp");
        fs::write(&staging, value)
            .await
            .map_err(|e| WriteError::with_debug(key, &e))?;
        fs::rename(&staging, &path)
            .await
            .map_err(|e| WriteError::with_debug(key, &e))
    }

    async fn remove_item(&self, key: &str) -> Result<(), ServerError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WriteError::with_debug(key, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let ds = FileKeyValueDatasource::new(dir.path());
        assert_eq!(ds.get_item("@TabTogether:bills").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let ds = FileKeyValueDatasource::new(dir.path().join("nested"));
        ds.set_item("@TabTogether:bills", "[]").await.unwrap();
        assert_eq!(
            ds.get_item("@TabTogether:bills").await.unwrap().as_deref(),
            Some("[]")
        );

        ds.set_item("@TabTogether:bills", "[1]").await.unwrap();
        assert_eq!(
            ds.get_item("@TabTogether:bills").await.unwrap().as_deref(),
            Some("[1]")
        );

        ds.remove_item("@TabTogether:bills").await.unwrap();
        assert_eq!(ds.get_item("@TabTogether:bills").await.unwrap(), None);
        ds.remove_item("@TabTogether:bills").await.unwrap();
    }

    #[tokio::test]
    async fn keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let ds = FileKeyValueDatasource::new(dir.path());
        ds.set_item("@TabTogether:bills", "bills").await.unwrap();
        ds.set_item("@TabTogether:settings", "settings").await.unwrap();
        assert_eq!(
            ds.get_item("@TabTogether:bills").await.unwrap().as_deref(),
            Some("bills")
        );
        assert_eq!(
            ds.get_item("@TabTogether:settings").await.unwrap().as_deref(),
            Some("settings")
        );
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn unwritable_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let ds = FileKeyValueDatasource::new(&blocker);
        assert!(ds.set_item("k", "v").await.is_err());
    }
}
