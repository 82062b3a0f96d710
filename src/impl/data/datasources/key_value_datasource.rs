use async_trait::async_trait;
use fractic_server_error::ServerError;

/// Durable string slots addressed by key, in the manner of a mobile
/// key-value store. Values are replaced wholesale; there is no partial update.
#[async_trait]
pub trait KeyValueDatasource: Send + Sync {
    /// `None` if nothing is stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>, ServerError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), ServerError>;

    /// Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), ServerError>;
}
