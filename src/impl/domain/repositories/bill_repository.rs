use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::BillHistoryItem;

/// Durable copy of the bill collection. Always read and written as a whole.
#[async_trait]
pub trait BillRepository: Send + Sync {
    /// Empty if nothing was ever saved (or everything was cleared).
    async fn load_bills(&self) -> Result<Vec<BillHistoryItem>, ServerError>;

    async fn save_bills(&self, bills: &[BillHistoryItem]) -> Result<(), ServerError>;

    /// Removes the stored collection entirely.
    async fn clear_bills(&self) -> Result<(), ServerError>;
}
