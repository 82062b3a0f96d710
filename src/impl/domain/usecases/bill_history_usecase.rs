use async_trait::async_trait;
use chrono::Local;
use fractic_server_error::ServerError;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, warn};

use crate::{
    domain::{
        logic::{bill_query::BillQuery, receipt_validator::ReceiptValidator},
        repositories::bill_repository::BillRepository,
    },
    entities::{BillFilter, BillHistoryItem, BillStats, Receipt},
};

#[async_trait]
pub trait BillHistoryUsecase: Send + Sync {
    async fn get_all_bills(&self) -> Vec<BillHistoryItem>;

    async fn get_bill_by_id(&self, id: &str) -> Option<BillHistoryItem>;

    async fn save_bill(
        &self,
        receipt: Receipt,
        image_uri: &str,
    ) -> Result<BillHistoryItem, ServerError>;

    async fn delete_bill(&self, id: &str) -> Result<bool, ServerError>;

    async fn search_bills(&self, query: &str) -> Vec<BillHistoryItem>;

    async fn filter_bills(&self, filter: &BillFilter) -> Vec<BillHistoryItem>;

    async fn get_recent_participants(&self) -> Vec<String>;

    async fn get_bill_stats(&self) -> BillStats;

    async fn clear_all_bills(&self) -> Result<(), ServerError>;
}

/// Working set of bills, hydrated from the repository on first access.
#[derive(Default)]
struct BillCollection {
    bills: Vec<BillHistoryItem>,
    is_loaded: bool,
}

/// The lock is held for a whole operation, including the repository write, so
/// mutations never interleave. A mutation only reaches memory after it was
/// persisted.
pub(crate) struct BillHistoryUsecaseImpl<R: BillRepository> {
    bill_repository: R,
    collection: Mutex<BillCollection>,
}

#[async_trait]
impl<R: BillRepository> BillHistoryUsecase for BillHistoryUsecaseImpl<R> {
    async fn get_all_bills(&self) -> Vec<BillHistoryItem> {
        let collection = self.hydrated().await;
        BillQuery::new(&collection.bills).all()
    }

    async fn get_bill_by_id(&self, id: &str) -> Option<BillHistoryItem> {
        let collection = self.hydrated().await;
        BillQuery::new(&collection.bills).by_id(id)
    }

    async fn save_bill(
        &self,
        receipt: Receipt,
        image_uri: &str,
    ) -> Result<BillHistoryItem, ServerError> {
        // Same rules as hydration, so every stored record reads back.
        ReceiptValidator::new(&receipt).validate().map_err(|e| {
            warn!(bill_id = %receipt.id, error = %e, "refusing to save invalid receipt");
            e
        })?;
        let mut collection = self.hydrated().await;
        let bill = BillHistoryItem::from_receipt(receipt, image_uri);

        // Same id replaces the previous record entirely; the new one goes last.
        let mut updated: Vec<BillHistoryItem> = collection
            .bills
            .iter()
            .filter(|b| b.id != bill.id)
            .cloned()
            .collect();
        updated.push(bill.clone());

        self.persist(&updated, &bill.id).await?;
        collection.bills = updated;
        debug!(bill_id = %bill.id, "saved bill");
        Ok(bill)
    }

    async fn delete_bill(&self, id: &str) -> Result<bool, ServerError> {
        let mut collection = self.hydrated().await;
        if !collection.bills.iter().any(|b| b.id == id) {
            return Ok(false);
        }

        let updated: Vec<BillHistoryItem> = collection
            .bills
            .iter()
            .filter(|b| b.id != id)
            .cloned()
            .collect();
        self.persist(&updated, id).await?;
        collection.bills = updated;
        debug!(bill_id = %id, "deleted bill");
        Ok(true)
    }

    async fn search_bills(&self, query: &str) -> Vec<BillHistoryItem> {
        let collection = self.hydrated().await;
        BillQuery::new(&collection.bills).search(query)
    }

    async fn filter_bills(&self, filter: &BillFilter) -> Vec<BillHistoryItem> {
        let collection = self.hydrated().await;
        BillQuery::new(&collection.bills).filter(filter)
    }

    async fn get_recent_participants(&self) -> Vec<String> {
        let collection = self.hydrated().await;
        BillQuery::new(&collection.bills).recent_participants(&Local::now())
    }

    async fn get_bill_stats(&self) -> BillStats {
        let collection = self.hydrated().await;
        BillQuery::new(&collection.bills).stats(&Local::now())
    }

    async fn clear_all_bills(&self) -> Result<(), ServerError> {
        let mut collection = self.collection.lock().await;
        self.bill_repository.clear_bills().await.map_err(|e| {
            error!(error = %e, "failed to clear stored bill history");
            e
        })?;
        collection.bills.clear();
        collection.is_loaded = true;
        debug!("cleared bill history");
        Ok(())
    }
}

impl<R: BillRepository> BillHistoryUsecaseImpl<R> {
    pub(crate) fn new(bill_repository: R) -> Self {
        BillHistoryUsecaseImpl {
            bill_repository,
            collection: Mutex::new(BillCollection::default()),
        }
    }

    /// Locks the working set, loading it first if this is the first access.
    /// Unreadable history is logged and replaced by an empty collection;
    /// loading is never retried, even if the stored copy changes later.
    async fn hydrated(&self) -> MutexGuard<'_, BillCollection> {
        let mut collection = self.collection.lock().await;
        if !collection.is_loaded {
            collection.bills = match self.bill_repository.load_bills().await {
                Ok(bills) => {
                    debug!(count = bills.len(), "loaded bill history");
                    bills
                }
                Err(e) => {
                    warn!(error = %e, "discarding unreadable bill history");
                    Vec::new()
                }
            };
            collection.is_loaded = true;
        }
        collection
    }

    async fn persist(&self, bills: &[BillHistoryItem], bill_id: &str) -> Result<(), ServerError> {
        self.bill_repository.save_bills(bills).await.map_err(|e| {
            error!(bill_id = %bill_id, error = %e, "failed to persist bill history");
            e
        })
    }
}
