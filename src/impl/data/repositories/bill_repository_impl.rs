use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::key_value_datasource::KeyValueDatasource,
        models::bill_history_document_model::BillHistoryDocumentModel,
    },
    domain::repositories::bill_repository::BillRepository,
    entities::BillHistoryItem,
};

pub(crate) struct BillRepositoryImpl<DS: KeyValueDatasource> {
    datasource: DS,
    bills_key: String,
}

#[async_trait]
impl<DS: KeyValueDatasource> BillRepository for BillRepositoryImpl<DS> {
    async fn load_bills(&self) -> Result<Vec<BillHistoryItem>, ServerError> {
        match self.datasource.get_item(&self.bills_key).await? {
            Some(json) => BillHistoryDocumentModel::from_json(&json),
            None => Ok(Vec::new()),
        }
    }

    async fn save_bills(&self, bills: &[BillHistoryItem]) -> Result<(), ServerError> {
        let json = BillHistoryDocumentModel::to_json(bills)?;
        self.datasource.set_item(&self.bills_key, &json).await
    }

    async fn clear_bills(&self) -> Result<(), ServerError> {
        self.datasource.remove_item(&self.bills_key).await
    }
}

impl<DS: KeyValueDatasource> BillRepositoryImpl<DS> {
    pub(crate) fn new(datasource: DS, bills_key: impl Into<String>) -> Self {
        BillRepositoryImpl {
            datasource,
            bills_key: bills_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;
    use crate::{
        data::datasources::memory_key_value_datasource::InMemoryKeyValueDatasource,
        entities::Receipt,
    };

    const KEY: &str = "@TabTogether:bills";

    fn bill(id: &str) -> BillHistoryItem {
        let receipt = Receipt::new(id, Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(), 10.0);
        BillHistoryItem::from_receipt(receipt, "")
    }

    #[tokio::test]
    async fn nothing_stored_loads_empty() {
        let repo = BillRepositoryImpl::new(InMemoryKeyValueDatasource::new(), KEY);
        assert!(repo.load_bills().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_load_clear() {
        let ds = InMemoryKeyValueDatasource::new();
        let repo = BillRepositoryImpl::new(ds.clone(), KEY);
        repo.save_bills(&[bill("a"), bill("b")]).await.unwrap();
        assert!(ds.get_item(KEY).await.unwrap().is_some());

        let loaded = repo.load_bills().await.unwrap();
        assert_eq!(loaded, vec![bill("a"), bill("b")]);

        repo.clear_bills().await.unwrap();
        assert_eq!(ds.get_item(KEY).await.unwrap(), None);
        assert!(repo.load_bills().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_content_is_an_error() {
        let ds = InMemoryKeyValueDatasource::new();
        ds.set_item(KEY, "{ definitely not json").await.unwrap();
        let repo = BillRepositoryImpl::new(ds, KEY);
        assert!(repo.load_bills().await.is_err());
    }
}
