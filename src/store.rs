use chrono::Utc;
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    config::BillStoreConfig,
    data::{
        datasources::file_key_value_datasource::FileKeyValueDatasource,
        repositories::bill_repository_impl::BillRepositoryImpl,
    },
    domain::{
        logic::split_calculator::SplitCalculator,
        usecases::bill_history_usecase::{BillHistoryUsecase as _, BillHistoryUsecaseImpl},
    },
    entities::{BillFilter, BillHistoryItem, BillStats, CalculationResult, Receipt},
    presentation::bill_printer::BillPrinter,
    storage::KeyValueDatasource,
};

/// Durable history of split bills.
///
/// The stored collection is read once, on the first operation, and kept in
/// memory afterwards; changes made to storage by anything other than this
/// instance are not picked up. Mutations are persisted before they become
/// visible, and run one at a time.
///
/// Two stores must not share the same storage slot at the same time.
pub struct BillStore<DS: KeyValueDatasource = FileKeyValueDatasource> {
    bill_history_usecase: BillHistoryUsecaseImpl<BillRepositoryImpl<DS>>,
    printer: BillPrinter,
}

impl BillStore<FileKeyValueDatasource> {
    /// Store backed by files inside `config.storage_dir`.
    pub fn open(config: &BillStoreConfig) -> Result<Self, ServerError> {
        info!(storage_dir = %config.storage_dir.display(), "opening bill store");
        Self::with_datasource(
            FileKeyValueDatasource::new(config.storage_dir.clone()),
            config,
        )
    }
}

impl<DS: KeyValueDatasource> BillStore<DS> {
    pub fn with_datasource(datasource: DS, config: &BillStoreConfig) -> Result<Self, ServerError> {
        Ok(Self {
            bill_history_usecase: BillHistoryUsecaseImpl::new(BillRepositoryImpl::new(
                datasource,
                config.bills_key.clone(),
            )),
            printer: BillPrinter::new(config.currency()?),
        })
    }

    // Bill history.
    // ---

    /// All bills, newest first.
    pub async fn get_all_bills(&self) -> Vec<BillHistoryItem> {
        self.bill_history_usecase.get_all_bills().await
    }

    pub async fn get_bill_by_id(&self, id: &str) -> Option<BillHistoryItem> {
        self.bill_history_usecase.get_bill_by_id(id).await
    }

    /// Records the receipt as a bill, replacing any bill with the same id.
    pub async fn save_bill(
        &self,
        receipt: Receipt,
        image_uri: &str,
    ) -> Result<BillHistoryItem, ServerError> {
        self.bill_history_usecase.save_bill(receipt, image_uri).await
    }

    /// Returns whether a bill with this id existed.
    pub async fn delete_bill(&self, id: &str) -> Result<bool, ServerError> {
        self.bill_history_usecase.delete_bill(id).await
    }

    /// Case-insensitive substring search over venue, participant names, total
    /// and date (`YYYY-MM-DD`). A blank query returns every bill.
    pub async fn search_bills(&self, query: &str) -> Vec<BillHistoryItem> {
        self.bill_history_usecase.search_bills(query).await
    }

    pub async fn filter_bills(&self, filter: &BillFilter) -> Vec<BillHistoryItem> {
        self.bill_history_usecase.filter_bills(filter).await
    }

    /// Up to 10 distinct participant names from bills of the last 30 days, in
    /// the order they were first saved.
    pub async fn get_recent_participants(&self) -> Vec<String> {
        self.bill_history_usecase.get_recent_participants().await
    }

    pub async fn get_bill_stats(&self) -> BillStats {
        self.bill_history_usecase.get_bill_stats().await
    }

    pub async fn clear_all_bills(&self) -> Result<(), ServerError> {
        self.bill_history_usecase.clear_all_bills().await
    }

    // Splitting.
    // ---

    pub fn calculate_split(&self, receipt: &Receipt) -> Result<CalculationResult, ServerError> {
        SplitCalculator::new(receipt).calculate(Utc::now())
    }

    /// Copy of the receipt with every participant's share filled in.
    pub fn apply_split(&self, receipt: &Receipt) -> Result<Receipt, ServerError> {
        SplitCalculator::new(receipt).apply()
    }

    // Printing.
    // ---

    pub fn print_bill(&self, bill: &BillHistoryItem) -> String {
        self.printer.print_bill(bill)
    }

    pub fn print_history(&self, bills: &[BillHistoryItem]) -> String {
        self.printer.print_history(bills)
    }

    pub fn print_stats(&self, stats: &BillStats) -> String {
        self.printer.print_stats(stats)
    }
}
