//! # ReportingStore
//!
//! The data-access capability every service talks to. It is created once at
//! startup and injected into the router as `Arc<dyn ReportingStore>`.
//!
//! ## Implementations
//!
//! - **PgReportingStore**: production implementation over a shared `PgPool`
//! - **InMemoryReportingStore**: test/dev implementation over in-process vectors

mod inmemory;
#[cfg(test)]
pub(crate) mod inmemory_fixtures;
mod postgres;

pub use inmemory::{
    CustomerRecord, ExpenseHistoryEntry, InMemoryReportingStore, ItemRecord, StockRecord,
    TransactionItemRecord, TransactionRecord,
};
pub use postgres::PgReportingStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CustomerDeliveryRow, ExpenseHistoryRecord, LineItemRow, TransactionFact};
use crate::params::ReportWindow;

/// Any failure talking to the database: connectivity, malformed query,
/// constraint violation
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type DataAccessResult<T> = Result<T, DataAccessError>;

#[async_trait]
pub trait ReportingStore: Send + Sync {
    /// One page of expense history, newest `expenses_history_id` first
    async fn fetch_expense_history_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> DataAccessResult<Vec<ExpenseHistoryRecord>>;

    async fn count_expense_history(&self) -> DataAccessResult<i64>;

    /// Delete one expense history row, returning the number of rows removed
    async fn delete_expense_history(&self, expenses_history_id: i64) -> DataAccessResult<u64>;

    /// Raw transactions inside the window, ordered by date
    async fn fetch_transaction_facts(
        &self,
        window: ReportWindow,
    ) -> DataAccessResult<Vec<TransactionFact>>;

    /// Sum of `total_worth_stock_in` over `Buy` stock entries inside the window
    ///
    /// `None` when no entries match.
    async fn sum_stock_purchases(&self, window: ReportWindow) -> DataAccessResult<Option<f64>>;

    /// One page of per-customer delivery summaries matching `search`
    async fn fetch_customer_deliveries(
        &self,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> DataAccessResult<Vec<CustomerDeliveryRow>>;

    async fn count_customer_deliveries(&self, search: &str) -> DataAccessResult<i64>;

    /// Line items for the given transactions, ordered by line id
    async fn fetch_line_items(&self, transaction_ids: &[i64]) -> DataAccessResult<Vec<LineItemRow>>;

    /// Readiness probe
    async fn ping(&self) -> DataAccessResult<()>;
}
