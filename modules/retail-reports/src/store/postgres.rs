//! Postgres implementation of the ReportingStore trait

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DataAccessResult, ReportingStore};
use crate::models::{CustomerDeliveryRow, ExpenseHistoryRecord, LineItemRow, TransactionFact};
use crate::params::ReportWindow;
use crate::repos::{customer_delivery_repo, expense_history_repo, sales_repo};

/// ReportingStore backed by the shared connection pool
#[derive(Clone)]
pub struct PgReportingStore {
    pool: PgPool,
}

impl PgReportingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection; used on shutdown
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ReportingStore for PgReportingStore {
    async fn fetch_expense_history_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> DataAccessResult<Vec<ExpenseHistoryRecord>> {
        expense_history_repo::fetch_page(&self.pool, limit, offset).await
    }

    async fn count_expense_history(&self) -> DataAccessResult<i64> {
        expense_history_repo::count_all(&self.pool).await
    }

    async fn delete_expense_history(&self, expenses_history_id: i64) -> DataAccessResult<u64> {
        expense_history_repo::delete_by_id(&self.pool, expenses_history_id).await
    }

    async fn fetch_transaction_facts(
        &self,
        window: ReportWindow,
    ) -> DataAccessResult<Vec<TransactionFact>> {
        sales_repo::fetch_transaction_facts(&self.pool, window).await
    }

    async fn sum_stock_purchases(&self, window: ReportWindow) -> DataAccessResult<Option<f64>> {
        sales_repo::sum_stock_purchases(&self.pool, window).await
    }

    async fn fetch_customer_deliveries(
        &self,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> DataAccessResult<Vec<CustomerDeliveryRow>> {
        customer_delivery_repo::fetch_page(&self.pool, search, limit, offset).await
    }

    async fn count_customer_deliveries(&self, search: &str) -> DataAccessResult<i64> {
        customer_delivery_repo::count(&self.pool, search).await
    }

    async fn fetch_line_items(&self, transaction_ids: &[i64]) -> DataAccessResult<Vec<LineItemRow>> {
        customer_delivery_repo::fetch_line_items(&self.pool, transaction_ids).await
    }

    async fn ping(&self) -> DataAccessResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
