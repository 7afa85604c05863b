//! Expense History Service
//!
//! Paginated listing and deletion of the expense-history ledger.

use crate::models::ExpenseHistoryRecord;
use crate::params::Pagination;
use crate::store::{DataAccessResult, ReportingStore};

/// One page of expense history plus pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseHistoryPage {
    pub rows: Vec<ExpenseHistoryRecord>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
}

pub async fn list_expense_history(
    store: &dyn ReportingStore,
    pagination: Pagination,
) -> DataAccessResult<ExpenseHistoryPage> {
    let rows = store
        .fetch_expense_history_page(pagination.limit, pagination.offset())
        .await?;
    let total_count = store.count_expense_history().await?;

    Ok(ExpenseHistoryPage {
        rows,
        total_count,
        page: pagination.page,
        limit: pagination.limit,
    })
}

/// Delete an expense history row
///
/// Reports success whether or not a row existed; the removed-row count is
/// only logged.
pub async fn delete_expense_history(
    store: &dyn ReportingStore,
    expenses_history_id: i64,
) -> DataAccessResult<()> {
    let removed = store.delete_expense_history(expenses_history_id).await?;

    if removed == 0 {
        tracing::warn!(expenses_history_id, "Delete matched no expense history row");
    } else {
        tracing::info!(expenses_history_id, removed, "Expense history row deleted");
    }

    Ok(())
}
