//! Expense History API Routes

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::failure::FailureResponse;
use crate::models::ExpenseHistoryRecord;
use crate::params::{parse_leading_int, PageQuery, Pagination};
use crate::services::expense_history_service;
use crate::store::ReportingStore;

#[derive(Debug, Serialize)]
pub struct ExpenseHistoryResponse {
    pub results: Vec<ExpenseHistoryRecord>,
    #[serde(rename = "Totalhistories")]
    pub total_histories: i64,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    #[serde(rename = "perPage")]
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteExpenseResponse {
    pub success: &'static str,
    pub msg: &'static str,
}

/// Handler for GET /getAllExpensesData
///
/// `page` defaults to 1 and `limit` to 10 when absent or not numeric.
pub async fn get_all_expenses_data(
    State(store): State<Arc<dyn ReportingStore>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ExpenseHistoryResponse>, FailureResponse> {
    let query = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable pagination query, using defaults");
        PageQuery::default()
    });
    let pagination = Pagination::from(&query);

    let page = expense_history_service::list_expense_history(store.as_ref(), pagination)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, page = pagination.page, limit = pagination.limit, "Failed to list expense history");
            FailureResponse::list_expenses()
        })?;

    Ok(Json(ExpenseHistoryResponse {
        results: page.rows,
        total_histories: page.total_count,
        current_page: page.page,
        per_page: page.limit,
    }))
}

/// Handler for DELETE /deleteExpenseData/{id}
///
/// Succeeds even when no row has that id.
pub async fn delete_expense_data(
    State(store): State<Arc<dyn ReportingStore>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteExpenseResponse>, FailureResponse> {
    let expenses_history_id = parse_id(&id).ok_or_else(|| {
        tracing::error!(id = %id, "Expense history id is not an integer");
        FailureResponse::delete_expense()
    })?;

    expense_history_service::delete_expense_history(store.as_ref(), expenses_history_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, expenses_history_id, "Failed to delete expense history");
            FailureResponse::delete_expense()
        })?;

    Ok(Json(DeleteExpenseResponse {
        success: "true",
        msg: "Expenses History Deleted Successfully",
    }))
}

fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    parse_leading_int(trimmed)
}
