//! Repository for the expense history ledger

use sqlx::PgPool;

use crate::models::ExpenseHistoryRecord;
use crate::store::DataAccessResult;

/// Fetch one page of expense history joined to the expense catalog
///
/// Ordered by `expenses_history_id` DESC so the most recent entry comes first.
/// Missing catalog entries leave `expense_name` NULL.
pub async fn fetch_page(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> DataAccessResult<Vec<ExpenseHistoryRecord>> {
    let rows = sqlx::query_as::<_, ExpenseHistoryRecord>(
        r#"
        SELECT
            eh.expenses_history_id,
            eh.expense_id,
            e.expense_name,
            COALESCE(eh.amount, 0)::FLOAT8 AS amount,
            eh.expense_date,
            eh.notes
        FROM expenses_history eh
        LEFT JOIN expenses e ON e.expense_id = eh.expense_id
        ORDER BY eh.expenses_history_id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn count_all(pool: &PgPool) -> DataAccessResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM expenses_history")
        .fetch_one(pool)
        .await?;

    Ok(total)
}

/// Delete by identifier, returning the number of rows removed (0 or 1)
pub async fn delete_by_id(pool: &PgPool, expenses_history_id: i64) -> DataAccessResult<u64> {
    let result = sqlx::query("DELETE FROM expenses_history WHERE expenses_history_id = $1")
        .bind(expenses_history_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
