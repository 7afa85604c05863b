//! Repository for sales and stock figures
//!
//! Both queries take the same [`ReportWindow`]; month and year are
//! independent filters and a `NULL` bind disables the filter.

use sqlx::PgPool;

use crate::models::{TransactionFact, STOCK_STATUS_BUY};
use crate::params::ReportWindow;
use crate::store::DataAccessResult;

/// Fetch raw transaction facts inside the window, ordered by date
pub async fn fetch_transaction_facts(
    pool: &PgPool,
    window: ReportWindow,
) -> DataAccessResult<Vec<TransactionFact>> {
    let (month, year) = window_binds(window);

    let facts = sqlx::query_as::<_, TransactionFact>(
        r#"
        SELECT
            transaction_date,
            payment_status,
            unpaid::FLOAT8 AS unpaid,
            total_due::FLOAT8 AS total_due,
            total_quantity::BIGINT AS total_quantity,
            selected_service
        FROM transactions
        WHERE ($1::INT IS NULL OR EXTRACT(MONTH FROM transaction_date)::INT = $1)
          AND ($2::INT IS NULL OR EXTRACT(YEAR FROM transaction_date)::INT = $2)
        ORDER BY transaction_date ASC, transaction_id ASC
        "#,
    )
    .bind(month)
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(facts)
}

/// Sum the worth of `Buy` stock entries inside the window
pub async fn sum_stock_purchases(
    pool: &PgPool,
    window: ReportWindow,
) -> DataAccessResult<Option<f64>> {
    let (month, year) = window_binds(window);

    let total = sqlx::query_scalar::<_, Option<f64>>(
        r#"
        SELECT SUM(total_worth_stock_in)::FLOAT8
        FROM stock
        WHERE stock_status = $1
          AND ($2::INT IS NULL OR EXTRACT(MONTH FROM stock_date)::INT = $2)
          AND ($3::INT IS NULL OR EXTRACT(YEAR FROM stock_date)::INT = $3)
        "#,
    )
    .bind(STOCK_STATUS_BUY)
    .bind(month)
    .bind(year)
    .fetch_one(pool)
    .await?;

    Ok(total)
}

fn window_binds(window: ReportWindow) -> (Option<i32>, Option<i32>) {
    (window.month.map(|m| m as i32), window.year)
}
