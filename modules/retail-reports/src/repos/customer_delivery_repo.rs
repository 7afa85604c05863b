//! Repository for per-customer delivery summaries
//!
//! A customer appears once, represented by their most recent transaction with
//! order status `Delivered` or `Pick Up`. Running totals cover all of that
//! customer's delivered/picked-up transactions.

use sqlx::PgPool;

use crate::models::{CustomerDeliveryRow, LineItemRow, ORDER_STATUS_DELIVERED, ORDER_STATUS_PICK_UP};
use crate::store::DataAccessResult;

/// Fetch one page of delivery summaries
///
/// Ordered by latest transaction date DESC, then customer id ASC.
pub async fn fetch_page(
    pool: &PgPool,
    search: &str,
    limit: i64,
    offset: i64,
) -> DataAccessResult<Vec<CustomerDeliveryRow>> {
    let rows = sqlx::query_as::<_, CustomerDeliveryRow>(
        r#"
        WITH eligible AS (
            SELECT *
            FROM transactions
            WHERE order_status IN ($1, $2)
        ),
        totals AS (
            SELECT
                customer_id,
                COUNT(*) FILTER (WHERE order_status = $1) AS delivered_count,
                COUNT(*) FILTER (WHERE order_status = $2) AS pick_up_count,
                SUM(unpaid)::FLOAT8 AS total_unpaid,
                SUM(total_due)::FLOAT8 AS total_due
            FROM eligible
            GROUP BY customer_id
        ),
        latest AS (
            SELECT DISTINCT ON (customer_id) *
            FROM eligible
            ORDER BY customer_id, transaction_date DESC, transaction_id DESC
        )
        SELECT
            c.customer_id,
            c.first_name,
            c.last_name,
            c.address,
            c.city,
            c.contact_number,
            l.transaction_id,
            l.transaction_date,
            l.order_status,
            l.selected_service,
            l.payment_status,
            tt.delivered_count,
            tt.pick_up_count,
            tt.total_unpaid,
            tt.total_due
        FROM latest l
        INNER JOIN customers c ON c.customer_id = l.customer_id
        INNER JOIN totals tt ON tt.customer_id = l.customer_id
        WHERE $3::TEXT IS NULL
           OR c.first_name ILIKE $3
           OR c.last_name ILIKE $3
           OR c.city ILIKE $3
        ORDER BY l.transaction_date DESC, c.customer_id ASC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(ORDER_STATUS_DELIVERED)
    .bind(ORDER_STATUS_PICK_UP)
    .bind(search_pattern(search))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count customers with at least one delivered/picked-up transaction matching `search`
pub async fn count(pool: &PgPool, search: &str) -> DataAccessResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT c.customer_id)
        FROM transactions t
        INNER JOIN customers c ON c.customer_id = t.customer_id
        WHERE t.order_status IN ($1, $2)
          AND (
              $3::TEXT IS NULL
              OR c.first_name ILIKE $3
              OR c.last_name ILIKE $3
              OR c.city ILIKE $3
          )
        "#,
    )
    .bind(ORDER_STATUS_DELIVERED)
    .bind(ORDER_STATUS_PICK_UP)
    .bind(search_pattern(search))
    .fetch_one(pool)
    .await?;

    Ok(total)
}

/// Fetch line items with catalog metadata for a set of transactions
pub async fn fetch_line_items(
    pool: &PgPool,
    transaction_ids: &[i64],
) -> DataAccessResult<Vec<LineItemRow>> {
    if transaction_ids.is_empty() {
        return Ok(Vec::new());
    }

    let items = sqlx::query_as::<_, LineItemRow>(
        r#"
        SELECT
            ti.transaction_item_id,
            ti.transaction_id,
            ti.item_id,
            ti.quantity::BIGINT AS quantity,
            ti.free::BIGINT AS free,
            ti.total::FLOAT8 AS total,
            i.item_title,
            i.item_image
        FROM transaction_items ti
        LEFT JOIN items i ON i.item_id = ti.item_id
        WHERE ti.transaction_id = ANY($1)
        ORDER BY ti.transaction_id ASC, ti.transaction_item_id ASC
        "#,
    )
    .bind(transaction_ids)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// ILIKE pattern for a substring search, `None` for an empty search
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
pub fn search_pattern(search: &str) -> Option<String> {
    let term = search.trim();
    if term.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_empty_matches_all() {
        assert_eq!(search_pattern(""), None);
        assert_eq!(search_pattern("   "), None);
    }

    #[test]
    fn test_search_pattern_wraps_and_trims() {
        assert_eq!(search_pattern(" smith "), Some("%smith%".to_string()));
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern("50%_off"), Some(r"%50\%\_off%".to_string()));
        assert_eq!(search_pattern(r"a\b"), Some(r"%a\\b%".to_string()));
    }
}
