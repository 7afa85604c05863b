//! Customer Delivery Summary Service
//!
//! Lists each customer's most recent delivered/picked-up transaction with
//! their running totals and the transaction's line items. Summaries and line
//! items come from two queries and are stitched together here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::sales_aggregation::{coerce_amount, coerce_count, round_money};
use crate::models::{CustomerDeliveryRow, LineItemRow};
use crate::params::Pagination;
use crate::store::{DataAccessResult, ReportingStore};

/// Flat share of the due amount booked as expense
pub const EXPENSE_RATE: f64 = 0.10;

/// One line of the latest transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredItem {
    pub item_id: i64,
    pub quantity: i64,
    pub free: i64,
    pub total: f64,
    pub item_title: Option<String>,
    pub item_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDelivery {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact_number: Option<String>,
    pub transaction_id: i64,
    pub transaction_date: NaiveDate,
    pub order_status: String,
    pub selected_service: String,
    pub payment_status: String,
    pub delivered_count: i64,
    pub pick_up_count: i64,
    pub total_unpaid: f64,
    pub total_due: f64,
    pub expense: f64,
    pub net_sales: f64,
    pub items: Vec<DeliveredItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDeliveryPage {
    pub rows: Vec<CustomerDelivery>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
}

/// `(expense, net_sales)` for a due amount
pub fn split_due(total_due: f64) -> (f64, f64) {
    let expense = round_money(total_due * EXPENSE_RATE);
    (expense, round_money(total_due - expense))
}

pub async fn monthly_sales_data(
    store: &dyn ReportingStore,
    pagination: Pagination,
    search: &str,
) -> DataAccessResult<CustomerDeliveryPage> {
    let summaries = store
        .fetch_customer_deliveries(search, pagination.limit, pagination.offset())
        .await?;
    let total_count = store.count_customer_deliveries(search).await?;

    let transaction_ids: Vec<i64> = summaries.iter().map(|s| s.transaction_id).collect();
    let lines = store.fetch_line_items(&transaction_ids).await?;

    Ok(CustomerDeliveryPage {
        rows: assemble(summaries, lines),
        total_count,
        page: pagination.page,
        limit: pagination.limit,
    })
}

/// Attach each transaction's lines to its summary, preserving summary order
fn assemble(summaries: Vec<CustomerDeliveryRow>, lines: Vec<LineItemRow>) -> Vec<CustomerDelivery> {
    let mut items_by_tx: HashMap<i64, Vec<DeliveredItem>> = HashMap::new();
    for line in lines {
        items_by_tx
            .entry(line.transaction_id)
            .or_default()
            .push(DeliveredItem {
                item_id: line.item_id,
                quantity: coerce_count(line.quantity),
                free: coerce_count(line.free),
                total: round_money(coerce_amount(line.total)),
                item_title: line.item_title,
                item_image: line.item_image,
            });
    }

    summaries
        .into_iter()
        .map(|row| {
            let total_due = round_money(coerce_amount(row.total_due));
            let (expense, net_sales) = split_due(total_due);
            CustomerDelivery {
                items: items_by_tx.remove(&row.transaction_id).unwrap_or_default(),
                customer_id: row.customer_id,
                first_name: row.first_name,
                last_name: row.last_name,
                address: row.address,
                city: row.city,
                contact_number: row.contact_number,
                transaction_id: row.transaction_id,
                transaction_date: row.transaction_date,
                order_status: row.order_status,
                selected_service: row.selected_service,
                payment_status: row.payment_status,
                delivered_count: row.delivered_count,
                pick_up_count: row.pick_up_count,
                total_unpaid: round_money(coerce_amount(row.total_unpaid)),
                total_due,
                expense,
                net_sales,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::inmemory_fixtures::*;
    use crate::store::InMemoryReportingStore;

    async fn seeded_store() -> InMemoryReportingStore {
        let store = InMemoryReportingStore::new();
        seed_customer(&store, 1, "Ana", "Smith", "Cebu").await;
        seed_customer(&store, 2, "Ben", "Reyes", "Smithfield").await;
        seed_customer(&store, 3, "Cora", "Lim", "Davao").await;
        seed_customer(&store, 4, "Dan", "Cruz", "Manila").await;

        seed_transaction(&store, 10, 1, (2024, 1, 3), "Paid", 0.0, 100.0, 2, "Delivery", "Delivered").await;
        seed_transaction(&store, 11, 1, (2024, 2, 3), "Credit", 30.0, 50.0, 1, "Pick Up", "Pick Up").await;
        seed_transaction(&store, 20, 2, (2024, 2, 10), "Paid", 0.0, 200.0, 4, "Delivery", "Delivered").await;
        seed_transaction(&store, 30, 3, (2024, 1, 20), "Paid", 0.0, 80.0, 1, "Pick Up", "Pick Up").await;
        seed_transaction(&store, 40, 4, (2024, 3, 1), "Paid", 0.0, 70.0, 1, "Delivery", "Pending").await;

        seed_item(&store, 500, "Water 5gal").await;
        seed_item(&store, 501, "Ice 1kg").await;
        seed_line(&store, 1, 11, 500, 1, 0, 40.0).await;
        seed_line(&store, 2, 11, 501, 2, 1, 10.0).await;
        seed_line(&store, 3, 20, 500, 4, 0, 200.0).await;
        store
    }

    #[test]
    fn test_split_due_is_ten_percent() {
        assert_eq!(split_due(150.0), (15.0, 135.0));
        assert_eq!(split_due(0.0), (0.0, 0.0));
        assert_eq!(split_due(33.33), (3.33, 30.0));
    }

    #[tokio::test]
    async fn test_rows_ordered_by_latest_transaction() {
        let store = seeded_store().await;
        let page = monthly_sales_data(&store, Pagination::default(), "").await.unwrap();

        assert_eq!(page.total_count, 3, "customer 4 has no delivered/picked-up transaction");
        let ids: Vec<i64> = page.rows.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_row_carries_totals_and_items_of_latest_transaction() {
        let store = seeded_store().await;
        let page = monthly_sales_data(&store, Pagination::default(), "").await.unwrap();

        let ana = page.rows.iter().find(|r| r.customer_id == 1).unwrap();
        assert_eq!(ana.transaction_id, 11);
        assert_eq!(ana.delivered_count, 1);
        assert_eq!(ana.pick_up_count, 1);
        assert_eq!(ana.total_unpaid, 30.0);
        assert_eq!(ana.total_due, 150.0);
        assert_eq!(ana.expense, 15.0);
        assert_eq!(ana.net_sales, 135.0);
        assert_eq!(ana.items.len(), 2);
        assert_eq!(ana.items[0].item_title.as_deref(), Some("Water 5gal"));
        assert_eq!(ana.items[1].free, 1);

        let cora = page.rows.iter().find(|r| r.customer_id == 3).unwrap();
        assert!(cora.items.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = seeded_store().await;

        let page = monthly_sales_data(&store, Pagination::default(), "SMITH").await.unwrap();
        let ids: Vec<i64> = page.rows.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids, vec![2, 1], "last name Smith and city Smithfield both match");
        assert_eq!(page.total_count, 2);

        let all = monthly_sales_data(&store, Pagination::default(), "").await.unwrap();
        let blank = monthly_sales_data(&store, Pagination::default(), "  ").await.unwrap();
        assert_eq!(all.total_count, blank.total_count);
    }

    #[tokio::test]
    async fn test_pagination_limits_rows() {
        let store = seeded_store().await;
        let page = monthly_sales_data(&store, Pagination { page: 2, limit: 2 }, "")
            .await
            .unwrap();

        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].customer_id, 3);
        assert_eq!(page.total_count, 3);
    }
}
