//! Seeding shortcuts for unit tests over the in-memory store

use chrono::NaiveDate;

use super::inmemory::{
    CustomerRecord, ExpenseHistoryEntry, ItemRecord, StockRecord, TransactionItemRecord,
    TransactionRecord,
};
use super::InMemoryReportingStore;

pub fn ymd(date: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid test date")
}

pub async fn seed_customer(
    store: &InMemoryReportingStore,
    customer_id: i64,
    first_name: &str,
    last_name: &str,
    city: &str,
) {
    store
        .insert_customer(CustomerRecord {
            customer_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: Some(format!("{} Main St", customer_id)),
            city: Some(city.to_string()),
            contact_number: None,
        })
        .await;
}

pub async fn seed_transaction(
    store: &InMemoryReportingStore,
    transaction_id: i64,
    customer_id: i64,
    date: (i32, u32, u32),
    payment_status: &str,
    unpaid: f64,
    total_due: f64,
    total_quantity: i64,
    selected_service: &str,
    order_status: &str,
) {
    store
        .insert_transaction(TransactionRecord {
            transaction_id,
            transaction_date: ymd(date),
            payment_status: payment_status.to_string(),
            unpaid,
            total_due,
            total_quantity,
            selected_service: selected_service.to_string(),
            order_status: order_status.to_string(),
            customer_id,
        })
        .await;
}

pub async fn seed_stock(
    store: &InMemoryReportingStore,
    date: (i32, u32, u32),
    stock_status: &str,
    total_worth_stock_in: f64,
) {
    store
        .insert_stock(StockRecord {
            stock_date: ymd(date),
            stock_status: stock_status.to_string(),
            total_worth_stock_in,
        })
        .await;
}

pub async fn seed_item(store: &InMemoryReportingStore, item_id: i64, title: &str) {
    store
        .insert_item(ItemRecord {
            item_id,
            item_title: title.to_string(),
            item_image: Some(format!("{}.png", item_id)),
        })
        .await;
}

pub async fn seed_line(
    store: &InMemoryReportingStore,
    transaction_item_id: i64,
    transaction_id: i64,
    item_id: i64,
    quantity: i64,
    free: i64,
    total: f64,
) {
    store
        .insert_transaction_item(TransactionItemRecord {
            transaction_item_id,
            transaction_id,
            item_id,
            quantity,
            free,
            total,
        })
        .await;
}

pub async fn seed_expense_history(
    store: &InMemoryReportingStore,
    expenses_history_id: i64,
    expense_id: Option<i64>,
    amount: f64,
) {
    store
        .insert_expense_history(ExpenseHistoryEntry {
            expenses_history_id,
            expense_id,
            amount,
            expense_date: ymd((2024, 1, 1)),
            notes: None,
        })
        .await;
}
