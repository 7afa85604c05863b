//! Row types read from the retail database
//!
//! All tables are owned by the upstream order-entry system. Numeric columns
//! are cast to `FLOAT8`/`BIGINT` in SQL and may still arrive as NULL, so
//! aggregate inputs are `Option` and coerced with parse-or-zero semantics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const PAYMENT_STATUS_PAID: &str = "Paid";
pub const PAYMENT_STATUS_CREDIT: &str = "Credit";

pub const SERVICE_DELIVERY: &str = "Delivery";
pub const SERVICE_PICK_UP: &str = "Pick Up";

pub const ORDER_STATUS_DELIVERED: &str = "Delivered";
pub const ORDER_STATUS_PICK_UP: &str = "Pick Up";

pub const STOCK_STATUS_BUY: &str = "Buy";

/// One transaction as seen by the sales aggregation
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TransactionFact {
    pub transaction_date: NaiveDate,
    pub payment_status: String,
    pub unpaid: Option<f64>,
    pub total_due: Option<f64>,
    pub total_quantity: Option<i64>,
    pub selected_service: String,
}

/// Expense history row left-joined to the expense catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseHistoryRecord {
    pub expenses_history_id: i64,
    pub expense_id: Option<i64>,
    /// Null when the catalog entry is missing
    pub expense_name: Option<String>,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub notes: Option<String>,
}

/// A customer's most recent delivered/picked-up transaction plus their
/// cumulative totals over all such transactions
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CustomerDeliveryRow {
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
    pub total_unpaid: Option<f64>,
    pub total_due: Option<f64>,
}

/// Transaction line joined to its catalog item
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LineItemRow {
    pub transaction_item_id: i64,
    pub transaction_id: i64,
    pub item_id: i64,
    pub quantity: Option<i64>,
    pub free: Option<i64>,
    pub total: Option<f64>,
    pub item_title: Option<String>,
    pub item_image: Option<String>,
}
