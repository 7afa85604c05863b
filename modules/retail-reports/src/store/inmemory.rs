//! In-memory implementation of the ReportingStore trait for testing and development
//!
//! Mirrors the SQL semantics of [`PgReportingStore`](super::PgReportingStore):
//! same ordering, same filters, same NULL handling. A store can be switched
//! into a failing mode to exercise the failure payloads.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{DataAccessError, DataAccessResult, ReportingStore};
use crate::models::{
    CustomerDeliveryRow, ExpenseHistoryRecord, LineItemRow, TransactionFact,
    ORDER_STATUS_DELIVERED, ORDER_STATUS_PICK_UP, STOCK_STATUS_BUY,
};
use crate::params::ReportWindow;

#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub transaction_date: NaiveDate,
    pub payment_status: String,
    pub unpaid: f64,
    pub total_due: f64,
    pub total_quantity: i64,
    pub selected_service: String,
    pub order_status: String,
    pub customer_id: i64,
}

#[derive(Debug, Clone)]
pub struct ItemRecord {
    pub item_id: i64,
    pub item_title: String,
    pub item_image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransactionItemRecord {
    pub transaction_item_id: i64,
    pub transaction_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub free: i64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct StockRecord {
    pub stock_date: NaiveDate,
    pub stock_status: String,
    pub total_worth_stock_in: f64,
}

#[derive(Debug, Clone)]
pub struct ExpenseHistoryEntry {
    pub expenses_history_id: i64,
    pub expense_id: Option<i64>,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<CustomerRecord>,
    transactions: Vec<TransactionRecord>,
    items: Vec<ItemRecord>,
    transaction_items: Vec<TransactionItemRecord>,
    stock: Vec<StockRecord>,
    expenses: HashMap<i64, String>,
    expenses_history: Vec<ExpenseHistoryEntry>,
}

/// ReportingStore over in-process tables
#[derive(Debug, Default)]
pub struct InMemoryReportingStore {
    tables: RwLock<Tables>,
    failing: AtomicBool,
}

impl InMemoryReportingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a database error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn insert_customer(&self, customer: CustomerRecord) {
        self.tables.write().await.customers.push(customer);
    }

    pub async fn insert_transaction(&self, transaction: TransactionRecord) {
        self.tables.write().await.transactions.push(transaction);
    }

    pub async fn insert_item(&self, item: ItemRecord) {
        self.tables.write().await.items.push(item);
    }

    pub async fn insert_transaction_item(&self, line: TransactionItemRecord) {
        self.tables.write().await.transaction_items.push(line);
    }

    pub async fn insert_stock(&self, entry: StockRecord) {
        self.tables.write().await.stock.push(entry);
    }

    pub async fn insert_expense(&self, expense_id: i64, expense_name: &str) {
        self.tables
            .write()
            .await
            .expenses
            .insert(expense_id, expense_name.to_string());
    }

    pub async fn insert_expense_history(&self, entry: ExpenseHistoryEntry) {
        self.tables.write().await.expenses_history.push(entry);
    }

    fn check(&self) -> DataAccessResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DataAccessError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn page<T>(rows: impl Iterator<Item = T>, limit: i64, offset: i64) -> Vec<T> {
    let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
    rows.skip(skip).take(take).collect()
}

fn is_eligible(tx: &TransactionRecord) -> bool {
    tx.order_status == ORDER_STATUS_DELIVERED || tx.order_status == ORDER_STATUS_PICK_UP
}

fn matches_search(customer: &CustomerRecord, search: &str) -> bool {
    let term = search.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [
        Some(customer.first_name.as_str()),
        Some(customer.last_name.as_str()),
        customer.city.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&term))
}

impl Tables {
    fn customer_deliveries(&self, search: &str) -> Vec<CustomerDeliveryRow> {
        let mut by_customer: HashMap<i64, Vec<&TransactionRecord>> = HashMap::new();
        for tx in self.transactions.iter().filter(|tx| is_eligible(tx)) {
            by_customer.entry(tx.customer_id).or_default().push(tx);
        }

        let mut rows: Vec<CustomerDeliveryRow> = self
            .customers
            .iter()
            .filter(|c| matches_search(c, search))
            .filter_map(|customer| {
                let txs = by_customer.get(&customer.customer_id)?;
                let latest = txs
                    .iter()
                    .max_by_key(|tx| (tx.transaction_date, tx.transaction_id))?;

                Some(CustomerDeliveryRow {
                    customer_id: customer.customer_id,
                    first_name: customer.first_name.clone(),
                    last_name: customer.last_name.clone(),
                    address: customer.address.clone(),
                    city: customer.city.clone(),
                    contact_number: customer.contact_number.clone(),
                    transaction_id: latest.transaction_id,
                    transaction_date: latest.transaction_date,
                    order_status: latest.order_status.clone(),
                    selected_service: latest.selected_service.clone(),
                    payment_status: latest.payment_status.clone(),
                    delivered_count: txs
                        .iter()
                        .filter(|tx| tx.order_status == ORDER_STATUS_DELIVERED)
                        .count() as i64,
                    pick_up_count: txs
                        .iter()
                        .filter(|tx| tx.order_status == ORDER_STATUS_PICK_UP)
                        .count() as i64,
                    total_unpaid: Some(txs.iter().map(|tx| tx.unpaid).sum()),
                    total_due: Some(txs.iter().map(|tx| tx.total_due).sum()),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(a.customer_id.cmp(&b.customer_id))
        });
        rows
    }
}

#[async_trait]
impl ReportingStore for InMemoryReportingStore {
    async fn fetch_expense_history_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> DataAccessResult<Vec<ExpenseHistoryRecord>> {
        self.check()?;
        let tables = self.tables.read().await;

        let mut entries: Vec<&ExpenseHistoryEntry> = tables.expenses_history.iter().collect();
        entries.sort_by(|a, b| b.expenses_history_id.cmp(&a.expenses_history_id));

        let rows = entries.into_iter().map(|entry| ExpenseHistoryRecord {
            expenses_history_id: entry.expenses_history_id,
            expense_id: entry.expense_id,
            expense_name: entry
                .expense_id
                .and_then(|id| tables.expenses.get(&id).cloned()),
            amount: entry.amount,
            expense_date: entry.expense_date,
            notes: entry.notes.clone(),
        });

        Ok(page(rows, limit, offset))
    }

    async fn count_expense_history(&self) -> DataAccessResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.expenses_history.len() as i64)
    }

    async fn delete_expense_history(&self, expenses_history_id: i64) -> DataAccessResult<u64> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.expenses_history.len();
        tables
            .expenses_history
            .retain(|entry| entry.expenses_history_id != expenses_history_id);
        Ok((before - tables.expenses_history.len()) as u64)
    }

    async fn fetch_transaction_facts(
        &self,
        window: ReportWindow,
    ) -> DataAccessResult<Vec<TransactionFact>> {
        self.check()?;
        let tables = self.tables.read().await;

        let mut txs: Vec<&TransactionRecord> = tables
            .transactions
            .iter()
            .filter(|tx| window.contains(tx.transaction_date))
            .collect();
        txs.sort_by_key(|tx| (tx.transaction_date, tx.transaction_id));

        Ok(txs
            .into_iter()
            .map(|tx| TransactionFact {
                transaction_date: tx.transaction_date,
                payment_status: tx.payment_status.clone(),
                unpaid: Some(tx.unpaid),
                total_due: Some(tx.total_due),
                total_quantity: Some(tx.total_quantity),
                selected_service: tx.selected_service.clone(),
            })
            .collect())
    }

    async fn sum_stock_purchases(&self, window: ReportWindow) -> DataAccessResult<Option<f64>> {
        self.check()?;
        let tables = self.tables.read().await;

        let worth: Vec<f64> = tables
            .stock
            .iter()
            .filter(|s| s.stock_status == STOCK_STATUS_BUY && window.contains(s.stock_date))
            .map(|s| s.total_worth_stock_in)
            .collect();

        if worth.is_empty() {
            Ok(None)
        } else {
            Ok(Some(worth.iter().sum()))
        }
    }

    async fn fetch_customer_deliveries(
        &self,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> DataAccessResult<Vec<CustomerDeliveryRow>> {
        self.check()?;
        let rows = self.tables.read().await.customer_deliveries(search);
        Ok(page(rows.into_iter(), limit, offset))
    }

    async fn count_customer_deliveries(&self, search: &str) -> DataAccessResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.customer_deliveries(search).len() as i64)
    }

    async fn fetch_line_items(&self, transaction_ids: &[i64]) -> DataAccessResult<Vec<LineItemRow>> {
        self.check()?;
        let tables = self.tables.read().await;

        let mut lines: Vec<&TransactionItemRecord> = tables
            .transaction_items
            .iter()
            .filter(|line| transaction_ids.contains(&line.transaction_id))
            .collect();
        lines.sort_by_key(|line| (line.transaction_id, line.transaction_item_id));

        Ok(lines
            .into_iter()
            .map(|line| {
                let item = tables.items.iter().find(|i| i.item_id == line.item_id);
                LineItemRow {
                    transaction_item_id: line.transaction_item_id,
                    transaction_id: line.transaction_id,
                    item_id: line.item_id,
                    quantity: Some(line.quantity),
                    free: Some(line.free),
                    total: Some(line.total),
                    item_title: item.map(|i| i.item_title.clone()),
                    item_image: item.and_then(|i| i.item_image.clone()),
                }
            })
            .collect())
    }

    async fn ping(&self) -> DataAccessResult<()> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn customer(id: i64, first: &str, last: &str, city: &str) -> CustomerRecord {
        CustomerRecord {
            customer_id: id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            address: None,
            city: Some(city.to_string()),
            contact_number: None,
        }
    }

    fn tx(id: i64, customer_id: i64, on: NaiveDate, order_status: &str) -> TransactionRecord {
        TransactionRecord {
            transaction_id: id,
            transaction_date: on,
            payment_status: "Paid".to_string(),
            unpaid: 0.0,
            total_due: 100.0,
            total_quantity: 2,
            selected_service: "Delivery".to_string(),
            order_status: order_status.to_string(),
            customer_id,
        }
    }

    #[tokio::test]
    async fn test_latest_eligible_transaction_per_customer() {
        let store = InMemoryReportingStore::new();
        store.insert_customer(customer(1, "Ana", "Smith", "Cebu")).await;
        store.insert_transaction(tx(10, 1, date(2024, 1, 5), "Delivered")).await;
        store.insert_transaction(tx(11, 1, date(2024, 2, 5), "Pick Up")).await;
        store.insert_transaction(tx(12, 1, date(2024, 3, 5), "Pending")).await;

        let rows = store.fetch_customer_deliveries("", 10, 0).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction_id, 11);
        assert_eq!(rows[0].delivered_count, 1);
        assert_eq!(rows[0].pick_up_count, 1);
        assert_eq!(rows[0].total_due, Some(200.0));
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let store = InMemoryReportingStore::new();
        store.set_failing(true);
        assert!(store.ping().await.is_err());
        store.set_failing(false);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_stock_sum_none_when_no_purchases() {
        let store = InMemoryReportingStore::new();
        store
            .insert_stock(StockRecord {
                stock_date: date(2024, 1, 1),
                stock_status: "Sell".to_string(),
                total_worth_stock_in: 50.0,
            })
            .await;
        assert_eq!(
            store.sum_stock_purchases(ReportWindow::all_time()).await.unwrap(),
            None
        );
    }
}
