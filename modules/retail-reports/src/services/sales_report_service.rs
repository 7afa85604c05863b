//! Sales Report Service
//!
//! Monthly and yearly sales reports. Each report is two independent round
//! trips: raw transaction facts for the window, then the `Buy` stock total
//! for the same window. The facts are folded in memory by
//! [`sales_aggregation`](super::sales_aggregation).

use serde::{Deserialize, Serialize};

use super::sales_aggregation::{
    accumulate_overall, coerce_amount, fold_daily, fold_monthly, round_money, DailySales,
    MonthlySales, OverallTotals,
};
use crate::params::ReportWindow;
use crate::store::{DataAccessResult, ReportingStore};

/// Daily sales report for a month/year window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub results: Vec<DailySales>,
    #[serde(flatten)]
    pub overall: OverallTotals,
    pub overall_expenses: f64,
}

/// Month-by-month sales report for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySalesReport {
    pub results: Vec<MonthlySales>,
    #[serde(flatten)]
    pub overall: OverallTotals,
    pub overall_expenses: f64,
}

/// Build the daily sales report
///
/// An empty window aggregates across all time; month and year filter
/// independently.
pub async fn monthly_report(
    store: &dyn ReportingStore,
    window: ReportWindow,
) -> DataAccessResult<SalesReport> {
    let facts = store.fetch_transaction_facts(window).await?;
    let expenses = store.sum_stock_purchases(window).await?;

    tracing::debug!(
        month = ?window.month,
        year = ?window.year,
        transactions = facts.len(),
        "Folding monthly sales report"
    );

    Ok(SalesReport {
        results: fold_daily(&facts),
        overall: accumulate_overall(&facts),
        overall_expenses: round_money(coerce_amount(expenses)),
    })
}

/// Build the twelve-month report for `year`
pub async fn yearly_report(
    store: &dyn ReportingStore,
    year: i32,
) -> DataAccessResult<YearlySalesReport> {
    let window = ReportWindow::for_year(year);
    let facts = store.fetch_transaction_facts(window).await?;
    let expenses = store.sum_stock_purchases(window).await?;

    tracing::debug!(year, transactions = facts.len(), "Folding yearly sales report");

    Ok(YearlySalesReport {
        results: fold_monthly(&facts),
        overall: accumulate_overall(&facts),
        overall_expenses: round_money(coerce_amount(expenses)),
    })
}
